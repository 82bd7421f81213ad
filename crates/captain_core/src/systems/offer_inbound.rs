//! OfferInbound system: put a staged offer on the board, superseding per
//! policy, and start its countdown chain.

use bevy_ecs::prelude::{Commands, Query, Res, ResMut};

use crate::alert::AlertResource;
use crate::clock::{CurrentEvent, EventKind, EventSubject, SessionClock};
use crate::ecs::{ActiveOffer, Countdown, OfferBoard, OfferDetails, OfferPhase};
use crate::policy::{OfferPolicy, SupersedePolicy};
use crate::presentation::OfferCard;
use crate::systems::resolve_offer;
use crate::telemetry::{OfferOutcome, SessionTelemetry};

pub fn offer_inbound_system(
    mut commands: Commands,
    mut clock: ResMut<SessionClock>,
    event: Res<CurrentEvent>,
    policy: Option<Res<OfferPolicy>>,
    alert: Option<Res<AlertResource>>,
    mut board: ResMut<OfferBoard>,
    mut telemetry: ResMut<SessionTelemetry>,
    offers: Query<(&OfferDetails, Option<&ActiveOffer>)>,
) {
    if event.0.kind != EventKind::OfferInbound {
        return;
    }
    let Some(EventSubject::Offer(staged)) = event.0.subject else {
        return;
    };
    let Ok((details, None)) = offers.get(staged) else {
        return;
    };

    let policy = policy.as_deref().copied().unwrap_or_default();

    if let Some(current) = board.current {
        match policy.supersede {
            SupersedePolicy::KeepCurrent => {
                telemetry.offers_ignored_total = telemetry.offers_ignored_total.saturating_add(1);
                tracing::debug!(ride_id = %details.0.ride_id, "offer ignored, one already active");
                commands.entity(staged).despawn();
                return;
            }
            SupersedePolicy::ReplaceCurrent => {
                if let Ok((old_details, Some(old_active))) = offers.get(current) {
                    let old_ride_id = old_details.0.ride_id.clone();
                    let presented_at_ms = old_active.presented_at_ms;
                    tracing::debug!(ride_id = %old_ride_id, "offer superseded");
                    resolve_offer(
                        &mut commands,
                        &mut board,
                        &mut telemetry,
                        current,
                        old_ride_id,
                        presented_at_ms,
                        clock.now(),
                        OfferOutcome::Superseded,
                    );
                } else {
                    board.current = None;
                }
            }
        }
    }

    let now = clock.now();
    commands.entity(staged).insert((
        ActiveOffer {
            phase: OfferPhase::Offered,
            presented_at_ms: now,
            accept_started_at_ms: None,
        },
        Countdown {
            seconds_remaining: policy.countdown_window_secs,
        },
        OfferCard::from_offer(&details.0),
    ));
    board.current = Some(staged);
    telemetry.offers_presented_total = telemetry.offers_presented_total.saturating_add(1);

    if let Some(alert) = alert.as_ref() {
        if let Err(err) = alert.0.ring() {
            telemetry.alerts_failed_total = telemetry.alerts_failed_total.saturating_add(1);
            tracing::debug!(%err, "offer alert failed");
        }
    }

    clock.schedule_in_secs(1, EventKind::CountdownTick, Some(EventSubject::Offer(staged)));
    tracing::debug!(ride_id = %details.0.ride_id, "offer presented");
}

//! OfferTimedOut system: the countdown closed with no operator action.
//!
//! Same transition as an explicit decline, but the fire-and-forget decline
//! carries the timed-out marker so the dispatcher can tell inaction from
//! choice, and telemetry counts it separately.

use bevy_ecs::prelude::{Commands, Query, Res, ResMut};

use crate::channel::{ChannelResource, DeclineReason};
use crate::clock::{CurrentEvent, EventKind, EventSubject, SessionClock};
use crate::ecs::{ActiveOffer, OfferBoard, OfferDetails, OfferPhase};
use crate::systems::resolve_offer;
use crate::telemetry::{OfferOutcome, SessionTelemetry};

pub fn offer_timeout_system(
    mut commands: Commands,
    clock: Res<SessionClock>,
    event: Res<CurrentEvent>,
    channel: Option<Res<ChannelResource>>,
    mut board: ResMut<OfferBoard>,
    mut telemetry: ResMut<SessionTelemetry>,
    offers: Query<(&OfferDetails, &ActiveOffer)>,
) {
    if event.0.kind != EventKind::OfferTimedOut {
        return;
    }
    let Some(EventSubject::Offer(entity)) = event.0.subject else {
        return;
    };
    if board.current != Some(entity) {
        return;
    }
    let Ok((details, active)) = offers.get(entity) else {
        return;
    };
    if active.phase != OfferPhase::Offered {
        return;
    }

    let ride_id = details.0.ride_id.clone();
    if let Some(channel) = channel.as_ref() {
        if let Err(err) = channel.0.send_decline(&ride_id, DeclineReason::TimedOut) {
            telemetry.decline_notify_failures_total =
                telemetry.decline_notify_failures_total.saturating_add(1);
            tracing::debug!(%ride_id, %err, "timeout decline notification failed");
        }
    }
    tracing::info!(%ride_id, "offer timed out");
    resolve_offer(
        &mut commands,
        &mut board,
        &mut telemetry,
        entity,
        ride_id,
        active.presented_at_ms,
        clock.now(),
        OfferOutcome::TimedOut,
    );
}

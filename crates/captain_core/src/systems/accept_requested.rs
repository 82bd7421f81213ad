//! AcceptPressed system: hand the accept to the realtime channel.
//!
//! Only a visible offer in `Offered` reacts; a second press while the first
//! accept is pending, or a press with nothing on the board, is a no-op.

use bevy_ecs::prelude::{Query, Res, ResMut};

use crate::channel::ChannelResource;
use crate::clock::{CurrentEvent, EventKind, EventSubject, SessionClock};
use crate::ecs::{ActiveOffer, OfferBoard, OfferDetails, OfferPhase};
use crate::notices::{OperatorNotice, OperatorNotices};
use crate::policy::OfferPolicy;
use crate::telemetry::SessionTelemetry;

pub fn accept_requested_system(
    mut clock: ResMut<SessionClock>,
    event: Res<CurrentEvent>,
    policy: Option<Res<OfferPolicy>>,
    channel: Option<Res<ChannelResource>>,
    board: Res<OfferBoard>,
    mut notices: ResMut<OperatorNotices>,
    mut telemetry: ResMut<SessionTelemetry>,
    mut offers: Query<(&OfferDetails, &mut ActiveOffer)>,
) {
    if event.0.kind != EventKind::AcceptPressed {
        return;
    }
    let Some(EventSubject::Offer(entity)) = event.0.subject else {
        return;
    };
    if board.current != Some(entity) {
        return;
    }
    let Ok((details, mut active)) = offers.get_mut(entity) else {
        return;
    };
    if active.phase != OfferPhase::Offered {
        return;
    }

    let ride_id = details.0.ride_id.clone();
    let send_result = match channel.as_ref() {
        Some(channel) => channel.0.send_accept(&ride_id),
        None => Err(crate::channel::ChannelError::NotConnected),
    };

    match send_result {
        Ok(()) => {
            active.phase = OfferPhase::Accepting;
            active.accept_started_at_ms = Some(clock.now());
            let policy = policy.as_deref().copied().unwrap_or_default();
            if let Some(deadline_ms) = policy.accept_ack_deadline_ms {
                clock.schedule_in_ms(
                    deadline_ms,
                    EventKind::AcceptDeadline,
                    Some(EventSubject::Offer(entity)),
                );
            }
            tracing::debug!(%ride_id, "accept sent, awaiting acknowledgement");
        }
        Err(err) => {
            telemetry.accept_send_failures_total =
                telemetry.accept_send_failures_total.saturating_add(1);
            notices.0.push_back(OperatorNotice::ChannelUnavailable {
                ride_id: ride_id.clone(),
                detail: err.to_string(),
            });
            tracing::warn!(%ride_id, %err, "accept send failed, offer stays interactive");
        }
    }
}

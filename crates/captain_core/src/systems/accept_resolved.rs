//! AcceptResolved system: apply the channel's answer to a pending accept.
//!
//! A positive acknowledgement resolves the offer and signals navigation to
//! the active-ride view; a negative one restores the same offer to `Offered`
//! so the operator can retry or decline. Acknowledgements that arrive for a
//! ride no longer on the board are dropped.

use bevy_ecs::prelude::{Commands, Query, Res, ResMut};

use crate::channel::PendingAcks;
use crate::clock::{CurrentEvent, EventKind, EventSubject, SessionClock};
use crate::ecs::{ActiveOffer, OfferBoard, OfferDetails, OfferPhase};
use crate::notices::{NavigationRequest, OperatorNotice, OperatorNotices};
use crate::systems::resolve_offer;
use crate::telemetry::{OfferOutcome, SessionTelemetry};

pub fn accept_resolved_system(
    mut commands: Commands,
    clock: Res<SessionClock>,
    event: Res<CurrentEvent>,
    mut acks: ResMut<PendingAcks>,
    mut board: ResMut<OfferBoard>,
    mut notices: ResMut<OperatorNotices>,
    mut navigation: ResMut<NavigationRequest>,
    mut telemetry: ResMut<SessionTelemetry>,
    mut offers: Query<(&OfferDetails, &mut ActiveOffer)>,
) {
    if event.0.kind != EventKind::AcceptResolved {
        return;
    }
    let Some(ack) = acks.0.pop_front() else {
        return;
    };
    let Some(EventSubject::Offer(entity)) = event.0.subject else {
        return;
    };
    if board.current != Some(entity) {
        return;
    }
    let Ok((details, mut active)) = offers.get_mut(entity) else {
        return;
    };
    if active.phase != OfferPhase::Accepting {
        return;
    }
    if ack.ride_id != details.0.ride_id {
        return;
    }

    match ack.outcome {
        Ok(()) => {
            let ride_id = details.0.ride_id.clone();
            let presented_at_ms = active.presented_at_ms;
            navigation.0 = Some(ride_id.clone());
            tracing::info!(%ride_id, "ride accepted");
            resolve_offer(
                &mut commands,
                &mut board,
                &mut telemetry,
                entity,
                ride_id,
                presented_at_ms,
                clock.now(),
                OfferOutcome::Accepted,
            );
        }
        Err(rejection) => {
            active.phase = OfferPhase::Offered;
            active.accept_started_at_ms = None;
            telemetry.accept_rejections_total = telemetry.accept_rejections_total.saturating_add(1);
            tracing::warn!(
                ride_id = %details.0.ride_id,
                reason = %rejection.reason,
                "accept rejected, offer stays interactive"
            );
            notices.0.push_back(OperatorNotice::AcceptRejected {
                ride_id: details.0.ride_id.clone(),
                reason: rejection.reason,
            });
        }
    }
}

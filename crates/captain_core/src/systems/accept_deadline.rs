//! AcceptDeadline system: give the operator back an offer whose accept was
//! never acknowledged.
//!
//! Each accept attempt schedules its own deadline event. A deadline left over
//! from an earlier attempt no longer matches `accept_started_at + deadline`
//! and is dropped, so only the live attempt can expire.

use bevy_ecs::prelude::{Query, Res, ResMut};

use crate::clock::{CurrentEvent, EventKind, EventSubject};
use crate::ecs::{ActiveOffer, OfferBoard, OfferDetails, OfferPhase};
use crate::notices::{OperatorNotice, OperatorNotices};
use crate::policy::OfferPolicy;
use crate::telemetry::SessionTelemetry;

pub fn accept_deadline_system(
    event: Res<CurrentEvent>,
    policy: Option<Res<OfferPolicy>>,
    board: Res<OfferBoard>,
    mut notices: ResMut<OperatorNotices>,
    mut telemetry: ResMut<SessionTelemetry>,
    mut offers: Query<(&OfferDetails, &mut ActiveOffer)>,
) {
    if event.0.kind != EventKind::AcceptDeadline {
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
    if active.phase != OfferPhase::Accepting {
        return;
    }
    let Some(started_at_ms) = active.accept_started_at_ms else {
        return;
    };
    let policy = policy.as_deref().copied().unwrap_or_default();
    let Some(deadline_ms) = policy.accept_ack_deadline_ms else {
        return;
    };
    if started_at_ms + deadline_ms != event.0.timestamp_ms {
        return;
    }

    active.phase = OfferPhase::Offered;
    active.accept_started_at_ms = None;
    telemetry.accept_deadline_expiries_total =
        telemetry.accept_deadline_expiries_total.saturating_add(1);
    notices.0.push_back(OperatorNotice::AcceptUnacknowledged {
        ride_id: details.0.ride_id.clone(),
    });
    tracing::warn!(
        ride_id = %details.0.ride_id,
        "accept unacknowledged within deadline, offer stays interactive"
    );
}

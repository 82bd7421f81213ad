use bevy_ecs::prelude::{Commands, Entity};

use crate::ecs::OfferBoard;
use crate::offer::RideId;
use crate::telemetry::{OfferOutcome, OfferOutcomeRecord, SessionTelemetry};

/// Take an offer off the board: record the outcome, bump the matching counter,
/// and despawn the entity so any queued events keyed to it resolve to nothing.
pub(crate) fn resolve_offer(
    commands: &mut Commands,
    board: &mut OfferBoard,
    telemetry: &mut SessionTelemetry,
    entity: Entity,
    ride_id: RideId,
    presented_at_ms: u64,
    resolved_at_ms: u64,
    outcome: OfferOutcome,
) {
    if board.current == Some(entity) {
        board.current = None;
    }
    match outcome {
        OfferOutcome::Accepted => {
            telemetry.offers_accepted_total = telemetry.offers_accepted_total.saturating_add(1);
        }
        OfferOutcome::Declined => {
            telemetry.offers_declined_total = telemetry.offers_declined_total.saturating_add(1);
        }
        OfferOutcome::TimedOut => {
            telemetry.offers_timed_out_total = telemetry.offers_timed_out_total.saturating_add(1);
        }
        OfferOutcome::Superseded => {
            telemetry.offers_superseded_total = telemetry.offers_superseded_total.saturating_add(1);
        }
    }
    telemetry.resolved_offers.push(OfferOutcomeRecord {
        ride_id,
        outcome,
        presented_at_ms,
        resolved_at_ms,
    });
    commands.entity(entity).despawn();
}

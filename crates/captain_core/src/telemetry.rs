//! Session telemetry: counters and resolved-offer records for analysis.

use bevy_ecs::prelude::Resource;

use crate::offer::RideId;

/// How an offer left the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OfferOutcome {
    Accepted,
    Declined,
    TimedOut,
    Superseded,
}

/// One resolved offer. Timestamps are session ms.
#[derive(Debug, Clone)]
pub struct OfferOutcomeRecord {
    pub ride_id: RideId,
    pub outcome: OfferOutcome,
    pub presented_at_ms: u64,
    pub resolved_at_ms: u64,
}

impl OfferOutcomeRecord {
    /// Time the offer stayed on the board.
    pub fn time_on_board(&self) -> u64 {
        self.resolved_at_ms.saturating_sub(self.presented_at_ms)
    }
}

/// Collects session telemetry. Insert as a resource to record offer outcomes.
#[derive(Debug, Default, Resource)]
pub struct SessionTelemetry {
    pub offers_presented_total: u64,
    pub offers_ignored_total: u64,
    pub offers_accepted_total: u64,
    pub offers_declined_total: u64,
    pub offers_timed_out_total: u64,
    pub offers_superseded_total: u64,
    pub accept_send_failures_total: u64,
    pub accept_rejections_total: u64,
    pub accept_deadline_expiries_total: u64,
    pub decode_failures_total: u64,
    pub alerts_failed_total: u64,
    pub decline_notify_failures_total: u64,
    pub location_pings_total: u64,
    pub location_ping_failures_total: u64,
    pub resolved_offers: Vec<OfferOutcomeRecord>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn time_on_board_is_resolution_minus_presentation() {
        let record = OfferOutcomeRecord {
            ride_id: RideId::new("r1"),
            outcome: OfferOutcome::TimedOut,
            presented_at_ms: 2000,
            resolved_at_ms: 32_000,
        };
        assert_eq!(record.time_on_board(), 30_000);
    }
}

//! Drive a feed through a driver session and summarize what happened.

use std::sync::Arc;

use serde::Serialize;

use captain_core::channel::{AcceptAck, AcceptRejection};
use captain_core::policy::OfferPolicy;
use captain_core::session::{DriverSession, SessionParams};

use crate::channel::ConsoleChannel;
use crate::feed::{FeedAction, FeedEvent};

#[derive(Debug, Serialize)]
pub struct OutcomeLine {
    pub ride_id: String,
    pub outcome: String,
    pub seconds_on_board: u64,
}

#[derive(Debug, Serialize)]
pub struct ReplayReport {
    pub events_applied: usize,
    pub offers_presented: u64,
    pub offers_accepted: u64,
    pub offers_declined: u64,
    pub offers_timed_out: u64,
    pub offers_superseded: u64,
    pub offers_ignored: u64,
    pub accept_send_failures: u64,
    pub accept_rejections: u64,
    pub accept_deadline_expiries: u64,
    pub location_pings: u64,
    pub channel_accepts: usize,
    pub channel_declines: usize,
    pub outcomes: Vec<OutcomeLine>,
    pub operator_notices: Vec<String>,
}

/// Replay `feed` (sorted by timestamp) through a fresh session. After the
/// last event the session runs for `settle_secs` more so open countdowns
/// resolve.
pub fn run_feed(feed: &[FeedEvent], policy: OfferPolicy, settle_secs: u64) -> ReplayReport {
    let channel = Arc::new(ConsoleChannel::new());
    let mut session = DriverSession::start(
        SessionParams::default()
            .with_policy(policy)
            .with_channel(channel.clone()),
    );

    let mut events_applied = 0;
    for event in feed {
        let now = session.now_ms();
        if event.at_ms > now {
            session.advance_ms(event.at_ms - now);
        }
        match &event.action {
            FeedAction::Offer { offer } => session.present_offer(offer.clone()),
            FeedAction::Accept => session.press_accept(),
            FeedAction::Reject => session.press_reject(),
            FeedAction::Ack { ride_id, error } => {
                let outcome = match error {
                    None => Ok(()),
                    Some(reason) => Err(AcceptRejection {
                        reason: reason.clone(),
                    }),
                };
                session.deliver_accept_ack(AcceptAck {
                    ride_id: ride_id.clone(),
                    outcome,
                });
            }
            FeedAction::Location { lat, lng } => session.update_location(*lat, *lng),
            FeedAction::Online => session.go_online(),
            FeedAction::Offline => session.go_offline(),
        }
        events_applied += 1;
    }

    session.go_offline();
    session.advance_secs(settle_secs);

    let operator_notices = session
        .take_notices()
        .into_iter()
        .map(|notice| format!("{notice:?}"))
        .collect();

    let telemetry = session.telemetry();
    ReplayReport {
        events_applied,
        offers_presented: telemetry.offers_presented_total,
        offers_accepted: telemetry.offers_accepted_total,
        offers_declined: telemetry.offers_declined_total,
        offers_timed_out: telemetry.offers_timed_out_total,
        offers_superseded: telemetry.offers_superseded_total,
        offers_ignored: telemetry.offers_ignored_total,
        accept_send_failures: telemetry.accept_send_failures_total,
        accept_rejections: telemetry.accept_rejections_total,
        accept_deadline_expiries: telemetry.accept_deadline_expiries_total,
        location_pings: telemetry.location_pings_total,
        channel_accepts: channel.accepts(),
        channel_declines: channel.declines(),
        outcomes: telemetry
            .resolved_offers
            .iter()
            .map(|record| OutcomeLine {
                ride_id: record.ride_id.to_string(),
                outcome: format!("{:?}", record.outcome),
                seconds_on_board: record.time_on_board() / 1000,
            })
            .collect(),
        operator_notices,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use captain_core::offer::{Place, RideId, RideOffer};

    fn offer(ride_id: &str) -> RideOffer {
        RideOffer {
            ride_id: RideId::new(ride_id),
            rider_name: Some("Asha".to_string()),
            fare: 12.0,
            distance_km: None,
            duration_min: None,
            pickup: Place {
                address: "A".to_string(),
            },
            destination: Place {
                address: "B".to_string(),
            },
        }
    }

    #[test]
    fn accept_and_timeout_both_land_in_the_report() {
        let feed = vec![
            FeedEvent {
                at_ms: 0,
                action: FeedAction::Offer { offer: offer("r1") },
            },
            FeedEvent {
                at_ms: 3000,
                action: FeedAction::Accept,
            },
            FeedEvent {
                at_ms: 3500,
                action: FeedAction::Ack {
                    ride_id: RideId::new("r1"),
                    error: None,
                },
            },
            FeedEvent {
                at_ms: 10_000,
                action: FeedAction::Offer { offer: offer("r2") },
            },
        ];

        let report = run_feed(&feed, OfferPolicy::default(), 35);

        assert_eq!(report.events_applied, 4);
        assert_eq!(report.offers_presented, 2);
        assert_eq!(report.offers_accepted, 1);
        assert_eq!(report.offers_timed_out, 1);
        assert_eq!(report.channel_accepts, 1);
        assert_eq!(report.outcomes.len(), 2);
        assert_eq!(report.outcomes[0].ride_id, "r1");
        assert_eq!(report.outcomes[0].outcome, "Accepted");
        assert_eq!(report.outcomes[1].outcome, "TimedOut");
        assert_eq!(report.outcomes[1].seconds_on_board, 30);
    }

    #[test]
    fn rejected_ack_shows_up_as_a_notice() {
        let feed = vec![
            FeedEvent {
                at_ms: 0,
                action: FeedAction::Offer { offer: offer("r1") },
            },
            FeedEvent {
                at_ms: 2000,
                action: FeedAction::Accept,
            },
            FeedEvent {
                at_ms: 2500,
                action: FeedAction::Ack {
                    ride_id: RideId::new("r1"),
                    error: Some("ride already taken".to_string()),
                },
            },
            FeedEvent {
                at_ms: 3000,
                action: FeedAction::Reject,
            },
        ];

        let report = run_feed(&feed, OfferPolicy::default(), 5);

        assert_eq!(report.accept_rejections, 1);
        assert_eq!(report.offers_declined, 1);
        assert_eq!(report.operator_notices.len(), 1);
        assert!(report.operator_notices[0].contains("ride already taken"));
    }
}

//! Deterministic demo feed generator: a driver going online, wandering around
//! town, and working through a run of offers with mixed outcomes.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use captain_core::offer::{Place, RideId, RideOffer};

use crate::feed::{FeedAction, FeedEvent};

/// Gap between offers; leaves room for the 30 s window plus a breather.
const OFFER_SPACING_MS: u64 = 40_000;
const LOCATION_STEP_MS: u64 = 3000;

const RIDER_NAMES: [&str; 4] = ["Asha", "Jonas", "Mei", "Tunde"];
const PICKUPS: [&str; 4] = [
    "12 Harbor Road",
    "Central Station",
    "Old Market Square",
    "University Gate 3",
];
const DESTINATIONS: [&str; 4] = [
    "Airport Terminal 2",
    "Riverside Mall",
    "Tech Park East",
    "General Hospital",
];

pub fn generate_feed(seed: u64, offer_count: usize) -> Vec<FeedEvent> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut feed = vec![FeedEvent {
        at_ms: 0,
        action: FeedAction::Online,
    }];

    let end_ms = offer_count as u64 * OFFER_SPACING_MS + OFFER_SPACING_MS;

    // Random-walk location track, one fix per broadcast interval.
    let mut lat = 50.0_f64;
    let mut lng = 50.0_f64;
    let mut at_ms = 0;
    while at_ms < end_ms {
        lat += (rng.gen::<f64>() - 0.5) * 0.4;
        lng += (rng.gen::<f64>() - 0.5) * 0.4;
        feed.push(FeedEvent {
            at_ms,
            action: FeedAction::Location { lat, lng },
        });
        at_ms += LOCATION_STEP_MS;
    }

    for i in 0..offer_count {
        let offered_at = (i as u64 + 1) * OFFER_SPACING_MS;
        let ride_id = RideId::new(format!("r{}", i + 1));
        let offer = RideOffer {
            ride_id: ride_id.clone(),
            rider_name: if rng.gen_bool(0.8) {
                Some(RIDER_NAMES[rng.gen_range(0..RIDER_NAMES.len())].to_string())
            } else {
                None
            },
            fare: rng.gen_range(5.0..50.0),
            distance_km: Some((rng.gen_range(1.0..15.0_f64) * 10.0).round() / 10.0),
            duration_min: Some(rng.gen_range(3.0..35.0_f64).round()),
            pickup: Place {
                address: PICKUPS[rng.gen_range(0..PICKUPS.len())].to_string(),
            },
            destination: Place {
                address: DESTINATIONS[rng.gen_range(0..DESTINATIONS.len())].to_string(),
            },
        };
        feed.push(FeedEvent {
            at_ms: offered_at,
            action: FeedAction::Offer { offer },
        });

        let roll: f64 = rng.gen();
        if roll < 0.6 {
            // Accept after a short look; the backend confirms shortly after.
            let pressed_at = offered_at + rng.gen_range(2..10) * 1000;
            feed.push(FeedEvent {
                at_ms: pressed_at,
                action: FeedAction::Accept,
            });
            feed.push(FeedEvent {
                at_ms: pressed_at + 500,
                action: FeedAction::Ack {
                    ride_id,
                    error: if rng.gen_bool(0.15) {
                        Some("ride already taken".to_string())
                    } else {
                        None
                    },
                },
            });
        } else if roll < 0.8 {
            feed.push(FeedEvent {
                at_ms: offered_at + rng.gen_range(2..15) * 1000,
                action: FeedAction::Reject,
            });
        }
        // Otherwise the offer is left to time out.
    }

    feed.push(FeedEvent {
        at_ms: end_ms,
        action: FeedAction::Offline,
    });
    feed.sort_by_key(|event| event.at_ms);
    feed
}

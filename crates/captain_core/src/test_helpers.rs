//! Test helpers for common test setup and utilities.
//!
//! This module provides shared fixtures to reduce duplication across test
//! files: a recording channel, alert sinks with scripted behavior, and canned
//! offers.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use crate::alert::{AlertError, AlertSink};
use crate::channel::{ChannelError, DeclineReason, OfferChannel};
use crate::location::LocationUpdate;
use crate::offer::{Place, RideId, RideOffer};

/// Channel double that records every outbound call. With
/// [RecordingChannel::refusing_sends] every send fails as if the transport
/// were down.
#[derive(Debug, Default)]
pub struct RecordingChannel {
    pub accepts: Mutex<Vec<RideId>>,
    pub declines: Mutex<Vec<(RideId, DeclineReason)>>,
    pub locations: Mutex<Vec<LocationUpdate>>,
    refuse_sends: bool,
}

impl RecordingChannel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn refusing_sends() -> Self {
        Self {
            refuse_sends: true,
            ..Self::default()
        }
    }

    pub fn accept_count(&self) -> usize {
        self.accepts.lock().expect("accepts lock").len()
    }

    pub fn decline_count(&self) -> usize {
        self.declines.lock().expect("declines lock").len()
    }

    pub fn location_count(&self) -> usize {
        self.locations.lock().expect("locations lock").len()
    }

    pub fn last_decline(&self) -> Option<(RideId, DeclineReason)> {
        self.declines.lock().expect("declines lock").last().cloned()
    }
}

impl OfferChannel for RecordingChannel {
    fn send_accept(&self, ride_id: &RideId) -> Result<(), ChannelError> {
        if self.refuse_sends {
            return Err(ChannelError::NotConnected);
        }
        self.accepts.lock().expect("accepts lock").push(ride_id.clone());
        Ok(())
    }

    fn send_decline(&self, ride_id: &RideId, reason: DeclineReason) -> Result<(), ChannelError> {
        if self.refuse_sends {
            return Err(ChannelError::NotConnected);
        }
        self.declines
            .lock()
            .expect("declines lock")
            .push((ride_id.clone(), reason));
        Ok(())
    }

    fn send_location(&self, update: &LocationUpdate) -> Result<(), ChannelError> {
        if self.refuse_sends {
            return Err(ChannelError::NotConnected);
        }
        self.locations.lock().expect("locations lock").push(*update);
        Ok(())
    }
}

/// Alert sink that counts rings; optionally fails every time.
#[derive(Debug, Default)]
pub struct CountingAlert {
    rings: AtomicUsize,
    fail: bool,
}

impl CountingAlert {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            rings: AtomicUsize::new(0),
            fail: true,
        }
    }

    pub fn ring_count(&self) -> usize {
        self.rings.load(Ordering::SeqCst)
    }
}

impl AlertSink for CountingAlert {
    fn ring(&self) -> Result<(), AlertError> {
        self.rings.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            Err(AlertError("no audio device".to_string()))
        } else {
            Ok(())
        }
    }
}

/// A canned offer with every display field populated.
pub fn sample_offer(ride_id: &str) -> RideOffer {
    RideOffer {
        ride_id: RideId::new(ride_id),
        rider_name: Some("Asha".to_string()),
        fare: 123.7,
        distance_km: Some(3.2),
        duration_min: Some(12.0),
        pickup: Place {
            address: "12 Harbor Road".to_string(),
        },
        destination: Place {
            address: "Airport Terminal 2".to_string(),
        },
    }
}

/// A minimal offer: no rider name, no distance/duration.
pub fn bare_offer(ride_id: &str) -> RideOffer {
    RideOffer {
        ride_id: RideId::new(ride_id),
        rider_name: None,
        fare: 9.0,
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

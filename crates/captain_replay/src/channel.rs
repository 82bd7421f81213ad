//! Console-backed channel: logs every outbound call instead of hitting a
//! transport, so a replay is observable without any backend running.

use std::sync::atomic::{AtomicUsize, Ordering};

use captain_core::channel::{ChannelError, DeclineReason, OfferChannel};
use captain_core::location::LocationUpdate;
use captain_core::offer::RideId;

#[derive(Debug, Default)]
pub struct ConsoleChannel {
    accepts: AtomicUsize,
    declines: AtomicUsize,
    locations: AtomicUsize,
}

impl ConsoleChannel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn accepts(&self) -> usize {
        self.accepts.load(Ordering::SeqCst)
    }

    pub fn declines(&self) -> usize {
        self.declines.load(Ordering::SeqCst)
    }

    pub fn locations(&self) -> usize {
        self.locations.load(Ordering::SeqCst)
    }
}

impl OfferChannel for ConsoleChannel {
    fn send_accept(&self, ride_id: &RideId) -> Result<(), ChannelError> {
        self.accepts.fetch_add(1, Ordering::SeqCst);
        tracing::info!(%ride_id, "-> accept");
        Ok(())
    }

    fn send_decline(&self, ride_id: &RideId, reason: DeclineReason) -> Result<(), ChannelError> {
        self.declines.fetch_add(1, Ordering::SeqCst);
        tracing::info!(%ride_id, ?reason, "-> decline");
        Ok(())
    }

    fn send_location(&self, update: &LocationUpdate) -> Result<(), ChannelError> {
        self.locations.fetch_add(1, Ordering::SeqCst);
        tracing::debug!(lat = update.lat, lng = update.lng, "-> location");
        Ok(())
    }
}

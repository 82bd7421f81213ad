//! Realtime-channel seam: the transport that delivers offers and carries
//! accept/decline calls lives behind [OfferChannel].

use std::collections::VecDeque;
use std::sync::Arc;

use bevy_ecs::prelude::Resource;
use thiserror::Error;

use crate::location::LocationUpdate;
use crate::offer::RideId;

#[derive(Debug, Error)]
pub enum ChannelError {
    #[error("realtime channel is not connected")]
    NotConnected,
    #[error("channel send failed: {0}")]
    Send(String),
}

/// Why a decline notification is sent. Lets the dispatcher distinguish
/// driver inaction from an explicit choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeclineReason {
    Declined,
    TimedOut,
}

/// Outbound surface of the realtime channel.
///
/// `send_accept` only covers handing the request to the transport; the
/// backend's answer arrives later as an [AcceptAck] through
/// `DriverSession::deliver_accept_ack`. Decline and location sends are
/// fire-and-forget from the session's point of view.
pub trait OfferChannel: Send + Sync {
    fn send_accept(&self, ride_id: &RideId) -> Result<(), ChannelError>;
    fn send_decline(&self, ride_id: &RideId, reason: DeclineReason) -> Result<(), ChannelError>;
    fn send_location(&self, update: &LocationUpdate) -> Result<(), ChannelError>;
}

/// Placeholder wired before the transport is initialized; every send fails.
#[derive(Debug, Default)]
pub struct NullChannel;

impl OfferChannel for NullChannel {
    fn send_accept(&self, _ride_id: &RideId) -> Result<(), ChannelError> {
        Err(ChannelError::NotConnected)
    }

    fn send_decline(&self, _ride_id: &RideId, _reason: DeclineReason) -> Result<(), ChannelError> {
        Err(ChannelError::NotConnected)
    }

    fn send_location(&self, _update: &LocationUpdate) -> Result<(), ChannelError> {
        Err(ChannelError::NotConnected)
    }
}

#[derive(Resource)]
pub struct ChannelResource(pub Arc<dyn OfferChannel>);

/// The backend declined the accept (e.g. the ride went to another driver).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("accept rejected: {reason}")]
pub struct AcceptRejection {
    pub reason: String,
}

/// Acknowledgement for an accept previously handed to the channel.
#[derive(Debug, Clone, PartialEq)]
pub struct AcceptAck {
    pub ride_id: RideId,
    pub outcome: Result<(), AcceptRejection>,
}

/// Acknowledgements delivered by the dispatcher, drained when the
/// AcceptResolved event runs.
#[derive(Debug, Default, Resource)]
pub struct PendingAcks(pub VecDeque<AcceptAck>);

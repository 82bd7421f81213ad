use std::collections::VecDeque;

use bevy_ecs::prelude::Resource;

use crate::offer::RideId;

/// Operator-visible messages produced by accept failures. The session never
/// escalates these; the offer stays interactive and retryable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OperatorNotice {
    /// The realtime channel refused the accept send outright.
    ChannelUnavailable { ride_id: RideId, detail: String },
    /// The backend declined the accept (e.g. ride already taken).
    AcceptRejected { ride_id: RideId, reason: String },
    /// No acknowledgement arrived within the policy deadline.
    AcceptUnacknowledged { ride_id: RideId },
}

#[derive(Debug, Default, Resource)]
pub struct OperatorNotices(pub VecDeque<OperatorNotice>);

/// Set when an accepted ride should move the operator to the active-ride view.
#[derive(Debug, Default, Resource)]
pub struct NavigationRequest(pub Option<RideId>);

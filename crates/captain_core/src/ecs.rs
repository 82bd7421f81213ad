use bevy_ecs::prelude::{Component, Entity, Resource};

use crate::offer::RideOffer;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OfferPhase {
    /// Visible and counting down; accept/reject are interactive.
    Offered,
    /// Accept sent, waiting for the channel acknowledgement.
    Accepting,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Component)]
pub struct ActiveOffer {
    pub phase: OfferPhase,
    /// Session time when the offer became visible.
    pub presented_at_ms: u64,
    /// Session time when the in-flight accept was sent; cleared when it resolves.
    pub accept_started_at_ms: Option<u64>,
}

#[derive(Debug, Clone, Component)]
pub struct OfferDetails(pub RideOffer);

/// Seconds left before the offer auto-declines. Decrements once per second
/// while the offer is in [OfferPhase::Offered].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Component)]
pub struct Countdown {
    pub seconds_remaining: u32,
}

/// Owns the at-most-one-active-offer invariant. Events whose subject is not
/// the current entity are stale and ignored by every system.
#[derive(Debug, Default, Resource)]
pub struct OfferBoard {
    pub current: Option<Entity>,
}

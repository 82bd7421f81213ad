use bevy_ecs::prelude::Resource;

/// How a new inbound offer is handled while one is already on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SupersedePolicy {
    /// The newcomer replaces the current offer; the old one resolves as superseded.
    #[default]
    ReplaceCurrent,
    /// The newcomer is dropped; the current offer keeps its countdown.
    KeepCurrent,
}

#[derive(Debug, Clone, Copy, Resource)]
pub struct OfferPolicy {
    /// Seconds an offer stays actionable before it auto-declines.
    pub countdown_window_secs: u32,
    /// Max ms to wait for the channel to acknowledge an accept.
    /// `None` waits indefinitely.
    pub accept_ack_deadline_ms: Option<u64>,
    pub supersede: SupersedePolicy,
}

impl Default for OfferPolicy {
    fn default() -> Self {
        Self {
            countdown_window_secs: 30,
            accept_ack_deadline_ms: Some(15_000),
            supersede: SupersedePolicy::default(),
        }
    }
}

/// Periodic location broadcasting while the driver is online.
#[derive(Debug, Clone, Copy, Resource)]
pub struct LocationBroadcast {
    /// When false, the ping chain dies at the next event.
    pub enabled: bool,
    /// Interval in ms between location sends.
    pub interval_ms: u64,
}

impl Default for LocationBroadcast {
    fn default() -> Self {
        Self {
            enabled: false,
            interval_ms: 3000,
        }
    }
}

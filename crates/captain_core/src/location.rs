use bevy_ecs::prelude::Resource;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LocationUpdate {
    pub lat: f64,
    pub lng: f64,
    /// Session time when the fix was recorded.
    pub recorded_at_ms: u64,
}

/// Most recent fix reported by the device; broadcast on the ping interval
/// while the driver is online.
#[derive(Debug, Default, Resource)]
pub struct LastKnownLocation(pub Option<LocationUpdate>);

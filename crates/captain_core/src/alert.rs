use std::sync::Arc;

use bevy_ecs::prelude::Resource;
use thiserror::Error;

#[derive(Debug, Error)]
#[error("alert playback failed: {0}")]
pub struct AlertError(pub String);

/// Audible/visual attention signal for a new offer. Best-effort: the session
/// swallows failures and only counts them.
pub trait AlertSink: Send + Sync {
    fn ring(&self) -> Result<(), AlertError>;
}

/// No-op sink for sessions without an audio device.
#[derive(Debug, Default)]
pub struct SilentAlert;

impl AlertSink for SilentAlert {
    fn ring(&self) -> Result<(), AlertError> {
        Ok(())
    }
}

#[derive(Resource)]
pub struct AlertResource(pub Arc<dyn AlertSink>);

use bevy_ecs::prelude::Resource;
use serde::{Deserialize, Serialize};

/// Display name used when the session runs without a signed-in user.
pub const FALLBACK_DISPLAY_NAME: &str = "Driver";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Captain,
    Rider,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionUser {
    pub id: u64,
    pub name: String,
    pub role: UserRole,
}

/// Driver identity for the session; `None` runs in demo mode.
#[derive(Debug, Default, Resource)]
pub struct CurrentUser(pub Option<SessionUser>);

impl CurrentUser {
    pub fn display_name(&self) -> &str {
        self.0
            .as_ref()
            .map(|user| user.name.as_str())
            .unwrap_or(FALLBACK_DISPLAY_NAME)
    }

    pub fn is_captain(&self) -> bool {
        matches!(&self.0, Some(user) if user.role == UserRole::Captain)
    }
}

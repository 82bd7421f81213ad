//! SessionStarted system: time-zero bootstrap for a driver session.

use bevy_ecs::prelude::{Res, ResMut};

use crate::clock::{CurrentEvent, EventKind, SessionClock};
use crate::identity::CurrentUser;
use crate::policy::LocationBroadcast;

pub fn session_started_system(
    mut clock: ResMut<SessionClock>,
    event: Res<CurrentEvent>,
    user: Option<Res<CurrentUser>>,
    broadcast: Option<Res<LocationBroadcast>>,
) {
    if event.0.kind != EventKind::SessionStarted {
        return;
    }

    if let Some(user) = user.as_ref() {
        tracing::info!(driver = user.display_name(), "driver session started");
        if !user.is_captain() && user.0.is_some() {
            tracing::warn!("signed-in user is not a captain; running anyway");
        }
    }

    let broadcast = broadcast.as_deref().copied().unwrap_or_default();
    if broadcast.enabled {
        clock.schedule_in_ms(broadcast.interval_ms, EventKind::LocationPing, None);
    }
}

//! LocationPing system: broadcast the last known fix while online.
//!
//! The chain reschedules itself every interval and dies as soon as
//! broadcasting is disabled; `DriverSession::go_online` starts a fresh one.

use bevy_ecs::prelude::{Res, ResMut};

use crate::channel::ChannelResource;
use crate::clock::{CurrentEvent, EventKind, SessionClock};
use crate::location::LastKnownLocation;
use crate::policy::LocationBroadcast;
use crate::telemetry::SessionTelemetry;

pub fn location_ping_system(
    mut clock: ResMut<SessionClock>,
    event: Res<CurrentEvent>,
    config: Option<Res<LocationBroadcast>>,
    channel: Option<Res<ChannelResource>>,
    last: Option<Res<LastKnownLocation>>,
    mut telemetry: ResMut<SessionTelemetry>,
) {
    if event.0.kind != EventKind::LocationPing {
        return;
    }
    let Some(config) = config.as_deref().copied() else {
        return;
    };
    if !config.enabled {
        return;
    }

    let fix = last.as_ref().and_then(|l| l.0);
    if let (Some(channel), Some(fix)) = (channel.as_ref(), fix) {
        match channel.0.send_location(&fix) {
            Ok(()) => {
                telemetry.location_pings_total = telemetry.location_pings_total.saturating_add(1);
            }
            Err(err) => {
                telemetry.location_ping_failures_total =
                    telemetry.location_ping_failures_total.saturating_add(1);
                tracing::debug!(%err, "location send failed");
            }
        }
    }

    clock.schedule_in_ms(config.interval_ms, EventKind::LocationPing, None);
}

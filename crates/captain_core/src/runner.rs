//! Session runner: advances the clock and routes events into the ECS.
//!
//! Clock progression and event routing happen here, outside systems. Each step
//! pops the next event from [SessionClock], inserts it as [CurrentEvent], then
//! runs the schedule.

use bevy_ecs::prelude::Res;
use bevy_ecs::prelude::{Schedule, World};
use bevy_ecs::schedule::{apply_deferred, IntoSystemConfigs};

use crate::clock::{CurrentEvent, EventKind, SessionClock};
use crate::systems::{
    accept_deadline::accept_deadline_system, accept_requested::accept_requested_system,
    accept_resolved::accept_resolved_system, countdown_tick::countdown_tick_system,
    location_ping::location_ping_system, offer_inbound::offer_inbound_system,
    offer_timeout::offer_timeout_system, reject_requested::reject_requested_system,
    session_started::session_started_system,
};

// Condition functions for each event kind
fn is_session_started(event: Option<Res<CurrentEvent>>) -> bool {
    event
        .map(|e| e.0.kind == EventKind::SessionStarted)
        .unwrap_or(false)
}

fn is_offer_inbound(event: Option<Res<CurrentEvent>>) -> bool {
    event
        .map(|e| e.0.kind == EventKind::OfferInbound)
        .unwrap_or(false)
}

fn is_countdown_tick(event: Option<Res<CurrentEvent>>) -> bool {
    event
        .map(|e| e.0.kind == EventKind::CountdownTick)
        .unwrap_or(false)
}

fn is_offer_timed_out(event: Option<Res<CurrentEvent>>) -> bool {
    event
        .map(|e| e.0.kind == EventKind::OfferTimedOut)
        .unwrap_or(false)
}

fn is_accept_pressed(event: Option<Res<CurrentEvent>>) -> bool {
    event
        .map(|e| e.0.kind == EventKind::AcceptPressed)
        .unwrap_or(false)
}

fn is_accept_resolved(event: Option<Res<CurrentEvent>>) -> bool {
    event
        .map(|e| e.0.kind == EventKind::AcceptResolved)
        .unwrap_or(false)
}

fn is_accept_deadline(event: Option<Res<CurrentEvent>>) -> bool {
    event
        .map(|e| e.0.kind == EventKind::AcceptDeadline)
        .unwrap_or(false)
}

fn is_reject_pressed(event: Option<Res<CurrentEvent>>) -> bool {
    event
        .map(|e| e.0.kind == EventKind::RejectPressed)
        .unwrap_or(false)
}

fn is_location_ping(event: Option<Res<CurrentEvent>>) -> bool {
    event
        .map(|e| e.0.kind == EventKind::LocationPing)
        .unwrap_or(false)
}

/// Runs one session step: pops the next event, inserts it as [CurrentEvent],
/// then runs the schedule. Returns `false` when the clock is empty.
pub fn run_next_event(world: &mut World, schedule: &mut Schedule) -> bool {
    let event = match world.resource_mut::<SessionClock>().pop_next() {
        Some(e) => e,
        None => return false,
    };
    world.insert_resource(CurrentEvent(event));
    schedule.run(world);
    true
}

/// Runs steps until the event queue is empty or `max_steps` is reached.
/// Returns the number of steps executed.
pub fn run_until_empty(world: &mut World, schedule: &mut Schedule, max_steps: usize) -> usize {
    let mut steps = 0;
    while steps < max_steps && run_next_event(world, schedule) {
        steps += 1;
    }
    steps
}

/// Runs every event scheduled at or before `end_ms`, then moves the clock to
/// `end_ms`. Later events stay queued. Returns the number of steps executed.
pub fn run_until_time(world: &mut World, schedule: &mut Schedule, end_ms: u64) -> usize {
    let mut steps = 0;
    loop {
        let next_ts = world
            .get_resource::<SessionClock>()
            .and_then(|c| c.next_event_time());
        match next_ts {
            Some(ts) if ts <= end_ms => {
                if !run_next_event(world, schedule) {
                    break;
                }
                steps += 1;
            }
            _ => break,
        }
    }
    world.resource_mut::<SessionClock>().advance_to(end_ms);
    steps
}

/// Builds the session schedule: all event-reacting systems plus
/// [apply_deferred] so resolved offers are despawned before the next step.
///
/// Systems are conditionally executed based on event type to reduce overhead.
pub fn session_schedule() -> Schedule {
    let mut schedule = Schedule::default();

    schedule.add_systems((
        // SessionStarted
        session_started_system.run_if(is_session_started),
        // OfferInbound
        offer_inbound_system.run_if(is_offer_inbound),
        // CountdownTick
        countdown_tick_system.run_if(is_countdown_tick),
        // OfferTimedOut
        offer_timeout_system.run_if(is_offer_timed_out),
        // AcceptPressed
        accept_requested_system.run_if(is_accept_pressed),
        // AcceptResolved
        accept_resolved_system.run_if(is_accept_resolved),
        // AcceptDeadline
        accept_deadline_system.run_if(is_accept_deadline),
        // RejectPressed
        reject_requested_system.run_if(is_reject_pressed),
        // LocationPing
        location_ping_system.run_if(is_location_ping),
        // Always run apply_deferred so despawns land before the next event
        apply_deferred,
    ));

    schedule
}

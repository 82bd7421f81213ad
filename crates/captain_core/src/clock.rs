use std::cmp::Ordering;
use std::collections::BinaryHeap;

use bevy_ecs::prelude::{Entity, Resource};

pub const ONE_SEC_MS: u64 = 1000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum EventKind {
    SessionStarted,
    OfferInbound,
    CountdownTick,
    OfferTimedOut,
    AcceptPressed,
    AcceptResolved,
    AcceptDeadline,
    RejectPressed,
    LocationPing,
}

/// Entity the event is about. Countdown and accept events are keyed to their
/// offer entity so events left over from a superseded offer resolve to nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum EventSubject {
    Offer(Entity),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Event {
    pub timestamp_ms: u64,
    pub kind: EventKind,
    pub subject: Option<EventSubject>,
}

impl Ord for Event {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering to make BinaryHeap a min-heap by timestamp.
        other
            .timestamp_ms
            .cmp(&self.timestamp_ms)
            .then_with(|| self.kind.cmp(&other.kind))
            .then_with(|| self.subject.cmp(&other.subject))
    }
}

impl PartialOrd for Event {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// The event currently being routed through the schedule.
#[derive(Debug, Clone, Copy, Resource)]
pub struct CurrentEvent(pub Event);

/// Session clock: a min-heap of timestamped events. Time only moves forward,
/// either by popping the next event or by [SessionClock::advance_to].
#[derive(Debug, Default, Resource)]
pub struct SessionClock {
    now_ms: u64,
    events: BinaryHeap<Event>,
}

impl SessionClock {
    pub fn now(&self) -> u64 {
        self.now_ms
    }

    pub fn schedule_at(&mut self, timestamp_ms: u64, kind: EventKind, subject: Option<EventSubject>) {
        debug_assert!(
            timestamp_ms >= self.now_ms,
            "event timestamp must be >= current time"
        );
        self.events.push(Event {
            timestamp_ms,
            kind,
            subject,
        });
    }

    pub fn schedule_at_secs(&mut self, secs: u64, kind: EventKind, subject: Option<EventSubject>) {
        self.schedule_at(secs * ONE_SEC_MS, kind, subject);
    }

    pub fn schedule_in_ms(&mut self, delay_ms: u64, kind: EventKind, subject: Option<EventSubject>) {
        self.schedule_at(self.now_ms + delay_ms, kind, subject);
    }

    pub fn schedule_in_secs(&mut self, secs: u64, kind: EventKind, subject: Option<EventSubject>) {
        self.schedule_in_ms(secs * ONE_SEC_MS, kind, subject);
    }

    pub fn pop_next(&mut self) -> Option<Event> {
        let event = self.events.pop()?;
        self.now_ms = event.timestamp_ms;
        Some(event)
    }

    pub fn next_event_time(&self) -> Option<u64> {
        self.events.peek().map(|e| e.timestamp_ms)
    }

    /// Move the clock forward to `timestamp_ms` without processing events.
    /// Events scheduled before that instant must be drained first.
    pub fn advance_to(&mut self, timestamp_ms: u64) {
        if timestamp_ms > self.now_ms {
            self.now_ms = timestamp_ms;
        }
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clock_pops_events_in_time_order() {
        let mut clock = SessionClock::default();
        clock.schedule_at(10, EventKind::CountdownTick, None);
        clock.schedule_at(5, EventKind::OfferInbound, None);
        clock.schedule_at(20, EventKind::OfferTimedOut, None);

        let first = clock.pop_next().expect("first event");
        assert_eq!(first.timestamp_ms, 5);
        assert_eq!(first.kind, EventKind::OfferInbound);
        assert_eq!(clock.now(), 5);

        let second = clock.pop_next().expect("second event");
        assert_eq!(second.timestamp_ms, 10);
        assert_eq!(clock.now(), 10);

        let third = clock.pop_next().expect("third event");
        assert_eq!(third.timestamp_ms, 20);
        assert_eq!(clock.now(), 20);

        assert!(clock.pop_next().is_none());
        assert!(clock.is_empty());
    }

    #[test]
    fn schedule_in_secs_is_relative_to_now() {
        let mut clock = SessionClock::default();
        clock.schedule_at_secs(3, EventKind::CountdownTick, None);
        clock.pop_next().expect("tick");
        assert_eq!(clock.now(), 3 * ONE_SEC_MS);

        clock.schedule_in_secs(1, EventKind::CountdownTick, None);
        let next = clock.pop_next().expect("next tick");
        assert_eq!(next.timestamp_ms, 4 * ONE_SEC_MS);
    }

    #[test]
    fn advance_to_never_moves_backwards() {
        let mut clock = SessionClock::default();
        clock.advance_to(500);
        assert_eq!(clock.now(), 500);
        clock.advance_to(100);
        assert_eq!(clock.now(), 500);
    }
}

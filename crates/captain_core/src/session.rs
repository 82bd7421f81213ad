//! Driver session façade: owns the world and schedule, injects external
//! inputs as clock events, and exposes typed accessors to the surrounding
//! application (UI shell, channel dispatcher).
//!
//! One instance per driver sign-in; dropping it tears everything down.

use std::sync::Arc;

use bevy_ecs::prelude::World;
use bevy_ecs::schedule::Schedule;

use crate::alert::{AlertResource, AlertSink, SilentAlert};
use crate::channel::{AcceptAck, ChannelResource, NullChannel, OfferChannel, PendingAcks};
use crate::clock::{EventKind, EventSubject, SessionClock, ONE_SEC_MS};
use crate::ecs::{ActiveOffer, Countdown, OfferBoard, OfferDetails, OfferPhase};
use crate::identity::{CurrentUser, SessionUser};
use crate::location::{LastKnownLocation, LocationUpdate};
use crate::notices::{NavigationRequest, OperatorNotice, OperatorNotices};
use crate::offer::{decode_offer, OfferDecodeError, RideId, RideOffer};
use crate::policy::{LocationBroadcast, OfferPolicy};
use crate::presentation::OfferCard;
use crate::runner::{run_next_event, run_until_time, session_schedule};
use crate::telemetry::SessionTelemetry;

/// Parameters for building a driver session.
pub struct SessionParams {
    pub policy: OfferPolicy,
    pub broadcast: LocationBroadcast,
    pub user: Option<SessionUser>,
    pub channel: Arc<dyn OfferChannel>,
    pub alert: Arc<dyn AlertSink>,
}

impl Default for SessionParams {
    fn default() -> Self {
        Self {
            policy: OfferPolicy::default(),
            broadcast: LocationBroadcast::default(),
            user: None,
            channel: Arc::new(NullChannel),
            alert: Arc::new(SilentAlert),
        }
    }
}

impl SessionParams {
    pub fn with_policy(mut self, policy: OfferPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_broadcast(mut self, broadcast: LocationBroadcast) -> Self {
        self.broadcast = broadcast;
        self
    }

    pub fn with_user(mut self, user: SessionUser) -> Self {
        self.user = Some(user);
        self
    }

    pub fn with_channel(mut self, channel: Arc<dyn OfferChannel>) -> Self {
        self.channel = channel;
        self
    }

    pub fn with_alert(mut self, alert: Arc<dyn AlertSink>) -> Self {
        self.alert = alert;
        self
    }
}

pub struct DriverSession {
    world: World,
    schedule: Schedule,
}

impl DriverSession {
    /// Build the session world and process the time-zero bootstrap.
    pub fn start(params: SessionParams) -> Self {
        let mut world = World::new();
        world.insert_resource(SessionClock::default());
        world.insert_resource(OfferBoard::default());
        world.insert_resource(SessionTelemetry::default());
        world.insert_resource(OperatorNotices::default());
        world.insert_resource(NavigationRequest::default());
        world.insert_resource(PendingAcks::default());
        world.insert_resource(LastKnownLocation::default());
        world.insert_resource(CurrentUser(params.user));
        world.insert_resource(params.policy);
        world.insert_resource(params.broadcast);
        world.insert_resource(ChannelResource(params.channel));
        world.insert_resource(AlertResource(params.alert));

        world
            .resource_mut::<SessionClock>()
            .schedule_at(0, EventKind::SessionStarted, None);

        let mut session = Self {
            world,
            schedule: session_schedule(),
        };
        session.pump();
        session
    }

    /// Process every event due at the current instant, leaving future events
    /// (timers) queued.
    fn pump(&mut self) {
        loop {
            let now = self.world.resource::<SessionClock>().now();
            match self.world.resource::<SessionClock>().next_event_time() {
                Some(ts) if ts <= now => {
                    run_next_event(&mut self.world, &mut self.schedule);
                }
                _ => break,
            }
        }
    }

    /// Hand a new offer to the session (the channel dispatcher's entry point).
    pub fn present_offer(&mut self, offer: RideOffer) {
        let staged = self.world.spawn(OfferDetails(offer)).id();
        let now = self.world.resource::<SessionClock>().now();
        self.world.resource_mut::<SessionClock>().schedule_at(
            now,
            EventKind::OfferInbound,
            Some(EventSubject::Offer(staged)),
        );
        self.pump();
    }

    /// Decode a raw channel payload and present it. Malformed payloads are
    /// counted and returned to the caller; nothing reaches the board.
    pub fn deliver_offer_json(&mut self, raw: &str) -> Result<(), OfferDecodeError> {
        match decode_offer(raw) {
            Ok(offer) => {
                self.present_offer(offer);
                Ok(())
            }
            Err(err) => {
                let mut telemetry = self.world.resource_mut::<SessionTelemetry>();
                telemetry.decode_failures_total = telemetry.decode_failures_total.saturating_add(1);
                tracing::warn!(%err, "dropping malformed offer payload");
                Err(err)
            }
        }
    }

    /// Operator pressed accept. No-op unless an offer is visible and idle.
    pub fn press_accept(&mut self) {
        self.press(EventKind::AcceptPressed);
    }

    /// Operator pressed reject. No-op unless an offer is visible and idle.
    pub fn press_reject(&mut self) {
        self.press(EventKind::RejectPressed);
    }

    fn press(&mut self, kind: EventKind) {
        let subject = self
            .world
            .resource::<OfferBoard>()
            .current
            .map(EventSubject::Offer);
        let now = self.world.resource::<SessionClock>().now();
        self.world
            .resource_mut::<SessionClock>()
            .schedule_at(now, kind, subject);
        self.pump();
    }

    /// Deliver the channel's answer to a pending accept.
    pub fn deliver_accept_ack(&mut self, ack: AcceptAck) {
        self.world.resource_mut::<PendingAcks>().0.push_back(ack);
        let subject = self
            .world
            .resource::<OfferBoard>()
            .current
            .map(EventSubject::Offer);
        let now = self.world.resource::<SessionClock>().now();
        self.world
            .resource_mut::<SessionClock>()
            .schedule_at(now, EventKind::AcceptResolved, subject);
        self.pump();
    }

    /// Record a device fix; it is broadcast on the next ping while online.
    pub fn update_location(&mut self, lat: f64, lng: f64) {
        let now = self.world.resource::<SessionClock>().now();
        self.world.resource_mut::<LastKnownLocation>().0 = Some(LocationUpdate {
            lat,
            lng,
            recorded_at_ms: now,
        });
    }

    /// Start location broadcasting. Idempotent: repeated calls keep a single
    /// ping chain.
    pub fn go_online(&mut self) {
        let interval_ms = {
            let mut broadcast = self.world.resource_mut::<LocationBroadcast>();
            if broadcast.enabled {
                return;
            }
            broadcast.enabled = true;
            broadcast.interval_ms
        };
        self.world.resource_mut::<SessionClock>().schedule_in_ms(
            interval_ms,
            EventKind::LocationPing,
            None,
        );
    }

    /// Stop location broadcasting; the ping chain dies at its next firing.
    pub fn go_offline(&mut self) {
        self.world.resource_mut::<LocationBroadcast>().enabled = false;
    }

    /// Advance session time, processing every timer due in the window.
    pub fn advance_secs(&mut self, secs: u64) {
        self.advance_ms(secs * ONE_SEC_MS);
    }

    pub fn advance_ms(&mut self, delta_ms: u64) {
        let target = self.world.resource::<SessionClock>().now() + delta_ms;
        run_until_time(&mut self.world, &mut self.schedule, target);
    }

    pub fn now_ms(&self) -> u64 {
        self.world.resource::<SessionClock>().now()
    }

    /// Phase of the visible offer, or `None` when the session is idle.
    pub fn phase(&self) -> Option<OfferPhase> {
        let entity = self.world.resource::<OfferBoard>().current?;
        self.world.get::<ActiveOffer>(entity).map(|a| a.phase)
    }

    pub fn is_idle(&self) -> bool {
        self.phase().is_none()
    }

    pub fn current_ride_id(&self) -> Option<RideId> {
        let entity = self.world.resource::<OfferBoard>().current?;
        self.world
            .get::<OfferDetails>(entity)
            .map(|d| d.0.ride_id.clone())
    }

    pub fn current_card(&self) -> Option<OfferCard> {
        let entity = self.world.resource::<OfferBoard>().current?;
        self.world.get::<OfferCard>(entity).cloned()
    }

    pub fn seconds_remaining(&self) -> Option<u32> {
        let entity = self.world.resource::<OfferBoard>().current?;
        self.world
            .get::<Countdown>(entity)
            .map(|c| c.seconds_remaining)
    }

    /// Drain the operator-visible notices accumulated since the last call.
    pub fn take_notices(&mut self) -> Vec<OperatorNotice> {
        self.world
            .resource_mut::<OperatorNotices>()
            .0
            .drain(..)
            .collect()
    }

    /// Take the pending navigation signal, if an accept completed.
    pub fn take_navigation(&mut self) -> Option<RideId> {
        self.world.resource_mut::<NavigationRequest>().0.take()
    }

    pub fn telemetry(&self) -> &SessionTelemetry {
        self.world.resource::<SessionTelemetry>()
    }

    pub fn display_name(&self) -> &str {
        self.world.resource::<CurrentUser>().display_name()
    }
}

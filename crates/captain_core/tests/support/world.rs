#![allow(dead_code)]

use std::sync::Arc;

use captain_core::alert::AlertSink;
use captain_core::channel::OfferChannel;
use captain_core::identity::SessionUser;
use captain_core::policy::{LocationBroadcast, OfferPolicy};
use captain_core::session::{DriverSession, SessionParams};
use captain_core::test_helpers::RecordingChannel;

/// Helper that wires a session the way integration tests usually need it:
/// recording channel, default policy, no user.
#[derive(Default)]
pub struct TestSessionBuilder {
    params: SessionParams,
}

impl TestSessionBuilder {
    pub fn new() -> Self {
        Self {
            params: SessionParams::default(),
        }
    }

    pub fn with_policy(mut self, policy: OfferPolicy) -> Self {
        self.params.policy = policy;
        self
    }

    pub fn with_broadcast(mut self, broadcast: LocationBroadcast) -> Self {
        self.params.broadcast = broadcast;
        self
    }

    pub fn with_user(mut self, user: SessionUser) -> Self {
        self.params.user = Some(user);
        self
    }

    pub fn with_channel(mut self, channel: Arc<dyn OfferChannel>) -> Self {
        self.params.channel = channel;
        self
    }

    pub fn with_alert(mut self, alert: Arc<dyn AlertSink>) -> Self {
        self.params.alert = alert;
        self
    }

    pub fn build(self) -> DriverSession {
        DriverSession::start(self.params)
    }
}

/// Session plus a handle on its recording channel.
pub fn recording_session() -> (DriverSession, Arc<RecordingChannel>) {
    let channel = Arc::new(RecordingChannel::new());
    let session = TestSessionBuilder::new().with_channel(channel.clone()).build();
    (session, channel)
}

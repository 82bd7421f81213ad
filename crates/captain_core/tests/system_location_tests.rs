mod support;

use std::sync::Arc;

use captain_core::policy::LocationBroadcast;
use captain_core::test_helpers::RecordingChannel;

use support::world::{recording_session, TestSessionBuilder};

#[test]
fn online_session_broadcasts_the_last_fix_on_the_interval() {
    let (mut session, channel) = recording_session();

    session.update_location(52.52, 13.40);
    session.go_online();
    session.advance_secs(9);

    // Pings at 3, 6 and 9 seconds.
    assert_eq!(channel.location_count(), 3);
    assert_eq!(session.telemetry().location_pings_total, 3);
    let sent = channel.locations.lock().expect("locations lock");
    assert_eq!(sent[0].lat, 52.52);
    assert_eq!(sent[0].lng, 13.40);
}

#[test]
fn pings_without_a_fix_send_nothing_but_keep_the_chain_alive() {
    let (mut session, channel) = recording_session();

    session.go_online();
    session.advance_secs(6);
    assert_eq!(channel.location_count(), 0);

    session.update_location(52.52, 13.40);
    session.advance_secs(3);
    assert_eq!(channel.location_count(), 1);
}

#[test]
fn repeated_go_online_keeps_a_single_ping_chain() {
    let (mut session, channel) = recording_session();

    session.update_location(52.52, 13.40);
    session.go_online();
    session.go_online();
    session.advance_secs(3);

    assert_eq!(channel.location_count(), 1);
}

#[test]
fn going_offline_stops_the_broadcast() {
    let (mut session, channel) = recording_session();

    session.update_location(52.52, 13.40);
    session.go_online();
    session.advance_secs(3);
    assert_eq!(channel.location_count(), 1);

    session.go_offline();
    session.advance_secs(30);
    assert_eq!(channel.location_count(), 1);
}

#[test]
fn broadcast_enabled_at_build_starts_with_the_session() {
    let channel = Arc::new(RecordingChannel::new());
    let mut session = TestSessionBuilder::new()
        .with_channel(channel.clone())
        .with_broadcast(LocationBroadcast {
            enabled: true,
            interval_ms: 1000,
        })
        .build();

    session.update_location(52.52, 13.40);
    session.advance_secs(4);

    assert_eq!(channel.location_count(), 4);
}

#[test]
fn failed_location_sends_are_counted_not_surfaced() {
    let channel = Arc::new(RecordingChannel::refusing_sends());
    let mut session = TestSessionBuilder::new().with_channel(channel).build();

    session.update_location(52.52, 13.40);
    session.go_online();
    session.advance_secs(6);

    let telemetry = session.telemetry();
    assert_eq!(telemetry.location_pings_total, 0);
    assert_eq!(telemetry.location_ping_failures_total, 2);
    assert!(session.take_notices().is_empty());
}

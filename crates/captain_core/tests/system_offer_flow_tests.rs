mod support;

use std::sync::Arc;

use captain_core::ecs::OfferPhase;
use captain_core::offer::RideId;
use captain_core::policy::{OfferPolicy, SupersedePolicy};
use captain_core::telemetry::OfferOutcome;
use captain_core::test_helpers::{bare_offer, sample_offer, CountingAlert, RecordingChannel};

use support::world::{recording_session, TestSessionBuilder};

#[test]
fn presenting_an_offer_renders_the_card_and_starts_the_countdown() {
    let (mut session, _channel) = recording_session();

    session.present_offer(sample_offer("r1"));

    assert_eq!(session.phase(), Some(OfferPhase::Offered));
    assert_eq!(session.seconds_remaining(), Some(30));
    assert_eq!(session.current_ride_id(), Some(RideId::new("r1")));

    let card = session.current_card().expect("card");
    assert_eq!(card.rider_label, "Rider: Asha");
    assert_eq!(card.fare_text, "124");
    assert_eq!(card.distance_text.as_deref(), Some("3.2 km"));
    assert_eq!(card.duration_text.as_deref(), Some("12 min"));
    assert_eq!(card.pickup_address, "12 Harbor Road");
    assert_eq!(card.destination_address, "Airport Terminal 2");

    assert_eq!(session.telemetry().offers_presented_total, 1);
}

#[test]
fn bare_offer_renders_fallbacks_and_omits_optionals() {
    let (mut session, _channel) = recording_session();

    session.present_offer(bare_offer("r1"));

    let card = session.current_card().expect("card");
    assert_eq!(card.rider_label, "Rider: Unknown");
    assert_eq!(card.distance_text, None);
    assert_eq!(card.duration_text, None);
}

#[test]
fn new_offer_rings_the_alert() {
    let alert = Arc::new(CountingAlert::new());
    let mut session = TestSessionBuilder::new()
        .with_channel(Arc::new(RecordingChannel::new()))
        .with_alert(alert.clone())
        .build();

    session.present_offer(sample_offer("r1"));

    assert_eq!(alert.ring_count(), 1);
    assert_eq!(session.telemetry().alerts_failed_total, 0);
}

#[test]
fn alert_failure_is_swallowed() {
    let alert = Arc::new(CountingAlert::failing());
    let mut session = TestSessionBuilder::new()
        .with_channel(Arc::new(RecordingChannel::new()))
        .with_alert(alert.clone())
        .build();

    session.present_offer(sample_offer("r1"));

    assert_eq!(session.phase(), Some(OfferPhase::Offered));
    assert_eq!(alert.ring_count(), 1);
    assert_eq!(session.telemetry().alerts_failed_total, 1);
}

#[test]
fn new_offer_replaces_the_current_one() {
    let (mut session, channel) = recording_session();

    session.present_offer(sample_offer("r1"));
    session.advance_secs(5);
    assert_eq!(session.seconds_remaining(), Some(25));

    session.present_offer(sample_offer("r2"));

    assert_eq!(session.current_ride_id(), Some(RideId::new("r2")));
    assert_eq!(session.seconds_remaining(), Some(30));

    let telemetry = session.telemetry();
    assert_eq!(telemetry.offers_superseded_total, 1);
    assert_eq!(telemetry.offers_presented_total, 2);
    let record = &telemetry.resolved_offers[0];
    assert_eq!(record.ride_id, RideId::new("r1"));
    assert_eq!(record.outcome, OfferOutcome::Superseded);
    assert_eq!(record.time_on_board(), 5000);

    // Superseding is not a decline; the channel replaced the offer itself.
    assert_eq!(channel.decline_count(), 0);
}

#[test]
fn superseded_offer_leaves_exactly_one_countdown_running() {
    let (mut session, _channel) = recording_session();

    session.present_offer(sample_offer("r1"));
    session.advance_secs(5);
    session.present_offer(sample_offer("r2"));

    // If the first offer's chain were still decrementing, the second window
    // would lose more than one second per second.
    session.advance_secs(10);
    assert_eq!(session.seconds_remaining(), Some(20));
}

#[test]
fn keep_current_policy_ignores_the_newcomer() {
    let channel = Arc::new(RecordingChannel::new());
    let mut session = TestSessionBuilder::new()
        .with_channel(channel)
        .with_policy(OfferPolicy {
            supersede: SupersedePolicy::KeepCurrent,
            ..Default::default()
        })
        .build();

    session.present_offer(sample_offer("r1"));
    session.advance_secs(5);
    session.present_offer(sample_offer("r2"));

    assert_eq!(session.current_ride_id(), Some(RideId::new("r1")));
    assert_eq!(session.seconds_remaining(), Some(25));
    assert_eq!(session.telemetry().offers_ignored_total, 1);
    assert_eq!(session.telemetry().offers_presented_total, 1);
}

#[test]
fn presses_while_idle_have_no_observable_effect() {
    let (mut session, channel) = recording_session();

    session.press_accept();
    session.press_reject();

    assert!(session.is_idle());
    assert_eq!(channel.accept_count(), 0);
    assert_eq!(channel.decline_count(), 0);
    assert!(session.take_notices().is_empty());
    assert_eq!(session.take_navigation(), None);
    assert_eq!(session.telemetry().resolved_offers.len(), 0);
}

//! Walk one offer through its full lifecycle and print the session telemetry.
//!
//! Run with: cargo run -p captain_core --example offer_session

use std::sync::Arc;

use captain_core::channel::AcceptAck;
use captain_core::identity::{SessionUser, UserRole};
use captain_core::offer::RideId;
use captain_core::session::{DriverSession, SessionParams};
use captain_core::test_helpers::{sample_offer, RecordingChannel};

fn main() {
    let channel = Arc::new(RecordingChannel::new());
    let mut session = DriverSession::start(
        SessionParams::default()
            .with_channel(channel.clone())
            .with_user(SessionUser {
                id: 1,
                name: "Nadia".to_string(),
                role: UserRole::Captain,
            }),
    );

    println!("--- Driver session for {} ---", session.display_name());

    // First offer times out untouched.
    session.present_offer(sample_offer("r1"));
    let card = session.current_card().expect("card");
    println!(
        "Offer r1: {} | fare {} | {} -> {}",
        card.rider_label, card.fare_text, card.pickup_address, card.destination_address
    );
    session.advance_secs(30);
    println!("Offer r1 untouched for 30s -> idle: {}", session.is_idle());

    // Second offer is accepted after a short look.
    session.present_offer(sample_offer("r2"));
    session.advance_secs(4);
    session.press_accept();
    session.deliver_accept_ack(AcceptAck {
        ride_id: RideId::new("r2"),
        outcome: Ok(()),
    });
    if let Some(ride_id) = session.take_navigation() {
        println!("Accepted -> navigate to active ride {ride_id}");
    }

    let telemetry = session.telemetry();
    println!("\nPresented: {}", telemetry.offers_presented_total);
    println!("Accepted:  {}", telemetry.offers_accepted_total);
    println!("Timed out: {}", telemetry.offers_timed_out_total);
    println!("Outbound accepts on the channel: {}", channel.accept_count());
    for record in &telemetry.resolved_offers {
        println!(
            "  {} -> {:?} after {} s on the board",
            record.ride_id,
            record.outcome,
            record.time_on_board() / 1000
        );
    }
}

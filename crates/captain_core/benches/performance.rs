//! Performance benchmarks for captain_core using Criterion.rs.

use std::sync::Arc;

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use captain_core::channel::AcceptAck;
use captain_core::session::{DriverSession, SessionParams};
use captain_core::test_helpers::{sample_offer, RecordingChannel};

fn bench_offer_lifecycles(c: &mut Criterion) {
    c.bench_function("offer_timeout_full_window", |b| {
        b.iter(|| {
            let mut session = DriverSession::start(
                SessionParams::default().with_channel(Arc::new(RecordingChannel::new())),
            );
            session.present_offer(sample_offer("r1"));
            session.advance_secs(30);
            black_box(session.is_idle());
        });
    });

    c.bench_function("offer_accept_roundtrip", |b| {
        b.iter(|| {
            let mut session = DriverSession::start(
                SessionParams::default().with_channel(Arc::new(RecordingChannel::new())),
            );
            session.present_offer(sample_offer("r1"));
            session.press_accept();
            session.deliver_accept_ack(AcceptAck {
                ride_id: captain_core::offer::RideId::new("r1"),
                outcome: Ok(()),
            });
            black_box(session.take_navigation());
        });
    });

    c.bench_function("busy_shift_100_offers", |b| {
        b.iter(|| {
            let mut session = DriverSession::start(
                SessionParams::default().with_channel(Arc::new(RecordingChannel::new())),
            );
            for i in 0..100 {
                session.present_offer(sample_offer(&format!("r{i}")));
                session.advance_secs(5);
                session.press_reject();
                session.advance_secs(1);
            }
            black_box(session.telemetry().offers_declined_total);
        });
    });
}

criterion_group!(benches, bench_offer_lifecycles);
criterion_main!(benches);

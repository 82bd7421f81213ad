//! CountdownTick system: one-second heartbeat of the visible offer.
//!
//! Each tick reschedules the next one, so exactly one chain exists per offer
//! entity; a chain whose entity left the board dies on its next firing. While
//! an accept is in flight the countdown pauses instead of decrementing, so a
//! failed accept hands back exactly the time the operator had left.

use bevy_ecs::prelude::{Query, Res, ResMut};

use crate::clock::{CurrentEvent, EventKind, EventSubject, SessionClock};
use crate::ecs::{ActiveOffer, Countdown, OfferBoard, OfferPhase};

pub fn countdown_tick_system(
    mut clock: ResMut<SessionClock>,
    event: Res<CurrentEvent>,
    board: Res<OfferBoard>,
    mut offers: Query<(&ActiveOffer, &mut Countdown)>,
) {
    if event.0.kind != EventKind::CountdownTick {
        return;
    }
    let Some(EventSubject::Offer(entity)) = event.0.subject else {
        return;
    };
    if board.current != Some(entity) {
        return;
    }
    let Ok((active, mut countdown)) = offers.get_mut(entity) else {
        return;
    };

    match active.phase {
        OfferPhase::Accepting => {
            // Paused; keep the chain alive for a possible resume.
            clock.schedule_in_secs(1, EventKind::CountdownTick, event.0.subject);
        }
        OfferPhase::Offered => {
            countdown.seconds_remaining = countdown.seconds_remaining.saturating_sub(1);
            if countdown.seconds_remaining == 0 {
                let now = clock.now();
                clock.schedule_at(now, EventKind::OfferTimedOut, event.0.subject);
            } else {
                clock.schedule_in_secs(1, EventKind::CountdownTick, event.0.subject);
            }
        }
    }
}

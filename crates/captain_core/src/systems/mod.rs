pub mod offer_inbound;
pub mod countdown_tick;
pub mod offer_timeout;
pub mod accept_requested;
pub mod accept_resolved;
pub mod accept_deadline;
pub mod reject_requested;
pub mod location_ping;
pub mod session_started;

mod resolution;

pub(crate) use resolution::resolve_offer;

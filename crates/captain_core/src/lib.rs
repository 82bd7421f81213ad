pub mod clock;
pub mod ecs;
pub mod offer;
pub mod policy;
pub mod channel;
pub mod alert;
pub mod identity;
pub mod location;
pub mod presentation;
pub mod notices;
pub mod telemetry;
pub mod systems;
pub mod runner;
pub mod session;

#[cfg(feature = "test-helpers")]
pub mod test_helpers;

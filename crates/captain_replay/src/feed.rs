//! Scripted feed format: a JSON list of timestamped channel/operator actions.

use std::fs;
use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use captain_core::offer::{RideId, RideOffer};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedEvent {
    pub at_ms: u64,
    pub action: FeedAction,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FeedAction {
    /// Channel pushes a new ride offer.
    Offer { offer: RideOffer },
    /// Operator presses accept.
    Accept,
    /// Operator presses reject.
    Reject,
    /// Channel acknowledges an accept; `error` carries the rejection reason.
    Ack {
        ride_id: RideId,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        error: Option<String>,
    },
    /// Device reports a new fix.
    Location { lat: f64, lng: f64 },
    /// Driver goes online (starts location broadcasting).
    Online,
    /// Driver goes offline.
    Offline,
}

pub fn load_feed(path: &Path) -> anyhow::Result<Vec<FeedEvent>> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("reading feed file {}", path.display()))?;
    let mut feed: Vec<FeedEvent> =
        serde_json::from_str(&raw).with_context(|| format!("parsing feed {}", path.display()))?;
    feed.sort_by_key(|event| event.at_ms);
    Ok(feed)
}

pub fn save_feed(path: &Path, feed: &[FeedEvent]) -> anyhow::Result<()> {
    let raw = serde_json::to_string_pretty(feed).context("serializing feed")?;
    fs::write(path, raw).with_context(|| format!("writing feed file {}", path.display()))?;
    Ok(())
}

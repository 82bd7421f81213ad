//! Ride offer domain types and inbound payload decoding.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Rendered in place of a blank pickup/destination address.
pub const FALLBACK_ADDRESS: &str = "Address unavailable";

/// Opaque ride identifier supplied by the realtime channel.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RideId(pub String);

impl RideId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RideId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Place {
    pub address: String,
}

/// One ride proposal pushed to the driver. Transient; lives only as long as
/// the offer is on the board.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RideOffer {
    pub ride_id: RideId,
    pub rider_name: Option<String>,
    pub fare: f64,
    pub distance_km: Option<f64>,
    pub duration_min: Option<f64>,
    pub pickup: Place,
    pub destination: Place,
}

#[derive(Debug, Error)]
pub enum OfferDecodeError {
    #[error("offer payload is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("offer payload has an empty rideId")]
    EmptyRideId,
    #[error("offer {0} carries a negative fare")]
    NegativeFare(String),
}

/// Wire shape of an inbound offer as the channel pushes it.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct OfferPayload {
    ride_id: String,
    rider_name: Option<String>,
    fare: f64,
    distance: Option<f64>,
    duration: Option<f64>,
    pickup: EndpointPayload,
    destination: EndpointPayload,
}

#[derive(Debug, Deserialize)]
struct EndpointPayload {
    address: Option<String>,
}

impl EndpointPayload {
    fn into_place(self) -> Place {
        let address = match self.address {
            Some(address) if !address.trim().is_empty() => address,
            _ => FALLBACK_ADDRESS.to_string(),
        };
        Place { address }
    }
}

/// Decode a raw channel payload into a [RideOffer].
///
/// A payload missing the `rideId`, `pickup`, or `destination` fields is a
/// defect in the upstream dispatch and fails the whole offer. A blank address
/// string inside an endpoint renders as [FALLBACK_ADDRESS] instead.
pub fn decode_offer(raw: &str) -> Result<RideOffer, OfferDecodeError> {
    let payload: OfferPayload = serde_json::from_str(raw)?;
    if payload.ride_id.trim().is_empty() {
        return Err(OfferDecodeError::EmptyRideId);
    }
    if payload.fare < 0.0 {
        return Err(OfferDecodeError::NegativeFare(payload.ride_id));
    }
    Ok(RideOffer {
        ride_id: RideId(payload.ride_id),
        rider_name: payload.rider_name.filter(|name| !name.trim().is_empty()),
        fare: payload.fare,
        distance_km: payload.distance,
        duration_min: payload.duration,
        pickup: payload.pickup.into_place(),
        destination: payload.destination.into_place(),
    })
}

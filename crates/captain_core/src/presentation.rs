//! Display projection of an offer: what the surrounding UI renders verbatim.

use bevy_ecs::prelude::Component;

use crate::offer::RideOffer;

/// Shown when the dispatch did not carry a rider name.
pub const FALLBACK_RIDER_LABEL: &str = "Unknown";

/// Display-ready projection of a [RideOffer]. Built once when the offer is
/// presented; fields are final strings so the UI does no formatting of its own.
#[derive(Debug, Clone, PartialEq, Eq, Component)]
pub struct OfferCard {
    pub rider_label: String,
    /// Fare rounded to whole display units.
    pub fare_text: String,
    pub distance_text: Option<String>,
    pub duration_text: Option<String>,
    pub pickup_address: String,
    pub destination_address: String,
}

impl OfferCard {
    pub fn from_offer(offer: &RideOffer) -> Self {
        Self {
            rider_label: format!(
                "Rider: {}",
                offer.rider_name.as_deref().unwrap_or(FALLBACK_RIDER_LABEL)
            ),
            fare_text: (offer.fare.round() as i64).to_string(),
            distance_text: offer.distance_km.map(|km| format!("{km} km")),
            duration_text: offer.duration_min.map(|min| format!("{min} min")),
            pickup_address: offer.pickup.address.clone(),
            destination_address: offer.destination.address.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::offer::{Place, RideId};

    fn offer() -> RideOffer {
        RideOffer {
            ride_id: RideId::new("r1"),
            rider_name: Some("Asha".to_string()),
            fare: 123.7,
            distance_km: Some(3.2),
            duration_min: Some(12.0),
            pickup: Place {
                address: "12 Harbor Road".to_string(),
            },
            destination: Place {
                address: "Airport Terminal 2".to_string(),
            },
        }
    }

    #[test]
    fn fare_rounds_to_whole_units() {
        let card = OfferCard::from_offer(&offer());
        assert_eq!(card.fare_text, "124");
    }

    #[test]
    fn rider_label_falls_back_when_name_is_absent() {
        let mut anonymous = offer();
        anonymous.rider_name = None;
        let card = OfferCard::from_offer(&anonymous);
        assert_eq!(card.rider_label, "Rider: Unknown");
    }

    #[test]
    fn optional_fields_render_only_when_present() {
        let card = OfferCard::from_offer(&offer());
        assert_eq!(card.distance_text.as_deref(), Some("3.2 km"));
        assert_eq!(card.duration_text.as_deref(), Some("12 min"));

        let mut bare = offer();
        bare.distance_km = None;
        bare.duration_min = None;
        let card = OfferCard::from_offer(&bare);
        assert_eq!(card.distance_text, None);
        assert_eq!(card.duration_text, None);
    }

    #[test]
    fn addresses_pass_through_verbatim() {
        let card = OfferCard::from_offer(&offer());
        assert_eq!(card.pickup_address, "12 Harbor Road");
        assert_eq!(card.destination_address, "Airport Terminal 2");
    }
}

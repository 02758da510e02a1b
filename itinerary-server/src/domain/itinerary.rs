//! Itinerary record and its path points.

use serde::{Deserialize, Serialize};

/// Description given to an itinerary whose feed could not be retrieved.
pub const UNKNOWN_SENSE: &str = "<unknown sense>";

/// A single point on an itinerary's path.
///
/// Spots have no identity of their own: their meaning comes from their
/// position in the owning [`Itinerary`]'s spot sequence.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "StoredSpot", into = "StoredSpot")]
pub struct ItinerarySpot {
    latitude: f64,
    longitude: f64,
}

impl ItinerarySpot {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }
}

/// Document shape of a spot: a `[latitude, longitude]` pair.
///
/// Coordinates the feed could not express as numbers are written as `null`
/// and read back as NaN.
#[derive(Serialize, Deserialize)]
struct StoredSpot {
    coordinates: [Option<f64>; 2],
}

impl From<StoredSpot> for ItinerarySpot {
    fn from(stored: StoredSpot) -> Self {
        let [lat, lon] = stored.coordinates;
        Self::new(lat.unwrap_or(f64::NAN), lon.unwrap_or(f64::NAN))
    }
}

impl From<ItinerarySpot> for StoredSpot {
    fn from(spot: ItinerarySpot) -> Self {
        Self {
            coordinates: [Some(spot.latitude), Some(spot.longitude)],
        }
    }
}

/// The path and descriptive metadata of one transit line.
///
/// An itinerary is either restored from the store (and then carries the id
/// the store assigned) or freshly built from feed data. `keywords` is derived
/// from the other fields by the feed parser and cannot be set independently.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Itinerary {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    id: Option<u64>,
    line: String,
    description: String,
    agency: String,
    keywords: String,
    spots: Vec<ItinerarySpot>,
}

impl Itinerary {
    /// Build an unsaved itinerary from parsed feed fields.
    pub(crate) fn new(
        line: impl Into<String>,
        description: impl Into<String>,
        agency: impl Into<String>,
        keywords: impl Into<String>,
        spots: Vec<ItinerarySpot>,
    ) -> Self {
        Self {
            id: None,
            line: line.into(),
            description: description.into(),
            agency: agency.into(),
            keywords: keywords.into(),
            spots,
        }
    }

    /// The unsaved stand-in returned when a line's feed is unavailable.
    pub fn placeholder(line: impl Into<String>) -> Self {
        Self::new(line, UNKNOWN_SENSE, "", "", Vec::new())
    }

    /// Attach the id assigned by the store.
    pub(crate) fn with_id(mut self, id: u64) -> Self {
        self.id = Some(id);
        self
    }

    pub fn id(&self) -> Option<u64> {
        self.id
    }

    pub fn line(&self) -> &str {
        &self.line
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn agency(&self) -> &str {
        &self.agency
    }

    /// Space-delimited search tokens derived from line, agency, consortium
    /// and description.
    pub fn keywords(&self) -> &str {
        &self.keywords
    }

    /// Path points in travel order.
    pub fn spots(&self) -> &[ItinerarySpot] {
        &self.spots
    }

    /// Whether this is the stand-in for an unavailable feed.
    pub fn is_placeholder(&self) -> bool {
        self.id.is_none()
            && self.description == UNKNOWN_SENSE
            && self.agency.is_empty()
            && self.keywords.is_empty()
            && self.spots.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Itinerary {
        Itinerary::new(
            "107",
            "Downtown X Uptown",
            "AG1",
            "107 AG1 Downtown Uptown",
            vec![
                ItinerarySpot::new(-22.9, -43.2),
                ItinerarySpot::new(-22.8, -43.1),
            ],
        )
    }

    #[test]
    fn placeholder_fields() {
        let it = Itinerary::placeholder("42");
        assert_eq!(it.line(), "42");
        assert_eq!(it.description(), UNKNOWN_SENSE);
        assert_eq!(it.agency(), "");
        assert_eq!(it.keywords(), "");
        assert!(it.spots().is_empty());
        assert_eq!(it.id(), None);
        assert!(it.is_placeholder());
    }

    #[test]
    fn parsed_itinerary_is_not_placeholder() {
        assert!(!sample().is_placeholder());
    }

    #[test]
    fn spots_serialize_as_coordinate_pairs() {
        let json = serde_json::to_value(sample()).unwrap();
        assert_eq!(
            json["spots"][0]["coordinates"],
            serde_json::json!([-22.9, -43.2])
        );
        assert!(json.get("_id").is_none());
    }

    #[test]
    fn id_serializes_as_underscore_id() {
        let json = serde_json::to_value(sample().with_id(7)).unwrap();
        assert_eq!(json["_id"], 7);
    }

    #[test]
    fn json_roundtrip_preserves_spot_order() {
        let saved = sample().with_id(3);
        let json = serde_json::to_string(&saved).unwrap();
        let restored: Itinerary = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, saved);
        assert_eq!(restored.spots()[1].latitude(), -22.8);
    }

    #[test]
    fn null_coordinates_restore_as_nan() {
        let json = r#"{"line":"1","description":"","agency":"","keywords":"",
            "spots":[{"coordinates":[null,-43.0]}]}"#;
        let restored: Itinerary = serde_json::from_str(json).unwrap();
        assert!(restored.spots()[0].latitude().is_nan());
        assert_eq!(restored.spots()[0].longitude(), -43.0);
    }
}

//! Domain types for facility lookup.

use serde::Serialize;

use crate::error::LocationError;
use crate::geo::GeoPoint;

/// Shown when a candidate carries no usable address fragments.
pub const ADDRESS_UNAVAILABLE: &str = "Address not available in map data";

/// A facility candidate as returned by the map-data provider.
///
/// `location` is the representative point: direct coordinates for point
/// features, the centroid for area features, `None` when the provider gave
/// neither. Unlocated candidates are skipped during selection, never
/// treated as distance 0.
#[derive(Debug, Clone, PartialEq)]
pub struct RawFacility {
    pub name: Option<String>,
    pub house_number: Option<String>,
    pub street: Option<String>,
    pub city: Option<String>,
    pub phone: Option<String>,
    pub location: Option<GeoPoint>,
}

impl RawFacility {
    /// Comma-joined non-empty address fragments in house number, street,
    /// city order, or the [`ADDRESS_UNAVAILABLE`] sentinel.
    #[must_use]
    pub fn format_address(&self) -> String {
        let fragments: Vec<&str> = [&self.house_number, &self.street, &self.city]
            .into_iter()
            .filter_map(|f| f.as_deref())
            .map(str::trim)
            .filter(|f| !f.is_empty())
            .collect();
        if fragments.is_empty() {
            ADDRESS_UNAVAILABLE.to_owned()
        } else {
            fragments.join(", ")
        }
    }
}

/// Display name for a nameless facility of the given category,
/// e.g. `"hospital"` → `"Nearest Hospital"`.
#[must_use]
pub fn fallback_name(category: &str) -> String {
    let mut chars = category.chars();
    let capitalized = match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    };
    format!("Nearest {capitalized}")
}

/// The selected nearest facility, ready for display.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedFacility {
    pub name: String,
    pub address: String,
    pub phone: Option<String>,
    pub location: GeoPoint,
    pub distance_km: f64,
}

/// Terminal failure reasons for one lookup invocation. None are retried.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum LookupFailure {
    LocationUnsupported,
    LocationDenied,
    LocationUnavailable,
    LocationTimeout,
    QueryTransportError,
    NoCoordinatesResolvable,
}

impl LookupFailure {
    /// Stable wire code for the failure.
    #[must_use]
    pub fn code(self) -> &'static str {
        match self {
            LookupFailure::LocationUnsupported => "location-unsupported",
            LookupFailure::LocationDenied => "location-denied",
            LookupFailure::LocationUnavailable => "location-unavailable",
            LookupFailure::LocationTimeout => "location-timeout",
            LookupFailure::QueryTransportError => "query-transport-error",
            LookupFailure::NoCoordinatesResolvable => "no-coordinates-resolvable",
        }
    }

    /// User-facing guidance. The lookup is a convenience feature, so every
    /// failure points at the direct emergency channel instead.
    #[must_use]
    pub fn advisory(self) -> &'static str {
        match self {
            LookupFailure::LocationUnsupported => {
                "This device does not support location services. Please call your local emergency line directly."
            }
            LookupFailure::LocationDenied => {
                "Location permission was denied. Enable location access or call your local emergency line directly."
            }
            LookupFailure::LocationUnavailable => {
                "Your position could not be determined. Please call your local emergency line directly."
            }
            LookupFailure::LocationTimeout => {
                "Locating your device took too long. Please call your local emergency line directly."
            }
            LookupFailure::QueryTransportError => {
                "The facility lookup service could not be reached. Please call your local emergency line directly."
            }
            LookupFailure::NoCoordinatesResolvable => {
                "Nearby facilities were found but none could be located on the map. Please call your local emergency line directly."
            }
        }
    }
}

impl std::fmt::Display for LookupFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

impl From<LocationError> for LookupFailure {
    fn from(err: LocationError) -> Self {
        match err {
            LocationError::Unsupported => LookupFailure::LocationUnsupported,
            LocationError::PermissionDenied => LookupFailure::LocationDenied,
            LocationError::PositionUnavailable => LookupFailure::LocationUnavailable,
            LocationError::Timeout => LookupFailure::LocationTimeout,
        }
    }
}

/// Result of one nearest-facility lookup.
///
/// `NotFound` means the query succeeded with zero candidates; a non-empty
/// candidate set in which nothing could be placed on the map is
/// `Failed(NoCoordinatesResolvable)` instead.
#[derive(Debug, Clone, PartialEq)]
pub enum LookupOutcome {
    Found(ResolvedFacility),
    NotFound,
    Failed(LookupFailure),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn facility(house_number: Option<&str>, street: Option<&str>, city: Option<&str>) -> RawFacility {
        RawFacility {
            name: None,
            house_number: house_number.map(str::to_owned),
            street: street.map(str::to_owned),
            city: city.map(str::to_owned),
            phone: None,
            location: None,
        }
    }

    #[test]
    fn address_joins_non_empty_fragments_in_order() {
        let f = facility(Some("5"), Some("Main St"), Some(""));
        assert_eq!(f.format_address(), "5, Main St");
    }

    #[test]
    fn address_skips_missing_middle_fragment() {
        let f = facility(Some("5"), None, Some("Nairobi"));
        assert_eq!(f.format_address(), "5, Nairobi");
    }

    #[test]
    fn address_all_absent_yields_sentinel() {
        let f = facility(None, Some("   "), Some(""));
        assert_eq!(f.format_address(), ADDRESS_UNAVAILABLE);
    }

    #[test]
    fn fallback_name_capitalizes_category() {
        assert_eq!(fallback_name("hospital"), "Nearest Hospital");
        assert_eq!(fallback_name("clinic"), "Nearest Clinic");
    }

    #[test]
    fn failure_codes_are_kebab_case() {
        assert_eq!(LookupFailure::LocationDenied.code(), "location-denied");
        assert_eq!(
            LookupFailure::NoCoordinatesResolvable.code(),
            "no-coordinates-resolvable"
        );
        let json = serde_json::to_string(&LookupFailure::QueryTransportError).unwrap();
        assert_eq!(json, "\"query-transport-error\"");
    }

    #[test]
    fn location_errors_map_onto_failures() {
        assert_eq!(
            LookupFailure::from(LocationError::PermissionDenied),
            LookupFailure::LocationDenied
        );
        assert_eq!(
            LookupFailure::from(LocationError::Timeout),
            LookupFailure::LocationTimeout
        );
    }
}

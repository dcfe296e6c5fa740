//! HTTP client for the Overpass map-data interpreter.
//!
//! Sends Overpass QL as a form-encoded `data=` body and deserializes the
//! JSON `elements` array into [`RawFacility`] candidates. Point features
//! carry `lat`/`lon` directly; area features carry a `center` because the
//! query asks for `out center;`.

use std::collections::HashMap;
use std::future::Future;
use std::time::Duration;

use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};
use reqwest::{Client, Url};
use serde::Deserialize;

use crate::error::QueryError;
use crate::geo::GeoPoint;
use crate::types::RawFacility;

const DEFAULT_BASE_URL: &str = "https://overpass-api.de/api/interpreter";

/// Capability to list facility candidates of a category around a point.
pub trait CandidateProvider {
    fn find_candidates(
        &self,
        center: GeoPoint,
        radius_km: f64,
        category: &str,
    ) -> impl Future<Output = Result<Vec<RawFacility>, QueryError>> + Send;
}

/// Client for the Overpass interpreter endpoint.
///
/// Use [`OverpassClient::new`] for production or
/// [`OverpassClient::with_base_url`] to point at a mock server in tests.
pub struct OverpassClient {
    client: Client,
    base_url: Url,
    timeout_secs: u64,
}

impl OverpassClient {
    /// Creates a client pointed at the public Overpass interpreter.
    ///
    /// `timeout_secs` bounds both the HTTP request and the interpreter's
    /// own server-side `[timeout:]` so neither end hangs past the other.
    ///
    /// # Errors
    ///
    /// Returns [`QueryError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(timeout_secs: u64, user_agent: &str) -> Result<Self, QueryError> {
        Self::with_base_url(timeout_secs, user_agent, DEFAULT_BASE_URL)
    }

    /// Creates a client with a custom interpreter URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`QueryError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`QueryError::InvalidBaseUrl`] if
    /// `base_url` does not parse.
    pub fn with_base_url(
        timeout_secs: u64,
        user_agent: &str,
        base_url: &str,
    ) -> Result<Self, QueryError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        let base_url = Url::parse(base_url).map_err(|e| QueryError::InvalidBaseUrl {
            url: base_url.to_owned(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            client,
            base_url,
            timeout_secs,
        })
    }

    /// Overpass QL for all nodes and ways tagged `amenity=<category>`
    /// within `radius_m` metres of `center`, with way centroids included.
    fn build_query(&self, center: GeoPoint, radius_m: u32, category: &str) -> String {
        let lat = center.latitude();
        let lon = center.longitude();
        let timeout = self.timeout_secs;
        format!(
            "[out:json][timeout:{timeout}];\
             (node[\"amenity\"=\"{category}\"](around:{radius_m},{lat},{lon});\
              way[\"amenity\"=\"{category}\"](around:{radius_m},{lat},{lon}););\
             out center;"
        )
    }
}

impl CandidateProvider for OverpassClient {
    /// Runs one interpreter query and maps every returned element to a
    /// [`RawFacility`]. Elements without usable coordinates are kept with
    /// `location: None` so the caller can tell "nothing nearby" apart from
    /// "nothing locatable".
    ///
    /// # Errors
    ///
    /// - [`QueryError::Http`] on network failure.
    /// - [`QueryError::UnexpectedStatus`] on a non-2xx response.
    /// - [`QueryError::Deserialize`] if the body is not the expected JSON.
    async fn find_candidates(
        &self,
        center: GeoPoint,
        radius_km: f64,
        category: &str,
    ) -> Result<Vec<RawFacility>, QueryError> {
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let radius_m = (radius_km * 1000.0).round() as u32;
        let query = self.build_query(center, radius_m, category);
        let body = format!("data={}", utf8_percent_encode(&query, NON_ALPHANUMERIC));

        let response = self
            .client
            .post(self.base_url.clone())
            .header(
                reqwest::header::CONTENT_TYPE,
                "application/x-www-form-urlencoded",
            )
            .body(body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(QueryError::UnexpectedStatus {
                status: status.as_u16(),
                url: self.base_url.to_string(),
            });
        }

        let text = response.text().await?;
        let parsed: OverpassResponse =
            serde_json::from_str(&text).map_err(|e| QueryError::Deserialize {
                context: format!("overpass(category={category})"),
                source: e,
            })?;

        let facilities: Vec<RawFacility> =
            parsed.elements.into_iter().map(RawFacility::from).collect();
        tracing::debug!(
            category,
            radius_m,
            candidates = facilities.len(),
            located = facilities.iter().filter(|f| f.location.is_some()).count(),
            "overpass query complete"
        );
        Ok(facilities)
    }
}

#[derive(Debug, Deserialize)]
struct OverpassResponse {
    #[serde(default)]
    elements: Vec<OverpassElement>,
}

#[derive(Debug, Deserialize)]
struct OverpassElement {
    lat: Option<f64>,
    lon: Option<f64>,
    center: Option<OverpassCenter>,
    #[serde(default)]
    tags: HashMap<String, String>,
}

#[derive(Debug, Deserialize)]
struct OverpassCenter {
    lat: f64,
    lon: f64,
}

impl From<OverpassElement> for RawFacility {
    fn from(mut element: OverpassElement) -> Self {
        let direct = match (element.lat, element.lon) {
            (Some(lat), Some(lon)) => GeoPoint::new(lat, lon).ok(),
            _ => None,
        };
        let location = direct.or_else(|| {
            element
                .center
                .as_ref()
                .and_then(|c| GeoPoint::new(c.lat, c.lon).ok())
        });

        let phone = element
            .tags
            .remove("phone")
            .or_else(|| element.tags.remove("contact:phone"));

        RawFacility {
            name: element.tags.remove("name"),
            house_number: element.tags.remove("addr:housenumber"),
            street: element.tags.remove("addr:street"),
            city: element.tags.remove("addr:city"),
            phone,
            location,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn element(json: serde_json::Value) -> OverpassElement {
        serde_json::from_value(json).expect("valid element")
    }

    fn test_client() -> OverpassClient {
        OverpassClient::with_base_url(15, "healthwatch-test", "https://overpass.example/api")
            .expect("client construction should not fail")
    }

    #[test]
    fn build_query_selects_nodes_and_ways_with_centers() {
        let client = test_client();
        let center = GeoPoint::new(-1.2921, 36.8219).unwrap();
        let query = client.build_query(center, 15_000, "hospital");
        assert_eq!(
            query,
            "[out:json][timeout:15];\
             (node[\"amenity\"=\"hospital\"](around:15000,-1.2921,36.8219);\
              way[\"amenity\"=\"hospital\"](around:15000,-1.2921,36.8219););\
             out center;"
        );
    }

    #[test]
    fn build_query_parameterizes_category() {
        let client = test_client();
        let center = GeoPoint::new(0.0, 0.0).unwrap();
        let query = client.build_query(center, 5000, "clinic");
        assert!(query.contains("[\"amenity\"=\"clinic\"]"));
        assert!(!query.contains("hospital"));
    }

    #[test]
    fn node_coordinates_are_preferred_over_center() {
        let f = RawFacility::from(element(serde_json::json!({
            "lat": 1.0, "lon": 2.0,
            "center": {"lat": 9.0, "lon": 9.0},
            "tags": {"name": "General Hospital"}
        })));
        let loc = f.location.unwrap();
        assert!((loc.latitude() - 1.0).abs() < f64::EPSILON);
        assert_eq!(f.name.as_deref(), Some("General Hospital"));
    }

    #[test]
    fn way_falls_back_to_center() {
        let f = RawFacility::from(element(serde_json::json!({
            "center": {"lat": -1.3, "lon": 36.8},
            "tags": {}
        })));
        let loc = f.location.unwrap();
        assert!((loc.longitude() - 36.8).abs() < f64::EPSILON);
    }

    #[test]
    fn element_without_coordinates_is_unlocated() {
        let f = RawFacility::from(element(serde_json::json!({"tags": {"name": "Ghost"}})));
        assert!(f.location.is_none());
        assert_eq!(f.name.as_deref(), Some("Ghost"));
    }

    #[test]
    fn out_of_range_coordinates_are_unlocated() {
        let f = RawFacility::from(element(serde_json::json!({"lat": 120.0, "lon": 36.8})));
        assert!(f.location.is_none());
    }

    #[test]
    fn phone_tag_wins_over_contact_phone() {
        let f = RawFacility::from(element(serde_json::json!({
            "lat": 1.0, "lon": 2.0,
            "tags": {"phone": "+254 20 1", "contact:phone": "+254 20 2"}
        })));
        assert_eq!(f.phone.as_deref(), Some("+254 20 1"));
    }

    #[test]
    fn contact_phone_is_used_when_phone_absent() {
        let f = RawFacility::from(element(serde_json::json!({
            "lat": 1.0, "lon": 2.0,
            "tags": {"contact:phone": "+254 20 2"}
        })));
        assert_eq!(f.phone.as_deref(), Some("+254 20 2"));
    }

    #[test]
    fn address_tags_map_to_fragments() {
        let f = RawFacility::from(element(serde_json::json!({
            "lat": 1.0, "lon": 2.0,
            "tags": {
                "addr:housenumber": "14",
                "addr:street": "Riverside Dr",
                "addr:city": "Nairobi"
            }
        })));
        assert_eq!(f.format_address(), "14, Riverside Dr, Nairobi");
    }

    #[test]
    fn with_base_url_rejects_garbage() {
        let result = OverpassClient::with_base_url(15, "ua", "not a url");
        assert!(matches!(result, Err(QueryError::InvalidBaseUrl { .. })));
    }
}

use thiserror::Error;

/// Coordinate validation failures.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum GeoError {
    #[error("latitude out of range or not finite: {0}")]
    InvalidLatitude(f64),
    #[error("longitude out of range or not finite: {0}")]
    InvalidLongitude(f64),
}

/// Failure codes from the device-location provider.
///
/// The numeric codes mirror the browser geolocation API
/// (1 = permission denied, 2 = position unavailable, 3 = timeout);
/// `Unsupported` covers devices with no geolocation capability at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum LocationError {
    #[error("geolocation is not supported on this device")]
    Unsupported,
    #[error("location permission denied")]
    PermissionDenied,
    #[error("position unavailable")]
    PositionUnavailable,
    #[error("location request timed out")]
    Timeout,
}

impl LocationError {
    /// Map a browser geolocation error code to the matching variant.
    #[must_use]
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            1 => Some(LocationError::PermissionDenied),
            2 => Some(LocationError::PositionUnavailable),
            3 => Some(LocationError::Timeout),
            _ => None,
        }
    }
}

/// Errors from the candidate-query provider (Overpass interpreter).
#[derive(Debug, Error)]
pub enum QueryError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid base URL \"{url}\": {reason}")]
    InvalidBaseUrl { url: String, reason: String },
}

//! Device-location providers.

use std::future::Future;

use crate::error::LocationError;
use crate::geo::GeoPoint;

/// Capability to acquire the device's current position.
///
/// Implementations must produce a fresh fix (no cached positions) and fail
/// with one of the [`LocationError`] codes. The resolver additionally bounds
/// the wait, so a provider that hangs is cut off rather than stalling the
/// lookup.
pub trait LocationProvider {
    fn current_position(&self)
        -> impl Future<Output = Result<GeoPoint, LocationError>> + Send;
}

/// Provider backed by a position the caller already holds: CLI flags, or a
/// fix the browser client acquired and reported with its request.
#[derive(Debug, Clone, Copy)]
pub struct StaticLocation(GeoPoint);

impl StaticLocation {
    #[must_use]
    pub fn new(position: GeoPoint) -> Self {
        Self(position)
    }
}

impl LocationProvider for StaticLocation {
    async fn current_position(&self) -> Result<GeoPoint, LocationError> {
        Ok(self.0)
    }
}

/// Provider for an acquisition that already failed upstream (the browser
/// reported a geolocation error code); carries the failure into the
/// resolver unchanged so the outcome taxonomy stays in one place.
#[derive(Debug, Clone, Copy)]
pub struct FailedLocation(LocationError);

impl FailedLocation {
    #[must_use]
    pub fn new(error: LocationError) -> Self {
        Self(error)
    }
}

impl LocationProvider for FailedLocation {
    async fn current_position(&self) -> Result<GeoPoint, LocationError> {
        Err(self.0)
    }
}

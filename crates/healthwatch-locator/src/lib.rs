//! Nearest-facility resolution for the emergency lookup feature.
//!
//! Given a device position, queries the Overpass map-data interpreter for
//! facilities of a category within a radius and selects the nearest by
//! great-circle distance. Position acquisition and the candidate query are
//! both behind traits so the HTTP server (client-reported fix) and the CLI
//! (fixed coordinates) share one orchestration.

pub mod error;
pub mod geo;
pub mod location;
pub mod overpass;
pub mod resolver;
pub mod types;

pub use error::{GeoError, LocationError, QueryError};
pub use geo::{haversine_km, GeoPoint, EARTH_RADIUS_KM};
pub use location::{FailedLocation, LocationProvider, StaticLocation};
pub use overpass::{CandidateProvider, OverpassClient};
pub use resolver::{resolve_nearest, ResolverConfig, POSITION_WAIT_SECS};
pub use types::{
    fallback_name, LookupFailure, LookupOutcome, RawFacility, ResolvedFacility,
    ADDRESS_UNAVAILABLE,
};

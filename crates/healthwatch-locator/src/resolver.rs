//! Nearest-facility orchestration: one position fix, one candidate query,
//! one selection pass. No retries: a failure at any step is terminal for
//! the invocation and surfaces as a typed [`LookupOutcome`].

use std::time::Duration;

use crate::geo::{haversine_km, GeoPoint};
use crate::location::LocationProvider;
use crate::overpass::CandidateProvider;
use crate::types::{fallback_name, LookupFailure, LookupOutcome, RawFacility, ResolvedFacility};

/// Bound on the position acquisition wait.
pub const POSITION_WAIT_SECS: u64 = 10;

const DEFAULT_RADIUS_KM: f64 = 15.0;
const DEFAULT_CATEGORY: &str = "hospital";

/// Search parameters for one lookup.
#[derive(Debug, Clone)]
pub struct ResolverConfig {
    pub radius_km: f64,
    /// Facility category (an OSM `amenity` value); also parameterizes the
    /// display-name sentinel for nameless candidates.
    pub category: String,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            radius_km: DEFAULT_RADIUS_KM,
            category: DEFAULT_CATEGORY.to_owned(),
        }
    }
}

/// Acquire a position, query candidates around it, pick the nearest.
///
/// Outcomes follow the lookup contract: provider failures map onto the
/// closed [`LookupFailure`] taxonomy, an empty candidate list is
/// [`LookupOutcome::NotFound`], and a non-empty list with no locatable
/// member is `Failed(NoCoordinatesResolvable)`. Ties on distance go to the
/// first candidate in provider order.
pub async fn resolve_nearest<L, C>(
    location: &L,
    candidates: &C,
    config: &ResolverConfig,
) -> LookupOutcome
where
    L: LocationProvider,
    C: CandidateProvider,
{
    let position = match tokio::time::timeout(
        Duration::from_secs(POSITION_WAIT_SECS),
        location.current_position(),
    )
    .await
    {
        Ok(Ok(position)) => position,
        Ok(Err(err)) => {
            tracing::warn!(error = %err, "position acquisition failed");
            return LookupOutcome::Failed(err.into());
        }
        Err(_) => {
            tracing::warn!(wait_secs = POSITION_WAIT_SECS, "position acquisition timed out");
            return LookupOutcome::Failed(LookupFailure::LocationTimeout);
        }
    };

    let raw = match candidates
        .find_candidates(position, config.radius_km, &config.category)
        .await
    {
        Ok(raw) => raw,
        Err(err) => {
            tracing::warn!(error = %err, category = %config.category, "candidate query failed");
            return LookupOutcome::Failed(LookupFailure::QueryTransportError);
        }
    };

    if raw.is_empty() {
        return LookupOutcome::NotFound;
    }

    let Some((index, facility_location, distance_km)) = select_nearest(position, &raw) else {
        return LookupOutcome::Failed(LookupFailure::NoCoordinatesResolvable);
    };

    let chosen = &raw[index];
    LookupOutcome::Found(ResolvedFacility {
        name: chosen
            .name
            .clone()
            .unwrap_or_else(|| fallback_name(&config.category)),
        address: chosen.format_address(),
        phone: chosen.phone.clone(),
        location: facility_location,
        distance_km,
    })
}

/// Index, location and distance of the strictly nearest locatable
/// candidate; ties keep the earliest. `None` when nothing is locatable.
fn select_nearest(
    origin: GeoPoint,
    candidates: &[RawFacility],
) -> Option<(usize, GeoPoint, f64)> {
    let mut best: Option<(usize, GeoPoint, f64)> = None;
    for (index, candidate) in candidates.iter().enumerate() {
        let Some(location) = candidate.location else {
            continue;
        };
        let distance_km = haversine_km(origin, location);
        let improves = best
            .as_ref()
            .is_none_or(|(_, _, best_distance)| distance_km < *best_distance);
        if improves {
            best = Some((index, location, distance_km));
        }
    }
    best
}

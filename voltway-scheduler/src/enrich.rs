//! Attaching road geometry to a computed route.
//!
//! The scheduler measures legs with great-circle distances. For display, a
//! routing service can supply the road polyline and its length and driving
//! time; [`enrich_route`] asks a [`RouteGeometryProvider`] for every segment
//! whose endpoints differ and accumulates the totals.

use crate::{GeometryError, RoutePoint, RouteResponse, RouteStep};

/// Road geometry between two points.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteGeometry {
    /// Road length in metres.
    pub length_meters: f64,
    /// Driving time in seconds.
    pub travel_time_seconds: f64,
    /// Polyline from origin to destination.
    pub points: Vec<RoutePoint>,
}

/// Source of road geometry, such as a turn-by-turn routing service.
///
/// Implementations must be deterministic for a given pair of points if
/// enriched routes are compared across runs.
pub trait RouteGeometryProvider {
    /// Fetch the road route from `from` to `to`.
    ///
    /// # Errors
    /// Returns [`GeometryError`] when no route is available.
    fn route_between(&self, from: RoutePoint, to: RoutePoint)
    -> Result<RouteGeometry, GeometryError>;
}

/// Fill road geometry and totals into `route`.
///
/// The first step is never routed. Every later step whose coordinates differ
/// from the previous step's gets the provider's polyline, and its length and
/// time are added to the totals. Steps with unknown coordinates on either
/// side are skipped.
///
/// # Errors
/// Propagates the first [`GeometryError`]; `route` may then be partially
/// enriched.
#[expect(
    clippy::float_arithmetic,
    reason = "totals are converted from metres and seconds"
)]
pub fn enrich_route<P>(route: &mut RouteResponse, provider: &P) -> Result<(), GeometryError>
where
    P: RouteGeometryProvider + ?Sized,
{
    let mut total_meters = 0.0;
    let mut total_seconds = 0.0;
    let mut previous = route.route.first().and_then(RouteStep::position);

    for step in route.route.iter_mut().skip(1) {
        let current = step.position();
        match (previous, current) {
            (Some(from), Some(to)) if from != to => {
                let geometry = provider.route_between(from, to)?;
                total_meters += geometry.length_meters;
                total_seconds += geometry.travel_time_seconds;
                step.points = geometry.points;
            }
            (None, _) | (_, None) => {
                log::warn!("skipping road geometry for {}: coordinates unknown", step.location);
            }
            _ => {}
        }
        previous = current;
    }

    route.total_distance_km = total_meters / 1000.0;
    route.total_duration_hours = total_seconds / 3600.0;
    Ok(())
}

//! Great-circle distances between WGS84 coordinates.
//!
//! Coordinates follow the `geo` convention used throughout the crate:
//! `x = longitude` and `y = latitude`, both in degrees.

use geo::Coord;

/// Mean Earth radius used by the haversine formula, in kilometres.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Return the haversine distance between `from` and `to` in kilometres.
///
/// The function is symmetric, never negative, and returns `0.0` for identical
/// points. The square-root argument is clamped into `[0, 1]` so rounding
/// noise near antipodal points cannot produce `NaN`.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use voltway_core::distance_km;
///
/// let ingolstadt = Coord { x: 11.421, y: 48.766 };
/// let halle = Coord { x: 11.966, y: 51.482 };
///
/// let km = distance_km(ingolstadt, halle);
/// assert!((km - 304.0).abs() < 5.0);
/// assert_eq!(distance_km(halle, halle), 0.0);
/// ```
#[must_use]
pub fn distance_km(from: Coord<f64>, to: Coord<f64>) -> f64 {
    let d_lat = (to.y - from.y).to_radians();
    let d_lon = (to.x - from.x).to_radians();
    let lat1 = from.y.to_radians();
    let lat2 = to.y.to_radians();

    let a = (d_lat / 2.0).sin().powi(2) + (d_lon / 2.0).sin().powi(2) * lat1.cos() * lat2.cos();
    let central_angle = 2.0 * a.clamp(0.0, 1.0).sqrt().asin();

    EARTH_RADIUS_KM * central_angle
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    const INGOLSTADT: Coord<f64> = Coord { x: 11.421, y: 48.766 };
    const ZUFFENHAUSEN: Coord<f64> = Coord { x: 9.1700, y: 48.8300 };

    #[rstest]
    fn identical_points_are_zero_apart() {
        assert_eq!(distance_km(INGOLSTADT, INGOLSTADT), 0.0);
    }

    #[rstest]
    fn distance_is_symmetric() {
        let there = distance_km(INGOLSTADT, ZUFFENHAUSEN);
        let back = distance_km(ZUFFENHAUSEN, INGOLSTADT);
        assert!((there - back).abs() < 1e-9);
    }

    #[rstest]
    #[case(Coord { x: 0.0, y: 0.0 }, Coord { x: 180.0, y: 0.0 })]
    #[case(Coord { x: 0.0, y: 90.0 }, Coord { x: 0.0, y: -90.0 })]
    #[case(Coord { x: -45.0, y: 30.0 }, Coord { x: 135.0, y: -30.0 })]
    fn antipodal_points_are_half_a_circumference(
        #[case] from: Coord<f64>,
        #[case] to: Coord<f64>,
    ) {
        let km = distance_km(from, to);
        assert!(km.is_finite());
        assert!((km - std::f64::consts::PI * EARTH_RADIUS_KM).abs() < 1e-6);
    }

    #[rstest]
    fn one_degree_of_latitude_is_about_111_km() {
        let km = distance_km(Coord { x: 0.0, y: 0.0 }, Coord { x: 0.0, y: 1.0 });
        assert!((km - 111.19).abs() < 0.01);
    }

    #[rstest]
    fn tiny_offsets_stay_non_negative() {
        let from = Coord { x: 11.0, y: 48.0 };
        let to = Coord {
            x: 11.0 + 1e-12,
            y: 48.0,
        };
        let km = distance_km(from, to);
        assert!(km >= 0.0);
        assert!(km < 1e-6);
    }
}

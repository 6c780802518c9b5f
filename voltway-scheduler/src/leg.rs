//! Converting distances into travel time, energy and cost.

use voltway_core::{DistanceMatrix, LocationId, MatrixError, TruckSpec};

use crate::SchedulePolicy;

/// One direct movement between two locations.
#[derive(Debug, Clone, PartialEq)]
pub struct Leg {
    /// Departure location.
    pub from: LocationId,
    /// Arrival location.
    pub to: LocationId,
    /// Distance in kilometres.
    pub distance_km: f64,
    /// Driving time in minutes.
    pub travel_minutes: f64,
    /// Energy consumed in kWh.
    pub energy_kwh: f64,
    /// Driving cost.
    pub cost: f64,
}

/// Unit conversions applied to every leg of a run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LegModel {
    average_speed_kmh: f64,
    consumption_kwh_per_km: f64,
    driving_cost_per_km: f64,
}

impl LegModel {
    /// Combine the truck's consumption with the policy's speed and cost.
    #[must_use]
    pub const fn new(truck: &TruckSpec, policy: &SchedulePolicy) -> Self {
        Self {
            average_speed_kmh: policy.average_speed_kmh,
            consumption_kwh_per_km: truck.consumption_kwh_per_km(),
            driving_cost_per_km: policy.driving_cost_per_km,
        }
    }

    /// Describe a leg of `distance_km`.
    #[must_use]
    #[expect(
        clippy::float_arithmetic,
        reason = "time, energy and cost scale linearly with distance"
    )]
    pub fn between(&self, from: LocationId, to: LocationId, distance_km: f64) -> Leg {
        Leg {
            from,
            to,
            distance_km,
            travel_minutes: distance_km / self.average_speed_kmh * 60.0,
            energy_kwh: distance_km * self.consumption_kwh_per_km,
            cost: distance_km * self.driving_cost_per_km,
        }
    }

    /// Describe the leg `from -> to` using the matrix distance.
    ///
    /// # Errors
    /// Returns [`MatrixError::UnknownLocation`] when either end is missing.
    pub fn measure(
        &self,
        matrix: &DistanceMatrix,
        from: &LocationId,
        to: &LocationId,
    ) -> Result<Leg, MatrixError> {
        let distance_km = matrix.distance(from, to)?;
        Ok(self.between(from.clone(), to.clone(), distance_km))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use voltway_core::test_support::sample_truck;

    #[rstest]
    fn a_hundred_kilometres_at_default_policy() {
        let model = LegModel::new(&sample_truck(), &SchedulePolicy::default());
        let leg = model.between(LocationId::city("A"), LocationId::city("B"), 100.0);
        assert!((leg.travel_minutes - 75.0).abs() < 1e-9);
        assert!((leg.energy_kwh - 120.0).abs() < 1e-9);
        assert!((leg.cost - 5.0).abs() < 1e-9);
    }
}

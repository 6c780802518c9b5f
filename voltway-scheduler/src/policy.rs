//! Tunable scheduling assumptions.

use serde::{Deserialize, Serialize};
use voltway_core::TruckSpec;

use crate::{ScheduleError, Strategy};

/// Configuration for [`ScheduleEngine`](crate::ScheduleEngine).
///
/// The reserve is a fraction of the full battery; the charging ceiling comes
/// from the truck specification. The two are configured independently.
///
/// # Examples
/// ```
/// use voltway_scheduler::{SchedulePolicy, Strategy};
///
/// let policy = SchedulePolicy::default()
///     .with_strategy(Strategy::CostOptimal)
///     .with_dwell_minutes(30);
/// assert_eq!(policy.average_speed_kmh, 80.0);
/// assert_eq!(policy.dwell_minutes, 30);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchedulePolicy {
    /// Constant average driving speed.
    pub average_speed_kmh: f64,
    /// Stop time after every intermediate tour location.
    pub dwell_minutes: u32,
    /// Linear driving cost per kilometre.
    pub driving_cost_per_km: f64,
    /// Minimum end-of-leg charge as a fraction of full capacity.
    pub reserve_fraction: f64,
    /// Station tie-break policy.
    pub strategy: Strategy,
    /// Charge at the start of the tour; defaults to the charging ceiling.
    pub initial_soc_kwh: Option<f64>,
}

impl Default for SchedulePolicy {
    fn default() -> Self {
        Self {
            average_speed_kmh: 80.0,
            dwell_minutes: 45,
            driving_cost_per_km: 0.05,
            reserve_fraction: 0.1,
            strategy: Strategy::TimeOptimal,
            initial_soc_kwh: None,
        }
    }
}

impl SchedulePolicy {
    /// Override the average speed.
    #[must_use]
    pub const fn with_average_speed(mut self, kmh: f64) -> Self {
        self.average_speed_kmh = kmh;
        self
    }

    /// Override the dwell time.
    #[must_use]
    pub const fn with_dwell_minutes(mut self, minutes: u32) -> Self {
        self.dwell_minutes = minutes;
        self
    }

    /// Override the driving cost.
    #[must_use]
    pub const fn with_driving_cost_per_km(mut self, cost: f64) -> Self {
        self.driving_cost_per_km = cost;
        self
    }

    /// Override the reserve fraction.
    #[must_use]
    pub const fn with_reserve_fraction(mut self, fraction: f64) -> Self {
        self.reserve_fraction = fraction;
        self
    }

    /// Override the selection strategy.
    #[must_use]
    pub const fn with_strategy(mut self, strategy: Strategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Start the tour with `soc_kwh` instead of the ceiling.
    ///
    /// Values above the truck's charging ceiling fail validation.
    #[must_use]
    pub const fn with_initial_soc(mut self, soc_kwh: f64) -> Self {
        self.initial_soc_kwh = Some(soc_kwh);
        self
    }

    /// Minimum end-of-leg charge for `truck`.
    #[must_use]
    #[expect(
        clippy::float_arithmetic,
        reason = "reserve is a fraction of battery capacity"
    )]
    pub fn reserve_kwh(&self, truck: &TruckSpec) -> f64 {
        truck.battery_capacity_kwh() * self.reserve_fraction
    }

    /// Charge at the start of the tour for `truck`.
    #[must_use]
    pub fn initial_soc(&self, truck: &TruckSpec) -> f64 {
        self.initial_soc_kwh
            .unwrap_or_else(|| truck.battery_80_kwh())
    }

    /// Check that every value is usable with `truck`.
    ///
    /// # Errors
    /// Returns [`ScheduleError::InvalidPolicy`] naming the first bad field.
    pub fn validate(&self, truck: &TruckSpec) -> Result<(), ScheduleError> {
        let invalid = |field: &'static str, value: f64| ScheduleError::InvalidPolicy { field, value };
        if !self.average_speed_kmh.is_finite() || self.average_speed_kmh <= 0.0 {
            return Err(invalid("average_speed_kmh", self.average_speed_kmh));
        }
        if !self.driving_cost_per_km.is_finite() || self.driving_cost_per_km < 0.0 {
            return Err(invalid("driving_cost_per_km", self.driving_cost_per_km));
        }
        if !(0.0..1.0).contains(&self.reserve_fraction) {
            return Err(invalid("reserve_fraction", self.reserve_fraction));
        }
        if let Some(soc) = self.initial_soc_kwh
            && !(0.0..=truck.battery_80_kwh()).contains(&soc)
        {
            return Err(invalid("initial_soc_kwh", soc));
        }
        Ok(())
    }
}

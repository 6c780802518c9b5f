//! Battery and consumption parameters of truck models.

use std::collections::BTreeMap;

use thiserror::Error;

/// Energy characteristics of a truck model.
///
/// `battery_80_kwh` is the charging ceiling the scheduler fills to; it never
/// exceeds the full capacity.
///
/// # Examples
/// ```
/// use voltway_core::TruckSpec;
///
/// # fn main() -> Result<(), voltway_core::TruckSpecError> {
/// let truck = TruckSpec::new("Mercedes eActros", 400.0, 320.0, 1.2)?;
/// assert!((truck.range_80_km() - 266.666).abs() < 0.01);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TruckSpec {
    model: String,
    battery_capacity_kwh: f64,
    battery_80_kwh: f64,
    consumption_kwh_per_km: f64,
}

/// Errors returned by [`TruckSpec::new`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TruckSpecError {
    /// A capacity or consumption figure was zero, negative or not finite.
    #[error("truck {model}: {field} must be positive, got {value}")]
    NonPositive {
        /// Truck model name.
        model: String,
        /// Offending field.
        field: &'static str,
        /// Supplied value.
        value: f64,
    },
    /// The charging ceiling was larger than the full battery.
    #[error("truck {model}: charging ceiling {ceiling_kwh} kWh exceeds capacity {capacity_kwh} kWh")]
    CeilingAboveCapacity {
        /// Truck model name.
        model: String,
        /// Supplied ceiling.
        ceiling_kwh: f64,
        /// Supplied capacity.
        capacity_kwh: f64,
    },
}

fn positive(model: &str, field: &'static str, value: f64) -> Result<f64, TruckSpecError> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(TruckSpecError::NonPositive {
            model: model.to_owned(),
            field,
            value,
        })
    }
}

impl TruckSpec {
    /// Validate and construct a [`TruckSpec`].
    ///
    /// # Errors
    /// Returns [`TruckSpecError`] when a figure is not positive or the
    /// ceiling exceeds the capacity.
    pub fn new(
        model: impl Into<String>,
        battery_capacity_kwh: f64,
        battery_80_kwh: f64,
        consumption_kwh_per_km: f64,
    ) -> Result<Self, TruckSpecError> {
        let model = model.into();
        positive(&model, "battery_capacity_kwh", battery_capacity_kwh)?;
        positive(&model, "battery_80_kwh", battery_80_kwh)?;
        positive(&model, "consumption_kwh_per_km", consumption_kwh_per_km)?;
        if battery_80_kwh > battery_capacity_kwh {
            return Err(TruckSpecError::CeilingAboveCapacity {
                model,
                ceiling_kwh: battery_80_kwh,
                capacity_kwh: battery_capacity_kwh,
            });
        }
        Ok(Self {
            model,
            battery_capacity_kwh,
            battery_80_kwh,
            consumption_kwh_per_km,
        })
    }

    /// Model name.
    #[must_use]
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Full battery capacity in kWh.
    #[must_use]
    pub const fn battery_capacity_kwh(&self) -> f64 {
        self.battery_capacity_kwh
    }

    /// Charging ceiling in kWh.
    #[must_use]
    pub const fn battery_80_kwh(&self) -> f64 {
        self.battery_80_kwh
    }

    /// Energy consumed per kilometre.
    #[must_use]
    pub const fn consumption_kwh_per_km(&self) -> f64 {
        self.consumption_kwh_per_km
    }

    /// Distance coverable from the charging ceiling.
    #[must_use]
    pub fn range_80_km(&self) -> f64 {
        self.battery_80_kwh / self.consumption_kwh_per_km
    }

    /// Distance coverable from a full battery.
    #[must_use]
    pub fn max_range_km(&self) -> f64 {
        self.battery_capacity_kwh / self.consumption_kwh_per_km
    }
}

/// Truck specifications keyed by model name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TruckCatalog {
    trucks: BTreeMap<String, TruckSpec>,
}

impl TruckCatalog {
    /// Construct an empty catalog.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            trucks: BTreeMap::new(),
        }
    }

    /// Add or replace a model.
    pub fn insert(&mut self, spec: TruckSpec) {
        self.trucks.insert(spec.model.clone(), spec);
    }

    /// Look up a model by name.
    #[must_use]
    pub fn get(&self, model: &str) -> Option<&TruckSpec> {
        self.trucks.get(model)
    }

    /// Iterate over model names in order.
    pub fn models(&self) -> impl Iterator<Item = &str> {
        self.trucks.keys().map(String::as_str)
    }

    /// Number of models.
    #[must_use]
    pub fn len(&self) -> usize {
        self.trucks.len()
    }

    /// Return `true` when the catalog is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.trucks.is_empty()
    }
}

impl FromIterator<TruckSpec> for TruckCatalog {
    fn from_iter<I: IntoIterator<Item = TruckSpec>>(iter: I) -> Self {
        let mut catalog = Self::new();
        for spec in iter {
            catalog.insert(spec);
        }
        catalog
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(0.0, 0.0, 1.2, "battery_capacity_kwh")]
    #[case(400.0, -1.0, 1.2, "battery_80_kwh")]
    #[case(400.0, 320.0, f64::INFINITY, "consumption_kwh_per_km")]
    fn rejects_non_positive_figures(
        #[case] capacity: f64,
        #[case] ceiling: f64,
        #[case] consumption: f64,
        #[case] expected_field: &str,
    ) {
        let err = TruckSpec::new("t", capacity, ceiling, consumption).expect_err("invalid");
        match err {
            TruckSpecError::NonPositive { field, .. } => assert_eq!(field, expected_field),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[rstest]
    fn rejects_ceiling_above_capacity() {
        let err = TruckSpec::new("t", 300.0, 320.0, 1.2).expect_err("invalid");
        assert!(matches!(err, TruckSpecError::CeilingAboveCapacity { .. }));
    }

    #[rstest]
    fn catalog_looks_up_by_model() {
        let catalog: TruckCatalog = [
            TruckSpec::new("Volvo FH Electric", 540.0, 432.0, 1.1).expect("valid"),
            TruckSpec::new("Mercedes eActros", 400.0, 320.0, 1.2).expect("valid"),
        ]
        .into_iter()
        .collect();

        assert_eq!(catalog.len(), 2);
        assert_eq!(
            catalog.get("Volvo FH Electric").map(TruckSpec::battery_80_kwh),
            Some(432.0)
        );
        assert!(catalog.get("Tesla Semi").is_none());
    }
}

//! Tie-break policies used when several charging stations are reachable.
//!
//! Each policy is a [`StationRanking`]; [`Strategy`] names the built-in ones.
//! Adding a policy means adding a ranking, not editing the selector.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use voltway_core::ChargingStation;

/// Orders reachable stations from most to least preferred.
pub trait StationRanking {
    /// Stable name of the policy.
    fn name(&self) -> &'static str;

    /// Compare two stations; [`Ordering::Less`] means `a` is preferred.
    ///
    /// Stations that compare equal keep their table order.
    fn compare(&self, a: &ChargingStation, b: &ChargingStation) -> Ordering;
}

/// Prefers the highest maximum charging power.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct FastestCharger;

impl StationRanking for FastestCharger {
    fn name(&self) -> &'static str {
        "time-optimal"
    }

    fn compare(&self, a: &ChargingStation, b: &ChargingStation) -> Ordering {
        b.max_power_kw.total_cmp(&a.max_power_kw)
    }
}

/// Prefers the lowest energy price.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CheapestEnergy;

impl StationRanking for CheapestEnergy {
    fn name(&self) -> &'static str {
        "cost-optimal"
    }

    fn compare(&self, a: &ChargingStation, b: &ChargingStation) -> Ordering {
        a.price_per_kwh.total_cmp(&b.price_per_kwh)
    }
}

/// Built-in station selection strategies.
///
/// # Examples
/// ```
/// use voltway_scheduler::Strategy;
///
/// let strategy: Strategy = "cost-optimal".parse().expect("known strategy");
/// assert_eq!(strategy, Strategy::CostOptimal);
/// assert_eq!(Strategy::from_name_lossy("greenest"), Strategy::TimeOptimal);
/// ```
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Strategy {
    /// Fastest charger first.
    #[default]
    TimeOptimal,
    /// Cheapest energy first.
    CostOptimal,
}

/// Error returned when parsing an unknown strategy name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown strategy '{name}', expected time-optimal or cost-optimal")]
pub struct UnknownStrategy {
    /// The rejected name.
    pub name: String,
}

impl Strategy {
    /// Every built-in strategy.
    pub const ALL: [Self; 2] = [Self::TimeOptimal, Self::CostOptimal];

    /// Ranking implementing this strategy.
    #[must_use]
    pub fn ranking(self) -> &'static dyn StationRanking {
        match self {
            Self::TimeOptimal => &FastestCharger,
            Self::CostOptimal => &CheapestEnergy,
        }
    }

    /// Kebab-case name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::TimeOptimal => "time-optimal",
            Self::CostOptimal => "cost-optimal",
        }
    }

    /// Parse `name`, falling back to [`Strategy::TimeOptimal`] with a warning
    /// when it is not recognised.
    #[must_use]
    pub fn from_name_lossy(name: &str) -> Self {
        name.parse().unwrap_or_else(|err: UnknownStrategy| {
            log::warn!("{err}; falling back to time-optimal");
            Self::TimeOptimal
        })
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Strategy {
    type Err = UnknownStrategy;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|strategy| strategy.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownStrategy { name: s.to_owned() })
    }
}

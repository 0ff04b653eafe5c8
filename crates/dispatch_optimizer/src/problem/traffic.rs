use std::ops::RangeInclusive;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::OptimizerError;

pub const LAST_HOUR: u8 = 23;

/// Time-of-day congestion penalty applied to travel times and arc costs.
///
/// The multiplier reflects the moment a plan is computed, it is never stored
/// on the resulting routes.
#[derive(Serialize, Deserialize, JsonSchema, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct TrafficProfile {
    /// Inclusive hour ranges considered rush hour.
    pub rush_hours: Vec<RangeInclusive<u8>>,
    pub rush_hour_multiplier: f64,
}

impl Default for TrafficProfile {
    fn default() -> Self {
        TrafficProfile {
            rush_hours: vec![8..=10, 17..=19],
            rush_hour_multiplier: 1.6,
        }
    }
}

impl TrafficProfile {
    /// Free-flowing traffic at every hour.
    pub fn none() -> Self {
        TrafficProfile {
            rush_hours: Vec::new(),
            rush_hour_multiplier: 1.0,
        }
    }

    pub fn is_rush_hour(&self, hour: u8) -> bool {
        self.rush_hours.iter().any(|range| range.contains(&hour))
    }

    pub fn multiplier_at(&self, hour: u8) -> f64 {
        if self.is_rush_hour(hour) {
            self.rush_hour_multiplier
        } else {
            1.0
        }
    }

    /// Traffic may only slow vehicles down, and ranges must name hours of a
    /// day.
    pub fn validate(&self) -> Result<(), OptimizerError> {
        if !self.rush_hour_multiplier.is_finite() || self.rush_hour_multiplier < 1.0 {
            return Err(OptimizerError::InvalidTrafficProfile(format!(
                "rush hour multiplier must be finite and at least 1, got {}",
                self.rush_hour_multiplier
            )));
        }

        if let Some(range) = self
            .rush_hours
            .iter()
            .find(|range| range.is_empty() || *range.end() > LAST_HOUR)
        {
            return Err(OptimizerError::InvalidTrafficProfile(format!(
                "invalid rush hours {}..={}",
                range.start(),
                range.end()
            )));
        }

        Ok(())
    }

    /// Multiplier for the current local hour.
    pub fn current_multiplier(&self) -> f64 {
        self.multiplier_at(current_hour())
    }
}

pub fn current_hour() -> u8 {
    jiff::Zoned::now().hour() as u8
}

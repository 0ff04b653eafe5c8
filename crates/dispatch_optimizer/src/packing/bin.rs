use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::{error::OptimizerError, problem::vehicle::Vehicle};

/// Cargo box used when a vehicle does not describe its own, in meters.
pub const DEFAULT_CARGO_DIMENSIONS: (f64, f64, f64) = (2.5, 2.0, 4.0);

/// Cargo box of a vehicle.
#[derive(Serialize, Deserialize, JsonSchema, Debug, Clone, PartialEq)]
pub struct BinSpec {
    pub id: String,
    pub width: f64,
    pub height: f64,
    pub depth: f64,
    pub max_weight: f64,
}

impl BinSpec {
    pub fn new(
        id: impl Into<String>,
        (width, height, depth): (f64, f64, f64),
        max_weight: f64,
    ) -> Self {
        BinSpec {
            id: id.into(),
            width,
            height,
            depth,
            max_weight,
        }
    }

    pub fn from_vehicle(vehicle: &Vehicle) -> Self {
        let dimensions = vehicle
            .cargo()
            .map(|cargo| (cargo.width, cargo.height, cargo.depth))
            .unwrap_or(DEFAULT_CARGO_DIMENSIONS);

        BinSpec::new(vehicle.id(), dimensions, vehicle.capacity_kg())
    }

    pub fn volume(&self) -> f64 {
        self.width * self.height * self.depth
    }

    pub fn validate(&self) -> Result<(), OptimizerError> {
        let positive = |value: f64| value.is_finite() && value > 0.0;

        if ![self.width, self.height, self.depth].into_iter().all(positive) {
            return Err(OptimizerError::InvalidBin {
                bin_id: self.id.clone(),
                reason: "dimensions must be positive".to_owned(),
            });
        }

        if !positive(self.max_weight) {
            return Err(OptimizerError::InvalidBin {
                bin_id: self.id.clone(),
                reason: format!("max weight must be positive, got {}", self.max_weight),
            });
        }

        Ok(())
    }
}

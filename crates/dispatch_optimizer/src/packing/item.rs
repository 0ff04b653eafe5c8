use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::{error::OptimizerError, problem::order::Order};

/// Package size used when an order does not describe its own, in meters.
pub const DEFAULT_PACKAGE_DIMENSIONS: (f64, f64, f64) = (0.3, 0.2, 0.3);

/// Package of an order.
#[derive(Serialize, Deserialize, JsonSchema, Debug, Clone, PartialEq)]
pub struct ItemSpec {
    pub id: String,
    pub width: f64,
    pub height: f64,
    pub depth: f64,
    pub weight: f64,
}

impl ItemSpec {
    pub fn new(id: impl Into<String>, (width, height, depth): (f64, f64, f64), weight: f64) -> Self {
        ItemSpec {
            id: id.into(),
            width,
            height,
            depth,
            weight,
        }
    }

    pub fn from_order(order: &Order) -> Self {
        let dimensions = order
            .package()
            .map(|package| (package.width, package.height, package.depth))
            .unwrap_or(DEFAULT_PACKAGE_DIMENSIONS);

        ItemSpec::new(order.id(), dimensions, order.weight_kg())
    }

    pub fn volume(&self) -> f64 {
        self.width * self.height * self.depth
    }

    pub fn validate(&self) -> Result<(), OptimizerError> {
        let positive = |value: f64| value.is_finite() && value > 0.0;

        if ![self.width, self.height, self.depth].into_iter().all(positive) {
            return Err(OptimizerError::InvalidItem {
                item_id: self.id.clone(),
                reason: "dimensions must be positive".to_owned(),
            });
        }

        if !positive(self.weight) {
            return Err(OptimizerError::InvalidItem {
                item_id: self.id.clone(),
                reason: format!("weight must be positive, got {}", self.weight),
            });
        }

        Ok(())
    }
}

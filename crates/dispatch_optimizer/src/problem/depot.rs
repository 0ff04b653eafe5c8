use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::{error::OptimizerError, problem::coordinate::Coordinate};

#[derive(Serialize, Deserialize, JsonSchema, Debug, Clone, PartialEq)]
pub struct Depot {
    id: String,
    location: Coordinate,
}

impl Depot {
    pub fn new(id: impl Into<String>, location: Coordinate) -> Self {
        Depot {
            id: id.into(),
            location,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn location(&self) -> Coordinate {
        self.location
    }

    pub fn validate(&self) -> Result<(), OptimizerError> {
        self.location.validate(|| format!("depot {}", self.id))
    }
}

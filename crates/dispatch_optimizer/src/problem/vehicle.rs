use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::{error::OptimizerError, problem::coordinate::Coordinate};

#[derive(Serialize, Deserialize, JsonSchema, Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum VehicleStatus {
    #[default]
    Available,
    OnRoute,
    Maintenance,
    Inactive,
}

impl VehicleStatus {
    pub fn can_transition_to(self, next: VehicleStatus) -> bool {
        use VehicleStatus::*;

        match (self, next) {
            (Available, OnRoute) | (OnRoute, Available) => true,
            (OnRoute, _) | (_, OnRoute) => false,
            (current, next) => current != next,
        }
    }
}

/// Inner cargo box of a vehicle in meters.
#[derive(Serialize, Deserialize, JsonSchema, Debug, Clone, Copy, PartialEq)]
pub struct CargoDimensions {
    pub width: f64,
    pub height: f64,
    pub depth: f64,
}

impl CargoDimensions {
    pub fn volume(&self) -> f64 {
        self.width * self.height * self.depth
    }
}

#[derive(Serialize, Deserialize, JsonSchema, Debug, Clone)]
pub struct Vehicle {
    id: String,
    capacity_kg: f64,
    /// Zero disables volume tracking for this vehicle.
    #[serde(default)]
    capacity_m3: f64,
    #[serde(default)]
    cargo: Option<CargoDimensions>,
    #[serde(default)]
    home_depot: Option<String>,
    #[serde(default)]
    current_location: Option<Coordinate>,
    #[serde(default)]
    status: VehicleStatus,
}

impl Vehicle {
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn capacity_kg(&self) -> f64 {
        self.capacity_kg
    }

    pub fn capacity_m3(&self) -> f64 {
        self.capacity_m3
    }

    pub fn tracks_volume(&self) -> bool {
        self.capacity_m3 > 0.0
    }

    pub fn cargo(&self) -> Option<&CargoDimensions> {
        self.cargo.as_ref()
    }

    pub fn home_depot(&self) -> Option<&str> {
        self.home_depot.as_deref()
    }

    pub fn current_location(&self) -> Option<Coordinate> {
        self.current_location
    }

    pub fn status(&self) -> VehicleStatus {
        self.status
    }

    pub(crate) fn set_status(&mut self, status: VehicleStatus) {
        self.status = status;
    }

    pub fn validate(&self) -> Result<(), OptimizerError> {
        let capacity_valid = self.capacity_kg.is_finite()
            && self.capacity_kg > 0.0
            && self.capacity_m3.is_finite()
            && self.capacity_m3 >= 0.0;

        if !capacity_valid {
            return Err(OptimizerError::InvalidCapacity {
                vehicle_id: self.id.clone(),
                capacity_kg: self.capacity_kg,
                capacity_m3: self.capacity_m3,
            });
        }

        if let Some(cargo) = &self.cargo
            && ![cargo.width, cargo.height, cargo.depth]
                .iter()
                .all(|side| side.is_finite() && *side > 0.0)
        {
            return Err(OptimizerError::InvalidDimensions {
                owner: format!("vehicle {}", self.id),
            });
        }

        if let Some(location) = &self.current_location {
            location.validate(|| format!("vehicle {}", self.id))?;
        }

        Ok(())
    }
}

#[derive(Default)]
pub struct VehicleBuilder {
    id: Option<String>,
    capacity_kg: Option<f64>,
    capacity_m3: Option<f64>,
    cargo: Option<CargoDimensions>,
    home_depot: Option<String>,
    current_location: Option<Coordinate>,
    status: Option<VehicleStatus>,
}

impl VehicleBuilder {
    pub fn set_vehicle_id(&mut self, id: impl Into<String>) -> &mut VehicleBuilder {
        self.id = Some(id.into());
        self
    }

    pub fn set_capacity(&mut self, capacity_kg: f64) -> &mut VehicleBuilder {
        self.capacity_kg = Some(capacity_kg);
        self
    }

    pub fn set_volume_capacity(&mut self, capacity_m3: f64) -> &mut VehicleBuilder {
        self.capacity_m3 = Some(capacity_m3);
        self
    }

    pub fn set_cargo(&mut self, cargo: CargoDimensions) -> &mut VehicleBuilder {
        self.cargo = Some(cargo);
        self
    }

    pub fn set_home_depot(&mut self, depot_id: impl Into<String>) -> &mut VehicleBuilder {
        self.home_depot = Some(depot_id.into());
        self
    }

    pub fn set_current_location(&mut self, location: Coordinate) -> &mut VehicleBuilder {
        self.current_location = Some(location);
        self
    }

    pub fn set_status(&mut self, status: VehicleStatus) -> &mut VehicleBuilder {
        self.status = Some(status);
        self
    }

    pub fn build(&self) -> Vehicle {
        Vehicle {
            id: self.id.clone().unwrap_or_default(),
            capacity_kg: self.capacity_kg.unwrap_or(1000.0),
            capacity_m3: self.capacity_m3.unwrap_or(0.0),
            cargo: self.cargo,
            home_depot: self.home_depot.clone(),
            current_location: self.current_location,
            status: self.status.unwrap_or_default(),
        }
    }
}

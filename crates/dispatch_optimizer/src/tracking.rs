use fxhash::FxHashMap;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::plan::route_plan::{Route, RoutePlan};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProgressError {
    #[error("no route is tracked for vehicle {0}")]
    UnknownVehicle(String),
    #[error("vehicle {0} already completed its route")]
    RouteCompleted(String),
}

/// Delivery progress of one vehicle along its accepted route.
#[derive(Serialize, Deserialize, JsonSchema, Debug, Clone, PartialEq, Eq)]
pub struct VehicleProgress {
    route_id: String,
    order_ids: Vec<String>,
    current_stop_index: usize,
}

impl VehicleProgress {
    pub fn from_route(route: &Route) -> Self {
        VehicleProgress {
            route_id: route.route_id.clone(),
            order_ids: route.order_ids().map(str::to_owned).collect(),
            current_stop_index: 0,
        }
    }

    pub fn route_id(&self) -> &str {
        &self.route_id
    }

    pub fn current_stop_index(&self) -> usize {
        self.current_stop_index
    }

    pub fn current_stop(&self) -> Option<&str> {
        self.order_ids
            .get(self.current_stop_index)
            .map(String::as_str)
    }

    pub fn remaining_stops(&self) -> &[String] {
        &self.order_ids[self.current_stop_index.min(self.order_ids.len())..]
    }

    pub fn is_complete(&self) -> bool {
        self.current_stop_index >= self.order_ids.len()
    }
}

/// Tracks where every dispatched vehicle is along its route, keyed by
/// vehicle id. Vehicle records themselves are left untouched.
#[derive(Serialize, Deserialize, JsonSchema, Debug, Clone, Default, PartialEq)]
pub struct ProgressBoard {
    vehicles: FxHashMap<String, VehicleProgress>,
}

impl ProgressBoard {
    pub fn from_routes<'a>(routes: impl IntoIterator<Item = &'a Route>) -> Self {
        ProgressBoard {
            vehicles: routes
                .into_iter()
                .map(|route| (route.vehicle_id.clone(), VehicleProgress::from_route(route)))
                .collect(),
        }
    }

    pub fn from_plan(plan: &RoutePlan) -> Self {
        Self::from_routes(&plan.routes)
    }

    pub fn len(&self) -> usize {
        self.vehicles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vehicles.is_empty()
    }

    pub fn progress(&self, vehicle_id: &str) -> Option<&VehicleProgress> {
        self.vehicles.get(vehicle_id)
    }

    /// Order the vehicle is currently heading to, `None` once it is done.
    pub fn current_stop(&self, vehicle_id: &str) -> Result<Option<&str>, ProgressError> {
        Ok(self.get(vehicle_id)?.current_stop())
    }

    /// Marks the current stop as delivered and returns its order id.
    pub fn advance(&mut self, vehicle_id: &str) -> Result<String, ProgressError> {
        let progress = self
            .vehicles
            .get_mut(vehicle_id)
            .ok_or_else(|| ProgressError::UnknownVehicle(vehicle_id.to_owned()))?;

        let delivered = progress
            .current_stop()
            .map(str::to_owned)
            .ok_or_else(|| ProgressError::RouteCompleted(vehicle_id.to_owned()))?;
        progress.current_stop_index += 1;

        Ok(delivered)
    }

    pub fn remaining_stops(&self, vehicle_id: &str) -> Result<&[String], ProgressError> {
        Ok(self.get(vehicle_id)?.remaining_stops())
    }

    pub fn is_complete(&self, vehicle_id: &str) -> Result<bool, ProgressError> {
        Ok(self.get(vehicle_id)?.is_complete())
    }

    fn get(&self, vehicle_id: &str) -> Result<&VehicleProgress, ProgressError> {
        self.vehicles
            .get(vehicle_id)
            .ok_or_else(|| ProgressError::UnknownVehicle(vehicle_id.to_owned()))
    }
}

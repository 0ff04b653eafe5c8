use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::{
    error::OptimizerError,
    problem::{coordinate::Coordinate, time_window::TimeWindow},
};

pub const DEFAULT_SERVICE_MINUTES: u32 = 15;

#[derive(Serialize, Deserialize, JsonSchema, Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    #[default]
    Pending,
    Assigned,
    InTransit,
    Delivered,
    Cancelled,
    Failed,
}

impl OrderStatus {
    /// Whether the order lifecycle allows moving from `self` to `next`.
    pub fn can_transition_to(self, next: OrderStatus) -> bool {
        use OrderStatus::*;

        matches!(
            (self, next),
            (Pending, Assigned)
                | (Pending, Cancelled)
                | (Assigned, InTransit)
                | (Assigned, Cancelled)
                | (Assigned, Pending)
                | (InTransit, Delivered)
                | (InTransit, Failed)
        )
    }

    pub fn is_final(self) -> bool {
        matches!(
            self,
            OrderStatus::Delivered | OrderStatus::Cancelled | OrderStatus::Failed
        )
    }
}

/// Physical package size in meters.
#[derive(Serialize, Deserialize, JsonSchema, Debug, Clone, Copy, PartialEq)]
pub struct PackageDimensions {
    pub width: f64,
    pub height: f64,
    pub depth: f64,
}

impl PackageDimensions {
    pub fn volume(&self) -> f64 {
        self.width * self.height * self.depth
    }

    pub fn is_valid(&self) -> bool {
        [self.width, self.height, self.depth]
            .iter()
            .all(|side| side.is_finite() && *side > 0.0)
    }
}

#[derive(Serialize, Deserialize, JsonSchema, Debug, Clone)]
pub struct Order {
    id: String,
    location: Coordinate,
    weight_kg: f64,
    #[serde(default)]
    volume_m3: f64,
    #[serde(default)]
    time_window: TimeWindow,
    #[serde(default = "default_service_minutes")]
    service_minutes: u32,
    #[serde(default)]
    package: Option<PackageDimensions>,
    #[serde(default)]
    status: OrderStatus,
    #[serde(default)]
    route_ref: Option<String>,
}

fn default_service_minutes() -> u32 {
    DEFAULT_SERVICE_MINUTES
}

impl Order {
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn location(&self) -> Coordinate {
        self.location
    }

    pub fn weight_kg(&self) -> f64 {
        self.weight_kg
    }

    pub fn volume_m3(&self) -> f64 {
        self.volume_m3
    }

    pub fn time_window(&self) -> TimeWindow {
        self.time_window
    }

    pub fn service_minutes(&self) -> u32 {
        self.service_minutes
    }

    pub fn package(&self) -> Option<&PackageDimensions> {
        self.package.as_ref()
    }

    pub fn status(&self) -> OrderStatus {
        self.status
    }

    pub fn route_ref(&self) -> Option<&str> {
        self.route_ref.as_deref()
    }

    pub(crate) fn set_status(&mut self, status: OrderStatus) {
        self.status = status;
    }

    pub(crate) fn set_route_ref(&mut self, route_ref: Option<String>) {
        self.route_ref = route_ref;
    }

    pub fn validate(&self) -> Result<(), OptimizerError> {
        let owner = || format!("order {}", self.id);

        self.location.validate(owner)?;

        if !self.weight_kg.is_finite() || self.weight_kg <= 0.0 {
            return Err(OptimizerError::InvalidWeight {
                order_id: self.id.clone(),
                weight: self.weight_kg,
            });
        }

        if !self.volume_m3.is_finite() || self.volume_m3 < 0.0 {
            return Err(OptimizerError::InvalidVolume {
                owner: owner(),
                volume: self.volume_m3,
            });
        }

        self.time_window.validate(owner)?;

        if let Some(package) = &self.package
            && !package.is_valid()
        {
            return Err(OptimizerError::InvalidDimensions { owner: owner() });
        }

        Ok(())
    }
}

#[derive(Default)]
pub struct OrderBuilder {
    id: Option<String>,
    location: Option<Coordinate>,
    weight_kg: Option<f64>,
    volume_m3: Option<f64>,
    time_window: Option<TimeWindow>,
    service_minutes: Option<u32>,
    package: Option<PackageDimensions>,
    status: Option<OrderStatus>,
}

impl OrderBuilder {
    pub fn set_id(&mut self, id: impl Into<String>) -> &mut OrderBuilder {
        self.id = Some(id.into());
        self
    }

    pub fn set_location(&mut self, lat: f64, lon: f64) -> &mut OrderBuilder {
        self.location = Some(Coordinate::new(lat, lon));
        self
    }

    pub fn set_weight(&mut self, weight_kg: f64) -> &mut OrderBuilder {
        self.weight_kg = Some(weight_kg);
        self
    }

    pub fn set_volume(&mut self, volume_m3: f64) -> &mut OrderBuilder {
        self.volume_m3 = Some(volume_m3);
        self
    }

    pub fn set_time_window(&mut self, time_window: TimeWindow) -> &mut OrderBuilder {
        self.time_window = Some(time_window);
        self
    }

    pub fn set_service_minutes(&mut self, service_minutes: u32) -> &mut OrderBuilder {
        self.service_minutes = Some(service_minutes);
        self
    }

    pub fn set_package(&mut self, package: PackageDimensions) -> &mut OrderBuilder {
        self.package = Some(package);
        self
    }

    pub fn set_status(&mut self, status: OrderStatus) -> &mut OrderBuilder {
        self.status = Some(status);
        self
    }

    /// Builds the order without validating it, validation happens when the
    /// order is handed to a solver or packer.
    pub fn build(&self) -> Order {
        Order {
            id: self.id.clone().unwrap_or_default(),
            location: self.location.unwrap_or(Coordinate::new(0.0, 0.0)),
            weight_kg: self.weight_kg.unwrap_or(1.0),
            volume_m3: self.volume_m3.unwrap_or(0.0),
            time_window: self.time_window.unwrap_or_default(),
            service_minutes: self.service_minutes.unwrap_or(DEFAULT_SERVICE_MINUTES),
            package: self.package,
            status: self.status.unwrap_or_default(),
            route_ref: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn order() -> Order {
        let mut builder = OrderBuilder::default();
        builder
            .set_id("ORD-1")
            .set_location(31.52, 74.36)
            .set_weight(10.0)
            .set_time_window(TimeWindow::new(480, 720).unwrap());
        builder.build()
    }

    #[test]
    fn test_builder_defaults() {
        let order = order();

        assert_eq!(order.id(), "ORD-1");
        assert_eq!(order.service_minutes(), DEFAULT_SERVICE_MINUTES);
        assert_eq!(order.volume_m3(), 0.0);
        assert_eq!(order.status(), OrderStatus::Pending);
        assert!(order.route_ref().is_none());
        assert!(order.validate().is_ok());
    }

    #[test]
    fn test_validate_weight() {
        let mut builder = OrderBuilder::default();
        builder.set_id("ORD-2").set_weight(0.0);

        assert!(matches!(
            builder.build().validate(),
            Err(OptimizerError::InvalidWeight { .. })
        ));

        builder.set_weight(-3.0);
        assert!(builder.build().validate().is_err());
    }

    #[test]
    fn test_validate_package() {
        let mut builder = OrderBuilder::default();
        builder.set_id("ORD-3").set_package(PackageDimensions {
            width: 0.3,
            height: 0.0,
            depth: 0.3,
        });

        assert!(matches!(
            builder.build().validate(),
            Err(OptimizerError::InvalidDimensions { .. })
        ));
    }

    #[test]
    fn test_status_transitions() {
        assert!(OrderStatus::Pending.can_transition_to(OrderStatus::Assigned));
        assert!(OrderStatus::Assigned.can_transition_to(OrderStatus::InTransit));
        assert!(OrderStatus::InTransit.can_transition_to(OrderStatus::Delivered));
        assert!(OrderStatus::InTransit.can_transition_to(OrderStatus::Failed));
        assert!(!OrderStatus::Assigned.can_transition_to(OrderStatus::Assigned));
        assert!(!OrderStatus::Delivered.can_transition_to(OrderStatus::Pending));
        assert!(OrderStatus::Cancelled.is_final());
    }

    #[test]
    fn test_deserialize_defaults() {
        let order: Order = serde_json::from_str(
            r#"{"id": "ORD-9", "location": {"lat": 31.5, "lon": 74.3}, "weight_kg": 4.5}"#,
        )
        .unwrap();

        assert_eq!(order.service_minutes(), 15);
        assert_eq!(order.time_window(), TimeWindow::all_day());
        assert_eq!(order.status(), OrderStatus::Pending);
    }
}

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::{
    multi_depot::params::MultiDepotParams,
    packing::{bin::BinSpec, item::ItemSpec},
    problem::{
        coordinate::Coordinate,
        depot::Depot,
        order::{Order, OrderBuilder, PackageDimensions},
        time_window::TimeWindow,
        vehicle::{CargoDimensions, Vehicle, VehicleBuilder},
    },
    solver::solver_params::SolverParams,
};

#[derive(Serialize, Deserialize, JsonSchema, Debug, Clone)]
#[serde(deny_unknown_fields, rename = "Order")]
pub struct JsonOrder {
    pub id: String,
    pub lat: f64,
    pub lon: f64,
    pub weight_kg: f64,
    pub volume_m3: Option<f64>,
    /// Minutes of day, the whole day when missing
    pub time_window: Option<TimeWindow>,
    pub service_minutes: Option<u32>,
    pub package: Option<PackageDimensions>,
}

impl From<&JsonOrder> for Order {
    fn from(value: &JsonOrder) -> Self {
        let mut builder = OrderBuilder::default();
        builder
            .set_id(value.id.clone())
            .set_location(value.lat, value.lon)
            .set_weight(value.weight_kg);

        if let Some(volume_m3) = value.volume_m3 {
            builder.set_volume(volume_m3);
        }
        if let Some(time_window) = value.time_window {
            builder.set_time_window(time_window);
        }
        if let Some(service_minutes) = value.service_minutes {
            builder.set_service_minutes(service_minutes);
        }
        if let Some(package) = value.package {
            builder.set_package(package);
        }

        builder.build()
    }
}

impl From<&Order> for JsonOrder {
    fn from(value: &Order) -> Self {
        JsonOrder {
            id: value.id().to_owned(),
            lat: value.location().lat(),
            lon: value.location().lon(),
            weight_kg: value.weight_kg(),
            volume_m3: Some(value.volume_m3()),
            time_window: Some(value.time_window()),
            service_minutes: Some(value.service_minutes()),
            package: value.package().copied(),
        }
    }
}

#[derive(Serialize, Deserialize, JsonSchema, Debug, Clone)]
#[serde(deny_unknown_fields, rename = "Vehicle")]
pub struct JsonVehicle {
    pub id: String,
    pub capacity_kg: f64,
    /// Volume is not tracked when missing or 0
    pub capacity_m3: Option<f64>,
    pub cargo: Option<CargoDimensions>,
    pub home_depot: Option<String>,
}

impl From<&JsonVehicle> for Vehicle {
    fn from(value: &JsonVehicle) -> Self {
        let mut builder = VehicleBuilder::default();
        builder
            .set_vehicle_id(value.id.clone())
            .set_capacity(value.capacity_kg);

        if let Some(capacity_m3) = value.capacity_m3 {
            builder.set_volume_capacity(capacity_m3);
        }
        if let Some(cargo) = value.cargo {
            builder.set_cargo(cargo);
        }
        if let Some(home_depot) = &value.home_depot {
            builder.set_home_depot(home_depot.clone());
        }

        builder.build()
    }
}

impl From<&Vehicle> for JsonVehicle {
    fn from(value: &Vehicle) -> Self {
        JsonVehicle {
            id: value.id().to_owned(),
            capacity_kg: value.capacity_kg(),
            capacity_m3: value.tracks_volume().then(|| value.capacity_m3()),
            cargo: value.cargo().copied(),
            home_depot: value.home_depot().map(str::to_owned),
        }
    }
}

#[derive(Serialize, Deserialize, JsonSchema, Debug, Clone)]
#[serde(deny_unknown_fields, rename = "Depot")]
pub struct JsonDepot {
    pub id: String,
    pub lat: f64,
    pub lon: f64,
}

impl From<&JsonDepot> for Depot {
    fn from(value: &JsonDepot) -> Self {
        Depot::new(value.id.clone(), Coordinate::new(value.lat, value.lon))
    }
}

#[derive(Serialize, Deserialize, JsonSchema, Debug, Clone)]
#[serde(deny_unknown_fields, rename = "RoutingRequest")]
pub struct JsonRoutingRequest {
    pub depot: Coordinate,
    pub vehicles: Vec<JsonVehicle>,
    pub orders: Vec<JsonOrder>,
    pub params: Option<SolverParams>,
}

impl JsonRoutingRequest {
    pub fn vehicles(&self) -> Vec<Vehicle> {
        self.vehicles.iter().map(Vehicle::from).collect()
    }

    pub fn orders(&self) -> Vec<Order> {
        self.orders.iter().map(Order::from).collect()
    }

    pub fn params(&self) -> SolverParams {
        self.params.clone().unwrap_or_default()
    }
}

#[derive(Serialize, Deserialize, JsonSchema, Debug, Clone)]
#[serde(deny_unknown_fields, rename = "MultiDepotRequest")]
pub struct JsonMultiDepotRequest {
    pub depots: Vec<JsonDepot>,
    pub vehicles: Vec<JsonVehicle>,
    pub orders: Vec<JsonOrder>,
    pub params: Option<MultiDepotParams>,
}

impl JsonMultiDepotRequest {
    pub fn depots(&self) -> Vec<Depot> {
        self.depots.iter().map(Depot::from).collect()
    }

    pub fn vehicles(&self) -> Vec<Vehicle> {
        self.vehicles.iter().map(Vehicle::from).collect()
    }

    pub fn orders(&self) -> Vec<Order> {
        self.orders.iter().map(Order::from).collect()
    }

    pub fn params(&self) -> MultiDepotParams {
        self.params.clone().unwrap_or_default()
    }
}

/// Bins and items may be given directly or derived from vehicles and orders.
#[derive(Serialize, Deserialize, JsonSchema, Debug, Clone, Default)]
#[serde(deny_unknown_fields, rename = "PackingRequest")]
pub struct JsonPackingRequest {
    #[serde(default)]
    pub bins: Vec<BinSpec>,
    #[serde(default)]
    pub items: Vec<ItemSpec>,
    #[serde(default)]
    pub vehicles: Vec<JsonVehicle>,
    #[serde(default)]
    pub orders: Vec<JsonOrder>,
}

impl JsonPackingRequest {
    /// Explicit bins first, then one bin per vehicle. Same for items.
    pub fn specs(&self) -> (Vec<BinSpec>, Vec<ItemSpec>) {
        let bins = self
            .bins
            .iter()
            .cloned()
            .chain(
                self.vehicles
                    .iter()
                    .map(|vehicle| BinSpec::from_vehicle(&Vehicle::from(vehicle))),
            )
            .collect();

        let items = self
            .items
            .iter()
            .cloned()
            .chain(
                self.orders
                    .iter()
                    .map(|order| ItemSpec::from_order(&Order::from(order))),
            )
            .collect();

        (bins, items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_routing_request() {
        let request: JsonRoutingRequest = serde_json::from_str(
            r#"{
                "depot": { "lat": 31.5204, "lon": 74.3587 },
                "vehicles": [{ "id": "LHE-VAN-001", "capacity_kg": 100 }],
                "orders": [{
                    "id": "ORD-1",
                    "lat": 31.52,
                    "lon": 74.36,
                    "weight_kg": 10,
                    "time_window": { "start": 480, "end": 720 }
                }],
                "params": { "time_budget": "PT1S" }
            }"#,
        )
        .unwrap();

        let orders = request.orders();
        assert_eq!(orders[0].id(), "ORD-1");
        assert_eq!(orders[0].time_window().end(), 720);
        assert_eq!(orders[0].service_minutes(), 15);
        assert_eq!(request.vehicles()[0].capacity_kg(), 100.0);
        assert_eq!(request.params().time_budget, jiff::SignedDuration::from_secs(1));
    }

    #[test]
    fn test_unknown_fields_rejected() {
        let result = serde_json::from_str::<JsonOrder>(
            r#"{ "id": "O1", "lat": 0, "lon": 0, "weight_kg": 1, "colour": "red" }"#,
        );

        assert!(result.is_err());
    }

    #[test]
    fn test_packing_specs() {
        let request: JsonPackingRequest = serde_json::from_str(
            r#"{
                "bins": [{ "id": "B1", "width": 1, "height": 1, "depth": 1, "max_weight": 50 }],
                "vehicles": [{ "id": "VAN-001", "capacity_kg": 1000 }],
                "orders": [{ "id": "ORDER-1000", "lat": 24.86, "lon": 67.0, "weight_kg": 4 }]
            }"#,
        )
        .unwrap();

        let (bins, items) = request.specs();

        assert_eq!(bins.len(), 2);
        assert_eq!(bins[1].id, "VAN-001");
        assert_eq!(bins[1].volume(), 20.0);
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].weight, 4.0);
    }

    #[test]
    fn test_order_round_trip_keeps_window() {
        let order = Order::from(&JsonOrder {
            id: "O1".to_owned(),
            lat: 31.5,
            lon: 74.3,
            weight_kg: 2.0,
            volume_m3: None,
            time_window: TimeWindow::new(600, 660).ok(),
            service_minutes: Some(5),
            package: None,
        });

        let json = JsonOrder::from(&order);
        assert_eq!(json.time_window, TimeWindow::new(600, 660).ok());
        assert_eq!(json.service_minutes, Some(5));
    }
}

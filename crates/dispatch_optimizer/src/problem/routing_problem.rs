use fxhash::FxHashSet;
use tracing::{Level, instrument};

use crate::{
    define_index_newtype,
    error::OptimizerError,
    problem::{
        coordinate::Coordinate,
        kmh::Kmh,
        meters::Meters,
        order::Order,
        time_window::TimeWindow,
        travel_matrix::{Cost, DEPOT_NODE, Minutes, NodeIdx, TravelMatrices},
        vehicle::Vehicle,
    },
};

define_index_newtype!(OrderIdx, RoutingOrder);
define_index_newtype!(VehicleIdx, RoutingVehicle);

/// The fields of an [`Order`] the search reads.
#[derive(Debug, Clone)]
pub struct RoutingOrder {
    external_id: String,
    weight: f64,
    volume: f64,
    time_window: TimeWindow,
    service_minutes: Minutes,
}

impl RoutingOrder {
    pub fn external_id(&self) -> &str {
        &self.external_id
    }

    pub fn weight(&self) -> f64 {
        self.weight
    }

    pub fn volume(&self) -> f64 {
        self.volume
    }

    pub fn time_window(&self) -> TimeWindow {
        self.time_window
    }

    pub fn service_minutes(&self) -> Minutes {
        self.service_minutes
    }
}

impl From<&Order> for RoutingOrder {
    fn from(order: &Order) -> Self {
        RoutingOrder {
            external_id: order.id().to_owned(),
            weight: order.weight_kg(),
            volume: order.volume_m3(),
            time_window: order.time_window(),
            service_minutes: order.service_minutes(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct RoutingVehicle {
    external_id: String,
    capacity_kg: f64,
    capacity_m3: f64,
}

impl RoutingVehicle {
    pub fn external_id(&self) -> &str {
        &self.external_id
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

    /// Load check shared by every feasibility test.
    pub fn fits(&self, weight: f64, volume: f64) -> bool {
        weight <= self.capacity_kg + CAPACITY_EPSILON
            && (!self.tracks_volume() || volume <= self.capacity_m3 + CAPACITY_EPSILON)
    }
}

impl From<&Vehicle> for RoutingVehicle {
    fn from(vehicle: &Vehicle) -> Self {
        RoutingVehicle {
            external_id: vehicle.id().to_owned(),
            capacity_kg: vehicle.capacity_kg(),
            capacity_m3: vehicle.capacity_m3(),
        }
    }
}

const CAPACITY_EPSILON: f64 = 1e-9;

/// Single-depot CVRPTW instance.
///
/// Node 0 of the matrices is the depot and order `i` lives at node `i + 1`.
pub struct RoutingProblem {
    depot: Coordinate,
    orders: Vec<RoutingOrder>,
    vehicles: Vec<RoutingVehicle>,
    matrices: TravelMatrices,
    depot_hours: TimeWindow,
}

#[inline(always)]
pub fn order_node(order_id: OrderIdx) -> NodeIdx {
    NodeIdx::new(order_id.get() + 1)
}

impl RoutingProblem {
    #[instrument(skip_all, level = Level::DEBUG)]
    pub fn new(
        depot: Coordinate,
        vehicles: &[Vehicle],
        orders: &[Order],
        depot_hours: TimeWindow,
        speed: Kmh,
        traffic_multiplier: f64,
    ) -> Self {
        let coordinates = std::iter::once(depot)
            .chain(orders.iter().map(Order::location))
            .collect::<Vec<_>>();

        RoutingProblem {
            depot,
            orders: orders.iter().map(RoutingOrder::from).collect(),
            vehicles: vehicles.iter().map(RoutingVehicle::from).collect(),
            matrices: TravelMatrices::from_coordinates(&coordinates, speed, traffic_multiplier),
            depot_hours,
        }
    }

    pub fn depot(&self) -> Coordinate {
        self.depot
    }

    pub fn orders(&self) -> &[RoutingOrder] {
        &self.orders
    }

    pub fn order(&self, order_id: OrderIdx) -> &RoutingOrder {
        &self.orders[order_id]
    }

    pub fn vehicles(&self) -> &[RoutingVehicle] {
        &self.vehicles
    }

    pub fn vehicle(&self, vehicle_id: VehicleIdx) -> &RoutingVehicle {
        &self.vehicles[vehicle_id]
    }

    pub fn matrices(&self) -> &TravelMatrices {
        &self.matrices
    }

    pub fn depot_open(&self) -> i64 {
        self.depot_hours.start() as i64
    }

    pub fn depot_close(&self) -> i64 {
        self.depot_hours.end() as i64
    }

    #[inline(always)]
    pub fn travel_cost(&self, from: NodeIdx, to: NodeIdx) -> Cost {
        self.matrices.travel_cost(from, to)
    }

    #[inline(always)]
    pub fn travel_time(&self, from: NodeIdx, to: NodeIdx) -> i64 {
        self.matrices.travel_time(from, to) as i64
    }

    #[inline(always)]
    pub fn distance(&self, from: NodeIdx, to: NodeIdx) -> Meters {
        self.matrices.distance(from, to)
    }

    /// Why an order can never be served, whatever the other stops are.
    ///
    /// A lone round trip from the depot is the cheapest way to reach an
    /// order in time, so when that fails on time or on every vehicle's
    /// capacity no route can hold it.
    pub fn screen_order(&self, order_id: OrderIdx) -> Option<UnservedReason> {
        let order = self.order(order_id);

        if !self
            .vehicles
            .iter()
            .any(|vehicle| vehicle.fits(order.weight, order.volume))
        {
            return Some(UnservedReason::ExceedsCapacity);
        }

        let node = order_node(order_id);
        let arrival = self.depot_open() + self.travel_time(DEPOT_NODE, node);
        let begin = arrival.max(order.time_window.start() as i64);

        if begin > order.time_window.end() as i64 {
            return Some(UnservedReason::TimeWindowUnreachable);
        }

        let back_at_depot =
            begin + order.service_minutes as i64 + self.travel_time(node, DEPOT_NODE);

        if back_at_depot > self.depot_close() {
            return Some(UnservedReason::TimeWindowUnreachable);
        }

        None
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnservedReason {
    ExceedsCapacity,
    TimeWindowUnreachable,
}

/// Rejects malformed input before a solve starts.
pub fn validate_inputs(
    depot: &Coordinate,
    vehicles: &[Vehicle],
    orders: &[Order],
) -> Result<(), OptimizerError> {
    depot.validate(|| "depot".to_owned())?;
    validate_vehicles_and_orders(vehicles, orders)
}

/// Checks every vehicle and order and rejects duplicated ids.
pub fn validate_vehicles_and_orders(
    vehicles: &[Vehicle],
    orders: &[Order],
) -> Result<(), OptimizerError> {
    let mut vehicle_ids = FxHashSet::default();
    for vehicle in vehicles {
        vehicle.validate()?;
        if !vehicle_ids.insert(vehicle.id()) {
            return Err(OptimizerError::DuplicateVehicleId(vehicle.id().to_owned()));
        }
    }

    let mut order_ids = FxHashSet::default();
    for order in orders {
        order.validate()?;
        if !order_ids.insert(order.id()) {
            return Err(OptimizerError::DuplicateOrderId(order.id().to_owned()));
        }
    }

    Ok(())
}

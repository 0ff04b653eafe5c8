use fxhash::{FxHashMap, FxHashSet};
use thiserror::Error;
use tracing::info;

use crate::{
    plan::route_plan::{Route, RoutePlan},
    problem::{
        order::{Order, OrderStatus},
        vehicle::{Vehicle, VehicleStatus},
    },
};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum PlanApplicationError {
    #[error("route {route_id} references unknown order {order_id}")]
    UnknownOrder { route_id: String, order_id: String },
    #[error("route {route_id} references unknown vehicle {vehicle_id}")]
    UnknownVehicle {
        route_id: String,
        vehicle_id: String,
    },
    #[error("order {order_id} appears in more than one stop")]
    OrderRoutedTwice { order_id: String },
    #[error("vehicle {vehicle_id} drives more than one route")]
    VehicleRoutedTwice { vehicle_id: String },
    #[error("order {order_id} cannot go from {from:?} to {to:?}")]
    InvalidOrderTransition {
        order_id: String,
        from: OrderStatus,
        to: OrderStatus,
    },
    #[error("vehicle {vehicle_id} cannot go from {from:?} to {to:?}")]
    InvalidVehicleTransition {
        vehicle_id: String,
        from: VehicleStatus,
        to: VehicleStatus,
    },
}

impl RoutePlan {
    /// Marks routed orders as assigned to their route and routed vehicles as
    /// on route. Nothing is modified unless every transition is allowed.
    pub fn apply(
        &self,
        orders: &mut [Order],
        vehicles: &mut [Vehicle],
    ) -> Result<(), PlanApplicationError> {
        apply_routes(&self.routes, orders, vehicles)
    }
}

pub(crate) fn apply_routes(
    routes: &[Route],
    orders: &mut [Order],
    vehicles: &mut [Vehicle],
) -> Result<(), PlanApplicationError> {
    let order_positions = orders
        .iter()
        .enumerate()
        .map(|(index, order)| (order.id().to_owned(), index))
        .collect::<FxHashMap<_, _>>();
    let vehicle_positions = vehicles
        .iter()
        .enumerate()
        .map(|(index, vehicle)| (vehicle.id().to_owned(), index))
        .collect::<FxHashMap<_, _>>();

    let mut order_updates = Vec::new();
    let mut vehicle_updates = Vec::with_capacity(routes.len());
    let mut seen_orders = FxHashSet::default();
    let mut seen_vehicles = FxHashSet::default();

    for route in routes {
        let &vehicle_index = vehicle_positions.get(&route.vehicle_id).ok_or_else(|| {
            PlanApplicationError::UnknownVehicle {
                route_id: route.route_id.clone(),
                vehicle_id: route.vehicle_id.clone(),
            }
        })?;

        if !seen_vehicles.insert(vehicle_index) {
            return Err(PlanApplicationError::VehicleRoutedTwice {
                vehicle_id: route.vehicle_id.clone(),
            });
        }

        let vehicle = &vehicles[vehicle_index];
        if !vehicle.status().can_transition_to(VehicleStatus::OnRoute) {
            return Err(PlanApplicationError::InvalidVehicleTransition {
                vehicle_id: route.vehicle_id.clone(),
                from: vehicle.status(),
                to: VehicleStatus::OnRoute,
            });
        }
        vehicle_updates.push(vehicle_index);

        for order_id in route.order_ids() {
            let &order_index =
                order_positions
                    .get(order_id)
                    .ok_or_else(|| PlanApplicationError::UnknownOrder {
                        route_id: route.route_id.clone(),
                        order_id: order_id.to_owned(),
                    })?;

            if !seen_orders.insert(order_index) {
                return Err(PlanApplicationError::OrderRoutedTwice {
                    order_id: order_id.to_owned(),
                });
            }

            let order = &orders[order_index];
            if !order.status().can_transition_to(OrderStatus::Assigned) {
                return Err(PlanApplicationError::InvalidOrderTransition {
                    order_id: order_id.to_owned(),
                    from: order.status(),
                    to: OrderStatus::Assigned,
                });
            }
            order_updates.push((order_index, route.route_id.as_str()));
        }
    }

    for (order_index, route_id) in order_updates {
        let order = &mut orders[order_index];
        order.set_status(OrderStatus::Assigned);
        order.set_route_ref(Some(route_id.to_owned()));
    }

    for vehicle_index in vehicle_updates {
        vehicles[vehicle_index].set_status(VehicleStatus::OnRoute);
    }

    info!(
        routes = routes.len(),
        orders = seen_orders.len(),
        "plan applied"
    );

    Ok(())
}

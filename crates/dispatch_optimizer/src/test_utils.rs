use std::sync::Arc;

use crate::{
    problem::{
        coordinate::Coordinate,
        kmh::Kmh,
        order::{Order, OrderBuilder},
        routing_problem::{OrderIdx, RoutingProblem},
        time_window::TimeWindow,
        vehicle::{Vehicle, VehicleBuilder},
    },
    solver::solution::{route_id::RouteIdx, working_solution::WorkingSolution},
};

pub const DEPOT_HOURS: (u32, u32) = (480, 1200);

pub fn order(id: &str, lat: f64, lon: f64, weight: f64, window: (u32, u32)) -> Order {
    let mut builder = OrderBuilder::default();
    builder
        .set_id(id)
        .set_location(lat, lon)
        .set_weight(weight)
        .set_time_window(TimeWindow::new(window.0, window.1).unwrap());
    builder.build()
}

pub fn vehicle(id: &str, capacity_kg: f64) -> Vehicle {
    let mut builder = VehicleBuilder::default();
    builder.set_vehicle_id(id).set_capacity(capacity_kg);
    builder.build()
}

/// Problem without traffic penalty, at 40 km/h, depot open 08:00-20:00.
pub fn create_test_problem(
    depot: Coordinate,
    vehicles: &[Vehicle],
    orders: &[Order],
) -> RoutingProblem {
    RoutingProblem::new(
        depot,
        vehicles,
        orders,
        TimeWindow::new(DEPOT_HOURS.0, DEPOT_HOURS.1).unwrap(),
        Kmh::new(40.0),
        1.0,
    )
}

/// Orders placed on a line going north from the depot, `spacing` degrees
/// apart, with the whole operating day as window.
pub fn create_line_orders(depot: Coordinate, count: usize, spacing: f64) -> Vec<Order> {
    (0..count)
        .map(|i| {
            order(
                &format!("O{}", i + 1),
                depot.lat() + spacing * (i + 1) as f64,
                depot.lon(),
                10.0,
                DEPOT_HOURS,
            )
        })
        .collect()
}

pub struct TestRoute {
    pub vehicle_id: usize,
    pub order_ids: Vec<usize>,
}

pub fn create_test_working_solution(
    problem: &Arc<RoutingProblem>,
    routes: Vec<TestRoute>,
) -> WorkingSolution {
    let mut solution = WorkingSolution::new(Arc::clone(problem));

    for route in routes {
        let order_ids = route
            .order_ids
            .into_iter()
            .map(OrderIdx::new)
            .collect::<Vec<_>>();
        solution.replace_activities(RouteIdx::new(route.vehicle_id), &order_ids, 0, 0);
    }

    solution
}

pub fn route_orders(solution: &WorkingSolution, route_id: usize) -> Vec<usize> {
    solution
        .route(RouteIdx::new(route_id))
        .order_ids()
        .iter()
        .map(|order_id| order_id.get())
        .collect()
}

#![allow(dead_code)]

use dispatch_optimizer::{
    problem::{
        coordinate::Coordinate,
        order::{Order, OrderBuilder},
        time_window::TimeWindow,
        vehicle::{Vehicle, VehicleBuilder},
    },
    solver::solver_params::SolverParams,
};
use jiff::SignedDuration;

pub const LAHORE: Coordinate = Coordinate::new(31.5204, 74.3587);
pub const ISLAMABAD: Coordinate = Coordinate::new(33.6844, 73.0479);

pub fn order(id: &str, lat: f64, lon: f64, weight_kg: f64, window: (u32, u32)) -> Order {
    OrderBuilder::default()
        .set_id(id)
        .set_location(lat, lon)
        .set_weight(weight_kg)
        .set_time_window(TimeWindow::new(window.0, window.1).unwrap())
        .build()
}

pub fn vehicle(id: &str, capacity_kg: f64, home_depot: Option<&str>) -> Vehicle {
    let mut builder = VehicleBuilder::default();
    builder.set_vehicle_id(id).set_capacity(capacity_kg);
    if let Some(home_depot) = home_depot {
        builder.set_home_depot(home_depot);
    }
    builder.build()
}

/// Off-peak traffic and a bounded search, so repeated runs give the same plan.
pub fn deterministic_params() -> SolverParams {
    SolverParams {
        time_budget: SignedDuration::from_secs(5),
        dispatch_hour: Some(13),
        max_iterations: Some(200),
        ..SolverParams::default()
    }
}

/// Orders scattered up to `spread` degrees around `center`.
pub fn cluster(prefix: &str, center: Coordinate, count: usize, spread: f64) -> Vec<Order> {
    (0..count)
        .map(|i| {
            let angle = i as f64 / count as f64 * std::f64::consts::TAU;
            let radius = spread * (0.3 + 0.7 * ((i % 3) as f64 / 2.0));
            order(
                &format!("{prefix}-{}", i + 1),
                center.lat() + radius * angle.sin(),
                center.lon() + radius * angle.cos(),
                10.0,
                (480, 1200),
            )
        })
        .collect()
}

//! Seeded sample data in the shape of real dispatch days, used by the CLI
//! `generate scenario` command, the benches and the integration tests.

use rand::{Rng, SeedableRng, rngs::SmallRng};

use crate::{
    json::types::{
        JsonDepot, JsonMultiDepotRequest, JsonOrder, JsonPackingRequest, JsonRoutingRequest,
        JsonVehicle,
    },
    problem::{
        coordinate::Coordinate,
        order::PackageDimensions,
        time_window::TimeWindow,
        vehicle::CargoDimensions,
    },
};

/// Depot code and location of the sample cities.
pub const SAMPLE_DEPOTS: [(&str, Coordinate); 3] = [
    ("KHI", Coordinate::new(24.8607, 67.0011)),
    ("LHE", Coordinate::new(31.5204, 74.3587)),
    ("ISB", Coordinate::new(33.6844, 73.0479)),
];

/// Orders are scattered up to this many degrees around their depot.
const SPREAD_DEGREES: f64 = 0.1;

pub fn sample_order(rng: &mut impl Rng, id: String, around: Coordinate) -> JsonOrder {
    let deadline_hour = rng.random_range(10..=18);

    JsonOrder {
        id,
        lat: around.lat() + rng.random_range(-SPREAD_DEGREES..SPREAD_DEGREES),
        lon: around.lon() + rng.random_range(-SPREAD_DEGREES..SPREAD_DEGREES),
        weight_kg: round2(rng.random_range(5.0..50.0)),
        volume_m3: Some(round2(rng.random_range(0.05..0.5))),
        time_window: TimeWindow::new(480, deadline_hour * 60).ok(),
        service_minutes: None,
        package: None,
    }
}

fn sample_vehicle(rng: &mut impl Rng, id: String, home_depot: Option<&str>) -> JsonVehicle {
    let truck = rng.random_bool(0.3);

    JsonVehicle {
        id,
        capacity_kg: if truck { 3000.0 } else { 1000.0 },
        capacity_m3: None,
        cargo: Some(cargo(truck)),
        home_depot: home_depot.map(str::to_owned),
    }
}

/// One day of deliveries around Lahore.
pub fn single_depot(seed: u64, orders: usize, vehicles: usize) -> JsonRoutingRequest {
    let mut rng = SmallRng::seed_from_u64(seed);
    let (code, depot) = SAMPLE_DEPOTS[1];

    JsonRoutingRequest {
        depot,
        vehicles: (1..=vehicles)
            .map(|i| sample_vehicle(&mut rng, format!("{code}-VAN-{i:03}"), None))
            .collect(),
        orders: (1..=orders)
            .map(|i| sample_order(&mut rng, format!("ORD-{}", 1000 + i), depot))
            .collect(),
        params: None,
    }
}

/// Orders and vehicles spread over the three sample depots.
pub fn multi_depot(
    seed: u64,
    orders_per_depot: usize,
    vehicles_per_depot: usize,
) -> JsonMultiDepotRequest {
    let mut rng = SmallRng::seed_from_u64(seed);

    let mut vehicles = Vec::new();
    let mut orders = Vec::new();
    for (code, location) in SAMPLE_DEPOTS {
        vehicles.extend((1..=vehicles_per_depot).map(|i| {
            sample_vehicle(&mut rng, format!("{code}-VAN-{i:03}"), Some(code))
        }));

        let first = orders.len();
        orders.extend((1..=orders_per_depot).map(|i| {
            sample_order(&mut rng, format!("ORD-{}", 1000 + first + i), location)
        }));
    }

    JsonMultiDepotRequest {
        depots: SAMPLE_DEPOTS
            .iter()
            .map(|(code, location)| JsonDepot {
                id: (*code).to_owned(),
                lat: location.lat(),
                lon: location.lon(),
            })
            .collect(),
        vehicles,
        orders,
        params: None,
    }
}

/// A small fleet and packages of random sizes.
pub fn packing(seed: u64, items: usize) -> JsonPackingRequest {
    let mut rng = SmallRng::seed_from_u64(seed);
    let (_, depot) = SAMPLE_DEPOTS[0];

    let vehicles = ["VAN-001", "VAN-002", "TRUCK-001"]
        .into_iter()
        .map(|id| {
            let truck = id.starts_with("TRUCK");
            JsonVehicle {
                id: id.to_owned(),
                capacity_kg: if truck { 3000.0 } else { 1000.0 },
                capacity_m3: None,
                cargo: Some(cargo(truck)),
                home_depot: None,
            }
        })
        .collect();

    let orders = (0..items)
        .map(|i| {
            let mut order = sample_order(&mut rng, format!("ORDER-{}", 1000 + i), depot);
            order.weight_kg = round2(rng.random_range(0.5..20.0));
            order.package = Some(PackageDimensions {
                width: round2(rng.random_range(0.1..0.8)),
                height: round2(rng.random_range(0.1..0.6)),
                depth: round2(rng.random_range(0.1..0.8)),
            });
            order
        })
        .collect();

    JsonPackingRequest {
        vehicles,
        orders,
        ..JsonPackingRequest::default()
    }
}

fn cargo(truck: bool) -> CargoDimensions {
    if truck {
        CargoDimensions {
            width: 2.5,
            height: 2.0,
            depth: 4.0,
        }
    } else {
        CargoDimensions {
            width: 2.0,
            height: 1.8,
            depth: 3.0,
        }
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

mod test_utils;

use dispatch_optimizer::{
    Solver,
    packing::{bin::BinSpec, item::ItemSpec, packer::pack_loads},
    problem::{
        coordinate::Coordinate,
        order::{Order, OrderBuilder},
        time_window::TimeWindow,
        vehicle::{Vehicle, VehicleBuilder},
    },
    solver::solver_params::SolverParams,
};
use fxhash::FxHashSet;
use jiff::SignedDuration;
use rand::{Rng, SeedableRng, rngs::SmallRng};

use crate::test_utils::LAHORE;

fn random_instance(rng: &mut SmallRng) -> (Vec<Vehicle>, Vec<Order>) {
    let vehicles = (0..rng.random_range(0..=3))
        .map(|i| {
            let mut builder = VehicleBuilder::default();
            builder
                .set_vehicle_id(format!("V{i}"))
                .set_capacity(rng.random_range(20.0..150.0));
            if rng.random_bool(0.5) {
                builder.set_volume_capacity(rng.random_range(1.0..4.0));
            }
            builder.build()
        })
        .collect();

    let orders = (0..rng.random_range(1..=8))
        .map(|i| {
            let start = rng.random_range(300..1100);
            let end = (start + rng.random_range(30..300)).min(1439);
            let mut builder = OrderBuilder::default();
            builder
                .set_id(format!("O{i}"))
                .set_location(
                    LAHORE.lat() + rng.random_range(-0.1..0.1),
                    LAHORE.lon() + rng.random_range(-0.1..0.1),
                )
                .set_weight(rng.random_range(1.0..60.0))
                .set_time_window(TimeWindow::new(start, end).unwrap());
            if rng.random_bool(0.5) {
                builder.set_volume(rng.random_range(0.1..1.5));
            }
            builder.build()
        })
        .collect();

    (vehicles, orders)
}

#[test]
fn test_routes_respect_capacity_and_windows() {
    let mut rng = SmallRng::seed_from_u64(2024);

    for trial in 0..1000 {
        let (vehicles, orders) = random_instance(&mut rng);
        let params = SolverParams {
            time_budget: SignedDuration::from_secs(1),
            dispatch_hour: Some(rng.random_range(0..24)),
            max_iterations: Some(50),
            ..SolverParams::default()
        };

        let plan = Solver::new(params).solve(LAHORE, &vehicles, &orders).unwrap();

        let mut seen = FxHashSet::default();
        for route in &plan.routes {
            let vehicle = vehicles
                .iter()
                .find(|vehicle| vehicle.id() == route.vehicle_id)
                .unwrap();

            let mut load = 0.0;
            let mut volume = 0.0;
            let mut previous_departure = route.start_minute;
            for stop in &route.stops {
                let order = orders
                    .iter()
                    .find(|order| order.id() == stop.order_id)
                    .unwrap();
                load += order.weight_kg();
                volume += order.volume_m3();

                assert!(
                    order.time_window().contains(stop.arrival_minute),
                    "trial {trial}: {stop:?} outside {:?}",
                    order.time_window()
                );
                assert!(stop.arrival_minute >= previous_departure, "trial {trial}");
                assert!(seen.insert(stop.order_id.clone()), "trial {trial}");
                previous_departure = stop.departure_minute;
            }

            assert!(load <= vehicle.capacity_kg() + 1e-9, "trial {trial}");
            assert!((route.total_volume_m3 - volume).abs() < 1e-9, "trial {trial}");
            if vehicle.capacity_m3() > 0.0 {
                assert!(volume <= vehicle.capacity_m3() + 1e-9, "trial {trial}");
            }
            assert!(route.end_minute <= 1200, "trial {trial}");
        }

        for order_id in &plan.unserved_order_ids {
            assert!(seen.insert(order_id.clone()), "trial {trial}");
        }
        assert_eq!(seen.len(), orders.len(), "trial {trial}");
    }
}

#[test]
fn test_haversine_symmetry() {
    let mut rng = SmallRng::seed_from_u64(7);

    for _ in 0..1000 {
        let a = Coordinate::new(rng.random_range(-90.0..=90.0), rng.random_range(-180.0..=180.0));
        let b = Coordinate::new(rng.random_range(-90.0..=90.0), rng.random_range(-180.0..=180.0));

        assert_eq!(a.haversine_distance(&b), b.haversine_distance(&a));
        assert!(a.haversine_distance(&a).is_zero());
    }
}

#[test]
fn test_same_input_same_plan() {
    let request = dispatch_optimizer::scenario::single_depot(11, 25, 4);
    let vehicles = request.vehicles();
    let orders = request.orders();

    let first = Solver::new(test_utils::deterministic_params())
        .solve(request.depot, &vehicles, &orders)
        .unwrap();
    let second = Solver::new(test_utils::deterministic_params())
        .solve(request.depot, &vehicles, &orders)
        .unwrap();

    assert_eq!(first.routes, second.routes);
    assert_eq!(first.unserved_order_ids, second.unserved_order_ids);
    assert_eq!(first.statistics.final_cost, second.statistics.final_cost);
}

#[test]
fn test_packing_conservation() {
    let mut rng = SmallRng::seed_from_u64(42);

    for _ in 0..200 {
        let bins = (0..rng.random_range(0..=3))
            .map(|i| {
                BinSpec::new(
                    format!("B{i}"),
                    (
                        rng.random_range(0.5..2.5),
                        rng.random_range(0.5..2.0),
                        rng.random_range(0.5..4.0),
                    ),
                    rng.random_range(10.0..500.0),
                )
            })
            .collect::<Vec<_>>();
        let items = (0..rng.random_range(0..40))
            .map(|i| {
                ItemSpec::new(
                    format!("I{i}"),
                    (
                        rng.random_range(0.1..0.8),
                        rng.random_range(0.1..0.6),
                        rng.random_range(0.1..0.8),
                    ),
                    rng.random_range(0.5..50.0),
                )
            })
            .collect::<Vec<_>>();

        let result = pack_loads(&bins, &items).unwrap();
        let statistics = &result.statistics;

        assert_eq!(statistics.packed_items + statistics.unpacked_items, items.len());
        assert_eq!(statistics.unpacked_items, result.unpacked_item_ids.len());

        let mut seen = FxHashSet::default();
        for (bin, spec) in result.bin_results.iter().zip(&bins) {
            assert!(bin.current_weight <= spec.max_weight + 1e-9);
            assert!(bin.current_volume <= spec.volume() + 1e-9);
            for item in &bin.packed_items {
                assert!(seen.insert(item.item_id.clone()));
            }
        }
        for item_id in &result.unpacked_item_ids {
            assert!(seen.insert(item_id.clone()));
        }
        assert_eq!(seen.len(), items.len());
    }
}

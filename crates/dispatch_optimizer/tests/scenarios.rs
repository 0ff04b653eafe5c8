mod test_utils;

use dispatch_optimizer::{
    Solver,
    multi_depot::{coordinator::MultiDepotCoordinator, params::MultiDepotParams},
    packing::{bin::BinSpec, item::ItemSpec, packer::pack_loads},
    problem::depot::Depot,
    solve_single_depot,
};
use jiff::SignedDuration;

use crate::test_utils::{ISLAMABAD, LAHORE};

#[test]
fn test_single_order_single_vehicle() {
    let vehicles = vec![test_utils::vehicle("LHE-VAN-001", 100.0, None)];
    let orders = vec![test_utils::order("ORD-1", 31.52, 74.36, 10.0, (480, 720))];

    let plan = solve_single_depot(LAHORE, &vehicles, &orders, SignedDuration::from_secs(5))
        .unwrap();

    assert_eq!(plan.routes.len(), 1);
    assert_eq!(plan.routes[0].order_ids().collect::<Vec<_>>(), vec!["ORD-1"]);
    assert_eq!(plan.routes[0].utilization_pct, 10.0);
    assert!(plan.unserved_order_ids.is_empty());

    let stop = &plan.routes[0].stops[0];
    assert!((480..=720).contains(&stop.arrival_minute));
}

#[test]
fn test_no_vehicles() {
    let orders = test_utils::cluster("ORD", LAHORE, 5, 0.02);

    let plan = solve_single_depot(LAHORE, &[], &orders, SignedDuration::from_secs(5)).unwrap();

    assert!(plan.routes.is_empty());
    assert_eq!(
        plan.unserved_order_ids,
        vec!["ORD-1", "ORD-2", "ORD-3", "ORD-4", "ORD-5"]
    );
}

#[test]
fn test_two_depots_keep_their_orders() {
    let depots = vec![Depot::new("LHE", LAHORE), Depot::new("ISB", ISLAMABAD)];
    let mut orders = test_utils::cluster("LHE", LAHORE, 10, 0.02);
    orders.extend(test_utils::cluster("ISB", ISLAMABAD, 10, 0.02));
    let vehicles = vec![
        test_utils::vehicle("LHE-VAN-001", 60.0, Some("LHE")),
        test_utils::vehicle("LHE-VAN-002", 60.0, Some("LHE")),
        test_utils::vehicle("ISB-VAN-001", 60.0, Some("ISB")),
        test_utils::vehicle("ISB-VAN-002", 60.0, Some("ISB")),
    ];

    let plan = MultiDepotCoordinator::new(MultiDepotParams {
        per_depot_budget: SignedDuration::from_secs(2),
        solver: test_utils::deterministic_params(),
    })
    .solve(&depots, &vehicles, &orders)
    .unwrap();

    assert!(plan.unserved_order_ids.is_empty());
    for route in &plan.routes {
        let depot = depots
            .iter()
            .find(|depot| Some(depot.id()) == route.depot_id.as_deref())
            .unwrap();
        assert!(route.vehicle_id.starts_with(depot.id()));

        for order_id in route.order_ids() {
            let order = orders.iter().find(|order| order.id() == order_id).unwrap();
            let own = depot.location().haversine_distance(&order.location());
            for other in &depots {
                assert!(own <= other.location().haversine_distance(&order.location()));
            }
        }
    }
}

#[test]
fn test_overweight_packing() {
    let bins = vec![BinSpec::new("TRUCK-001", (2.5, 2.0, 2.0), 1000.0)];
    let items = (1..=12)
        .map(|i| ItemSpec::new(format!("ITEM-{i}"), (0.5, 0.5, 0.5), 100.0))
        .collect::<Vec<_>>();

    let result = pack_loads(&bins, &items).unwrap();

    assert!(result.statistics.packing_efficiency_pct < 100.0);
    assert!(!result.unpacked_item_ids.is_empty());
    let packed_weight = result.bin_results[0]
        .packed_items
        .iter()
        .map(|item| item.weight)
        .sum::<f64>();
    assert!(packed_weight <= 1000.0);
    assert_eq!(result.statistics.packed_items, 10);
}

#[test]
fn test_window_before_opening_is_unserved() {
    let vehicles = vec![test_utils::vehicle("LHE-VAN-001", 100.0, None)];
    let orders = vec![
        test_utils::order("EARLY", 31.53, 74.36, 10.0, (300, 420)),
        test_utils::order("REGULAR", 31.53, 74.37, 10.0, (480, 720)),
    ];

    let plan = Solver::new(test_utils::deterministic_params())
        .solve(LAHORE, &vehicles, &orders)
        .unwrap();

    assert_eq!(plan.unserved_order_ids, vec!["EARLY"]);
    assert_eq!(plan.routes[0].order_ids().collect::<Vec<_>>(), vec!["REGULAR"]);
}

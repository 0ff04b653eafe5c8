use tracing::{Level, debug, instrument};

use crate::{
    problem::routing_problem::OrderIdx,
    solver::{
        insertion::{Insertion, for_each_feasible_insertion},
        solution::working_solution::WorkingSolution,
        solver_params::TieBreak,
    },
};

/// Costs closer than this are considered equal.
pub const COST_EPSILON: f64 = 1e-9;

struct Candidate {
    insertion: Insertion,
    cost: f64,
    load_variance: f64,
}

/// Global cheapest insertion.
///
/// Each round evaluates every feasible insertion of every remaining order and
/// applies the cheapest one, until no order can be inserted anymore. Orders
/// left over stay unassigned.
#[instrument(skip_all, level = Level::DEBUG)]
pub fn construct_solution(solution: &mut WorkingSolution, candidates: &[OrderIdx], tie_break: TieBreak) {
    let mut remaining = candidates.to_vec();

    while !remaining.is_empty() {
        let Some(best) = find_cheapest_insertion(solution, &remaining, tie_break) else {
            break;
        };

        debug!(
            order = %best.insertion.order_id,
            route = %best.insertion.route_id,
            position = best.insertion.position,
            cost = best.cost,
            "insert"
        );

        solution.insert(
            best.insertion.order_id,
            best.insertion.route_id,
            best.insertion.position,
        );
        remaining.retain(|&order_id| order_id != best.insertion.order_id);
    }
}

fn find_cheapest_insertion(
    solution: &WorkingSolution,
    remaining: &[OrderIdx],
    tie_break: TieBreak,
) -> Option<Candidate> {
    let mut best: Option<Candidate> = None;

    for &order_id in remaining {
        let weight = solution.problem().order(order_id).weight();

        for_each_feasible_insertion(solution, order_id, |insertion, cost| {
            let replace = match &best {
                None => true,
                Some(current) if cost < current.cost - COST_EPSILON => true,
                Some(current) if cost <= current.cost + COST_EPSILON => {
                    tie_break == TieBreak::LoadVariance
                        && solution.load_variance_with(insertion.route_id, weight)
                            < current.load_variance - COST_EPSILON
                }
                Some(_) => false,
            };

            if replace {
                best = Some(Candidate {
                    insertion,
                    cost,
                    load_variance: solution.load_variance_with(insertion.route_id, weight),
                });
            }
        });
    }

    best
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use crate::{
        problem::{coordinate::Coordinate, routing_problem::OrderIdx},
        solver::{
            construction::construct_solution::construct_solution, solution::route_id::RouteIdx,
            solver_params::TieBreak,
        },
        test_utils::{self, TestRoute},
    };

    const DEPOT: Coordinate = Coordinate::new(31.5204, 74.3587);

    fn all_orders(count: usize) -> Vec<OrderIdx> {
        OrderIdx::range(count).collect()
    }

    #[test]
    fn test_line_is_served_in_order() {
        let orders = test_utils::create_line_orders(DEPOT, 4, 0.01);
        let vehicles = vec![test_utils::vehicle("V1", 100.0)];
        let problem = Arc::new(test_utils::create_test_problem(DEPOT, &vehicles, &orders));
        let mut solution = test_utils::create_test_working_solution(&problem, vec![]);

        construct_solution(&mut solution, &all_orders(4), TieBreak::LoadVariance);

        let route = test_utils::route_orders(&solution, 0);
        assert!(route == vec![0, 1, 2, 3] || route == vec![3, 2, 1, 0], "{route:?}");
        assert_eq!(solution.unassigned_orders().count(), 0);
    }

    #[test]
    fn test_capacity_splits_routes() {
        let mut orders = test_utils::create_line_orders(DEPOT, 4, 0.01);
        orders = orders
            .into_iter()
            .map(|order| {
                test_utils::order(
                    order.id(),
                    order.location().lat(),
                    order.location().lon(),
                    40.0,
                    (480, 1200),
                )
            })
            .collect();
        let vehicles = vec![
            test_utils::vehicle("V1", 100.0),
            test_utils::vehicle("V2", 100.0),
        ];
        let problem = Arc::new(test_utils::create_test_problem(DEPOT, &vehicles, &orders));
        let mut solution = test_utils::create_test_working_solution(&problem, vec![]);

        construct_solution(&mut solution, &all_orders(4), TieBreak::LoadVariance);

        assert_eq!(solution.unassigned_orders().count(), 0);
        for route in solution.routes() {
            assert!(route.total_weight() <= 100.0);
            assert_eq!(route.len(), 2);
        }
    }

    #[test]
    fn test_leaves_unfittable_orders() {
        let orders = test_utils::create_line_orders(DEPOT, 3, 0.01);
        let vehicles = vec![test_utils::vehicle("V1", 25.0)];
        let problem = Arc::new(test_utils::create_test_problem(DEPOT, &vehicles, &orders));
        let mut solution = test_utils::create_test_working_solution(&problem, vec![]);

        construct_solution(&mut solution, &all_orders(3), TieBreak::FirstFound);

        assert_eq!(solution.route(RouteIdx::new(0)).len(), 2);
        assert_eq!(solution.unassigned_orders().count(), 1);
        assert!(solution.is_feasible());
    }

    #[test]
    fn test_load_variance_tie_break() {
        // All stops share one location, so adding O3 next to either existing
        // stop is free and both routes tie on cost
        let orders = vec![
            test_utils::order("O1", 31.53, 74.36, 50.0, (480, 1200)),
            test_utils::order("O2", 31.53, 74.36, 10.0, (480, 1200)),
            test_utils::order("O3", 31.53, 74.36, 10.0, (480, 1200)),
        ];
        let vehicles = vec![
            test_utils::vehicle("V1", 100.0),
            test_utils::vehicle("V2", 100.0),
        ];
        let problem = Arc::new(test_utils::create_test_problem(DEPOT, &vehicles, &orders));
        let initial = || {
            vec![
                TestRoute {
                    vehicle_id: 0,
                    order_ids: vec![0],
                },
                TestRoute {
                    vehicle_id: 1,
                    order_ids: vec![1],
                },
            ]
        };

        let mut variance = test_utils::create_test_working_solution(&problem, initial());
        construct_solution(&mut variance, &[OrderIdx::new(2)], TieBreak::LoadVariance);
        assert_eq!(test_utils::route_orders(&variance, 1), vec![2, 1]);

        let mut first_found = test_utils::create_test_working_solution(&problem, initial());
        construct_solution(&mut first_found, &[OrderIdx::new(2)], TieBreak::FirstFound);
        assert_eq!(test_utils::route_orders(&first_found, 0), vec![2, 0]);
    }
}

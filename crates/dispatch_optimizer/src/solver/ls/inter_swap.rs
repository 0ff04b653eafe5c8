use crate::{
    problem::routing_problem::RoutingProblem,
    solver::{
        ls::r#move::LocalSearchOperator,
        solution::{route_id::RouteIdx, working_solution::WorkingSolution},
    },
};

/// **Inter-Route Swap**
///
/// Exchanges the stop `first` of `first_route_id` with the stop `second` of
/// `second_route_id`.
///
/// ```text
/// BEFORE:
///    R1: ... (A) -> [first] -> (B) ...
///    R2: ... (X) -> [second] -> (Y) ...
///
/// AFTER:
///    R1: ... (A) -> [second] -> (B) ...
///    R2: ... (X) -> [first] -> (Y) ...
/// ```
#[derive(Debug)]
pub struct InterSwapOperator {
    params: InterSwapOperatorParams,
}

#[derive(Debug)]
pub struct InterSwapOperatorParams {
    pub first_route_id: RouteIdx,
    pub second_route_id: RouteIdx,
    pub first: usize,
    pub second: usize,
}

impl InterSwapOperator {
    pub fn new(params: InterSwapOperatorParams) -> Self {
        debug_assert_ne!(params.first_route_id, params.second_route_id);

        InterSwapOperator { params }
    }
}

impl LocalSearchOperator for InterSwapOperator {
    fn generate_moves<C>(
        _problem: &RoutingProblem,
        solution: &WorkingSolution,
        (r1, r2): (RouteIdx, RouteIdx),
        mut consumer: C,
    ) where
        C: FnMut(Self),
    {
        // Swaps are symmetric, only one ordering of the pair is needed
        if r1 >= r2 {
            return;
        }

        let first_route = solution.route(r1);
        let second_route = solution.route(r2);

        for first in 0..first_route.len() {
            for second in 0..second_route.len() {
                consumer(InterSwapOperator::new(InterSwapOperatorParams {
                    first_route_id: r1,
                    second_route_id: r2,
                    first,
                    second,
                }));
            }
        }
    }

    fn transport_cost_delta(&self, solution: &WorkingSolution) -> f64 {
        let problem = solution.problem();
        let r1 = solution.route(self.params.first_route_id);
        let r2 = solution.route(self.params.second_route_id);

        let first = r1.node(self.params.first);
        let second = r2.node(self.params.second);

        let a = r1.previous_node(self.params.first);
        let b = r1.next_node(self.params.first);

        let x = r2.previous_node(self.params.second);
        let y = r2.next_node(self.params.second);

        let mut delta = 0.0;

        delta -= problem.travel_cost(a, first) + problem.travel_cost(first, b);
        delta += problem.travel_cost(a, second) + problem.travel_cost(second, b);

        delta -= problem.travel_cost(x, second) + problem.travel_cost(second, y);
        delta += problem.travel_cost(x, first) + problem.travel_cost(first, y);

        delta
    }

    fn is_valid(&self, solution: &WorkingSolution) -> bool {
        let problem = solution.problem();
        let first_route = solution.route(self.params.first_route_id);
        let second_route = solution.route(self.params.second_route_id);

        let first = first_route.order_id(self.params.first);
        let second = second_route.order_id(self.params.second);

        first_route.is_valid_change(
            problem,
            std::iter::once(second),
            self.params.first,
            self.params.first + 1,
        ) && second_route.is_valid_change(
            problem,
            std::iter::once(first),
            self.params.second,
            self.params.second + 1,
        )
    }

    fn apply(&self, solution: &mut WorkingSolution) {
        let first = solution
            .route(self.params.first_route_id)
            .order_id(self.params.first);
        let second = solution
            .route(self.params.second_route_id)
            .order_id(self.params.second);

        solution.replace_activities(
            self.params.first_route_id,
            &[second],
            self.params.first,
            self.params.first + 1,
        );
        solution.replace_activities(
            self.params.second_route_id,
            &[first],
            self.params.second,
            self.params.second + 1,
        );
    }

    fn updated_routes(&self) -> Vec<RouteIdx> {
        vec![self.params.first_route_id, self.params.second_route_id]
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use crate::{
        problem::{coordinate::Coordinate, routing_problem::OrderIdx},
        solver::{
            ls::{
                inter_swap::{InterSwapOperator, InterSwapOperatorParams},
                r#move::LocalSearchOperator,
            },
            solution::route_id::RouteIdx,
        },
        test_utils::{self, TestRoute},
    };

    const DEPOT: Coordinate = Coordinate::new(31.5204, 74.3587);

    #[test]
    fn test_inter_swap_separates_directions() {
        // Two stops north and two stops east, each route mixes both
        let orders = vec![
            test_utils::order("N1", 31.55, 74.3587, 10.0, (480, 1200)),
            test_utils::order("E1", 31.5204, 74.39, 10.0, (480, 1200)),
            test_utils::order("N2", 31.56, 74.3587, 10.0, (480, 1200)),
            test_utils::order("E2", 31.5204, 74.40, 10.0, (480, 1200)),
        ];
        let vehicles = vec![
            test_utils::vehicle("V1", 100.0),
            test_utils::vehicle("V2", 100.0),
        ];
        let problem = Arc::new(test_utils::create_test_problem(DEPOT, &vehicles, &orders));
        let mut solution = test_utils::create_test_working_solution(
            &problem,
            vec![
                TestRoute {
                    vehicle_id: 0,
                    order_ids: vec![0, 3],
                },
                TestRoute {
                    vehicle_id: 1,
                    order_ids: vec![1, 2],
                },
            ],
        );

        let operator = InterSwapOperator::new(InterSwapOperatorParams {
            first_route_id: RouteIdx::new(0),
            second_route_id: RouteIdx::new(1),
            first: 1,
            second: 1,
        });

        let before = solution.total_transport_costs();
        let delta = operator.transport_cost_delta(&solution);
        assert!(delta < 0.0);
        assert!(operator.is_valid(&solution));

        operator.apply(&mut solution);

        assert_eq!(test_utils::route_orders(&solution, 0), vec![0, 2]);
        assert_eq!(test_utils::route_orders(&solution, 1), vec![1, 3]);
        assert_eq!(solution.route_of(OrderIdx::new(3)), Some(RouteIdx::new(1)));
        assert!((before + delta - solution.total_transport_costs()).abs() < 1e-6);
    }

    #[test]
    fn test_inter_swap_respects_capacity() {
        let orders = vec![
            test_utils::order("light", 31.55, 74.3587, 10.0, (480, 1200)),
            test_utils::order("heavy", 31.5204, 74.39, 60.0, (480, 1200)),
        ];
        let vehicles = vec![
            test_utils::vehicle("V1", 20.0),
            test_utils::vehicle("V2", 100.0),
        ];
        let problem = Arc::new(test_utils::create_test_problem(DEPOT, &vehicles, &orders));
        let solution = test_utils::create_test_working_solution(
            &problem,
            vec![
                TestRoute {
                    vehicle_id: 0,
                    order_ids: vec![0],
                },
                TestRoute {
                    vehicle_id: 1,
                    order_ids: vec![1],
                },
            ],
        );

        let operator = InterSwapOperator::new(InterSwapOperatorParams {
            first_route_id: RouteIdx::new(0),
            second_route_id: RouteIdx::new(1),
            first: 0,
            second: 0,
        });

        assert!(!operator.is_valid(&solution));
    }
}

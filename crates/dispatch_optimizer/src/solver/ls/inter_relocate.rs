use crate::{
    problem::routing_problem::RoutingProblem,
    solver::{
        ls::r#move::LocalSearchOperator,
        solution::{route_id::RouteIdx, working_solution::WorkingSolution},
    },
};

/// **Inter-Route Relocate**
///
/// Moves the stop at `from` in `from_route_id` into `to_route_id`, right
/// before the stop at `to`.
///
/// ```text
/// BEFORE:
///    R1: ... (A) -> [from] -> (C) ...
///    R2: ... (X) -> (Y) ...
///
/// AFTER:
///    R1: ... (A) -> (C) ...
///    R2: ... (X) -> [from] -> (Y) ...
/// ```
#[derive(Debug)]
pub struct InterRelocateOperator {
    params: InterRelocateParams,
}

#[derive(Debug)]
pub struct InterRelocateParams {
    pub from_route_id: RouteIdx,
    pub to_route_id: RouteIdx,
    pub from: usize,
    pub to: usize,
}

impl InterRelocateOperator {
    pub fn new(params: InterRelocateParams) -> Self {
        debug_assert_ne!(params.from_route_id, params.to_route_id);

        InterRelocateOperator { params }
    }
}

impl LocalSearchOperator for InterRelocateOperator {
    fn generate_moves<C>(
        problem: &RoutingProblem,
        solution: &WorkingSolution,
        (r1, r2): (RouteIdx, RouteIdx),
        mut consumer: C,
    ) where
        C: FnMut(Self),
    {
        if r1 == r2 {
            return;
        }

        let from_route = solution.route(r1);
        let to_route = solution.route(r2);
        let to_vehicle = to_route.vehicle(problem);

        for from in 0..from_route.len() {
            let order = problem.order(from_route.order_id(from));
            if !to_vehicle.fits(
                to_route.total_weight() + order.weight(),
                to_route.total_volume() + order.volume(),
            ) {
                continue;
            }

            for to in 0..=to_route.len() {
                consumer(InterRelocateOperator::new(InterRelocateParams {
                    from_route_id: r1,
                    to_route_id: r2,
                    from,
                    to,
                }));
            }
        }
    }

    fn transport_cost_delta(&self, solution: &WorkingSolution) -> f64 {
        let problem = solution.problem();
        let from_route = solution.route(self.params.from_route_id);
        let to_route = solution.route(self.params.to_route_id);

        let a = from_route.previous_node(self.params.from);
        let moved = from_route.node(self.params.from);
        let c = from_route.next_node(self.params.from);

        let x = to_route.previous_node(self.params.to);
        let y = to_route.node_or_depot(self.params.to);

        let removal = problem.travel_cost(a, c)
            - problem.travel_cost(a, moved)
            - problem.travel_cost(moved, c);
        let insertion = problem.travel_cost(x, moved) + problem.travel_cost(moved, y)
            - problem.travel_cost(x, y);

        removal + insertion
    }

    fn is_valid(&self, solution: &WorkingSolution) -> bool {
        let problem = solution.problem();
        let from_route = solution.route(self.params.from_route_id);
        let to_route = solution.route(self.params.to_route_id);
        let moved = from_route.order_id(self.params.from);

        to_route.is_valid_change(
            problem,
            std::iter::once(moved),
            self.params.to,
            self.params.to,
        ) && from_route.is_valid_change(
            problem,
            std::iter::empty(),
            self.params.from,
            self.params.from + 1,
        )
    }

    fn apply(&self, solution: &mut WorkingSolution) {
        let moved = solution
            .route(self.params.from_route_id)
            .order_id(self.params.from);

        solution.replace_activities(
            self.params.from_route_id,
            &[],
            self.params.from,
            self.params.from + 1,
        );
        solution.replace_activities(self.params.to_route_id, &[moved], self.params.to, self.params.to);
    }

    fn updated_routes(&self) -> Vec<RouteIdx> {
        vec![self.params.from_route_id, self.params.to_route_id]
    }
}

use crate::{
    problem::routing_problem::OrderIdx,
    solver::solution::{route_id::RouteIdx, working_solution::WorkingSolution},
    utils::enumerate_idx::EnumerateIdx,
};

/// Insert `order_id` before the stop at `position` of `route_id`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Insertion {
    pub order_id: OrderIdx,
    pub route_id: RouteIdx,
    pub position: usize,
}

/// Calls `f` with every feasible insertion of `order_id` and its added cost,
/// routes and positions in ascending order.
pub fn for_each_feasible_insertion(
    solution: &WorkingSolution,
    order_id: OrderIdx,
    mut f: impl FnMut(Insertion, f64),
) {
    let problem = solution.problem();
    let order = problem.order(order_id);

    for (route_id, route) in solution.routes().iter().enumerate_idx() {
        // Capacity does not depend on the position, skip the whole route early
        if !route.vehicle(problem).fits(
            route.total_weight() + order.weight(),
            route.total_volume() + order.volume(),
        ) {
            continue;
        }

        for position in 0..=route.len() {
            if route.can_insert(problem, order_id, position) {
                f(
                    Insertion {
                        order_id,
                        route_id,
                        position,
                    },
                    route.insertion_cost(problem, order_id, position),
                );
            }
        }
    }
}

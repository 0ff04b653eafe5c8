use crate::{
    problem::routing_problem::{OrderIdx, RoutingProblem},
    solver::{
        ls::r#move::LocalSearchOperator,
        solution::{route_id::RouteIdx, working_solution::WorkingSolution},
    },
};

/// **Intra-Route 2-Opt**
///
/// Reverses the stops between `from` and `to` (inclusive), removing a
/// crossing within a single route.
///
/// ```text
/// BEFORE:
///    ... (prev) --x--> [from] -> ... -> [to] --x--> (next) ...
///
/// AFTER:
///    ... (prev) -----> [to] -> ... -> [from] -----> (next) ...
///
/// Edges Removed: (prev->from), (to->next)
/// Edges Added:   (prev->to),   (from->next)
/// ```
///
/// Inner edges are traversed backward, which costs the same since the
/// great-circle matrices are symmetric.
#[derive(Debug)]
pub struct TwoOptOperator {
    params: TwoOptParams,
}

#[derive(Debug)]
pub struct TwoOptParams {
    pub route_id: RouteIdx,
    pub from: usize,
    pub to: usize,
}

impl TwoOptOperator {
    pub fn new(params: TwoOptParams) -> Self {
        debug_assert!(params.from < params.to, "2-opt needs from < to");

        TwoOptOperator { params }
    }

    fn reversed(&self, solution: &WorkingSolution) -> Vec<OrderIdx> {
        let route = solution.route(self.params.route_id);
        route.order_ids()[self.params.from..=self.params.to]
            .iter()
            .rev()
            .copied()
            .collect()
    }
}

impl LocalSearchOperator for TwoOptOperator {
    fn generate_moves<C>(
        _problem: &RoutingProblem,
        solution: &WorkingSolution,
        (r1, r2): (RouteIdx, RouteIdx),
        mut consumer: C,
    ) where
        C: FnMut(Self),
    {
        if r1 != r2 {
            return;
        }

        let len = solution.route(r1).len();

        for from in 0..len {
            for to in from + 1..len {
                consumer(TwoOptOperator::new(TwoOptParams {
                    route_id: r1,
                    from,
                    to,
                }));
            }
        }
    }

    fn transport_cost_delta(&self, solution: &WorkingSolution) -> f64 {
        let problem = solution.problem();
        let route = solution.route(self.params.route_id);

        let prev = route.previous_node(self.params.from);
        let from = route.node(self.params.from);
        let to = route.node(self.params.to);
        let next = route.next_node(self.params.to);

        let current_cost = problem.travel_cost(prev, from) + problem.travel_cost(to, next);
        let new_cost = problem.travel_cost(prev, to) + problem.travel_cost(from, next);

        new_cost - current_cost
    }

    fn is_valid(&self, solution: &WorkingSolution) -> bool {
        solution.route(self.params.route_id).is_valid_change(
            solution.problem(),
            self.reversed(solution),
            self.params.from,
            self.params.to + 1,
        )
    }

    fn apply(&self, solution: &mut WorkingSolution) {
        let reversed = self.reversed(solution);
        solution.replace_activities(
            self.params.route_id,
            &reversed,
            self.params.from,
            self.params.to + 1,
        );
    }

    fn updated_routes(&self) -> Vec<RouteIdx> {
        vec![self.params.route_id]
    }
}

use tracing::{Level, instrument};

use crate::{
    problem::routing_problem::{OrderIdx, RoutingProblem},
    solver::{
        ls::r#move::LocalSearchOperator,
        solution::{route_id::RouteIdx, working_solution::WorkingSolution},
    },
};

/// **Intra-Route Relocate**
///
/// Moves the stop at `from` so that it is visited right before the stop
/// currently at `to` (or last when `to == len`).
///
/// ```text
/// BEFORE:
///    Route: ... (A) -> [from] -> (C) ... (X) -> (Y) ...
///
/// AFTER:
///    Route: ... (A) -> (C) ... (X) -> [from] -> (Y) ...
///
/// Edges Removed: (A->from), (from->C), (X->Y)
/// Edges Added:   (A->C),    (X->from), (from->Y)
/// ```
#[derive(Debug)]
pub struct RelocateOperator {
    params: RelocateOperatorParams,
}

#[derive(Debug)]
pub struct RelocateOperatorParams {
    pub route_id: RouteIdx,
    pub from: usize,
    pub to: usize,
}

impl RelocateOperator {
    pub fn new(params: RelocateOperatorParams) -> Self {
        debug_assert!(
            params.from != params.to && params.from + 1 != params.to,
            "relocate to the same position"
        );

        Self { params }
    }

    /// The rewritten segment and its bounds in the current route.
    fn replacement(&self, solution: &WorkingSolution) -> (Vec<OrderIdx>, usize, usize) {
        let route = solution.route(self.params.route_id);
        let moved = route.order_id(self.params.from);
        let (from, to) = (self.params.from, self.params.to);

        if from < to {
            // A - B - C - D - E, moving B before E gives C - D - B over B..E
            let mut segment = route.order_ids()[from + 1..to].to_vec();
            segment.push(moved);
            (segment, from, to)
        } else {
            // Moving D before B gives D - B - C over B..E
            let mut segment = Vec::with_capacity(from - to + 1);
            segment.push(moved);
            segment.extend_from_slice(&route.order_ids()[to..from]);
            (segment, to, from + 1)
        }
    }
}

impl LocalSearchOperator for RelocateOperator {
    #[instrument(skip_all, level = Level::TRACE)]
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
            for to in 0..=len {
                if from == to || from + 1 == to {
                    continue;
                }

                consumer(RelocateOperator::new(RelocateOperatorParams {
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

        let a = route.previous_node(self.params.from);
        let moved = route.node(self.params.from);
        let c = route.next_node(self.params.from);

        let x = route.previous_node(self.params.to);
        let y = route.node_or_depot(self.params.to);

        let current_cost = problem.travel_cost(a, moved)
            + problem.travel_cost(moved, c)
            + problem.travel_cost(x, y);

        let new_cost = problem.travel_cost(a, c)
            + problem.travel_cost(x, moved)
            + problem.travel_cost(moved, y);

        new_cost - current_cost
    }

    fn is_valid(&self, solution: &WorkingSolution) -> bool {
        let (segment, start, end) = self.replacement(solution);
        solution.route(self.params.route_id).is_valid_change(
            solution.problem(),
            segment,
            start,
            end,
        )
    }

    fn apply(&self, solution: &mut WorkingSolution) {
        let (segment, start, end) = self.replacement(solution);
        solution.replace_activities(self.params.route_id, &segment, start, end);
    }

    fn updated_routes(&self) -> Vec<RouteIdx> {
        vec![self.params.route_id]
    }
}

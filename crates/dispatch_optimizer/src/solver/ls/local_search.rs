use jiff::Timestamp;
use tracing::{debug, instrument};

use crate::{
    problem::routing_problem::RoutingProblem,
    solver::{
        ls::{
            inter_relocate::InterRelocateOperator,
            inter_swap::InterSwapOperator,
            r#move::{LocalSearchMove, LocalSearchOperator},
            relocate::RelocateOperator,
            two_opt::TwoOptOperator,
        },
        solution::{route_id::RouteIdx, working_solution::WorkingSolution},
        statistics::SearchStatistics,
    },
};

/// Moves must improve the cost by more than this to be applied.
const IMPROVEMENT_THRESHOLD: f64 = -1e-6;

type RoutePair = (RouteIdx, RouteIdx);

/// When the search should stop.
#[derive(Debug, Clone, Copy)]
pub struct LocalSearchLimits {
    pub deadline: Timestamp,
    pub max_iterations: Option<usize>,
}

/// Best-improvement local search.
///
/// The best move of every ordered route pair is cached, after a move is
/// applied only the pairs involving an updated route are evaluated again.
pub struct LocalSearch {
    pairs: Vec<RoutePair>,
    best_moves: Vec<Vec<Option<(f64, LocalSearchMove)>>>,
}

impl LocalSearch {
    pub fn new(problem: &RoutingProblem) -> Self {
        let count = problem.vehicles().len();

        LocalSearch {
            pairs: Vec::with_capacity(count * count),
            best_moves: (0..count)
                .map(|_| (0..count).map(|_| None).collect())
                .collect(),
        }
    }

    /// Improves `solution` until no improving move is left or a limit is hit.
    /// Returns true when a local optimum was reached.
    #[instrument(skip_all, level = "debug")]
    pub fn run(
        &mut self,
        problem: &RoutingProblem,
        solution: &mut WorkingSolution,
        limits: LocalSearchLimits,
        statistics: &mut SearchStatistics,
    ) -> bool {
        self.build_pairs(solution);

        loop {
            if Timestamp::now() >= limits.deadline {
                debug!(
                    iterations = statistics.local_search_iterations,
                    "time budget exhausted"
                );
                return false;
            }

            if limits
                .max_iterations
                .is_some_and(|max| statistics.local_search_iterations >= max)
            {
                debug!(
                    iterations = statistics.local_search_iterations,
                    "iteration limit reached"
                );
                return false;
            }

            statistics.local_search_iterations += 1;

            match self.run_iteration(problem, solution) {
                Some(operator_name) => statistics.record_move(operator_name),
                None => return true,
            }
        }
    }

    /// Applies the best improving move, if any, and returns its operator name.
    fn run_iteration(
        &mut self,
        problem: &RoutingProblem,
        solution: &mut WorkingSolution,
    ) -> Option<&'static str> {
        for &(r1, r2) in &self.pairs {
            self.best_moves[r1.get()][r2.get()] = find_best_move(problem, solution, (r1, r2));
        }

        let mut best: Option<(f64, RoutePair)> = None;
        for (i, row) in self.best_moves.iter().enumerate() {
            for (j, candidate) in row.iter().enumerate() {
                if let Some((delta, _)) = candidate
                    && best.is_none_or(|(best_delta, _)| *delta < best_delta)
                {
                    best = Some((*delta, (RouteIdx::new(i), RouteIdx::new(j))));
                }
            }
        }

        let (best_delta, (r1, r2)) = best?;
        if best_delta >= IMPROVEMENT_THRESHOLD {
            return None;
        }

        let (_, op) = self.best_moves[r1.get()][r2.get()].take()?;

        debug!(
            "Apply {} ({}, {}) (d={}) {:?}",
            op.operator_name(),
            r1,
            r2,
            best_delta,
            op
        );

        op.apply(solution);
        self.update_pairs(solution, &op.updated_routes());

        Some(op.operator_name())
    }

    fn build_pairs(&mut self, solution: &WorkingSolution) {
        self.pairs.clear();

        let count = solution.routes().len();
        for i in 0..count {
            for j in 0..count {
                self.pairs.push((RouteIdx::new(i), RouteIdx::new(j)));
            }
        }
    }

    fn update_pairs(&mut self, solution: &WorkingSolution, updated_routes: &[RouteIdx]) {
        self.pairs.clear();

        for i in 0..solution.routes().len() {
            for &updated_route in updated_routes {
                self.pairs.push((RouteIdx::new(i), updated_route));
                self.pairs.push((updated_route, RouteIdx::new(i)));
            }
        }

        self.pairs.sort_unstable();
        self.pairs.dedup();
    }
}

fn find_best_move(
    problem: &RoutingProblem,
    solution: &WorkingSolution,
    routes: RoutePair,
) -> Option<(f64, LocalSearchMove)> {
    let mut best_delta = IMPROVEMENT_THRESHOLD;
    let mut best_move: Option<LocalSearchMove> = None;

    RelocateOperator::generate_moves(problem, solution, routes, |op| {
        let delta = op.delta(solution);
        if delta < best_delta && op.is_valid(solution) {
            best_delta = delta;
            best_move = Some(LocalSearchMove::Relocate(op));
        }
    });

    TwoOptOperator::generate_moves(problem, solution, routes, |op| {
        let delta = op.delta(solution);
        if delta < best_delta && op.is_valid(solution) {
            best_delta = delta;
            best_move = Some(LocalSearchMove::TwoOpt(op));
        }
    });

    InterRelocateOperator::generate_moves(problem, solution, routes, |op| {
        let delta = op.delta(solution);
        if delta < best_delta && op.is_valid(solution) {
            best_delta = delta;
            best_move = Some(LocalSearchMove::InterRelocate(op));
        }
    });

    InterSwapOperator::generate_moves(problem, solution, routes, |op| {
        let delta = op.delta(solution);
        if delta < best_delta && op.is_valid(solution) {
            best_delta = delta;
            best_move = Some(LocalSearchMove::InterSwap(op));
        }
    });

    best_move.map(|op| (best_delta, op))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use jiff::{SignedDuration, Timestamp};

    use crate::{
        problem::coordinate::Coordinate,
        solver::{
            ls::local_search::{LocalSearch, LocalSearchLimits},
            statistics::SearchStatistics,
        },
        test_utils::{self, TestRoute},
    };

    const DEPOT: Coordinate = Coordinate::new(31.5204, 74.3587);

    fn limits() -> LocalSearchLimits {
        LocalSearchLimits {
            deadline: Timestamp::now() + SignedDuration::from_secs(10),
            max_iterations: None,
        }
    }

    #[test]
    fn test_improves_scrambled_route() {
        let orders = test_utils::create_line_orders(DEPOT, 6, 0.01);
        let vehicles = vec![test_utils::vehicle("V1", 100.0)];
        let problem = Arc::new(test_utils::create_test_problem(DEPOT, &vehicles, &orders));
        let mut solution = test_utils::create_test_working_solution(
            &problem,
            vec![TestRoute {
                vehicle_id: 0,
                order_ids: vec![3, 0, 5, 1, 4, 2],
            }],
        );
        let before = solution.total_transport_costs();

        let mut statistics = SearchStatistics::default();
        let converged =
            LocalSearch::new(&problem).run(&problem, &mut solution, limits(), &mut statistics);

        assert!(converged);
        assert!(solution.total_transport_costs() < before);
        assert!(solution.is_feasible());

        let route = test_utils::route_orders(&solution, 0);
        assert!(
            route == vec![0, 1, 2, 3, 4, 5] || route == vec![5, 4, 3, 2, 1, 0],
            "{route:?}"
        );
        assert!(statistics.applied_moves.values().sum::<usize>() > 0);
    }

    #[test]
    fn test_moves_orders_between_routes() {
        // Each route serves one stop north and one stop south
        let orders = vec![
            test_utils::order("N1", 31.55, 74.3587, 10.0, (480, 1200)),
            test_utils::order("S1", 31.49, 74.3587, 10.0, (480, 1200)),
            test_utils::order("N2", 31.56, 74.3587, 10.0, (480, 1200)),
            test_utils::order("S2", 31.48, 74.3587, 10.0, (480, 1200)),
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
                    order_ids: vec![0, 1],
                },
                TestRoute {
                    vehicle_id: 1,
                    order_ids: vec![2, 3],
                },
            ],
        );
        let before = solution.total_transport_costs();

        let mut statistics = SearchStatistics::default();
        LocalSearch::new(&problem).run(&problem, &mut solution, limits(), &mut statistics);

        assert!(solution.total_transport_costs() < before);
        assert!(solution.is_feasible());
        for route in solution.routes() {
            let lats = route
                .order_ids()
                .iter()
                .map(|&order_id| orders[order_id.get()].location().lat())
                .collect::<Vec<_>>();
            // No route crosses the depot anymore
            assert!(
                lats.iter().all(|&lat| lat > DEPOT.lat()) || lats.iter().all(|&lat| lat < DEPOT.lat()),
                "{lats:?}"
            );
        }
    }

    #[test]
    fn test_respects_iteration_limit() {
        let orders = test_utils::create_line_orders(DEPOT, 6, 0.01);
        let vehicles = vec![test_utils::vehicle("V1", 100.0)];
        let problem = Arc::new(test_utils::create_test_problem(DEPOT, &vehicles, &orders));
        let mut solution = test_utils::create_test_working_solution(
            &problem,
            vec![TestRoute {
                vehicle_id: 0,
                order_ids: vec![3, 0, 5, 1, 4, 2],
            }],
        );

        let mut statistics = SearchStatistics::default();
        let converged = LocalSearch::new(&problem).run(
            &problem,
            &mut solution,
            LocalSearchLimits {
                deadline: Timestamp::now() + SignedDuration::from_secs(10),
                max_iterations: Some(1),
            },
            &mut statistics,
        );

        assert!(!converged);
        assert_eq!(statistics.local_search_iterations, 1);
    }

    #[test]
    fn test_expired_deadline_keeps_solution() {
        let orders = test_utils::create_line_orders(DEPOT, 3, 0.01);
        let vehicles = vec![test_utils::vehicle("V1", 100.0)];
        let problem = Arc::new(test_utils::create_test_problem(DEPOT, &vehicles, &orders));
        let mut solution = test_utils::create_test_working_solution(
            &problem,
            vec![TestRoute {
                vehicle_id: 0,
                order_ids: vec![2, 0, 1],
            }],
        );

        let mut statistics = SearchStatistics::default();
        let converged = LocalSearch::new(&problem).run(
            &problem,
            &mut solution,
            LocalSearchLimits {
                deadline: Timestamp::now() - SignedDuration::from_secs(1),
                max_iterations: None,
            },
            &mut statistics,
        );

        assert!(!converged);
        assert_eq!(test_utils::route_orders(&solution, 0), vec![2, 0, 1]);
    }
}

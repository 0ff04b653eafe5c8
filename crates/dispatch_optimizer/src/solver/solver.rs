use std::sync::Arc;

use jiff::{SignedDuration, Timestamp};
use tracing::{info, instrument, warn};

use crate::{
    error::OptimizerError,
    plan::route_plan::RoutePlan,
    problem::{
        coordinate::Coordinate,
        order::Order,
        routing_problem::{OrderIdx, RoutingProblem, validate_inputs},
        vehicle::Vehicle,
    },
    solver::{
        construction::construct_solution::construct_solution,
        ls::local_search::{LocalSearch, LocalSearchLimits},
        solution::working_solution::WorkingSolution,
        solver_params::SolverParams,
        statistics::SearchStatistics,
    },
    timer_debug,
};

/// Routes orders from a single depot: cheapest insertion followed by local
/// search until the time budget runs out or no move improves the plan.
pub struct Solver {
    params: SolverParams,
}

impl Solver {
    pub fn new(params: SolverParams) -> Self {
        Solver { params }
    }

    pub fn params(&self) -> &SolverParams {
        &self.params
    }

    #[instrument(skip_all, level = "info", fields(vehicles = vehicles.len(), orders = orders.len()))]
    pub fn solve(
        &self,
        depot: Coordinate,
        vehicles: &[Vehicle],
        orders: &[Order],
    ) -> Result<RoutePlan, OptimizerError> {
        self.params.validate()?;
        validate_inputs(&depot, vehicles, orders)?;

        let started = Timestamp::now();
        let deadline = started
            .checked_add(self.params.time_budget)
            .unwrap_or(Timestamp::MAX);

        let traffic_multiplier = self.params.traffic_multiplier();
        let mut statistics = SearchStatistics {
            traffic_multiplier,
            ..SearchStatistics::default()
        };

        if vehicles.is_empty() || orders.is_empty() {
            info!("nothing to route");
            statistics.unserved_orders = orders.len();
            statistics.converged = true;
            return Ok(RoutePlan::unrouted(orders, statistics));
        }

        let problem = Arc::new(timer_debug!(
            "matrices",
            RoutingProblem::new(
                depot,
                vehicles,
                orders,
                self.params.depot_hours,
                self.params.speed,
                traffic_multiplier,
            )
        ));

        let candidates = OrderIdx::range(orders.len())
            .filter(|&order_id| match problem.screen_order(order_id) {
                Some(reason) => {
                    warn!(
                        order = problem.order(order_id).external_id(),
                        ?reason,
                        "order cannot be served"
                    );
                    false
                }
                None => true,
            })
            .collect::<Vec<_>>();

        let mut solution = WorkingSolution::new(Arc::clone(&problem));

        timer_debug!(
            "construction",
            construct_solution(&mut solution, &candidates, self.params.tie_break)
        );
        statistics.construction_duration = Timestamp::now().duration_since(started);
        statistics.construction_cost = solution.total_transport_costs();

        if self.params.enable_local_search {
            let local_search_started = Timestamp::now();
            let mut local_search = LocalSearch::new(&problem);
            statistics.converged = timer_debug!(
                "local_search",
                local_search.run(
                    &problem,
                    &mut solution,
                    LocalSearchLimits {
                        deadline,
                        max_iterations: self.params.max_iterations,
                    },
                    &mut statistics,
                )
            );
            statistics.local_search_duration =
                Timestamp::now().duration_since(local_search_started);
        }

        debug_assert!(solution.is_feasible());

        statistics.final_cost = solution.total_transport_costs();
        statistics.routed_orders = orders.len() - solution.unassigned_orders().count();
        statistics.unserved_orders = orders.len() - statistics.routed_orders;

        info!(
            routes = solution.non_empty_routes_count(),
            routed = statistics.routed_orders,
            unserved = statistics.unserved_orders,
            construction_cost = statistics.construction_cost,
            final_cost = statistics.final_cost,
            converged = statistics.converged,
            "solve finished"
        );

        Ok(RoutePlan::from_solution(&solution, statistics))
    }
}

/// Solves one depot with default parameters and the given time budget.
pub fn solve_single_depot(
    depot: Coordinate,
    vehicles: &[Vehicle],
    orders: &[Order],
    time_budget: SignedDuration,
) -> Result<RoutePlan, OptimizerError> {
    Solver::new(SolverParams::with_time_budget(time_budget)).solve(depot, vehicles, orders)
}

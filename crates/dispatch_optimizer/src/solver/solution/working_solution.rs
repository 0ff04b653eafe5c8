use std::sync::Arc;

use crate::{
    problem::routing_problem::{OrderIdx, RoutingProblem, VehicleIdx},
    solver::solution::{route::WorkingSolutionRoute, route_id::RouteIdx},
    utils::enumerate_idx::EnumerateIdx,
};

/// Mutable search state: one route per vehicle plus the route each order is
/// currently assigned to.
#[derive(Clone)]
pub struct WorkingSolution {
    problem: Arc<RoutingProblem>,
    routes: Vec<WorkingSolutionRoute>,
    assignments: Vec<Option<RouteIdx>>,
}

impl WorkingSolution {
    pub fn new(problem: Arc<RoutingProblem>) -> Self {
        let routes = VehicleIdx::range(problem.vehicles().len())
            .map(|vehicle_id| WorkingSolutionRoute::empty(&problem, vehicle_id))
            .collect();
        let assignments = vec![None; problem.orders().len()];

        WorkingSolution {
            problem,
            routes,
            assignments,
        }
    }

    pub fn problem(&self) -> &RoutingProblem {
        &self.problem
    }

    pub fn routes(&self) -> &[WorkingSolutionRoute] {
        &self.routes
    }

    pub fn route(&self, route_id: RouteIdx) -> &WorkingSolutionRoute {
        &self.routes[route_id]
    }

    pub fn route_mut(&mut self, route_id: RouteIdx) -> &mut WorkingSolutionRoute {
        &mut self.routes[route_id]
    }

    pub fn route_of(&self, order_id: OrderIdx) -> Option<RouteIdx> {
        self.assignments[order_id.get()]
    }

    pub fn is_assigned(&self, order_id: OrderIdx) -> bool {
        self.route_of(order_id).is_some()
    }

    pub fn unassigned_orders(&self) -> impl Iterator<Item = OrderIdx> + '_ {
        self.assignments
            .iter()
            .enumerate_idx()
            .filter(|(_, route)| route.is_none())
            .map(|(order_id, _)| order_id)
    }

    pub fn non_empty_routes_count(&self) -> usize {
        self.routes.iter().filter(|route| !route.is_empty()).count()
    }

    pub fn total_transport_costs(&self) -> f64 {
        self.routes
            .iter()
            .map(|route| route.transport_costs(&self.problem))
            .sum()
    }

    pub fn insert(&mut self, order_id: OrderIdx, route_id: RouteIdx, position: usize) {
        let problem = Arc::clone(&self.problem);
        self.routes[route_id].insert(&problem, order_id, position);
        self.assignments[order_id.get()] = Some(route_id);
    }

    /// Replaces `start..end` of a route with `replacement`, keeping the order
    /// assignments in sync.
    pub fn replace_activities(
        &mut self,
        route_id: RouteIdx,
        replacement: &[OrderIdx],
        start: usize,
        end: usize,
    ) {
        let problem = Arc::clone(&self.problem);
        let route = &mut self.routes[route_id];

        for &removed in &route.order_ids()[start..end] {
            self.assignments[removed.get()] = None;
        }

        route.replace_activities(&problem, replacement, start, end);

        for &added in replacement {
            self.assignments[added.get()] = Some(route_id);
        }
    }

    /// Fleet load variance in kg² if `extra_weight` were added to `route_id`.
    pub fn load_variance_with(&self, route_id: RouteIdx, extra_weight: f64) -> f64 {
        let count = self.routes.len() as f64;
        let (sum, sum_of_squares) =
            self.routes
                .iter()
                .enumerate_idx()
                .fold((0.0, 0.0), |(sum, squares), (id, route): (RouteIdx, _)| {
                    let load = if id == route_id {
                        route.total_weight() + extra_weight
                    } else {
                        route.total_weight()
                    };
                    (sum + load, squares + load * load)
                });

        let mean = sum / count;
        (sum_of_squares / count - mean * mean).max(0.0)
    }

    pub fn is_feasible(&self) -> bool {
        self.routes
            .iter()
            .all(|route| route.is_feasible(&self.problem))
    }
}

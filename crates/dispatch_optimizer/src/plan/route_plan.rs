use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::{
    problem::{
        order::Order,
        routing_problem::{RoutingProblem, order_node},
        travel_matrix::DEPOT_NODE,
    },
    solver::{
        solution::{route::WorkingSolutionRoute, working_solution::WorkingSolution},
        statistics::SearchStatistics,
    },
    utils::round::{percentage, round_to},
};

/// One delivery of a route. Minutes are minutes of day.
#[derive(Serialize, Deserialize, JsonSchema, Debug, Clone, PartialEq)]
pub struct RouteStop {
    pub order_id: String,
    /// 1-based position in the route
    pub sequence: usize,
    /// Minute service starts, always inside the order's time window
    pub arrival_minute: u32,
    pub wait_minutes: u32,
    pub departure_minute: u32,
    /// Weight delivered so far, this stop included
    pub load_after_kg: f64,
    pub distance_from_previous_m: u64,
}

#[derive(Serialize, Deserialize, JsonSchema, Debug, Clone, PartialEq)]
pub struct Route {
    pub route_id: String,
    pub vehicle_id: String,
    pub depot_id: Option<String>,
    pub stops: Vec<RouteStop>,
    /// Including the return to the depot
    pub total_distance_m: u64,
    pub total_distance_km: f64,
    pub total_load_kg: f64,
    pub total_volume_m3: f64,
    pub capacity_kg: f64,
    pub utilization_pct: f64,
    pub start_minute: u32,
    pub end_minute: u32,
    pub duration_minutes: u32,
}

impl Route {
    pub(crate) fn from_working_route(
        problem: &RoutingProblem,
        route: &WorkingSolutionRoute,
    ) -> Self {
        let vehicle = route.vehicle(problem);

        let mut previous = DEPOT_NODE;
        let stops = route
            .order_ids()
            .iter()
            .enumerate()
            .map(|(position, &order_id)| {
                let node = order_node(order_id);
                let distance = problem.distance(previous, node);
                previous = node;

                RouteStop {
                    order_id: problem.order(order_id).external_id().to_owned(),
                    sequence: position + 1,
                    arrival_minute: to_minute(route.begin(position)),
                    wait_minutes: to_minute(route.waiting(position)),
                    departure_minute: to_minute(route.departure(position)),
                    load_after_kg: route.load_at(position),
                    distance_from_previous_m: distance.value(),
                }
            })
            .collect();

        let distance = route.distance(problem);
        let start_minute = to_minute(route.start(problem));
        let end_minute = to_minute(route.end());

        Route {
            route_id: format!("RT-{}", vehicle.external_id()),
            vehicle_id: vehicle.external_id().to_owned(),
            depot_id: None,
            stops,
            total_distance_m: distance.value(),
            total_distance_km: round_to(distance.kilometers(), 2),
            total_load_kg: route.total_weight(),
            total_volume_m3: route.total_volume(),
            capacity_kg: vehicle.capacity_kg(),
            utilization_pct: percentage(route.total_weight(), vehicle.capacity_kg()),
            start_minute,
            end_minute,
            duration_minutes: end_minute.saturating_sub(start_minute),
        }
    }

    pub fn order_ids(&self) -> impl Iterator<Item = &str> {
        self.stops.iter().map(|stop| stop.order_id.as_str())
    }

    pub fn len(&self) -> usize {
        self.stops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stops.is_empty()
    }
}

/// Result of a single depot solve.
#[derive(Serialize, Deserialize, JsonSchema, Debug, Clone, PartialEq, Default)]
pub struct RoutePlan {
    pub routes: Vec<Route>,
    /// Orders no route could take, in input order
    pub unserved_order_ids: Vec<String>,
    pub statistics: SearchStatistics,
}

impl RoutePlan {
    /// Plan serving nothing, used when there is nothing to route.
    pub fn unrouted(orders: &[Order], statistics: SearchStatistics) -> Self {
        RoutePlan {
            routes: Vec::new(),
            unserved_order_ids: orders.iter().map(|order| order.id().to_owned()).collect(),
            statistics,
        }
    }

    pub(crate) fn from_solution(solution: &WorkingSolution, statistics: SearchStatistics) -> Self {
        let problem = solution.problem();

        let routes = solution
            .routes()
            .iter()
            .filter(|route| !route.is_empty())
            .map(|route| Route::from_working_route(problem, route))
            .collect();

        let unserved_order_ids = solution
            .unassigned_orders()
            .map(|order_id| problem.order(order_id).external_id().to_owned())
            .collect();

        RoutePlan {
            routes,
            unserved_order_ids,
            statistics,
        }
    }

    pub fn total_distance_m(&self) -> u64 {
        self.routes.iter().map(|route| route.total_distance_m).sum()
    }

    pub fn routed_orders_count(&self) -> usize {
        self.routes.iter().map(Route::len).sum()
    }

    pub fn route_of_vehicle(&self, vehicle_id: &str) -> Option<&Route> {
        self.routes.iter().find(|route| route.vehicle_id == vehicle_id)
    }
}

fn to_minute(minute: i64) -> u32 {
    u32::try_from(minute.max(0)).unwrap_or(u32::MAX)
}

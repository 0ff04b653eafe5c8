use fxhash::{FxHashMap, FxHashSet};
use jiff::SignedDuration;
use rayon::iter::{IndexedParallelIterator, IntoParallelRefIterator, ParallelIterator};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use crate::{
    error::OptimizerError,
    multi_depot::params::MultiDepotParams,
    plan::{
        application::{PlanApplicationError, apply_routes},
        route_plan::{Route, RoutePlan},
    },
    problem::{
        coordinate::Coordinate, depot::Depot, order::Order,
        routing_problem::validate_vehicles_and_orders, vehicle::Vehicle,
    },
    solver::{solver::Solver, statistics::SearchStatistics},
};

#[derive(Serialize, Deserialize, JsonSchema, Debug, Clone, PartialEq)]
pub struct DepotSummary {
    pub depot_id: String,
    pub order_count: usize,
    pub vehicle_count: usize,
    pub route_count: usize,
    pub unserved_count: usize,
    /// Missing when the depot had no orders or no vehicles
    pub statistics: Option<SearchStatistics>,
}

#[derive(Serialize, Deserialize, JsonSchema, Debug, Clone, PartialEq, Default)]
pub struct MultiDepotPlan {
    /// Routes of every depot, in depot order, each tagged with its depot id
    pub routes: Vec<Route>,
    pub unserved_order_ids: Vec<String>,
    pub depot_summaries: Vec<DepotSummary>,
}

impl MultiDepotPlan {
    pub fn apply(
        &self,
        orders: &mut [Order],
        vehicles: &mut [Vehicle],
    ) -> Result<(), PlanApplicationError> {
        apply_routes(&self.routes, orders, vehicles)
    }

    pub fn routes_of_depot<'a>(&'a self, depot_id: &'a str) -> impl Iterator<Item = &'a Route> {
        self.routes
            .iter()
            .filter(move |route| route.depot_id.as_deref() == Some(depot_id))
    }

    pub fn total_distance_m(&self) -> u64 {
        self.routes.iter().map(|route| route.total_distance_m).sum()
    }
}

/// Orders and vehicles attached to one depot.
#[derive(Default)]
struct DepotPartition {
    vehicles: Vec<Vehicle>,
    orders: Vec<Order>,
}

/// Splits orders and vehicles between depots that do not share a fleet and
/// solves every depot on its own.
pub struct MultiDepotCoordinator {
    params: MultiDepotParams,
}

impl MultiDepotCoordinator {
    pub fn new(params: MultiDepotParams) -> Self {
        MultiDepotCoordinator { params }
    }

    #[instrument(skip_all, level = "info", fields(depots = depots.len(), vehicles = vehicles.len(), orders = orders.len()))]
    pub fn solve(
        &self,
        depots: &[Depot],
        vehicles: &[Vehicle],
        orders: &[Order],
    ) -> Result<MultiDepotPlan, OptimizerError> {
        let solver_params = self.params.depot_solver_params();
        solver_params.validate()?;
        validate_depots(depots)?;
        validate_vehicles_and_orders(vehicles, orders)?;

        if depots.is_empty() {
            info!("no depot to dispatch from");
            return Ok(MultiDepotPlan {
                unserved_order_ids: orders.iter().map(|order| order.id().to_owned()).collect(),
                ..MultiDepotPlan::default()
            });
        }

        let partitions = partition(depots, vehicles, orders)?;
        let solver = Solver::new(solver_params);

        let plans = depots
            .par_iter()
            .zip(partitions.par_iter())
            .map(|(depot, partition)| {
                if partition.orders.is_empty() || partition.vehicles.is_empty() {
                    info!(
                        depot = depot.id(),
                        orders = partition.orders.len(),
                        vehicles = partition.vehicles.len(),
                        "depot skipped"
                    );
                    return Ok(None);
                }

                solver
                    .solve(depot.location(), &partition.vehicles, &partition.orders)
                    .map(Some)
            })
            .collect::<Result<Vec<_>, OptimizerError>>()?;

        let mut result = MultiDepotPlan::default();
        for ((depot, partition), plan) in depots.iter().zip(partitions).zip(plans) {
            let mut summary = DepotSummary {
                depot_id: depot.id().to_owned(),
                order_count: partition.orders.len(),
                vehicle_count: partition.vehicles.len(),
                route_count: 0,
                unserved_count: 0,
                statistics: None,
            };

            match plan {
                Some(RoutePlan {
                    routes,
                    unserved_order_ids,
                    statistics,
                }) => {
                    summary.route_count = routes.len();
                    summary.unserved_count = unserved_order_ids.len();
                    summary.statistics = Some(statistics);

                    result
                        .routes
                        .extend(routes.into_iter().map(|route| Route {
                            depot_id: Some(depot.id().to_owned()),
                            ..route
                        }));
                    result.unserved_order_ids.extend(unserved_order_ids);
                }
                None => {
                    summary.unserved_count = partition.orders.len();
                    result
                        .unserved_order_ids
                        .extend(partition.orders.iter().map(|order| order.id().to_owned()));
                }
            }

            result.depot_summaries.push(summary);
        }

        info!(
            routes = result.routes.len(),
            unserved = result.unserved_order_ids.len(),
            "multi depot solve finished"
        );

        Ok(result)
    }
}

/// Index of the depot closest to `location`, the first one on ties.
pub fn nearest_depot(depots: &[Depot], location: &Coordinate) -> Option<usize> {
    depots
        .iter()
        .enumerate()
        .min_by_key(|(_, depot)| depot.location().haversine_distance(location))
        .map(|(index, _)| index)
}

/// Solves every depot with default parameters.
pub fn solve_multi_depot(
    depots: &[Depot],
    vehicles: &[Vehicle],
    orders: &[Order],
) -> Result<MultiDepotPlan, OptimizerError> {
    MultiDepotCoordinator::new(MultiDepotParams::default()).solve(depots, vehicles, orders)
}

/// Same as [`solve_multi_depot`] with a custom budget per depot.
pub fn solve_multi_depot_with_budget(
    depots: &[Depot],
    vehicles: &[Vehicle],
    orders: &[Order],
    per_depot_budget: SignedDuration,
) -> Result<MultiDepotPlan, OptimizerError> {
    MultiDepotCoordinator::new(MultiDepotParams::with_per_depot_budget(per_depot_budget))
        .solve(depots, vehicles, orders)
}

fn validate_depots(depots: &[Depot]) -> Result<(), OptimizerError> {
    let mut ids = FxHashSet::default();
    for depot in depots {
        depot.validate()?;
        if !ids.insert(depot.id()) {
            return Err(OptimizerError::DuplicateDepotId(depot.id().to_owned()));
        }
    }

    Ok(())
}

fn partition(
    depots: &[Depot],
    vehicles: &[Vehicle],
    orders: &[Order],
) -> Result<Vec<DepotPartition>, OptimizerError> {
    let depot_positions = depots
        .iter()
        .enumerate()
        .map(|(index, depot)| (depot.id(), index))
        .collect::<FxHashMap<_, _>>();

    let mut partitions = depots
        .iter()
        .map(|_| DepotPartition::default())
        .collect::<Vec<_>>();

    for vehicle in vehicles {
        let index = match vehicle.home_depot() {
            Some(depot_id) => *depot_positions.get(depot_id).ok_or_else(|| {
                OptimizerError::UnknownDepot {
                    vehicle_id: vehicle.id().to_owned(),
                    depot_id: depot_id.to_owned(),
                }
            })?,
            None => {
                info!(
                    vehicle = vehicle.id(),
                    depot = depots[0].id(),
                    "vehicle without home depot assigned to the first depot"
                );
                0
            }
        };

        partitions[index].vehicles.push(vehicle.clone());
    }

    for order in orders {
        let index = nearest_depot(depots, &order.location()).unwrap_or(0);
        partitions[index].orders.push(order.clone());
    }

    Ok(partitions)
}

pub mod error;
pub mod json;
pub mod multi_depot;
pub mod packing;
pub mod plan;
pub mod problem;
pub mod scenario;
pub mod solver;
pub mod tracking;
mod utils;

#[cfg(test)]
pub(crate) mod test_utils;

pub use error::OptimizerError;
pub use multi_depot::coordinator::{
    MultiDepotCoordinator, MultiDepotPlan, solve_multi_depot, solve_multi_depot_with_budget,
};
pub use packing::packer::{PackingResult, pack_loads};
pub use plan::route_plan::{Route, RoutePlan, RouteStop};
pub use solver::solver::{Solver, solve_single_depot};

pub mod construction;
pub mod insertion;
pub mod ls;
pub mod solution;
#[allow(clippy::module_inception)]
pub mod solver;
pub mod solver_params;
pub mod statistics;

use jiff::SignedDuration;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::solver::solver_params::SolverParams;

#[derive(Clone, Debug, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct MultiDepotParams {
    /// Budget of every depot solve, replaces `solver.time_budget`.
    pub per_depot_budget: SignedDuration,
    pub solver: SolverParams,
}

impl Default for MultiDepotParams {
    fn default() -> Self {
        MultiDepotParams {
            per_depot_budget: SignedDuration::from_secs(10),
            solver: SolverParams::default(),
        }
    }
}

impl MultiDepotParams {
    pub fn with_per_depot_budget(per_depot_budget: SignedDuration) -> Self {
        MultiDepotParams {
            per_depot_budget,
            ..MultiDepotParams::default()
        }
    }

    pub fn depot_solver_params(&self) -> SolverParams {
        SolverParams {
            time_budget: self.per_depot_budget,
            ..self.solver.clone()
        }
    }
}

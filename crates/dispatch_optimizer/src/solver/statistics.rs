use std::collections::BTreeMap;

use jiff::SignedDuration;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Diagnostics of one solve. Not part of the plan itself, the caller may log
/// or display them.
#[derive(Serialize, Deserialize, JsonSchema, Debug, Clone, Default, PartialEq)]
pub struct SearchStatistics {
    pub construction_cost: f64,
    pub final_cost: f64,
    pub local_search_iterations: usize,
    /// Number of applied moves per operator name
    pub applied_moves: BTreeMap<String, usize>,
    pub construction_duration: SignedDuration,
    pub local_search_duration: SignedDuration,
    /// False when the budget ran out before a local optimum was reached
    pub converged: bool,
    pub traffic_multiplier: f64,
    pub routed_orders: usize,
    pub unserved_orders: usize,
}

impl SearchStatistics {
    pub fn total_duration(&self) -> SignedDuration {
        self.construction_duration + self.local_search_duration
    }

    pub fn improvement(&self) -> f64 {
        self.construction_cost - self.final_cost
    }

    pub fn record_move(&mut self, operator_name: &str) {
        *self
            .applied_moves
            .entry(operator_name.to_owned())
            .or_default() += 1;
    }
}

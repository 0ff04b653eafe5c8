use jiff::SignedDuration;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::{
    error::OptimizerError,
    problem::{
        kmh::Kmh,
        time_window::TimeWindow,
        traffic::{LAST_HOUR, TrafficProfile},
    },
};

/// How to choose between insertions of equal cost during construction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum TieBreak {
    /// Prefer the insertion leaving the smallest load variance across the
    /// fleet, so small vehicles are not starved.
    #[default]
    LoadVariance,
    /// Keep the first candidate found (lowest order, route, position).
    FirstFound,
}

#[derive(Clone, Debug, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct SolverParams {
    /// Wall-clock budget for the whole solve, checked between local search
    /// iterations.
    pub time_budget: SignedDuration,

    /// Vehicles leave the depot at opening and must be back by closing.
    pub depot_hours: TimeWindow,

    pub speed: Kmh,
    pub traffic: TrafficProfile,

    /// Hour used to pick the traffic multiplier, the current local hour when
    /// unset.
    pub dispatch_hour: Option<u8>,

    pub tie_break: TieBreak,
    pub max_iterations: Option<usize>,
    pub enable_local_search: bool,
}

impl Default for SolverParams {
    fn default() -> Self {
        Self {
            time_budget: SignedDuration::from_secs(5),
            depot_hours: TimeWindow::from_hours(8, 20).unwrap_or_default(),
            speed: Kmh::default(),
            traffic: TrafficProfile::default(),
            dispatch_hour: None,
            tie_break: TieBreak::default(),
            max_iterations: None,
            enable_local_search: true,
        }
    }
}

impl SolverParams {
    pub fn with_time_budget(time_budget: SignedDuration) -> Self {
        SolverParams {
            time_budget,
            ..SolverParams::default()
        }
    }

    pub fn traffic_multiplier(&self) -> f64 {
        match self.dispatch_hour {
            Some(hour) => self.traffic.multiplier_at(hour),
            None => self.traffic.current_multiplier(),
        }
    }

    pub fn validate(&self) -> Result<(), OptimizerError> {
        if !self.time_budget.is_positive() {
            return Err(OptimizerError::InvalidTimeBudget(self.time_budget));
        }

        self.depot_hours.validate(|| "depot hours".to_owned())?;

        if !self.speed.is_valid() {
            return Err(OptimizerError::InvalidDimensions {
                owner: format!("speed {} km/h", self.speed.value()),
            });
        }

        self.traffic.validate()?;

        if let Some(hour) = self.dispatch_hour
            && hour > LAST_HOUR
        {
            return Err(OptimizerError::InvalidDispatchHour(hour));
        }

        Ok(())
    }
}

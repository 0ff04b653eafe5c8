use crate::{
    problem::routing_problem::RoutingProblem,
    solver::{
        ls::{
            inter_relocate::InterRelocateOperator, inter_swap::InterSwapOperator,
            relocate::RelocateOperator, two_opt::TwoOptOperator,
        },
        solution::{route_id::RouteIdx, working_solution::WorkingSolution},
    },
};

pub trait LocalSearchOperator: Sized {
    /// Calls `consumer` with every move of this kind between the two routes.
    /// Intra-route operators only produce moves when `r1 == r2`.
    fn generate_moves<C>(
        problem: &RoutingProblem,
        solution: &WorkingSolution,
        routes: (RouteIdx, RouteIdx),
        consumer: C,
    ) where
        C: FnMut(Self);

    fn transport_cost_delta(&self, solution: &WorkingSolution) -> f64;
    fn is_valid(&self, solution: &WorkingSolution) -> bool;
    fn apply(&self, solution: &mut WorkingSolution);
    fn updated_routes(&self) -> Vec<RouteIdx>;

    fn delta(&self, solution: &WorkingSolution) -> f64 {
        self.transport_cost_delta(solution)
    }
}

#[derive(Debug)]
pub enum LocalSearchMove {
    /// Moves one stop to another position of the same route.
    Relocate(RelocateOperator),
    /// Reverses a segment of a route.
    TwoOpt(TwoOptOperator),
    /// Moves one stop to another route.
    InterRelocate(InterRelocateOperator),
    /// Exchanges two stops of different routes.
    InterSwap(InterSwapOperator),
}

impl LocalSearchMove {
    pub fn operator_name(&self) -> &'static str {
        match self {
            LocalSearchMove::Relocate(_) => "relocate",
            LocalSearchMove::TwoOpt(_) => "two_opt",
            LocalSearchMove::InterRelocate(_) => "inter_relocate",
            LocalSearchMove::InterSwap(_) => "inter_swap",
        }
    }

    pub fn delta(&self, solution: &WorkingSolution) -> f64 {
        match self {
            LocalSearchMove::Relocate(op) => op.delta(solution),
            LocalSearchMove::TwoOpt(op) => op.delta(solution),
            LocalSearchMove::InterRelocate(op) => op.delta(solution),
            LocalSearchMove::InterSwap(op) => op.delta(solution),
        }
    }

    pub fn is_valid(&self, solution: &WorkingSolution) -> bool {
        match self {
            LocalSearchMove::Relocate(op) => op.is_valid(solution),
            LocalSearchMove::TwoOpt(op) => op.is_valid(solution),
            LocalSearchMove::InterRelocate(op) => op.is_valid(solution),
            LocalSearchMove::InterSwap(op) => op.is_valid(solution),
        }
    }

    pub fn apply(&self, solution: &mut WorkingSolution) {
        match self {
            LocalSearchMove::Relocate(op) => op.apply(solution),
            LocalSearchMove::TwoOpt(op) => op.apply(solution),
            LocalSearchMove::InterRelocate(op) => op.apply(solution),
            LocalSearchMove::InterSwap(op) => op.apply(solution),
        }
    }

    pub fn updated_routes(&self) -> Vec<RouteIdx> {
        match self {
            LocalSearchMove::Relocate(op) => op.updated_routes(),
            LocalSearchMove::TwoOpt(op) => op.updated_routes(),
            LocalSearchMove::InterRelocate(op) => op.updated_routes(),
            LocalSearchMove::InterSwap(op) => op.updated_routes(),
        }
    }
}

pub mod coordinate;
pub mod depot;
pub mod kmh;
pub mod meters;
pub mod order;
pub mod routing_problem;
pub mod time_window;
pub mod traffic;
pub mod travel_matrix;
pub mod vehicle;

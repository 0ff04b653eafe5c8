pub mod application;
pub mod route_plan;

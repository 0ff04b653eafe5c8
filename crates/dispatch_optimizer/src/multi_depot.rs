pub mod coordinator;
pub mod params;

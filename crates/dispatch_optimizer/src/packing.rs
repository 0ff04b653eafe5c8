pub mod bin;
pub mod item;
pub mod packer;
pub mod statistics;

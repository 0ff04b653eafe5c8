use thiserror::Error;

/// Malformed input rejected before any work starts. Constraint infeasibility
/// is never reported through this type; it ends up in the unserved or
/// unpacked lists of the result instead.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum OptimizerError {
    #[error("{owner}: invalid coordinate (lat={lat}, lon={lon})")]
    InvalidCoordinate { owner: String, lat: f64, lon: f64 },
    #[error("order {order_id}: weight must be positive and finite, got {weight}")]
    InvalidWeight { order_id: String, weight: f64 },
    #[error("{owner}: volume must be non-negative and finite, got {volume}")]
    InvalidVolume { owner: String, volume: f64 },
    #[error("vehicle {vehicle_id}: invalid capacity ({capacity_kg} kg, {capacity_m3} m3)")]
    InvalidCapacity {
        vehicle_id: String,
        capacity_kg: f64,
        capacity_m3: f64,
    },
    #[error("{owner}: invalid time window [{start}, {end}]")]
    InvalidTimeWindow { owner: String, start: u32, end: u32 },
    #[error("{owner}: dimensions must be positive and finite")]
    InvalidDimensions { owner: String },
    #[error("duplicate order id {0}")]
    DuplicateOrderId(String),
    #[error("duplicate vehicle id {0}")]
    DuplicateVehicleId(String),
    #[error("duplicate depot id {0}")]
    DuplicateDepotId(String),
    #[error("vehicle {vehicle_id} references unknown depot {depot_id}")]
    UnknownDepot {
        vehicle_id: String,
        depot_id: String,
    },
    #[error("traffic profile: {0}")]
    InvalidTrafficProfile(String),
    #[error("dispatch hour must be within 0..=23, got {0}")]
    InvalidDispatchHour(u8),
    #[error("time budget must be positive, got {0}")]
    InvalidTimeBudget(jiff::SignedDuration),
    #[error("bin {bin_id}: {reason}")]
    InvalidBin { bin_id: String, reason: String },
    #[error("item {item_id}: {reason}")]
    InvalidItem { item_id: String, reason: String },
}

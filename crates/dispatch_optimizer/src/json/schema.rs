use schemars::schema_for;

use crate::{
    json::types,
    multi_depot::coordinator::MultiDepotPlan,
    packing::packer::PackingResult,
    plan::route_plan::RoutePlan,
};

/// Schemas of every request and result document, keyed by file stem.
pub fn generate_json_schemas() -> Result<Vec<(&'static str, String)>, serde_json::Error> {
    Ok(vec![
        (
            "routing_request",
            serde_json::to_string_pretty(&schema_for!(types::JsonRoutingRequest))?,
        ),
        (
            "multi_depot_request",
            serde_json::to_string_pretty(&schema_for!(types::JsonMultiDepotRequest))?,
        ),
        (
            "packing_request",
            serde_json::to_string_pretty(&schema_for!(types::JsonPackingRequest))?,
        ),
        (
            "route_plan",
            serde_json::to_string_pretty(&schema_for!(RoutePlan))?,
        ),
        (
            "multi_depot_plan",
            serde_json::to_string_pretty(&schema_for!(MultiDepotPlan))?,
        ),
        (
            "packing_result",
            serde_json::to_string_pretty(&schema_for!(PackingResult))?,
        ),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_json_schemas() {
        let schemas = generate_json_schemas().unwrap();

        assert_eq!(schemas.len(), 6);
        let (name, schema) = &schemas[0];
        assert_eq!(*name, "routing_request");
        assert!(schema.contains("\"RoutingRequest\""));
    }
}

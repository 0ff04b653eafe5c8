use comfy_table::{Table, presets::UTF8_FULL};
use dispatch_optimizer::{
    multi_depot::coordinator::DepotSummary, packing::packer::BinAssignment, plan::route_plan::Route,
    solver::statistics::SearchStatistics,
};

fn clock(minute: u32) -> String {
    format!("{:02}:{:02}", minute / 60, minute % 60)
}

fn table(header: Vec<&str>) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL).set_header(header);
    table
}

pub fn routes_table(routes: &[Route]) -> Table {
    let mut table = table(vec![
        "Route", "Vehicle", "Depot", "Stops", "Distance", "Load", "Utilization", "Start", "End",
    ]);

    for route in routes {
        table.add_row(vec![
            route.route_id.clone(),
            route.vehicle_id.clone(),
            route.depot_id.clone().unwrap_or_default(),
            route.len().to_string(),
            format!("{} km", route.total_distance_km),
            format!("{}/{} kg", route.total_load_kg, route.capacity_kg),
            format!("{}%", route.utilization_pct),
            clock(route.start_minute),
            clock(route.end_minute),
        ]);
    }

    table
}

pub fn statistics_table(statistics: &SearchStatistics) -> Table {
    let mut table = table(vec!["Statistic", "Value"]);

    table
        .add_row(vec![
            "Construction cost".to_owned(),
            format!("{:.2}", statistics.construction_cost),
        ])
        .add_row(vec![
            "Final cost".to_owned(),
            format!("{:.2}", statistics.final_cost),
        ])
        .add_row(vec![
            "Local search iterations".to_owned(),
            statistics.local_search_iterations.to_string(),
        ])
        .add_row(vec!["Converged".to_owned(), statistics.converged.to_string()])
        .add_row(vec![
            "Traffic multiplier".to_owned(),
            statistics.traffic_multiplier.to_string(),
        ])
        .add_row(vec![
            "Duration".to_owned(),
            format!("{:#}", statistics.total_duration()),
        ]);

    for (operator, count) in &statistics.applied_moves {
        table.add_row(vec![format!("Moves: {operator}"), count.to_string()]);
    }

    table
}

pub fn depots_table(summaries: &[DepotSummary]) -> Table {
    let mut table = table(vec!["Depot", "Orders", "Vehicles", "Routes", "Unserved", "Cost"]);

    for summary in summaries {
        table.add_row(vec![
            summary.depot_id.clone(),
            summary.order_count.to_string(),
            summary.vehicle_count.to_string(),
            summary.route_count.to_string(),
            summary.unserved_count.to_string(),
            summary
                .statistics
                .as_ref()
                .map(|statistics| format!("{:.2}", statistics.final_cost))
                .unwrap_or_else(|| "-".to_owned()),
        ]);
    }

    table
}

pub fn bins_table(bins: &[BinAssignment]) -> Table {
    let mut table = table(vec!["Bin", "Items", "Weight", "Weight %", "Volume", "Volume %"]);

    for bin in bins {
        table.add_row(vec![
            bin.bin_id.clone(),
            bin.item_count.to_string(),
            format!("{:.1}/{} kg", bin.current_weight, bin.max_weight),
            format!("{}%", bin.weight_utilization_pct),
            format!("{:.3}/{:.3} m3", bin.current_volume, bin.volume),
            format!("{}%", bin.volume_utilization_pct),
        ]);
    }

    table
}

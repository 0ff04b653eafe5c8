use std::path::PathBuf;

use clap::Args;
use dispatch_optimizer::{MultiDepotCoordinator, json::types::JsonMultiDepotRequest};
use tracing::info;

use crate::{file_utils, parsers, progress, report};

#[derive(Args)]
pub struct MultiDepotArgs {
    /// A request file, or a folder of request files
    #[arg(short = 'i', long)]
    input: PathBuf,

    /// Overrides the time budget of each depot
    #[arg(short, long, value_parser = parsers::parse_duration)]
    timeout: Option<jiff::SignedDuration>,

    /// Output file, or folder when the input is a folder
    #[arg(long, short = 'o')]
    out: Option<PathBuf>,
}

pub fn run(args: MultiDepotArgs) -> anyhow::Result<()> {
    let files = file_utils::input_files(&args.input)?;
    let several = files.len() > 1;

    for file in &files {
        let request: JsonMultiDepotRequest = file_utils::read_json(file)?;

        let mut params = request.params();
        if let Some(timeout) = args.timeout {
            params.per_depot_budget = timeout;
        }
        let budget = params.per_depot_budget;

        let depots = request.depots();
        let vehicles = request.vehicles();
        let orders = request.orders();
        let coordinator = MultiDepotCoordinator::new(params);

        info!(file = %file.display(), depots = depots.len(), "optimizing");
        // Depots are solved in parallel, the wall clock is about one budget
        let plan = progress::with_budget_bar(budget, || {
            coordinator.solve(&depots, &vehicles, &orders)
        })??;

        println!("{}", report::depots_table(&plan.depot_summaries));
        println!("{}", report::routes_table(&plan.routes));
        if !plan.unserved_order_ids.is_empty() {
            println!("Unserved: {}", plan.unserved_order_ids.join(", "));
        }

        if let Some(out) = &args.out {
            file_utils::write_json(&file_utils::output_path(out, file, several, "plan"), &plan)?;
        }
    }

    Ok(())
}

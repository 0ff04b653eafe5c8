use std::path::PathBuf;

use clap::Args;
use dispatch_optimizer::{json::types::JsonRoutingRequest, solver::solver::Solver};
use tracing::info;

use crate::{file_utils, parsers, progress, report};

#[derive(Args)]
pub struct OptimizeArgs {
    /// A request file, or a folder of request files
    #[arg(short = 'i', long)]
    input: PathBuf,

    /// Overrides the time budget of the request
    #[arg(short, long, value_parser = parsers::parse_duration)]
    timeout: Option<jiff::SignedDuration>,

    #[arg(long, short = 'n')]
    iterations: Option<usize>,

    /// Output file, or folder when the input is a folder
    #[arg(long, short = 'o')]
    out: Option<PathBuf>,
}

pub fn run(args: OptimizeArgs) -> anyhow::Result<()> {
    let files = file_utils::input_files(&args.input)?;
    let several = files.len() > 1;

    for file in &files {
        let request: JsonRoutingRequest = file_utils::read_json(file)?;

        let mut params = request.params();
        if let Some(timeout) = args.timeout {
            params.time_budget = timeout;
        }
        if args.iterations.is_some() {
            params.max_iterations = args.iterations;
        }

        let vehicles = request.vehicles();
        let orders = request.orders();
        let solver = Solver::new(params);

        info!(file = %file.display(), "optimizing");
        let plan = progress::with_budget_bar(solver.params().time_budget, || {
            solver.solve(request.depot, &vehicles, &orders)
        })??;

        println!("{}", report::routes_table(&plan.routes));
        println!("{}", report::statistics_table(&plan.statistics));
        if !plan.unserved_order_ids.is_empty() {
            println!("Unserved: {}", plan.unserved_order_ids.join(", "));
        }

        if let Some(out) = &args.out {
            file_utils::write_json(&file_utils::output_path(out, file, several, "plan"), &plan)?;
        }
    }

    Ok(())
}

use std::path::PathBuf;

use clap::Args;
use dispatch_optimizer::{json::types::JsonPackingRequest, pack_loads};

use crate::{file_utils, report};

#[derive(Args)]
pub struct PackArgs {
    /// A request file, or a folder of request files
    #[arg(short = 'i', long)]
    input: PathBuf,

    /// Output file, or folder when the input is a folder
    #[arg(long, short = 'o')]
    out: Option<PathBuf>,
}

pub fn run(args: PackArgs) -> anyhow::Result<()> {
    let files = file_utils::input_files(&args.input)?;
    let several = files.len() > 1;

    for file in &files {
        let request: JsonPackingRequest = file_utils::read_json(file)?;
        let (bins, items) = request.specs();
        let result = pack_loads(&bins, &items)?;

        println!("{}", report::bins_table(&result.bin_results));
        println!(
            "Packed {}/{} items ({}%)",
            result.statistics.packed_items,
            result.statistics.total_items,
            result.statistics.packing_efficiency_pct
        );
        if !result.unpacked_item_ids.is_empty() {
            println!("Unpacked: {}", result.unpacked_item_ids.join(", "));
        }

        if let Some(out) = &args.out {
            file_utils::write_json(
                &file_utils::output_path(out, file, several, "packing"),
                &result,
            )?;
        }
    }

    Ok(())
}

use std::path::PathBuf;

use clap::{Subcommand, ValueEnum};
use dispatch_optimizer::scenario;

use crate::file_utils;

#[derive(Clone, Copy, ValueEnum)]
pub enum ScenarioKind {
    Single,
    MultiDepot,
    Packing,
}

#[derive(Subcommand)]
pub enum GenerateSubcommands {
    JsonSchema {
        /// Output folder, one .schema.json file per document
        #[arg(long, short = 'o')]
        out: PathBuf,
    },
    /// Writes a random request around the sample depots
    Scenario {
        kind: ScenarioKind,

        #[arg(long, default_value_t = 42)]
        seed: u64,

        /// Orders, per depot for multi-depot scenarios, or packages
        #[arg(long, short = 'n', default_value_t = 20)]
        size: usize,

        /// Vehicles, per depot for multi-depot scenarios
        #[arg(long, default_value_t = 3)]
        vehicles: usize,

        #[arg(long, short = 'o')]
        out: PathBuf,
    },
}

pub fn run(subcommand: GenerateSubcommands) -> Result<(), anyhow::Error> {
    match subcommand {
        GenerateSubcommands::JsonSchema { out } => {
            std::fs::create_dir_all(&out)?;

            for (name, schema) in dispatch_optimizer::json::schema::generate_json_schemas()? {
                std::fs::write(out.join(format!("{name}.schema.json")), schema)?;
            }
        }
        GenerateSubcommands::Scenario {
            kind,
            seed,
            size,
            vehicles,
            out,
        } => match kind {
            ScenarioKind::Single => {
                file_utils::write_json(&out, &scenario::single_depot(seed, size, vehicles))?
            }
            ScenarioKind::MultiDepot => {
                file_utils::write_json(&out, &scenario::multi_depot(seed, size, vehicles))?
            }
            ScenarioKind::Packing => file_utils::write_json(&out, &scenario::packing(seed, size))?,
        },
    }

    Ok(())
}

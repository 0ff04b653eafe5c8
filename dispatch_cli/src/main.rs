use clap::{Parser, Subcommand};
use mimalloc::MiMalloc;

use crate::{
    generate::GenerateSubcommands, multi_depot::MultiDepotArgs, optimize::OptimizeArgs,
    pack::PackArgs,
};

mod file_utils;
mod generate;
mod multi_depot;
mod optimize;
mod pack;
mod parsers;
mod progress;
mod report;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    #[arg(short, long)]
    debug: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Route the orders of a single depot
    Optimize {
        #[command(flatten)]
        args: OptimizeArgs,
    },
    /// Route orders over several depots, each with its own fleet
    MultiDepot {
        #[command(flatten)]
        args: MultiDepotArgs,
    },
    /// Assign packages to vehicle cargo boxes
    Pack {
        #[command(flatten)]
        args: PackArgs,
    },
    #[command(visible_alias = "g")]
    Generate {
        #[command(subcommand)]
        commands: GenerateSubcommands,
    },
}

fn main() -> Result<(), anyhow::Error> {
    let cli = Cli::parse();
    tracing_subscriber::fmt()
        .with_max_level(if cli.debug {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        })
        .init();

    match cli.command {
        Some(Commands::Optimize { args }) => optimize::run(args)?,
        Some(Commands::MultiDepot { args }) => multi_depot::run(args)?,
        Some(Commands::Pack { args }) => pack::run(args)?,
        Some(Commands::Generate { commands }) => generate::run(commands)?,
        None => {}
    }

    Ok(())
}

//! Relquery CLI - build, preview and query relations over a table catalog

use anyhow::Result;
use clap::Parser;

mod cli;
mod commands;
mod context;

use cli::Cli;
use commands::{count, preview, records, sql};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match &cli.command {
        cli::Commands::Sql(args) => sql::execute(args, &cli.global).await,
        cli::Commands::Preview(args) => preview::execute(args, &cli.global).await,
        cli::Commands::Records(args) => records::execute(args, &cli.global).await,
        cli::Commands::Count(args) => count::execute(args, &cli.global).await,
    }
}

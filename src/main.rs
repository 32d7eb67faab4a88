//! # impact-insights CLI

use clap::Parser;

use crate::cli::Commands;

mod cli;

#[derive(Parser)]
#[command(version = env!("CARGO_PKG_VERSION"))]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[arg(
        global = true,
        short = 'a',
        long = "api",
        help = "Base URL of the company directory backend, e.g. http://127.0.0.1:5001"
    )]
    api_base: Option<String>,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    impact_insights::init(cli.api_base).await;

    match &cli.command {
        Commands::Config(cmd) => {
            cmd.exec().await;
        }
        Commands::Gui(cmd) => {
            cmd.exec().await;
        }
        Commands::Search(cmd) => {
            cmd.exec().await;
        }
        Commands::Show(cmd) => {
            cmd.exec().await;
        }
        Commands::Suggest(cmd) => {
            cmd.exec().await;
        }
    }
}

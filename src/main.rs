//! sigstats CLI entry point.

use clap::Parser;

use sigstats::cli::{Cli, Commands};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Run(args) => sigstats::cli::commands::run::execute(args, cli.json).await,
        Commands::Sigs(args) => sigstats::cli::commands::sigs::execute(args, cli.json).await,
    };

    if let Err(err) = result {
        sigstats::cli::handle_error(err, cli.json);
    }
}

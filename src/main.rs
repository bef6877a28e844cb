use clap::Parser;
use flavor_factory::{cli::Cli, load_command_config, run_command};
use std::process;

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run() -> flavor_factory::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    cli.init_logging();

    // Load configuration
    let config = load_command_config(cli.config.as_deref(), &cli.command)?;

    run_command(cli.command, &config)
}

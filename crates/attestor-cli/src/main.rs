//! Attestor CLI - operate the identity/claims registry from the terminal.

use attestor_cli::commands;
use attestor_cli::{Cli, Command, Config, Formatter};
use clap::Parser;

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let config = Config::load(cli.config.as_deref())?;
    let formatter = Formatter::new(!cli.no_color);

    match cli.command {
        Command::Register(args) => commands::execute_register(args, &config, &formatter)?,
        Command::AddClaim(args) => commands::execute_add_claim(args, &config, &formatter)?,
        Command::Info(args) => commands::execute_info(args, &config, &formatter)?,
        Command::Verify(args) => commands::execute_verify(args, &config, &formatter)?,
        Command::Expiring(args) => commands::execute_expiring(args, &config)?,
        Command::Sweep(args) => commands::execute_sweep(args, &config, &formatter).await?,
        Command::Config => commands::execute_config(&config)?,
    }

    Ok(())
}

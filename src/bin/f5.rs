//! F5 CLI Binary

use anyhow::Context;
use clap::Parser;
use f5cli::logging::init_logging;
use f5cli::tooling::cli::{Cli, CliContext};
use std::process;

fn main() {
    let cli = Cli::parse();

    if let Err(e) = init_logging(Some(&cli.logging_config())) {
        eprintln!("Warning: logging disabled: {}", e);
    }

    match run(&cli) {
        Ok(output) => println!("{}", output),
        Err(e) => {
            eprintln!("Error: {:#}", e);
            process::exit(1);
        }
    }
}

fn run(cli: &Cli) -> anyhow::Result<String> {
    let context = CliContext::new(cli.home.clone()).context("Failed to load CLI configuration")?;
    let output = context.execute(&cli.command)?;
    Ok(output)
}

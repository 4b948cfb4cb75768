//! Tracechain CLI Binary

use anyhow::Context;
use clap::Parser;
use tracechain::logging::init_logging;
use tracechain::tooling::cli::{Cli, CliContext};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut context = CliContext::new(&cli.workspace, cli.config.as_deref())
        .context("Failed to load configuration")?;

    let logging = &mut context.config_mut().logging;
    if let Some(level) = &cli.log_level {
        logging.level = level.clone();
    }
    if let Some(format) = &cli.log_format {
        logging.format = format.clone();
    }
    if let Some(output) = &cli.log_output {
        logging.output = output.clone();
    }
    if let Some(file) = &cli.log_file {
        logging.file = Some(file.clone());
    }
    init_logging(Some(&context.config().logging)).context("Failed to initialize logging")?;

    let output = context.execute(&cli.command)?;
    println!("{}", output);
    Ok(())
}

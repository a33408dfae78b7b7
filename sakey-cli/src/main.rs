use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, builder::styling};
use colored::*;
use sakey_core::env::{ProcessEnv, load_dotenv};
use sakey_core::logging::ConsoleStageReporter;
use sakey_core::stage;
use tracing::debug;
use tracing_subscriber::EnvFilter;

const STYLES: styling::Styles = styling::Styles::styled()
    .header(styling::AnsiColor::Green.on_default().bold())
    .usage(styling::AnsiColor::Green.on_default().bold())
    .literal(styling::AnsiColor::Cyan.on_default().bold())
    .placeholder(styling::AnsiColor::Cyan.on_default());

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "sakey: stage a Google service account file from the environment",
    long_about = "Reads the GOOGLE_* service account variables (after loading ./.env if present) \
                  and writes them to ./serviceAccountFromEnv.json.",
    styles = STYLES
)]
struct Args {}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run() -> Result<()> {
    let working_directory = std::env::current_dir().context("could not resolve working directory")?;
    debug!(dir = %working_directory.display(), "staging service account");

    load_dotenv(&working_directory)?;
    stage(&ProcessEnv, &working_directory, &ConsoleStageReporter)?;
    Ok(())
}

fn main() -> ExitCode {
    let _args = Args::parse();
    init_tracing();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {:#}", "error:".red().bold(), e);
            ExitCode::FAILURE
        }
    }
}

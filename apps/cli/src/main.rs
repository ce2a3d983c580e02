//! # ShoeCart CLI Entry Point
//!
//! ## Startup Sequence
//! 1. Parse arguments
//! 2. Initialize tracing (logs go to stderr; stdout carries only JSON)
//! 3. Load configuration
//! 4. Open the database and the cart store
//! 5. Run the command and print the cart

use std::process::ExitCode;

use clap::Parser;
use shoecart_cli::{init_tracing, run, Cli};

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    run(cli).await
}

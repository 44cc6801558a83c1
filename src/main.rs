//! urlmini - A small URL shortener service
//!
//! Parses the command line, loads configuration, sets up logging and runs
//! the HTTP server until Ctrl+C.

use clap::Parser;

use urlmini::cli::Cli;
use urlmini::config::{StaticConfig, init_config};
use urlmini::runtime::modes::run_server;
use urlmini::system::logging::init_logging;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    if let Some(path) = cli.generate_config.as_deref() {
        StaticConfig::default().save_to_file(path)?;
        println!("Sample configuration written to {}", path);
        return Ok(());
    }

    let config = init_config(cli.config.as_deref());

    // Guard must live until exit so buffered log lines are flushed
    let _log_guard = init_logging(&config.logging)?;

    run_server(&config).await
}

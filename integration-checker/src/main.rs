//! Integration checker entry point

use clap::Parser;
use integration_checker::checker::REMEDIATION_HINT;
use integration_checker::cli::Cli;
use integration_checker::report::{Console, LogLevel};
use integration_checker::{logging, CheckError, CheckerConfig, IntegrationChecker};
use std::io::Write;
use std::process::ExitCode;
use tracing_appender::non_blocking::WorkerGuard;

#[tokio::main]
async fn main() -> ExitCode {
    // 既存の環境変数が優先される
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    let config = cli.apply(CheckerConfig::from_env());
    let mut console = Console::stdout();

    let _guard = match start(&config, &mut console) {
        Ok(guard) => guard,
        Err(e) => return abort(&e),
    };

    match run(config, &mut console).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => abort(&e),
    }
}

/// Print the banner, then prepare the log directory and logging.
///
/// A log directory that cannot be created only disables file logging.
fn start<W: Write>(
    config: &CheckerConfig,
    console: &mut Console<W>,
) -> Result<Option<WorkerGuard>, CheckError> {
    console.banner()?;

    let log_dir = match logging::ensure_log_dir(&config.log_dir) {
        Ok(()) => Some(config.log_dir.as_path()),
        Err(e) => {
            console.log(
                LogLevel::Error,
                &format!("Failed to create logs directory: {}", e),
            )?;
            None
        }
    };
    match logging::init(log_dir) {
        Ok(guard) => Ok(guard),
        Err(e) => {
            eprintln!("Failed to initialize logging: {}", e);
            Ok(None)
        }
    }
}

async fn run<W: Write>(config: CheckerConfig, console: &mut Console<W>) -> Result<(), CheckError> {
    let checker = IntegrationChecker::new(config)?;
    checker.run_checks(console).await?;
    Ok(())
}

fn abort(e: &CheckError) -> ExitCode {
    tracing::error!(error = %e, "Integration checks aborted");
    eprintln!("\n❌ Error during integration tests: {}", e);
    eprintln!("{}", REMEDIATION_HINT);
    ExitCode::FAILURE
}

use std::io;
use std::process::ExitCode;

use clap::Parser;
use tracing::error;

use prtg_rabbitmq::telemetry::init_tracing;
use prtg_rabbitmq::{Args, EXIT_SYSTEM_ERROR, USAGE};

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    init_tracing();

    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) => return usage(e.kind().as_str().unwrap_or("Invalid arguments")),
    };

    match prtg_rabbitmq::run(&args).await {
        Ok(report) => {
            if let Err(e) = report.write_document(io::stdout().lock()) {
                error!(error = %e, "Failed to write result");
                return ExitCode::from(EXIT_SYSTEM_ERROR);
            }
            ExitCode::from(report.exit_code())
        }
        Err(e) => usage(&e.to_string()),
    }
}

/// Print usage to stdout, where PRTG shows it, and fail.
fn usage(message: &str) -> ExitCode {
    println!("{}", message);
    println!("{}", USAGE);
    ExitCode::from(EXIT_SYSTEM_ERROR)
}

use clap::Parser;

mod cli;
mod commands;
mod domain;
mod services;

use crate::cli::Cli;
use crate::services::client::{ApiClient, TransportError};
use crate::services::controller::{AnalysisController, ControllerError};
use crate::services::validate::ValidationError;

fn main() {
    let cli = Cli::parse();
    if let Err(err) = run(&cli) {
        report_failure(&cli, &err);
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    let client = ApiClient::new(&cli.api_base)?;
    let mut controller = AnalysisController::new(client);
    commands::handle_analyze_commands(cli, &mut controller)
}

fn report_failure(cli: &Cli, err: &anyhow::Error) {
    if cli.json {
        let payload = serde_json::json!({
            "ok": false,
            "error": {
                "code": error_code(err),
                "message": err.to_string()
            }
        });
        println!("{payload:#}");
    } else {
        eprintln!("error: {err}");
    }
}

fn error_code(err: &anyhow::Error) -> &'static str {
    if let Some(v) = err.downcast_ref::<ValidationError>() {
        return match v {
            ValidationError::MissingInput => "MISSING_INPUT",
            ValidationError::OutOfRange(..) => "OUT_OF_RANGE",
            ValidationError::TooLarge(_) => "TOO_LARGE",
            ValidationError::UnsupportedType(_) => "UNSUPPORTED_TYPE",
            ValidationError::ReadError(_) => "READ_ERROR",
        };
    }
    if let Some(t) = err.downcast_ref::<TransportError>() {
        return match t {
            TransportError::Status(_) => "HTTP_STATUS",
            TransportError::Network(_) => "NETWORK",
        };
    }
    if let Some(c) = err.downcast_ref::<ControllerError>() {
        return match c {
            ControllerError::Busy => "BUSY",
            ControllerError::NoImageSelected => "NO_IMAGE",
        };
    }
    "INTERNAL"
}

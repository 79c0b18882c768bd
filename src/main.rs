//! `fuzzy-decision` - run an analysis request from a file or stdin.
//!
//! ```text
//! fuzzy-decision <fuzzy-ahp|fuzzy-topsis|assess-consistency> [request-file]
//! ```
//!
//! The result (or a structured `InvalidInputError`) is printed as JSON on
//! stdout. Logs go to stderr.

use std::io;
use std::path::Path;
use std::process::ExitCode;

use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use fuzzy_decision::adapters::{read_request, read_request_file, RequestFormat};
use fuzzy_decision::application::{AnalysisError, AnalysisOperation, AnalysisService};
use fuzzy_decision::config::{AppConfig, ConfigError, LoggingConfig};
use fuzzy_decision::domain::foundation::ErrorResponse;

const USAGE: &str =
    "usage: fuzzy-decision <fuzzy-ahp|fuzzy-topsis|assess-consistency> [request-file|-]";

/// Exit code when the request itself was rejected.
const EXIT_INVALID_INPUT: u8 = 2;

fn main() -> ExitCode {
    let config = match load_config() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", e);
            return ExitCode::FAILURE;
        }
    };
    init_tracing(&config.logging);

    let args: Vec<String> = std::env::args().skip(1).collect();
    let Some(operation) = args.first() else {
        eprintln!("{}", USAGE);
        return ExitCode::FAILURE;
    };
    let operation = match operation.parse::<AnalysisOperation>() {
        Ok(op) => op,
        Err(e) => {
            eprintln!("{}\n{}", e, USAGE);
            return ExitCode::FAILURE;
        }
    };

    let request = match args.get(1).map(String::as_str) {
        None | Some("-") => read_request(io::stdin().lock(), RequestFormat::Json),
        Some(path) => read_request_file(Path::new(path)),
    };
    let payload = match request {
        Ok(payload) => payload,
        Err(e) => {
            error!(error = %e, "Could not read request");
            return ExitCode::FAILURE;
        }
    };

    let service = AnalysisService::new(config.analysis);
    match service.execute(operation, &payload) {
        Ok(result) => print_json(&result, ExitCode::SUCCESS),
        Err(AnalysisError::InvalidInput(e)) => {
            info!(operation = %operation, error = %e, "Request rejected");
            print_json(&ErrorResponse::from(&e), ExitCode::from(EXIT_INVALID_INPUT))
        }
        Err(e) => {
            error!(operation = %operation, error = %e, "Analysis failed");
            ExitCode::FAILURE
        }
    }
}

fn load_config() -> Result<AppConfig, ConfigError> {
    let config = AppConfig::load()?;
    config.validate()?;
    Ok(config)
}

fn init_tracing(logging: &LoggingConfig) {
    let filter = EnvFilter::try_new(&logging.level).unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr);

    if logging.is_json() {
        builder.json().init();
    } else {
        builder.init();
    }
}

/// Prints `value` on stdout, returning `code` on success.
fn print_json<T: serde::Serialize>(value: &T, code: ExitCode) -> ExitCode {
    match serde_json::to_string_pretty(value) {
        Ok(text) => {
            println!("{}", text);
            code
        }
        Err(e) => {
            error!(error = %e, "Failed to serialize output");
            ExitCode::FAILURE
        }
    }
}

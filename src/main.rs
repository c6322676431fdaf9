use std::io::Read;
use std::process::ExitCode;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use sunhwa_rs::checker::Checker;
use sunhwa_rs::config::Config;
use sunhwa_rs::error::CheckError;

#[tokio::main]
async fn main() -> ExitCode {
    // Initialize logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let text = match read_input() {
        Ok(text) => text,
        Err(e) => {
            eprintln!("error: {}", e);
            return ExitCode::from(2);
        }
    };

    let config = Config::load_from_default();
    let checker = match Checker::from_config(config) {
        Ok(checker) => checker,
        Err(e) => {
            eprintln!("error: {:#}", e);
            return ExitCode::FAILURE;
        }
    };

    match checker.check(&text).await {
        Ok(result) => match serde_json::to_string_pretty(&result) {
            Ok(json) => {
                println!("{}", json);
                ExitCode::SUCCESS
            }
            Err(e) => {
                eprintln!("error: {}", e);
                ExitCode::FAILURE
            }
        },
        Err(e @ CheckError::InvalidInput) => {
            eprintln!("error: {} ({})", e, e.code());
            ExitCode::from(2)
        }
        Err(e) => {
            tracing::error!(error = ?e, "check failed");
            eprintln!("error: {} ({})", e, e.code());
            ExitCode::FAILURE
        }
    }
}

/// Text comes from the first argument, or stdin when no argument is given
fn read_input() -> anyhow::Result<String> {
    let mut args = std::env::args().skip(1);
    if let Some(text) = args.next() {
        return Ok(text);
    }

    let mut buf = String::new();
    std::io::stdin().read_to_string(&mut buf)?;
    Ok(buf.trim_end_matches('\n').to_string())
}

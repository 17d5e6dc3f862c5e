use std::fs;
use std::io::Read;
use std::process::ExitCode;

use tracing::{info, Level};

use replay_judge::anticheat::SubmissionValidator;
use replay_judge::config::{ArenaConfig, ValidatorConfig};
use replay_judge::protocol::Submission;

fn main() -> anyhow::Result<ExitCode> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_max_level(Level::INFO)
        .with_target(false)
        .init();

    info!("Replay Judge v{}", env!("CARGO_PKG_VERSION"));

    let arena = ArenaConfig::builtin()?;
    let limits = ValidatorConfig::load_or_default();
    if let Err(e) = limits.validate() {
        anyhow::bail!("invalid configuration: {}", e);
    }
    info!(
        "Configuration loaded: tolerance={}, floor={}, window={}s",
        limits.score_tolerance, limits.score_floor, limits.replay_window_secs
    );

    // Submission JSON from the argument path, or stdin with no argument
    let raw = match std::env::args().nth(1) {
        Some(path) => fs::read_to_string(&path)?,
        None => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };
    let submission: Submission = serde_json::from_str(&raw)?;

    let validator = SubmissionValidator::new(arena, limits);
    let verdict = validator.validate(&submission);

    println!("{}", serde_json::to_string_pretty(&verdict)?);
    Ok(if verdict.accepted {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

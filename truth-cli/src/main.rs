use std::sync::Arc;
use tokio::signal;
use tokio::sync::mpsc;
use tracing::info;
use tracing_subscriber::EnvFilter;

use truth_cli::{
    config::Config,
    driver::{DriverCommand, MatchDriver},
    engagement::EngagementLog,
    input::spawn_stdin_reader,
};
use truth_core::{GameRng, MatchMachine, QuestionBank};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr so they never interleave with the game screen
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    info!("Starting Quick Truth...");

    let config = Config::from_env()?;
    let settings = config.match_settings()?;

    let bank = Arc::new(QuestionBank::builtin()?);
    info!(
        "Loaded {} questions in {} categories",
        bank.len(),
        bank.categories().len()
    );

    let rng = config.question_seed.map(GameRng::new).unwrap_or_default();
    if let Some(seed) = rng.seed() {
        info!("Using question seed {}", seed);
    }
    let mut machine = MatchMachine::with_bank(bank, rng);
    machine.add_handler(Box::new(EngagementLog::default()));

    let (tx, mut rx) = mpsc::channel(32);
    spawn_stdin_reader(tx.clone());

    tokio::spawn(async move {
        if signal::ctrl_c().await.is_ok() {
            info!("Received Ctrl+C, shutting down");
            let _ = tx.send(DriverCommand::Quit).await;
        }
    });

    let driver = MatchDriver::new(machine, settings, config.pacing);
    let mut stdout = std::io::stdout();
    let final_state = driver.run(&mut rx, &mut stdout).await?;

    info!(
        "Quick Truth stopped after {} rounds of the last match",
        final_state.rounds_played
    );
    Ok(())
}

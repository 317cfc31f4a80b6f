use pathsim_core::config::{
    catalog_path_from_env_value, resolve_catalog, seed_from_env_value,
    ticket_budget_from_env_value, QuizConfig,
};
use pathsim_core::GameSession;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod console;
mod view;

/// Main entry point for the interactive simulator
///
/// Resolves configuration from the environment (and `.env`), loads the case catalog, and runs
/// the game on stdin/stdout. Logs go to stderr so they never interleave with the screen.
///
/// # Environment Variables
/// - `PATHSIM_TICKETS`: lab tickets per case (default: 8)
/// - `PATHSIM_SEED`: seed for reproducible case selection (default: random)
/// - `PATHSIM_CATALOG`: path to a catalog YAML file (default: embedded catalog)
/// - `RUST_LOG`: log filter (default: "pathsim=info")
fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env().add_directive("pathsim=info".parse()?))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = QuizConfig::new(
        ticket_budget_from_env_value(std::env::var("PATHSIM_TICKETS").ok())?,
        seed_from_env_value(std::env::var("PATHSIM_SEED").ok())?,
        catalog_path_from_env_value(std::env::var("PATHSIM_CATALOG").ok()),
    )?;

    let catalog = resolve_catalog(&config)?;
    tracing::info!(
        "++ Starting PathSim with {} cases and {} markers",
        catalog.len(),
        catalog.panel().len()
    );

    let mut session = GameSession::new(catalog, &config)?;

    let stdin = std::io::stdin();
    console::run(&mut session, stdin.lock(), std::io::stdout())?;

    tracing::info!("-- PathSim finished after {} cases", session.round());
    Ok(())
}

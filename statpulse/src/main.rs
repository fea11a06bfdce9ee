//! Entry point for statpulse. Parses args, installs signal handling and runs one session.

use std::{io, sync::Arc};

use anyhow::Context;
use clap::Parser;
use statpulse::{
    cli::Cli,
    logging,
    settings::{load_settings, save_settings, settings_path, Settings},
    worker,
    ConfigError, Orchestrator, SignalGuard, StdinPrompt,
};
use statpulse_probe::{MetricSource, SystemProbe};
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::init()?;
    worker::install_panic_hook();

    let saved = load_settings();
    let config = cli
        .session_config(&saved)
        .context("invalid session configuration")?;
    if cli.save_defaults {
        save_settings(&Settings::from(&config))
            .map_err(ConfigError::from)
            .with_context(|| format!("saving defaults to {}", settings_path().display()))?;
        info!(path = %settings_path().display(), "defaults saved");
    }

    let guard = SignalGuard::install().context("installing signal handlers")?;
    let source: Arc<dyn MetricSource> = Arc::new(SystemProbe::new());
    let mut orchestrator =
        Orchestrator::new(config, source, guard.flag(), StdinPrompt, io::stdout());
    let outcome = orchestrator
        .run()
        .await
        .context("monitoring session failed")?;
    info!(?outcome, "exiting");
    Ok(())
}

//! Command-line surface.

use clap::Parser;

use crate::{config::SessionConfig, error::ConfigError, settings::Settings};

#[derive(Debug, Clone, Default, Parser)]
#[command(
    name = "statpulse",
    version,
    about = "Samples cpu, memory and logged-in users and redraws them in place",
    after_help = "With neither --system nor --user (or with both) every section is shown.\n\
                  --graphics adds growth bars to the system sections.\n\
                  Ctrl-C asks before quitting; Ctrl-Z is ignored."
)]
pub struct Cli {
    /// Number of samples; positional form, needs SECONDS after it
    #[arg(value_name = "SAMPLES", requires = "seconds_pos")]
    pub samples_pos: Option<u32>,

    /// Seconds between samples; positional form
    #[arg(value_name = "SECONDS")]
    pub seconds_pos: Option<u64>,

    /// Show only memory, cpu and system information
    #[arg(long)]
    pub system: bool,

    /// Show only logged-in users and system information
    #[arg(long)]
    pub user: bool,

    /// Redraw the whole display before every sample
    #[arg(long)]
    pub sequential: bool,

    /// Draw memory growth and cpu bars
    #[arg(long)]
    pub graphics: bool,

    /// Number of samples (overrides the positional form)
    #[arg(long, value_name = "N")]
    pub samples: Option<u32>,

    /// Seconds between samples (overrides the positional form)
    #[arg(long, value_name = "S")]
    pub tdelay: Option<u64>,

    /// Store the effective settings as the new defaults
    #[arg(long)]
    pub save_defaults: bool,
}

impl Cli {
    /// Layers flags over positionals over saved settings over built-in defaults.
    pub fn session_config(&self, saved: &Settings) -> Result<SessionConfig, ConfigError> {
        SessionConfig {
            sample_count: self
                .samples
                .or(self.samples_pos)
                .or(saved.samples)
                .unwrap_or(SessionConfig::DEFAULT_SAMPLES),
            interval_secs: self
                .tdelay
                .or(self.seconds_pos)
                .or(saved.interval_secs)
                .unwrap_or(SessionConfig::DEFAULT_INTERVAL_SECS),
            show_system: self.system || saved.system,
            show_user: self.user || saved.user,
            show_graphics: self.graphics || saved.graphics,
            sequential: self.sequential || saved.sequential,
        }
        .validate()
    }
}

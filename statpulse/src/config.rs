//! Session configuration and the render mode derived from it.

use std::time::Duration;

use crate::error::ConfigError;

/// Rows are addressed with u32; this keeps `U + 10 + N + i` far from overflow.
pub const MAX_SAMPLES: u32 = 1_000_000;

/// Everything a session needs to know up front. Fixed once the session starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionConfig {
    pub sample_count: u32,
    pub interval_secs: u64,
    pub show_system: bool,
    pub show_user: bool,
    pub show_graphics: bool,
    pub sequential: bool,
}

impl SessionConfig {
    pub const DEFAULT_SAMPLES: u32 = 10;
    pub const DEFAULT_INTERVAL_SECS: u64 = 1;

    pub fn validate(self) -> Result<Self, ConfigError> {
        match self.sample_count {
            0 => Err(ConfigError::ZeroSamples),
            n if n > MAX_SAMPLES => Err(ConfigError::TooManySamples(n)),
            _ => Ok(self),
        }
    }

    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_secs)
    }

    pub fn mode(&self) -> RenderMode {
        let group = match (self.show_system, self.show_user) {
            (false, true) => Group::UserOnly,
            (true, false) => Group::SystemOnly,
            _ => Group::All,
        };
        RenderMode {
            group,
            cadence: if self.sequential {
                Cadence::Sequential
            } else {
                Cadence::Rolling
            },
            rendering: if self.show_graphics {
                Rendering::Graphical
            } else {
                Rendering::Text
            },
        }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            sample_count: Self::DEFAULT_SAMPLES,
            interval_secs: Self::DEFAULT_INTERVAL_SECS,
            show_system: false,
            show_user: false,
            show_graphics: false,
            sequential: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Group {
    All,
    UserOnly,
    SystemOnly,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cadence {
    /// One pass over all ticks under a single frame.
    Rolling,
    /// Frame redrawn before every tick.
    Sequential,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rendering {
    Text,
    Graphical,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderMode {
    pub group: Group,
    pub cadence: Cadence,
    pub rendering: Rendering,
}

impl RenderMode {
    /// Graphics only change the system metrics, so a user-only session never draws graphs.
    pub fn graphical(&self) -> bool {
        self.rendering == Rendering::Graphical && self.group != Group::UserOnly
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn both_or_neither_flag_means_all() {
        let mut cfg = SessionConfig::default();
        assert_eq!(cfg.mode().group, Group::All);
        cfg.show_system = true;
        cfg.show_user = true;
        assert_eq!(cfg.mode().group, Group::All);
        cfg.show_user = false;
        assert_eq!(cfg.mode().group, Group::SystemOnly);
        cfg.show_system = false;
        cfg.show_user = true;
        cfg.show_graphics = true;
        let mode = cfg.mode();
        assert_eq!(mode.group, Group::UserOnly);
        assert!(!mode.graphical());
    }

    #[test]
    fn zero_samples_rejected() {
        let cfg = SessionConfig {
            sample_count: 0,
            ..SessionConfig::default()
        };
        assert!(matches!(cfg.validate(), Err(ConfigError::ZeroSamples)));
        let cfg = SessionConfig {
            sample_count: 1,
            interval_secs: 0,
            ..SessionConfig::default()
        };
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn sample_cap_is_inclusive() {
        let at_cap = SessionConfig {
            sample_count: MAX_SAMPLES,
            ..SessionConfig::default()
        };
        assert!(at_cap.validate().is_ok());
        let over = SessionConfig {
            sample_count: MAX_SAMPLES + 1,
            ..SessionConfig::default()
        };
        assert!(matches!(
            over.validate(),
            Err(ConfigError::TooManySamples(n)) if n == MAX_SAMPLES + 1
        ));
    }
}

//! Aggregate CPU utilization from two time-separated reads of `/proc/stat`.

use std::{fs, path::PathBuf, time::Duration};

use once_cell::sync::OnceCell;

use crate::error::ProbeError;

const DEFAULT_STAT_PATH: &str = "/proc/stat";
const DEFAULT_WINDOW_MS: u64 = 250;

// Runtime toggles (read once)
fn window_from_env() -> Duration {
    static WINDOW: OnceCell<Duration> = OnceCell::new();
    *WINDOW.get_or_init(|| {
        let ms = std::env::var("STATPULSE_CPU_WINDOW_MS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(DEFAULT_WINDOW_MS);
        Duration::from_millis(ms.clamp(1, 5_000))
    })
}

fn stat_path_from_env() -> PathBuf {
    static PATH: OnceCell<PathBuf> = OnceCell::new();
    PATH.get_or_init(|| {
        std::env::var_os("STATPULSE_PROC_STAT")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_STAT_PATH))
    })
    .clone()
}

/// Cumulative jiffies from the aggregate `cpu` line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CpuTimes {
    pub user: u64,
    pub nice: u64,
    pub system: u64,
    pub idle: u64,
    pub iowait: u64,
    pub irq: u64,
    pub softirq: u64,
}

impl CpuTimes {
    /// Parses the first `cpu ` line of a stat file:
    /// `cpu  user nice system idle iowait irq softirq steal ...`
    pub fn parse(stat: &str) -> Result<Self, ProbeError> {
        let line = stat
            .lines()
            .find(|l| l.starts_with("cpu "))
            .ok_or(ProbeError::Parse {
                what: "cpu statistics",
                detail: "no aggregate cpu line".into(),
            })?;

        let mut fields = line.split_whitespace().skip(1);
        let mut next = |name: &'static str| -> Result<u64, ProbeError> {
            let tok = fields.next().ok_or(ProbeError::Parse {
                what: "cpu statistics",
                detail: format!("missing {name} counter"),
            })?;
            tok.parse::<u64>().map_err(|e| ProbeError::Parse {
                what: "cpu statistics",
                detail: format!("{name} counter {tok:?}: {e}"),
            })
        };

        Ok(Self {
            user: next("user")?,
            nice: next("nice")?,
            system: next("system")?,
            idle: next("idle")?,
            iowait: next("iowait")?,
            irq: next("irq")?,
            softirq: next("softirq")?,
        })
    }

    pub fn total(&self) -> u64 {
        [
            self.user,
            self.nice,
            self.system,
            self.idle,
            self.iowait,
            self.irq,
            self.softirq,
        ]
        .iter()
        .fold(0u64, |acc, v| acc.saturating_add(*v))
    }

    /// Busy share of the jiffies elapsed since `prev`, as a percentage.
    /// Counters that did not move yield `0.0`.
    pub fn utilization_since(&self, prev: &CpuTimes) -> f64 {
        let total = self.total().saturating_sub(prev.total());
        if total == 0 {
            return 0.0;
        }
        let idle = self.idle.saturating_sub(prev.idle);
        total.saturating_sub(idle) as f64 / total as f64 * 100.0
    }
}

/// Reads the stat file twice, `window` apart, and reports the busy percentage.
#[derive(Debug, Clone)]
pub struct CpuSampler {
    path: PathBuf,
    window: Duration,
}

impl CpuSampler {
    pub fn new(path: impl Into<PathBuf>, window: Duration) -> Self {
        Self {
            path: path.into(),
            window,
        }
    }

    /// Path and window from `STATPULSE_PROC_STAT` / `STATPULSE_CPU_WINDOW_MS`.
    pub fn from_env() -> Self {
        Self::new(stat_path_from_env(), window_from_env())
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    fn read(&self) -> Result<CpuTimes, ProbeError> {
        let stat = fs::read_to_string(&self.path)?;
        CpuTimes::parse(&stat)
    }

    /// Blocks for the sampling window.
    pub fn utilization(&self) -> Result<f64, ProbeError> {
        let prev = self.read()?;
        std::thread::sleep(self.window);
        let curr = self.read()?;
        Ok(curr.utilization_since(&prev))
    }
}

impl Default for CpuSampler {
    fn default() -> Self {
        Self::from_env()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const STAT: &str = "\
cpu  4705 356 584 3699 23 23 0 0 0 0
cpu0 1393280 32966 572056 13343292 6130 0 17875 0 23933 0
intr 114930548 113199788 3 0 5 263 0 4 [... lots more numbers ...]
";

    #[test]
    fn parses_aggregate_line() {
        let times = CpuTimes::parse(STAT).unwrap();
        assert_eq!(
            times,
            CpuTimes {
                user: 4705,
                nice: 356,
                system: 584,
                idle: 3699,
                iowait: 23,
                irq: 23,
                softirq: 0,
            }
        );
        assert_eq!(times.total(), 4705 + 356 + 584 + 3699 + 23 + 23);
    }

    #[test]
    fn rejects_missing_and_garbled_counters() {
        assert!(matches!(
            CpuTimes::parse("cpu0 1 2 3 4 5 6 7\n"),
            Err(ProbeError::Parse { .. })
        ));
        assert!(matches!(
            CpuTimes::parse("cpu  1 2 3\n"),
            Err(ProbeError::Parse { .. })
        ));
        assert!(matches!(
            CpuTimes::parse("cpu  1 2 x 4 5 6 7\n"),
            Err(ProbeError::Parse { .. })
        ));
    }

    #[test]
    fn utilization_is_busy_share_of_elapsed_jiffies() {
        let prev = CpuTimes {
            user: 100,
            idle: 100,
            ..CpuTimes::default()
        };
        let curr = CpuTimes {
            user: 175,
            idle: 125,
            ..CpuTimes::default()
        };
        assert!((curr.utilization_since(&prev) - 75.0).abs() < 1e-9);
        assert_eq!(prev.utilization_since(&prev), 0.0);
    }

    #[test]
    fn sampler_reads_the_configured_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(STAT.as_bytes()).unwrap();
        let sampler = CpuSampler::new(file.path(), Duration::from_millis(1));
        assert_eq!(sampler.window(), Duration::from_millis(1));
        // Same counters on both reads: nothing elapsed, nothing busy.
        assert_eq!(sampler.utilization().unwrap(), 0.0);
    }

    #[test]
    fn sampler_reports_missing_file_as_io_error() {
        let sampler = CpuSampler::new("/nonexistent/statpulse/stat", Duration::from_millis(1));
        assert!(matches!(sampler.utilization(), Err(ProbeError::Io(_))));
    }
}

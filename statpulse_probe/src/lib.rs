//! Metric providers for statpulse.
//!
//! Every reading is a synchronous, independent query against the local machine:
//! cpu utilization from two `/proc/stat` reads, memory and uptime from sysinfo,
//! logged-in sessions from utmp, host identity from `uname`.

pub mod cpu;
mod error;
mod host;
pub mod metrics;
pub mod mock;
mod state;
pub mod types;
mod users;

pub use cpu::{CpuSampler, CpuTimes};
pub use error::ProbeError;
pub use metrics::MetricSource;
pub use state::SystemProbe;
pub use types::{HostInfo, MemorySnapshot, Uptime, UserSession};

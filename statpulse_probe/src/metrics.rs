//! The provider contract and its live implementation.

use sysinfo::System;
use tracing::debug;

use crate::{
    error::ProbeError,
    host, users,
    state::SystemProbe,
    types::{HostInfo, MemorySnapshot, Uptime, UserSession},
};

/// Synchronous metric queries. Each call is a fresh read; nothing is cached between
/// calls, so a failed read heals on the next one.
pub trait MetricSource: Send + Sync {
    /// Busy percentage over the sampler's window. May block for that window.
    fn cpu_utilization(&self) -> Result<f64, ProbeError>;

    /// Online logical cores.
    fn core_count(&self) -> usize;

    fn memory(&self) -> Result<MemorySnapshot, ProbeError>;

    fn uptime(&self) -> Result<Uptime, ProbeError>;

    fn logged_in_users(&self) -> Result<Vec<UserSession>, ProbeError>;

    fn user_count(&self) -> Result<usize, ProbeError> {
        self.logged_in_users().map(|u| u.len())
    }

    fn host_info(&self) -> Result<HostInfo, ProbeError>;

    /// Peak resident set of the monitoring process itself, in kilobytes.
    fn peak_resident_kb(&self) -> Result<u64, ProbeError>;
}

impl MetricSource for SystemProbe {
    fn cpu_utilization(&self) -> Result<f64, ProbeError> {
        self.cpu.utilization()
    }

    fn core_count(&self) -> usize {
        self.cores
    }

    fn memory(&self) -> Result<MemorySnapshot, ProbeError> {
        let mut sys = self.sys.lock().unwrap_or_else(|e| e.into_inner());
        sys.refresh_memory();
        let total = sys.total_memory();
        if total == 0 {
            return Err(ProbeError::Unavailable("memory statistics"));
        }
        let snapshot = MemorySnapshot::from_bytes(
            total,
            sys.free_memory(),
            sys.total_swap(),
            sys.free_swap(),
        );
        debug!(?snapshot, "memory sampled");
        Ok(snapshot)
    }

    fn uptime(&self) -> Result<Uptime, ProbeError> {
        match System::uptime() {
            0 => Err(ProbeError::Unavailable("uptime")),
            secs => Ok(Uptime::from_secs(secs)),
        }
    }

    fn logged_in_users(&self) -> Result<Vec<UserSession>, ProbeError> {
        users::logged_in()
    }

    fn host_info(&self) -> Result<HostInfo, ProbeError> {
        host::host_info()
    }

    fn peak_resident_kb(&self) -> Result<u64, ProbeError> {
        host::peak_resident_kb()
    }
}

//! Probe state: a persistent sysinfo handle plus the cpu sampler.

use std::sync::Mutex;

use sysinfo::{CpuRefreshKind, MemoryRefreshKind, RefreshKind, System};
use tracing::debug;

use crate::cpu::CpuSampler;

pub type SharedSystem = Mutex<System>;

/// Reads the live machine. Cheap to share behind an `Arc`; every query is
/// independent and safe to call from several threads at once.
pub struct SystemProbe {
    pub(crate) sys: SharedSystem,
    pub(crate) cpu: CpuSampler,
    pub(crate) cores: usize,
}

impl SystemProbe {
    pub fn new() -> Self {
        Self::with_sampler(CpuSampler::from_env())
    }

    pub fn with_sampler(cpu: CpuSampler) -> Self {
        let refresh_kind = RefreshKind::nothing()
            .with_cpu(CpuRefreshKind::nothing())
            .with_memory(MemoryRefreshKind::everything());
        let sys = System::new_with_specifics(refresh_kind);
        let cores = sys.cpus().len().max(1);
        debug!(cores, window_ms = cpu.window().as_millis() as u64, "system probe ready");
        Self {
            sys: Mutex::new(sys),
            cpu,
            cores,
        }
    }
}

impl Default for SystemProbe {
    fn default() -> Self {
        Self::new()
    }
}

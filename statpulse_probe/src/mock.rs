//! A scripted metric source for tests and demos.

use std::{
    collections::VecDeque,
    sync::{
        atomic::{AtomicUsize, Ordering},
        Mutex,
    },
};

use crate::{
    error::ProbeError,
    metrics::MetricSource,
    types::{HostInfo, MemorySnapshot, Uptime, UserSession},
};

/// Replays queued readings in order, then keeps repeating the last one.
/// An empty script means the metric is unavailable.
struct Script<T> {
    pending: Mutex<VecDeque<T>>,
}

impl<T: Clone> Script<T> {
    fn new(readings: impl IntoIterator<Item = T>) -> Self {
        Self {
            pending: Mutex::new(readings.into_iter().collect()),
        }
    }

    fn next(&self, what: &'static str) -> Result<T, ProbeError> {
        let mut pending = self.pending.lock().unwrap_or_else(|e| e.into_inner());
        let reading = if pending.len() > 1 {
            pending.pop_front()
        } else {
            pending.front().cloned()
        };
        reading.ok_or(ProbeError::Unavailable(what))
    }
}

/// A [`MetricSource`] with fixed, scripted answers.
pub struct FixedSource {
    cpu: Script<f64>,
    memory: Script<MemorySnapshot>,
    users: Script<Vec<UserSession>>,
    host: Option<HostInfo>,
    uptime: Option<Uptime>,
    cores: usize,
    peak_resident_kb: u64,
    cpu_panics: bool,
    memory_reads: AtomicUsize,
    cpu_reads: AtomicUsize,
}

impl FixedSource {
    /// A quiet four-core machine with one logged-in user.
    pub fn new() -> Self {
        Self {
            cpu: Script::new([12.5]),
            memory: Script::new([MemorySnapshot {
                phys_used_gb: 3.5,
                phys_total_gb: 15.5,
                virt_used_gb: 0.25,
                virt_total_gb: 2.0,
            }]),
            users: Script::new([vec![UserSession {
                name: "alice".into(),
                terminal: "pts/0".into(),
                host: "10.0.0.7".into(),
            }]]),
            host: Some(HostInfo {
                os_name: "Linux".into(),
                hostname: "testbox".into(),
                version: "#1 SMP PREEMPT_DYNAMIC".into(),
                release: "6.8.0-test".into(),
                arch: "x86_64".into(),
            }),
            uptime: Some(Uptime::from_secs(93_784)),
            cores: 4,
            peak_resident_kb: 2_048,
            cpu_panics: false,
            memory_reads: AtomicUsize::new(0),
            cpu_reads: AtomicUsize::new(0),
        }
    }

    pub fn with_cpu(mut self, readings: impl IntoIterator<Item = f64>) -> Self {
        self.cpu = Script::new(readings);
        self
    }

    pub fn with_memory(mut self, readings: impl IntoIterator<Item = MemorySnapshot>) -> Self {
        self.memory = Script::new(readings);
        self
    }

    pub fn with_users(mut self, readings: impl IntoIterator<Item = Vec<UserSession>>) -> Self {
        self.users = Script::new(readings);
        self
    }

    pub fn with_host(mut self, host: Option<HostInfo>) -> Self {
        self.host = host;
        self
    }

    pub fn with_uptime(mut self, uptime: Option<Uptime>) -> Self {
        self.uptime = uptime;
        self
    }

    pub fn with_cores(mut self, cores: usize) -> Self {
        self.cores = cores;
        self
    }

    pub fn with_peak_resident_kb(mut self, kb: u64) -> Self {
        self.peak_resident_kb = kb;
        self
    }

    /// Makes every cpu reading panic, to exercise abnormal worker exits.
    pub fn with_panicking_cpu(mut self) -> Self {
        self.cpu_panics = true;
        self
    }

    /// How many times [`MetricSource::memory`] has been called.
    pub fn memory_reads(&self) -> usize {
        self.memory_reads.load(Ordering::SeqCst)
    }

    /// How many times [`MetricSource::cpu_utilization`] has been called.
    pub fn cpu_reads(&self) -> usize {
        self.cpu_reads.load(Ordering::SeqCst)
    }
}

impl Default for FixedSource {
    fn default() -> Self {
        Self::new()
    }
}

impl MetricSource for FixedSource {
    fn cpu_utilization(&self) -> Result<f64, ProbeError> {
        self.cpu_reads.fetch_add(1, Ordering::SeqCst);
        if self.cpu_panics {
            panic!("scripted cpu probe failure");
        }
        self.cpu.next("cpu statistics")
    }

    fn core_count(&self) -> usize {
        self.cores
    }

    fn memory(&self) -> Result<MemorySnapshot, ProbeError> {
        self.memory_reads.fetch_add(1, Ordering::SeqCst);
        self.memory.next("memory statistics")
    }

    fn uptime(&self) -> Result<Uptime, ProbeError> {
        self.uptime.ok_or(ProbeError::Unavailable("uptime"))
    }

    fn logged_in_users(&self) -> Result<Vec<UserSession>, ProbeError> {
        self.users.next("utmp database")
    }

    fn host_info(&self) -> Result<HostInfo, ProbeError> {
        self.host.clone().ok_or(ProbeError::Unavailable("host info"))
    }

    fn peak_resident_kb(&self) -> Result<u64, ProbeError> {
        Ok(self.peak_resident_kb)
    }
}

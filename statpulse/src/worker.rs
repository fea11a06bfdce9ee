//! Workers: one blocking task per metric, each feeding its own channel.

use std::{
    any::Any,
    cell::Cell,
    panic,
    sync::{
        atomic::{AtomicU64, Ordering},
        Arc, Once,
    },
};

use bytes::Bytes;
use statpulse_probe::{MetricSource, ProbeError};
use tokio::{runtime::Handle, task::JoinHandle};
use tracing::debug;

use crate::{
    channel::{channel, ChannelReader, ChannelWriter},
    error::WorkerError,
    kind::MetricKind,
    payload,
};

/// What one worker is asked to produce.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Job {
    pub kind: MetricKind,
    /// Baseline for the memory graph; `0.0` on the tick that captures it.
    pub prior: f64,
}

impl Job {
    pub fn new(kind: MetricKind, prior: f64) -> Self {
        Self { kind, prior }
    }

    /// Queries the provider for this job's kind and writes the payload. An unavailable
    /// metric writes nothing, which the display shows as a blank row.
    pub fn run(&self, source: &dyn MetricSource, out: &ChannelWriter) -> Result<(), WorkerError> {
        match self.kind {
            MetricKind::Memory => match source.memory() {
                Ok(m) => out.write(payload::memory(&m)),
                Err(e) => unavailable(self.kind, e),
            },
            MetricKind::MemoryGraphical => match source.memory() {
                Ok(m) => out.write(payload::memory_graphical(&m, self.prior)),
                Err(e) => unavailable(self.kind, e),
            },
            MetricKind::Users => match source.logged_in_users() {
                Ok(sessions) => {
                    for session in &sessions {
                        out.write(payload::user_line(session))?;
                    }
                    Ok(())
                }
                Err(e) => unavailable(self.kind, e),
            },
            MetricKind::Cpu => match source.cpu_utilization() {
                Ok(pct) => out.write(payload::cpu(source.core_count(), pct)),
                Err(e) => unavailable(self.kind, e),
            },
            MetricKind::CpuGraphical => match source.cpu_utilization() {
                Ok(pct) => out.write(payload::cpu_graphical(pct)),
                Err(e) => unavailable(self.kind, e),
            },
            MetricKind::SystemInfo => {
                let host = source
                    .host_info()
                    .map_err(|e| debug!(kind = %self.kind, "host info unavailable: {e}"))
                    .ok();
                let up = source
                    .uptime()
                    .map_err(|e| debug!(kind = %self.kind, "uptime unavailable: {e}"))
                    .ok();
                out.write(payload::system_info(host.as_ref(), up.as_ref()))
            }
        }
    }
}

fn unavailable(kind: MetricKind, err: ProbeError) -> Result<(), WorkerError> {
    debug!(%kind, "metric unavailable: {err}");
    Ok(())
}

/// How a worker ended.
#[derive(Debug)]
pub enum WorkerExit {
    Clean,
    Failed(WorkerError),
    Panicked(String),
    Cancelled,
}

impl WorkerExit {
    pub fn is_clean(&self) -> bool {
        matches!(self, WorkerExit::Clean)
    }
}

/// A worker's payload once its channel is drained.
#[derive(Debug, Clone)]
pub struct WorkerResult {
    pub kind: MetricKind,
    pub payload: Bytes,
}

/// Handle to a running worker. Must be reaped exactly once.
#[derive(Debug)]
#[must_use = "a spawned worker must be reaped"]
pub struct Worker {
    kind: MetricKind,
    handle: JoinHandle<Result<(), WorkerError>>,
}

impl Worker {
    /// Starts `job` on the blocking pool of the current runtime and returns the
    /// worker with the read end of its channel.
    pub fn spawn(
        job: Job,
        source: Arc<dyn MetricSource>,
    ) -> Result<(Worker, ChannelReader), WorkerError> {
        let runtime = Handle::try_current()?;
        let (writer, reader) = channel();
        let handle = runtime.spawn_blocking(move || {
            let _marked = WorkerThread::enter();
            let res = job.run(source.as_ref(), &writer);
            drop(writer);
            res
        });
        Ok((
            Worker {
                kind: job.kind,
                handle,
            },
            reader,
        ))
    }

    pub fn kind(&self) -> MetricKind {
        self.kind
    }

    /// Waits for the worker to finish.
    pub async fn reap(self) -> WorkerExit {
        match self.handle.await {
            Ok(Ok(())) => WorkerExit::Clean,
            Ok(Err(e)) => WorkerExit::Failed(e),
            Err(e) if e.is_panic() => WorkerExit::Panicked(panic_message(e.into_panic())),
            Err(_) => WorkerExit::Cancelled,
        }
    }
}

fn panic_message(payload: Box<dyn Any + Send>) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}

thread_local! {
    static IN_WORKER: Cell<bool> = const { Cell::new(false) };
}

static HOOK: Once = Once::new();
static ROUTED_PANICS: AtomicU64 = AtomicU64::new(0);

/// Marks the current blocking-pool thread as running a job. Pool threads are
/// reused, so the mark is cleared on drop, unwinding included.
struct WorkerThread;

impl WorkerThread {
    fn enter() -> Self {
        IN_WORKER.with(|w| w.set(true));
        WorkerThread
    }
}

impl Drop for WorkerThread {
    fn drop(&mut self) {
        IN_WORKER.with(|w| w.set(false));
    }
}

/// Sends panics raised inside worker jobs to the log instead of the terminal, where
/// the default hook would write over the display. Panics anywhere else still go to
/// the previous hook. Installing twice is a no-op.
pub fn install_panic_hook() {
    HOOK.call_once(|| {
        let previous = panic::take_hook();
        panic::set_hook(Box::new(move |info| {
            if IN_WORKER.with(Cell::get) {
                ROUTED_PANICS.fetch_add(1, Ordering::Relaxed);
                debug!("worker panicked: {info}");
            } else {
                previous(info);
            }
        }));
    });
}

/// Worker panics the hook has routed to the log so far.
pub fn routed_panics() -> u64 {
    ROUTED_PANICS.load(Ordering::Relaxed)
}

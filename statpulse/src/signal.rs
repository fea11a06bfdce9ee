//! Interrupt and suspend handling.
//!
//! Ctrl-C only raises a flag; the orchestrator notices it between ticks and asks the
//! user whether to quit. Suspend (Ctrl-Z) is swallowed so a tick is never left
//! half-drawn.

use std::{
    io::{self, BufRead},
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
};

use tokio::{
    runtime::{Handle, RuntimeFlavor},
    task::JoinHandle,
};
use tracing::{debug, info};

/// Set by the interrupt listener, consumed at tick boundaries.
#[derive(Debug, Clone, Default)]
pub struct InterruptFlag(Arc<AtomicBool>);

impl InterruptFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn raise(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_pending(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }

    /// Clears the flag, returning whether it was set.
    pub fn take(&self) -> bool {
        self.0.swap(false, Ordering::SeqCst)
    }
}

/// Asks whether an interrupted session should end.
pub trait QuitPrompt {
    fn confirm_quit(&mut self) -> io::Result<bool>;
}

/// Reads the answer from a line on stdin. EOF counts as "no".
#[derive(Debug, Default)]
pub struct StdinPrompt;

impl QuitPrompt for StdinPrompt {
    fn confirm_quit(&mut self) -> io::Result<bool> {
        off_runtime(|| read_answer(&mut io::stdin().lock()))
    }
}

/// Reads the answer from any line source. EOF counts as "no".
#[derive(Debug)]
pub struct LinePrompt<R> {
    reader: R,
}

impl<R: BufRead> LinePrompt<R> {
    pub fn new(reader: R) -> Self {
        Self { reader }
    }
}

impl<R: BufRead> QuitPrompt for LinePrompt<R> {
    fn confirm_quit(&mut self) -> io::Result<bool> {
        off_runtime(|| read_answer(&mut self.reader))
    }
}

fn read_answer(reader: &mut impl BufRead) -> io::Result<bool> {
    let mut line = String::new();
    reader.read_line(&mut line)?;
    Ok(answer_is_yes(&line))
}

/// Runs a blocking read without starving the runtime's other tasks. On a
/// multi-thread runtime the worker hands its queue off first; elsewhere the read
/// simply blocks.
fn off_runtime<T>(read: impl FnOnce() -> T) -> T {
    match Handle::try_current().map(|h| h.runtime_flavor()) {
        Ok(RuntimeFlavor::MultiThread) => tokio::task::block_in_place(read),
        _ => read(),
    }
}

/// The first non-blank character decides.
pub fn answer_is_yes(answer: &str) -> bool {
    matches!(answer.trim_start().chars().next(), Some('y' | 'Y'))
}

/// Owns the signal listener tasks for the life of a session.
pub struct SignalGuard {
    flag: InterruptFlag,
    listeners: Vec<JoinHandle<()>>,
}

impl SignalGuard {
    /// Registers the handlers. Must be called inside a tokio runtime.
    pub fn install() -> io::Result<Self> {
        let flag = InterruptFlag::new();
        let mut listeners = Vec::new();

        #[cfg(unix)]
        {
            use tokio::signal::unix::{signal, SignalKind};

            // registered here, before the tasks run, so an early Ctrl-C is not fatal
            let mut interrupts = signal(SignalKind::interrupt())?;
            let raised = flag.clone();
            listeners.push(tokio::spawn(async move {
                while interrupts.recv().await.is_some() {
                    info!("interrupt received; confirming at the next tick boundary");
                    raised.raise();
                }
            }));

            let mut suspends = signal(SignalKind::from_raw(libc::SIGTSTP))?;
            listeners.push(tokio::spawn(async move {
                while suspends.recv().await.is_some() {
                    debug!("suspend request ignored");
                }
            }));
        }

        #[cfg(not(unix))]
        {
            let raised = flag.clone();
            listeners.push(tokio::spawn(async move {
                while tokio::signal::ctrl_c().await.is_ok() {
                    info!("interrupt received; confirming at the next tick boundary");
                    raised.raise();
                }
            }));
        }

        Ok(Self { flag, listeners })
    }

    pub fn flag(&self) -> InterruptFlag {
        self.flag.clone()
    }
}

impl Drop for SignalGuard {
    fn drop(&mut self) {
        for listener in &self.listeners {
            listener.abort();
        }
    }
}

//! The sampling loop.
//!
//! Every tick fans out one worker per active metric, drains their channels in a fixed
//! order, writes each payload at its row and reaps every worker before sleeping.

use std::{io::Write, sync::Arc};

use once_cell::unsync::OnceCell;
use statpulse_probe::MetricSource;
use tracing::{debug, error, info, warn};

use crate::{
    channel::ChannelReader,
    compositor::{Compositor, TickContext},
    config::{Cadence, RenderMode, SessionConfig},
    error::SessionError,
    frame::{self, FrameInfo},
    kind::MetricKind,
    signal::{InterruptFlag, QuitPrompt},
    terminal,
    worker::{Job, Worker, WorkerExit, WorkerResult},
};

const QUIT_PROMPT: &str = "\nCtrl + C pressed. Do you want to quit the program? (y/n): ";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionStats {
    pub ticks: u32,
    pub frames: u32,
    /// Per-tick workers started.
    pub spawned: u64,
    /// Per-tick workers reaped.
    pub reaped: u64,
    /// Workers of any kind that failed or panicked.
    pub abnormal: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionOutcome {
    Completed(SessionStats),
    /// The user confirmed the quit prompt.
    Quit(SessionStats),
}

impl SessionOutcome {
    pub fn stats(&self) -> SessionStats {
        match self {
            SessionOutcome::Completed(s) | SessionOutcome::Quit(s) => *s,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Checkpoint {
    Continue,
    Quit,
}

pub struct Orchestrator<W: Write, P: QuitPrompt> {
    config: SessionConfig,
    mode: RenderMode,
    kinds: Vec<MetricKind>,
    compositor: Compositor,
    source: Arc<dyn MetricSource>,
    baseline: OnceCell<f64>,
    interrupts: InterruptFlag,
    prompt: P,
    out: W,
    stats: SessionStats,
}

impl<W: Write, P: QuitPrompt> Orchestrator<W, P> {
    pub fn new(
        config: SessionConfig,
        source: Arc<dyn MetricSource>,
        interrupts: InterruptFlag,
        prompt: P,
        out: W,
    ) -> Self {
        let mode = config.mode();
        Self {
            config,
            mode,
            kinds: MetricKind::active(mode),
            compositor: Compositor::new(mode, config.sample_count),
            source,
            baseline: OnceCell::new(),
            interrupts,
            prompt,
            out,
            stats: SessionStats::default(),
        }
    }

    pub fn kinds(&self) -> &[MetricKind] {
        &self.kinds
    }

    pub fn mode(&self) -> RenderMode {
        self.mode
    }

    /// Physical memory in use at tick 0, if the memory graph captured it.
    pub fn baseline(&self) -> Option<f64> {
        self.baseline.get().copied()
    }

    pub fn stats(&self) -> SessionStats {
        self.stats
    }

    pub fn into_output(self) -> W {
        self.out
    }

    pub async fn run(&mut self) -> Result<SessionOutcome, SessionError> {
        info!(
            samples = self.config.sample_count,
            interval_secs = self.config.interval_secs,
            mode = ?self.mode,
            "session starting"
        );
        let outcome = match self.mode.cadence {
            Cadence::Rolling => self.run_rolling().await?,
            Cadence::Sequential => self.run_sequential().await?,
        };
        info!(stats = ?outcome.stats(), "session finished");
        Ok(outcome)
    }

    async fn run_rolling(&mut self) -> Result<SessionOutcome, SessionError> {
        terminal::clear_and_home(&mut self.out)?;
        self.draw_frame().await?;
        for index in 0..self.config.sample_count {
            if self.checkpoint()? == Checkpoint::Quit {
                return Ok(SessionOutcome::Quit(self.stats));
            }
            self.render_tick(index).await?;
            self.pause().await;
        }
        terminal::park_below(&mut self.out)?;
        self.finish()
    }

    async fn run_sequential(&mut self) -> Result<SessionOutcome, SessionError> {
        terminal::clear_and_home(&mut self.out)?;
        for index in 0..self.config.sample_count {
            if self.checkpoint()? == Checkpoint::Quit {
                return Ok(SessionOutcome::Quit(self.stats));
            }
            terminal::home(&mut self.out)?;
            self.draw_frame().await?;
            self.render_tick(index).await?;
            terminal::park_below(&mut self.out)?;
            self.out.flush()?;
            self.pause().await;
        }
        self.finish()
    }

    fn finish(&mut self) -> Result<SessionOutcome, SessionError> {
        if self.checkpoint()? == Checkpoint::Quit {
            return Ok(SessionOutcome::Quit(self.stats));
        }
        terminal::park_bottom(&mut self.out)?;
        self.out.flush()?;
        Ok(SessionOutcome::Completed(self.stats))
    }

    /// Runs tick `index`: spawn, drain, place, reap. Writes the positioned payloads to
    /// the output and returns exactly the bytes written.
    pub async fn render_tick(&mut self, index: u32) -> Result<Vec<u8>, SessionError> {
        if index == 0 && self.kinds.contains(&MetricKind::MemoryGraphical) {
            self.capture_baseline();
        }
        let prior = if index == 0 {
            0.0
        } else {
            self.baseline().unwrap_or(0.0)
        };

        let crew = self.spawn_crew(prior).await?;
        let mut workers = Vec::with_capacity(crew.len());
        let mut results = Vec::with_capacity(crew.len());
        for (worker, reader) in crew {
            results.push(WorkerResult {
                kind: worker.kind(),
                payload: reader.read_to_end().await,
            });
            workers.push(worker);
        }

        let tick = TickContext {
            index,
            live_users: self.live_users(),
        };
        let mut buf = Vec::new();
        for result in &results {
            if let Some(row) = self.compositor.row(result.kind, tick) {
                terminal::place(&mut buf, row, &result.payload)?;
            }
        }
        self.out.write_all(&buf)?;
        self.out.flush()?;

        self.reap(workers).await;
        self.stats.ticks += 1;
        debug!(index, live_users = tick.live_users, "tick rendered");
        Ok(buf)
    }

    async fn spawn_crew(
        &mut self,
        prior: f64,
    ) -> Result<Vec<(Worker, ChannelReader)>, SessionError> {
        let kinds = self.kinds.clone();
        let mut crew = Vec::with_capacity(kinds.len());
        for kind in kinds {
            match Worker::spawn(Job::new(kind, prior), Arc::clone(&self.source)) {
                Ok(pair) => {
                    self.stats.spawned += 1;
                    crew.push(pair);
                }
                Err(source) => {
                    error!(%kind, "worker spawn failed: {source}");
                    let started = crew.into_iter().map(|(worker, _reader)| worker).collect();
                    self.reap(started).await;
                    return Err(SessionError::Spawn { kind, source });
                }
            }
        }
        Ok(crew)
    }

    async fn reap(&mut self, workers: Vec<Worker>) {
        for worker in workers {
            let kind = worker.kind();
            let exit = worker.reap().await;
            self.note_exit(kind, &exit);
            self.stats.reaped += 1;
        }
    }

    fn note_exit(&mut self, kind: MetricKind, exit: &WorkerExit) {
        match exit {
            WorkerExit::Clean => return,
            WorkerExit::Failed(e) => warn!(%kind, "worker failed: {e}"),
            WorkerExit::Panicked(msg) => warn!(%kind, "worker panicked: {msg}"),
            WorkerExit::Cancelled => warn!(%kind, "worker cancelled"),
        }
        self.stats.abnormal += 1;
    }

    /// Draws the static frame at the cursor. The system block is gathered by its own
    /// worker, which is not counted as a tick worker.
    async fn draw_frame(&mut self) -> Result<(), SessionError> {
        let (worker, reader) = Worker::spawn(
            Job::new(MetricKind::SystemInfo, 0.0),
            Arc::clone(&self.source),
        )
        .map_err(|source| SessionError::Spawn {
            kind: MetricKind::SystemInfo,
            source,
        })?;
        let block = reader.read_to_end().await;
        let exit = worker.reap().await;
        self.note_exit(MetricKind::SystemInfo, &exit);

        let users = if self.kinds.contains(&MetricKind::Users) {
            self.count_users()
        } else {
            0
        };
        let info = FrameInfo {
            peak_resident_kb: self.source.peak_resident_kb().ok(),
            users,
            system_block: String::from_utf8_lossy(&block).into_owned(),
        };
        self.out
            .write_all(frame::render(&self.config, &info).as_bytes())?;
        self.out.flush()?;
        self.stats.frames += 1;
        Ok(())
    }

    /// Re-queried every tick; the cpu rows below the user list move with it.
    fn live_users(&self) -> u32 {
        if self.kinds.contains(&MetricKind::Users) {
            self.count_users()
        } else {
            0
        }
    }

    fn count_users(&self) -> u32 {
        match self.source.user_count() {
            Ok(n) => u32::try_from(n).unwrap_or(u32::MAX),
            Err(e) => {
                debug!("user count unavailable: {e}");
                0
            }
        }
    }

    fn capture_baseline(&mut self) {
        if self.baseline.get().is_some() {
            return;
        }
        match self.source.memory() {
            Ok(m) => {
                let _ = self.baseline.set(m.phys_used_gb);
                debug!(baseline_gb = m.phys_used_gb, "memory baseline captured");
            }
            Err(e) => warn!("memory baseline unavailable: {e}"),
        }
    }

    /// Consumes a pending interrupt and asks whether to quit.
    fn checkpoint(&mut self) -> Result<Checkpoint, SessionError> {
        if !self.interrupts.take() {
            return Ok(Checkpoint::Continue);
        }
        terminal::below_display(&mut self.out)?;
        self.out.write_all(QUIT_PROMPT.as_bytes())?;
        self.out.flush()?;
        let quit = self.prompt.confirm_quit().map_err(SessionError::Prompt)?;
        if quit {
            self.out.write_all(b"Exiting program.\n")?;
            self.out.flush()?;
            info!("quit confirmed");
            Ok(Checkpoint::Quit)
        } else {
            debug!("quit declined; resuming");
            Ok(Checkpoint::Continue)
        }
    }

    async fn pause(&self) {
        tokio::time::sleep(self.config.interval()).await;
    }
}

//! statpulse: a terminal system monitor that redraws cpu, memory and session
//! readings in place.
//!
//! The binary wires these modules together; the library surface exists so the
//! sampling loop can be driven against scripted sources in tests.

pub mod channel;
pub mod cli;
pub mod compositor;
pub mod config;
pub mod error;
pub mod frame;
pub mod kind;
pub mod logging;
pub mod orchestrator;
pub mod payload;
pub mod settings;
pub mod signal;
pub mod terminal;
pub mod worker;

pub use compositor::{Compositor, TickContext};
pub use config::{Cadence, Group, RenderMode, Rendering, SessionConfig};
pub use error::{ConfigError, SessionError, WorkerError};
pub use kind::MetricKind;
pub use orchestrator::{Orchestrator, SessionOutcome, SessionStats};
pub use signal::{InterruptFlag, LinePrompt, QuitPrompt, SignalGuard, StdinPrompt};

//! Where each metric lands on screen.
//!
//! Rows are 1-based and counted from the home anchor. With `i` the tick index,
//! `N` the sample count and `U` the live user count:
//!
//! | kind            | all              | system only   | user only |
//! |-----------------|------------------|---------------|-----------|
//! | memory (either) | `5 + i`          | `5 + i`       | -         |
//! | users           | `7 + N`          | -             | `5`       |
//! | cpu             | `U + 8 + N`      | `6 + N`       | -         |
//! | cpu graph       | `U + 10 + N + i` | `8 + N + i`   | -         |

use crate::{
    config::{Group, RenderMode},
    kind::MetricKind,
};

/// Per-tick inputs to placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TickContext {
    pub index: u32,
    /// Users logged in right now. For [`MetricKind::SystemInfo`] this is the count the
    /// frame was drawn with.
    pub live_users: u32,
}

#[derive(Debug, Clone, Copy)]
pub struct Compositor {
    mode: RenderMode,
    samples: u32,
}

impl Compositor {
    pub fn new(mode: RenderMode, samples: u32) -> Self {
        Self { mode, samples }
    }

    /// Target row for `kind`, or `None` when the kind is not shown in this mode.
    pub fn row(&self, kind: MetricKind, tick: TickContext) -> Option<u32> {
        let n = self.samples;
        let i = tick.index;
        let u = tick.live_users;
        let graphical = self.mode.graphical();
        let graph_rows = if graphical { n } else { 0 };
        match (self.mode.group, kind) {
            (Group::UserOnly, MetricKind::Users) => Some(5),
            (Group::UserOnly, MetricKind::SystemInfo) => Some(6 + u),
            (Group::UserOnly, _) => None,

            (_, MetricKind::Memory) if !graphical => Some(5 + i),
            (_, MetricKind::MemoryGraphical) if graphical => Some(5 + i),

            (Group::All, MetricKind::Users) => Some(7 + n),
            (Group::All, MetricKind::Cpu) => Some(u + 8 + n),
            (Group::All, MetricKind::CpuGraphical) if graphical => Some(u + 10 + n + i),
            (Group::All, MetricKind::SystemInfo) => Some(11 + n + u + graph_rows),

            (Group::SystemOnly, MetricKind::Cpu) => Some(6 + n),
            (Group::SystemOnly, MetricKind::CpuGraphical) if graphical => Some(8 + n + i),
            (Group::SystemOnly, MetricKind::SystemInfo) => Some(9 + n + graph_rows),

            _ => None,
        }
    }
}

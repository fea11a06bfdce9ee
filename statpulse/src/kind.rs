//! The metrics a session can show.

use std::fmt;

use crate::config::{Group, RenderMode, Rendering};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum MetricKind {
    Memory,
    MemoryGraphical,
    Users,
    Cpu,
    CpuGraphical,
    /// Drawn with the frame, never sampled per tick.
    SystemInfo,
}

impl MetricKind {
    pub fn name(self) -> &'static str {
        match self {
            MetricKind::Memory => "memory",
            MetricKind::MemoryGraphical => "memory-graph",
            MetricKind::Users => "users",
            MetricKind::Cpu => "cpu",
            MetricKind::CpuGraphical => "cpu-graph",
            MetricKind::SystemInfo => "system-info",
        }
    }

    /// Per-tick kinds for a mode, in the order their channels are drained.
    pub fn active(mode: RenderMode) -> Vec<MetricKind> {
        use MetricKind::*;
        let graphical = mode.rendering == Rendering::Graphical;
        match (mode.group, graphical) {
            (Group::All, false) => vec![Memory, Users, Cpu],
            (Group::All, true) => vec![MemoryGraphical, Users, Cpu, CpuGraphical],
            (Group::SystemOnly, false) => vec![Memory, Cpu],
            (Group::SystemOnly, true) => vec![MemoryGraphical, Cpu, CpuGraphical],
            (Group::UserOnly, _) => vec![Users],
        }
    }
}

impl fmt::Display for MetricKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

//! Row placement: the documented scenarios, disjointness and agreement with the frame.
use std::collections::HashSet;

use statpulse::{
    frame::{self, FrameInfo, SEPARATOR},
    Compositor, MetricKind, SessionConfig, TickContext,
};

fn config(samples: u32, system: bool, user: bool, graphics: bool) -> SessionConfig {
    SessionConfig {
        sample_count: samples,
        interval_secs: 0,
        show_system: system,
        show_user: user,
        show_graphics: graphics,
        sequential: false,
    }
}

fn compositor(cfg: &SessionConfig) -> Compositor {
    Compositor::new(cfg.mode(), cfg.sample_count)
}

fn at(index: u32, live_users: u32) -> TickContext {
    TickContext { index, live_users }
}

#[test]
fn all_text_three_samples_two_users() {
    let cfg = config(3, false, false, false);
    let c = compositor(&cfg);
    let memory: Vec<u32> = (0..3)
        .map(|i| c.row(MetricKind::Memory, at(i, 2)).unwrap())
        .collect();
    assert_eq!(memory, vec![5, 6, 7]);
    for i in 0..3 {
        assert_eq!(c.row(MetricKind::Users, at(i, 2)), Some(10));
        assert_eq!(c.row(MetricKind::Cpu, at(i, 2)), Some(13));
    }
}

#[test]
fn all_graphical_two_samples() {
    let cfg = config(2, false, false, true);
    let c = compositor(&cfg);
    for u in 0..5 {
        assert_eq!(c.row(MetricKind::CpuGraphical, at(0, u)), Some(u + 12));
        assert_eq!(c.row(MetricKind::CpuGraphical, at(1, u)), Some(u + 13));
    }
}

#[test]
fn system_only_and_user_only_rows() {
    let c = compositor(&config(4, true, false, true));
    assert_eq!(c.row(MetricKind::MemoryGraphical, at(2, 9)), Some(7));
    assert_eq!(c.row(MetricKind::Cpu, at(2, 9)), Some(10));
    assert_eq!(c.row(MetricKind::CpuGraphical, at(2, 9)), Some(14));
    assert_eq!(c.row(MetricKind::Users, at(2, 9)), None);

    let c = compositor(&config(4, false, true, true));
    assert_eq!(c.row(MetricKind::Users, at(3, 9)), Some(5));
    assert_eq!(c.row(MetricKind::Cpu, at(3, 9)), None);
    assert_eq!(c.row(MetricKind::MemoryGraphical, at(3, 9)), None);
}

/// Every row a kind could occupy over the whole session, given `users` logged in.
fn footprint(c: &Compositor, kind: MetricKind, samples: u32, users: u32) -> Vec<u32> {
    let mut rows = Vec::new();
    for i in 0..samples {
        if let Some(row) = c.row(kind, at(i, users)) {
            match kind {
                MetricKind::Users => rows.extend(row..row + users.max(1)),
                MetricKind::Cpu => rows.extend([row, row + 1]),
                _ => rows.push(row),
            }
        }
    }
    rows.sort_unstable();
    rows.dedup();
    rows
}

#[test]
fn rows_never_collide() {
    let combos = [
        (false, false, false),
        (false, false, true),
        (true, false, false),
        (true, false, true),
        (false, true, false),
        (false, true, true),
    ];
    for (system, user, graphics) in combos {
        for n in 1..=20 {
            let cfg = config(n, system, user, graphics);
            let c = compositor(&cfg);
            let kinds = MetricKind::active(cfg.mode());
            for u in 0..=10 {
                let mut seen = HashSet::new();
                for &kind in &kinds {
                    for row in footprint(&c, kind, n, u) {
                        assert!(
                            seen.insert(row),
                            "row {row} reused by {kind} \
                             (n={n} u={u} system={system} user={user} graphics={graphics})"
                        );
                    }
                }
            }
        }
    }
}

#[test]
fn rows_land_on_the_frame_gaps() {
    let combos = [
        (false, false, false),
        (false, false, true),
        (true, false, false),
        (true, false, true),
        (false, true, false),
    ];
    for (system, user, graphics) in combos {
        for n in 1..=6 {
            for u in 0..=3 {
                let cfg = config(n, system, user, graphics);
                let c = compositor(&cfg);
                let info = FrameInfo {
                    peak_resident_kb: Some(1),
                    users: u,
                    system_block: "### System Information ###\n".into(),
                };
                let text = frame::render(&cfg, &info);
                let lines: Vec<&str> = text.lines().collect();
                let line_at = |row: u32| lines[(row - 1) as usize];
                for kind in MetricKind::active(cfg.mode()) {
                    for i in 0..n {
                        let row = c.row(kind, at(i, u)).unwrap();
                        if kind == MetricKind::Users && u == 0 {
                            continue;
                        }
                        assert_eq!(
                            line_at(row),
                            "",
                            "{kind} row {row} is not blank in frame (n={n} u={u})\n{text}"
                        );
                    }
                }
                let sys = c.row(MetricKind::SystemInfo, at(0, u)).unwrap();
                assert_eq!(line_at(sys), "### System Information ###");
                assert_eq!(line_at(sys - 1), SEPARATOR);
            }
        }
    }
}

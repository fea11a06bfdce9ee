//! The static part of the display: headers, separators and blank rows that the
//! per-tick payloads are later written into.

use std::fmt::Write as _;

use crate::config::{Group, SessionConfig};

pub const SEPARATOR: &str = "---------------------------------------";
pub const MEMORY_HEADER: &str = "### Memory ### (Phys.Used/Tot -- Virtual Used/Tot)";
pub const USERS_HEADER: &str = "### Sessions/users ###";

/// Readings taken when the frame is drawn.
#[derive(Debug, Clone, Default)]
pub struct FrameInfo {
    /// Peak resident set of this process; `None` leaves the figure blank.
    pub peak_resident_kb: Option<u64>,
    /// Users logged in at frame time. Sizes the user section.
    pub users: u32,
    /// Pre-rendered system-information block.
    pub system_block: String,
}

pub fn render(config: &SessionConfig, info: &FrameInfo) -> String {
    let mode = config.mode();
    let mut out = String::new();
    // writing into a String cannot fail
    let _ = writeln!(
        out,
        "Nbr of samples: {} -- every {} secs",
        config.sample_count, config.interval_secs
    );
    match info.peak_resident_kb {
        Some(kb) => {
            let _ = writeln!(out, "Memory usage: {kb} kilobytes");
        }
        None => out.push('\n'),
    }
    line(&mut out, SEPARATOR);

    if mode.group != Group::UserOnly {
        line(&mut out, MEMORY_HEADER);
        blanks(&mut out, config.sample_count);
        line(&mut out, SEPARATOR);
    }
    if mode.group != Group::SystemOnly {
        line(&mut out, USERS_HEADER);
        blanks(&mut out, info.users);
        line(&mut out, SEPARATOR);
    }
    if mode.group != Group::UserOnly {
        blanks(&mut out, 2);
        if mode.graphical() {
            blanks(&mut out, config.sample_count);
        }
        line(&mut out, SEPARATOR);
    }

    out.push_str(&info.system_block);
    if !info.system_block.is_empty() && !info.system_block.ends_with('\n') {
        out.push('\n');
    }
    line(&mut out, SEPARATOR);
    out
}

fn line(out: &mut String, text: &str) {
    out.push_str(text);
    out.push('\n');
}

fn blanks(out: &mut String, n: u32) {
    for _ in 0..n {
        out.push('\n');
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_only_frame_skips_system_sections() {
        let cfg = SessionConfig {
            sample_count: 3,
            show_user: true,
            ..SessionConfig::default()
        };
        let info = FrameInfo {
            peak_resident_kb: Some(100),
            users: 2,
            system_block: "### System Information ###\n".into(),
        };
        let text = render(&cfg, &info);
        assert!(!text.contains(MEMORY_HEADER));
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "Nbr of samples: 3 -- every 1 secs");
        assert_eq!(lines[1], "Memory usage: 100 kilobytes");
        assert_eq!(lines[3], USERS_HEADER);
        assert_eq!(lines[6], SEPARATOR);
        assert_eq!(lines[7], "### System Information ###");
    }
}

//! Text each worker writes for its metric.

use statpulse_probe::{HostInfo, MemorySnapshot, Uptime, UserSession};

/// `used / total -- used / total` in GB, physical first. No newline.
pub fn memory_line(m: &MemorySnapshot) -> String {
    format!(
        "{:.2} GB / {:.2} GB -- {:.2} GB / {:.2} GB",
        m.phys_used_gb, m.phys_total_gb, m.virt_used_gb, m.virt_total_gb
    )
}

pub fn memory(m: &MemorySnapshot) -> String {
    let mut s = memory_line(m);
    s.push('\n');
    s
}

/// Memory line plus a bar of growth since `prior`. A zero prior marks the tick that
/// captured the baseline.
pub fn memory_graphical(m: &MemorySnapshot, prior: f64) -> String {
    let used = m.phys_used_gb;
    let mut s = memory_line(m);
    s.push_str("\t|");
    if prior == 0.0 {
        s.push_str(&format!("o 0.00 ({used:.2})"));
        return s;
    }
    let diff = (used - prior).max(0.0);
    let diff = if diff.is_finite() { diff } else { 0.0 };
    // one mark per started hundredth of a GB
    let mut remaining = diff;
    while remaining > 0.0 {
        s.push('#');
        remaining -= 0.01;
    }
    s.push_str(&format!("* {diff:.2} ({used:.2})\n"));
    s
}

pub fn user_line(u: &UserSession) -> String {
    format!(" {:<10} {} ({})\n", u.name, u.terminal, u.host)
}

pub fn cpu(cores: usize, pct: f64) -> String {
    format!("Number of cores: {cores}\ntotal cpu use = {pct:.2}%\n")
}

pub fn cpu_graphical(pct: f64) -> String {
    let mut s = String::from("\t\t | | |");
    let mut counter = if pct.is_finite() { pct } else { 0.0 };
    while counter >= 1.0 {
        s.push_str(" |");
        counter -= 1.0;
    }
    s.push_str(&format!(" {pct:.2}\n"));
    s
}

pub fn uptime(u: &Uptime) -> String {
    format!(
        "System running since last reboot: {} days {:02}:{:02}:{:02} ({:02}:{:02}:{:02})\n",
        u.days,
        u.hours,
        u.minutes,
        u.seconds,
        u.total_hours(),
        u.minutes,
        u.seconds
    )
}

/// The system-information block. Either half may be missing; the header always prints.
pub fn system_info(host: Option<&HostInfo>, up: Option<&Uptime>) -> String {
    let mut s = String::from("### System Information ###\n");
    if let Some(h) = host {
        s.push_str(&format!(
            "System Name = {}\nMachine Name = {}\nVersion = {}\nRelease = {}\nArchitecture = {}\n",
            h.os_name, h.hostname, h.version, h.release, h.arch
        ));
    }
    if let Some(u) = up {
        s.push_str(&uptime(u));
    }
    s
}

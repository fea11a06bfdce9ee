//! Readings handed from the probes to the display.
//! Keep this module minimal and stable; the display formats these field-for-field.

const GIB: f64 = 1024.0 * 1024.0 * 1024.0;

/// Physical and virtual (swap) memory, in GB.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MemorySnapshot {
    pub phys_used_gb: f64,
    pub phys_total_gb: f64,
    pub virt_used_gb: f64,
    pub virt_total_gb: f64,
}

impl MemorySnapshot {
    /// Builds a snapshot from raw byte counts. "Used" is total minus free, not minus
    /// available, so page cache counts as used.
    pub fn from_bytes(total: u64, free: u64, swap_total: u64, swap_free: u64) -> Self {
        Self {
            phys_used_gb: total.saturating_sub(free) as f64 / GIB,
            phys_total_gb: total as f64 / GIB,
            virt_used_gb: swap_total.saturating_sub(swap_free) as f64 / GIB,
            virt_total_gb: swap_total as f64 / GIB,
        }
    }
}

/// Time since boot split into calendar-ish parts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Uptime {
    pub days: u64,
    pub hours: u64,
    pub minutes: u64,
    pub seconds: u64,
}

impl Uptime {
    pub fn from_secs(total: u64) -> Self {
        Self {
            days: total / 86_400,
            hours: (total % 86_400) / 3_600,
            minutes: (total % 3_600) / 60,
            seconds: total % 60,
        }
    }

    /// Hours including whole days, for the `(HH:MM:SS)` suffix.
    pub fn total_hours(&self) -> u64 {
        self.days * 24 + self.hours
    }
}

/// One logged-in session from the utmp database.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserSession {
    pub name: String,
    pub terminal: String,
    pub host: String,
}

/// Static identity of the machine (`uname`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostInfo {
    pub os_name: String,
    pub hostname: String,
    pub version: String,
    pub release: String,
    pub arch: String,
}

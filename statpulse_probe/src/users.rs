//! Logged-in sessions from the utmp database.

use crate::{error::ProbeError, types::UserSession};

/// Converts a fixed-size, NUL-padded C field into a `String`.
#[cfg(unix)]
pub(crate) fn c_field(raw: &[libc::c_char]) -> String {
    let bytes: Vec<u8> = raw
        .iter()
        .take_while(|&&c| c != 0)
        .map(|&c| c as u8)
        .collect();
    String::from_utf8_lossy(&bytes).into_owned()
}

#[cfg(target_os = "linux")]
fn utmp_present() -> bool {
    ["/var/run/utmp", "/run/utmp"]
        .iter()
        .any(|p| std::path::Path::new(p).exists())
}

#[cfg(all(unix, not(target_os = "linux")))]
fn utmp_present() -> bool {
    true
}

/// Every `USER_PROCESS` entry, in database order.
#[cfg(unix)]
pub fn logged_in() -> Result<Vec<UserSession>, ProbeError> {
    use std::sync::Mutex;

    // getutxent walks a process-global cursor.
    static UTMP: Mutex<()> = Mutex::new(());

    if !utmp_present() {
        return Err(ProbeError::Unavailable("utmp database"));
    }

    let _cursor = UTMP.lock().unwrap_or_else(|e| e.into_inner());
    let mut sessions = Vec::new();
    // SAFETY: access to the utmpx cursor is serialized by `UTMP`; each entry is copied
    // out before the next call invalidates it.
    unsafe {
        libc::setutxent();
        loop {
            let entry = libc::getutxent();
            if entry.is_null() {
                break;
            }
            let entry = &*entry;
            if entry.ut_type == libc::USER_PROCESS {
                sessions.push(UserSession {
                    name: c_field(&entry.ut_user),
                    terminal: c_field(&entry.ut_line),
                    host: c_field(&entry.ut_host),
                });
            }
        }
        libc::endutxent();
    }
    Ok(sessions)
}

#[cfg(not(unix))]
pub fn logged_in() -> Result<Vec<UserSession>, ProbeError> {
    Err(ProbeError::Unavailable("utmp database"))
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    #[test]
    fn c_field_stops_at_nul() {
        let raw: Vec<libc::c_char> = b"pts/0\0\0garbage"
            .iter()
            .map(|&b| b as libc::c_char)
            .collect();
        assert_eq!(c_field(&raw), "pts/0");
    }

    #[test]
    fn c_field_without_terminator_uses_whole_buffer() {
        let raw: Vec<libc::c_char> = b"tty1".iter().map(|&b| b as libc::c_char).collect();
        assert_eq!(c_field(&raw), "tty1");
    }
}

//! Host identity and our own resource usage.

use crate::{error::ProbeError, types::HostInfo};

#[cfg(unix)]
pub fn host_info() -> Result<HostInfo, ProbeError> {
    use crate::users::c_field;

    // SAFETY: utsname is plain old data; uname fills it or fails without touching it.
    let mut raw: libc::utsname = unsafe { std::mem::zeroed() };
    if unsafe { libc::uname(&mut raw) } != 0 {
        return Err(std::io::Error::last_os_error().into());
    }
    Ok(HostInfo {
        os_name: c_field(&raw.sysname),
        hostname: c_field(&raw.nodename),
        version: c_field(&raw.version),
        release: c_field(&raw.release),
        arch: c_field(&raw.machine),
    })
}

#[cfg(not(unix))]
pub fn host_info() -> Result<HostInfo, ProbeError> {
    use sysinfo::System;

    Ok(HostInfo {
        os_name: System::name().ok_or(ProbeError::Unavailable("os name"))?,
        hostname: System::host_name().unwrap_or_else(|| "unknown".into()),
        version: System::os_version().unwrap_or_default(),
        release: System::kernel_version().unwrap_or_default(),
        arch: std::env::consts::ARCH.to_string(),
    })
}

/// Peak resident set size of this process, in kilobytes.
#[cfg(unix)]
pub fn peak_resident_kb() -> Result<u64, ProbeError> {
    // SAFETY: rusage is plain old data filled in by the kernel.
    let mut usage: libc::rusage = unsafe { std::mem::zeroed() };
    if unsafe { libc::getrusage(libc::RUSAGE_SELF, &mut usage) } != 0 {
        return Err(std::io::Error::last_os_error().into());
    }
    let max = u64::try_from(usage.ru_maxrss).unwrap_or(0);
    // Darwin reports bytes, everyone else kilobytes.
    if cfg!(target_os = "macos") {
        Ok(max / 1024)
    } else {
        Ok(max)
    }
}

#[cfg(not(unix))]
pub fn peak_resident_kb() -> Result<u64, ProbeError> {
    use sysinfo::{Pid, ProcessRefreshKind, ProcessesToUpdate, System};

    let pid = Pid::from_u32(std::process::id());
    let mut sys = System::new();
    sys.refresh_processes_specifics(
        ProcessesToUpdate::Some(&[pid]),
        false,
        ProcessRefreshKind::nothing().with_memory(),
    );
    sys.process(pid)
        .map(|p| p.memory() / 1024)
        .ok_or(ProbeError::Unavailable("process memory"))
}

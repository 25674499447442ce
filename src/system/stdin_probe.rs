// src/system/stdin_probe.rs

use std::time::Duration;

/// One-shot readiness check on the standard input descriptor.
///
/// Returns true only if data is readable within `timeout`. A timeout or a
/// polling error both resolve to "not ready"; the error is logged, never
/// fatal. A slow producer that writes after the window closes is not
/// treated as piped input.
#[cfg(unix)]
pub fn stdin_ready(timeout: Duration) -> bool {
    let mut fds = libc::pollfd {
        fd: libc::STDIN_FILENO,
        events: libc::POLLIN,
        revents: 0,
    };
    let timeout_ms = i32::try_from(timeout.as_millis()).unwrap_or(i32::MAX);

    let rc = unsafe { libc::poll(&mut fds, 1, timeout_ms) };
    if rc < 0 {
        log::warn!(
            "stdin readiness poll failed: {}",
            std::io::Error::last_os_error()
        );
        return false;
    }

    let ready = rc > 0 && fds.revents & libc::POLLIN != 0;
    log::debug!(
        "stdin poll finished within {}ms: {}",
        timeout.as_millis(),
        if ready { "ready" } else { "not ready" }
    );
    ready
}

#[cfg(not(unix))]
pub fn stdin_ready(_timeout: Duration) -> bool {
    log::debug!("stdin readiness polling is unsupported on this platform; assuming no pipe");
    false
}

// src/cli/session.rs

use crate::constants;
use crate::core::binder::DeferredBinder;

/// Collects first-pass validation failures into one bounded report so the
/// user sees every mistake at once instead of one per invocation.
#[derive(Debug, Default)]
pub struct ErrorSink {
    buf: String,
    full: bool,
}

impl ErrorSink {
    /// Appends one failure line. Once the buffer would exceed its capacity
    /// the sink marks itself full and drops further records; the scan stops
    /// with whatever was accumulated. A safety bound, not a normal path.
    pub fn record(&mut self, line: String) {
        if self.full {
            return;
        }
        if self.buf.len() + line.len() + 1 > constants::ERROR_REPORT_CAPACITY {
            self.full = true;
            log::warn!(
                "error report reached its {} byte capacity; stopping the scan",
                constants::ERROR_REPORT_CAPACITY
            );
            return;
        }
        if !self.buf.is_empty() {
            self.buf.push('\n');
        }
        self.buf.push_str(&line);
    }

    pub fn is_full(&self) -> bool {
        self.full
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// The combined report, one line per failure.
    pub fn into_report(self) -> String {
        self.buf
    }
}

/// The pipe-reading policy as the first pass computes it. A request turns
/// the policy on but loses to either pin; pins overwrite each other, last
/// one wins; anything still undetermined afterwards defers to the stdin
/// readiness probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PipePolicy {
    #[default]
    Undetermined,
    Requested,
    PinnedOn,
    PinnedOff,
}

impl PipePolicy {
    /// `--pipe`: only effective while the policy is not pinned.
    pub fn request(&mut self) {
        if !self.is_pinned() {
            *self = Self::Requested;
        }
    }

    /// `--force-pipe` / `--no-pipe`: pins the policy outright.
    pub fn pin(&mut self, enabled: bool) {
        *self = if enabled { Self::PinnedOn } else { Self::PinnedOff };
    }

    pub fn is_pinned(&self) -> bool {
        matches!(self, Self::PinnedOn | Self::PinnedOff)
    }

    /// Final resolution to a boolean. The probe runs only when the user
    /// left the policy undetermined, and at most once.
    pub fn resolve(self, probe: &mut dyn FnMut() -> bool) -> bool {
        match self {
            Self::Requested | Self::PinnedOn => true,
            Self::PinnedOff => false,
            Self::Undetermined => probe(),
        }
    }
}

/// Phase-1 state: the error report, the pipe-policy draft, and the flags
/// first-pass handlers record for later phases. Never mutates application
/// configuration.
#[derive(Debug, Default)]
pub struct FirstPassSession {
    pub errors: ErrorSink,
    pub pipe: PipePolicy,
    /// `--pipe-here` was seen: read the pipe at that argument position
    /// instead of implicitly before the first file.
    pub pipe_at_position: bool,
    /// `--quiet` was seen: suppress non-essential informational output.
    pub quiet: bool,
    /// A bare `-` token was seen; piping is plausible.
    pub stdin_named: bool,
}

impl FirstPassSession {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Phase-2 state, created only once phase 1 has been consumed: the deferred
/// binding slot and whether standard input was already read as a source.
#[derive(Debug, Default)]
pub struct SecondPassSession {
    pub binder: DeferredBinder,
    pub stdin_consumed: bool,
}

impl SecondPassSession {
    pub fn new() -> Self {
        Self::default()
    }
}

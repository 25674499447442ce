// src/constants.rs

/// The positional token that names the standard-input stream as a data file.
pub const STDIN_MARKER: &str = "-";

/// The display name given to the source loaded from standard input.
pub const STDIN_SOURCE_NAME: &str = "<stdin>";

/// How long the one-shot stdin readiness poll waits before deciding
/// that no piped data is coming.
pub const STDIN_POLL_TIMEOUT_MS: u64 = 400;

/// Capacity of the first-pass error report buffer. Reaching it stops the
/// scan; it is a safety bound, not a normal code path.
pub const ERROR_REPORT_CAPACITY: usize = 8192;

/// Bounds for `--point-size`. Out-of-range values are clamped, not rejected.
pub const POINT_SIZE_MIN: i32 = 0;
pub const POINT_SIZE_MAX: i32 = 101;

/// Bounds for `--line-width`. Out-of-range values are clamped, not rejected.
pub const LINE_WIDTH_MIN: i32 = 1;
pub const LINE_WIDTH_MAX: i32 = 32;

//! # System Interaction Layer
//!
//! This module provides abstractions for interacting with the underlying operating system.
//! It is the boundary between the interpretation engine and the specifics of file
//! descriptors and terminals.
//!
//! ## Modules
//!
//! - **`stdin_probe`**: The one-shot, time-bounded readiness check on standard input
//!   that decides whether piped data should be treated as an implicit source.
//! - **`shell`**: The interactive shell constructed after window construction, and the
//!   re-attachment of standard input to the controlling terminal when the pipe was
//!   consumed as data.

pub mod shell;
pub mod stdin_probe;

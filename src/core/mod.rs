// This module collects the infrastructure shared by every sidetable user: the arena-backed
// phase session that scopes tables to a compiler phase and records statistics about it, and
// the error types reported by checked table access and session misuse. The tables and keys
// themselves live in the sidetable and ir modules.

//! Core sidetable infrastructure.
//!
//! # Key Components
//!
//! ## Session Management (`session`)
//! - Arena borrowing via `bumpalo`
//! - Phase lifecycle and per-phase reports
//! - Table factories bound to the session arena
//!
//! ## Errors (`error`)
//! - `thiserror` based error enums for checked access

pub mod error;
pub mod session;
pub mod test_utils;

pub use session::{PhaseReport, PhaseSession, SessionError, SessionStats};

pub use error::{SidetableError, SidetableResult};

//! ASaP Analysis Session
//!
//! Drives the region/effect algebra over one translation unit:
//!
//! - functions and their effect summaries live in a [`SummaryTable`]
//!   owned by the session
//! - each statement's effects are checked against the enclosing function's
//!   summary with [`Session::check_covered`]
//! - questions that cannot be settled locally become solver constraints,
//!   exported as Prolog facts by [`Session::export_program`]
//!
//! [`SummaryTable`]: asap_effects::SummaryTable

mod config;
mod error;
mod session;

pub use config::{ConfigError, ConfigResult, SessionConfig};
pub use error::{SessionError, SessionResult};
pub use session::{Coverage, MinimalityViolation, Session, Verdict};

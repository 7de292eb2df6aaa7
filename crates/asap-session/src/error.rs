//! Errors reported by an analysis session.

use asap_effects::SummaryId;
use asap_rpl::RplError;
use smol_str::SmolStr;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SessionError {
    #[error("Unknown function: {name}")]
    UnknownFunction { name: SmolStr },

    #[error("Function already declared: {name}")]
    DuplicateFunction { name: SmolStr },

    #[error("No effect summary with id {}", .id.0)]
    UnknownSummary { id: SummaryId },

    #[error("Function {name} has no effect summary and inference is disabled")]
    MissingSummary { name: SmolStr },

    #[error(transparent)]
    Region(#[from] RplError),
}

pub type SessionResult<T> = Result<T, SessionError>;

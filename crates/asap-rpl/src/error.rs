//! Errors reported while building region values from annotation tokens.

use smol_str::SmolStr;
use thiserror::Error;

/// Malformed region annotations.
///
/// These are user errors: the caller turns them into diagnostics at the
/// annotation's source location and keeps analysing other declarations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RplError {
    #[error("Empty region path")]
    EmptyPath,

    #[error("Undeclared region name `{name}`")]
    Undeclared { name: SmolStr },

    #[error("Region parameter `{name}` must be the first element of a region path, found at position {position}")]
    MisplacedParameter { name: SmolStr, position: usize },

    #[error("`{name}` can only start a region path, found at position {position}")]
    MisplacedSpecial { name: SmolStr, position: usize },

    #[error("`{name}` is already declared in this scope")]
    Duplicate { name: SmolStr },

    #[error("`{name}` is reserved and cannot be declared")]
    Reserved { name: SmolStr },

    #[error("Expected {expected} region argument(s), found {found}")]
    WrongArity { expected: usize, found: usize },
}

/// Result type for building region values.
pub type RplResult<T> = Result<T, RplError>;

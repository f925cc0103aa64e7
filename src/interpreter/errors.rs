//! Runtime error types
//!
//! Errors that can occur once execution has started, as opposed to the
//! structural [`ScanError`]s caught before it. All runtime errors are fatal;
//! nothing in the language catches them.
//!
//! Note that a decrement at zero is *not* represented here. It is ordinary
//! control flow: the engine switches into failed mode and scans for a
//! backtracking point.

use crate::scan::ScanError;
use crate::source::SourceAddress;
use std::fmt;

/// Errors raised by the execution engine.
#[derive(Debug)]
pub enum RuntimeError {
    /// The requested entry function is not in the symbol table.
    EntryPointNotFound { name: String },

    /// A call to a name with no symbol-table entry.
    UndefinedFunctionCall { name: String },

    /// A group close found the stacks in an impossible state (no frame or
    /// no snapshot left). The symbol-table pass rules this out for any
    /// program it accepts; kept as an invariant check.
    UnexpectedReturn,

    /// The engine ran off the end of a source mid-body. Also ruled out by
    /// the symbol-table pass.
    UnexpectedEndOfSource { at: SourceAddress },

    /// A scan or IO failure surfacing during execution (group skipping).
    Scan(ScanError),
}

impl fmt::Display for RuntimeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuntimeError::EntryPointNotFound { name } => {
                write!(f, "Entry point '{}' not found", name)
            }
            RuntimeError::UndefinedFunctionCall { name } => {
                write!(f, "Call to undefined function '{}'", name)
            }
            RuntimeError::UnexpectedReturn => {
                write!(f, "Return with no matching call frame")
            }
            RuntimeError::UnexpectedEndOfSource { at } => {
                write!(
                    f,
                    "Unexpected end of source #{} at offset {}",
                    at.source.0, at.offset
                )
            }
            RuntimeError::Scan(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for RuntimeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RuntimeError::Scan(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ScanError> for RuntimeError {
    fn from(e: ScanError) -> Self {
        RuntimeError::Scan(e)
    }
}

impl From<std::io::Error> for RuntimeError {
    fn from(e: std::io::Error) -> Self {
        RuntimeError::Scan(ScanError::Io(e))
    }
}

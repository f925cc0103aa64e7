//! Lazy tokenizer and group skipper
//!
//! The scanner never materializes more than one token. It consumes leading
//! whitespace and `#`-to-end-of-line comments, accumulates token bytes, and
//! stops at the next boundary, leaving the source cursor exactly one byte
//! past the token it returned.
//!
//! [`skip_group`] is purely mechanical: it advances past the matching close
//! of an already-opened group, counting nested braces, without interpreting
//! anything else. It never touches interpreter state.

use crate::source::Source;
use std::fmt;
use std::io;

use super::token::Token;

/// Structural and scan-time errors.
///
/// All of these indicate malformed program text and are fatal; they are
/// detected before execution starts (except `UnclosedGroup` and `Io`, which
/// the group skipper can also surface mid-run on behalf of the engine).
#[derive(Debug)]
pub enum ScanError {
    /// A reserved symbol other than `{`/`}` appeared at top level.
    InvalidTopLevelToken { token: Token, offset: u64 },

    /// A `{` at top level with no preceding function name.
    UnnamedTopLevelGroup { offset: u64 },

    /// A stray `}` at top level.
    UnopenedGroup { offset: u64 },

    /// End of source reached before a group's matching `}`.
    UnclosedGroup { offset: u64 },

    /// A function name with no `{ ... }` body following it.
    FunctionWithoutGroup { name: String },

    /// A second definition of an already-defined function name.
    DuplicateFunctionName { name: String },

    /// Read or seek failure on the underlying source.
    Io(io::Error),
}

impl fmt::Display for ScanError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScanError::InvalidTopLevelToken { token, offset } => {
                write!(f, "{} is not allowed at top level (offset {})", token, offset)
            }
            ScanError::UnnamedTopLevelGroup { offset } => {
                write!(f, "Top-level group without a function name at offset {}", offset)
            }
            ScanError::UnopenedGroup { offset } => {
                write!(f, "'}}' without a matching '{{' at offset {}", offset)
            }
            ScanError::UnclosedGroup { offset } => {
                write!(f, "Group opened near offset {} is never closed", offset)
            }
            ScanError::FunctionWithoutGroup { name } => {
                write!(f, "Function '{}' has no body group", name)
            }
            ScanError::DuplicateFunctionName { name } => {
                write!(f, "Function '{}' is defined more than once", name)
            }
            ScanError::Io(e) => write!(f, "Source read failed: {}", e),
        }
    }
}

impl std::error::Error for ScanError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ScanError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for ScanError {
    fn from(e: io::Error) -> Self {
        ScanError::Io(e)
    }
}

/// Read the next token from `src`, or `None` at end of source.
///
/// On `Some`, the cursor is exactly one byte past the returned token. A
/// comment that runs to end of source ends the read cleanly.
pub fn next_token<S: Source>(src: &mut S) -> Result<Option<Token>, ScanError> {
    // Discard whitespace and comments until the first token byte.
    let first = loop {
        match src.read_byte()? {
            None => return Ok(None),
            Some(b'#') => skip_comment(src)?,
            Some(b) if b.is_ascii_whitespace() => {}
            Some(b) => break b,
        }
    };

    let mut bytes = vec![first];
    loop {
        match src.read_byte()? {
            None => break,
            Some(b) if b.is_ascii_whitespace() || b == b'#' => {
                // Put the boundary byte back so the cursor lands one byte
                // past the token. A `#` boundary is consumed as a comment on
                // the next call.
                let pos = src.position();
                src.seek(pos - 1)?;
                break;
            }
            Some(b) => bytes.push(b),
        }
    }

    Ok(Some(Token::classify(&bytes)))
}

/// Advance `src` past the matching `}` of a group whose `{` has already
/// been consumed.
///
/// Nested groups are tracked with a local counter; comments are skipped the
/// same way the scanner skips them. Fails with `UnclosedGroup` when the
/// source ends first.
pub fn skip_group<S: Source>(src: &mut S) -> Result<(), ScanError> {
    let start = src.position();
    let mut nesting: usize = 0;

    loop {
        match next_token(src)? {
            None => return Err(ScanError::UnclosedGroup { offset: start }),
            Some(Token::LBrace) => nesting += 1,
            Some(Token::RBrace) => {
                if nesting == 0 {
                    return Ok(());
                }
                nesting -= 1;
            }
            Some(_) => {}
        }
    }
}

fn skip_comment<S: Source>(src: &mut S) -> Result<(), ScanError> {
    while let Some(b) = src.read_byte()? {
        if b == b'\n' {
            break;
        }
    }
    Ok(())
}

//! Function symbol table
//!
//! Before anything executes, every source is scanned once, front to back, and
//! each top-level `name { body }` definition is recorded as a
//! [`SourceAddress`] pointing just past the name — where the defining `{` is
//! expected. Bodies are jumped over with the group skipper and are never
//! scanned for nested definitions; definitions exist only at top level.
//!
//! Names are unique across the whole source list. A second definition of a
//! name is rejected outright rather than shadowing the first.
//!
//! The table is built once and read-only afterwards; the engine never
//! mutates it.

use rustc_hash::FxHashMap;

use crate::scan::{next_token, skip_group, ScanError, Token};
use crate::source::{Source, SourceAddress, SourceId};

/// Immutable mapping from function name to body address.
#[derive(Debug, Clone, Default)]
pub struct SymbolTable {
    entries: FxHashMap<String, SourceAddress>,
}

impl SymbolTable {
    /// Scan every source in order and build the global table.
    ///
    /// Each source's cursor is left wherever the scan finished; callers that
    /// go on to execute must seek through recorded addresses anyway.
    pub fn build<S: Source>(sources: &mut [S]) -> Result<Self, ScanError> {
        let mut table = SymbolTable::default();
        for (index, src) in sources.iter_mut().enumerate() {
            table.scan_source(SourceId(index), src)?;
        }
        Ok(table)
    }

    /// Look up a function's body address.
    pub fn lookup(&self, name: &str) -> Option<SourceAddress> {
        self.entries.get(name).copied()
    }

    /// Number of functions defined across all sources.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// One forward pass over a single source.
    fn scan_source<S: Source>(
        &mut self,
        id: SourceId,
        src: &mut S,
    ) -> Result<(), ScanError> {
        // Name of the definition whose body `{` we are waiting for.
        let mut pending: Option<String> = None;

        loop {
            let offset = src.position();
            match next_token(src)? {
                None => {
                    return match pending {
                        Some(name) => Err(ScanError::FunctionWithoutGroup { name }),
                        None => Ok(()),
                    };
                }
                Some(Token::Ident(name)) => {
                    if let Some(prev) = pending {
                        return Err(ScanError::FunctionWithoutGroup { name: prev });
                    }
                    if self.entries.contains_key(&name) {
                        return Err(ScanError::DuplicateFunctionName { name });
                    }
                    // The cursor sits one byte past the name, which is where
                    // the engine will start reading the body.
                    let addr = SourceAddress::new(id, src.position());
                    self.entries.insert(name.clone(), addr);
                    pending = Some(name);
                }
                Some(Token::LBrace) => {
                    if pending.is_none() {
                        return Err(ScanError::UnnamedTopLevelGroup { offset });
                    }
                    skip_group(src)?;
                    pending = None;
                }
                Some(Token::RBrace) => {
                    return Err(ScanError::UnopenedGroup { offset });
                }
                Some(token) => {
                    return Err(ScanError::InvalidTopLevelToken { token, offset });
                }
            }
        }
    }
}

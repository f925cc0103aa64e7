//! Seekable byte sources
//!
//! Execution in relapse never builds a syntax tree: the program counter is a
//! `(source, byte offset)` pair, and control transfer is a seek. This module
//! provides that seam:
//! - [`Source`]: the minimal contract the engine needs from an input —
//!   sequential byte reads, an offset query, and a seek to any
//!   previously-observed offset.
//! - [`SourceAddress`]: a resumable position, used both for symbol-table
//!   entries (function body starts) and for call return addresses.
//! - [`MemorySource`]: the standard implementation, a byte buffer with a
//!   cursor. Files are read fully into memory before execution.

use std::io;

/// Index of a source in the ordered input list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SourceId(pub usize);

/// A resumable position inside one of the input sources.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceAddress {
    pub source: SourceId,
    pub offset: u64,
}

impl SourceAddress {
    pub fn new(source: SourceId, offset: u64) -> Self {
        SourceAddress { source, offset }
    }
}

/// A random-access byte stream.
///
/// Sources need not be files; anything that can hand out bytes in order and
/// jump back to an offset it has already produced satisfies the contract.
pub trait Source {
    /// Read the byte at the cursor and advance past it.
    /// Returns `None` at end of source.
    fn read_byte(&mut self) -> io::Result<Option<u8>>;

    /// Current cursor offset, in bytes from the start of the source.
    fn position(&self) -> u64;

    /// Move the cursor to `offset`.
    fn seek(&mut self, offset: u64) -> io::Result<()>;
}

/// An in-memory source: a byte buffer plus a cursor.
#[derive(Debug, Clone)]
pub struct MemorySource {
    bytes: Vec<u8>,
    cursor: usize,
}

impl MemorySource {
    pub fn new(bytes: Vec<u8>) -> Self {
        MemorySource { bytes, cursor: 0 }
    }

    /// Length of the underlying buffer in bytes.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

impl From<Vec<u8>> for MemorySource {
    fn from(bytes: Vec<u8>) -> Self {
        MemorySource::new(bytes)
    }
}

impl From<&str> for MemorySource {
    fn from(text: &str) -> Self {
        MemorySource::new(text.as_bytes().to_vec())
    }
}

impl Source for MemorySource {
    fn read_byte(&mut self) -> io::Result<Option<u8>> {
        match self.bytes.get(self.cursor) {
            Some(&b) => {
                self.cursor += 1;
                Ok(Some(b))
            }
            None => Ok(None),
        }
    }

    fn position(&self) -> u64 {
        self.cursor as u64
    }

    fn seek(&mut self, offset: u64) -> io::Result<()> {
        self.cursor = offset as usize;
        Ok(())
    }
}

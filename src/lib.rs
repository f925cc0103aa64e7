//! # Introduction
//!
//! Relapse is an interpreter for a minimal esoteric language whose only data
//! value is a single non-negative arbitrary-precision integer, the
//! *register*. Programs are named functions with brace-delimited bodies,
//! spread across one or more source streams; a decrement at zero switches
//! execution into a failed mode that backtracks to the nearest `|` choice
//! point, restoring the register to the value it had when the enclosing
//! group was entered.
//!
//! ## Execution pipeline
//!
//! ```text
//! Sources → Symbol table (one pre-pass) → Engine (seek-driven loop) → value or "-"
//! ```
//!
//! No syntax tree is built: the program counter is a `(source, byte offset)`
//! pair, and calls, returns, and alternative-skipping are all seeks.
//!
//! 1. [`source`] — the seekable byte-stream contract and the in-memory
//!    implementation.
//! 2. [`scan`] — lazy tokenizer and group skipper; structural errors.
//! 3. [`symtab`] — function name → body address, built before execution and
//!    immutable afterwards.
//! 4. [`interpreter`] — the engine, its two stacks, runtime errors, and the
//!    debug trace sink.
//!
//! ## The language
//!
//! Reserved symbols: `+` increment, `-` decrement (failure at zero), `{` `}`
//! groups, `|` backtracking point, `?` input (recognized, inert), `!` and
//! `@` debug output; anything else is a function name. Comments run from
//! `#` to end of line.

pub mod interpreter;
pub mod scan;
pub mod source;
pub mod symtab;

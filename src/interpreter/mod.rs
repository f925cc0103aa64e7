//! Execution engine
//!
//! This module provides the core execution logic:
//! - [`engine`]: the main loop with its success/failed dispatch tables
//! - [`stack`]: call stack and register snapshot stack
//! - [`trace`]: the debug-only `!` / `@` output sink
//! - [`errors`]: runtime error types
//!
//! # Execution Model
//!
//! There is no syntax tree. The engine reads one token at a time from the
//! current source, dispatches on it, and picks the next source position to
//! resume from — calls and returns are seeks. A decrement at zero flips the
//! engine into failed mode, where it scans forward for a backtracking point
//! (`|`) or lets the failure propagate out through `}`.

pub mod engine;
pub mod errors;
pub mod stack;
pub mod trace;

pub use engine::{Interpreter, Outcome};
pub use errors::RuntimeError;
pub use trace::{StderrTrace, TraceLog, TraceSink};

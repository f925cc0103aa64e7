// Execution engine for the relapse interpreter

use num_bigint::BigUint;
use num_traits::Zero;

use crate::interpreter::errors::RuntimeError;
use crate::interpreter::stack::{CallStack, SnapshotStack};
use crate::interpreter::trace::{StderrTrace, TraceSink};
use crate::scan::{next_token, skip_group, Token};
use crate::source::{Source, SourceAddress, SourceId};
use crate::symtab::SymbolTable;

/// Engine execution mode.
///
/// The mode selects which dispatch table applies to the token stream. In
/// `Failed`, almost every token is consumed and ignored; the engine is only
/// scanning forward for a backtracking point or the enclosing close.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Success,
    Failed,
}

/// Final result of a program run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The entry frame returned in success mode: the register's final value.
    Success(BigUint),
    /// The entry frame returned while failed, with no backtrack point left.
    Failure,
}

impl Outcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success(_))
    }

    /// The final register value, or `None` on failure.
    pub fn value(self) -> Option<BigUint> {
        match self {
            Outcome::Success(v) => Some(v),
            Outcome::Failure => None,
        }
    }
}

/// The interpreter: a stack machine whose program counter is a position in
/// one of the input sources.
pub struct Interpreter<S: Source, T: TraceSink = StderrTrace> {
    /// Input sources, in command-line order. Each one's cursor doubles as
    /// the program counter whenever it is the current source.
    sources: Vec<S>,

    /// Function name → body address; immutable after the pre-pass.
    symbols: SymbolTable,

    /// Name of the function execution starts in.
    entry: String,

    /// The single arbitrary-precision register.
    register: BigUint,

    /// Register copies, one per live group.
    snapshots: SnapshotStack,

    /// Call frames, entry frame at the bottom.
    calls: CallStack,

    /// Live brace nesting depth. Groups skipped over while failed are not
    /// counted; they are discarded as opaque units.
    depth: usize,

    mode: Mode,

    /// Index of the source currently being executed.
    current: usize,

    /// Gates the `!` and `@` trace commands.
    debug: bool,

    trace: T,
}

impl<S: Source> Interpreter<S> {
    /// Create an interpreter tracing to stderr.
    pub fn new(
        sources: Vec<S>,
        symbols: SymbolTable,
        entry: impl Into<String>,
        register: BigUint,
        debug: bool,
    ) -> Self {
        Interpreter::with_trace(sources, symbols, entry, register, debug, StderrTrace)
    }
}

impl<S: Source, T: TraceSink> Interpreter<S, T> {
    /// Create an interpreter with an explicit trace sink.
    pub fn with_trace(
        sources: Vec<S>,
        symbols: SymbolTable,
        entry: impl Into<String>,
        register: BigUint,
        debug: bool,
        trace: T,
    ) -> Self {
        Interpreter {
            sources,
            symbols,
            entry: entry.into(),
            register,
            snapshots: SnapshotStack::new(),
            calls: CallStack::new(),
            depth: 0,
            mode: Mode::Success,
            current: 0,
            debug,
            trace,
        }
    }

    /// Run the program to completion.
    ///
    /// Terminates exactly when the entry frame is popped: by a `}` in
    /// success mode (yielding the register) or in failed mode (yielding
    /// nothing). Everything else is a fatal [`RuntimeError`].
    pub fn run(&mut self) -> Result<Outcome, RuntimeError> {
        let entry_addr = self.symbols.lookup(&self.entry).ok_or_else(|| {
            RuntimeError::EntryPointNotFound {
                name: self.entry.clone(),
            }
        })?;

        self.calls.push_frame(self.entry.clone(), None, 0);
        self.jump(entry_addr)?;

        loop {
            let token = match next_token(self.source_mut())? {
                Some(token) => token,
                None => {
                    return Err(RuntimeError::UnexpectedEndOfSource { at: self.here() });
                }
            };

            let outcome = match self.mode {
                Mode::Success => self.step_success(token)?,
                Mode::Failed => self.step_failed(token)?,
            };

            if let Some(outcome) = outcome {
                return Ok(outcome);
            }
        }
    }

    /// Success-mode dispatch: the full interpretation table.
    fn step_success(&mut self, token: Token) -> Result<Option<Outcome>, RuntimeError> {
        match token {
            Token::Plus => self.register += 1u32,

            Token::Minus => {
                if self.register.is_zero() {
                    // The register never goes negative; a decrement at zero
                    // is the failure signal, not an error.
                    self.mode = Mode::Failed;
                } else {
                    self.register -= 1u32;
                }
            }

            Token::LBrace => {
                self.snapshots.push(self.register.clone());
                self.depth += 1;
            }

            Token::RBrace => return self.close_group(),

            Token::Pipe => {
                // The alternative was not taken. Skip to the group's close,
                // then step back one byte so the `}` itself is read next and
                // handled by the close path like any other.
                skip_group(self.source_mut())?;
                let pos = self.source_mut().position();
                self.source_mut().seek(pos - 1)?;
            }

            // Input is recognized but intentionally has no behavior.
            Token::Question => {}

            Token::Bang => {
                if self.debug {
                    self.trace.value(&self.register);
                }
            }

            Token::At => {
                if self.debug {
                    let names = self.calls.names_innermost_first();
                    self.trace.call_stack(&names);
                }
            }

            Token::Ident(name) => self.call(name)?,
        }
        Ok(None)
    }

    /// Failed-mode dispatch: only `{`, `}`, and `|` mean anything. Calls
    /// are never initiated while failed.
    fn step_failed(&mut self, token: Token) -> Result<Option<Outcome>, RuntimeError> {
        match token {
            Token::LBrace => {
                // A whole nested group is one skipped unit; its internal
                // choice points are never considered.
                skip_group(self.source_mut())?;
            }

            Token::RBrace => return self.close_group(),

            Token::Pipe => {
                // Backtrack: restore the register to its value from when the
                // current group was entered, and resume executing.
                let saved = self
                    .snapshots
                    .top()
                    .ok_or(RuntimeError::UnexpectedReturn)?
                    .clone();
                self.register = saved;
                self.mode = Mode::Success;
            }

            _ => {}
        }
        Ok(None)
    }

    /// Handle a `}` in either mode. Failure propagates outward unchanged:
    /// the mode is left as-is across returns.
    fn close_group(&mut self) -> Result<Option<Outcome>, RuntimeError> {
        self.depth = self
            .depth
            .checked_sub(1)
            .ok_or(RuntimeError::UnexpectedReturn)?;
        self.snapshots.pop().ok_or(RuntimeError::UnexpectedReturn)?;

        let frame_depth = self
            .calls
            .current_frame()
            .ok_or(RuntimeError::UnexpectedReturn)?
            .depth_at_call;

        if self.depth == frame_depth {
            let frame = self
                .calls
                .pop_frame()
                .ok_or(RuntimeError::UnexpectedReturn)?;
            match frame.return_address {
                None => {
                    // Entry frame: the program is over.
                    let outcome = match self.mode {
                        Mode::Success => Outcome::Success(self.register.clone()),
                        Mode::Failed => Outcome::Failure,
                    };
                    return Ok(Some(outcome));
                }
                Some(addr) => self.jump(addr)?,
            }
        }

        Ok(None)
    }

    /// Call a function: capture the return address, push a frame, and move
    /// the program counter to the body.
    fn call(&mut self, name: String) -> Result<(), RuntimeError> {
        let target = self
            .symbols
            .lookup(&name)
            .ok_or_else(|| RuntimeError::UndefinedFunctionCall { name: name.clone() })?;

        let return_address = self.here();
        self.calls.push_frame(name, Some(return_address), self.depth);
        self.jump(target)
    }

    fn jump(&mut self, addr: SourceAddress) -> Result<(), RuntimeError> {
        self.current = addr.source.0;
        self.sources[self.current].seek(addr.offset)?;
        Ok(())
    }

    /// The program counter as an address.
    fn here(&self) -> SourceAddress {
        SourceAddress::new(SourceId(self.current), self.sources[self.current].position())
    }

    fn source_mut(&mut self) -> &mut S {
        &mut self.sources[self.current]
    }

    // ========== Accessors ==========

    /// The register's current value.
    pub fn register(&self) -> &BigUint {
        &self.register
    }

    /// Live brace nesting depth.
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Snapshot stack size; always equal to [`depth`](Self::depth) between
    /// tokens.
    pub fn snapshot_depth(&self) -> usize {
        self.snapshots.depth()
    }

    /// The trace sink, for reading back recorded output.
    pub fn trace(&self) -> &T {
        &self.trace
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interpreter::trace::TraceLog;
    use crate::source::MemorySource;

    fn run_with(
        texts: &[&str],
        register: u32,
        debug: bool,
    ) -> (Outcome, Interpreter<MemorySource, TraceLog>) {
        let mut sources: Vec<MemorySource> =
            texts.iter().map(|t| MemorySource::from(*t)).collect();
        let symbols = SymbolTable::build(&mut sources).expect("table build failed");
        let mut interp = Interpreter::with_trace(
            sources,
            symbols,
            "main",
            BigUint::from(register),
            debug,
            TraceLog::new(),
        );
        let outcome = interp.run().expect("execution failed");
        (outcome, interp)
    }

    #[test]
    fn test_empty_body_is_identity() {
        let (outcome, _) = run_with(&["main { }"], 5, false);
        assert_eq!(outcome, Outcome::Success(BigUint::from(5u32)));
    }

    #[test]
    fn test_increment() {
        let (outcome, _) = run_with(&["main { + + + }"], 0, false);
        assert_eq!(outcome, Outcome::Success(BigUint::from(3u32)));
    }

    #[test]
    fn test_decrement_at_zero_fails() {
        let (outcome, _) = run_with(&["main { - }"], 0, false);
        assert_eq!(outcome, Outcome::Failure);
    }

    #[test]
    fn test_backtrack_restores_register() {
        // The inner group fails, propagates to its close, and the outer
        // group's `|` restores the register to 0 before running `+`.
        let (outcome, _) = run_with(&["main { { - } | + }"], 0, false);
        assert_eq!(outcome, Outcome::Success(BigUint::from(1u32)));
    }

    #[test]
    fn test_taken_alternative_skips_the_rest() {
        let (outcome, _) = run_with(&["main { + | + + | + + + }"], 0, false);
        assert_eq!(outcome, Outcome::Success(BigUint::from(1u32)));
    }

    #[test]
    fn test_second_choice_point() {
        // The first two alternatives fail; each `|` restores the register
        // before trying the next one.
        let (outcome, _) = run_with(&["main { + { - - | - - - | } }"], 0, false);
        assert_eq!(outcome, Outcome::Success(BigUint::from(1u32)));
    }

    #[test]
    fn test_failed_skip_ignores_nested_choice_points() {
        // Once failed, a nested group is skipped wholesale: its `|` does
        // not catch the failure, the outer one does.
        let (outcome, _) = run_with(&["main { - { + | + } + | + + }"], 0, false);
        assert_eq!(outcome, Outcome::Success(BigUint::from(2u32)));
    }

    #[test]
    fn test_question_is_inert() {
        let (outcome, _) = run_with(&["main { ? + ? }"], 0, false);
        assert_eq!(outcome, Outcome::Success(BigUint::from(1u32)));
    }

    #[test]
    fn test_stacks_drained_at_termination() {
        let (_, interp) = run_with(&["main { { { + } } }"], 0, false);
        assert_eq!(interp.depth(), 0);
        assert_eq!(interp.snapshot_depth(), 0);
    }

    #[test]
    fn test_trace_gated_by_debug_flag() {
        let (_, interp) = run_with(&["main { + ! @ }"], 0, false);
        assert!(interp.trace().lines().is_empty());

        let (_, interp) = run_with(&["main { + ! @ }"], 0, true);
        assert_eq!(interp.trace().lines(), ["1", "main"]);
    }

    #[test]
    fn test_trace_call_stack_innermost_first() {
        let (_, interp) = run_with(&["main { f }", "f { @ }"], 0, true);
        assert_eq!(interp.trace().lines(), ["f main"]);
    }

    #[test]
    fn test_entry_point_not_found() {
        let mut sources = vec![MemorySource::from("helper { }")];
        let symbols = SymbolTable::build(&mut sources).unwrap();
        let mut interp = Interpreter::new(sources, symbols, "main", BigUint::zero(), false);
        let err = interp.run().unwrap_err();
        assert!(matches!(err, RuntimeError::EntryPointNotFound { name } if name == "main"));
    }

    #[test]
    fn test_undefined_call() {
        let mut sources = vec![MemorySource::from("main { nothing }")];
        let symbols = SymbolTable::build(&mut sources).unwrap();
        let mut interp = Interpreter::new(sources, symbols, "main", BigUint::zero(), false);
        let err = interp.run().unwrap_err();
        assert!(
            matches!(err, RuntimeError::UndefinedFunctionCall { name } if name == "nothing")
        );
    }
}

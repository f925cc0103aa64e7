//! Debug trace output
//!
//! The `!` and `@` commands emit to a side channel while the program runs,
//! independent of the final result. The engine only talks to the
//! [`TraceSink`] trait; the binary wires in [`StderrTrace`], tests use
//! [`TraceLog`] to capture what was emitted.

use num_bigint::BigUint;

/// Collaborator output sink for the debug commands.
pub trait TraceSink {
    /// `!` — the current register value.
    fn value(&mut self, register: &BigUint);

    /// `@` — the active function names, innermost first.
    fn call_stack(&mut self, names: &[&str]);
}

/// Emits trace lines to stderr, keeping stdout clean for the final result.
#[derive(Debug, Default)]
pub struct StderrTrace;

impl TraceSink for StderrTrace {
    fn value(&mut self, register: &BigUint) {
        eprintln!("! {}", register);
    }

    fn call_stack(&mut self, names: &[&str]) {
        eprintln!("@ {}", names.join(" "));
    }
}

/// Records trace lines in memory.
#[derive(Debug, Clone, Default)]
pub struct TraceLog {
    lines: Vec<String>,
}

impl TraceLog {
    pub fn new() -> Self {
        TraceLog::default()
    }

    /// Everything emitted so far, in order.
    pub fn lines(&self) -> &[String] {
        &self.lines
    }
}

impl TraceSink for TraceLog {
    fn value(&mut self, register: &BigUint) {
        self.lines.push(register.to_string());
    }

    fn call_stack(&mut self, names: &[&str]) {
        self.lines.push(names.join(" "));
    }
}

//! Call stack and register snapshot stack
//!
//! Two plain value-owned LIFO stacks:
//! - [`CallStack`]: one [`CallFrame`] per active function, pushed on call
//!   and popped when the engine closes the group that brings the nesting
//!   depth back to the frame's `depth_at_call`.
//! - [`SnapshotStack`]: one register copy per group entered in success mode,
//!   popped at the matching close; its top is what `|` restores on
//!   backtracking. Its size always equals the engine's live nesting depth.

use num_bigint::BigUint;

use crate::source::SourceAddress;

/// Activation record for one function call.
#[derive(Debug, Clone)]
pub struct CallFrame {
    pub function_name: String,
    /// Where to resume after the body's closing `}`. `None` marks the entry
    /// frame: popping it ends the program.
    pub return_address: Option<SourceAddress>,
    /// Brace nesting depth measured before the callee's own outer group was
    /// entered.
    pub depth_at_call: usize,
}

/// The call stack. Non-empty for the whole duration of execution; the entry
/// frame is only popped at program end.
#[derive(Debug, Clone, Default)]
pub struct CallStack {
    frames: Vec<CallFrame>,
}

impl CallStack {
    pub fn new() -> Self {
        CallStack { frames: Vec::new() }
    }

    pub fn push_frame(
        &mut self,
        function_name: String,
        return_address: Option<SourceAddress>,
        depth_at_call: usize,
    ) {
        self.frames.push(CallFrame {
            function_name,
            return_address,
            depth_at_call,
        });
    }

    pub fn pop_frame(&mut self) -> Option<CallFrame> {
        self.frames.pop()
    }

    /// The innermost active frame.
    pub fn current_frame(&self) -> Option<&CallFrame> {
        self.frames.last()
    }

    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Function names, innermost first (the `@` trace order).
    pub fn names_innermost_first(&self) -> Vec<&str> {
        self.frames
            .iter()
            .rev()
            .map(|f| f.function_name.as_str())
            .collect()
    }
}

/// Register copies, one per live group.
#[derive(Debug, Clone, Default)]
pub struct SnapshotStack {
    values: Vec<BigUint>,
}

impl SnapshotStack {
    pub fn new() -> Self {
        SnapshotStack { values: Vec::new() }
    }

    pub fn push(&mut self, value: BigUint) {
        self.values.push(value);
    }

    pub fn pop(&mut self) -> Option<BigUint> {
        self.values.pop()
    }

    /// The snapshot taken when the current group was entered.
    pub fn top(&self) -> Option<&BigUint> {
        self.values.last()
    }

    pub fn depth(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

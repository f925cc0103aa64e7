//! Lexical scanning
//!
//! This module pulls tokens out of a [`Source`](crate::source::Source) one at
//! a time, with no look-ahead beyond the current token:
//! - [`token`]: the [`Token`](token::Token) classification.
//! - [`scanner`]: [`next_token`](scanner::next_token), the group skipper
//!   [`skip_group`](scanner::skip_group), and [`ScanError`](scanner::ScanError).
//!
//! # Position Contract
//!
//! After `next_token` returns a token, the source cursor sits exactly one byte
//! past that token. Every address the interpreter records — function body
//! starts in the symbol table, return addresses on the call stack — is
//! captured through this contract.

pub mod scanner;
pub mod token;

pub use scanner::{next_token, skip_group, ScanError};
pub use token::Token;

//! Token classification
//!
//! A token is a maximal run of bytes that are neither whitespace nor part of
//! a `#` comment. A token of length 1 is classified against the reserved
//! symbol set; any other single byte is still a one-character identifier,
//! not an error. Tokens longer than one byte are always identifiers.
//!
//! `#` belongs to the reserved set but always starts a comment, so the
//! scanner can never return it and it has no variant here.

use std::fmt;

/// All token variants produced by the scanner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    Plus,     // +  increment
    Minus,    // -  decrement (or failure at zero)
    LBrace,   // {  open group
    RBrace,   // }  close group
    Pipe,     // |  backtracking point
    Question, // ?  input (recognized, intentionally inert)
    Bang,     // !  debug: emit register
    At,       // @  debug: emit call stack
    Ident(String),
}

impl Token {
    /// Classify a completed run of token bytes.
    ///
    /// Identifier bytes are not required to be UTF-8; anything invalid is
    /// replaced lossily, which keeps names printable in diagnostics.
    pub fn classify(bytes: &[u8]) -> Token {
        if bytes.len() == 1 {
            match bytes[0] {
                b'+' => return Token::Plus,
                b'-' => return Token::Minus,
                b'{' => return Token::LBrace,
                b'}' => return Token::RBrace,
                b'|' => return Token::Pipe,
                b'?' => return Token::Question,
                b'!' => return Token::Bang,
                b'@' => return Token::At,
                _ => {}
            }
        }
        Token::Ident(String::from_utf8_lossy(bytes).into_owned())
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Plus => write!(f, "'+'"),
            Token::Minus => write!(f, "'-'"),
            Token::LBrace => write!(f, "'{{'"),
            Token::RBrace => write!(f, "'}}'"),
            Token::Pipe => write!(f, "'|'"),
            Token::Question => write!(f, "'?'"),
            Token::Bang => write!(f, "'!'"),
            Token::At => write!(f, "'@'"),
            Token::Ident(s) => write!(f, "identifier '{}'", s),
        }
    }
}

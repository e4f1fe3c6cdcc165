//! Error types for automaton construction and regex compilation.

use thiserror::Error;

/// Result alias used throughout the crate.
pub type Result<T, E = AutomatonError> = std::result::Result<T, E>;

/// Errors reported by the engine.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AutomatonError {
    #[error("syntax error at position {position}: {kind}")]
    Syntax {
        position: usize,
        kind: SyntaxErrorKind,
    },

    #[error("alphabet error: {0}")]
    Alphabet(#[from] AlphabetError),

    #[error("invariant violation: {message}")]
    InvariantViolation { message: String },
}

impl AutomatonError {
    /// Create a new syntax error at a character offset.
    pub fn syntax(position: usize, kind: SyntaxErrorKind) -> Self {
        Self::Syntax { position, kind }
    }

    /// Create a new invariant violation.
    pub fn invariant(message: impl Into<String>) -> Self {
        Self::InvariantViolation {
            message: message.into(),
        }
    }

    /// The character offset of a syntax error, if this is one.
    pub fn position(&self) -> Option<usize> {
        match self {
            Self::Syntax { position, .. } => Some(*position),
            _ => None,
        }
    }
}

/// What went wrong while parsing a regular expression.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SyntaxErrorKind {
    #[error("unexpected end of pattern")]
    UnexpectedEnd,
    #[error("unmatched ')'")]
    UnmatchedParen,
    #[error("unclosed group")]
    UnclosedGroup,
    #[error("unclosed character class")]
    UnclosedClass,
    #[error("empty character class")]
    EmptyClass,
    #[error("nothing to repeat")]
    NothingToRepeat,
    #[error("invalid range {lo:?}-{hi:?}")]
    InvalidRange { lo: char, hi: char },
    #[error("invalid repetition bounds")]
    InvalidRepetition,
    #[error("unknown escape sequence '\\{0}'")]
    UnknownEscape(char),
    #[error("unexpected character {0:?}")]
    UnexpectedChar(char),
    #[error("pattern nests too deeply")]
    NestingTooDeep,
}

/// Errors raised by operations that need a closed alphabet.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AlphabetError {
    #[error("no alphabet declared")]
    Undeclared,
    #[error("symbol {symbol:?} is outside the declared alphabet")]
    SymbolOutside { symbol: char },
}

//! Syntax tree of a parsed regular expression.

use crate::automaton::CharRange;

/// A node of the syntax tree together with the character offset where it
/// starts in the pattern.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Ast {
    pub position: usize,
    pub kind: AstKind,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AstKind {
    /// The empty string: an empty alternative or `()`.
    Empty,
    Literal(char),
    /// `.`
    AnyChar,
    /// A bracketed class. Ranges are normalized; `negated` is kept so the
    /// complement is taken against the full character space at compile time.
    Class {
        negated: bool,
        ranges: Vec<CharRange>,
    },
    Concat(Vec<Ast>),
    Alternation(Vec<Ast>),
    /// `*`, `+`, `?` and the counted forms. `max` is `None` when unbounded.
    Repeat {
        inner: Box<Ast>,
        min: u32,
        max: Option<u32>,
    },
    Group(Box<Ast>),
}

impl Ast {
    pub fn new(position: usize, kind: AstKind) -> Self {
        Self { position, kind }
    }

    /// Whether the node can match the empty string.
    pub fn is_nullable(&self) -> bool {
        match &self.kind {
            AstKind::Empty => true,
            AstKind::Literal(_) | AstKind::AnyChar | AstKind::Class { .. } => false,
            AstKind::Concat(items) => items.iter().all(Ast::is_nullable),
            AstKind::Alternation(branches) => branches.iter().any(Ast::is_nullable),
            AstKind::Repeat { inner, min, .. } => *min == 0 || inner.is_nullable(),
            AstKind::Group(inner) => inner.is_nullable(),
        }
    }
}

//! Recursive-descent parser for the regex dialect.
//!
//! Precedence from tightest to loosest: repetition, concatenation,
//! alternation. Metacharacters are `\ | * + ? { } ( ) [ ] . ^ - $`; any of
//! them can be escaped with a backslash, as can `n`, `t` and `r`.

use super::ast::{Ast, AstKind};
use crate::automaton::CharRange;
use crate::automaton::symbol;
use crate::error::{AutomatonError, Result, SyntaxErrorKind};
use std::iter::Peekable;
use std::str::Chars;

/// Upper bound accepted for `{m,n}` counts.
pub const REPEAT_LIMIT: u32 = 1000;

/// Deepest nesting of groups, repetitions, concatenations and alternations
/// accepted in a syntax tree.
pub const NEST_LIMIT: u32 = 250;

/// Parse `pattern` into a syntax tree.
pub fn parse(pattern: &str) -> Result<Ast> {
    let mut parse = Parse {
        chars: pattern.chars().peekable(),
        position: 0,
        open_groups: 0,
    };
    let (ast, _) = parse.alternation()?;
    match parse.chars.peek() {
        None => Ok(ast),
        Some(')') => Err(parse.error(SyntaxErrorKind::UnmatchedParen)),
        Some(&ch) => Err(parse.error(SyntaxErrorKind::UnexpectedChar(ch))),
    }
}

/// Parsing functions return each subtree with its nesting depth: zero for a
/// leaf, one more than the deepest child otherwise.
struct Parse<'a> {
    chars: Peekable<Chars<'a>>,
    position: usize,
    open_groups: u32,
}

impl Parse<'_> {
    fn next(&mut self) -> Option<char> {
        let ch = self.chars.next()?;
        self.position += 1;
        Some(ch)
    }

    fn eat(&mut self, expected: char) -> bool {
        if self.chars.peek() == Some(&expected) {
            self.next();
            true
        } else {
            false
        }
    }

    fn error(&self, kind: SyntaxErrorKind) -> AutomatonError {
        AutomatonError::syntax(self.position, kind)
    }

    fn nest(&self, position: usize, depth: u32) -> Result<u32> {
        if depth > NEST_LIMIT {
            return Err(AutomatonError::syntax(position, SyntaxErrorKind::NestingTooDeep));
        }
        Ok(depth)
    }

    fn alternation(&mut self) -> Result<(Ast, u32)> {
        let start = self.position;
        let mut branches = vec![self.concat()?];
        while self.eat('|') {
            branches.push(self.concat()?);
        }
        if branches.len() == 1 {
            return Ok(branches.remove(0));
        }
        let (branches, depth) = unzip_deepest(branches);
        let depth = self.nest(start, depth + 1)?;
        Ok((Ast::new(start, AstKind::Alternation(branches)), depth))
    }

    fn concat(&mut self) -> Result<(Ast, u32)> {
        let start = self.position;
        let mut items = Vec::new();
        while let Some(&ch) = self.chars.peek() {
            if ch == '|' || ch == ')' {
                break;
            }
            items.push(self.repeat()?);
        }
        match items.len() {
            0 => Ok((Ast::new(start, AstKind::Empty), 0)),
            1 => Ok(items.remove(0)),
            _ => {
                let (items, depth) = unzip_deepest(items);
                let depth = self.nest(start, depth + 1)?;
                Ok((Ast::new(start, AstKind::Concat(items)), depth))
            }
        }
    }

    fn repeat(&mut self) -> Result<(Ast, u32)> {
        let (mut ast, mut depth) = self.atom()?;
        loop {
            let (min, max) = match self.chars.peek() {
                Some('{') => self.bounds()?,
                Some('*') => {
                    self.next();
                    (0, None)
                }
                Some('+') => {
                    self.next();
                    (1, None)
                }
                Some('?') => {
                    self.next();
                    (0, Some(1))
                }
                _ => break,
            };
            let position = ast.position;
            depth = self.nest(position, depth + 1)?;
            ast = Ast::new(
                position,
                AstKind::Repeat {
                    inner: Box::new(ast),
                    min,
                    max,
                },
            );
        }
        Ok((ast, depth))
    }

    fn atom(&mut self) -> Result<(Ast, u32)> {
        let start = self.position;
        let Some(ch) = self.next() else {
            return Err(self.error(SyntaxErrorKind::UnexpectedEnd));
        };
        let kind = match ch {
            '(' => {
                // Bounds the recursion before the group's subtree exists.
                self.open_groups += 1;
                self.nest(start, self.open_groups)?;
                let (inner, depth) = self.alternation()?;
                if !self.eat(')') {
                    return Err(AutomatonError::syntax(start, SyntaxErrorKind::UnclosedGroup));
                }
                self.open_groups -= 1;
                let depth = self.nest(start, depth + 1)?;
                return Ok((Ast::new(start, AstKind::Group(Box::new(inner))), depth));
            }
            '[' => self.class(start)?,
            '.' => AstKind::AnyChar,
            '\\' => AstKind::Literal(self.escape(start)?),
            '*' | '+' | '?' | '{' => {
                return Err(AutomatonError::syntax(start, SyntaxErrorKind::NothingToRepeat));
            }
            ']' | '}' => {
                return Err(AutomatonError::syntax(start, SyntaxErrorKind::UnexpectedChar(ch)));
            }
            ch => AstKind::Literal(ch),
        };
        Ok((Ast::new(start, kind), 0))
    }

    /// The character after a backslash at `start`.
    fn escape(&mut self, start: usize) -> Result<char> {
        let Some(ch) = self.next() else {
            return Err(self.error(SyntaxErrorKind::UnexpectedEnd));
        };
        match ch {
            '\\' | '|' | '*' | '+' | '?' | '{' | '}' | '(' | ')' | '[' | ']' | '.' | '^' | '-'
            | '$' => Ok(ch),
            'n' => Ok('\n'),
            't' => Ok('\t'),
            'r' => Ok('\r'),
            _ => Err(AutomatonError::syntax(start, SyntaxErrorKind::UnknownEscape(ch))),
        }
    }

    /// `[...]` after the opening bracket at `start`.
    fn class(&mut self, start: usize) -> Result<AstKind> {
        let negated = self.eat('^');
        let mut ranges = Vec::new();
        loop {
            let item_start = self.position;
            let lo = match self.next() {
                None => return Err(AutomatonError::syntax(start, SyntaxErrorKind::UnclosedClass)),
                Some(']') if ranges.is_empty() => {
                    return Err(AutomatonError::syntax(start, SyntaxErrorKind::EmptyClass));
                }
                Some(']') => break,
                Some('\\') => self.escape(item_start)?,
                Some(ch) => ch,
            };

            let mut lookahead = self.chars.clone();
            let is_range = lookahead.next() == Some('-') && lookahead.next().is_some_and(|c| c != ']');
            if !is_range {
                ranges.push(CharRange::single(lo));
                continue;
            }

            self.next();
            let hi_start = self.position;
            let hi = match self.next() {
                Some('\\') => self.escape(hi_start)?,
                Some(ch) => ch,
                None => return Err(AutomatonError::syntax(start, SyntaxErrorKind::UnclosedClass)),
            };
            match CharRange::new(lo, hi) {
                Some(range) => ranges.push(range),
                None => {
                    return Err(AutomatonError::syntax(
                        item_start,
                        SyntaxErrorKind::InvalidRange { lo, hi },
                    ));
                }
            }
        }
        symbol::normalize(&mut ranges);
        Ok(AstKind::Class { negated, ranges })
    }

    /// `{m}`, `{m,}` or `{m,n}`, starting at the opening brace.
    fn bounds(&mut self) -> Result<(u32, Option<u32>)> {
        let start = self.position;
        self.next();
        let invalid = AutomatonError::syntax(start, SyntaxErrorKind::InvalidRepetition);

        let min = self.number()?.ok_or_else(|| invalid.clone())?;
        let max = if self.eat(',') {
            self.number()?
        } else {
            Some(min)
        };
        match self.next() {
            Some('}') => {}
            Some(_) => return Err(invalid),
            None => return Err(self.error(SyntaxErrorKind::UnexpectedEnd)),
        }
        if max.is_some_and(|max| max < min) {
            return Err(invalid);
        }
        Ok((min, max))
    }

    /// A decimal count, or `None` if no digit follows.
    fn number(&mut self) -> Result<Option<u32>> {
        let start = self.position;
        let mut value: Option<u32> = None;
        while let Some(digit) = self.chars.peek().and_then(|c| c.to_digit(10)) {
            self.next();
            let next = value.unwrap_or(0) * 10 + digit;
            if next > REPEAT_LIMIT {
                return Err(AutomatonError::syntax(start, SyntaxErrorKind::InvalidRepetition));
            }
            value = Some(next);
        }
        Ok(value)
    }
}

/// Split parsed children from their depths, keeping the deepest.
fn unzip_deepest(children: Vec<(Ast, u32)>) -> (Vec<Ast>, u32) {
    let depth = children.iter().map(|(_, depth)| *depth).max().unwrap_or(0);
    (children.into_iter().map(|(ast, _)| ast).collect(), depth)
}

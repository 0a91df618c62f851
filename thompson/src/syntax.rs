use crate::parser::{ParseError, ParseResult};

use std::fmt;

/// The closed set of token classes. A token is classified once, when it is read, and every later
/// stage dispatches on this.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Literal,
    /// Alternation, written `+` or `|`.
    Union,
    /// Concatenation, implicit in user input.
    Concat,
    /// Kleene star, a postfix unary operator.
    Closure,
    Open,
    Close,
}

impl TokenKind {
    /// Binding strength of an operator, highest first: closure, concatenation, union. Literals and
    /// group delimiters have none.
    #[inline]
    pub fn precedence(self) -> Option<u8> {
        match self {
            TokenKind::Closure => Some(3),
            TokenKind::Concat => Some(2),
            TokenKind::Union => Some(1),
            _ => None,
        }
    }

    /// Number of fragments the operator consumes during construction.
    #[inline]
    pub fn arity(self) -> usize {
        match self {
            TokenKind::Union | TokenKind::Concat => 2,
            TokenKind::Closure => 1,
            _ => 0,
        }
    }
}

/// A classified character together with its position in the string it was read from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Token {
    pub kind: TokenKind,
    /// The character as written. For an inserted concatenation this is the configured marker.
    pub ch: char,
    /// Character index in the source string. An inserted concatenation takes the index of the
    /// token that follows it.
    pub index: usize,
}

impl Token {
    #[inline]
    pub const fn new(kind: TokenKind, ch: char, index: usize) -> Self {
        Self { kind, ch, index }
    }

    /// Whether an operand may end with this token: a literal, a closed group or a closure.
    #[inline]
    pub fn ends_operand(&self) -> bool {
        matches!(
            self.kind,
            TokenKind::Literal | TokenKind::Close | TokenKind::Closure
        )
    }

    /// Whether an operand may begin with this token: a literal or an opened group.
    #[inline]
    pub fn begins_operand(&self) -> bool {
        matches!(self.kind, TokenKind::Literal | TokenKind::Open)
    }
}

impl fmt::Display for Token {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.ch)
    }
}

/// Write a token sequence back out as a string.
#[inline]
pub fn render(tokens: &[Token]) -> String {
    tokens.iter().map(|t| t.ch).collect()
}

/// The reserved characters of the expression language.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Syntax {
    union: Vec<char>,
    closure: char,
    open: char,
    close: char,
    concat_marker: char,
}

impl Syntax {
    #[inline]
    pub fn new() -> Self {
        Self {
            union: vec!['+', '|'],
            closure: '*',
            open: '(',
            close: ')',
            concat_marker: '?',
        }
    }

    /// Characters that denote alternation.
    #[inline]
    pub fn union_symbols<I>(mut self, symbols: I) -> Self
    where
        I: IntoIterator<Item = char>,
    {
        self.union = symbols.into_iter().collect();
        self
    }

    #[inline]
    pub fn closure(mut self, symbol: char) -> Self {
        self.closure = symbol;
        self
    }

    #[inline]
    pub fn groups(mut self, open: char, close: char) -> Self {
        self.open = open;
        self.close = close;
        self
    }

    /// The character written for concatenation in normalized and postfix strings. A raw
    /// expression may not contain it.
    #[inline]
    pub fn concat_marker(mut self, marker: char) -> Self {
        self.concat_marker = marker;
        self
    }

    #[inline]
    pub fn concat(&self, index: usize) -> Token {
        Token::new(TokenKind::Concat, self.concat_marker, index)
    }

    #[inline]
    fn classify(&self, c: char, marked: bool) -> TokenKind {
        if marked && c == self.concat_marker {
            TokenKind::Concat
        } else if self.union.contains(&c) {
            TokenKind::Union
        } else if c == self.closure {
            TokenKind::Closure
        } else if c == self.open {
            TokenKind::Open
        } else if c == self.close {
            TokenKind::Close
        } else {
            TokenKind::Literal
        }
    }

    #[inline]
    fn read(&self, expr: &str, marked: bool) -> Vec<Token> {
        expr.chars()
            .enumerate()
            .map(|(i, c)| Token::new(self.classify(c, marked), c, i))
            .collect()
    }

    /// Read a raw user expression. Concatenation is implicit here, so the concatenation marker is
    /// rejected wherever it appears.
    pub fn tokenize(&self, expr: &str) -> ParseResult<Vec<Token>> {
        match expr.chars().position(|c| c == self.concat_marker) {
            Some(index) => Err(ParseError::ReservedMarker {
                marker: self.concat_marker,
                index,
            }),
            None => Ok(self.read(expr, false)),
        }
    }

    /// Read a normalized or postfix string, where the concatenation marker is an operator.
    #[inline]
    pub fn tokenize_marked(&self, expr: &str) -> Vec<Token> {
        self.read(expr, true)
    }
}

impl Default for Syntax {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(tokens: &[Token]) -> Vec<TokenKind> {
        tokens.iter().map(|t| t.kind).collect()
    }

    #[test]
    fn test_tokenize() {
        use TokenKind::*;

        let syntax = Syntax::new();
        let tokens = syntax.tokenize("a(b|c)*+d").unwrap();
        assert_eq!(
            vec![Literal, Open, Literal, Union, Literal, Close, Closure, Union, Literal],
            kinds(&tokens)
        );
        assert_eq!(8, tokens[8].index);
        assert_eq!("a(b|c)*+d", render(&tokens));
    }

    #[test]
    fn test_tokenize_rejects_marker() {
        let syntax = Syntax::new();
        assert_eq!(
            Err(ParseError::ReservedMarker {
                marker: '?',
                index: 1
            }),
            syntax.tokenize("a?b")
        );

        let syntax = Syntax::new().concat_marker('.');
        assert_eq!(
            Err(ParseError::ReservedMarker {
                marker: '.',
                index: 0
            }),
            syntax.tokenize(".")
        );
        assert_eq!(Ok(TokenKind::Literal), syntax.tokenize("a?b").map(|t| t[1].kind));
    }

    #[test]
    fn test_tokenize_marked() {
        let syntax = Syntax::new();
        let tokens = syntax.tokenize_marked("a?b");
        assert_eq!(TokenKind::Concat, tokens[1].kind);
    }

    #[test]
    fn test_custom_syntax() {
        let syntax = Syntax::new()
            .union_symbols(vec!['/'])
            .closure('^')
            .groups('[', ']')
            .concat_marker('.');

        let tokens = syntax.tokenize_marked("[a/b]^.+");
        assert_eq!(
            vec![
                TokenKind::Open,
                TokenKind::Literal,
                TokenKind::Union,
                TokenKind::Literal,
                TokenKind::Close,
                TokenKind::Closure,
                TokenKind::Concat,
                TokenKind::Literal,
            ],
            kinds(&tokens)
        );
    }

    #[test]
    fn test_precedence() {
        assert!(TokenKind::Closure.precedence() > TokenKind::Concat.precedence());
        assert!(TokenKind::Concat.precedence() > TokenKind::Union.precedence());
        assert_eq!(None, TokenKind::Open.precedence());
    }
}

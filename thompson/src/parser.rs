use crate::syntax::{Syntax, Token, TokenKind};

use log::debug;

/// Alias for [`Result`] for [`ParseError`].
pub type ParseResult<T> = std::result::Result<T, ParseError>;

/// Error returned when an expression cannot be compiled. Indices are character positions in the
/// string handed to the failing stage.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    /// A closing delimiter with no opening delimiter before it.
    #[error("unmatched closing delimiter at index {index}")]
    UnmatchedClose { index: usize },
    /// An opening delimiter that is never closed.
    #[error("unmatched opening delimiter at index {index}")]
    UnmatchedOpen { index: usize },
    /// The concatenation marker written in a raw expression, where it would be indistinguishable
    /// from an inserted concatenation once normalized.
    #[error("concatenation marker '{marker}' at index {index} is reserved")]
    ReservedMarker { marker: char, index: usize },

    /// An operator found fewer fragments than its arity requires.
    #[error("operator '{operator}' at index {index} expects {expected} operand(s), found {found}")]
    MissingOperand {
        operator: char,
        index: usize,
        expected: usize,
        found: usize,
    },
    /// An operator was handed a fragment that was already composed into another one.
    #[error("operator '{operator}' at index {index} was given a closed fragment")]
    ClosedFragment { operator: char, index: usize },
    /// More than one fragment remained after construction; there are operands without an operator
    /// joining them.
    #[error("{count} fragments remain after construction")]
    LeftoverFragments { count: usize },
    #[error("empty regular expression")]
    EmptyExpression,
}

impl ParseError {
    /// Position of the offending token, where there is one.
    #[inline]
    pub fn index(&self) -> Option<usize> {
        match *self {
            ParseError::UnmatchedClose { index }
            | ParseError::UnmatchedOpen { index }
            | ParseError::ReservedMarker { index, .. }
            | ParseError::MissingOperand { index, .. }
            | ParseError::ClosedFragment { index, .. } => Some(index),
            ParseError::LeftoverFragments { .. } | ParseError::EmptyExpression => None,
        }
    }
}

/// Make concatenation explicit: a concatenation token goes between two adjacent tokens exactly
/// when the first can end an operand and the second can begin one.
///
/// Parenthesis balance is not checked here.
pub fn normalize(tokens: &[Token], syntax: &Syntax) -> Vec<Token> {
    let mut normalized = Vec::with_capacity(tokens.len() * 2);

    for (i, token) in tokens.iter().enumerate() {
        normalized.push(*token);

        if let Some(next) = tokens.get(i + 1) {
            if token.ends_operand() && next.begins_operand() {
                normalized.push(syntax.concat(next.index));
            }
        }
    }

    normalized
}

/// Whether `top`, sitting on the operator stack, is emitted before `incoming` is pushed. Equal
/// operators pop, which makes the binary operators left-associative.
#[inline]
fn pops_before(top: TokenKind, incoming: TokenKind) -> bool {
    top == incoming || top.precedence() > incoming.precedence()
}

/// Convert a normalized infix token sequence into postfix order with the shunting-yard algorithm.
/// Delimiters never appear in the output.
pub fn to_postfix(normalized: &[Token]) -> ParseResult<Vec<Token>> {
    let mut operators: Vec<Token> = Vec::new();
    let mut output = Vec::with_capacity(normalized.len());

    for &token in normalized {
        match token.kind {
            TokenKind::Literal => output.push(token),
            TokenKind::Open => operators.push(token),
            TokenKind::Close => loop {
                match operators.pop() {
                    Some(top) if top.kind == TokenKind::Open => break,
                    Some(top) => output.push(top),
                    None => return Err(ParseError::UnmatchedClose { index: token.index }),
                }
            },
            TokenKind::Union | TokenKind::Concat | TokenKind::Closure => {
                while let Some(&top) = operators.last() {
                    if top.kind == TokenKind::Open || !pops_before(top.kind, token.kind) {
                        break;
                    }
                    output.push(top);
                    operators.pop();
                }
                operators.push(token);
            }
        }
    }

    while let Some(top) = operators.pop() {
        if top.kind == TokenKind::Open {
            return Err(ParseError::UnmatchedOpen { index: top.index });
        }
        output.push(top);
    }

    debug!("converted {} infix tokens to {} postfix tokens", normalized.len(), output.len());
    Ok(output)
}

use crate::parser::{ParseError, ParseResult};
use crate::syntax::{Token, TokenKind};

use automata::{Builder, Fragment, NFA};
use log::debug;

/// Assemble an epsilon-NFA from a postfix token sequence with Thompson's construction.
///
/// Every stack entry is a [`Fragment`] carrying its own start and end state, so a composition
/// never has to search the graph for where a sub-automaton ends. Exactly one fragment must remain
/// once the sequence is consumed; its start state is the root of the returned automaton, which is
/// left unlabeled.
pub fn build(postfix: &[Token]) -> ParseResult<NFA<char>> {
    let mut builder = Builder::new();
    let mut stack: Vec<Fragment> = Vec::new();

    for token in postfix {
        let found = stack.len();
        let missing = || ParseError::MissingOperand {
            operator: token.ch,
            index: token.index,
            expected: token.kind.arity(),
            found,
        };
        let closed = || ParseError::ClosedFragment {
            operator: token.ch,
            index: token.index,
        };

        let fragment = match token.kind {
            TokenKind::Literal => builder.literal(token.ch),
            TokenKind::Union => {
                let c2 = stack.pop().ok_or_else(missing)?;
                let c1 = stack.pop().ok_or_else(missing)?;
                builder.union(c1, c2).ok_or_else(closed)?
            }
            TokenKind::Concat => {
                let c2 = stack.pop().ok_or_else(missing)?;
                let c1 = stack.pop().ok_or_else(missing)?;
                builder.concatenation(c1, c2).ok_or_else(closed)?
            }
            TokenKind::Closure => {
                let c1 = stack.pop().ok_or_else(missing)?;
                builder.kleene_star(c1).ok_or_else(closed)?
            }
            // Delimiters are consumed by the postfix conversion; one here was never matched.
            TokenKind::Open => return Err(ParseError::UnmatchedOpen { index: token.index }),
            TokenKind::Close => return Err(ParseError::UnmatchedClose { index: token.index }),
        };

        stack.push(fragment);
    }

    let root = match stack.len() {
        0 => return Err(ParseError::EmptyExpression),
        1 => stack.pop().ok_or(ParseError::EmptyExpression)?,
        count => return Err(ParseError::LeftoverFragments { count }),
    };

    debug!(
        "built {} states from {} postfix tokens",
        builder.total_states(),
        postfix.len()
    );
    Ok(builder.finish(root))
}

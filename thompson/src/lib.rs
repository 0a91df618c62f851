#![deny(rust_2018_idioms)]
#![deny(future_incompatible)]

mod construct;
mod regexp;

pub mod parser;
pub mod syntax;

pub use automata;
pub use parser::{ParseError, ParseResult};
pub use regexp::*;
pub use syntax::{Syntax, Token, TokenKind};

#![deny(rust_2018_idioms)]
#![deny(future_incompatible)]

pub mod nfa;
pub mod table;

pub use nfa::{Builder, Fragment, StateId, NFA};
pub use table::{Markers, TransitionTable};

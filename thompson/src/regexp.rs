use crate::construct;
use crate::parser::{self, ParseResult};
use crate::syntax::{render, Syntax, Token};

use automata::{Markers, TransitionTable, NFA};
use log::debug;

/// The automaton produced for an expression: an epsilon-NFA over characters.
pub type Automaton = NFA<char>;

/// Runs the pipeline `normalize -> to_postfix -> build -> label` under a given [`Syntax`], and
/// tabulates the results with a given set of [`Markers`].
#[derive(Clone, Debug, Default)]
pub struct Compiler {
    syntax: Syntax,
    markers: Markers,
}

impl Compiler {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn syntax(mut self, syntax: Syntax) -> Self {
        self.syntax = syntax;
        self
    }

    #[inline]
    pub fn markers(mut self, markers: Markers) -> Self {
        self.markers = markers;
        self
    }

    #[inline]
    pub fn get_syntax(&self) -> &Syntax {
        &self.syntax
    }

    #[inline]
    pub fn normalize_tokens(&self, tokens: &[Token]) -> Vec<Token> {
        parser::normalize(tokens, &self.syntax)
    }

    #[inline]
    pub fn postfix_tokens(&self, normalized: &[Token]) -> ParseResult<Vec<Token>> {
        parser::to_postfix(normalized)
    }

    #[inline]
    pub fn build_tokens(&self, postfix: &[Token]) -> ParseResult<Automaton> {
        construct::build(postfix)
    }

    /// Insert the concatenation marker into a raw expression, e.g. `a(a+b)*b` becomes
    /// `a?(a+b)*?b`. Fails if the expression already contains the marker.
    #[inline]
    pub fn normalize(&self, expr: &str) -> ParseResult<String> {
        let tokens = self.syntax.tokenize(expr)?;
        Ok(render(&self.normalize_tokens(&tokens)))
    }

    /// Convert a normalized expression to postfix, e.g. `a?(a+b)*?b` becomes `aab+*?b?`.
    #[inline]
    pub fn to_postfix(&self, normalized: &str) -> ParseResult<String> {
        let tokens = self.syntax.tokenize_marked(normalized);
        self.postfix_tokens(&tokens).map(|postfix| render(&postfix))
    }

    /// Build the unlabeled automaton for a postfix expression.
    #[inline]
    pub fn build(&self, postfix: &str) -> ParseResult<Automaton> {
        self.build_tokens(&self.syntax.tokenize_marked(postfix))
    }

    /// Compile a raw expression into a labeled automaton.
    pub fn compile(&self, expr: &str) -> ParseResult<Automaton> {
        self.compile_stages(expr).map(|r| r.automaton)
    }

    /// Compile a raw expression, keeping the intermediate forms.
    pub fn compile_stages(&self, expr: &str) -> ParseResult<RegExp> {
        let tokens = self.syntax.tokenize(expr)?;
        let normalized = self.normalize_tokens(&tokens);
        let postfix = self.postfix_tokens(&normalized)?;
        debug!(
            "compiling {:?}: normalized {:?}, postfix {:?}",
            expr,
            render(&normalized),
            render(&postfix)
        );

        let mut automaton = self.build_tokens(&postfix)?;
        automaton.assign_labels();

        Ok(RegExp {
            expr: expr.to_owned(),
            normalized: render(&normalized),
            postfix: render(&postfix),
            automaton,
        })
    }

    /// The transition table of an automaton, decorated with this compiler's markers.
    #[inline]
    pub fn tabulate(&self, automaton: &Automaton) -> TransitionTable {
        TransitionTable::extract(automaton, &self.markers)
    }
}

/// A compiled regular expression along with the intermediate forms it went through.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RegExp {
    /// The regular expression represented by this structure.
    expr: String,
    normalized: String,
    postfix: String,
    automaton: Automaton,
}

impl RegExp {
    /// Compile with the default [`Compiler`].
    #[inline]
    pub fn new(expr: &str) -> ParseResult<Self> {
        Compiler::new().compile_stages(expr)
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.expr
    }

    #[inline]
    pub fn normalized(&self) -> &str {
        &self.normalized
    }

    #[inline]
    pub fn postfix(&self) -> &str {
        &self.postfix
    }

    #[inline]
    pub fn automaton(&self) -> &Automaton {
        &self.automaton
    }

    /// The transition table with the default markers.
    #[inline]
    pub fn table(&self) -> TransitionTable {
        tabulate(&self.automaton)
    }
}

/// Insert explicit concatenation into a raw expression. See [`Compiler::normalize`].
#[inline]
pub fn normalize(expr: &str) -> ParseResult<String> {
    Compiler::new().normalize(expr)
}

/// Convert a normalized expression to postfix. See [`Compiler::to_postfix`].
#[inline]
pub fn to_postfix(normalized: &str) -> ParseResult<String> {
    Compiler::new().to_postfix(normalized)
}

/// Build the unlabeled automaton of a postfix expression. See [`Compiler::build`].
#[inline]
pub fn build(postfix: &str) -> ParseResult<Automaton> {
    Compiler::new().build(postfix)
}

/// Compile a raw expression into a labeled automaton. See [`Compiler::compile`].
#[inline]
pub fn compile(expr: &str) -> ParseResult<Automaton> {
    Compiler::new().compile(expr)
}

/// The transition table of an automaton. See [`Compiler::tabulate`].
#[inline]
pub fn tabulate(automaton: &Automaton) -> TransitionTable {
    Compiler::new().tabulate(automaton)
}

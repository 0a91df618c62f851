use thompson::{compile, normalize, to_postfix, Compiler, ParseError, RegExp, Syntax};

include!("macros.rs");

#[test]
fn test_concat() {
    let cases = [
        ("ab", "a?b", "ab?"),
        ("abc", "a?b?c", "ab?c?"),
        ("(ab)", "(a?b)", "ab?"),
        ("a(b)", "a?(b)", "ab?"),
        ("(a)b", "(a)?b", "ab?"),
        ("(a)(b)", "(a)?(b)", "ab?"),
        ("((a))b", "((a))?b", "ab?"),
    ];
    run_tests!(&cases);
}

#[test]
fn test_marker_is_reserved_in_raw_expression() {
    let err = ParseError::ReservedMarker {
        marker: '?',
        index: 1,
    };
    assert_eq!(Err(err.clone()), normalize("a?b"));
    assert_eq!(Err(err), compile("a?b"));
    assert_eq!(
        Err(ParseError::ReservedMarker {
            marker: '?',
            index: 3
        }),
        RegExp::new("(a)?").map(|re| re.postfix().to_owned())
    );
}

#[test]
fn test_question_mark_with_other_marker() {
    let compiler = Compiler::new().syntax(Syntax::new().concat_marker('.'));
    assert_eq!(Ok("a.?.b".to_owned()), compiler.normalize("a?b"));

    let nfa = compiler.compile("a?b").unwrap();
    assert_eq!(6, nfa.total_states());
    assert_eq!(
        vec!["?", "a", "b", "ε"],
        compiler.tabulate(&nfa).header().to_vec()
    );
}

use thompson::{normalize, to_postfix, RegExp};

include!("macros.rs");

#[test]
fn test_union() {
    let cases = [
        ("a|b", "a|b", "ab|"),
        ("a+b", "a+b", "ab+"),
        ("a|b|c", "a|b|c", "ab|c|"),
        ("a+b|c", "a+b|c", "ab+c|"),
        ("a|(b|c)", "a|(b|c)", "abc||"),
        ("(a)|b", "(a)|b", "ab|"),
    ];
    run_tests!(&cases);
}

#[test]
fn test_union_binds_loosest() {
    let cases = [("a|bc", "a|b?c", "abc?|"), ("ab|c", "a?b|c", "ab?c|")];
    run_tests!(&cases);
}

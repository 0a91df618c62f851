#[allow(unused_macros)]

macro_rules! run_tests {
    ($cases:expr) => {{
        $cases.iter().for_each(|&(expr, normalized, postfix)| {
            assert_eq!(
                normalize(expr).as_deref(),
                Ok(normalized),
                r#"normalizing "{}""#,
                expr
            );
            assert_eq!(
                to_postfix(normalized).as_deref(),
                Ok(postfix),
                r#"converting "{}""#,
                normalized
            );

            let re = RegExp::new(expr).unwrap();
            assert_eq!(re.normalized(), normalized);
            assert_eq!(re.postfix(), postfix);
            assert_eq!(
                re.automaton().accepting_states(),
                vec![re.automaton().accepting_state],
                r#""{}" has more than one accepting state"#,
                expr
            );
        })
    }};
}

#[allow(unused_macros)]
macro_rules! run_invalid_tests {
    ($cases:expr) => {{
        $cases.iter().for_each(|&(expr, ref err)| {
            assert_eq!(&compile(expr).unwrap_err(), err, r#"compiling "{}""#, expr);
        })
    }};
}

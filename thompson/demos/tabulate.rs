/// Tiny program that takes in a regular expression, prints each stage of its compilation and the
/// transition table of the resulting automaton. Exits with a non-zero status code if the
/// expression is malformed.
use std::env;
use std::process;

use thompson::RegExp;

const DEFAULT_EXPR: &str = "a(a+b)*b";

fn main() {
    env_logger::init();

    let expr = env::args().nth(1).unwrap_or_else(|| DEFAULT_EXPR.to_owned());

    let regexp = match RegExp::new(&expr) {
        Ok(regexp) => regexp,
        Err(e) => {
            eprintln!("{}: {}", expr, e);
            process::exit(1);
        }
    };

    println!("regular expression:    {}", regexp.as_str());
    println!("normalized expression: {}", regexp.normalized());
    println!("postfix expression:    {}", regexp.postfix());
    println!();
    print!("{}", regexp.table());
}

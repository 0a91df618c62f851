use automata::nfa::{Edge, Transition};
use automata::{Builder, Markers, TransitionTable, NFA};

fn targets(nfa: &NFA<char>, state: automata::StateId) -> Vec<automata::StateId> {
    nfa.transitions_from(state).iter().map(|e| e.target).collect()
}

#[test]
fn test_add_state() {
    let mut b: Builder<bool> = Builder::new();
    assert_eq!(0, b.total_states());

    let s = b.add_state();
    assert_eq!(1, b.total_states());
    assert_eq!(b.total_states() - 1, s.index());
}

#[test]
fn test_union() {
    let mut b = Builder::new();
    let c1 = b.literal('a');
    let c2 = b.literal('b');
    let union = b.union(c1, c2).unwrap();
    let nfa = b.finish(union);

    assert_eq!(6, nfa.total_states());
    assert_eq!(vec![c1.start, c2.start], targets(&nfa, union.start));
    assert_eq!(vec![union.end], targets(&nfa, c1.end));
    assert_eq!(vec![union.end], targets(&nfa, c2.end));
    assert_eq!(vec![union.end], nfa.accepting_states());
}

#[test]
fn test_concatenation() {
    let mut b = Builder::new();
    let c1 = b.literal('a');
    let c2 = b.literal('b');
    let concat = b.concatenation(c1, c2).unwrap();
    let nfa = b.finish(concat);

    assert_eq!(4, nfa.total_states());
    assert_eq!(c1.start, concat.start);
    assert_eq!(c2.end, concat.end);
    assert_eq!(
        &[Edge {
            transition: Transition::Epsilon,
            target: c2.start
        }],
        nfa.transitions_from(c1.end)
    );
}

#[test]
fn test_kleene_star() {
    let mut b = Builder::new();
    let c1 = b.literal('a');
    let star = b.kleene_star(c1).unwrap();
    let nfa = b.finish(star);

    assert_eq!(4, nfa.total_states());
    assert_eq!(vec![c1.start, star.end], targets(&nfa, star.start));
    assert_eq!(vec![c1.start, star.end], targets(&nfa, c1.end));
    assert_eq!(vec![star.end], nfa.accepting_states());
}

#[test]
fn test_end_tracking_through_nested_union() {
    // (a|b)c: the union's start has two edges, so following first edges from the start would
    // never find the end of the concatenation. The fragment knows it.
    let mut b = Builder::new();
    let a = b.literal('a');
    let bb = b.literal('b');
    let union = b.union(a, bb).unwrap();
    let c = b.literal('c');
    let concat = b.concatenation(union, c).unwrap();
    let nfa = b.finish(concat);

    assert_eq!(c.end, nfa.accepting_state);
    assert_eq!(vec![c.end], nfa.accepting_states());
    assert_eq!(vec![c.start], targets(&nfa, union.end));
}

#[test]
fn test_labels_and_table_agree() {
    let mut b = Builder::new();
    let a = b.literal('a');
    let star = b.kleene_star(a).unwrap();
    let mut nfa = b.finish(star);
    nfa.assign_labels();

    let table = TransitionTable::extract(&nfa, &Markers::default());
    let labels: Vec<_> = nfa.bfs().map(|s| nfa.label(s).unwrap().to_owned()).collect();
    let rows: Vec<_> = table.rows().iter().map(|r| r.label.clone()).collect();
    assert_eq!(labels, rows);
    assert_eq!(vec!["q0", "q1", "q2", "q3"], rows);
    assert_eq!(Some(&["q1".to_owned(), "q2".to_owned()][..]), table.cell(0, "ε"));
}

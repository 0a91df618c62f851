use std::collections::VecDeque;
use std::fmt;

use log::trace;

/// Prefix of the labels handed out by [`NFA::assign_labels`].
pub const LABEL_PREFIX: &str = "q";

/// Identity of a state: its index in the arena that allocated it. Copying a `StateId` never copies
/// the state, so fragments may freely alias shared sub-structure and cycles need no ownership.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct StateId(usize);

impl StateId {
    #[inline]
    pub const fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for StateId {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "s{}", self.0)
    }
}

/// The label of an edge between states in an NFA.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub enum Transition<T> {
    /// A transition on some input symbol.
    Some(T),
    /// An epsilon transition allows the NFA to change its state spontaneously without consuming an
    /// input symbol.
    Epsilon,
}

/// An outgoing edge of a state.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Edge<T> {
    pub transition: Transition<T>,
    pub target: StateId,
}

/// A single node of the automaton. Edges are kept in the order they were added.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct State<T> {
    label: Option<String>,
    edges: Vec<Edge<T>>,
}

impl<T> State<T> {
    #[inline]
    fn new() -> Self {
        Self {
            label: None,
            edges: Vec::new(),
        }
    }

    /// The label assigned by [`NFA::assign_labels`], if labeling has run.
    #[inline]
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    #[inline]
    pub fn edges(&self) -> &[Edge<T>] {
        &self.edges
    }

    /// A state with no outgoing edges is accepting.
    #[inline]
    pub fn is_accepting(&self) -> bool {
        self.edges.is_empty()
    }
}

/// A sub-automaton under construction. `end` never has outgoing edges at the time the fragment is
/// produced by a [`Builder`] operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Fragment {
    pub start: StateId,
    pub end: StateId,
}

/// Allocates states and composes [`Fragment`]s with Thompson's construction. All fragments built by
/// the same builder share its arena.
#[derive(Clone, Debug)]
pub struct Builder<T> {
    states: Vec<State<T>>,
}

impl<T> Builder<T>
where
    T: Clone,
{
    #[allow(clippy::new_without_default)]
    #[inline]
    pub fn new() -> Self {
        Self { states: Vec::new() }
    }

    /// Add a state to the arena. The total number of states is always greater than the index of
    /// the newest state by 1.
    #[inline]
    pub fn add_state(&mut self) -> StateId {
        let id = StateId(self.states.len());
        self.states.push(State::new());
        id
    }

    #[inline]
    pub fn total_states(&self) -> usize {
        self.states.len()
    }

    /// Add a transition. Returns None if one or more of the states does not exist.
    #[inline]
    pub fn add_transition(
        &mut self,
        start: StateId,
        end: StateId,
        transition: Transition<T>,
    ) -> Option<()> {
        if start.0 >= self.states.len() || end.0 >= self.states.len() {
            None
        } else {
            self.push_edge(start, end, transition);
            Some(())
        }
    }

    /// Add a non-epsilon transition. See [`Self::add_transition`].
    #[inline]
    pub fn add_labeled_transition(&mut self, start: StateId, end: StateId, label: T) -> Option<()> {
        self.add_transition(start, end, Transition::Some(label))
    }

    /// Add an epsilon transition. See [`Self::add_transition`].
    #[inline]
    pub fn add_epsilon_transition(&mut self, start: StateId, end: StateId) -> Option<()> {
        self.add_transition(start, end, Transition::Epsilon)
    }

    #[inline]
    fn push_edge(&mut self, start: StateId, end: StateId, transition: Transition<T>) {
        self.states[start.0].edges.push(Edge {
            transition,
            target: end,
        });
    }

    /// A state of this arena with no outgoing edges yet, i.e. the end of a fragment that has not
    /// been composed.
    #[inline]
    fn is_open_end(&self, id: StateId) -> bool {
        self.states.get(id.0).map_or(false, |s| s.edges.is_empty())
    }

    /// Whether `fragment` can still be composed: both states belong to this arena and the end is
    /// still open.
    #[inline]
    fn is_open(&self, fragment: Fragment) -> bool {
        fragment.start.0 < self.states.len() && self.is_open_end(fragment.end)
    }

    /// Construct a fragment of two fresh states joined by a transition on `symbol`.
    #[inline]
    pub fn literal(&mut self, symbol: T) -> Fragment {
        let start = self.add_state();
        let end = self.add_state();
        self.push_edge(start, end, Transition::Some(symbol));

        trace!("literal {} -> {}", start, end);
        Fragment { start, end }
    }

    /// Construct the union of two fragments. There are epsilon transitions from a fresh start
    /// state to the start states of the operands, and from the end states of the operands to a
    /// fresh end state.
    ///
    /// Returns None if either operand is not an open fragment of this builder, or if both share
    /// an end state.
    #[inline]
    pub fn union(&mut self, c1: Fragment, c2: Fragment) -> Option<Fragment> {
        if !self.is_open(c1) || !self.is_open(c2) || c1.end == c2.end {
            return None;
        }

        let start = self.add_state();
        let end = self.add_state();

        self.push_edge(start, c1.start, Transition::Epsilon);
        self.push_edge(start, c2.start, Transition::Epsilon);
        self.push_edge(c1.end, end, Transition::Epsilon);
        self.push_edge(c2.end, end, Transition::Epsilon);

        trace!("union {} -> {}", start, end);
        Some(Fragment { start, end })
    }

    /// Construct the concatenation of two fragments. The start state of the preceding fragment
    /// becomes the start state of the new fragment and the end state of the following fragment
    /// becomes its end state. An epsilon transition joins the two.
    ///
    /// Returns None under the same conditions as [`Self::union`].
    #[inline]
    pub fn concatenation(&mut self, c1: Fragment, c2: Fragment) -> Option<Fragment> {
        if !self.is_open(c1) || !self.is_open(c2) || c1.end == c2.end {
            return None;
        }

        self.push_edge(c1.end, c2.start, Transition::Epsilon);

        trace!("concatenation {} -> {}", c1.start, c2.end);
        Some(Fragment {
            start: c1.start,
            end: c2.end,
        })
    }

    /// Construct the kleene star of a fragment: zero repetitions skip straight to the fresh end
    /// state, and the operand's end state may loop back to its start.
    ///
    /// Returns None if the operand is not an open fragment of this builder.
    #[inline]
    pub fn kleene_star(&mut self, c1: Fragment) -> Option<Fragment> {
        if !self.is_open(c1) {
            return None;
        }

        let start = self.add_state();
        let end = self.add_state();

        self.push_edge(start, c1.start, Transition::Epsilon);
        self.push_edge(start, end, Transition::Epsilon);
        self.push_edge(c1.end, c1.start, Transition::Epsilon);
        self.push_edge(c1.end, end, Transition::Epsilon);

        trace!("kleene star {} -> {}", start, end);
        Some(Fragment { start, end })
    }

    /// Close the arena over the final fragment. Its start becomes the root of the automaton.
    #[inline]
    pub fn finish(self, fragment: Fragment) -> NFA<T> {
        NFA {
            start_state: fragment.start,
            accepting_state: fragment.end,
            states: self.states,
        }
    }
}

/// A non-deterministic finite automaton with epsilon transitions, stored as an arena of states.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NFA<T> {
    /// An NFA has a single start state.
    pub start_state: StateId,
    /// The end state of the fragment the automaton was finished from.
    pub accepting_state: StateId,
    states: Vec<State<T>>,
}

impl<T> NFA<T> {
    #[inline]
    pub fn total_states(&self) -> usize {
        self.states.len()
    }

    #[inline]
    pub fn states(&self) -> impl Iterator<Item = (StateId, &State<T>)> + '_ {
        self.states
            .iter()
            .enumerate()
            .map(|(i, state)| (StateId(i), state))
    }

    /// Returns the outgoing edges of a state in the order they were added.
    #[inline]
    pub fn transitions_from(&self, state: StateId) -> &[Edge<T>] {
        self.states
            .get(state.0)
            .map(|s| s.edges.as_slice())
            .unwrap_or(&[])
    }

    #[inline]
    pub fn label(&self, state: StateId) -> Option<&str> {
        self.states.get(state.0).and_then(|s| s.label())
    }

    #[inline]
    pub fn is_accepting_state(&self, state: StateId) -> bool {
        self.states.get(state.0).map_or(false, |s| s.is_accepting())
    }

    /// All reachable states without outgoing edges, in breadth-first order.
    #[inline]
    pub fn accepting_states(&self) -> Vec<StateId> {
        self.bfs().filter(|&s| self.is_accepting_state(s)).collect()
    }

    /// Breadth-first traversal from the start state, following edges in the order they were added.
    /// Every reachable state is yielded exactly once.
    #[inline]
    pub fn bfs(&self) -> Bfs<'_, T> {
        Bfs::new(self)
    }

    /// Label every reachable state `q0, q1, ...` in breadth-first order, so the start state is
    /// always `q0`. States that are not reachable lose any previous label.
    pub fn assign_labels(&mut self) {
        let order: Vec<StateId> = self.bfs().collect();

        for state in self.states.iter_mut() {
            state.label = None;
        }

        for (i, id) in order.iter().enumerate() {
            self.states[id.0].label = Some(format!("{}{}", LABEL_PREFIX, i));
        }
    }

    #[inline]
    pub fn is_labeled(&self) -> bool {
        self.bfs().all(|s| self.label(s).is_some())
    }
}

/// Breadth-first iterator over the reachable states of an [`NFA`]. See [`NFA::bfs`].
#[derive(Debug)]
pub struct Bfs<'a, T> {
    nfa: &'a NFA<T>,
    queue: VecDeque<StateId>,
    visited: Vec<bool>,
}

impl<'a, T> Bfs<'a, T> {
    fn new(nfa: &'a NFA<T>) -> Self {
        let mut visited = vec![false; nfa.states.len()];
        let mut queue = VecDeque::new();

        if let Some(seen) = visited.get_mut(nfa.start_state.0) {
            *seen = true;
            queue.push_back(nfa.start_state);
        }

        Bfs {
            nfa,
            queue,
            visited,
        }
    }
}

impl<'a, T> Iterator for Bfs<'a, T> {
    type Item = StateId;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.queue.pop_front()?;

        for edge in self.nfa.transitions_from(id) {
            // Marked on discovery so a state reached from two parents is queued once.
            if !self.visited[edge.target.0] {
                self.visited[edge.target.0] = true;
                self.queue.push_back(edge.target);
            }
        }

        Some(id)
    }
}

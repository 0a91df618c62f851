use crate::nfa::{StateId, Transition, LABEL_PREFIX, NFA};

use std::fmt;

use im::{OrdMap, OrdSet};
use log::debug;

/// The strings used to decorate a [`TransitionTable`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Markers {
    /// Header of the epsilon column, and the content of an empty cell.
    pub epsilon: String,
    /// Prefix of the start state's row label.
    pub start: String,
    /// Suffix of an accepting state's row label.
    pub accepting: String,
}

impl Markers {
    #[inline]
    pub fn new() -> Self {
        Self {
            epsilon: "ε".to_owned(),
            start: "→".to_owned(),
            accepting: "*".to_owned(),
        }
    }

    #[inline]
    pub fn epsilon(mut self, marker: impl Into<String>) -> Self {
        self.epsilon = marker.into();
        self
    }

    #[inline]
    pub fn start(mut self, marker: impl Into<String>) -> Self {
        self.start = marker.into();
        self
    }

    #[inline]
    pub fn accepting(mut self, marker: impl Into<String>) -> Self {
        self.accepting = marker.into();
        self
    }
}

impl Default for Markers {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

/// A column of the table. Columns sort by their header text; the flag keeps a literal symbol that
/// happens to print like the epsilon marker in a column of its own.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
struct Column {
    text: String,
    epsilon: bool,
}

impl Column {
    #[inline]
    fn of<T: fmt::Display>(transition: &Transition<T>, markers: &Markers) -> Self {
        match transition {
            Transition::Some(symbol) => Column {
                text: symbol.to_string(),
                epsilon: false,
            },
            Transition::Epsilon => Column {
                text: markers.epsilon.clone(),
                epsilon: true,
            },
        }
    }
}

/// One state's row of a [`TransitionTable`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Row {
    /// The bare state label, e.g. `q3`.
    pub label: String,
    /// The label decorated with the start and accepting markers, e.g. `→q0`.
    pub state: String,
    pub start: bool,
    pub accepting: bool,
    /// Target labels per column, in the order the transitions were added. Empty if the state has
    /// no transition on that column's symbol.
    pub cells: Vec<Vec<String>>,
}

/// The transition function of an [`NFA`] as a grid: one column per distinct symbol, one row per
/// reachable state, rows in the same breadth-first order that [`NFA::assign_labels`] uses.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TransitionTable {
    header: Vec<String>,
    rows: Vec<Row>,
    markers: Markers,
}

impl TransitionTable {
    /// Build the table for an automaton. A state without a label is named after its position in
    /// the breadth-first order, which is the label [`NFA::assign_labels`] would give it.
    pub fn extract<T>(nfa: &NFA<T>, markers: &Markers) -> Self
    where
        T: fmt::Display,
    {
        // First pass: the distinct symbols, sorted by their header text.
        let columns: OrdSet<Column> = nfa
            .bfs()
            .flat_map(|s| nfa.transitions_from(s))
            .map(|edge| Column::of(&edge.transition, markers))
            .collect();
        let index: OrdMap<Column, usize> = columns
            .iter()
            .cloned()
            .enumerate()
            .map(|(i, column)| (column, i))
            .collect();

        let mut position = vec![0; nfa.total_states()];
        for (i, s) in nfa.bfs().enumerate() {
            position[s.index()] = i;
        }
        let label_of = |s: StateId| {
            nfa.label(s)
                .map(str::to_owned)
                .unwrap_or_else(|| format!("{}{}", LABEL_PREFIX, position[s.index()]))
        };

        // Second pass: one row per state.
        let rows: Vec<Row> = nfa
            .bfs()
            .map(|s| {
                let mut cells = vec![Vec::new(); columns.len()];
                for edge in nfa.transitions_from(s) {
                    if let Some(&i) = index.get(&Column::of(&edge.transition, markers)) {
                        cells[i].push(label_of(edge.target));
                    }
                }

                let label = label_of(s);
                let start = s == nfa.start_state;
                let accepting = nfa.is_accepting_state(s);
                let state = format!(
                    "{}{}{}",
                    if start { markers.start.as_str() } else { "" },
                    label,
                    if accepting { markers.accepting.as_str() } else { "" },
                );

                Row {
                    label,
                    state,
                    start,
                    accepting,
                    cells,
                }
            })
            .collect();

        debug!(
            "extracted transition table: {} states x {} symbols",
            rows.len(),
            columns.len()
        );

        TransitionTable {
            header: columns.into_iter().map(|c| c.text).collect(),
            rows,
            markers: markers.clone(),
        }
    }

    /// The column headers, without the leading `state` column.
    #[inline]
    pub fn header(&self) -> &[String] {
        &self.header
    }

    #[inline]
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// The target labels in row `row` under the column headed `column`.
    #[inline]
    pub fn cell(&self, row: usize, column: &str) -> Option<&[String]> {
        let col = self.header.iter().position(|h| h == column)?;
        self.rows.get(row).map(|r| r.cells[col].as_slice())
    }

    #[inline]
    fn render_cell(&self, targets: &[String]) -> String {
        if targets.is_empty() {
            self.markers.epsilon.clone()
        } else {
            targets.join(",")
        }
    }

    /// The table as a grid of strings: a header row starting with `state`, then one row per state
    /// starting with its decorated label.
    pub fn to_grid(&self) -> Vec<Vec<String>> {
        let mut grid = Vec::with_capacity(self.rows.len() + 1);

        let mut header = vec!["state".to_owned()];
        header.extend(self.header.iter().cloned());
        grid.push(header);

        for row in &self.rows {
            let mut line = vec![row.state.clone()];
            line.extend(row.cells.iter().map(|c| self.render_cell(c)));
            grid.push(line);
        }

        grid
    }
}

impl fmt::Display for TransitionTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let grid = self.to_grid();

        let mut widths = vec![0; grid[0].len()];
        for line in &grid {
            for (w, cell) in widths.iter_mut().zip(line) {
                *w = (*w).max(cell.chars().count());
            }
        }

        for (n, line) in grid.iter().enumerate() {
            let cells: Vec<String> = line
                .iter()
                .zip(&widths)
                .map(|(cell, &w)| pad(cell, w))
                .collect();
            writeln!(f, "{}", cells.join(" | ").trim_end())?;

            if n == 0 {
                let rule: Vec<String> = widths.iter().map(|&w| "-".repeat(w)).collect();
                writeln!(f, "{}", rule.join("-+-"))?;
            }
        }

        Ok(())
    }
}

// Pads by character count; `{:width$}` would count bytes of the multi-byte markers differently
// than a terminal does.
#[inline]
fn pad(cell: &str, width: usize) -> String {
    let len = cell.chars().count();
    format!("{}{}", cell, " ".repeat(width.saturating_sub(len)))
}

//! The shortest-trace search loop.
//!
//! Traces are grown one cell at a time from the start terminal. Every trace
//! keeps its own history, so two in-flight traces may pass through the same
//! cell. A trace stops growing as soon as its head touches the end
//! terminal; the set of complete traces of minimum length is kept in
//! [`BestPaths`].

use tracer_core::Board;

use crate::storage::{Mode, Storage};
use crate::trace::TraceState;

/// The complete traces sharing the shortest length found so far, in
/// discovery order.
#[derive(Debug, Clone, Default)]
pub struct BestPaths<'a> {
    paths: Vec<TraceState<'a>>,
}

/// What [`BestPaths::offer`] did with a trace.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Offer {
    /// Same length as the current best; appended.
    Tied,
    /// Strictly shorter (or first); replaced every previous path.
    Improved,
    /// Longer than the current best; dropped.
    Discarded,
}

impl<'a> BestPaths<'a> {
    /// An empty collection.
    pub fn new() -> Self {
        Self { paths: Vec::new() }
    }

    /// Consider a complete trace for membership.
    pub fn offer(&mut self, trace: TraceState<'a>) -> Offer {
        match self.path_len() {
            None => {
                self.paths.push(trace);
                Offer::Improved
            }
            Some(best) if trace.len() == best => {
                self.paths.push(trace);
                Offer::Tied
            }
            Some(best) if trace.len() < best => {
                self.paths.clear();
                self.paths.push(trace);
                Offer::Improved
            }
            Some(_) => Offer::Discarded,
        }
    }

    /// Length shared by every member, or `None` when empty.
    pub fn path_len(&self) -> Option<usize> {
        self.paths.first().map(TraceState::len)
    }

    /// Number of paths.
    pub fn len(&self) -> usize {
        self.paths.len()
    }

    /// Whether no route was found.
    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// The `i`-th path in discovery order.
    pub fn get(&self, i: usize) -> Option<&TraceState<'a>> {
        self.paths.get(i)
    }

    /// Iterate in discovery order.
    pub fn iter(&self) -> std::slice::Iter<'_, TraceState<'a>> {
        self.paths.iter()
    }

    /// The paths as a slice.
    pub fn as_slice(&self) -> &[TraceState<'a>] {
        &self.paths
    }

    /// Take ownership of the paths.
    pub fn into_vec(self) -> Vec<TraceState<'a>> {
        self.paths
    }
}

impl<'a> IntoIterator for BestPaths<'a> {
    type Item = TraceState<'a>;
    type IntoIter = std::vec::IntoIter<TraceState<'a>>;

    fn into_iter(self) -> Self::IntoIter {
        self.paths.into_iter()
    }
}

impl<'s, 'a> IntoIterator for &'s BestPaths<'a> {
    type Item = &'s TraceState<'a>;
    type IntoIter = std::slice::Iter<'s, TraceState<'a>>;

    fn into_iter(self) -> Self::IntoIter {
        self.paths.iter()
    }
}

/// Counters collected during one search run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Seed traces stored from the start terminal.
    pub seeded: usize,
    /// Traces taken out of storage.
    pub retrieved: usize,
    /// Incomplete traces whose neighbours were examined.
    pub expanded: usize,
    /// Complete traces offered to [`BestPaths`].
    pub completed: usize,
    /// Largest number of traces pending at once.
    pub peak_pending: usize,
}

/// A configured search over one board.
///
/// Each `Search` owns its own storage and best-path state, so independent
/// searches never interfere.
#[derive(Debug, Clone, Copy)]
pub struct Search<'a> {
    board: &'a Board,
    mode: Mode,
}

impl<'a> Search<'a> {
    /// Prepare a search of `board` using the given storage order.
    pub fn new(board: &'a Board, mode: Mode) -> Self {
        Self { board, mode }
    }

    /// The storage order in use.
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Run to exhaustion and return every shortest trace plus run counters.
    ///
    /// A board whose start terminal has no open neighbour, or whose end is
    /// unreachable, yields an empty result.
    pub fn run(&self) -> (BestPaths<'a>, SearchStats) {
        let board = self.board;
        let mut storage = Storage::new(self.mode);
        let mut best = BestPaths::new();
        let mut stats = SearchStats::default();

        for p in board.start().neighbors_4() {
            if board.is_open(p) {
                storage.store(TraceState::seed(board, p));
                stats.seeded += 1;
            }
        }
        stats.peak_pending = storage.len();
        log::debug!(
            "seeded {} trace(s) around start {} ({} mode)",
            stats.seeded,
            board.start(),
            self.mode
        );

        while let Ok(trace) = storage.retrieve() {
            stats.retrieved += 1;
            if trace.is_complete() {
                stats.completed += 1;
                let len = trace.len();
                if best.offer(trace) == Offer::Improved {
                    log::trace!("best length is now {len}");
                }
                continue;
            }

            stats.expanded += 1;
            for p in trace.head().neighbors_4() {
                if trace.is_available(p) {
                    storage.store(trace.extend(p));
                }
            }
            stats.peak_pending = stats.peak_pending.max(storage.len());
        }

        log::debug!(
            "search done: {} path(s) of length {:?}; {} retrieved, {} expanded, {} complete",
            best.len(),
            best.path_len(),
            stats.retrieved,
            stats.expanded,
            stats.completed
        );
        (best, stats)
    }
}

/// Every shortest trace between the board's terminals.
pub fn shortest_paths(board: &Board, mode: Mode) -> BestPaths<'_> {
    Search::new(board, mode).run().0
}

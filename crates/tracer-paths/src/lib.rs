//! Shortest-route search for circuit boards.
//!
//! Given a [`Board`](tracer_core::Board), this crate enumerates **every**
//! route of minimum length from the start terminal to the end terminal:
//!
//! - [`TraceState`] is one partial route, sharing its history with the
//!   trace it was extended from.
//! - [`Storage`] holds pending traces in stack or queue order ([`Mode`]).
//! - [`Search`] drives the loop and collects [`BestPaths`].
//!
//! The storage order changes only the order in which routes are found,
//! never which routes are returned.
//!
//! ```
//! use tracer_core::Board;
//! use tracer_paths::{shortest_paths, Mode};
//!
//! let board: Board = "2 3\n1 O O\nX O 2\n".parse().unwrap();
//! let paths = shortest_paths(&board, Mode::Queue);
//! assert_eq!(paths.path_len(), Some(2));
//! ```

mod search;
mod storage;
mod trace;

pub use search::{BestPaths, Offer, Search, SearchStats, shortest_paths};
pub use storage::{Mode, Storage, StorageError};
pub use trace::{Glyph, TraceState, Trail};

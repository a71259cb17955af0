//! **tracer-core** — board model and geometry for the circuit tracer.
//!
//! This crate provides the types shared across the tracer workspace:
//! geometry primitives and the immutable circuit [`Board`] with its text
//! format parser.

pub mod board;
pub mod geom;

pub use board::{Board, BoardError, Cell};
pub use geom::{Point, Range};

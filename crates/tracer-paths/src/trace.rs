//! [`TraceState`]: one partial route from the start terminal.
//!
//! A trace's history is a persistent linked list: extending a trace links a
//! new head cell onto the parent's shared history instead of copying it.
//! Histories are never mutated once built, so any number of child traces
//! may share one parent.

use std::fmt;
use std::rc::Rc;

use tracer_core::{Board, Cell, Point};

#[derive(Debug)]
struct Link {
    pos: Point,
    parent: Option<Rc<Link>>,
}

impl Drop for Link {
    // Unlink iteratively so long traces do not recurse on drop.
    fn drop(&mut self) {
        let mut next = self.parent.take();
        while let Some(rc) = next {
            match Rc::try_unwrap(rc) {
                Ok(mut link) => next = link.parent.take(),
                Err(_) => break,
            }
        }
    }
}

/// An immutable snapshot of one candidate route on a [`Board`].
///
/// The trace holds the cells visited after leaving the start terminal, up
/// to and including its head. Every cell is open on the board and appears
/// at most once. Terminals are never part of the trace.
#[derive(Debug, Clone)]
pub struct TraceState<'a> {
    board: &'a Board,
    head: Rc<Link>,
    len: usize,
}

impl<'a> TraceState<'a> {
    /// Start a one-cell trace at `p`.
    ///
    /// `p` should be open and adjacent to the board's start terminal.
    pub fn seed(board: &'a Board, p: Point) -> Self {
        debug_assert!(board.is_open(p), "seed {p} is not open");
        debug_assert!(p.is_adjacent(board.start()), "seed {p} is not next to the start");
        Self {
            board,
            head: Rc::new(Link {
                pos: p,
                parent: None,
            }),
            len: 1,
        }
    }

    /// A child trace with `p` appended as the new head. `self` is unchanged.
    ///
    /// `p` should satisfy [`is_available`](Self::is_available) and be
    /// adjacent to the current head.
    pub fn extend(&self, p: Point) -> Self {
        debug_assert!(self.is_available(p), "{p} is not available to this trace");
        debug_assert!(p.is_adjacent(self.head()), "{p} is not next to the head");
        Self {
            board: self.board,
            head: Rc::new(Link {
                pos: p,
                parent: Some(Rc::clone(&self.head)),
            }),
            len: self.len + 1,
        }
    }

    /// The board this trace runs on.
    #[inline]
    pub fn board(&self) -> &'a Board {
        self.board
    }

    /// The most recently added cell.
    #[inline]
    pub fn head(&self) -> Point {
        self.head.pos
    }

    /// Number of cells in the trace.
    #[inline]
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether `p` is already part of this trace.
    pub fn contains(&self, p: Point) -> bool {
        self.trail().any(|q| q == p)
    }

    /// Whether `p` could extend this trace: on the board, open, and not
    /// already visited by this trace. Other traces may still use `p`.
    pub fn is_available(&self, p: Point) -> bool {
        self.board.is_open(p) && !self.contains(p)
    }

    /// Whether the head is orthogonally adjacent to the end terminal.
    #[inline]
    pub fn is_complete(&self) -> bool {
        self.head().is_adjacent(self.board.end())
    }

    /// Cells from head back to the first cell.
    pub fn trail(&self) -> Trail<'_> {
        Trail {
            next: Some(&self.head),
        }
    }

    /// Cells in route order, from the cell next to the start terminal to
    /// the head.
    pub fn points(&self) -> Vec<Point> {
        let mut pts: Vec<Point> = self.trail().collect();
        pts.reverse();
        pts
    }

    /// Row-major glyphs of the board with this trace drawn on it.
    pub fn render(&self) -> Vec<Glyph> {
        let mut glyphs: Vec<Glyph> = self.board.iter().map(|(_, c)| Glyph::Board(c)).collect();
        for p in self.trail() {
            if let Some(i) = self.board.index(p) {
                glyphs[i] = Glyph::Trace;
            }
        }
        glyphs
    }
}

impl fmt::Display for TraceState<'_> {
    /// Board-shaped text, cells separated by spaces and trace cells as `T`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = self.board.cols() as usize;
        for (i, glyph) in self.render().into_iter().enumerate() {
            let col = i % width;
            if col > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{}", glyph.to_char())?;
            if col == width - 1 {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}

/// Iterator over a trace's cells, head first.
#[derive(Clone)]
pub struct Trail<'t> {
    next: Option<&'t Rc<Link>>,
}

impl Iterator for Trail<'_> {
    type Item = Point;

    fn next(&mut self) -> Option<Point> {
        let link = self.next?;
        self.next = link.parent.as_ref();
        Some(link.pos)
    }
}

/// What to draw at one board position when rendering a trace.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Glyph {
    /// The board's own marker.
    Board(Cell),
    /// A cell on the rendered trace.
    Trace,
}

impl Glyph {
    /// Marker character; trace cells are `T`.
    pub const fn to_char(self) -> char {
        match self {
            Self::Board(c) => c.to_char(),
            Self::Trace => 'T',
        }
    }
}

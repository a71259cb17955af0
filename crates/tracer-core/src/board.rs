//! The circuit [`Board`]: an immutable grid of [`Cell`] markers.
//!
//! Boards are read from a small text format:
//!
//! ```text
//! 3 4
//! 1 O O O
//! X X O X
//! O O O 2
//! ```
//!
//! The first line holds the number of rows and columns. Each following row
//! holds exactly that many whitespace-separated markers: `O` (open), `X`
//! (blocked), `1` (start terminal) and `2` (end terminal). Blank lines are
//! ignored.

use std::fmt;
use std::fs;
use std::io;
use std::path::Path;
use std::str::FromStr;

use crate::geom::{Point, Range};

/// A single board cell marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Cell {
    /// Occupied by a component or an existing trace.
    Blocked,
    /// Free routing space.
    #[default]
    Open,
    /// The starting terminal.
    Start,
    /// The ending terminal.
    End,
}

impl Cell {
    /// Parse a marker character.
    pub fn from_char(ch: char) -> Option<Self> {
        match ch {
            'X' => Some(Self::Blocked),
            'O' => Some(Self::Open),
            '1' => Some(Self::Start),
            '2' => Some(Self::End),
            _ => None,
        }
    }

    /// The marker character used in the text format.
    pub const fn to_char(self) -> char {
        match self {
            Self::Blocked => 'X',
            Self::Open => 'O',
            Self::Start => '1',
            Self::End => '2',
        }
    }

    /// Whether the cell is available for routing.
    #[inline]
    pub const fn is_open(self) -> bool {
        matches!(self, Self::Open)
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

/// A rectangular circuit board with exactly one start and one end terminal.
///
/// The board never changes after construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    cells: Vec<Cell>,
    bounds: Range,
    start: Point,
    end: Point,
}

impl Board {
    /// Build a board of `rows` × `cols` cells from row-major `cells`.
    ///
    /// Fails with [`BoardError::Malformed`] if the cell count does not match
    /// the dimensions or the board does not hold exactly one start and one
    /// end terminal.
    pub fn new(rows: i32, cols: i32, cells: Vec<Cell>) -> Result<Self, BoardError> {
        if rows < 0 || cols < 0 {
            return Err(BoardError::Malformed(format!(
                "negative dimensions {rows}x{cols}"
            )));
        }
        let bounds = Range::new(0, 0, cols, rows);
        if cells.len() != bounds.len() {
            return Err(BoardError::Malformed(format!(
                "expected {} cells for a {rows}x{cols} board, found {}",
                bounds.len(),
                cells.len()
            )));
        }

        let mut start = None;
        let mut end = None;
        for (p, &cell) in bounds.iter().zip(cells.iter()) {
            let slot = match cell {
                Cell::Start => &mut start,
                Cell::End => &mut end,
                _ => continue,
            };
            if slot.is_some() {
                return Err(BoardError::Malformed(format!(
                    "duplicate terminal '{cell}' at {p}"
                )));
            }
            *slot = Some(p);
        }
        let start =
            start.ok_or_else(|| BoardError::Malformed("missing start terminal '1'".into()))?;
        let end = end.ok_or_else(|| BoardError::Malformed("missing end terminal '2'".into()))?;

        Ok(Self {
            cells,
            bounds,
            start,
            end,
        })
    }

    /// Read and parse a board file.
    pub fn read_from_file(path: impl AsRef<Path>) -> Result<Self, BoardError> {
        let text = fs::read_to_string(path)?;
        text.parse()
    }

    /// The board's bounding range, `[0, cols) × [0, rows)`.
    #[inline]
    pub fn bounds(&self) -> Range {
        self.bounds
    }

    /// Number of rows.
    #[inline]
    pub fn rows(&self) -> i32 {
        self.bounds.height()
    }

    /// Number of columns.
    #[inline]
    pub fn cols(&self) -> i32 {
        self.bounds.width()
    }

    /// `(rows, cols)`.
    #[inline]
    pub fn dimensions(&self) -> (i32, i32) {
        (self.rows(), self.cols())
    }

    /// Whether `p` lies on the board.
    #[inline]
    pub fn contains(&self, p: Point) -> bool {
        self.bounds.contains(p)
    }

    /// Location of the start terminal.
    #[inline]
    pub fn start(&self) -> Point {
        self.start
    }

    /// Location of the end terminal.
    #[inline]
    pub fn end(&self) -> Point {
        self.end
    }

    /// The marker at `p`, or [`BoardError::OutOfBounds`].
    pub fn cell(&self, p: Point) -> Result<Cell, BoardError> {
        self.index(p)
            .map(|i| self.cells[i])
            .ok_or(BoardError::OutOfBounds(p))
    }

    /// Whether `p` is on the board and open for routing. Terminals and
    /// blocked cells are never open.
    #[inline]
    pub fn is_open(&self, p: Point) -> bool {
        self.index(p).is_some_and(|i| self.cells[i].is_open())
    }

    /// Row-major iterator over `(Point, Cell)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (Point, Cell)> + '_ {
        self.bounds.iter().zip(self.cells.iter().copied())
    }

    /// Row-major offset of `p`, or `None` when `p` is off the board.
    #[inline]
    pub fn index(&self, p: Point) -> Option<usize> {
        if self.bounds.contains(p) {
            Some(p.y as usize * self.bounds.width() as usize + p.x as usize)
        } else {
            None
        }
    }
}

impl fmt::Display for Board {
    /// Writes the board body in the text format (without the header line).
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (p, cell) in self.iter() {
            if p.x > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{cell}")?;
            if p.x == self.cols() - 1 {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}

impl FromStr for Board {
    type Err = BoardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut lines = s
            .lines()
            .enumerate()
            .map(|(n, l)| (n + 1, l.trim()))
            .filter(|(_, l)| !l.is_empty());

        let (_, header) = lines
            .next()
            .ok_or_else(|| BoardError::Malformed("empty input".into()))?;
        let (rows, cols) = parse_header(header)?;

        // Grows row by row; the header alone is not trusted for sizing.
        let mut cells = Vec::new();
        let mut seen_rows = 0;
        for (line_no, line) in lines {
            if seen_rows == rows {
                return Err(BoardError::Malformed(format!(
                    "line {line_no}: more than {rows} rows"
                )));
            }
            let before = cells.len();
            for token in line.split_whitespace() {
                let cell = parse_token(token).ok_or_else(|| {
                    BoardError::Malformed(format!("line {line_no}: invalid cell '{token}'"))
                })?;
                cells.push(cell);
            }
            let width = cells.len() - before;
            if width != cols as usize {
                return Err(BoardError::Malformed(format!(
                    "line {line_no}: expected {cols} cells, found {width}"
                )));
            }
            seen_rows += 1;
        }
        if seen_rows != rows {
            return Err(BoardError::Malformed(format!(
                "expected {rows} rows, found {seen_rows}"
            )));
        }

        Board::new(rows, cols, cells)
    }
}

fn parse_header(line: &str) -> Result<(i32, i32), BoardError> {
    let bad = || BoardError::Malformed(format!("invalid header '{line}', expected 'ROWS COLS'"));
    let mut tokens = line.split_whitespace();
    let rows: u16 = tokens.next().and_then(|t| t.parse().ok()).ok_or_else(bad)?;
    let cols: u16 = tokens.next().and_then(|t| t.parse().ok()).ok_or_else(bad)?;
    if tokens.next().is_some() {
        return Err(bad());
    }
    Ok((i32::from(rows), i32::from(cols)))
}

fn parse_token(token: &str) -> Option<Cell> {
    let mut chars = token.chars();
    match (chars.next(), chars.next()) {
        (Some(ch), None) => Cell::from_char(ch),
        _ => None,
    }
}

/// Errors produced when building or querying a [`Board`].
#[derive(Debug)]
pub enum BoardError {
    /// The board text or cell layout is invalid.
    Malformed(String),
    /// A checked query fell outside the grid.
    OutOfBounds(Point),
    /// The board file could not be read.
    Io(io::Error),
}

impl fmt::Display for BoardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Malformed(msg) => write!(f, "malformed board: {msg}"),
            Self::OutOfBounds(p) => write!(f, "position {p} is outside the board"),
            Self::Io(e) => write!(f, "cannot read board: {e}"),
        }
    }
}

impl std::error::Error for BoardError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for BoardError {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}

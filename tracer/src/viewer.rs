//! Interactive terminal viewer for search results.
//!
//! The board of the selected path is drawn on the left with one colored
//! block per cell; the list of paths is on the right.

use std::error::Error;
use std::io::{self, Write};

use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute, queue,
    style::{
        Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor,
        SetForegroundColor,
    },
    terminal::{self, ClearType},
};

use tracer_core::{Board, Cell};
use tracer_paths::{BestPaths, Glyph};

/// Width in terminal columns of one board cell.
const CELL_WIDTH: u16 = 3;

/// Background color for a glyph.
fn glyph_color(g: Glyph) -> Color {
    match g {
        Glyph::Board(Cell::Blocked) => Color::Red,
        Glyph::Board(Cell::Open) => Color::Green,
        Glyph::Board(Cell::Start) => Color::Yellow,
        Glyph::Board(Cell::End) => Color::Magenta,
        Glyph::Trace => Color::Blue,
    }
}

/// `v` as a screen coordinate, or `None` when it falls outside `0..limit`.
fn clip(v: usize, limit: u16) -> Option<u16> {
    u16::try_from(v).ok().filter(|&v| v < limit)
}

/// Runs `body` between `init` and `close`. `close` also runs when `init`
/// fails part way.
fn session<T>(
    init: impl FnOnce() -> io::Result<()>,
    body: impl FnOnce() -> Result<T, Box<dyn Error>>,
    close: impl FnOnce(),
) -> Result<T, Box<dyn Error>> {
    let res = match init() {
        Ok(()) => body(),
        Err(e) => Err(e.into()),
    };
    close();
    res
}

/// What the event loop should do after a key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Browses the shortest paths of one board.
pub struct Viewer<'p, 'a> {
    board: &'a Board,
    paths: &'p BestPaths<'a>,
    selected: usize,
}

impl<'p, 'a> Viewer<'p, 'a> {
    pub fn new(board: &'a Board, paths: &'p BestPaths<'a>) -> Self {
        Self {
            board,
            paths,
            selected: 0,
        }
    }

    /// Index of the highlighted path.
    pub fn selected(&self) -> usize {
        self.selected
    }

    /// Take over the terminal until the user quits.
    pub fn run(&mut self) -> Result<(), Box<dyn Error>> {
        session(Self::init, || self.event_loop(), Self::close)
    }

    fn init() -> io::Result<()> {
        terminal::enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(
            stdout,
            terminal::EnterAlternateScreen,
            cursor::Hide,
            terminal::Clear(ClearType::All)
        )
    }

    fn close() {
        let mut stdout = io::stdout();
        let _ = execute!(
            stdout,
            ResetColor,
            cursor::Show,
            terminal::LeaveAlternateScreen
        );
        let _ = terminal::disable_raw_mode();
    }

    fn event_loop(&mut self) -> Result<(), Box<dyn Error>> {
        let mut stdout = io::stdout();
        loop {
            self.draw(&mut stdout, terminal::size()?)?;
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if self.handle_key(key) == Flow::Quit {
                        return Ok(());
                    }
                }
                Event::Resize(..) => {
                    execute!(stdout, terminal::Clear(ClearType::All))?;
                }
                _ => {}
            }
        }
    }

    /// Update the selection for a key press.
    pub fn handle_key(&mut self, key: KeyEvent) -> Flow {
        let last = self.paths.len().saturating_sub(1);
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => return Flow::Quit,
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                return Flow::Quit;
            }
            KeyCode::Up | KeyCode::Char('k') => self.selected = self.selected.saturating_sub(1),
            KeyCode::Down | KeyCode::Char('j') => self.selected = (self.selected + 1).min(last),
            KeyCode::Home => self.selected = 0,
            KeyCode::End => self.selected = last,
            KeyCode::Char(d @ '1'..='9') => {
                let i = d as usize - '1' as usize;
                if i < self.paths.len() {
                    self.selected = i;
                }
            }
            _ => {}
        }
        Flow::Continue
    }

    /// Glyphs to draw for the current selection, row-major.
    fn glyphs(&self) -> Vec<Glyph> {
        match self.paths.get(self.selected) {
            Some(trace) => trace.render(),
            None => self.board.iter().map(|(_, c)| Glyph::Board(c)).collect(),
        }
    }

    /// Draw everything that fits on a `(width, height)` screen.
    fn draw(&self, out: &mut impl Write, (width, height): (u16, u16)) -> io::Result<()> {
        let cols = self.board.cols() as usize;
        let cell_w = usize::from(CELL_WIDTH);
        for (i, g) in self.glyphs().into_iter().enumerate() {
            let (row, col) = (i / cols, i % cols);
            let right = (col + 1).saturating_mul(cell_w);
            if right > usize::from(width) {
                continue;
            }
            let (Some(x), Some(y)) = (clip(right - cell_w, width), clip(row, height)) else {
                continue;
            };
            queue!(
                out,
                cursor::MoveTo(x, y),
                SetForegroundColor(Color::Black),
                SetBackgroundColor(glyph_color(g)),
                Print(format!(" {} ", g.to_char())),
                ResetColor
            )?;
        }

        let list_x = clip(cols.saturating_mul(cell_w).saturating_add(2), width);
        if let (Some(x), Some(y)) = (list_x, clip(0, height)) {
            let summary = match self.paths.path_len() {
                Some(len) => format!("{} path(s), length {len}", self.paths.len()),
                None => "no route between terminals".to_string(),
            };
            queue!(out, cursor::MoveTo(x, y), Print(summary))?;
        }
        for i in 0..self.paths.len() {
            let (Some(x), Some(y)) = (list_x, clip(i + 1, height)) else {
                break;
            };
            queue!(out, cursor::MoveTo(x, y))?;
            if i == self.selected() {
                queue!(out, SetAttribute(Attribute::Reverse))?;
            }
            queue!(
                out,
                Print(format!("Path #{}", i + 1)),
                SetAttribute(Attribute::Reset)
            )?;
        }

        let below = (self.board.rows() as usize).max(self.paths.len().saturating_add(1));
        if let Some(y) = clip(below.saturating_add(1), height) {
            queue!(
                out,
                cursor::MoveTo(0, y),
                Print("up/down or j/k: select   1-9: jump   q: quit")
            )?;
        }
        out.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracer_paths::{Mode, shortest_paths};

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn board() -> Board {
        "3 3\n1 O O\nO O O\nO O 2\n".parse().unwrap()
    }

    #[test]
    fn selection_stays_in_range() {
        let b = board();
        let paths = shortest_paths(&b, Mode::Stack);
        assert_eq!(paths.len(), 6);
        let mut v = Viewer::new(&b, &paths);

        assert_eq!(v.handle_key(press(KeyCode::Up)), Flow::Continue);
        assert_eq!(v.selected(), 0);
        for _ in 0..10 {
            v.handle_key(press(KeyCode::Char('j')));
        }
        assert_eq!(v.selected(), 5);
        v.handle_key(press(KeyCode::Char('k')));
        assert_eq!(v.selected(), 4);
        v.handle_key(press(KeyCode::Home));
        assert_eq!(v.selected(), 0);
        v.handle_key(press(KeyCode::End));
        assert_eq!(v.selected(), 5);
    }

    #[test]
    fn digits_jump_to_existing_paths() {
        let b = board();
        let paths = shortest_paths(&b, Mode::Queue);
        let mut v = Viewer::new(&b, &paths);
        v.handle_key(press(KeyCode::Char('3')));
        assert_eq!(v.selected(), 2);
        v.handle_key(press(KeyCode::Char('9')));
        assert_eq!(v.selected(), 2);
    }

    #[test]
    fn quit_keys() {
        let b = board();
        let paths = shortest_paths(&b, Mode::Queue);
        let mut v = Viewer::new(&b, &paths);
        assert_eq!(v.handle_key(press(KeyCode::Char('q'))), Flow::Quit);
        assert_eq!(v.handle_key(press(KeyCode::Esc)), Flow::Quit);
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(v.handle_key(ctrl_c), Flow::Quit);
        assert_eq!(v.handle_key(press(KeyCode::Char('c'))), Flow::Continue);
    }

    #[test]
    fn empty_result_shows_bare_board() {
        let b: Board = "1 3\n1 X 2\n".parse().unwrap();
        let paths = shortest_paths(&b, Mode::Stack);
        let mut v = Viewer::new(&b, &paths);
        v.handle_key(press(KeyCode::Down));
        assert_eq!(v.selected(), 0);
        assert_eq!(
            v.glyphs(),
            vec![
                Glyph::Board(Cell::Start),
                Glyph::Board(Cell::Blocked),
                Glyph::Board(Cell::End)
            ]
        );
    }

    #[test]
    fn draw_writes_to_buffer() {
        let b = board();
        let paths = shortest_paths(&b, Mode::Queue);
        let v = Viewer::new(&b, &paths);
        let mut buf = Vec::new();
        v.draw(&mut buf, (80, 24)).unwrap();
        let text = String::from_utf8_lossy(&buf);
        assert!(text.contains("6 path(s), length 3"));
        assert!(text.contains("Path #6"));
        assert!(text.contains(" T "));
        assert!(text.contains("q: quit"));
    }

    #[test]
    fn wide_board_is_clipped_to_screen() {
        let b: Board = format!("1 30000\n1 X {}2\n", "O ".repeat(29997)).parse().unwrap();
        let paths = shortest_paths(&b, Mode::Stack);
        assert!(paths.is_empty());
        let v = Viewer::new(&b, &paths);
        let mut buf = Vec::new();
        v.draw(&mut buf, (80, 24)).unwrap();
        let text = String::from_utf8_lossy(&buf);
        assert_eq!(text.matches(" O ").count(), 80 / 3 - 2);
        assert!(!text.contains("no route"));
        assert!(text.contains("q: quit"));
    }

    #[test]
    fn short_screen_drops_rows_that_do_not_fit() {
        let b = board();
        let paths = shortest_paths(&b, Mode::Queue);
        let v = Viewer::new(&b, &paths);
        let mut buf = Vec::new();
        v.draw(&mut buf, (80, 3)).unwrap();
        let text = String::from_utf8_lossy(&buf);
        assert!(text.contains("6 path(s), length 3"));
        assert!(text.contains("Path #2"));
        assert!(!text.contains("Path #3"));
        assert!(!text.contains("q: quit"));
    }

    #[test]
    fn zero_sized_screen_draws_nothing() {
        let b = board();
        let paths = shortest_paths(&b, Mode::Queue);
        let v = Viewer::new(&b, &paths);
        let mut buf = Vec::new();
        v.draw(&mut buf, (0, 0)).unwrap();
        assert!(buf.is_empty());
    }

    #[test]
    fn failed_init_still_restores_terminal() {
        let closed = std::cell::Cell::new(false);
        let mut ran = false;
        let res: Result<(), _> = session(
            || Err(io::Error::other("no tty")),
            || {
                ran = true;
                Ok(())
            },
            || closed.set(true),
        );
        assert!(res.is_err());
        assert!(!ran);
        assert!(closed.get());
    }

    #[test]
    fn body_error_is_returned_after_close() {
        let closed = std::cell::Cell::new(false);
        let res: Result<(), _> = session(
            || Ok(()),
            || Err("boom".into()),
            || closed.set(true),
        );
        assert_eq!(res.unwrap_err().to_string(), "boom");
        assert!(closed.get());
    }

    #[test]
    fn colors_follow_markers() {
        assert_eq!(glyph_color(Glyph::Trace), Color::Blue);
        assert_eq!(glyph_color(Glyph::Board(Cell::Blocked)), Color::Red);
        assert_eq!(glyph_color(Glyph::Board(Cell::Open)), Color::Green);
    }
}

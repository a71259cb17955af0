//! Circuit tracer — finds every shortest route between the two terminals
//! of a circuit board.
//!
//! Run: `tracer -q -c board.dat` (queue search, console output) or
//! `tracer -s -g board.dat` (stack search, interactive viewer).
//! Set `RUST_LOG=debug` to see search progress.

mod console;
mod viewer;

use std::io;
use std::path::PathBuf;

use clap::{ArgGroup, Parser};
use tracer_core::Board;
use tracer_paths::{Mode, Search};

use viewer::Viewer;

/// Find all shortest traces between the start (`1`) and end (`2`)
/// terminals of a circuit board.
#[derive(Parser, Debug)]
#[command(name = "tracer", version, about)]
#[command(group(ArgGroup::new("storage").required(true).args(["stack", "queue"])))]
#[command(group(ArgGroup::new("output").required(true).args(["console", "gui"])))]
struct Args {
    /// Depth-first search (stack storage)
    #[arg(short = 's', long)]
    stack: bool,

    /// Breadth-first search (queue storage)
    #[arg(short = 'q', long)]
    queue: bool,

    /// Print every shortest trace to the console
    #[arg(short = 'c', long)]
    console: bool,

    /// Browse the shortest traces in an interactive terminal grid
    #[arg(short = 'g', long)]
    gui: bool,

    /// Board file: a `ROWS COLS` header followed by rows of O, X, 1, 2
    file: PathBuf,
}

impl Args {
    fn mode(&self) -> Mode {
        if self.stack { Mode::Stack } else { Mode::Queue }
    }
}

fn run(args: &Args) -> Result<(), Box<dyn std::error::Error>> {
    let board = Board::read_from_file(&args.file)?;
    let (rows, cols) = board.dimensions();
    log::info!(
        "loaded {rows}x{cols} board from {}: start {}, end {}",
        args.file.display(),
        board.start(),
        board.end()
    );

    let (paths, stats) = Search::new(&board, args.mode()).run();
    log::info!(
        "{} shortest trace(s) found with {} storage ({} states retrieved, peak {} pending)",
        paths.len(),
        args.mode(),
        stats.retrieved,
        stats.peak_pending
    );

    if args.console {
        console::print_paths(&mut io::stdout().lock(), &paths)?;
    } else {
        Viewer::new(&board, &paths).run()?;
    }
    Ok(())
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    if let Err(e) = run(&args) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

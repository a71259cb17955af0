//! Plain-text output of search results.

use std::io::{self, Write};

use tracer_paths::BestPaths;

/// Write every path as a board-shaped block, blocks separated by a blank
/// line. Prints a single notice when there is no route.
pub fn print_paths(out: &mut impl Write, paths: &BestPaths<'_>) -> io::Result<()> {
    if paths.is_empty() {
        writeln!(out, "no route between terminals")?;
        return out.flush();
    }
    for (i, trace) in paths.iter().enumerate() {
        if i > 0 {
            writeln!(out)?;
        }
        write!(out, "{trace}")?;
    }
    out.flush()
}

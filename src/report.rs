use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crossterm::queue;
use crossterm::style::{Print, PrintStyledContent, Stylize};
use log::info;

use crate::error::Result;
use crate::puzzle::PuzzleState;
use crate::search::Solution;

/// Writes the solution in the `key: value` layout of `output.txt`.
pub fn write_output<W: Write>(out: &mut W, solution: &Solution) -> std::io::Result<()> {
    let path = solution
        .path_to_goal
        .iter()
        .map(|mv| format!("'{mv}'"))
        .collect::<Vec<_>>()
        .join(", ");

    writeln!(out, "path_to_goal: [{path}]")?;
    writeln!(out, "cost_of_path: {}", solution.cost_of_path)?;
    writeln!(out, "nodes_expanded: {}", solution.nodes_expanded)?;
    writeln!(out, "search_depth: {}", solution.search_depth)?;
    writeln!(out, "max_search_depth: {}", solution.max_search_depth)?;
    writeln!(out, "running_time: {:.8}", solution.running_time)?;
    writeln!(out, "max_ram_usage: {:.8}", solution.max_ram_usage)?;
    Ok(())
}

pub fn write_output_file(path: impl AsRef<Path>, solution: &Solution) -> Result<()> {
    let path = path.as_ref();
    let mut out = BufWriter::new(File::create(path)?);
    write_output(&mut out, solution)?;
    out.flush()?;
    info!("wrote {}", path.display());
    Ok(())
}

pub fn to_json(solution: &Solution) -> Result<String> {
    Ok(serde_json::to_string_pretty(solution)?)
}

/// Prints the board as a grid, dimming the blank.
pub fn print_board<W: Write>(out: &mut W, state: &PuzzleState) -> std::io::Result<()> {
    let width = (state.config().len() - 1).to_string().len();
    for row in state.config().chunks(state.n()) {
        for &val in row {
            let cell = format!("{val:>width$} ");
            if val == 0 {
                queue!(out, PrintStyledContent(cell.dark_grey()))?;
            } else {
                queue!(out, PrintStyledContent(cell.bold()))?;
            }
        }
        queue!(out, Print("\n"))?;
    }
    out.flush()
}

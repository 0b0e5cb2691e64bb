use std::io::Write;

use crate::{
    statement::{self, ExecuteResult, prepare},
    storage::table::Table,
    types::error::Result,
};

/// What the command loop should do after a processed line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopControl {
    Continue,
    Exit,
}

/// Handles one line of input: meta-commands directly, everything else through
/// prepare/execute.
///
/// Recoverable problems (parse errors, a full table) are printed to `out` and
/// the loop continues. Environment errors propagate as `Err` so the boundary
/// can report them and terminate with a non-zero exit code; they are never
/// folded into the ordinary [`LoopControl::Exit`] a user requests.
pub fn process_command<W: Write>(
    command: &str,
    table: &mut Table,
    out: &mut W,
) -> Result<LoopControl> {
    let cmd = command.trim();

    match cmd {
        ".exit" | "exit" | "quit" | "q" => {
            writeln!(out, "Goodbye!")?;
            return Ok(LoopControl::Exit);
        }
        "help" | "h" => {
            writeln!(
                out,
                r#"
Available commands:
  insert <id> <username> <email>  - Insert a row
  select                          - Print every row
  help, h                         - Show this help message
  clear                           - Clear the screen
  .exit, exit, quit, q            - Flush and exit

Use Up/Down arrows to navigate command history.
"#
            )?;
        }
        "clear" => {
            write!(out, "\x1B[2J\x1B[1;1H")?;
            out.flush()?;
        }
        "" => {
            // Empty command, do nothing
        }
        _ => {
            let statement = match prepare(cmd) {
                Ok(statement) => statement,
                Err(e) => {
                    writeln!(out, "{}", e)?;
                    return Ok(LoopControl::Continue);
                }
            };
            match statement::execute(&statement, table)? {
                ExecuteResult::Inserted => writeln!(out, "Executed.")?,
                ExecuteResult::TableFull => writeln!(out, "Error: Table full.")?,
                ExecuteResult::Rows(rows) => {
                    for row in &rows {
                        writeln!(out, "({}, {}, {})", row.id, row.username, row.email)?;
                    }
                    writeln!(out, "Executed.")?;
                }
            }
        }
    }

    Ok(LoopControl::Continue)
}

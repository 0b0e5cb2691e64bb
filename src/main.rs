use std::process::ExitCode;

use lontar::{
    repl::{LoopControl, process_command},
    storage::table::Table,
};
use rustyline::{DefaultEditor, error::ReadlineError};

/// Runs the interactive loop. A user-requested exit comes back as
/// `ExitCode::SUCCESS`; an environment error is reported here and comes back
/// as `ExitCode::FAILURE`, never conflated with a clean exit.
fn repl(table: &mut Table) -> rustyline::Result<ExitCode> {
    let mut rl = DefaultEditor::new()?;
    let mut out = std::io::stdout();

    loop {
        match rl.readline("lontar> ") {
            Ok(line) => {
                let command = line.trim().to_string();
                if command.is_empty() {
                    continue;
                }
                rl.add_history_entry(&command)?;
                match process_command(&command, table, &mut out) {
                    Ok(LoopControl::Continue) => {}
                    Ok(LoopControl::Exit) => break,
                    Err(e) => {
                        eprintln!("Fatal: {}", e);
                        return Ok(ExitCode::FAILURE);
                    }
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("Interrupted");
                break;
            }
            Err(ReadlineError::Eof) => {
                break;
            }
            Err(err) => {
                println!("Error: {:?}", err);
                break;
            }
        }
    }

    Ok(ExitCode::SUCCESS)
}

fn main() -> ExitCode {
    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "lontar.db".to_string());

    let mut table = match Table::open(&path) {
        Ok(table) => table,
        Err(e) => {
            eprintln!("Unable to open database '{}': {}", path, e);
            return ExitCode::FAILURE;
        }
    };

    let exit_code = match repl(&mut table) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:?}", e);
            ExitCode::FAILURE
        }
    };

    // Best-effort flush even after a fatal error; a close failure trumps
    // whatever the loop decided.
    if let Err(e) = table.close() {
        eprintln!("Error closing database: {}", e);
        return ExitCode::FAILURE;
    }

    exit_code
}

mod finance;
mod ui;

use std::process::ExitCode;

use crossterm::terminal;

fn main() -> ExitCode {
    // The menu needs raw keyboard capture; find out up front whether the
    // terminal can provide it instead of failing mid-interaction.
    if let Err(err) = probe_raw_mode() {
        eprintln!("This calculator needs an interactive terminal to capture key presses ({err}).");
        eprintln!("Run it directly from a terminal rather than piping input into it.");
        return ExitCode::FAILURE;
    }

    if let Err(err) = ui::run() {
        // Only terminal I/O failures reach here; user-input errors are
        // handled inside the loop. Not a user mistake, so still exit zero.
        eprintln!("{err:?}");
    }
    ExitCode::SUCCESS
}

fn probe_raw_mode() -> std::io::Result<()> {
    terminal::enable_raw_mode()?;
    terminal::disable_raw_mode()
}

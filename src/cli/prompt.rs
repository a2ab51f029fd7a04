//! Interactive account prompt.

use std::io::{self, BufRead, IsTerminal};

use console::Term;

use crate::error::{Error, Result};

/// Ask for the account when neither the config nor the CLI named one.
///
/// Reads from the terminal when attended, otherwise from piped stdin.
pub fn prompt_account() -> Result<String> {
    let term = Term::stdout();
    term.write_str("Enter X username (without @): ")?;

    if term.is_term() && io::stdin().is_terminal() {
        let line = term.read_line()?;
        return non_empty(line);
    }

    read_account(io::stdin().lock())
}

/// Read one answer line from `input`.
pub fn read_account<R: BufRead>(mut input: R) -> Result<String> {
    let mut line = String::new();
    input.read_line(&mut line)?;
    non_empty(line)
}

fn non_empty(line: String) -> Result<String> {
    let line = line.trim();
    if line.is_empty() {
        return Err(Error::MissingConfig("account".to_string()));
    }
    Ok(line.to_string())
}

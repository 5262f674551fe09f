//! Line input helpers for the interactive shell.

use std::io::{self, Write};

/// Prompt for one line of input, trimmed.
pub fn prompt(label: &str) -> String {
    print!("{}", label);
    let _ = io::stdout().flush();

    let mut line = String::new();
    let _ = io::stdin().read_line(&mut line);
    line.trim().to_string()
}

/// Prompt for an integer; `None` when the input does not parse.
pub fn prompt_i64(label: &str) -> Option<i64> {
    prompt(label).parse().ok()
}

pub mod add;
pub mod auth;
pub mod menubar;
pub mod navigate;
pub mod reset_card;
pub mod search;

pub use add::*;
pub use auth::*;
pub use menubar::*;
pub use navigate::*;
pub use reset_card::*;
pub use search::*;

use crate::core::error::Result;
use std::io::{self, Write};

/// Print `label` and read one trimmed line from stdin.
///
/// Uses the process-wide std handle so consecutive prompts never lose buffered input.
pub(crate) fn prompt(label: &str) -> Result<String> {
    print!("{label}");
    io::stdout().flush()?;

    let mut line = String::new();
    io::stdin().read_line(&mut line)?;
    Ok(line.trim().to_string())
}

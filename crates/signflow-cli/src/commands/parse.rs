//! Parse command implementation.

use crate::cli::TextArgs;
use crate::commands::{extractor, read_text};
use crate::error::Result;
use crate::output::Formatter;

/// Execute the parse command.
pub fn execute_parse(args: TextArgs, formatter: &Formatter) -> Result<()> {
    let text = read_text(&args)?;
    let ir = extractor()?.extract(&text);
    println!("{}", formatter.format_ir(&ir)?);
    Ok(())
}

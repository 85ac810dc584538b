//! Build command implementation.

use crate::cli::TextArgs;
use crate::commands::{builder, extractor, read_text};
use crate::config::Profile;
use crate::error::Result;
use crate::output::Formatter;

/// Execute the build command.
///
/// Prints the request body the text would produce. Nothing is sent.
pub fn execute_build(args: TextArgs, profile: &Profile, formatter: &Formatter) -> Result<()> {
    let text = read_text(&args)?;
    let ir = extractor()?.extract(&text);
    let payload = builder(profile)?.build(&ir);

    for fallback in &ir.fallbacks {
        eprintln!("{}", formatter.warning(&fallback.to_string()));
    }
    println!("{}", formatter.format_payload(&payload.to_value()?)?);
    Ok(())
}

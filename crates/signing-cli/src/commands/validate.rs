//! Validate command implementation

use std::path::Path;

use colored::Colorize;

use crate::error::Result;
use crate::script::Script;

/// Parse a script and its starting lineup without applying any step
pub fn run_validate(script_path: &Path) -> Result<()> {
    let script = Script::load(script_path)?;
    let (sequence, book) = script.lineup()?;
    let signed = sequence.iter().filter(|e| e.is_locked(&book)).count();

    println!(
        "{} {}: {} signer(s), {} already signed, {} step(s)",
        "OK".green().bold(),
        script_path.display(),
        sequence.len(),
        signed,
        script.steps.len()
    );
    Ok(())
}

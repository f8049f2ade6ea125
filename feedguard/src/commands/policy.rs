//! `feedguard policy`: prints the effective policies and their fingerprints.

use anyhow::Result;
use feedguard_core::PolicyConfig;
use std::io::Write;

pub fn print_policies<W: Write>(config: &PolicyConfig, writer: &mut W) -> Result<()> {
    writeln!(writer, "# html fingerprint: {}", config.html.fingerprint())?;
    writeln!(writer, "# text fingerprint: {}", config.text.fingerprint())?;
    write!(writer, "{}", config.to_yaml()?)?;
    Ok(())
}

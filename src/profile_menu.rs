use anyhow::{Result, anyhow};
use std::collections::BTreeMap;
use std::io::{BufRead, Write};

use crate::app_config::ModelProfile;

// @module: Interactive model profile selection

/// Show the profile menu and read keys until a valid one is entered.
///
/// End of input before a valid choice is an error.
pub fn select_profile<R: BufRead, W: Write>(
    models: &BTreeMap<String, ModelProfile>,
    mut input: R,
    mut output: W,
) -> Result<String> {
    writeln!(output, "\nSelect Translation Mode:")?;
    for (key, profile) in models {
        writeln!(output, " [{}] {}", key, profile.name)?;
    }

    let keys = models.keys().map(String::as_str).collect::<Vec<_>>().join(", ");

    loop {
        write!(output, "\nEnter choice ({}): ", keys)?;
        output.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            return Err(anyhow!("No model profile selected"));
        }

        let choice = line.trim();
        if models.contains_key(choice) {
            return Ok(choice.to_string());
        }
        writeln!(output, "'{}' is not valid. Please type one of: {}.", choice, keys)?;
    }
}

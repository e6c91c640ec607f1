//! CLI commands

pub mod explain;
pub mod generate;
pub mod parse;
pub mod validate;

use std::io::Read;

use crate::error::{CliError, Result};

/// Read manifest text from a file, or from stdin when `input` is `-`
pub fn read_input(input: &str) -> Result<String> {
    if input == "-" {
        let mut content = String::new();
        std::io::stdin()
            .read_to_string(&mut content)
            .map_err(|e| CliError::io_at("<stdin>", e))?;
        return Ok(content);
    }

    std::fs::read_to_string(input).map_err(|e| CliError::io_at(input, e))
}

/// Pretty-print a value as JSON on stdout
pub fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    let output = serde_json::to_string_pretty(value)
        .map_err(|e| CliError::internal(format!("failed to serialize output: {}", e)))?;
    println!("{}", output);
    Ok(())
}

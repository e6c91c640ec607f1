//! Generate command - render a manifest template from values

use console::style;
use kubexplain_core::{Values, generate_manifest, parse_set_values};
use std::path::{Path, PathBuf};

use crate::error::{CliError, Result};

pub fn run(
    resource_type: &str,
    values_files: &[PathBuf],
    set_values: &[String],
    output: Option<&Path>,
) -> Result<()> {
    let mut values = Values::new();

    for file in values_files {
        let file_values = Values::from_file(file).map_err(|e| {
            CliError::usage(format!(
                "Failed to load values from {}: {}",
                file.display(),
                e
            ))
        })?;
        values.merge(&file_values);
    }

    if !set_values.is_empty() {
        values.merge(&parse_set_values(set_values)?);
    }

    tracing::debug!(resource_type, values = %values.inner(), "resolved generator values");

    let manifest = generate_manifest(resource_type, &values)?;

    match output {
        Some(path) => {
            std::fs::write(path, &manifest).map_err(|e| CliError::io_at(path.display(), e))?;
            eprintln!(
                "{} Wrote {} manifest to {}",
                style("✓").green(),
                resource_type,
                path.display()
            );
        }
        None => print!("{}", manifest),
    }

    Ok(())
}

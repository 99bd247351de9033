use crate::error::OpsError;
use std::{fs, path::Path};
use tracing::info;

/// Load API keys from a newline-delimited file. Lines are trimmed and blank
/// lines dropped; keys are otherwise opaque. A missing file or a file with
/// no usable lines is an error, so a seeding run aborts before it touches
/// the database.
pub fn load_keys(path: &Path) -> Result<Vec<String>, OpsError> {
    let contents = fs::read_to_string(path)?;
    let keys: Vec<String> = contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect();

    if keys.is_empty() {
        return Err(OpsError::EmptyKeyFile(path.display().to_string()));
    }

    info!(path = %path.display(), count = keys.len(), "loaded API keys");
    Ok(keys)
}

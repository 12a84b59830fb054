//! JSON rendering for results and outlines.

use std::fs;
use std::path::Path;

use serde::Serialize;

use crate::error::{Error, Result};

/// JSON output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonFormat {
    /// Pretty-printed JSON with indentation
    #[default]
    Pretty,
    /// Compact JSON without extra whitespace
    Compact,
}

/// Serialize a value to JSON.
pub fn to_json<T: Serialize + ?Sized>(value: &T, format: JsonFormat) -> Result<String> {
    let result = match format {
        JsonFormat::Pretty => serde_json::to_string_pretty(value),
        JsonFormat::Compact => serde_json::to_string(value),
    };

    result.map_err(|e| Error::Render(format!("JSON serialization error: {}", e)))
}

/// Serialize a value and write it to `path` as UTF-8.
pub fn write_json<T, P>(path: P, value: &T, format: JsonFormat) -> Result<()>
where
    T: Serialize + ?Sized,
    P: AsRef<Path>,
{
    let json = to_json(value, format)?;
    fs::write(path, json)?;
    Ok(())
}

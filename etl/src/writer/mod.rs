//! Pretty-printed JSON output (4-space indentation).

use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};
use std::path::Path;

use crate::error::{WriteError, WriteResult};

const INDENT: &[u8] = b"    ";

/// Serialize a value as indented JSON.
pub fn to_json_string<T: Serialize + ?Sized>(value: &T) -> WriteResult<String> {
    let mut buf = Vec::new();
    let mut ser = Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(INDENT));
    value.serialize(&mut ser)?;
    // serde_json only emits valid UTF-8
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

/// Write a value as indented JSON, replacing any existing file.
pub fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> WriteResult<()> {
    let json = to_json_string(value)?;
    std::fs::write(path, json).map_err(|source| WriteError::IoError {
        path: path.to_path_buf(),
        source,
    })
}

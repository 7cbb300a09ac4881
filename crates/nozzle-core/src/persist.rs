//! RON file helpers shared by parameter and option files

use std::path::Path;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::FileError;

/// Serialize a value to pretty RON bytes
pub(crate) fn to_bytes<T: Serialize>(value: &T) -> Result<Vec<u8>, FileError> {
    let content = ron::ser::to_string_pretty(value, ron::ser::PrettyConfig::default())
        .map_err(|e| FileError::Serialize(e.to_string()))?;
    Ok(content.into_bytes())
}

/// Parse a value from RON bytes
pub(crate) fn from_bytes<T: DeserializeOwned>(data: &[u8]) -> Result<T, FileError> {
    let content = std::str::from_utf8(data).map_err(|e| FileError::Deserialize(e.to_string()))?;
    ron::from_str(content).map_err(|e| FileError::Deserialize(e.to_string()))
}

/// Write a value to a RON file
pub(crate) fn save<T: Serialize>(value: &T, path: &Path) -> Result<(), FileError> {
    let content = to_bytes(value)?;
    std::fs::write(path, content).map_err(|e| FileError::Io(e.to_string()))
}

/// Read a value from a RON file
pub(crate) fn load<T: DeserializeOwned>(path: &Path) -> Result<T, FileError> {
    let content = std::fs::read(path).map_err(|e| FileError::Io(e.to_string()))?;
    from_bytes(&content)
}

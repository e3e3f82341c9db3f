// radar-core/src/infrastructure/fs.rs

use serde::{Serialize, de::DeserializeOwned};
use sha2::{Digest, Sha256};
use std::fs;
use std::io::Write;
use std::path::Path;

use crate::infrastructure::error::InfrastructureError;

/// Write content to a file atomically using a temporary file.
///
/// The temporary file is created in the target's directory (created if
/// missing) and renamed over the target, so readers see either the old
/// file or the complete new one.
pub fn atomic_write<P: AsRef<Path>, C: AsRef<[u8]>>(
    path: P,
    content: C,
) -> Result<(), InfrastructureError> {
    let path = path.as_ref();
    let parent = ensure_parent(path)?;

    let mut temp_file = tempfile::NamedTempFile::new_in(parent).map_err(InfrastructureError::Io)?;
    temp_file
        .write_all(content.as_ref())
        .map_err(InfrastructureError::Io)?;
    temp_file
        .persist(path)
        .map_err(|e| InfrastructureError::Io(e.error))?;

    Ok(())
}

/// Creates the parent directory of `path` and returns it ("." for bare file names).
pub fn ensure_parent(path: &Path) -> Result<&Path, InfrastructureError> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => {
            fs::create_dir_all(parent).map_err(InfrastructureError::Io)?;
            Ok(parent)
        }
        _ => Ok(Path::new(".")),
    }
}

/// Pretty JSON, written atomically.
pub fn save_json<T: Serialize>(path: &Path, data: &T) -> Result<(), InfrastructureError> {
    let content = serde_json::to_string_pretty(data)?;
    atomic_write(path, content)
}

pub fn load_json<T: DeserializeOwned>(path: &Path) -> Result<T, InfrastructureError> {
    let content = fs::read(path).map_err(InfrastructureError::Io)?;
    serde_json::from_slice(&content).map_err(InfrastructureError::JsonError)
}

/// Lowercase hex SHA-256 of `data`.
pub fn sha256_hex(data: &[u8]) -> String {
    hex::encode(Sha256::digest(data))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use anyhow::Result;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_atomic_write_creates_file_and_parents() -> Result<()> {
        let dir = tempdir()?;
        let file_path = dir.path().join("quality").join("ipc.report.json");

        atomic_write(&file_path, "{}")?;

        assert_eq!(fs::read_to_string(file_path)?, "{}");
        Ok(())
    }

    #[test]
    fn test_atomic_write_overwrites_existing() -> Result<()> {
        let dir = tempdir()?;
        let file_path = dir.path().join("test.txt");

        atomic_write(&file_path, "Initial")?;
        atomic_write(&file_path, "Updated")?;

        assert_eq!(fs::read_to_string(file_path)?, "Updated");
        Ok(())
    }

    #[test]
    fn test_json_helpers() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("values.json");
        save_json(&path, &vec![1.5, 2.5])?;
        let back: Vec<f64> = load_json(&path)?;
        assert_eq!(back, vec![1.5, 2.5]);
        Ok(())
    }

    #[test]
    fn test_sha256_known_values() {
        assert_eq!(
            sha256_hex(b"Hello, World!"),
            "dffd6021bb2bd5b0af676290809ec3a53191dd81c7f70a4b28688a362182986f"
        );
        assert_eq!(
            sha256_hex(b""),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }
}

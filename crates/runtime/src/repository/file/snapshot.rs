//! File-based SnapshotRepository implementation.

use std::fs;
use std::path::{Path, PathBuf};

use game_core::Snapshot;
use sha2::{Digest, Sha256};

use crate::repository::{RepositoryError, Result, SnapshotRepository};

/// Binary container around an encoded snapshot.
///
/// # File Format
///
/// ```text
/// offset  size  field
/// 0       4     magic "DNGN"
/// 4       2     format version (little endian)
/// 6       32    SHA-256 of the payload
/// 38      ..    bincode-encoded snapshot
/// ```
pub struct SnapshotEnvelope;

impl SnapshotEnvelope {
    pub const MAGIC: [u8; 4] = *b"DNGN";
    pub const VERSION: u16 = 1;
    const CHECKSUM_LEN: usize = 32;
    pub const HEADER_LEN: usize = 4 + 2 + Self::CHECKSUM_LEN;

    pub fn seal(payload: &[u8]) -> Vec<u8> {
        let checksum = Sha256::digest(payload);
        let mut bytes = Vec::with_capacity(Self::HEADER_LEN + payload.len());
        bytes.extend_from_slice(&Self::MAGIC);
        bytes.extend_from_slice(&Self::VERSION.to_le_bytes());
        bytes.extend_from_slice(&checksum);
        bytes.extend_from_slice(payload);
        bytes
    }

    /// Verifies the header and checksum and returns the payload.
    pub fn open(bytes: &[u8]) -> Result<&[u8]> {
        if bytes.len() < Self::HEADER_LEN {
            return Err(RepositoryError::CorruptedData(format!(
                "snapshot truncated: {} bytes",
                bytes.len()
            )));
        }
        let (header, payload) = bytes.split_at(Self::HEADER_LEN);

        if header[..4] != Self::MAGIC {
            return Err(RepositoryError::CorruptedData(format!(
                "bad magic {}",
                hex::encode(&header[..4])
            )));
        }

        let version = u16::from_le_bytes([header[4], header[5]]);
        if version != Self::VERSION {
            return Err(RepositoryError::CorruptedData(format!(
                "unsupported snapshot version {version}"
            )));
        }

        let expected = &header[6..];
        let actual = Sha256::digest(payload);
        if expected != actual.as_slice() {
            return Err(RepositoryError::CorruptedData(format!(
                "checksum mismatch: expected {}, got {}",
                hex::encode(expected),
                hex::encode(actual)
            )));
        }

        Ok(payload)
    }
}

/// Stores the current run in a single enveloped bincode file.
///
/// Writes go to a temp file first and are renamed into place, so a crash
/// mid-write leaves the previous save intact.
pub struct FileSnapshotRepository {
    path: PathBuf,
}

impl FileSnapshotRepository {
    /// Create a repository writing to `path`, creating its directory.
    pub fn new(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(RepositoryError::Io)?;
        }
        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SnapshotRepository for FileSnapshotRepository {
    fn save(&self, snapshot: &Snapshot) -> Result<()> {
        let temp_path = self.path.with_extension("bin.tmp");

        let payload = snapshot
            .encode()
            .map_err(|e| RepositoryError::Serialization(e.to_string()))?;
        let bytes = SnapshotEnvelope::seal(&payload);

        fs::write(&temp_path, &bytes).map_err(RepositoryError::Io)?;
        fs::rename(&temp_path, &self.path).map_err(RepositoryError::Io)?;

        tracing::debug!(
            path = %self.path.display(),
            bytes = bytes.len(),
            checksum = %hex::encode(&bytes[6..14]),
            "saved snapshot"
        );
        Ok(())
    }

    fn load(&self) -> Result<Option<Snapshot>> {
        if !self.path.exists() {
            return Ok(None);
        }

        let bytes = fs::read(&self.path).map_err(RepositoryError::Io)?;
        let payload = SnapshotEnvelope::open(&bytes)?;
        let snapshot = Snapshot::decode(payload)
            .map_err(|e| RepositoryError::CorruptedData(e.to_string()))?;

        tracing::debug!(path = %self.path.display(), turn = snapshot.turn_count, "loaded snapshot");
        Ok(Some(snapshot))
    }

    fn exists(&self) -> bool {
        self.path.exists()
    }

    fn delete(&self) -> Result<()> {
        if self.path.exists() {
            fs::remove_file(&self.path).map_err(RepositoryError::Io)?;
            tracing::debug!(path = %self.path.display(), "deleted snapshot");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn envelope_round_trip() {
        let sealed = SnapshotEnvelope::seal(b"payload");
        assert_eq!(&sealed[..4], b"DNGN");
        assert_eq!(SnapshotEnvelope::open(&sealed).unwrap(), b"payload");
    }

    #[test]
    fn flipped_payload_bit_fails_checksum() {
        let mut sealed = SnapshotEnvelope::seal(b"payload");
        let last = sealed.len() - 1;
        sealed[last] ^= 0x01;
        let err = SnapshotEnvelope::open(&sealed).unwrap_err();
        assert!(err.is_corrupted());
        assert!(err.to_string().contains("checksum mismatch"));
    }

    #[test]
    fn short_or_foreign_files_are_corrupted() {
        assert!(SnapshotEnvelope::open(b"DN").unwrap_err().is_corrupted());

        let mut sealed = SnapshotEnvelope::seal(b"x");
        sealed[0] = b'Z';
        assert!(SnapshotEnvelope::open(&sealed).unwrap_err().is_corrupted());

        let mut sealed = SnapshotEnvelope::seal(b"x");
        sealed[4] = 9;
        assert!(SnapshotEnvelope::open(&sealed).unwrap_err().is_corrupted());
    }
}

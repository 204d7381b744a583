//! On-disk artifact format
//!
//! Each artifact file is one bincode-encoded [`ArtifactEnvelope`]: a magic
//! tag, a format version, the artifact kind, and the bincode payload together
//! with its SHA-256 checksum. The kind is checked on load so a classifier file
//! can never be decoded as a vectorizer or the other way around.

use atomicwrites::{AtomicFile, OverwriteBehavior};
use reviewlens_core::{Error, Result};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::io::Write;
use std::path::Path;

pub const MAGIC: [u8; 4] = *b"RLNS";
pub const FORMAT_VERSION: u32 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ArtifactKind {
    Classifier,
    Vectorizer,
}

impl std::fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ArtifactKind::Classifier => write!(f, "classifier"),
            ArtifactKind::Vectorizer => write!(f, "vectorizer"),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct ArtifactEnvelope {
    magic: [u8; 4],
    format_version: u32,
    kind: ArtifactKind,
    checksum: String,
    payload: Vec<u8>,
}

/// Encode `value` as a complete artifact file body
pub fn encode<T: Serialize>(kind: ArtifactKind, value: &T) -> Result<Vec<u8>> {
    let payload = bincode::serialize(value)
        .map_err(|e| Error::Serialization(format!("Failed to encode {}: {}", kind, e)))?;
    let envelope = ArtifactEnvelope {
        magic: MAGIC,
        format_version: FORMAT_VERSION,
        kind,
        checksum: format!("{:x}", Sha256::digest(&payload)),
        payload,
    };
    bincode::serialize(&envelope)
        .map_err(|e| Error::Serialization(format!("Failed to encode {} envelope: {}", kind, e)))
}

/// Decode an artifact file body, verifying header and checksum
pub fn decode<T: DeserializeOwned>(kind: ArtifactKind, bytes: &[u8]) -> Result<T> {
    let envelope: ArtifactEnvelope = bincode::deserialize(bytes)
        .map_err(|e| Error::InvalidArtifact(format!("not an artifact file: {}", e)))?;

    if envelope.magic != MAGIC {
        return Err(Error::InvalidArtifact("bad magic bytes".to_string()));
    }
    if envelope.format_version != FORMAT_VERSION {
        return Err(Error::InvalidArtifact(format!(
            "unsupported format version {} (expected {})",
            envelope.format_version, FORMAT_VERSION
        )));
    }
    if envelope.kind != kind {
        return Err(Error::InvalidArtifact(format!(
            "file holds a {} artifact, expected a {}",
            envelope.kind, kind
        )));
    }

    let actual = format!("{:x}", Sha256::digest(&envelope.payload));
    if actual != envelope.checksum {
        return Err(Error::InvalidArtifact(format!(
            "checksum mismatch: expected {}, got {}",
            envelope.checksum, actual
        )));
    }

    bincode::deserialize(&envelope.payload)
        .map_err(|e| Error::InvalidArtifact(format!("corrupt {} payload: {}", kind, e)))
}

/// Read and decode an artifact file
pub fn read_artifact<T: DeserializeOwned>(path: &Path, kind: ArtifactKind) -> Result<T> {
    let bytes = std::fs::read(path)?;
    decode(kind, &bytes)
}

/// Write an artifact file atomically (temp file + rename)
pub fn save_artifact<T: Serialize>(path: &Path, kind: ArtifactKind, value: &T) -> Result<()> {
    let bytes = encode(kind, value)?;
    AtomicFile::new(path, OverwriteBehavior::AllowOverwrite)
        .write(|f| f.write_all(&bytes))
        .map_err(|e| match e {
            atomicwrites::Error::Internal(e) | atomicwrites::Error::User(e) => Error::Io(e),
        })
}

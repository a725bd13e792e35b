/// Streaming content digests for manifest records.
///
/// Files are read in fixed [`CHUNK_SIZE`] pieces so memory use stays flat
/// regardless of file size. Digests are rendered as lowercase hex.
use md5::Md5;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;
use std::fs::File;
use std::io::{self, Read};
use std::path::Path;
use std::str::FromStr;
use thiserror::Error;

/// Bytes read per iteration while hashing.
pub const CHUNK_SIZE: usize = 4 * 1024;

/// Prefix stored in a record's `hash` field when the digest could not be computed.
pub const HASH_ERROR_PREFIX: &str = "error: ";

/// Supported digest algorithms.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HashAlgorithm {
    /// 128-bit MD5, the digest the in-game checker compares against.
    #[default]
    Md5,
    Sha256,
    Blake3,
}

impl HashAlgorithm {
    /// Label used in the manifest and on the command line.
    pub fn label(self) -> &'static str {
        match self {
            Self::Md5 => "md5",
            Self::Sha256 => "sha256",
            Self::Blake3 => "blake3",
        }
    }
}

impl fmt::Display for HashAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Error)]
#[error("unknown hash algorithm `{0}` (expected md5, sha256 or blake3)")]
pub struct UnknownHashAlgorithm(pub String);

impl FromStr for HashAlgorithm {
    type Err = UnknownHashAlgorithm;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "md5" => Ok(Self::Md5),
            "sha256" | "sha-256" => Ok(Self::Sha256),
            "blake3" => Ok(Self::Blake3),
            _ => Err(UnknownHashAlgorithm(s.to_string())),
        }
    }
}

/// Hash the contents of `path` with `algorithm`, returning lowercase hex.
pub fn hash_file(path: &Path, algorithm: HashAlgorithm) -> io::Result<String> {
    let file = File::open(path)?;
    hash_reader(file, algorithm)
}

/// Hash everything readable from `reader`.
pub fn hash_reader<R: Read>(reader: R, algorithm: HashAlgorithm) -> io::Result<String> {
    match algorithm {
        HashAlgorithm::Md5 => digest_chunks::<Md5, R>(reader),
        HashAlgorithm::Sha256 => digest_chunks::<Sha256, R>(reader),
        HashAlgorithm::Blake3 => {
            let mut hasher = blake3::Hasher::new();
            for_each_chunk(reader, |chunk| {
                hasher.update(chunk);
            })?;
            Ok(hasher.finalize().to_hex().to_string())
        }
    }
}

/// Hash `path`, or produce the error marker string if it cannot be read.
///
/// One unreadable file must not fail a whole manifest, so the failure is
/// logged and embedded in the record instead.
pub fn hash_or_marker(path: &Path, algorithm: HashAlgorithm) -> String {
    match hash_file(path, algorithm) {
        Ok(hex) => hex,
        Err(err) => {
            tracing::warn!("Failed to hash {}: {err}", path.display());
            format!("{HASH_ERROR_PREFIX}{err}")
        }
    }
}

/// `true` if a stored hash value is an error marker rather than a digest.
pub fn is_error_marker(value: &str) -> bool {
    value.starts_with(HASH_ERROR_PREFIX)
}

fn digest_chunks<D: Digest, R: Read>(reader: R) -> io::Result<String> {
    let mut hasher = D::new();
    for_each_chunk(reader, |chunk| hasher.update(chunk))?;
    Ok(hex::encode(hasher.finalize()))
}

fn for_each_chunk<R: Read>(mut reader: R, mut sink: impl FnMut(&[u8])) -> io::Result<()> {
    let mut buffer = [0u8; CHUNK_SIZE];
    loop {
        let n = match reader.read(&mut buffer) {
            Ok(0) => return Ok(()),
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        };
        sink(&buffer[..n]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn md5_of_known_content() {
        let digest = hash_reader(&b"hello world"[..], HashAlgorithm::Md5).unwrap();
        assert_eq!(digest, "5eb63bbbe01eeed093cb22bb8f5acdc3");
    }

    #[test]
    fn sha256_of_empty_input() {
        let digest = hash_reader(&b""[..], HashAlgorithm::Sha256).unwrap();
        assert_eq!(
            digest,
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn blake3_of_empty_input() {
        let digest = hash_reader(&b""[..], HashAlgorithm::Blake3).unwrap();
        assert_eq!(
            digest,
            "af1349b9f5f9a1a6a0404dea36dcc9499bcb25c9adc112b7cc9a93cae41f3262"
        );
    }

    /// Content larger than one chunk must hash the same as a single read.
    #[test]
    fn multi_chunk_file_matches_in_memory_digest() {
        let content: Vec<u8> = (0..CHUNK_SIZE * 3 + 17).map(|i| (i % 251) as u8).collect();
        let mut tmp = NamedTempFile::new().unwrap();
        tmp.as_file_mut().write_all(&content).unwrap();

        let from_file = hash_file(tmp.path(), HashAlgorithm::Md5).unwrap();
        let from_memory = hash_reader(&content[..], HashAlgorithm::Md5).unwrap();
        assert_eq!(from_file, from_memory);
    }

    #[test]
    fn missing_file_yields_error_marker() {
        let dir = tempfile::tempdir().unwrap();
        let marker = hash_or_marker(&dir.path().join("gone.bin"), HashAlgorithm::Md5);
        assert!(is_error_marker(&marker), "got {marker}");
    }

    #[test]
    fn parse_algorithm_names() {
        assert_eq!("MD5".parse::<HashAlgorithm>().unwrap(), HashAlgorithm::Md5);
        assert_eq!(" sha256 ".parse::<HashAlgorithm>().unwrap(), HashAlgorithm::Sha256);
        assert_eq!("blake3".parse::<HashAlgorithm>().unwrap(), HashAlgorithm::Blake3);
        assert!("crc32".parse::<HashAlgorithm>().is_err());
    }
}

//! xxHash-based content fingerprinting
//!
//! Produces the short hash embedded in destination filenames. The hash
//! disambiguates same-timestamp outputs; it is not a security primitive.

use std::fs::File;
use std::io::{self, Read};
use std::path::Path;
use tracing::{trace, warn};
use xxhash_rust::xxh3::Xxh3;

/// Sentinel returned when hashing fails; a low-confidence value,
/// never an error signal. Hash failures must not block the batch.
pub const HASH_FALLBACK: &str = "00000000";

/// Read chunk size
const CHUNK_SIZE: usize = 4096;

/// Compute an 8-hex-character fingerprint from up to `prefix_limit`
/// bytes of file content (`None` = whole file).
///
/// On any I/O failure this degrades to [`HASH_FALLBACK`] rather than
/// propagating an error.
pub fn content_hash(path: &Path, prefix_limit: Option<u64>) -> String {
    match hash_prefix(path, prefix_limit) {
        Ok(hash) => hash,
        Err(e) => {
            warn!(?path, error = %e, "Hash computation failed, using fallback");
            HASH_FALLBACK.to_string()
        }
    }
}

fn hash_prefix(path: &Path, prefix_limit: Option<u64>) -> io::Result<String> {
    let mut file = File::open(path)?;
    let mut hasher = Xxh3::new();
    let mut buffer = [0u8; CHUNK_SIZE];
    let mut remaining = prefix_limit.unwrap_or(u64::MAX);

    while remaining > 0 {
        let want = remaining.min(CHUNK_SIZE as u64) as usize;
        let read = file.read(&mut buffer[..want])?;
        if read == 0 {
            break;
        }
        hasher.update(&buffer[..read]);
        remaining -= read as u64;
    }

    let digest = format!("{:016x}", hasher.digest());
    trace!(?path, digest, "Computed content hash");
    Ok(digest[..8].to_string())
}

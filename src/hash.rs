//! xxHash-based content fingerprints for deduplication
//!
//! Files are streamed through XXH3-128 in fixed-size blocks so memory use
//! stays constant no matter how large a video is.

use crate::error::{Error, Result};
use std::fmt;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::trace;
use xxhash_rust::xxh3::Xxh3;

/// Size of each read block (64 KiB)
pub const BLOCK_SIZE: usize = 64 * 1024;

/// Content-derived identifier of a file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Fingerprint(u128);

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:032x}", self.0)
    }
}

/// Compute the fingerprint of a file's full content
pub fn compute_fingerprint(path: &Path) -> Result<Fingerprint> {
    let unreadable = |source| Error::Unreadable {
        path: path.to_path_buf(),
        source,
    };

    let mut file = File::open(path).map_err(unreadable)?;
    let fingerprint = fingerprint_reader(&mut file).map_err(unreadable)?;

    trace!(?path, %fingerprint, "Computed content fingerprint");
    Ok(fingerprint)
}

/// Fold everything the reader yields into one fingerprint
fn fingerprint_reader<R: Read>(reader: &mut R) -> std::io::Result<Fingerprint> {
    let mut hasher = Xxh3::new();
    let mut buffer = vec![0u8; BLOCK_SIZE];

    loop {
        let bytes_read = match reader.read(&mut buffer) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        };
        hasher.update(&buffer[..bytes_read]);
    }

    Ok(Fingerprint(hasher.digest128()))
}

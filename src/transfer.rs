//! File move and directory creation primitives

use crate::error::{Error, Result};
use std::fs::{self, File};
use std::io::{self, BufReader, BufWriter, Read, Write};
use std::path::Path;
use tracing::{debug, warn};

const COPY_BUFFER_SIZE: usize = 256 * 1024;

/// Create `dir` and all missing ancestors; existing directories are fine
pub fn ensure_dir(dir: &Path) -> Result<()> {
    fs::create_dir_all(dir)?;
    Ok(())
}

/// Move `source` to `dest`.
///
/// A plain rename is tried first. When that fails (typically across
/// volumes) the file is copied, verified, and the source removed. On any
/// failure the source is left in place and `dest` does not exist.
pub fn move_file(source: &Path, dest: &Path) -> Result<()> {
    let rename_err = match fs::rename(source, dest) {
        Ok(()) => return Ok(()),
        Err(e) => e,
    };
    debug!(?source, ?dest, error = %rename_err, "Rename failed, falling back to copy");

    copy_then_remove(source, dest).map_err(|e| Error::Move {
        from: source.to_path_buf(),
        to: dest.to_path_buf(),
        source: e,
    })
}

fn copy_then_remove(source: &Path, dest: &Path) -> io::Result<()> {
    let source_size = fs::metadata(source)?.len();
    let src_file = File::open(source)?;
    // create_new: an existing destination is an error, never overwritten
    let dest_file = File::options().write(true).create_new(true).open(dest)?;

    let result = copy_contents(src_file, dest_file).and_then(|()| {
        let dest_size = fs::metadata(dest)?.len();
        if dest_size != source_size {
            return Err(io::Error::other(format!(
                "copy verification failed: source {} bytes, dest {} bytes",
                source_size, dest_size
            )));
        }
        preserve_mtime(source, dest);
        fs::remove_file(source)
    });

    if let Err(e) = result {
        if let Err(cleanup) = fs::remove_file(dest) {
            warn!(?dest, error = %cleanup, "Failed to remove partial copy");
        }
        return Err(e);
    }
    Ok(())
}

/// Copy with buffered I/O
fn copy_contents(src_file: File, dest_file: File) -> io::Result<()> {
    let mut reader = BufReader::with_capacity(COPY_BUFFER_SIZE, src_file);
    let mut writer = BufWriter::with_capacity(COPY_BUFFER_SIZE, dest_file);

    let mut buffer = vec![0u8; COPY_BUFFER_SIZE];
    loop {
        let bytes_read = reader.read(&mut buffer)?;
        if bytes_read == 0 {
            break;
        }
        writer.write_all(&buffer[..bytes_read])?;
    }

    writer.flush()?;
    Ok(())
}

fn preserve_mtime(source: &Path, dest: &Path) {
    if let Ok(mtime) = fs::metadata(source).and_then(|m| m.modified()) {
        let _ = filetime::set_file_mtime(dest, filetime::FileTime::from_system_time(mtime));
    }
}

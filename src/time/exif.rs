//! EXIF capture time extraction for photos

use crate::error::{Error, Result};
use chrono::NaiveDateTime;
use exif::{In, Reader, Tag, Value};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use tracing::trace;

/// EXIF datetime layout: "YYYY:MM:DD HH:MM:SS"
pub const EXIF_DATETIME_FORMAT: &str = "%Y:%m:%d %H:%M:%S";

/// Read the raw `DateTimeOriginal` string from a photo.
///
/// `Ok(None)` means the file has EXIF data but no usable capture time field.
/// Every other failure (unreadable file, no EXIF container, corrupt data) is
/// an `Err` so callers can tell the cases apart.
pub fn read_capture_time(path: &Path) -> Result<Option<String>> {
    let metadata_error = |message: String| Error::Metadata {
        path: path.to_path_buf(),
        message,
    };

    let file = File::open(path).map_err(|e| metadata_error(e.to_string()))?;
    let mut reader = BufReader::new(file);

    let exif = Reader::new()
        .read_from_container(&mut reader)
        .map_err(|e| metadata_error(e.to_string()))?;

    let Some(field) = exif.get_field(Tag::DateTimeOriginal, In::PRIMARY) else {
        return Ok(None);
    };

    let raw = match field.value {
        Value::Ascii(ref parts) => parts
            .first()
            .map(|bytes| String::from_utf8_lossy(bytes).into_owned()),
        _ => None,
    };

    trace!(?path, ?raw, "Read EXIF DateTimeOriginal");
    Ok(raw)
}

/// Parse an EXIF capture time; anything but the exact EXIF layout is rejected
pub fn parse_capture_time(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim_end_matches('\0');
    if !has_exif_layout(s) {
        return None;
    }
    NaiveDateTime::parse_from_str(s, EXIF_DATETIME_FORMAT).ok()
}

/// Byte-level check for `DDDD:DD:DD DD:DD:DD`.
///
/// chrono's `%Y` takes any number of digits and an optional sign, so the
/// field widths are enforced here.
fn has_exif_layout(s: &str) -> bool {
    const LAYOUT: &[u8; 19] = b"dddd:dd:dd dd:dd:dd";

    let bytes = s.as_bytes();
    bytes.len() == LAYOUT.len()
        && bytes.iter().zip(LAYOUT).all(|(&b, &l)| match l {
            b'd' => b.is_ascii_digit(),
            sep => b == sep,
        })
}

#![allow(dead_code)]

use filetime::{FileTime, set_file_mtime};
use std::fs;
use std::path::Path;

/// 2019-07-01 12:00:00 UTC
pub const MID_2019: i64 = 1_561_982_400;
/// 2021-06-15 12:00:00 UTC
pub const MID_2021: i64 = 1_623_758_400;
/// 2023-06-15 12:00:00 UTC
pub const MID_2023: i64 = 1_686_830_400;

/// Minimal JPEG whose EXIF block holds only `DateTimeOriginal`.
///
/// `body` lands in a comment segment so callers can vary the content
/// without touching the metadata.
pub fn jpeg_with_capture_time(datetime: &str, body: &[u8]) -> Vec<u8> {
    assert_eq!(datetime.len(), 19, "EXIF datetime is always 19 chars");

    // Big-endian TIFF: header, IFD0 at 8 with the Exif pointer, Exif IFD
    // at 26 with DateTimeOriginal, string at 44
    let mut tiff = Vec::new();
    tiff.extend_from_slice(b"MM\x00\x2a");
    tiff.extend_from_slice(&8u32.to_be_bytes());

    tiff.extend_from_slice(&1u16.to_be_bytes());
    tiff.extend_from_slice(&0x8769u16.to_be_bytes());
    tiff.extend_from_slice(&4u16.to_be_bytes());
    tiff.extend_from_slice(&1u32.to_be_bytes());
    tiff.extend_from_slice(&26u32.to_be_bytes());
    tiff.extend_from_slice(&0u32.to_be_bytes());

    tiff.extend_from_slice(&1u16.to_be_bytes());
    tiff.extend_from_slice(&0x9003u16.to_be_bytes());
    tiff.extend_from_slice(&2u16.to_be_bytes());
    tiff.extend_from_slice(&20u32.to_be_bytes());
    tiff.extend_from_slice(&44u32.to_be_bytes());
    tiff.extend_from_slice(&0u32.to_be_bytes());

    tiff.extend_from_slice(datetime.as_bytes());
    tiff.push(0);
    assert_eq!(tiff.len(), 64);

    let mut jpeg = vec![0xFF, 0xD8];

    jpeg.extend_from_slice(&[0xFF, 0xE1]);
    jpeg.extend_from_slice(&((2 + 6 + tiff.len()) as u16).to_be_bytes());
    jpeg.extend_from_slice(b"Exif\0\0");
    jpeg.extend_from_slice(&tiff);

    jpeg.extend_from_slice(&[0xFF, 0xFE]);
    jpeg.extend_from_slice(&((2 + body.len()) as u16).to_be_bytes());
    jpeg.extend_from_slice(body);

    jpeg.extend_from_slice(&[0xFF, 0xD9]);
    jpeg
}

/// Write `content` to `path`, creating parents, and pin its mtime
pub fn write_file(path: &Path, content: &[u8], mtime_unix: i64) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
    set_file_mtime(path, FileTime::from_unix_time(mtime_unix, 0)).unwrap();
}

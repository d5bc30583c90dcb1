mod common;

use common::{MID_2019, MID_2021, MID_2023, jpeg_with_capture_time, write_file};
use media_sorter::{Config, DateSource, ProcessingStatus, Processor};
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

struct Fixture {
    src: TempDir,
    dest: TempDir,
}

impl Fixture {
    fn new() -> Self {
        Self {
            src: TempDir::new().unwrap(),
            dest: TempDir::new().unwrap(),
        }
    }

    fn src_path(&self, rel: &str) -> PathBuf {
        self.src.path().canonicalize().unwrap().join(rel)
    }

    fn dest_path(&self, rel: &str) -> PathBuf {
        self.dest.path().canonicalize().unwrap().join(rel)
    }

    fn processor(&self) -> Processor {
        Processor::new(Config::new(self.src.path(), self.dest.path())).unwrap()
    }
}

#[test]
fn test_identical_photos_keep_first_and_use_exif_year() {
    let fx = Fixture::new();
    let bytes = jpeg_with_capture_time("2020:05:01 10:00:00", b"beach");
    write_file(&fx.src_path("a.jpg"), &bytes, MID_2023);
    write_file(&fx.src_path("b.jpg"), &bytes, MID_2023);

    let results = fx.processor().run().unwrap();
    assert_eq!(results.len(), 2);

    assert_eq!(results[0].status, ProcessingStatus::Moved);
    assert_eq!(results[0].destination, Some(fx.dest_path("2020/a.jpg")));
    assert_eq!(results[0].date.as_ref().unwrap().source, DateSource::Exif);

    assert_eq!(results[1].status, ProcessingStatus::Duplicate);
    assert_eq!(results[1].duplicate_of, Some(fx.src_path("a.jpg")));

    assert!(fx.dest_path("2020/a.jpg").exists());
    assert!(!fx.dest_path("2023").exists());
    assert!(fx.src_path("b.jpg").exists());
}

#[test]
fn test_existing_destination_name_gets_suffix() {
    let fx = Fixture::new();
    write_file(&fx.dest_path("2021/photo.jpg"), b"already organized", MID_2021);
    write_file(&fx.src_path("photo.jpg"), b"new shot", MID_2021);

    let results = fx.processor().run().unwrap();

    assert_eq!(results[0].status, ProcessingStatus::Moved);
    assert!(results[0].renamed);
    assert_eq!(results[0].destination, Some(fx.dest_path("2021/photo_1.jpg")));
    assert_eq!(fs::read(fx.dest_path("2021/photo.jpg")).unwrap(), b"already organized");
    assert_eq!(fs::read(fx.dest_path("2021/photo_1.jpg")).unwrap(), b"new shot");
}

#[test]
fn test_second_run_never_overwrites() {
    let fx = Fixture::new();
    write_file(&fx.src_path("photo.jpg"), b"first", MID_2021);
    fx.processor().run().unwrap();

    write_file(&fx.src_path("photo.jpg"), b"second", MID_2021);
    fx.processor().run().unwrap();

    write_file(&fx.src_path("photo.jpg"), b"third", MID_2021);
    fx.processor().run().unwrap();

    assert_eq!(fs::read(fx.dest_path("2021/photo.jpg")).unwrap(), b"first");
    assert_eq!(fs::read(fx.dest_path("2021/photo_1.jpg")).unwrap(), b"second");
    assert_eq!(fs::read(fx.dest_path("2021/photo_2.jpg")).unwrap(), b"third");
}

#[test]
fn test_same_name_in_one_run_is_numbered_in_encounter_order() {
    let fx = Fixture::new();
    write_file(&fx.src_path("a/IMG_0001.JPG"), b"one", MID_2019);
    write_file(&fx.src_path("b/IMG_0001.JPG"), b"two", MID_2019);
    write_file(&fx.src_path("c/IMG_0001.JPG"), b"three", MID_2019);

    let results = fx.processor().run().unwrap();
    let destinations: Vec<_> = results.iter().map(|r| r.destination.clone().unwrap()).collect();

    assert_eq!(
        destinations,
        vec![
            fx.dest_path("2019/IMG_0001.JPG"),
            fx.dest_path("2019/IMG_0001_1.JPG"),
            fx.dest_path("2019/IMG_0001_2.JPG"),
        ]
    );
    assert_eq!(fs::read(fx.dest_path("2019/IMG_0001_2.JPG")).unwrap(), b"three");
}

#[test]
fn test_hidden_and_unsupported_files_are_left_alone() {
    let fx = Fixture::new();
    write_file(&fx.src_path(".DS_Store"), b"finder", MID_2021);
    write_file(&fx.src_path("._clip.mov"), b"appledouble", MID_2021);
    write_file(&fx.src_path("notes.txt"), b"text", MID_2021);
    write_file(&fx.src_path("Thumbs.db"), b"thumbs", MID_2021);
    write_file(&fx.src_path("clip.mov"), b"movie", MID_2021);

    let mut processor = fx.processor();
    let results = processor.run().unwrap();

    assert_eq!(results.len(), 1);
    assert_eq!(results[0].source, fx.src_path("clip.mov"));
    for name in [".DS_Store", "._clip.mov", "notes.txt", "Thumbs.db"] {
        assert!(fx.src_path(name).exists(), "{} should stay in place", name);
    }
    assert_eq!(processor.stats().ignored, 4);
}

#[test]
fn test_unwritable_year_bucket_fails_file_but_run_continues() {
    let fx = Fixture::new();
    // A regular file where the 2019 folder should go
    write_file(&fx.dest_path("2019"), b"in the way", MID_2019);
    write_file(&fx.src_path("old.mp4"), b"old", MID_2019);
    write_file(&fx.src_path("new.mp4"), b"new", MID_2021);

    let mut processor = fx.processor();
    let results = processor.run().unwrap();

    let old = results.iter().find(|r| r.source == fx.src_path("old.mp4")).unwrap();
    assert_eq!(old.status, ProcessingStatus::Failed);
    assert!(old.error.is_some());
    assert!(fx.src_path("old.mp4").exists());

    let new = results.iter().find(|r| r.source == fx.src_path("new.mp4")).unwrap();
    assert_eq!(new.status, ProcessingStatus::Moved);
    assert!(fx.dest_path("2021/new.mp4").exists());

    assert_eq!(processor.stats().failed, 1);
    assert_eq!(processor.stats().moved, 1);
}

#[test]
fn test_destination_inside_source_is_not_reprocessed() {
    let fx = Fixture::new();
    let sorted = fx.src_path("Sorted");
    write_file(&sorted.join("2019/kept.mp4"), b"filed earlier", MID_2019);
    write_file(&fx.src_path("incoming.mp4"), b"new clip", MID_2021);

    let mut processor = Processor::new(Config::new(fx.src.path(), &sorted)).unwrap();
    let results = processor.run().unwrap();

    assert_eq!(results.len(), 1);
    assert_eq!(results[0].status, ProcessingStatus::Moved);
    assert_eq!(results[0].destination, Some(sorted.join("2021/incoming.mp4")));
    assert!(sorted.join("2019/kept.mp4").exists());

    // A second run finds nothing left to file
    let again = processor.run().unwrap();
    assert!(again.is_empty());
}

#[test]
fn test_same_source_and_destination_is_fatal() {
    let fx = Fixture::new();
    let err = Processor::new(Config::new(fx.src.path(), fx.src.path())).err().unwrap();
    assert!(err.is_fatal());
}

#[test]
fn test_missing_destination_aborts_before_touching_files() {
    let fx = Fixture::new();
    write_file(&fx.src_path("a.jpg"), b"a", MID_2021);

    let config = Config::new(fx.src.path(), fx.dest.path().join("missing"));
    let err = Processor::new(config).err().unwrap();

    assert!(err.is_fatal());
    assert!(fx.src_path("a.jpg").exists());
}

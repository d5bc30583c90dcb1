//! First-seen-wins duplicate tracking for a single run

use crate::hash::Fingerprint;
use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::path::{Path, PathBuf};

/// Outcome of checking a fingerprint against the registry
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DuplicateCheck {
    /// First file with this content; it is now the canonical path
    Unique,
    /// Content already seen at the given path
    Duplicate(PathBuf),
}

/// Maps each fingerprint to the first path observed with it.
///
/// One tracker lives for exactly one run; nothing is persisted.
#[derive(Debug, Default)]
pub struct DuplicateTracker {
    seen: HashMap<Fingerprint, PathBuf>,
}

impl DuplicateTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `path` for `fingerprint` unless the content was seen before
    pub fn check_and_register(&mut self, fingerprint: Fingerprint, path: &Path) -> DuplicateCheck {
        match self.seen.entry(fingerprint) {
            Entry::Occupied(original) => DuplicateCheck::Duplicate(original.get().clone()),
            Entry::Vacant(slot) => {
                slot.insert(path.to_path_buf());
                DuplicateCheck::Unique
            }
        }
    }

    /// Number of distinct contents seen so far
    pub fn len(&self) -> usize {
        self.seen.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hash::compute_fingerprint;
    use std::fs;
    use tempfile::TempDir;

    fn fingerprint_of(dir: &TempDir, name: &str, content: &[u8]) -> (PathBuf, Fingerprint) {
        let path = dir.path().join(name);
        fs::write(&path, content).unwrap();
        let fp = compute_fingerprint(&path).unwrap();
        (path, fp)
    }

    #[test]
    fn test_first_seen_wins() {
        let dir = TempDir::new().unwrap();
        let (a, fp_a) = fingerprint_of(&dir, "a.jpg", b"same bytes");
        let (b, fp_b) = fingerprint_of(&dir, "b.jpg", b"same bytes");
        let (c, fp_c) = fingerprint_of(&dir, "c.jpg", b"same bytes");

        let mut tracker = DuplicateTracker::new();
        assert_eq!(tracker.check_and_register(fp_a, &a), DuplicateCheck::Unique);
        assert_eq!(
            tracker.check_and_register(fp_b, &b),
            DuplicateCheck::Duplicate(a.clone())
        );
        // Later duplicates still point at the first file, not the previous one
        assert_eq!(
            tracker.check_and_register(fp_c, &c),
            DuplicateCheck::Duplicate(a.clone())
        );
        assert_eq!(tracker.len(), 1);
    }

    #[test]
    fn test_distinct_content_is_unique() {
        let dir = TempDir::new().unwrap();
        let (a, fp_a) = fingerprint_of(&dir, "a.jpg", b"one");
        let (b, fp_b) = fingerprint_of(&dir, "b.jpg", b"two");

        let mut tracker = DuplicateTracker::new();
        assert_eq!(tracker.check_and_register(fp_a, &a), DuplicateCheck::Unique);
        assert_eq!(tracker.check_and_register(fp_b, &b), DuplicateCheck::Unique);
        assert_eq!(tracker.len(), 2);
    }

    #[test]
    fn test_trackers_do_not_share_state() {
        let dir = TempDir::new().unwrap();
        let (a, fp) = fingerprint_of(&dir, "a.jpg", b"bytes");

        let mut first = DuplicateTracker::new();
        first.check_and_register(fp, &a);

        let mut second = DuplicateTracker::new();
        assert!(second.is_empty());
        assert_eq!(second.check_and_register(fp, &a), DuplicateCheck::Unique);
    }
}

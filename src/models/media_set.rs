//! Directory snapshot loader for carousel and slideshow items.
//!
//! The snapshot is taken once: files added to the directory afterwards are
//! not picked up by an existing `MediaSet`.

use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, info, trace};
use walkdir::WalkDir;

use crate::models::{MediaItem, MediaType};

/// Configuration for the directory snapshot.
#[derive(Debug, Clone)]
pub struct ScanConfig {
    /// Whether to descend into subdirectories.
    pub recursive: bool,
    /// Maximum directory depth when recursive (0 = unlimited).
    pub max_depth: usize,
    /// Whether to follow symbolic links.
    pub follow_symlinks: bool,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            recursive: false,
            max_depth: 0, // unlimited
            follow_symlinks: false,
        }
    }
}

#[derive(Debug, Error)]
pub enum ScanError {
    #[error("not a directory: {0:?}")]
    NotADirectory(PathBuf),
    #[error("failed to walk media directory")]
    Walk(#[from] walkdir::Error),
}

/// An ordered, immutable snapshot of media items.
#[derive(Debug, Clone, Default)]
pub struct MediaSet {
    items: Vec<MediaItem>,
}

impl MediaSet {
    pub fn from_items(items: Vec<MediaItem>) -> Self {
        Self { items }
    }

    /// Snapshot the images found in `dir`, sorted by path.
    ///
    /// Unreadable entries below the root are skipped; a failure on the root
    /// itself is reported.
    pub fn scan(dir: &Path, config: &ScanConfig) -> Result<Self, ScanError> {
        if !dir.is_dir() {
            return Err(ScanError::NotADirectory(dir.to_path_buf()));
        }

        let mut walker = WalkDir::new(dir).follow_links(config.follow_symlinks);
        if !config.recursive {
            walker = walker.max_depth(1);
        } else if config.max_depth > 0 {
            walker = walker.max_depth(config.max_depth);
        }

        let mut paths = Vec::new();
        let entries = walker.into_iter().filter_entry(|entry| {
            entry.depth() == 0
                || entry
                    .file_name()
                    .to_str()
                    .map(|name| !name.starts_with('.'))
                    .unwrap_or(true)
        });

        for entry in entries {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) if err.depth() == 0 => return Err(err.into()),
                Err(err) => {
                    debug!(error = %err, "Skipping unreadable entry");
                    continue;
                }
            };
            if !entry.file_type().is_file() {
                continue;
            }
            if MediaType::from_path(entry.path()) != Some(MediaType::Image) {
                trace!(path = ?entry.path(), "Skipping non-image file");
                continue;
            }
            paths.push(entry.into_path());
        }

        // Sort by path for consistent ordering
        paths.sort();

        let items: Vec<MediaItem> = paths
            .iter()
            .enumerate()
            .map(|(position, path)| {
                let alt = path.file_stem().and_then(|s| s.to_str()).map(alt_from_stem);
                MediaItem::with_fallback_alt(path.to_string_lossy(), alt.as_deref(), position)
            })
            .collect();

        info!(count = items.len(), dir = ?dir, "Media snapshot taken");
        Ok(Self { items })
    }

    pub fn items(&self) -> &[MediaItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn into_items(self) -> Vec<MediaItem> {
        self.items
    }
}

/// Turn a file stem like `first-aid_2023` into `first aid 2023`.
fn alt_from_stem(stem: &str) -> String {
    stem.split(|c: char| c == '-' || c == '_')
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::{self, File};
    use tempfile::tempdir;

    #[test]
    fn test_scan_config_default() {
        let config = ScanConfig::default();
        assert!(!config.recursive);
        assert_eq!(config.max_depth, 0);
        assert!(!config.follow_symlinks);
    }

    #[test]
    fn test_scan_empty_dir() {
        let dir = tempdir().unwrap();
        let set = MediaSet::scan(dir.path(), &ScanConfig::default()).unwrap();
        assert!(set.is_empty());
    }

    #[test]
    fn test_scan_filters_and_sorts() {
        let dir = tempdir().unwrap();
        File::create(dir.path().join("b-cert.png")).unwrap();
        File::create(dir.path().join("a_cert.jpg")).unwrap();
        File::create(dir.path().join("notes.txt")).unwrap();
        File::create(dir.path().join("clip.mp4")).unwrap();
        File::create(dir.path().join(".hidden.png")).unwrap();

        let set = MediaSet::scan(dir.path(), &ScanConfig::default()).unwrap();
        assert_eq!(set.len(), 2);
        assert!(set.items()[0].source().ends_with("a_cert.jpg"));
        assert_eq!(set.items()[0].alt_text(), "a cert");
        assert!(set.items()[1].source().ends_with("b-cert.png"));
        assert_eq!(set.items()[1].alt_text(), "b cert");
    }

    #[test]
    fn test_scan_recursive() {
        let dir = tempdir().unwrap();
        let subdir = dir.path().join("subdir");
        fs::create_dir(&subdir).unwrap();
        File::create(dir.path().join("root.png")).unwrap();
        File::create(subdir.join("nested.png")).unwrap();

        let config = ScanConfig {
            recursive: true,
            ..Default::default()
        };
        assert_eq!(MediaSet::scan(dir.path(), &config).unwrap().len(), 2);

        let config = ScanConfig::default();
        assert_eq!(MediaSet::scan(dir.path(), &config).unwrap().len(), 1);
    }

    #[test]
    fn test_scan_rejects_file_root() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("single.png");
        File::create(&file).unwrap();

        let err = MediaSet::scan(&file, &ScanConfig::default()).unwrap_err();
        assert!(matches!(err, ScanError::NotADirectory(_)));
    }

    #[test]
    fn test_snapshot_does_not_follow_later_changes() {
        let dir = tempdir().unwrap();
        File::create(dir.path().join("one.png")).unwrap();
        let set = MediaSet::scan(dir.path(), &ScanConfig::default()).unwrap();

        File::create(dir.path().join("two.png")).unwrap();
        assert_eq!(set.len(), 1);
    }
}

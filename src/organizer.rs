//! Two-pass organization of a single directory.
//!
//! Pass 1 moves every primary entry to its classified destination. Images
//! take their sidecar along. Sidecar entries are held back until pass 2,
//! where whatever an image did not already claim goes to `Misc`. Holding
//! them back means a sidecar is moved exactly once, whichever order the
//! directory listing produced.

use crate::config::SkipRules;
use crate::file_category::{self, Category, Destination};
use crate::file_organizer::{FileOrganizer, OrganizeError, OrganizeResult};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// How an entry came to be moved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveKind {
    /// Moved on its own, by classification.
    Primary,
    /// Moved alongside its image.
    Sidecar,
    /// A sidecar no image claimed, moved to `Misc`.
    OrphanSidecar,
}

/// A single completed move.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MovedEntry {
    pub from: PathBuf,
    pub to: PathBuf,
    pub destination: Destination,
    pub kind: MoveKind,
}

/// Everything a run did.
#[derive(Debug, Default)]
pub struct OrganizeReport {
    /// Moves in the order they happened.
    pub moved: Vec<MovedEntry>,
    /// Entries left in place: category directories and skip-list matches.
    pub skipped: Vec<PathBuf>,
}

impl OrganizeReport {
    /// True if nothing was moved.
    pub fn is_empty(&self) -> bool {
        self.moved.is_empty()
    }

    /// Number of moved entries per destination.
    pub fn count_by_destination(&self) -> BTreeMap<Destination, usize> {
        let mut counts = BTreeMap::new();
        for entry in &self.moved {
            *counts.entry(entry.destination).or_insert(0) += 1;
        }
        counts
    }

    /// The move that relocated `from`, if any.
    pub fn find(&self, from: &Path) -> Option<&MovedEntry> {
        self.moved.iter().find(|m| m.from == from)
    }

    fn record(&mut self, from: PathBuf, to: PathBuf, destination: Destination, kind: MoveKind) {
        self.moved.push(MovedEntry {
            from,
            to,
            destination,
            kind,
        });
    }
}

/// Organizes a directory according to extension classification.
#[derive(Debug, Clone, Default)]
pub struct Organizer {
    skip: SkipRules,
}

impl Organizer {
    pub fn new(skip: SkipRules) -> Self {
        Self { skip }
    }

    /// Organizes `root` without progress reporting.
    pub fn organize(&self, root: &Path) -> OrganizeResult<OrganizeReport> {
        self.organize_with_progress(root, |_, _, _| {})
    }

    /// Organizes `root`, calling `on_progress(done, total, name)` after each
    /// entry of the first pass.
    ///
    /// # Errors
    ///
    /// Fails before touching anything if `root` is missing or not a
    /// directory. Any failure moving a primary entry aborts the run; entries
    /// already moved stay moved.
    pub fn organize_with_progress<F>(
        &self,
        root: &Path,
        mut on_progress: F,
    ) -> OrganizeResult<OrganizeReport>
    where
        F: FnMut(usize, usize, &str),
    {
        validate_root(root)?;
        info!(root = %root.display(), "organizing");

        let entries = list_entries(root)?;
        let total = entries.len();
        let mut report = OrganizeReport::default();
        let mut deferred_sidecars = Vec::new();

        for (i, (name, path)) in entries.into_iter().enumerate() {
            if Category::from_dir_name(&name).is_some() || self.skip.should_skip(&name) {
                debug!(entry = %name, "skipped");
                report.skipped.push(path);
            } else if file_category::is_sidecar(&name) {
                debug!(entry = %name, "deferred sidecar");
                deferred_sidecars.push(path);
            } else {
                move_primary(root, path, &mut report)?;
            }
            on_progress(i + 1, total, &name);
        }

        let misc_dir = root.join(Destination::MISC.relative_path());
        for sidecar in deferred_sidecars {
            match FileOrganizer::move_file(&sidecar, &misc_dir) {
                Ok(to) => report.record(sidecar, to, Destination::MISC, MoveKind::OrphanSidecar),
                Err(e) if e.is_not_found() => {
                    debug!(sidecar = %sidecar.display(), "already moved with its image");
                }
                Err(e) => return Err(e),
            }
        }

        info!(moved = report.moved.len(), skipped = report.skipped.len(), "done");
        Ok(report)
    }
}

fn validate_root(root: &Path) -> OrganizeResult<()> {
    let reason = match fs::metadata(root) {
        Ok(meta) if meta.is_dir() => return Ok(()),
        Ok(_) => "not a directory".to_string(),
        Err(e) => e.to_string(),
    };
    Err(OrganizeError::InvalidRoot {
        path: root.to_path_buf(),
        reason,
    })
}

/// Snapshot of the immediate entries of `root`, sorted by name.
fn list_entries(root: &Path) -> OrganizeResult<Vec<(String, PathBuf)>> {
    let read_error = |e: std::io::Error| OrganizeError::ReadDirectory {
        path: root.to_path_buf(),
        source: e,
    };

    let mut entries = fs::read_dir(root)
        .map_err(read_error)?
        .map(|entry| {
            let entry = entry.map_err(read_error)?;
            Ok((entry.file_name().to_string_lossy().into_owned(), entry.path()))
        })
        .collect::<OrganizeResult<Vec<_>>>()?;

    entries.sort();
    Ok(entries)
}

fn move_primary(root: &Path, path: PathBuf, report: &mut OrganizeReport) -> OrganizeResult<()> {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let destination = file_category::classify(&name);
    let dest_dir = root.join(destination.relative_path());

    if destination.is_image() {
        let moved = FileOrganizer::move_image_with_sidecar(&path, &dest_dir)?;
        report.record(path, moved.image, destination, MoveKind::Primary);

        if let Some((from, to)) = moved.sidecar {
            report.record(from, to, destination, MoveKind::Sidecar);
        }
    } else {
        let to = FileOrganizer::move_file(&path, &dest_dir)?;
        report.record(path, to, destination, MoveKind::Primary);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::file_category::Subcategory;
    use tempfile::TempDir;

    fn touch(dir: &Path, name: &str) {
        fs::write(dir.join(name), name).expect("Failed to write test file");
    }

    #[test]
    fn test_invalid_root() {
        let temp_dir = TempDir::new().unwrap();
        let missing = temp_dir.path().join("nope");

        let err = Organizer::default().organize(&missing).unwrap_err();
        assert!(matches!(err, OrganizeError::InvalidRoot { .. }));
    }

    #[test]
    fn test_root_is_a_file() {
        let temp_dir = TempDir::new().unwrap();
        touch(temp_dir.path(), "file.txt");

        let err = Organizer::default()
            .organize(&temp_dir.path().join("file.txt"))
            .unwrap_err();
        assert!(matches!(err, OrganizeError::InvalidRoot { .. }));
    }

    #[test]
    fn test_sidecar_recorded_with_image() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        touch(root, "c.dng");
        touch(root, "c.xmp");

        let report = Organizer::default().organize(root).unwrap();

        let sidecar = report.find(&root.join("c.xmp")).expect("sidecar moved");
        assert_eq!(sidecar.kind, MoveKind::Sidecar);
        assert_eq!(sidecar.destination, Destination::sub(Subcategory::Raw));
        assert_eq!(sidecar.to, root.join("Images").join("Raw").join("c.xmp"));
        assert_eq!(report.moved.len(), 2);
    }

    #[test]
    fn test_orphan_sidecar_recorded() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        touch(root, "e.xmp");

        let report = Organizer::default().organize(root).unwrap();

        let orphan = report.find(&root.join("e.xmp")).unwrap();
        assert_eq!(orphan.kind, MoveKind::OrphanSidecar);
        assert_eq!(orphan.to, root.join("Misc").join("e.xmp"));
    }

    #[test]
    fn test_category_dirs_and_skip_list_are_skipped() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        fs::create_dir(root.join("Images")).unwrap();
        touch(root, ".DS_Store");

        let report = Organizer::default().organize(root).unwrap();

        assert!(report.is_empty());
        assert_eq!(report.skipped.len(), 2);
    }

    #[test]
    fn test_progress_sees_every_entry() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        touch(root, "a.py");
        touch(root, "b.xmp");
        touch(root, ".DS_Store");

        let mut seen = Vec::new();
        Organizer::default()
            .organize_with_progress(root, |done, total, name| {
                seen.push((done, total, name.to_string()))
            })
            .unwrap();

        assert_eq!(
            seen,
            vec![
                (1, 3, ".DS_Store".to_string()),
                (2, 3, "a.py".to_string()),
                (3, 3, "b.xmp".to_string()),
            ]
        );
    }

    #[test]
    fn test_count_by_destination() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        touch(root, "a.jpg");
        touch(root, "b.png");
        touch(root, "c.zip");

        let counts = Organizer::default().organize(root).unwrap().count_by_destination();

        assert_eq!(counts[&Destination::category(Category::Images)], 2);
        assert_eq!(counts[&Destination::category(Category::Archives)], 1);
        assert_eq!(counts.len(), 2);
    }

    #[test]
    fn test_claimed_sidecar_does_not_create_misc() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        touch(root, "c.dng");
        touch(root, "c.xmp");
        touch(root, "d.png");
        touch(root, "d.xmp");

        let report = Organizer::default().organize(root).unwrap();

        assert_eq!(report.moved.len(), 4);
        assert!(!root.join("Misc").exists());
    }
}

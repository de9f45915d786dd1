//! Filesystem side of organizing: creating destination directories and
//! renaming entries into them.
//!
//! Every move is a single `fs::rename`. There is no copy fallback, so moving
//! across volumes fails with the underlying OS error.

use crate::file_category::SIDECAR_EXTENSION;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

/// Errors that can occur while organizing a directory.
#[derive(Debug, Error)]
pub enum OrganizeError {
    /// The directory to organize does not exist or is not a directory.
    #[error("Invalid directory {path}: {reason}")]
    InvalidRoot { path: PathBuf, reason: String },

    /// The directory to organize could not be listed.
    #[error("Failed to read directory {path}: {source}")]
    ReadDirectory {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A destination directory could not be created.
    #[error("Failed to create directory {path}: {source}")]
    DirectoryCreation {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// An entry could not be renamed into its destination.
    #[error("Failed to move {from} to {to}: {source}")]
    Move {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl OrganizeError {
    /// True if a move failed because its source no longer exists.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Move { source, .. } if source.kind() == io::ErrorKind::NotFound)
    }
}

/// Result type for file organization operations.
pub type OrganizeResult<T> = Result<T, OrganizeError>;

/// Where an image and its sidecar ended up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageMove {
    /// New path of the image.
    pub image: PathBuf,
    /// Original and new path of the sidecar, if one was found.
    pub sidecar: Option<(PathBuf, PathBuf)>,
}

/// Performs the moves that place entries into destination directories.
pub struct FileOrganizer;

impl FileOrganizer {
    /// Creates `path` and any missing parents. Succeeds if it already exists.
    pub fn ensure_dir(path: &Path) -> OrganizeResult<()> {
        fs::create_dir_all(path).map_err(|e| OrganizeError::DirectoryCreation {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Moves `file` into `dest_dir`, keeping its name, and returns the new path.
    ///
    /// `dest_dir` is created if needed, but only once the source is known to
    /// exist. A source that has vanished surfaces as an error for which
    /// [`OrganizeError::is_not_found`] is true, and leaves no directory behind.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use sortdir::file_organizer::FileOrganizer;
    /// use std::path::Path;
    ///
    /// let moved = FileOrganizer::move_file(
    ///     Path::new("/path/to/dir/song.mp3"),
    ///     Path::new("/path/to/dir/Audio"),
    /// );
    ///
    /// match moved {
    ///     Ok(path) => println!("Moved to {}", path.display()),
    ///     Err(e) => eprintln!("Move failed: {}", e),
    /// }
    /// ```
    pub fn move_file(file: &Path, dest_dir: &Path) -> OrganizeResult<PathBuf> {
        if let Err(e) = fs::symlink_metadata(file) {
            return Err(OrganizeError::Move {
                from: file.to_path_buf(),
                to: dest_dir.to_path_buf(),
                source: e,
            });
        }
        Self::ensure_dir(dest_dir)?;

        let file_name = file.file_name().ok_or_else(|| OrganizeError::Move {
            from: file.to_path_buf(),
            to: dest_dir.to_path_buf(),
            source: io::Error::new(io::ErrorKind::InvalidInput, "path has no name component"),
        })?;
        let destination = dest_dir.join(file_name);

        fs::rename(file, &destination).map_err(|e| OrganizeError::Move {
            from: file.to_path_buf(),
            to: destination.clone(),
            source: e,
        })?;

        debug!(from = %file.display(), to = %destination.display(), "moved");
        Ok(destination)
    }

    /// Moves an image into `dest_dir` and takes its sidecar along if one exists.
    ///
    /// A missing sidecar is normal. Any failure moving the image itself is
    /// returned.
    pub fn move_image_with_sidecar(image: &Path, dest_dir: &Path) -> OrganizeResult<ImageMove> {
        let moved_image = Self::move_file(image, dest_dir)?;

        for sidecar in Self::sidecar_candidates(image) {
            match Self::move_file(&sidecar, dest_dir) {
                Ok(moved) => {
                    return Ok(ImageMove {
                        image: moved_image,
                        sidecar: Some((sidecar, moved)),
                    });
                }
                Err(e) if e.is_not_found() => {
                    debug!(sidecar = %sidecar.display(), "no sidecar");
                }
                Err(e) => return Err(e),
            }
        }

        Ok(ImageMove {
            image: moved_image,
            sidecar: None,
        })
    }

    /// Sidecar paths that may belong to `image`, in the order they are tried.
    ///
    /// The image's extension is swapped for `xmp`, then `XMP`. On
    /// case-insensitive filesystems both name the same file.
    pub fn sidecar_candidates(image: &Path) -> [PathBuf; 2] {
        [
            image.with_extension(SIDECAR_EXTENSION),
            image.with_extension(SIDECAR_EXTENSION.to_uppercase()),
        ]
    }
}

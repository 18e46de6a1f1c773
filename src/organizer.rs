//! Folder-ensure and file-move primitives for sorting a downloads directory.
//!
//! The two operations here are deliberately small: ensure a category
//! subfolder exists (idempotent), and move one file into it. What happens
//! when the destination name is already taken is decided by an explicit
//! [`ConflictPolicy`] rather than left to OS move semantics.

use clap::ValueEnum;
use std::fs;
use std::path::{Path, PathBuf};

/// Policy applied when the destination already holds a same-named file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ConflictPolicy {
    /// Leave the source file where it is and report a warning.
    #[default]
    Skip,
    /// Move the file under a timestamp-suffixed destination name.
    Rename,
    /// Replace the destination file.
    Overwrite,
}

/// What a single move operation actually did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveOutcome {
    /// The file was moved to `destination`.
    Moved {
        /// Final location of the file.
        destination: PathBuf,
    },
    /// The destination name was taken; the file was moved under a
    /// timestamp-suffixed name instead.
    Renamed {
        /// Final (suffixed) location of the file.
        destination: PathBuf,
    },
    /// The destination name was taken; the file was left in place.
    Skipped {
        /// The occupied destination path.
        destination: PathBuf,
    },
}

/// Errors that can occur while ensuring folders or moving files.
#[derive(Debug)]
pub enum SortError {
    /// The base directory path is invalid or doesn't exist.
    InvalidBasePath {
        path: PathBuf,
        source: std::io::Error,
    },
    /// Failed to create a category directory.
    DirectoryCreationFailed {
        path: PathBuf,
        source: std::io::Error,
    },
    /// The source file was not found under the downloads root at move time.
    SourceMissing { path: PathBuf },
    /// Failed to move a file to its category directory.
    FileMoveFailure {
        source: PathBuf,
        destination: PathBuf,
        source_error: std::io::Error,
    },
}

impl std::fmt::Display for SortError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidBasePath { path, source } => {
                write!(f, "Invalid base path {}: {}", path.display(), source)
            }
            Self::DirectoryCreationFailed { path, source } => {
                write!(
                    f,
                    "Failed to create directory {}: {}",
                    path.display(),
                    source
                )
            }
            Self::SourceMissing { path } => {
                write!(f, "Source file not found: {}", path.display())
            }
            Self::FileMoveFailure {
                source,
                destination,
                source_error,
            } => {
                write!(
                    f,
                    "Failed to move {} to {}: {}",
                    source.display(),
                    destination.display(),
                    source_error
                )
            }
        }
    }
}

impl std::error::Error for SortError {}

/// Result type for sorting operations.
pub type SortResult<T> = Result<T, SortError>;

/// Moves files into category subdirectories of a base directory.
pub struct Sorter;

impl Sorter {
    /// Ensures the category subfolder `<base_path>/<dir_name>` exists.
    ///
    /// Idempotent: an existing folder is not an error, and a concurrent
    /// creation race is tolerated via `create_dir_all`'s exist-ok semantics.
    ///
    /// # Returns
    ///
    /// The path to the subfolder, or `SortError::DirectoryCreationFailed` on
    /// an OS-level creation error (including a regular file occupying the
    /// folder's name).
    pub fn ensure_category_dir(base_path: &Path, dir_name: &str) -> SortResult<PathBuf> {
        let category_path = base_path.join(dir_name);

        fs::create_dir_all(&category_path).map_err(|e| SortError::DirectoryCreationFailed {
            path: category_path.clone(),
            source: e,
        })?;

        Ok(category_path)
    }

    /// Moves a file into its category subfolder within the base path.
    ///
    /// The category folder is ensured as part of the move. The source must be
    /// a regular file under the base path; a missing source is an error and
    /// never creates a destination entry. When the destination name is
    /// already taken, `policy` decides what happens.
    ///
    /// # Arguments
    ///
    /// * `base_path` - The root directory holding the category subfolders
    /// * `file_path` - The full path to the file to be moved
    /// * `dir_name` - The name of the subfolder for this file's category
    /// * `policy` - What to do when the destination name is taken
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use downsort::organizer::{ConflictPolicy, Sorter};
    /// use std::path::Path;
    ///
    /// let result = Sorter::move_to_category(
    ///     Path::new("/home/user/Downloads"),
    ///     Path::new("/home/user/Downloads/photo.png"),
    ///     "images",
    ///     ConflictPolicy::Skip,
    /// );
    ///
    /// match result {
    ///     Ok(outcome) => println!("{:?}", outcome),
    ///     Err(e) => eprintln!("Move failed: {}", e),
    /// }
    /// ```
    pub fn move_to_category(
        base_path: &Path,
        file_path: &Path,
        dir_name: &str,
        policy: ConflictPolicy,
    ) -> SortResult<MoveOutcome> {
        if !base_path.exists() {
            return Err(SortError::InvalidBasePath {
                path: base_path.to_path_buf(),
                source: std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    "base path does not exist",
                ),
            });
        }

        // Checked before the folder is ensured, so a bad source leaves the
        // tree untouched.
        if !file_path.is_file() {
            return Err(SortError::SourceMissing {
                path: file_path.to_path_buf(),
            });
        }

        let category_path = Self::ensure_category_dir(base_path, dir_name)?;

        let file_name = file_path
            .file_name()
            .ok_or_else(|| SortError::FileMoveFailure {
                source: file_path.to_path_buf(),
                destination: category_path.clone(),
                source_error: std::io::Error::new(
                    std::io::ErrorKind::InvalidInput,
                    "file has no name component",
                ),
            })?;

        let destination = category_path.join(file_name);

        if destination.exists() {
            return match policy {
                ConflictPolicy::Skip => Ok(MoveOutcome::Skipped { destination }),
                ConflictPolicy::Rename => {
                    let renamed = Self::timestamped_destination(&destination);
                    Self::rename(file_path, &renamed)?;
                    Ok(MoveOutcome::Renamed {
                        destination: renamed,
                    })
                }
                ConflictPolicy::Overwrite => {
                    // fs::rename over an existing file is not portable, so
                    // the occupant is removed first.
                    fs::remove_file(&destination).map_err(|e| SortError::FileMoveFailure {
                        source: file_path.to_path_buf(),
                        destination: destination.clone(),
                        source_error: e,
                    })?;
                    Self::rename(file_path, &destination)?;
                    Ok(MoveOutcome::Moved { destination })
                }
            };
        }

        Self::rename(file_path, &destination)?;
        Ok(MoveOutcome::Moved { destination })
    }

    fn rename(file_path: &Path, destination: &Path) -> SortResult<()> {
        fs::rename(file_path, destination).map_err(|e| SortError::FileMoveFailure {
            source: file_path.to_path_buf(),
            destination: destination.to_path_buf(),
            source_error: e,
        })
    }

    /// Generates a conflict-free destination name by appending a timestamp.
    ///
    /// Example: `file.txt` becomes `file.txt.20251109-143052`.
    fn timestamped_destination(destination: &Path) -> PathBuf {
        let timestamp = chrono::Local::now().format("%Y%m%d-%H%M%S");
        let filename = destination
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("file");

        let renamed = format!("{}.{}", filename, timestamp);

        if let Some(parent) = destination.parent() {
            parent.join(renamed)
        } else {
            PathBuf::from(renamed)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_ensure_category_dir_creates_directory() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let base_path = temp_dir.path();

        let path = Sorter::ensure_category_dir(base_path, "images").expect("ensure failed");

        assert_eq!(path, base_path.join("images"));
        assert!(path.is_dir());
    }

    #[test]
    fn test_ensure_category_dir_is_idempotent() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let base_path = temp_dir.path();

        let first = Sorter::ensure_category_dir(base_path, "pdf").expect("first ensure failed");
        let second = Sorter::ensure_category_dir(base_path, "pdf").expect("second ensure failed");

        assert_eq!(first, second);
        assert!(first.is_dir());
    }

    #[test]
    fn test_ensure_category_dir_fails_on_occupied_name() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let base_path = temp_dir.path();

        // A regular file where the folder should go.
        fs::write(base_path.join("images"), "not a directory").expect("Failed to write file");

        let result = Sorter::ensure_category_dir(base_path, "images");
        assert!(matches!(
            result,
            Err(SortError::DirectoryCreationFailed { .. })
        ));
    }

    #[test]
    fn test_move_to_category_creates_directory() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let base_path = temp_dir.path();

        let file_path = base_path.join("photo.png");
        fs::write(&file_path, "image data").expect("Failed to write test file");

        let outcome =
            Sorter::move_to_category(base_path, &file_path, "images", ConflictPolicy::Skip)
                .expect("Failed to move file");

        let category_dir = base_path.join("images");
        assert!(category_dir.is_dir());
        assert!(!file_path.exists());
        assert_eq!(
            outcome,
            MoveOutcome::Moved {
                destination: category_dir.join("photo.png")
            }
        );
    }

    #[test]
    fn test_move_to_category_uses_existing_directory() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let base_path = temp_dir.path();

        let category_dir = base_path.join("compressed");
        fs::create_dir(&category_dir).expect("Failed to create category directory");

        let file_path = base_path.join("backup.zip");
        fs::write(&file_path, "archive data").expect("Failed to write test file");

        Sorter::move_to_category(base_path, &file_path, "compressed", ConflictPolicy::Skip)
            .expect("Failed to move file");

        assert!(!file_path.exists());
        assert!(category_dir.join("backup.zip").exists());
    }

    #[test]
    fn test_move_to_category_invalid_base_path() {
        let non_existent = Path::new("/non/existent/path");
        let file_path = Path::new("/some/file.pdf");

        let result =
            Sorter::move_to_category(non_existent, file_path, "pdf", ConflictPolicy::Skip);
        assert!(matches!(result, Err(SortError::InvalidBasePath { .. })));
    }

    #[test]
    fn test_move_missing_source_creates_nothing() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let base_path = temp_dir.path();

        let file_path = base_path.join("ghost.pdf");
        let result = Sorter::move_to_category(base_path, &file_path, "pdf", ConflictPolicy::Skip);

        assert!(matches!(result, Err(SortError::SourceMissing { .. })));
        // Neither the folder nor a destination entry appears.
        assert!(!base_path.join("pdf").exists());
    }

    #[test]
    fn test_conflict_skip_leaves_source_in_place() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let base_path = temp_dir.path();

        let category_dir = base_path.join("images");
        fs::create_dir(&category_dir).expect("Failed to create category directory");
        fs::write(category_dir.join("photo.png"), "old").expect("Failed to write occupant");

        let file_path = base_path.join("photo.png");
        fs::write(&file_path, "new").expect("Failed to write test file");

        let outcome =
            Sorter::move_to_category(base_path, &file_path, "images", ConflictPolicy::Skip)
                .expect("Move should report a skip, not fail");

        assert_eq!(
            outcome,
            MoveOutcome::Skipped {
                destination: category_dir.join("photo.png")
            }
        );
        assert!(file_path.exists());
        let occupant = fs::read_to_string(category_dir.join("photo.png")).unwrap();
        assert_eq!(occupant, "old");
    }

    #[test]
    fn test_conflict_rename_moves_under_suffixed_name() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let base_path = temp_dir.path();

        let category_dir = base_path.join("pdf");
        fs::create_dir(&category_dir).expect("Failed to create category directory");
        fs::write(category_dir.join("report.pdf"), "old").expect("Failed to write occupant");

        let file_path = base_path.join("report.pdf");
        fs::write(&file_path, "new").expect("Failed to write test file");

        let outcome =
            Sorter::move_to_category(base_path, &file_path, "pdf", ConflictPolicy::Rename)
                .expect("Failed to move file");

        let destination = match outcome {
            MoveOutcome::Renamed { destination } => destination,
            other => panic!("Expected a renamed move, got {:?}", other),
        };

        assert!(!file_path.exists());
        assert!(destination.exists());
        assert!(
            destination
                .file_name()
                .unwrap()
                .to_string_lossy()
                .starts_with("report.pdf."),
            "Renamed destination should keep the original name as a prefix"
        );
        // The occupant is untouched.
        let occupant = fs::read_to_string(category_dir.join("report.pdf")).unwrap();
        assert_eq!(occupant, "old");
    }

    #[test]
    fn test_conflict_overwrite_replaces_destination() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let base_path = temp_dir.path();

        let category_dir = base_path.join("compressed");
        fs::create_dir(&category_dir).expect("Failed to create category directory");
        fs::write(category_dir.join("data.zip"), "old").expect("Failed to write occupant");

        let file_path = base_path.join("data.zip");
        fs::write(&file_path, "new").expect("Failed to write test file");

        let outcome =
            Sorter::move_to_category(base_path, &file_path, "compressed", ConflictPolicy::Overwrite)
                .expect("Failed to move file");

        assert_eq!(
            outcome,
            MoveOutcome::Moved {
                destination: category_dir.join("data.zip")
            }
        );
        assert!(!file_path.exists());
        let content = fs::read_to_string(category_dir.join("data.zip")).unwrap();
        assert_eq!(content, "new");
    }
}

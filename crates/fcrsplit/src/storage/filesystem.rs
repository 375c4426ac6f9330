use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::error::StorageError;
use crate::sanitize::redact_path;

use super::archive::dedupe_by_name;
use super::splitter::NamedOutput;

/// Move a file from `src` to `dst`. Uses `rename` first (fast, atomic on same
/// filesystem). Falls back to copy + delete when rename fails.
fn move_file(src: &Path, dst: &Path) -> Result<(), StorageError> {
    if std::fs::rename(src, dst).is_ok() {
        return Ok(());
    }

    std::fs::copy(src, dst).map_err(|e| StorageError::MoveFile {
        from: src.to_path_buf(),
        to: dst.to_path_buf(),
        source: e,
    })?;
    std::fs::remove_file(src).map_err(|e| StorageError::MoveFile {
        from: src.to_path_buf(),
        to: dst.to_path_buf(),
        source: e,
    })?;
    Ok(())
}

const BACKUP_DIR_NAME: &str = ".previous";

/// Writes a run's files into one directory, all or nothing.
///
/// Everything is staged in a hidden temp dir inside the target first, then
/// moved into place. Files being replaced are parked in the staging dir. If
/// any write or move fails, files already moved are removed, the parked
/// files are restored and the staging dir is dropped.
pub struct OutputWriter {
    output_directory: PathBuf,
}

impl OutputWriter {
    pub fn new<P: AsRef<Path>>(output_directory: P) -> Self {
        Self {
            output_directory: output_directory.as_ref().to_path_buf(),
        }
    }

    pub fn output_directory(&self) -> &Path {
        &self.output_directory
    }

    /// Writes each split output, plus the `(name, bytes)` archive when given.
    /// Same-named files already in the directory are overwritten.
    pub fn write_outputs(
        &self,
        outputs: &[NamedOutput],
        archive: Option<(&str, &[u8])>,
    ) -> Result<Vec<PathBuf>, StorageError> {
        let mut files: Vec<(&str, &[u8])> = dedupe_by_name(outputs)
            .into_iter()
            .map(|o| (o.name.as_str(), o.document.bytes.as_slice()))
            .collect();
        if let Some(entry) = archive {
            files.push(entry);
        }
        self.write_files(&files)
    }

    pub fn write_files(&self, files: &[(&str, &[u8])]) -> Result<Vec<PathBuf>, StorageError> {
        let _span = tracing::info_span!("storage.write", files = files.len()).entered();

        std::fs::create_dir_all(&self.output_directory).map_err(|e| {
            StorageError::CreateDirectory {
                path: self.output_directory.clone(),
                source: e,
            }
        })?;

        let staging = tempfile::Builder::new()
            .prefix(".fcrsplit-staging-")
            .tempdir_in(&self.output_directory)
            .map_err(|e| StorageError::CreateDirectory {
                path: self.output_directory.clone(),
                source: e,
            })?;

        for (name, content) in files {
            let staged = staging.path().join(name);
            std::fs::write(&staged, content).map_err(|e| StorageError::WriteFile {
                path: staged.clone(),
                source: e,
            })?;
        }

        let backup_dir = staging.path().join(BACKUP_DIR_NAME);
        std::fs::create_dir(&backup_dir).map_err(|e| StorageError::CreateDirectory {
            path: backup_dir.clone(),
            source: e,
        })?;

        let mut placed: Vec<PathBuf> = Vec::with_capacity(files.len());
        let mut backups: Vec<(PathBuf, PathBuf)> = Vec::new();
        for (name, _) in files {
            let target = self.output_directory.join(name);
            if placed.contains(&target) {
                continue;
            }
            let staged = staging.path().join(name);
            if let Err(e) = place_file(&staged, &target, &backup_dir.join(name), &mut backups) {
                rollback(&placed, &backups);
                return Err(e);
            }
            debug!(file = %name, "Wrote output");
            placed.push(target);
        }

        Ok(placed)
    }
}

/// Moves `staged` to `target`. An existing file at `target` is first moved to
/// `backup` and recorded as `(backup, target)`.
fn place_file(
    staged: &Path,
    target: &Path,
    backup: &Path,
    backups: &mut Vec<(PathBuf, PathBuf)>,
) -> Result<(), StorageError> {
    match std::fs::symlink_metadata(target) {
        Ok(meta) if meta.is_dir() => {
            return Err(StorageError::WriteFile {
                path: target.to_path_buf(),
                source: std::io::Error::other("a directory is in the way"),
            });
        }
        Ok(_) => {
            move_file(target, backup)?;
            backups.push((backup.to_path_buf(), target.to_path_buf()));
        }
        Err(_) => {}
    }
    move_file(staged, target)
}

/// Removes newly placed files, then puts displaced files back.
fn rollback(placed: &[PathBuf], backups: &[(PathBuf, PathBuf)]) {
    for path in placed {
        let _ = std::fs::remove_file(path);
    }
    for (backup, target) in backups {
        if let Err(e) = move_file(backup, target) {
            warn!(file = %redact_path(target), error = %e, "Failed to restore existing file");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::OutputDocument;
    use crate::identifier::Identifier;
    use crate::segment::PageRange;
    use tempfile::TempDir;

    fn output(name: &str, bytes: &[u8]) -> NamedOutput {
        NamedOutput {
            name: name.to_string(),
            identifier: Identifier::new(name).unwrap(),
            range: PageRange::single(0),
            document: OutputDocument {
                bytes: bytes.to_vec(),
                page_count: 1,
            },
        }
    }

    fn dir_entries(dir: &Path) -> Vec<String> {
        let mut names: Vec<String> = std::fs::read_dir(dir)
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }

    #[test]
    fn test_write_outputs_and_archive() {
        let temp = TempDir::new().unwrap();
        let writer = OutputWriter::new(temp.path());

        let outputs = vec![output("FCR_1.pdf", b"one"), output("FCR_2.pdf", b"two")];
        let paths = writer
            .write_outputs(&outputs, Some(("extracted_fcrs.zip", &b"zip"[..])))
            .unwrap();

        assert_eq!(paths.len(), 3);
        assert_eq!(
            dir_entries(temp.path()),
            vec!["FCR_1.pdf", "FCR_2.pdf", "extracted_fcrs.zip"]
        );
        assert_eq!(std::fs::read(temp.path().join("FCR_2.pdf")).unwrap(), b"two");
    }

    #[test]
    fn test_creates_missing_output_directory() {
        let temp = TempDir::new().unwrap();
        let nested = temp.path().join("a").join("b");
        let writer = OutputWriter::new(&nested);

        writer.write_files(&[("FCR_X.pdf", &b"x"[..])]).unwrap();
        assert!(nested.join("FCR_X.pdf").exists());
        assert_eq!(writer.output_directory(), nested.as_path());
    }

    #[test]
    fn test_existing_file_is_overwritten() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join("FCR_X.pdf"), b"old").unwrap();

        OutputWriter::new(temp.path())
            .write_files(&[("FCR_X.pdf", &b"new"[..])])
            .unwrap();
        assert_eq!(std::fs::read(temp.path().join("FCR_X.pdf")).unwrap(), b"new");
        assert_eq!(dir_entries(temp.path()), vec!["FCR_X.pdf"]);
    }

    #[test]
    fn test_duplicate_names_last_write_wins() {
        let temp = TempDir::new().unwrap();
        let paths = OutputWriter::new(temp.path())
            .write_files(&[
                ("FCR_A_1.pdf", &b"first"[..]),
                ("FCR_A_1.pdf", &b"second"[..]),
            ])
            .unwrap();

        assert_eq!(paths.len(), 1);
        assert_eq!(
            std::fs::read(temp.path().join("FCR_A_1.pdf")).unwrap(),
            b"second"
        );
    }

    #[test]
    fn test_failed_write_leaves_nothing_behind() {
        let temp = TempDir::new().unwrap();
        let writer = OutputWriter::new(temp.path());

        // A name with a directory component that does not exist in staging
        let result = writer.write_files(&[
            ("FCR_OK.pdf", &b"ok"[..]),
            ("missing/FCR_BAD.pdf", &b"bad"[..]),
        ]);

        assert!(matches!(result, Err(StorageError::WriteFile { .. })));
        assert!(dir_entries(temp.path()).is_empty());
    }

    #[test]
    fn test_failed_move_restores_existing_files() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join("FCR_A.pdf"), b"old").unwrap();
        std::fs::create_dir(temp.path().join("FCR_B.pdf")).unwrap();

        let result = OutputWriter::new(temp.path())
            .write_files(&[("FCR_A.pdf", &b"new"[..]), ("FCR_B.pdf", &b"b"[..])]);

        assert!(matches!(result, Err(StorageError::WriteFile { .. })));
        assert_eq!(std::fs::read(temp.path().join("FCR_A.pdf")).unwrap(), b"old");
        assert!(temp.path().join("FCR_B.pdf").is_dir());
        assert_eq!(dir_entries(temp.path()), vec!["FCR_A.pdf", "FCR_B.pdf"]);
    }

    #[test]
    fn test_failed_move_removes_new_files() {
        let temp = TempDir::new().unwrap();
        std::fs::create_dir(temp.path().join("FCR_Z.pdf")).unwrap();

        let result = OutputWriter::new(temp.path())
            .write_files(&[("FCR_A.pdf", &b"a"[..]), ("FCR_Z.pdf", &b"z"[..])]);

        assert!(result.is_err());
        assert_eq!(dir_entries(temp.path()), vec!["FCR_Z.pdf"]);
    }

    #[test]
    fn test_output_directory_is_a_file() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("not-a-dir");
        std::fs::write(&file, b"").unwrap();

        let result = OutputWriter::new(&file).write_files(&[("FCR_X.pdf", &b"x"[..])]);
        assert!(matches!(result, Err(StorageError::CreateDirectory { .. })));
    }
}

//! Packaging of fetch results.
//!
//! A single file is delivered as-is; several files are bundled into one ZIP
//! archive inside the request scope. Entry names are base names only.

use std::collections::HashSet;
use std::fs::File;
use std::io::{self, BufReader, BufWriter};
use std::path::{Path, PathBuf};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::download::error::DownloadError;
use crate::storage::RequestScope;

/// The single deliverable of a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PackagedOutput {
    /// Pass-through of a one-item fetch result
    Single(PathBuf),
    /// Archive wrapping a multi-item fetch result
    Archive(PathBuf),
}

impl PackagedOutput {
    pub fn path(&self) -> &Path {
        match self {
            PackagedOutput::Single(path) | PackagedOutput::Archive(path) => path,
        }
    }

    pub fn is_archive(&self) -> bool {
        matches!(self, PackagedOutput::Archive(_))
    }
}

/// Decides between pass-through and archive for a fetch result.
///
/// The packager only runs for two or more files.
pub async fn package_output(files: &[PathBuf], scope: &RequestScope) -> Result<PackagedOutput, DownloadError> {
    match files {
        [] => Err(DownloadError::Fetch("No media files were downloaded".to_string())),
        [single] => Ok(PackagedOutput::Single(single.clone())),
        _ => {
            let archive = create_archive(files.to_vec(), scope.archive_path()).await?;
            Ok(PackagedOutput::Archive(archive))
        }
    }
}

/// Writes `files` into a new ZIP at `archive_path` on the blocking pool.
pub async fn create_archive(files: Vec<PathBuf>, archive_path: PathBuf) -> Result<PathBuf, DownloadError> {
    tokio::task::spawn_blocking(move || write_archive(&files, &archive_path).map(|()| archive_path))
        .await
        .map_err(|e| DownloadError::Packaging(format!("Archive task failed: {}", e)))?
}

/// Synchronous archive writer.
///
/// Creates exactly one file and never touches the inputs. A partially written
/// archive is left for the caller's cleanup.
pub fn write_archive(files: &[PathBuf], archive_path: &Path) -> Result<(), DownloadError> {
    if files.is_empty() {
        return Err(DownloadError::Packaging("Nothing to archive".to_string()));
    }

    let file = File::create(archive_path)
        .map_err(|e| DownloadError::Packaging(format!("Failed to create archive: {}", e)))?;
    let mut writer = ZipWriter::new(BufWriter::new(file));
    let options = SimpleFileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .large_file(true);

    let mut used_names = HashSet::new();
    for path in files {
        let entry_name = unique_entry_name(path, &mut used_names)?;
        let mut reader = File::open(path).map(BufReader::new).map_err(|e| {
            DownloadError::Packaging(format!("Failed to read {}: {}", entry_name, e))
        })?;

        writer.start_file(entry_name.as_str(), options)?;
        io::copy(&mut reader, &mut writer)
            .map_err(|e| DownloadError::Packaging(format!("Failed to write {}: {}", entry_name, e)))?;
    }

    let mut inner = writer.finish()?;
    io::Write::flush(&mut inner).map_err(|e| DownloadError::Packaging(format!("Failed to write archive: {}", e)))?;
    Ok(())
}

/// Base name of `path`, with ` (n)` appended before the extension when taken.
fn unique_entry_name(path: &Path, used: &mut HashSet<String>) -> Result<String, DownloadError> {
    let base = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .ok_or_else(|| DownloadError::Packaging(format!("Not a file path: {}", path.display())))?;

    if used.insert(base.clone()) {
        return Ok(base);
    }

    let (stem, ext) = match base.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() => (stem.to_string(), format!(".{}", ext)),
        _ => (base.clone(), String::new()),
    };
    let mut n = 2;
    loop {
        let candidate = format!("{} ({}){}", stem, n, ext);
        if used.insert(candidate.clone()) {
            return Ok(candidate);
        }
        n += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::ScratchDir;
    use pretty_assertions::assert_eq;
    use std::io::Read;
    use uuid::Uuid;

    fn write_file(dir: &Path, name: &str, contents: &[u8]) -> PathBuf {
        let path = dir.join(name);
        std::fs::write(&path, contents).unwrap();
        path
    }

    fn entry_names(archive: &Path) -> Vec<String> {
        let mut zip = zip::ZipArchive::new(File::open(archive).unwrap()).unwrap();
        (0..zip.len())
            .map(|i| zip.by_index(i).unwrap().name().to_string())
            .collect()
    }

    #[tokio::test]
    async fn test_single_file_passes_through() {
        let tmp = tempfile::tempdir().unwrap();
        let scope = ScratchDir::new(tmp.path()).open_scope(Uuid::new_v4()).await.unwrap();
        let video = write_file(scope.dir(), "My Video.mp4", b"video");

        let output = package_output(&[video.clone()], &scope).await.unwrap();

        assert_eq!(output, PackagedOutput::Single(video));
        assert!(!scope.archive_path().exists());
    }

    #[tokio::test]
    async fn test_multiple_files_are_archived_by_base_name() {
        let tmp = tempfile::tempdir().unwrap();
        let scope = ScratchDir::new(tmp.path()).open_scope(Uuid::new_v4()).await.unwrap();
        let files = vec![
            write_file(scope.dir(), "One.mp3", b"1"),
            write_file(scope.dir(), "Two.mp3", b"22"),
            write_file(scope.dir(), "Three.mp3", b"333"),
        ];

        let output = package_output(&files, &scope).await.unwrap();

        assert!(output.is_archive());
        assert_eq!(output.path(), scope.archive_path());
        assert_eq!(entry_names(output.path()), vec!["One.mp3", "Two.mp3", "Three.mp3"]);
        // inputs untouched
        assert!(files.iter().all(|f| f.exists()));
    }

    #[tokio::test]
    async fn test_archive_preserves_contents() {
        let tmp = tempfile::tempdir().unwrap();
        let a = write_file(tmp.path(), "a.txt", b"hello");
        let b = write_file(tmp.path(), "b.txt", b"world");
        let archive = tmp.path().join("out.zip");

        create_archive(vec![a, b], archive.clone()).await.unwrap();

        let mut zip = zip::ZipArchive::new(File::open(&archive).unwrap()).unwrap();
        let mut contents = String::new();
        zip.by_name("b.txt").unwrap().read_to_string(&mut contents).unwrap();
        assert_eq!(contents, "world");
    }

    #[test]
    fn test_duplicate_base_names_get_suffixes() {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(tmp.path().join("x")).unwrap();
        std::fs::create_dir_all(tmp.path().join("y")).unwrap();
        let files = vec![
            write_file(&tmp.path().join("x"), "Song.mp3", b"1"),
            write_file(&tmp.path().join("y"), "Song.mp3", b"2"),
        ];
        let archive = tmp.path().join("out.zip");

        write_archive(&files, &archive).unwrap();

        assert_eq!(entry_names(&archive), vec!["Song.mp3", "Song (2).mp3"]);
    }

    #[test]
    fn test_unique_entry_name_without_extension() {
        let mut used = HashSet::new();
        assert_eq!(unique_entry_name(Path::new("a/README"), &mut used).unwrap(), "README");
        assert_eq!(unique_entry_name(Path::new("b/README"), &mut used).unwrap(), "README (2)");
        assert_eq!(unique_entry_name(Path::new("c/README"), &mut used).unwrap(), "README (3)");
    }

    #[test]
    fn test_missing_input_is_packaging_failure() {
        let tmp = tempfile::tempdir().unwrap();
        let present = write_file(tmp.path(), "present.mp3", b"1");
        let missing = tmp.path().join("missing.mp3");

        let err = write_archive(&[present, missing], &tmp.path().join("out.zip")).unwrap_err();

        assert!(matches!(err, DownloadError::Packaging(ref m) if m.contains("missing.mp3")));
    }

    #[test]
    fn test_empty_input_is_rejected() {
        let tmp = tempfile::tempdir().unwrap();
        let archive = tmp.path().join("out.zip");

        assert!(matches!(write_archive(&[], &archive), Err(DownloadError::Packaging(_))));
        assert!(!archive.exists());
    }

    #[test]
    fn test_unwritable_archive_is_packaging_failure() {
        let tmp = tempfile::tempdir().unwrap();
        let input = write_file(tmp.path(), "a.mp3", b"1");

        let err = write_archive(&[input], &tmp.path().join("no-such-dir").join("out.zip")).unwrap_err();

        assert!(matches!(err, DownloadError::Packaging(_)));
    }
}

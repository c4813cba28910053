//! Default staging service: package directories into jars
//!
//! Regular files are staged as they are. Directories (typically loose class
//! or resource trees) are zipped into `<fallback_dir>/<content hash>.jar` so
//! workers only ever receive files. Archives are deterministic: entries are
//! sorted and carry a fixed timestamp, so identical content always maps to
//! the same jar and an existing jar is reused.

use super::StagingService;
use crate::error::StagingError;
use blake3::Hasher;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;
use zip::write::SimpleFileOptions;
use zip::ZipWriter;

/// Stages files as-is and packages directories into jars
#[derive(Debug, Clone, Copy, Default)]
pub struct DirectoryPackager;

impl DirectoryPackager {
    pub fn new() -> Self {
        Self
    }
}

impl StagingService for DirectoryPackager {
    fn prepare_files_for_staging(
        &self,
        paths: &[String],
        fallback_dir: &str,
    ) -> Result<Vec<String>, StagingError> {
        paths
            .iter()
            .map(|path| {
                let path = Path::new(path);
                if !path.exists() {
                    return Err(StagingError::missing_file(path));
                }
                if path.is_dir() {
                    package_directory(path, fallback_dir)
                } else {
                    absolute(path)
                }
            })
            .collect()
    }
}

fn absolute(path: &Path) -> Result<String, StagingError> {
    let resolved = fs::canonicalize(path)
        .map_err(|e| StagingError::io(path, "Failed to resolve path", e))?;
    Ok(resolved.to_string_lossy().into_owned())
}

/// Zip `dir` into the fallback dir, named after a hash of its contents
fn package_directory(dir: &Path, fallback_dir: &str) -> Result<String, StagingError> {
    if fallback_dir.is_empty() {
        return Err(StagingError::missing_temp_location(dir));
    }

    let files = collect_files(dir)?;
    let hash = content_hash(&files);
    let jar_path = Path::new(fallback_dir).join(format!("{}.jar", hash));

    if jar_path.exists() {
        tracing::debug!(
            dir = %dir.display(),
            jar = %jar_path.display(),
            "Reusing packaged directory"
        );
    } else {
        fs::create_dir_all(fallback_dir)
            .map_err(|e| StagingError::io(fallback_dir, "Failed to create staging directory", e))?;
        write_jar(&jar_path, &files)?;
        tracing::info!(
            dir = %dir.display(),
            jar = %jar_path.display(),
            entries = files.len(),
            "Packaged directory for staging"
        );
    }

    Ok(jar_path.to_string_lossy().into_owned())
}

/// One file inside a packaged directory
struct Entry {
    /// Path inside the archive, `/`-separated
    name: String,
    content: Vec<u8>,
}

/// Every regular file under `dir`, sorted by archive name
fn collect_files(dir: &Path) -> Result<Vec<Entry>, StagingError> {
    let mut entries = Vec::new();

    // Linked files are packaged by content; broken links and loops are errors
    for entry in WalkDir::new(dir).follow_links(true).sort_by_file_name() {
        let entry = entry.map_err(|e| StagingError::walk(dir, e))?;
        if !entry.file_type().is_file() {
            continue;
        }

        let path = entry.path();
        let rel_path = path.strip_prefix(dir).unwrap_or(path);
        let name = rel_path
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/");
        let content = fs::read(path).map_err(|e| StagingError::io(path, "Failed to read file", e))?;

        entries.push(Entry { name, content });
    }

    entries.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(entries)
}

fn content_hash(entries: &[Entry]) -> String {
    let mut hasher = Hasher::new();
    for entry in entries {
        // Length prefixes keep (name, content) boundaries unambiguous
        hasher.update(&(entry.name.len() as u64).to_le_bytes());
        hasher.update(entry.name.as_bytes());
        hasher.update(&(entry.content.len() as u64).to_le_bytes());
        hasher.update(&entry.content);
    }
    hasher.finalize().to_hex().to_string()
}

fn write_jar(jar_path: &Path, entries: &[Entry]) -> Result<(), StagingError> {
    // Write next to the target and rename, so a half-written jar is never reused
    let partial: PathBuf = jar_path.with_extension("jar.partial");
    let file = fs::File::create(&partial)
        .map_err(|e| StagingError::io(&partial, "Failed to create jar", e))?;

    let mut zip = ZipWriter::new(file);
    let options = SimpleFileOptions::default()
        .last_modified_time(zip::DateTime::default())
        .compression_method(zip::CompressionMethod::Deflated);

    for entry in entries {
        zip.start_file(entry.name.as_str(), options)
            .map_err(|e| StagingError::archive(jar_path, e))?;
        zip.write_all(&entry.content)
            .map_err(|e| StagingError::io(jar_path, "Failed to write jar entry", e))?;
    }
    zip.finish().map_err(|e| StagingError::archive(jar_path, e))?;

    fs::rename(&partial, jar_path)
        .map_err(|e| StagingError::io(jar_path, "Failed to move jar into place", e))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn make_class_dir(root: &Path) -> PathBuf {
        let classes = root.join("classes");
        fs::create_dir_all(classes.join("com/example")).unwrap();
        fs::write(classes.join("com/example/Main.class"), b"\xca\xfe\xba\xbe").unwrap();
        fs::write(classes.join("app.properties"), b"name=demo\n").unwrap();
        classes
    }

    #[test]
    fn test_files_pass_through() {
        let dir = TempDir::new().unwrap();
        let jar = dir.path().join("dep.jar");
        fs::write(&jar, b"jar").unwrap();

        let staged = DirectoryPackager::new()
            .prepare_files_for_staging(
                &[jar.to_string_lossy().into_owned()],
                &dir.path().to_string_lossy(),
            )
            .unwrap();

        assert_eq!(
            staged,
            vec![fs::canonicalize(&jar).unwrap().to_string_lossy().into_owned()]
        );
    }

    #[test]
    fn test_directory_packaged_into_jar() {
        let src = TempDir::new().unwrap();
        let staging = TempDir::new().unwrap();
        let classes = make_class_dir(src.path());

        let staged = DirectoryPackager::new()
            .prepare_files_for_staging(
                &[classes.to_string_lossy().into_owned()],
                &staging.path().to_string_lossy(),
            )
            .unwrap();

        assert_eq!(staged.len(), 1);
        let jar = PathBuf::from(&staged[0]);
        assert!(jar.starts_with(staging.path()));
        assert_eq!(jar.extension().and_then(|e| e.to_str()), Some("jar"));

        let mut archive = zip::ZipArchive::new(fs::File::open(&jar).unwrap()).unwrap();
        let mut names: Vec<_> = archive.file_names().map(String::from).collect();
        names.sort();
        assert_eq!(names, vec!["app.properties", "com/example/Main.class"]);

        let mut props = String::new();
        std::io::Read::read_to_string(&mut archive.by_name("app.properties").unwrap(), &mut props)
            .unwrap();
        assert_eq!(props, "name=demo\n");
    }

    #[test]
    fn test_jar_name_follows_content() {
        let src = TempDir::new().unwrap();
        let staging = TempDir::new().unwrap();
        let classes = make_class_dir(src.path());
        let fallback = staging.path().to_string_lossy().into_owned();
        let input = [classes.to_string_lossy().into_owned()];
        let packager = DirectoryPackager::new();

        let first = packager.prepare_files_for_staging(&input, &fallback).unwrap();
        let again = packager.prepare_files_for_staging(&input, &fallback).unwrap();
        assert_eq!(first, again);

        fs::write(classes.join("app.properties"), b"name=changed\n").unwrap();
        let changed = packager.prepare_files_for_staging(&input, &fallback).unwrap();
        assert_ne!(first, changed);
    }

    #[test]
    fn test_order_preserved() {
        let src = TempDir::new().unwrap();
        let staging = TempDir::new().unwrap();
        let classes = make_class_dir(src.path());
        let jar = src.path().join("lib.jar");
        fs::write(&jar, b"jar").unwrap();

        let staged = DirectoryPackager::new()
            .prepare_files_for_staging(
                &[
                    jar.to_string_lossy().into_owned(),
                    classes.to_string_lossy().into_owned(),
                ],
                &staging.path().to_string_lossy(),
            )
            .unwrap();

        assert_eq!(staged.len(), 2);
        assert!(staged[0].ends_with("lib.jar"));
        assert!(PathBuf::from(&staged[1]).starts_with(staging.path()));
    }

    #[cfg(unix)]
    #[test]
    fn test_symlinked_file_packaged() {
        let src = TempDir::new().unwrap();
        let staging = TempDir::new().unwrap();
        let target = src.path().join("Real.class");
        fs::write(&target, b"\xca\xfe").unwrap();
        let classes = src.path().join("classes");
        fs::create_dir(&classes).unwrap();
        std::os::unix::fs::symlink(&target, classes.join("Linked.class")).unwrap();

        let staged = DirectoryPackager::new()
            .prepare_files_for_staging(
                &[classes.to_string_lossy().into_owned()],
                &staging.path().to_string_lossy(),
            )
            .unwrap();

        let mut archive = zip::ZipArchive::new(fs::File::open(&staged[0]).unwrap()).unwrap();
        let names: Vec<_> = archive.file_names().map(String::from).collect();
        assert_eq!(names, vec!["Linked.class"]);

        let mut content = Vec::new();
        std::io::Read::read_to_end(&mut archive.by_name("Linked.class").unwrap(), &mut content)
            .unwrap();
        assert_eq!(content, b"\xca\xfe");
    }

    #[cfg(unix)]
    #[test]
    fn test_broken_symlink_is_error() {
        let src = TempDir::new().unwrap();
        let staging = TempDir::new().unwrap();
        let classes = src.path().join("classes");
        fs::create_dir(&classes).unwrap();
        std::os::unix::fs::symlink(src.path().join("gone.class"), classes.join("Dangling.class"))
            .unwrap();

        let err = DirectoryPackager::new()
            .prepare_files_for_staging(
                &[classes.to_string_lossy().into_owned()],
                &staging.path().to_string_lossy(),
            )
            .unwrap_err();

        assert!(matches!(err, StagingError::Walk { .. }));
    }

    #[test]
    fn test_missing_file_is_error() {
        let staging = TempDir::new().unwrap();
        let err = DirectoryPackager::new()
            .prepare_files_for_staging(
                &["/no/such/file.jar".to_string()],
                &staging.path().to_string_lossy(),
            )
            .unwrap_err();

        assert!(matches!(err, StagingError::MissingFile { .. }));
    }

    #[test]
    fn test_directory_needs_fallback_dir() {
        let src = TempDir::new().unwrap();
        let classes = make_class_dir(src.path());

        let err = DirectoryPackager::new()
            .prepare_files_for_staging(&[classes.to_string_lossy().into_owned()], "")
            .unwrap_err();

        assert!(matches!(err, StagingError::MissingTempLocation { .. }));
    }

    #[test]
    fn test_creates_missing_fallback_dir() {
        let src = TempDir::new().unwrap();
        let staging = TempDir::new().unwrap();
        let classes = make_class_dir(src.path());
        let nested = staging.path().join("a/b");

        let staged = DirectoryPackager::new()
            .prepare_files_for_staging(
                &[classes.to_string_lossy().into_owned()],
                &nested.to_string_lossy(),
            )
            .unwrap();

        assert!(PathBuf::from(&staged[0]).exists());
    }
}

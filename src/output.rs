//! Writing the generated file.
//!
//! The writer is the only part of the tool that mutates the filesystem. With
//! `keep_old` set it leaves an identical file untouched so the build system
//! sees no new timestamp and skips recompiling dependents.
//!
//! New content is written to a temporary file next to the target and renamed
//! into place, so an interrupted run never leaves a truncated output behind.
//! If the target is a symlink, the file it points to is replaced and the link
//! itself is kept.

use std::io::Write;
use std::path::{
    Path,
    PathBuf,
};

use tempfile::NamedTempFile;

use crate::error::{
    GenError,
    GenResult,
};

/// Outcome of [`write`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationResult {
    /// Full path of the target file.
    pub path: PathBuf,
    /// `true` if the file was created or its content replaced.
    pub changed: bool,
}

/// Path of the output file: `filename` inside `directory`. An empty
/// directory means the current working directory.
pub fn target_path(directory: &Path, filename: &str) -> PathBuf {
    if directory.as_os_str().is_empty() {
        PathBuf::from(filename)
    } else {
        directory.join(filename)
    }
}

/// Write `content` to `directory/filename`, creating `directory` as needed.
///
/// When `keep_old` is set and the file already holds exactly `content`,
/// nothing is written and `changed` is `false`.
///
/// # Errors
///
/// Returns [`GenError::Io`] if the directory cannot be created or the file
/// cannot be read or written.
pub fn write(
    directory: &Path,
    filename: &str,
    content: &str,
    keep_old: bool,
) -> GenResult<GenerationResult> {
    if !directory.as_os_str().is_empty() {
        std::fs::create_dir_all(directory)
            .map_err(|e| GenError::io("create directory", directory, e))?;
    }

    let path = target_path(directory, filename);

    if keep_old && is_unchanged(&path, content)? {
        return Ok(GenerationResult {
            path,
            changed: false,
        });
    }

    replace_file(&path, content)?;

    Ok(GenerationResult {
        path,
        changed: true,
    })
}

fn is_unchanged(path: &Path, content: &str) -> GenResult<bool> {
    match std::fs::read(path) {
        Ok(existing) => Ok(existing == content.as_bytes()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(GenError::io("read", path, e)),
    }
}

// Symlink chains longer than this are left for the rename to fail on.
const MAX_LINK_HOPS: usize = 40;

/// Follow `path` through any symlinks to the file a plain write would land
/// in. Relative link targets are taken from the link's own directory.
fn resolve_link(path: &Path) -> PathBuf {
    let mut current = path.to_path_buf();
    for _ in 0..MAX_LINK_HOPS {
        let Ok(target) = std::fs::read_link(&current) else {
            break;
        };
        current = match current.parent() {
            Some(parent) if target.is_relative() => parent.join(target),
            _ => target,
        };
    }
    current
}

fn replace_file(requested: &Path, content: &str) -> GenResult<()> {
    let resolved = resolve_link(requested);
    let path = resolved.as_path();
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut tmp = NamedTempFile::new_in(parent).map_err(|e| GenError::io("write", path, e))?;
    tmp.write_all(content.as_bytes())
        .and_then(|()| tmp.flush())
        .map_err(|e| GenError::io("write", path, e))?;
    set_output_permissions(&tmp, path).map_err(|e| GenError::io("write", path, e))?;
    tmp.persist(path)
        .map_err(|e| GenError::io("write", path, e.error))?;

    Ok(())
}

// Temporary files are created owner-only; give the output the mode a plain
// write would have produced.
#[cfg(unix)]
fn set_output_permissions(tmp: &NamedTempFile, path: &Path) -> std::io::Result<()> {
    use std::os::unix::fs::PermissionsExt;

    let permissions = std::fs::metadata(path)
        .map(|m| m.permissions())
        .unwrap_or_else(|_| std::fs::Permissions::from_mode(0o644));
    tmp.as_file().set_permissions(permissions)
}

#[cfg(not(unix))]
fn set_output_permissions(_tmp: &NamedTempFile, _path: &Path) -> std::io::Result<()> {
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keep_old_second_write_is_unchanged() {
        let dir = tempfile::tempdir().unwrap();

        let first = write(dir.path(), "version.h", "content\n", true).unwrap();
        assert!(first.changed);
        assert_eq!(first.path, dir.path().join("version.h"));

        let second = write(dir.path(), "version.h", "content\n", true).unwrap();
        assert!(!second.changed);
        assert_eq!(
            std::fs::read_to_string(dir.path().join("version.h")).unwrap(),
            "content\n"
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_write_goes_through_symlink() {
        let dir = tempfile::tempdir().unwrap();
        let real_dir = dir.path().join("real");
        std::fs::create_dir(&real_dir).unwrap();
        std::fs::write(real_dir.join("version.h"), "old\n").unwrap();
        let out = dir.path().join("out");
        std::fs::create_dir(&out).unwrap();
        std::os::unix::fs::symlink("../real/version.h", out.join("version.h")).unwrap();

        let result = write(&out, "version.h", "new\n", true).unwrap();

        assert!(result.changed);
        assert_eq!(result.path, out.join("version.h"));
        let link = std::fs::symlink_metadata(out.join("version.h")).unwrap();
        assert!(link.file_type().is_symlink());
        assert_eq!(
            std::fs::read_to_string(real_dir.join("version.h")).unwrap(),
            "new\n"
        );
        assert_eq!(std::fs::read_dir(&out).unwrap().count(), 1);
    }

    #[cfg(unix)]
    #[test]
    fn test_keep_old_reads_through_symlink() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("target.h");
        std::fs::write(&target, "same\n").unwrap();
        std::os::unix::fs::symlink(&target, dir.path().join("version.h")).unwrap();

        let result = write(dir.path(), "version.h", "same\n", true).unwrap();

        assert!(!result.changed);
        assert!(
            std::fs::symlink_metadata(dir.path().join("version.h"))
                .unwrap()
                .file_type()
                .is_symlink()
        );
    }

    #[test]
    fn test_without_keep_old_always_changes() {
        let dir = tempfile::tempdir().unwrap();

        assert!(write(dir.path(), "version.h", "same", false).unwrap().changed);
        assert!(write(dir.path(), "version.h", "same", false).unwrap().changed);
    }

    #[test]
    fn test_keep_old_rewrites_different_content() {
        let dir = tempfile::tempdir().unwrap();

        write(dir.path(), "version.h", "old", true).unwrap();
        let result = write(dir.path(), "version.h", "new", true).unwrap();

        assert!(result.changed);
        assert_eq!(
            std::fs::read_to_string(dir.path().join("version.h")).unwrap(),
            "new"
        );
    }

    #[test]
    fn test_replaces_longer_existing_content() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("v.h"), "a much longer previous content").unwrap();

        write(dir.path(), "v.h", "short", false).unwrap();

        assert_eq!(std::fs::read_to_string(dir.path().join("v.h")).unwrap(), "short");
    }

    #[test]
    fn test_unchanged_write_keeps_modification_time() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("v.h");

        write(dir.path(), "v.h", "same", true).unwrap();
        let before = std::fs::metadata(&path).unwrap().modified().unwrap();
        std::thread::sleep(std::time::Duration::from_millis(20));
        write(dir.path(), "v.h", "same", true).unwrap();
        let after = std::fs::metadata(&path).unwrap().modified().unwrap();

        assert_eq!(before, after);
    }

    #[test]
    fn test_creates_missing_directories() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("build").join("generated").join("include");

        let result = write(&nested, "version.h", "x", false).unwrap();

        assert!(result.changed);
        assert!(nested.join("version.h").is_file());
        // Existing directory is fine too
        assert!(write(&nested, "version.h", "y", false).unwrap().changed);
    }

    #[test]
    fn test_leaves_no_temporary_files() {
        let dir = tempfile::tempdir().unwrap();

        write(dir.path(), "v.h", "one", false).unwrap();
        write(dir.path(), "v.h", "two", false).unwrap();

        let entries: Vec<_> = std::fs::read_dir(dir.path()).unwrap().collect();
        assert_eq!(entries.len(), 1);
    }

    #[cfg(unix)]
    #[test]
    fn test_output_is_world_readable() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "v.h", "x", false).unwrap();

        let mode = std::fs::metadata(dir.path().join("v.h"))
            .unwrap()
            .permissions()
            .mode();
        assert_eq!(mode & 0o644, 0o644);
    }

    #[test]
    fn test_target_path() {
        assert_eq!(target_path(Path::new(""), "version.h"), PathBuf::from("version.h"));
        assert_eq!(
            target_path(Path::new("out"), "v.h"),
            Path::new("out").join("v.h")
        );
    }
}

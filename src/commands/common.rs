//! Common helper functions shared across commands.

use std::path::{
    Path,
    PathBuf,
};

use anyhow::{
    Context,
    Result,
};

/// Path identifying this generator in dependency lists.
///
/// Uses the running executable, falling back to `argv[0]` when the platform
/// cannot report it.
pub fn generator_path() -> PathBuf {
    std::env::current_exe()
        .ok()
        .or_else(|| std::env::args_os().next().map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from(env!("CARGO_PKG_NAME")))
}

/// Pick the directory git commands run in.
///
/// An explicit repository path wins. Otherwise the directory holding the
/// template is used, so a template kept inside a project describes that
/// project. Without either, the current directory.
pub fn resolve_repo_root(explicit: Option<&Path>, template: Option<&Path>) -> Result<PathBuf> {
    if let Some(path) = explicit {
        return Ok(path.to_path_buf());
    }

    if let Some(template) = template {
        let absolute = std::path::absolute(template)
            .with_context(|| format!("Failed to resolve {}", template.display()))?;
        if let Some(parent) = absolute.parent() {
            return Ok(parent.to_path_buf());
        }
    }

    std::env::current_dir().context("Failed to get current directory")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_repo_root_explicit_wins() {
        let root = resolve_repo_root(Some(Path::new("/srv/repo")), Some(Path::new("/tmp/t.in")))
            .unwrap();
        assert_eq!(root, PathBuf::from("/srv/repo"));
    }

    #[test]
    fn test_resolve_repo_root_from_template() {
        let dir = tempfile::tempdir().unwrap();
        let template = dir.path().join("cmake").join("version.cpp.in");
        let root = resolve_repo_root(None, Some(&template)).unwrap();
        assert_eq!(root, dir.path().join("cmake"));
    }

    #[test]
    fn test_resolve_repo_root_relative_template() {
        let root = resolve_repo_root(None, Some(Path::new("version.cpp.in"))).unwrap();
        assert_eq!(root, std::env::current_dir().unwrap());
    }

    #[test]
    fn test_resolve_repo_root_defaults_to_cwd() {
        let root = resolve_repo_root(None, None).unwrap();
        assert_eq!(root, std::env::current_dir().unwrap());
    }

    #[test]
    fn test_generator_path_is_not_empty() {
        assert!(!generator_path().as_os_str().is_empty());
    }
}

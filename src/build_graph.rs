//! Build-graph queries.
//!
//! A build system asks the generator two questions before running it: which
//! files it reads and which files it produces. Both answers are computed from
//! the arguments alone, without touching git or the filesystem.

use std::path::{
    Path,
    PathBuf,
};

/// Separator used when printing path lists.
pub const LIST_SEPARATOR: &str = ";";

/// Files the generated output depends on: the generator itself, then the
/// user template if one was given.
pub fn list_dependencies(generator: &Path, template: Option<&Path>) -> Vec<PathBuf> {
    std::iter::once(generator)
        .chain(template)
        .map(Path::to_path_buf)
        .collect()
}

/// Files the generator produces. Empty when `output` is empty; otherwise the
/// single output file, qualified with `directory` when one is given.
pub fn list_outputs(output: &str, directory: Option<&Path>) -> Vec<PathBuf> {
    if output.is_empty() {
        return Vec::new();
    }

    let path = match directory {
        Some(directory) => directory.join(output),
        None => PathBuf::from(output),
    };
    vec![path]
}

/// Join paths with [`LIST_SEPARATOR`] for printing.
pub fn join_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|path| path.display().to_string())
        .collect::<Vec<_>>()
        .join(LIST_SEPARATOR)
}

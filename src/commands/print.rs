//! Build-graph query commands.
//!
//! These answer "what does the generator read" and "what does it write" for a
//! build system configuring its graph. They print a semicolon-separated list
//! with no trailing newline and never run git.
//!
//! # Examples
//!
//! ```bash
//! $ version-gen --print-dependencies --genpattern cmake/version.cpp.in
//! /usr/local/bin/version-gen;cmake/version.cpp.in
//!
//! $ version-gen --print-outputs --dir build --output version.cpp
//! build/version.cpp
//! ```

use std::io::Write;
use std::path::{
    Path,
    PathBuf,
};

use anyhow::{
    Context,
    Result,
};

use super::common::generator_path;
use crate::build_graph::{
    join_paths,
    list_dependencies,
    list_outputs,
};

/// Print the files the generated output depends on.
pub fn print_dependencies(template: Option<&Path>) -> Result<()> {
    let dependencies = list_dependencies(&generator_path(), template);
    print_list(&mut std::io::stdout().lock(), &dependencies)
}

/// Print the files the generator will produce.
pub fn print_outputs(output: &str, directory: Option<&Path>) -> Result<()> {
    let outputs = list_outputs(output, directory);
    print_list(&mut std::io::stdout().lock(), &outputs)
}

fn print_list(out: &mut impl Write, paths: &[PathBuf]) -> Result<()> {
    out.write_all(join_paths(paths).as_bytes())
        .and_then(|()| out.flush())
        .context("Failed to write to stdout")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_print_list_has_no_trailing_newline() {
        let mut buf = Vec::new();
        let paths = list_outputs("version.h", Some(Path::new("build")));
        print_list(&mut buf, &paths).unwrap();
        assert_eq!(
            String::from_utf8(buf).unwrap(),
            Path::new("build").join("version.h").display().to_string()
        );
    }

    #[test]
    fn test_print_list_empty() {
        let mut buf = Vec::new();
        print_list(&mut buf, &list_outputs("", None)).unwrap();
        assert!(buf.is_empty());
    }

    #[test]
    fn test_print_dependencies_lists_template_last() {
        let mut buf = Vec::new();
        let deps = list_dependencies(&generator_path(), Some(Path::new("tmpl.in")));
        print_list(&mut buf, &deps).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert_eq!(text.split(';').count(), 2);
        assert!(text.ends_with(";tmpl.in"));
    }
}

//! Generate the version source file.
//!
//! Resolves version metadata, renders it through the template, and writes the
//! result, leaving an identical file untouched when `--keep-old` is given.
//!
//! # Examples
//!
//! ```bash
//! # Write version.h in the current directory using the built-in template
//! version-gen --name Foo --major 1 --minor 2 --patch 3
//!
//! # Write out/version.cpp from a custom template, only if it changed
//! version-gen --genpattern cmake/version.cpp.in --dir out --output version.cpp \
//!     --name Foo --major 1 --minor 2 --patch 3 --keep-old
//!
//! # Fail (exit status 3) when nothing changed
//! version-gen --name Foo --keep-old --check-changes
//! ```

use std::path::PathBuf;

use anyhow::{
    Context,
    Result,
};
use clap::Parser;

use super::common::resolve_repo_root;
use crate::error::GenError;
use crate::metadata::{
    ProjectInfo,
    Resolver,
};
use crate::output::{
    self,
    GenerationResult,
};
use crate::process::{
    ProcessRunner,
    SystemRunner,
};
use crate::template;

/// Arguments for generating the version file.
#[derive(Parser, Debug, Clone)]
pub struct GenerateArgs {
    /// Template to render instead of the built-in one.
    ///
    /// Placeholders are `{FIELD}` names such as `{PROJECT_NAME}`; write `{{`
    /// and `}}` for literal braces. The template is also reported by
    /// `--print-dependencies`.
    #[arg(long, value_name = "PATH")]
    pub genpattern: Option<PathBuf>,

    /// Name of the generated file.
    #[arg(long, value_name = "NAME", default_value = "version.h")]
    pub output: String,

    /// Directory for the generated file. Created if missing; defaults to the
    /// current directory.
    #[arg(long, value_name = "PATH")]
    pub dir: Option<PathBuf>,

    /// Project name.
    #[arg(long, default_value = "")]
    pub name: String,

    /// Major version component.
    #[arg(long, default_value = "")]
    pub major: String,

    /// Minor version component.
    #[arg(long, default_value = "")]
    pub minor: String,

    /// Patch version component.
    #[arg(long, default_value = "")]
    pub patch: String,

    /// Do not rewrite the file if it already exists with the same content.
    #[arg(long)]
    pub keep_old: bool,

    /// Fail if the generated file did not change.
    #[arg(long)]
    pub check_changes: bool,

    /// Git repository to describe.
    ///
    /// Defaults to the directory containing `--genpattern`, or the current
    /// directory when no template is given.
    #[arg(long, value_name = "PATH", env = "VERSION_GEN_REPO")]
    pub repo_path: Option<PathBuf>,

    /// Git executable to run.
    #[arg(long, value_name = "PROGRAM", env = "VERSION_GEN_GIT", default_value = "git")]
    pub git: String,
}

impl Default for GenerateArgs {
    /// Same values the command line yields when no flag is given.
    fn default() -> Self {
        Self {
            genpattern: None,
            output: "version.h".to_string(),
            dir: None,
            name: String::new(),
            major: String::new(),
            minor: String::new(),
            patch: String::new(),
            keep_old: false,
            check_changes: false,
            repo_path: None,
            git: "git".to_string(),
        }
    }
}

impl GenerateArgs {
    fn project(&self) -> ProjectInfo {
        ProjectInfo {
            name: self.name.clone(),
            major: self.major.clone(),
            minor: self.minor.clone(),
            patch: self.patch.clone(),
        }
    }
}

/// Generate the version file using the system `git`.
///
/// # Errors
///
/// Returns an error if:
/// - A git lookup fails (no repository, no `origin` remote, git missing)
/// - The template cannot be read or references an unknown field
/// - The output directory or file cannot be written
/// - `--check-changes` is set and the file did not change
///   ([`GenError::NoChange`])
///
/// # Examples
///
/// ```no_run
/// use version_gen::commands::{
///     GenerateArgs,
///     generate,
/// };
///
/// let args = GenerateArgs {
///     name: "Foo".to_string(),
///     major: "1".to_string(),
///     minor: "2".to_string(),
///     patch: "3".to_string(),
///     output: "v.h".to_string(),
///     dir: Some("out".into()),
///     ..GenerateArgs::default()
/// };
/// let result = generate(args)?;
/// println!("changed: {}", result.changed);
/// # Ok::<(), anyhow::Error>(())
/// ```
pub fn generate(args: GenerateArgs) -> Result<GenerationResult> {
    let resolver = Resolver::new(SystemRunner, args.git.as_str());
    generate_with(&args, &resolver)
}

/// Generate the version file, querying git through `resolver`.
pub fn generate_with<R: ProcessRunner>(
    args: &GenerateArgs,
    resolver: &Resolver<R>,
) -> Result<GenerationResult> {
    let mut logger = cargo_plugin_utils::logger::Logger::new();
    let directory = args.dir.clone().unwrap_or_default();
    let target = output::target_path(&directory, &args.output);

    logger.status("Reading", "template");
    let template_text = template::load(args.genpattern.as_deref())?;
    logger.finish();

    logger.status("Resolving", "version metadata");
    let repo_root = resolve_repo_root(args.repo_path.as_deref(), args.genpattern.as_deref())?;
    let metadata = resolver
        .resolve(args.project(), &repo_root)
        .with_context(|| format!("Failed to describe repository at {}", repo_root.display()))?;
    logger.finish();

    let content = template::render(&template_text, &metadata).with_context(|| match &args.genpattern {
        Some(path) => format!("Failed to render {}", path.display()),
        None => "Failed to render built-in template".to_string(),
    })?;

    logger.status("Generating", &target.display().to_string());
    let result = output::write(&directory, &args.output, &content, args.keep_old)?;
    logger.finish();

    if result.changed {
        logger.print_message(&format!(
            "✓ Wrote {} ({})",
            result.path.display(),
            metadata.commit_id()
        ));
    } else {
        logger.print_message(&format!("  {} is up to date", result.path.display()));
    }

    if args.check_changes && !result.changed {
        return Err(GenError::NoChange { path: result.path }.into());
    }

    Ok(result)
}

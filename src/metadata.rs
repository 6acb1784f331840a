//! Version metadata resolution.
//!
//! Gathers the values the template can reference: the project identity passed
//! on the command line, the git revision descriptor and remote URL, and the
//! name of the machine doing the build.
//!
//! Both git lookups are fatal on failure. There is no "Failed" sentinel: a
//! generated file either carries real source-control data or is not written.

use std::path::Path;

use crate::error::{
    GenError,
    GenResult,
};
use crate::process::{
    ProcessRunner,
    SystemRunner,
};

/// Placeholder name for the project name.
pub const PROJECT_NAME: &str = "PROJECT_NAME";
/// Placeholder name for the major version component.
pub const PROJECT_VERSION_MAJOR: &str = "PROJECT_VERSION_MAJOR";
/// Placeholder name for the minor version component.
pub const PROJECT_VERSION_MINOR: &str = "PROJECT_VERSION_MINOR";
/// Placeholder name for the patch version component.
pub const PROJECT_VERSION_PATCH: &str = "PROJECT_VERSION_PATCH";
/// Placeholder name for the git revision descriptor.
pub const PROJECT_GIT_COMMIT_ID: &str = "PROJECT_GIT_COMMIT_ID";
/// Placeholder name for the git remote URL.
pub const PROJECT_GIT_REPOSITORY_URL: &str = "PROJECT_GIT_REPOSITORY_URL";
/// Placeholder name for the build host name.
pub const PROJECT_BUILD_MACHINE: &str = "PROJECT_BUILD_MACHINE";

/// Every field name a template may reference.
pub const FIELD_NAMES: [&str; 7] = [
    PROJECT_NAME,
    PROJECT_VERSION_MAJOR,
    PROJECT_VERSION_MINOR,
    PROJECT_VERSION_PATCH,
    PROJECT_GIT_COMMIT_ID,
    PROJECT_GIT_REPOSITORY_URL,
    PROJECT_BUILD_MACHINE,
];

/// Project identity supplied by the caller. Values are passed through
/// verbatim; version components are not checked to be numeric.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectInfo {
    pub name: String,
    pub major: String,
    pub minor: String,
    pub patch: String,
}

/// Fully resolved metadata for one invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionMetadata {
    project: ProjectInfo,
    commit_id: String,
    repository_url: String,
    build_machine: String,
}

impl VersionMetadata {
    /// Assemble metadata from already known values.
    pub fn new(
        project: ProjectInfo,
        commit_id: impl Into<String>,
        repository_url: impl Into<String>,
        build_machine: impl Into<String>,
    ) -> Self {
        Self {
            project,
            commit_id: commit_id.into(),
            repository_url: repository_url.into(),
            build_machine: build_machine.into(),
        }
    }

    /// Look up a field by its placeholder name.
    pub fn get(&self, field: &str) -> Option<&str> {
        let value = match field {
            PROJECT_NAME => &self.project.name,
            PROJECT_VERSION_MAJOR => &self.project.major,
            PROJECT_VERSION_MINOR => &self.project.minor,
            PROJECT_VERSION_PATCH => &self.project.patch,
            PROJECT_GIT_COMMIT_ID => &self.commit_id,
            PROJECT_GIT_REPOSITORY_URL => &self.repository_url,
            PROJECT_BUILD_MACHINE => &self.build_machine,
            _ => return None,
        };
        Some(value.as_str())
    }

    /// Iterate over `(field name, value)` pairs in declaration order.
    pub fn fields(&self) -> impl Iterator<Item = (&'static str, &str)> {
        FIELD_NAMES
            .into_iter()
            .filter_map(move |name| self.get(name).map(|value| (name, value)))
    }

    pub fn commit_id(&self) -> &str {
        &self.commit_id
    }

    pub fn repository_url(&self) -> &str {
        &self.repository_url
    }

    pub fn build_machine(&self) -> &str {
        &self.build_machine
    }
}

/// Resolves [`VersionMetadata`] by querying git and the host.
#[derive(Debug, Clone)]
pub struct Resolver<R = SystemRunner> {
    runner: R,
    git: String,
}

impl Default for Resolver<SystemRunner> {
    fn default() -> Self {
        Self::new(SystemRunner, "git")
    }
}

impl<R: ProcessRunner> Resolver<R> {
    /// Create a resolver that runs `git` (a program name or path) through
    /// `runner`.
    pub fn new(runner: R, git: impl Into<String>) -> Self {
        Self {
            runner,
            git: git.into(),
        }
    }

    /// Resolve all metadata fields for the repository at `repo_root`.
    ///
    /// # Errors
    ///
    /// Returns [`GenError::SourceControl`] if either git lookup fails.
    pub fn resolve(&self, project: ProjectInfo, repo_root: &Path) -> GenResult<VersionMetadata> {
        let commit_id = self.commit_id(repo_root)?;
        let repository_url = self.repository_url(repo_root)?;

        Ok(VersionMetadata::new(
            project,
            commit_id,
            repository_url,
            host_name(),
        ))
    }

    /// Describe the current revision, e.g. `v1.2.0-4-g1a2b3c4-dirty`, or a
    /// bare short hash when no tag is reachable.
    pub fn commit_id(&self, repo_root: &Path) -> GenResult<String> {
        // Refresh the index first so --dirty only reports content changes.
        // The outcome does not matter; describe reports its own failures.
        let _ = self.runner.run(&self.git, &["status"], repo_root);

        self.query(
            "commit id",
            &["describe", "--tags", "--dirty", "--always"],
            repo_root,
        )
    }

    /// Read the URL of the `origin` remote.
    pub fn repository_url(&self, repo_root: &Path) -> GenResult<String> {
        self.query(
            "repository url",
            &["config", "--get", "remote.origin.url"],
            repo_root,
        )
    }

    fn query(&self, query: &'static str, args: &[&str], repo_root: &Path) -> GenResult<String> {
        let output = self
            .runner
            .run(&self.git, args, repo_root)
            .map_err(|e| GenError::SourceControl {
                query,
                reason: format!("could not run {}: {}", self.git, e),
            })?;

        output
            .first_line()
            .map_err(|reason| GenError::SourceControl { query, reason })
    }
}

/// Name of the machine running the build.
///
/// Never fails: falls back to the `HOSTNAME`/`COMPUTERNAME` environment
/// variables and finally to `"localhost"`.
#[allow(clippy::disallowed_methods)] // CLI tool needs direct env access
pub fn host_name() -> String {
    system_host_name()
        .or_else(|| std::env::var("HOSTNAME").ok())
        .or_else(|| std::env::var("COMPUTERNAME").ok())
        .map(|name| name.trim().to_string())
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| "localhost".to_string())
}

#[cfg(unix)]
fn system_host_name() -> Option<String> {
    nix::unistd::gethostname()
        .ok()
        .and_then(|name| name.into_string().ok())
}

#[cfg(not(unix))]
fn system_host_name() -> Option<String> {
    None
}

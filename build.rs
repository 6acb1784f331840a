//! Build script that stamps the tool's own version.
//!
//! Sets CARGO_PKG_VERSION so `version-gen --version` identifies the build:
//! 1. VERSION_GEN_BUILD_VERSION env var (CI workflows)
//! 2. Cargo.toml version + short git SHA
//! 3. Cargo.toml version alone when not built from a git checkout

use std::env;
use std::path::{
    Path,
    PathBuf,
};

use anyhow::{
    Context,
    Result,
};

fn main() {
    let version = compute_version_string(".").unwrap_or_else(|e| {
        println!("cargo:warning=Version computation failed: {e:#}, using fallback");
        env::var("CARGO_PKG_VERSION").unwrap_or_else(|_| "0.0.0".to_string())
    });

    println!("cargo:rustc-env=CARGO_PKG_VERSION={}", version);
    println!("cargo:rerun-if-changed=.git/HEAD");
    println!("cargo:rerun-if-changed=.git/refs");
    println!("cargo:rerun-if-env-changed=VERSION_GEN_BUILD_VERSION");
}

fn compute_version_string(repo_path: impl Into<PathBuf>) -> Result<String> {
    let repo_root: PathBuf = repo_path.into();

    if let Some(version) = env::var("VERSION_GEN_BUILD_VERSION")
        .ok()
        .filter(|v| !v.trim().is_empty())
    {
        return Ok(version);
    }

    let manifest_version = read_manifest_version(&repo_root.join("Cargo.toml"))?;

    Ok(match short_sha(&repo_root) {
        Some(sha) => format!("{manifest_version}+{sha}"),
        None => manifest_version,
    })
}

fn short_sha(repo_path: &Path) -> Option<String> {
    let repo = gix::discover(repo_path).ok()?;
    let head = repo.head().ok()?;
    let commit_id = head.id()?;
    let short = commit_id.shorten().ok()?;
    Some(short.to_string())
}

fn read_manifest_version(manifest: &Path) -> Result<String> {
    let contents = std::fs::read_to_string(manifest)
        .with_context(|| format!("Failed to read {}", manifest.display()))?;
    let value: toml::Value = toml::from_str(&contents)
        .with_context(|| format!("Failed to parse {}", manifest.display()))?;
    value
        .get("package")
        .and_then(|pkg| pkg.get("version"))
        .and_then(|v| v.as_str())
        .map(ToString::to_string)
        .context("No [package] version in Cargo.toml")
}

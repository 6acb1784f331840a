#![doc = include_str!("../README.md")]

/// Command implementations and argument types.
///
/// # Example: Generating from a `build.rs`
///
/// ```no_run
/// use version_gen::commands::{
///     GenerateArgs,
///     generate,
/// };
///
/// fn main() -> anyhow::Result<()> {
///     let out_dir = std::env::var("OUT_DIR")?;
///     generate(GenerateArgs {
///         genpattern: Some("version.rs.in".into()),
///         output: "version.rs".to_string(),
///         dir: Some(out_dir.into()),
///         name: env!("CARGO_PKG_NAME").to_string(),
///         major: env!("CARGO_PKG_VERSION_MAJOR").to_string(),
///         minor: env!("CARGO_PKG_VERSION_MINOR").to_string(),
///         patch: env!("CARGO_PKG_VERSION_PATCH").to_string(),
///         keep_old: true,
///         ..GenerateArgs::default()
///     })?;
///     println!("cargo:rerun-if-changed=version.rs.in");
///     println!("cargo:rerun-if-changed=.git/HEAD");
///     Ok(())
/// }
/// ```
pub mod commands;
/// Build-graph dependency and output lists.
pub mod build_graph;
/// Error types.
pub mod error;
/// Version metadata resolution.
pub mod metadata;
/// Writing generated files.
pub mod output;
/// External process execution.
pub mod process;
/// Template loading and rendering.
pub mod template;

pub use error::{
    GenError,
    GenResult,
};

//! Error types for version metadata generation.
//!
//! Every failure the generator can hit maps to one [`GenError`] variant so the
//! command layer can pick an exit status without inspecting message text.
//! [`GenError::NoChange`] is deliberately its own variant: build systems use it
//! as a "nothing to do" signal rather than a hard failure.

use std::path::PathBuf;

use thiserror::Error;

/// Result alias used by the library modules.
pub type GenResult<T> = std::result::Result<T, GenError>;

/// Errors raised while resolving, rendering, or writing version metadata.
#[derive(Debug, Error)]
pub enum GenError {
    /// A source-control lookup produced no usable output.
    ///
    /// Raised for both the revision descriptor and the remote URL. Either
    /// lookup failing aborts the whole invocation.
    #[error("Failed to get git {query}: {reason}")]
    SourceControl {
        /// Which lookup failed (e.g. "commit id", "repository url").
        query: &'static str,
        /// What went wrong.
        reason: String,
    },

    /// The template references a placeholder that is not a metadata field.
    #[error("Template references unknown field {{{field}}}")]
    TemplateField {
        /// The offending placeholder name, without braces.
        field: String,
    },

    /// The template contains a brace that is neither a placeholder nor an
    /// escaped `{{` / `}}` pair.
    #[error("Malformed template at byte {position}: {reason}")]
    TemplateSyntax {
        /// Byte offset of the offending brace.
        position: usize,
        /// Short description of the problem.
        reason: &'static str,
    },

    /// `--check-changes` was requested but the output file did not change.
    #[error("No changes! {} is up to date", .path.display())]
    NoChange {
        /// The output file that was left as is.
        path: PathBuf,
    },

    /// A filesystem operation failed.
    #[error("Failed to {action} {}", .path.display())]
    Io {
        /// What was being attempted ("read", "write", "create directory").
        action: &'static str,
        /// Path involved in the failed operation.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

impl GenError {
    /// Exit status the command-line tool reports for this error.
    ///
    /// `NoChange` gets its own status so callers can tell it apart from real
    /// failures.
    pub fn exit_code(&self) -> u8 {
        match self {
            GenError::NoChange { .. } => 3,
            _ => 1,
        }
    }

    pub(crate) fn io(action: &'static str, path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        GenError::Io {
            action,
            path: path.into(),
            source,
        }
    }
}

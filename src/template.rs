//! Template loading and placeholder substitution.
//!
//! A template is plain text with `{FIELD}` placeholders naming
//! [`VersionMetadata`] fields. Rendering is a single pass: substituted values
//! are never rescanned, so a value containing braces is copied verbatim.
//!
//! Literal braces are written `{{` and `}}`. Any other brace that does not
//! form a `{FIELD}` placeholder is an error rather than being passed through.
//!
//! # Examples
//!
//! ```
//! use version_gen::metadata::{
//!     ProjectInfo,
//!     VersionMetadata,
//! };
//! use version_gen::template::render;
//!
//! let project = ProjectInfo {
//!     name: "Foo".into(),
//!     major: "1".into(),
//!     minor: "2".into(),
//!     patch: "3".into(),
//! };
//! let metadata = VersionMetadata::new(project, "v1.2.3-0-gabc1234", "url", "host");
//! let text = render("{PROJECT_NAME} v{PROJECT_VERSION_MAJOR} {{x}}", &metadata).unwrap();
//! assert_eq!(text, "Foo v1 {x}");
//! ```

use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;

use crate::error::{
    GenError,
    GenResult,
};
use crate::metadata::VersionMetadata;

/// Built-in template: a C++ source file defining the constants declared in
/// `version.hpp`. The build timestamp comes from the compiler's
/// `__DATE__`/`__TIME__` macros and is not a placeholder.
pub const DEFAULT_TEMPLATE: &str = r#"
#include "version.hpp"

// Major version number
const int PROJECT_VERSION_MAJOR={PROJECT_VERSION_MAJOR};

// Minor version number
const int PROJECT_VERSION_MINOR={PROJECT_VERSION_MINOR};

// Patch level
const int PROJECT_VERSION_PATCH={PROJECT_VERSION_PATCH};

const char PROJECT_NAME[] =              "{PROJECT_NAME}";
const char PROJECT_GIT_COMMIT_ID[]=      "{PROJECT_GIT_COMMIT_ID}";
const char PROJECT_BUILD_MACHINE[]=      "{PROJECT_BUILD_MACHINE}";
const char PROJECT_GIT_REPOSITORY_URL[]= "{PROJECT_GIT_REPOSITORY_URL}";
const char PROJECT_BUILD_DATE_TIME[] =   __DATE__ " " __TIME__;

// Human-readable version string.
const char PROJECT_VERSION_STRING[]=     "{PROJECT_NAME} v{PROJECT_VERSION_MAJOR}.{PROJECT_VERSION_MINOR}.{PROJECT_VERSION_PATCH}-{PROJECT_GIT_COMMIT_ID}";
"#;

// Alternation order matters: escapes win over placeholders, placeholders over
// stray braces.
static TOKEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\{\{|\}\}|\{([^{}]*)\}|[{}]").expect("placeholder pattern is valid")
});

/// Load a template: the file at `path`, or [`DEFAULT_TEMPLATE`] when `None`.
///
/// # Errors
///
/// Returns [`GenError::Io`] if the file cannot be read.
pub fn load(path: Option<&Path>) -> GenResult<String> {
    match path {
        Some(path) => std::fs::read_to_string(path).map_err(|e| GenError::io("read", path, e)),
        None => Ok(DEFAULT_TEMPLATE.to_string()),
    }
}

/// Substitute every `{FIELD}` in `template` with the matching metadata value.
///
/// # Errors
///
/// - [`GenError::TemplateField`] if a placeholder names an unknown field.
/// - [`GenError::TemplateSyntax`] for an unmatched `{` or `}`.
pub fn render(template: &str, metadata: &VersionMetadata) -> GenResult<String> {
    let mut out = String::with_capacity(template.len());
    let mut last = 0;

    for caps in TOKEN.captures_iter(template) {
        let token = caps.get_match();
        out.push_str(&template[last..token.start()]);
        last = token.end();

        match token.as_str() {
            "{{" => out.push('{'),
            "}}" => out.push('}'),
            "{" => {
                return Err(GenError::TemplateSyntax {
                    position: token.start(),
                    reason: "unmatched '{'",
                });
            }
            "}" => {
                return Err(GenError::TemplateSyntax {
                    position: token.start(),
                    reason: "single '}' encountered",
                });
            }
            _ => {
                let field = caps.get(1).map_or("", |m| m.as_str());
                let value = metadata
                    .get(field)
                    .ok_or_else(|| GenError::TemplateField {
                        field: field.to_string(),
                    })?;
                out.push_str(value);
            }
        }
    }

    out.push_str(&template[last..]);
    Ok(out)
}

//! Error types for rendering.
//!
//! [`RenderError`] is returned by every rendering operation. Engine failures
//! are converted into it without being recovered from, so callers see the
//! engine's own message.

use std::error::Error as StdError;
use std::io;
use std::path::PathBuf;

use crate::template::RegistryError;

/// Error type for rendering operations.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    /// A template document could not be read from disk.
    #[error("failed to read template {}: {source}", .path.display())]
    Io {
        /// Path that failed to read
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Template syntax error, undefined variable, or other engine failure.
    #[error("template error: {0}")]
    Template(String),

    /// The engine has no template registered under this name.
    #[error("template not found: {0}")]
    TemplateNotFound(String),

    /// Bound data could not be serialized for the engine.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// Template directory resolution failed.
    #[error(transparent)]
    Registry(#[from] RegistryError),
}

impl RenderError {
    /// Creates an I/O error for the given path.
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

impl From<serde_json::Error> for RenderError {
    fn from(err: serde_json::Error) -> Self {
        RenderError::Serialization(err.to_string())
    }
}

impl From<minijinja::Error> for RenderError {
    fn from(err: minijinja::Error) -> Self {
        use minijinja::ErrorKind;

        match err.kind() {
            ErrorKind::TemplateNotFound => RenderError::TemplateNotFound(err.to_string()),
            ErrorKind::BadSerialization => RenderError::Serialization(err.to_string()),
            _ => RenderError::Template(err.to_string()),
        }
    }
}

impl From<tera::Error> for RenderError {
    fn from(err: tera::Error) -> Self {
        match &err.kind {
            tera::ErrorKind::TemplateNotFound(name) => RenderError::TemplateNotFound(name.clone()),
            tera::ErrorKind::Json(e) => RenderError::Serialization(e.to_string()),
            _ => RenderError::Template(tera_message(&err)),
        }
    }
}

/// Flattens a tera error and its causes into one line.
///
/// Tera puts the useful detail (line, column, missing variable) in the
/// source chain rather than the top-level message.
fn tera_message(err: &tera::Error) -> String {
    let mut message = err.to_string();
    let mut source = StdError::source(err);
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = RenderError::TemplateNotFound("foo".to_string());
        assert!(err.to_string().contains("template not found"));
        assert!(err.to_string().contains("foo"));
    }

    #[test]
    fn test_io_error_names_path() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let err = RenderError::io("templates/missing.html", io_err);
        assert!(matches!(err, RenderError::Io { .. }));
        assert!(err.to_string().contains("templates/missing.html"));
        assert!(StdError::source(&err).is_some());
    }

    #[test]
    fn test_from_minijinja_template_not_found() {
        let mj_err = minijinja::Error::new(
            minijinja::ErrorKind::TemplateNotFound,
            "template 'foo' not found",
        );
        let render_err: RenderError = mj_err.into();
        assert!(matches!(render_err, RenderError::TemplateNotFound(_)));
    }

    #[test]
    fn test_from_minijinja_syntax_error() {
        let mj_err = minijinja::Error::new(minijinja::ErrorKind::SyntaxError, "unexpected end");
        let render_err: RenderError = mj_err.into();
        assert!(matches!(render_err, RenderError::Template(_)));
    }

    #[test]
    fn test_from_tera_template_not_found() {
        let tera_err = tera::Error::template_not_found("hotels.html");
        let render_err: RenderError = tera_err.into();
        match render_err {
            RenderError::TemplateNotFound(name) => assert_eq!(name, "hotels.html"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_tera_message_includes_cause() {
        let inner = tera::Error::msg("Variable `hotels` not found in context");
        let outer = tera::Error::chain("Failed to render 'list.html'", inner);
        let render_err: RenderError = outer.into();
        let message = render_err.to_string();
        assert!(message.contains("list.html"));
        assert!(message.contains("hotels"));
    }
}

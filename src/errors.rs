//! Error types with rich diagnostics using miette
//!
//! Rendering never fails; these errors only come from loading scenes and
//! configuration out of JSON text.

use std::path::PathBuf;

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

/// Source context for error reporting
#[derive(Debug, Clone)]
pub struct SourceContext {
    /// Name of the source (filename or "<input>")
    pub name: String,
    /// The full source text
    pub source: String,
}

impl SourceContext {
    /// Create a new source context
    pub fn new(name: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            source: source.into(),
        }
    }

    /// Create a NamedSource for miette
    pub fn named_source(&self) -> NamedSource<String> {
        NamedSource::new(&self.name, self.source.clone())
    }

    /// Byte span for a 1-based line/column pair as reported by serde_json.
    pub fn span_at(&self, line: usize, column: usize) -> SourceSpan {
        let mut offset = 0;
        for (idx, text) in self.source.split_inclusive('\n').enumerate() {
            if idx + 1 == line {
                offset += column.saturating_sub(1).min(text.len());
                break;
            }
            offset += text.len();
        }
        let offset = offset.min(self.source.len());
        let len = usize::from(offset < self.source.len());
        (offset, len).into()
    }

    /// Wrap a serde_json failure into a diagnostic pointing at the bad token.
    pub fn json_error(&self, what: &'static str, err: &serde_json::Error) -> LoadError {
        LoadError::InvalidJson {
            what,
            message: err.to_string(),
            src: self.named_source(),
            span: self.span_at(err.line(), err.column()),
        }
    }
}

/// Errors that occur while loading scenes or configuration
#[derive(Error, Diagnostic, Debug)]
pub enum LoadError {
    #[error("invalid {what}: {message}")]
    #[diagnostic(code(scenesvg::load::invalid_json))]
    InvalidJson {
        what: &'static str,
        message: String,
        #[source_code]
        src: NamedSource<String>,
        #[label("here")]
        span: SourceSpan,
    },

    #[error("cannot read {}", path.display())]
    #[diagnostic(code(scenesvg::load::io))]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn span_points_into_later_lines() {
        let ctx = SourceContext::new("<input>", "{\n  \"a\": ?\n}");
        let span = ctx.span_at(2, 8);
        assert_eq!(span.offset(), 9);
        assert_eq!(&ctx.source[span.offset()..span.offset() + 1], "?");
    }

    #[test]
    fn span_clamps_past_end() {
        let ctx = SourceContext::new("<input>", "{");
        let span = ctx.span_at(3, 40);
        assert_eq!(span.offset(), 1);
        assert_eq!(span.len(), 0);
    }

    #[test]
    fn json_error_carries_message() {
        let ctx = SourceContext::new("scene.json", "[1, 2");
        let err = serde_json::from_str::<Vec<u8>>(&ctx.source).unwrap_err();
        let load = ctx.json_error("scene", &err);
        assert!(load.to_string().starts_with("invalid scene: "));
    }
}

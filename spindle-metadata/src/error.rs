use std::path::PathBuf;

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

/// Result type for loading metadata documents (boxed to reduce size on stack)
pub type Result<T> = std::result::Result<T, Box<LoadError>>;

/// Failure to read or parse a metadata document.
#[derive(Debug, Error, Diagnostic)]
pub enum LoadError {
    #[error("failed to read '{path}'")]
    #[diagnostic(code(spindle::metadata_io))]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse metadata")]
    #[diagnostic(code(spindle::metadata_parse))]
    Parse {
        #[source_code]
        src: NamedSource<String>,
        #[label("parse error here")]
        span: Option<SourceSpan>,
        #[source]
        source: serde_json::Error,
    },

    #[error("{message}")]
    #[diagnostic(code(spindle::metadata_invalid))]
    Validation {
        #[source_code]
        src: NamedSource<String>,
        #[label("{message}")]
        span: Option<SourceSpan>,
        message: String,
    },
}

impl LoadError {
    /// Create a parse error pointing at the line and column serde_json
    /// reports.
    pub fn parse(source: serde_json::Error, src: &str, filename: &str) -> Box<Self> {
        let span = offset_of(src, source.line(), source.column()).map(SourceSpan::from);
        Box::new(LoadError::Parse {
            src: NamedSource::new(filename, src.to_string()),
            span,
            source,
        })
    }

    /// Create a validation error, labelled at the first occurrence of
    /// `needle` when it appears in the source.
    pub fn validation(
        message: impl Into<String>,
        src: &str,
        filename: &str,
        needle: Option<&str>,
    ) -> Box<Self> {
        let span = needle
            .and_then(|needle| src.find(needle).map(|start| (start, needle.len())))
            .map(SourceSpan::from);
        Box::new(LoadError::Validation {
            src: NamedSource::new(filename, src.to_string()),
            span,
            message: message.into(),
        })
    }
}

/// Byte offset of a 1-based line and column, clamped to the source.
fn offset_of(src: &str, line: usize, column: usize) -> Option<usize> {
    if line == 0 {
        return None;
    }
    let start: usize = src.split_inclusive('\n').take(line - 1).map(str::len).sum();
    Some((start + column.saturating_sub(1)).min(src.len().saturating_sub(1)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offset_of() {
        let src = "{\n  \"files\": x\n}";
        assert_eq!(offset_of(src, 1, 1), Some(0));
        assert_eq!(offset_of(src, 2, 12), Some(13));
        assert_eq!(offset_of(src, 0, 0), None);
        assert_eq!(offset_of(src, 9, 99), Some(src.len() - 1));
    }

    #[test]
    fn test_parse_error_has_span() {
        let src = "{ \"files\": [ }";
        let source = serde_json::from_str::<serde_json::Value>(src).unwrap_err();
        let err = LoadError::parse(source, src, "broken.json");
        assert!(matches!(*err, LoadError::Parse { span: Some(_), .. }));
        assert_eq!(err.to_string(), "failed to parse metadata");
    }
}

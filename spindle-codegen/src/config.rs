//! Emission settings, usually read from `spindle.toml`.

use std::path::{Path, PathBuf};

use miette::{Diagnostic, NamedSource, SourceSpan};
use serde::Deserialize;
use thiserror::Error;

use crate::builder::Indent;

/// Settings that shape every emitted file.
///
/// # Example
///
/// ```
/// use spindle_codegen::EmitConfig;
///
/// let config = EmitConfig::from_toml_str("indent = 2\nheader = \"Generated.\"", "spindle.toml").unwrap();
/// assert_eq!(config.indent, 2);
/// assert_eq!(config.default_imports, vec!["kotlin".to_string()]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EmitConfig {
    /// Spaces per indentation level, 1 to 8.
    pub indent: u8,
    /// Comment written at the top of every file.
    pub header: Option<String>,
    /// Packages whose classes are visible without an import.
    pub default_imports: Vec<String>,
    /// Emit `public` on declarations that declare no visibility.
    pub explicit_public: bool,
}

impl Default for EmitConfig {
    fn default() -> Self {
        Self {
            indent: 4,
            header: None,
            default_imports: vec!["kotlin".to_string()],
            explicit_public: false,
        }
    }
}

impl EmitConfig {
    /// Indentation for one level.
    pub fn indent(&self) -> Indent {
        Indent::Spaces(self.indent)
    }

    /// Load settings from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, Box<ConfigError>> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| {
            Box::new(ConfigError::Io {
                path: path.to_path_buf(),
                source,
            })
        })?;
        Self::from_toml_str(&content, &path.display().to_string())
    }

    /// Parse settings from TOML text, naming `filename` in diagnostics.
    pub fn from_toml_str(content: &str, filename: &str) -> Result<Self, Box<ConfigError>> {
        let config: Self = toml::from_str(content).map_err(|source: toml::de::Error| {
            Box::new(ConfigError::Parse {
                src: NamedSource::new(filename, content.to_string()),
                span: source.span().map(SourceSpan::from),
                source,
            })
        })?;
        config.validate(content, filename)?;
        Ok(config)
    }

    fn validate(&self, content: &str, filename: &str) -> Result<(), Box<ConfigError>> {
        if !(1..=8).contains(&self.indent) {
            return Err(Box::new(ConfigError::Invalid {
                src: NamedSource::new(filename, content.to_string()),
                span: value_span(content, "indent"),
                message: format!("indent must be between 1 and 8 spaces, got {}", self.indent),
            }));
        }
        Ok(())
    }
}

/// Span of the value assigned to a top-level `key`.
fn value_span(content: &str, key: &str) -> Option<SourceSpan> {
    let mut offset = 0;
    for line in content.split_inclusive('\n') {
        let trimmed = line.trim_start();
        if let Some(rest) = trimmed.strip_prefix(key) {
            if let Some(value) = rest.trim_start().strip_prefix('=') {
                let value = value.trim();
                let start = offset + (line.len() - trimmed.len()) + key.len()
                    + rest.find(value).unwrap_or(0);
                return Some(SourceSpan::from((start, value.len())));
            }
        }
        offset += line.len();
    }
    None
}

/// Failure to load an [`EmitConfig`].
#[derive(Debug, Error, Diagnostic)]
pub enum ConfigError {
    #[error("failed to read '{path}'")]
    #[diagnostic(code(spindle::config_io))]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse emit settings")]
    #[diagnostic(code(spindle::config_parse))]
    Parse {
        #[source_code]
        src: NamedSource<String>,
        #[label("parse error here")]
        span: Option<SourceSpan>,
        #[source]
        source: toml::de::Error,
    },

    #[error("{message}")]
    #[diagnostic(code(spindle::config_invalid))]
    Invalid {
        #[source_code]
        src: NamedSource<String>,
        #[label("{message}")]
        span: Option<SourceSpan>,
        message: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_gives_defaults() {
        let config = EmitConfig::from_toml_str("", "spindle.toml").unwrap();
        assert_eq!(config, EmitConfig::default());
        assert_eq!(config.indent(), Indent::KOTLIN);
    }

    #[test]
    fn test_all_fields() {
        let config = EmitConfig::from_toml_str(
            r#"
indent = 2
header = "Code generated by spindle. DO NOT EDIT."
default_imports = ["kotlin", "kotlin.collections"]
explicit_public = true
"#,
            "spindle.toml",
        )
        .unwrap();
        assert_eq!(config.indent(), Indent::COMPACT);
        assert_eq!(
            config.header.as_deref(),
            Some("Code generated by spindle. DO NOT EDIT.")
        );
        assert_eq!(config.default_imports.len(), 2);
        assert!(config.explicit_public);
    }

    #[test]
    fn test_unknown_field_is_rejected() {
        let err = EmitConfig::from_toml_str("tabs = true", "spindle.toml").unwrap_err();
        assert!(matches!(*err, ConfigError::Parse { span: Some(_), .. }));
    }

    #[test]
    fn test_indent_out_of_range_is_rejected() {
        let src = "header = \"x\"\nindent = 20\n";
        let err = EmitConfig::from_toml_str(src, "spindle.toml").unwrap_err();
        assert_eq!(err.to_string(), "indent must be between 1 and 8 spaces, got 20");
        let ConfigError::Invalid { span: Some(span), .. } = *err else {
            panic!("expected an invalid-value error with a span");
        };
        assert_eq!(&src[span.offset()..span.offset() + span.len()], "20");

        let err = EmitConfig::from_toml_str("indent = 0", "spindle.toml").unwrap_err();
        assert!(matches!(*err, ConfigError::Invalid { span: Some(_), .. }));
    }

    #[test]
    fn test_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("spindle.toml");
        std::fs::write(&path, "indent = 8\n").unwrap();
        assert_eq!(EmitConfig::from_file(&path).unwrap().indent, 8);

        let missing = EmitConfig::from_file(dir.path().join("missing.toml")).unwrap_err();
        assert!(matches!(*missing, ConfigError::Io { .. }));
    }
}

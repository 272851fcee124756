use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

/// Result type for Spindle operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Everything that can abort a translation or emission.
///
/// None of these are recoverable locally: a file either renders completely
/// or the error propagates to the caller before anything is written.
#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error("unsupported shape: {detail}")]
    #[diagnostic(code(spindle::unsupported_shape))]
    UnsupportedShape { detail: String },

    #[error("function type '{name}' has no fixed arity")]
    #[diagnostic(
        code(spindle::unimplemented_arity),
        help("only function types with a fixed parameter count (Function0, Function1, ...) can be expressed in source")
    )]
    UnimplementedArity { name: String },

    #[error("no type argument found for {id}! Analyzed {hint} with known parameters [{known}]")]
    #[diagnostic(
        code(spindle::missing_type_argument),
        help("the metadata references a type parameter that no enclosing declaration declares")
    )]
    MissingTypeArgument {
        id: String,
        hint: String,
        known: String,
    },

    #[error("{message}")]
    #[diagnostic(code(spindle::illegal_modifier_combination))]
    IllegalModifierCombination { message: String },

    #[error("failed to write '{path}'")]
    #[diagnostic(code(spindle::io))]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    /// Create an unsupported shape error.
    pub fn unsupported_shape(detail: impl Into<String>) -> Self {
        Self::UnsupportedShape {
            detail: detail.into(),
        }
    }

    /// Create an unimplemented arity error for the given function type name.
    pub fn unimplemented_arity(name: impl Into<String>) -> Self {
        Self::UnimplementedArity { name: name.into() }
    }

    /// Create an illegal modifier combination error.
    pub fn illegal(message: impl Into<String>) -> Self {
        Self::IllegalModifierCombination {
            message: message.into(),
        }
    }

    /// Create an I/O error for the given path.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

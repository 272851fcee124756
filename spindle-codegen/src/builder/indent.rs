//! Indentation configuration for code generation.

const SPACES: &str = "        ";

/// Indentation style for generated code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Indent {
    /// Spaces with the specified width (1 to 8).
    Spaces(u8),
    /// Tab character.
    Tab,
}

impl Indent {
    /// 4-space indentation, the conventional Kotlin style.
    pub const KOTLIN: Self = Self::Spaces(4);

    /// 2-space indentation.
    pub const COMPACT: Self = Self::Spaces(2);

    /// Convert to the string representation for one indent level.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Spaces(n @ 1..=8) => &SPACES[..*n as usize],
            // Fallback to 4 whitespaces
            Self::Spaces(_) => &SPACES[..4],
            Self::Tab => "\t",
        }
    }
}

impl Default for Indent {
    fn default() -> Self {
        Self::KOTLIN
    }
}

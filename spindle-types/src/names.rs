//! Identifier escaping and display-name lookup.

use crate::ClassName;

/// Hard keywords that can never be used as bare identifiers.
const KEYWORDS: &[&str] = &[
    "as",
    "break",
    "class",
    "continue",
    "do",
    "else",
    "false",
    "for",
    "fun",
    "if",
    "in",
    "interface",
    "is",
    "null",
    "object",
    "package",
    "return",
    "super",
    "this",
    "throw",
    "true",
    "try",
    "typealias",
    "typeof",
    "val",
    "var",
    "when",
    "while",
];

/// Check if a name is a hard keyword.
pub fn is_keyword(name: &str) -> bool {
    KEYWORDS.contains(&name)
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_alphabetic() || c == '_' || c == '$' => {}
        _ => return false,
    }
    chars.all(|c| c.is_alphanumeric() || c == '_' || c == '$')
}

/// Wrap a name in backticks when it is a keyword or not a plain identifier.
///
/// ```
/// use spindle_types::escape_if_necessary;
///
/// assert_eq!(escape_if_necessary("value"), "value");
/// assert_eq!(escape_if_necessary("in"), "`in`");
/// assert_eq!(escape_if_necessary("with space"), "`with space`");
/// ```
pub fn escape_if_necessary(name: &str) -> String {
    if is_keyword(name) || !is_identifier(name) {
        format!("`{}`", name)
    } else {
        name.to_string()
    }
}

/// Supplies the display form of a class reference.
///
/// The emission engine implements this with a per-file name table; the
/// [`Canonical`] implementation always spells out the full name.
pub trait NameLookup {
    /// Return the text to print for `class`.
    fn lookup(&self, class: &ClassName) -> String;
}

/// Fully-qualified display names, escaped segment by segment.
#[derive(Debug, Clone, Copy, Default)]
pub struct Canonical;

impl NameLookup for Canonical {
    fn lookup(&self, class: &ClassName) -> String {
        class
            .package()
            .split('.')
            .filter(|segment| !segment.is_empty())
            .chain(class.simple_names().iter().map(String::as_str))
            .map(escape_if_necessary)
            .collect::<Vec<_>>()
            .join(".")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keywords_are_escaped() {
        assert_eq!(escape_if_necessary("fun"), "`fun`");
        assert_eq!(escape_if_necessary("object"), "`object`");
        assert_eq!(escape_if_necessary("data"), "data");
    }

    #[test]
    fn test_dollar_is_an_identifier_character() {
        assert_eq!(escape_if_necessary("Foo$"), "Foo$");
        assert_eq!(escape_if_necessary("$Foo"), "$Foo");
    }

    #[test]
    fn test_invalid_identifiers_are_escaped() {
        assert_eq!(escape_if_necessary("1st"), "`1st`");
        assert_eq!(escape_if_necessary("a-b"), "`a-b`");
    }

    #[test]
    fn test_canonical_lookup_escapes_segments() {
        let class = ClassName::new("com.in.example", "Foo").nested("object");
        assert_eq!(Canonical.lookup(&class), "com.`in`.example.Foo.`object`");

        let no_package = ClassName::new("", "Foo");
        assert_eq!(Canonical.lookup(&no_package), "Foo");
    }
}

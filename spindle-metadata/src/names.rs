//! Class names from internal metadata paths.

use spindle_types::{ClassName, Error, Result};

/// Parse an internal class path such as `some/path/Foo.Nested`.
///
/// Everything before the last `/` is the package; the rest is the chain
/// of simple names separated by `.`. A `$` is an ordinary identifier
/// character. Local class paths (leading `.`) are rejected.
///
/// # Example
///
/// ```
/// use spindle_metadata::class_name_from_path;
///
/// let name = class_name_from_path("some/path/Foo.Nested").unwrap();
/// assert_eq!(name.package(), "some.path");
/// assert_eq!(name.simple_names(), ["Foo", "Nested"]);
/// ```
pub fn class_name_from_path(path: &str) -> Result<ClassName> {
    if path.starts_with('.') {
        return Err(Error::unsupported_shape(format!(
            "local or anonymous class '{}' cannot be referenced",
            path
        )));
    }
    let (package, names) = match path.rsplit_once('/') {
        Some((package, names)) => (package.replace('/', "."), names),
        None => (String::new(), path),
    };
    ClassName::from_parts(package, names.split('.')).ok_or_else(|| {
        Error::unsupported_shape(format!("class path '{}' has an empty name segment", path))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parts(path: &str) -> (String, Vec<String>) {
        let name = class_name_from_path(path).unwrap();
        (name.package().to_string(), name.simple_names().to_vec())
    }

    #[test]
    fn test_literal_paths() {
        assert_eq!(parts("some/path/Foo"), ("some.path".into(), vec!["Foo".into()]));
        assert_eq!(
            parts("some/path/Foo.Nested"),
            ("some.path".into(), vec!["Foo".into(), "Nested".into()])
        );
        assert_eq!(parts("some/path/Foo$"), ("some.path".into(), vec!["Foo$".into()]));
        assert_eq!(
            parts("ClassWithNoPackage"),
            (String::new(), vec!["ClassWithNoPackage".into()])
        );
    }

    #[test]
    fn test_dollar_is_part_of_the_name() {
        assert_eq!(
            parts("a/Outer$Inner.$"),
            ("a".into(), vec!["Outer$Inner".into(), "$".into()])
        );
    }

    #[test]
    fn test_local_class_is_rejected() {
        let err = class_name_from_path(".Local").unwrap_err();
        assert!(matches!(err, Error::UnsupportedShape { .. }));
    }

    #[test]
    fn test_empty_segment_is_rejected() {
        assert!(class_name_from_path("some/path/").is_err());
        assert!(class_name_from_path("some/path/Foo..Bar").is_err());
        assert!(class_name_from_path("").is_err());
    }
}

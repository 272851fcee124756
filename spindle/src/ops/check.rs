//! Check operation - metadata validation.

use std::path::Path;

use spindle_codegen::EmitConfig;
use spindle_metadata::Metadata;

use crate::reports::{CheckReport, FileSummary};

/// Execute the check operation.
///
/// Translates and renders every file without writing, so any error a
/// render would hit is reported here too.
pub fn check(
    metadata: &Metadata,
    config: &EmitConfig,
    input: &Path,
) -> spindle_types::Result<CheckReport> {
    let mut files = Vec::with_capacity(metadata.files.len());
    for spec in metadata.file_specs()? {
        let spec = spec.config(config.clone());
        spec.render()?;
        files.push(FileSummary {
            path: spec.relative_path(),
            declarations: spec.members().len(),
        });
    }
    Ok(CheckReport {
        input: input.to_path_buf(),
        files,
    })
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    #[test]
    fn test_check_counts_declarations() {
        let metadata = spindle_metadata::parse_str(
            r#"{ "files": [ {
                "package": "com.example",
                "name": "Ids",
                "type_aliases": [
                    { "name": "UserId", "underlying_type": { "classifier": { "class": "kotlin/Long" } } },
                    { "name": "OrgId", "underlying_type": { "classifier": { "class": "kotlin/Long" } } }
                ]
            } ] }"#,
        )
        .unwrap();
        let report = check(&metadata, &EmitConfig::default(), Path::new("ids.json")).unwrap();
        assert_eq!(report.input, PathBuf::from("ids.json"));
        assert_eq!(report.files.len(), 1);
        assert_eq!(report.files[0].declarations, 2);
    }

    #[test]
    fn test_check_reports_illegal_declarations() {
        // An abstract function in a final class.
        let metadata = spindle_metadata::parse_str(
            r#"{ "files": [ {
                "name": "Bad",
                "classes": [ {
                    "name": "Bad",
                    "functions": [ {
                        "name": "run",
                        "modality": "abstract",
                        "return_type": { "classifier": { "class": "kotlin/Unit" } }
                    } ]
                } ]
            } ] }"#,
        )
        .unwrap();
        let err = check(&metadata, &EmitConfig::default(), Path::new("bad.json")).unwrap_err();
        assert!(matches!(err, spindle_types::Error::IllegalModifierCombination { .. }));
    }
}

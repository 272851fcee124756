//! Annotation and constant literal rendering.

use spindle_types::{AnnotationRef, ClassName, CodeBlock, Result, union_annotations};

use crate::names::class_name_from_path;
use crate::raw::{RawAnnotation, RawAnnotationArgument};

/// Compiler markers that are never written back to source.
const INTRINSIC_ANNOTATIONS: [&str; 3] = [
    "kotlin/ExtensionFunctionType",
    "org/jetbrains/annotations/NotNull",
    "org/jetbrains/annotations/Nullable",
];

/// Build an annotation with its arguments in declaration order.
pub fn annotation_ref(raw: &RawAnnotation) -> Result<AnnotationRef> {
    let mut annotation = AnnotationRef::new(class_name_from_path(&raw.class_name)?);
    for (name, value) in &raw.arguments {
        annotation = annotation.member(name, literal(value)?);
    }
    Ok(annotation)
}

/// Convert annotations for emission: intrinsic markers dropped, the rest
/// sorted and deduplicated.
pub(crate) fn annotation_set(annotations: &[RawAnnotation]) -> Result<Vec<AnnotationRef>> {
    let converted = annotations
        .iter()
        .filter(|annotation| !INTRINSIC_ANNOTATIONS.contains(&annotation.class_name.as_str()))
        .map(annotation_ref)
        .collect::<Result<Vec<_>>>()?;
    Ok(union_annotations(&converted, &[]))
}

/// Render a constant as source text.
///
/// # Example
///
/// ```
/// use spindle_metadata::{RawAnnotationArgument, literal};
///
/// assert_eq!(literal(&RawAnnotationArgument::Byte(2)).unwrap().to_string(), "2.toByte()");
/// assert_eq!(literal(&RawAnnotationArgument::Long(2)).unwrap().to_string(), "2L");
/// ```
pub fn literal(value: &RawAnnotationArgument) -> Result<CodeBlock> {
    use RawAnnotationArgument as Arg;

    Ok(match value {
        Arg::Boolean(value) => CodeBlock::of(value.to_string()),
        Arg::Byte(value) => narrowed(i64::from(*value), "toByte"),
        Arg::Short(value) => narrowed(i64::from(*value), "toShort"),
        Arg::Int(value) => CodeBlock::of(value.to_string()),
        Arg::Long(value) => CodeBlock::of(format!("{}L", value)),
        Arg::UByte(value) => CodeBlock::of(format!("{}u.toUByte()", value)),
        Arg::UShort(value) => CodeBlock::of(format!("{}u.toUShort()", value)),
        Arg::UInt(value) => CodeBlock::of(format!("{}u", value)),
        Arg::ULong(value) => CodeBlock::of(format!("{}uL", value)),
        Arg::Float(value) => float("Float", f64::from(*value), value.is_finite(), || {
            format!("{:?}F", value)
        }),
        Arg::Double(value) => float("Double", *value, value.is_finite(), || format!("{:?}", value)),
        Arg::Char(value) => CodeBlock::of(format!("'{}'", escape_char(*value))),
        Arg::String(value) => CodeBlock::of(format!("\"{}\"", escape_string(value))),
        Arg::KClass {
            class_name,
            array_dimensions,
        } => {
            let array = ClassName::new("kotlin", "Array");
            let mut block = CodeBlock::new();
            for _ in 0..*array_dimensions {
                block.push_type(array.clone().into()).push_text("<");
            }
            block.push_type(class_name_from_path(class_name)?.into());
            for _ in 0..*array_dimensions {
                block.push_text(">");
            }
            block.add_text("::class")
        }
        Arg::Enum { class_name, entry } => {
            CodeBlock::of_type(class_name_from_path(class_name)?.into()).add_text(format!(".{}", entry))
        }
        Arg::Annotation(annotation) => annotation_ref(annotation)?.to_code_block(),
        Arg::Array(elements) => {
            let elements = elements.iter().map(literal).collect::<Result<Vec<_>>>()?;
            CodeBlock::join(elements, ", ", "[", "]")
        }
    })
}

/// `2.toByte()`; negative values are parenthesized so the conversion
/// applies to the signed literal.
fn narrowed(value: i64, conversion: &str) -> CodeBlock {
    if value < 0 {
        CodeBlock::of(format!("({}).{}()", value, conversion))
    } else {
        CodeBlock::of(format!("{}.{}()", value, conversion))
    }
}

fn float(
    type_name: &str,
    value: f64,
    finite: bool,
    render: impl FnOnce() -> String,
) -> CodeBlock {
    if finite {
        return CodeBlock::of(render());
    }
    let constant = if value.is_nan() {
        "NaN"
    } else if value > 0.0 {
        "POSITIVE_INFINITY"
    } else {
        "NEGATIVE_INFINITY"
    };
    CodeBlock::of(format!("{}.{}", type_name, constant))
}

fn escape_char(c: char) -> String {
    match c {
        '\'' => "\\'".to_string(),
        other => escape_common(other),
    }
}

fn escape_string(s: &str) -> String {
    s.chars()
        .map(|c| match c {
            '"' => "\\\"".to_string(),
            '$' => "${'$'}".to_string(),
            other => escape_common(other),
        })
        .collect()
}

fn escape_common(c: char) -> String {
    match c {
        '\\' => "\\\\".to_string(),
        '\n' => "\\n".to_string(),
        '\t' => "\\t".to_string(),
        '\r' => "\\r".to_string(),
        '\u{8}' => "\\b".to_string(),
        c if c.is_control() => format!("\\u{:04x}", c as u32),
        c => c.to_string(),
    }
}

//! Raw metadata descriptors.
//!
//! These mirror what a compiler metadata reader reports, as plain data.
//! Class names use the internal path form (`com/example/Outer.Inner`).
//! Every variant set is closed: unknown variants fail deserialization.

use std::fmt;

use indexmap::IndexMap;
use serde::Deserialize;
use spindle_types::Variance;

/// Identifies a type parameter within its declaration chain.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize)]
#[serde(untagged)]
pub enum TypeParameterId {
    Index(u32),
    Name(String),
}

impl fmt::Display for TypeParameterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Index(index) => write!(f, "{}", index),
            Self::Name(name) => f.write_str(name),
        }
    }
}

impl From<u32> for TypeParameterId {
    fn from(index: u32) -> Self {
        Self::Index(index)
    }
}

/// What a type reference points at.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RawClassifier {
    Class(String),
    TypeParameter(TypeParameterId),
    TypeAlias(String),
}

/// Declaration-site or use-site variance.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RawVariance {
    #[default]
    Invariant,
    In,
    Out,
}

impl From<RawVariance> for Variance {
    fn from(variance: RawVariance) -> Self {
        match variance {
            RawVariance::Invariant => Variance::Invariant,
            RawVariance::In => Variance::In,
            RawVariance::Out => Variance::Out,
        }
    }
}

/// A type argument: `*` or a type with a use-site variance.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum RawProjection {
    Star,
    Type {
        #[serde(default)]
        variance: RawVariance,
        #[serde(rename = "type")]
        ty: Box<RawType>,
    },
}

impl RawProjection {
    /// An invariant argument.
    pub fn invariant(ty: RawType) -> Self {
        Self::Type {
            variance: RawVariance::Invariant,
            ty: Box::new(ty),
        }
    }

    /// An argument with the given variance.
    pub fn with_variance(variance: RawVariance, ty: RawType) -> Self {
        Self::Type {
            variance,
            ty: Box::new(ty),
        }
    }
}

/// A type reference as found in metadata.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RawType {
    pub classifier: RawClassifier,
    #[serde(default)]
    pub arguments: Vec<RawProjection>,
    #[serde(default)]
    pub nullable: bool,
    #[serde(default)]
    pub suspend: bool,
    /// Set for extension function types (`R.() -> T`).
    #[serde(default)]
    pub extension: bool,
    #[serde(default)]
    pub annotations: Vec<RawAnnotation>,
    /// The type alias this type was written as, if any.
    #[serde(default)]
    pub abbreviated_type: Option<Box<RawType>>,
    #[serde(default)]
    pub outer_type: Option<Box<RawType>>,
    /// Upper bound of a platform type whose nullability is unknown.
    #[serde(default)]
    pub flexible_upper_bound: Option<Box<RawType>>,
}

impl RawType {
    fn new(classifier: RawClassifier) -> Self {
        Self {
            classifier,
            arguments: Vec::new(),
            nullable: false,
            suspend: false,
            extension: false,
            annotations: Vec::new(),
            abbreviated_type: None,
            outer_type: None,
            flexible_upper_bound: None,
        }
    }

    /// A reference to the class at `path`.
    pub fn class(path: impl Into<String>) -> Self {
        Self::new(RawClassifier::Class(path.into()))
    }

    /// A reference to the type parameter with index `id`.
    pub fn parameter(id: u32) -> Self {
        Self::new(RawClassifier::TypeParameter(TypeParameterId::Index(id)))
    }

    /// A reference to the type alias at `path`.
    pub fn alias(path: impl Into<String>) -> Self {
        Self::new(RawClassifier::TypeAlias(path.into()))
    }

    /// Add an invariant type argument.
    pub fn argument(mut self, ty: RawType) -> Self {
        self.arguments.push(RawProjection::invariant(ty));
        self
    }

    /// Add a type argument.
    pub fn projection(mut self, projection: RawProjection) -> Self {
        self.arguments.push(projection);
        self
    }

    /// Mark as nullable.
    pub fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }

    /// Mark as a suspending function type.
    pub fn suspending(mut self) -> Self {
        self.suspend = true;
        self
    }

    /// Mark as an extension function type.
    pub fn extension(mut self) -> Self {
        self.extension = true;
        self
    }

    /// Add a type-use annotation.
    pub fn annotation(mut self, annotation: RawAnnotation) -> Self {
        self.annotations.push(annotation);
        self
    }

    /// Record that this type was written as the alias `abbreviation`.
    pub fn abbreviated(mut self, abbreviation: RawType) -> Self {
        self.abbreviated_type = Some(Box::new(abbreviation));
        self
    }

    /// Set the outer type of an inner class reference.
    pub fn outer(mut self, outer: RawType) -> Self {
        self.outer_type = Some(Box::new(outer));
        self
    }

    /// Set the flexible upper bound.
    pub fn flexible(mut self, upper_bound: RawType) -> Self {
        self.flexible_upper_bound = Some(Box::new(upper_bound));
        self
    }
}

/// A declared type parameter.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RawTypeParameter {
    pub id: TypeParameterId,
    pub name: String,
    #[serde(default)]
    pub variance: RawVariance,
    #[serde(default)]
    pub reified: bool,
    #[serde(default)]
    pub upper_bounds: Vec<RawType>,
    #[serde(default)]
    pub annotations: Vec<RawAnnotation>,
}

impl RawTypeParameter {
    pub fn new(id: u32, name: impl Into<String>) -> Self {
        Self {
            id: TypeParameterId::Index(id),
            name: name.into(),
            variance: RawVariance::Invariant,
            reified: false,
            upper_bounds: Vec::new(),
            annotations: Vec::new(),
        }
    }

    /// Add an upper bound.
    pub fn bound(mut self, bound: RawType) -> Self {
        self.upper_bounds.push(bound);
        self
    }
}

/// An annotation application.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RawAnnotation {
    pub class_name: String,
    #[serde(default)]
    pub arguments: IndexMap<String, RawAnnotationArgument>,
}

impl RawAnnotation {
    pub fn new(class_name: impl Into<String>) -> Self {
        Self {
            class_name: class_name.into(),
            arguments: IndexMap::new(),
        }
    }

    /// Add a named argument.
    pub fn argument(mut self, name: impl Into<String>, value: RawAnnotationArgument) -> Self {
        self.arguments.insert(name.into(), value);
        self
    }
}

/// A compile-time constant: an annotation argument or a `const` value.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RawAnnotationArgument {
    Boolean(bool),
    Byte(i8),
    Short(i16),
    Int(i32),
    Long(i64),
    UByte(u8),
    UShort(u16),
    UInt(u32),
    ULong(u64),
    Float(f32),
    Double(f64),
    Char(char),
    String(String),
    KClass {
        class_name: String,
        #[serde(default)]
        array_dimensions: u32,
    },
    Enum {
        class_name: String,
        entry: String,
    },
    Annotation(RawAnnotation),
    Array(Vec<RawAnnotationArgument>),
}

/// Declared visibility.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RawVisibility {
    #[default]
    Public,
    Internal,
    Protected,
    Private,
}

/// Declared modality.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RawModality {
    #[default]
    Final,
    Open,
    Abstract,
    Sealed,
}

/// The kind of a class declaration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RawClassKind {
    #[default]
    Class,
    Interface,
    EnumClass,
    AnnotationClass,
    Object,
    CompanionObject,
}

/// A function or constructor parameter.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RawValueParameter {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: RawType,
    /// Element type of a `vararg` parameter.
    #[serde(default)]
    pub vararg_element_type: Option<RawType>,
    #[serde(default)]
    pub declares_default: bool,
    #[serde(default)]
    pub is_crossinline: bool,
    #[serde(default)]
    pub is_noinline: bool,
    #[serde(default)]
    pub annotations: Vec<RawAnnotation>,
}

impl RawValueParameter {
    pub fn new(name: impl Into<String>, ty: RawType) -> Self {
        Self {
            name: name.into(),
            ty,
            vararg_element_type: None,
            declares_default: false,
            is_crossinline: false,
            is_noinline: false,
            annotations: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct RawConstructor {
    pub visibility: RawVisibility,
    pub is_primary: bool,
    pub value_parameters: Vec<RawValueParameter>,
    pub annotations: Vec<RawAnnotation>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RawFunction {
    pub name: String,
    #[serde(default)]
    pub visibility: RawVisibility,
    #[serde(default)]
    pub modality: RawModality,
    #[serde(default)]
    pub type_parameters: Vec<RawTypeParameter>,
    #[serde(default)]
    pub receiver_type: Option<RawType>,
    #[serde(default)]
    pub value_parameters: Vec<RawValueParameter>,
    pub return_type: RawType,
    #[serde(default)]
    pub annotations: Vec<RawAnnotation>,
    #[serde(default)]
    pub is_override: bool,
    #[serde(default)]
    pub is_suspend: bool,
    #[serde(default)]
    pub is_inline: bool,
    #[serde(default)]
    pub is_operator: bool,
    #[serde(default)]
    pub is_infix: bool,
    #[serde(default)]
    pub is_tailrec: bool,
    #[serde(default)]
    pub is_external: bool,
}

impl RawFunction {
    pub fn new(name: impl Into<String>, return_type: RawType) -> Self {
        Self {
            name: name.into(),
            visibility: RawVisibility::Public,
            modality: RawModality::Final,
            type_parameters: Vec::new(),
            receiver_type: None,
            value_parameters: Vec::new(),
            return_type,
            annotations: Vec::new(),
            is_override: false,
            is_suspend: false,
            is_inline: false,
            is_operator: false,
            is_infix: false,
            is_tailrec: false,
            is_external: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RawProperty {
    pub name: String,
    pub return_type: RawType,
    #[serde(default)]
    pub visibility: RawVisibility,
    #[serde(default)]
    pub modality: RawModality,
    #[serde(default)]
    pub type_parameters: Vec<RawTypeParameter>,
    #[serde(default)]
    pub receiver_type: Option<RawType>,
    #[serde(default)]
    pub annotations: Vec<RawAnnotation>,
    #[serde(default)]
    pub is_var: bool,
    #[serde(default)]
    pub is_override: bool,
    #[serde(default)]
    pub is_const: bool,
    #[serde(default)]
    pub is_lateinit: bool,
    /// Value of a `const` property.
    #[serde(default)]
    pub constant: Option<RawAnnotationArgument>,
}

impl RawProperty {
    pub fn new(name: impl Into<String>, return_type: RawType) -> Self {
        Self {
            name: name.into(),
            return_type,
            visibility: RawVisibility::Public,
            modality: RawModality::Final,
            type_parameters: Vec::new(),
            receiver_type: None,
            annotations: Vec::new(),
            is_var: false,
            is_override: false,
            is_const: false,
            is_lateinit: false,
            constant: None,
        }
    }
}

/// A supertype, flagged when it is known to be a class rather than an
/// interface.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RawSupertype {
    #[serde(rename = "type")]
    pub ty: RawType,
    #[serde(default)]
    pub is_class: bool,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RawTypeAlias {
    pub name: String,
    #[serde(default)]
    pub visibility: RawVisibility,
    #[serde(default)]
    pub type_parameters: Vec<RawTypeParameter>,
    pub underlying_type: RawType,
    #[serde(default)]
    pub annotations: Vec<RawAnnotation>,
}

/// A class declaration.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RawClass {
    /// Internal path of the class, e.g. `com/example/Outer.Inner`.
    pub name: String,
    #[serde(default)]
    pub kind: RawClassKind,
    #[serde(default)]
    pub visibility: RawVisibility,
    #[serde(default)]
    pub modality: RawModality,
    #[serde(default)]
    pub is_data: bool,
    #[serde(default)]
    pub is_inner: bool,
    #[serde(default)]
    pub is_value: bool,
    #[serde(default)]
    pub is_external: bool,
    #[serde(default)]
    pub annotations: Vec<RawAnnotation>,
    #[serde(default)]
    pub type_parameters: Vec<RawTypeParameter>,
    #[serde(default)]
    pub supertypes: Vec<RawSupertype>,
    #[serde(default)]
    pub constructors: Vec<RawConstructor>,
    #[serde(default)]
    pub properties: Vec<RawProperty>,
    #[serde(default)]
    pub functions: Vec<RawFunction>,
    #[serde(default)]
    pub enum_entries: Vec<String>,
    #[serde(default)]
    pub companion: Option<Box<RawClass>>,
    #[serde(default)]
    pub nested_classes: Vec<RawClass>,
}

impl RawClass {
    pub fn new(name: impl Into<String>, kind: RawClassKind) -> Self {
        Self {
            name: name.into(),
            kind,
            visibility: RawVisibility::Public,
            modality: RawModality::Final,
            is_data: false,
            is_inner: false,
            is_value: false,
            is_external: false,
            annotations: Vec::new(),
            type_parameters: Vec::new(),
            supertypes: Vec::new(),
            constructors: Vec::new(),
            properties: Vec::new(),
            functions: Vec::new(),
            enum_entries: Vec::new(),
            companion: None,
            nested_classes: Vec::new(),
        }
    }
}

/// One source file worth of declarations.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RawFile {
    /// Dotted package name; internal `/` separators are accepted too.
    #[serde(default)]
    pub package: String,
    /// File name without extension.
    pub name: String,
    #[serde(default)]
    pub annotations: Vec<RawAnnotation>,
    #[serde(default)]
    pub classes: Vec<RawClass>,
    #[serde(default)]
    pub type_aliases: Vec<RawTypeAlias>,
    #[serde(default)]
    pub properties: Vec<RawProperty>,
    #[serde(default)]
    pub functions: Vec<RawFunction>,
}

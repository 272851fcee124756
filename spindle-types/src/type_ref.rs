//! Type references.
//!
//! A [`TypeRef`] is an immutable value describing how a type is referenced
//! in source: its structural [`TypeShape`] plus nullability and type-use
//! annotations. Copies with modified fields replace mutation.

use std::fmt;

use crate::{AnnotationRef, Canonical, ClassName, Error, NameLookup, Result, escape_if_necessary};

/// Declaration-site or use-site variance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub enum Variance {
    #[default]
    Invariant,
    /// Consumer (`in T`).
    In,
    /// Producer (`out T`).
    Out,
}

impl Variance {
    /// The source keyword for this variance, if any.
    pub fn keyword(&self) -> Option<&'static str> {
        match self {
            Self::Invariant => None,
            Self::In => Some("in"),
            Self::Out => Some("out"),
        }
    }
}

/// A type variable such as `T` in `class Box<T : Any>`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TypeVariable {
    pub name: String,
    pub bounds: Vec<TypeRef>,
    pub variance: Variance,
    pub reified: bool,
    pub annotations: Vec<AnnotationRef>,
}

impl TypeVariable {
    /// Create an unbounded, invariant type variable.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            bounds: Vec::new(),
            variance: Variance::Invariant,
            reified: false,
            annotations: Vec::new(),
        }
    }

    /// Add an upper bound.
    pub fn bound(mut self, bound: TypeRef) -> Self {
        self.bounds.push(bound);
        self
    }

    /// Add multiple upper bounds.
    pub fn bounds(mut self, bounds: impl IntoIterator<Item = TypeRef>) -> Self {
        self.bounds.extend(bounds);
        self
    }

    /// Set the declaration-site variance.
    pub fn variance(mut self, variance: Variance) -> Self {
        self.variance = variance;
        self
    }

    /// Mark as reified.
    pub fn reified(mut self) -> Self {
        self.reified = true;
        self
    }

    /// Add a declaration annotation (`<@Ann T>`).
    pub fn annotated(mut self, annotation: AnnotationRef) -> Self {
        self.annotations.push(annotation);
        self
    }

    /// Collect every class the declaration of this variable prints.
    pub fn collect_classes(&self, out: &mut Vec<ClassName>) {
        for annotation in &self.annotations {
            annotation.collect_classes(out);
        }
        for bound in &self.bounds {
            bound.collect_classes(out);
        }
    }
}

/// A use-site projection: `in T`, `out T`, or `*`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Projection {
    In(Box<TypeRef>),
    Out(Box<TypeRef>),
    Star,
}

/// A function type such as `suspend String.(Int) -> Unit`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FunctionType {
    pub receiver: Option<Box<TypeRef>>,
    pub params: Vec<TypeRef>,
    pub returns: Box<TypeRef>,
    pub suspending: bool,
}

impl FunctionType {
    /// Create a non-suspending function type without receiver.
    pub fn new(params: impl IntoIterator<Item = TypeRef>, returns: TypeRef) -> Self {
        Self {
            receiver: None,
            params: params.into_iter().collect(),
            returns: Box::new(returns),
            suspending: false,
        }
    }

    /// Set the receiver type.
    pub fn receiver(mut self, receiver: TypeRef) -> Self {
        self.receiver = Some(Box::new(receiver));
        self
    }

    /// Mark as suspending.
    pub fn suspending(mut self, suspending: bool) -> Self {
        self.suspending = suspending;
        self
    }
}

/// The structural shape of a type reference.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeShape {
    /// A plain class reference.
    Named {
        class: ClassName,
        /// The fully expanded type when this reference is a type alias.
        alias: Option<Box<TypeRef>>,
    },
    /// A class applied to type arguments.
    Parameterized {
        raw: ClassName,
        args: Vec<TypeRef>,
        /// The fully expanded type when this reference is a type alias.
        alias: Option<Box<TypeRef>>,
    },
    Variable(TypeVariable),
    Wildcard(Projection),
    Function(FunctionType),
}

/// An immutable type reference.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TypeRef {
    shape: TypeShape,
    nullable: bool,
    annotations: Vec<AnnotationRef>,
}

impl TypeRef {
    /// Create a type reference from a shape.
    pub fn new(shape: TypeShape) -> Self {
        Self {
            shape,
            nullable: false,
            annotations: Vec::new(),
        }
    }

    /// Create a plain class reference.
    pub fn class(class: ClassName) -> Self {
        Self::new(TypeShape::Named { class, alias: None })
    }

    /// Create a parameterized type reference.
    pub fn parameterized(raw: ClassName, args: Vec<TypeRef>) -> Self {
        Self::new(TypeShape::Parameterized {
            raw,
            args,
            alias: None,
        })
    }

    /// Create a reference to a bare type variable.
    pub fn variable(name: impl Into<String>) -> Self {
        Self::new(TypeShape::Variable(TypeVariable::new(name)))
    }

    /// Create a reference to a fully described type variable.
    pub fn type_variable(variable: TypeVariable) -> Self {
        Self::new(TypeShape::Variable(variable))
    }

    /// `out T`.
    pub fn producer_of(ty: TypeRef) -> Self {
        Self::new(TypeShape::Wildcard(Projection::Out(Box::new(ty))))
    }

    /// `in T`.
    pub fn consumer_of(ty: TypeRef) -> Self {
        Self::new(TypeShape::Wildcard(Projection::In(Box::new(ty))))
    }

    /// `*`.
    pub fn star() -> Self {
        Self::new(TypeShape::Wildcard(Projection::Star))
    }

    /// Create a function type reference.
    pub fn function(function: FunctionType) -> Self {
        Self::new(TypeShape::Function(function))
    }

    /// The structural shape.
    pub fn shape(&self) -> &TypeShape {
        &self.shape
    }

    /// Check if this reference is nullable.
    pub fn is_nullable(&self) -> bool {
        self.nullable
    }

    /// Type-use annotations, in order.
    pub fn annotations(&self) -> &[AnnotationRef] {
        &self.annotations
    }

    /// Copy with the given nullability.
    pub fn with_nullable(mut self, nullable: bool) -> Self {
        self.nullable = nullable;
        self
    }

    /// Copy marked nullable.
    pub fn nullable(self) -> Self {
        self.with_nullable(true)
    }

    /// Copy with the given annotations, replacing any existing ones.
    pub fn with_annotations(mut self, annotations: Vec<AnnotationRef>) -> Self {
        self.annotations = annotations;
        self
    }

    /// Copy with one more annotation.
    pub fn annotated(mut self, annotation: AnnotationRef) -> Self {
        self.annotations.push(annotation);
        self
    }

    /// Copy carrying `expansion` as the type this alias reference stands for.
    ///
    /// Only class references can name an alias.
    pub fn with_alias(mut self, expansion: TypeRef) -> Result<Self> {
        if let TypeShape::Named { alias, .. } | TypeShape::Parameterized { alias, .. } =
            &mut self.shape
        {
            *alias = Some(Box::new(expansion));
            return Ok(self);
        }
        Err(Error::unsupported_shape(format!(
            "type alias reference '{}' must be a class or parameterized type",
            self
        )))
    }

    /// The expanded type, when this reference is a type alias.
    pub fn alias_expansion(&self) -> Option<&TypeRef> {
        match &self.shape {
            TypeShape::Named { alias, .. } | TypeShape::Parameterized { alias, .. } => {
                alias.as_deref()
            }
            _ => None,
        }
    }

    /// The class this reference names, for class and parameterized types.
    pub fn class_name(&self) -> Option<&ClassName> {
        match &self.shape {
            TypeShape::Named { class, .. } => Some(class),
            TypeShape::Parameterized { raw, .. } => Some(raw),
            _ => None,
        }
    }

    /// Type arguments, empty unless parameterized.
    pub fn type_arguments(&self) -> &[TypeRef] {
        match &self.shape {
            TypeShape::Parameterized { args, .. } => args,
            _ => &[],
        }
    }

    /// Collect every class this reference prints, including annotation types.
    ///
    /// Bounds of type variables are not part of a use site and are skipped;
    /// alias expansions are never printed and are skipped too.
    pub fn collect_classes(&self, out: &mut Vec<ClassName>) {
        for annotation in &self.annotations {
            annotation.collect_classes(out);
        }
        match &self.shape {
            TypeShape::Named { class, .. } => out.push(class.clone()),
            TypeShape::Parameterized { raw, args, .. } => {
                out.push(raw.clone());
                for arg in args {
                    arg.collect_classes(out);
                }
            }
            TypeShape::Variable(_) => {}
            TypeShape::Wildcard(Projection::In(ty) | Projection::Out(ty)) => {
                ty.collect_classes(out)
            }
            TypeShape::Wildcard(Projection::Star) => {}
            TypeShape::Function(function) => {
                if let Some(receiver) = &function.receiver {
                    receiver.collect_classes(out);
                }
                for param in &function.params {
                    param.collect_classes(out);
                }
                function.returns.collect_classes(out);
            }
        }
    }

    /// Render this reference using `names` for class display names.
    pub fn render(&self, names: &dyn NameLookup) -> String {
        let mut out = String::new();
        for annotation in &self.annotations {
            out.push_str(&annotation.render(names));
            out.push(' ');
        }
        match &self.shape {
            TypeShape::Function(function) if self.nullable => {
                out.push('(');
                out.push_str(&render_function(function, names));
                out.push_str(")?");
            }
            TypeShape::Wildcard(projection) => out.push_str(&render_projection(projection, names)),
            shape => {
                out.push_str(&render_shape(shape, names));
                if self.nullable {
                    out.push('?');
                }
            }
        }
        out
    }
}

impl From<ClassName> for TypeRef {
    fn from(class: ClassName) -> Self {
        Self::class(class)
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render(&Canonical))
    }
}

fn render_shape(shape: &TypeShape, names: &dyn NameLookup) -> String {
    match shape {
        TypeShape::Named { class, .. } => names.lookup(class),
        TypeShape::Parameterized { raw, args, .. } => {
            if args.is_empty() {
                names.lookup(raw)
            } else {
                let args: Vec<_> = args.iter().map(|arg| arg.render(names)).collect();
                format!("{}<{}>", names.lookup(raw), args.join(", "))
            }
        }
        TypeShape::Variable(variable) => escape_if_necessary(&variable.name),
        TypeShape::Wildcard(projection) => render_projection(projection, names),
        TypeShape::Function(function) => render_function(function, names),
    }
}

fn render_projection(projection: &Projection, names: &dyn NameLookup) -> String {
    match projection {
        Projection::In(ty) => format!("in {}", ty.render(names)),
        Projection::Out(ty) => format!("out {}", ty.render(names)),
        Projection::Star => "*".to_string(),
    }
}

fn render_function(function: &FunctionType, names: &dyn NameLookup) -> String {
    let mut out = String::new();
    if function.suspending {
        out.push_str("suspend ");
    }
    if let Some(receiver) = &function.receiver {
        let rendered = receiver.render(names);
        if matches!(receiver.shape, TypeShape::Function(_)) && !receiver.nullable {
            out.push('(');
            out.push_str(&rendered);
            out.push(')');
        } else {
            out.push_str(&rendered);
        }
        out.push('.');
    }
    let params: Vec<_> = function.params.iter().map(|p| p.render(names)).collect();
    out.push('(');
    out.push_str(&params.join(", "));
    out.push_str(") -> ");
    out.push_str(&function.returns.render(names));
    out
}

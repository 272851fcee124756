//! Functions and constructors.

use std::collections::BTreeSet;

use spindle_types::{AnnotationRef, ClassName, CodeBlock, Error, Result, TypeRef, TypeVariable};

use super::{KModifier, ParameterSpec, Statement, insert_modifier};

/// Modifiers a constructor can never carry.
const CONSTRUCTOR_FORBIDDEN: &[KModifier] = &[
    KModifier::Abstract,
    KModifier::Open,
    KModifier::Override,
    KModifier::Inline,
    KModifier::Operator,
    KModifier::Suspend,
    KModifier::Infix,
    KModifier::Tailrec,
    KModifier::External,
];

/// What a [`FunSpec`] declares.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FunKind {
    Function(String),
    Constructor,
}

/// The target of a secondary constructor's delegation call.
#[derive(Debug, Clone, PartialEq)]
pub enum Delegation {
    This(Vec<CodeBlock>),
    Super(Vec<CodeBlock>),
}

/// A function, a secondary constructor, or a primary constructor.
///
/// Builder calls that would produce an illegal declaration fail with
/// [`Error::IllegalModifierCombination`]. Checks run when the call is
/// made, so `inline` must be added before a reified type variable.
///
/// # Example
///
/// ```
/// use spindle_codegen::{FunSpec, KModifier, ParameterSpec, Statement};
/// use spindle_types::{ClassName, TypeRef};
///
/// let int = TypeRef::class(ClassName::new("kotlin", "Int"));
/// let twice = FunSpec::builder("twice")
///     .parameter(ParameterSpec::new("x", int.clone()))
///     .returns(int)
///     .unwrap()
///     .statement(Statement::line("return x * 2"))
///     .unwrap();
/// assert_eq!(twice.name(), Some("twice"));
///
/// assert!(FunSpec::constructor().modifier(KModifier::Override).is_err());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct FunSpec {
    pub(crate) kind: FunKind,
    pub(crate) doc: Option<String>,
    pub(crate) annotations: Vec<AnnotationRef>,
    pub(crate) modifiers: BTreeSet<KModifier>,
    pub(crate) type_variables: Vec<TypeVariable>,
    pub(crate) receiver: Option<TypeRef>,
    pub(crate) parameters: Vec<ParameterSpec>,
    pub(crate) returns: Option<TypeRef>,
    pub(crate) delegation: Option<Delegation>,
    /// `None` declares no body at all; `Some(vec![])` an empty one.
    pub(crate) body: Option<Vec<Statement>>,
}

impl FunSpec {
    fn new(kind: FunKind) -> Self {
        Self {
            kind,
            doc: None,
            annotations: Vec::new(),
            modifiers: BTreeSet::new(),
            type_variables: Vec::new(),
            receiver: None,
            parameters: Vec::new(),
            returns: None,
            delegation: None,
            body: None,
        }
    }

    /// Start a named function.
    pub fn builder(name: impl Into<String>) -> Self {
        Self::new(FunKind::Function(name.into()))
    }

    /// Start a constructor.
    pub fn constructor() -> Self {
        Self::new(FunKind::Constructor)
    }

    /// Set documentation comment.
    pub fn doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = Some(doc.into());
        self
    }

    /// Add an annotation.
    pub fn annotation(mut self, annotation: AnnotationRef) -> Self {
        self.annotations.push(annotation);
        self
    }

    /// Add a modifier.
    pub fn modifier(mut self, modifier: KModifier) -> Result<Self> {
        if self.is_constructor() && CONSTRUCTOR_FORBIDDEN.contains(&modifier) {
            return Err(Error::illegal(format!(
                "constructors cannot be {}",
                modifier.keyword()
            )));
        }
        if modifier == KModifier::Abstract && self.body.is_some() {
            return Err(Error::illegal(format!(
                "abstract function '{}' cannot have a body",
                self.display_name()
            )));
        }
        let declaration = format!("function '{}'", self.display_name());
        insert_modifier(&mut self.modifiers, modifier, &declaration)?;
        Ok(self)
    }

    /// Add multiple modifiers.
    pub fn modifiers(self, modifiers: impl IntoIterator<Item = KModifier>) -> Result<Self> {
        modifiers.into_iter().try_fold(self, Self::modifier)
    }

    /// Add a type variable. Reified variables need `inline` first.
    pub fn type_variable(mut self, variable: TypeVariable) -> Result<Self> {
        if self.is_constructor() {
            return Err(Error::illegal("constructors cannot have type variables"));
        }
        if variable.reified && !self.modifiers.contains(&KModifier::Inline) {
            return Err(Error::illegal(format!(
                "reified type variable '{}' requires function '{}' to be inline",
                variable.name,
                self.display_name()
            )));
        }
        self.type_variables.push(variable);
        Ok(self)
    }

    /// Set the extension receiver.
    pub fn receiver(mut self, receiver: TypeRef) -> Result<Self> {
        if self.is_constructor() {
            return Err(Error::illegal("constructors cannot have a receiver"));
        }
        self.receiver = Some(receiver);
        Ok(self)
    }

    /// Add a parameter.
    pub fn parameter(mut self, parameter: ParameterSpec) -> Self {
        self.parameters.push(parameter);
        self
    }

    /// Add multiple parameters.
    pub fn parameters(mut self, parameters: impl IntoIterator<Item = ParameterSpec>) -> Self {
        self.parameters.extend(parameters);
        self
    }

    /// Set the return type.
    pub fn returns(mut self, ty: TypeRef) -> Result<Self> {
        if self.is_constructor() {
            return Err(Error::illegal("constructors cannot have a return type"));
        }
        self.returns = Some(ty);
        Ok(self)
    }

    /// Delegate to another constructor of the same class.
    pub fn call_this_constructor(mut self, args: impl IntoIterator<Item = CodeBlock>) -> Result<Self> {
        self.require_constructor("call this constructor")?;
        self.delegation = Some(Delegation::This(args.into_iter().collect()));
        Ok(self)
    }

    /// Delegate to a superclass constructor.
    pub fn call_super_constructor(mut self, args: impl IntoIterator<Item = CodeBlock>) -> Result<Self> {
        self.require_constructor("call a super constructor")?;
        self.delegation = Some(Delegation::Super(args.into_iter().collect()));
        Ok(self)
    }

    /// Declare an empty body (`{ }`).
    pub fn empty_body(mut self) -> Result<Self> {
        self.require_concrete()?;
        self.body.get_or_insert_with(Vec::new);
        Ok(self)
    }

    /// Add a body statement.
    pub fn statement(mut self, statement: Statement) -> Result<Self> {
        self.require_concrete()?;
        self.body.get_or_insert_with(Vec::new).push(statement);
        Ok(self)
    }

    /// Add multiple body statements.
    pub fn statements(self, statements: impl IntoIterator<Item = Statement>) -> Result<Self> {
        statements.into_iter().try_fold(self, Self::statement)
    }

    /// The function name, or `None` for constructors.
    pub fn name(&self) -> Option<&str> {
        match &self.kind {
            FunKind::Function(name) => Some(name),
            FunKind::Constructor => None,
        }
    }

    /// Check if this declares a constructor.
    pub fn is_constructor(&self) -> bool {
        self.kind == FunKind::Constructor
    }

    /// Check if this function is abstract.
    pub fn is_abstract(&self) -> bool {
        self.modifiers.contains(&KModifier::Abstract)
    }

    /// Parameters, in order.
    pub fn parameter_specs(&self) -> &[ParameterSpec] {
        &self.parameters
    }

    /// Modifiers, in emission order.
    pub fn modifier_set(&self) -> &BTreeSet<KModifier> {
        &self.modifiers
    }

    /// Annotations, in order.
    pub fn annotation_refs(&self) -> &[AnnotationRef] {
        &self.annotations
    }

    fn display_name(&self) -> &str {
        self.name().unwrap_or("constructor")
    }

    fn require_concrete(&self) -> Result<()> {
        if self.is_abstract() {
            return Err(Error::illegal(format!(
                "abstract function '{}' cannot have a body",
                self.display_name()
            )));
        }
        Ok(())
    }

    fn require_constructor(&self, action: &str) -> Result<()> {
        if !self.is_constructor() {
            return Err(Error::illegal(format!(
                "only constructors can {}, not '{}'",
                action,
                self.display_name()
            )));
        }
        Ok(())
    }

    pub(crate) fn collect_classes(&self, out: &mut Vec<ClassName>) {
        for annotation in &self.annotations {
            annotation.collect_classes(out);
        }
        for variable in &self.type_variables {
            variable.collect_classes(out);
        }
        if let Some(receiver) = &self.receiver {
            receiver.collect_classes(out);
        }
        for parameter in &self.parameters {
            parameter.collect_classes(out);
        }
        if let Some(returns) = &self.returns {
            returns.collect_classes(out);
        }
        if let Some(Delegation::This(args) | Delegation::Super(args)) = &self.delegation {
            for arg in args {
                arg.collect_classes(out);
            }
        }
        for statement in self.body.iter().flatten() {
            statement.collect_classes(out);
        }
    }
}

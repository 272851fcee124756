//! Renderable implementations for declarations and statements.

use std::collections::BTreeSet;

use spindle_types::{AnnotationRef, ClassName, TypeRef, TypeShape, escape_if_necessary};

use super::{EmitContext, lines_of, separated};
use crate::spec::{Delegation, FunKind};
use crate::{
    CodeFragment, EnumConstant, FunSpec, ParameterSpec, PropertySpec, Renderable, Statement,
    TypeAliasSpec, TypeKind, TypeSpec,
};

impl Renderable for Statement {
    fn to_fragments(&self, ctx: &EmitContext) -> Vec<CodeFragment> {
        match self {
            Statement::Line(code) => lines_of(&ctx.code(code)),
            Statement::ControlFlow { header, body } => vec![CodeFragment::braced(
                format!("{} {{", ctx.code(header)),
                body.iter().flat_map(|s| s.to_fragments(ctx)).collect(),
            )],
            Statement::Comment(text) => vec![CodeFragment::line(format!("// {}", text))],
        }
    }
}

fn leading(
    ctx: &EmitContext,
    doc: &Option<String>,
    annotations: &[AnnotationRef],
) -> Vec<CodeFragment> {
    let mut out = Vec::new();
    if let Some(doc) = doc {
        out.push(CodeFragment::doc(doc.clone()));
    }
    out.extend(ctx.annotation_lines(annotations));
    out
}

fn is_unit(ty: &TypeRef) -> bool {
    matches!(ty.shape(), TypeShape::Named { class, .. } if *class == ClassName::new("kotlin", "Unit"))
        && !ty.is_nullable()
        && ty.annotations().is_empty()
}

fn parameter(ctx: &EmitContext, parameter: &ParameterSpec, property: Option<&PropertySpec>) -> String {
    let mut out = String::new();
    let mut modifiers = parameter.modifiers.clone();
    if let Some(property) = property {
        out.push_str(&ctx.inline_annotations(&property.annotations));
        modifiers.extend(property.modifiers.iter().copied());
    }
    out.push_str(&ctx.inline_annotations(&parameter.annotations));
    out.push_str(&ctx.modifiers(&modifiers, property.is_some()));
    if let Some(property) = property {
        out.push_str(if property.mutable { "var " } else { "val " });
    }
    out.push_str(&escape_if_necessary(&parameter.name));
    out.push_str(": ");
    out.push_str(&ctx.ty(&parameter.ty));
    if let Some(default) = &parameter.default {
        out.push_str(" = ");
        out.push_str(&ctx.code(default));
    }
    out
}

fn parameter_list(
    ctx: &EmitContext,
    parameters: &[ParameterSpec],
    properties: &[Option<&PropertySpec>],
) -> String {
    let rendered: Vec<_> = parameters
        .iter()
        .enumerate()
        .map(|(i, p)| parameter(ctx, p, properties.get(i).copied().flatten()))
        .collect();
    format!("({})", rendered.join(", "))
}

impl FunSpec {
    fn signature(&self, ctx: &EmitContext) -> String {
        let mut out = ctx.modifiers(&self.modifiers, true);
        match &self.kind {
            FunKind::Function(name) => {
                out.push_str("fun ");
                let variables = ctx.type_variables(&self.type_variables);
                if !variables.is_empty() {
                    out.push_str(&variables);
                    out.push(' ');
                }
                out.push_str(&ctx.receiver(self.receiver.as_ref()));
                out.push_str(&escape_if_necessary(name));
            }
            FunKind::Constructor => out.push_str("constructor"),
        }
        out.push_str(&parameter_list(ctx, &self.parameters, &[]));
        if let Some(returns) = self.returns.as_ref().filter(|ty| !is_unit(ty)) {
            out.push_str(": ");
            out.push_str(&ctx.ty(returns));
        }
        if let Some(delegation) = &self.delegation {
            let (target, args) = match delegation {
                Delegation::This(args) => ("this", args),
                Delegation::Super(args) => ("super", args),
            };
            let args: Vec<_> = args.iter().map(|arg| ctx.code(arg)).collect();
            out.push_str(&format!(" : {}({})", target, args.join(", ")));
        }
        out.push_str(&ctx.where_clause(&self.type_variables));
        out
    }
}

impl Renderable for FunSpec {
    fn to_fragments(&self, ctx: &EmitContext) -> Vec<CodeFragment> {
        let mut out = leading(ctx, &self.doc, &self.annotations);
        let signature = self.signature(ctx);
        match &self.body {
            None => out.push(CodeFragment::line(signature)),
            Some(body) => out.push(CodeFragment::braced(
                format!("{} {{", signature),
                body.iter().flat_map(|s| s.to_fragments(ctx)).collect(),
            )),
        }
        out
    }
}

impl Renderable for PropertySpec {
    fn to_fragments(&self, ctx: &EmitContext) -> Vec<CodeFragment> {
        let mut out = leading(ctx, &self.doc, &self.annotations);
        let mut declaration = ctx.modifiers(&self.modifiers, true);
        declaration.push_str(if self.mutable { "var " } else { "val " });
        let variables = ctx.type_variables(&self.type_variables);
        if !variables.is_empty() {
            declaration.push_str(&variables);
            declaration.push(' ');
        }
        declaration.push_str(&ctx.receiver(self.receiver.as_ref()));
        declaration.push_str(&escape_if_necessary(&self.name));
        declaration.push_str(": ");
        declaration.push_str(&ctx.ty(&self.ty));
        declaration.push_str(&ctx.where_clause(&self.type_variables));
        if let Some(initializer) = &self.initializer {
            declaration.push_str(" = ");
            declaration.push_str(&ctx.code(initializer));
        }
        out.extend(lines_of(&declaration));

        let mut accessors = Vec::new();
        if let Some(getter) = &self.getter {
            accessors.extend(lines_of(&format!("get() = {}", ctx.code(getter))));
        }
        if let Some(setter) = &self.setter {
            accessors.extend(lines_of(&format!("set(value) = {}", ctx.code(setter))));
        }
        if !accessors.is_empty() {
            out.push(CodeFragment::indent(accessors));
        }
        out
    }
}

impl Renderable for TypeAliasSpec {
    fn to_fragments(&self, ctx: &EmitContext) -> Vec<CodeFragment> {
        let mut out = leading(ctx, &self.doc, &self.annotations);
        out.push(CodeFragment::line(format!(
            "{}typealias {}{} = {}",
            ctx.modifiers(&self.modifiers, true),
            escape_if_necessary(&self.name),
            ctx.type_variables(&self.type_variables),
            ctx.ty(&self.ty)
        )));
        out
    }
}

fn enum_constant(
    ctx: &EmitContext,
    name: &str,
    constant: &EnumConstant,
    suffix: &str,
) -> Vec<CodeFragment> {
    let mut out = leading(ctx, &constant.doc, &constant.annotations);
    let mut header = escape_if_necessary(name);
    if !constant.arguments.is_empty() {
        let args: Vec<_> = constant.arguments.iter().map(|arg| ctx.code(arg)).collect();
        header.push_str(&format!("({})", args.join(", ")));
    }
    if constant.functions.is_empty() {
        header.push_str(suffix);
        out.push(CodeFragment::line(header));
    } else {
        let body = separated(constant.functions.iter().map(|f| f.to_fragments(ctx)).collect());
        out.push(CodeFragment::block(
            format!("{} {{", header),
            body,
            Some(format!("}}{}", suffix)),
        ));
    }
    out
}

impl TypeSpec {
    /// Pair each primary-constructor parameter with the property it declares.
    fn constructor_properties(&self) -> Vec<Option<&PropertySpec>> {
        let Some(constructor) = &self.primary_constructor else {
            return Vec::new();
        };
        let mut claimed = BTreeSet::new();
        constructor
            .parameters
            .iter()
            .map(|parameter| {
                let found = self.properties.iter().enumerate().find(|(i, property)| {
                    !claimed.contains(i)
                        && property.is_constructor_property(&parameter.name, &parameter.ty)
                });
                found.map(|(i, property)| {
                    claimed.insert(i);
                    property
                })
            })
            .collect()
    }

    fn header(&self, ctx: &EmitContext, merged: &[Option<&PropertySpec>]) -> String {
        let mut out = ctx.modifiers(&self.modifiers, true);
        if self.is_companion() {
            out.push_str("object");
            if self.name != "Companion" {
                out.push(' ');
                out.push_str(&escape_if_necessary(&self.name));
            }
        } else {
            out.push_str(self.kind.keyword());
            out.push(' ');
            out.push_str(&escape_if_necessary(&self.name));
        }
        out.push_str(&ctx.type_variables(&self.type_variables));

        if let Some(constructor) = &self.primary_constructor {
            let prefix = format!(
                "{}{}",
                ctx.inline_annotations(&constructor.annotations),
                ctx.modifiers(&constructor.modifiers, false)
            );
            if !prefix.is_empty() {
                out.push(' ');
                out.push_str(&prefix);
                out.push_str("constructor");
            }
            out.push_str(&parameter_list(ctx, &constructor.parameters, merged));
        }

        let mut supertypes = Vec::new();
        if let Some(superclass) = &self.superclass {
            let has_secondary = self.functions.iter().any(FunSpec::is_constructor);
            if self.primary_constructor.is_some() || !has_secondary || self.kind == TypeKind::Object {
                let args: Vec<_> = self
                    .superclass_arguments
                    .iter()
                    .map(|arg| ctx.code(arg))
                    .collect();
                supertypes.push(format!("{}({})", ctx.ty(superclass), args.join(", ")));
            } else {
                supertypes.push(ctx.ty(superclass));
            }
        }
        supertypes.extend(self.superinterfaces.iter().map(|ty| ctx.ty(ty)));
        if !supertypes.is_empty() {
            out.push_str(" : ");
            out.push_str(&supertypes.join(", "));
        }
        out.push_str(&ctx.where_clause(&self.type_variables));
        out
    }
}

impl Renderable for TypeSpec {
    fn to_fragments(&self, ctx: &EmitContext) -> Vec<CodeFragment> {
        let mut out = leading(ctx, &self.doc, &self.annotations);
        let merged = self.constructor_properties();
        let header = self.header(ctx, &merged);

        let mut groups: Vec<Vec<CodeFragment>> = Vec::new();
        let has_members = merged.iter().flatten().count() < self.properties.len()
            || !self.functions.is_empty()
            || !self.types.is_empty();

        let count = self.enum_constants.len();
        let constants: Vec<CodeFragment> = self
            .enum_constants
            .iter()
            .enumerate()
            .flat_map(|(i, (name, constant))| {
                let suffix = match (i + 1 == count, has_members) {
                    (false, _) => ",",
                    (true, true) => ";",
                    (true, false) => "",
                };
                enum_constant(ctx, name, constant, suffix)
            })
            .collect();
        groups.push(constants);

        for property in &self.properties {
            let is_merged = merged
                .iter()
                .flatten()
                .any(|m| std::ptr::eq(*m, property));
            if !is_merged {
                groups.push(property.to_fragments(ctx));
            }
        }
        let (constructors, functions): (Vec<_>, Vec<_>) =
            self.functions.iter().partition(|f| f.is_constructor());
        groups.extend(constructors.into_iter().map(|f| f.to_fragments(ctx)));
        groups.extend(functions.into_iter().map(|f| f.to_fragments(ctx)));
        let (companions, nested): (Vec<_>, Vec<_>) =
            self.types.iter().partition(|t| t.is_companion());
        groups.extend(nested.into_iter().map(|t| t.to_fragments(ctx)));
        groups.extend(companions.into_iter().map(|t| t.to_fragments(ctx)));

        let body = separated(groups);
        if body.is_empty() {
            out.push(CodeFragment::line(header));
        } else {
            out.push(CodeFragment::braced(format!("{} {{", header), body));
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use spindle_types::{CodeBlock, FunctionType, TypeVariable, Variance};

    use super::*;
    use crate::{CodeBuilder, ImportResolver, KModifier};

    fn render(node: &impl Renderable) -> String {
        let mut builder = CodeBuilder::kotlin();
        builder.emit(node, &EmitContext::default());
        builder.build()
    }

    fn render_in(node: &impl Renderable, classes: Vec<ClassName>) -> String {
        let names = ImportResolver::new("com.example").resolve(classes);
        let mut builder = CodeBuilder::kotlin();
        builder.emit(node, &EmitContext::new(names));
        builder.build()
    }

    fn kotlin(name: &str) -> ClassName {
        ClassName::new("kotlin", name)
    }

    fn int() -> TypeRef {
        TypeRef::class(kotlin("Int"))
    }

    fn string() -> TypeRef {
        TypeRef::class(kotlin("String"))
    }

    #[test]
    fn test_statement_control_flow() {
        let statement = Statement::control_flow(
            CodeBlock::of("if (x > 0)"),
            vec![Statement::line("return x"), Statement::Comment("positive".into())],
        );
        assert_eq!(render(&statement), "if (x > 0) {\n    return x\n    // positive\n}\n");
    }

    #[test]
    fn test_abstract_function_has_no_body() {
        let function = FunSpec::builder("area")
            .modifier(KModifier::Abstract)
            .unwrap()
            .returns(TypeRef::class(kotlin("Double")))
            .unwrap();
        assert_eq!(render(&function), "abstract fun area(): kotlin.Double\n");
    }

    #[test]
    fn test_unit_return_is_omitted() {
        let function = FunSpec::builder("run")
            .returns(TypeRef::class(kotlin("Unit")))
            .unwrap()
            .empty_body()
            .unwrap();
        assert_eq!(render(&function), "fun run() {\n}\n");
    }

    #[test]
    fn test_suspend_extension_with_reified_type_variable() {
        let function = FunSpec::builder("fetch")
            .modifiers([KModifier::Suspend, KModifier::Inline])
            .unwrap()
            .type_variable(TypeVariable::new("T").reified())
            .unwrap()
            .receiver(string())
            .unwrap()
            .parameter(ParameterSpec::new("retries", int()).default_value(CodeBlock::of("3")))
            .returns(TypeRef::variable("T"))
            .unwrap()
            .statement(Statement::line("TODO()"))
            .unwrap();
        assert_eq!(
            render_in(&function, vec![kotlin("String"), kotlin("Int")]),
            "suspend inline fun <reified T> String.fetch(retries: Int = 3): T {\n    TODO()\n}\n"
        );
    }

    #[test]
    fn test_function_type_receiver_and_keyword_names() {
        let block = TypeRef::function(FunctionType::new([], int()));
        let function = FunSpec::builder("in")
            .receiver(block)
            .unwrap()
            .parameter(ParameterSpec::new("object", int()));
        assert_eq!(
            render_in(&function, vec![kotlin("Int")]),
            "fun (() -> Int).`in`(`object`: Int)\n"
        );
    }

    #[test]
    fn test_property_with_accessors() {
        let property = PropertySpec::builder("size", int())
            .mutable()
            .doc("Number of elements.")
            .getter(CodeBlock::of("0"))
            .setter(CodeBlock::of("Unit"));
        assert_eq!(
            render(&property),
            "/**\n * Number of elements.\n */\nvar size: kotlin.Int\n    get() = 0\n    set(value) = Unit\n"
        );
    }

    #[test]
    fn test_type_alias() {
        let alias = TypeAliasSpec::builder(
            "Handler",
            TypeRef::function(FunctionType::new([TypeRef::variable("T")], TypeRef::class(kotlin("Unit")))),
        )
        .type_variable(TypeVariable::new("T"));
        assert_eq!(
            render_in(&alias, vec![kotlin("Unit")]),
            "typealias Handler<T> = (T) -> Unit\n"
        );
    }

    #[test]
    fn test_data_class_merges_constructor_properties() {
        let class = TypeSpec::class_builder("User")
            .modifier(KModifier::Data)
            .unwrap()
            .primary_constructor(
                FunSpec::constructor()
                    .parameter(ParameterSpec::new("id", int()))
                    .parameter(ParameterSpec::new("name", string()))
                    .parameter(ParameterSpec::new("tag", string())),
            )
            .unwrap()
            .property(PropertySpec::builder("id", int()).initializer(CodeBlock::of("id")))
            .unwrap()
            .property(
                PropertySpec::builder("name", string())
                    .mutable()
                    .modifier(KModifier::Private)
                    .unwrap()
                    .initializer(CodeBlock::of("name")),
            )
            .unwrap();
        assert_eq!(
            render_in(&class, vec![kotlin("Int"), kotlin("String")]),
            "data class User(val id: Int, private var name: String, tag: String)\n"
        );
    }

    #[test]
    fn test_class_header_with_supertypes_and_where() {
        let comparable = kotlin("Comparable").parameterized_by([TypeRef::variable("T")]);
        let class = TypeSpec::class_builder("Box")
            .modifier(KModifier::Open)
            .unwrap()
            .type_variable(
                TypeVariable::new("T")
                    .variance(Variance::Out)
                    .bounds([comparable, TypeRef::class(kotlin("Any"))]),
            )
            .superclass(TypeRef::class(ClassName::new("com.example", "Base")), [CodeBlock::of("1")])
            .unwrap()
            .superinterface(TypeRef::class(ClassName::new("java.io", "Serializable")));
        assert_eq!(
            render_in(
                &class,
                vec![
                    kotlin("Comparable"),
                    kotlin("Any"),
                    ClassName::new("com.example", "Base"),
                    ClassName::new("java.io", "Serializable"),
                ]
            ),
            "open class Box<out T> : Base(1), Serializable where T : Comparable<T>, T : Any\n"
        );
    }

    #[test]
    fn test_enum_with_members() {
        let describe = FunSpec::builder("describe")
            .returns(string())
            .unwrap()
            .statement(Statement::line("return name"))
            .unwrap();
        let color = TypeSpec::enum_builder("Color")
            .primary_constructor(FunSpec::constructor().parameter(ParameterSpec::new("rgb", int())))
            .unwrap()
            .property(PropertySpec::builder("rgb", int()).initializer(CodeBlock::of("rgb")))
            .unwrap()
            .enum_constant("RED", EnumConstant::new().argument(CodeBlock::of("0xFF0000")))
            .unwrap()
            .enum_constant(
                "GREEN",
                EnumConstant::new()
                    .argument(CodeBlock::of("0x00FF00"))
                    .function(
                        FunSpec::builder("describe")
                            .modifier(KModifier::Override)
                            .unwrap()
                            .returns(string())
                            .unwrap()
                            .statement(Statement::line("return \"green\""))
                            .unwrap(),
                    ),
            )
            .unwrap()
            .function(describe.modifier(KModifier::Open).unwrap())
            .unwrap();
        assert_eq!(
            render_in(&color, vec![kotlin("Int"), kotlin("String")]),
            "\
enum class Color(val rgb: Int) {
    RED(0xFF0000),
    GREEN(0x00FF00) {
        override fun describe(): String {
            return \"green\"
        }
    };

    open fun describe(): String {
        return name
    }
}
"
        );
    }

    #[test]
    fn test_interface_and_companion_object() {
        let factory = TypeSpec::companion_object_builder().function(
            FunSpec::builder("create")
                .returns(TypeRef::class(ClassName::new("com.example", "Shape")))
                .unwrap()
                .statement(Statement::line("TODO()"))
                .unwrap(),
        );
        let shape = TypeSpec::interface_builder("Shape")
            .annotation(AnnotationRef::new(ClassName::new("kotlin", "Deprecated")).member("message", CodeBlock::of("\"old\"")))
            .property(
                PropertySpec::builder("sides", int())
                    .modifier(KModifier::Abstract)
                    .unwrap(),
            )
            .unwrap()
            .nested(factory.unwrap());
        assert_eq!(
            render_in(
                &shape,
                vec![kotlin("Int"), kotlin("Deprecated"), ClassName::new("com.example", "Shape")]
            ),
            "\
@Deprecated(message = \"old\")
interface Shape {
    abstract val sides: Int

    companion object {
        fun create(): Shape {
            TODO()
        }
    }
}
"
        );
    }

    #[test]
    fn test_secondary_constructor_delegation() {
        let class = TypeSpec::class_builder("Point")
            .primary_constructor(
                FunSpec::constructor()
                    .modifier(KModifier::Private)
                    .unwrap()
                    .parameter(ParameterSpec::new("x", int())),
            )
            .unwrap()
            .function(
                FunSpec::constructor()
                    .call_this_constructor([CodeBlock::of("0")])
                    .unwrap()
                    .empty_body()
                    .unwrap(),
            )
            .unwrap();
        assert_eq!(
            render_in(&class, vec![kotlin("Int")]),
            "class Point private constructor(x: Int) {\n    constructor() : this(0) {\n    }\n}\n"
        );
    }
}

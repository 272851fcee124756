//! Snapshot tests for whole-file rendering.
//!
//! Run `cargo insta review` to update snapshots when making intentional changes.

use spindle_codegen::{
    EmitConfig, EnumConstant, FileSpec, FunSpec, KModifier, ParameterSpec, PropertySpec,
    Statement, TypeAliasSpec, TypeSpec,
};
use spindle_types::{AnnotationRef, ClassName, CodeBlock, TypeRef, TypeVariable};

fn kotlin(name: &str) -> TypeRef {
    TypeRef::class(ClassName::new("kotlin", name))
}

fn list_of(ty: TypeRef) -> TypeRef {
    ClassName::new("kotlin.collections", "List").parameterized_by([ty])
}

fn constructor_property(name: &str, ty: TypeRef) -> PropertySpec {
    PropertySpec::builder(name, ty).initializer(CodeBlock::of(name))
}

#[test]
fn test_model_file() {
    let user = ClassName::new("com.example.model", "User");
    let user_id = ClassName::new("com.example.model", "UserId");
    let util_date = TypeRef::class(ClassName::new("java.util", "Date"));
    let other_date = TypeRef::class(ClassName::new("com.other", "Date"));

    let data_class = TypeSpec::class_builder("User")
        .modifier(KModifier::Data)
        .unwrap()
        .primary_constructor(
            FunSpec::constructor()
                .parameter(ParameterSpec::new("id", kotlin("Long")))
                .parameter(ParameterSpec::new("name", kotlin("String")))
                .parameter(ParameterSpec::new("created", util_date.clone())),
        )
        .unwrap()
        .property(constructor_property("id", kotlin("Long")))
        .unwrap()
        .property(constructor_property("name", kotlin("String")))
        .unwrap()
        .property(constructor_property("created", util_date))
        .unwrap()
        .superinterface(TypeRef::class(ClassName::new("java.io", "Serializable")));

    let repository = TypeSpec::interface_builder("Repository")
        .type_variable(TypeVariable::new("T").bound(kotlin("Any")))
        .function(
            FunSpec::builder("find")
                .modifier(KModifier::Suspend)
                .unwrap()
                .parameter(ParameterSpec::new("id", user_id.into()))
                .returns(TypeRef::variable("T").nullable())
                .unwrap(),
        )
        .unwrap()
        .function(
            FunSpec::builder("all")
                .returns(list_of(TypeRef::variable("T")))
                .unwrap(),
        )
        .unwrap()
        .function(FunSpec::builder("touched").returns(other_date).unwrap())
        .unwrap();

    let names = FunSpec::builder("names")
        .receiver(list_of(user.into()))
        .unwrap()
        .returns(list_of(kotlin("String")))
        .unwrap()
        .statement(Statement::line("return map { it.name }"))
        .unwrap();

    let file = FileSpec::builder("com.example.model", "Models")
        .config(EmitConfig {
            header: Some("Code generated by spindle. DO NOT EDIT.".into()),
            ..EmitConfig::default()
        })
        .annotation(
            AnnotationRef::new(ClassName::new("kotlin.jvm", "JvmName"))
                .member("name", CodeBlock::of("\"Models\"")),
        )
        .add_type(data_class)
        .add_type(repository)
        .add_type_alias(TypeAliasSpec::builder("UserId", kotlin("Long")))
        .add_function(names)
        .unwrap();

    insta::assert_snapshot!(file.render().unwrap(), @r#"
    // Code generated by spindle. DO NOT EDIT.

    @file:JvmName(name = "Models")

    package com.example.model

    import com.other.Date as OtherDate
    import java.io.Serializable
    import java.util.Date as UtilDate
    import kotlin.collections.List
    import kotlin.jvm.JvmName

    data class User(val id: Long, val name: String, val created: UtilDate) : Serializable

    interface Repository<T : Any> {
        suspend fun find(id: UserId): T?

        fun all(): List<T>

        fun touched(): OtherDate
    }

    typealias UserId = Long

    fun List<User>.names(): List<String> {
        return map { it.name }
    }
    "#);
}

#[test]
fn test_explicit_public_with_compact_indent() {
    let level = TypeSpec::enum_builder("Level")
        .enum_constant("LOW", EnumConstant::new())
        .unwrap()
        .enum_constant("HIGH", EnumConstant::new().doc("Escalates."))
        .unwrap()
        .function(
            FunSpec::builder("next")
                .returns(TypeRef::class(ClassName::new("com.example", "Level")))
                .unwrap()
                .statement(Statement::control_flow(
                    CodeBlock::of("return when (this)"),
                    vec![Statement::line("LOW -> HIGH"), Statement::line("HIGH -> LOW")],
                ))
                .unwrap(),
        )
        .unwrap();

    let file = FileSpec::builder("com.example", "Level")
        .config(EmitConfig {
            indent: 2,
            explicit_public: true,
            ..EmitConfig::default()
        })
        .add_type(level);

    insta::assert_snapshot!(file.render().unwrap(), @r#"
    package com.example

    public enum class Level {
      LOW,
      /**
       * Escalates.
       */
      HIGH;

      public fun next(): Level {
        return when (this) {
          LOW -> HIGH
          HIGH -> LOW
        }
      }
    }
    "#);
}

#[test]
fn test_nested_and_shadowed_names() {
    let entry = ClassName::new("kotlin.collections", "Map")
        .nested("Entry")
        .parameterized_by([kotlin("String"), kotlin("Int")]);
    let foreign_result = TypeRef::class(ClassName::new("com.vendor", "Result"));

    let result = TypeSpec::class_builder("Result")
        .modifier(KModifier::Sealed)
        .unwrap()
        .property(
            PropertySpec::builder("entry", entry)
                .modifier(KModifier::Abstract)
                .unwrap(),
        )
        .unwrap()
        .property(
            PropertySpec::builder("upstream", foreign_result.nullable())
                .initializer(CodeBlock::of("null")),
        )
        .unwrap();

    let file = FileSpec::builder("com.example", "Result").add_type(result);

    insta::assert_snapshot!(file.render().unwrap(), @r#"
    package com.example

    import kotlin.collections.Map

    sealed class Result {
        abstract val entry: Map.Entry<String, Int>

        val upstream: com.vendor.Result? = null
    }
    "#);
}

#[test]
fn test_nested_type_shadows_imported_name() {
    let foreign = TypeRef::class(ClassName::new("com.other", "Builder"));
    let own = TypeRef::class(ClassName::new("com.example", "Outer").nested("Builder"));

    let outer = TypeSpec::class_builder("Outer")
        .property(PropertySpec::builder("b", foreign).initializer(CodeBlock::of("TODO()")))
        .unwrap()
        .property(PropertySpec::builder("own", own).initializer(CodeBlock::of("TODO()")))
        .unwrap()
        .nested(TypeSpec::class_builder("Builder"));

    let file = FileSpec::builder("com.example", "Outer").add_type(outer);

    insta::assert_snapshot!(file.render().unwrap(), @r#"
    package com.example

    class Outer {
        val b: com.other.Builder = TODO()

        val own: Outer.Builder = TODO()

        class Builder
    }
    "#);
}

#[test]
fn test_write_to_dir_creates_package_directories() {
    let dir = tempfile::tempdir().unwrap();
    let file = FileSpec::builder("com.example.app", "Main").add_function(
        FunSpec::builder("main")
            .statement(Statement::line("println(\"hi\")"))
            .unwrap(),
    );
    let path = file.unwrap().write_to_dir(dir.path()).unwrap();

    assert_eq!(
        path,
        dir.path().join("com").join("example").join("app").join("Main.kt")
    );
    let written = std::fs::read_to_string(&path).unwrap();
    assert_eq!(
        written,
        "package com.example.app\n\nfun main() {\n    println(\"hi\")\n}\n"
    );
}

#[test]
fn test_write_to_sink() {
    let file = FileSpec::builder("", "Script")
        .add_property(PropertySpec::builder("answer", kotlin("Int")).initializer(CodeBlock::of("42")))
        .unwrap();
    let mut out = Vec::new();
    file.write_to(&mut out).unwrap();
    assert_eq!(String::from_utf8(out).unwrap(), "val answer: Int = 42\n");
}

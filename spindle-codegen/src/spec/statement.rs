//! Function body statements.

use spindle_types::{ClassName, CodeBlock};

/// A statement in a function or constructor body.
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    /// A single statement. Newlines in the rendered text start new lines at
    /// the same indentation.
    Line(CodeBlock),
    /// `header {` ... `}` around nested statements.
    ControlFlow {
        header: CodeBlock,
        body: Vec<Statement>,
    },
    /// A `//` comment line.
    Comment(String),
}

impl Statement {
    /// A statement holding plain text.
    pub fn line(text: impl Into<String>) -> Self {
        Self::Line(CodeBlock::of(text))
    }

    /// A control-flow block.
    pub fn control_flow(header: CodeBlock, body: Vec<Statement>) -> Self {
        Self::ControlFlow { header, body }
    }

    /// `throw NotImplementedError()`, the body of a stubbed member.
    pub fn not_implemented() -> Self {
        Self::Line(
            CodeBlock::of("throw ")
                .add_type(ClassName::new("kotlin", "NotImplementedError").into())
                .add_text("()"),
        )
    }

    pub(crate) fn collect_classes(&self, out: &mut Vec<ClassName>) {
        match self {
            Self::Line(code) => code.collect_classes(out),
            Self::ControlFlow { header, body } => {
                header.collect_classes(out);
                for statement in body {
                    statement.collect_classes(out);
                }
            }
            Self::Comment(_) => {}
        }
    }
}

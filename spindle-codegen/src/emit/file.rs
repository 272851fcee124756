use spindle_types::escape_if_necessary;

use super::{EmitContext, separated};
use crate::{CodeFragment, FileMember, FileSpec, Renderable};

impl Renderable for FileMember {
    fn to_fragments(&self, ctx: &EmitContext) -> Vec<CodeFragment> {
        match self {
            FileMember::Type(ty) => ty.to_fragments(ctx),
            FileMember::Function(function) => function.to_fragments(ctx),
            FileMember::Property(property) => property.to_fragments(ctx),
            FileMember::TypeAlias(alias) => alias.to_fragments(ctx),
        }
    }
}

impl Renderable for FileSpec {
    fn to_fragments(&self, ctx: &EmitContext) -> Vec<CodeFragment> {
        let mut groups = Vec::new();

        let comments: Vec<CodeFragment> = [&self.config.header, &self.comment]
            .into_iter()
            .flatten()
            .flat_map(|text| text.lines())
            .map(|line| {
                if line.is_empty() {
                    CodeFragment::line("//")
                } else {
                    CodeFragment::line(format!("// {}", line))
                }
            })
            .collect();
        groups.push(comments);

        groups.push(
            self.annotations
                .iter()
                .map(|annotation| {
                    let rendered = annotation.to_code_block();
                    CodeFragment::line(format!("@file:{}", ctx.code(&rendered)))
                })
                .collect(),
        );

        if !self.package.is_empty() {
            let package: Vec<_> = self.package.split('.').map(escape_if_necessary).collect();
            groups.push(vec![CodeFragment::line(format!(
                "package {}",
                package.join(".")
            ))]);
        }

        groups.push(
            ctx.names()
                .imports()
                .iter()
                .map(|import| CodeFragment::line(import.to_string()))
                .collect(),
        );

        groups.extend(self.members.iter().map(|member| member.to_fragments(ctx)));
        separated(groups)
    }
}

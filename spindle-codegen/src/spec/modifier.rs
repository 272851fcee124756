//! Declaration modifiers.

use std::collections::BTreeSet;

use spindle_types::{Error, Result};

/// A declaration modifier.
///
/// Variants are declared in the order modifiers are written in source, so a
/// `BTreeSet<KModifier>` iterates in canonical order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum KModifier {
    Public,
    Protected,
    Private,
    Internal,
    Expect,
    Actual,
    Final,
    Open,
    Abstract,
    Sealed,
    Const,
    External,
    Override,
    Lateinit,
    Tailrec,
    Vararg,
    Suspend,
    Inner,
    Enum,
    Annotation,
    Fun,
    Companion,
    Inline,
    Value,
    Infix,
    Operator,
    Data,
    Noinline,
    Crossinline,
}

impl KModifier {
    /// The source keyword.
    pub fn keyword(&self) -> &'static str {
        match self {
            Self::Public => "public",
            Self::Protected => "protected",
            Self::Private => "private",
            Self::Internal => "internal",
            Self::Expect => "expect",
            Self::Actual => "actual",
            Self::Final => "final",
            Self::Open => "open",
            Self::Abstract => "abstract",
            Self::Sealed => "sealed",
            Self::Const => "const",
            Self::External => "external",
            Self::Override => "override",
            Self::Lateinit => "lateinit",
            Self::Tailrec => "tailrec",
            Self::Vararg => "vararg",
            Self::Suspend => "suspend",
            Self::Inner => "inner",
            Self::Enum => "enum",
            Self::Annotation => "annotation",
            Self::Fun => "fun",
            Self::Companion => "companion",
            Self::Inline => "inline",
            Self::Value => "value",
            Self::Infix => "infix",
            Self::Operator => "operator",
            Self::Data => "data",
            Self::Noinline => "noinline",
            Self::Crossinline => "crossinline",
        }
    }

    /// Check if this is a visibility modifier.
    pub fn is_visibility(&self) -> bool {
        matches!(
            self,
            Self::Public | Self::Protected | Self::Private | Self::Internal
        )
    }

    /// Check if this is a modality modifier.
    pub fn is_modality(&self) -> bool {
        matches!(self, Self::Final | Self::Open | Self::Abstract | Self::Sealed)
    }
}

/// Insert `modifier`, rejecting a second visibility or modality.
pub(crate) fn insert_modifier(
    modifiers: &mut BTreeSet<KModifier>,
    modifier: KModifier,
    declaration: &str,
) -> Result<()> {
    let conflict = modifiers.iter().find(|existing| {
        **existing != modifier
            && ((existing.is_visibility() && modifier.is_visibility())
                || (existing.is_modality() && modifier.is_modality()))
    });
    if let Some(existing) = conflict {
        return Err(Error::illegal(format!(
            "{} cannot be both {} and {}",
            declaration,
            existing.keyword(),
            modifier.keyword()
        )));
    }
    modifiers.insert(modifier);
    Ok(())
}

/// Join modifiers in canonical order, each followed by a space.
pub(crate) fn modifier_prefix(modifiers: &BTreeSet<KModifier>) -> String {
    modifiers
        .iter()
        .map(|m| format!("{} ", m.keyword()))
        .collect()
}

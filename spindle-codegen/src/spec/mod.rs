//! Declaration specs.
//!
//! Specs are immutable values assembled with consuming builders. Builder
//! calls that would produce an illegal declaration return
//! [`Error::IllegalModifierCombination`](spindle_types::Error) instead.

mod file;
mod function;
mod modifier;
mod parameter;
mod property;
mod statement;
mod type_alias;
mod type_spec;

pub use file::{FileMember, FileSpec};
pub use function::{Delegation, FunKind, FunSpec};
pub use modifier::KModifier;
pub(crate) use modifier::{insert_modifier, modifier_prefix};
pub use parameter::ParameterSpec;
pub use property::PropertySpec;
pub use statement::Statement;
pub use type_alias::TypeAliasSpec;
pub use type_spec::{EnumConstant, TypeKind, TypeSpec};

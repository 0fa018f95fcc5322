//! Staging IR - data model for the quotation lowering pass
//!
//! This crate contains the core data structures shared by the builder
//! library and the lowering pass:
//! - Spans for source locations
//! - Names for interned identifiers, identifiers and access paths
//! - Semantic types
//! - The typed expression tree and compilation units (input)
//! - The code representation tree (what quotations evaluate to)
//! - Run-time values and cross-stage persistent payloads
//! - The symbol table with per-binding stage annotations
//!
//! # Design Philosophy
//!
//! - **Intern Everything**: Strings → `Name(u32)`
//! - **Share, Don't Copy**: Tree children are `Rc`, so untouched subtrees
//!   can appear in both the input and the output of a pass
//!
//! Types that contain floats store them as u64 bits for Hash compatibility.

/// Compile-time assertion that a type has a specific size.
#[macro_export]
macro_rules! static_assert_size {
    ($ty:ty, $size:expr) => {
        const _: [(); $size] = [(); ::std::mem::size_of::<$ty>()];
    };
}

mod code;
mod expr;
mod ident;
mod interner;
mod item;
mod name;
mod span;
mod symbols;
mod ty;
mod value;

pub use code::{Code, CodeCase, CodeKind, CodePattern, CodePatternKind};
pub use expr::{
    ArgLabel, Case, CtorDesc, CtorKind, Embedded, Expr, ExprKind, FieldDesc, ForDirection,
    Pattern, PatternKind, RecFlag, RecordField, ValueBinding,
};
pub use ident::{Ident, IdentScope, Path};
pub use interner::{InternError, StringInterner, StringLookup};
pub use item::{
    ClassBody, ClassDecl, ClassField, ItemKind, ModuleBinding, ModuleExpr, Structure,
    StructureItem,
};
pub use name::Name;
pub use span::Span;
pub use symbols::{EntityKind, SymbolTable};
pub use ty::Ty;
pub use value::{BoundName, CspValue, Lit, RuntimeValue};

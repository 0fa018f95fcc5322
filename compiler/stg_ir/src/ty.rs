//! Semantic types attached to typed nodes.
//!
//! Only as much structure as the staging pass inspects: the primitive types
//! the literal lift dispatches on, type constructors (whose paths own data
//! constructors and record fields) and the code type of quotations.

use crate::Path;

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Ty {
    Int,
    Char,
    Bool,
    Float,
    String,
    Unit,
    /// Applied type constructor, e.g. `int list` is `Con { list, [Int] }`.
    Con { path: Path, args: Vec<Ty> },
    Arrow(Box<Ty>, Box<Ty>),
    Tuple(Vec<Ty>),
    /// Type of a quotation of an expression of the inner type.
    Code(Box<Ty>),
    /// Unresolved or generalized type variable.
    Var(u32),
}

impl Ty {
    pub fn con(path: Path) -> Self {
        Ty::Con {
            path,
            args: Vec::new(),
        }
    }

    pub fn arrow(from: Ty, to: Ty) -> Self {
        Ty::Arrow(Box::new(from), Box::new(to))
    }

    pub fn code(inner: Ty) -> Self {
        Ty::Code(Box::new(inner))
    }

    /// Path of the type constructor heading this type, if any.
    pub fn head_path(&self) -> Option<&Path> {
        match self {
            Ty::Con { path, .. } => Some(path),
            _ => None,
        }
    }
}

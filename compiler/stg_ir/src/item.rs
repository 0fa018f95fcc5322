//! Compilation units: structure items, module expressions and classes.
//!
//! Items are held through `Rc` for the same reason expressions are: the
//! staging pass rebuilds only the items that contain a quotation.

use std::rc::Rc;

use crate::{Expr, Ident, Name, Path, RecFlag, Span, ValueBinding};

/// A whole compilation unit, or the body of a `struct ... end`.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct Structure {
    pub items: Vec<Rc<StructureItem>>,
}

impl Structure {
    pub fn new(items: Vec<Rc<StructureItem>>) -> Self {
        Structure { items }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StructureItem {
    pub kind: ItemKind,
    pub span: Span,
}

impl StructureItem {
    pub fn rc(kind: ItemKind, span: Span) -> Rc<Self> {
        Rc::new(StructureItem { kind, span })
    }
}

/// Declarations without expressions are kept opaque: the staging pass passes
/// them through untouched, so only their name is recorded.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ItemKind {
    /// Top-level expression evaluated for effect.
    Eval(Rc<Expr>),
    Value {
        rec_flag: RecFlag,
        bindings: Vec<ValueBinding>,
    },
    Module(ModuleBinding),
    RecModule(Vec<ModuleBinding>),
    Class(Vec<ClassDecl>),
    Include(Rc<ModuleExpr>),
    Primitive(Name),
    Type(Vec<Name>),
    Exception(Name),
    ExceptionRebind { name: Name, target: Path },
    ModuleType(Name),
    Open(Path),
    ClassType(Vec<Name>),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ModuleBinding {
    pub name: Ident,
    pub module: Rc<ModuleExpr>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ModuleExpr {
    Ident(Path),
    Structure(Structure),
    Functor {
        param: Ident,
        body: Rc<ModuleExpr>,
    },
    Apply {
        functor: Rc<ModuleExpr>,
        arg: Rc<ModuleExpr>,
    },
    /// `(M : S)`; the signature is opaque to this pass.
    Constraint {
        module: Rc<ModuleExpr>,
        signature: Name,
    },
    /// `(val e)`
    Unpack(Rc<Expr>),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClassDecl {
    pub name: Ident,
    pub body: Rc<ClassBody>,
}

/// Fields of a class or of an immediate object.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct ClassBody {
    pub fields: Vec<ClassField>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ClassField {
    Inherit(Path),
    Value {
        name: Name,
        mutable: bool,
        init: Rc<Expr>,
    },
    Method {
        name: Name,
        body: Rc<Expr>,
    },
    Initializer(Rc<Expr>),
}

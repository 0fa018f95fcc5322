//! Typed expression tree.
//!
//! Produced by the type checker and never mutated afterwards. Children are
//! held through `Rc` so a pass that leaves a subtree alone can hand the very
//! same allocation to its output.
//!
//! `ExprKind::Embedded` never comes from the checker: the staging pass uses it
//! for compile-time constants it plants in its output (locations, prebuilt
//! representation fragments, qualified names, labels).

use std::rc::Rc;

use crate::{ClassBody, Code, CspValue, Ident, Lit, ModuleExpr, Name, Path, Span, Ty};

/// Argument or parameter label.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ArgLabel {
    Nolabel,
    Labelled(Name),
    Optional(Name),
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum RecFlag {
    NonRecursive,
    Recursive,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ForDirection {
    Upto,
    Downto,
}

/// What the checker knows about a data constructor or exception.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct CtorDesc {
    /// Short name, without any module prefix.
    pub name: Name,
    /// Result type. For data constructors its head is the owning type.
    pub res: Ty,
    pub kind: CtorKind,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum CtorKind {
    Data,
    /// Exception constructor, identified by its own declaration path.
    Exception(Path),
}

/// What the checker knows about a record field.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct FieldDesc {
    pub name: Name,
    /// The record type the field belongs to.
    pub record: Ty,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Pattern {
    pub kind: PatternKind,
    pub span: Span,
    pub ty: Ty,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum PatternKind {
    Any,
    Var(Ident),
    Constant(Lit),
    Tuple(Vec<Pattern>),
    Construct {
        lid: Path,
        desc: CtorDesc,
        args: Vec<Pattern>,
    },
    Variant {
        label: Name,
        arg: Option<Box<Pattern>>,
    },
    Alias {
        pattern: Box<Pattern>,
        ident: Ident,
    },
    Or(Box<Pattern>, Box<Pattern>),
}

impl Pattern {
    pub fn new(kind: PatternKind, span: Span, ty: Ty) -> Self {
        Pattern { kind, span, ty }
    }

    /// Variables bound by the pattern, left to right.
    ///
    /// For or-patterns both sides bind the same set; the left side is used.
    pub fn binders(&self) -> Vec<Ident> {
        let mut out = Vec::new();
        self.collect_binders(&mut out);
        out
    }

    fn collect_binders(&self, out: &mut Vec<Ident>) {
        match &self.kind {
            PatternKind::Any | PatternKind::Constant(_) => {}
            PatternKind::Var(id) => out.push(*id),
            PatternKind::Tuple(items) | PatternKind::Construct { args: items, .. } => {
                for item in items {
                    item.collect_binders(out);
                }
            }
            PatternKind::Variant { arg, .. } => {
                if let Some(arg) = arg {
                    arg.collect_binders(out);
                }
            }
            PatternKind::Alias { pattern, ident } => {
                pattern.collect_binders(out);
                out.push(*ident);
            }
            PatternKind::Or(left, _) => left.collect_binders(out),
        }
    }
}

/// One arm of a `match`, `try` or `function`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Case {
    pub pattern: Pattern,
    pub guard: Option<Rc<Expr>>,
    pub body: Rc<Expr>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ValueBinding {
    pub pattern: Pattern,
    pub expr: Rc<Expr>,
}

/// `lid = value` inside a record expression.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RecordField {
    pub lid: Path,
    pub desc: FieldDesc,
    pub value: Rc<Expr>,
}

/// Compile-time constants the staging pass plants in its output.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Embedded {
    Loc(Span),
    /// Representation fragment already built at lowering time.
    Code(Rc<Code>),
    Path(Path),
    Name(Name),
    Label(ArgLabel),
    Flag(bool),
    RecFlag(RecFlag),
    Direction(ForDirection),
    /// Absent optional argument of a builder primitive.
    Absent,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Expr {
    pub kind: ExprKind,
    pub span: Span,
    pub ty: Ty,
}

impl Expr {
    pub fn new(kind: ExprKind, span: Span, ty: Ty) -> Self {
        Expr { kind, span, ty }
    }

    /// Build a node and wrap it for sharing.
    pub fn rc(kind: ExprKind, span: Span, ty: Ty) -> Rc<Self> {
        Rc::new(Expr::new(kind, span, ty))
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ExprKind {
    Ident(Path),
    Constant(Lit),
    Let {
        rec_flag: RecFlag,
        bindings: Vec<ValueBinding>,
        body: Rc<Expr>,
    },
    Function {
        label: ArgLabel,
        cases: Vec<Case>,
    },
    Apply {
        func: Rc<Expr>,
        args: Vec<(ArgLabel, Rc<Expr>)>,
    },
    Match {
        scrutinee: Rc<Expr>,
        cases: Vec<Case>,
    },
    Try {
        body: Rc<Expr>,
        cases: Vec<Case>,
    },
    Tuple(Vec<Rc<Expr>>),
    Construct {
        lid: Path,
        desc: CtorDesc,
        args: Vec<Rc<Expr>>,
    },
    Variant {
        label: Name,
        arg: Option<Rc<Expr>>,
    },
    /// Record construction, or functional update when `base` is present.
    Record {
        fields: Vec<RecordField>,
        base: Option<Rc<Expr>>,
    },
    Field {
        record: Rc<Expr>,
        lid: Path,
        desc: FieldDesc,
    },
    SetField {
        record: Rc<Expr>,
        lid: Path,
        desc: FieldDesc,
        value: Rc<Expr>,
    },
    Array(Vec<Rc<Expr>>),
    IfThenElse {
        cond: Rc<Expr>,
        then_branch: Rc<Expr>,
        else_branch: Option<Rc<Expr>>,
    },
    Sequence(Rc<Expr>, Rc<Expr>),
    While {
        cond: Rc<Expr>,
        body: Rc<Expr>,
    },
    For {
        var: Ident,
        start: Rc<Expr>,
        end: Rc<Expr>,
        direction: ForDirection,
        body: Rc<Expr>,
    },
    Assert(Rc<Expr>),
    Lazy(Rc<Expr>),
    /// `new c` for a class path.
    New(Path),
    /// Method call `obj#m`.
    Send {
        object: Rc<Expr>,
        method: Name,
    },
    /// Immediate object `object ... end`.
    Object(Rc<ClassBody>),
    InstVar(Name),
    SetInstVar {
        var: Name,
        value: Rc<Expr>,
    },
    LetModule {
        name: Ident,
        module: Rc<ModuleExpr>,
        body: Rc<Expr>,
    },
    /// First-class module `(module M)`.
    Pack(Rc<ModuleExpr>),
    Quote(Rc<Expr>),
    Escape(Rc<Expr>),
    Run(Rc<Expr>),
    Csp(CspValue),
    Embedded(Embedded),
}

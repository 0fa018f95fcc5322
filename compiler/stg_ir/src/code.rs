//! Representation of code as data.
//!
//! A `Code` tree is what a quotation evaluates to: an untyped mirror of the
//! surface syntax, handed to the downstream code generator. Every name in it
//! is either a globally loadable [`Path`], a [`BoundName`] minted when the
//! generated code ran, or hidden inside a [`CspValue`].

use crate::{ArgLabel, BoundName, CspValue, ForDirection, Lit, Name, Path, RecFlag, Span};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Code {
    pub kind: CodeKind,
    pub span: Span,
}

impl Code {
    pub fn new(kind: CodeKind, span: Span) -> Self {
        Code { kind, span }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CodeKind {
    Ident(Path),
    Var(BoundName),
    Constant(Lit),
    Apply {
        func: Box<Code>,
        args: Vec<(ArgLabel, Code)>,
    },
    Tuple(Vec<Code>),
    Construct {
        ctor: Path,
        args: Vec<Code>,
        /// The constructor was applied to an explicit tuple of arguments.
        explicit_arity: bool,
    },
    Variant {
        label: Name,
        arg: Option<Box<Code>>,
    },
    Record {
        fields: Vec<(Path, Code)>,
        base: Option<Box<Code>>,
    },
    Field {
        record: Box<Code>,
        field: Path,
    },
    SetField {
        record: Box<Code>,
        field: Path,
        value: Box<Code>,
    },
    Array(Vec<Code>),
    IfThenElse {
        cond: Box<Code>,
        then_branch: Box<Code>,
        else_branch: Option<Box<Code>>,
    },
    Sequence(Box<Code>, Box<Code>),
    While {
        cond: Box<Code>,
        body: Box<Code>,
    },
    For {
        var: BoundName,
        start: Box<Code>,
        end: Box<Code>,
        direction: ForDirection,
        body: Box<Code>,
    },
    Let {
        rec_flag: RecFlag,
        bindings: Vec<(CodePattern, Code)>,
        body: Box<Code>,
    },
    Function {
        label: ArgLabel,
        cases: Vec<CodeCase>,
    },
    Match {
        scrutinee: Box<Code>,
        cases: Vec<CodeCase>,
    },
    Try {
        body: Box<Code>,
        cases: Vec<CodeCase>,
    },
    Assert(Box<Code>),
    Lazy(Box<Code>),
    New(Path),
    Send {
        object: Box<Code>,
        method: Name,
    },
    Quote(Box<Code>),
    Escape(Box<Code>),
    Run(Box<Code>),
    Csp(CspValue),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CodeCase {
    pub pattern: CodePattern,
    pub guard: Option<Code>,
    pub body: Code,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CodePattern {
    pub kind: CodePatternKind,
    pub span: Span,
}

impl CodePattern {
    pub fn new(kind: CodePatternKind, span: Span) -> Self {
        CodePattern { kind, span }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CodePatternKind {
    Any,
    Var(BoundName),
    Constant(Lit),
    Tuple(Vec<CodePattern>),
    Construct {
        ctor: Path,
        args: Vec<CodePattern>,
    },
    Variant {
        label: Name,
        arg: Option<Box<CodePattern>>,
    },
    Alias {
        pattern: Box<CodePattern>,
        name: BoundName,
    },
    Or(Box<CodePattern>, Box<CodePattern>),
}

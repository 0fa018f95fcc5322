//! Expression builders.
//!
//! One constructor per `CodeKind`. Each takes fragments that are already
//! representation nodes and returns a new node at the given span. Nothing
//! here resolves names or looks inside values; by the time a builder runs,
//! every path has been qualified and every captured value wrapped.

use stg_ir::{
    ArgLabel, BoundName, Code, CodeCase, CodeKind, CodePattern, CspValue, ForDirection, Lit,
    Name, Path, RecFlag, Span,
};

/// Reference to a globally loadable name.
pub fn ident(span: Span, path: Path) -> Code {
    Code::new(CodeKind::Ident(path), span)
}

/// Reference to a variable bound inside generated code.
pub fn var(span: Span, name: BoundName) -> Code {
    Code::new(CodeKind::Var(name), span)
}

pub fn constant(span: Span, lit: Lit) -> Code {
    Code::new(CodeKind::Constant(lit), span)
}

pub fn apply(span: Span, func: Code, args: Vec<(ArgLabel, Code)>) -> Code {
    Code::new(
        CodeKind::Apply {
            func: Box::new(func),
            args,
        },
        span,
    )
}

pub fn tuple(span: Span, items: Vec<Code>) -> Code {
    Code::new(CodeKind::Tuple(items), span)
}

pub fn construct(span: Span, ctor: Path, args: Vec<Code>, explicit_arity: bool) -> Code {
    Code::new(
        CodeKind::Construct {
            ctor,
            args,
            explicit_arity,
        },
        span,
    )
}

pub fn variant(span: Span, label: Name, arg: Option<Code>) -> Code {
    Code::new(
        CodeKind::Variant {
            label,
            arg: arg.map(Box::new),
        },
        span,
    )
}

/// Record construction; with `base` it is a functional update.
pub fn record(span: Span, fields: Vec<(Path, Code)>, base: Option<Code>) -> Code {
    Code::new(
        CodeKind::Record {
            fields,
            base: base.map(Box::new),
        },
        span,
    )
}

pub fn field(span: Span, record: Code, field: Path) -> Code {
    Code::new(
        CodeKind::Field {
            record: Box::new(record),
            field,
        },
        span,
    )
}

pub fn set_field(span: Span, record: Code, field: Path, value: Code) -> Code {
    Code::new(
        CodeKind::SetField {
            record: Box::new(record),
            field,
            value: Box::new(value),
        },
        span,
    )
}

pub fn array(span: Span, items: Vec<Code>) -> Code {
    Code::new(CodeKind::Array(items), span)
}

pub fn if_then_else(span: Span, cond: Code, then_branch: Code, else_branch: Option<Code>) -> Code {
    Code::new(
        CodeKind::IfThenElse {
            cond: Box::new(cond),
            then_branch: Box::new(then_branch),
            else_branch: else_branch.map(Box::new),
        },
        span,
    )
}

pub fn sequence(span: Span, first: Code, second: Code) -> Code {
    Code::new(CodeKind::Sequence(Box::new(first), Box::new(second)), span)
}

pub fn while_loop(span: Span, cond: Code, body: Code) -> Code {
    Code::new(
        CodeKind::While {
            cond: Box::new(cond),
            body: Box::new(body),
        },
        span,
    )
}

pub fn for_loop(
    span: Span,
    var: BoundName,
    start: Code,
    end: Code,
    direction: ForDirection,
    body: Code,
) -> Code {
    Code::new(
        CodeKind::For {
            var,
            start: Box::new(start),
            end: Box::new(end),
            direction,
            body: Box::new(body),
        },
        span,
    )
}

pub fn let_in(
    span: Span,
    rec_flag: RecFlag,
    bindings: Vec<(CodePattern, Code)>,
    body: Code,
) -> Code {
    Code::new(
        CodeKind::Let {
            rec_flag,
            bindings,
            body: Box::new(body),
        },
        span,
    )
}

pub fn function(span: Span, label: ArgLabel, cases: Vec<CodeCase>) -> Code {
    Code::new(CodeKind::Function { label, cases }, span)
}

pub fn match_with(span: Span, scrutinee: Code, cases: Vec<CodeCase>) -> Code {
    Code::new(
        CodeKind::Match {
            scrutinee: Box::new(scrutinee),
            cases,
        },
        span,
    )
}

pub fn try_with(span: Span, body: Code, cases: Vec<CodeCase>) -> Code {
    Code::new(
        CodeKind::Try {
            body: Box::new(body),
            cases,
        },
        span,
    )
}

/// One arm, with an optional `when` guard.
pub fn case(pattern: CodePattern, guard: Option<Code>, body: Code) -> CodeCase {
    CodeCase {
        pattern,
        guard,
        body,
    }
}

pub fn assert(span: Span, cond: Code) -> Code {
    Code::new(CodeKind::Assert(Box::new(cond)), span)
}

pub fn lazy(span: Span, body: Code) -> Code {
    Code::new(CodeKind::Lazy(Box::new(body)), span)
}

pub fn new_object(span: Span, class: Path) -> Code {
    Code::new(CodeKind::New(class), span)
}

pub fn send(span: Span, object: Code, method: Name) -> Code {
    Code::new(
        CodeKind::Send {
            object: Box::new(object),
            method,
        },
        span,
    )
}

pub fn quote(span: Span, body: Code) -> Code {
    Code::new(CodeKind::Quote(Box::new(body)), span)
}

pub fn escape(span: Span, body: Code) -> Code {
    Code::new(CodeKind::Escape(Box::new(body)), span)
}

pub fn run(span: Span, body: Code) -> Code {
    Code::new(CodeKind::Run(Box::new(body)), span)
}

/// Embed a captured value as-is.
pub fn csp(span: Span, value: CspValue) -> Code {
    Code::new(CodeKind::Csp(value), span)
}

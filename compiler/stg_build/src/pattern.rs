//! Pattern builders.

use stg_ir::{BoundName, CodePattern, CodePatternKind, Lit, Name, Path, Span};

pub fn pat_any(span: Span) -> CodePattern {
    CodePattern::new(CodePatternKind::Any, span)
}

pub fn pat_var(span: Span, name: BoundName) -> CodePattern {
    CodePattern::new(CodePatternKind::Var(name), span)
}

pub fn pat_constant(span: Span, lit: Lit) -> CodePattern {
    CodePattern::new(CodePatternKind::Constant(lit), span)
}

pub fn pat_tuple(span: Span, items: Vec<CodePattern>) -> CodePattern {
    CodePattern::new(CodePatternKind::Tuple(items), span)
}

pub fn pat_construct(span: Span, ctor: Path, args: Vec<CodePattern>) -> CodePattern {
    CodePattern::new(CodePatternKind::Construct { ctor, args }, span)
}

pub fn pat_variant(span: Span, label: Name, arg: Option<CodePattern>) -> CodePattern {
    CodePattern::new(
        CodePatternKind::Variant {
            label,
            arg: arg.map(Box::new),
        },
        span,
    )
}

pub fn pat_alias(span: Span, pattern: CodePattern, name: BoundName) -> CodePattern {
    CodePattern::new(
        CodePatternKind::Alias {
            pattern: Box::new(pattern),
            name,
        },
        span,
    )
}

pub fn pat_or(span: Span, left: CodePattern, right: CodePattern) -> CodePattern {
    CodePattern::new(CodePatternKind::Or(Box::new(left), Box::new(right)), span)
}

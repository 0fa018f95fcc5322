//! Catalogue of entry points generated code may call.
//!
//! The lowering pass refers to these by qualified name (the configured
//! primitives module followed by [`Primitive::name`]); the loader binds each
//! name to the matching function of this crate, or to its own
//! compile-and-execute routine for [`Primitive::RunCode`].

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Primitive {
    // Expression builders
    Ident,
    Var,
    Constant,
    Apply,
    Tuple,
    Construct,
    Variant,
    Record,
    Field,
    SetField,
    Array,
    IfThenElse,
    Sequence,
    While,
    For,
    Let,
    Function,
    Match,
    Try,
    Case,
    Assert,
    Lazy,
    New,
    Send,
    Quote,
    Escape,
    Run,
    Csp,

    // Pattern builders
    PatAny,
    PatVar,
    PatConstant,
    PatTuple,
    PatConstruct,
    PatVariant,
    PatAlias,
    PatOr,

    // Cross-stage values
    LiftInt,
    LiftChar,
    LiftBool,
    QuoteDynamic,

    Gensym,
    /// Compile a code value and execute it immediately.
    RunCode,
}

impl Primitive {
    pub const ALL: &'static [Primitive] = &[
        Primitive::Ident,
        Primitive::Var,
        Primitive::Constant,
        Primitive::Apply,
        Primitive::Tuple,
        Primitive::Construct,
        Primitive::Variant,
        Primitive::Record,
        Primitive::Field,
        Primitive::SetField,
        Primitive::Array,
        Primitive::IfThenElse,
        Primitive::Sequence,
        Primitive::While,
        Primitive::For,
        Primitive::Let,
        Primitive::Function,
        Primitive::Match,
        Primitive::Try,
        Primitive::Case,
        Primitive::Assert,
        Primitive::Lazy,
        Primitive::New,
        Primitive::Send,
        Primitive::Quote,
        Primitive::Escape,
        Primitive::Run,
        Primitive::Csp,
        Primitive::PatAny,
        Primitive::PatVar,
        Primitive::PatConstant,
        Primitive::PatTuple,
        Primitive::PatConstruct,
        Primitive::PatVariant,
        Primitive::PatAlias,
        Primitive::PatOr,
        Primitive::LiftInt,
        Primitive::LiftChar,
        Primitive::LiftBool,
        Primitive::QuoteDynamic,
        Primitive::Gensym,
        Primitive::RunCode,
    ];

    /// Short name, unique within the primitives module.
    pub const fn name(self) -> &'static str {
        match self {
            Primitive::Ident => "build_ident",
            Primitive::Var => "build_var",
            Primitive::Constant => "build_constant",
            Primitive::Apply => "build_apply",
            Primitive::Tuple => "build_tuple",
            Primitive::Construct => "build_construct",
            Primitive::Variant => "build_variant",
            Primitive::Record => "build_record",
            Primitive::Field => "build_field",
            Primitive::SetField => "build_set_field",
            Primitive::Array => "build_array",
            Primitive::IfThenElse => "build_if_then_else",
            Primitive::Sequence => "build_sequence",
            Primitive::While => "build_while",
            Primitive::For => "build_for",
            Primitive::Let => "build_let",
            Primitive::Function => "build_function",
            Primitive::Match => "build_match",
            Primitive::Try => "build_try",
            Primitive::Case => "build_case",
            Primitive::Assert => "build_assert",
            Primitive::Lazy => "build_lazy",
            Primitive::New => "build_new",
            Primitive::Send => "build_send",
            Primitive::Quote => "build_quote",
            Primitive::Escape => "build_escape",
            Primitive::Run => "build_run",
            Primitive::Csp => "build_csp",
            Primitive::PatAny => "build_pat_any",
            Primitive::PatVar => "build_pat_var",
            Primitive::PatConstant => "build_pat_constant",
            Primitive::PatTuple => "build_pat_tuple",
            Primitive::PatConstruct => "build_pat_construct",
            Primitive::PatVariant => "build_pat_variant",
            Primitive::PatAlias => "build_pat_alias",
            Primitive::PatOr => "build_pat_or",
            Primitive::LiftInt => "lift_int",
            Primitive::LiftChar => "lift_char",
            Primitive::LiftBool => "lift_bool",
            Primitive::QuoteDynamic => "quote_dynamic",
            Primitive::Gensym => "gensym",
            Primitive::RunCode => "run_code",
        }
    }

    /// Look a primitive up by its short name.
    pub fn from_name(name: &str) -> Option<Primitive> {
        Primitive::ALL.iter().copied().find(|p| p.name() == name)
    }

    /// Whether the primitive returns a pattern rather than an expression.
    pub const fn builds_pattern(self) -> bool {
        matches!(
            self,
            Primitive::PatAny
                | Primitive::PatVar
                | Primitive::PatConstant
                | Primitive::PatTuple
                | Primitive::PatConstruct
                | Primitive::PatVariant
                | Primitive::PatAlias
                | Primitive::PatOr
        )
    }
}

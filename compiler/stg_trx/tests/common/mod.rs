//! Shared helpers for the integration tests: typed-tree builders and a
//! small loader that evaluates lowered output by calling `stg_build`.

#![allow(dead_code, reason = "each test binary uses a different subset")]

use std::rc::Rc;

use rustc_hash::FxHashMap;
use stg_build::{build, lift, pattern, Gensym, Primitive};
use stg_ir::{
    ArgLabel, BoundName, Case, Code, CodeCase, CodePattern, Embedded, Expr, ExprKind,
    ForDirection, Ident, Lit, Name, Path, Pattern, PatternKind, RecFlag, RuntimeValue, Span,
    StringInterner, SymbolTable, Ty,
};

pub struct Fixture {
    pub interner: StringInterner,
    pub symbols: SymbolTable,
}

impl Fixture {
    pub fn new() -> Self {
        let interner = StringInterner::new();
        let symbols = SymbolTable::with_predef(&interner);
        Fixture { interner, symbols }
    }

    pub fn name(&self, s: &str) -> Name {
        self.interner.intern(s)
    }

    pub fn persistent(&self, s: &str) -> Ident {
        Ident::persistent(self.name(s))
    }

    pub fn predef(&self, s: &str) -> Ident {
        Ident::predef(self.name(s))
    }

    pub fn local(&mut self, s: &str, stage: u32) -> Ident {
        let name = self.name(s);
        self.symbols.local(name, stage)
    }
}

pub fn node(kind: ExprKind, ty: Ty) -> Rc<Expr> {
    Expr::rc(kind, Span::DUMMY, ty)
}

pub fn var(ident: Ident, ty: Ty) -> Rc<Expr> {
    node(ExprKind::Ident(Path::ident(ident)), ty)
}

pub fn int(n: i64) -> Rc<Expr> {
    node(ExprKind::Constant(Lit::Int(n)), Ty::Int)
}

pub fn apply(func: Rc<Expr>, args: Vec<Rc<Expr>>, ty: Ty) -> Rc<Expr> {
    let args = args.into_iter().map(|a| (ArgLabel::Nolabel, a)).collect();
    node(ExprKind::Apply { func, args }, ty)
}

pub fn quote(body: Rc<Expr>) -> Rc<Expr> {
    let ty = Ty::code(body.ty.clone());
    node(ExprKind::Quote(body), ty)
}

pub fn escape(body: Rc<Expr>) -> Rc<Expr> {
    let ty = match &body.ty {
        Ty::Code(inner) => (**inner).clone(),
        other => other.clone(),
    };
    node(ExprKind::Escape(body), ty)
}

pub fn fun(param: Ident, param_ty: Ty, body: Rc<Expr>) -> Rc<Expr> {
    let ty = Ty::arrow(param_ty.clone(), body.ty.clone());
    node(
        ExprKind::Function {
            label: ArgLabel::Nolabel,
            cases: vec![Case {
                pattern: Pattern::new(PatternKind::Var(param), Span::DUMMY, param_ty),
                guard: None,
                body,
            }],
        },
        ty,
    )
}

/// Run-time value of something the loader evaluated.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Code(Code),
    Pattern(CodePattern),
    Case(CodeCase),
    Bound(BoundName),
    Loc(Span),
    Path(Path),
    Name(Name),
    Label(ArgLabel),
    Flag(bool),
    RecFlag(RecFlag),
    Direction(ForDirection),
    Absent,
    Lit(Lit),
    Runtime(RuntimeValue),
    List(Vec<Value>),
    Pair(Box<Value>, Box<Value>),
}

macro_rules! expect_value {
    ($fn:ident, $variant:ident, $ty:ty) => {
        fn $fn(value: Value) -> $ty {
            match value {
                Value::$variant(inner) => inner,
                other => panic!(concat!("expected ", stringify!($variant), ", got {:?}"), other),
            }
        }
    };
}

expect_value!(code, Code, Code);
expect_value!(pat, Pattern, CodePattern);
expect_value!(case, Case, CodeCase);
expect_value!(bound, Bound, BoundName);
expect_value!(loc, Loc, Span);
expect_value!(path, Path, Path);
expect_value!(name, Name, Name);
expect_value!(label, Label, ArgLabel);
expect_value!(flag, Flag, bool);
expect_value!(rec_flag, RecFlag, RecFlag);
expect_value!(direction, Direction, ForDirection);
expect_value!(list, List, Vec<Value>);

fn pair(value: Value) -> (Value, Value) {
    match value {
        Value::Pair(a, b) => (*a, *b),
        other => panic!("expected pair, got {other:?}"),
    }
}

fn optional<T>(value: Value, f: impl FnOnce(Value) -> T) -> Option<T> {
    match value {
        Value::Absent => None,
        other => Some(f(other)),
    }
}

fn int_of(value: Value) -> i64 {
    match value {
        Value::Runtime(RuntimeValue::Int(n)) | Value::Lit(Lit::Int(n)) => n,
        other => panic!("expected int, got {other:?}"),
    }
}

/// Evaluates the output of the pass the way the generated program would,
/// with the builder primitives bound to `stg_build`.
pub struct Loader<'a> {
    names: &'a StringInterner,
    pub gensym: Gensym,
    env: FxHashMap<Ident, Value>,
}

impl<'a> Loader<'a> {
    pub fn new(names: &'a StringInterner) -> Self {
        Loader {
            names,
            gensym: Gensym::new(),
            env: FxHashMap::default(),
        }
    }

    /// Give a stage-0 variable its run-time value.
    pub fn bind(&mut self, ident: Ident, value: Value) {
        self.env.insert(ident, value);
    }

    /// Evaluate an expression that is expected to produce a code value.
    pub fn eval_code(&mut self, expr: &Expr) -> Code {
        code(self.eval(expr))
    }

    pub fn eval(&mut self, expr: &Expr) -> Value {
        match &expr.kind {
            ExprKind::Embedded(embedded) => match embedded {
                Embedded::Loc(span) => Value::Loc(*span),
                Embedded::Code(c) => Value::Code((**c).clone()),
                Embedded::Path(p) => Value::Path(p.clone()),
                Embedded::Name(n) => Value::Name(*n),
                Embedded::Label(l) => Value::Label(*l),
                Embedded::Flag(f) => Value::Flag(*f),
                Embedded::RecFlag(f) => Value::RecFlag(*f),
                Embedded::Direction(d) => Value::Direction(*d),
                Embedded::Absent => Value::Absent,
            },
            ExprKind::Ident(p) => match self.env.get(&p.head) {
                Some(value) => value.clone(),
                None => panic!("unbound variable {}", p.display(self.names)),
            },
            ExprKind::Constant(lit) => Value::Lit(lit.clone()),
            ExprKind::Array(items) => Value::List(items.iter().map(|i| self.eval(i)).collect()),
            ExprKind::Tuple(items) if items.len() == 2 => Value::Pair(
                Box::new(self.eval(&items[0])),
                Box::new(self.eval(&items[1])),
            ),
            ExprKind::Let {
                bindings, body, ..
            } => {
                let mut saved = Vec::new();
                for binding in bindings {
                    let PatternKind::Var(ident) = &binding.pattern.kind else {
                        panic!("loader only binds variables");
                    };
                    let ident = *ident;
                    let value = self.eval(&binding.expr);
                    saved.push((ident, self.env.insert(ident, value)));
                }
                let result = self.eval(body);
                for (ident, previous) in saved.into_iter().rev() {
                    match previous {
                        Some(previous) => self.env.insert(ident, previous),
                        None => self.env.remove(&ident),
                    };
                }
                result
            }
            ExprKind::Apply { func, args } => {
                let ExprKind::Ident(p) = &func.kind else {
                    panic!("loader only calls primitives");
                };
                let Some(prim) = Primitive::from_name(self.names.lookup(p.last())) else {
                    panic!("unknown primitive {}", p.display(self.names));
                };
                let args: Vec<Value> = args.iter().map(|(_, a)| self.eval(a)).collect();
                self.call(prim, args)
            }
            other => panic!("unexpected node in lowered output: {other:?}"),
        }
    }

    fn call(&mut self, prim: Primitive, args: Vec<Value>) -> Value {
        let mut args = args.into_iter();
        let mut next = || args.next().unwrap_or_else(|| panic!("{prim:?}: missing argument"));
        let codes = |value: Value| list(value).into_iter().map(code).collect::<Vec<_>>();
        let pats = |value: Value| list(value).into_iter().map(pat).collect::<Vec<_>>();
        let cases = |value: Value| list(value).into_iter().map(case).collect::<Vec<_>>();

        match prim {
            Primitive::Ident => Value::Code(build::ident(loc(next()), path(next()))),
            Primitive::Var => Value::Code(build::var(loc(next()), bound(next()))),
            Primitive::Constant => {
                let span = loc(next());
                let Value::Lit(lit) = next() else {
                    panic!("build_constant expects a literal");
                };
                Value::Code(build::constant(span, lit))
            }
            Primitive::Apply => {
                let span = loc(next());
                let func = code(next());
                let args = list(next())
                    .into_iter()
                    .map(|p| {
                        let (l, a) = pair(p);
                        (label(l), code(a))
                    })
                    .collect();
                Value::Code(build::apply(span, func, args))
            }
            Primitive::Tuple => Value::Code(build::tuple(loc(next()), codes(next()))),
            Primitive::Construct => {
                let span = loc(next());
                let ctor = path(next());
                let args = codes(next());
                Value::Code(build::construct(span, ctor, args, flag(next())))
            }
            Primitive::Variant => {
                let span = loc(next());
                let label = name(next());
                Value::Code(build::variant(span, label, optional(next(), code)))
            }
            Primitive::Record => {
                let span = loc(next());
                let fields = list(next())
                    .into_iter()
                    .map(|p| {
                        let (f, v) = pair(p);
                        (path(f), code(v))
                    })
                    .collect();
                Value::Code(build::record(span, fields, optional(next(), code)))
            }
            Primitive::Field => {
                let span = loc(next());
                let record = code(next());
                Value::Code(build::field(span, record, path(next())))
            }
            Primitive::SetField => {
                let span = loc(next());
                let record = code(next());
                let field = path(next());
                Value::Code(build::set_field(span, record, field, code(next())))
            }
            Primitive::Array => Value::Code(build::array(loc(next()), codes(next()))),
            Primitive::IfThenElse => {
                let span = loc(next());
                let cond = code(next());
                let then_branch = code(next());
                Value::Code(build::if_then_else(
                    span,
                    cond,
                    then_branch,
                    optional(next(), code),
                ))
            }
            Primitive::Sequence => {
                let span = loc(next());
                let first = code(next());
                Value::Code(build::sequence(span, first, code(next())))
            }
            Primitive::While => {
                let span = loc(next());
                let cond = code(next());
                Value::Code(build::while_loop(span, cond, code(next())))
            }
            Primitive::For => {
                let span = loc(next());
                let var = bound(next());
                let start = code(next());
                let end = code(next());
                let dir = direction(next());
                Value::Code(build::for_loop(span, var, start, end, dir, code(next())))
            }
            Primitive::Let => {
                let span = loc(next());
                let rec = rec_flag(next());
                let bindings = list(next())
                    .into_iter()
                    .map(|p| {
                        let (pt, v) = pair(p);
                        (pat(pt), code(v))
                    })
                    .collect();
                Value::Code(build::let_in(span, rec, bindings, code(next())))
            }
            Primitive::Function => {
                let span = loc(next());
                let l = label(next());
                Value::Code(build::function(span, l, cases(next())))
            }
            Primitive::Match => {
                let span = loc(next());
                let scrutinee = code(next());
                Value::Code(build::match_with(span, scrutinee, cases(next())))
            }
            Primitive::Try => {
                let span = loc(next());
                let body = code(next());
                Value::Code(build::try_with(span, body, cases(next())))
            }
            Primitive::Case => {
                let p = pat(next());
                let guard = optional(next(), code);
                Value::Case(build::case(p, guard, code(next())))
            }
            Primitive::Assert => Value::Code(build::assert(loc(next()), code(next()))),
            Primitive::Lazy => Value::Code(build::lazy(loc(next()), code(next()))),
            Primitive::New => Value::Code(build::new_object(loc(next()), path(next()))),
            Primitive::Send => {
                let span = loc(next());
                let object = code(next());
                Value::Code(build::send(span, object, name(next())))
            }
            Primitive::Quote => Value::Code(build::quote(loc(next()), code(next()))),
            Primitive::Escape => Value::Code(build::escape(loc(next()), code(next()))),
            Primitive::Run => Value::Code(build::run(loc(next()), code(next()))),
            Primitive::Csp => panic!("captured values are planted, never built by a call"),
            Primitive::PatAny => Value::Pattern(pattern::pat_any(loc(next()))),
            Primitive::PatVar => Value::Pattern(pattern::pat_var(loc(next()), bound(next()))),
            Primitive::PatConstant => {
                let span = loc(next());
                let Value::Lit(lit) = next() else {
                    panic!("build_pat_constant expects a literal");
                };
                Value::Pattern(pattern::pat_constant(span, lit))
            }
            Primitive::PatTuple => Value::Pattern(pattern::pat_tuple(loc(next()), pats(next()))),
            Primitive::PatConstruct => {
                let span = loc(next());
                let ctor = path(next());
                Value::Pattern(pattern::pat_construct(span, ctor, pats(next())))
            }
            Primitive::PatVariant => {
                let span = loc(next());
                let l = name(next());
                Value::Pattern(pattern::pat_variant(span, l, optional(next(), pat)))
            }
            Primitive::PatAlias => {
                let span = loc(next());
                let inner = pat(next());
                Value::Pattern(pattern::pat_alias(span, inner, bound(next())))
            }
            Primitive::PatOr => {
                let span = loc(next());
                let left = pat(next());
                Value::Pattern(pattern::pat_or(span, left, pat(next())))
            }
            Primitive::LiftInt => Value::Code(lift::lift_int(loc(next()), int_of(next()))),
            Primitive::LiftChar => {
                let span = loc(next());
                let Value::Lit(Lit::Char(c)) = next() else {
                    panic!("lift_char expects a char");
                };
                Value::Code(lift::lift_char(span, c))
            }
            Primitive::LiftBool => {
                let span = loc(next());
                let Value::Lit(Lit::Bool(b)) = next() else {
                    panic!("lift_bool expects a bool");
                };
                Value::Code(lift::lift_bool(span, b))
            }
            Primitive::QuoteDynamic => {
                let span = loc(next());
                let Value::Runtime(value) = next() else {
                    panic!("quote_dynamic expects a run-time value");
                };
                Value::Code(lift::quote_dynamic(span, value, name(next())))
            }
            Primitive::Gensym => Value::Bound(self.gensym.fresh(name(next()))),
            Primitive::RunCode => panic!("the test loader does not execute code"),
        }
    }
}

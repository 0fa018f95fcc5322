//! Typed-tree construction and compact rendering for unit tests.

use std::fmt::Write;
use std::rc::Rc;

use stg_ir::{
    ArgLabel, Case, Code, CodeKind, CtorDesc, CtorKind, Embedded, Expr, ExprKind, ForDirection,
    Ident, IdentScope, Lit, Name, Path, Pattern, PatternKind, RecFlag, Span, StringInterner,
    StringLookup, SymbolTable, Ty, ValueBinding,
};

use crate::{StagingConfig, Trx};

pub(crate) struct Fx {
    pub(crate) interner: StringInterner,
    pub(crate) symbols: SymbolTable,
}

impl Fx {
    pub(crate) fn new() -> Self {
        let interner = StringInterner::new();
        let symbols = SymbolTable::with_predef(&interner);
        Fx { interner, symbols }
    }

    pub(crate) fn trx(&self) -> Trx<'_> {
        Trx::new(&self.symbols, &self.interner, StagingConfig::default())
    }

    pub(crate) fn name(&self, s: &str) -> Name {
        self.interner.intern(s)
    }

    pub(crate) fn persistent(&self, s: &str) -> Ident {
        Ident::persistent(self.name(s))
    }

    pub(crate) fn predef(&self, s: &str) -> Ident {
        Ident::predef(self.name(s))
    }

    /// A local binding introduced at `stage`.
    pub(crate) fn local(&mut self, s: &str, stage: u32) -> Ident {
        let name = self.name(s);
        self.symbols.local(name, stage)
    }

    pub(crate) fn var(&self, ident: Ident, ty: Ty) -> Rc<Expr> {
        Expr::rc(ExprKind::Ident(Path::ident(ident)), Span::DUMMY, ty)
    }

    pub(crate) fn path(&self, path: Path, ty: Ty) -> Rc<Expr> {
        Expr::rc(ExprKind::Ident(path), Span::DUMMY, ty)
    }

    pub(crate) fn int(&self, n: i64) -> Rc<Expr> {
        Expr::rc(ExprKind::Constant(Lit::Int(n)), Span::DUMMY, Ty::Int)
    }

    pub(crate) fn list_of(&self, elem: Ty) -> Ty {
        Ty::Con {
            path: Path::ident(self.predef("list")),
            args: vec![elem],
        }
    }

    pub(crate) fn apply(&self, func: Rc<Expr>, args: Vec<Rc<Expr>>, ty: Ty) -> Rc<Expr> {
        let args = args.into_iter().map(|a| (ArgLabel::Nolabel, a)).collect();
        Expr::rc(ExprKind::Apply { func, args }, Span::DUMMY, ty)
    }

    pub(crate) fn quote(&self, body: Rc<Expr>) -> Rc<Expr> {
        let ty = Ty::code(body.ty.clone());
        Expr::rc(ExprKind::Quote(body), Span::DUMMY, ty)
    }

    pub(crate) fn escape(&self, body: Rc<Expr>) -> Rc<Expr> {
        let ty = match &body.ty {
            Ty::Code(inner) => (**inner).clone(),
            other => other.clone(),
        };
        Expr::rc(ExprKind::Escape(body), Span::DUMMY, ty)
    }

    pub(crate) fn run(&self, body: Rc<Expr>) -> Rc<Expr> {
        let ty = match &body.ty {
            Ty::Code(inner) => (**inner).clone(),
            other => other.clone(),
        };
        Expr::rc(ExprKind::Run(body), Span::DUMMY, ty)
    }

    pub(crate) fn seq(&self, first: Rc<Expr>, second: Rc<Expr>) -> Rc<Expr> {
        let ty = second.ty.clone();
        Expr::rc(ExprKind::Sequence(first, second), Span::DUMMY, ty)
    }

    pub(crate) fn pat_var(&self, ident: Ident, ty: Ty) -> Pattern {
        Pattern::new(PatternKind::Var(ident), Span::DUMMY, ty)
    }

    /// `fun x -> body`
    pub(crate) fn fun(&self, param: Ident, param_ty: Ty, body: Rc<Expr>) -> Rc<Expr> {
        let ty = Ty::arrow(param_ty.clone(), body.ty.clone());
        Expr::rc(
            ExprKind::Function {
                label: ArgLabel::Nolabel,
                cases: vec![Case {
                    pattern: self.pat_var(param, param_ty),
                    guard: None,
                    body,
                }],
            },
            Span::DUMMY,
            ty,
        )
    }

    /// `let x = value in body`
    pub(crate) fn let_in(&self, x: Ident, value: Rc<Expr>, body: Rc<Expr>) -> Rc<Expr> {
        let ty = body.ty.clone();
        Expr::rc(
            ExprKind::Let {
                rec_flag: RecFlag::NonRecursive,
                bindings: vec![ValueBinding {
                    pattern: self.pat_var(x, value.ty.clone()),
                    expr: value,
                }],
                body,
            },
            Span::DUMMY,
            ty,
        )
    }

    pub(crate) fn ctor(&self, lid: Path, owner: Path, args: Vec<Rc<Expr>>) -> Rc<Expr> {
        let desc = CtorDesc {
            name: lid.last(),
            res: Ty::con(owner.clone()),
            kind: CtorKind::Data,
        };
        Expr::rc(
            ExprKind::Construct { lid, desc, args },
            Span::DUMMY,
            Ty::con(owner),
        )
    }

    pub(crate) fn render(&self, expr: &Expr) -> String {
        let mut out = String::new();
        self.render_into(&mut out, expr);
        out
    }

    fn render_path(&self, out: &mut String, path: &Path) {
        // Primitive calls read better without their module prefix.
        if path.head.scope == IdentScope::Persistent
            && self.interner.lookup(path.head.name) == "Trx"
            && path.members.len() == 1
        {
            out.push_str(self.interner.lookup(path.last()));
        } else {
            out.push_str(&path.display(&self.interner));
        }
    }

    fn render_list(&self, out: &mut String, items: &[Rc<Expr>], sep: &str) {
        for (i, item) in items.iter().enumerate() {
            if i > 0 {
                out.push_str(sep);
            }
            self.render_into(out, item);
        }
    }

    fn render_into(&self, out: &mut String, expr: &Expr) {
        match &expr.kind {
            ExprKind::Ident(path) => self.render_path(out, path),
            ExprKind::Constant(lit) => render_lit(out, lit),
            ExprKind::Apply { func, args } => {
                self.render_into(out, func);
                out.push('(');
                for (i, (label, arg)) in args.iter().enumerate() {
                    if i > 0 {
                        out.push_str(", ");
                    }
                    match label {
                        ArgLabel::Nolabel => {}
                        ArgLabel::Labelled(l) => {
                            let _ = write!(out, "~{}:", self.interner.lookup(*l));
                        }
                        ArgLabel::Optional(l) => {
                            let _ = write!(out, "?{}:", self.interner.lookup(*l));
                        }
                    }
                    self.render_into(out, arg);
                }
                out.push(')');
            }
            ExprKind::Array(items) => {
                out.push('[');
                self.render_list(out, items, "; ");
                out.push(']');
            }
            ExprKind::Tuple(items) => {
                out.push('(');
                self.render_list(out, items, ", ");
                out.push(')');
            }
            ExprKind::Let {
                rec_flag,
                bindings,
                body,
            } => {
                out.push_str(match rec_flag {
                    RecFlag::NonRecursive => "let ",
                    RecFlag::Recursive => "let rec ",
                });
                for (i, binding) in bindings.iter().enumerate() {
                    if i > 0 {
                        out.push_str(" and ");
                    }
                    self.render_pattern(out, &binding.pattern);
                    out.push_str(" = ");
                    self.render_into(out, &binding.expr);
                }
                out.push_str(" in ");
                self.render_into(out, body);
            }
            ExprKind::Function { cases, .. } => {
                out.push_str("fun ");
                for (i, case) in cases.iter().enumerate() {
                    if i > 0 {
                        out.push_str(" | ");
                    }
                    self.render_pattern(out, &case.pattern);
                    out.push_str(" -> ");
                    self.render_into(out, &case.body);
                }
            }
            ExprKind::Sequence(first, second) => {
                self.render_into(out, first);
                out.push_str("; ");
                self.render_into(out, second);
            }
            ExprKind::Quote(body) => {
                out.push('<');
                self.render_into(out, body);
                out.push('>');
            }
            ExprKind::Escape(body) => {
                out.push('~');
                self.render_into(out, body);
            }
            ExprKind::Run(body) => {
                out.push_str("run ");
                self.render_into(out, body);
            }
            ExprKind::Embedded(embedded) => self.render_embedded(out, embedded),
            other => {
                let _ = write!(out, "<{}>", kind_name(other));
            }
        }
    }

    fn render_embedded(&self, out: &mut String, embedded: &Embedded) {
        match embedded {
            Embedded::Loc(_) => out.push_str("loc"),
            Embedded::Code(code) => {
                out.push('{');
                self.render_code(out, code);
                out.push('}');
            }
            Embedded::Path(path) => {
                out.push('\'');
                out.push_str(&path.display(&self.interner));
            }
            Embedded::Name(name) => {
                let _ = write!(out, "{:?}", self.interner.lookup(*name));
            }
            Embedded::Label(ArgLabel::Nolabel) => out.push_str("\"\""),
            Embedded::Label(ArgLabel::Labelled(l)) => {
                let _ = write!(out, "\"~{}\"", self.interner.lookup(*l));
            }
            Embedded::Label(ArgLabel::Optional(l)) => {
                let _ = write!(out, "\"?{}\"", self.interner.lookup(*l));
            }
            Embedded::Flag(flag) => {
                let _ = write!(out, "{flag}");
            }
            Embedded::RecFlag(RecFlag::NonRecursive) => out.push_str("nonrec"),
            Embedded::RecFlag(RecFlag::Recursive) => out.push_str("rec"),
            Embedded::Direction(ForDirection::Upto) => out.push_str("upto"),
            Embedded::Direction(ForDirection::Downto) => out.push_str("downto"),
            Embedded::Absent => out.push_str("none"),
        }
    }

    fn render_code(&self, out: &mut String, code: &Code) {
        match &code.kind {
            CodeKind::Ident(path) => out.push_str(&path.display(&self.interner)),
            CodeKind::Constant(lit) => render_lit(out, lit),
            CodeKind::Csp(value) => {
                let _ = write!(out, "csp {}", self.interner.lookup(value.name));
            }
            _ => out.push_str("..."),
        }
    }

    fn render_pattern(&self, out: &mut String, pattern: &Pattern) {
        match &pattern.kind {
            PatternKind::Var(ident) => out.push_str(self.interner.lookup(ident.name)),
            PatternKind::Any => out.push('_'),
            _ => out.push_str("<pattern>"),
        }
    }
}

fn render_lit(out: &mut String, lit: &Lit) {
    let _ = match lit {
        Lit::Int(n) => write!(out, "{n}"),
        Lit::Char(c) => write!(out, "{c:?}"),
        Lit::Bool(b) => write!(out, "{b}"),
        Lit::Float(bits) => write!(out, "{}", f64::from_bits(*bits)),
        Lit::Str(s) => write!(out, "{s:?}"),
    };
}

fn kind_name(kind: &ExprKind) -> &'static str {
    match kind {
        ExprKind::Match { .. } => "match",
        ExprKind::Try { .. } => "try",
        ExprKind::Construct { .. } => "construct",
        ExprKind::Variant { .. } => "variant",
        ExprKind::Record { .. } => "record",
        ExprKind::Field { .. } => "field",
        ExprKind::SetField { .. } => "set_field",
        ExprKind::IfThenElse { .. } => "if",
        ExprKind::While { .. } => "while",
        ExprKind::For { .. } => "for",
        ExprKind::Assert(_) => "assert",
        ExprKind::Lazy(_) => "lazy",
        ExprKind::New(_) => "new",
        ExprKind::Send { .. } => "send",
        ExprKind::Object(_) => "object",
        ExprKind::InstVar(_) | ExprKind::SetInstVar { .. } => "instvar",
        ExprKind::LetModule { .. } => "let_module",
        ExprKind::Pack(_) => "pack",
        ExprKind::Csp(_) => "csp",
        _ => "expr",
    }
}

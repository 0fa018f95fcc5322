//! Building output nodes.
//!
//! Everything the lowerer produces is either a call to a builder primitive
//! or a compile-time constant ([`Embedded`]) that the primitive takes as an
//! argument. Calls take the location first, except `build_case` and
//! `gensym`. Lists are arrays, `(label, code)` pairs are tuples, and an
//! absent optional argument is [`Embedded::Absent`].

use std::rc::Rc;

use stg_build::Primitive;
use stg_ir::{
    ArgLabel, Code, Embedded, Expr, ExprKind, ForDirection, Ident, Name, Path, Pattern,
    PatternKind, RecFlag, Span, StringInterner, Ty, ValueBinding,
};

use crate::Trx;

/// Resolved names of the primitives module and the types of its values.
#[derive(Debug)]
pub(crate) struct Primitives {
    module: Ident,
    /// Indexed by `Primitive as usize`.
    names: Vec<Name>,
    pub(crate) code_ty: Ty,
    pub(crate) pattern_ty: Ty,
    pub(crate) case_ty: Ty,
    pub(crate) bound_name_ty: Ty,
    pub(crate) location_ty: Ty,
    pub(crate) path_ty: Ty,
    pub(crate) name_ty: Ty,
    pub(crate) label_ty: Ty,
    pub(crate) rec_flag_ty: Ty,
    pub(crate) direction_ty: Ty,
    array: Path,
}

impl Primitives {
    pub(crate) fn new(interner: &StringInterner, module: &str) -> Self {
        let module = Ident::persistent(interner.intern(module));
        let support = |name: &str| Ty::con(Path::dot(module, &[interner.intern(name)]));
        Primitives {
            module,
            names: Primitive::ALL
                .iter()
                .map(|p| interner.intern(p.name()))
                .collect(),
            code_ty: support("code"),
            pattern_ty: support("pattern"),
            case_ty: support("case"),
            bound_name_ty: support("bound_name"),
            location_ty: support("location"),
            path_ty: support("path"),
            name_ty: support("name"),
            label_ty: support("label"),
            rec_flag_ty: support("rec_flag"),
            direction_ty: support("direction"),
            array: Path::ident(Ident::predef(interner.intern("array"))),
        }
    }

    /// Qualified path of a primitive, e.g. `Trx.build_apply`.
    pub(crate) fn path(&self, prim: Primitive) -> Path {
        Path::dot(self.module, &[self.names[prim as usize]])
    }

    /// Result type of a call to `prim`. `RunCode` is typed by its caller.
    fn result_ty(&self, prim: Primitive) -> &Ty {
        match prim {
            Primitive::Case => &self.case_ty,
            Primitive::Gensym => &self.bound_name_ty,
            p if p.builds_pattern() => &self.pattern_ty,
            _ => &self.code_ty,
        }
    }

    fn array_of(&self, elem: Ty) -> Ty {
        Ty::Con {
            path: self.array.clone(),
            args: vec![elem],
        }
    }
}

impl Trx<'_> {
    /// The span recorded in generated code for a node at `span`.
    pub(crate) fn location(&self, span: Span) -> Span {
        if self.config.keep_locations {
            span
        } else {
            Span::DUMMY
        }
    }

    pub(crate) fn call(&self, prim: Primitive, span: Span, args: Vec<Rc<Expr>>) -> Rc<Expr> {
        let ty = self.prims.result_ty(prim).clone();
        self.call_typed(prim, span, args, ty)
    }

    pub(crate) fn call_typed(
        &self,
        prim: Primitive,
        span: Span,
        args: Vec<Rc<Expr>>,
        ty: Ty,
    ) -> Rc<Expr> {
        let func = Expr::rc(ExprKind::Ident(self.prims.path(prim)), span, Ty::Var(0));
        let args = args.into_iter().map(|a| (ArgLabel::Nolabel, a)).collect();
        Expr::rc(ExprKind::Apply { func, args }, span, ty)
    }

    /// A builder call whose first argument is the location of `span`.
    pub(crate) fn build(&self, prim: Primitive, span: Span, mut args: Vec<Rc<Expr>>) -> Rc<Expr> {
        args.insert(0, self.loc(span));
        self.call(prim, span, args)
    }

    fn embed(&self, embedded: Embedded, span: Span, ty: Ty) -> Rc<Expr> {
        Expr::rc(ExprKind::Embedded(embedded), span, ty)
    }

    pub(crate) fn loc(&self, span: Span) -> Rc<Expr> {
        let ty = self.prims.location_ty.clone();
        self.embed(Embedded::Loc(self.location(span)), span, ty)
    }

    /// A representation node built now and planted as a constant.
    pub(crate) fn fragment(&self, code: Code) -> Rc<Expr> {
        let span = code.span;
        self.embed(Embedded::Code(Rc::new(code)), span, self.prims.code_ty.clone())
    }

    pub(crate) fn embed_path(&self, path: Path, span: Span) -> Rc<Expr> {
        self.embed(Embedded::Path(path), span, self.prims.path_ty.clone())
    }

    pub(crate) fn embed_name(&self, name: Name, span: Span) -> Rc<Expr> {
        self.embed(Embedded::Name(name), span, self.prims.name_ty.clone())
    }

    pub(crate) fn embed_label(&self, label: ArgLabel, span: Span) -> Rc<Expr> {
        self.embed(Embedded::Label(label), span, self.prims.label_ty.clone())
    }

    pub(crate) fn embed_flag(&self, flag: bool, span: Span) -> Rc<Expr> {
        self.embed(Embedded::Flag(flag), span, Ty::Bool)
    }

    pub(crate) fn embed_rec_flag(&self, flag: RecFlag, span: Span) -> Rc<Expr> {
        self.embed(Embedded::RecFlag(flag), span, self.prims.rec_flag_ty.clone())
    }

    pub(crate) fn embed_direction(&self, dir: ForDirection, span: Span) -> Rc<Expr> {
        self.embed(Embedded::Direction(dir), span, self.prims.direction_ty.clone())
    }

    /// The argument for an optional builder parameter.
    pub(crate) fn optional(&self, arg: Option<Rc<Expr>>, span: Span) -> Rc<Expr> {
        arg.unwrap_or_else(|| self.embed(Embedded::Absent, span, Ty::Var(0)))
    }

    pub(crate) fn list(&self, items: Vec<Rc<Expr>>, elem: &Ty, span: Span) -> Rc<Expr> {
        Expr::rc(ExprKind::Array(items), span, self.prims.array_of(elem.clone()))
    }

    pub(crate) fn pair(&self, first: Rc<Expr>, second: Rc<Expr>, span: Span) -> Rc<Expr> {
        let ty = Ty::Tuple(vec![first.ty.clone(), second.ty.clone()]);
        Expr::rc(ExprKind::Tuple(vec![first, second]), span, ty)
    }

    /// Reference to a renamed binder: a compile-time variable holding the
    /// name `gensym` produced for it.
    pub(crate) fn bound(&self, ident: Ident, span: Span) -> Rc<Expr> {
        Expr::rc(
            ExprKind::Ident(Path::ident(ident)),
            span,
            self.prims.bound_name_ty.clone(),
        )
    }

    /// `let fresh = gensym "<base>" in body`
    pub(crate) fn bind_gensym(
        &self,
        fresh: Ident,
        base: Name,
        body: Rc<Expr>,
        span: Span,
    ) -> Rc<Expr> {
        let name = self.call(Primitive::Gensym, span, vec![self.embed_name(base, span)]);
        let pattern = Pattern::new(
            PatternKind::Var(fresh),
            span,
            self.prims.bound_name_ty.clone(),
        );
        let ty = body.ty.clone();
        Expr::rc(
            ExprKind::Let {
                rec_flag: RecFlag::NonRecursive,
                bindings: vec![ValueBinding {
                    pattern,
                    expr: name,
                }],
                body,
            },
            span,
            ty,
        )
    }
}

//! Compilation units, module expressions and classes.

use std::rc::Rc;

use stg_ir::{
    ClassBody, ClassDecl, ClassField, ItemKind, ModuleBinding, ModuleExpr, Structure,
    StructureItem,
};

use super::Walked;
use crate::change::{self, Change};
use crate::stack::ensure_sufficient_stack;
use crate::Trx;

impl Trx<'_> {
    pub(crate) fn walk_structure(&mut self, structure: &Structure) -> Walked<Structure> {
        Ok(change::list(self, &structure.items, Self::walk_item)?.map(Structure::new))
    }

    fn walk_item(&mut self, item: &Rc<StructureItem>) -> Walked<Rc<StructureItem>> {
        let kind = match &item.kind {
            ItemKind::Eval(expr) => self.walk_expr(expr)?.map(ItemKind::Eval),
            ItemKind::Value { rec_flag, bindings } => {
                change::list(self, bindings, Self::walk_binding)?.map(|bindings| {
                    ItemKind::Value {
                        rec_flag: *rec_flag,
                        bindings,
                    }
                })
            }
            ItemKind::Module(binding) => self.walk_module_binding(binding)?.map(ItemKind::Module),
            ItemKind::RecModule(bindings) => {
                change::list(self, bindings, Self::walk_module_binding)?.map(ItemKind::RecModule)
            }
            ItemKind::Class(decls) => {
                change::list(self, decls, Self::walk_class_decl)?.map(ItemKind::Class)
            }
            ItemKind::Include(module) => self.walk_module(module)?.map(ItemKind::Include),

            // Declarations without expressions
            ItemKind::Primitive(_)
            | ItemKind::Type(_)
            | ItemKind::Exception(_)
            | ItemKind::ExceptionRebind { .. }
            | ItemKind::ModuleType(_)
            | ItemKind::Open(_)
            | ItemKind::ClassType(_) => Change::Unchanged,
        };
        Ok(kind.map(|kind| StructureItem::rc(kind, item.span)))
    }

    fn walk_module_binding(&mut self, binding: &ModuleBinding) -> Walked<ModuleBinding> {
        Ok(self
            .walk_module(&binding.module)?
            .map(|module| ModuleBinding {
                name: binding.name,
                module,
            }))
    }

    pub(super) fn walk_module(&mut self, module: &Rc<ModuleExpr>) -> Walked<Rc<ModuleExpr>> {
        ensure_sufficient_stack(|| {
            let walked = match &**module {
                ModuleExpr::Ident(_) => Change::Unchanged,
                ModuleExpr::Structure(structure) => {
                    self.walk_structure(structure)?.map(ModuleExpr::Structure)
                }
                ModuleExpr::Functor { param, body } => {
                    self.walk_module(body)?.map(|body| ModuleExpr::Functor {
                        param: *param,
                        body,
                    })
                }
                ModuleExpr::Apply { functor, arg } => {
                    change::pair(self, functor, arg, Self::walk_module, Self::walk_module)?
                        .map(|(functor, arg)| ModuleExpr::Apply { functor, arg })
                }
                ModuleExpr::Constraint { module, signature } => {
                    self.walk_module(module)?.map(|module| ModuleExpr::Constraint {
                        module,
                        signature: *signature,
                    })
                }
                ModuleExpr::Unpack(expr) => self.walk_expr(expr)?.map(ModuleExpr::Unpack),
            };
            Ok(walked.map(Rc::new))
        })
    }

    fn walk_class_decl(&mut self, decl: &ClassDecl) -> Walked<ClassDecl> {
        Ok(self.walk_class_body(&decl.body)?.map(|body| ClassDecl {
            name: decl.name,
            body,
        }))
    }

    pub(super) fn walk_class_body(&mut self, body: &Rc<ClassBody>) -> Walked<Rc<ClassBody>> {
        Ok(change::list(self, &body.fields, Self::walk_class_field)?
            .map(|fields| Rc::new(ClassBody { fields })))
    }

    fn walk_class_field(&mut self, field: &ClassField) -> Walked<ClassField> {
        Ok(match field {
            ClassField::Inherit(_) => Change::Unchanged,
            ClassField::Value {
                name,
                mutable,
                init,
            } => self.walk_expr(init)?.map(|init| ClassField::Value {
                name: *name,
                mutable: *mutable,
                init,
            }),
            ClassField::Method { name, body } => {
                self.walk_expr(body)?.map(|body| ClassField::Method { name: *name, body })
            }
            ClassField::Initializer(expr) => self.walk_expr(expr)?.map(ClassField::Initializer),
        })
    }
}

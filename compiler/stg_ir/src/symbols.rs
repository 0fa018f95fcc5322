//! Symbol information the type checker hands to later passes.
//!
//! Two questions are answered here: at which stage was a binding introduced
//! (0 for ordinary code, `n` for a binder inside `n` nested quotations), and
//! does an entity with a given short name resolve from the universal base
//! scope to the same owner.

use std::fmt;

use rustc_hash::FxHashMap;

use crate::{Ident, IdentScope, Name, Path, StringInterner};

/// The sort of entity a name refers to, for scope lookups and diagnostics.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Value,
    Constructor,
    Field,
    Exception,
    Class,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            EntityKind::Value => "Value",
            EntityKind::Constructor => "Constructor",
            EntityKind::Field => "Field",
            EntityKind::Exception => "Exception",
            EntityKind::Class => "Class",
        })
    }
}

/// Per-unit symbol table.
///
/// Also allocates local identifiers so stamps are unique within the unit; the
/// staging pass continues numbering from [`SymbolTable::next_stamp`].
#[derive(Clone, Debug)]
pub struct SymbolTable {
    stages: FxHashMap<Ident, u32>,
    /// `(kind, short name)` → owner: the owning type for constructors and
    /// fields, the entity's own path otherwise.
    base_scope: FxHashMap<(EntityKind, Name), Path>,
    next_stamp: u32,
}

impl SymbolTable {
    /// An empty table with nothing in the base scope.
    pub fn new() -> Self {
        SymbolTable {
            stages: FxHashMap::default(),
            base_scope: FxHashMap::default(),
            next_stamp: 1,
        }
    }

    /// A table whose base scope holds the builtin constructors and
    /// exceptions every unit can see.
    pub fn with_predef(interner: &StringInterner) -> Self {
        let mut table = SymbolTable::new();
        let option = Path::ident(Ident::predef(interner.intern("option")));
        let list = Path::ident(Ident::predef(interner.intern("list")));

        for (ctor, owner) in [
            ("None", &option),
            ("Some", &option),
            ("[]", &list),
            ("::", &list),
        ] {
            table.add_base_entity(EntityKind::Constructor, interner.intern(ctor), owner.clone());
        }

        for exn in [
            "Not_found",
            "Exit",
            "Failure",
            "Invalid_argument",
            "Division_by_zero",
        ] {
            let name = interner.intern(exn);
            table.add_base_entity(EntityKind::Exception, name, Path::ident(Ident::predef(name)));
        }
        table
    }

    /// Allocate a fresh local identifier bound at `stage`.
    pub fn local(&mut self, name: Name, stage: u32) -> Ident {
        let ident = Ident::new(name, self.next_stamp, IdentScope::Local);
        self.next_stamp += 1;
        self.stages.insert(ident, stage);
        ident
    }

    /// Record the stage of a binding allocated elsewhere.
    pub fn set_stage(&mut self, ident: Ident, stage: u32) {
        self.next_stamp = self.next_stamp.max(ident.stamp + 1);
        self.stages.insert(ident, stage);
    }

    /// Stage at which the binding was introduced. Unrecorded bindings
    /// (persistent units, predef entities) belong to stage 0.
    pub fn stage_of(&self, ident: &Ident) -> u32 {
        self.stages.get(ident).copied().unwrap_or(0)
    }

    pub fn add_base_entity(&mut self, kind: EntityKind, name: Name, owner: Path) {
        self.base_scope.insert((kind, name), owner);
    }

    /// Whether looking up `name` in the base scope finds an entity of `kind`
    /// with the given owner, i.e. the short name alone denotes it.
    pub fn resolves_in_base_scope(&self, kind: EntityKind, name: Name, owner: &Path) -> bool {
        self.base_scope
            .get(&(kind, name))
            .is_some_and(|found| found == owner)
    }

    /// First stamp not used by any identifier this table knows about.
    pub fn next_stamp(&self) -> u32 {
        self.next_stamp
    }
}

impl Default for SymbolTable {
    fn default() -> Self {
        Self::new()
    }
}

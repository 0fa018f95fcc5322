//! Identifiers and access paths.
//!
//! An [`Ident`] is a binding occurrence as resolved by the type checker: the
//! interned source name, a stamp that tells apart shadowed bindings with the
//! same name, and the scope it was bound in. A [`Path`] is an identifier
//! followed by zero or more module member names (`List.map` is the persistent
//! ident `List` followed by `map`).

use smallvec::SmallVec;

use crate::{Name, StringLookup};

/// Where an identifier was bound.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum IdentScope {
    /// Root of a separately compiled unit, loadable from any later stage.
    Persistent,
    /// Part of the universal base scope every unit starts with.
    Predef,
    /// Bound inside the compilation unit being processed.
    Local,
}

/// A resolved binding occurrence.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Ident {
    pub name: Name,
    pub stamp: u32,
    pub scope: IdentScope,
}

impl Ident {
    pub const fn new(name: Name, stamp: u32, scope: IdentScope) -> Self {
        Ident { name, stamp, scope }
    }

    /// Identifier of a separately compiled unit. Units are unique by name.
    pub const fn persistent(name: Name) -> Self {
        Ident::new(name, 0, IdentScope::Persistent)
    }

    /// Identifier from the universal base scope. Unique by name.
    pub const fn predef(name: Name) -> Self {
        Ident::new(name, 0, IdentScope::Predef)
    }

    /// Whether the identifier survives past the current compilation unit.
    #[inline]
    pub const fn is_global(&self) -> bool {
        matches!(self.scope, IdentScope::Persistent | IdentScope::Predef)
    }
}

/// An identifier followed by module member accesses.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Path {
    pub head: Ident,
    pub members: SmallVec<[Name; 2]>,
}

impl Path {
    /// A path consisting of a single identifier.
    pub fn ident(head: Ident) -> Self {
        Path {
            head,
            members: SmallVec::new(),
        }
    }

    /// `head.m1.m2...`
    pub fn dot(head: Ident, members: &[Name]) -> Self {
        Path {
            head,
            members: SmallVec::from_slice(members),
        }
    }

    /// Extend the path with one more member.
    #[must_use]
    pub fn child(&self, member: Name) -> Self {
        let mut members = self.members.clone();
        members.push(member);
        Path {
            head: self.head,
            members,
        }
    }

    /// The final component: the last member, or the head's name.
    pub fn last(&self) -> Name {
        self.members.last().copied().unwrap_or(self.head.name)
    }

    /// Whether the path names a member of a module rather than a bare binding.
    pub fn is_qualified(&self) -> bool {
        !self.members.is_empty()
    }

    /// Replace the final component, keeping the prefix.
    ///
    /// For a bare identifier the head keeps its scope and stamp and only the
    /// name changes, so `with_last` on a predef type path yields a predef path.
    #[must_use]
    pub fn with_last(&self, name: Name) -> Self {
        let mut path = self.clone();
        match path.members.last_mut() {
            Some(last) => *last = name,
            None => path.head.name = name,
        }
        path
    }

    /// Dotted source form, e.g. `Stdlib.List.map`.
    pub fn display(&self, names: &impl StringLookup) -> String {
        let mut out = names.lookup(self.head.name).to_owned();
        for member in &self.members {
            out.push('.');
            out.push_str(names.lookup(*member));
        }
        out
    }
}

#[cfg(test)]
mod tests;

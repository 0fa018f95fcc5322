//! Compile-time identifiers for renamed quotation binders.

use stg_ir::{Ident, IdentScope};

/// Source of fresh local identifiers.
///
/// Starts at the first stamp the symbol table has not handed out, so a fresh
/// identifier never coincides with one produced upstream. Numbering only
/// restarts on an explicit [`NameSupply::reset`].
#[derive(Debug)]
pub struct NameSupply {
    first: u32,
    next: u32,
}

impl NameSupply {
    pub fn starting_at(first: u32) -> Self {
        NameSupply { first, next: first }
    }

    /// A local identifier with the same name as `like` and an unused stamp.
    pub fn fresh(&mut self, like: Ident) -> Ident {
        let stamp = self.next;
        self.next += 1;
        Ident::new(like.name, stamp, IdentScope::Local)
    }

    /// Number of identifiers handed out since the last reset.
    pub fn issued(&self) -> u32 {
        self.next - self.first
    }

    pub fn reset(&mut self) {
        self.next = self.first;
    }
}

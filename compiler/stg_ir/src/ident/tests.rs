use pretty_assertions::assert_eq;

use super::*;
use crate::StringInterner;

#[test]
fn last_of_bare_and_dotted_paths() {
    let interner = StringInterner::new();
    let list = Ident::persistent(interner.intern("List"));
    let map = interner.intern("map");

    assert_eq!(Path::ident(list).last(), list.name);
    assert_eq!(Path::dot(list, &[map]).last(), map);
}

#[test]
fn with_last_substitutes_final_component() {
    let interner = StringInterner::new();
    let tree = Ident::persistent(interner.intern("Tree"));
    let t = interner.intern("t");
    let leaf = interner.intern("Leaf");

    let ty_path = Path::dot(tree, &[t]);
    assert_eq!(ty_path.with_last(leaf), Path::dot(tree, &[leaf]));
}

#[test]
fn with_last_on_bare_ident_keeps_scope() {
    let interner = StringInterner::new();
    let option = Ident::predef(interner.intern("option"));
    let some = interner.intern("Some");

    let path = Path::ident(option).with_last(some);
    assert_eq!(path.head.scope, IdentScope::Predef);
    assert_eq!(path.head.name, some);
    assert!(!path.is_qualified());
}

#[test]
fn display_joins_with_dots() {
    let interner = StringInterner::new();
    let path = Path::dot(
        Ident::persistent(interner.intern("Stdlib")),
        &[interner.intern("List"), interner.intern("map")],
    );
    assert_eq!(path.display(&interner), "Stdlib.List.map");
}

#[test]
fn global_scopes() {
    let interner = StringInterner::new();
    let name = interner.intern("a");
    assert!(Ident::persistent(name).is_global());
    assert!(Ident::predef(name).is_global());
    assert!(!Ident::new(name, 7, IdentScope::Local).is_global());
}

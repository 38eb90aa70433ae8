// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Integration tests for the descriptor model.

use super::*;
use std::collections::HashMap;
use std::sync::Arc;

fn prim(name: &str, full_name: &str) -> Arc<Surface> {
    Arc::new(Surface::new(name, full_name, SurfaceKind::Primitive))
}

fn union_of(left: &Arc<Surface>, right: &Arc<Surface>) -> Arc<Surface> {
    Arc::new(Surface::new(
        naming::compound(left.name(), '|', right.name()),
        naming::compound(left.full_name(), '|', right.full_name()),
        SurfaceKind::Union {
            left: SurfaceRef::resolved(Arc::clone(left)),
            right: SurfaceRef::resolved(Arc::clone(right)),
        },
    ))
}

fn intersection_of(left: &Arc<Surface>, right: &Arc<Surface>) -> Arc<Surface> {
    Arc::new(Surface::new(
        naming::compound(left.name(), '&', right.name()),
        naming::compound(left.full_name(), '&', right.full_name()),
        SurfaceKind::Intersection {
            left: SurfaceRef::resolved(Arc::clone(left)),
            right: SurfaceRef::resolved(Arc::clone(right)),
        },
    ))
}

/// Self-referential product: `Node { next: Node }`.
fn cyclic_node(full_name: &str) -> Arc<Surface> {
    let cell = SurfaceRef::pending();
    let node = Arc::new(Surface::new(
        "Node",
        full_name,
        SurfaceKind::Product {
            params: vec![Parameter::new("next", cell.clone(), false, 0)],
        },
    ));
    assert!(cell.resolve(Arc::clone(&node)));
    node
}

#[test]
fn test_primitive_accessors() {
    let surface = prim("Str", "pkg.Str");
    assert_eq!(surface.name(), "Str");
    assert_eq!(surface.full_name(), "pkg.Str");
    assert!(!surface.is_alias());
    assert!(!surface.is_union());
    assert!(!surface.is_intersection());
    assert!(surface.type_args().is_empty());
    assert!(surface.params().is_empty());
    assert!(surface.as_union().is_none());
    assert!(surface.as_intersection().is_none());
    assert!(surface.as_alias().is_none());
}

#[test]
fn test_union_accessors() {
    let a = prim("A", "pkg.A");
    let b = prim("B", "pkg.B");
    let union = union_of(&a, &b);

    assert_eq!(union.name(), "A|B");
    assert_eq!(union.full_name(), "pkg.A|pkg.B");
    assert!(union.is_union());
    assert!(!union.is_intersection());

    let (left, right) = union.as_union().expect("union operands");
    assert_eq!(left.surface().name(), "A");
    assert_eq!(right.surface().name(), "B");
}

#[test]
fn test_alias_keeps_own_identity() {
    let target = prim("Str", "pkg.Str");
    let alias = Arc::new(Surface::new(
        "Login",
        "auth.Login",
        SurfaceKind::Alias {
            target: SurfaceRef::resolved(Arc::clone(&target)),
        },
    ));

    assert!(alias.is_alias());
    assert_eq!(alias.name(), "Login");
    assert_eq!(alias.full_name(), "auth.Login");
    assert_eq!(alias.as_alias().unwrap().surface().name(), "Str");
    // The alias is a distinct surface, not its target.
    assert_ne!(*alias, *target);
}

#[test]
fn test_union_never_equals_operands() {
    let a = prim("A", "pkg.A");
    let b = prim("B", "pkg.B");
    let union = union_of(&a, &b);

    assert_ne!(*union, *a);
    assert_ne!(*union, *b);
}

#[test]
fn test_union_never_equals_intersection_of_same_operands() {
    let a = prim("A", "pkg.A");
    let b = prim("B", "pkg.B");
    assert_ne!(*union_of(&a, &b), *intersection_of(&a, &b));
}

#[test]
fn test_operand_order_is_significant() {
    let a = prim("A", "pkg.A");
    let b = prim("B", "pkg.B");
    let ab = union_of(&a, &b);
    let ba = union_of(&b, &a);

    assert_eq!(ab.name(), "A|B");
    assert_eq!(ba.name(), "B|A");
    assert_ne!(*ab, *ba);
}

#[test]
fn test_equality_distinguishes_namespaces() {
    // Same short name, different namespace: never equal.
    let one = prim("Id", "users.Id");
    let other = prim("Id", "orders.Id");
    assert_eq!(one.name(), other.name());
    assert_ne!(*one, *other);
}

#[test]
fn test_structural_equality_across_instances() {
    let a1 = prim("A", "pkg.A");
    let a2 = prim("A", "pkg.A");
    let b = prim("B", "pkg.B");

    assert_eq!(*union_of(&a1, &b), *union_of(&a2, &b));
}

#[test]
fn test_parameter_attributes_are_part_of_identity() {
    let int = prim("Int", "pkg.Int");
    let product = |params: Vec<Parameter>| {
        Arc::new(Surface::new(
            "Point",
            "pkg.Point",
            SurfaceKind::Product { params },
        ))
    };
    let field = |name: &str, has_default: bool, position: u32| {
        Parameter::new(name, SurfaceRef::resolved(Arc::clone(&int)), has_default, position)
    };

    let base = product(vec![field("x", false, 0), field("y", false, 1)]);
    let renamed = product(vec![field("x", false, 0), field("z", false, 1)]);
    let defaulted = product(vec![field("x", false, 0), field("y", true, 1)]);

    assert_eq!(*base, *product(vec![field("x", false, 0), field("y", false, 1)]));
    assert_ne!(*base, *renamed);
    assert_ne!(*base, *defaulted);
}

#[test]
fn test_surfaces_work_as_map_keys() {
    let a = prim("A", "pkg.A");
    let b = prim("B", "pkg.B");

    let mut bindings: HashMap<Arc<Surface>, &str> = HashMap::new();
    bindings.insert(Arc::clone(&a), "binding-a");
    bindings.insert(union_of(&a, &b), "binding-union");

    // Lookup through a structurally equal but distinct instance.
    assert_eq!(bindings.get(&prim("A", "pkg.A")), Some(&"binding-a"));
    assert_eq!(bindings.get(&union_of(&a, &b)), Some(&"binding-union"));
    assert_eq!(bindings.get(&intersection_of(&a, &b)), None);
}

#[test]
fn test_cyclic_graphs_compare_equal() {
    let first = cyclic_node("list.Node");
    let second = cyclic_node("list.Node");

    assert_eq!(*first, *second);
    assert_eq!(*first, *first);

    let other = cyclic_node("tree.Node");
    assert_ne!(*first, *other);
}

#[test]
fn test_walk_visits_each_surface_once() {
    let a = prim("A", "pkg.A");
    let b = prim("B", "pkg.B");
    let union = union_of(&a, &b);

    let mut seen = Vec::new();
    union.walk(|surface| seen.push(surface.full_name().to_string()));
    assert_eq!(seen, vec!["pkg.A|pkg.B", "pkg.A", "pkg.B"]);
}

#[test]
fn test_walk_terminates_on_cycles() {
    let node = cyclic_node("list.Node");

    let mut count = 0;
    node.walk(|_| count += 1);
    assert_eq!(count, 1);
}

#[test]
fn test_debug_stays_shallow_on_cycles() {
    let node = cyclic_node("list.Node");
    let rendered = format!("{:?}", node);
    assert!(rendered.contains("list.Node"));
}

#[test]
fn test_display_impls() {
    let a = prim("A", "pkg.A");
    assert_eq!(a.to_string(), "A");

    let param = Parameter::new("first", SurfaceRef::resolved(Arc::clone(&a)), false, 0);
    assert_eq!(param.to_string(), "first: A");
}

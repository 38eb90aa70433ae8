// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Structural equality and hashing for surfaces.
//!
//!
//! Two surfaces are equal iff they are the same variant and all attributes
//! are recursively equal. Equality never keys on the short name alone
//! (two surfaces may share a short name while differing in namespace), so
//! the comparison always covers the fully-qualified name plus the
//! variant-specific payload. A union is never equal to either operand, nor
//! to an intersection built from the same operands.
//!
//! Surface graphs may be cyclic, so the recursion carries a visited set of
//! pointer pairs: a pair seen again is comparing the same two graph
//! positions along a cycle and counts as equal (the disagreement, if any,
//! was already found on the acyclic part of the path).
//!
//! Hashing covers the variant discriminant and the fully-qualified name.
//! Equal surfaces agree on both, so the `Hash`/`Eq` contract holds and
//! surfaces work directly as hash-map keys.

use crate::surface::model::{Surface, SurfaceKind, SurfaceRef};
use std::collections::HashSet;
use std::hash::{Hash, Hasher};
use std::mem;
use std::ptr;

type VisitedPairs = HashSet<(usize, usize)>;

/// Cycle-safe structural equality over two surfaces.
pub(crate) fn surfaces_equal(a: &Surface, b: &Surface) -> bool {
    let mut visited = VisitedPairs::new();
    eq_surfaces(a, b, &mut visited)
}

/// Cycle-safe structural equality over two references.
///
/// An unresolved placeholder equals nothing: placeholders never cross the
/// registry boundary, so comparing one means the caller is inside a
/// construction pass and the answer must be conservative.
pub(crate) fn refs_equal(a: &SurfaceRef, b: &SurfaceRef) -> bool {
    let mut visited = VisitedPairs::new();
    eq_refs(a, b, &mut visited)
}

fn eq_surfaces(a: &Surface, b: &Surface, visited: &mut VisitedPairs) -> bool {
    if ptr::eq(a, b) {
        return true;
    }
    let pair = (a as *const Surface as usize, b as *const Surface as usize);
    if !visited.insert(pair) {
        return true;
    }
    if a.name() != b.name() || a.full_name() != b.full_name() {
        return false;
    }
    match (a.kind(), b.kind()) {
        (SurfaceKind::Primitive, SurfaceKind::Primitive) => true,
        (
            SurfaceKind::Parameterized { args: left },
            SurfaceKind::Parameterized { args: right },
        ) => {
            left.len() == right.len()
                && left
                    .iter()
                    .zip(right)
                    .all(|(x, y)| eq_refs(x, y, visited))
        }
        (SurfaceKind::Product { params: left }, SurfaceKind::Product { params: right }) => {
            left.len() == right.len()
                && left.iter().zip(right).all(|(x, y)| {
                    x.name() == y.name()
                        && x.position() == y.position()
                        && x.has_default() == y.has_default()
                        && eq_refs(x.surface_ref(), y.surface_ref(), visited)
                })
        }
        (SurfaceKind::Alias { target: left }, SurfaceKind::Alias { target: right }) => {
            eq_refs(left, right, visited)
        }
        (
            SurfaceKind::Union {
                left: al,
                right: ar,
            },
            SurfaceKind::Union {
                left: bl,
                right: br,
            },
        )
        | (
            SurfaceKind::Intersection {
                left: al,
                right: ar,
            },
            SurfaceKind::Intersection {
                left: bl,
                right: br,
            },
        ) => eq_refs(al, bl, visited) && eq_refs(ar, br, visited),
        _ => false,
    }
}

fn eq_refs(a: &SurfaceRef, b: &SurfaceRef, visited: &mut VisitedPairs) -> bool {
    match (a.try_surface(), b.try_surface()) {
        (Some(x), Some(y)) => eq_surfaces(x, y, visited),
        _ => false,
    }
}

impl PartialEq for Surface {
    fn eq(&self, other: &Self) -> bool {
        surfaces_equal(self, other)
    }
}

impl Eq for Surface {}

impl Hash for Surface {
    fn hash<H: Hasher>(&self, state: &mut H) {
        mem::discriminant(self.kind()).hash(state);
        self.full_name().hash(state);
    }
}

// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! The descriptor model: [`Surface`], its variants, and [`Parameter`].
//!
//!
//! A `Surface` is the canonical runtime descriptor of one static type.
//! Surfaces are immutable value objects with process-wide shared ownership:
//! created once by the construction pass, interned by the registry, and
//! never mutated or destroyed afterwards. Self-referential types produce
//! cyclic `Arc` graphs; those cycles are intentional and live for the
//! process lifetime, so no `Weak` indirection is used.
//!
//! Child surfaces are held through [`SurfaceRef`], a shared write-once cell.
//! During construction a cell may be an unresolved forward reference (the
//! placeholder that breaks recursion for self-referential types); every cell
//! is back-patched before the owning graph crosses the registry boundary,
//! so consumers only ever observe resolved references.

use crate::surface::equality;
use std::fmt;
use std::sync::{Arc, OnceLock};

/// Canonical runtime descriptor of a static type.
#[derive(Debug)]
pub struct Surface {
    name: String,
    full_name: String,
    kind: SurfaceKind,
}

/// The closed set of surface variants.
#[derive(Debug)]
pub enum SurfaceKind {
    /// Atomic/opaque type, no structure exposed.
    Primitive,
    /// Generic type applied to ordered type arguments.
    Parameterized {
        /// Type arguments in declared order.
        args: Vec<SurfaceRef>,
    },
    /// Record/struct-like type with named constructor parameters.
    Product {
        /// Parameters in declaration order, part of the identity contract.
        params: Vec<Parameter>,
    },
    /// Named alias wrapping a target surface.
    Alias {
        /// The aliased surface.
        target: SurfaceRef,
    },
    /// Type-level "one of".
    Union {
        left: SurfaceRef,
        right: SurfaceRef,
    },
    /// Type-level "all of".
    Intersection {
        left: SurfaceRef,
        right: SurfaceRef,
    },
}

impl Surface {
    pub(crate) fn new(
        name: impl Into<String>,
        full_name: impl Into<String>,
        kind: SurfaceKind,
    ) -> Self {
        Self {
            name: name.into(),
            full_name: full_name.into(),
            kind,
        }
    }

    /// Declared short identifier, independent of the enclosing namespace.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Canonical namespace-qualified identifier. Stable for the process
    /// lifetime and usable as a map key.
    pub fn full_name(&self) -> &str {
        &self.full_name
    }

    /// The concrete variant, for consumers that pattern-match into
    /// compound structure (e.g. a codec generator recursing into a union).
    pub fn kind(&self) -> &SurfaceKind {
        &self.kind
    }

    /// Check if this surface is an alias.
    pub fn is_alias(&self) -> bool {
        matches!(self.kind, SurfaceKind::Alias { .. })
    }

    /// Check if this surface is a union.
    pub fn is_union(&self) -> bool {
        matches!(self.kind, SurfaceKind::Union { .. })
    }

    /// Check if this surface is an intersection.
    pub fn is_intersection(&self) -> bool {
        matches!(self.kind, SurfaceKind::Intersection { .. })
    }

    /// Type arguments in declared order. Empty for non-parameterized
    /// variants.
    pub fn type_args(&self) -> &[SurfaceRef] {
        match &self.kind {
            SurfaceKind::Parameterized { args } => args,
            _ => &[],
        }
    }

    /// Constructor parameters in declaration order. Empty except for
    /// product surfaces.
    pub fn params(&self) -> &[Parameter] {
        match &self.kind {
            SurfaceKind::Product { params } => params,
            _ => &[],
        }
    }

    /// Union operands, if this is a union.
    pub fn as_union(&self) -> Option<(&SurfaceRef, &SurfaceRef)> {
        match &self.kind {
            SurfaceKind::Union { left, right } => Some((left, right)),
            _ => None,
        }
    }

    /// Intersection operands, if this is an intersection.
    pub fn as_intersection(&self) -> Option<(&SurfaceRef, &SurfaceRef)> {
        match &self.kind {
            SurfaceKind::Intersection { left, right } => Some((left, right)),
            _ => None,
        }
    }

    /// Alias target, if this is an alias.
    pub fn as_alias(&self) -> Option<&SurfaceRef> {
        match &self.kind {
            SurfaceKind::Alias { target } => Some(target),
            _ => None,
        }
    }

    /// Child references of this surface, in declared order.
    pub(crate) fn child_refs(&self) -> Vec<&SurfaceRef> {
        match &self.kind {
            SurfaceKind::Primitive => Vec::new(),
            SurfaceKind::Parameterized { args } => args.iter().collect(),
            SurfaceKind::Product { params } => params.iter().map(Parameter::surface_ref).collect(),
            SurfaceKind::Alias { target } => vec![target],
            SurfaceKind::Union { left, right } | SurfaceKind::Intersection { left, right } => {
                vec![left, right]
            }
        }
    }

    /// Scan the reachable graph for an unresolved forward reference.
    ///
    /// Returns the fully-qualified name of the surface holding the open
    /// link, or `None` if the graph is closed. Used by the registry to
    /// reject placeholder leaks at the interning boundary.
    pub(crate) fn find_unresolved(&self) -> Option<String> {
        let mut visited = std::collections::HashSet::new();
        self.find_unresolved_inner(&mut visited)
    }

    fn find_unresolved_inner(
        &self,
        visited: &mut std::collections::HashSet<usize>,
    ) -> Option<String> {
        if !visited.insert(self as *const Surface as usize) {
            return None;
        }
        for child in self.child_refs() {
            match child.try_surface() {
                None => return Some(self.full_name.clone()),
                Some(surface) => {
                    if let Some(owner) = surface.find_unresolved_inner(visited) {
                        return Some(owner);
                    }
                }
            }
        }
        None
    }

    /// Depth-first walk over the reachable surface graph.
    ///
    /// Surface graphs may be cyclic (self-referential types), so the walk
    /// carries a pointer-identity visited set: each surface is visited
    /// exactly once and the traversal always terminates.
    pub fn walk<F: FnMut(&Surface)>(&self, mut f: F) {
        let mut visited = std::collections::HashSet::new();
        self.walk_inner(&mut visited, &mut f);
    }

    fn walk_inner<F: FnMut(&Surface)>(
        &self,
        visited: &mut std::collections::HashSet<usize>,
        f: &mut F,
    ) {
        if !visited.insert(self as *const Surface as usize) {
            return;
        }
        f(self);
        for child in self.child_refs() {
            child.surface().walk_inner(visited, f);
        }
    }
}

impl fmt::Display for Surface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// One constructor parameter of a product surface.
///
/// Owned exclusively by its enclosing product. Name, position, and the
/// has-default flag are part of the product's identity contract: field
/// order must round-trip for serialization consumers.
#[derive(Debug, Clone)]
pub struct Parameter {
    name: String,
    surface: SurfaceRef,
    has_default: bool,
    position: u32,
}

impl Parameter {
    pub(crate) fn new(
        name: impl Into<String>,
        surface: SurfaceRef,
        has_default: bool,
        position: u32,
    ) -> Self {
        Self {
            name: name.into(),
            surface,
            has_default,
            position,
        }
    }

    /// Declared parameter name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The parameter's surface.
    pub fn surface(&self) -> &Arc<Surface> {
        self.surface.surface()
    }

    /// Whether the declaration carries a default value.
    pub fn has_default(&self) -> bool {
        self.has_default
    }

    /// Ordinal position in the constructor, 0-based.
    pub fn position(&self) -> u32 {
        self.position
    }

    pub(crate) fn surface_ref(&self) -> &SurfaceRef {
        &self.surface
    }
}

impl fmt::Display for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.name, self.surface.surface().name())
    }
}

impl PartialEq for Parameter {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
            && self.position == other.position
            && self.has_default == other.has_default
            && self.surface == other.surface
    }
}

impl Eq for Parameter {}

/// Shared reference to a child surface.
///
/// A write-once cell: resolved immediately for ordinary children, created
/// empty as the placeholder for a type under construction and back-patched
/// when the enclosing construction completes. Cloning shares the cell, so
/// every holder of a placeholder observes the back-patch.
#[derive(Clone)]
pub struct SurfaceRef {
    cell: Arc<OnceLock<Arc<Surface>>>,
}

impl SurfaceRef {
    /// Reference to an already-built surface.
    pub(crate) fn resolved(surface: Arc<Surface>) -> Self {
        let cell = OnceLock::new();
        let _ = cell.set(surface);
        Self {
            cell: Arc::new(cell),
        }
    }

    /// Empty forward reference for a type under construction.
    pub(crate) fn pending() -> Self {
        Self {
            cell: Arc::new(OnceLock::new()),
        }
    }

    /// Back-patch the cell. Returns `false` if it was already resolved.
    pub(crate) fn resolve(&self, surface: Arc<Surface>) -> bool {
        self.cell.set(surface).is_ok()
    }

    /// Non-panicking probe, for closure verification during construction.
    pub(crate) fn try_surface(&self) -> Option<&Arc<Surface>> {
        self.cell.get()
    }

    /// The referenced surface.
    ///
    /// # Panics
    ///
    /// Panics if the cell is still an unresolved placeholder. The registry
    /// verifies closure before any surface is exposed, so this is
    /// unreachable for surfaces obtained through `surface_of`; hitting it
    /// means an internal construction bug.
    pub fn surface(&self) -> &Arc<Surface> {
        self.cell
            .get()
            .expect("surface placeholder left unresolved (internal construction bug)")
    }
}

impl fmt::Debug for SurfaceRef {
    // Shallow on purpose: cyclic graphs must not recurse through Debug.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.cell.get() {
            Some(surface) => write!(f, "SurfaceRef({})", surface.full_name()),
            None => f.write_str("SurfaceRef(<pending>)"),
        }
    }
}

impl PartialEq for SurfaceRef {
    fn eq(&self, other: &Self) -> bool {
        equality::refs_equal(self, other)
    }
}

impl Eq for SurfaceRef {}

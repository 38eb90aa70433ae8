// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! The descriptor model: surfaces, parameters, naming, and equality.
//!
//!
//! A [`Surface`] describes the shape of one static type: its name, its
//! generic arguments, its constructor parameters, and, for compound types,
//! its constituent operands. Surfaces form a closed variant set
//! ([`SurfaceKind`]): primitive, parameterized, product, alias, union, and
//! intersection. They are immutable, registry-owned, and safe to use as
//! hash-map keys.
//!
//! Graphs reachable from a surface may be cyclic (self-referential types).
//! Consumers walking surfaces recursively must guard with a visited set;
//! [`Surface::walk`] does exactly that.
//!
//! # Example
//!
//! ```
//! use surtype::{SurfaceRegistry, TypeNode};
//!
//! let registry = SurfaceRegistry::new();
//! let node = TypeNode::union(
//!     TypeNode::primitive("Str", "demo.Str"),
//!     TypeNode::primitive("Num", "demo.Num"),
//! );
//!
//! let surface = registry.surface_of(&node).unwrap();
//! assert!(surface.is_union());
//! assert_eq!(surface.name(), "Str|Num");
//! let (left, _right) = surface.as_union().unwrap();
//! assert_eq!(left.surface().name(), "Str");
//! ```

mod equality;
mod model;
pub mod naming;

#[cfg(test)]
mod tests;

pub use model::{Parameter, Surface, SurfaceKind, SurfaceRef};

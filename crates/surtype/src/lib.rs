// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! # surtype - Runtime Type-Descriptor Engine
//!
//! Turns statically known types, described by a build-time extractor as
//! structural trees, into canonical, inspectable **surfaces**. Downstream
//! systems (a dependency-injection container, a codec generator, an RPC
//! schema generator) key behavior off surfaces instead of live language
//! reflection, because surfaces are comparable, hashable, and constructed
//! exactly once per distinct static type regardless of how many call sites
//! request them.
//!
//! ## Quick Start
//!
//! ```
//! use surtype::{surface_of, TypeNode, ParamNode};
//!
//! // What a build-time extractor reports for `Sensor(id: Id, label: Str)`.
//! let node = TypeNode::product(
//!     "Sensor",
//!     "demo.Sensor",
//!     vec![
//!         ParamNode::new("id", TypeNode::primitive("Id", "demo.Id")),
//!         ParamNode::new("label", TypeNode::primitive("Str", "demo.Str")).with_default(),
//!     ],
//! );
//!
//! let sensor = surface_of(&node).unwrap();
//! assert_eq!(sensor.full_name(), "demo.Sensor");
//! assert_eq!(sensor.params()[1].name(), "label");
//! assert!(sensor.params()[1].has_default());
//!
//! // Second request: same canonical instance.
//! let again = surface_of(&node).unwrap();
//! assert!(std::sync::Arc::ptr_eq(&sensor, &again));
//! ```
//!
//! ## Architecture
//!
//! ```text
//! +--------------------------------------------------------------+
//! |                   Consumers (DI, codecs, RPC)                |
//! |        equality / hashing / accessors / pattern match        |
//! +--------------------------------------------------------------+
//! |  SurfaceRegistry   canonical store, compute-if-absent,       |
//! |                    per-key build locks, stats                |
//! +--------------------------------------------------------------+
//! |  BuildPass         normalization: recursion, placeholders,   |
//! |                    cycle back-patching, deferred interning   |
//! +--------------------------------------------------------------+
//! |  TypeNode          extractor contract (desugared type trees) |
//! +--------------------------------------------------------------+
//! ```
//!
//! ## Key Types
//!
//! | Type | Description |
//! |------|-------------|
//! | [`Surface`] | Canonical runtime descriptor of one static type |
//! | [`SurfaceKind`] | Closed variant set: primitive, parameterized, product, alias, union, intersection |
//! | [`Parameter`] | Named constructor parameter of a product surface |
//! | [`TypeNode`] | Structural tree supplied by the build-time extractor |
//! | [`SurfaceRegistry`] | Process-wide canonical store (`surface_of`) |
//! | [`IdentityKey`] | Canonical cache key (the qualified name) |
//!
//! ## Compound types
//!
//! Unions (`A|B`) and intersections (`A&B`) keep their operands in source
//! declaration order; their names join the operand names with the
//! combinator operator and are never normalized or sorted. Self-referential
//! types build cyclic surface graphs; cycles are closed before a surface
//! is ever returned, and [`Surface::walk`] traverses them safely.
//!
//! ## Modules Overview
//!
//! - [`surface`] - The descriptor model (start here)
//! - [`build`] - Extractor input contract and construction algorithm
//! - [`registry`] - Canonical store and the `surface_of` entry point
//! - [`identity`] - Identity keys for deduplication
//! - [`errors`] - Failure taxonomy

/// Construction of surfaces from extractor type trees.
pub mod build;
/// Error taxonomy for construction and registry operations.
pub mod errors;
/// Identity keys for surface deduplication.
pub mod identity;
/// Process-wide canonical surface store.
pub mod registry;
/// The descriptor model: surfaces, parameters, naming, equality.
pub mod surface;

pub use build::{ParamNode, TypeNode};
pub use errors::{Result, SurfaceError};
pub use identity::IdentityKey;
pub use registry::{global, surface_of, RegistryStats, SurfaceRegistry};
pub use surface::{Parameter, Surface, SurfaceKind, SurfaceRef};

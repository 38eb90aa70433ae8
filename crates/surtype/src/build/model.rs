// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Extractor input model for surface construction.
//!
//!
//! Defines [`TypeNode`] and [`ParamNode`], the structural tree a build-time
//! type extractor supplies for each statically-named type. The tree arrives
//! already desugared: alias chains are explicit `Alias` nodes, generic
//! instantiations carry explicit argument lists, product types carry their
//! constructor parameters in declaration order, and combinators carry their
//! operands in source order.
//!
//! Self-referential and mutually-recursive type graphs are expressed with
//! [`TypeNode::Ref`]: at the point where a type's structure would recurse
//! into a type already being described, the extractor emits a reference by
//! qualified name instead of expanding the definition again.

use crate::errors::Result;
use crate::surface::naming;

/// Structural description of one static type, as reported by the extractor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeNode {
    /// An atomic/opaque type with no exposed structure.
    Primitive {
        /// Declared short identifier.
        name: String,
        /// Namespace-qualified identifier.
        full_name: String,
    },

    /// A generic type applied to an ordered list of type arguments.
    Generic {
        name: String,
        full_name: String,
        /// Type arguments in declared order, never sorted.
        args: Vec<TypeNode>,
    },

    /// A record/struct-like type built from named constructor parameters.
    Product {
        name: String,
        full_name: String,
        /// Constructor parameters in declaration order.
        params: Vec<ParamNode>,
    },

    /// A named alias for another type. The alias keeps its own declared
    /// name, distinct from the target's.
    Alias {
        name: String,
        full_name: String,
        target: Box<TypeNode>,
    },

    /// Type-level "one of". Operand order is source declaration order.
    Union {
        left: Box<TypeNode>,
        right: Box<TypeNode>,
    },

    /// Type-level "all of". Operand order is source declaration order.
    Intersection {
        left: Box<TypeNode>,
        right: Box<TypeNode>,
    },

    /// Reference by identity to a type that is currently under construction
    /// (a recursive back-edge) or already registered.
    Ref {
        name: String,
        full_name: String,
    },

    /// A shape the extractor could not fully resolve (e.g. a higher-kinded
    /// or erased parameter). Always fails construction: silently degrading
    /// to an opaque primitive would break downstream codec/DI correctness.
    Unresolved {
        /// Extractor-supplied description of the offending shape.
        detail: String,
    },
}

impl TypeNode {
    /// Primitive type node.
    pub fn primitive(name: impl Into<String>, full_name: impl Into<String>) -> Self {
        Self::Primitive {
            name: name.into(),
            full_name: full_name.into(),
        }
    }

    /// Generic application node with ordered type arguments.
    pub fn generic(
        name: impl Into<String>,
        full_name: impl Into<String>,
        args: Vec<TypeNode>,
    ) -> Self {
        Self::Generic {
            name: name.into(),
            full_name: full_name.into(),
            args,
        }
    }

    /// Product type node with ordered constructor parameters.
    pub fn product(
        name: impl Into<String>,
        full_name: impl Into<String>,
        params: Vec<ParamNode>,
    ) -> Self {
        Self::Product {
            name: name.into(),
            full_name: full_name.into(),
            params,
        }
    }

    /// Alias node wrapping a target type.
    pub fn alias(
        name: impl Into<String>,
        full_name: impl Into<String>,
        target: TypeNode,
    ) -> Self {
        Self::Alias {
            name: name.into(),
            full_name: full_name.into(),
            target: Box::new(target),
        }
    }

    /// Union combinator node.
    pub fn union(left: TypeNode, right: TypeNode) -> Self {
        Self::Union {
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    /// Intersection combinator node.
    pub fn intersection(left: TypeNode, right: TypeNode) -> Self {
        Self::Intersection {
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    /// Back-reference to a type under construction or already registered.
    pub fn reference(name: impl Into<String>, full_name: impl Into<String>) -> Self {
        Self::Ref {
            name: name.into(),
            full_name: full_name.into(),
        }
    }

    /// Unresolvable shape marker.
    pub fn unresolved(detail: impl Into<String>) -> Self {
        Self::Unresolved {
            detail: detail.into(),
        }
    }

    /// Short, human-readable name this node will produce.
    ///
    /// Delegates to the naming rules; fails for [`TypeNode::Unresolved`].
    pub fn name(&self) -> Result<String> {
        naming::node_name(self)
    }

    /// Canonical fully-qualified name this node will produce.
    pub fn full_name(&self) -> Result<String> {
        naming::node_full_name(self)
    }
}

/// One constructor parameter of a product type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParamNode {
    /// Declared parameter name.
    pub name: String,
    /// The parameter's type.
    pub ty: TypeNode,
    /// Whether the declaration carries a default value.
    pub has_default: bool,
}

impl ParamNode {
    /// Parameter without a default value.
    pub fn new(name: impl Into<String>, ty: TypeNode) -> Self {
        Self {
            name: name.into(),
            ty,
            has_default: false,
        }
    }

    /// Mark the parameter as carrying a default value.
    #[must_use]
    pub fn with_default(mut self) -> Self {
        self.has_default = true;
        self
    }
}

// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Identity keys for surface deduplication.
//!
//!
//! An [`IdentityKey`] is the canonical string under which a surface is
//! stored in the registry. It is exactly the surface's canonical
//! fully-qualified name: nominal types use their qualified identifier,
//! generic applications append the argument keys (`pkg.List<pkg.String>`),
//! and compound types join their operand keys with the combinator operator
//! (`pkg.A|pkg.B`, `pkg.A&pkg.B`).
//!
//! Keys are computed from the extractor tree *before* the structural build,
//! so registry lookups stay cheap even when construction is not.

use crate::build::TypeNode;
use crate::errors::Result;
use crate::surface::naming;
use std::fmt;
use std::sync::Arc;

/// Canonical cache key for one static type.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct IdentityKey(Arc<str>);

impl IdentityKey {
    /// Compute the key for an extractor tree.
    ///
    /// Fails with `UnsupportedShape` if the tree contains a shape the
    /// construction algorithm would reject anyway, so callers never pay for
    /// a doomed build.
    pub fn of(node: &TypeNode) -> Result<Self> {
        Ok(Self(naming::node_full_name(node)?.into()))
    }

    /// Key from an already-canonical fully-qualified name.
    pub fn from_full_name(full_name: impl AsRef<str>) -> Self {
        Self(Arc::from(full_name.as_ref()))
    }

    /// The canonical string form.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for IdentityKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Debug for IdentityKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "IdentityKey({})", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::build::ParamNode;

    fn prim(name: &str) -> TypeNode {
        TypeNode::primitive(name, format!("pkg.{}", name))
    }

    #[test]
    fn test_nominal_key_is_qualified_name() {
        let product = TypeNode::product(
            "Person",
            "pkg.Person",
            vec![ParamNode::new("name", prim("String"))],
        );
        assert_eq!(IdentityKey::of(&product).unwrap().as_str(), "pkg.Person");
    }

    #[test]
    fn test_generic_key_includes_argument_keys() {
        let node = TypeNode::generic("List", "pkg.List", vec![prim("String")]);
        assert_eq!(
            IdentityKey::of(&node).unwrap().as_str(),
            "pkg.List<pkg.String>"
        );
    }

    #[test]
    fn test_compound_keys_preserve_operand_order() {
        let ab = TypeNode::union(prim("A"), prim("B"));
        let ba = TypeNode::union(prim("B"), prim("A"));
        let key_ab = IdentityKey::of(&ab).unwrap();
        let key_ba = IdentityKey::of(&ba).unwrap();
        assert_eq!(key_ab.as_str(), "pkg.A|pkg.B");
        assert_ne!(key_ab, key_ba);
    }

    #[test]
    fn test_union_and_intersection_keys_differ() {
        let union = IdentityKey::of(&TypeNode::union(prim("A"), prim("B"))).unwrap();
        let inter = IdentityKey::of(&TypeNode::intersection(prim("A"), prim("B"))).unwrap();
        assert_ne!(union, inter);
    }

    #[test]
    fn test_key_equality_and_hash() {
        use std::collections::HashMap;

        let a = IdentityKey::of(&prim("A")).unwrap();
        let b = IdentityKey::from_full_name("pkg.A");
        assert_eq!(a, b);

        let mut map = HashMap::new();
        map.insert(a, 1u32);
        assert_eq!(map.get(&b), Some(&1));
    }

    #[test]
    fn test_unresolved_yields_no_key() {
        assert!(IdentityKey::of(&TypeNode::unresolved("erased")).is_err());
    }
}

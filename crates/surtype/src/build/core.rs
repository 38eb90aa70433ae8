// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! The construction pass: extractor trees to canonical surface graphs.
//!
//!
//! One [`BuildPass`] normalizes one extractor tree into a [`Surface`]
//! graph. Compounds recurse through their operands, generics through their
//! ordered arguments, products through their ordered parameters, aliases
//! wrap their pre-built target.
//!
//! Cycle handling: before recursing into a nominal type's own structure
//! (products and aliases, the shapes a [`TypeNode::Ref`] can name), the
//! pass registers a placeholder cell under the type's identity key. A
//! re-entry on the same key returns the shared cell instead of recursing
//! again, and the cell is back-patched with the finished surface the moment
//! the outer construction completes, *before* anything is interned. The
//! resulting graph may be cyclic; it is never unresolved.
//!
//! Interning is deferred to the end of the pass, children before root, so a
//! failed construction leaves the registry untouched.

use crate::build::{ParamNode, TypeNode};
use crate::errors::{Result, SurfaceError};
use crate::identity::IdentityKey;
use crate::registry::SurfaceRegistry;
use crate::surface::{Parameter, Surface, SurfaceKind, SurfaceRef};
use std::collections::HashMap;
use std::sync::Arc;

/// Single-use normalization pass over one extractor tree.
pub(crate) struct BuildPass<'r> {
    registry: &'r SurfaceRegistry,
    /// Placeholder cells for nominal types currently being built.
    pending: HashMap<IdentityKey, SurfaceRef>,
    /// Pass-local memo: a type appearing several times in one tree
    /// resolves to one instance.
    done: HashMap<IdentityKey, SurfaceRef>,
    /// Finished surfaces in completion order (children before parents).
    completed: Vec<(IdentityKey, Arc<Surface>)>,
}

impl<'r> BuildPass<'r> {
    pub(crate) fn new(registry: &'r SurfaceRegistry) -> Self {
        Self {
            registry,
            pending: HashMap::new(),
            done: HashMap::new(),
            completed: Vec::new(),
        }
    }

    /// Normalize `node` and intern every surface the pass produced.
    ///
    /// Returns the canonical (registry-owned) root surface.
    pub(crate) fn run(mut self, node: &TypeNode) -> Result<Arc<Surface>> {
        let root_ref = self.build(node)?;

        // Recursion is a stack: every placeholder this pass registered has
        // been back-patched by the time the root returns.
        let root = Arc::clone(root_ref.surface());
        let mut canonical_root = Arc::clone(&root);
        let completed = std::mem::take(&mut self.completed);
        for (key, surface) in completed {
            let interned = self.registry.intern(&key, Arc::clone(&surface))?;
            if Arc::ptr_eq(&surface, &root) {
                canonical_root = interned;
            }
        }
        Ok(canonical_root)
    }

    fn build(&mut self, node: &TypeNode) -> Result<SurfaceRef> {
        let key = IdentityKey::of(node)?;

        // Re-entry on a type currently being built: hand back its
        // placeholder instead of recursing forever.
        if let Some(placeholder) = self.pending.get(&key) {
            return Ok(placeholder.clone());
        }
        if let Some(done) = self.done.get(&key) {
            return Ok(done.clone());
        }
        // Already canonical from an earlier construction.
        if let Some(existing) = self.registry.get(&key) {
            let resolved = SurfaceRef::resolved(existing);
            self.done.insert(key, resolved.clone());
            return Ok(resolved);
        }

        match node {
            TypeNode::Primitive { name, .. } => {
                let surface = Surface::new(name.clone(), key.as_str(), SurfaceKind::Primitive);
                Ok(self.finish(key, surface))
            }
            TypeNode::Generic { args, .. } => {
                let args = args
                    .iter()
                    .map(|arg| self.build(arg))
                    .collect::<Result<Vec<_>>>()?;
                let surface = Surface::new(
                    node.name()?,
                    key.as_str(),
                    SurfaceKind::Parameterized { args },
                );
                Ok(self.finish(key, surface))
            }
            TypeNode::Union { left, right } => {
                let left = self.build(left)?;
                let right = self.build(right)?;
                let surface = Surface::new(
                    node.name()?,
                    key.as_str(),
                    SurfaceKind::Union { left, right },
                );
                Ok(self.finish(key, surface))
            }
            TypeNode::Intersection { left, right } => {
                let left = self.build(left)?;
                let right = self.build(right)?;
                let surface = Surface::new(
                    node.name()?,
                    key.as_str(),
                    SurfaceKind::Intersection { left, right },
                );
                Ok(self.finish(key, surface))
            }
            TypeNode::Product { name, params, .. } => {
                let placeholder = self.open_placeholder(&key);
                let params = self.build_params(params);
                self.pending.remove(&key);
                let surface = Surface::new(
                    name.clone(),
                    key.as_str(),
                    SurfaceKind::Product { params: params? },
                );
                Ok(self.close_placeholder(key, placeholder, surface))
            }
            TypeNode::Alias { name, target, .. } => {
                let placeholder = self.open_placeholder(&key);
                let target = self.build(target);
                self.pending.remove(&key);
                let surface = Surface::new(
                    name.clone(),
                    key.as_str(),
                    SurfaceKind::Alias { target: target? },
                );
                Ok(self.close_placeholder(key, placeholder, surface))
            }
            TypeNode::Ref { full_name, .. } => {
                // pending, memo, and registry all missed.
                Err(SurfaceError::UnsupportedShape {
                    detail: format!("dangling reference to '{}'", full_name),
                })
            }
            // Key computation already rejected this shape.
            TypeNode::Unresolved { detail } => Err(SurfaceError::UnsupportedShape {
                detail: detail.clone(),
            }),
        }
    }

    fn build_params(&mut self, params: &[ParamNode]) -> Result<Vec<Parameter>> {
        params
            .iter()
            .enumerate()
            .map(|(position, param)| {
                let surface = self.build(&param.ty)?;
                Ok(Parameter::new(
                    param.name.clone(),
                    surface,
                    param.has_default,
                    position as u32,
                ))
            })
            .collect()
    }

    fn open_placeholder(&mut self, key: &IdentityKey) -> SurfaceRef {
        let placeholder = SurfaceRef::pending();
        self.pending.insert(key.clone(), placeholder.clone());
        log::debug!("[build] placeholder registered for {}", key);
        placeholder
    }

    /// Back-patch a nominal type's placeholder and record the result.
    fn close_placeholder(
        &mut self,
        key: IdentityKey,
        placeholder: SurfaceRef,
        surface: Surface,
    ) -> SurfaceRef {
        let surface = Arc::new(surface);
        let fresh = placeholder.resolve(Arc::clone(&surface));
        debug_assert!(fresh, "placeholder back-patched twice");
        log::debug!("[build] back-patched {}", key);
        self.completed.push((key.clone(), surface));
        self.done.insert(key, placeholder.clone());
        placeholder
    }

    fn finish(&mut self, key: IdentityKey, surface: Surface) -> SurfaceRef {
        let surface = Arc::new(surface);
        self.completed.push((key.clone(), Arc::clone(&surface)));
        let resolved = SurfaceRef::resolved(surface);
        self.done.insert(key, resolved.clone());
        resolved
    }
}

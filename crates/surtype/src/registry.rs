// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Process-wide canonical store for surfaces.
//!
//!
//! The registry guarantees that two requests for the same static type yield
//! descriptor instances that are both structurally equal and
//! reference-identical, and that concurrent first-time construction of the
//! same type is not duplicated.
//!
//! ## Concurrency
//!
//! - **Reads**: sharded lock-free lookups (`DashMap`), no global lock.
//! - **First construction**: a per-key build lock makes the builder run
//!   once per identity key; latecomers block briefly and join the winner's
//!   instance. Unrelated keys never serialize against each other.
//! - **Interning**: insert-if-absent. A racing loser adopts the canonical
//!   instance and its local graph is discarded. Same-key collisions with
//!   structurally different trees are surfaced as `InconsistentIdentity`,
//!   never silently overwritten.
//!
//! A surface returned from the registry is always a complete graph: for
//! self-referential types, a graph whose internal cycles are already
//! closed. Interning verifies closure and rejects placeholder leaks.
//!
//! Surfaces are never evicted; the registry owns them for the process
//! lifetime.

use crate::build::core::BuildPass;
use crate::build::TypeNode;
use crate::errors::{Result, SurfaceError};
use crate::identity::IdentityKey;
use crate::surface::Surface;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, OnceLock};

/// Concurrency-safe, insert-only store of canonical surfaces.
pub struct SurfaceRegistry {
    /// Canonical surfaces by identity key (sharded, lock-free reads).
    surfaces: DashMap<IdentityKey, Arc<Surface>>,
    /// Per-key build locks; an entry lives only while a build is running.
    build_locks: Mutex<HashMap<IdentityKey, Arc<Mutex<()>>>>,
    hits: AtomicU64,
    misses: AtomicU64,
    builds: AtomicU64,
}

/// Point-in-time registry counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegistryStats {
    /// Canonical surfaces currently stored.
    pub surfaces: usize,
    /// Lookups answered from the store.
    pub hits: u64,
    /// Lookups that found no entry.
    pub misses: u64,
    /// Builder invocations (first-time constructions, including retries
    /// after failed constructions).
    pub builds: u64,
}

impl SurfaceRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            surfaces: DashMap::new(),
            build_locks: Mutex::new(HashMap::new()),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
            builds: AtomicU64::new(0),
        }
    }

    /// Create an empty registry sized for roughly `capacity` types.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            surfaces: DashMap::with_capacity(capacity),
            ..Self::new()
        }
    }

    /// The sole construction entry point: canonical surface for an
    /// extractor tree.
    ///
    /// Idempotent per identity key: repeated calls return the same
    /// `Arc`, so the result is directly usable as a hash-map key with
    /// pointer-fast comparisons.
    pub fn surface_of(&self, node: &TypeNode) -> Result<Arc<Surface>> {
        let key = IdentityKey::of(node)?;
        self.get_or_create(key, || BuildPass::new(self).run(node))
    }

    /// Insert-if-absent-else-join: return the surface for `key`, invoking
    /// `builder` only if no entry exists.
    ///
    /// Concurrent calls on the same key do not duplicate the build: one
    /// builder wins while the others block on the key's build lock and
    /// adopt its result. Construction runs outside the store's shards, so
    /// unrelated keys build in parallel. A failed build caches nothing.
    pub fn get_or_create<F>(&self, key: IdentityKey, builder: F) -> Result<Arc<Surface>>
    where
        F: FnOnce() -> Result<Arc<Surface>>,
    {
        if let Some(existing) = self.get(&key) {
            self.hits.fetch_add(1, Ordering::Relaxed);
            log::trace!("[registry] hit for {}", key);
            return Ok(existing);
        }
        self.misses.fetch_add(1, Ordering::Relaxed);

        let lock = self.acquire_build_lock(&key);
        let _guard = lock.lock();

        // Lost the race to an earlier builder: join its result.
        if let Some(existing) = self.get(&key) {
            return Ok(existing);
        }

        self.builds.fetch_add(1, Ordering::Relaxed);
        log::debug!("[registry] building {}", key);
        let result = builder().and_then(|surface| self.intern(&key, surface));
        self.release_build_lock(&key);
        result
    }

    /// Raw lookup by identity key. Does not touch the hit/miss counters.
    pub fn get(&self, key: &IdentityKey) -> Option<Arc<Surface>> {
        self.surfaces.get(key).map(|entry| Arc::clone(entry.value()))
    }

    /// Whether a surface is registered under `key`.
    pub fn contains(&self, key: &IdentityKey) -> bool {
        self.surfaces.contains_key(key)
    }

    /// Number of canonical surfaces stored.
    pub fn len(&self) -> usize {
        self.surfaces.len()
    }

    /// Returns `true` if no surfaces are stored.
    pub fn is_empty(&self) -> bool {
        self.surfaces.is_empty()
    }

    /// Snapshot of the registry counters.
    pub fn stats(&self) -> RegistryStats {
        RegistryStats {
            surfaces: self.surfaces.len(),
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            builds: self.builds.load(Ordering::Relaxed),
        }
    }

    /// Store `surface` under `key` unless an entry exists; either way,
    /// return the canonical instance.
    ///
    /// Rejects placeholder leaks (`CycleUnresolved`) and same-key entries
    /// with different structure (`InconsistentIdentity`).
    pub(crate) fn intern(&self, key: &IdentityKey, surface: Arc<Surface>) -> Result<Arc<Surface>> {
        let existing = self.surfaces.get(key).map(|entry| Arc::clone(entry.value()));
        if let Some(existing) = existing {
            return self.check_consistent(key, existing, &surface);
        }

        if let Some(owner) = surface.find_unresolved() {
            return Err(SurfaceError::CycleUnresolved { full_name: owner });
        }

        match self.surfaces.entry(key.clone()) {
            Entry::Occupied(entry) => {
                let existing = Arc::clone(entry.get());
                drop(entry);
                self.check_consistent(key, existing, &surface)
            }
            Entry::Vacant(entry) => {
                entry.insert(Arc::clone(&surface));
                log::debug!("[registry] interned {}", key);
                Ok(surface)
            }
        }
    }

    fn check_consistent(
        &self,
        key: &IdentityKey,
        existing: Arc<Surface>,
        candidate: &Arc<Surface>,
    ) -> Result<Arc<Surface>> {
        if Arc::ptr_eq(&existing, candidate) || *existing == **candidate {
            Ok(existing)
        } else {
            log::warn!("[registry] identity collision on {}", key);
            Err(SurfaceError::InconsistentIdentity {
                key: key.to_string(),
            })
        }
    }

    fn acquire_build_lock(&self, key: &IdentityKey) -> Arc<Mutex<()>> {
        let mut locks = self.build_locks.lock();
        Arc::clone(
            locks
                .entry(key.clone())
                .or_insert_with(|| Arc::new(Mutex::new(()))),
        )
    }

    fn release_build_lock(&self, key: &IdentityKey) {
        let mut locks = self.build_locks.lock();
        locks.remove(key);
    }
}

impl Default for SurfaceRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Process-global registry backing the free [`surface_of`].
pub fn global() -> &'static SurfaceRegistry {
    static GLOBAL: OnceLock<SurfaceRegistry> = OnceLock::new();
    GLOBAL.get_or_init(SurfaceRegistry::new)
}

/// Canonical surface for an extractor tree, via the process-global
/// registry.
pub fn surface_of(node: &TypeNode) -> Result<Arc<Surface>> {
    global().surface_of(node)
}

// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Error types for surface construction and registry operations.
//!
//!
//! Defines [`SurfaceError`] for failures while turning extractor type trees
//! into canonical surfaces. Construction failures propagate synchronously to
//! the caller and are never cached; a later retry with a corrected
//! extractor tree may succeed.

use std::fmt;

/// Result type for surface operations
pub type Result<T> = std::result::Result<T, SurfaceError>;

/// Failures while constructing or registering a surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SurfaceError {
    /// The extractor supplied a type tree the construction algorithm cannot
    /// interpret (e.g. an unresolved higher-kinded parameter, or a reference
    /// to a type that is neither under construction nor registered).
    UnsupportedShape {
        /// What the extractor handed us, for diagnostics.
        detail: String,
    },

    /// Two constructions reported the same identity key but structurally
    /// different trees (an extractor bug or a genuine namespace collision).
    /// The cached entry is left untouched.
    InconsistentIdentity {
        /// The colliding identity key.
        key: String,
    },

    /// A forward-reference placeholder reached the registry boundary
    /// unresolved. Internal invariant violation, not a normal error path.
    CycleUnresolved {
        /// Fully-qualified name of the surface holding the open link.
        full_name: String,
    },
}

impl fmt::Display for SurfaceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnsupportedShape { detail } => {
                write!(f, "unsupported type shape: {}", detail)
            }
            Self::InconsistentIdentity { key } => {
                write!(f, "inconsistent identity: key '{}' maps to structurally different types", key)
            }
            Self::CycleUnresolved { full_name } => {
                write!(f, "unresolved cycle placeholder in '{}' (internal construction bug)", full_name)
            }
        }
    }
}

impl std::error::Error for SurfaceError {}

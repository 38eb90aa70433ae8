// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Naming rules for surfaces.
//!
//!
//! Pure, side-effect-free computation of short names and canonical
//! fully-qualified names from extractor type trees. The fully-qualified
//! rendering doubles as the registry identity key, so it must be
//! deterministic and must **not** sort or otherwise normalize operand
//! order; order is source-declaration order and is significant for
//! reproducibility of generated names.
//!
//! | Shape | `name` | `full_name` |
//! |-------|--------|-------------|
//! | Primitive / Product / Alias / Ref | declared identifier | qualified identifier |
//! | Generic `G<X,Y>` | `G<X,Y>` | `pkg.G<pkg.X,pkg.Y>` |
//! | Union | `left\|right` | `left\|right` (qualified) |
//! | Intersection | `left&right` | `left&right` (qualified) |

use crate::build::TypeNode;
use crate::errors::{Result, SurfaceError};

/// Union combinator operator.
pub(crate) const UNION_OP: char = '|';

/// Intersection combinator operator.
pub(crate) const INTERSECTION_OP: char = '&';

/// Join two operand renderings with a combinator operator.
pub(crate) fn compound(left: &str, op: char, right: &str) -> String {
    let mut out = String::with_capacity(left.len() + right.len() + 1);
    out.push_str(left);
    out.push(op);
    out.push_str(right);
    out
}

/// Render a generic application over already-rendered arguments.
///
/// Zero-argument applications render as the bare base identifier.
pub(crate) fn applied(base: &str, args: &[String]) -> String {
    if args.is_empty() {
        return base.to_string();
    }
    let mut out = String::with_capacity(base.len() + 2);
    out.push_str(base);
    out.push('<');
    for (i, arg) in args.iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        out.push_str(arg);
    }
    out.push('>');
    out
}

/// Short name a node will produce, independent of its enclosing namespace.
pub fn node_name(node: &TypeNode) -> Result<String> {
    render(node, false)
}

/// Canonical fully-qualified name a node will produce.
///
/// Suitable as a process-wide map key: equal static types render equally,
/// and the rendering is computed once per construction, never per query.
pub fn node_full_name(node: &TypeNode) -> Result<String> {
    render(node, true)
}

fn render(node: &TypeNode, qualified: bool) -> Result<String> {
    match node {
        TypeNode::Primitive { name, full_name }
        | TypeNode::Product { name, full_name, .. }
        | TypeNode::Alias { name, full_name, .. }
        | TypeNode::Ref { name, full_name } => Ok(if qualified {
            full_name.clone()
        } else {
            name.clone()
        }),
        TypeNode::Generic {
            name,
            full_name,
            args,
        } => {
            let rendered: Result<Vec<String>> =
                args.iter().map(|arg| render(arg, qualified)).collect();
            let base = if qualified { full_name } else { name };
            Ok(applied(base, &rendered?))
        }
        TypeNode::Union { left, right } => Ok(compound(
            &render(left, qualified)?,
            UNION_OP,
            &render(right, qualified)?,
        )),
        TypeNode::Intersection { left, right } => Ok(compound(
            &render(left, qualified)?,
            INTERSECTION_OP,
            &render(right, qualified)?,
        )),
        TypeNode::Unresolved { detail } => Err(SurfaceError::UnsupportedShape {
            detail: detail.clone(),
        }),
    }
}

// Copyright (c) Ken Kocienda and other contributors.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! Walk functions for selector tree traversal.
//!
//! Each walk function calls the most specific handler for its node, descends
//! into children in source order, and calls the paired leave handler.
//!
//! - **Pre-order**: `enter_*` is called before descending into children
//! - **Post-order**: `leave_*` is called after all children have been visited
//! - **Leaves**: simple selectors get a single `visit_*` call
//!
//! # Control Flow
//!
//! - `VisitResult::Continue` - traverse into children, then `leave_*`
//! - `VisitResult::SkipChildren` - skip children and the paired `leave_*`
//! - `VisitResult::Stop` - halt traversal immediately (no `leave_*` called)
//! - `Err(e)` from any handler - returned as is, nothing else is called

use tracing::{debug, instrument};

use super::traits::{VisitResult, Visitor};
use crate::nodes::{Combinator, CombinatorKind, SelectorGroup, SelectorSequence, SimpleSelector};

/// Walk a whole selector group.
///
/// Convenience wrapper over [`walk_group`] for callers that do not care
/// whether a handler stopped the traversal early.
#[instrument(level = "debug", skip_all, fields(sequences = group.len()))]
pub fn walk<V: Visitor + ?Sized>(visitor: &mut V, group: &SelectorGroup) -> Result<(), V::Error> {
    let result = walk_group(visitor, group)?;
    debug!(stopped = (result == VisitResult::Stop), "selector group walk finished");
    Ok(())
}

/// Walk a [`SelectorGroup`] node and its sequences.
///
/// Traversal order:
/// 1. `enter_group`
/// 2. Walk each sequence (in source order)
/// 3. `leave_group`
pub fn walk_group<V: Visitor + ?Sized>(
    visitor: &mut V,
    node: &SelectorGroup,
) -> Result<VisitResult, V::Error> {
    match visitor.enter_group(node)? {
        VisitResult::Stop => return Ok(VisitResult::Stop),
        VisitResult::SkipChildren => return Ok(VisitResult::Continue),
        VisitResult::Continue => {
            for sequence in node.sequences() {
                if walk_sequence(visitor, sequence)? == VisitResult::Stop {
                    return Ok(VisitResult::Stop);
                }
            }
        }
    }
    visitor.leave_group(node)?;
    Ok(VisitResult::Continue)
}

/// Walk a [`SelectorSequence`] node.
///
/// Traversal order:
/// 1. `enter_sequence`
/// 2. Visit each simple selector (in source order)
/// 3. Walk the combinator, if any
/// 4. `leave_sequence`
pub fn walk_sequence<V: Visitor + ?Sized>(
    visitor: &mut V,
    node: &SelectorSequence,
) -> Result<VisitResult, V::Error> {
    match visitor.enter_sequence(node)? {
        VisitResult::Stop => return Ok(VisitResult::Stop),
        VisitResult::SkipChildren => return Ok(VisitResult::Continue),
        VisitResult::Continue => {
            for simple in node.simples() {
                walk_simple_selector(visitor, simple)?;
            }
            if let Some(combinator) = node.combinator() {
                if walk_combinator(visitor, combinator)? == VisitResult::Stop {
                    return Ok(VisitResult::Stop);
                }
            }
        }
    }
    visitor.leave_sequence(node)?;
    Ok(VisitResult::Continue)
}

/// Walk a [`Combinator`] node and the sequence it leads to.
///
/// Dispatches to the `enter_*`/`leave_*` pair for the combinator kind.
pub fn walk_combinator<V: Visitor + ?Sized>(
    visitor: &mut V,
    node: &Combinator,
) -> Result<VisitResult, V::Error> {
    let entered = match node.kind() {
        CombinatorKind::Descendant => visitor.enter_descendant(node)?,
        CombinatorKind::Child => visitor.enter_child(node)?,
        CombinatorKind::Follower => visitor.enter_follower(node)?,
        CombinatorKind::Next => visitor.enter_next(node)?,
    };
    match entered {
        VisitResult::Stop => return Ok(VisitResult::Stop),
        VisitResult::SkipChildren => return Ok(VisitResult::Continue),
        VisitResult::Continue => {
            if walk_sequence(visitor, node.sequence())? == VisitResult::Stop {
                return Ok(VisitResult::Stop);
            }
        }
    }
    match node.kind() {
        CombinatorKind::Descendant => visitor.leave_descendant(node)?,
        CombinatorKind::Child => visitor.leave_child(node)?,
        CombinatorKind::Follower => visitor.leave_follower(node)?,
        CombinatorKind::Next => visitor.leave_next(node)?,
    }
    Ok(VisitResult::Continue)
}

/// Visit a [`SimpleSelector`] leaf with the handler for its variant.
pub fn walk_simple_selector<V: Visitor + ?Sized>(
    visitor: &mut V,
    node: &SimpleSelector,
) -> Result<(), V::Error> {
    match node {
        SimpleSelector::Universal(n) => visitor.visit_universal(n),
        SimpleSelector::Type(n) => visitor.visit_type(n),
        SimpleSelector::Id(n) => visitor.visit_id(n),
        SimpleSelector::ClassName(n) => visitor.visit_class_name(n),
        SimpleSelector::Attribute(n) => visitor.visit_attribute(n),
    }
}

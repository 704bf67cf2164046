// Copyright (c) Ken Kocienda and other contributors.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! Visitor infrastructure for selector tree traversal.
//!
//! # Traversal Order
//!
//! - **Depth-first, pre-order** for `enter_*` methods
//! - **Post-order** for `leave_*` methods
//! - Simple selectors are visited in source order, before the combinator
//!   of their sequence
//!
//! # Handler Resolution
//!
//! A visitor overrides handlers at any level of specificity. `visit_id`
//! defaults to `visit_simple_selector`, which defaults to `visit_node`;
//! `enter_child` defaults to `enter_combinator`, which defaults to
//! `enter_node`. The node-level handlers do nothing, so traversal never
//! fails on a kind a visitor does not handle.
//!
//! ```
//! use std::convert::Infallible;
//! use cssel_ast::nodes::{NodeRef, SelectorGroup, SelectorSequence, TypeSelector};
//! use cssel_ast::visitor::{walk, Visitor};
//!
//! #[derive(Default)]
//! struct LeafCounter(usize);
//!
//! impl Visitor for LeafCounter {
//!     type Error = Infallible;
//!
//!     fn visit_simple_selector(&mut self, _node: NodeRef<'_>) -> Result<(), Infallible> {
//!         self.0 += 1;
//!         Ok(())
//!     }
//! }
//!
//! let group = SelectorGroup::new(vec![SelectorSequence::single(TypeSelector::new("p"))]);
//! let mut counter = LeafCounter::default();
//! walk(&mut counter, &group).unwrap();
//! assert_eq!(counter.0, 1);
//! ```
//!
//! # Explain
//!
//! [`Explain`] is the bundled backend. It renders a tree into an
//! [`ExplainDocument`](crate::document::ExplainDocument) that describes each
//! node and reproduces the selector text.

mod dispatch;
mod explain;
mod traits;

pub use dispatch::*;
pub use explain::{escape_literal, explain, qualify, Explain, ExplainError};
pub use traits::{VisitResult, Visitor};

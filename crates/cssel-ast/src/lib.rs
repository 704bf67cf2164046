// Copyright (c) Ken Kocienda and other contributors.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! CSS selector syntax trees and the visitors that walk them.
//!
//! # Overview
//!
//! - **Nodes**: [`SelectorGroup`], [`SelectorSequence`], [`Combinator`] and the
//!   simple selectors in [`nodes`]. Trees are immutable once built and can be
//!   shared across threads.
//! - **Visitors**: the [`Visitor`] trait with layered default handlers, and
//!   [`walk`] to drive one over a tree.
//! - **Explain**: the [`Explain`] visitor renders a tree into an annotated
//!   [`ExplainDocument`] and reconstructs the selector text.
//!
//! # Quick Start
//!
//! ```
//! use cssel_ast::{explain, CombinatorKind, SelectorGroup, SelectorSequence, TypeSelector};
//!
//! let group = SelectorGroup::new(vec![SelectorSequence::single(TypeSelector::new("ul"))
//!     .chain(CombinatorKind::Child, SelectorSequence::single(TypeSelector::new("li")))]);
//!
//! let explained = explain(&group).unwrap();
//! assert_eq!(explained.text(), "ul > li");
//! assert!(explained.to_xml().unwrap().contains("<child><text> &gt; </text>"));
//! ```

/// Explanation documents and their serialization.
pub mod document;
pub use document::{
    ElementId, ExplainDocument, ExplainElement, ExplainOptions, ExplainTag, EXPLAIN_NAMESPACE,
};

/// Selector tree node types.
pub mod nodes;
pub use nodes::*;

/// Visitor infrastructure and the explain backend.
pub mod visitor;
pub use visitor::{explain, walk, Explain, ExplainError, VisitResult, Visitor};

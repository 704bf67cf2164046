// Copyright (c) Ken Kocienda and other contributors.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! Selector AST node types.
//!
//! The tree is built once by a parser and then only read. Compound nodes
//! own their children; there are no parent links.
//!
//! ```text
//! SelectorGroup
//! └── SelectorSequence*          (comma separated)
//!     ├── SimpleSelector+        (universal, type, id, class, attribute)
//!     └── Combinator?            (descendant, child, follower, next)
//!         └── SelectorSequence   (right-hand side, may chain further)
//! ```

use std::fmt;

use thiserror::Error;

mod selector;
mod simple;

pub use selector::{Combinator, CombinatorKind, SelectorGroup, SelectorSequence};
pub use simple::{
    AttributeMatch, AttributeSelector, ClassSelector, IdSelector, SimpleSelector, TypeSelector,
    UniversalSelector,
};

/// Errors raised while building a tree that would break its invariants.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AstError {
    /// A sequence was built without simple selectors.
    #[error("selector sequence must contain at least one simple selector")]
    EmptySequence,

    /// A comparing attribute operator was given no literal.
    #[error("attribute selector [{name}] with operator '{operator}' requires a literal")]
    MissingLiteral { name: String, operator: &'static str },

    /// An `exists` attribute selector was given a literal.
    #[error("attribute selector [{name}] with operator 'exists' takes no literal")]
    UnexpectedLiteral { name: String },
}

/// The concrete kind of a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Group,
    Sequence,
    Descendant,
    Child,
    Follower,
    Next,
    Universal,
    Type,
    Id,
    ClassName,
    Attribute,
}

impl NodeKind {
    pub fn as_str(self) -> &'static str {
        match self {
            NodeKind::Group => "selector group",
            NodeKind::Sequence => "selector sequence",
            NodeKind::Descendant => "descendant combinator",
            NodeKind::Child => "child combinator",
            NodeKind::Follower => "follower combinator",
            NodeKind::Next => "next combinator",
            NodeKind::Universal => "universal selector",
            NodeKind::Type => "type selector",
            NodeKind::Id => "id selector",
            NodeKind::ClassName => "class selector",
            NodeKind::Attribute => "attribute selector",
        }
    }

    /// True for the leaf kinds.
    pub fn is_simple(self) -> bool {
        matches!(
            self,
            NodeKind::Universal
                | NodeKind::Type
                | NodeKind::Id
                | NodeKind::ClassName
                | NodeKind::Attribute
        )
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<CombinatorKind> for NodeKind {
    fn from(kind: CombinatorKind) -> Self {
        match kind {
            CombinatorKind::Descendant => NodeKind::Descendant,
            CombinatorKind::Child => NodeKind::Child,
            CombinatorKind::Follower => NodeKind::Follower,
            CombinatorKind::Next => NodeKind::Next,
        }
    }
}

/// A borrowed reference to any node of the tree.
///
/// Handed to the category and node-level fallback handlers of
/// [`Visitor`](crate::visitor::Visitor), so a single handler can cover
/// several concrete kinds.
#[derive(Debug, Clone, Copy)]
pub enum NodeRef<'n> {
    Group(&'n SelectorGroup),
    Sequence(&'n SelectorSequence),
    Combinator(&'n Combinator),
    Universal(&'n UniversalSelector),
    Type(&'n TypeSelector),
    Id(&'n IdSelector),
    ClassName(&'n ClassSelector),
    Attribute(&'n AttributeSelector),
}

impl NodeRef<'_> {
    pub fn kind(&self) -> NodeKind {
        match self {
            NodeRef::Group(_) => NodeKind::Group,
            NodeRef::Sequence(_) => NodeKind::Sequence,
            NodeRef::Combinator(c) => c.kind().into(),
            NodeRef::Universal(_) => NodeKind::Universal,
            NodeRef::Type(_) => NodeKind::Type,
            NodeRef::Id(_) => NodeKind::Id,
            NodeRef::ClassName(_) => NodeKind::ClassName,
            NodeRef::Attribute(_) => NodeKind::Attribute,
        }
    }
}

impl<'n> From<&'n SimpleSelector> for NodeRef<'n> {
    fn from(node: &'n SimpleSelector) -> Self {
        match node {
            SimpleSelector::Universal(n) => NodeRef::Universal(n),
            SimpleSelector::Type(n) => NodeRef::Type(n),
            SimpleSelector::Id(n) => NodeRef::Id(n),
            SimpleSelector::ClassName(n) => NodeRef::ClassName(n),
            SimpleSelector::Attribute(n) => NodeRef::Attribute(n),
        }
    }
}

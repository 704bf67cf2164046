// Copyright (c) Ken Kocienda and other contributors.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! Visitor trait definitions for selector tree traversal.

use crate::nodes::{
    AttributeSelector, ClassSelector, Combinator, IdSelector, NodeRef, SelectorGroup,
    SelectorSequence, TypeSelector, UniversalSelector,
};

/// Result of entering a structural node - controls traversal behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum VisitResult {
    /// Descend into children, then call the paired `leave_*`.
    #[default]
    Continue,

    /// Do not descend into children and do not call the paired `leave_*`.
    ///
    /// Traversal resumes with the next sibling.
    SkipChildren,

    /// Stop traversal entirely.
    ///
    /// No further `enter_*`, `visit_*` or `leave_*` methods will be called.
    Stop,
}

/// Generates `enter_*`/`leave_*` pairs for each combinator kind.
///
/// Each default forwards to the combinator category handler.
macro_rules! combinator_methods {
    ($($kind:ident),* $(,)?) => {
        paste::paste! {
            $(
                #[doc = concat!("Enter a ", stringify!($kind), " combinator.")]
                #[doc = ""]
                #[doc = "Defaults to [`Visitor::enter_combinator`]."]
                fn [<enter_ $kind>](
                    &mut self,
                    node: &Combinator,
                ) -> Result<VisitResult, Self::Error> {
                    self.enter_combinator(node)
                }

                #[doc = concat!("Leave a ", stringify!($kind), " combinator.")]
                #[doc = ""]
                #[doc = "Defaults to [`Visitor::leave_combinator`]."]
                fn [<leave_ $kind>](&mut self, node: &Combinator) -> Result<(), Self::Error> {
                    self.leave_combinator(node)
                }
            )*
        }
    };
}

/// Generates `visit_*` methods for each simple selector kind.
///
/// Each default forwards to the simple selector category handler.
macro_rules! simple_selector_methods {
    ($($method:ident : $node_type:ty => $variant:ident),* $(,)?) => {
        $(
            #[doc = concat!("Visit a [`", stringify!($node_type), "`] leaf.")]
            #[doc = ""]
            #[doc = "Defaults to [`Visitor::visit_simple_selector`]."]
            fn $method(&mut self, node: &$node_type) -> Result<(), Self::Error> {
                self.visit_simple_selector(NodeRef::$variant(node))
            }
        )*
    };
}

/// Read-only visitor over a selector tree.
///
/// Handlers are resolved from the most specific to the least specific:
///
/// | concrete                      | category                  | node            |
/// |-------------------------------|---------------------------|-----------------|
/// | `visit_type`, `visit_id`, ... | `visit_simple_selector`   | `visit_node`    |
/// | `enter_child`, ...            | `enter_combinator`        | `enter_node`    |
/// | `leave_child`, ...            | `leave_combinator`        | `leave_node`    |
/// | `enter_group`, `enter_sequence` | -                       | `enter_node`    |
/// | `leave_group`, `leave_sequence` | -                       | `leave_node`    |
///
/// Override a handler at whichever level is convenient. The node-level
/// defaults do nothing and let traversal continue, so a visitor only has
/// to implement the kinds it cares about.
///
/// Every handler returns `Result`; an `Err` stops the walk and is returned
/// unchanged from the walk function. Visitors that cannot fail use
/// [`Infallible`](std::convert::Infallible) as their error type.
///
/// # Example
///
/// ```
/// use std::convert::Infallible;
/// use cssel_ast::nodes::{IdSelector, SelectorGroup, SelectorSequence};
/// use cssel_ast::visitor::{walk, Visitor};
///
/// struct IdCollector(Vec<String>);
///
/// impl Visitor for IdCollector {
///     type Error = Infallible;
///
///     fn visit_id(&mut self, node: &IdSelector) -> Result<(), Infallible> {
///         self.0.push(node.id().to_string());
///         Ok(())
///     }
/// }
///
/// let group = SelectorGroup::new(vec![SelectorSequence::single(IdSelector::new("main"))]);
/// let mut ids = IdCollector(Vec::new());
/// walk(&mut ids, &group).unwrap();
/// assert_eq!(ids.0, ["main"]);
/// ```
pub trait Visitor {
    /// Error a handler may signal to abort traversal.
    type Error;

    // ------------------------------------------------------------------
    // Node-level defaults
    // ------------------------------------------------------------------

    /// Fallback for every structural `enter_*` not overridden.
    #[allow(unused_variables)]
    fn enter_node(&mut self, node: NodeRef<'_>) -> Result<VisitResult, Self::Error> {
        Ok(VisitResult::Continue)
    }

    /// Fallback for every structural `leave_*` not overridden.
    #[allow(unused_variables)]
    fn leave_node(&mut self, node: NodeRef<'_>) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Fallback for every leaf `visit_*` not overridden.
    #[allow(unused_variables)]
    fn visit_node(&mut self, node: NodeRef<'_>) -> Result<(), Self::Error> {
        Ok(())
    }

    // ------------------------------------------------------------------
    // Group and sequence
    // ------------------------------------------------------------------

    fn enter_group(&mut self, node: &SelectorGroup) -> Result<VisitResult, Self::Error> {
        self.enter_node(NodeRef::Group(node))
    }

    fn leave_group(&mut self, node: &SelectorGroup) -> Result<(), Self::Error> {
        self.leave_node(NodeRef::Group(node))
    }

    fn enter_sequence(&mut self, node: &SelectorSequence) -> Result<VisitResult, Self::Error> {
        self.enter_node(NodeRef::Sequence(node))
    }

    fn leave_sequence(&mut self, node: &SelectorSequence) -> Result<(), Self::Error> {
        self.leave_node(NodeRef::Sequence(node))
    }

    // ------------------------------------------------------------------
    // Combinators
    // ------------------------------------------------------------------

    /// Category handler for all combinator kinds.
    fn enter_combinator(&mut self, node: &Combinator) -> Result<VisitResult, Self::Error> {
        self.enter_node(NodeRef::Combinator(node))
    }

    /// Category handler for all combinator kinds.
    fn leave_combinator(&mut self, node: &Combinator) -> Result<(), Self::Error> {
        self.leave_node(NodeRef::Combinator(node))
    }

    combinator_methods! {
        descendant,
        child,
        follower,
        next,
    }

    // ------------------------------------------------------------------
    // Simple selectors
    // ------------------------------------------------------------------

    /// Category handler for all simple selector kinds.
    fn visit_simple_selector(&mut self, node: NodeRef<'_>) -> Result<(), Self::Error> {
        self.visit_node(node)
    }

    simple_selector_methods! {
        visit_universal: UniversalSelector => Universal,
        visit_type: TypeSelector => Type,
        visit_id: IdSelector => Id,
        visit_class_name: ClassSelector => ClassName,
        visit_attribute: AttributeSelector => Attribute,
    }
}

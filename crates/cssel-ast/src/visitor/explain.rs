// Copyright (c) Ken Kocienda and other contributors.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! Explain visitor: renders a selector tree into an annotated document.
//!
//! Every node becomes an element labeled with its kind, and every piece of
//! CSS punctuation becomes a `text` element in the right place. The document
//! is both a structural explanation of the selector and, through
//! [`Explain::text`], a faithful reconstruction of its source text.
//!
//! # Usage
//!
//! ```
//! use cssel_ast::nodes::{ClassSelector, IdSelector, SelectorGroup, SelectorSequence};
//! use cssel_ast::visitor::explain;
//!
//! let group = SelectorGroup::new(vec![
//!     SelectorSequence::single(IdSelector::new("main")),
//!     SelectorSequence::single(ClassSelector::new("item")),
//! ]);
//! let explained = explain(&group).unwrap();
//! assert_eq!(explained.text(), "#main, .item");
//! ```

use std::fmt;

use thiserror::Error;
use tracing::{debug, trace};

use super::dispatch::walk;
use super::traits::{VisitResult, Visitor};
use crate::document::{ElementId, ExplainDocument, ExplainOptions, ExplainTag};
use crate::nodes::{
    AttributeSelector, ClassSelector, Combinator, CombinatorKind, IdSelector, NodeKind, NodeRef,
    SelectorGroup, SelectorSequence, TypeSelector, UniversalSelector,
};

/// Separator written between the sequences of a group.
const SEQUENCE_SEPARATOR: &str = ", ";

/// Errors raised while explaining a selector tree.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExplainError {
    /// A group was entered while the document still holds earlier output.
    #[error("explain document already holds a rendered selector, clear it first")]
    NotCleared,

    /// A node reached a handler the explain backend does not implement.
    #[error("explain cannot render a {kind}")]
    Unsupported { kind: NodeKind },

    /// A leave handler ran with no open element to close.
    #[error("unbalanced leave of {kind}: no open element")]
    UnbalancedLeave { kind: NodeKind },

    /// Writing the document failed.
    #[error("failed to write explain document: {0}")]
    Xml(String),
}

/// Escape a literal for use inside a double-quoted CSS string.
///
/// Backslashes are escaped first so the escapes added for quotes are not
/// doubled.
pub fn escape_literal(literal: &str) -> String {
    literal.replace('\\', "\\\\").replace('"', "\\\"")
}

/// Prefix `name` with a namespace prefix, if there is a meaningful one.
///
/// An absent, empty or `*` prefix is dropped.
pub fn qualify(prefix: Option<&str>, name: &str) -> String {
    match prefix {
        Some(prefix) if !prefix.is_empty() && prefix != "*" => format!("{prefix}|{name}"),
        _ => name.to_string(),
    }
}

/// Visitor building an [`ExplainDocument`] for a selector tree.
///
/// An `Explain` renders one group. Call [`Explain::clear`] before walking
/// another tree with the same instance.
#[derive(Debug, Clone, Default)]
pub struct Explain {
    document: ExplainDocument,
    /// Open elements; new elements are appended under the last one.
    cursor: Vec<ElementId>,
    options: ExplainOptions,
}

impl Explain {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: ExplainOptions) -> Self {
        Explain {
            options,
            ..Self::default()
        }
    }

    pub fn options(&self) -> &ExplainOptions {
        &self.options
    }

    /// Discard the rendered document so the instance can be reused.
    pub fn clear(&mut self) {
        debug!(elements = self.document.len(), "clearing explain document");
        self.document.clear();
        self.cursor.clear();
    }

    pub fn document(&self) -> &ExplainDocument {
        &self.document
    }

    /// The reconstructed selector text.
    pub fn text(&self) -> String {
        self.document.text()
    }

    /// The document serialized as XML, empty if nothing was rendered yet.
    pub fn to_xml(&self) -> Result<String, ExplainError> {
        self.document.to_xml(&self.options)
    }

    fn insertion_point(&self) -> Option<ElementId> {
        self.cursor.last().copied()
    }

    /// Append `tag` at the cursor, with `content` as its text if non-empty.
    fn append_element(&mut self, tag: ExplainTag, content: &str) -> ElementId {
        let parent = self.insertion_point();
        let id = self.document.append_element(parent, tag, None);
        if !content.is_empty() {
            self.document.append_text(Some(id), content);
        }
        trace!(%tag, content, "append element");
        id
    }

    fn append_text(&mut self, content: &str) {
        let parent = self.insertion_point();
        self.document.append_text(parent, content);
    }

    fn start(&mut self, id: ElementId) -> VisitResult {
        self.cursor.push(id);
        VisitResult::Continue
    }

    fn end(&mut self, kind: NodeKind) -> Result<(), ExplainError> {
        match self.cursor.pop() {
            Some(_) => Ok(()),
            None => Err(ExplainError::UnbalancedLeave { kind }),
        }
    }

    /// True when the cursor sits on a group that already holds a sequence.
    fn needs_separator(&self) -> bool {
        self.insertion_point()
            .and_then(|id| self.document.get(id))
            .is_some_and(|element| {
                element.tag() == ExplainTag::SelectorGroup && !element.children().is_empty()
            })
    }
}

impl fmt::Display for Explain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let xml = self.to_xml().map_err(|_| fmt::Error)?;
        f.write_str(&xml)
    }
}

fn combinator_tag(kind: CombinatorKind) -> ExplainTag {
    match kind {
        CombinatorKind::Descendant => ExplainTag::Descendant,
        CombinatorKind::Child => ExplainTag::Child,
        CombinatorKind::Follower => ExplainTag::Follower,
        CombinatorKind::Next => ExplainTag::Next,
    }
}

impl Visitor for Explain {
    type Error = ExplainError;

    // Every kind has a handler below; anything reaching these is a bug.

    fn enter_node(&mut self, node: NodeRef<'_>) -> Result<VisitResult, ExplainError> {
        Err(ExplainError::Unsupported { kind: node.kind() })
    }

    fn leave_node(&mut self, node: NodeRef<'_>) -> Result<(), ExplainError> {
        Err(ExplainError::Unsupported { kind: node.kind() })
    }

    fn visit_node(&mut self, node: NodeRef<'_>) -> Result<(), ExplainError> {
        Err(ExplainError::Unsupported { kind: node.kind() })
    }

    fn enter_group(&mut self, _node: &SelectorGroup) -> Result<VisitResult, ExplainError> {
        if !self.document.is_empty() {
            return Err(ExplainError::NotCleared);
        }
        let id = self.append_element(ExplainTag::SelectorGroup, "");
        Ok(self.start(id))
    }

    fn leave_group(&mut self, _node: &SelectorGroup) -> Result<(), ExplainError> {
        self.end(NodeKind::Group)
    }

    fn enter_sequence(&mut self, _node: &SelectorSequence) -> Result<VisitResult, ExplainError> {
        if self.needs_separator() {
            self.append_text(SEQUENCE_SEPARATOR);
        }
        let id = self.append_element(ExplainTag::Selector, "");
        Ok(self.start(id))
    }

    fn leave_sequence(&mut self, _node: &SelectorSequence) -> Result<(), ExplainError> {
        self.end(NodeKind::Sequence)
    }

    fn enter_combinator(&mut self, node: &Combinator) -> Result<VisitResult, ExplainError> {
        let id = self.append_element(combinator_tag(node.kind()), node.kind().punctuation());
        Ok(self.start(id))
    }

    fn leave_combinator(&mut self, node: &Combinator) -> Result<(), ExplainError> {
        self.end(node.kind().into())
    }

    fn visit_universal(&mut self, node: &UniversalSelector) -> Result<(), ExplainError> {
        let css = qualify(node.namespace_prefix(), "*");
        self.append_element(ExplainTag::Universal, &css);
        Ok(())
    }

    fn visit_type(&mut self, node: &TypeSelector) -> Result<(), ExplainError> {
        let css = qualify(node.namespace_prefix(), node.element_name());
        self.append_element(ExplainTag::Type, &css);
        Ok(())
    }

    fn visit_id(&mut self, node: &IdSelector) -> Result<(), ExplainError> {
        self.append_element(ExplainTag::Id, &format!("#{}", node.id()));
        Ok(())
    }

    fn visit_class_name(&mut self, node: &ClassSelector) -> Result<(), ExplainError> {
        self.append_element(ExplainTag::Class, &format!(".{}", node.class_name()));
        Ok(())
    }

    fn visit_attribute(&mut self, node: &AttributeSelector) -> Result<(), ExplainError> {
        let parent = self.insertion_point();
        let id = self
            .document
            .append_element(parent, ExplainTag::Attribute, Some(node.operator()));
        self.cursor.push(id);

        self.append_text("[");
        self.append_element(ExplainTag::Name, node.name());
        if let (Some(punctuation), Some(literal)) = (node.operator().punctuation(), node.literal())
        {
            self.append_element(ExplainTag::Operator, punctuation);
            self.append_text("\"");
            self.append_element(ExplainTag::Value, &escape_literal(literal));
            self.append_text("\"");
        }
        self.append_text("]");

        self.end(NodeKind::Attribute)
    }
}

/// Explain a selector group with default options.
pub fn explain(group: &SelectorGroup) -> Result<Explain, ExplainError> {
    let mut explain = Explain::new();
    walk(&mut explain, group)?;
    Ok(explain)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nodes::AttributeMatch;

    fn group_of(sequences: Vec<SelectorSequence>) -> SelectorGroup {
        SelectorGroup::new(sequences)
    }

    mod helper_tests {
        use super::*;

        #[test]
        fn escape_handles_backslash_before_quote() {
            assert_eq!(escape_literal(r#"a\"b"#), r#"a\\\"b"#);
            assert_eq!(escape_literal("plain"), "plain");
            assert_eq!(escape_literal(""), "");
        }

        #[test]
        fn qualify_drops_meaningless_prefixes() {
            assert_eq!(qualify(Some("xhtml"), "a"), "xhtml|a");
            assert_eq!(qualify(Some(""), "a"), "a");
            assert_eq!(qualify(Some("*"), "a"), "a");
            assert_eq!(qualify(None, "*"), "*");
            assert_eq!(qualify(Some("svg"), "*"), "svg|*");
        }
    }

    mod render_tests {
        use super::*;

        #[test]
        fn type_selector() {
            let group = group_of(vec![SelectorSequence::single(TypeSelector::new("div"))]);
            let explained = explain(&group).unwrap();
            assert_eq!(explained.text(), "div");
            assert_eq!(
                explained.to_xml().unwrap(),
                concat!(
                    "<?xml version=\"1.0\"?>\n",
                    "<selector-group xmlns=\"urn:carica-phpcss-explain-2014\">",
                    "<selector><type><text>div</text></type></selector>",
                    "</selector-group>\n"
                )
            );
        }

        #[test]
        fn universal_with_and_without_prefix() {
            let group = group_of(vec![
                SelectorSequence::single(UniversalSelector::new()),
                SelectorSequence::single(UniversalSelector::with_prefix("svg")),
            ]);
            assert_eq!(explain(&group).unwrap().text(), "*, svg|*");
        }

        #[test]
        fn attribute_with_escaped_literal() {
            let attr =
                AttributeSelector::new("title", AttributeMatch::Equals, r#"say "hi""#).unwrap();
            let group = group_of(vec![SelectorSequence::single(attr)]);
            let explained = explain(&group).unwrap();
            assert_eq!(explained.text(), r#"[title="say \"hi\""]"#);
            assert!(explained
                .to_xml()
                .unwrap()
                .contains(r#"<attribute operator="equals">"#));
        }

        #[test]
        fn every_operator_renders_its_punctuation() {
            for operator in AttributeMatch::ALL {
                let attr = match operator.punctuation() {
                    Some(_) => AttributeSelector::new("x", operator, "v").unwrap(),
                    None => AttributeSelector::exists("x"),
                };
                let group = group_of(vec![SelectorSequence::single(attr)]);
                let expected = match operator.punctuation() {
                    Some(p) => format!("[x{p}\"v\"]"),
                    None => "[x]".to_string(),
                };
                assert_eq!(explain(&group).unwrap().text(), expected, "{:?}", operator);
            }
        }

        #[test]
        fn chained_combinators_nest() {
            let seq = SelectorSequence::single(TypeSelector::new("a"))
                .chain(
                    CombinatorKind::Descendant,
                    SelectorSequence::single(TypeSelector::new("b")),
                )
                .chain(
                    CombinatorKind::Follower,
                    SelectorSequence::single(TypeSelector::new("c")),
                );
            let explained = explain(&group_of(vec![seq])).unwrap();
            assert_eq!(explained.text(), "a b ~ c");

            let xml = explained.to_xml().unwrap();
            let descendant = xml.find("<descendant>").unwrap();
            let follower = xml.find("<follower>").unwrap();
            let descendant_end = xml.find("</descendant>").unwrap();
            assert!(descendant < follower && follower < descendant_end, "{}", xml);
        }

        #[test]
        fn empty_group_renders_bare_root() {
            let explained = explain(&SelectorGroup::default()).unwrap();
            assert_eq!(explained.text(), "");
            let xml = explained.to_xml().unwrap();
            assert!(
                xml.ends_with("<selector-group xmlns=\"urn:carica-phpcss-explain-2014\"/>\n"),
                "{}",
                xml
            );
        }
    }

    mod state_tests {
        use super::*;
        use crate::visitor::walk_sequence;

        #[test]
        fn output_is_empty_before_traversal() {
            let explain = Explain::new();
            assert_eq!(explain.to_xml().unwrap(), "");
            assert_eq!(explain.to_string(), "");
            assert!(explain.document().is_empty());
        }

        #[test]
        fn second_group_without_clear_is_rejected() {
            let group = group_of(vec![SelectorSequence::single(IdSelector::new("a"))]);
            let mut explain = Explain::new();
            walk(&mut explain, &group).unwrap();
            assert_eq!(walk(&mut explain, &group), Err(ExplainError::NotCleared));

            explain.clear();
            walk(&mut explain, &group).unwrap();
            assert_eq!(explain.text(), "#a");
        }

        #[test]
        fn unbalanced_leave_is_reported() {
            let mut explain = Explain::new();
            let err = explain.leave_group(&SelectorGroup::default()).unwrap_err();
            assert_eq!(err, ExplainError::UnbalancedLeave { kind: NodeKind::Group });
        }

        #[test]
        fn node_level_defaults_are_unsupported() {
            let mut explain = Explain::new();
            let group = SelectorGroup::default();
            let err = explain.enter_node(NodeRef::Group(&group)).unwrap_err();
            assert_eq!(err, ExplainError::Unsupported { kind: NodeKind::Group });
            assert_eq!(err.to_string(), "explain cannot render a selector group");
        }

        #[test]
        fn sequence_without_group_has_no_separator() {
            let mut explain = Explain::new();
            let seq = SelectorSequence::single(ClassSelector::new("a"));
            walk_sequence(&mut explain, &seq).unwrap();
            walk_sequence(&mut explain, &seq).unwrap();
            assert_eq!(explain.text(), ".a.a");
            assert_eq!(explain.document().roots().len(), 2);
        }

        #[test]
        fn options_flow_into_xml() {
            let options = ExplainOptions {
                namespace: "urn:test".to_string(),
                indent: None,
                xml_declaration: false,
            };
            let mut explain = Explain::with_options(options);
            walk(
                &mut explain,
                &group_of(vec![SelectorSequence::single(IdSelector::new("x"))]),
            )
            .unwrap();
            assert_eq!(
                explain.to_xml().unwrap(),
                "<selector-group xmlns=\"urn:test\"><selector><id><text>#x</text></id></selector></selector-group>\n"
            );
        }
    }
}

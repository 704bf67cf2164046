// Copyright (c) Ken Kocienda and other contributors.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! The explanation document built by the [`Explain`](crate::visitor::Explain) visitor.
//!
//! The document is a small tree of labeled elements stored in an arena and
//! addressed by [`ElementId`]. Literal text lives in dedicated `text`
//! elements, so concatenating all text in document order yields the CSS
//! selector the tree was rendered from:
//!
//! ```text
//! <selector-group>
//!   <selector>
//!     <type><text>ul</text></type>
//!     <child>
//!       <text> &gt; </text>
//!       <selector><class><text>.item</text></class></selector>
//!     </child>
//!   </selector>
//! </selector-group>                                   => "ul > .item"
//! ```

use std::fmt;

use quick_xml::escape::partial_escape;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use serde::ser::{SerializeSeq, SerializeStruct};
use serde::{Deserialize, Serialize, Serializer};

use crate::nodes::AttributeMatch;
use crate::visitor::ExplainError;

/// Default namespace of explanation documents.
pub const EXPLAIN_NAMESPACE: &str = "urn:carica-phpcss-explain-2014";

/// Serialization settings for explanation documents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExplainOptions {
    /// Namespace declared on the root element.
    pub namespace: String,
    /// Indent width for nested elements; `None` writes everything on one line.
    pub indent: Option<usize>,
    /// Write an `<?xml version="1.0"?>` declaration first.
    pub xml_declaration: bool,
}

impl Default for ExplainOptions {
    fn default() -> Self {
        ExplainOptions {
            namespace: EXPLAIN_NAMESPACE.to_string(),
            indent: None,
            xml_declaration: true,
        }
    }
}

/// Element labels used in explanation documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ExplainTag {
    SelectorGroup,
    Selector,
    Universal,
    Type,
    Id,
    Class,
    Descendant,
    Child,
    Follower,
    Next,
    Attribute,
    Name,
    Operator,
    Value,
    Text,
}

impl ExplainTag {
    pub fn as_str(self) -> &'static str {
        match self {
            ExplainTag::SelectorGroup => "selector-group",
            ExplainTag::Selector => "selector",
            ExplainTag::Universal => "universal",
            ExplainTag::Type => "type",
            ExplainTag::Id => "id",
            ExplainTag::Class => "class",
            ExplainTag::Descendant => "descendant",
            ExplainTag::Child => "child",
            ExplainTag::Follower => "follower",
            ExplainTag::Next => "next",
            ExplainTag::Attribute => "attribute",
            ExplainTag::Name => "name",
            ExplainTag::Operator => "operator",
            ExplainTag::Value => "value",
            ExplainTag::Text => "text",
        }
    }
}

impl fmt::Display for ExplainTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Index of an element inside its [`ExplainDocument`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(usize);

impl ElementId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// One labeled element of an explanation document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExplainElement {
    tag: ExplainTag,
    operator: Option<AttributeMatch>,
    text: Option<String>,
    children: Vec<ElementId>,
}

impl ExplainElement {
    pub fn tag(&self) -> ExplainTag {
        self.tag
    }

    /// Resolved attribute operator, set on `attribute` elements only.
    pub fn operator(&self) -> Option<AttributeMatch> {
        self.operator
    }

    /// Literal content, set on `text` elements only.
    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    pub fn children(&self) -> &[ElementId] {
        &self.children
    }
}

/// Arena-backed explanation tree.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExplainDocument {
    elements: Vec<ExplainElement>,
    roots: Vec<ElementId>,
}

impl ExplainDocument {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    /// Number of elements, text elements included.
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn clear(&mut self) {
        self.elements.clear();
        self.roots.clear();
    }

    /// Top-level elements, in insertion order.
    pub fn roots(&self) -> &[ElementId] {
        &self.roots
    }

    pub fn get(&self, id: ElementId) -> Option<&ExplainElement> {
        self.elements.get(id.0)
    }

    /// Children of `parent`, or the top-level elements for `None`.
    ///
    /// An id that does not belong to this document has no children.
    pub fn children_of(&self, parent: Option<ElementId>) -> &[ElementId] {
        match parent {
            Some(id) => self
                .get(id)
                .map(|element| element.children.as_slice())
                .unwrap_or_default(),
            None => &self.roots,
        }
    }

    /// Append a new element under `parent` (top level for `None`).
    ///
    /// # Panics
    ///
    /// Panics if `parent` is not an element of this document.
    pub fn append_element(
        &mut self,
        parent: Option<ElementId>,
        tag: ExplainTag,
        operator: Option<AttributeMatch>,
    ) -> ElementId {
        self.push(
            parent,
            ExplainElement {
                tag,
                operator,
                text: None,
                children: Vec::new(),
            },
        )
    }

    /// Append a `text` element holding `content` under `parent`.
    pub fn append_text(
        &mut self,
        parent: Option<ElementId>,
        content: impl Into<String>,
    ) -> ElementId {
        self.push(
            parent,
            ExplainElement {
                tag: ExplainTag::Text,
                operator: None,
                text: Some(content.into()),
                children: Vec::new(),
            },
        )
    }

    fn push(&mut self, parent: Option<ElementId>, element: ExplainElement) -> ElementId {
        let id = ElementId(self.elements.len());
        self.elements.push(element);
        match parent {
            Some(parent) => self.elements[parent.0].children.push(id),
            None => self.roots.push(id),
        }
        id
    }

    /// All literal text in document order.
    pub fn text(&self) -> String {
        let mut out = String::new();
        for &root in &self.roots {
            self.collect_text(root, &mut out);
        }
        out
    }

    fn collect_text(&self, id: ElementId, out: &mut String) {
        let element = &self.elements[id.0];
        if let Some(text) = &element.text {
            out.push_str(text);
        }
        for &child in &element.children {
            self.collect_text(child, out);
        }
    }

    /// Serialize the document as XML. An empty document yields an empty string.
    pub fn to_xml(&self, options: &ExplainOptions) -> Result<String, ExplainError> {
        if self.is_empty() {
            return Ok(String::new());
        }

        let mut writer = match options.indent {
            Some(width) => Writer::new_with_indent(Vec::new(), b' ', width),
            None => Writer::new(Vec::new()),
        };
        if options.xml_declaration {
            writer
                .write_event(Event::Decl(BytesDecl::new("1.0", None, None)))
                .map_err(xml_error)?;
            if options.indent.is_none() {
                writer.get_mut().push(b'\n');
            }
        }
        for &root in &self.roots {
            self.write_element(&mut writer, root, Some(&options.namespace))?;
        }
        let mut bytes = writer.into_inner();
        bytes.push(b'\n');
        String::from_utf8(bytes).map_err(xml_error)
    }

    fn write_element(
        &self,
        writer: &mut Writer<Vec<u8>>,
        id: ElementId,
        namespace: Option<&str>,
    ) -> Result<(), ExplainError> {
        let element = &self.elements[id.0];
        let name = element.tag.as_str();

        let mut start = BytesStart::new(name);
        if let Some(namespace) = namespace {
            start.push_attribute(("xmlns", namespace));
        }
        if let Some(operator) = element.operator {
            start.push_attribute(("operator", operator.name()));
        }

        let text = element.text.as_deref().unwrap_or_default();
        if text.is_empty() && element.children.is_empty() {
            return writer.write_event(Event::Empty(start)).map_err(xml_error);
        }

        writer.write_event(Event::Start(start)).map_err(xml_error)?;
        if !text.is_empty() {
            writer
                .write_event(Event::Text(BytesText::from_escaped(partial_escape(text))))
                .map_err(xml_error)?;
        }
        for &child in &element.children {
            self.write_element(writer, child, None)?;
        }
        writer
            .write_event(Event::End(BytesEnd::new(name)))
            .map_err(xml_error)
    }

    fn view(&self, id: ElementId) -> ElementView<'_> {
        ElementView { document: self, id }
    }
}

fn xml_error(err: impl fmt::Display) -> ExplainError {
    ExplainError::Xml(err.to_string())
}

/// Serializes as the list of top-level elements, each a nested
/// `{ "tag", "operator"?, "text"?, "children" }` object.
impl Serialize for ExplainDocument {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.roots.len()))?;
        for &root in &self.roots {
            seq.serialize_element(&self.view(root))?;
        }
        seq.end()
    }
}

struct ElementView<'d> {
    document: &'d ExplainDocument,
    id: ElementId,
}

impl Serialize for ElementView<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let element = &self.document.elements[self.id.0];
        let mut state = serializer.serialize_struct("ExplainElement", 4)?;
        state.serialize_field("tag", &element.tag)?;
        match element.operator {
            Some(operator) => state.serialize_field("operator", operator.name())?,
            None => state.skip_field("operator")?,
        }
        match &element.text {
            Some(text) => state.serialize_field("text", text)?,
            None => state.skip_field("text")?,
        }
        let children: Vec<_> = element
            .children
            .iter()
            .map(|&child| self.document.view(child))
            .collect();
        state.serialize_field("children", &children)?;
        state.end()
    }
}

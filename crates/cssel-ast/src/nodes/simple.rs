// Copyright (c) Ken Kocienda and other contributors.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! Simple selectors: the leaf predicates of a selector sequence.

use serde::{Deserialize, Serialize};

use super::AstError;

/// A single non-combinator predicate applying to one element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SimpleSelector {
    /// `*` or `ns|*`
    Universal(UniversalSelector),
    /// `div` or `ns|div`
    Type(TypeSelector),
    /// `#main`
    Id(IdSelector),
    /// `.item`
    ClassName(ClassSelector),
    /// `[href^="http"]`
    Attribute(AttributeSelector),
}

impl From<UniversalSelector> for SimpleSelector {
    fn from(node: UniversalSelector) -> Self {
        SimpleSelector::Universal(node)
    }
}

impl From<TypeSelector> for SimpleSelector {
    fn from(node: TypeSelector) -> Self {
        SimpleSelector::Type(node)
    }
}

impl From<IdSelector> for SimpleSelector {
    fn from(node: IdSelector) -> Self {
        SimpleSelector::Id(node)
    }
}

impl From<ClassSelector> for SimpleSelector {
    fn from(node: ClassSelector) -> Self {
        SimpleSelector::ClassName(node)
    }
}

impl From<AttributeSelector> for SimpleSelector {
    fn from(node: AttributeSelector) -> Self {
        SimpleSelector::Attribute(node)
    }
}

/// The universal selector, with an optional namespace prefix.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UniversalSelector {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    namespace_prefix: Option<String>,
}

impl UniversalSelector {
    /// Create an unprefixed universal selector.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a universal selector restricted to a namespace prefix.
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        UniversalSelector {
            namespace_prefix: Some(prefix.into()),
        }
    }

    /// The namespace prefix as written, if any. May be `*` or empty.
    pub fn namespace_prefix(&self) -> Option<&str> {
        self.namespace_prefix.as_deref()
    }
}

/// A type (element name) selector, with an optional namespace prefix.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeSelector {
    element_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    namespace_prefix: Option<String>,
}

impl TypeSelector {
    /// Create an unprefixed type selector.
    pub fn new(element_name: impl Into<String>) -> Self {
        TypeSelector {
            element_name: element_name.into(),
            namespace_prefix: None,
        }
    }

    /// Create a type selector with a namespace prefix.
    pub fn with_prefix(element_name: impl Into<String>, prefix: impl Into<String>) -> Self {
        TypeSelector {
            element_name: element_name.into(),
            namespace_prefix: Some(prefix.into()),
        }
    }

    pub fn element_name(&self) -> &str {
        &self.element_name
    }

    /// The namespace prefix as written, if any. May be `*` or empty.
    pub fn namespace_prefix(&self) -> Option<&str> {
        self.namespace_prefix.as_deref()
    }
}

/// An id selector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdSelector {
    id: String,
}

impl IdSelector {
    pub fn new(id: impl Into<String>) -> Self {
        IdSelector { id: id.into() }
    }

    pub fn id(&self) -> &str {
        &self.id
    }
}

/// A class selector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassSelector {
    class_name: String,
}

impl ClassSelector {
    pub fn new(class_name: impl Into<String>) -> Self {
        ClassSelector {
            class_name: class_name.into(),
        }
    }

    pub fn class_name(&self) -> &str {
        &self.class_name
    }
}

/// How an attribute selector compares the attribute value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttributeMatch {
    /// `[name]`
    Exists,
    /// `[name^="v"]`
    Prefix,
    /// `[name$="v"]`
    Suffix,
    /// `[name*="v"]`
    Substring,
    /// `[name="v"]`
    Equals,
    /// `[name~="v"]`
    Includes,
    /// `[name|="v"]`
    #[serde(rename = "dashmatch")]
    DashMatch,
}

impl AttributeMatch {
    /// All operators, in declaration order.
    pub const ALL: [AttributeMatch; 7] = [
        AttributeMatch::Exists,
        AttributeMatch::Prefix,
        AttributeMatch::Suffix,
        AttributeMatch::Substring,
        AttributeMatch::Equals,
        AttributeMatch::Includes,
        AttributeMatch::DashMatch,
    ];

    /// Resolved operator name, as used in explanation output.
    pub fn name(self) -> &'static str {
        match self {
            AttributeMatch::Exists => "exists",
            AttributeMatch::Prefix => "prefix",
            AttributeMatch::Suffix => "suffix",
            AttributeMatch::Substring => "substring",
            AttributeMatch::Equals => "equals",
            AttributeMatch::Includes => "includes",
            AttributeMatch::DashMatch => "dashmatch",
        }
    }

    /// CSS punctuation for the operator. `Exists` has none.
    pub fn punctuation(self) -> Option<&'static str> {
        match self {
            AttributeMatch::Exists => None,
            AttributeMatch::Prefix => Some("^="),
            AttributeMatch::Suffix => Some("$="),
            AttributeMatch::Substring => Some("*="),
            AttributeMatch::Equals => Some("="),
            AttributeMatch::Includes => Some("~="),
            AttributeMatch::DashMatch => Some("|="),
        }
    }

    /// Whether the operator compares against a literal.
    pub fn takes_literal(self) -> bool {
        self != AttributeMatch::Exists
    }
}

/// An attribute selector.
///
/// The literal is present exactly when the operator is not
/// [`AttributeMatch::Exists`]; both constructors and deserialization keep
/// that invariant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawAttribute", into = "RawAttribute")]
pub struct AttributeSelector {
    name: String,
    operator: AttributeMatch,
    literal: Option<String>,
}

impl AttributeSelector {
    /// `[name]`
    pub fn exists(name: impl Into<String>) -> Self {
        AttributeSelector {
            name: name.into(),
            operator: AttributeMatch::Exists,
            literal: None,
        }
    }

    /// `[name<op>"literal"]`
    ///
    /// Returns [`AstError::UnexpectedLiteral`] when `operator` is
    /// [`AttributeMatch::Exists`]; use [`AttributeSelector::exists`] instead.
    pub fn new(
        name: impl Into<String>,
        operator: AttributeMatch,
        literal: impl Into<String>,
    ) -> Result<Self, AstError> {
        let name = name.into();
        if !operator.takes_literal() {
            return Err(AstError::UnexpectedLiteral { name });
        }
        Ok(AttributeSelector {
            name,
            operator,
            literal: Some(literal.into()),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn operator(&self) -> AttributeMatch {
        self.operator
    }

    /// The comparison literal, unescaped. `None` for `Exists`.
    pub fn literal(&self) -> Option<&str> {
        self.literal.as_deref()
    }
}

/// Wire shape of an attribute selector.
#[derive(Serialize, Deserialize)]
struct RawAttribute {
    name: String,
    operator: AttributeMatch,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    literal: Option<String>,
}

impl TryFrom<RawAttribute> for AttributeSelector {
    type Error = AstError;

    fn try_from(raw: RawAttribute) -> Result<Self, Self::Error> {
        match (raw.operator, raw.literal) {
            (AttributeMatch::Exists, None) => Ok(AttributeSelector::exists(raw.name)),
            (AttributeMatch::Exists, Some(_)) => {
                Err(AstError::UnexpectedLiteral { name: raw.name })
            }
            (operator, Some(literal)) => AttributeSelector::new(raw.name, operator, literal),
            (operator, None) => Err(AstError::MissingLiteral {
                name: raw.name,
                operator: operator.name(),
            }),
        }
    }
}

impl From<AttributeSelector> for RawAttribute {
    fn from(node: AttributeSelector) -> Self {
        RawAttribute {
            name: node.name,
            operator: node.operator,
            literal: node.literal,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod attribute_tests {
        use super::*;

        #[test]
        fn exists_has_no_literal() {
            let attr = AttributeSelector::exists("data-x");
            assert_eq!(attr.name(), "data-x");
            assert_eq!(attr.operator(), AttributeMatch::Exists);
            assert_eq!(attr.literal(), None);
        }

        #[test]
        fn new_rejects_exists_operator() {
            let err = AttributeSelector::new("href", AttributeMatch::Exists, "x").unwrap_err();
            assert_eq!(
                err,
                AstError::UnexpectedLiteral {
                    name: "href".to_string()
                }
            );
        }

        #[test]
        fn new_keeps_empty_literal() {
            let attr = AttributeSelector::new("title", AttributeMatch::Equals, "").unwrap();
            assert_eq!(attr.literal(), Some(""));
        }

        #[test]
        fn deserialize_requires_literal_for_comparisons() {
            let json = r#"{"name":"href","operator":"prefix"}"#;
            let err = serde_json::from_str::<AttributeSelector>(json).unwrap_err();
            assert!(err.to_string().contains("requires a literal"), "{}", err);
        }

        #[test]
        fn deserialize_rejects_literal_on_exists() {
            let json = r#"{"name":"href","operator":"exists","literal":"x"}"#;
            assert!(serde_json::from_str::<AttributeSelector>(json).is_err());
        }

        #[test]
        fn deserialize_dashmatch_name() {
            let json = r#"{"name":"lang","operator":"dashmatch","literal":"en"}"#;
            let attr: AttributeSelector = serde_json::from_str(json).unwrap();
            assert_eq!(attr.operator(), AttributeMatch::DashMatch);
            assert_eq!(attr.literal(), Some("en"));
        }
    }

    mod operator_tests {
        use super::*;

        #[test]
        fn punctuation_table() {
            let table: Vec<_> = AttributeMatch::ALL
                .iter()
                .map(|op| (op.name(), op.punctuation()))
                .collect();
            assert_eq!(
                table,
                vec![
                    ("exists", None),
                    ("prefix", Some("^=")),
                    ("suffix", Some("$=")),
                    ("substring", Some("*=")),
                    ("equals", Some("=")),
                    ("includes", Some("~=")),
                    ("dashmatch", Some("|=")),
                ]
            );
        }

        #[test]
        fn only_exists_skips_literal() {
            for op in AttributeMatch::ALL {
                assert_eq!(op.takes_literal(), op != AttributeMatch::Exists);
            }
        }
    }

    #[test]
    fn simple_selector_json_shape() {
        let node = SimpleSelector::from(TypeSelector::with_prefix("a", "xhtml"));
        let json = serde_json::to_string(&node).unwrap();
        assert_eq!(
            json,
            r#"{"type":{"element_name":"a","namespace_prefix":"xhtml"}}"#
        );
        let back: SimpleSelector = serde_json::from_str(&json).unwrap();
        assert_eq!(back, node);
    }
}

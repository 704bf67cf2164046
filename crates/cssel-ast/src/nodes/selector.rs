// Copyright (c) Ken Kocienda and other contributors.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! Structural selector nodes: groups, sequences, and combinators.

use serde::{Deserialize, Serialize};

use super::{AstError, SimpleSelector};

/// A comma-separated list of selector sequences.
///
/// Sequence order is preserved for rendering only; the group itself means
/// "any of these".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectorGroup {
    sequences: Vec<SelectorSequence>,
}

impl SelectorGroup {
    pub fn new(sequences: Vec<SelectorSequence>) -> Self {
        SelectorGroup { sequences }
    }

    /// The sequences of this group, in source order.
    pub fn sequences(&self) -> &[SelectorSequence] {
        &self.sequences
    }

    pub fn len(&self) -> usize {
        self.sequences.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sequences.is_empty()
    }
}

impl FromIterator<SelectorSequence> for SelectorGroup {
    fn from_iter<I: IntoIterator<Item = SelectorSequence>>(iter: I) -> Self {
        SelectorGroup::new(iter.into_iter().collect())
    }
}

/// One or more simple selectors applying to the same element, optionally
/// followed by a combinator and the sequence it relates to.
///
/// A sequence always holds at least one simple selector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawSequence", into = "RawSequence")]
pub struct SelectorSequence {
    simples: Vec<SimpleSelector>,
    combinator: Option<Combinator>,
}

impl SelectorSequence {
    /// Create a sequence from its simple selectors.
    ///
    /// Returns [`AstError::EmptySequence`] if `simples` is empty.
    pub fn new(simples: Vec<SimpleSelector>) -> Result<Self, AstError> {
        if simples.is_empty() {
            return Err(AstError::EmptySequence);
        }
        Ok(SelectorSequence {
            simples,
            combinator: None,
        })
    }

    /// Create a sequence holding a single simple selector.
    pub fn single(simple: impl Into<SimpleSelector>) -> Self {
        SelectorSequence {
            simples: vec![simple.into()],
            combinator: None,
        }
    }

    /// Relate `next` to the last sequence of this chain.
    ///
    /// Calling `a.chain(Child, b).chain(Next, c)` builds `a > b + c`. Each
    /// call walks to the tail of the chain, so prefer [`Self::chain_all`] for
    /// long chains.
    pub fn chain(mut self, kind: CombinatorKind, next: SelectorSequence) -> Self {
        let mut slot = &mut self.combinator;
        while let Some(existing) = slot {
            slot = &mut existing.sequence.combinator;
        }
        *slot = Some(Combinator::new(kind, next));
        self
    }

    /// Append every `(kind, sequence)` link in order, building the chain
    /// from its tail.
    ///
    /// `a.chain_all([(Child, b), (Next, c)])` builds `a > b + c`.
    ///
    /// Walks recurse once per combinator, so chain depth is bounded by the
    /// thread's stack. JSON input is capped well below that by the decoder's
    /// nesting limit.
    pub fn chain_all<I>(self, links: I) -> Self
    where
        I: IntoIterator<Item = (CombinatorKind, SelectorSequence)>,
    {
        let mut links: Vec<_> = links.into_iter().collect();
        let Some((mut kind, mut tail)) = links.pop() else {
            return self;
        };
        while let Some((previous_kind, previous)) = links.pop() {
            tail = previous.chain(kind, tail);
            kind = previous_kind;
        }
        self.chain(kind, tail)
    }

    /// The simple selectors of this sequence, in source order. Never empty.
    pub fn simples(&self) -> &[SimpleSelector] {
        &self.simples
    }

    /// The combinator relating this sequence to the next one, if any.
    pub fn combinator(&self) -> Option<&Combinator> {
        self.combinator.as_ref()
    }
}

/// Wire shape of a selector sequence.
#[derive(Serialize, Deserialize)]
struct RawSequence {
    simples: Vec<SimpleSelector>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    combinator: Option<Combinator>,
}

impl TryFrom<RawSequence> for SelectorSequence {
    type Error = AstError;

    fn try_from(raw: RawSequence) -> Result<Self, Self::Error> {
        let mut sequence = SelectorSequence::new(raw.simples)?;
        sequence.combinator = raw.combinator;
        Ok(sequence)
    }
}

impl From<SelectorSequence> for RawSequence {
    fn from(node: SelectorSequence) -> Self {
        RawSequence {
            simples: node.simples,
            combinator: node.combinator,
        }
    }
}

/// The relation between two sequences.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CombinatorKind {
    /// `a b`
    Descendant,
    /// `a > b`
    Child,
    /// `a ~ b`
    Follower,
    /// `a + b`
    Next,
}

impl CombinatorKind {
    /// All combinator kinds, in declaration order.
    pub const ALL: [CombinatorKind; 4] = [
        CombinatorKind::Descendant,
        CombinatorKind::Child,
        CombinatorKind::Follower,
        CombinatorKind::Next,
    ];

    /// Lowercase kind name.
    pub fn name(self) -> &'static str {
        match self {
            CombinatorKind::Descendant => "descendant",
            CombinatorKind::Child => "child",
            CombinatorKind::Follower => "follower",
            CombinatorKind::Next => "next",
        }
    }

    /// The combinator as written between two sequences, surrounding spaces included.
    pub fn punctuation(self) -> &'static str {
        match self {
            CombinatorKind::Descendant => " ",
            CombinatorKind::Child => " > ",
            CombinatorKind::Follower => " ~ ",
            CombinatorKind::Next => " + ",
        }
    }
}

/// A combinator and the sequence on its right-hand side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Combinator {
    kind: CombinatorKind,
    sequence: Box<SelectorSequence>,
}

impl Combinator {
    pub fn new(kind: CombinatorKind, sequence: SelectorSequence) -> Self {
        Combinator {
            kind,
            sequence: Box::new(sequence),
        }
    }

    pub fn kind(&self) -> CombinatorKind {
        self.kind
    }

    /// The sequence this combinator leads to.
    pub fn sequence(&self) -> &SelectorSequence {
        &self.sequence
    }
}

// Unlink the tail one combinator at a time so dropping a long chain does
// not recurse.
impl Drop for Combinator {
    fn drop(&mut self) {
        let mut next = self.sequence.combinator.take();
        while let Some(mut combinator) = next {
            next = combinator.sequence.combinator.take();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nodes::{ClassSelector, IdSelector, TypeSelector};

    #[test]
    fn empty_sequence_is_rejected() {
        assert_eq!(SelectorSequence::new(vec![]), Err(AstError::EmptySequence));
    }

    #[test]
    fn chain_appends_at_tail() {
        let seq = SelectorSequence::single(TypeSelector::new("a"))
            .chain(
                CombinatorKind::Child,
                SelectorSequence::single(TypeSelector::new("b")),
            )
            .chain(
                CombinatorKind::Next,
                SelectorSequence::single(TypeSelector::new("c")),
            );

        let first = seq.combinator().unwrap();
        assert_eq!(first.kind(), CombinatorKind::Child);
        let second = first.sequence().combinator().unwrap();
        assert_eq!(second.kind(), CombinatorKind::Next);
        assert_eq!(
            second.sequence().simples(),
            &[SimpleSelector::Type(TypeSelector::new("c"))]
        );
        assert!(second.sequence().combinator().is_none());
    }

    #[test]
    fn chain_all_matches_repeated_chain() {
        let links = || {
            [
                (CombinatorKind::Child, TypeSelector::new("b")),
                (CombinatorKind::Next, TypeSelector::new("c")),
                (CombinatorKind::Descendant, TypeSelector::new("d")),
            ]
            .map(|(kind, simple)| (kind, SelectorSequence::single(simple)))
        };
        let head = || SelectorSequence::single(TypeSelector::new("a"));

        let stepwise = links()
            .into_iter()
            .fold(head(), |seq, (kind, next)| seq.chain(kind, next));
        assert_eq!(head().chain_all(links()), stepwise);
        assert_eq!(head().chain_all([]), head());
    }

    #[test]
    fn long_chain_builds_and_drops_without_recursion() {
        const LINKS: usize = 100_000;
        let link = || {
            (
                CombinatorKind::Descendant,
                SelectorSequence::single(TypeSelector::new("b")),
            )
        };
        let seq = SelectorSequence::single(TypeSelector::new("a"))
            .chain_all((0..LINKS).map(|_| link()))
            .chain(
                CombinatorKind::Child,
                SelectorSequence::single(TypeSelector::new("z")),
            );

        let mut depth = 0;
        let mut current = &seq;
        while let Some(combinator) = current.combinator() {
            depth += 1;
            current = combinator.sequence();
        }
        assert_eq!(depth, LINKS + 1);
        assert_eq!(
            current.simples(),
            &[SimpleSelector::Type(TypeSelector::new("z"))]
        );
        drop(seq);
    }

    #[test]
    fn punctuation_is_fixed_per_kind() {
        let table: Vec<_> = CombinatorKind::ALL
            .iter()
            .map(|kind| (kind.name(), kind.punctuation()))
            .collect();
        assert_eq!(
            table,
            vec![
                ("descendant", " "),
                ("child", " > "),
                ("follower", " ~ "),
                ("next", " + "),
            ]
        );
    }

    #[test]
    fn group_collects_from_iterator() {
        let group: SelectorGroup = vec![
            SelectorSequence::single(IdSelector::new("main")),
            SelectorSequence::single(ClassSelector::new("item")),
        ]
        .into_iter()
        .collect();
        assert_eq!(group.len(), 2);
        assert!(!group.is_empty());
    }

    mod serde_tests {
        use super::*;

        #[test]
        fn deserialize_chained_sequence() {
            let json = r#"{
                "sequences": [{
                    "simples": [{"type": {"element_name": "ul"}}],
                    "combinator": {
                        "kind": "child",
                        "sequence": {"simples": [{"class_name": {"class_name": "item"}}]}
                    }
                }]
            }"#;
            let group: SelectorGroup = serde_json::from_str(json).unwrap();
            let expected = SelectorGroup::new(vec![SelectorSequence::single(TypeSelector::new(
                "ul",
            ))
            .chain(
                CombinatorKind::Child,
                SelectorSequence::single(ClassSelector::new("item")),
            )]);
            assert_eq!(group, expected);
        }

        #[test]
        fn deserialize_rejects_empty_nested_sequence() {
            let json = r#"{
                "sequences": [{
                    "simples": [{"universal": {}}],
                    "combinator": {"kind": "descendant", "sequence": {"simples": []}}
                }]
            }"#;
            let err = serde_json::from_str::<SelectorGroup>(json).unwrap_err();
            assert!(err.to_string().contains("at least one simple selector"), "{}", err);
        }

        #[test]
        fn serialize_omits_missing_combinator() {
            let seq = SelectorSequence::single(IdSelector::new("x"));
            let json = serde_json::to_string(&seq).unwrap();
            assert_eq!(json, r#"{"simples":[{"id":{"id":"x"}}]}"#);
        }
    }
}

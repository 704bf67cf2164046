//! Compile-only test to verify public API surface.
//!
//! This file serves as a compile-time contract for the public API.
//! If this file fails to compile, the public API has regressed.
//!
//! Run with: cargo test -- api_surface

// Allow unused imports - this test is about compile-time verification, not runtime usage
#![allow(unused_imports)]

// ============================================================================
// AST Types
// ============================================================================

use cssel::ast::nodes::{
    AstError, AttributeMatch, AttributeSelector, ClassSelector, Combinator, CombinatorKind,
    IdSelector, NodeKind, NodeRef, SelectorGroup, SelectorSequence, SimpleSelector, TypeSelector,
    UniversalSelector,
};

// ============================================================================
// Visitor Infrastructure
// ============================================================================

use cssel::ast::visitor::{
    escape_literal, explain, qualify, walk, walk_combinator, walk_group, walk_sequence,
    walk_simple_selector, Explain, ExplainError, VisitResult, Visitor,
};

// ============================================================================
// Explanation Documents
// ============================================================================

use cssel::ast::document::{
    ElementId, ExplainDocument, ExplainElement, ExplainOptions, ExplainTag, EXPLAIN_NAMESPACE,
};

// ============================================================================
// Front Door
// ============================================================================

use cssel::cli::{explain_group, parse_group, read_group, run_explain, ExplainSettings};
use cssel::config::{Config, ExplainConfig, OutputFormat};
use cssel::error::{CsselError, OutputErrorCode};
use cssel::output::{emit_response, ErrorInfo, ErrorResponse, ExplainResponse, SCHEMA_VERSION};

// ============================================================================
// Test
// ============================================================================

#[test]
fn api_surface_compiles() {
    // This test exists only to verify imports compile.
    // If you're here because this test broke, you may have
    // accidentally removed a public re-export.
    let _ = std::any::type_name::<SelectorGroup>();
    let _ = std::any::type_name::<Explain>();
    let _ = std::any::type_name::<ExplainDocument>();
    let _ = std::any::type_name::<CsselError>();
    let _ = std::any::type_name::<Config>();
}

#[test]
fn ast_is_shareable_across_threads() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<SelectorGroup>();
    assert_send_sync::<SelectorSequence>();
    assert_send_sync::<Combinator>();
    assert_send_sync::<SimpleSelector>();
}

#[test]
fn schema_version_is_stable() {
    // The schema version is part of the public API contract
    assert_eq!(SCHEMA_VERSION, "1");
}

#[test]
fn explain_namespace_is_stable() {
    assert_eq!(EXPLAIN_NAMESPACE, "urn:carica-phpcss-explain-2014");
}

//! cssel: explain CSS selector trees
//!
//! Reads an already-parsed selector tree, walks it with the explain visitor
//! from `cssel-ast`, and prints an annotated XML document, the
//! reconstructed selector, or a JSON response.

// Core infrastructure
pub mod config;
pub mod error;
pub mod output;

// Front door
pub mod cli;

// Error bridges - converts AST and decoding errors to CsselError
mod error_bridges;

pub use cssel_ast as ast;

//! Error bridge implementations for decoding errors.
//!
//! This module provides `impl From<X> for CsselError` conversions from the
//! decoding libraries to the unified `CsselError` type. The `ExplainError`
//! and `std::io::Error` bridges are derived on the enum itself. Tree
//! invariant failures (`AstError`) surface through the JSON decoder as data
//! errors.

use serde_json::error::Category;

use crate::error::CsselError;

// ============================================================================
// Bridge: serde_json::Error -> CsselError
// ============================================================================

impl From<serde_json::Error> for CsselError {
    fn from(err: serde_json::Error) -> Self {
        match err.classify() {
            Category::Io => CsselError::Io(err.into()),
            Category::Syntax | Category::Data | Category::Eof => {
                CsselError::invalid_input(err.to_string())
            }
        }
    }
}

// ============================================================================
// Bridge: toml::de::Error -> CsselError
// ============================================================================

impl From<toml::de::Error> for CsselError {
    fn from(err: toml::de::Error) -> Self {
        CsselError::config(format!("failed to parse config file: {}", err.message()))
    }
}

//! JSON output types and serialization for CLI responses.
//!
//! ## Design Principles
//!
//! 1. **Status first:** Every response has `status` as first field
//! 2. **Deterministic:** Same input -> same output (field order, element order)
//! 3. **Versioned:** Schema version in response enables forward compatibility
//! 4. **Errors are JSON too:** failures produce an [`ErrorResponse`] on stdout

use std::io::{self, Write};

use serde::{Deserialize, Serialize};

use cssel_ast::{Explain, ExplainDocument};

use crate::error::{CsselError, OutputErrorCode};

/// Current schema version for all responses.
pub const SCHEMA_VERSION: &str = "1";

// ============================================================================
// Error Types
// ============================================================================

/// Error information for error responses.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorInfo {
    /// Numeric error code (see [`OutputErrorCode`]).
    pub code: u8,
    /// Human-readable message.
    pub message: String,
}

impl ErrorInfo {
    /// Create from a CsselError.
    pub fn from_error(err: &CsselError) -> Self {
        ErrorInfo {
            code: OutputErrorCode::from(err).code(),
            message: err.to_string(),
        }
    }
}

/// Error response.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorResponse {
    /// Status: "error".
    pub status: String,
    /// Schema version for compatibility.
    pub schema_version: String,
    /// Error information.
    pub error: ErrorInfo,
}

impl ErrorResponse {
    /// Create an error response from a CsselError.
    pub fn from_error(err: &CsselError) -> Self {
        ErrorResponse {
            status: "error".to_string(),
            schema_version: SCHEMA_VERSION.to_string(),
            error: ErrorInfo::from_error(err),
        }
    }
}

// ============================================================================
// Response Structs
// ============================================================================

/// Response for the explain command in JSON format.
#[derive(Debug, Clone, Serialize)]
pub struct ExplainResponse<'a> {
    /// Status: "ok".
    pub status: &'static str,
    /// Schema version for compatibility.
    pub schema_version: &'static str,
    /// The reconstructed selector text.
    pub selector: String,
    /// The explanation tree.
    pub document: &'a ExplainDocument,
}

impl<'a> ExplainResponse<'a> {
    pub fn new(explain: &'a Explain) -> Self {
        ExplainResponse {
            status: "ok",
            schema_version: SCHEMA_VERSION,
            selector: explain.text(),
            document: explain.document(),
        }
    }
}

// ============================================================================
// Response Emission
// ============================================================================

/// Emit a response as pretty-printed JSON to a writer.
///
/// The output is deterministic: same input produces identical bytes.
pub fn emit_response<T: Serialize>(response: &T, writer: &mut impl Write) -> io::Result<()> {
    let json = serde_json::to_string_pretty(response)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    writeln!(writer, "{}", json)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    use cssel_ast::{explain, IdSelector, SelectorGroup, SelectorSequence};

    mod error_response {
        use super::*;

        #[test]
        fn status_comes_first() {
            let err = CsselError::invalid_input("empty sequence");
            let mut out = Vec::new();
            emit_response(&ErrorResponse::from_error(&err), &mut out).unwrap();
            let text = String::from_utf8(out).unwrap();
            assert!(text.starts_with("{\n  \"status\": \"error\""), "{}", text);
            assert!(text.ends_with("}\n"));
        }

        #[test]
        fn carries_code_and_message() {
            let err = CsselError::invalid_args("bad indent");
            let response = ErrorResponse::from_error(&err);
            let json = serde_json::to_value(&response).unwrap();
            assert_eq!(
                json,
                serde_json::json!({
                    "status": "error",
                    "schema_version": "1",
                    "error": {"code": 2, "message": "invalid arguments: bad indent"}
                })
            );
        }
    }

    mod explain_response {
        use super::*;

        #[test]
        fn carries_selector_and_document() {
            let group = SelectorGroup::new(vec![SelectorSequence::single(IdSelector::new("x"))]);
            let explained = explain(&group).unwrap();
            let json = serde_json::to_value(ExplainResponse::new(&explained)).unwrap();

            assert_eq!(json["status"], "ok");
            assert_eq!(json["schema_version"], SCHEMA_VERSION);
            assert_eq!(json["selector"], "#x");
            assert_eq!(json["document"][0]["tag"], "selector-group");
            assert_eq!(json["document"][0]["children"][0]["tag"], "selector");
        }

        #[test]
        fn emission_is_deterministic() {
            let group = SelectorGroup::new(vec![SelectorSequence::single(IdSelector::new("x"))]);
            let explained = explain(&group).unwrap();
            let mut first = Vec::new();
            let mut second = Vec::new();
            emit_response(&ExplainResponse::new(&explained), &mut first).unwrap();
            emit_response(&ExplainResponse::new(&explained), &mut second).unwrap();
            assert_eq!(first, second);
        }
    }
}

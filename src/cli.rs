//! CLI front door for cssel.
//!
//! Provides the command-line interface helpers for cssel operations:
//! - `explain` - Render a selector tree as XML, selector text, or JSON
//!
//! The selector tree arrives as JSON (see `cssel_ast::SelectorGroup`); cssel
//! does not parse selector text itself.
//!
//! ## Error Handling
//!
//! All functions return `Result<T, CsselError>`. The `CsselError` type
//! provides stable error codes for JSON output and proper error categorization.

use std::fs;
use std::io::{self, Read};
use std::path::Path;

use tracing::{debug, info, instrument};

use cssel_ast::{walk, Explain, ExplainOptions, SelectorGroup};

use crate::config::{ExplainConfig, OutputFormat};
use crate::error::CsselError;
use crate::output::{emit_response, ExplainResponse};

/// Settings for one `explain` run after merging config and flags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExplainSettings {
    pub format: OutputFormat,
    pub options: ExplainOptions,
}

impl ExplainSettings {
    /// Merge command-line overrides into the configured defaults.
    ///
    /// # Arguments
    ///
    /// * `config` - The `[explain]` section of the loaded config
    /// * `format` - `--format`, if given
    /// * `indent` - `--indent`, if given
    /// * `no_declaration` - `--no-declaration`
    pub fn resolve(
        config: &ExplainConfig,
        format: Option<OutputFormat>,
        indent: Option<usize>,
        no_declaration: bool,
    ) -> Self {
        let mut options = config.options();
        if indent.is_some() {
            options.indent = indent;
        }
        if no_declaration {
            options.xml_declaration = false;
        }
        ExplainSettings {
            format: format.unwrap_or(config.format),
            options,
        }
    }
}

/// Read a selector tree from `path`, or from stdin for `None` or `-`.
pub fn read_group(path: Option<&Path>) -> Result<SelectorGroup, CsselError> {
    match path {
        Some(path) if path != Path::new("-") => {
            debug!(path = %path.display(), "reading selector tree");
            let content = fs::read_to_string(path).map_err(|e| {
                CsselError::invalid_args(format!("cannot read {}: {}", path.display(), e))
            })?;
            parse_group(&content)
        }
        _ => {
            debug!("reading selector tree from stdin");
            let mut content = String::new();
            io::stdin().read_to_string(&mut content)?;
            parse_group(&content)
        }
    }
}

/// Decode a selector tree from JSON, enforcing the tree invariants.
pub fn parse_group(json: &str) -> Result<SelectorGroup, CsselError> {
    Ok(serde_json::from_str(json)?)
}

/// Explain a selector tree.
///
/// # Returns
///
/// The rendered output in the requested format, ending with a newline.
pub fn explain_group(
    group: &SelectorGroup,
    settings: &ExplainSettings,
) -> Result<String, CsselError> {
    let mut explain = Explain::with_options(settings.options.clone());
    walk(&mut explain, group)?;
    info!(
        sequences = group.len(),
        elements = explain.document().len(),
        "explained selector group"
    );

    match settings.format {
        OutputFormat::Xml => Ok(explain.to_xml()?),
        OutputFormat::Text => Ok(format!("{}\n", explain.text())),
        OutputFormat::Json => {
            let mut out = Vec::new();
            emit_response(&ExplainResponse::new(&explain), &mut out)?;
            String::from_utf8(out)
                .map_err(|e| CsselError::internal(format!("JSON output is not UTF-8: {}", e)))
        }
    }
}

/// Read a selector tree and explain it.
#[instrument(skip(settings), fields(format = ?settings.format))]
pub fn run_explain(path: Option<&Path>, settings: &ExplainSettings) -> Result<String, CsselError> {
    let group = read_group(path)?;
    explain_group(&group, settings)
}

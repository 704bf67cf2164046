//! Configuration handling for cssel

use std::fs;
use std::path::Path;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use tracing::debug;

use cssel_ast::{ExplainOptions, EXPLAIN_NAMESPACE};

use crate::error::CsselError;

/// cssel configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct Config {
    /// Explain command settings
    #[serde(default)]
    pub explain: ExplainConfig,
}

/// How `cssel explain` prints its result.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// The explanation document as XML.
    #[default]
    Xml,
    /// The reconstructed selector on one line.
    Text,
    /// A JSON response with the selector and the explanation tree.
    Json,
}

/// Explain settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ExplainConfig {
    /// Namespace declared on the document root
    #[serde(default = "default_namespace")]
    pub namespace: String,

    /// Indent width for XML output; compact when absent
    #[serde(default)]
    pub indent: Option<usize>,

    /// Write the XML declaration
    #[serde(default = "default_xml_declaration")]
    pub xml_declaration: bool,

    /// Default output format
    #[serde(default)]
    pub format: OutputFormat,
}

fn default_namespace() -> String {
    EXPLAIN_NAMESPACE.to_string()
}

fn default_xml_declaration() -> bool {
    true
}

impl Default for ExplainConfig {
    fn default() -> Self {
        Self {
            namespace: default_namespace(),
            indent: None,
            xml_declaration: default_xml_declaration(),
            format: OutputFormat::default(),
        }
    }
}

impl ExplainConfig {
    /// Options for the explain backend.
    pub fn options(&self) -> ExplainOptions {
        ExplainOptions {
            namespace: self.namespace.clone(),
            indent: self.indent,
            xml_declaration: self.xml_declaration,
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, CsselError> {
        let content = fs::read_to_string(path).map_err(|e| {
            CsselError::config(format!(
                "failed to read config file {}: {}",
                path.display(),
                e
            ))
        })?;
        let config = Self::parse(&content)?;
        debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// Parse configuration from TOML text
    pub fn parse(content: &str) -> Result<Self, CsselError> {
        let config: Config = toml::from_str(content)?;
        if config.explain.namespace.is_empty() {
            return Err(CsselError::config("explain.namespace must not be empty"));
        }
        Ok(config)
    }

    /// Load the file at `path`, or defaults when no path is given
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, CsselError> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Config::default()),
        }
    }
}

//! Declaration document loading
//!
//! Turns raw declaration text into a [`DeclValue`]. Terraform sources come
//! in HCL (`.tf`) or JSON (`.tf.json`); YAML is accepted for hand-written
//! fixtures. A syntax error is the only fatal failure in the pipeline.

use std::fmt;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::DeclValue;

/// Syntax of a declaration document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum DocumentFormat {
    #[default]
    Hcl,
    Json,
    Yaml,
}

impl DocumentFormat {
    /// Picks a format from the file name, defaulting to HCL
    pub fn from_path(path: &Path) -> Self {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_lowercase())
            .unwrap_or_default();

        if name.ends_with(".json") {
            DocumentFormat::Json
        } else if name.ends_with(".yaml") || name.ends_with(".yml") {
            DocumentFormat::Yaml
        } else {
            DocumentFormat::Hcl
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentFormat::Hcl => "hcl",
            DocumentFormat::Json => "json",
            DocumentFormat::Yaml => "yaml",
        }
    }
}

impl fmt::Display for DocumentFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The document text is not valid for its format
#[derive(Debug, Error, PartialEq)]
#[error("Invalid {format} document: {message}")]
pub struct ParseError {
    pub format: DocumentFormat,

    /// The underlying syntax issue as reported by the parser
    pub message: String,
}

/// Parses declaration text
pub fn parse_document(text: &str, format: DocumentFormat) -> Result<DeclValue, ParseError> {
    let parsed = match format {
        DocumentFormat::Hcl => hcl::from_str::<DeclValue>(text).map_err(|e| e.to_string()),
        DocumentFormat::Json => serde_json::from_str::<DeclValue>(text).map_err(|e| e.to_string()),
        DocumentFormat::Yaml => serde_yaml::from_str::<DeclValue>(text).map_err(|e| e.to_string()),
    };

    parsed.map_err(|message| ParseError { format, message })
}

/// Reads and parses a declaration file
///
/// The format is taken from `format` when given, otherwise from the file name.
pub fn load_document(path: &Path, format: Option<DocumentFormat>) -> Result<DeclValue> {
    let format = format.unwrap_or_else(|| DocumentFormat::from_path(path));

    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read declaration file: {}", path.display()))?;

    let document = parse_document(&text, format)
        .with_context(|| format!("Failed to parse declaration file: {}", path.display()))?;

    Ok(document)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use tempfile::TempDir;

    #[test]
    fn format_from_path() {
        assert_eq!(DocumentFormat::from_path(Path::new("main.tf")), DocumentFormat::Hcl);
        assert_eq!(DocumentFormat::from_path(Path::new("main.tf.json")), DocumentFormat::Json);
        assert_eq!(DocumentFormat::from_path(Path::new("stack.YAML")), DocumentFormat::Yaml);
        assert_eq!(DocumentFormat::from_path(Path::new("stack.yml")), DocumentFormat::Yaml);
        assert_eq!(DocumentFormat::from_path(Path::new("noext")), DocumentFormat::Hcl);
        assert_eq!(DocumentFormat::from_path(&PathBuf::new()), DocumentFormat::Hcl);
    }

    #[test]
    fn parse_hcl_resource_block() {
        let doc = parse_document(
            r#"
resource "compute-instance" "web" {
  size = "small"
}
"#,
            DocumentFormat::Hcl,
        )
        .unwrap();

        let web = doc
            .get("resource")
            .and_then(|r| r.get("compute-instance"))
            .and_then(|t| t.get("web"))
            .unwrap();
        assert_eq!(web.get("size").and_then(|v| v.as_str()), Some("small"));
    }

    #[test]
    fn hcl_repeated_block_last_declaration_wins() {
        use crate::domain::{extract_resources, CategoryRegistry, DiagnosticKind};

        let doc = parse_document(
            r#"
resource "aws_instance" "web" {
  v = 1
}

resource "aws_s3_bucket" "assets" {}

resource "aws_instance" "web" {
  v = 2
}
"#,
            DocumentFormat::Hcl,
        )
        .unwrap();

        let out = extract_resources(&doc, &CategoryRegistry::builtin());
        assert_eq!(out.resources.len(), 2);

        let kinds: Vec<_> = out.diagnostics.iter().map(|d| d.kind).collect();
        assert_eq!(kinds, vec![DiagnosticKind::DuplicateResource]);
        assert_eq!(out.diagnostics[0].subject.as_deref(), Some("aws_instance.web"));

        let web = out.resources.get("aws_instance.web").unwrap();
        assert_eq!(web.raw_config.get("v"), Some(&DeclValue::from(2)));
    }

    #[test]
    fn parse_hcl_unterminated_block_fails() {
        let err = parse_document(
            r#"resource "compute-instance" "web" {
  size = "small"
"#,
            DocumentFormat::Hcl,
        )
        .unwrap_err();

        assert_eq!(err.format, DocumentFormat::Hcl);
        assert!(!err.message.is_empty());
        assert!(err.to_string().starts_with("Invalid hcl document"));
    }

    #[test]
    fn parse_json_and_yaml() {
        let json = parse_document(
            r#"{"resource": [{"aws_instance": {"web": {}}}]}"#,
            DocumentFormat::Json,
        )
        .unwrap();
        assert!(json.get("resource").and_then(|r| r.as_sequence()).is_some());

        let yaml = parse_document(
            "resource:\n  aws_instance:\n    web:\n      depends_on: [aws_s3_bucket.assets]\n",
            DocumentFormat::Yaml,
        )
        .unwrap();
        let deps = yaml
            .get("resource")
            .and_then(|r| r.get("aws_instance"))
            .and_then(|t| t.get("web"))
            .and_then(|w| w.get("depends_on"))
            .and_then(|d| d.as_sequence())
            .unwrap();
        assert_eq!(deps[0].as_str(), Some("aws_s3_bucket.assets"));
    }

    #[test]
    fn parse_invalid_json_fails() {
        let err = parse_document(r#"{"resource": ["#, DocumentFormat::Json).unwrap_err();
        assert_eq!(err.format, DocumentFormat::Json);
    }

    #[test]
    fn load_uses_extension_and_override() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("main.tf.json");
        fs::write(&path, r#"{"resource": {}}"#).unwrap();

        let doc = load_document(&path, None).unwrap();
        assert!(doc.get("resource").is_some());

        // JSON is valid YAML too
        assert!(load_document(&path, Some(DocumentFormat::Yaml)).is_ok());
    }

    #[test]
    fn load_missing_file_fails() {
        let dir = TempDir::new().unwrap();
        let err = load_document(&dir.path().join("nope.tf"), None).unwrap_err();
        assert!(format!("{:#}", err).contains("Failed to read declaration file"));
    }

    #[test]
    fn load_reports_parse_error_as_cause() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("broken.tf");
        fs::write(&path, "resource \"a\" \"b\" {").unwrap();

        let err = load_document(&path, None).unwrap_err();
        assert!(err.downcast_ref::<ParseError>().is_some());
    }
}

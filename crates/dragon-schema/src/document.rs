//! # Document Loading
//!
//! Reads manifest and publisher files into `serde_json::Value` so they can
//! be validated. Manifests are usually YAML, publisher configs JSON; the
//! format is picked from the file extension.

use std::path::Path;

use serde_json::Value;

use crate::error::SchemaError;

/// On-disk document format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Yaml,
    Json,
}

impl DocumentFormat {
    /// `.json` is JSON; everything else (`.yaml`, `.yml`, no extension) is
    /// parsed as YAML, which also accepts most JSON.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Self::Json,
            _ => Self::Yaml,
        }
    }
}

/// Parse document text in the given format.
pub fn parse_document(content: &str, format: DocumentFormat) -> Result<Value, String> {
    match format {
        DocumentFormat::Json => {
            serde_json::from_str(content).map_err(|e| format!("invalid JSON: {e}"))
        }
        DocumentFormat::Yaml => {
            serde_yaml::from_str(content).map_err(|e| format!("invalid YAML: {e}"))
        }
    }
}

/// Read and parse the document at `path`.
///
/// # Errors
///
/// Returns [`SchemaError::DocumentLoad`] when the file cannot be read or
/// does not parse.
pub fn load_document(path: &Path) -> Result<Value, SchemaError> {
    let content = std::fs::read_to_string(path).map_err(|e| SchemaError::DocumentLoad {
        path: path.display().to_string(),
        reason: format!("cannot read file: {e}"),
    })?;
    parse_document(&content, DocumentFormat::from_path(path)).map_err(|reason| {
        SchemaError::DocumentLoad {
            path: path.display().to_string(),
            reason,
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_format_from_path() {
        assert_eq!(DocumentFormat::from_path(Path::new("publisher.json")), DocumentFormat::Json);
        assert_eq!(DocumentFormat::from_path(Path::new("a.JSON")), DocumentFormat::Json);
        assert_eq!(DocumentFormat::from_path(Path::new("extension.yaml")), DocumentFormat::Yaml);
        assert_eq!(DocumentFormat::from_path(Path::new("manifest")), DocumentFormat::Yaml);
    }

    #[test]
    fn test_yaml_parses_to_json_tree() {
        let yaml = "name: demo\nversion: 1.0.0\ntimeout: 30\nnote-sections:\n  hpi:\n    - hpi\n  results: ~\n";
        let value = parse_document(yaml, DocumentFormat::Yaml).unwrap();
        assert_eq!(
            value,
            json!({
                "name": "demo",
                "version": "1.0.0",
                "timeout": 30,
                "note-sections": { "hpi": ["hpi"], "results": null }
            })
        );
    }

    #[test]
    fn test_yaml_scalars_keep_their_types() {
        let value = parse_document(
            "enabled: true\nratio: 0.5\ncount: -3\nrequired: \"no\"\n",
            DocumentFormat::Yaml,
        )
        .unwrap();
        assert_eq!(
            value,
            json!({"enabled": true, "ratio": 0.5, "count": -3, "required": "no"})
        );
    }

    #[test]
    fn test_yaml_key_order_is_kept() {
        let value = parse_document("zeta: 1\nalpha: 2\nmid: 3\n", DocumentFormat::Yaml).unwrap();
        let keys: Vec<&str> = value.as_object().unwrap().keys().map(String::as_str).collect();
        assert_eq!(keys, ["zeta", "alpha", "mid"]);
    }

    #[test]
    fn test_invalid_inputs() {
        assert!(parse_document("{ not json", DocumentFormat::Json)
            .unwrap_err()
            .starts_with("invalid JSON"));
        assert!(parse_document("a: [unclosed", DocumentFormat::Yaml)
            .unwrap_err()
            .starts_with("invalid YAML"));
    }

    #[test]
    fn test_load_document_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_document(&dir.path().join("absent.yaml")).unwrap_err();
        assert!(matches!(err, SchemaError::DocumentLoad { .. }));
    }

    #[test]
    fn test_load_document_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("publisher.json");
        std::fs::write(&path, r#"{"publisherId": "contoso.healthcare"}"#).unwrap();
        assert_eq!(load_document(&path).unwrap()["publisherId"], json!("contoso.healthcare"));
    }
}

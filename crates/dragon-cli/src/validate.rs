//! # Validate Subcommand
//!
//! Validates a manifest and the `publisher.json` that accompanies it.
//!
//! The manifest profile is detected from the document unless `--profile`
//! names one. The publisher config defaults to `publisher.json` in the
//! manifest's directory; when that default is absent the run only warns.
//! An explicitly given `--publisher` path must exist.

use std::fmt;
use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::{Args, ValueEnum};
use dragon_core::{field_display_name, ValidationError, ValidationResult};
use dragon_manifest::{ManifestProfile, ManifestValidator};
use dragon_schema::{load_document, SchemaRegistry};
use serde::Serialize;
use serde_json::Value;

use crate::{EXIT_FAILURE, EXIT_INVALID};

pub const PUBLISHER_FILE_NAME: &str = "publisher.json";

/// Arguments for the `dragon validate` subcommand.
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Manifest file (YAML or JSON).
    #[arg(value_name = "MANIFEST")]
    pub manifest: PathBuf,

    /// Manifest profile; `auto` inspects the document.
    #[arg(long, value_enum, default_value_t = ProfileArg::Auto)]
    pub profile: ProfileArg,

    /// Publisher config. Defaults to `publisher.json` beside the manifest.
    #[arg(long, value_name = "PATH")]
    pub publisher: Option<PathBuf>,

    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileArg {
    Auto,
    Extension,
    Connector,
}

impl ProfileArg {
    pub fn resolve(self, document: &Value) -> ManifestProfile {
        match self {
            Self::Auto => ManifestProfile::detect(document),
            Self::Extension => ManifestProfile::Extension,
            Self::Connector => ManifestProfile::Connector,
        }
    }
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

/// Publisher config outcome.
#[derive(Debug)]
pub enum PublisherCheck {
    /// The default `publisher.json` does not exist.
    Missing(PathBuf),
    Checked {
        path: PathBuf,
        document: Value,
        result: ValidationResult,
    },
}

/// Everything `dragon validate` reports.
#[derive(Debug)]
pub struct ValidationReport {
    pub manifest_path: PathBuf,
    pub profile: ManifestProfile,
    pub manifest: Value,
    pub manifest_result: ValidationResult,
    pub publisher: PublisherCheck,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        let publisher_valid = match &self.publisher {
            PublisherCheck::Missing(_) => true,
            PublisherCheck::Checked { result, .. } => result.is_valid(),
        };
        self.manifest_result.is_valid() && publisher_valid
    }

    pub fn warnings(&self) -> Vec<String> {
        match &self.publisher {
            PublisherCheck::Missing(path) => vec![format!(
                "No {} found at {} - consider creating one for publishing",
                PUBLISHER_FILE_NAME,
                path.display()
            )],
            PublisherCheck::Checked { .. } => Vec::new(),
        }
    }

    /// Human-readable report: grouped error bullets, then either the
    /// failure line or a summary of the manifest contents.
    pub fn render_text(&self) -> String {
        self.to_string()
    }

    fn publisher_error_count(&self) -> usize {
        match &self.publisher {
            PublisherCheck::Missing(_) => 0,
            PublisherCheck::Checked { result, .. } => result.len(),
        }
    }

    pub fn to_json(&self) -> serde_json::Result<Value> {
        #[derive(Serialize)]
        #[serde(rename_all = "camelCase")]
        struct DocumentReport<'a> {
            path: String,
            is_valid: bool,
            errors: &'a [ValidationError],
        }

        #[derive(Serialize)]
        #[serde(rename_all = "camelCase")]
        struct JsonReport<'a> {
            is_valid: bool,
            profile: ManifestProfile,
            manifest: DocumentReport<'a>,
            publisher: Option<DocumentReport<'a>>,
            warnings: Vec<String>,
        }

        let publisher = match &self.publisher {
            PublisherCheck::Missing(_) => None,
            PublisherCheck::Checked { path, result, .. } => Some(DocumentReport {
                path: path.display().to_string(),
                is_valid: result.is_valid(),
                errors: result.errors(),
            }),
        };
        let report = JsonReport {
            is_valid: self.is_valid(),
            profile: self.profile,
            manifest: DocumentReport {
                path: self.manifest_path.display().to_string(),
                is_valid: self.manifest_result.is_valid(),
                errors: self.manifest_result.errors(),
            },
            publisher,
            warnings: self.warnings(),
        };
        serde_json::to_value(report)
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Validating {} manifest", self.profile)?;
        writeln!(f, "File: {}", self.manifest_path.display())?;

        if !self.manifest_result.is_valid() {
            writeln!(f, "\nManifest validation failed with errors:")?;
            for error in self.manifest_result.errors() {
                writeln!(f, "  • {}: {}", manifest_label(error), error.message)?;
            }
        }

        if let PublisherCheck::Checked { result, .. } = &self.publisher {
            if !result.is_valid() {
                writeln!(f, "\nPublisher config validation failed with errors:")?;
                for error in result.errors() {
                    writeln!(f, "  • {}: {}", publisher_label(error), error.message)?;
                }
            }
        }

        for warning in self.warnings() {
            writeln!(f, "\nWarning: {warning}")?;
        }

        if !self.is_valid() {
            writeln!(
                f,
                "\nValidation failed: {} manifest error(s), {} publisher error(s)",
                self.manifest_result.len(),
                self.publisher_error_count()
            )?;
            return Ok(());
        }

        writeln!(f, "\nValidation passed!")?;
        writeln!(f, "\nSummary:")?;
        self.write_summary(f)
    }
}

impl ValidationReport {
    fn write_summary(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let doc = &self.manifest;
        writeln!(
            f,
            "  • Manifest: {} v{}",
            str_field(doc, "name"),
            str_field(doc, "version")
        )?;
        writeln!(f, "  • Description: {}", str_field(doc, "description"))?;

        match self.profile {
            ManifestProfile::Extension => {
                let tenant = doc
                    .pointer("/auth/tenantId")
                    .and_then(Value::as_str)
                    .unwrap_or("Not specified");
                writeln!(f, "  • Auth Tenant ID: {tenant}")?;
                writeln!(f, "  • Tools: {}", count(doc, "/tools"))?;
                writeln!(f, "  • Automation Scripts: {}", count(doc, "/automationScripts"))?;
                writeln!(f, "  • Event Triggers: {}", count(doc, "/eventTriggers"))?;
                writeln!(f, "  • Dependencies: {}", count(doc, "/dependencies"))?;
                for tool in doc.get("tools").and_then(Value::as_array).into_iter().flatten() {
                    writeln!(
                        f,
                        "    - {}: {} inputs, {} outputs",
                        str_field(tool, "name"),
                        count(tool, "/inputs"),
                        count(tool, "/outputs")
                    )?;
                }
            }
            ManifestProfile::Connector => {
                writeln!(f, "  • Partner ID: {}", str_field(doc, "partner-id"))?;
                writeln!(
                    f,
                    "  • Clinical Application: {}",
                    str_field(doc, "clinical-application-name")
                )?;
                writeln!(
                    f,
                    "  • Server Authentication Issuers: {}",
                    count(doc, "/server-authentication")
                )?;
                writeln!(
                    f,
                    "  • Context Items: {}",
                    count(doc, "/instance/context-retrieval/instance")
                )?;
                let sections = doc
                    .get("note-sections")
                    .and_then(Value::as_object)
                    .map_or(0, |m| m.len());
                writeln!(f, "  • Note Sections: {sections}")?;
            }
        }

        if let PublisherCheck::Checked { document, .. } = &self.publisher {
            writeln!(
                f,
                "  • Publisher: {} ({})",
                str_field(document, "publisherName"),
                str_field(document, "publisherId")
            )?;
            writeln!(f, "  • Supported Locales: {}", joined(document, "supportedLocales"))?;
            writeln!(f, "  • Supported Regions: {}", joined(document, "regions"))?;
        }
        Ok(())
    }
}

fn manifest_label(error: &ValidationError) -> &str {
    if error.path.is_empty() {
        "manifest"
    } else {
        &error.path
    }
}

fn publisher_label(error: &ValidationError) -> &str {
    if error.path.is_empty() {
        "config"
    } else {
        field_display_name(&error.path)
    }
}

fn str_field<'a>(doc: &'a Value, key: &str) -> &'a str {
    doc.get(key).and_then(Value::as_str).unwrap_or("-")
}

fn count(doc: &Value, pointer: &str) -> usize {
    doc.pointer(pointer)
        .and_then(Value::as_array)
        .map_or(0, Vec::len)
}

fn joined(doc: &Value, key: &str) -> String {
    let items: Vec<&str> = doc
        .get(key)
        .and_then(Value::as_array)
        .into_iter()
        .flatten()
        .filter_map(Value::as_str)
        .collect();
    if items.is_empty() {
        "None".to_string()
    } else {
        items.join(", ")
    }
}

/// `publisher.json` in the manifest's directory.
pub fn default_publisher_path(manifest: &Path) -> PathBuf {
    manifest
        .parent()
        .map(|dir| dir.join(PUBLISHER_FILE_NAME))
        .unwrap_or_else(|| PathBuf::from(PUBLISHER_FILE_NAME))
}

/// Load and validate the documents named by `args`.
///
/// Returns `Err` with a printable message when a document cannot be read
/// or parsed; validation failures are part of the report.
pub fn build_report(
    args: &ValidateArgs,
    validator: &ManifestValidator<'_>,
) -> std::result::Result<ValidationReport, String> {
    let manifest = load_document(&args.manifest)
        .map_err(|e| format!("Failed to parse manifest file: {e}"))?;
    let profile = args.profile.resolve(&manifest);
    tracing::info!(path = %args.manifest.display(), %profile, "validating manifest");
    let manifest_result = validator.validate_manifest(&manifest, profile);

    let publisher = match &args.publisher {
        Some(path) => check_publisher(validator, path)?,
        None => {
            let path = default_publisher_path(&args.manifest);
            if path.is_file() {
                check_publisher(validator, &path)?
            } else {
                PublisherCheck::Missing(path)
            }
        }
    };

    Ok(ValidationReport {
        manifest_path: args.manifest.clone(),
        profile,
        manifest,
        manifest_result,
        publisher,
    })
}

fn check_publisher(
    validator: &ManifestValidator<'_>,
    path: &Path,
) -> std::result::Result<PublisherCheck, String> {
    let document =
        load_document(path).map_err(|e| format!("Failed to parse publisher config: {e}"))?;
    let result = validator.validate_publisher_config(&document);
    Ok(PublisherCheck::Checked {
        path: path.to_path_buf(),
        document,
        result,
    })
}

/// Execute the validate subcommand.
///
/// Returns exit code: 0 when valid, 1 on validation errors, 2 when a
/// document cannot be parsed.
pub fn run_validate(args: &ValidateArgs, registry: &SchemaRegistry) -> Result<u8> {
    let validator = ManifestValidator::new(registry);
    let report = match build_report(args, &validator) {
        Ok(report) => report,
        Err(message) => {
            eprintln!("{message}");
            return Ok(EXIT_FAILURE);
        }
    };

    match args.format {
        OutputFormat::Text => print!("{}", report.render_text()),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report.to_json()?)?),
    }

    if report.is_valid() {
        Ok(0)
    } else {
        Ok(EXIT_INVALID)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dragon_manifest::{ManifestTemplate, PublisherConfig};
    use serde_json::json;

    fn registry() -> SchemaRegistry {
        let dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
            .join("..")
            .join("dragon-schema")
            .join("schemas");
        SchemaRegistry::load(dir).unwrap()
    }

    fn args(manifest: PathBuf) -> ValidateArgs {
        ValidateArgs {
            manifest,
            profile: ProfileArg::Auto,
            publisher: None,
            format: OutputFormat::Text,
        }
    }

    fn write_extension(dir: &Path) -> PathBuf {
        let path = dir.join("extension.yaml");
        let yaml = ManifestTemplate::new(ManifestProfile::Extension, "demo-ext", "Demo", "1.0.0")
            .to_yaml()
            .unwrap();
        std::fs::write(&path, yaml).unwrap();
        path
    }

    fn write_publisher(dir: &Path, edit: impl FnOnce(&mut Value)) {
        let config = PublisherConfig::with_defaults(
            ManifestProfile::Extension,
            "contoso.healthcare",
            "Contoso Healthcare Inc.",
            "https://www.contosohealth.com",
            "https://www.contosohealth.com/privacy",
            "https://www.contosohealth.com/support",
            "support@contosohealth.com",
            None,
        );
        let mut value = serde_json::to_value(config).unwrap();
        edit(&mut value);
        std::fs::write(dir.join(PUBLISHER_FILE_NAME), value.to_string()).unwrap();
    }

    #[test]
    fn valid_manifest_without_publisher_warns() {
        let dir = tempfile::tempdir().unwrap();
        let manifest = write_extension(dir.path());
        let registry = registry();
        let report = build_report(&args(manifest), &ManifestValidator::new(&registry)).unwrap();
        assert!(report.is_valid());
        assert_eq!(report.warnings().len(), 1);
        let text = report.render_text();
        assert!(text.contains("Validation passed!"));
        assert!(text.contains("  • Tools: 1"));
        assert!(text.contains("    - note-tool: 1 inputs, 1 outputs"));
    }

    #[test]
    fn publisher_errors_use_display_names() {
        let dir = tempfile::tempdir().unwrap();
        let manifest = write_extension(dir.path());
        write_publisher(dir.path(), |v| v["contactEmail"] = json!("nope"));
        let registry = registry();
        let report = build_report(&args(manifest), &ManifestValidator::new(&registry)).unwrap();
        assert!(!report.is_valid());
        let text = report.render_text();
        assert!(text.contains("Publisher config validation failed"));
        assert!(text.contains("  • Contact Email: "), "{text}");
    }

    #[test]
    fn manifest_errors_listed_before_publisher_errors() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("extension.yaml"), "name: x\nversion: '1.0'\ntools: []\n").unwrap();
        write_publisher(dir.path(), |v| v["regions"] = json!(["FR"]));
        let registry = registry();
        let report = build_report(
            &args(dir.path().join("extension.yaml")),
            &ManifestValidator::new(&registry),
        )
        .unwrap();
        let text = report.render_text();
        let manifest_at = text.find("Manifest validation failed").unwrap();
        let publisher_at = text.find("Publisher config validation failed").unwrap();
        assert!(manifest_at < publisher_at);
        assert!(text.contains("  • description: "));
    }

    #[test]
    fn failed_report_ends_at_the_failure_line() {
        let dir = tempfile::tempdir().unwrap();
        let manifest = write_extension(dir.path());
        write_publisher(dir.path(), |v| v["regions"] = json!(["FR"]));
        let registry = registry();
        let report = build_report(&args(manifest), &ManifestValidator::new(&registry)).unwrap();
        let text = report.to_string();
        assert_eq!(text, report.render_text());
        assert!(text.ends_with("Validation failed: 0 manifest error(s), 1 publisher error(s)\n"), "{text}");
        assert!(!text.contains("Summary:"));
    }

    #[test]
    fn passing_report_summarizes_publisher() {
        let dir = tempfile::tempdir().unwrap();
        let manifest = write_extension(dir.path());
        write_publisher(dir.path(), |_| {});
        let registry = registry();
        let report = build_report(&args(manifest), &ManifestValidator::new(&registry)).unwrap();
        let text = report.to_string();
        assert!(text.contains("\nSummary:\n"));
        assert!(text.contains("  • Publisher: "));
        assert!(text.ends_with('\n'));
    }

    #[test]
    fn run_validate_exit_codes() {
        let dir = tempfile::tempdir().unwrap();
        let registry = registry();

        let valid = write_extension(dir.path());
        assert_eq!(run_validate(&args(valid), &registry).unwrap(), 0);

        let invalid = dir.path().join("bad.yaml");
        std::fs::write(&invalid, "name: Bad Name\n").unwrap();
        assert_eq!(run_validate(&args(invalid), &registry).unwrap(), EXIT_INVALID);

        let broken = dir.path().join("broken.yaml");
        std::fs::write(&broken, "name: [unclosed\n").unwrap();
        assert_eq!(run_validate(&args(broken), &registry).unwrap(), EXIT_FAILURE);

        let missing = dir.path().join("missing.yaml");
        assert_eq!(run_validate(&args(missing), &registry).unwrap(), EXIT_FAILURE);
    }

    #[test]
    fn explicit_missing_publisher_is_a_failure() {
        let dir = tempfile::tempdir().unwrap();
        let registry = registry();
        let mut a = args(write_extension(dir.path()));
        a.publisher = Some(dir.path().join("elsewhere.json"));
        assert_eq!(run_validate(&a, &registry).unwrap(), EXIT_FAILURE);
    }

    #[test]
    fn profile_override_applies_connector_schema() {
        let dir = tempfile::tempdir().unwrap();
        let registry = registry();
        let mut a = args(write_extension(dir.path()));
        a.profile = ProfileArg::Connector;
        let report = build_report(&a, &ManifestValidator::new(&registry)).unwrap();
        assert_eq!(report.profile, ManifestProfile::Connector);
        assert!(!report.is_valid());
    }

    #[test]
    fn json_report_shape() {
        let dir = tempfile::tempdir().unwrap();
        let manifest = write_extension(dir.path());
        write_publisher(dir.path(), |_| {});
        let registry = registry();
        let report = build_report(&args(manifest), &ManifestValidator::new(&registry)).unwrap();
        let value = report.to_json().unwrap();
        assert_eq!(value["isValid"], json!(true));
        assert_eq!(value["profile"], json!("extension"));
        assert_eq!(value["manifest"]["errors"], json!([]));
        assert_eq!(value["publisher"]["isValid"], json!(true));
        assert_eq!(value["warnings"], json!([]));
    }

    #[test]
    fn default_publisher_path_is_sibling() {
        assert_eq!(
            default_publisher_path(Path::new("/work/ext/extension.yaml")),
            PathBuf::from("/work/ext/publisher.json")
        );
    }
}

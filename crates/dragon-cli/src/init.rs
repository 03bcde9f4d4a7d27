//! # Init Subcommand
//!
//! Writes a starter manifest and `publisher.json` into a directory.
//!
//! Inputs are checked with the same single-value validators an interactive
//! form would use, then the generated documents are validated in full.
//! Nothing is written unless both documents pass.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::Args;
use dragon_core::input::{
    required_field, validate_email, validate_integration_name, validate_url, validate_version,
};
use dragon_core::ValidationResult;
use dragon_manifest::{ManifestProfile, ManifestTemplate, ManifestValidator, PublisherConfig};
use dragon_schema::SchemaRegistry;

use crate::validate::PUBLISHER_FILE_NAME;
use crate::EXIT_INVALID;

/// Arguments for the `dragon init` subcommand.
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Project kind: extension or connector.
    #[arg(long)]
    pub profile: ManifestProfile,

    #[arg(long)]
    pub name: String,

    #[arg(long)]
    pub description: String,

    #[arg(long, default_value = "1.0.0")]
    pub version: String,

    /// Connector partner identifier (defaults to the name).
    #[arg(long)]
    pub partner_id: Option<String>,

    /// Connector clinical application name (defaults to the name).
    #[arg(long)]
    pub clinical_application_name: Option<String>,

    #[arg(long)]
    pub publisher_id: String,

    #[arg(long)]
    pub publisher_name: String,

    #[arg(long)]
    pub website_url: String,

    #[arg(long)]
    pub privacy_policy_url: String,

    #[arg(long)]
    pub support_url: String,

    #[arg(long)]
    pub contact_email: String,

    /// Marketplace offer identifier (defaults to `<publisher>-suite`).
    #[arg(long)]
    pub offer_id: Option<String>,

    /// Directory to write into; created when missing.
    #[arg(long, default_value = ".")]
    pub output: PathBuf,

    /// Overwrite existing files.
    #[arg(long)]
    pub force: bool,
}

impl InitArgs {
    /// Prompt-time checks, reported per argument.
    fn input_errors(&self) -> Vec<String> {
        let mut checks: Vec<(&str, Result<(), String>)> = vec![
            ("--description", required_field(&self.description)),
            ("--version", validate_version(&self.version)),
            ("--publisher-id", required_field(&self.publisher_id)),
            ("--publisher-name", required_field(&self.publisher_name)),
            ("--website-url", validate_url(&self.website_url)),
            ("--privacy-policy-url", validate_url(&self.privacy_policy_url)),
            ("--support-url", validate_url(&self.support_url)),
            ("--contact-email", validate_email(&self.contact_email)),
        ];
        let name_check = match self.profile {
            ManifestProfile::Extension => required_field(&self.name),
            ManifestProfile::Connector => validate_integration_name(&self.name),
        };
        checks.insert(0, ("--name", name_check));

        checks
            .into_iter()
            .filter_map(|(arg, check)| check.err().map(|message| format!("{arg}: {message}")))
            .collect()
    }

    fn template(&self) -> ManifestTemplate {
        let template = ManifestTemplate::new(
            self.profile,
            self.name.trim(),
            self.description.trim(),
            self.version.trim(),
        );
        match (&self.partner_id, &self.clinical_application_name) {
            (None, None) => template,
            (partner, application) => template.with_partner(
                partner.clone().unwrap_or_else(|| self.name.trim().to_string()),
                application.clone().unwrap_or_else(|| self.name.trim().to_string()),
            ),
        }
    }

    fn publisher(&self) -> PublisherConfig {
        PublisherConfig::with_defaults(
            self.profile,
            self.publisher_id.trim(),
            self.publisher_name.trim(),
            self.website_url.trim(),
            self.privacy_policy_url.trim(),
            self.support_url.trim(),
            self.contact_email.trim(),
            self.offer_id.clone(),
        )
    }
}

/// Files written by a successful `init`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InitOutput {
    pub manifest: PathBuf,
    pub publisher: PathBuf,
}

/// Build, validate and write the project files.
///
/// `Ok(Err(messages))` means the inputs or generated documents were
/// rejected and nothing was written.
pub fn init_project(
    args: &InitArgs,
    registry: &SchemaRegistry,
) -> Result<std::result::Result<InitOutput, Vec<String>>> {
    let input_errors = args.input_errors();
    if !input_errors.is_empty() {
        return Ok(Err(input_errors));
    }

    let template = args.template();
    let manifest = template.render()?;
    let publisher = serde_json::to_value(args.publisher())?;

    let validator = ManifestValidator::new(registry);
    let manifest_result = validator.validate_manifest(&manifest, args.profile);
    let publisher_result = validator.validate_publisher_config(&publisher);
    if !manifest_result.is_valid() || !publisher_result.is_valid() {
        let mut rejected = describe("manifest", &manifest_result);
        rejected.extend(describe(PUBLISHER_FILE_NAME, &publisher_result));
        return Ok(Err(rejected));
    }

    let output = InitOutput {
        manifest: args.output.join(args.profile.manifest_file_name()),
        publisher: args.output.join(PUBLISHER_FILE_NAME),
    };
    if !args.force {
        for path in [&output.manifest, &output.publisher] {
            if path.exists() {
                bail!("{} already exists; pass --force to overwrite", path.display());
            }
        }
    }

    std::fs::create_dir_all(&args.output)
        .with_context(|| format!("failed to create {}", args.output.display()))?;
    write_file(&output.manifest, &template.to_yaml()?)?;
    write_file(&output.publisher, &format!("{}\n", serde_json::to_string_pretty(&publisher)?))?;

    tracing::info!(
        manifest = %output.manifest.display(),
        publisher = %output.publisher.display(),
        profile = %args.profile,
        "project initialized"
    );
    Ok(Ok(output))
}

fn describe(document: &str, result: &ValidationResult) -> Vec<String> {
    result
        .errors()
        .iter()
        .map(|e| format!("{document} {}: {}", e.field_label(), e.message))
        .collect()
}

fn write_file(path: &Path, content: &str) -> Result<()> {
    std::fs::write(path, content).with_context(|| format!("failed to write {}", path.display()))
}

pub fn run_init(args: &InitArgs, registry: &SchemaRegistry) -> Result<u8> {
    match init_project(args, registry)? {
        Ok(output) => {
            println!("Created {}", output.manifest.display());
            println!("Created {}", output.publisher.display());
            Ok(0)
        }
        Err(messages) => {
            println!("Refusing to write invalid project files:");
            for message in messages {
                println!("  • {message}");
            }
            Ok(EXIT_INVALID)
        }
    }
}

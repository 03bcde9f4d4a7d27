//! # Publisher Configuration
//!
//! The `publisher.json` document that ships beside every manifest.

use serde::{Deserialize, Serialize};

use crate::profile::ManifestProfile;

pub const DEFAULT_PUBLISHER_VERSION: &str = "0.0.1";
pub const DEFAULT_LOCALE: &str = "en-US";
pub const DEFAULT_REGION: &str = "US";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublisherConfig {
    pub publisher_id: String,
    pub publisher_name: String,
    pub website_url: String,
    pub privacy_policy_url: String,
    pub support_url: String,
    pub version: String,
    pub contact_email: String,
    pub offer_id: String,
    pub default_locale: String,
    pub supported_locales: Vec<String>,
    pub scope: String,
    pub regions: Vec<String>,
}

impl PublisherConfig {
    /// Build a config from the organization details, filling every other
    /// field with its default. `offer_id` defaults to
    /// [`default_offer_id`] of `publisher_id`.
    #[allow(clippy::too_many_arguments)]
    pub fn with_defaults(
        profile: ManifestProfile,
        publisher_id: impl Into<String>,
        publisher_name: impl Into<String>,
        website_url: impl Into<String>,
        privacy_policy_url: impl Into<String>,
        support_url: impl Into<String>,
        contact_email: impl Into<String>,
        offer_id: Option<String>,
    ) -> Self {
        let publisher_id = publisher_id.into();
        let offer_id = offer_id
            .filter(|id| !id.trim().is_empty())
            .unwrap_or_else(|| default_offer_id(&publisher_id));
        Self {
            publisher_id,
            publisher_name: publisher_name.into(),
            website_url: website_url.into(),
            privacy_policy_url: privacy_policy_url.into(),
            support_url: support_url.into(),
            version: DEFAULT_PUBLISHER_VERSION.to_string(),
            contact_email: contact_email.into(),
            offer_id,
            default_locale: DEFAULT_LOCALE.to_string(),
            supported_locales: vec![DEFAULT_LOCALE.to_string()],
            scope: profile.default_scope().to_string(),
            regions: vec![DEFAULT_REGION.to_string()],
        }
    }
}

/// `contoso.healthcare` becomes `contoso-suite`.
pub fn default_offer_id(publisher_id: &str) -> String {
    let prefix = publisher_id
        .split('.')
        .next()
        .filter(|s| !s.is_empty())
        .unwrap_or("publisher");
    format!("{prefix}-suite")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn contoso(profile: ManifestProfile, offer_id: Option<String>) -> PublisherConfig {
        PublisherConfig::with_defaults(
            profile,
            "contoso.healthcare",
            "Contoso Healthcare Inc.",
            "https://www.contosohealth.com",
            "https://www.contosohealth.com/privacy",
            "https://www.contosohealth.com/support",
            "support@contosohealth.com",
            offer_id,
        )
    }

    #[test]
    fn test_defaults() {
        let config = contoso(ManifestProfile::Extension, None);
        assert_eq!(config.version, "0.0.1");
        assert_eq!(config.offer_id, "contoso-suite");
        assert_eq!(config.default_locale, "en-US");
        assert_eq!(config.supported_locales, vec!["en-US"]);
        assert_eq!(config.regions, vec!["US"]);
        assert_eq!(config.scope, "Workflow");
        assert_eq!(contoso(ManifestProfile::Connector, None).scope, "EHR Connector");
    }

    #[test]
    fn test_explicit_offer_id_wins() {
        let config = contoso(ManifestProfile::Extension, Some("contoso-notes".into()));
        assert_eq!(config.offer_id, "contoso-notes");
        let blank = contoso(ManifestProfile::Extension, Some("  ".into()));
        assert_eq!(blank.offer_id, "contoso-suite");
    }

    #[test]
    fn test_default_offer_id_edge_cases() {
        assert_eq!(default_offer_id("fabrikam"), "fabrikam-suite");
        assert_eq!(default_offer_id(""), "publisher-suite");
    }

    #[test]
    fn test_camel_case_serialization() {
        let value = serde_json::to_value(contoso(ManifestProfile::Extension, None)).unwrap();
        assert_eq!(value["publisherId"], "contoso.healthcare");
        assert_eq!(value["privacyPolicyUrl"], "https://www.contosohealth.com/privacy");
        assert_eq!(value["supportedLocales"][0], "en-US");
    }
}

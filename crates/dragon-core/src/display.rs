//! Human-friendly names for well-known publisher fields.

/// Return the display name for a field path, or the path itself when the
/// field is not one of the known publisher fields.
pub fn field_display_name(path: &str) -> &str {
    match path {
        "publisherId" => "Publisher ID",
        "publisherName" => "Publisher Name",
        "websiteUrl" => "Website URL",
        "privacyPolicyUrl" => "Privacy Policy URL",
        "supportUrl" => "Support URL",
        "contactEmail" => "Contact Email",
        "offerId" => "Offer ID",
        "defaultLocale" => "Default Locale",
        "supportedLocales" => "Supported Locales",
        "regions" => "Regions",
        "scope" => "Scope",
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_fields() {
        assert_eq!(field_display_name("publisherId"), "Publisher ID");
        assert_eq!(field_display_name("websiteUrl"), "Website URL");
        assert_eq!(field_display_name("supportedLocales"), "Supported Locales");
        assert_eq!(field_display_name("scope"), "Scope");
    }

    #[test]
    fn test_unknown_field_returns_input() {
        assert_eq!(field_display_name("tools.0.name"), "tools.0.name");
        assert_eq!(field_display_name(""), "");
        assert_eq!(field_display_name("PublisherId"), "PublisherId");
    }
}

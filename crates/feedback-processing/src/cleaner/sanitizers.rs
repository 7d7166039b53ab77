//! Text sanitization for names and messages.

/// Remove the organisational prefix from an application name.
///
/// Only a leading occurrence is removed; an empty prefix leaves the name as-is.
pub(crate) fn strip_app_prefix<'a>(app_name: &'a str, prefix: &str) -> &'a str {
    if prefix.is_empty() {
        return app_name;
    }
    app_name.strip_prefix(prefix).unwrap_or(app_name)
}

/// Trim a message cell. Missing cells become an empty message.
pub(crate) fn clean_message(message: Option<&str>) -> String {
    message.map(str::trim).unwrap_or_default().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_app_prefix() {
        assert_eq!(strip_app_prefix("NEVARIS Build", "NEVARIS "), "Build");
        assert_eq!(strip_app_prefix("NEVARIS Finance", "NEVARIS "), "Finance");
        assert_eq!(strip_app_prefix("Build", "NEVARIS "), "Build");
        assert_eq!(strip_app_prefix("My NEVARIS Build", "NEVARIS "), "My NEVARIS Build");
        assert_eq!(strip_app_prefix("NEVARIS Build", ""), "NEVARIS Build");
    }

    #[test]
    fn test_clean_message() {
        assert_eq!(clean_message(Some("  Great tool!\n")), "Great tool!");
        assert_eq!(clean_message(Some("   ")), "");
        assert_eq!(clean_message(None), "");
    }
}

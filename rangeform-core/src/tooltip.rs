//! Tooltip text — `{1}` template substitution.

/// Shown when the bound attribute holds no value.
pub const NO_VALUE: &str = "--";

/// Format the hover text for a handle.
///
/// `has_value` reflects whether the bound attribute is set at all; without
/// one the tooltip reads `--` regardless of where the handle sits. Only the
/// first `{1}` in the template is substituted; a template without the token
/// passes through unchanged. Callers suppress the tooltip entirely for an
/// empty template and never call this.
pub fn format(template: &str, display_value: f64, has_value: bool) -> String {
    if !has_value {
        return NO_VALUE.to_string();
    }
    template.replacen("{1}", &display_value.to_string(), 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unset_value_shows_placeholder() {
        assert_eq!(format("{1}", 20.0, false), "--");
    }

    #[test]
    fn token_is_substituted() {
        assert_eq!(format("{1}", 20.0, true), "20");
        assert_eq!(format("Volume: {1}%", 37.5, true), "Volume: 37.5%");
    }

    #[test]
    fn template_without_token_passes_through() {
        assert_eq!(format("Drag me", 20.0, true), "Drag me");
    }

    #[test]
    fn only_the_first_token_is_substituted() {
        assert_eq!(format("{1} of {1}", 5.0, true), "5 of {1}");
    }
}

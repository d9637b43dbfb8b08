//! Common validation utilities

/// Whether a submitted field counts as missing.
///
/// Absent values and strings that are empty after trimming are missing, so
/// a whitespace-only email or code is rejected as not supplied.
/// Non-blank values are passed on untouched; matching stays byte-exact.
pub fn is_missing(value: Option<&str>) -> bool {
    value.map_or(true, |v| v.trim().is_empty())
}

/// Name of the first missing field among `fields`, if any
pub fn first_missing<'a>(fields: &[(&'a str, Option<&str>)]) -> Option<&'a str> {
    fields
        .iter()
        .find(|(_, value)| is_missing(*value))
        .map(|(name, _)| *name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_missing() {
        assert!(is_missing(None));
        assert!(is_missing(Some("")));
        assert!(is_missing(Some("  \t")));
        assert!(!is_missing(Some("a@x.com")));
        assert!(!is_missing(Some(" 0 ")));
    }

    #[test]
    fn test_first_missing_preserves_order() {
        assert_eq!(
            first_missing(&[("email", None), ("otp", None)]),
            Some("email")
        );
        assert_eq!(
            first_missing(&[("email", Some("a@x.com")), ("otp", Some(""))]),
            Some("otp")
        );
        assert_eq!(
            first_missing(&[("email", Some("a@x.com")), ("otp", Some("4213"))]),
            None
        );
    }
}

//! Tokenizer for the API's comma-separated multi-value fields.

/// Placeholder OMDb uses for absent fields.
pub(crate) const ABSENT: &str = "N/A";

/// Split a comma-separated name list into trimmed tokens.
///
/// Repeated tokens are preserved in order; empty tokens and the OMDb
/// "N/A" placeholder produce no output.
pub fn split_names(raw: &str) -> Vec<String> {
    if raw.is_empty() || raw == ABSENT {
        return Vec::new();
    }

    raw.split(',')
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_names_basic() {
        assert_eq!(split_names("Action, Drama"), vec!["Action", "Drama"]);
    }

    #[test]
    fn test_split_names_trims_tokens() {
        assert_eq!(split_names("  Action ,  Drama  "), vec!["Action", "Drama"]);
    }

    #[test]
    fn test_split_names_preserves_repeats_and_order() {
        assert_eq!(
            split_names("Drama, Action, Drama"),
            vec!["Drama", "Action", "Drama"]
        );
    }

    #[test]
    fn test_split_names_empty_input() {
        assert!(split_names("").is_empty());
    }

    #[test]
    fn test_split_names_absent_placeholder() {
        assert!(split_names("N/A").is_empty());
    }

    #[test]
    fn test_split_names_drops_empty_tokens() {
        assert_eq!(split_names("Action, , Drama,"), vec!["Action", "Drama"]);
    }

    #[test]
    fn test_split_names_single_token() {
        assert_eq!(split_names("Comedy"), vec!["Comedy"]);
    }
}

use lazy_static::lazy_static;
use regex::Regex;
use validator::ValidationError;

lazy_static! {
    /// Regex for validating admin usernames
    /// Must start with letter or underscore and contain only alphanumeric characters,
    /// underscores, dots and hyphens
    /// - Valid: "john_doe", "curator.1", "_admin", "data-team"
    /// - Invalid: "123user", "-user", "user name", ""
    pub static ref USERNAME_REGEX: Regex = Regex::new(r"^[a-zA-Z_][a-zA-Z0-9_.\-]*$").unwrap();

    /// Regex matching a `data:<mime>;base64,` URI prefix as produced by browser FileReader
    /// - Matches: "data:text/csv;base64,", "data:application/vnd.ms-excel;base64,", "data:,"
    pub static ref DATA_URI_PREFIX_REGEX: Regex = Regex::new(r"^data:[^,]*,").unwrap();
}

/// Rejects empty or whitespace-only strings
pub fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_not_blank() {
        assert!(validate_not_blank("data.csv").is_ok());
        assert!(validate_not_blank(" \n\t ").is_err());
        assert!(validate_not_blank("").is_err());
    }

    #[test]
    fn test_username_regex_valid() {
        assert!(USERNAME_REGEX.is_match("john_doe"));
        assert!(USERNAME_REGEX.is_match("curator.1"));
        assert!(USERNAME_REGEX.is_match("_admin"));
        assert!(USERNAME_REGEX.is_match("data-team"));
    }

    #[test]
    fn test_username_regex_invalid() {
        assert!(!USERNAME_REGEX.is_match("123user")); // starts with digit
        assert!(!USERNAME_REGEX.is_match("-user")); // starts with hyphen
        assert!(!USERNAME_REGEX.is_match("user name")); // space
        assert!(!USERNAME_REGEX.is_match("")); // empty
    }

    #[test]
    fn test_data_uri_prefix_regex() {
        assert!(DATA_URI_PREFIX_REGEX.is_match("data:text/csv;base64,bmFtZQ=="));
        assert!(DATA_URI_PREFIX_REGEX.is_match("data:,abc"));
        assert!(!DATA_URI_PREFIX_REGEX.is_match("name,description"));
        assert!(!DATA_URI_PREFIX_REGEX.is_match("metadata:,x"));
    }
}

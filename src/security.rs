use subtle::ConstantTimeEq;

/// Compare a presented bearer key against the configured one without
/// leaking the position of the first differing byte.
pub fn constant_time_compare(a: &str, b: &str) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.as_bytes().ct_eq(b.as_bytes()).into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matching_keys() {
        assert!(constant_time_compare("site-key-1", "site-key-1"));
    }

    #[test]
    fn test_mismatched_keys() {
        assert!(!constant_time_compare("site-key-1", "site-key-2"));
        assert!(!constant_time_compare("site-key-1", "site-key"));
        assert!(!constant_time_compare("", "site-key"));
    }
}

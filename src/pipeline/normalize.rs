use std::collections::HashSet;

/// Collapses repeated tokens within a name, keeping the first occurrence of
/// each and single-spacing the result: "Jean Jean Dupont" -> "Jean Dupont".
/// The export duplicates tokens when a ticket was reassigned to the same
/// person. Comparison is case-sensitive and the function is idempotent.
pub fn normalize_name(name: &str) -> String {
    let mut seen = HashSet::new();
    let mut parts = Vec::new();
    for part in name.split_whitespace() {
        if seen.insert(part) {
            parts.push(part);
        }
    }
    parts.join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repeated_tokens_collapse() {
        assert_eq!(normalize_name("Jean Jean Dupont"), "Jean Dupont");
        assert_eq!(normalize_name("Jean Dupont Jean"), "Jean Dupont");
    }

    #[test]
    fn test_normalizing_twice_equals_normalizing_once() {
        for name in ["Jean Jean Dupont", "Marie  Curie Curie", "", "  ", "A B A B"] {
            let once = normalize_name(name);
            assert_eq!(normalize_name(&once), once);
        }
    }

    #[test]
    fn test_comparison_is_case_sensitive() {
        assert_eq!(normalize_name("jean Jean"), "jean Jean");
    }

    #[test]
    fn test_whitespace_only_becomes_empty() {
        assert_eq!(normalize_name("   "), "");
        assert_eq!(normalize_name(""), "");
    }

    #[test]
    fn test_interior_whitespace_is_single_spaced() {
        assert_eq!(normalize_name("Marie   Curie"), "Marie Curie");
    }
}

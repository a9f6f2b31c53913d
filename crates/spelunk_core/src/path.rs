//! Field path construction.
//!
//! Paths identify a field relative to the traversal root: `Name`,
//! `Owner.Name`, `Pets[0].Name`, `Secrets["key"].Value`.

/// Appends a field name. Root-level fields have no prefix.
pub fn field(parent: &str, name: &str) -> String {
    if parent.is_empty() {
        name.to_string()
    } else {
        format!("{}.{}", parent, name)
    }
}

/// Appends a zero-based sequence index.
pub fn index(parent: &str, index: usize) -> String {
    format!("{}[{}]", parent, index)
}

/// Appends an associative-container key, quoted.
pub fn key(parent: &str, key: &str) -> String {
    format!("{}[\"{}\"]", parent, key)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case::root("", "Name", "Name")]
    #[case::nested("Owner", "Name", "Owner.Name")]
    #[case::under_index("Pets[0]", "Name", "Pets[0].Name")]
    fn test_field(#[case] parent: &str, #[case] name: &str, #[case] expected: &str) {
        assert_eq!(field(parent, name), expected);
    }

    #[test]
    fn test_index() {
        assert_eq!(index("Pets", 0), "Pets[0]");
        assert_eq!(index("Grid[1]", 2), "Grid[1][2]");
    }

    #[test]
    fn test_key() {
        assert_eq!(key("Secrets", "api"), r#"Secrets["api"]"#);
    }

    #[test]
    fn test_composed_path() {
        let path = field(&key(&field("", "Owners"), "ada"), "Pets");
        assert_eq!(field(&index(&path, 3), "Name"), r#"Owners["ada"].Pets[3].Name"#);
    }
}

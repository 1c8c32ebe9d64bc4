//! Fixed schema catalog.
//!
//! The catalog is the closed set of attributes a segment query can include.
//! Order matters: it is the order rows are offered in every selection control.

use serde::Serialize;

/// A single catalog entry: wire key plus display label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SchemaField {
    pub key: &'static str,
    pub label: &'static str,
}

impl SchemaField {
    const fn new(key: &'static str, label: &'static str) -> Self {
        Self { key, label }
    }
}

pub const CATALOG: &[SchemaField] = &[
    SchemaField::new("first_name", "First Name"),
    SchemaField::new("last_name", "Last Name"),
    SchemaField::new("gender", "Gender"),
    SchemaField::new("age", "Age"),
    SchemaField::new("account_name", "Account Name"),
    SchemaField::new("city", "City"),
    SchemaField::new("state", "State"),
];

/// Look up a catalog entry by its key.
pub fn find(key: &str) -> Option<&'static SchemaField> {
    CATALOG.iter().find(|field| field.key == key)
}

/// Display label for `key`, if it belongs to the catalog.
pub fn label_of(key: &str) -> Option<&'static str> {
    find(key).map(|field| field.label)
}

/// Position of `key` inside the catalog.
pub fn index_of(key: &str) -> Option<usize> {
    CATALOG.iter().position(|field| field.key == key)
}

/// Catalog entries not already present in `selected`, in catalog order.
///
/// Feeds the "add schema" control; per-row controls always offer the full
/// catalog instead.
pub fn available_options<S: AsRef<str>>(selected: &[S]) -> Vec<&'static SchemaField> {
    CATALOG
        .iter()
        .filter(|field| !selected.iter().any(|s| s.as_ref() == field.key))
        .collect()
}

/// clap value parser accepting only catalog keys.
pub fn parse_key(value: &str) -> Result<String, String> {
    match find(value) {
        Some(field) => Ok(field.key.to_string()),
        None => {
            let known: Vec<&str> = CATALOG.iter().map(|f| f.key).collect();
            Err(format!(
                "unknown schema `{value}` (expected one of: {})",
                known.join(", ")
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_are_unique() {
        for (i, a) in CATALOG.iter().enumerate() {
            for b in &CATALOG[i + 1..] {
                assert_ne!(a.key, b.key);
            }
        }
    }

    #[test]
    fn lookup_by_key() {
        assert_eq!(label_of("account_name"), Some("Account Name"));
        assert_eq!(index_of("city"), Some(5));
        assert!(find("email").is_none());
    }

    #[test]
    fn available_options_is_catalog_minus_selection() {
        let selected = vec!["city".to_string(), "first_name".to_string()];
        let keys: Vec<&str> = available_options(&selected).iter().map(|f| f.key).collect();
        assert_eq!(keys, vec!["last_name", "gender", "age", "account_name", "state"]);
    }

    #[test]
    fn available_options_ignores_duplicates() {
        let selected = ["age", "age", "age"];
        let options = available_options(&selected);
        assert_eq!(options.len(), CATALOG.len() - 1);
        assert!(options.iter().all(|f| f.key != "age"));
    }

    #[test]
    fn everything_available_for_empty_draft() {
        let selected: [&str; 0] = [];
        assert_eq!(available_options(&selected).len(), CATALOG.len());
    }

    #[test]
    fn parse_key_rejects_unknown() {
        assert_eq!(parse_key("gender"), Ok("gender".to_string()));
        let err = parse_key("email").unwrap_err();
        assert!(err.contains("email"));
        assert!(err.contains("first_name"));
    }
}

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Category {
    Food,
    Transport,
    Shopping,
    Entertainment,
    Healthcare,
    Utilities,
    Salary,
    Other,
    /// A category name that came from foreign data (e.g. an imported CSV).
    Custom(String),
}

impl Category {
    pub const KNOWN: [Category; 8] = [
        Category::Food,
        Category::Transport,
        Category::Shopping,
        Category::Entertainment,
        Category::Healthcare,
        Category::Utilities,
        Category::Salary,
        Category::Other,
    ];

    /// Maps a stored key to a category. Known keys match case-insensitively,
    /// anything else is kept verbatim as a custom category.
    pub fn from_key(key: &str) -> Self {
        match key.to_lowercase().as_str() {
            "food" => Category::Food,
            "transport" => Category::Transport,
            "shopping" => Category::Shopping,
            "entertainment" => Category::Entertainment,
            "healthcare" => Category::Healthcare,
            "utilities" => Category::Utilities,
            "salary" => Category::Salary,
            "other" => Category::Other,
            _ => Category::Custom(key.to_string()),
        }
    }

    pub fn key(&self) -> &str {
        match self {
            Category::Food => "food",
            Category::Transport => "transport",
            Category::Shopping => "shopping",
            Category::Entertainment => "entertainment",
            Category::Healthcare => "healthcare",
            Category::Utilities => "utilities",
            Category::Salary => "salary",
            Category::Other => "other",
            Category::Custom(key) => key,
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Category::Food => "Food",
            Category::Transport => "Transport",
            Category::Shopping => "Shopping",
            Category::Entertainment => "Entertainment",
            Category::Healthcare => "Healthcare",
            Category::Utilities => "Utilities",
            Category::Salary => "Salary",
            Category::Other => "Other",
            Category::Custom(key) => key,
        }
    }
}

impl From<String> for Category {
    fn from(key: String) -> Self {
        Category::from_key(&key)
    }
}

impl From<Category> for String {
    fn from(category: Category) -> Self {
        category.key().to_string()
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_keys_round_trip() {
        for category in Category::KNOWN {
            assert_eq!(Category::from_key(category.key()), category);
        }
    }

    #[test]
    fn test_from_key_is_case_insensitive_for_known_categories() {
        assert_eq!(Category::from_key("FOOD"), Category::Food);
        assert_eq!(Category::from_key("Utilities"), Category::Utilities);
    }

    #[test]
    fn test_unknown_key_is_kept_as_custom() {
        let category = Category::from_key("Groceries");
        assert_eq!(category, Category::Custom("Groceries".to_string()));
        assert_eq!(category.key(), "Groceries");
        assert_eq!(category.label(), "Groceries");
    }

    #[test]
    fn test_serializes_as_plain_key() {
        let json = serde_json::to_string(&Category::Healthcare).unwrap();
        assert_eq!(json, "\"healthcare\"");

        let parsed: Category = serde_json::from_str("\"salary\"").unwrap();
        assert_eq!(parsed, Category::Salary);
    }
}

//! Shop category model.

use serde::{Deserialize, Serialize};

use super::CategoryId;

/// Read-only reference data naming a shop category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    /// Unique identifier.
    pub id: CategoryId,
    /// Category name (the value stored on [`super::Shop::category`]).
    pub name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serde_roundtrip() {
        let category = Category {
            id: CategoryId::new(3),
            name: "Dental Clinic".to_owned(),
        };
        let json = serde_json::to_string(&category).unwrap();
        let deserialized: Category = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized, category);
    }
}

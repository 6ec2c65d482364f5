use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

pub const MIXED: &str = "Mixed";

/// A provider category as listed by the category endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Category {
    pub id: u32,
    pub name: String,
}

/// Category constraint for a quiz request.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum CategorySelection {
    /// No category constraint.
    #[default]
    Mixed,
    /// A category display name, resolved against the known list before fetching.
    Named(String),
}

impl CategorySelection {
    pub fn named(name: impl Into<String>) -> Self {
        let name = name.into();
        if name.eq_ignore_ascii_case(MIXED) {
            CategorySelection::Mixed
        } else {
            CategorySelection::Named(name)
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            CategorySelection::Mixed => MIXED,
            CategorySelection::Named(name) => name,
        }
    }

    pub fn is_mixed(&self) -> bool {
        matches!(self, CategorySelection::Mixed)
    }
}

impl fmt::Display for CategorySelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CategorySelection {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::InvalidValue {
                field: "category".into(),
                message: "category must not be empty".into(),
            });
        }
        Ok(CategorySelection::named(trimmed))
    }
}

impl Serialize for CategorySelection {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for CategorySelection {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Sort alphabetically by name for presentation.
pub fn sort_categories(categories: &mut [Category]) {
    categories.sort_by(|a, b| {
        a.name
            .to_lowercase()
            .cmp(&b.name.to_lowercase())
            .then_with(|| a.name.cmp(&b.name))
    });
}

/// Map a selection to the provider's category id.
///
/// `Mixed` resolves to `None`, meaning the request carries no category.
pub fn resolve_category_id(
    selection: &CategorySelection,
    known: &[Category],
) -> Result<Option<u32>, ValidationError> {
    match selection {
        CategorySelection::Mixed => Ok(None),
        CategorySelection::Named(name) => known
            .iter()
            .find(|c| &c.name == name)
            .map(|c| Some(c.id))
            .ok_or_else(|| ValidationError::UnknownCategory(name.clone())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn known() -> Vec<Category> {
        vec![
            Category { id: 17, name: "Science & Nature".into() },
            Category { id: 9, name: "General Knowledge".into() },
            Category { id: 27, name: "Animals".into() },
        ]
    }

    #[test]
    fn mixed_omits_category() {
        assert_eq!(resolve_category_id(&CategorySelection::Mixed, &known()), Ok(None));
    }

    #[test]
    fn named_category_resolves_to_id() {
        let sel = CategorySelection::named("General Knowledge");
        assert_eq!(resolve_category_id(&sel, &known()), Ok(Some(9)));
    }

    #[test]
    fn unknown_category_is_reported() {
        let sel = CategorySelection::named("Astrology");
        assert_eq!(
            resolve_category_id(&sel, &known()),
            Err(ValidationError::UnknownCategory("Astrology".into()))
        );
    }

    #[test]
    fn mixed_parses_case_insensitively() {
        assert_eq!("mixed".parse::<CategorySelection>().unwrap(), CategorySelection::Mixed);
        assert_eq!(CategorySelection::named("MIXED"), CategorySelection::Mixed);
        assert!("  ".parse::<CategorySelection>().is_err());
    }

    #[test]
    fn categories_sort_by_name() {
        let mut cats = known();
        cats.push(Category { id: 1, name: "art".into() });
        sort_categories(&mut cats);
        let names: Vec<&str> = cats.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Animals", "art", "General Knowledge", "Science & Nature"]);
    }

    #[test]
    fn selection_serializes_as_plain_string() {
        let json = serde_json::to_string(&CategorySelection::named("Animals")).unwrap();
        assert_eq!(json, "\"Animals\"");
        let back: CategorySelection = serde_json::from_str("\"Mixed\"").unwrap();
        assert_eq!(back, CategorySelection::Mixed);
    }
}

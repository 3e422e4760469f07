//! Core data types for barcart
//!
//! This module defines all shared data structures used throughout the application.

use serde::{Deserialize, Deserializer, Serialize};

/// A cocktail or shot from the catalog
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Drink {
    /// Catalog key, filled in by the loader
    #[serde(skip)]
    pub name: String,
    pub description: String,
    pub image: String,
    pub ingredients: Vec<String>,
    pub recipe: String,
    #[serde(rename = "theme", deserialize_with = "deserialize_tags")]
    pub tags: Vec<String>,
}

impl Drink {
    /// Check whether the drink carries a tag (case-insensitive, padding ignored)
    pub fn has_tag(&self, tag: &str) -> bool {
        let tag = tag.trim().to_lowercase();
        self.tags.iter().any(|t| t.trim().to_lowercase() == tag)
    }

    /// Check whether any raw ingredient line contains the query (case-insensitive)
    pub fn mentions_ingredient(&self, query: &str) -> bool {
        let query = query.to_lowercase();
        self.ingredients
            .iter()
            .any(|ing| ing.to_lowercase().contains(&query))
    }
}

/// Older catalogs store `theme` as a single string
#[derive(Deserialize)]
#[serde(untagged)]
enum TagsRepr {
    List(Vec<String>),
    Single(String),
    Missing(()),
}

fn deserialize_tags<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match TagsRepr::deserialize(deserializer)? {
        TagsRepr::List(tags) => tags,
        TagsRepr::Single(tag) if tag.trim().is_empty() => Vec::new(),
        TagsRepr::Single(tag) => vec![tag],
        TagsRepr::Missing(()) => Vec::new(),
    })
}

/// The two drink lists in a catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DrinkKind {
    Cocktail,
    Shot,
}

impl DrinkKind {
    pub fn all() -> &'static [DrinkKind] {
        &[DrinkKind::Cocktail, DrinkKind::Shot]
    }

    /// Section key in the catalog file
    pub fn section(&self) -> &'static str {
        match self {
            DrinkKind::Cocktail => "cocktails",
            DrinkKind::Shot => "shots",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            DrinkKind::Cocktail => "Cocktails",
            DrinkKind::Shot => "Shots",
        }
    }
}

/// Application tabs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    Cocktails,
    Shots,
    Stock,
    Settings,
}

impl Tab {
    pub fn all() -> &'static [Tab] {
        &[Tab::Cocktails, Tab::Shots, Tab::Stock, Tab::Settings]
    }

    pub fn index(&self) -> usize {
        match self {
            Tab::Cocktails => 0,
            Tab::Shots => 1,
            Tab::Stock => 2,
            Tab::Settings => 3,
        }
    }

    pub fn from_index(idx: usize) -> Self {
        match idx {
            0 => Tab::Cocktails,
            1 => Tab::Shots,
            2 => Tab::Stock,
            3 => Tab::Settings,
            _ => Tab::Cocktails,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Tab::Cocktails => "Cocktails",
            Tab::Shots => "Shots",
            Tab::Stock => "Stock",
            Tab::Settings => "Settings",
        }
    }

    /// The drink list shown by this tab, if it is a browse tab
    pub fn drink_kind(&self) -> Option<DrinkKind> {
        match self {
            Tab::Cocktails => Some(DrinkKind::Cocktail),
            Tab::Shots => Some(DrinkKind::Shot),
            Tab::Stock | Tab::Settings => None,
        }
    }
}

// Helper functions

/// Capitalize the way theme names are shown: first letter upper, rest lower
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tags_accept_list_and_legacy_string() {
        let listed: Drink = serde_json::from_str(r#"{"theme": ["Tiki", "summer"]}"#).unwrap();
        assert_eq!(listed.tags, vec!["Tiki", "summer"]);

        let legacy: Drink = serde_json::from_str(r#"{"theme": "classic"}"#).unwrap();
        assert_eq!(legacy.tags, vec!["classic"]);

        let missing: Drink = serde_json::from_str(r#"{"recipe": "Stir."}"#).unwrap();
        assert!(missing.tags.is_empty());
        assert_eq!(missing.recipe, "Stir.");
    }

    #[test]
    fn test_has_tag_ignores_case() {
        let drink = Drink {
            tags: vec!["Tiki".into()],
            ..Default::default()
        };
        assert!(drink.has_tag("tiki"));
        assert!(drink.has_tag("TIKI"));
        assert!(!drink.has_tag("classic"));

        let padded = Drink {
            tags: vec![" tiki ".into()],
            ..Default::default()
        };
        assert!(padded.has_tag("tiki"));
    }

    #[test]
    fn test_mentions_ingredient() {
        let drink = Drink {
            ingredients: vec!["2 oz White Rum".into(), "1 oz Lime Juice".into()],
            ..Default::default()
        };
        assert!(drink.mentions_ingredient("rum"));
        assert!(drink.mentions_ingredient("LIME"));
        assert!(!drink.mentions_ingredient("gin"));
    }

    #[test]
    fn test_capitalize() {
        assert_eq!(capitalize("tiki"), "Tiki");
        assert_eq!(capitalize("SUMMER nights"), "Summer nights");
        assert_eq!(capitalize(""), "");
    }

    #[test]
    fn test_tab_index_roundtrip() {
        for tab in Tab::all() {
            assert_eq!(Tab::from_index(tab.index()), *tab);
        }
        assert_eq!(Tab::Shots.drink_kind(), Some(DrinkKind::Shot));
        assert_eq!(Tab::Stock.drink_kind(), None);
    }
}

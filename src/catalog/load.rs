//! Drink catalog loading
//!
//! The catalog is a JSON file with a `cocktails` and a `shots` object, each
//! keyed by drink name. Key order in the file is the display order.

use crate::types::{capitalize, Drink, DrinkKind};
use anyhow::{Context, Result};
use serde_json::Value;
use std::collections::BTreeSet;
use std::fs;
use std::path::Path;
use tracing::{debug, warn};

/// All drinks, split by kind
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    cocktails: Vec<Drink>,
    shots: Vec<Drink>,
}

impl Catalog {
    /// Load the catalog file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read catalog from {:?}", path))?;

        let catalog = Self::parse(&content)
            .with_context(|| format!("Failed to parse catalog from {:?}", path))?;

        debug!(
            path = %path.display(),
            cocktails = catalog.cocktails.len(),
            shots = catalog.shots.len(),
            "Catalog loaded"
        );
        Ok(catalog)
    }

    /// Parse catalog JSON; malformed entries are skipped
    pub fn parse(content: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(content).context("Invalid JSON")?;
        let Value::Object(mut root) = value else {
            anyhow::bail!("Catalog must contain a JSON object");
        };

        let mut section = |kind: DrinkKind| match root.remove(kind.section()) {
            Some(Value::Object(entries)) => parse_section(kind, entries),
            Some(other) => {
                warn!(section = kind.section(), found = %json_type(&other), "Catalog section is not an object");
                Vec::new()
            }
            None => Vec::new(),
        };

        let cocktails = section(DrinkKind::Cocktail);
        let shots = section(DrinkKind::Shot);
        Ok(Self { cocktails, shots })
    }

    pub fn drinks(&self, kind: DrinkKind) -> &[Drink] {
        match kind {
            DrinkKind::Cocktail => &self.cocktails,
            DrinkKind::Shot => &self.shots,
        }
    }

    /// Look up a drink by exact name
    #[cfg(test)]
    pub fn get(&self, kind: DrinkKind, name: &str) -> Option<&Drink> {
        self.drinks(kind).iter().find(|d| d.name == name)
    }

    /// Unique capitalized theme tags of a list, sorted
    pub fn themes(&self, kind: DrinkKind) -> Vec<String> {
        self.drinks(kind)
            .iter()
            .flat_map(|d| d.tags.iter())
            .map(|t| capitalize(t.trim()))
            .filter(|t| !t.is_empty())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.cocktails.is_empty() && self.shots.is_empty()
    }
}

fn parse_section(kind: DrinkKind, entries: serde_json::Map<String, Value>) -> Vec<Drink> {
    entries
        .into_iter()
        .filter_map(|(name, value)| match serde_json::from_value::<Drink>(value) {
            Ok(mut drink) => {
                drink.name = name;
                Some(drink)
            }
            Err(e) => {
                warn!(section = kind.section(), drink = %name, error = %e, "Skipping malformed drink");
                None
            }
        })
        .collect()
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::filter::{theme_from_option, DrinkFilter};

    const SAMPLE: &str = r#"{
        "cocktails": {
            "Negroni": {
                "description": "Bitter and bold.",
                "image": "Images/negroni.png",
                "ingredients": ["1 oz Gin", "1 oz Campari", "1 oz Sweet Vermouth"],
                "recipe": "Stir with ice.",
                "theme": ["classic", "Bitter"]
            },
            "Mai Tai": {
                "ingredients": ["2 oz Rum", "0.75 oz Lime Juice"],
                "theme": "tiki"
            },
            "Broken": { "ingredients": "not a list" },
            "Daiquiri": {
                "ingredients": ["2 oz Rum"],
                "theme": ["Classic"]
            }
        },
        "shots": {
            "Lemon Drop": { "ingredients": ["1 oz Vodka"] }
        }
    }"#;

    #[test]
    fn test_parse_keeps_order_and_names() {
        let catalog = Catalog::parse(SAMPLE).unwrap();
        let names: Vec<&str> = catalog
            .drinks(DrinkKind::Cocktail)
            .iter()
            .map(|d| d.name.as_str())
            .collect();
        assert_eq!(names, vec!["Negroni", "Mai Tai", "Daiquiri"]);
        assert_eq!(catalog.drinks(DrinkKind::Shot).len(), 1);
    }

    #[test]
    fn test_parse_fills_defaults() {
        let catalog = Catalog::parse(SAMPLE).unwrap();
        let mai_tai = catalog.get(DrinkKind::Cocktail, "Mai Tai").unwrap();
        assert_eq!(mai_tai.description, "");
        assert_eq!(mai_tai.tags, vec!["tiki"]);
    }

    #[test]
    fn test_themes_are_capitalized_unique_sorted() {
        let catalog = Catalog::parse(SAMPLE).unwrap();
        assert_eq!(catalog.themes(DrinkKind::Cocktail), vec!["Bitter", "Classic", "Tiki"]);
        assert!(catalog.themes(DrinkKind::Shot).is_empty());
    }

    #[test]
    fn test_padded_theme_option_still_matches() {
        let catalog = Catalog::parse(r#"{"cocktails": {"Zombie": {"theme": [" tiki"]}}}"#).unwrap();
        let themes = catalog.themes(DrinkKind::Cocktail);
        assert_eq!(themes, vec!["Tiki"]);

        let filter = DrinkFilter {
            query: String::new(),
            theme: theme_from_option(&themes[0]),
        };
        assert_eq!(filter.apply(catalog.drinks(DrinkKind::Cocktail)), vec![0]);
    }

    #[test]
    fn test_missing_sections_are_empty() {
        let catalog = Catalog::parse(r#"{"cocktails": {}}"#).unwrap();
        assert!(catalog.is_empty());

        let catalog = Catalog::parse(r#"{"shots": []}"#).unwrap();
        assert!(catalog.drinks(DrinkKind::Shot).is_empty());
    }

    #[test]
    fn test_parse_rejects_bad_root() {
        assert!(Catalog::parse("[]").is_err());
        assert!(Catalog::parse("{").is_err());
    }

    #[test]
    fn test_load_reports_missing_file() {
        let err = Catalog::load(Path::new("/nonexistent/barcart/drinks.json")).unwrap_err();
        assert!(format!("{:#}", err).contains("Failed to read catalog"));
    }
}

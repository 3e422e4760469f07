//! Search and theme filtering for drink lists

use crate::types::Drink;

/// Label of the catch-all theme option
pub const ALL_THEMES: &str = "All";

/// Active list filter
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DrinkFilter {
    /// Ingredient search text; empty matches everything
    pub query: String,
    /// Theme tag; `None` means all themes
    pub theme: Option<String>,
}

impl DrinkFilter {
    /// Check whether a single drink passes the filter
    pub fn matches(&self, drink: &Drink) -> bool {
        let theme_ok = self.theme.as_deref().map_or(true, |t| drink.has_tag(t));
        let query_ok = self.query.is_empty() || drink.mentions_ingredient(&self.query);
        theme_ok && query_ok
    }

    /// Indices of the drinks that pass, in list order
    pub fn apply(&self, drinks: &[Drink]) -> Vec<usize> {
        drinks
            .iter()
            .enumerate()
            .filter(|(_, d)| self.matches(d))
            .map(|(i, _)| i)
            .collect()
    }

    pub fn is_active(&self) -> bool {
        self.theme.is_some() || !self.query.is_empty()
    }
}

/// Theme dropdown entries: "All" followed by the list's themes
pub fn theme_options(themes: &[String]) -> Vec<String> {
    std::iter::once(ALL_THEMES.to_string())
        .chain(themes.iter().cloned())
        .collect()
}

/// Translate a dropdown entry into a filter theme
pub fn theme_from_option(option: &str) -> Option<String> {
    if option.eq_ignore_ascii_case(ALL_THEMES) {
        None
    } else {
        Some(option.to_lowercase())
    }
}

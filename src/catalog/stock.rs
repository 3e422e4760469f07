//! Ingredient stock persistence
//!
//! Stock is a flat JSON object mapping ingredient names to counts on hand:
//! `{ "Gin": 2, "Lime Juice": 0 }`. Entry order is kept as found in the file.

use super::ingredients::{extract_ingredient_name, ingredient_matches};
use anyhow::{Context, Result};
use serde::Serialize;
use serde_json::{Map, Value};
use std::fs;
use std::path::Path;
use tracing::{debug, info, warn};

/// One stock entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StockEntry {
    pub name: String,
    pub quantity: u32,
}

impl StockEntry {
    pub fn is_available(&self) -> bool {
        self.quantity > 0
    }
}

/// Ingredient counts on hand
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Stock {
    entries: Vec<StockEntry>,
}

impl Stock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load stock from file, or start empty if it does not exist yet
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            info!(path = %path.display(), "No stock file found, starting empty");
            return Ok(Self::new());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read stock from {:?}", path))?;

        let stock = Self::parse(&content)
            .with_context(|| format!("Failed to parse stock from {:?}", path))?;

        debug!(path = %path.display(), entries = stock.len(), "Stock loaded");
        Ok(stock)
    }

    /// Parse stock JSON, coercing odd quantities instead of rejecting them
    pub fn parse(content: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(content).context("Invalid JSON")?;
        let Value::Object(map) = value else {
            anyhow::bail!("Stock file must contain a JSON object");
        };

        let entries = map
            .into_iter()
            .map(|(name, qty)| {
                let quantity = coerce_quantity(&qty);
                if !matches!(&qty, Value::Number(n) if n.as_u64().is_some()) {
                    warn!(ingredient = %name, value = %qty, quantity, "Coerced stock quantity");
                }
                StockEntry { name, quantity }
            })
            .collect();

        Ok(Self { entries })
    }

    /// Save stock to file
    pub fn save(&self, path: &Path) -> Result<()> {
        // Ensure directory exists
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create stock directory {:?}", parent))?;
        }

        let content = self.to_json().context("Failed to serialize stock")?;

        fs::write(path, content)
            .with_context(|| format!("Failed to write stock to {:?}", path))?;

        debug!(path = %path.display(), entries = self.len(), "Stock saved");
        Ok(())
    }

    /// Pretty JSON with four-space indentation
    pub fn to_json(&self) -> Result<String> {
        let map: Map<String, Value> = self
            .entries
            .iter()
            .map(|e| (e.name.clone(), Value::from(e.quantity)))
            .collect();

        let mut buf = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
        map.serialize(&mut ser)?;
        Ok(String::from_utf8(buf)?)
    }

    pub fn entries(&self) -> &[StockEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of entries with a positive count
    pub fn available_count(&self) -> usize {
        self.entries.iter().filter(|e| e.is_available()).count()
    }

    /// Quantity for an exact entry name
    pub fn quantity(&self, name: &str) -> Option<u32> {
        self.entry(name).map(|e| e.quantity)
    }

    /// Set the quantity of an entry, adding it if absent
    pub fn set(&mut self, name: &str, quantity: u32) {
        match self.entry_mut(name) {
            Some(entry) => entry.quantity = quantity,
            None => self.entries.push(StockEntry {
                name: name.to_string(),
                quantity,
            }),
        }
    }

    /// Set the quantity from user-typed text; anything unparsable counts as 0
    pub fn set_from_input(&mut self, name: &str, text: &str) -> u32 {
        let quantity = parse_quantity_input(text);
        self.set(name, quantity);
        quantity
    }

    /// Add one, returning the new count
    pub fn increment(&mut self, name: &str) -> u32 {
        let quantity = self.quantity(name).unwrap_or(0).saturating_add(1);
        self.set(name, quantity);
        quantity
    }

    /// Remove one without going below zero, returning the new count
    pub fn decrement(&mut self, name: &str) -> u32 {
        let quantity = self.quantity(name).unwrap_or(0).saturating_sub(1);
        self.set(name, quantity);
        quantity
    }

    /// Add an entry with count 0 unless one already matches (case-insensitive)
    ///
    /// Returns true if a new entry was added.
    pub fn insert_missing(&mut self, name: &str) -> bool {
        let name = name.trim();
        if name.is_empty() || self.entries.iter().any(|e| ingredient_matches(&e.name, name)) {
            return false;
        }
        self.entries.push(StockEntry {
            name: name.to_string(),
            quantity: 0,
        });
        true
    }

    /// Remove an entry by exact name
    pub fn remove(&mut self, name: &str) -> Option<StockEntry> {
        let idx = self.entries.iter().position(|e| e.name == name)?;
        Some(self.entries.remove(idx))
    }

    /// Check whether a base ingredient name has a matching entry with count > 0
    pub fn is_in_stock(&self, base_name: &str) -> bool {
        self.entries
            .iter()
            .any(|e| e.is_available() && ingredient_matches(&e.name, base_name))
    }

    /// Check whether a recipe line's ingredient is on hand
    pub fn has_ingredient(&self, recipe_line: &str) -> bool {
        self.is_in_stock(&extract_ingredient_name(recipe_line))
    }

    /// A drink is out of stock if any of its ingredients is not on hand
    pub fn is_out_of_stock(&self, ingredients: &[String]) -> bool {
        ingredients.iter().any(|line| !self.has_ingredient(line))
    }

    /// Base names of ingredients not on hand, in recipe order, without duplicates
    pub fn missing_ingredients(&self, ingredients: &[String]) -> Vec<String> {
        let mut missing: Vec<String> = Vec::new();
        for line in ingredients {
            let base = extract_ingredient_name(line);
            if base.is_empty() || self.is_in_stock(&base) {
                continue;
            }
            if !missing.iter().any(|m| ingredient_matches(m, &base)) {
                missing.push(base);
            }
        }
        missing
    }

    fn entry(&self, name: &str) -> Option<&StockEntry> {
        self.entries.iter().find(|e| e.name == name)
    }

    fn entry_mut(&mut self, name: &str) -> Option<&mut StockEntry> {
        self.entries.iter_mut().find(|e| e.name == name)
    }
}

/// Best-effort conversion of a stored quantity to a non-negative count
fn coerce_quantity(value: &Value) -> u32 {
    match value {
        Value::Number(n) => {
            if let Some(u) = n.as_u64() {
                u.min(u32::MAX as u64) as u32
            } else if let Some(f) = n.as_f64() {
                clamp_f64(f)
            } else {
                0
            }
        }
        Value::String(s) => parse_quantity_input(s),
        _ => 0,
    }
}

/// Parse a user-typed quantity; invalid or negative input yields 0
pub fn parse_quantity_input(text: &str) -> u32 {
    let text = text.trim();
    if let Ok(n) = text.parse::<i64>() {
        return n.clamp(0, u32::MAX as i64) as u32;
    }
    text.parse::<f64>().map(clamp_f64).unwrap_or(0)
}

fn clamp_f64(f: f64) -> u32 {
    if f.is_finite() && f > 0.0 {
        f.trunc().min(u32::MAX as f64) as u32
    } else {
        0
    }
}

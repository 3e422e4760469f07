//! Application state and event handling
//!
//! This is the core of barcart, managing:
//! - Application state across all tabs
//! - Event handling (keyboard input)
//! - Stock changes and their persistence

use crate::catalog::{theme_from_option, theme_options, Catalog, DrinkFilter, Stock};
use crate::config::{Config, LayoutMode};
use crate::types::{Drink, DrinkKind, Tab};
use crate::ui::preview::{resolve_image_path, PreviewCache};
use crate::ui::Theme;
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use rand::Rng;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, info, warn};

/// Number of rows in the Settings tab
pub const SETTINGS_COUNT: usize = 4;

/// How long flash messages stay visible
const FLASH_SECS: u64 = 3;

/// Lines scrolled per detail-scroll keypress
const DETAIL_SCROLL_STEP: u16 = 3;

/// List and detail state for one drink list
#[derive(Debug, Clone)]
pub struct BrowseState {
    pub kind: DrinkKind,
    pub query: String,
    pub theme_options: Vec<String>,
    pub theme_index: usize,
    /// Catalog indices that pass the current filter
    pub visible: Vec<usize>,
    /// Cursor into `visible`
    pub selected: usize,
    pub detail_scroll: u16,
}

impl BrowseState {
    fn new(kind: DrinkKind, catalog: &Catalog) -> Self {
        let mut state = Self {
            kind,
            query: String::new(),
            theme_options: theme_options(&catalog.themes(kind)),
            theme_index: 0,
            visible: Vec::new(),
            selected: 0,
            detail_scroll: 0,
        };
        state.refresh(catalog);
        state
    }

    /// Current filter
    pub fn filter(&self) -> DrinkFilter {
        DrinkFilter {
            query: self.query.clone(),
            theme: self
                .theme_options
                .get(self.theme_index)
                .and_then(|opt| theme_from_option(opt)),
        }
    }

    /// Label of the active theme option
    pub fn theme_label(&self) -> &str {
        self.theme_options
            .get(self.theme_index)
            .map(String::as_str)
            .unwrap_or(crate::catalog::filter::ALL_THEMES)
    }

    /// Catalog index of the drink under the cursor
    pub fn selected_index(&self) -> Option<usize> {
        self.visible.get(self.selected).copied()
    }

    pub fn selected_drink<'a>(&self, catalog: &'a Catalog) -> Option<&'a Drink> {
        self.selected_index()
            .and_then(|i| catalog.drinks(self.kind).get(i))
    }

    /// Recompute the visible list, keeping the cursor on the same drink if possible
    fn refresh(&mut self, catalog: &Catalog) {
        let previous = self.selected_index();
        self.visible = self.filter().apply(catalog.drinks(self.kind));
        self.selected = previous
            .and_then(|idx| self.visible.iter().position(|&v| v == idx))
            .unwrap_or(0);
    }

    fn select_catalog_index(&mut self, idx: usize) -> bool {
        match self.visible.iter().position(|&v| v == idx) {
            Some(pos) => {
                self.selected = pos;
                self.detail_scroll = 0;
                true
            }
            None => false,
        }
    }

    fn clear_filters(&mut self, catalog: &Catalog) {
        self.query.clear();
        self.theme_index = 0;
        self.refresh(catalog);
    }

    fn move_down(&mut self) {
        if self.selected < self.visible.len().saturating_sub(1) {
            self.selected += 1;
            self.detail_scroll = 0;
        }
    }

    fn move_up(&mut self) {
        if self.selected > 0 {
            self.selected -= 1;
            self.detail_scroll = 0;
        }
    }

    fn move_to(&mut self, pos: usize) {
        self.selected = pos.min(self.visible.len().saturating_sub(1));
        self.detail_scroll = 0;
    }

    fn cycle_theme(&mut self, forward: bool, catalog: &Catalog) {
        let count = self.theme_options.len().max(1);
        self.theme_index = if forward {
            (self.theme_index + 1) % count
        } else {
            (self.theme_index + count - 1) % count
        };
        self.refresh(catalog);
    }
}

/// Text being typed by the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    Search,
    EditQuantity { buffer: String },
    NewIngredient { buffer: String },
}

/// Popup overlay state
#[derive(Debug, Clone)]
pub enum PopupState {
    None,
    Confirm {
        title: String,
        message: String,
        action: PendingAction,
    },
    Error {
        title: String,
        message: String,
    },
}

/// Action waiting for confirmation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PendingAction {
    RemoveStock { name: String },
}

/// Application state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppState {
    Normal,
    SearchInput,
    QuantityInput,
    NameInput,
    ConfirmAction,
    ShowError,
}

/// Main application state
pub struct App {
    // Core state
    pub should_quit: bool,
    pub active_tab: Tab,
    pub config: Config,
    pub config_path: Option<PathBuf>,
    pub theme: Theme,

    // Data
    pub catalog: Catalog,
    pub catalog_path: PathBuf,
    pub stock: Stock,
    pub stock_path: PathBuf,

    // Browse tabs
    pub cocktails: BrowseState,
    pub shots: BrowseState,
    pub previews: PreviewCache,

    // Stock tab state
    pub stock_cursor: usize,

    // Settings tab state
    pub settings_selected: usize,

    // Text input and popups
    pub input: InputMode,
    pub popup: PopupState,

    // Flash message (temporary feedback)
    pub flash_message: Option<(String, bool, Instant)>, // (message, is_error, timestamp)
}

impl App {
    /// Create a new App instance
    pub fn new(
        config: Config,
        config_path: Option<PathBuf>,
        catalog: Catalog,
        catalog_path: PathBuf,
        stock: Stock,
        stock_path: PathBuf,
    ) -> Self {
        let theme = Theme::from_name(config.theme);
        let cocktails = BrowseState::new(DrinkKind::Cocktail, &catalog);
        let shots = BrowseState::new(DrinkKind::Shot, &catalog);

        let mut app = Self {
            should_quit: false,
            active_tab: Tab::Cocktails,
            config,
            config_path,
            theme,

            catalog,
            catalog_path,
            stock,
            stock_path,

            cocktails,
            shots,
            previews: PreviewCache::default(),

            stock_cursor: 0,
            settings_selected: 0,

            input: InputMode::Normal,
            popup: PopupState::None,
            flash_message: None,
        };
        app.refresh_preview();
        app
    }

    /// Get current app state
    pub fn state(&self) -> AppState {
        match &self.popup {
            PopupState::Confirm { .. } => AppState::ConfirmAction,
            PopupState::Error { .. } => AppState::ShowError,
            PopupState::None => match self.input {
                InputMode::Normal => AppState::Normal,
                InputMode::Search => AppState::SearchInput,
                InputMode::EditQuantity { .. } => AppState::QuantityInput,
                InputMode::NewIngredient { .. } => AppState::NameInput,
            },
        }
    }

    /// Check if side-by-side layout should be used
    pub fn should_use_side_by_side(&self, terminal_width: u16) -> bool {
        match self.config.layout {
            LayoutMode::SideBySide => true,
            LayoutMode::Stacked => false,
            LayoutMode::Auto => terminal_width >= 100,
        }
    }

    pub fn browse(&self, kind: DrinkKind) -> &BrowseState {
        match kind {
            DrinkKind::Cocktail => &self.cocktails,
            DrinkKind::Shot => &self.shots,
        }
    }

    fn browse_mut(&mut self, kind: DrinkKind) -> &mut BrowseState {
        match kind {
            DrinkKind::Cocktail => &mut self.cocktails,
            DrinkKind::Shot => &mut self.shots,
        }
    }

    /// Drink under the cursor in the active browse tab
    pub fn selected_drink(&self) -> Option<&Drink> {
        let kind = self.active_tab.drink_kind()?;
        self.browse(kind).selected_drink(&self.catalog)
    }

    /// A drink is out of stock if any ingredient is not on hand
    pub fn is_out_of_stock(&self, drink: &Drink) -> bool {
        self.stock.is_out_of_stock(&drink.ingredients)
    }

    /// Directory image paths may be relative to
    pub fn catalog_dir(&self) -> Option<&Path> {
        self.catalog_path.parent().filter(|p| !p.as_os_str().is_empty())
    }

    /// Resolved image file of a drink, if it exists
    pub fn image_path(&self, drink: &Drink) -> Option<PathBuf> {
        resolve_image_path(&drink.image, self.catalog_dir())
    }

    /// Clear flash messages after a few seconds
    pub fn tick(&mut self) {
        if let Some((_, _, instant)) = &self.flash_message {
            if instant.elapsed().as_secs() >= FLASH_SECS {
                self.flash_message = None;
            }
        }
    }

    /// Handle a key event
    pub fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        self.tick();

        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return Ok(());
        }

        // Handle based on current state
        match self.state() {
            AppState::ConfirmAction => self.handle_confirm_key(key),
            AppState::ShowError => self.handle_error_key(key),
            AppState::SearchInput => self.handle_search_key(key),
            AppState::QuantityInput => self.handle_quantity_key(key),
            AppState::NameInput => self.handle_name_key(key),
            AppState::Normal => self.handle_normal_key(key),
        }
    }

    /// Handle key in normal state
    fn handle_normal_key(&mut self, key: KeyEvent) -> Result<()> {
        // Global keys (work in all tabs)
        match key.code {
            KeyCode::Char('q') => {
                self.should_quit = true;
                return Ok(());
            }
            KeyCode::Char(c @ '1'..='4') => {
                return self.switch_tab(Tab::from_index(c as usize - '1' as usize));
            }
            _ => {}
        }

        // Tab-specific handling
        match self.active_tab {
            Tab::Cocktails => self.handle_browse_key(DrinkKind::Cocktail, key),
            Tab::Shots => self.handle_browse_key(DrinkKind::Shot, key),
            Tab::Stock => self.handle_stock_key(key),
            Tab::Settings => self.handle_settings_key(key),
        }
    }

    /// Switch tabs; opening a drink list starts with an empty search
    pub fn switch_tab(&mut self, tab: Tab) -> Result<()> {
        self.active_tab = tab;
        if let Some(kind) = tab.drink_kind() {
            let browse = self.browse_mut(kind);
            if !browse.query.is_empty() {
                browse.query.clear();
                let catalog = &self.catalog;
                match kind {
                    DrinkKind::Cocktail => self.cocktails.refresh(catalog),
                    DrinkKind::Shot => self.shots.refresh(catalog),
                }
            }
            self.refresh_preview();
        }
        Ok(())
    }

    /// Handle keys in the Cocktails and Shots tabs
    fn handle_browse_key(&mut self, kind: DrinkKind, key: KeyEvent) -> Result<()> {
        match key.code {
            KeyCode::Char('j') | KeyCode::Down => self.browse_mut(kind).move_down(),
            KeyCode::Char('k') | KeyCode::Up => self.browse_mut(kind).move_up(),
            KeyCode::Char('g') | KeyCode::Home => self.browse_mut(kind).move_to(0),
            KeyCode::Char('G') | KeyCode::End => self.browse_mut(kind).move_to(usize::MAX),
            KeyCode::Char('J') | KeyCode::PageDown => {
                let browse = self.browse_mut(kind);
                browse.detail_scroll = browse.detail_scroll.saturating_add(DETAIL_SCROLL_STEP);
                return Ok(());
            }
            KeyCode::Char('K') | KeyCode::PageUp => {
                let browse = self.browse_mut(kind);
                browse.detail_scroll = browse.detail_scroll.saturating_sub(DETAIL_SCROLL_STEP);
                return Ok(());
            }
            KeyCode::Char('/') => {
                self.input = InputMode::Search;
                return Ok(());
            }
            KeyCode::Char('t') => self.cycle_theme(kind, true),
            KeyCode::Char('T') => self.cycle_theme(kind, false),
            KeyCode::Char('c') | KeyCode::Esc => {
                let browse = match kind {
                    DrinkKind::Cocktail => &mut self.cocktails,
                    DrinkKind::Shot => &mut self.shots,
                };
                browse.clear_filters(&self.catalog);
            }
            KeyCode::Char('r') => {
                let mut rng = rand::thread_rng();
                self.pick_random(kind, &mut rng);
            }
            KeyCode::Char('m') => self.add_missing_to_stock()?,
            _ => return Ok(()),
        }
        self.refresh_preview();
        Ok(())
    }

    fn cycle_theme(&mut self, kind: DrinkKind, forward: bool) {
        let catalog = &self.catalog;
        match kind {
            DrinkKind::Cocktail => self.cocktails.cycle_theme(forward, catalog),
            DrinkKind::Shot => self.shots.cycle_theme(forward, catalog),
        }
    }

    /// Handle keys while typing a search query
    fn handle_search_key(&mut self, key: KeyEvent) -> Result<()> {
        let Some(kind) = self.active_tab.drink_kind() else {
            self.input = InputMode::Normal;
            return Ok(());
        };

        match key.code {
            KeyCode::Enter => self.input = InputMode::Normal,
            KeyCode::Esc => {
                self.browse_mut(kind).query.clear();
                self.input = InputMode::Normal;
            }
            KeyCode::Backspace => {
                self.browse_mut(kind).query.pop();
            }
            KeyCode::Down => self.browse_mut(kind).move_down(),
            KeyCode::Up => self.browse_mut(kind).move_up(),
            KeyCode::Char(c) => self.browse_mut(kind).query.push(c),
            _ => return Ok(()),
        }

        let catalog = &self.catalog;
        match kind {
            DrinkKind::Cocktail => self.cocktails.refresh(catalog),
            DrinkKind::Shot => self.shots.refresh(catalog),
        }
        self.refresh_preview();
        Ok(())
    }

    /// Handle keys in the Stock tab
    fn handle_stock_key(&mut self, key: KeyEvent) -> Result<()> {
        let count = self.stock.len();

        match key.code {
            KeyCode::Char('j') | KeyCode::Down => {
                if self.stock_cursor < count.saturating_sub(1) {
                    self.stock_cursor += 1;
                }
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.stock_cursor = self.stock_cursor.saturating_sub(1);
            }
            KeyCode::Char('g') | KeyCode::Home => self.stock_cursor = 0,
            KeyCode::Char('G') | KeyCode::End => self.stock_cursor = count.saturating_sub(1),
            KeyCode::Char('+') | KeyCode::Char('l') | KeyCode::Right => self.adjust_stock(true),
            KeyCode::Char('-') | KeyCode::Char('h') | KeyCode::Left => self.adjust_stock(false),
            KeyCode::Char('e') | KeyCode::Enter => {
                if let Some(entry) = self.stock.entries().get(self.stock_cursor) {
                    self.input = InputMode::EditQuantity {
                        buffer: entry.quantity.to_string(),
                    };
                }
            }
            KeyCode::Char('n') => {
                self.input = InputMode::NewIngredient {
                    buffer: String::new(),
                };
            }
            KeyCode::Char('x') | KeyCode::Delete => self.prompt_remove(),
            _ => {}
        }
        Ok(())
    }

    /// Handle keys while editing a quantity
    fn handle_quantity_key(&mut self, key: KeyEvent) -> Result<()> {
        let InputMode::EditQuantity { buffer } = &mut self.input else {
            return Ok(());
        };

        match key.code {
            KeyCode::Char(c) if c.is_ascii_digit() => {
                if buffer.len() < 9 {
                    buffer.push(c);
                }
            }
            KeyCode::Backspace => {
                buffer.pop();
            }
            KeyCode::Esc => self.input = InputMode::Normal,
            KeyCode::Enter => {
                let text = buffer.clone();
                self.input = InputMode::Normal;
                self.commit_quantity(&text);
            }
            _ => {}
        }
        Ok(())
    }

    /// Handle keys while typing a new ingredient name
    fn handle_name_key(&mut self, key: KeyEvent) -> Result<()> {
        let InputMode::NewIngredient { buffer } = &mut self.input else {
            return Ok(());
        };

        match key.code {
            KeyCode::Char(c) => buffer.push(c),
            KeyCode::Backspace => {
                buffer.pop();
            }
            KeyCode::Esc => self.input = InputMode::Normal,
            KeyCode::Enter => {
                let name = buffer.trim().to_string();
                self.input = InputMode::Normal;
                self.add_ingredient(&name);
            }
            _ => {}
        }
        Ok(())
    }

    /// Handle keys in Settings tab
    fn handle_settings_key(&mut self, key: KeyEvent) -> Result<()> {
        match key.code {
            KeyCode::Char('j') | KeyCode::Down => {
                if self.settings_selected < SETTINGS_COUNT - 1 {
                    self.settings_selected += 1;
                }
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.settings_selected = self.settings_selected.saturating_sub(1);
            }
            KeyCode::Enter | KeyCode::Char(' ') => {
                // Toggle/cycle setting
                match self.settings_selected {
                    0 => {
                        self.config.theme = self.config.theme.next();
                        self.theme = Theme::from_name(self.config.theme);
                    }
                    1 => self.config.layout = self.config.layout.next(),
                    2 => {
                        self.config.display.show_images = !self.config.display.show_images;
                        self.refresh_preview();
                    }
                    3 => self.config.display.show_description = !self.config.display.show_description,
                    _ => {}
                }
                self.save_config();
            }
            _ => {}
        }
        Ok(())
    }

    /// Handle keys in confirm popup
    fn handle_confirm_key(&mut self, key: KeyEvent) -> Result<()> {
        match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') => {
                if let PopupState::Confirm { action, .. } = std::mem::replace(&mut self.popup, PopupState::None) {
                    self.execute_action(action);
                }
            }
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                self.popup = PopupState::None;
            }
            _ => {}
        }
        Ok(())
    }

    /// Handle keys in error popup
    fn handle_error_key(&mut self, key: KeyEvent) -> Result<()> {
        match key.code {
            KeyCode::Char('o') | KeyCode::Enter | KeyCode::Esc => {
                self.popup = PopupState::None;
            }
            _ => {}
        }
        Ok(())
    }

    // === ACTIONS ===

    /// Jump to a random drink of the list, clearing filters that hide it
    pub fn pick_random<R: Rng + ?Sized>(&mut self, kind: DrinkKind, rng: &mut R) {
        let total = self.catalog.drinks(kind).len();
        if total == 0 {
            self.show_flash("Nothing to pick from", true);
            return;
        }

        let idx = rng.gen_range(0..total);
        let catalog = &self.catalog;
        let browse = match kind {
            DrinkKind::Cocktail => &mut self.cocktails,
            DrinkKind::Shot => &mut self.shots,
        };
        if !browse.select_catalog_index(idx) {
            browse.clear_filters(catalog);
            browse.select_catalog_index(idx);
        }

        let name = catalog.drinks(kind)[idx].name.clone();
        debug!(kind = kind.section(), drink = %name, "Random pick");
        self.show_flash(&format!("Random pick: {}", name), false);
    }

    /// Add the selected drink's missing ingredients to stock with count 0
    pub fn add_missing_to_stock(&mut self) -> Result<()> {
        let Some(drink) = self.selected_drink() else {
            return Ok(());
        };
        let missing = self.stock.missing_ingredients(&drink.ingredients);

        let added: Vec<String> = missing
            .into_iter()
            .filter(|name| self.stock.insert_missing(name))
            .collect();

        if added.is_empty() {
            self.show_flash("No new ingredients to add", false);
            return Ok(());
        }

        info!(count = added.len(), "Added missing ingredients to stock");
        if self.persist_stock() {
            self.show_flash(&format!("Added to stock: {}", added.join(", ")), false);
        }
        Ok(())
    }

    /// Increment or decrement the entry under the stock cursor
    fn adjust_stock(&mut self, up: bool) {
        let Some(name) = self.stock_entry_name() else {
            return;
        };
        let quantity = if up {
            self.stock.increment(&name)
        } else {
            self.stock.decrement(&name)
        };
        debug!(ingredient = %name, quantity, "Stock adjusted");
        self.persist_stock();
    }

    /// Apply a typed quantity to the entry under the cursor
    fn commit_quantity(&mut self, text: &str) {
        let Some(name) = self.stock_entry_name() else {
            return;
        };
        let quantity = self.stock.set_from_input(&name, text);
        debug!(ingredient = %name, quantity, "Stock quantity set");
        if self.persist_stock() {
            self.show_flash(&format!("{} set to {}", name, quantity), false);
        }
    }

    /// Add a new stock entry by name
    fn add_ingredient(&mut self, name: &str) {
        if name.is_empty() {
            return;
        }
        if !self.stock.insert_missing(name) {
            self.show_flash(&format!("{} is already in stock", name), true);
            return;
        }
        self.stock_cursor = self.stock.len() - 1;
        if self.persist_stock() {
            self.show_flash(&format!("Added {}", name), false);
        }
    }

    /// Ask before removing the entry under the cursor
    fn prompt_remove(&mut self) {
        let Some(name) = self.stock_entry_name() else {
            return;
        };
        self.popup = PopupState::Confirm {
            title: "Remove Ingredient".into(),
            message: format!("Remove {} from stock?", name),
            action: PendingAction::RemoveStock { name },
        };
    }

    /// Execute a confirmed action
    fn execute_action(&mut self, action: PendingAction) {
        match action {
            PendingAction::RemoveStock { name } => {
                if self.stock.remove(&name).is_none() {
                    return;
                }
                self.stock_cursor = self.stock_cursor.min(self.stock.len().saturating_sub(1));
                if self.persist_stock() {
                    self.show_flash(&format!("Removed {}", name), false);
                }
            }
        }
    }

    fn stock_entry_name(&self) -> Option<String> {
        self.stock
            .entries()
            .get(self.stock_cursor)
            .map(|e| e.name.clone())
    }

    /// Write stock to disk; failures keep the in-memory counts
    fn persist_stock(&mut self) -> bool {
        match self.stock.save(&self.stock_path) {
            Ok(()) => true,
            Err(e) => {
                warn!(error = %format!("{:#}", e), "Stock save failed");
                self.show_error("Save Failed", &format!("{:#}", e));
                false
            }
        }
    }

    fn save_config(&mut self) {
        let Some(path) = self.config_path.clone() else {
            self.show_flash("Settings applied (not saved)", false);
            return;
        };
        if let Err(e) = self.config.save_to(&path) {
            self.show_error("Save Failed", &format!("{:#}", e));
        } else {
            self.show_flash("Settings saved", false);
        }
    }

    /// Decode the selected drink's image if previews are on
    fn refresh_preview(&mut self) {
        if !self.config.display.show_images {
            return;
        }
        let path = self.selected_drink().and_then(|d| self.image_path(d));
        if let Some(path) = path {
            self.previews.ensure(&path);
        }
    }

    /// Show an error popup
    fn show_error(&mut self, title: &str, message: &str) {
        self.popup = PopupState::Error {
            title: title.into(),
            message: message.into(),
        };
    }

    /// Show a flash message
    fn show_flash(&mut self, message: &str, is_error: bool) {
        self.flash_message = Some((message.into(), is_error, Instant::now()));
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::fs;

    pub(crate) const SAMPLE_CATALOG: &str = r#"{
        "cocktails": {
            "Negroni": {
                "description": "Bitter and bold.",
                "image": "Images/negroni.png",
                "ingredients": ["1 oz Gin", "1 oz Campari", "1 oz Sweet Vermouth"],
                "recipe": "Stir with ice, strain over a large cube.",
                "theme": ["classic"]
            },
            "Mai Tai": {
                "description": "Tiki staple.",
                "ingredients": ["2 oz Rum", "0.75 oz Lime Juice (fresh)", "0.5 oz Orgeat"],
                "recipe": "Shake and pour over crushed ice.",
                "theme": ["tiki", "summer"]
            },
            "Gimlet": {
                "description": "Gin and lime.",
                "ingredients": ["2 oz Gin", "0.75 oz Lime Juice", "Lime wedge"],
                "recipe": "Shake and strain.",
                "theme": "classic"
            }
        },
        "shots": {
            "Lemon Drop": {
                "ingredients": ["1 oz Vodka", "Lemon slice"],
                "recipe": "Shake, strain."
            }
        }
    }"#;

    pub(crate) fn test_app(name: &str) -> App {
        let dir = std::env::temp_dir().join(format!("barcart-app-{}-{}", name, std::process::id()));
        let _ = fs::remove_dir_all(&dir);

        let catalog = Catalog::parse(SAMPLE_CATALOG).unwrap();
        let stock = Stock::parse(r#"{"Gin": 1, "Lime Juice": 2, "Lime": 1, "Campari": 0}"#).unwrap();

        App::new(
            Config::default(),
            Some(dir.join("config.toml")),
            catalog,
            dir.join("drinks.json"),
            stock,
            dir.join("stock.json"),
        )
    }

    fn press(app: &mut App, code: KeyCode) {
        app.handle_key(KeyEvent::new(code, KeyModifiers::NONE)).unwrap();
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    fn selected_name(app: &App) -> Option<String> {
        app.selected_drink().map(|d| d.name.clone())
    }

    #[test]
    fn test_starts_on_first_cocktail() {
        let app = test_app("start");
        assert_eq!(app.active_tab, Tab::Cocktails);
        assert_eq!(selected_name(&app).as_deref(), Some("Negroni"));
        assert_eq!(app.cocktails.theme_options, vec!["All", "Classic", "Summer", "Tiki"]);
    }

    #[test]
    fn test_navigation_stays_in_bounds() {
        let mut app = test_app("nav");
        press(&mut app, KeyCode::Char('k'));
        assert_eq!(app.cocktails.selected, 0);
        press(&mut app, KeyCode::Char('G'));
        assert_eq!(selected_name(&app).as_deref(), Some("Gimlet"));
        press(&mut app, KeyCode::Char('j'));
        assert_eq!(app.cocktails.selected, 2);
        press(&mut app, KeyCode::Char('g'));
        assert_eq!(app.cocktails.selected, 0);
    }

    #[test]
    fn test_search_filters_by_ingredient() {
        let mut app = test_app("search");
        press(&mut app, KeyCode::Char('/'));
        assert_eq!(app.state(), AppState::SearchInput);

        // 'q' is text here, not quit
        type_text(&mut app, "q");
        assert!(!app.should_quit);
        press(&mut app, KeyCode::Backspace);

        type_text(&mut app, "lime");
        assert_eq!(app.cocktails.visible, vec![1, 2]);

        press(&mut app, KeyCode::Enter);
        assert_eq!(app.state(), AppState::Normal);
        assert_eq!(app.cocktails.query, "lime");

        press(&mut app, KeyCode::Char('/'));
        press(&mut app, KeyCode::Esc);
        assert_eq!(app.cocktails.visible.len(), 3);
    }

    #[test]
    fn test_theme_filter_cycles() {
        let mut app = test_app("theme");
        press(&mut app, KeyCode::Char('t'));
        assert_eq!(app.cocktails.theme_label(), "Classic");
        assert_eq!(app.cocktails.visible, vec![0, 2]);

        press(&mut app, KeyCode::Char('T'));
        assert_eq!(app.cocktails.theme_label(), "All");
        press(&mut app, KeyCode::Char('T'));
        assert_eq!(app.cocktails.theme_label(), "Tiki");
        assert_eq!(app.cocktails.visible, vec![1]);
    }

    #[test]
    fn test_filter_keeps_cursor_on_same_drink() {
        let mut app = test_app("cursor");
        press(&mut app, KeyCode::Char('G'));
        press(&mut app, KeyCode::Char('t'));
        assert_eq!(selected_name(&app).as_deref(), Some("Gimlet"));
    }

    #[test]
    fn test_switching_tab_clears_search() {
        let mut app = test_app("switch");
        press(&mut app, KeyCode::Char('/'));
        type_text(&mut app, "rum");
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.cocktails.visible, vec![1]);

        press(&mut app, KeyCode::Char('2'));
        assert_eq!(app.active_tab, Tab::Shots);
        press(&mut app, KeyCode::Char('1'));
        assert!(app.cocktails.query.is_empty());
        assert_eq!(app.cocktails.visible.len(), 3);
    }

    #[test]
    fn test_random_pick_clears_hiding_filters() {
        let mut app = test_app("random");
        press(&mut app, KeyCode::Char('/'));
        type_text(&mut app, "vermouth");
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.cocktails.visible, vec![0]);

        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..10 {
            app.pick_random(DrinkKind::Cocktail, &mut rng);
            let name = selected_name(&app).unwrap();
            assert!(app.catalog.get(DrinkKind::Cocktail, &name).is_some());
        }
        assert!(app.flash_message.is_some());
    }

    #[test]
    fn test_out_of_stock_detection() {
        let app = test_app("oos");
        let gimlet = app.catalog.get(DrinkKind::Cocktail, "Gimlet").unwrap();
        let negroni = app.catalog.get(DrinkKind::Cocktail, "Negroni").unwrap();
        assert!(!app.is_out_of_stock(gimlet));
        assert!(app.is_out_of_stock(negroni));
    }

    #[test]
    fn test_add_missing_ingredients_persists() {
        let mut app = test_app("missing");
        press(&mut app, KeyCode::Char('m'));

        assert_eq!(app.stock.quantity("Sweet Vermouth"), Some(0));
        // Campari already has an entry
        assert_eq!(app.stock.len(), 5);

        let saved = Stock::load(&app.stock_path).unwrap();
        assert_eq!(saved, app.stock);
    }

    #[test]
    fn test_stock_adjust_persists_and_saturates() {
        let mut app = test_app("adjust");
        press(&mut app, KeyCode::Char('3'));
        press(&mut app, KeyCode::Char('+'));
        assert_eq!(app.stock.quantity("Gin"), Some(2));

        press(&mut app, KeyCode::Char('-'));
        press(&mut app, KeyCode::Char('-'));
        press(&mut app, KeyCode::Char('-'));
        assert_eq!(app.stock.quantity("Gin"), Some(0));

        let saved = Stock::load(&app.stock_path).unwrap();
        assert_eq!(saved.quantity("Gin"), Some(0));

        // Gin is gone, so the gimlet cannot be made
        let gimlet = app.catalog.get(DrinkKind::Cocktail, "Gimlet").unwrap();
        assert!(app.is_out_of_stock(gimlet));
    }

    #[test]
    fn test_edit_quantity_accepts_digits_only() {
        let mut app = test_app("edit");
        press(&mut app, KeyCode::Char('3'));
        press(&mut app, KeyCode::Char('j'));
        press(&mut app, KeyCode::Char('e'));
        assert_eq!(app.state(), AppState::QuantityInput);

        press(&mut app, KeyCode::Backspace);
        type_text(&mut app, "1x2");
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.stock.quantity("Lime Juice"), Some(12));

        press(&mut app, KeyCode::Enter);
        press(&mut app, KeyCode::Backspace);
        press(&mut app, KeyCode::Backspace);
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.stock.quantity("Lime Juice"), Some(0));
    }

    #[test]
    fn test_edit_quantity_escape_cancels() {
        let mut app = test_app("cancel");
        press(&mut app, KeyCode::Char('3'));
        press(&mut app, KeyCode::Enter);
        type_text(&mut app, "5");
        press(&mut app, KeyCode::Esc);
        assert_eq!(app.stock.quantity("Gin"), Some(1));
    }

    #[test]
    fn test_new_ingredient_and_duplicates() {
        let mut app = test_app("new");
        press(&mut app, KeyCode::Char('3'));
        press(&mut app, KeyCode::Char('n'));
        type_text(&mut app, "Orgeat");
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.stock.quantity("Orgeat"), Some(0));
        assert_eq!(app.stock_cursor, 4);

        press(&mut app, KeyCode::Char('n'));
        type_text(&mut app, "gin");
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.stock.len(), 5);
        assert!(matches!(app.flash_message, Some((_, true, _))));
    }

    #[test]
    fn test_remove_requires_confirmation() {
        let mut app = test_app("remove");
        press(&mut app, KeyCode::Char('3'));
        press(&mut app, KeyCode::Char('x'));
        assert_eq!(app.state(), AppState::ConfirmAction);
        press(&mut app, KeyCode::Char('n'));
        assert_eq!(app.stock.len(), 4);

        press(&mut app, KeyCode::Char('x'));
        press(&mut app, KeyCode::Char('y'));
        assert_eq!(app.stock.quantity("Gin"), None);
        assert_eq!(Stock::load(&app.stock_path).unwrap().len(), 3);
    }

    #[test]
    fn test_save_failure_shows_error() {
        let mut app = test_app("savefail");
        // A directory where the file should be makes the write fail
        fs::create_dir_all(&app.stock_path).unwrap();

        press(&mut app, KeyCode::Char('3'));
        press(&mut app, KeyCode::Char('+'));
        assert_eq!(app.state(), AppState::ShowError);
        assert_eq!(app.stock.quantity("Gin"), Some(2));

        press(&mut app, KeyCode::Enter);
        assert_eq!(app.state(), AppState::Normal);
    }

    #[test]
    fn test_settings_cycle_and_save() {
        let mut app = test_app("settings");
        press(&mut app, KeyCode::Char('4'));
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.config.theme, crate::config::ThemeName::Gruvbox);

        let path = app.config_path.clone().unwrap();
        let saved = Config::load_from(&path).unwrap();
        assert_eq!(saved.theme, crate::config::ThemeName::Gruvbox);
    }

    #[test]
    fn test_quit_keys() {
        let mut app = test_app("quit");
        press(&mut app, KeyCode::Char('q'));
        assert!(app.should_quit);

        let mut app = test_app("ctrlc");
        press(&mut app, KeyCode::Char('/'));
        app.handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL))
            .unwrap();
        assert!(app.should_quit);
    }

    #[test]
    fn test_layout_choice() {
        let mut app = test_app("layout");
        assert!(app.should_use_side_by_side(120));
        assert!(!app.should_use_side_by_side(80));
        app.config.layout = LayoutMode::Stacked;
        assert!(!app.should_use_side_by_side(200));
    }
}

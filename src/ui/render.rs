//! Main rendering module
//!
//! Handles rendering the complete UI including:
//! - Header with catalog summary and tab bar
//! - Active tab content
//! - Popups and overlays
//! - Status bar

use crate::app::{App, AppState, BrowseState, InputMode, PopupState};
use crate::types::{Drink, DrinkKind, Tab};
use crate::ui::preview::PREVIEW_COLS;
use crate::ui::preview::PREVIEW_ROWS;
use crate::ui::widgets;
use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{
        Block, Borders, Cell, List, ListItem, ListState, Paragraph, Row, Table, TableState, Tabs,
        Wrap,
    },
    Frame,
};

/// Main render function - entry point for all UI rendering
pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();

    // Main layout: header, content, status bar
    let layout = Layout::vertical([
        Constraint::Length(3),  // Header + tabs
        Constraint::Min(10),    // Content
        Constraint::Length(1),  // Status bar
    ])
    .split(area);

    render_header(frame, app, layout[0]);
    render_tab_content(frame, app, layout[1]);
    render_status_bar(frame, app, layout[2]);

    // Render popup overlays (if any)
    render_popups(frame, app, area);
}

/// Render header with catalog summary and tab bar
fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;

    let header_block = Block::default()
        .style(theme.block_style())
        .title(format!(
            " barcart · {} cocktails · {} shots · {}/{} stocked ",
            app.catalog.drinks(DrinkKind::Cocktail).len(),
            app.catalog.drinks(DrinkKind::Shot).len(),
            app.stock.available_count(),
            app.stock.len(),
        ))
        .title_style(theme.title())
        .borders(Borders::BOTTOM)
        .border_style(theme.border());

    frame.render_widget(header_block, area);

    // Tab bar
    let tab_titles: Vec<Line> = Tab::all()
        .iter()
        .enumerate()
        .map(|(i, tab)| {
            let style = if app.active_tab == *tab {
                theme.tab_active()
            } else {
                theme.tab_inactive()
            };
            Line::styled(format!("[{}] {}", i + 1, tab.label()), style)
        })
        .collect();

    let tabs = Tabs::new(tab_titles)
        .select(app.active_tab.index())
        .divider(" │ ")
        .style(theme.text());

    let tabs_area = Rect {
        x: area.x + 2,
        y: area.y + 1,
        width: area.width.saturating_sub(4),
        height: 1,
    };
    frame.render_widget(tabs, tabs_area);
}

/// Render the active tab's content
fn render_tab_content(frame: &mut Frame, app: &App, area: Rect) {
    match app.active_tab {
        Tab::Cocktails => render_browse_tab(frame, app, DrinkKind::Cocktail, area),
        Tab::Shots => render_browse_tab(frame, app, DrinkKind::Shot, area),
        Tab::Stock => render_stock_tab(frame, app, area),
        Tab::Settings => render_settings_tab(frame, app, area),
    }
}

/// Render status bar with keybindings
fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;

    let hints = match app.state() {
        AppState::SearchInput => "Type to search  [Enter] Keep  [Esc] Clear  [↑/↓] Navigate",
        AppState::QuantityInput => "Type amount  [Enter] Save  [Esc] Cancel",
        AppState::NameInput => "Type ingredient name  [Enter] Add  [Esc] Cancel",
        AppState::ConfirmAction => "[y] Yes  [n] Cancel",
        AppState::ShowError => "[Enter] Dismiss",
        AppState::Normal => match app.active_tab {
            Tab::Cocktails | Tab::Shots => {
                "[j/k] Navigate  [/] Search  [t] Theme  [r] Random  [m] Stock missing  [J/K] Scroll  [q] Quit"
            }
            Tab::Stock => "[j/k] Navigate  [+/-] Adjust  [e] Edit  [n] New  [x] Remove  [q] Quit",
            Tab::Settings => "[j/k] Navigate  [Enter] Change  [q] Quit",
        },
    };

    let position = match app.active_tab.drink_kind() {
        Some(kind) => {
            let browse = app.browse(kind);
            format!(
                "{}/{}",
                (browse.selected + 1).min(browse.visible.len()),
                browse.visible.len()
            )
        }
        None if app.active_tab == Tab::Stock => format!(
            "{}/{}",
            (app.stock_cursor + 1).min(app.stock.len()),
            app.stock.len()
        ),
        None => String::new(),
    };

    widgets::render_status_bar(frame, hints, &position, theme, area);
}

/// Render popups if active
fn render_popups(frame: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;

    if let InputMode::NewIngredient { buffer } = &app.input {
        widgets::render_input_popup(
            frame,
            "New Ingredient",
            "Name as it appears in recipes (without quantity):",
            buffer,
            theme,
            area,
        );
    }

    match &app.popup {
        PopupState::None => {}

        PopupState::Confirm { title, message, .. } => {
            widgets::render_confirm_popup(frame, title, message, theme, area);
        }

        PopupState::Error { title, message } => {
            widgets::render_error_popup(frame, title, message, theme, area);
        }
    }

    // Flash message (success/error feedback)
    if let Some((msg, is_error, _)) = &app.flash_message {
        widgets::render_flash_message(frame, msg, *is_error, theme, area);
    }
}

// === TAB RENDERERS ===

/// Cocktails and Shots tabs: filtered list plus detail panel
fn render_browse_tab(frame: &mut Frame, app: &App, kind: DrinkKind, area: Rect) {
    let browse = app.browse(kind);

    let panels = if app.should_use_side_by_side(area.width) {
        widgets::horizontal_split(area, &[35, 65])
    } else {
        widgets::vertical_split(area, &[40, 60])
    };

    render_drink_list(frame, app, browse, panels[0]);
    render_drink_detail(frame, app, browse, panels[1]);
}

/// Left panel: search line, theme selector, and drink names
fn render_drink_list(frame: &mut Frame, app: &App, browse: &BrowseState, area: Rect) {
    let theme = &app.theme;
    let drinks = app.catalog.drinks(browse.kind);
    let searching = app.state() == AppState::SearchInput;

    let block = Block::default()
        .style(theme.block_style())
        .title(format!(
            " {} ({}/{}) ",
            browse.kind.label(),
            browse.visible.len(),
            drinks.len()
        ))
        .title_style(theme.title())
        .borders(Borders::ALL)
        .border_style(if searching || browse.filter().is_active() {
            theme.border_focused()
        } else {
            theme.border()
        });

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let rows = Layout::vertical([
        Constraint::Length(1), // Search
        Constraint::Length(1), // Theme
        Constraint::Length(1), // Spacer
        Constraint::Min(1),    // List
    ])
    .split(inner);

    // Search line
    let search_line = if searching {
        Line::from(vec![
            Span::styled("Search: ", theme.text_dim()),
            Span::styled(browse.query.as_str(), theme.text()),
            Span::styled("_", theme.title()),
        ])
    } else if browse.query.is_empty() {
        Line::styled("Search by ingredient... [/]", theme.text_dim())
    } else {
        Line::from(vec![
            Span::styled("Search: ", theme.text_dim()),
            Span::styled(browse.query.as_str(), theme.text()),
        ])
    };
    frame.render_widget(Paragraph::new(search_line), rows[0]);

    // Theme selector
    let theme_line = Line::from(vec![
        Span::styled("Theme: ", theme.text_dim()),
        Span::styled("◀ ", Style::default().fg(theme.accent_dim)),
        Span::styled(browse.theme_label(), theme.tag()),
        Span::styled(" ▶", Style::default().fg(theme.accent_dim)),
    ]);
    frame.render_widget(Paragraph::new(theme_line), rows[1]);

    if browse.visible.is_empty() {
        let empty_msg = Paragraph::new(if drinks.is_empty() {
            "No drinks in catalog"
        } else {
            "No drinks match"
        })
        .style(theme.text_dim())
        .alignment(Alignment::Center);
        frame.render_widget(empty_msg, rows[3]);
        return;
    }

    let items: Vec<ListItem> = browse
        .visible
        .iter()
        .filter_map(|&i| drinks.get(i))
        .map(|drink| {
            let style = if app.is_out_of_stock(drink) {
                theme.out_of_stock()
            } else {
                theme.text()
            };
            ListItem::new(Line::styled(drink.name.as_str(), style))
        })
        .collect();

    let list = List::new(items)
        .style(theme.text())
        .highlight_style(theme.selected())
        .highlight_symbol("▸ ");

    let mut state = ListState::default().with_selected(Some(browse.selected));
    frame.render_stateful_widget(list, rows[3], &mut state);
}

/// Right panel: title, image, description, ingredients, recipe
fn render_drink_detail(frame: &mut Frame, app: &App, browse: &BrowseState, area: Rect) {
    let theme = &app.theme;

    let block = Block::default()
        .style(theme.block_style())
        .title(" Details ")
        .title_style(theme.text_dim())
        .borders(Borders::ALL)
        .border_style(theme.border());

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let Some(drink) = browse.selected_drink(&app.catalog) else {
        let hint = Paragraph::new("Select a drink")
            .style(theme.title())
            .alignment(Alignment::Center);
        frame.render_widget(hint, inner);
        return;
    };

    let out_of_stock = app.is_out_of_stock(drink);
    let show_images = app.config.display.show_images;
    let show_description = app.config.display.show_description;

    let sections = Layout::vertical([
        Constraint::Length(2),                                            // Title + tags
        Constraint::Length(if show_images { PREVIEW_ROWS + 1 } else { 0 }), // Image + description
        Constraint::Min(1),                                               // Body
    ])
    .split(inner);

    // Title
    let mut title_lines = vec![Line::styled(drink.name.as_str(), theme.drink_title(out_of_stock))];
    if !drink.tags.is_empty() {
        let tags: Vec<Span> = drink
            .tags
            .iter()
            .flat_map(|t| [Span::styled(format!("#{}", t.to_lowercase()), theme.tag()), Span::raw(" ")])
            .collect();
        title_lines.push(Line::from(tags));
    }
    frame.render_widget(Paragraph::new(title_lines), sections[0]);

    if show_images {
        let top = Layout::horizontal([Constraint::Length(PREVIEW_COLS + 2), Constraint::Min(10)])
            .split(sections[1]);

        render_image(frame, app, drink, top[0]);

        if show_description {
            let description = Paragraph::new(drink.description.as_str())
                .style(theme.text())
                .wrap(Wrap { trim: true });
            frame.render_widget(description, top[1]);
        }
    }

    // Body: ingredients and recipe, scrollable
    let mut lines: Vec<Line> = Vec::new();

    if !show_images && show_description && !drink.description.is_empty() {
        lines.push(Line::styled(drink.description.as_str(), theme.text()));
        lines.push(Line::raw(""));
    }

    lines.push(Line::styled("Ingredients", theme.title()));
    for item in &drink.ingredients {
        if app.stock.has_ingredient(item) {
            lines.push(Line::from(vec![
                Span::styled("• ", theme.in_stock()),
                Span::styled(item.as_str(), theme.text()),
            ]));
        } else {
            lines.push(Line::from(vec![
                Span::styled("✖ ", theme.out_of_stock()),
                Span::styled(item.as_str(), theme.out_of_stock()),
            ]));
        }
    }

    let missing = app.stock.missing_ingredients(&drink.ingredients);
    if !missing.is_empty() {
        lines.push(Line::raw(""));
        lines.push(Line::from(vec![
            Span::styled("Missing: ", theme.warning()),
            Span::styled(missing.join(", "), theme.text_dim()),
        ]));
    }

    lines.push(Line::raw(""));
    lines.push(Line::styled("Recipe:", theme.title()));
    for text in drink.recipe.lines() {
        lines.push(Line::styled(text, theme.text()));
    }

    let body = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .scroll((browse.detail_scroll, 0));
    frame.render_widget(body, sections[2]);
}

/// Image preview or a placeholder
fn render_image(frame: &mut Frame, app: &App, drink: &Drink, area: Rect) {
    let theme = &app.theme;
    let preview = app
        .image_path(drink)
        .and_then(|path| app.previews.get(&path));

    match preview {
        Some(preview) => {
            let widget = Paragraph::new(preview.lines(theme.bg));
            frame.render_widget(widget, area);
        }
        None => {
            let placeholder_area = Rect {
                y: area.y + area.height / 2,
                height: area.height.min(1),
                ..area
            };
            let placeholder = Paragraph::new("(No image)")
                .style(theme.text_dim())
                .alignment(Alignment::Center);
            frame.render_widget(placeholder, placeholder_area);
        }
    }
}

/// Stock tab: one row per tracked ingredient
fn render_stock_tab(frame: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;

    let block = Block::default()
        .style(theme.block_style())
        .title(format!(
            " Stock · {}/{} in stock ",
            app.stock.available_count(),
            app.stock.len()
        ))
        .title_style(theme.title())
        .borders(Borders::ALL)
        .border_style(theme.border_focused());

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let table_area = Rect {
        height: inner.height.saturating_sub(2),
        ..inner
    };

    if app.stock.is_empty() {
        let empty_msg = Paragraph::new(
            "No ingredients tracked yet.\n[n] adds one, [m] on a drink adds its missing ingredients.",
        )
        .style(theme.text_dim())
        .alignment(Alignment::Center);
        frame.render_widget(empty_msg, table_area);
    } else {
        let header = Row::new(vec![
            Cell::from("Item").style(theme.title()),
            Cell::from("In-Stock").style(theme.title()),
            Cell::from("Amount").style(theme.title()),
        ]);

        let editing = match &app.input {
            InputMode::EditQuantity { buffer } => Some(buffer.as_str()),
            _ => None,
        };

        let rows: Vec<Row> = app
            .stock
            .entries()
            .iter()
            .enumerate()
            .map(|(i, entry)| {
                let tick = if entry.is_available() {
                    Cell::from("✔").style(theme.in_stock())
                } else {
                    Cell::from("✖").style(theme.out_of_stock())
                };

                let amount = match editing {
                    Some(buffer) if i == app.stock_cursor => format!("  [{}_]", buffer),
                    _ => format!("◀ {:^5} ▶", entry.quantity),
                };

                Row::new(vec![
                    Cell::from(entry.name.clone()),
                    tick,
                    Cell::from(amount),
                ])
                .style(theme.text())
            })
            .collect();

        let table = Table::new(
            rows,
            [
                Constraint::Min(20),
                Constraint::Length(10),
                Constraint::Length(14),
            ],
        )
        .header(header)
        .highlight_style(theme.selected());

        let mut state = TableState::default().with_selected(Some(app.stock_cursor));
        frame.render_stateful_widget(table, table_area, &mut state);
    }

    // Summary of what can be made
    let summary_area = Rect {
        y: inner.y + inner.height.saturating_sub(1),
        height: inner.height.min(1),
        ..inner
    };
    let (makeable, total) = DrinkKind::all()
        .iter()
        .flat_map(|kind| app.catalog.drinks(*kind))
        .fold((0, 0), |(ok, total), drink| {
            (ok + usize::from(!app.is_out_of_stock(drink)), total + 1)
        });
    let summary = Paragraph::new(format!("{} of {} drinks can be made", makeable, total))
        .style(theme.text_dim())
        .alignment(Alignment::Right);
    frame.render_widget(summary, summary_area);
}

/// Settings tab
fn render_settings_tab(frame: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;

    let block = Block::default()
        .style(theme.block_style())
        .title(" Settings ")
        .title_style(theme.title())
        .borders(Borders::ALL)
        .border_style(theme.border_focused());

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let settings = [
        ("Theme", app.config.theme.as_str()),
        ("Layout", app.config.layout.as_str()),
        ("Show Images", bool_str(app.config.display.show_images)),
        ("Show Description", bool_str(app.config.display.show_description)),
    ];

    let items: Vec<ListItem> = settings
        .iter()
        .enumerate()
        .map(|(i, (label, value))| {
            let style = if i == app.settings_selected {
                theme.selected()
            } else {
                theme.text()
            };

            ListItem::new(Line::from(vec![
                Span::styled(format!("{:<24}", label), style),
                Span::styled(format!("[{}]", value), Style::default().fg(theme.accent)),
            ]))
        })
        .collect();

    frame.render_widget(List::new(items), inner);

    // File locations at bottom
    let config_path = app
        .config_path
        .as_ref()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "Not saved".into());

    let paths = vec![
        Line::styled(format!("Config:  {}", config_path), theme.text_dim()),
        Line::styled(format!("Catalog: {}", app.catalog_path.display()), theme.text_dim()),
        Line::styled(format!("Stock:   {}", app.stock_path.display()), theme.text_dim()),
    ];
    let path_area = Rect {
        y: inner.y + inner.height.saturating_sub(3),
        height: inner.height.min(3),
        ..inner
    };
    frame.render_widget(Paragraph::new(paths), path_area);
}

fn bool_str(b: bool) -> &'static str {
    if b { "✓" } else { " " }
}

//! Reusable UI widgets
//!
//! Contains common UI components used across multiple tabs:
//! - Popup dialogs (confirmation, error, text input)
//! - Flash messages and the status bar
//! - Layout helpers

use crate::ui::Theme;
use ratatui::{
    layout::{Alignment, Constraint, Layout, Margin, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

/// Centered popup: message lines on top, key hints on the bottom row
pub fn render_popup(
    frame: &mut Frame,
    title: &str,
    content: Vec<Line>,
    buttons: &[(&str, &str)], // (label, key)
    theme: &Theme,
    area: Rect,
) {
    let width = area.width.saturating_sub(4).min(56);
    let height = (content.len() as u16 + 6).min(area.height.saturating_sub(2));
    let popup_area = centered_rect(width, height, area);

    frame.render_widget(Clear, popup_area);

    let block = Block::default()
        .title(format!(" {} ", title))
        .title_style(theme.title())
        .borders(Borders::ALL)
        .border_style(theme.border_focused())
        .style(theme.block_style());
    let inner = block.inner(popup_area).inner(Margin::new(1, 0));
    frame.render_widget(block, popup_area);

    let [body, _, button_row] = Layout::vertical([
        Constraint::Min(1),
        Constraint::Length(1),
        Constraint::Length(1),
    ])
    .areas(inner);

    frame.render_widget(
        Paragraph::new(content)
            .style(theme.text())
            .wrap(Wrap { trim: false }),
        body,
    );

    if buttons.is_empty() {
        return;
    }

    let key_style = Style::default()
        .fg(theme.accent)
        .add_modifier(Modifier::BOLD);
    let mut spans: Vec<Span> = Vec::with_capacity(buttons.len() * 5);
    for (i, (label, key)) in buttons.iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw("    "));
        }
        spans.push(Span::styled("[", theme.text_dim()));
        spans.push(Span::styled(*key, key_style));
        spans.push(Span::styled("] ", theme.text_dim()));
        spans.push(Span::styled(*label, theme.text()));
    }

    frame.render_widget(
        Paragraph::new(Line::from(spans)).alignment(Alignment::Center),
        button_row,
    );
}

/// Render a confirmation popup with Yes/No buttons
pub fn render_confirm_popup(
    frame: &mut Frame,
    title: &str,
    message: &str,
    theme: &Theme,
    area: Rect,
) {
    let content = vec![
        Line::raw(""),
        Line::raw(message),
        Line::raw(""),
    ];

    render_popup(
        frame,
        title,
        content,
        &[("Yes", "y"), ("Cancel", "n")],
        theme,
        area,
    );
}

/// Render an error popup
pub fn render_error_popup(
    frame: &mut Frame,
    title: &str,
    message: &str,
    theme: &Theme,
    area: Rect,
) {
    let content = vec![
        Line::raw(""),
        Line::styled(message, theme.error()),
        Line::raw(""),
    ];

    render_popup(frame, title, content, &[("OK", "o")], theme, area);
}

/// Render a single-line text prompt with a cursor
pub fn render_input_popup(
    frame: &mut Frame,
    title: &str,
    prompt: &str,
    value: &str,
    theme: &Theme,
    area: Rect,
) {
    let content = vec![
        Line::raw(""),
        Line::styled(prompt, theme.text_dim()),
        Line::from(vec![
            Span::styled("> ", Style::default().fg(theme.accent)),
            Span::styled(value, theme.text()),
            Span::styled("_", theme.title()),
        ]),
        Line::raw(""),
    ];

    render_popup(
        frame,
        title,
        content,
        &[("Add", "Enter"), ("Cancel", "Esc")],
        theme,
        area,
    );
}

/// Render a flash message (bottom of screen)
pub fn render_flash_message(
    frame: &mut Frame,
    message: &str,
    is_error: bool,
    theme: &Theme,
    area: Rect,
) {
    let style = if is_error { theme.error() } else { theme.success() };
    let prefix = if is_error { "✗ " } else { "✓ " };

    let flash_area = Rect {
        x: area.x,
        y: area.y + area.height.saturating_sub(1),
        width: area.width,
        height: 1,
    };

    frame.render_widget(Clear, flash_area);
    let flash = Paragraph::new(Line::from(vec![
        Span::styled(prefix, style),
        Span::styled(message, style),
    ]))
    .style(theme.block_style());

    frame.render_widget(flash, flash_area);
}

/// One-line status bar: key hints left, position right
pub fn render_status_bar(
    frame: &mut Frame,
    hints: &str,
    position: &str,
    theme: &Theme,
    area: Rect,
) {
    let line = Rect {
        y: area.bottom().saturating_sub(1),
        height: area.height.min(1),
        ..area
    };
    frame.render_widget(Clear, line);

    let right_width = position.chars().count() as u16 + 1;
    let [left, right] =
        Layout::horizontal([Constraint::Min(0), Constraint::Length(right_width)]).areas(line);

    frame.render_widget(Paragraph::new(hints).style(theme.text_dim()), left);
    frame.render_widget(Paragraph::new(position).style(theme.text_dim()), right);
}

/// Rect of the given size centered in `area`
pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    Rect {
        x: area.x + area.width.saturating_sub(width) / 2,
        y: area.y + area.height.saturating_sub(height) / 2,
        width: width.min(area.width),
        height: height.min(area.height),
    }
}

/// Side-by-side panels sized by percentage
pub fn horizontal_split(area: Rect, percentages: &[u16]) -> Vec<Rect> {
    Layout::horizontal(percentages.iter().copied().map(Constraint::Percentage))
        .split(area)
        .to_vec()
}

/// Stacked panels sized by percentage
pub fn vertical_split(area: Rect, percentages: &[u16]) -> Vec<Rect> {
    Layout::vertical(percentages.iter().copied().map(Constraint::Percentage))
        .split(area)
        .to_vec()
}

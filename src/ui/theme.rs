//! Theme definitions for barcart
//!
//! Provides four built-in themes: Lounge, Gruvbox, Nord, and Transparent.
//! Each theme defines colors for all UI elements.

use crate::config::ThemeName;
use ratatui::style::{Color, Modifier, Style};

/// Complete theme with all required colors
#[derive(Debug, Clone)]
pub struct Theme {
    // Base colors
    pub bg: Color,
    pub fg: Color,
    pub fg_dim: Color,

    // Accent colors
    pub accent: Color,
    pub accent_dim: Color,

    // Status colors
    pub success: Color,
    pub warning: Color,
    pub error: Color,

    // UI element colors
    pub border: Color,
    pub border_focused: Color,
    pub selection_bg: Color,
    pub selection_fg: Color,

    // Stock colors
    pub in_stock: Color,
    pub out_of_stock: Color,
    pub tag: Color,
}

impl Theme {
    /// Create a theme from a theme name
    pub fn from_name(name: ThemeName) -> Self {
        match name {
            ThemeName::Lounge => Self::lounge(),
            ThemeName::Gruvbox => Self::gruvbox(),
            ThemeName::Nord => Self::nord(),
            ThemeName::Transparent => Self::transparent(),
        }
    }

    /// Dark bar theme with amber titles (default)
    pub fn lounge() -> Self {
        Self {
            // Base
            bg: Color::Rgb(28, 28, 28),           // #1c1c1c
            fg: Color::Rgb(255, 255, 255),        // #ffffff
            fg_dim: Color::Rgb(140, 140, 140),    // #8c8c8c

            // Accent (amber)
            accent: Color::Rgb(255, 204, 0),      // #ffcc00
            accent_dim: Color::Rgb(191, 153, 0),  // #bf9900

            // Status
            success: Color::Rgb(46, 204, 64),     // #2ecc40
            warning: Color::Rgb(255, 133, 27),    // #ff851b
            error: Color::Rgb(255, 65, 54),       // #ff4136

            // UI elements
            border: Color::Rgb(60, 60, 60),       // #3c3c3c
            border_focused: Color::Rgb(255, 204, 0),
            selection_bg: Color::Rgb(255, 204, 0),
            selection_fg: Color::Rgb(28, 28, 28),

            // Stock
            in_stock: Color::Rgb(46, 204, 64),
            out_of_stock: Color::Rgb(255, 65, 54),
            tag: Color::Rgb(127, 219, 255),       // #7fdbff
        }
    }

    /// Gruvbox dark theme
    pub fn gruvbox() -> Self {
        Self {
            // Base
            bg: Color::Rgb(40, 40, 40),           // #282828
            fg: Color::Rgb(235, 219, 178),        // #ebdbb2
            fg_dim: Color::Rgb(146, 131, 116),    // #928374

            // Accent (orange)
            accent: Color::Rgb(254, 128, 25),     // #fe8019
            accent_dim: Color::Rgb(214, 93, 14),  // #d65d0e

            // Status
            success: Color::Rgb(184, 187, 38),    // #b8bb26
            warning: Color::Rgb(250, 189, 47),    // #fabd2f
            error: Color::Rgb(251, 73, 52),       // #fb4934

            // UI elements
            border: Color::Rgb(80, 73, 69),       // #504945
            border_focused: Color::Rgb(168, 153, 132), // #a89984
            selection_bg: Color::Rgb(80, 73, 69), // #504945
            selection_fg: Color::Rgb(235, 219, 178), // #ebdbb2

            // Stock
            in_stock: Color::Rgb(184, 187, 38),
            out_of_stock: Color::Rgb(251, 73, 52),
            tag: Color::Rgb(131, 165, 152),       // #83a598
        }
    }

    /// Nord theme
    pub fn nord() -> Self {
        Self {
            // Base (Polar Night)
            bg: Color::Rgb(46, 52, 64),           // #2e3440
            fg: Color::Rgb(236, 239, 244),        // #eceff4
            fg_dim: Color::Rgb(76, 86, 106),      // #4c566a

            // Accent (Frost)
            accent: Color::Rgb(136, 192, 208),    // #88c0d0
            accent_dim: Color::Rgb(94, 129, 172), // #5e81ac

            // Status (Aurora)
            success: Color::Rgb(163, 190, 140),   // #a3be8c
            warning: Color::Rgb(235, 203, 139),   // #ebcb8b
            error: Color::Rgb(191, 97, 106),      // #bf616a

            // UI elements
            border: Color::Rgb(59, 66, 82),       // #3b4252
            border_focused: Color::Rgb(136, 192, 208),
            selection_bg: Color::Rgb(76, 86, 106),
            selection_fg: Color::Rgb(236, 239, 244),

            // Stock
            in_stock: Color::Rgb(163, 190, 140),
            out_of_stock: Color::Rgb(191, 97, 106),
            tag: Color::Rgb(180, 142, 173),       // #b48ead
        }
    }

    /// Transparent theme (uses terminal colors)
    pub fn transparent() -> Self {
        Self {
            bg: Color::Reset,
            fg: Color::Reset,
            fg_dim: Color::DarkGray,

            accent: Color::Yellow,
            accent_dim: Color::Blue,

            success: Color::Green,
            warning: Color::Yellow,
            error: Color::Red,

            border: Color::DarkGray,
            border_focused: Color::Yellow,
            selection_bg: Color::DarkGray,
            selection_fg: Color::White,

            in_stock: Color::Green,
            out_of_stock: Color::Red,
            tag: Color::Cyan,
        }
    }

    // Style helpers for common UI patterns

    /// Background fill for blocks
    pub fn block_style(&self) -> Style {
        Style::default().fg(self.fg).bg(self.bg)
    }

    /// Default text style
    pub fn text(&self) -> Style {
        Style::default().fg(self.fg).bg(self.bg)
    }

    /// Dimmed text style
    pub fn text_dim(&self) -> Style {
        Style::default().fg(self.fg_dim).bg(self.bg)
    }

    /// Title/header style
    pub fn title(&self) -> Style {
        Style::default()
            .fg(self.accent)
            .bg(self.bg)
            .add_modifier(Modifier::BOLD)
    }

    /// Selected item style
    pub fn selected(&self) -> Style {
        Style::default()
            .fg(self.selection_fg)
            .bg(self.selection_bg)
            .add_modifier(Modifier::BOLD)
    }

    /// Border style (unfocused)
    pub fn border(&self) -> Style {
        Style::default().fg(self.border).bg(self.bg)
    }

    /// Border style (focused)
    pub fn border_focused(&self) -> Style {
        Style::default().fg(self.border_focused).bg(self.bg)
    }

    /// Tab style (inactive)
    pub fn tab_inactive(&self) -> Style {
        Style::default().fg(self.fg_dim).bg(self.bg)
    }

    /// Tab style (active)
    pub fn tab_active(&self) -> Style {
        Style::default()
            .fg(self.accent)
            .bg(self.bg)
            .add_modifier(Modifier::BOLD)
    }

    /// Success message style
    pub fn success(&self) -> Style {
        Style::default().fg(self.success).bg(self.bg)
    }

    /// Warning message style
    pub fn warning(&self) -> Style {
        Style::default().fg(self.warning).bg(self.bg)
    }

    /// Error message style
    pub fn error(&self) -> Style {
        Style::default().fg(self.error).bg(self.bg)
    }

    /// Ingredient or entry on hand
    pub fn in_stock(&self) -> Style {
        Style::default()
            .fg(self.in_stock)
            .bg(self.bg)
            .add_modifier(Modifier::BOLD)
    }

    /// Ingredient, entry, or drink that cannot be made
    pub fn out_of_stock(&self) -> Style {
        Style::default().fg(self.out_of_stock).bg(self.bg)
    }

    /// Drink title, red when something is missing
    pub fn drink_title(&self, out_of_stock: bool) -> Style {
        if out_of_stock {
            self.out_of_stock().add_modifier(Modifier::BOLD)
        } else {
            self.title()
        }
    }

    /// Theme tag chip
    pub fn tag(&self) -> Style {
        Style::default().fg(self.tag).bg(self.bg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_theme_from_name() {
        let lounge = Theme::from_name(ThemeName::Lounge);
        assert_eq!(lounge.bg, Color::Rgb(28, 28, 28));

        let gruvbox = Theme::from_name(ThemeName::Gruvbox);
        assert_eq!(gruvbox.bg, Color::Rgb(40, 40, 40));

        let nord = Theme::from_name(ThemeName::Nord);
        assert_eq!(nord.bg, Color::Rgb(46, 52, 64));

        let transparent = Theme::from_name(ThemeName::Transparent);
        assert_eq!(transparent.bg, Color::Reset);
    }

    #[test]
    fn test_drink_title_flags_out_of_stock() {
        let theme = Theme::lounge();
        assert_eq!(theme.drink_title(true).fg, Some(theme.out_of_stock));
        assert_eq!(theme.drink_title(false).fg, Some(theme.accent));
    }
}

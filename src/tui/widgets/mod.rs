// TUI widget modules for each dashboard panel.

pub mod charts;
pub mod footer;
pub mod header;
pub mod pitcher;
pub mod player_list;
pub mod quit_confirm;
pub mod selected;

use ratatui::style::Color;

use crate::chart::Rgba;

/// Header/footer background.
pub const BANNER_BG: Color = Color::Rgb(0x1a, 0x36, 0x5d);

/// Terminal color for a chart color. Alpha is dropped.
pub fn term_color(c: Rgba) -> Color {
    Color::Rgb(c.r, c.g, c.b)
}

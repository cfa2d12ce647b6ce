use ratatui::style::Color;

// Destructive actions and errors
pub const ACCENT_PRIMARY: Color = Color::Rgb(239, 83, 80);
// Confirmations and successful outcomes
pub const ACCENT_SECONDARY: Color = Color::Rgb(102, 187, 106);
// Titles, key hints and the list highlight
pub const ACCENT_HIGHLIGHT: Color = Color::Rgb(100, 181, 246);

pub const TEXT_PRIMARY: Color = Color::Rgb(236, 239, 241);
pub const TEXT_SECONDARY: Color = Color::Rgb(144, 164, 174);

pub const BG_DARK: Color = Color::Rgb(26, 29, 33);
pub const BORDER_COLOR: Color = Color::Rgb(84, 110, 122);

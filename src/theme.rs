use ratatui::style::Color;

// Centralized theme colors, kept as small helpers so components never
// hard-code palette choices.

pub fn accent() -> Color {
    Color::Rgb(200, 100, 0)
}

// Panel / status bar
pub fn panel_bg() -> Color {
    Color::DarkGray
}
pub fn panel_fg() -> Color {
    Color::White
}

// Element list
pub fn list_id_fg() -> Color {
    Color::Cyan
}
pub fn list_kind_fg() -> Color {
    Color::DarkGray
}

// Success / failure indicators
pub fn success_fg() -> Color {
    Color::Green
}
pub fn failure_fg() -> Color {
    Color::Red
}

// Dialog
pub fn dialog_bg() -> Color {
    Color::Black
}
pub fn dialog_fg() -> Color {
    Color::White
}
pub fn dialog_button_bg() -> Color {
    Color::Blue
}
pub fn dialog_button_fg() -> Color {
    Color::White
}

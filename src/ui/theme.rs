// ChatbotQuery - ui/theme.rs
//
// Colour scheme, visuals, and layout constants.
// No dependencies on app state or business logic.

use egui::Color32;

/// Background of the preformatted response block.
pub fn response_bg(dark_mode: bool) -> Color32 {
    if dark_mode {
        Color32::from_rgb(31, 41, 55) // Gray 800
    } else {
        Color32::from_rgb(244, 244, 244)
    }
}

/// Colour for error responses.
pub const ERROR_TEXT: Color32 = Color32::from_rgb(185, 28, 28); // Red 800

/// Colour for the pending indicator text.
pub const PENDING_TEXT: Color32 = Color32::from_rgb(217, 119, 6); // Amber 600

/// Layout constants.
pub const FORM_MAX_WIDTH: f32 = 600.0;
pub const FORM_TOP_MARGIN: f32 = 32.0;
pub const RESPONSE_PADDING: i8 = 10;
pub const RESPONSE_CORNER_RADIUS: u8 = 5;

/// Apply the configured theme and body font size to the egui context.
pub fn apply(ctx: &egui::Context, dark_mode: bool, font_size: f32) {
    ctx.set_visuals(if dark_mode {
        egui::Visuals::dark()
    } else {
        egui::Visuals::light()
    });

    ctx.style_mut(|style| {
        for (text_style, font_id) in style.text_styles.iter_mut() {
            font_id.size = match text_style {
                egui::TextStyle::Heading => font_size * 1.7,
                egui::TextStyle::Small => font_size * 0.75,
                _ => font_size,
            };
        }
    });
}

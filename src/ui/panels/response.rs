// ChatbotQuery - ui/panels/response.rs
//
// Preformatted response view. Hidden until the first request resolves;
// afterwards shows the pretty-printed JSON or the error message verbatim.

use crate::app::state::AppState;
use crate::core::model::QueryStatus;
use crate::ui::theme;

/// Render the response block below the query form.
pub fn render(ui: &mut egui::Ui, state: &AppState, dark_mode: bool) {
    if state.response.is_empty() {
        return;
    }

    ui.add_space(16.0);
    ui.horizontal(|ui| {
        ui.label(egui::RichText::new("Response").strong());
        if let Some(at) = state.last_resolved_at {
            ui.label(egui::RichText::new(at.format("%H:%M:%S").to_string()).weak());
        }
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            if ui.small_button("Copy").clicked() {
                ui.ctx().copy_text(state.response.clone());
                tracing::debug!(bytes = state.response.len(), "Response copied to clipboard");
            }
        });
    });

    let failed = matches!(state.status, QueryStatus::Failed(_));

    egui::Frame::new()
        .fill(theme::response_bg(dark_mode))
        .inner_margin(egui::Margin::same(theme::RESPONSE_PADDING))
        .corner_radius(theme::RESPONSE_CORNER_RADIUS)
        .show(ui, |ui| {
            egui::ScrollArea::both()
                .auto_shrink([false, true])
                .show(ui, |ui| {
                    let mut text = egui::RichText::new(&state.response).monospace();
                    if failed {
                        text = text.color(theme::ERROR_TEXT);
                    }
                    // Long lines scroll horizontally instead of wrapping.
                    ui.add(egui::Label::new(text).extend());
                });
        });
}

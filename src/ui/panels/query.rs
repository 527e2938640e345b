// ChatbotQuery - ui/panels/query.rs
//
// Query form: heading, free-text field, and the Send Query button.
// Submitting only sets a flag on the state; the app sends the request.

use crate::app::state::AppState;
use crate::ui::theme;
use crate::util::constants;

/// Render the query form.
pub fn render(ui: &mut egui::Ui, state: &mut AppState) {
    ui.heading(constants::APP_NAME);
    ui.add_space(12.0);

    let mut query = state.query.clone();
    let edit = ui.add(
        egui::TextEdit::singleline(&mut query)
            .hint_text(constants::QUERY_FIELD_HINT)
            .desired_width(f32::INFINITY),
    );
    if edit.changed() {
        state.on_query_change(query);
    }

    // Enter in the field submits, same as clicking the button.
    let enter_pressed = edit.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));

    ui.add_space(8.0);
    let clicked = ui
        .add_sized(
            [ui.available_width(), 32.0],
            egui::Button::new(egui::RichText::new("Send Query").strong()),
        )
        .clicked();

    if clicked || enter_pressed {
        state.request_submit();
    }

    if state.is_pending() {
        ui.add_space(6.0);
        ui.horizontal(|ui| {
            ui.spinner();
            let waiting = if state.in_flight == 1 {
                "Waiting for response...".to_string()
            } else {
                format!("Waiting for {} responses...", state.in_flight)
            };
            ui.label(egui::RichText::new(waiting).color(theme::PENDING_TEXT));
        });
    }
}

// ChatbotQuery - gui.rs
//
// Top-level eframe::App implementation.
// Wires together the UI panels and drives the request lifecycle.

use crate::app::query::QueryManager;
use crate::app::state::AppState;
use crate::ui;
use crate::util::constants;
use std::time::Duration;

/// The ChatbotQuery application.
pub struct ChatbotQueryApp {
    pub state: AppState,
    pub query_manager: QueryManager,
    pub dark_mode: bool,
}

impl ChatbotQueryApp {
    /// Create a new application instance with the given state and manager.
    pub fn new(state: AppState, query_manager: QueryManager, dark_mode: bool) -> Self {
        Self {
            state,
            query_manager,
            dark_mode,
        }
    }

    /// Send the current query if a panel asked for it this frame.
    /// Returns true when a request was sent.
    fn handle_submit(&mut self) -> bool {
        if !self.state.take_submit_request() {
            return false;
        }
        let id = self.query_manager.submit(self.state.query.clone());
        self.state.begin_request(id);
        true
    }
}

impl eframe::App for ChatbotQueryApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Apply resolved requests in arrival order.
        let messages = self.query_manager.poll_progress();
        let had_messages = !messages.is_empty();
        for msg in messages {
            self.state.apply_progress(msg);
        }
        if had_messages {
            ctx.request_repaint();
        }

        // Keep polling while anything is in flight so replies show promptly.
        if self.state.is_pending() {
            ctx.request_repaint_after(Duration::from_millis(
                constants::PENDING_REPAINT_INTERVAL_MS,
            ));
        }

        // Top menu bar
        egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                ui.menu_button("View", |ui| {
                    let label = if self.dark_mode {
                        "Light Theme"
                    } else {
                        "Dark Theme"
                    };
                    if ui.button(label).clicked() {
                        self.dark_mode = !self.dark_mode;
                        ctx.set_visuals(if self.dark_mode {
                            egui::Visuals::dark()
                        } else {
                            egui::Visuals::light()
                        });
                        ui.close_menu();
                    }
                });
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.button("\u{24d8}").on_hover_text("About").clicked() {
                        self.state.show_about = true;
                    }
                });
            });
        });

        // Status bar
        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label(&self.state.status_message);
                if !self.state.warnings.is_empty() {
                    ui.separator();
                    ui.label(
                        egui::RichText::new(format!(
                            "\u{26a0} {} startup warning(s)",
                            self.state.warnings.len()
                        ))
                        .color(ui::theme::PENDING_TEXT),
                    )
                    .on_hover_text(self.state.warnings.join("\n"));
                }
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.label(egui::RichText::new(&self.state.endpoint_label).weak());
                });
            });
        });

        // Central panel: query form and response, centred with a max width.
        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical()
                .auto_shrink([false; 2])
                .show(ui, |ui| {
                    ui.add_space(ui::theme::FORM_TOP_MARGIN);
                    let width = ui.available_width().min(ui::theme::FORM_MAX_WIDTH);
                    let side = (ui.available_width() - width) / 2.0;
                    ui.horizontal(|ui| {
                        ui.add_space(side);
                        ui.vertical(|ui| {
                            ui.set_width(width);
                            ui::panels::query::render(ui, &mut self.state);
                            ui::panels::response::render(ui, &self.state, self.dark_mode);
                        });
                    });
                });
        });

        ui::panels::about::render(ctx, &mut self.state);

        // Repaint once more so the spinner appears and polling starts.
        if self.handle_submit() {
            ctx.request_repaint();
        }
    }
}

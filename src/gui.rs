// ProfileLookup - gui.rs
//
// Top-level eframe::App implementation.
// Wires the lookup view to the lookup manager and applies outcomes to state.

use crate::app::lookup::LookupManager;
use crate::app::state::AppState;
use crate::core::model::OutcomeDisposition;
use crate::ui;
use crate::util::constants;

/// The ProfileLookup application.
pub struct ProfileLookupApp {
    pub state: AppState,
    pub lookup_manager: LookupManager,
}

impl ProfileLookupApp {
    /// Create a new application instance with the given state.
    pub fn new(state: AppState, lookup_manager: LookupManager) -> Self {
        Self {
            state,
            lookup_manager,
        }
    }

    /// Write the current result to a user-chosen file.
    fn save_result(&mut self) {
        let Some(dest) = rfd::FileDialog::new()
            .add_filter("JSON", &["json"])
            .set_file_name(constants::DEFAULT_SAVE_FILE_NAME)
            .save_file()
        else {
            return;
        };

        match std::fs::write(&dest, self.state.result_text()) {
            Ok(()) => {
                tracing::info!(path = %dest.display(), "Saved response JSON");
                self.state.status_message = format!("Saved response to {}.", dest.display());
            }
            Err(e) => {
                tracing::warn!(path = %dest.display(), error = %e, "Save failed");
                self.state.status_message = format!("Cannot write '{}': {e}", dest.display());
            }
        }
    }
}

impl eframe::App for ProfileLookupApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Apply outcomes in arrival order; the state decides what is stale.
        for outcome in self.lookup_manager.poll_outcomes() {
            let seq = outcome.seq;
            let disposition = self.state.apply_outcome(outcome);
            if disposition == OutcomeDisposition::Discarded {
                tracing::trace!(seq, "Outcome discarded");
            }
        }

        // Top menu bar
        egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                ui.menu_button("File", |ui| {
                    let has_result = self.state.has_result();
                    if ui
                        .add_enabled(has_result, egui::Button::new("Save JSON\u{2026}"))
                        .clicked()
                    {
                        ui.close_menu();
                        self.save_result();
                    }
                    ui.separator();
                    if ui.button("Exit").clicked() {
                        ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                    }
                });
                ui.menu_button("Help", |ui| {
                    if ui.button("About").clicked() {
                        self.state.show_about = true;
                        ui.close_menu();
                    }
                });
            });
        });

        // Status bar
        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label(&self.state.status_message);
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.label(
                        egui::RichText::new(&self.state.endpoint)
                            .small()
                            .color(crate::ui::theme::HINT_TEXT),
                    );
                    if !self.state.warnings.is_empty() {
                        ui.separator();
                        ui.label(
                            egui::RichText::new(format!(
                                "\u{26a0} {} config warning(s)",
                                self.state.warnings.len()
                            ))
                            .small()
                            .color(crate::ui::theme::WARNING_TEXT),
                        )
                        .on_hover_text(self.state.warnings.join("\n"));
                    }
                });
            });
        });

        // Central panel (lookup view)
        egui::CentralPanel::default().show(ctx, |ui| {
            ui::panels::lookup::render(ui, &mut self.state);
        });

        ui::panels::about::render(ctx, &mut self.state);

        // pending_lookup: the view saw an input change this frame (or the
        // initial username came from the CLI).
        if let Some(username) = self.state.pending_lookup.take() {
            let request = self.lookup_manager.start_lookup(username);
            self.state.note_issued(&request);
        }

        // Workers cannot wake the UI, so keep polling while any are out.
        if self.lookup_manager.in_flight() > 0 {
            ctx.request_repaint_after(std::time::Duration::from_millis(
                constants::LOOKUP_POLL_INTERVAL_MS,
            ));
        }
    }
}

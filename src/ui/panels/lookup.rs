// ProfileLookup - ui/panels/lookup.rs
//
// The profile lookup view: username input, status line, profile summary,
// and the raw JSON result area.
//
// Every edit of the input requests a lookup; there is no debounce and no
// submit button. The result area always shows the last applied payload.

use crate::app::state::AppState;
use crate::core::model::{display_field, LookupStatus, ProfileView};
use crate::ui::theme;

/// Render the lookup view (central panel).
pub fn render(ui: &mut egui::Ui, state: &mut AppState) {
    ui.heading("Profile Lookup");
    ui.add_space(6.0);

    ui.horizontal(|ui| {
        ui.label("Discord username:");
        let response = ui.add(
            egui::TextEdit::singleline(&mut state.username_input)
                .hint_text("e.g. OrangeTacTics#0949")
                .desired_width(theme::INPUT_WIDTH),
        );
        if response.changed() {
            state.request_lookup();
        }
        if matches!(state.status, LookupStatus::Loading { .. }) {
            ui.spinner();
        }
    });

    let status = status_text(state);
    if !status.is_empty() {
        let mut text = egui::RichText::new(status).small();
        if let Some(colour) = theme::status_colour(&state.status) {
            text = text.color(colour);
        }
        ui.label(text);
    }

    ui.add_space(6.0);
    ui.separator();

    if let Some(ref data) = state.profile_data {
        render_summary(ui, &ProfileView::from_data(data));
    }

    ui.horizontal(|ui| {
        ui.strong("Response");
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            if ui
                .add_enabled(state.has_result(), egui::Button::new("Copy JSON"))
                .on_hover_text("Copy the response JSON to the clipboard")
                .clicked()
            {
                ui.ctx().copy_text(state.result_text());
                state.status_message = "Copied response JSON to clipboard.".to_string();
            }
        });
    });

    // Monospace, no wrapping: the indentation is the point.
    egui::ScrollArea::both()
        .id_salt("lookup_result")
        .auto_shrink([false; 2])
        .show(ui, |ui| {
            ui.add(egui::Label::new(egui::RichText::new(state.result_text()).monospace()).extend());
        });
}

/// Profile fields as a small grid above the raw JSON.
fn render_summary(ui: &mut egui::Ui, view: &ProfileView) {
    match view {
        ProfileView::Found(profile) => {
            egui::Grid::new("profile_summary")
                .num_columns(2)
                .spacing(theme::SUMMARY_GRID_SPACING)
                .show(ui, |ui| {
                    ui.label("User ID:");
                    ui.monospace(display_field(&profile.user_id));
                    ui.end_row();

                    ui.label("Discord username:");
                    ui.monospace(display_field(&profile.discord_username));
                    ui.end_row();

                    ui.label("Credit:");
                    ui.monospace(display_field(&profile.credit));
                    ui.end_row();
                });
            ui.add_space(4.0);
            ui.separator();
        }
        ProfileView::NotFound => {
            ui.label(egui::RichText::new("No profile found.").color(theme::HINT_TEXT));
            ui.separator();
        }
        ProfileView::Absent => {}
    }
}

/// One-line description of the latest lookup for the status line.
pub fn status_text(state: &AppState) -> String {
    match &state.status {
        LookupStatus::Idle => String::new(),
        LookupStatus::Loading { .. } => "Looking up\u{2026}".to_string(),
        LookupStatus::Loaded => match &state.applied {
            Some(applied) => format!(
                "Showing '{}' \u{00b7} updated {} ({} ms)",
                applied.username,
                applied.received_at.format("%H:%M:%S"),
                applied.elapsed.as_millis()
            ),
            None => "Loaded.".to_string(),
        },
        LookupStatus::Failed { message } => {
            if state.has_result() {
                format!("{message}. Showing the previous result.")
            } else {
                message.clone()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::model::{LookupOutcome, LookupRequest, ResponseOrdering};
    use crate::util::error::QueryError;
    use serde_json::json;
    use std::time::Duration;

    fn new_state() -> AppState {
        AppState::new(
            "http://test/graphql".to_string(),
            ResponseOrdering::default(),
            false,
        )
    }

    #[test]
    fn idle_status_is_empty() {
        assert_eq!(status_text(&new_state()), "");
    }

    #[test]
    fn loaded_status_names_the_username() {
        let mut s = new_state();
        s.note_issued(&LookupRequest {
            seq: 1,
            username: "alice".to_string(),
        });
        assert_eq!(status_text(&s), "Looking up\u{2026}");
        s.apply_outcome(LookupOutcome {
            seq: 1,
            username: "alice".to_string(),
            result: Ok(json!({"profile": null})),
            elapsed: Duration::from_millis(42),
        });
        let text = status_text(&s);
        assert!(text.starts_with("Showing 'alice'"), "{text}");
        assert!(text.ends_with("(42 ms)"), "{text}");
    }

    #[test]
    fn failure_without_previous_result_shows_only_message() {
        let mut s = new_state();
        s.note_issued(&LookupRequest {
            seq: 1,
            username: "a".to_string(),
        });
        s.apply_outcome(LookupOutcome {
            seq: 1,
            username: "a".to_string(),
            result: Err(QueryError::MissingData {
                url: "u".to_string(),
            }),
            elapsed: Duration::ZERO,
        });
        assert_eq!(status_text(&s), "Response had no data");
    }
}

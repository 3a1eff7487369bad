// ProfileLookup - ui/theme.rs
//
// Colour scheme, status colour mapping, and layout constants.
// No dependencies on app state or business logic.

use crate::core::model::LookupStatus;
use egui::Color32;

/// Colour for the status line text of a given lookup status.
pub fn status_colour(status: &LookupStatus) -> Option<Color32> {
    match status {
        LookupStatus::Failed { .. } => Some(ERROR_TEXT),
        LookupStatus::Loaded => Some(SUCCESS_TEXT),
        LookupStatus::Idle | LookupStatus::Loading { .. } => None,
    }
}

pub const ERROR_TEXT: Color32 = Color32::from_rgb(248, 113, 113); // Red 400
pub const SUCCESS_TEXT: Color32 = Color32::from_rgb(74, 222, 128); // Green 400
pub const HINT_TEXT: Color32 = Color32::from_rgb(156, 163, 175); // Gray 400
pub const WARNING_TEXT: Color32 = Color32::from_rgb(253, 186, 116); // Orange 300

/// Layout constants.
pub const INPUT_WIDTH: f32 = 320.0;
pub const SUMMARY_GRID_SPACING: [f32; 2] = [16.0, 4.0];

/// Apply the configured theme and body font size to the context.
pub fn apply(ctx: &egui::Context, dark_mode: bool, font_size: f32) {
    ctx.set_visuals(if dark_mode {
        egui::Visuals::dark()
    } else {
        egui::Visuals::light()
    });

    ctx.style_mut(|style| {
        for (text_style, font_id) in style.text_styles.iter_mut() {
            font_id.size = match text_style {
                egui::TextStyle::Heading => font_size * 1.4,
                egui::TextStyle::Small => font_size * 0.75,
                _ => font_size,
            };
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failed_status_is_red() {
        let failed = LookupStatus::Failed {
            message: "x".to_string(),
        };
        assert_eq!(status_colour(&failed), Some(ERROR_TEXT));
        assert_eq!(status_colour(&LookupStatus::Loading { seq: 3 }), None);
    }
}

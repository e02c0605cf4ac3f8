use crate::statics;
use eframe::egui;

/// Outcome of a text-input dialog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DialogResult {
    Accepted(String),
    Cancelled,
}

impl DialogResult {
    /// The confirmed text, if it is not blank.
    pub fn accepted_text(&self) -> Option<&str> {
        match self {
            DialogResult::Accepted(text) if !text.trim().is_empty() => Some(text.as_str()),
            _ => None,
        }
    }
}

/// Single-line text prompt shown as a modal over the whole window.
pub struct InputDialog {
    title: String,
    text: String,
    request_focus: bool,
}

impl InputDialog {
    pub fn new(title: &str, initial: &str) -> Self {
        Self {
            title: title.to_string(),
            text: initial.to_string(),
            request_focus: true,
        }
    }

    /// Draws the dialog; `None` while the user has not decided yet.
    /// Escape or a click outside the dialog counts as cancel.
    pub fn show(&mut self, ctx: &egui::Context) -> Option<DialogResult> {
        let mut result = None;

        let modal = egui::Modal::new(egui::Id::new("text_input_dialog")).show(ctx, |ui| {
            ui.set_width(statics::DIALOG_WIDTH);
            ui.heading(&self.title);

            let resp = ui.add(
                egui::TextEdit::singleline(&mut self.text).desired_width(f32::INFINITY),
            );
            if self.request_focus {
                resp.request_focus();
                self.request_focus = false;
            }
            let pressed_enter = resp.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));

            ui.separator();
            ui.horizontal(|ui| {
                if ui.button(statics::EN_BTN_OK).clicked() || pressed_enter {
                    result = Some(DialogResult::Accepted(self.text.clone()));
                }
                if ui.button(statics::EN_BTN_CANCEL).clicked() {
                    result = Some(DialogResult::Cancelled);
                }
            });
        });

        if result.is_none() && modal.should_close() {
            result = Some(DialogResult::Cancelled);
        }
        result
    }
}

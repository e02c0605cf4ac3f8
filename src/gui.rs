use crate::dialog::{DialogResult, InputDialog};
use crate::page::PropertyPage;
use crate::statics;
use crate::store::PropertyDb;
use crate::config::AppConfig;
use anyhow::Context;
use eframe::egui;
use egui_extras::{Column, TableBuilder};
use std::{
    fs,
    path::{Path, PathBuf},
};

/// `config_path` is where theme changes are written back; `None` means the platform default.
pub fn run_gui(config: AppConfig, config_path: Option<PathBuf>) -> anyhow::Result<()> {
    let config_path = config_path.or_else(crate::config::default_config_path);
    let app = PromptPropsApp::new(config, config_path)?;

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([app.config.window_width, app.config.window_height]),
        ..Default::default()
    };
    let title = format!("{} {}", statics::EN_APP_TITLE, env!("CARGO_PKG_VERSION"));
    eframe::run_native(
        &title,
        options,
        Box::new(|cc| {
            cc.egui_ctx.set_visuals(visuals(app.config.dark_theme));
            Ok(Box::new(app))
        }),
    )
    .map_err(|e| anyhow::anyhow!("running GUI: {e}"))
}

fn visuals(dark: bool) -> egui::Visuals {
    if dark {
        egui::Visuals::dark()
    } else {
        egui::Visuals::light()
    }
}

/// What an open input dialog will be applied to once confirmed.
#[derive(Clone, Copy, Debug)]
enum DialogPurpose {
    AddGroup,
    RenameGroup(i64),
    AddAttribute,
}

/// User intents collected while drawing a frame and applied afterwards,
/// so rendering only ever borrows the page immutably.
#[derive(Clone, Debug)]
enum UiAction {
    OpenDialog(DialogPurpose),
    DeleteGroup,
    SelectGroup(usize),
    DeleteAttributes,
    SelectAttribute { row: usize, extend: bool },
    EditName { row: usize, name: String },
    EditValue { row: usize, value: String },
    CopyPrompt,
    ExportPrompt,
    OpenDatabase,
    ToggleTheme,
}

struct PromptPropsApp {
    config: AppConfig,
    config_path: Option<PathBuf>,
    db: PropertyDb,
    page: PropertyPage,
    dialog: Option<(DialogPurpose, InputDialog)>,
    status: String,
    last_error: Option<String>,
}

impl PromptPropsApp {
    fn new(config: AppConfig, config_path: Option<PathBuf>) -> anyhow::Result<Self> {
        let db = PropertyDb::open(&config.database_path, &config.default_group_name)
            .with_context(|| format!("opening {:?}", config.database_path))?;
        let page = PropertyPage::new(&db).context("loading property groups")?;
        let status = format!("Loaded {}", config.database_path.display());
        Ok(Self {
            config,
            config_path,
            db,
            page,
            dialog: None,
            status,
            last_error: None,
        })
    }

    fn report<T, E>(&mut self, result: Result<T, E>) -> Option<T>
    where
        E: std::fmt::Display,
    {
        match result {
            Ok(v) => {
                self.last_error = None;
                Some(v)
            }
            Err(e) => {
                log::error!("{e:#}");
                self.last_error = Some(e.to_string());
                None
            }
        }
    }

    fn open_dialog(&mut self, purpose: DialogPurpose) {
        let dialog = match purpose {
            DialogPurpose::AddGroup => InputDialog::new(statics::EN_DIALOG_ADD, ""),
            DialogPurpose::AddAttribute => InputDialog::new(statics::EN_DIALOG_NAME, ""),
            DialogPurpose::RenameGroup(id) => {
                let current = self
                    .page
                    .group_list()
                    .entries()
                    .iter()
                    .find(|e| e.id == id)
                    .map(|e| e.name.clone())
                    .unwrap_or_default();
                InputDialog::new(statics::EN_DIALOG_RENAME, &current)
            }
        };
        self.dialog = Some((purpose, dialog));
    }

    fn finish_dialog(&mut self, purpose: DialogPurpose, result: DialogResult) {
        let Some(text) = result.accepted_text() else {
            return;
        };
        let outcome = match purpose {
            DialogPurpose::AddGroup => self.page.add_group(&self.db, text),
            DialogPurpose::RenameGroup(id) => self.page.rename_group(&self.db, id, text),
            DialogPurpose::AddAttribute => self.page.add_attribute(&self.db, text).map(|_| ()),
        };
        self.report(outcome);
    }

    fn apply(&mut self, ctx: &egui::Context, action: UiAction) {
        match action {
            UiAction::OpenDialog(purpose) => self.open_dialog(purpose),
            UiAction::DeleteGroup => {
                let outcome = self.page.delete_group(&self.db);
                self.report(outcome);
            }
            UiAction::SelectGroup(row) => {
                let outcome = self.page.select_group(&self.db, row);
                self.report(outcome);
            }
            UiAction::DeleteAttributes => {
                let outcome = self.page.delete_attributes(&self.db);
                self.report(outcome);
            }
            UiAction::SelectAttribute { row, extend } => self.page.select_attribute(row, extend),
            UiAction::EditName { row, name } => {
                let outcome = self.page.set_attribute_name(&self.db, row, &name);
                self.report(outcome);
            }
            UiAction::EditValue { row, value } => {
                let outcome = self.page.set_attribute_value(&self.db, row, &value);
                self.report(outcome);
            }
            UiAction::CopyPrompt => {
                ctx.copy_text(self.page.updated_text().unwrap_or_default().to_string());
                self.status = statics::EN_STATUS_COPIED.to_string();
            }
            UiAction::ExportPrompt => self.export_prompt(),
            UiAction::OpenDatabase => self.open_database(),
            UiAction::ToggleTheme => {
                self.toggle_theme();
                ctx.set_visuals(visuals(self.config.dark_theme));
            }
        }
    }

    /// Only `dark_theme` is written back, so command-line overrides stay out of the file.
    fn toggle_theme(&mut self) {
        self.config.dark_theme = !self.config.dark_theme;
        let Some(path) = self.config_path.clone() else {
            return;
        };
        let dark_theme = self.config.dark_theme;
        let saved = AppConfig::load(Some(path.as_path())).and_then(|mut stored| {
            stored.dark_theme = dark_theme;
            stored.save(&path)
        });
        self.report(saved);
    }

    fn export_prompt(&mut self) {
        let text = self.page.updated_text().unwrap_or_default().to_string();
        let Some(path) = rfd::FileDialog::new()
            .add_filter(statics::EN_FILTER_TEXT, &["txt"])
            .set_file_name(statics::EXPORT_FILE_NAME)
            .save_file()
        else {
            return;
        };
        let outcome = fs::write(&path, text).with_context(|| format!("writing {path:?}"));
        if self.report(outcome).is_some() {
            self.status = format!("Exported {}", path.display());
        }
    }

    fn open_database(&mut self) {
        let mut dialog =
            rfd::FileDialog::new().add_filter(statics::EN_FILTER_DATABASE, statics::DATABASE_EXTENSIONS);
        if let Some(dir) = self.db.path().and_then(Path::parent) {
            dialog = dialog.set_directory(dir);
        }
        let Some(path) = dialog.pick_file() else {
            return;
        };

        let opened = PropertyDb::open(&path, &self.config.default_group_name)
            .and_then(|db| PropertyPage::new(&db).map(|page| (db, page)))
            .with_context(|| format!("opening {path:?}"));
        if let Some((db, page)) = self.report(opened) {
            self.db = db;
            self.page = page;
            self.status = format!("Loaded {}", path.display());
        }
    }

    fn icon_button(ui: &mut egui::Ui, icon: &str, hint: &str) -> bool {
        ui.add(egui::Button::new(icon).frame(false))
            .on_hover_text(hint)
            .clicked()
    }

    fn selectable_row_left(
        ui: &mut egui::Ui,
        selected: bool,
        text: &str,
        row_h: f32,
    ) -> egui::Response {
        let w = ui.available_width();
        let (rect, response) = ui.allocate_exact_size(egui::vec2(w, row_h), egui::Sense::click());
        let response = response.on_hover_cursor(egui::CursorIcon::PointingHand);

        let visuals = ui.style().interact_selectable(&response, selected);
        if ui.is_rect_visible(rect) {
            ui.painter()
                .rect_filled(rect, visuals.corner_radius, visuals.bg_fill);
            ui.painter().rect_stroke(
                rect,
                visuals.corner_radius,
                visuals.bg_stroke,
                egui::StrokeKind::Inside,
            );

            let font_id = egui::TextStyle::Button.resolve(ui.style());
            let text_pos = rect.left_center() + egui::vec2(6.0, 0.0);
            ui.painter().text(
                text_pos,
                egui::Align2::LEFT_CENTER,
                text,
                font_id,
                visuals.text_color(),
            );
        }

        response
    }

    fn render_group_list(&self, ui: &mut egui::Ui, actions: &mut Vec<UiAction>) {
        ui.horizontal(|ui| {
            ui.label(statics::EN_HEADING_PROPERTY_GROUP);
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if Self::icon_button(ui, statics::ICON_DELETE, statics::EN_HINT_DELETE_GROUP) {
                    actions.push(UiAction::DeleteGroup);
                }
                if Self::icon_button(ui, statics::ICON_ADD, statics::EN_HINT_ADD_GROUP) {
                    actions.push(UiAction::OpenDialog(DialogPurpose::AddGroup));
                }
            });
        });
        ui.separator();

        let list = self.page.group_list();
        let row_h = ui.text_style_height(&egui::TextStyle::Body) + 4.0;
        ui.push_id("groups_scroll", |ui| {
            egui::ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    for (row, entry) in list.entries().iter().enumerate() {
                        let selected = list.current_row() == Some(row);
                        let resp = Self::selectable_row_left(ui, selected, &entry.name, row_h)
                            .on_hover_text(statics::EN_HINT_RENAME_GROUP);
                        if resp.double_clicked() {
                            actions.push(UiAction::OpenDialog(DialogPurpose::RenameGroup(
                                entry.id,
                            )));
                        } else if resp.clicked() {
                            actions.push(UiAction::SelectGroup(row));
                        }
                    }
                });
        });
    }

    fn render_attribute_table(&self, ui: &mut egui::Ui, actions: &mut Vec<UiAction>) {
        let Some(panel) = self.page.visible_panel() else {
            ui.label(statics::EN_SELECT_GROUP);
            return;
        };

        ui.horizontal(|ui| {
            ui.label(panel.title());
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if Self::icon_button(ui, statics::ICON_DELETE, statics::EN_HINT_DELETE_ATTRIBUTES)
                {
                    actions.push(UiAction::DeleteAttributes);
                }
                if Self::icon_button(ui, statics::ICON_ADD, statics::EN_HINT_ADD_ATTRIBUTE) {
                    actions.push(UiAction::OpenDialog(DialogPurpose::AddAttribute));
                }
            });
        });
        ui.separator();

        let row_h = ui.text_style_height(&egui::TextStyle::Body) + 8.0;
        let extend = ui.input(|i| i.modifiers.command);

        ui.push_id(("attribute_table", panel.group_id()), |ui| {
            TableBuilder::new(ui)
                .striped(true)
                .cell_layout(egui::Layout::left_to_right(egui::Align::Center))
                .column(Column::auto())
                .column(Column::initial(statics::NAME_COLUMN_WIDTH).resizable(true))
                .column(Column::remainder())
                .header(row_h, |mut header| {
                    header.col(|_ui| {});
                    header.col(|ui| {
                        ui.strong(statics::EN_COL_NAME);
                    });
                    header.col(|ui| {
                        ui.strong(statics::EN_COL_VALUE);
                    });
                })
                .body(|mut body| {
                    for (i, attr) in panel.rows().iter().enumerate() {
                        body.row(row_h, |mut row| {
                            row.col(|ui| {
                                if ui
                                    .selectable_label(panel.is_selected(i), format!("{}", i + 1))
                                    .on_hover_text(statics::EN_HINT_SELECT_ROW)
                                    .clicked()
                                {
                                    actions.push(UiAction::SelectAttribute { row: i, extend });
                                }
                            });
                            row.col(|ui| {
                                let mut name = attr.name.clone();
                                if ui
                                    .add(
                                        egui::TextEdit::singleline(&mut name)
                                            .horizontal_align(egui::Align::Center)
                                            .desired_width(ui.available_width()),
                                    )
                                    .changed()
                                {
                                    actions.push(UiAction::EditName { row: i, name });
                                }
                            });
                            row.col(|ui| {
                                let mut value = attr.value.clone();
                                if ui
                                    .add(
                                        egui::TextEdit::singleline(&mut value)
                                            .horizontal_align(egui::Align::Center)
                                            .desired_width(ui.available_width()),
                                    )
                                    .changed()
                                {
                                    actions.push(UiAction::EditValue { row: i, value });
                                }
                            });
                        });
                    }
                });
        });
    }

    fn render_prompt_preview(&self, ui: &mut egui::Ui, actions: &mut Vec<UiAction>) {
        let text = self.page.updated_text().unwrap_or_default();
        ui.horizontal(|ui| {
            ui.strong(statics::EN_HEADING_PROMPT);
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                let has_text = !text.is_empty();
                if ui
                    .add_enabled(has_text, egui::Button::new(statics::EN_BTN_EXPORT))
                    .clicked()
                {
                    actions.push(UiAction::ExportPrompt);
                }
                if ui
                    .add_enabled(has_text, egui::Button::new(statics::EN_BTN_COPY))
                    .clicked()
                {
                    actions.push(UiAction::CopyPrompt);
                }
            });
        });
        ui.separator();
        egui::ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                if text.is_empty() {
                    ui.weak(statics::EN_PROMPT_EMPTY);
                } else {
                    ui.monospace(text);
                }
            });
    }
}

impl eframe::App for PromptPropsApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let mut actions = Vec::new();

        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            egui::MenuBar::new().ui(ui, |ui| {
                if ui.button(statics::EN_BTN_OPEN_DATABASE).clicked() {
                    actions.push(UiAction::OpenDatabase);
                }
                if ui.button(statics::EN_BTN_TOGGLE_THEME).clicked() {
                    actions.push(UiAction::ToggleTheme);
                }
                if !self.status.is_empty() {
                    ui.separator();
                    ui.label(&self.status);
                }
            });
        });

        if let Some(err) = self.last_error.clone() {
            egui::TopBottomPanel::top("error_bar").show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.colored_label(egui::Color32::RED, err);
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if ui.small_button(statics::EN_BTN_CLEAR).clicked() {
                            self.last_error = None;
                        }
                    });
                });
            });
        }

        // The preview spans the full width, so it is laid out before the side panel.
        egui::TopBottomPanel::bottom("prompt_preview")
            .resizable(true)
            .default_height(statics::PREVIEW_HEIGHT)
            .show(ctx, |ui| {
                self.render_prompt_preview(ui, &mut actions);
            });

        egui::SidePanel::left("group_list_panel")
            .resizable(true)
            .default_width(statics::GROUP_PANEL_WIDTH)
            .min_width(statics::GROUP_PANEL_MIN_WIDTH)
            .show(ctx, |ui| {
                self.render_group_list(ui, &mut actions);
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.set_min_width(statics::TABLE_MIN_WIDTH);
            self.render_attribute_table(ui, &mut actions);
        });

        if let Some((purpose, dialog)) = self.dialog.as_mut()
            && let Some(result) = dialog.show(ctx)
        {
            let purpose = *purpose;
            self.dialog = None;
            self.finish_dialog(purpose, result);
        }

        for action in actions {
            self.apply(ctx, action);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{DialogPurpose, PromptPropsApp, UiAction};
    use crate::config::AppConfig;
    use crate::dialog::DialogResult;
    use eframe::egui;

    fn app(dir: &tempfile::TempDir) -> PromptPropsApp {
        let config = AppConfig {
            database_path: dir.path().join("props.sqlite3"),
            ..AppConfig::default()
        };
        PromptPropsApp::new(config, Some(dir.path().join("config.toml"))).unwrap()
    }

    #[test]
    fn cancelled_dialog_changes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app(&dir);
        app.finish_dialog(DialogPurpose::AddGroup, DialogResult::Cancelled);
        assert_eq!(app.page.group_list().entries().len(), 1);
    }

    #[test]
    fn accepted_dialog_adds_group() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app(&dir);
        app.finish_dialog(
            DialogPurpose::AddGroup,
            DialogResult::Accepted("Email".to_string()),
        );
        assert_eq!(app.page.group_list().entries().len(), 2);
        assert!(app.last_error.is_none());
    }

    #[test]
    fn store_errors_land_in_error_bar() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app(&dir);
        app.apply(&egui::Context::default(), UiAction::DeleteGroup);
        assert!(app.last_error.is_some());
        assert_eq!(app.page.group_list().entries().len(), 1);
    }

    #[test]
    fn value_edit_reaches_preview() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app(&dir);
        app.finish_dialog(
            DialogPurpose::AddAttribute,
            DialogResult::Accepted("Tone".to_string()),
        );
        app.apply(
            &egui::Context::default(),
            UiAction::EditValue {
                row: 0,
                value: "formal".to_string(),
            },
        );
        assert_eq!(app.page.updated_text(), Some("Tone: formal\n"));
    }

    #[test]
    fn theme_toggle_is_written_to_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "default_group_name = \"General\"\n").unwrap();
        let mut app = app(&dir);
        let ctx = egui::Context::default();

        app.apply(&ctx, UiAction::ToggleTheme);
        assert!(app.last_error.is_none());
        assert!(!ctx.style().visuals.dark_mode);

        let stored = AppConfig::load(Some(path.as_path())).unwrap();
        assert!(!stored.dark_theme);
        assert_eq!(stored.default_group_name, "General");
        // The database path comes from the running session, not the file.
        assert_eq!(stored.database_path, AppConfig::default().database_path);

        app.apply(&ctx, UiAction::ToggleTheme);
        assert!(AppConfig::load(Some(path.as_path())).unwrap().dark_theme);
    }
}

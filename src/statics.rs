// Central place for UI strings and other non-localized constants.
// Keep these out of gui.rs to reduce duplication and make tweaks safer.

pub const APP_DIR_NAME: &str = "prompt-props";
pub const CONFIG_FILE_NAME: &str = "config.toml";
pub const DATABASE_FILE_NAME: &str = "prompt_props.sqlite3";
pub const DATABASE_EXTENSIONS: &[&str] = &["sqlite3", "sqlite", "db"];
pub const EXPORT_FILE_NAME: &str = "prompt.txt";

// Layout. The two panes split the default window 300:700.
pub const GROUP_PANEL_WIDTH: f32 = 300.0;
pub const GROUP_PANEL_MIN_WIDTH: f32 = 120.0;
pub const TABLE_MIN_WIDTH: f32 = 240.0;
pub const NAME_COLUMN_WIDTH: f32 = 200.0;
pub const PREVIEW_HEIGHT: f32 = 160.0;
pub const DIALOG_WIDTH: f32 = 280.0;

// Icon glyphs (rendered by egui's bundled emoji font).
pub const ICON_ADD: &str = "➕";
pub const ICON_DELETE: &str = "🗑";

// English UI strings (EN_ prefix to make future localization easier)
pub const EN_APP_TITLE: &str = "Prompt Props";

pub const EN_BTN_OPEN_DATABASE: &str = "Open Database...";
pub const EN_BTN_TOGGLE_THEME: &str = "Theme";
pub const EN_BTN_OK: &str = "OK";
pub const EN_BTN_CANCEL: &str = "Cancel";
pub const EN_BTN_CLEAR: &str = "Clear";
pub const EN_BTN_COPY: &str = "Copy";
pub const EN_BTN_EXPORT: &str = "Export...";

pub const EN_HEADING_PROPERTY_GROUP: &str = "Property Group";
pub const EN_HEADING_PROMPT: &str = "Prompt";

pub const EN_HINT_ADD_GROUP: &str = "Add group";
pub const EN_HINT_DELETE_GROUP: &str = "Delete selected group";
pub const EN_HINT_RENAME_GROUP: &str = "Double-click to rename";
pub const EN_HINT_ADD_ATTRIBUTE: &str = "Add attribute";
pub const EN_HINT_DELETE_ATTRIBUTES: &str = "Delete selected rows";
pub const EN_HINT_SELECT_ROW: &str = "Click to select, Ctrl+click to add to the selection";

pub const EN_DIALOG_ADD: &str = "Add";
pub const EN_DIALOG_NAME: &str = "Name";
pub const EN_DIALOG_RENAME: &str = "Rename";

pub const EN_COL_NAME: &str = "Name";
pub const EN_COL_VALUE: &str = "Value";

pub const EN_SELECT_GROUP: &str = "Select a property group.";
pub const EN_PROMPT_EMPTY: &str = "Edit a value to build the prompt.";

pub const EN_FILTER_DATABASE: &str = "Prompt properties database";
pub const EN_FILTER_TEXT: &str = "Text";

pub const EN_STATUS_COPIED: &str = "Prompt copied to clipboard";

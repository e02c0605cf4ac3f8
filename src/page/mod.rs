//! The property page: group list on the left, the selected group's attribute table on the
//! right. Attribute panels are keyed by group id; the group list's selection decides which
//! one is visible.

mod attribute_table;
mod group_list;

pub use attribute_table::{AttributeRow, AttributeTablePanel};
pub use group_list::{GroupEntry, GroupListEvent, GroupListPanel};

use crate::store::{DEFAULT_GROUP_ID, PropertyDb, Result};
use indexmap::IndexMap;
use log::{debug, info};

pub struct PropertyPage {
    group_list: GroupListPanel,
    panels: IndexMap<i64, AttributeTablePanel>,
    visible: Option<i64>,
    updated: Option<String>,
}

impl PropertyPage {
    pub fn new(db: &PropertyDb) -> Result<Self> {
        let group_list = GroupListPanel::load(db)?;
        let mut page = Self {
            group_list,
            panels: IndexMap::new(),
            visible: None,
            updated: None,
        };
        page.ensure_panel(db, DEFAULT_GROUP_ID)?;
        page.visible = page.group_list.current_id();
        if let Some(id) = page.visible {
            page.ensure_panel(db, id)?;
        }
        Ok(page)
    }

    pub fn group_list(&self) -> &GroupListPanel {
        &self.group_list
    }

    pub fn panel(&self, group_id: i64) -> Option<&AttributeTablePanel> {
        self.panels.get(&group_id)
    }

    pub fn panel_count(&self) -> usize {
        self.panels.len()
    }

    pub fn visible_group(&self) -> Option<i64> {
        self.visible
    }

    pub fn visible_panel(&self) -> Option<&AttributeTablePanel> {
        self.visible.and_then(|id| self.panels.get(&id))
    }

    fn visible_panel_mut(&mut self) -> Option<&mut AttributeTablePanel> {
        self.visible.and_then(|id| self.panels.get_mut(&id))
    }

    /// The prompt text most recently emitted by any attribute panel.
    pub fn updated_text(&self) -> Option<&str> {
        self.updated.as_deref()
    }

    fn ensure_panel(&mut self, db: &PropertyDb, group_id: i64) -> Result<()> {
        if !self.panels.contains_key(&group_id) {
            let panel = AttributeTablePanel::load(db, group_id)?;
            debug!("created attribute panel for group {group_id}");
            self.panels.insert(group_id, panel);
        }
        Ok(())
    }

    fn handle_group_events(&mut self, db: &PropertyDb, events: Vec<GroupListEvent>) -> Result<()> {
        for event in events {
            match event {
                GroupListEvent::Added(id) => {
                    self.ensure_panel(db, id)?;
                }
                GroupListEvent::Deleted(id) => {
                    self.panels.shift_remove(&id);
                    if self.visible == Some(id) {
                        self.visible = None;
                    }
                    info!("discarded attribute panel for group {id}");
                }
                GroupListEvent::CurrentGroupChanged(id) => {
                    self.ensure_panel(db, id)?;
                    self.visible = Some(id);
                    debug!("showing attribute panel for group {id}");
                }
            }
        }
        Ok(())
    }

    fn emit_updated(&mut self, text: Option<String>) {
        if let Some(text) = text {
            debug!("prompt text updated ({} bytes)", text.len());
            self.updated = Some(text);
        }
    }

    /// Routes list events. On failure the list selection is pulled back to the group that
    /// is actually visible.
    fn route(&mut self, db: &PropertyDb, events: Vec<GroupListEvent>) -> Result<()> {
        let routed = self.handle_group_events(db, events);
        if routed.is_err() {
            self.group_list.set_current_id(self.visible);
        }
        routed
    }

    pub fn add_group(&mut self, db: &PropertyDb, name: &str) -> Result<()> {
        let events = self.group_list.add(db, name)?;
        self.route(db, events)
    }

    pub fn delete_group(&mut self, db: &PropertyDb) -> Result<()> {
        let events = self.group_list.delete(db)?;
        self.route(db, events)
    }

    /// The target panel is loaded before the list selection moves.
    pub fn select_group(&mut self, db: &PropertyDb, row: usize) -> Result<()> {
        let Some(id) = self.group_list.entries().get(row).map(|e| e.id) else {
            return Ok(());
        };
        self.ensure_panel(db, id)?;
        let events: Vec<_> = self.group_list.select(row).into_iter().collect();
        self.route(db, events)
    }

    pub fn rename_group(&mut self, db: &PropertyDb, group_id: i64, name: &str) -> Result<()> {
        if self.group_list.rename(db, group_id, name)?
            && let Some(panel) = self.panels.get_mut(&group_id)
        {
            panel.set_title(name.trim());
        }
        Ok(())
    }

    pub fn add_attribute(&mut self, db: &PropertyDb, name: &str) -> Result<Option<usize>> {
        match self.visible_panel_mut() {
            Some(panel) => panel.add(db, name),
            None => Ok(None),
        }
    }

    pub fn delete_attributes(&mut self, db: &PropertyDb) -> Result<()> {
        let text = match self.visible_panel_mut() {
            Some(panel) => panel.delete(db)?,
            None => None,
        };
        self.emit_updated(text);
        Ok(())
    }

    pub fn select_attribute(&mut self, row: usize, extend: bool) {
        if let Some(panel) = self.visible_panel_mut() {
            panel.select_row(row, extend);
        }
    }

    pub fn set_attribute_name(&mut self, db: &PropertyDb, row: usize, name: &str) -> Result<()> {
        match self.visible_panel_mut() {
            Some(panel) => panel.set_name(db, row, name),
            None => Ok(()),
        }
    }

    pub fn set_attribute_value(&mut self, db: &PropertyDb, row: usize, value: &str) -> Result<()> {
        let text = match self.visible_panel_mut() {
            Some(panel) => panel.set_value(db, row, value)?,
            None => None,
        };
        self.emit_updated(text);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::PropertyPage;
    use crate::store::{DEFAULT_GROUP_ID, PropertyDb};

    #[test]
    fn new_page_shows_default_group() {
        let db = PropertyDb::open_in_memory("Default").unwrap();
        let page = PropertyPage::new(&db).unwrap();
        assert_eq!(page.visible_group(), Some(DEFAULT_GROUP_ID));
        assert_eq!(page.panel_count(), 1);
        assert_eq!(page.updated_text(), None);
    }

    #[test]
    fn preexisting_groups_get_panels_on_selection() {
        let db = PropertyDb::open_in_memory("Default").unwrap();
        let id = db.insert_property_group("Email").unwrap();
        db.insert_property_attribute(id, "Tone", "warm").unwrap();

        let mut page = PropertyPage::new(&db).unwrap();
        assert!(page.panel(id).is_none());
        page.select_group(&db, 1).unwrap();
        assert_eq!(page.visible_group(), Some(id));
        assert_eq!(page.visible_panel().unwrap().prompt_text(), "Tone: warm\n");
    }

    #[test]
    fn failed_panel_load_keeps_list_on_visible_group() {
        let db = PropertyDb::open_in_memory("Default").unwrap();
        let id = db.insert_property_group("Email").unwrap();
        let mut page = PropertyPage::new(&db).unwrap();
        db.delete_property_group(id).unwrap();

        assert!(page.select_group(&db, 1).is_err());
        assert_eq!(page.group_list().current_id(), Some(DEFAULT_GROUP_ID));
        assert_eq!(page.visible_group(), Some(DEFAULT_GROUP_ID));
        assert!(page.panel(id).is_none());
    }

    #[test]
    fn failed_handover_after_delete_clears_list_selection() {
        let db = PropertyDb::open_in_memory("Default").unwrap();
        let email = db.insert_property_group("Email").unwrap();
        let gone = db.insert_property_group("Gone").unwrap();
        let mut page = PropertyPage::new(&db).unwrap();
        page.select_group(&db, 1).unwrap();
        db.delete_property_group(gone).unwrap();

        // Deleting "Email" hands the selection to "Gone", whose panel cannot load.
        assert!(page.delete_group(&db).is_err());
        assert_eq!(page.visible_group(), None);
        assert_eq!(page.group_list().current_id(), None);
        assert!(page.panel(email).is_none());
    }

    #[test]
    fn rename_updates_panel_title() {
        let db = PropertyDb::open_in_memory("Default").unwrap();
        let mut page = PropertyPage::new(&db).unwrap();
        page.rename_group(&db, DEFAULT_GROUP_ID, "General").unwrap();
        assert_eq!(page.visible_panel().unwrap().title(), "General");
    }
}

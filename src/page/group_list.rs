use crate::store::{PropertyDb, Result};
use log::debug;

/// A list row: display text paired with the group id it stands for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupEntry {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupListEvent {
    Added(i64),
    Deleted(i64),
    CurrentGroupChanged(i64),
}

/// Ordered list of saved property groups with a single current selection.
/// Mutations are persisted before the list itself changes.
#[derive(Debug, Clone, Default)]
pub struct GroupListPanel {
    entries: Vec<GroupEntry>,
    current: Option<usize>,
}

impl GroupListPanel {
    /// Loads every stored group and selects the first one.
    pub fn load(db: &PropertyDb) -> Result<Self> {
        let entries: Vec<GroupEntry> = db
            .list_property_groups()?
            .into_iter()
            .map(|g| GroupEntry {
                id: g.id,
                name: g.name,
            })
            .collect();
        let current = if entries.is_empty() { None } else { Some(0) };
        Ok(Self { entries, current })
    }

    pub fn entries(&self) -> &[GroupEntry] {
        &self.entries
    }

    pub fn current_row(&self) -> Option<usize> {
        self.current
    }

    pub fn current_id(&self) -> Option<i64> {
        self.current.map(|row| self.entries[row].id)
    }

    pub fn row_of(&self, id: i64) -> Option<usize> {
        self.entries.iter().position(|e| e.id == id)
    }

    /// Moves the selection without raising an event; unknown ids clear it.
    pub fn set_current_id(&mut self, id: Option<i64>) {
        self.current = id.and_then(|id| self.row_of(id));
    }

    /// Selecting the row that is already current is not a change.
    pub fn select(&mut self, row: usize) -> Option<GroupListEvent> {
        let entry = self.entries.get(row)?;
        if self.current == Some(row) {
            return None;
        }
        self.current = Some(row);
        debug!("group list selection -> {} ({:?})", entry.id, entry.name);
        Some(GroupListEvent::CurrentGroupChanged(entry.id))
    }

    /// Blank names are ignored, matching a cancelled input dialog.
    pub fn add(&mut self, db: &PropertyDb, name: &str) -> Result<Vec<GroupListEvent>> {
        let name = name.trim();
        if name.is_empty() {
            return Ok(Vec::new());
        }

        let id = db.insert_property_group(name)?;
        self.entries.push(GroupEntry {
            id,
            name: name.to_string(),
        });
        self.current = Some(self.entries.len() - 1);

        Ok(vec![
            GroupListEvent::Added(id),
            GroupListEvent::CurrentGroupChanged(id),
        ])
    }

    /// Removes the current entry. The selection moves to whichever entry now occupies the
    /// removed row, or the new last row.
    pub fn delete(&mut self, db: &PropertyDb) -> Result<Vec<GroupListEvent>> {
        let Some(row) = self.current else {
            return Ok(Vec::new());
        };
        let id = self.entries[row].id;

        db.delete_property_group(id)?;
        self.entries.remove(row);

        let mut events = vec![GroupListEvent::Deleted(id)];
        if self.entries.is_empty() {
            self.current = None;
        } else {
            let next = row.min(self.entries.len() - 1);
            self.current = Some(next);
            events.push(GroupListEvent::CurrentGroupChanged(self.entries[next].id));
        }
        Ok(events)
    }

    /// Returns false when the name is blank or the id is not listed.
    pub fn rename(&mut self, db: &PropertyDb, id: i64, name: &str) -> Result<bool> {
        let name = name.trim();
        let Some(row) = self.row_of(id) else {
            return Ok(false);
        };
        if name.is_empty() {
            return Ok(false);
        }

        db.rename_property_group(id, name)?;
        self.entries[row].name = name.to_string();
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::{GroupListEvent, GroupListPanel};
    use crate::store::{DEFAULT_GROUP_ID, PropertyDb};

    #[test]
    fn load_selects_first_group() {
        let db = PropertyDb::open_in_memory("Default").unwrap();
        let list = GroupListPanel::load(&db).unwrap();
        assert_eq!(list.current_row(), Some(0));
        assert_eq!(list.current_id(), Some(DEFAULT_GROUP_ID));
    }

    #[test]
    fn reselecting_current_row_is_silent() {
        let db = PropertyDb::open_in_memory("Default").unwrap();
        let mut list = GroupListPanel::load(&db).unwrap();
        assert_eq!(list.select(0), None);
        assert_eq!(list.select(5), None);
    }

    #[test]
    fn blank_name_adds_nothing() {
        let db = PropertyDb::open_in_memory("Default").unwrap();
        let mut list = GroupListPanel::load(&db).unwrap();
        assert!(list.add(&db, "   ").unwrap().is_empty());
        assert_eq!(list.entries().len(), 1);
        assert_eq!(db.list_property_groups().unwrap().len(), 1);
    }

    #[test]
    fn delete_moves_selection_to_neighbour() {
        let db = PropertyDb::open_in_memory("Default").unwrap();
        let mut list = GroupListPanel::load(&db).unwrap();
        list.add(&db, "A").unwrap();
        list.add(&db, "B").unwrap();
        let a = list.entries()[1].id;
        let b = list.entries()[2].id;

        list.select(1);
        let events = list.delete(&db).unwrap();
        assert_eq!(
            events,
            vec![
                GroupListEvent::Deleted(a),
                GroupListEvent::CurrentGroupChanged(b)
            ]
        );
        assert_eq!(list.current_id(), Some(b));

        let events = list.delete(&db).unwrap();
        assert_eq!(
            events,
            vec![
                GroupListEvent::Deleted(b),
                GroupListEvent::CurrentGroupChanged(DEFAULT_GROUP_ID)
            ]
        );
    }

    #[test]
    fn failed_delete_leaves_list_untouched() {
        let db = PropertyDb::open_in_memory("Default").unwrap();
        let mut list = GroupListPanel::load(&db).unwrap();
        assert!(list.delete(&db).is_err());
        assert_eq!(list.entries().len(), 1);
        assert_eq!(list.current_id(), Some(DEFAULT_GROUP_ID));
    }

    #[test]
    fn set_current_id_is_silent_and_clears_on_unknown() {
        let db = PropertyDb::open_in_memory("Default").unwrap();
        let mut list = GroupListPanel::load(&db).unwrap();
        list.add(&db, "A").unwrap();
        list.set_current_id(Some(DEFAULT_GROUP_ID));
        assert_eq!(list.current_row(), Some(0));
        list.set_current_id(Some(77));
        assert_eq!(list.current_row(), None);
    }

    #[test]
    fn rename_updates_entry_text() {
        let db = PropertyDb::open_in_memory("Default").unwrap();
        let mut list = GroupListPanel::load(&db).unwrap();
        assert!(list.rename(&db, DEFAULT_GROUP_ID, " General ").unwrap());
        assert_eq!(list.entries()[0].name, "General");
        assert!(!list.rename(&db, DEFAULT_GROUP_ID, "").unwrap());
        assert!(!list.rename(&db, 42, "x").unwrap());
        assert_eq!(db.get_property_group(DEFAULT_GROUP_ID).unwrap().name, "General");
    }
}

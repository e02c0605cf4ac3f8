use crate::prompt::format_prompt;
use crate::store::{PropertyDb, Result};
use log::debug;
use std::collections::BTreeSet;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeRow {
    pub id: i64,
    pub name: String,
    pub value: String,
}

/// Editable (name, value) table for one property group.
#[derive(Debug, Clone)]
pub struct AttributeTablePanel {
    group_id: i64,
    title: String,
    rows: Vec<AttributeRow>,
    selected: BTreeSet<usize>,
}

impl AttributeTablePanel {
    pub fn load(db: &PropertyDb, group_id: i64) -> Result<Self> {
        let title = db.get_property_group(group_id)?.name;
        let rows = db
            .list_property_attributes(group_id)?
            .into_iter()
            .map(|a| AttributeRow {
                id: a.id,
                name: a.name,
                value: a.value,
            })
            .collect();
        Ok(Self {
            group_id,
            title,
            rows,
            selected: BTreeSet::new(),
        })
    }

    pub fn group_id(&self) -> i64 {
        self.group_id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn set_title(&mut self, title: &str) {
        self.title = title.to_string();
    }

    pub fn rows(&self) -> &[AttributeRow] {
        &self.rows
    }

    pub fn is_selected(&self, row: usize) -> bool {
        self.selected.contains(&row)
    }

    pub fn selected_rows(&self) -> impl Iterator<Item = usize> + '_ {
        self.selected.iter().copied()
    }

    /// Plain click replaces the selection; `extend` toggles the row in or out of it.
    pub fn select_row(&mut self, row: usize, extend: bool) {
        if row >= self.rows.len() {
            return;
        }
        if extend {
            if !self.selected.remove(&row) {
                self.selected.insert(row);
            }
        } else {
            self.selected.clear();
            self.selected.insert(row);
        }
    }

    /// Appends a row with an empty value and returns its index. Blank names are ignored.
    pub fn add(&mut self, db: &PropertyDb, name: &str) -> Result<Option<usize>> {
        let name = name.trim();
        if name.is_empty() {
            return Ok(None);
        }
        let id = db.insert_property_attribute(self.group_id, name, "")?;
        self.rows.push(AttributeRow {
            id,
            name: name.to_string(),
            value: String::new(),
        });
        Ok(Some(self.rows.len() - 1))
    }

    /// Removes every selected row, highest index first.
    /// Returns the rebuilt prompt text when a removed row was contributing to it.
    /// If storage refuses any row, no row is removed and the selection is kept.
    pub fn delete(&mut self, db: &PropertyDb) -> Result<Option<String>> {
        let doomed: Vec<usize> = self
            .selected
            .iter()
            .rev()
            .copied()
            .filter(|&row| row < self.rows.len())
            .collect();
        let ids: Vec<i64> = doomed.iter().map(|&row| self.rows[row].id).collect();
        db.delete_property_attributes(&ids)?;

        let mut prompt_changed = false;
        for row in doomed {
            let removed = self.rows.remove(row);
            debug!("group {}: removed row {row} {:?}", self.group_id, removed.name);
            prompt_changed |= !removed.value.trim().is_empty();
        }
        self.selected.clear();
        Ok(prompt_changed.then(|| self.prompt_text()))
    }

    /// Name edits never rebuild the prompt text.
    pub fn set_name(&mut self, db: &PropertyDb, row: usize, name: &str) -> Result<()> {
        let Some(attr) = self.rows.get_mut(row) else {
            return Ok(());
        };
        if attr.name == name {
            return Ok(());
        }
        db.update_property_attribute_name(attr.id, name)?;
        attr.name = name.to_string();
        Ok(())
    }

    /// Every value edit yields the full rebuilt prompt text.
    pub fn set_value(&mut self, db: &PropertyDb, row: usize, value: &str) -> Result<Option<String>> {
        let Some(attr) = self.rows.get_mut(row) else {
            return Ok(None);
        };
        db.update_property_attribute_value(attr.id, value)?;
        attr.value = value.to_string();
        Ok(Some(self.prompt_text()))
    }

    pub fn prompt_text(&self) -> String {
        format_prompt(
            self.rows
                .iter()
                .map(|r| (r.name.as_str(), r.value.as_str())),
        )
    }
}

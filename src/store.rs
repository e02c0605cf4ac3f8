use log::{debug, info};
use rusqlite::{Connection, OptionalExtension, params};
use std::{
    fs,
    path::{Path, PathBuf},
};

/// Group seeded on first open. Always listed first and never deletable.
pub const DEFAULT_GROUP_ID: i64 = 1;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("property group {0} not found")]
    GroupNotFound(i64),
    #[error("property attribute {0} not found")]
    AttributeNotFound(i64),
    #[error("the default property group cannot be deleted")]
    DefaultGroupProtected,
    #[error("creating database directory {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, StoreError>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyGroup {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyAttribute {
    pub id: i64,
    pub group_id: i64,
    pub name: String,
    pub value: String,
}

/// SQLite-backed storage for property groups and their attributes.
/// Every mutation is committed immediately; there is no transaction spanning UI actions.
pub struct PropertyDb {
    connection: Connection,
    path: Option<PathBuf>,
}

impl PropertyDb {
    pub fn open(path: &Path, default_group_name: &str) -> Result<Self> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(|source| StoreError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        let connection = Connection::open(path)?;
        info!("opened property database {path:?}");
        Self::init(connection, Some(path.to_path_buf()), default_group_name)
    }

    pub fn open_in_memory(default_group_name: &str) -> Result<Self> {
        let connection = Connection::open_in_memory()?;
        Self::init(connection, None, default_group_name)
    }

    fn init(connection: Connection, path: Option<PathBuf>, default_group_name: &str) -> Result<Self> {
        connection.execute_batch("PRAGMA foreign_keys = ON;")?;
        connection.execute_batch(include_str!("../sql/schema.sql"))?;

        let seeded = connection.execute(
            "INSERT OR IGNORE INTO prop_prompt_group (id, name) VALUES (?1, ?2)",
            params![DEFAULT_GROUP_ID, default_group_name],
        )?;
        if seeded > 0 {
            debug!("seeded default property group {default_group_name:?}");
        }

        Ok(Self { connection, path })
    }

    /// `None` for in-memory databases.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn list_property_groups(&self) -> Result<Vec<PropertyGroup>> {
        let mut stmt = self
            .connection
            .prepare("SELECT id, name FROM prop_prompt_group ORDER BY id")?;
        let rows = stmt.query_map([], |row| {
            Ok(PropertyGroup {
                id: row.get(0)?,
                name: row.get(1)?,
            })
        })?;

        let mut groups = Vec::new();
        for group in rows {
            groups.push(group?);
        }
        Ok(groups)
    }

    pub fn insert_property_group(&self, name: &str) -> Result<i64> {
        self.connection.execute(
            "INSERT INTO prop_prompt_group (name) VALUES (?1)",
            params![name],
        )?;
        let id = self.connection.last_insert_rowid();
        info!("inserted property group {id} {name:?}");
        Ok(id)
    }

    /// Deletes the group and, through the foreign key cascade, its attributes.
    pub fn delete_property_group(&self, id: i64) -> Result<()> {
        if id == DEFAULT_GROUP_ID {
            return Err(StoreError::DefaultGroupProtected);
        }
        let n = self
            .connection
            .execute("DELETE FROM prop_prompt_group WHERE id = ?1", params![id])?;
        if n == 0 {
            return Err(StoreError::GroupNotFound(id));
        }
        info!("deleted property group {id}");
        Ok(())
    }

    pub fn get_property_group(&self, id: i64) -> Result<PropertyGroup> {
        self.connection
            .query_row(
                "SELECT id, name FROM prop_prompt_group WHERE id = ?1",
                params![id],
                |row| {
                    Ok(PropertyGroup {
                        id: row.get(0)?,
                        name: row.get(1)?,
                    })
                },
            )
            .optional()?
            .ok_or(StoreError::GroupNotFound(id))
    }

    pub fn rename_property_group(&self, id: i64, name: &str) -> Result<()> {
        let n = self.connection.execute(
            "UPDATE prop_prompt_group SET name = ?1 WHERE id = ?2",
            params![name, id],
        )?;
        if n == 0 {
            return Err(StoreError::GroupNotFound(id));
        }
        info!("renamed property group {id} to {name:?}");
        Ok(())
    }

    /// Attributes in insertion order, which is also table row order.
    pub fn list_property_attributes(&self, group_id: i64) -> Result<Vec<PropertyAttribute>> {
        let mut stmt = self.connection.prepare(
            "SELECT id, group_id, name, value FROM prop_prompt_attribute
             WHERE group_id = ?1
             ORDER BY id",
        )?;
        let rows = stmt.query_map(params![group_id], |row| {
            Ok(PropertyAttribute {
                id: row.get(0)?,
                group_id: row.get(1)?,
                name: row.get(2)?,
                value: row.get(3)?,
            })
        })?;

        let mut attributes = Vec::new();
        for attribute in rows {
            attributes.push(attribute?);
        }
        Ok(attributes)
    }

    pub fn insert_property_attribute(&self, group_id: i64, name: &str, value: &str) -> Result<i64> {
        // Surface a missing group as GroupNotFound rather than a constraint failure.
        self.get_property_group(group_id)?;
        self.connection.execute(
            "INSERT INTO prop_prompt_attribute (group_id, name, value) VALUES (?1, ?2, ?3)",
            params![group_id, name, value],
        )?;
        let id = self.connection.last_insert_rowid();
        debug!("inserted attribute {id} {name:?} into group {group_id}");
        Ok(id)
    }

    pub fn update_property_attribute_name(&self, id: i64, name: &str) -> Result<()> {
        let n = self.connection.execute(
            "UPDATE prop_prompt_attribute SET name = ?1 WHERE id = ?2",
            params![name, id],
        )?;
        if n == 0 {
            return Err(StoreError::AttributeNotFound(id));
        }
        debug!("renamed attribute {id} to {name:?}");
        Ok(())
    }

    pub fn update_property_attribute_value(&self, id: i64, value: &str) -> Result<()> {
        let n = self.connection.execute(
            "UPDATE prop_prompt_attribute SET value = ?1 WHERE id = ?2",
            params![value, id],
        )?;
        if n == 0 {
            return Err(StoreError::AttributeNotFound(id));
        }
        debug!("updated attribute {id} value");
        Ok(())
    }

    pub fn delete_property_attribute(&self, id: i64) -> Result<()> {
        let n = self.connection.execute(
            "DELETE FROM prop_prompt_attribute WHERE id = ?1",
            params![id],
        )?;
        if n == 0 {
            return Err(StoreError::AttributeNotFound(id));
        }
        debug!("deleted attribute {id}");
        Ok(())
    }

    /// Deletes all of `ids` or none of them.
    pub fn delete_property_attributes(&self, ids: &[i64]) -> Result<()> {
        let tx = self.connection.unchecked_transaction()?;
        for &id in ids {
            let n = tx.execute(
                "DELETE FROM prop_prompt_attribute WHERE id = ?1",
                params![id],
            )?;
            if n == 0 {
                return Err(StoreError::AttributeNotFound(id));
            }
        }
        tx.commit()?;
        debug!("deleted attributes {ids:?}");
        Ok(())
    }
}

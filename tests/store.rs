use pretty_assertions::assert_eq;

use prompt_props::page::PropertyPage;
use prompt_props::{DEFAULT_GROUP_ID, PropertyDb, PropertyGroup};

type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;

#[test]
fn groups_and_attributes_survive_reopen() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("nested").join("props.sqlite3");

    let email = {
        let db = PropertyDb::open(&path, "Default")?;
        assert_eq!(db.path(), Some(path.as_path()));
        let mut page = PropertyPage::new(&db)?;
        page.add_group(&db, "Email")?;
        page.add_attribute(&db, "Tone")?;
        page.set_attribute_value(&db, 0, "formal")?;
        page.group_list().current_id().unwrap()
    };

    let db = PropertyDb::open(&path, "Ignored on reopen")?;
    assert_eq!(
        db.list_property_groups()?,
        vec![
            PropertyGroup {
                id: DEFAULT_GROUP_ID,
                name: "Default".to_string(),
            },
            PropertyGroup {
                id: email,
                name: "Email".to_string(),
            },
        ]
    );

    let mut page = PropertyPage::new(&db)?;
    page.select_group(&db, 1)?;
    assert_eq!(page.visible_panel().unwrap().prompt_text(), "Tone: formal\n");
    Ok(())
}

#[test]
fn get_property_group_returns_stored_name() -> Result<()> {
    let db = PropertyDb::open_in_memory("Default")?;
    let id = db.insert_property_group("Report")?;
    assert_eq!(db.get_property_group(id)?.name, "Report");
    db.delete_property_group(id)?;
    assert!(db.get_property_group(id).is_err());
    Ok(())
}

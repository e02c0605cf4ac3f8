use pretty_assertions::assert_eq;

use prompt_props::AppConfig;

type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;

#[test]
fn missing_config_file_gives_defaults() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let config = AppConfig::load(Some(dir.path().join("absent.toml").as_path()))?;
    assert_eq!(config, AppConfig::default());
    Ok(())
}

#[test]
fn saved_config_loads_back() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("config.toml");
    let config = AppConfig {
        database_path: dir.path().join("props.sqlite3"),
        default_group_name: "General".to_string(),
        dark_theme: false,
        ..AppConfig::default()
    };
    config.save(&path)?;
    assert_eq!(AppConfig::load(Some(path.as_path()))?, config);
    Ok(())
}

#[test]
fn malformed_config_is_an_error() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "dark_theme = \"sometimes\"\n")?;
    let err = AppConfig::load(Some(path.as_path())).unwrap_err();
    assert!(format!("{err:#}").contains("parsing"));
    Ok(())
}

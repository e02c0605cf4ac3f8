use crate::statics;
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

/// Settings read from `config.toml`. Every field is optional in the file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    pub database_path: PathBuf,
    pub default_group_name: String,
    pub dark_theme: bool,
    pub window_width: f32,
    pub window_height: f32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database_path: default_database_path(),
            default_group_name: "Default".to_string(),
            dark_theme: true,
            window_width: 1000.0,
            window_height: 700.0,
        }
    }
}

impl AppConfig {
    /// Loads `path`, or the platform config file when `path` is `None`.
    /// A missing file yields the defaults.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let path = match path {
            Some(p) => p.to_path_buf(),
            None => match default_config_path() {
                Some(p) => p,
                None => return Ok(Self::default()),
            },
        };

        if !path.exists() {
            log::debug!("no config at {path:?}, using defaults");
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&path).with_context(|| format!("reading {path:?}"))?;
        let config: Self = toml::from_str(&content).with_context(|| format!("parsing {path:?}"))?;
        log::info!("loaded config from {path:?}");
        Ok(config)
    }

    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| format!("creating {parent:?}"))?;
        }
        let content = toml::to_string_pretty(self).context("serializing config")?;
        fs::write(path, content).with_context(|| format!("writing {path:?}"))?;
        Ok(())
    }
}

pub(crate) fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join(statics::APP_DIR_NAME).join(statics::CONFIG_FILE_NAME))
}

/// Falls back to the working directory when the platform has no data directory.
pub(crate) fn default_database_path() -> PathBuf {
    dirs::data_dir()
        .map(|d| d.join(statics::APP_DIR_NAME))
        .unwrap_or_default()
        .join(statics::DATABASE_FILE_NAME)
}

#[cfg(test)]
mod tests {
    use super::AppConfig;
    use crate::statics;

    #[test]
    fn partial_file_keeps_other_defaults() {
        let config: AppConfig = toml::from_str("dark_theme = false\n").unwrap();
        assert!(!config.dark_theme);
        assert_eq!(config.default_group_name, "Default");
    }

    #[test]
    fn default_database_lives_under_app_dir() {
        let path = super::default_database_path();
        if dirs::data_dir().is_none() {
            assert_eq!(path, std::path::Path::new(statics::DATABASE_FILE_NAME));
            return;
        }
        assert!(path.ends_with(
            std::path::Path::new(statics::APP_DIR_NAME).join(statics::DATABASE_FILE_NAME)
        ));
    }

    #[test]
    fn unknown_fields_are_rejected() {
        assert!(toml::from_str::<AppConfig>("colour = \"blue\"\n").is_err());
    }
}

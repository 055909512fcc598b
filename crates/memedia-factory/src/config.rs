use std::path::{Path, PathBuf};

use directories::ProjectDirs;

use crate::error::FactoryError;
use crate::support::SupportTables;

/// File name of the user support tables inside the config directory.
const USER_TABLES_FILE: &str = "support.toml";

/// Locates and loads the effective support tables.
pub struct FactoryConfig;

impl FactoryConfig {
    /// Path to the user tables file (XDG on Linux, AppData on Windows).
    pub fn config_path() -> PathBuf {
        Self::project_dirs()
            .map(|d| d.config_dir().join(USER_TABLES_FILE))
            .unwrap_or_else(|| PathBuf::from(USER_TABLES_FILE))
    }

    /// Embedded tables merged with the user file at [`Self::config_path`], if it exists.
    pub fn load() -> Result<SupportTables, FactoryError> {
        Self::load_from(&Self::config_path())
    }

    /// Embedded tables merged with the tables file at `path`, if it exists.
    pub fn load_from(path: &Path) -> Result<SupportTables, FactoryError> {
        let mut tables = SupportTables::embedded();
        if path.exists() {
            let user = SupportTables::load_user(path)?;
            tables.merge_user(&user);
        } else {
            tracing::debug!(path = %path.display(), "no user support tables, using embedded");
        }
        Ok(tables)
    }

    fn project_dirs() -> Option<ProjectDirs> {
        ProjectDirs::from("", "", "memedia")
    }
}

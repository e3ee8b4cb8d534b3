use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::{
    core::utils::{app_data_dir, config_file_in, ensure_dir, sheet_file_in, write_atomic},
    domain::DEFAULT_MONTHLY_BUDGET,
    errors::LedgerError,
};

/// User preferences for a tracker installation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Budget used when the settings cell holds nothing usable.
    #[serde(default = "Config::default_budget_value")]
    pub default_budget: u64,
    /// Name of the settings sheet holding the budget cell.
    #[serde(default = "Config::default_settings_sheet")]
    pub settings_sheet: String,
    #[serde(default = "Config::default_budget_cell")]
    pub budget_cell: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    /// Optional custom sheet file. Defaults to `<data dir>/sheet.json`.
    pub sheet_path: Option<PathBuf>,
    #[serde(default = "Config::default_ui_color_enabled")]
    pub ui_color_enabled: bool,
    #[serde(default = "Config::default_recent_rows")]
    pub recent_rows: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_budget: Self::default_budget_value(),
            settings_sheet: Self::default_settings_sheet(),
            budget_cell: Self::default_budget_cell(),
            sheet_path: None,
            ui_color_enabled: Self::default_ui_color_enabled(),
            recent_rows: Self::default_recent_rows(),
        }
    }
}

impl Config {
    pub fn default_budget_value() -> u64 {
        DEFAULT_MONTHLY_BUDGET
    }

    pub fn default_settings_sheet() -> String {
        "Settings".into()
    }

    pub fn default_budget_cell() -> String {
        "B1".into()
    }

    pub fn default_ui_color_enabled() -> bool {
        true
    }

    pub fn default_recent_rows() -> usize {
        10
    }

    pub fn resolve_sheet_path(&self, base: &Path) -> PathBuf {
        self.sheet_path
            .clone()
            .unwrap_or_else(|| sheet_file_in(base))
    }
}

/// Loads and saves [`Config`] under the application data directory.
#[derive(Debug, Clone)]
pub struct ConfigManager {
    base: PathBuf,
    path: PathBuf,
}

impl ConfigManager {
    pub fn new() -> Result<Self, LedgerError> {
        Self::with_base_dir(app_data_dir())
    }

    pub fn with_base_dir(base: PathBuf) -> Result<Self, LedgerError> {
        ensure_dir(&base).map_err(config_error)?;
        Ok(Self {
            path: config_file_in(&base),
            base,
        })
    }

    pub fn base_dir(&self) -> &Path {
        &self.base
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the config file, or defaults when it does not exist yet.
    pub fn load(&self) -> Result<Config, LedgerError> {
        if self.path.exists() {
            let data = fs::read_to_string(&self.path).map_err(config_error)?;
            serde_json::from_str(&data).map_err(config_error)
        } else {
            Ok(Config::default())
        }
    }

    pub fn save(&self, config: &Config) -> Result<(), LedgerError> {
        let json = serde_json::to_string_pretty(config).map_err(config_error)?;
        write_atomic(&self.path, &json).map_err(config_error)?;
        tracing::debug!(path = %self.path.display(), "config saved");
        Ok(())
    }

    pub fn sheet_path(&self, config: &Config) -> PathBuf {
        config.resolve_sheet_path(&self.base)
    }
}

fn config_error(err: impl std::fmt::Display) -> LedgerError {
    LedgerError::Config(err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_file_yields_defaults() {
        let temp = TempDir::new().unwrap();
        let manager = ConfigManager::with_base_dir(temp.path().to_path_buf()).unwrap();
        let config = manager.load().unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.default_budget, 300_000);
        assert_eq!(manager.sheet_path(&config), temp.path().join("sheet.json"));
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let temp = TempDir::new().unwrap();
        let manager = ConfigManager::with_base_dir(temp.path().to_path_buf()).unwrap();
        fs::write(
            manager.path(),
            r#"{"default_budget":120000,"settings_sheet":"Budget"}"#,
        )
        .unwrap();
        let config = manager.load().unwrap();
        assert_eq!(config.default_budget, 120_000);
        assert_eq!(config.settings_sheet, "Budget");
        assert_eq!(config.budget_cell, "B1");
        assert_eq!(config.recent_rows, 10);
    }

    #[test]
    fn save_round_trips() {
        let temp = TempDir::new().unwrap();
        let manager = ConfigManager::with_base_dir(temp.path().to_path_buf()).unwrap();
        let mut config = Config::default();
        config.budget_cell = "C2".into();
        config.sheet_path = Some(temp.path().join("custom.json"));
        manager.save(&config).unwrap();
        assert_eq!(manager.load().unwrap(), config);
    }

    #[test]
    fn corrupt_file_is_a_config_error() {
        let temp = TempDir::new().unwrap();
        let manager = ConfigManager::with_base_dir(temp.path().to_path_buf()).unwrap();
        fs::write(manager.path(), "not json").unwrap();
        assert!(matches!(manager.load(), Err(LedgerError::Config(_))));
    }
}

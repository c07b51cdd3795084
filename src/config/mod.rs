use serde::{Deserialize, Serialize};
use std::{
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
    time::Duration,
};

use crate::errors::{ConsoleError, ConsoleResult};
use crate::wizard::StepGate;

const CONFIG_DIR: &str = "rewards_console";
const CONFIG_FILE: &str = "config.json";
const TMP_SUFFIX: &str = "tmp";

/// Operator-facing settings for the console core.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConsoleConfig {
    /// Name recorded as `created_by` / `requested_by` for operator actions.
    pub operator_name: String,
    pub request_id_prefix: String,
    pub min_password_length: usize,
    pub avatar_max_bytes: usize,
    pub upload_delay_ms: u64,
    pub step_gate: StepGate,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            operator_name: "Admin User".into(),
            request_id_prefix: "REQ".into(),
            min_password_length: 8,
            avatar_max_bytes: 2 * 1024 * 1024,
            upload_delay_ms: 300,
            step_gate: StepGate::Open,
        }
    }
}

impl ConsoleConfig {
    pub fn upload_delay(&self) -> Duration {
        Duration::from_millis(self.upload_delay_ms)
    }

    fn validate(&self) -> ConsoleResult<()> {
        if self.request_id_prefix.trim().is_empty() {
            return Err(ConsoleError::Config(
                "request_id_prefix cannot be empty".into(),
            ));
        }
        if self.min_password_length == 0 {
            return Err(ConsoleError::Config(
                "min_password_length must be at least 1".into(),
            ));
        }
        Ok(())
    }
}

/// Loads and stores [`ConsoleConfig`] as JSON.
pub struct ConfigManager {
    path: PathBuf,
}

impl ConfigManager {
    /// Uses the platform configuration directory.
    pub fn new() -> ConsoleResult<Self> {
        let base = dirs::config_dir()
            .ok_or_else(|| ConsoleError::Config("no configuration directory available".into()))?;
        Ok(Self::with_base_dir(base))
    }

    pub fn with_base_dir(base: impl Into<PathBuf>) -> Self {
        Self {
            path: base.into().join(CONFIG_DIR).join(CONFIG_FILE),
        }
    }

    /// Returns the stored configuration, or defaults when no file exists yet.
    pub fn load(&self) -> ConsoleResult<ConsoleConfig> {
        if !self.path.exists() {
            tracing::debug!(path = %self.path.display(), "no config file, using defaults");
            return Ok(ConsoleConfig::default());
        }
        let data = fs::read_to_string(&self.path)?;
        let config: ConsoleConfig = serde_json::from_str(&data)?;
        config.validate()?;
        Ok(config)
    }

    pub fn save(&self, config: &ConsoleConfig) -> ConsoleResult<()> {
        config.validate()?;
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(config)?;
        let tmp = tmp_path(&self.path);
        write_atomic(&tmp, &json)?;
        fs::rename(&tmp, &self.path)?;
        tracing::info!(path = %self.path.display(), "configuration saved");
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

fn write_atomic(path: &Path, data: &str) -> ConsoleResult<()> {
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_file_yields_defaults() {
        let temp = TempDir::new().unwrap();
        let manager = ConfigManager::with_base_dir(temp.path());
        let config = manager.load().unwrap();
        assert_eq!(config, ConsoleConfig::default());
        assert_eq!(config.min_password_length, 8);
    }

    #[test]
    fn save_then_load_keeps_overrides() {
        let temp = TempDir::new().unwrap();
        let manager = ConfigManager::with_base_dir(temp.path());
        let config = ConsoleConfig {
            operator_name: "Dana".into(),
            step_gate: StepGate::RequiredFields,
            ..ConsoleConfig::default()
        };
        manager.save(&config).unwrap();
        assert!(manager.path().exists());
        assert_eq!(manager.load().unwrap(), config);
    }

    #[test]
    fn partial_file_fills_defaults() {
        let temp = TempDir::new().unwrap();
        let manager = ConfigManager::with_base_dir(temp.path());
        fs::create_dir_all(manager.path().parent().unwrap()).unwrap();
        fs::write(manager.path(), r#"{"upload_delay_ms": 5}"#).unwrap();
        let config = manager.load().unwrap();
        assert_eq!(config.upload_delay(), Duration::from_millis(5));
        assert_eq!(config.request_id_prefix, "REQ");
    }

    #[test]
    fn empty_prefix_is_rejected() {
        let config = ConsoleConfig {
            request_id_prefix: " ".into(),
            ..ConsoleConfig::default()
        };
        let temp = TempDir::new().unwrap();
        let manager = ConfigManager::with_base_dir(temp.path());
        assert!(matches!(manager.save(&config), Err(ConsoleError::Config(_))));
    }
}

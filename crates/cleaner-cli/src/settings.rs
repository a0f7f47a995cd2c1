//! Layered settings

use std::path::Path;

use config::{Config, Environment, File};
use data_validator::ValidationConfig;
use serde::{Deserialize, Serialize};
use series_repair::{RepairConfig, MAX_SCALE};
use thiserror::Error;

/// Settings file looked up in the working directory when none is given
pub const DEFAULT_CONFIG_NAME: &str = "record-cleaner";

/// Environment variable prefix, e.g. `RECORD_CLEANER_VALIDATION__MAX_AGE=40`
pub const ENV_PREFIX: &str = "RECORD_CLEANER";

/// Errors while assembling settings
#[derive(Debug, Error)]
pub enum SettingsError {
    /// A source could not be read or deserialized
    #[error("Invalid settings: {0}")]
    Config(#[from] config::ConfigError),

    /// Values parsed but break an invariant
    #[error("Invalid settings: {0}")]
    Invalid(String),
}

/// All tunables for the command line
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Record validation rules
    pub validation: ValidationConfig,
    /// Series repair parameters
    pub repair: RepairConfig,
}

impl Settings {
    /// Defaults, then a TOML file, then `RECORD_CLEANER_*` variables
    ///
    /// An explicit `path` must exist; the default file is optional.
    pub fn load(path: Option<&Path>) -> Result<Self, SettingsError> {
        let file = match path {
            Some(path) => File::from(path).required(true),
            None => File::with_name(DEFAULT_CONFIG_NAME).required(false),
        };

        let settings: Settings = Config::builder()
            .add_source(file)
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()?;

        settings.check()?;
        Ok(settings)
    }

    fn check(&self) -> Result<(), SettingsError> {
        if self.validation.min_age > self.validation.max_age {
            return Err(SettingsError::Invalid(format!(
                "validation.min_age {} exceeds validation.max_age {}",
                self.validation.min_age, self.validation.max_age
            )));
        }
        if self.repair.scale > MAX_SCALE {
            return Err(SettingsError::Invalid(format!(
                "repair.scale {} exceeds the maximum of {}",
                self.repair.scale, MAX_SCALE
            )));
        }
        let multiple = self.repair.outlier_multiple;
        if multiple.is_nan() || multiple <= 0.0 {
            return Err(SettingsError::Invalid(format!(
                "repair.outlier_multiple must be positive, got {}",
                multiple
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use series_repair::StdDevKind;
    use std::path::PathBuf;
    use std::sync::{Mutex, MutexGuard};

    // Environment variables are process-wide; every load holds this lock
    static ENV_LOCK: Mutex<()> = Mutex::new(());

    fn env_lock() -> MutexGuard<'static, ()> {
        ENV_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write_settings(name: &str, contents: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!(
            "record-cleaner-{}-{}.toml",
            name,
            std::process::id()
        ));
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_file_overrides_defaults() {
        let path = write_settings(
            "override",
            "[validation]\nmax_age = 40\n\n[repair]\nscale = 3\nstd_dev = \"sample\"\n",
        );
        let settings = {
            let _guard = env_lock();
            Settings::load(Some(&path)).unwrap()
        };
        std::fs::remove_file(&path).ok();

        assert_eq!(settings.validation.min_age, 20);
        assert_eq!(settings.validation.max_age, 40);
        assert_eq!(settings.repair.scale, 3);
        assert_eq!(settings.repair.std_dev, StdDevKind::Sample);
        assert_eq!(settings.repair.outlier_multiple, 3.0);
    }

    #[test]
    fn test_missing_explicit_file_fails() {
        let path = std::env::temp_dir().join("record-cleaner-does-not-exist.toml");
        let _guard = env_lock();
        assert!(Settings::load(Some(&path)).is_err());
    }

    #[test]
    fn test_inverted_age_range_rejected() {
        let path = write_settings("inverted", "[validation]\nmin_age = 50\nmax_age = 30\n");
        let err = {
            let _guard = env_lock();
            Settings::load(Some(&path)).unwrap_err()
        };
        std::fs::remove_file(&path).ok();

        assert!(matches!(err, SettingsError::Invalid(_)));
    }

    #[test]
    fn test_scale_above_maximum_rejected() {
        let path = write_settings("scale", "[repair]\nscale = 400\n");
        let err = {
            let _guard = env_lock();
            Settings::load(Some(&path)).unwrap_err()
        };
        std::fs::remove_file(&path).ok();

        assert!(err.to_string().contains("repair.scale 400"));
    }

    #[test]
    fn test_environment_overrides() {
        let settings = {
            let _guard = env_lock();
            std::env::set_var("RECORD_CLEANER_VALIDATION__MAX_AGE", "40");
            std::env::set_var("RECORD_CLEANER_REPAIR__STD_DEV", "sample");
            let result = Settings::load(None);
            std::env::remove_var("RECORD_CLEANER_VALIDATION__MAX_AGE");
            std::env::remove_var("RECORD_CLEANER_REPAIR__STD_DEV");
            result.unwrap()
        };

        assert_eq!(settings.validation.max_age, 40);
        assert_eq!(settings.validation.min_age, 20);
        assert_eq!(settings.repair.std_dev, StdDevKind::Sample);
        assert_eq!(settings.repair.scale, 2);
    }

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.validation, ValidationConfig::default());
        assert_eq!(settings.repair.scale, 2);
        assert_eq!(settings.repair.default_fill, 0.0);
        assert!(settings.check().is_ok());
    }
}

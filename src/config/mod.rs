//! Configuration management module.
//!
//! This module handles loading and saving the application configuration,
//! which holds the log level and the seed collection of employees a session
//! starts from.

mod error;

pub use error::ConfigError;

use crate::employee::Employee;
use crate::error::AppError;
use crate::state::SessionState;
use log::LevelFilter;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    io::Write,
    path::{Path, PathBuf},
    str::FromStr,
};

const FILE_NAME: &str = "config.yml";
const DEFAULT_DIRECTORY_PATH: &str = ".config/edit-session";

/// Oversees management of configuration file.
///
#[derive(Clone, Debug)]
pub struct Config {
    pub log_level: String,
    pub employees: Vec<Employee>,
    file_path: Option<PathBuf>,
}

/// Define specification for configuration file.
///
#[derive(Serialize, Deserialize)]
struct FileSpec {
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default)]
    pub employees: Vec<Employee>,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Config::new()
    }
}

impl Config {
    /// Return a new empty instance.
    ///
    pub fn new() -> Config {
        Config {
            file_path: None,
            log_level: default_log_level(),
            employees: vec![],
        }
    }

    /// Try to load an existing configuration from the disk using the custom
    /// directory if provided. A missing file leaves the defaults in place.
    ///
    pub fn load(&mut self, custom_path: Option<&str>) -> Result<(), AppError> {
        let dir_path = match custom_path {
            Some(path) => Path::new(&path).to_path_buf(),
            None => Config::default_path()?,
        };

        if !dir_path.exists() {
            fs::create_dir_all(&dir_path).map_err(|e| ConfigError::CreateDirectoryFailed {
                path: dir_path.clone(),
                source: e,
            })?;
        }

        self.file_path = Some(dir_path.join(Path::new(FILE_NAME)));
        let file_path = self.file_path.as_ref().ok_or(ConfigError::FilePathNotSet)?;

        if file_path.exists() {
            let contents = fs::read_to_string(file_path).map_err(|e| ConfigError::ReadFailed {
                path: file_path.clone(),
                source: e,
            })?;
            let data: FileSpec =
                serde_yaml::from_str(&contents).map_err(|e| ConfigError::Malformed {
                    path: file_path.clone(),
                    source: e,
                })?;
            self.log_level = data.log_level;
            self.employees = data.employees;
        }

        Ok(())
    }

    /// Save the current configuration to disk.
    ///
    pub fn save(&self) -> Result<(), AppError> {
        let file_path = self.file_path.as_ref().ok_or(ConfigError::FilePathNotSet)?;
        let data = FileSpec {
            log_level: self.log_level.clone(),
            employees: self.employees.clone(),
        };
        let content = serde_yaml::to_string(&data).map_err(ConfigError::Encode)?;

        if let Some(parent) = file_path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent).map_err(|e| ConfigError::CreateDirectoryFailed {
                    path: parent.to_path_buf(),
                    source: e,
                })?;
            }
        }

        let mut file = fs::File::create(file_path).map_err(|e| ConfigError::WriteFailed {
            path: file_path.clone(),
            source: e,
        })?;
        write!(file, "{}", content).map_err(|e| ConfigError::WriteFailed {
            path: file_path.clone(),
            source: e,
        })?;
        file.flush().map_err(|e| ConfigError::WriteFailed {
            path: file_path.clone(),
            source: e,
        })?;
        Ok(())
    }

    /// Returns the path of the configuration file once loaded.
    ///
    pub fn file_path(&self) -> Option<&Path> {
        self.file_path.as_deref()
    }

    /// Returns the configured log level.
    ///
    pub fn level_filter(&self) -> Result<LevelFilter, ConfigError> {
        LevelFilter::from_str(&self.log_level)
            .map_err(|_| ConfigError::InvalidLogLevel(self.log_level.clone()))
    }

    /// Returns a viewing session seeded with the configured employees.
    ///
    pub fn initial_state(&self) -> Result<SessionState, AppError> {
        Ok(SessionState::seeded(self.employees.clone())?)
    }

    /// Returns the path buffer for the default configuration directory or an
    /// error if the home directory could not be found.
    ///
    fn default_path() -> Result<PathBuf, AppError> {
        match dirs::home_dir() {
            Some(home) => Ok(home.join(Path::new(DEFAULT_DIRECTORY_PATH))),
            None => Err(ConfigError::HomeDirectoryNotFound.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::StateError;
    use fake::{Fake, Faker};
    use uuid::Uuid;

    fn temp_dir() -> PathBuf {
        std::env::temp_dir().join(format!("edit-session-{}", Uuid::new_v4()))
    }

    #[test]
    fn new_has_defaults() {
        let config = Config::new();
        assert_eq!(config.log_level, "info");
        assert!(config.employees.is_empty());
        assert!(config.file_path().is_none());
    }

    #[test]
    fn load_missing_file_keeps_defaults() {
        let dir = temp_dir();
        let mut config = Config::new();
        config.load(dir.to_str()).unwrap();
        assert!(dir.exists());
        assert_eq!(config.file_path(), Some(dir.join(FILE_NAME).as_path()));
        assert!(config.employees.is_empty());
        fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn save_then_load() {
        let dir = temp_dir();
        let mut config = Config::new();
        config.load(dir.to_str()).unwrap();
        config.log_level = "debug".to_string();
        config.employees = vec![
            Employee {
                id: 1,
                ..Faker.fake()
            },
            Employee {
                id: 2,
                ..Faker.fake()
            },
        ];
        config.save().unwrap();

        let mut loaded = Config::new();
        loaded.load(dir.to_str()).unwrap();
        assert_eq!(loaded.log_level, "debug");
        assert_eq!(loaded.employees, config.employees);
        fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn load_partial_file() {
        let dir = temp_dir();
        fs::create_dir_all(&dir).unwrap();
        fs::write(
            dir.join(FILE_NAME),
            "employees:\n  - id: 1\n    name: Alice\n  - id: 2\n    name: Bob\n",
        )
        .unwrap();
        let mut config = Config::new();
        config.load(dir.to_str()).unwrap();
        assert_eq!(config.log_level, "info");
        assert_eq!(config.employees.len(), 2);
        assert_eq!(config.employees[1].name, "Bob");
        fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn load_invalid_file() {
        let dir = temp_dir();
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join(FILE_NAME), "employees: [not, a, record").unwrap();
        let mut config = Config::new();
        let result = config.load(dir.to_str());
        assert!(matches!(
            result,
            Err(AppError::Config(ConfigError::Malformed { .. }))
        ));
        fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn save_without_path() {
        let result = Config::new().save();
        assert!(matches!(
            result,
            Err(AppError::Config(ConfigError::FilePathNotSet))
        ));
    }

    #[test]
    fn level_filter() {
        let mut config = Config::new();
        assert_eq!(config.level_filter().unwrap(), LevelFilter::Info);
        config.log_level = "TRACE".to_string();
        assert_eq!(config.level_filter().unwrap(), LevelFilter::Trace);
        config.log_level = "loud".to_string();
        assert!(matches!(
            config.level_filter(),
            Err(ConfigError::InvalidLogLevel(_))
        ));
    }

    #[test]
    fn initial_state_rejects_gapped_numbering() {
        let mut config = Config::new();
        config.employees = vec![
            Employee {
                id: 1,
                ..Faker.fake()
            },
            Employee {
                id: 4,
                ..Faker.fake()
            },
        ];
        assert!(matches!(
            config.initial_state(),
            Err(AppError::State(StateError::IdentifierOutOfRange { id: 4, len: 2 }))
        ));
    }

    #[test]
    fn initial_state_rejects_duplicates() {
        let mut config = Config::new();
        config.employees = vec![
            Employee {
                id: 5,
                ..Faker.fake()
            },
            Employee {
                id: 5,
                ..Faker.fake()
            },
        ];
        assert!(matches!(config.initial_state(), Err(AppError::State(_))));
    }
}

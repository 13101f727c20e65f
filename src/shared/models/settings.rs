use std::{env, fs, io};

use serde::Deserialize;
use thiserror::Error;

const SETTINGS_FILENAME: &str = "settings.json";
const SETTINGS_PATH_VAR: &str = "TASK_MANAGER_SETTINGS";

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub tcp_socket_binding: String,
    pub tcp_socket_port: u16,
    pub database_path: String,
    pub jwt_secret: String,
    pub jwt_expiration_in_minutes: u32,
}

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("cannot read settings file {path}: {source}")]
    Read { path: String, source: io::Error },
    #[error("cannot parse JSON content from settings file {path}: {source}")]
    Parse {
        path: String,
        source: serde_json::Error,
    },
}

impl Settings {
    /// Loads `settings.json` from the working directory, or the file named by
    /// `TASK_MANAGER_SETTINGS` when that variable is set.
    pub fn load() -> Result<Settings, SettingsError> {
        let path = env::var(SETTINGS_PATH_VAR).unwrap_or_else(|_| SETTINGS_FILENAME.to_string());
        Settings::load_from(&path)
    }

    pub fn load_from(path: &str) -> Result<Settings, SettingsError> {
        let content = fs::read_to_string(path).map_err(|source| SettingsError::Read {
            path: path.to_string(),
            source,
        })?;
        serde_json::from_str(&content).map_err(|source| SettingsError::Parse {
            path: path.to_string(),
            source,
        })
    }

    pub fn socket_address(&self) -> String {
        format!("{}:{}", self.tcp_socket_binding, self.tcp_socket_port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_settings(name: &str, content: &str) -> String {
        let path = format!("/tmp/task_manager_settings_{name}_{}.json", std::process::id());
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn loads_from_explicit_path() {
        let path = temp_settings(
            "ok",
            r#"{
                "tcp_socket_binding": "127.0.0.1",
                "tcp_socket_port": 8080,
                "database_path": "test.redb",
                "jwt_secret": "s3cret",
                "jwt_expiration_in_minutes": 60
            }"#,
        );

        let settings = Settings::load_from(&path).unwrap();
        assert_eq!(settings.socket_address(), "127.0.0.1:8080");
        assert_eq!(settings.jwt_expiration_in_minutes, 60);

        let _ = fs::remove_file(path);
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let result = Settings::load_from("/tmp/task_manager_settings_does_not_exist.json");
        assert!(matches!(result, Err(SettingsError::Read { .. })));
    }

    #[test]
    fn malformed_file_is_a_parse_error() {
        let path = temp_settings("bad", r#"{ "tcp_socket_port": "not a port" }"#);

        let result = Settings::load_from(&path);
        assert!(matches!(result, Err(SettingsError::Parse { .. })));

        let _ = fs::remove_file(path);
    }
}

//! INI settings file adapter.

use crate::ports::config_port::ConfigPort;
use configparser::ini::Ini;
use std::path::Path;

/// Settings loaded from an INI file. An adapter built with
/// [`FileConfigAdapter::empty`] answers every lookup with its default.
pub struct FileConfigAdapter {
    config: Ini,
}

impl FileConfigAdapter {
    pub fn from_file<P: AsRef<Path>>(path: P) -> std::io::Result<Self> {
        let mut config = Ini::new();
        config.load(path).map_err(std::io::Error::other)?;
        Ok(Self { config })
    }

    pub fn from_string(content: &str) -> Result<Self, String> {
        let mut config = Ini::new();
        config.read(content.to_string())?;
        Ok(Self { config })
    }

    pub fn empty() -> Self {
        Self { config: Ini::new() }
    }
}

impl ConfigPort for FileConfigAdapter {
    fn get_string(&self, section: &str, key: &str) -> Option<String> {
        self.config
            .get(section, key)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    }

    fn get_int(&self, section: &str, key: &str, default: i64) -> i64 {
        self.config
            .getint(section, key)
            .ok()
            .flatten()
            .unwrap_or(default)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_temp_config(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{}", content).unwrap();
        file
    }

    #[test]
    fn from_string_parses_config() {
        let content = r#"
[server]
listen = 0.0.0.0:8080

[portfolio]
path = holdings/main.yaml

[provider]
timeout_secs = 20
"#;
        let adapter = FileConfigAdapter::from_string(content).unwrap();
        assert_eq!(
            adapter.get_string("server", "listen"),
            Some("0.0.0.0:8080".to_string())
        );
        assert_eq!(
            adapter.get_string("portfolio", "path"),
            Some("holdings/main.yaml".to_string())
        );
        assert_eq!(adapter.get_int("provider", "timeout_secs", 0), 20);
    }

    #[test]
    fn get_string_returns_none_for_missing_key() {
        let adapter = FileConfigAdapter::from_string("[server]\nlisten = 127.0.0.1:1\n").unwrap();
        assert_eq!(adapter.get_string("server", "missing"), None);
        assert_eq!(adapter.get_string("missing_section", "key"), None);
    }

    #[test]
    fn blank_values_count_as_missing() {
        let adapter = FileConfigAdapter::from_string("[portfolio]\npath =\n").unwrap();
        assert_eq!(adapter.get_string("portfolio", "path"), None);
    }

    #[test]
    fn get_int_returns_default_for_missing() {
        let adapter = FileConfigAdapter::from_string("[provider]\n").unwrap();
        assert_eq!(adapter.get_int("provider", "timeout_secs", 42), 42);
    }

    #[test]
    fn get_int_returns_default_for_non_numeric() {
        let adapter =
            FileConfigAdapter::from_string("[provider]\ntimeout_secs = soon\n").unwrap();
        assert_eq!(adapter.get_int("provider", "timeout_secs", 42), 42);
    }

    #[test]
    fn get_int_keeps_negative_values() {
        let adapter = FileConfigAdapter::from_string("[provider]\ntimeout_secs = -5\n").unwrap();
        assert_eq!(adapter.get_int("provider", "timeout_secs", 0), -5);
    }

    #[test]
    fn empty_adapter_has_no_values() {
        let adapter = FileConfigAdapter::empty();
        assert_eq!(adapter.get_string("server", "listen"), None);
        assert_eq!(adapter.get_int("provider", "timeout_secs", 7), 7);
    }

    #[test]
    fn from_file_reads_config() {
        let file = create_temp_config("[portfolio]\npath = /srv/portfolio.yaml\n");
        let adapter = FileConfigAdapter::from_file(file.path()).unwrap();
        assert_eq!(
            adapter.get_string("portfolio", "path"),
            Some("/srv/portfolio.yaml".to_string())
        );
    }

    #[test]
    fn from_file_returns_error_for_missing_file() {
        let result = FileConfigAdapter::from_file("/nonexistent/path/tickerboard.ini");
        assert!(result.is_err());
    }
}

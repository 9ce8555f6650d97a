//! INI file configuration adapter.
//!
//! Keys are addressed as `section.key`. A key without a dot lives in the
//! `default` section, which is also where INI entries before the first
//! section header end up. Section and key names are case-sensitive.

use crate::domain::error::KeyconfError;
use crate::domain::value::ConfigValue;
use crate::ports::config_source::ConfigSource;
use configparser::ini::Ini;
use std::path::Path;
use tracing::debug;

const DEFAULT_SECTION: &str = "default";

pub struct FileConfigAdapter {
    config: Ini,
}

impl FileConfigAdapter {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, KeyconfError> {
        let path = path.as_ref();
        let mut config = Ini::new_cs();
        config
            .load(path)
            .map_err(|reason| KeyconfError::ConfigParse {
                file: path.display().to_string(),
                reason,
            })?;
        let adapter = Self { config };
        debug!(file = %path.display(), keys = adapter.keys().len(), "loaded ini config");
        Ok(adapter)
    }

    pub fn from_string(content: &str) -> Result<Self, KeyconfError> {
        let mut config = Ini::new_cs();
        config
            .read(content.to_string())
            .map_err(|reason| KeyconfError::ConfigParse {
                file: "<string>".to_string(),
                reason,
            })?;
        Ok(Self { config })
    }

    /// Every key that currently has a value, sorted.
    pub fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self
            .config
            .get_map_ref()
            .iter()
            .flat_map(|(section, entries)| {
                entries
                    .iter()
                    .filter(|(_, value)| value.is_some())
                    .map(move |(key, _)| {
                        if section == DEFAULT_SECTION {
                            key.clone()
                        } else {
                            format!("{section}.{key}")
                        }
                    })
            })
            .collect();
        keys.sort();
        keys
    }

    fn lookup(&self, section: &str, key: &str) -> Option<String> {
        self.config.get(section, key)
    }
}

impl ConfigSource for FileConfigAdapter {
    /// Section names may themselves contain dots, so every split point is
    /// tried from the left until one names an existing entry.
    fn get(&self, key: &str) -> Option<ConfigValue> {
        key.match_indices('.')
            .find_map(|(at, _)| self.lookup(&key[..at], &key[at + 1..]))
            .or_else(|| self.lookup(DEFAULT_SECTION, key))
            .map(ConfigValue::Text)
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

    fn text(s: &str) -> Option<ConfigValue> {
        Some(ConfigValue::from(s))
    }

    #[test]
    fn from_string_parses_config() {
        let content = r#"
[database]
conninfo = host=localhost dbname=test

[server]
port = 8080
ratio = 0.5
"#;
        let adapter = FileConfigAdapter::from_string(content).unwrap();
        assert_eq!(
            adapter.get("database.conninfo"),
            text("host=localhost dbname=test")
        );
        assert_eq!(adapter.get("server.port"), text("8080"));
        assert_eq!(adapter.get("server.ratio"), text("0.5"));
    }

    #[test]
    fn missing_key_is_absent() {
        let adapter = FileConfigAdapter::from_string("[server]\nport = 1\n").unwrap();
        assert_eq!(adapter.get("server.missing"), None);
        assert_eq!(adapter.get("missing_section.key"), None);
        assert_eq!(adapter.get("port"), None);
    }

    #[test]
    fn undotted_keys_use_default_section() {
        let adapter =
            FileConfigAdapter::from_string("name = top\n[server]\nport = 1\n").unwrap();
        assert_eq!(adapter.get("name"), text("top"));
        assert_eq!(adapter.get("default.name"), text("top"));
    }

    #[test]
    fn dotted_section_names_resolve() {
        let adapter =
            FileConfigAdapter::from_string("[app.http]\nport = 80\n[app]\nname = x\n").unwrap();
        assert_eq!(adapter.get("app.http.port"), text("80"));
        assert_eq!(adapter.get("app.name"), text("x"));
    }

    #[test]
    fn names_are_case_sensitive() {
        let adapter = FileConfigAdapter::from_string("[Server]\nPort = 1\n").unwrap();
        assert_eq!(adapter.get("Server.Port"), text("1"));
        assert_eq!(adapter.get("server.port"), None);
    }

    #[test]
    fn bare_key_without_value_is_absent() {
        let adapter = FileConfigAdapter::from_string("[flags]\nverbose\n").unwrap();
        assert_eq!(adapter.get("flags.verbose"), None);
        assert!(adapter.keys().is_empty());
    }

    #[test]
    fn keys_are_sorted_and_qualified() {
        let adapter =
            FileConfigAdapter::from_string("top = 1\n[b]\ny = 2\nx = 3\n[a]\nz = 4\n").unwrap();
        assert_eq!(adapter.keys(), vec!["a.z", "b.x", "b.y", "top"]);
    }

    #[test]
    fn from_file_reads_config() {
        let content = "[report]\ntemplate_path = /path/to/template.typ\n";
        let file = create_temp_config(content);
        let adapter = FileConfigAdapter::from_file(file.path()).unwrap();
        assert_eq!(
            adapter.get("report.template_path"),
            text("/path/to/template.typ")
        );
    }

    #[test]
    fn from_file_returns_error_for_missing_file() {
        let result = FileConfigAdapter::from_file("/nonexistent/path/config.ini");
        match result {
            Err(KeyconfError::ConfigParse { file, .. }) => {
                assert_eq!(file, "/nonexistent/path/config.ini")
            }
            _ => panic!("expected ConfigParse error"),
        }
    }
}

//! Persistent preferences backed by SQLite.
//!
//! A single `config` table of key/value pairs. Only the keys in [`ConfigKey`]
//! are accepted, and culture/tone values are validated before they are
//! written.

use anyhow::{Context, Result, anyhow};
use rusqlite::Connection;
use std::fmt;
use std::str::FromStr;
use std::sync::Mutex;

use crate::consts::DEFAULT_ENDPOINT;
use crate::options::{Culture, Tone, parse_tone_choice};

/// The preference keys parley understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigKey {
    Endpoint,
    Culture,
    Tone,
}

impl ConfigKey {
    pub const ALL: &'static [ConfigKey] = &[ConfigKey::Endpoint, ConfigKey::Culture, ConfigKey::Tone];

    pub fn as_str(self) -> &'static str {
        match self {
            ConfigKey::Endpoint => "endpoint",
            ConfigKey::Culture => "culture",
            ConfigKey::Tone => "tone",
        }
    }

    /// Check a value and return it in the form it should be stored.
    fn canonicalize(self, value: &str) -> Result<String> {
        match self {
            ConfigKey::Endpoint => {
                reqwest::Url::parse(value)
                    .with_context(|| format!("invalid endpoint URL '{value}'"))?;
                Ok(value.to_string())
            }
            ConfigKey::Culture => Ok(value.parse::<Culture>()?.label().to_string()),
            ConfigKey::Tone => Ok(parse_tone_choice(value)?
                .map(|t| t.label().to_string())
                .unwrap_or_default()),
        }
    }
}

impl fmt::Display for ConfigKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ConfigKey {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        ConfigKey::ALL
            .iter()
            .copied()
            .find(|k| k.as_str() == s.trim())
            .ok_or_else(|| anyhow!("unknown config key '{s}' (expected endpoint, culture or tone)"))
    }
}

/// Persistent key-value configuration store.
pub struct Config {
    conn: Mutex<Connection>,
}

impl Config {
    /// Open or create the config table in the given database.
    /// Use `":memory:"` for tests.
    pub fn open(path: &str) -> Result<Self> {
        let conn = Connection::open(path).context("failed to open config database")?;
        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS config (
                key   TEXT PRIMARY KEY,
                value TEXT NOT NULL
            )",
        )
        .context("failed to create config table")?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn conn(&self) -> Result<std::sync::MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|_| anyhow!("config database lock poisoned"))
    }

    /// Get a config value by key.
    pub fn get(&self, key: ConfigKey) -> Result<Option<String>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare("SELECT value FROM config WHERE key = ?1")?;
        let mut rows = stmt.query([key.as_str()])?;
        match rows.next()? {
            Some(row) => Ok(Some(row.get(0)?)),
            None => Ok(None),
        }
    }

    /// Validate and set a config value (upsert). Returns the stored form.
    pub fn set(&self, key: ConfigKey, value: &str) -> Result<String> {
        let value = key.canonicalize(value)?;
        let conn = self.conn()?;
        conn.execute(
            "INSERT INTO config (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
            [key.as_str(), value.as_str()],
        )?;
        tracing::debug!(key = %key, value = %value, "config updated");
        Ok(value)
    }

    /// Remove a config key.
    pub fn remove(&self, key: ConfigKey) -> Result<()> {
        let conn = self.conn()?;
        conn.execute("DELETE FROM config WHERE key = ?1", [key.as_str()])?;
        Ok(())
    }

    /// Every stored pair, sorted by key.
    pub fn entries(&self) -> Result<Vec<(String, String)>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare("SELECT key, value FROM config ORDER BY key")?;
        let rows = stmt.query_map([], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
        })?;
        let mut entries = Vec::new();
        for row in rows {
            entries.push(row?);
        }
        Ok(entries)
    }
}

/// Flag values from the command line. `None` means "not given".
#[derive(Debug, Default, Clone)]
pub struct Overrides {
    pub endpoint: Option<String>,
    pub culture: Option<Culture>,
    /// `Some(None)` is an explicit "no tone".
    pub tone: Option<Option<Tone>>,
}

/// The effective settings for a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub endpoint: String,
    pub culture: Culture,
    pub tone: Option<Tone>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            culture: Culture::default(),
            tone: None,
        }
    }
}

impl Settings {
    /// Flags win over stored config, which wins over built-in defaults.
    pub fn resolve(overrides: Overrides, config: Option<&Config>) -> Result<Self> {
        let defaults = Settings::default();
        let stored = |key: ConfigKey| -> Result<Option<String>> {
            match config {
                Some(config) => config.get(key),
                None => Ok(None),
            }
        };

        let endpoint = match overrides.endpoint {
            Some(endpoint) => endpoint,
            None => stored(ConfigKey::Endpoint)?.unwrap_or(defaults.endpoint),
        };

        let culture = match overrides.culture {
            Some(culture) => culture,
            None => match stored(ConfigKey::Culture)? {
                Some(value) => value
                    .parse::<Culture>()
                    .with_context(|| "stored culture is no longer valid")?,
                None => defaults.culture,
            },
        };

        let tone = match overrides.tone {
            Some(tone) => tone,
            None => match stored(ConfigKey::Tone)? {
                Some(value) => {
                    parse_tone_choice(&value).with_context(|| "stored tone is no longer valid")?
                }
                None => defaults.tone,
            },
        };

        Ok(Self {
            endpoint,
            culture,
            tone,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mem_config() -> Config {
        Config::open(":memory:").unwrap()
    }

    #[test]
    fn get_returns_none_for_missing_key() {
        let config = mem_config();
        assert!(config.get(ConfigKey::Endpoint).unwrap().is_none());
    }

    #[test]
    fn set_and_get() {
        let config = mem_config();
        config
            .set(ConfigKey::Endpoint, "http://rewriter.internal:9000/rewrite")
            .unwrap();
        assert_eq!(
            config.get(ConfigKey::Endpoint).unwrap().unwrap(),
            "http://rewriter.internal:9000/rewrite"
        );
    }

    #[test]
    fn set_overwrites_existing() {
        let config = mem_config();
        config.set(ConfigKey::Culture, "France").unwrap();
        config.set(ConfigKey::Culture, "India").unwrap();
        assert_eq!(config.get(ConfigKey::Culture).unwrap().unwrap(), "India");
    }

    #[test]
    fn set_canonicalizes_labels() {
        let config = mem_config();
        assert_eq!(config.set(ConfigKey::Culture, "us").unwrap(), "U.S.");
        assert_eq!(config.set(ConfigKey::Tone, "respect").unwrap(), "Respect");
        assert_eq!(config.set(ConfigKey::Tone, "none").unwrap(), "");
    }

    #[test]
    fn set_rejects_invalid_values() {
        let config = mem_config();
        assert!(config.set(ConfigKey::Culture, "Atlantis").is_err());
        assert!(config.set(ConfigKey::Tone, "shouty").is_err());
        assert!(config.set(ConfigKey::Endpoint, "localhost rewrite").is_err());
        assert!(config.entries().unwrap().is_empty());
    }

    #[test]
    fn remove_deletes_key() {
        let config = mem_config();
        config.set(ConfigKey::Tone, "Urgency").unwrap();
        config.remove(ConfigKey::Tone).unwrap();
        assert!(config.get(ConfigKey::Tone).unwrap().is_none());
    }

    #[test]
    fn remove_nonexistent_is_ok() {
        let config = mem_config();
        config.remove(ConfigKey::Endpoint).unwrap();
    }

    #[test]
    fn entries_sorted_by_key() {
        let config = mem_config();
        config.set(ConfigKey::Tone, "Clarity").unwrap();
        config.set(ConfigKey::Culture, "Germany").unwrap();
        let entries = config.entries().unwrap();
        assert_eq!(
            entries,
            vec![
                ("culture".to_string(), "Germany".to_string()),
                ("tone".to_string(), "Clarity".to_string()),
            ]
        );
    }

    #[test]
    fn key_parsing() {
        assert_eq!("endpoint".parse::<ConfigKey>().unwrap(), ConfigKey::Endpoint);
        assert_eq!(" tone ".parse::<ConfigKey>().unwrap(), ConfigKey::Tone);
        assert!("model".parse::<ConfigKey>().is_err());
    }

    #[test]
    fn persists_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config-test.db");
        let path_str = path.to_str().unwrap();

        {
            let config = Config::open(path_str).unwrap();
            config.set(ConfigKey::Culture, "Japan").unwrap();
        }

        {
            let config = Config::open(path_str).unwrap();
            assert_eq!(config.get(ConfigKey::Culture).unwrap().unwrap(), "Japan");
        }
    }

    #[test]
    fn resolve_defaults_without_config() {
        let settings = Settings::resolve(Overrides::default(), None).unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.endpoint, "http://localhost:8000/rewrite");
    }

    #[test]
    fn resolve_prefers_stored_over_default() {
        let config = mem_config();
        config.set(ConfigKey::Culture, "Germany").unwrap();
        config.set(ConfigKey::Tone, "Formality").unwrap();
        let settings = Settings::resolve(Overrides::default(), Some(&config)).unwrap();
        assert_eq!(settings.culture, Culture::Germany);
        assert_eq!(settings.tone, Some(Tone::Formality));
    }

    #[test]
    fn resolve_prefers_flags_over_stored() {
        let config = mem_config();
        config.set(ConfigKey::Culture, "Germany").unwrap();
        config.set(ConfigKey::Tone, "Formality").unwrap();
        config
            .set(ConfigKey::Endpoint, "http://stored:1/rewrite")
            .unwrap();
        let overrides = Overrides {
            endpoint: Some("http://flag:2/rewrite".to_string()),
            culture: Some(Culture::France),
            tone: Some(None),
        };
        let settings = Settings::resolve(overrides, Some(&config)).unwrap();
        assert_eq!(settings.endpoint, "http://flag:2/rewrite");
        assert_eq!(settings.culture, Culture::France);
        assert_eq!(settings.tone, None);
    }

    #[test]
    fn resolve_stored_empty_tone_means_none() {
        let config = mem_config();
        config.set(ConfigKey::Tone, "-- None --").unwrap();
        let settings = Settings::resolve(Overrides::default(), Some(&config)).unwrap();
        assert_eq!(settings.tone, None);
    }
}

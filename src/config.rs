use crate::error::ConfigError;
use std::env;

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub word_pairs_path: String,
    pub static_files_path: String,
}

impl Config {
    /// Reads `.env` if there is one, then the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let port = match lookup("PORT") {
            Some(value) => value
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidPort { name: "PORT", value })?,
            None => 3000,
        };

        Ok(Self {
            host: lookup("HOST").unwrap_or_else(|| "127.0.0.1".to_string()),
            port,
            word_pairs_path: lookup("WORD_PAIRS_PATH")
                .unwrap_or_else(|| "data/word_pairs.json".to_string()),
            static_files_path: lookup("STATIC_FILES_PATH").unwrap_or_else(|| "static".to_string()),
        })
    }

    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn defaults_when_nothing_is_set() {
        let config = Config::from_lookup(lookup(&[])).unwrap();

        assert_eq!(config.address(), "127.0.0.1:3000");
        assert_eq!(config.word_pairs_path, "data/word_pairs.json");
        assert_eq!(config.static_files_path, "static");
    }

    #[test]
    fn reads_overrides() {
        let config = Config::from_lookup(lookup(&[
            ("HOST", "0.0.0.0"),
            ("PORT", "8080"),
            ("WORD_PAIRS_PATH", "/srv/pairs.json"),
        ]))
        .unwrap();

        assert_eq!(config.address(), "0.0.0.0:8080");
        assert_eq!(config.word_pairs_path, "/srv/pairs.json");
    }

    #[test]
    fn rejects_bad_port() {
        let err = Config::from_lookup(lookup(&[("PORT", "eighty")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidPort { .. }));
    }
}

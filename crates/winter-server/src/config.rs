use std::net::SocketAddr;
use std::path::Path;

use serde::Deserialize;

/// Default config file, read from the working directory.
pub const CONFIG_FILE: &str = "winter.toml";

/// Top-level server configuration, loaded from `winter.toml`.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub listen_addr: String,
    pub web_root: String,
    pub site: SiteConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_addr: "0.0.0.0:5001".to_string(),
            web_root: "web".to_string(),
            site: SiteConfig::default(),
        }
    }
}

/// Text and asset paths baked into the rendered page.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    pub title: String,
    pub author: String,
    /// URL of the wasm-bindgen JS glue for the client.
    pub client_script: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "Henry S. Winter Project".to_string(),
            author: "Henry S.".to_string(),
            client_script: "/pkg/winter_client.js".to_string(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("listen_addr {0:?} is not a valid socket address")]
    ListenAddr(String),
    #[error("{0} must not be empty")]
    Empty(&'static str),
}

impl ServerConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.listen_addr.parse::<SocketAddr>().is_err() {
            return Err(ConfigError::ListenAddr(self.listen_addr.clone()));
        }
        if self.web_root.trim().is_empty() {
            return Err(ConfigError::Empty("web_root"));
        }
        if self.site.title.trim().is_empty() {
            return Err(ConfigError::Empty("site.title"));
        }
        if self.site.client_script.trim().is_empty() {
            return Err(ConfigError::Empty("site.client_script"));
        }
        Ok(())
    }

    /// Load `winter.toml` if it exists, then apply env var overrides.
    pub fn load() -> Self {
        Self::load_from(Path::new(CONFIG_FILE))
    }

    /// Load the given file (falling back to defaults), then apply env var
    /// overrides.
    pub fn load_from(path: &Path) -> Self {
        let mut config = match std::fs::read_to_string(path) {
            Ok(content) => match toml::from_str::<ServerConfig>(&content) {
                Ok(cfg) => {
                    tracing::info!(path = %path.display(), "Loaded configuration");
                    cfg
                },
                Err(e) => {
                    tracing::warn!(path = %path.display(), "Failed to parse config: {e}, using defaults");
                    ServerConfig::default()
                },
            },
            Err(_) => {
                tracing::info!(path = %path.display(), "No config file found, using defaults");
                ServerConfig::default()
            },
        };
        config.apply_overrides(|key| std::env::var(key).ok());
        config
    }

    /// Apply `WINTER_*` overrides. Empty values are ignored.
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let var = |key: &str| lookup(key).filter(|v| !v.is_empty());
        if let Some(addr) = var("WINTER_LISTEN_ADDR") {
            self.listen_addr = addr;
        }
        if let Some(root) = var("WINTER_WEB_ROOT") {
            self.web_root = root;
        }
        if let Some(title) = var("WINTER_SITE_TITLE") {
            self.site.title = title;
        }
        if let Some(author) = var("WINTER_SITE_AUTHOR") {
            self.site.author = author;
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    #[test]
    fn default_config_values() {
        let cfg = ServerConfig::default();
        assert_eq!(cfg.listen_addr, "0.0.0.0:5001");
        assert_eq!(cfg.web_root, "web");
        assert_eq!(cfg.site.title, "Henry S. Winter Project");
        assert_eq!(cfg.site.author, "Henry S.");
        assert_eq!(cfg.site.client_script, "/pkg/winter_client.js");
    }

    #[test]
    fn parse_partial_toml() {
        let toml_str = r#"
listen_addr = "127.0.0.1:9090"

[site]
title = "Arcade"
"#;
        let cfg: ServerConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(cfg.listen_addr, "127.0.0.1:9090");
        assert_eq!(cfg.web_root, "web");
        assert_eq!(cfg.site.title, "Arcade");
        assert_eq!(cfg.site.author, "Henry S.");
    }

    #[test]
    fn validate_accepts_defaults() {
        assert!(ServerConfig::default().validate().is_ok());
    }

    #[test]
    fn validate_rejects_invalid_addr() {
        let cfg = ServerConfig {
            listen_addr: "not-an-address".to_string(),
            ..ServerConfig::default()
        };
        assert!(matches!(cfg.validate(), Err(ConfigError::ListenAddr(_))));
    }

    #[test]
    fn validate_rejects_blank_title() {
        let mut cfg = ServerConfig::default();
        cfg.site.title = "  ".to_string();
        assert!(matches!(cfg.validate(), Err(ConfigError::Empty("site.title"))));
    }

    #[test]
    fn overrides_replace_non_empty_values() {
        let vars = HashMap::from([
            ("WINTER_LISTEN_ADDR", "127.0.0.1:7000"),
            ("WINTER_WEB_ROOT", ""),
            ("WINTER_SITE_AUTHOR", "H. Winter"),
        ]);
        let mut cfg = ServerConfig::default();
        cfg.apply_overrides(|key| vars.get(key).map(|v| v.to_string()));
        assert_eq!(cfg.listen_addr, "127.0.0.1:7000");
        assert_eq!(cfg.web_root, "web");
        assert_eq!(cfg.site.author, "H. Winter");
        assert_eq!(cfg.site.title, "Henry S. Winter Project");
    }

    #[test]
    fn load_from_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("winter.toml");
        std::fs::write(&path, "web_root = \"public\"\n").unwrap();
        let cfg = ServerConfig::load_from(&path);
        // WINTER_WEB_ROOT may be set in the environment running the tests.
        if std::env::var("WINTER_WEB_ROOT").unwrap_or_default().is_empty() {
            assert_eq!(cfg.web_root, "public");
        }
    }

    #[test]
    fn load_from_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = ServerConfig::load_from(&dir.path().join("absent.toml"));
        assert_eq!(cfg.site.client_script, "/pkg/winter_client.js");
    }
}

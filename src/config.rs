//! Configuration loading for the courier CLI.
//!
//! Configuration is loaded from TOML files with the following resolution order:
//! 1. `--config <path>` (CLI flag, must exist)
//! 2. `~/.courier/config.toml` (user)
//! 3. `/etc/courier/config.toml` (system)
//! 4. built-in defaults
//!
//! Secrets are loaded separately with mandatory permission checks:
//! 1. `~/.courier/secrets.toml` (user, must be 0600)
//! 2. `/etc/courier/secrets.toml` (system, must be 0600)
//!
//! and fall back to `OPENAI_API_KEY` / `TMDB_API_KEY`.

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::assistant::{self, AssistantConfig};
use crate::cache::DEFAULT_TTL;
use crate::gateway::CourierBuilder;
use crate::{CourierError, Result};

/// CLI configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub opendota: CachedApiConfig,
    #[serde(default)]
    pub tmdb: CachedApiConfig,
    #[serde(default)]
    pub openai: OpenAiConfig,
    #[serde(default)]
    pub http: HttpConfig,
}

/// An upstream whose responses are cached.
#[derive(Debug, Clone, Deserialize)]
pub struct CachedApiConfig {
    /// Override the public base URL.
    #[serde(default)]
    pub base_url: Option<String>,
    /// Cache TTL in seconds (default: 300).
    #[serde(default = "default_cache_ttl")]
    pub cache_ttl_secs: u64,
}

impl Default for CachedApiConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            cache_ttl_secs: default_cache_ttl(),
        }
    }
}

fn default_cache_ttl() -> u64 {
    DEFAULT_TTL.as_secs()
}

/// OpenAI models and sampling settings.
#[derive(Debug, Clone, Deserialize)]
pub struct OpenAiConfig {
    #[serde(default)]
    pub base_url: Option<String>,
    #[serde(default = "default_ask_model")]
    pub ask_model: String,
    #[serde(default = "default_research_model")]
    pub research_model: String,
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    #[serde(default = "default_temperature")]
    pub temperature: f32,
}

impl Default for OpenAiConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            ask_model: default_ask_model(),
            research_model: default_research_model(),
            max_tokens: default_max_tokens(),
            temperature: default_temperature(),
        }
    }
}

fn default_ask_model() -> String {
    assistant::DEFAULT_ASK_MODEL.to_string()
}

fn default_research_model() -> String {
    assistant::DEFAULT_RESEARCH_MODEL.to_string()
}

fn default_max_tokens() -> u32 {
    assistant::DEFAULT_MAX_TOKENS
}

fn default_temperature() -> f32 {
    assistant::DEFAULT_TEMPERATURE
}

/// Transport settings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct HttpConfig {
    /// Per-request timeout in seconds (default: none).
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

/// Secrets configuration (API keys).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Secrets {
    #[serde(default)]
    pub openai: Option<ApiKeySecret>,
    #[serde(default)]
    pub tmdb: Option<ApiKeySecret>,
}

/// A single API key secret.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiKeySecret {
    pub api_key: String,
}

/// Provider name → environment variable name mapping.
const PROVIDER_ENV_VARS: &[(&str, &str)] = &[
    ("openai", "OPENAI_API_KEY"),
    ("tmdb", "TMDB_API_KEY"),
];

impl Config {
    /// Load configuration from the standard locations.
    ///
    /// Falls back to defaults when no file exists, except that an explicit
    /// path must exist.
    pub fn load(explicit_path: Option<&Path>) -> Result<Self> {
        match Self::resolve_config_path(explicit_path)? {
            Some(path) => Self::from_file(&path),
            None => Ok(Config::default()),
        }
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            CourierError::Configuration(format!("Failed to read config file {path:?}: {e}"))
        })?;
        toml::from_str(&content).map_err(|e| {
            CourierError::Configuration(format!("Failed to parse config file {path:?}: {e}"))
        })
    }

    fn resolve_config_path(explicit: Option<&Path>) -> Result<Option<PathBuf>> {
        if let Some(path) = explicit {
            if path.exists() {
                return Ok(Some(path.to_path_buf()));
            }
            return Err(CourierError::Configuration(format!(
                "Config file not found: {path:?}"
            )));
        }

        // User config
        if let Some(home) = dirs::home_dir() {
            let user_config = home.join(".courier").join("config.toml");
            if user_config.exists() {
                return Ok(Some(user_config));
            }
        }

        // System config
        let system_config = PathBuf::from("/etc/courier/config.toml");
        if system_config.exists() {
            return Ok(Some(system_config));
        }

        Ok(None)
    }

    /// Assistant settings from the `[openai]` section.
    pub fn assistant(&self) -> AssistantConfig {
        AssistantConfig {
            ask_model: self.openai.ask_model.clone(),
            research_model: self.openai.research_model.clone(),
            max_tokens: self.openai.max_tokens,
            temperature: self.openai.temperature,
        }
    }

    /// Apply every non-secret setting to `builder`.
    pub fn apply(&self, mut builder: CourierBuilder) -> CourierBuilder {
        if let Some(url) = &self.opendota.base_url {
            builder = builder.opendota_url(url);
        }
        if let Some(url) = &self.tmdb.base_url {
            builder = builder.tmdb_url(url);
        }
        if let Some(url) = &self.openai.base_url {
            builder = builder.openai_url(url);
        }
        if let Some(secs) = self.http.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        builder
            .hero_stats_ttl(Duration::from_secs(self.opendota.cache_ttl_secs))
            .now_playing_ttl(Duration::from_secs(self.tmdb.cache_ttl_secs))
            .assistant(self.assistant())
    }
}

impl Secrets {
    /// Load secrets from the standard locations with permission checks.
    ///
    /// Returns empty secrets if no file exists (keys may come from env vars).
    pub fn load() -> Result<Self> {
        // Try user secrets first
        if let Some(home) = dirs::home_dir() {
            let user_secrets = home.join(".courier").join("secrets.toml");
            if user_secrets.exists() {
                return Self::from_file(&user_secrets);
            }
        }

        // Try system secrets
        let system_secrets = PathBuf::from("/etc/courier/secrets.toml");
        if system_secrets.exists() {
            return Self::from_file(&system_secrets);
        }

        Ok(Secrets::default())
    }

    /// Load one secrets file, rejecting insecure permissions.
    pub fn from_file(path: &Path) -> Result<Self> {
        Self::check_permissions(path)?;
        let content = fs::read_to_string(path).map_err(|e| {
            CourierError::Configuration(format!("Failed to read secrets file {path:?}: {e}"))
        })?;
        toml::from_str(&content).map_err(|e| {
            CourierError::Configuration(format!("Failed to parse secrets file {path:?}: {e}"))
        })
    }

    /// Check that the secrets file has secure permissions (0600 or 0400).
    #[cfg(unix)]
    fn check_permissions(path: &Path) -> Result<()> {
        use std::os::unix::fs::PermissionsExt;

        let metadata = fs::metadata(path).map_err(|e| {
            CourierError::Configuration(format!("Failed to stat secrets file {path:?}: {e}"))
        })?;

        let mode = metadata.permissions().mode();
        // Reject if group or other bits are set
        if mode & 0o077 != 0 {
            return Err(CourierError::Configuration(format!(
                "Secrets file {path:?} has insecure permissions {:o}. Must be 0600 or 0400.",
                mode & 0o777
            )));
        }

        Ok(())
    }

    #[cfg(not(unix))]
    fn check_permissions(_path: &Path) -> Result<()> {
        Ok(())
    }

    /// Get API key for a provider, falling back to the corresponding environment variable.
    pub fn api_key(&self, provider: &str) -> Option<String> {
        self.api_key_or(provider, |var| std::env::var(var).ok())
    }

    fn api_key_or(&self, provider: &str, env: impl Fn(&str) -> Option<String>) -> Option<String> {
        let from_file = match provider {
            "openai" => self.openai.as_ref(),
            "tmdb" => self.tmdb.as_ref(),
            _ => None,
        }
        .map(|s| s.api_key.clone())
        .filter(|key| !key.trim().is_empty());

        from_file.or_else(|| {
            PROVIDER_ENV_VARS
                .iter()
                .find(|(name, _)| *name == provider)
                .and_then(|(_, env_var)| env(env_var))
        })
    }

    /// Configure every available key on `builder`.
    pub fn apply(&self, mut builder: CourierBuilder) -> CourierBuilder {
        if let Some(key) = self.api_key("openai") {
            builder = builder.openai(key);
        }
        if let Some(key) = self.api_key("tmdb") {
            builder = builder.tmdb(key);
        }
        builder
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn default_config_has_expected_values() {
        let config = Config::default();
        assert_eq!(config.opendota.cache_ttl_secs, 300);
        assert_eq!(config.tmdb.cache_ttl_secs, 300);
        assert_eq!(config.openai.ask_model, "gpt-4o-mini");
        assert_eq!(config.openai.research_model, "gpt-4o");
        assert_eq!(config.openai.max_tokens, 1024);
        assert!(config.http.timeout_secs.is_none());
    }

    #[test]
    fn parse_minimal_config() {
        let toml = r#"
            [opendota]
            cache_ttl_secs = 60
        "#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.opendota.cache_ttl_secs, 60);
        // Defaults preserved
        assert_eq!(config.tmdb.cache_ttl_secs, 300);
        assert!(config.opendota.base_url.is_none());
        assert_eq!(config.assistant(), AssistantConfig::default());
    }

    #[test]
    fn parse_full_config() {
        let toml = r#"
            [opendota]
            base_url = "http://localhost:8001"
            cache_ttl_secs = 120

            [tmdb]
            base_url = "http://localhost:8002/3"

            [openai]
            base_url = "http://localhost:8003/v1"
            ask_model = "gpt-4o"
            research_model = "gpt-4o"
            max_tokens = 512
            temperature = 0.2

            [http]
            timeout_secs = 20
        "#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(
            config.opendota.base_url.as_deref(),
            Some("http://localhost:8001")
        );
        assert_eq!(config.opendota.cache_ttl_secs, 120);
        assert_eq!(config.tmdb.cache_ttl_secs, 300);
        let assistant = config.assistant();
        assert_eq!(assistant.ask_model, "gpt-4o");
        assert_eq!(assistant.max_tokens, 512);
        assert!((assistant.temperature - 0.2).abs() < f32::EPSILON);
        assert_eq!(config.http.timeout_secs, Some(20));
    }

    #[test]
    fn load_from_explicit_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[openai]\nask_model = \"gpt-4o\"").unwrap();
        let config = Config::load(Some(file.path())).unwrap();
        assert_eq!(config.openai.ask_model, "gpt-4o");
    }

    #[test]
    fn config_not_found_returns_error() {
        let result = Config::load(Some(Path::new("/nonexistent/config.toml")));
        assert!(result.is_err());
        let err = result.unwrap_err().to_string();
        assert!(err.contains("Config file not found"));
    }

    #[test]
    fn parse_secrets() {
        let toml = r#"
            [openai]
            api_key = "sk-test-key"
        "#;
        let secrets: Secrets = toml::from_str(toml).unwrap();
        assert_eq!(secrets.openai.as_ref().unwrap().api_key, "sk-test-key");
        assert!(secrets.tmdb.is_none());
    }

    #[test]
    fn api_key_prefers_file_then_env() {
        let secrets = Secrets {
            openai: Some(ApiKeySecret {
                api_key: "from-file".to_string(),
            }),
            ..Default::default()
        };
        let env = |var: &str| (var == "TMDB_API_KEY").then(|| "from-env".to_string());
        assert_eq!(
            secrets.api_key_or("openai", env),
            Some("from-file".to_string())
        );
        assert_eq!(secrets.api_key_or("tmdb", env), Some("from-env".to_string()));
        // Unknown provider returns None
        assert_eq!(secrets.api_key_or("nonexistent", env), None);
    }

    #[cfg(unix)]
    #[test]
    fn insecure_secrets_file_is_rejected() {
        use std::os::unix::fs::PermissionsExt;

        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[tmdb]\napi_key = \"k\"").unwrap();

        fs::set_permissions(file.path(), fs::Permissions::from_mode(0o644)).unwrap();
        let err = Secrets::from_file(file.path()).unwrap_err().to_string();
        assert!(err.contains("insecure permissions"));

        fs::set_permissions(file.path(), fs::Permissions::from_mode(0o600)).unwrap();
        let secrets = Secrets::from_file(file.path()).unwrap();
        assert_eq!(secrets.tmdb.unwrap().api_key, "k");
    }
}

use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

pub const DEFAULT_CLICKUP_API_URL: &str = "https://api.clickup.com/api/v2";
pub const DEFAULT_SPACE_ID: &str = "90125160522";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

const DEFAULT_CONFIG_FILE: &str = r#"
[cors]
allowed_origins = ["http://localhost:3000"]

[server]
host = "127.0.0.1"
port = 8080

[clickup]
api_url = "https://api.clickup.com/api/v2"
timeout_secs = 30
"#;

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ApiConfig {
    pub cors: Option<CorsConfig>,
    pub server: Option<ServerConfig>,
    pub clickup: Option<ClickUpConfig>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            cors: Some(CorsConfig {
                allowed_origins: vec!["http://localhost:3000".to_string()],
            }),
            server: Some(ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 8080,
            }),
            clickup: Some(ClickUpConfig::default()),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct CorsConfig {
    pub allowed_origins: Vec<String>,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// Where and how the service talks to ClickUp. Credentials are not stored
/// here; see [`ClickUpEnv`].
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ClickUpConfig {
    #[serde(default = "default_api_url")]
    pub api_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ClickUpConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_api_url() -> String {
    DEFAULT_CLICKUP_API_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl ApiConfig {
    pub fn load() -> Result<(Self, PathBuf), ConfigError> {
        let config_path = get_config_path();

        // Create config directory if it doesn't exist
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                ConfigError::Message(format!("Failed to create config directory: {e}"))
            })?;
        }

        // Create default config file if it doesn't exist
        if !config_path.exists() {
            std::fs::write(&config_path, DEFAULT_CONFIG_FILE).map_err(|e| {
                ConfigError::Message(format!("Failed to write default config: {e}"))
            })?;
        }

        let builder = Config::builder()
            .add_source(File::from(config_path.clone()))
            .build()?;

        let config: ApiConfig = builder.try_deserialize()?;

        Ok((config, config_path))
    }

    pub fn clickup(&self) -> ClickUpConfig {
        self.clickup.clone().unwrap_or_default()
    }
}

pub fn get_config_path() -> PathBuf {
    if let Some(config_dir) = dirs::config_dir() {
        config_dir.join("clickdash").join("api.toml")
    } else {
        PathBuf::from("api.toml")
    }
}

/// Raw `CLICKUP_*` values as found in the process environment.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ClickUpEnv {
    pub api_key: Option<String>,
    pub team_id: Option<String>,
    pub space_id: Option<String>,
}

/// Validated credentials for one dashboard request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClickUpCredentials {
    pub api_key: String,
    pub team_id: String,
    pub space_id: String,
}

#[derive(Debug, Error)]
pub enum CredentialsError {
    #[error("Missing CLICKUP_API_KEY or CLICKUP_TEAM_ID environment variables")]
    Missing,
    #[error("Failed to read ClickUp environment: {0}")]
    Source(#[from] ConfigError),
}

impl ClickUpEnv {
    pub fn from_environment() -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(Environment::with_prefix("CLICKUP"))
            .build()?
            .try_deserialize()
    }

    pub fn into_credentials(self) -> Result<ClickUpCredentials, CredentialsError> {
        let (Some(api_key), Some(team_id)) = (non_blank(self.api_key), non_blank(self.team_id))
        else {
            return Err(CredentialsError::Missing);
        };

        Ok(ClickUpCredentials {
            api_key,
            team_id,
            space_id: non_blank(self.space_id).unwrap_or_else(|| DEFAULT_SPACE_ID.to_string()),
        })
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Where the dashboard handler gets its credentials from.
///
/// `Environment` re-reads the process environment on every request so a
/// rotated key is picked up without a restart.
#[derive(Debug, Clone)]
pub enum CredentialsSource {
    Environment,
    Fixed(ClickUpEnv),
}

impl CredentialsSource {
    pub fn load(&self) -> Result<ClickUpCredentials, CredentialsError> {
        match self {
            CredentialsSource::Environment => ClickUpEnv::from_environment()?.into_credentials(),
            CredentialsSource::Fixed(env) => env.clone().into_credentials(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use config::FileFormat;

    fn env(api_key: Option<&str>, team_id: Option<&str>, space_id: Option<&str>) -> ClickUpEnv {
        ClickUpEnv {
            api_key: api_key.map(str::to_string),
            team_id: team_id.map(str::to_string),
            space_id: space_id.map(str::to_string),
        }
    }

    #[test]
    fn test_default_config_file_parses() {
        let config: ApiConfig = Config::builder()
            .add_source(File::from_str(DEFAULT_CONFIG_FILE, FileFormat::Toml))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        let server = config.server.unwrap();
        assert_eq!(server.host, "127.0.0.1");
        assert_eq!(server.port, 8080);
        assert_eq!(config.clickup.unwrap().api_url, DEFAULT_CLICKUP_API_URL);
    }

    #[test]
    fn test_clickup_section_defaults() {
        let config: ApiConfig = Config::builder()
            .add_source(File::from_str("[clickup]\n", FileFormat::Toml))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        let clickup = config.clickup();
        assert_eq!(clickup.api_url, DEFAULT_CLICKUP_API_URL);
        assert_eq!(clickup.timeout_secs, DEFAULT_TIMEOUT_SECS);
        assert!(config.cors.is_none());
    }

    #[test]
    fn test_credentials_with_default_space() {
        let creds = env(Some("pk_123"), Some("9012"), None)
            .into_credentials()
            .unwrap();
        assert_eq!(creds.api_key, "pk_123");
        assert_eq!(creds.team_id, "9012");
        assert_eq!(creds.space_id, DEFAULT_SPACE_ID);
    }

    #[test]
    fn test_missing_or_blank_values_are_rejected() {
        for candidate in [
            env(None, Some("9012"), None),
            env(Some("pk_123"), None, None),
            env(Some("   "), Some("9012"), None),
            env(Some("pk_123"), Some(""), Some("55")),
        ] {
            let err = candidate.into_credentials().unwrap_err();
            assert!(matches!(err, CredentialsError::Missing));
            assert_eq!(
                err.to_string(),
                "Missing CLICKUP_API_KEY or CLICKUP_TEAM_ID environment variables"
            );
        }
    }

    #[test]
    fn test_fixed_source_overrides_space() {
        let source = CredentialsSource::Fixed(env(Some("pk_123"), Some("9012"), Some("777")));
        assert_eq!(source.load().unwrap().space_id, "777");
    }
}

use std::env;
use std::path::Path;
use config::{Config, File, ConfigError};
use dotenv::dotenv;
use secrecy::{ExposeSecret, SecretString};

use crate::config::jwt::JwtSettings;

const DEFAULT_TOKEN_LEEWAY_SECONDS: u64 = 60;

#[derive(serde::Deserialize, Debug)]
pub struct Settings{
    pub application: ApplicationSettings,
    pub store: StoreSettings,
    pub database: DatabaseSettings,
}

#[derive(serde::Deserialize, Debug)]
pub struct ApplicationSettings{
    pub port: u16,
    pub host: String,
    pub log_level: String,
    #[serde(default)]
    pub debug: bool,
    pub secret_key: SecretString,
    #[serde(default = "default_allowed_origins")]
    pub allowed_origins: Vec<String>,
}

impl ApplicationSettings {
    /// Debug mode always logs at `debug`, otherwise the configured level wins.
    pub fn effective_log_level(&self) -> String {
        if self.debug {
            "debug".to_string()
        } else {
            self.log_level.clone()
        }
    }
}

fn default_allowed_origins() -> Vec<String> {
    vec!["http://localhost:3000".to_string()]
}

#[derive(serde::Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    Memory,
    Postgres,
}

#[derive(serde::Deserialize, Debug)]
pub struct StoreSettings {
    pub backend: StoreBackend,
    /// JSON file holding the store connection credentials (`{"db_url": "..."}`).
    #[serde(default)]
    pub credentials_path: Option<String>,
}

#[derive(serde::Deserialize, Debug)]
pub struct DatabaseSettings{
    pub user: String,
    pub password: SecretString,
    pub port: u16,
    pub host: String,
    pub db_name: String,
    #[serde(default)]
    pub db_url: Option<SecretString>
}

impl DatabaseSettings {
    pub fn connection_string(&self) -> SecretString {
        match &self.db_url {
            Some(db_url) => db_url.clone(),
            None => {
                SecretString::new(format!(
                    "postgres://{}:{}@{}:{}/{}",
                    self.user, self.password.expose_secret(), self.host, self.port, self.db_name
                ).into_boxed_str())
            }
        }
    }
}

#[derive(serde::Deserialize)]
struct StoreCredentials {
    db_url: SecretString,
}

fn load_store_credentials(path: &Path) -> Result<StoreCredentials, ConfigError> {
    let raw = std::fs::read_to_string(path).map_err(|e| {
        ConfigError::Message(format!("Failed to read store credentials {}: {}", path.display(), e))
    })?;
    serde_json::from_str(&raw).map_err(|e| {
        ConfigError::Message(format!("Invalid store credentials {}: {}", path.display(), e))
    })
}

pub fn get_config() -> Result<Settings, ConfigError> {
    let base_path = std::env::current_dir()
        .map_err(|e| ConfigError::Message(format!("Failed to determine the current directory: {}", e)))?;
    let configuration_directory = base_path.join("configuration");

    dotenv().ok();

    let environment: Environment = env::var("APP_ENVIRONMENT")
        .unwrap_or_else(|_| "local".into())
        .try_into()
        .map_err(ConfigError::Message)?;

    let env_filename = format!("{}.yml", environment.as_str());
    let config = Config::builder()
        .add_source(File::from(configuration_directory.join("base.yml")))
        .add_source(File::from(configuration_directory.join(env_filename)).required(false))
        .add_source(
            config::Environment::default()
                .prefix("APP")
                .prefix_separator("__")
                .separator("__")
        )
        .build()?;

    let mut settings = config.try_deserialize::<Settings>()?;

    if let Ok(secret_key) = env::var("SECRET_KEY") {
        settings.application.secret_key = SecretString::new(secret_key.into_boxed_str());
    }

    if let Ok(debug) = env::var("DEBUG") {
        settings.application.debug = matches!(debug.to_lowercase().as_str(), "1" | "true" | "yes");
    }

    if let Ok(credentials_path) = env::var("STORE_CREDENTIALS_PATH") {
        settings.store.credentials_path = Some(credentials_path);
    }

    if let Some(path) = &settings.store.credentials_path {
        let credentials = load_store_credentials(Path::new(path))?;
        settings.database.db_url = Some(credentials.db_url);
    }

    // Hosted environments expose the connection string directly
    if let Ok(db_url) = env::var("DATABASE_URL") {
        settings.database.db_url = Some(SecretString::new(db_url.into_boxed_str()));
    }

    Ok(settings)
}

#[derive(Debug, PartialEq, Eq)]
pub enum Environment {
    Local,
    Production,
}

impl Environment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Local => "local",
            Environment::Production => "production",
        }
    }
}

impl TryFrom<String> for Environment {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        match s.to_lowercase().as_str() {
            "local" | "development" => Ok(Self::Local),
            "production" => Ok(Self::Production),
            other => Err(format!(
                "{} is not a supported environment. \
                Use either `local` or `production`.",
                other
            )),
        }
    }
}

pub fn get_jwt_settings(settings: &Settings) -> JwtSettings {
    JwtSettings::new(
        settings.application.secret_key.expose_secret().to_string(),
        DEFAULT_TOKEN_LEEWAY_SECONDS,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_environment_parsing() {
        assert_eq!(Environment::try_from("local".to_string()), Ok(Environment::Local));
        assert_eq!(Environment::try_from("Development".to_string()), Ok(Environment::Local));
        assert_eq!(Environment::try_from("PRODUCTION".to_string()), Ok(Environment::Production));
        assert!(Environment::try_from("staging".to_string()).is_err());
    }

    #[test]
    fn test_debug_overrides_log_level() {
        let mut application = ApplicationSettings {
            port: 5000,
            host: "127.0.0.1".to_string(),
            log_level: "warn".to_string(),
            debug: false,
            secret_key: SecretString::new("secret".to_string().into_boxed_str()),
            allowed_origins: default_allowed_origins(),
        };
        assert_eq!(application.effective_log_level(), "warn");

        application.debug = true;
        assert_eq!(application.effective_log_level(), "debug");
    }

    #[test]
    fn test_connection_string_prefers_db_url() {
        let mut database = DatabaseSettings {
            user: "postgres".to_string(),
            password: SecretString::new("pw".to_string().into_boxed_str()),
            port: 5432,
            host: "localhost".to_string(),
            db_name: "health".to_string(),
            db_url: None,
        };
        assert_eq!(
            database.connection_string().expose_secret(),
            "postgres://postgres:pw@localhost:5432/health"
        );

        database.db_url = Some(SecretString::new("postgres://remote/db".to_string().into_boxed_str()));
        assert_eq!(database.connection_string().expose_secret(), "postgres://remote/db");
    }
}

use std::env;
use std::time::Duration;

use axum::http::Uri;
use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Server {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Logger {
    pub level: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Database {
    pub clean_start: bool,
    pub url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Store {
    /// Upper bound for a single store call, in milliseconds
    pub timeout_ms: u64,
    /// Key space holding administrator credentials
    pub auth_table: String,
    /// Key space holding per-room regulation options
    pub control_plane_table: String,
}

impl Store {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

impl Default for Store {
    fn default() -> Self {
        Self {
            timeout_ms: 5_000,
            auth_table: String::from("Authentication"),
            control_plane_table: String::from("ControlPlane"),
        }
    }
}

#[derive(Clone, Serialize, Deserialize)]
pub struct Admin {
    pub username: String,
    pub password: String,
}

impl std::fmt::Debug for Admin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Admin")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

#[derive(Clone, Serialize, Deserialize)]
pub struct Auth {
    pub secret: String,
    /// Token lifetime in seconds
    pub expiration: u64,
    /// Administrator whose credentials are written at startup
    pub admin: Option<Admin>,
}

impl std::fmt::Debug for Auth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Auth")
            .field("secret", &"<redacted>")
            .field("expiration", &self.expiration)
            .field("admin", &self.admin)
            .finish()
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Cors {
    #[serde(default)]
    pub origins: Vec<String>,
}

impl Cors {
    /// A lone `*` allows any origin.
    pub fn is_permissive(&self) -> bool {
        matches!(self.origins.as_slice(), [origin] if origin == "*")
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.is_permissive() {
            return Ok(());
        }

        for origin in &self.origins {
            let uri = origin
                .parse::<Uri>()
                .map_err(|e| ConfigError::Message(format!("error parsing origin '{origin}': {e}")))?;

            if uri.scheme().is_none() || uri.authority().is_none() {
                return Err(ConfigError::Message(format!(
                    "error parsing origin '{origin}': expected an absolute url"
                )));
            }
        }

        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub server: Server,
    pub logger: Logger,
    pub database: Database,
    #[serde(default)]
    pub store: Store,
    pub auth: Auth,
    #[serde(default)]
    pub cors: Cors,
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or("development".into());

        let settings: Settings = Config::builder()
            .add_source(File::with_name("configs/default"))
            .add_source(File::with_name(&format!("configs/{run_mode}")).required(false))
            .add_source(
                Environment::with_prefix("SMARTHOME")
                    .prefix_separator("__")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        settings.validate()?;

        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.auth.secret.is_empty() {
            return Err(ConfigError::Message(String::from(
                "auth.secret must not be empty",
            )));
        }

        if self.auth.expiration == 0 {
            return Err(ConfigError::Message(String::from(
                "auth.expiration must be greater than zero",
            )));
        }

        if self.store.timeout_ms == 0 {
            return Err(ConfigError::Message(String::from(
                "store.timeout_ms must be greater than zero",
            )));
        }

        self.cors.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings() -> Settings {
        Settings {
            server: Server {
                host: String::from("127.0.0.1"),
                port: 3000,
            },
            logger: Logger {
                level: String::from("debug"),
            },
            database: Database {
                clean_start: true,
                url: String::from("sqlite::memory:"),
            },
            store: Store::default(),
            auth: Auth {
                secret: String::from("test"),
                expiration: 1000,
                admin: None,
            },
            cors: Cors::default(),
        }
    }

    #[test]
    fn test_validate_accepts_defaults() {
        assert!(settings().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_empty_secret() {
        let mut settings = settings();
        settings.auth.secret = String::new();

        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_zero_expiration() {
        let mut settings = settings();
        settings.auth.expiration = 0;

        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_cors_origins() {
        let wildcard = Cors {
            origins: vec![String::from("*")],
        };
        assert!(wildcard.is_permissive());
        assert!(wildcard.validate().is_ok());

        let valid = Cors {
            origins: vec![
                String::from("https://home.example.com"),
                String::from("http://localhost:8080"),
            ],
        };
        assert!(!valid.is_permissive());
        assert!(valid.validate().is_ok());

        let relative = Cors {
            origins: vec![String::from("home.example.com/path")],
        };
        assert!(relative.validate().is_err());

        let mixed = Cors {
            origins: vec![String::from("*"), String::from("https://home.example.com")],
        };
        assert!(!mixed.is_permissive());
        assert!(mixed.validate().is_err());
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let mut settings = settings();
        settings.auth.admin = Some(Admin {
            username: String::from("admin"),
            password: String::from("hunter2"),
        });

        let printed = format!("{settings:?}");

        assert!(!printed.contains("hunter2"));
        assert!(!printed.contains("secret: \"test\""));
    }
}

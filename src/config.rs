//! Configuration management for the LIEN console

use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;
use std::time::Duration;

/// How a collection's delete endpoint expects its key
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DeleteMode {
    /// `DELETE {delete_url}/{key}`
    Path,
    /// `POST {delete_url}` with the key as JSON body
    Body,
}

/// Endpoints of one remote entity collection
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct CollectionEndpoints {
    pub list_url: String,
    pub create_url: String,
    /// Absent when the remote service exposes no update for the collection
    #[serde(default)]
    pub update_url: Option<String>,
    pub delete_url: String,
    pub delete_mode: DeleteMode,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct AuthEndpoints {
    pub login_url: String,
    pub change_password_url: String,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct ApiConfig {
    pub books: CollectionEndpoints,
    pub users: CollectionEndpoints,
    pub loans: CollectionEndpoints,
    pub auth: AuthEndpoints,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct SessionConfig {
    pub storage_path: PathBuf,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct ConsoleConfig {
    pub page_size: usize,
    pub catalog_page_size: usize,
    pub redirect_delay_ms: u64,
    pub admin_role: String,
}

impl ConsoleConfig {
    pub fn redirect_delay(&self) -> Duration {
        Duration::from_millis(self.redirect_delay_ms)
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub session: SessionConfig,
    #[serde(default)]
    pub console: ConsoleConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        // Built-in defaults first, so any single key can be overridden
        let config = Config::builder()
            .add_source(Config::try_from(&AppConfig::default())?)
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // LIEN_API__BOOKS__LIST_URL, LIEN_CONSOLE__PAGE_SIZE, ...
            .add_source(
                Environment::with_prefix("LIEN")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .set_override_option(
                "session.storage_path",
                env::var("LIEN_SESSION_FILE").ok(),
            )?
            .build()?;

        config.try_deserialize()
    }
}

const BOOKS_API: &str = "https://kqwpa7r6ec.execute-api.us-east-2.amazonaws.com/Prod";
const USERS_API: &str = "https://fwa4x6g5k8.execute-api.us-east-2.amazonaws.com/Prod";
const AUTH_API: &str = "https://apfgm8t067.execute-api.us-east-2.amazonaws.com/Prod";
const LOANS_API: &str = "https://eomnbralql.execute-api.us-east-2.amazonaws.com/Prod";

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            books: CollectionEndpoints {
                list_url: format!("{}/all", BOOKS_API),
                create_url: format!("{}/add", BOOKS_API),
                update_url: Some(format!("{}/edi", BOOKS_API)),
                delete_url: format!("{}/delete", BOOKS_API),
                delete_mode: DeleteMode::Path,
            },
            users: CollectionEndpoints {
                list_url: format!("{}/all", USERS_API),
                create_url: format!("{}/add", USERS_API),
                update_url: None,
                delete_url: format!("{}/delete_user", USERS_API),
                delete_mode: DeleteMode::Body,
            },
            // Loans are created through the auth service, listed and
            // returned through the loans service.
            loans: CollectionEndpoints {
                list_url: format!("{}/prestamos", LOANS_API),
                create_url: format!("{}/create_prestamo", AUTH_API),
                update_url: None,
                delete_url: format!("{}/low_prestamo", LOANS_API),
                delete_mode: DeleteMode::Body,
            },
            auth: AuthEndpoints::default(),
        }
    }
}

impl Default for AuthEndpoints {
    fn default() -> Self {
        Self {
            login_url: format!("{}/login", AUTH_API),
            change_password_url: format!("{}/change-password", AUTH_API),
        }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            storage_path: PathBuf::from(".lien/storage.json"),
        }
    }
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            page_size: 5,
            catalog_page_size: 12,
            redirect_delay_ms: 1000,
            admin_role: "admin".to_string(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

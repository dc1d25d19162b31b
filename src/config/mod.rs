use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub environment: Environment,
    pub filter: FilterConfig,
    pub routes: RoutesConfig,
    pub storage: StorageConfig,
    pub security: SecurityConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Environment {
    Development,
    Staging,
    Production,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilterConfig {
    pub debug_logging: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoutesConfig {
    /// Where unauthenticated navigation lands
    pub login_path: String,
    /// Where an authenticated user lacking a route's role lands
    pub default_path: String,
    pub max_redirects: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Overrides the per-user config directory
    pub config_dir: Option<PathBuf>,
    pub credentials_file: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecurityConfig {
    pub audit_logging: bool,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let environment = match env::var("APP_ENV").as_deref() {
            Ok("production") | Ok("prod") => Environment::Production,
            Ok("staging") | Ok("stage") => Environment::Staging,
            _ => Environment::Development,
        };

        // Set defaults based on environment, then override with specific env vars
        match environment {
            Environment::Production => Self::production(),
            Environment::Staging => Self::staging(),
            Environment::Development => Self::development(),
        }
        .with_env_overrides()
    }

    fn with_env_overrides(mut self) -> Self {
        if let Ok(v) = env::var("FILTER_DEBUG_LOGGING") {
            self.filter.debug_logging = v.parse().unwrap_or(self.filter.debug_logging);
        }

        if let Ok(v) = env::var("ROUTES_LOGIN_PATH") {
            self.routes.login_path = v;
        }
        if let Ok(v) = env::var("ROUTES_DEFAULT_PATH") {
            self.routes.default_path = v;
        }
        if let Ok(v) = env::var("ROUTES_MAX_REDIRECTS") {
            self.routes.max_redirects = v.parse().unwrap_or(self.routes.max_redirects);
        }

        if let Ok(v) = env::var("RENTLINE_CONFIG_DIR") {
            self.storage.config_dir = Some(PathBuf::from(v));
        }
        if let Ok(v) = env::var("RENTLINE_CREDENTIALS_FILE") {
            self.storage.credentials_file = v;
        }

        if let Ok(v) = env::var("SECURITY_AUDIT_LOGGING") {
            self.security.audit_logging = v.parse().unwrap_or(self.security.audit_logging);
        }

        self
    }

    fn base(environment: Environment) -> Self {
        Self {
            environment,
            filter: FilterConfig { debug_logging: false },
            routes: RoutesConfig {
                login_path: "/login".to_string(),
                default_path: "/".to_string(),
                max_redirects: 4,
            },
            storage: StorageConfig {
                config_dir: None,
                credentials_file: "credentials.json".to_string(),
            },
            security: SecurityConfig { audit_logging: true },
        }
    }

    fn development() -> Self {
        let mut config = Self::base(Environment::Development);
        config.filter.debug_logging = true;
        config.security.audit_logging = false;
        config
    }

    fn staging() -> Self {
        Self::base(Environment::Staging)
    }

    fn production() -> Self {
        Self::base(Environment::Production)
    }
}

// Global singleton config - initialized once at startup
pub static CONFIG: Lazy<AppConfig> = Lazy::new(AppConfig::from_env);

// Convenience function for accessing config
pub fn config() -> &'static AppConfig {
    &CONFIG
}

#[macro_export]
macro_rules! is_development {
    () => {
        matches!($crate::config::CONFIG.environment, $crate::config::Environment::Development)
    };
}

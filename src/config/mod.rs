use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::env;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub environment: Environment,
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub security: SecurityConfig,
    pub media: MediaConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Environment {
    Development,
    Staging,
    Production,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub port: u16,
    pub enable_request_logging: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub max_connections: u32,
    pub connection_timeout: u64,
    pub enable_slow_query_warning: bool,
    pub slow_query_threshold_ms: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecurityConfig {
    /// Secret used to sign session tokens issued by this service.
    pub session_secret: String,
    /// Shared secret the external identity provider signs assertions with.
    pub identity_secret: String,
    /// Admin allow-list, loaded once at process start. The admin gate is a
    /// pure predicate over this list; nothing mutates it afterwards.
    pub admin_emails: Vec<String>,
    pub session_expiry_hours: u64,
    pub enable_cors: bool,
    pub cors_origins: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MediaConfig {
    pub base_url: String,
    pub api_key: String,
    pub api_secret: String,
    pub folder: String,
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
        // Server overrides
        if let Ok(v) = env::var("PORT") {
            self.server.port = v.parse().unwrap_or(self.server.port);
        }
        if let Ok(v) = env::var("SERVER_ENABLE_REQUEST_LOGGING") {
            self.server.enable_request_logging = v.parse().unwrap_or(self.server.enable_request_logging);
        }

        // Database overrides
        if let Ok(v) = env::var("DATABASE_MAX_CONNECTIONS") {
            self.database.max_connections = v.parse().unwrap_or(self.database.max_connections);
        }
        if let Ok(v) = env::var("DATABASE_CONNECTION_TIMEOUT") {
            self.database.connection_timeout = v.parse().unwrap_or(self.database.connection_timeout);
        }
        if let Ok(v) = env::var("DATABASE_ENABLE_SLOW_QUERY_WARNING") {
            self.database.enable_slow_query_warning = v.parse().unwrap_or(self.database.enable_slow_query_warning);
        }
        if let Ok(v) = env::var("DATABASE_SLOW_QUERY_THRESHOLD_MS") {
            self.database.slow_query_threshold_ms = v.parse().unwrap_or(self.database.slow_query_threshold_ms);
        }

        // Security overrides
        if let Ok(v) = env::var("SESSION_SECRET") {
            self.security.session_secret = v;
        }
        if let Ok(v) = env::var("IDENTITY_SECRET") {
            self.security.identity_secret = v;
        }
        if let Ok(v) = env::var("ADMIN_EMAILS") {
            self.security.admin_emails = v
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect();
        }
        if let Ok(v) = env::var("SESSION_EXPIRY_HOURS") {
            self.security.session_expiry_hours = v.parse().unwrap_or(self.security.session_expiry_hours);
        }
        if let Ok(v) = env::var("SECURITY_ENABLE_CORS") {
            self.security.enable_cors = v.parse().unwrap_or(self.security.enable_cors);
        }
        if let Ok(v) = env::var("SECURITY_CORS_ORIGINS") {
            self.security.cors_origins = v.split(',').map(|s| s.trim().to_string()).collect();
        }

        // Media host overrides
        if let Ok(v) = env::var("MEDIA_BASE_URL") {
            self.media.base_url = v;
        }
        if let Ok(v) = env::var("MEDIA_API_KEY") {
            self.media.api_key = v;
        }
        if let Ok(v) = env::var("MEDIA_API_SECRET") {
            self.media.api_secret = v;
        }
        if let Ok(v) = env::var("MEDIA_FOLDER") {
            self.media.folder = v;
        }

        self
    }

    fn development() -> Self {
        Self {
            environment: Environment::Development,
            server: ServerConfig {
                port: 3000,
                enable_request_logging: true,
            },
            database: DatabaseConfig {
                max_connections: 10,
                connection_timeout: 30,
                enable_slow_query_warning: true,
                slow_query_threshold_ms: 100,
            },
            security: SecurityConfig {
                // Local-only defaults; real deployments override via env
                session_secret: "storefront-dev-session-secret".to_string(),
                identity_secret: "storefront-dev-identity-secret".to_string(),
                admin_emails: vec![],
                session_expiry_hours: 24 * 7, // 1 week
                enable_cors: true,
                cors_origins: vec!["http://localhost:3000".to_string(), "http://localhost:5173".to_string()],
            },
            media: MediaConfig {
                base_url: "http://localhost:9000".to_string(),
                api_key: String::new(),
                api_secret: String::new(),
                folder: "storefront-dev".to_string(),
            },
        }
    }

    fn staging() -> Self {
        Self {
            environment: Environment::Staging,
            server: ServerConfig {
                port: 3000,
                enable_request_logging: true,
            },
            database: DatabaseConfig {
                max_connections: 20,
                connection_timeout: 10,
                enable_slow_query_warning: true,
                slow_query_threshold_ms: 500,
            },
            security: SecurityConfig {
                session_secret: String::new(),
                identity_secret: String::new(),
                admin_emails: vec![],
                session_expiry_hours: 24,
                enable_cors: true,
                cors_origins: vec!["https://staging-admin.example.com".to_string()],
            },
            media: MediaConfig {
                base_url: String::new(),
                api_key: String::new(),
                api_secret: String::new(),
                folder: "storefront-staging".to_string(),
            },
        }
    }

    fn production() -> Self {
        Self {
            environment: Environment::Production,
            server: ServerConfig {
                port: 3000,
                enable_request_logging: false,
            },
            database: DatabaseConfig {
                max_connections: 50,
                connection_timeout: 5,
                enable_slow_query_warning: true,
                slow_query_threshold_ms: 1000,
            },
            security: SecurityConfig {
                session_secret: String::new(),
                identity_secret: String::new(),
                admin_emails: vec![],
                session_expiry_hours: 4,
                enable_cors: true,
                cors_origins: vec!["https://admin.example.com".to_string()],
            },
            media: MediaConfig {
                base_url: String::new(),
                api_key: String::new(),
                api_secret: String::new(),
                folder: "storefront".to_string(),
            },
        }
    }
}

// Global singleton config - initialized once at startup
pub static CONFIG: Lazy<AppConfig> = Lazy::new(AppConfig::from_env);

// Convenience function for accessing config
pub fn config() -> &'static AppConfig {
    &CONFIG
}

// Helper macros for common checks
#[macro_export]
macro_rules! is_development {
    () => {
        matches!($crate::config::CONFIG.environment, $crate::config::Environment::Development)
    };
}

#[macro_export]
macro_rules! is_production {
    () => {
        matches!($crate::config::CONFIG.environment, $crate::config::Environment::Production)
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_development_config() {
        let config = AppConfig::development();
        assert!(!config.security.session_secret.is_empty());
        assert_eq!(config.security.session_expiry_hours, 24 * 7);
        assert!(config.security.admin_emails.is_empty());
    }

    #[test]
    fn test_default_production_config() {
        let config = AppConfig::production();
        assert!(config.security.session_secret.is_empty());
        assert_eq!(config.security.session_expiry_hours, 4);
        assert!(!config.server.enable_request_logging);
    }
}

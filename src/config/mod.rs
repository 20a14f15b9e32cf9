use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::env;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub environment: Environment,
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub api: ApiConfig,
    pub security: SecurityConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Environment {
    Development,
    Test,
    Production,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub connection_timeout: u64,
    pub run_migrations: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    pub enable_request_logging: bool,
    pub max_request_size_bytes: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecurityConfig {
    #[serde(skip_serializing)]
    pub secret_key: String,
    pub jwt_expiry_hours: u64,
    pub bcrypt_work_factor: u32,
    pub enable_cors: bool,
    /// Empty means any origin is allowed.
    pub cors_origins: Vec<String>,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let environment = match env::var("APP_ENV").as_deref() {
            Ok("production") | Ok("prod") => Environment::Production,
            Ok("test") => Environment::Test,
            _ => Environment::Development,
        };

        // Set defaults based on environment, then override with specific env vars
        match environment {
            Environment::Production => Self::production(),
            Environment::Test => Self::test(),
            Environment::Development => Self::development(),
        }
        .with_env_overrides()
    }

    fn with_env_overrides(mut self) -> Self {
        if let Ok(v) = env::var("PORT") {
            self.server.port = v.parse().unwrap_or(self.server.port);
        }

        // Database overrides
        if let Ok(v) = env::var("DATABASE_URL") {
            if !v.trim().is_empty() {
                self.database.url = v;
            }
        }
        if let Ok(v) = env::var("DATABASE_MAX_CONNECTIONS") {
            self.database.max_connections = v.parse().unwrap_or(self.database.max_connections);
        }
        if let Ok(v) = env::var("DATABASE_CONNECTION_TIMEOUT") {
            self.database.connection_timeout = v.parse().unwrap_or(self.database.connection_timeout);
        }
        if let Ok(v) = env::var("DATABASE_RUN_MIGRATIONS") {
            self.database.run_migrations = v.parse().unwrap_or(self.database.run_migrations);
        }

        // API overrides
        if let Ok(v) = env::var("API_ENABLE_REQUEST_LOGGING") {
            self.api.enable_request_logging = v.parse().unwrap_or(self.api.enable_request_logging);
        }
        if let Ok(v) = env::var("API_MAX_REQUEST_SIZE_BYTES") {
            self.api.max_request_size_bytes = v.parse().unwrap_or(self.api.max_request_size_bytes);
        }

        // Security overrides
        if let Ok(v) = env::var("SECRET_KEY") {
            if !v.is_empty() {
                self.security.secret_key = v;
            }
        }
        if let Ok(v) = env::var("SECURITY_JWT_EXPIRY_HOURS") {
            self.security.jwt_expiry_hours = v.parse().unwrap_or(self.security.jwt_expiry_hours);
        }
        if let Ok(v) = env::var("BCRYPT_WORK_FACTOR") {
            self.security.bcrypt_work_factor = v.parse().unwrap_or(self.security.bcrypt_work_factor);
        }
        if let Ok(v) = env::var("SECURITY_ENABLE_CORS") {
            self.security.enable_cors = v.parse().unwrap_or(self.security.enable_cors);
        }
        if let Ok(v) = env::var("SECURITY_CORS_ORIGINS") {
            self.security.cors_origins = v
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect();
        }

        self
    }

    fn development() -> Self {
        Self {
            environment: Environment::Development,
            server: ServerConfig { port: 3001 },
            database: DatabaseConfig {
                url: "postgresql:///jobly".to_string(),
                max_connections: 10,
                connection_timeout: 30,
                run_migrations: true,
            },
            api: ApiConfig {
                enable_request_logging: true,
                max_request_size_bytes: 2 * 1024 * 1024, // 2MB
            },
            security: SecurityConfig {
                secret_key: "secret-dev".to_string(),
                jwt_expiry_hours: 24 * 7, // 1 week
                bcrypt_work_factor: 12,
                enable_cors: true,
                cors_origins: vec![],
            },
        }
    }

    fn test() -> Self {
        Self {
            environment: Environment::Test,
            server: ServerConfig { port: 3001 },
            database: DatabaseConfig {
                url: "postgresql:///jobly_test".to_string(),
                max_connections: 5,
                connection_timeout: 5,
                run_migrations: true,
            },
            api: ApiConfig {
                enable_request_logging: false,
                max_request_size_bytes: 2 * 1024 * 1024,
            },
            security: SecurityConfig {
                secret_key: "secret-dev".to_string(),
                jwt_expiry_hours: 1,
                // bcrypt rejects costs below 4
                bcrypt_work_factor: 4,
                enable_cors: true,
                cors_origins: vec![],
            },
        }
    }

    fn production() -> Self {
        Self {
            environment: Environment::Production,
            server: ServerConfig { port: 3001 },
            database: DatabaseConfig {
                url: "postgresql:///jobly".to_string(),
                max_connections: 50,
                connection_timeout: 5,
                run_migrations: false,
            },
            api: ApiConfig {
                enable_request_logging: false,
                max_request_size_bytes: 1024 * 1024, // 1MB
            },
            security: SecurityConfig {
                secret_key: "secret-dev".to_string(),
                jwt_expiry_hours: 24,
                bcrypt_work_factor: 12,
                enable_cors: true,
                cors_origins: vec![],
            },
        }
    }
}

// Global singleton config - initialized once at startup
pub static CONFIG: Lazy<AppConfig> = Lazy::new(AppConfig::from_env);

pub fn config() -> &'static AppConfig {
    &CONFIG
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
        assert_eq!(config.server.port, 3001);
        assert_eq!(config.database.url, "postgresql:///jobly");
        assert_eq!(config.security.bcrypt_work_factor, 12);
        assert!(config.api.enable_request_logging);
    }

    #[test]
    fn test_default_test_config() {
        let config = AppConfig::test();
        assert_eq!(config.database.url, "postgresql:///jobly_test");
        assert_eq!(config.security.bcrypt_work_factor, 4);
    }

    #[test]
    fn test_default_production_config() {
        let config = AppConfig::production();
        assert!(!config.database.run_migrations);
        assert!(!config.api.enable_request_logging);
        assert_eq!(config.security.jwt_expiry_hours, 24);
    }

    #[test]
    fn secret_key_is_not_serialized() {
        let json = serde_json::to_value(AppConfig::development()).unwrap();
        assert!(json["security"].get("secret_key").is_none());
    }
}

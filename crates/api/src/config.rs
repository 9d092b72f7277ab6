use std::path::PathBuf;

use pactum_storage::{StorageBackendType, StorageSettings};

use crate::auth::jwt::JwtConfig;

/// Server configuration loaded from environment variables.
///
/// All fields except the JWT secret have defaults suitable for local
/// development. In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// JWT token configuration (secret, expiry).
    pub jwt: JwtConfig,
    /// Attachment storage backend.
    pub storage: StorageSettings,
    /// URL prefix attachments are publicly served under.
    pub storage_public_url: String,
    /// Largest accepted request body, uploads included (default: 25 MiB).
    pub max_upload_bytes: usize,
    /// How often the expiration alert sweep runs (default: 1 hour).
    pub alert_sweep_interval_secs: u64,
    /// How far ahead the sweep looks for expiring contracts (default: 30 days).
    pub alert_lookahead_days: i64,
}

/// Default request body limit: 25 MiB.
const DEFAULT_MAX_UPLOAD_BYTES: usize = 25 * 1024 * 1024;

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                     | Default                         |
    /// |-----------------------------|---------------------------------|
    /// | `HOST`                      | `0.0.0.0`                       |
    /// | `PORT`                      | `3000`                          |
    /// | `CORS_ORIGINS`              | `http://localhost:3001`         |
    /// | `REQUEST_TIMEOUT_SECS`      | `30`                            |
    /// | `STORAGE_BACKEND`           | `local`                         |
    /// | `STORAGE_ROOT`              | `./storage`                     |
    /// | `STORAGE_PUBLIC_URL`        | `http://localhost:{PORT}/files` |
    /// | `S3_BUCKET`                 | -- (required for `s3`)          |
    /// | `S3_REGION`                 | SDK default chain               |
    /// | `S3_ENDPOINT`               | AWS                             |
    /// | `MAX_UPLOAD_BYTES`          | `26214400`                      |
    /// | `ALERT_SWEEP_INTERVAL_SECS` | `3600`                          |
    /// | `ALERT_LOOKAHEAD_DAYS`      | `30`                            |
    ///
    /// # Panics
    ///
    /// Panics on unparseable values so misconfiguration fails at startup.
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:3001".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let backend = StorageBackendType::from_name(
            &std::env::var("STORAGE_BACKEND").unwrap_or_else(|_| "local".into()),
        )
        .unwrap_or_else(|e| panic!("{e}"));

        let storage = StorageSettings {
            backend,
            root: PathBuf::from(
                std::env::var("STORAGE_ROOT").unwrap_or_else(|_| "./storage".into()),
            ),
            bucket: non_empty_var("S3_BUCKET"),
            region: non_empty_var("S3_REGION"),
            endpoint: non_empty_var("S3_ENDPOINT"),
        };

        let storage_public_url = std::env::var("STORAGE_PUBLIC_URL")
            .unwrap_or_else(|_| format!("http://localhost:{port}/files"));

        let max_upload_bytes: usize = std::env::var("MAX_UPLOAD_BYTES")
            .unwrap_or_else(|_| DEFAULT_MAX_UPLOAD_BYTES.to_string())
            .parse()
            .expect("MAX_UPLOAD_BYTES must be a valid usize");

        let alert_sweep_interval_secs: u64 = std::env::var("ALERT_SWEEP_INTERVAL_SECS")
            .unwrap_or_else(|_| "3600".into())
            .parse()
            .expect("ALERT_SWEEP_INTERVAL_SECS must be a valid u64");

        let alert_lookahead_days: i64 = std::env::var("ALERT_LOOKAHEAD_DAYS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("ALERT_LOOKAHEAD_DAYS must be a valid i64");

        let jwt = JwtConfig::from_env();

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            jwt,
            storage,
            storage_public_url,
            max_upload_bytes,
            alert_sweep_interval_secs,
            alert_lookahead_days,
        }
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

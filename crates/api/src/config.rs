use crate::auth::jwt::JwtConfig;
use vaxal_core::storage::DEFAULT_MAX_UPLOAD_BYTES;

/// Default lifetime of a presigned upload URL.
const DEFAULT_PRESIGN_EXPIRY_SECS: u64 = 900;

/// Server configuration loaded from environment variables.
///
/// All fields have defaults suitable for local development except the JWT
/// secret. In production, override via environment variables.
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
    /// How long to wait for background tasks after the listener stops.
    pub shutdown_timeout_secs: u64,
    /// Deployment environment name; `production` tightens the cron endpoint.
    pub app_env: String,
    /// Bearer secret for `/api/cron/*`. Optional outside production.
    pub cron_secret: Option<String>,
    /// Run the overdue sweep in-process every N seconds. Disabled when `None`.
    pub overdue_sweep_interval_secs: Option<u64>,
    pub storage: StorageConfig,
    /// JWT token configuration (secret, expiry).
    pub jwt: JwtConfig,
}

/// Object storage settings.
#[derive(Debug, Clone)]
pub struct StorageConfig {
    /// S3 bucket. When unset, uploads go to an in-process store (development only).
    pub bucket: Option<String>,
    /// Lifetime of presigned upload URLs in seconds.
    pub presign_expiry_secs: u64,
    /// Maximum body size accepted by the server-side upload route.
    pub max_upload_bytes: usize,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                        | Default                 |
    /// |--------------------------------|-------------------------|
    /// | `HOST`                         | `0.0.0.0`               |
    /// | `PORT`                         | `3000`                  |
    /// | `CORS_ORIGINS`                 | `http://localhost:3001` |
    /// | `REQUEST_TIMEOUT_SECS`         | `30`                    |
    /// | `SHUTDOWN_TIMEOUT_SECS`        | `10`                    |
    /// | `APP_ENV`                      | `development`           |
    /// | `CRON_SECRET`                  | unset                   |
    /// | `OVERDUE_SWEEP_INTERVAL_SECS`  | unset (disabled)        |
    /// | `S3_BUCKET`                    | unset (in-memory store) |
    /// | `S3_PRESIGN_EXPIRY_SECS`       | `900`                   |
    /// | `MAX_UPLOAD_BYTES`             | `20971520`              |
    ///
    /// # Panics
    ///
    /// Panics on unparseable numbers, and when `APP_ENV=production` but
    /// `CRON_SECRET` is missing.
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());
        let port: u16 = env_parse("PORT", 3000);

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:3001".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let app_env = std::env::var("APP_ENV").unwrap_or_else(|_| "development".into());
        let cron_secret = env_non_empty("CRON_SECRET");
        assert!(
            app_env != "production" || cron_secret.is_some(),
            "CRON_SECRET must be set when APP_ENV=production"
        );

        let overdue_sweep_interval_secs = env_non_empty("OVERDUE_SWEEP_INTERVAL_SECS").map(|v| {
            v.parse()
                .expect("OVERDUE_SWEEP_INTERVAL_SECS must be a valid u64")
        });

        let storage = StorageConfig {
            bucket: env_non_empty("S3_BUCKET"),
            presign_expiry_secs: env_parse("S3_PRESIGN_EXPIRY_SECS", DEFAULT_PRESIGN_EXPIRY_SECS),
            max_upload_bytes: env_parse("MAX_UPLOAD_BYTES", DEFAULT_MAX_UPLOAD_BYTES),
        };

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs: env_parse("REQUEST_TIMEOUT_SECS", 30),
            shutdown_timeout_secs: env_parse("SHUTDOWN_TIMEOUT_SECS", 10),
            app_env,
            cron_secret,
            overdue_sweep_interval_secs,
            storage,
            jwt: JwtConfig::from_env(),
        }
    }

    pub fn is_production(&self) -> bool {
        self.app_env == "production"
    }
}

fn env_non_empty(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn env_parse<T>(key: &str, default: T) -> T
where
    T: std::str::FromStr,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .parse()
            .unwrap_or_else(|_| panic!("{key} must be a valid {}", std::any::type_name::<T>())),
        Err(_) => default,
    }
}

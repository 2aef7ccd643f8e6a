//! Server configuration

/// Allowed CORS origins
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CorsOrigins {
    /// `*`: every origin is allowed
    #[default]
    Any,
    /// Explicit origin list
    List(Vec<String>),
}

impl CorsOrigins {
    /// Parse `*` or a comma-separated origin list; empty means `*`
    pub fn parse(value: &str) -> Self {
        let origins: Vec<String> = value
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(String::from)
            .collect();

        if origins.is_empty() || origins.iter().any(|o| o == "*") {
            Self::Any
        } else {
            Self::List(origins)
        }
    }

    pub fn is_any(&self) -> bool {
        matches!(self, Self::Any)
    }
}

/// Server configuration
///
/// # Environment variables
///
/// | Variable | Default | Meaning |
/// |----------|---------|---------|
/// | DATABASE_PATH | restaurants.db | SQLite file holding the restaurant table |
/// | HTTP_HOST | 0.0.0.0 | Bind address |
/// | HTTP_PORT | 5000 | Bind port |
/// | CORS_ALLOWED_ORIGINS | * | `*` or comma-separated origins |
/// | ENVIRONMENT | development | development / staging / production |
/// | LOG_LEVEL | info | Default log filter when RUST_LOG is unset |
/// | LOG_DIR | (unset) | Directory for daily rolling log files |
#[derive(Debug, Clone)]
pub struct Config {
    /// Path of the SQLite database file
    pub database_path: String,
    pub http_host: String,
    pub http_port: u16,
    pub cors_origins: CorsOrigins,
    /// Runtime environment: development | staging | production
    pub environment: String,
    pub log_level: String,
    pub log_dir: Option<String>,
}

impl Config {
    /// Load configuration from environment variables
    ///
    /// Unset or unparsable values fall back to their defaults.
    pub fn from_env() -> Self {
        Self {
            database_path: std::env::var("DATABASE_PATH")
                .unwrap_or_else(|_| "restaurants.db".into()),
            http_host: std::env::var("HTTP_HOST").unwrap_or_else(|_| "0.0.0.0".into()),
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(5000),
            cors_origins: std::env::var("CORS_ALLOWED_ORIGINS")
                .map(|v| CorsOrigins::parse(&v))
                .unwrap_or_default(),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".into()),
            log_dir: std::env::var("LOG_DIR").ok().filter(|s| !s.is_empty()),
        }
    }

    /// Configuration for a given database file, everything else default
    ///
    /// Used by tests and tools that do not read the environment.
    pub fn with_database(database_path: impl Into<String>) -> Self {
        Self {
            database_path: database_path.into(),
            http_host: "127.0.0.1".into(),
            http_port: 5000,
            cors_origins: CorsOrigins::Any,
            environment: "development".into(),
            log_level: "info".into(),
            log_dir: None,
        }
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.http_host, self.http_port)
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

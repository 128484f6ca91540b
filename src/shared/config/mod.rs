//! Application configuration module
//!
//! Configuration is read once at startup (from the process environment,
//! after `.env` has been loaded) into an immutable [`AppConfig`] that is
//! handed to the server state. Nothing reads the environment afterwards.

use std::net::IpAddr;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

const DEFAULT_PORT: u16 = 5000;
const DEFAULT_DATABASE_URL: &str = "sqlite://skillforge.db?mode=rwc";
const DEFAULT_JWT_EXPIRY: Duration = Duration::from_secs(7 * 24 * 60 * 60);
const MAX_JWT_EXPIRY: Duration = Duration::from_secs(100 * 365 * 24 * 60 * 60);
const DEFAULT_BCRYPT_COST: u32 = 10;
const DEFAULT_MAX_UPLOAD_MB: usize = 50;
const DEFAULT_RATE_LIMIT_MAX: u32 = 100;
const DEFAULT_RATE_LIMIT_WINDOW: Duration = Duration::from_secs(15 * 60);
const DEFAULT_SMTP_PORT: u16 = 587;

/// Credentials for the first-run admin account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminSeed {
    pub email: String,
    pub password: String,
}

/// Fixed-window request cap applied per client address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RateLimitSettings {
    pub max_requests: u32,
    pub window: Duration,
}

impl Default for RateLimitSettings {
    fn default() -> Self {
        Self {
            max_requests: DEFAULT_RATE_LIMIT_MAX,
            window: DEFAULT_RATE_LIMIT_WINDOW,
        }
    }
}

/// Mail relay settings. With `enabled == false` the mailer only logs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailSettings {
    pub enabled: bool,
    pub host: String,
    pub port: u16,
    pub username: Option<String>,
    pub password: Option<String>,
    pub from: String,
    pub app_url: String,
}

impl Default for EmailSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            host: String::new(),
            port: DEFAULT_SMTP_PORT,
            username: None,
            password: None,
            from: "SkillForge <no-reply@skillforge.local>".to_string(),
            app_url: "http://localhost:5000".to_string(),
        }
    }
}

/// Application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Listen port
    pub port: u16,
    /// sqlx connection string
    pub database_url: String,
    /// HMAC secret for session tokens
    pub jwt_secret: String,
    /// Lifetime of a freshly issued session token
    pub jwt_expiry: Duration,
    /// bcrypt work factor
    pub bcrypt_cost: u32,
    /// Seed admin, if configured
    pub admin_seed: Option<AdminSeed>,
    /// Where uploaded handbook files are written
    pub upload_dir: PathBuf,
    /// Landing page and static assets
    pub public_dir: PathBuf,
    /// Largest accepted request body, in bytes
    pub max_upload_bytes: usize,
    pub rate_limit: RateLimitSettings,
    /// Peers whose `X-Forwarded-For` header names the real client
    pub trusted_proxies: Vec<IpAddr>,
    pub email: EmailSettings,
}

impl AppConfig {
    /// Create a new AppConfigBuilder
    pub fn builder() -> AppConfigBuilder {
        AppConfigBuilder::default()
    }

    /// Load configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let mut builder = AppConfig::builder();

        if let Some(port) = get("PORT") {
            builder = builder.port(parse_number("PORT", &port)?);
        }
        if let Some(url) = get("DATABASE_URL") {
            builder = builder.database_url(url);
        }
        if let Some(secret) = get("JWT_SECRET") {
            builder = builder.jwt_secret(secret);
        }
        if let Some(expiry) = get("JWT_EXPIRE") {
            builder = builder.jwt_expiry(parse_duration(&expiry)?);
        }
        if let Some(cost) = get("BCRYPT_COST") {
            builder = builder.bcrypt_cost(parse_number("BCRYPT_COST", &cost)?);
        }
        if let (Some(email), Some(password)) = (get("ADMIN_EMAIL"), get("ADMIN_PASSWORD")) {
            builder = builder.admin_seed(email, password);
        }
        if let Some(dir) = get("UPLOAD_DIR") {
            builder = builder.upload_dir(dir);
        }
        if let Some(dir) = get("PUBLIC_DIR") {
            builder = builder.public_dir(dir);
        }
        if let Some(mb) = get("MAX_UPLOAD_MB") {
            let mb: usize = parse_number("MAX_UPLOAD_MB", &mb)?;
            let bytes = mb.checked_mul(1024 * 1024).ok_or_else(|| ConfigError::InvalidValue {
                key: "MAX_UPLOAD_MB",
                message: format!("{} MB does not fit in memory", mb),
            })?;
            builder = builder.max_upload_bytes(bytes);
        }
        if let Some(proxies) = get("TRUSTED_PROXIES") {
            builder = builder.trusted_proxies(parse_proxies(&proxies)?);
        }

        let mut rate_limit = RateLimitSettings::default();
        if let Some(max) = get("RATE_LIMIT_MAX") {
            rate_limit.max_requests = parse_number("RATE_LIMIT_MAX", &max)?;
        }
        if let Some(secs) = get("RATE_LIMIT_WINDOW_SECS") {
            rate_limit.window = Duration::from_secs(parse_number("RATE_LIMIT_WINDOW_SECS", &secs)?);
        }
        builder = builder.rate_limit(rate_limit);

        let defaults = EmailSettings::default();
        let email = EmailSettings {
            enabled: get("EMAIL_ENABLED").map(|v| v != "false").unwrap_or(true)
                && get("EMAIL_HOST").is_some(),
            host: get("EMAIL_HOST").unwrap_or_default(),
            port: match get("EMAIL_PORT") {
                Some(port) => parse_number("EMAIL_PORT", &port)?,
                None => defaults.port,
            },
            username: get("EMAIL_USER"),
            password: get("EMAIL_PASSWORD"),
            from: get("EMAIL_FROM").unwrap_or(defaults.from),
            app_url: get("APP_URL").unwrap_or(defaults.app_url),
        };
        builder = builder.email(email);

        builder.build()
    }
}

/// Builder for AppConfig
#[derive(Debug, Default)]
pub struct AppConfigBuilder {
    port: Option<u16>,
    database_url: Option<String>,
    jwt_secret: Option<String>,
    jwt_expiry: Option<Duration>,
    bcrypt_cost: Option<u32>,
    admin_seed: Option<AdminSeed>,
    upload_dir: Option<PathBuf>,
    public_dir: Option<PathBuf>,
    max_upload_bytes: Option<usize>,
    rate_limit: Option<RateLimitSettings>,
    trusted_proxies: Vec<IpAddr>,
    email: Option<EmailSettings>,
}

impl AppConfigBuilder {
    pub fn port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }

    pub fn database_url(mut self, url: impl Into<String>) -> Self {
        self.database_url = Some(url.into());
        self
    }

    pub fn jwt_secret(mut self, secret: impl Into<String>) -> Self {
        self.jwt_secret = Some(secret.into());
        self
    }

    pub fn jwt_expiry(mut self, expiry: Duration) -> Self {
        self.jwt_expiry = Some(expiry);
        self
    }

    pub fn bcrypt_cost(mut self, cost: u32) -> Self {
        self.bcrypt_cost = Some(cost);
        self
    }

    pub fn admin_seed(mut self, email: impl Into<String>, password: impl Into<String>) -> Self {
        self.admin_seed = Some(AdminSeed {
            email: email.into(),
            password: password.into(),
        });
        self
    }

    pub fn upload_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.upload_dir = Some(dir.into());
        self
    }

    pub fn public_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.public_dir = Some(dir.into());
        self
    }

    pub fn max_upload_bytes(mut self, bytes: usize) -> Self {
        self.max_upload_bytes = Some(bytes);
        self
    }

    pub fn rate_limit(mut self, settings: RateLimitSettings) -> Self {
        self.rate_limit = Some(settings);
        self
    }

    pub fn trusted_proxies(mut self, proxies: impl IntoIterator<Item = IpAddr>) -> Self {
        self.trusted_proxies = proxies.into_iter().collect();
        self
    }

    pub fn email(mut self, settings: EmailSettings) -> Self {
        self.email = Some(settings);
        self
    }

    /// Build the configuration
    pub fn build(self) -> Result<AppConfig, ConfigError> {
        let jwt_secret = self.jwt_secret.ok_or(ConfigError::MissingValue("JWT_SECRET"))?;
        if jwt_secret.trim().is_empty() {
            return Err(ConfigError::MissingValue("JWT_SECRET"));
        }

        let jwt_expiry = self.jwt_expiry.unwrap_or(DEFAULT_JWT_EXPIRY);
        if jwt_expiry.is_zero() || jwt_expiry > MAX_JWT_EXPIRY {
            return Err(ConfigError::InvalidValue {
                key: "JWT_EXPIRE",
                message: "expiry must be positive and at most 100 years".to_string(),
            });
        }

        let bcrypt_cost = self.bcrypt_cost.unwrap_or(DEFAULT_BCRYPT_COST);
        if !(4..=31).contains(&bcrypt_cost) {
            return Err(ConfigError::InvalidValue {
                key: "BCRYPT_COST",
                message: format!("cost {} outside 4..=31", bcrypt_cost),
            });
        }

        let rate_limit = self.rate_limit.unwrap_or_default();
        if rate_limit.max_requests == 0 || rate_limit.window.is_zero() {
            return Err(ConfigError::InvalidValue {
                key: "RATE_LIMIT_MAX",
                message: "rate limit and window must be positive".to_string(),
            });
        }

        Ok(AppConfig {
            port: self.port.unwrap_or(DEFAULT_PORT),
            database_url: self
                .database_url
                .unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string()),
            jwt_secret,
            jwt_expiry,
            bcrypt_cost,
            admin_seed: self.admin_seed,
            upload_dir: self.upload_dir.unwrap_or_else(|| PathBuf::from("uploads")),
            public_dir: self.public_dir.unwrap_or_else(|| PathBuf::from("public")),
            max_upload_bytes: self
                .max_upload_bytes
                .unwrap_or(DEFAULT_MAX_UPLOAD_MB * 1024 * 1024),
            rate_limit,
            trusted_proxies: self.trusted_proxies,
            email: self.email.unwrap_or_default(),
        })
    }
}

/// Parse an expiry window such as `7d`, `12h`, `30m`, `45s` or bare seconds.
pub fn parse_duration(raw: &str) -> Result<Duration, ConfigError> {
    let raw = raw.trim();
    let invalid = || ConfigError::InvalidValue {
        key: "JWT_EXPIRE",
        message: format!("cannot parse duration '{}'", raw),
    };

    let split = raw
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(raw.len());
    let (digits, unit) = raw.split_at(split);
    let amount: u64 = digits.parse().map_err(|_| invalid())?;

    let scale: u64 = match unit.trim() {
        "" | "s" => 1,
        "m" => 60,
        "h" => 60 * 60,
        "d" => 24 * 60 * 60,
        "w" => 7 * 24 * 60 * 60,
        _ => return Err(invalid()),
    };
    let seconds = amount.checked_mul(scale).ok_or_else(invalid)?;
    Ok(Duration::from_secs(seconds))
}

/// Comma separated proxy addresses, e.g. `10.0.0.2, ::1`.
fn parse_proxies(raw: &str) -> Result<Vec<IpAddr>, ConfigError> {
    raw.split(',')
        .map(str::trim)
        .filter(|ip| !ip.is_empty())
        .map(|ip| {
            ip.parse().map_err(|_| ConfigError::InvalidValue {
                key: "TRUSTED_PROXIES",
                message: format!("'{}' is not an IP address", ip),
            })
        })
        .collect()
}

fn parse_number<T: std::str::FromStr>(key: &'static str, raw: &str) -> Result<T, ConfigError> {
    raw.parse().map_err(|_| ConfigError::InvalidValue {
        key,
        message: format!("'{}' is not a valid number", raw),
    })
}

/// Configuration errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("missing value: {0}")]
    MissingValue(&'static str),
    #[error("invalid value for {key}: {message}")]
    InvalidValue { key: &'static str, message: String },
}

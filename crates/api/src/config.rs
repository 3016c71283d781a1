use std::time::Duration;

use waffle_core::retry::{RetryPolicy, DEFAULT_BACKOFF, DEFAULT_DEADLINE, DEFAULT_MAX_ATTEMPTS};
use waffle_source::api::DEFAULT_API_URL;

/// Headroom between the `/random` acquisition budget and the HTTP request
/// timeout, so the handler answers before the timeout layer does.
const ON_DEMAND_MARGIN: Duration = Duration::from_secs(1);

/// Server configuration loaded from environment variables.
///
/// All fields have defaults suitable for local development. In production,
/// override via environment variables.
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
    /// How long shutdown waits for background tasks, in seconds (default: `10`).
    pub shutdown_timeout_secs: u64,
    /// PostgreSQL URL. `None` runs against the in-memory store.
    pub database_url: Option<String>,
    /// Connection pool size (default: `20`).
    pub database_max_connections: u32,
    /// External puzzle source settings.
    pub source: SourceConfig,
    /// Daily refresh scheduling.
    pub daily: DailyRefreshConfig,
}

/// Settings for the external puzzle generator and the retry loop around it.
#[derive(Debug, Clone)]
pub struct SourceConfig {
    pub api_url: String,
    pub request_timeout_secs: u64,
    pub backoff_secs: u64,
    /// `0` disables the attempt cap.
    pub max_attempts: u32,
    /// `0` disables the overall deadline.
    pub deadline_secs: u64,
}

/// Settings for the midnight refresh task.
#[derive(Debug, Clone, Copy)]
pub struct DailyRefreshConfig {
    pub enabled: bool,
    /// Run once at startup when today's daily boards are missing.
    pub run_on_startup: bool,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                       | Default                                    |
    /// |-------------------------------|--------------------------------------------|
    /// | `HOST`                        | `0.0.0.0`                                  |
    /// | `PORT`                        | `3000`                                     |
    /// | `CORS_ORIGINS`                | `http://localhost:5173`                    |
    /// | `REQUEST_TIMEOUT_SECS`        | `30`                                       |
    /// | `SHUTDOWN_TIMEOUT_SECS`       | `10`                                       |
    /// | `DATABASE_URL`                | unset (in-memory store)                    |
    /// | `DATABASE_MAX_CONNECTIONS`    | `20`                                       |
    /// | `PUZZLE_API_URL`              | `https://sudoku-api.vercel.app/api/dosuku` |
    /// | `SOURCE_REQUEST_TIMEOUT_SECS` | `10`                                       |
    /// | `SOURCE_BACKOFF_SECS`         | `3`                                        |
    /// | `SOURCE_MAX_ATTEMPTS`         | `40`                                       |
    /// | `SOURCE_DEADLINE_SECS`        | `300`                                      |
    /// | `DAILY_REFRESH_ENABLED`       | `true`                                     |
    /// | `DAILY_REFRESH_ON_STARTUP`    | `true`                                     |
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup.
    ///
    /// Panics on unparsable values, and when `REQUEST_TIMEOUT_SECS` leaves no
    /// room for a single source call plus [`ON_DEMAND_MARGIN`], so
    /// misconfiguration fails at startup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let var = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let cors_origins: Vec<String> = var("CORS_ORIGINS", "http://localhost:5173")
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let database_url = lookup("DATABASE_URL").filter(|url| !url.trim().is_empty());

        let source = SourceConfig {
            api_url: var("PUZZLE_API_URL", DEFAULT_API_URL),
            request_timeout_secs: parse(&var, "SOURCE_REQUEST_TIMEOUT_SECS", "10"),
            backoff_secs: parse(&var, "SOURCE_BACKOFF_SECS", &DEFAULT_BACKOFF.as_secs().to_string()),
            max_attempts: parse(&var, "SOURCE_MAX_ATTEMPTS", &DEFAULT_MAX_ATTEMPTS.to_string()),
            deadline_secs: parse(&var, "SOURCE_DEADLINE_SECS", &DEFAULT_DEADLINE.as_secs().to_string()),
        };

        let daily = DailyRefreshConfig {
            enabled: parse_bool(&var, "DAILY_REFRESH_ENABLED", true),
            run_on_startup: parse_bool(&var, "DAILY_REFRESH_ON_STARTUP", true),
        };

        let config = Self {
            host: var("HOST", "0.0.0.0"),
            port: parse(&var, "PORT", "3000"),
            cors_origins,
            request_timeout_secs: parse(&var, "REQUEST_TIMEOUT_SECS", "30"),
            shutdown_timeout_secs: parse(&var, "SHUTDOWN_TIMEOUT_SECS", "10"),
            database_url,
            database_max_connections: parse(&var, "DATABASE_MAX_CONNECTIONS", "20"),
            source,
            daily,
        };

        if config.request_timeout() <= config.source.request_timeout() + ON_DEMAND_MARGIN {
            panic!(
                "REQUEST_TIMEOUT_SECS ({}) must exceed SOURCE_REQUEST_TIMEOUT_SECS ({}) by more than {}s",
                config.request_timeout_secs,
                config.source.request_timeout_secs,
                ON_DEMAND_MARGIN.as_secs()
            );
        }

        config
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn shutdown_timeout(&self) -> Duration {
        Duration::from_secs(self.shutdown_timeout_secs)
    }

    /// How long `GET /random` may spend acquiring a board before it gives up
    /// with a 500. Always shorter than the request timeout.
    pub fn on_demand_budget(&self) -> Duration {
        self.request_timeout().saturating_sub(ON_DEMAND_MARGIN)
    }

    /// Retry policy for `GET /random`.
    ///
    /// The deadline is tightened so the last attempt, including its HTTP
    /// timeout, still finishes inside [`Self::on_demand_budget`]. The daily
    /// refresh keeps the full [`SourceConfig::retry_policy`].
    pub fn on_demand_policy(&self) -> RetryPolicy {
        let limit = self
            .on_demand_budget()
            .saturating_sub(self.source.request_timeout());
        self.source.retry_policy().within(limit)
    }
}

impl SourceConfig {
    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::from_settings(self.backoff_secs, self.max_attempts, self.deadline_secs)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

fn parse<T>(var: &impl Fn(&str, &str) -> String, key: &str, default: &str) -> T
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    let raw = var(key, default);
    raw.trim()
        .parse()
        .unwrap_or_else(|e| panic!("{key} must be a valid {}: {e}", std::any::type_name::<T>()))
}

fn parse_bool(var: &impl Fn(&str, &str) -> String, key: &str, default: bool) -> bool {
    match var(key, if default { "true" } else { "false" })
        .trim()
        .to_ascii_lowercase()
        .as_str()
    {
        "1" | "true" | "yes" | "on" => true,
        "0" | "false" | "no" | "off" => false,
        other => panic!("{key} must be a boolean, got '{other}'"),
    }
}

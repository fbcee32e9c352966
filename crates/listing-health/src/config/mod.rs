use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;

/// Deployment stage, read from `APP_ENV`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Everything the binary needs to come up, resolved from the process
/// environment with development defaults. A `.env` file is honored when
/// present but never required.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    pub audit: AuditConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        Ok(Self {
            environment: AppEnvironment::parse(&env_or("APP_ENV", "development")),
            server: ServerConfig {
                host: env_or("APP_HOST", "127.0.0.1"),
                port: parse_env("APP_PORT", 3000)?,
            },
            telemetry: TelemetryConfig {
                log_level: env_or("APP_LOG_LEVEL", "info"),
            },
            audit: AuditConfig {
                run_cost: parse_env("AUDIT_RUN_COST", 1)?,
                insight_history_limit: parse_env("AUDIT_INSIGHT_LIMIT", 12)?,
            },
        })
    }
}

fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn parse_env<T: FromStr>(key: &'static str, default: T) -> Result<T, ConfigError> {
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidNumber { key }),
        Err(_) => Ok(default),
    }
}

/// Where the HTTP listener binds.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    /// Resolves host and port, treating `localhost` as loopback.
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        let ip: IpAddr = if self.host.eq_ignore_ascii_case("localhost") {
            IpAddr::from([127, 0, 0, 1])
        } else {
            self.host
                .parse()
                .map_err(|source| ConfigError::InvalidHost { source })?
        };

        Ok(SocketAddr::new(ip, self.port))
    }
}

/// Log filtering for the tracing subscriber.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

/// Knobs for the audit orchestrator.
#[derive(Debug, Clone)]
pub struct AuditConfig {
    /// Credits required before an audit run is admitted.
    pub run_cost: u32,
    /// Maximum number of historical runs returned by insight queries.
    pub insight_history_limit: usize,
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            run_cost: 1,
            insight_history_limit: 12,
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidNumber { key: &'static str },
    InvalidHost { source: std::net::AddrParseError },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidNumber { key } => write!(f, "{key} must be a valid number"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must be an IP address or 'localhost'")
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidNumber { .. } => None,
            ConfigError::InvalidHost { source } => Some(source),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::{Mutex, OnceLock};

    // Process environment is shared; serialize the tests that touch it.
    fn env_guard() -> &'static Mutex<()> {
        static GUARD: OnceLock<Mutex<()>> = OnceLock::new();
        GUARD.get_or_init(|| Mutex::new(()))
    }

    fn reset_env() {
        for key in [
            "APP_ENV",
            "APP_HOST",
            "APP_PORT",
            "APP_LOG_LEVEL",
            "AUDIT_RUN_COST",
            "AUDIT_INSIGHT_LIMIT",
        ] {
            env::remove_var(key);
        }
    }

    #[test]
    fn load_falls_back_to_development_defaults() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();

        let config = AppConfig::load().expect("defaults load");
        assert_eq!(config.environment, AppEnvironment::Development);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.telemetry.log_level, "info");
        assert_eq!(config.audit.run_cost, 1);
        assert_eq!(config.audit.insight_history_limit, 12);
    }

    #[test]
    fn environment_names_map_to_stages() {
        assert_eq!(AppEnvironment::parse("production"), AppEnvironment::Production);
        assert_eq!(AppEnvironment::parse("PROD"), AppEnvironment::Production);
        assert_eq!(AppEnvironment::parse("ci"), AppEnvironment::Test);
        assert_eq!(AppEnvironment::parse("anything-else"), AppEnvironment::Development);
    }

    #[test]
    fn localhost_binds_to_loopback() {
        let server = ServerConfig {
            host: "LocalHost".to_string(),
            port: 8080,
        };
        let addr = server.socket_addr().expect("localhost resolves");
        assert_eq!(addr, SocketAddr::new(IpAddr::from([127, 0, 0, 1]), 8080));
    }

    #[test]
    fn unparseable_host_is_rejected() {
        let server = ServerConfig {
            host: "not-an-address".to_string(),
            port: 8080,
        };
        let error = server.socket_addr().expect_err("host must not parse");
        assert!(matches!(error, ConfigError::InvalidHost { .. }));
    }

    #[test]
    fn load_reads_audit_overrides() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("AUDIT_RUN_COST", "5");
        env::set_var("AUDIT_INSIGHT_LIMIT", "24");

        let config = AppConfig::load().expect("config loads");
        assert_eq!(config.audit.run_cost, 5);
        assert_eq!(config.audit.insight_history_limit, 24);
        reset_env();
    }

    #[test]
    fn load_rejects_malformed_numbers() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("AUDIT_RUN_COST", "plenty");

        let error = AppConfig::load().expect_err("expected config error");
        assert!(matches!(
            error,
            ConfigError::InvalidNumber {
                key: "AUDIT_RUN_COST"
            }
        ));
        reset_env();
    }
}

use std::{net::SocketAddr, str::FromStr, time::Duration};

use anyhow::Context;
use coinlens_market_data::{FetchConfig, RetryPolicy, DEFAULT_BASE_URL};

pub struct Config {
    pub listen_addr: SocketAddr,
    pub cors_allow: Vec<String>,
    pub request_timeout: Duration,
    pub fetch: FetchConfig,
}

/// Read `key`, falling back to `default` when unset or unparseable.
fn env_or<T: FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        let listen_addr: SocketAddr = std::env::var("CL_LISTEN_ADDR")
            .unwrap_or_else(|_| "0.0.0.0:8080".to_string())
            .parse()
            .context("Invalid CL_LISTEN_ADDR")?;
        let cors_allow = std::env::var("CL_CORS_ALLOW_ORIGINS")
            .unwrap_or_else(|_| "*".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        let timeout_ms: u64 = env_or("CL_REQUEST_TIMEOUT_MS", 60_000);

        let defaults = FetchConfig::default();
        let retry = RetryPolicy {
            max_retries: env_or("CL_MAX_RETRIES", defaults.retry.max_retries),
            backoff_factor: env_or("CL_BACKOFF_FACTOR", defaults.retry.backoff_factor),
            ..defaults.retry.clone()
        };
        let fetch = FetchConfig {
            base_url: std::env::var("CL_API_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.into()),
            per_page: env_or("CL_PER_PAGE", defaults.per_page),
            request_timeout: Duration::from_millis(env_or(
                "CL_UPSTREAM_TIMEOUT_MS",
                defaults.request_timeout.as_millis() as u64,
            )),
            request_pause: Duration::from_millis(env_or(
                "CL_REQUEST_PAUSE_MS",
                defaults.request_pause.as_millis() as u64,
            )),
            deadline: Duration::from_millis(env_or(
                "CL_FETCH_DEADLINE_MS",
                defaults.deadline.as_millis() as u64,
            )),
            retry,
        };

        Ok(Self {
            listen_addr,
            cors_allow,
            request_timeout: Duration::from_millis(timeout_ms),
            fetch,
        })
    }

    /// Fetch settings with the deadline capped at three quarters of the
    /// request timeout.
    pub fn fetch_config(&self) -> FetchConfig {
        let budget = self.request_timeout.mul_f64(0.75);
        FetchConfig {
            deadline: self.fetch.deadline.min(budget),
            ..self.fetch.clone()
        }
    }
}

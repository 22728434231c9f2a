use std::env;
use std::time::Duration;
use anyhow::{bail, Context, Result};

#[derive(Debug, Clone)]
pub struct Config {
    pub redis_host: String,
    pub redis_port: u16,
    pub redis_password: Option<String>,
    pub redis_timeout: Duration,
    pub service_port: u16,
    pub service_host: String,
    pub health_check_interval: Option<Duration>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let redis_host = env::var("REDIS_HOST")
            .unwrap_or_else(|_| "redis".to_string());

        let redis_port = env::var("REDIS_PORT")
            .unwrap_or_else(|_| "6379".to_string())
            .parse::<u16>()
            .context("REDIS_PORT must be a valid port number (0-65535)")?;

        // An empty password is treated the same as no password
        let redis_password = env::var("REDIS_PASSWORD")
            .ok()
            .filter(|p| !p.is_empty());

        let timeout_ms = env::var("REDIS_TIMEOUT_MS")
            .unwrap_or_else(|_| "1000".to_string())
            .parse::<u64>()
            .context("REDIS_TIMEOUT_MS must be a whole number of milliseconds")?;
        if timeout_ms == 0 {
            bail!("REDIS_TIMEOUT_MS must be greater than zero");
        }

        let service_port = env::var("SERVICE_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .context("SERVICE_PORT must be a valid port number (0-65535)")?;

        let service_host = env::var("SERVICE_HOST")
            .unwrap_or_else(|_| "0.0.0.0".to_string());

        let interval_secs = env::var("HEALTH_CHECK_INTERVAL_SECS")
            .unwrap_or_else(|_| "30".to_string())
            .parse::<u64>()
            .context("HEALTH_CHECK_INTERVAL_SECS must be a whole number of seconds")?;
        let health_check_interval = (interval_secs > 0).then(|| Duration::from_secs(interval_secs));

        Ok(Config {
            redis_host,
            redis_port,
            redis_password,
            redis_timeout: Duration::from_millis(timeout_ms),
            service_port,
            service_host,
            health_check_interval,
        })
    }

    pub fn log_startup(&self) {
        tracing::info!("Configuration loaded:");
        tracing::info!("  Redis: {}:{}", self.redis_host, self.redis_port);
        tracing::info!("  Redis auth: {}",
            if self.redis_password.is_some() { "password" } else { "none" });
        tracing::info!("  Redis timeout: {:?}", self.redis_timeout);
        match self.health_check_interval {
            Some(interval) => tracing::info!("  Health watcher interval: {:?}", interval),
            None => tracing::info!("  Health watcher: disabled"),
        }
        tracing::info!("  Service listening on: {}:{}", self.service_host, self.service_port);
    }
}

//! Benchmark settings. Every value has a built-in default matching the
//! constants the drivers were written against; a YAML file or a handful of
//! environment variables may override them.

use serde::{Deserialize, Serialize};
use std::env;
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::{BenchError, Result};

pub const CONFIG_ENV: &str = "TXBENCH_CONFIG";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct BenchConfig {
    pub target: TargetConfig,
    pub fixed_count: FixedCountConfig,
    pub fixed_rate: FixedRateConfig,
    pub drain: DrainConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TargetConfig {
    /// Node RPC root, e.g. `http://localhost:26657`.
    pub base_url: String,
}

impl Default for TargetConfig {
    fn default() -> Self {
        Self { base_url: "http://localhost:26657".into() }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct FixedCountConfig {
    pub total_requests: u64,
    /// Number of concurrent workers; `None` means five per available core.
    pub chunks: Option<usize>,
    pub log_step: u64,
}

impl Default for FixedCountConfig {
    fn default() -> Self {
        Self { total_requests: 50_000, chunks: None, log_step: 1000 }
    }
}

impl FixedCountConfig {
    pub fn worker_chunks(&self) -> usize {
        self.chunks.unwrap_or_else(default_chunks)
    }
}

pub fn default_chunks() -> usize {
    let cores = std::thread::available_parallelism().map(NonZeroUsize::get).unwrap_or(1);
    5 * cores
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct FixedRateConfig {
    /// Submissions per second.
    pub target_rate: u64,
    pub timeout_secs: u64,
}

impl Default for FixedRateConfig {
    fn default() -> Self {
        Self { target_rate: 4000, timeout_secs: 10 * 60 * 60 }
    }
}

impl FixedRateConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct DrainConfig {
    pub initial_delay_ms: u64,
    pub poll_interval_ms: u64,
}

impl Default for DrainConfig {
    fn default() -> Self {
        Self { initial_delay_ms: 50, poll_interval_ms: 50 }
    }
}

impl DrainConfig {
    pub fn initial_delay(&self) -> Duration {
        Duration::from_millis(self.initial_delay_ms)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }
}

impl BenchConfig {
    /// Reads `path` (or the file named by `TXBENCH_CONFIG`) when given,
    /// otherwise applies `TXBENCH_*` environment overrides to the defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = path
            .map(Path::to_path_buf)
            .or_else(|| env::var_os(CONFIG_ENV).map(PathBuf::from));
        let cfg = match path {
            Some(path) => {
                let text = std::fs::read_to_string(&path)
                    .map_err(|source| BenchError::ConfigIo { path: path.clone(), source })?;
                Self::from_yaml(&text)?
            }
            None => Self::default().with_overrides(|key| env::var(key).ok()),
        };
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn from_yaml(text: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(text)?)
    }

    /// Unparseable values are ignored and the previous setting kept.
    pub fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(url) = lookup("TXBENCH_BASE_URL") { self.target.base_url = url; }
        if let Some(v) = lookup("TXBENCH_TOTAL_REQUESTS").and_then(|v| v.parse().ok()) { self.fixed_count.total_requests = v; }
        if let Some(v) = lookup("TXBENCH_CHUNKS").and_then(|v| v.parse().ok()) { self.fixed_count.chunks = Some(v); }
        if let Some(v) = lookup("TXBENCH_TARGET_RATE").and_then(|v| v.parse().ok()) { self.fixed_rate.target_rate = v; }
        if let Some(v) = lookup("TXBENCH_TIMEOUT_SECS").and_then(|v| v.parse().ok()) { self.fixed_rate.timeout_secs = v; }
        self
    }

    pub fn validate(&self) -> Result<()> {
        let url = &self.target.base_url;
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(BenchError::InvalidConfig(format!("base_url must be http(s), got {url:?}")));
        }
        if self.fixed_count.chunks == Some(0) {
            return Err(BenchError::InvalidConfig("chunks must be positive".into()));
        }
        if self.fixed_count.log_step == 0 {
            return Err(BenchError::InvalidConfig("log_step must be positive".into()));
        }
        if self.fixed_rate.target_rate == 0 {
            return Err(BenchError::InvalidConfig("target_rate must be positive".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn defaults_match_reference_constants() {
        let cfg = BenchConfig::default();
        assert_eq!(cfg.target.base_url, "http://localhost:26657");
        assert_eq!(cfg.fixed_count.total_requests, 50_000);
        assert_eq!(cfg.fixed_count.log_step, 1000);
        assert_eq!(cfg.fixed_rate.target_rate, 4000);
        assert_eq!(cfg.fixed_rate.timeout(), Duration::from_secs(36_000));
        assert_eq!(cfg.drain.initial_delay(), Duration::from_millis(50));
        assert_eq!(cfg.drain.poll_interval(), Duration::from_millis(50));
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn default_worker_count_scales_with_cores() {
        let cfg = FixedCountConfig::default();
        let n = cfg.worker_chunks();
        assert!(n >= 5);
        assert_eq!(n % 5, 0);
    }

    #[test]
    fn partial_yaml_keeps_other_defaults() {
        let cfg = BenchConfig::from_yaml("fixed_rate:\n  target_rate: 250\nfixed_count:\n  chunks: 20\n").unwrap();
        assert_eq!(cfg.fixed_rate.target_rate, 250);
        assert_eq!(cfg.fixed_rate.timeout_secs, 36_000);
        assert_eq!(cfg.fixed_count.worker_chunks(), 20);
        assert_eq!(cfg.fixed_count.total_requests, 50_000);
    }

    #[test]
    fn env_overrides_apply_and_ignore_garbage() {
        let vars: HashMap<&str, &str> = [
            ("TXBENCH_BASE_URL", "http://10.0.0.1:26657"),
            ("TXBENCH_TOTAL_REQUESTS", "1200"),
            ("TXBENCH_TARGET_RATE", "fast"),
        ]
        .into_iter()
        .collect();
        let cfg = BenchConfig::default().with_overrides(|k| vars.get(k).map(|v| v.to_string()));
        assert_eq!(cfg.target.base_url, "http://10.0.0.1:26657");
        assert_eq!(cfg.fixed_count.total_requests, 1200);
        assert_eq!(cfg.fixed_rate.target_rate, 4000);
    }

    #[test]
    fn validate_rejects_zero_rate_and_chunks() {
        let mut cfg = BenchConfig::default();
        cfg.fixed_rate.target_rate = 0;
        assert!(matches!(cfg.validate(), Err(BenchError::InvalidConfig(_))));

        let mut cfg = BenchConfig::default();
        cfg.fixed_count.chunks = Some(0);
        assert!(cfg.validate().is_err());

        let mut cfg = BenchConfig::default();
        cfg.target.base_url = "localhost:26657".into();
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn missing_file_is_config_io_error() {
        let err = BenchConfig::load(Some(Path::new("/nonexistent/txbench.yaml"))).unwrap_err();
        assert!(matches!(err, BenchError::ConfigIo { .. }));
    }
}

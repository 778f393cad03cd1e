//! CLI configuration read from the environment.
use std::env;
use std::path::PathBuf;
use std::time::Duration;

use overload_runtime::RuntimeConfig;

/// Terminal driver configuration.
#[derive(Clone, Debug)]
pub struct CliConfig {
    /// Content directory. `None` means the platform data directory if it
    /// holds content, otherwise the embedded copies.
    pub content_dir: Option<PathBuf>,
    /// Regeneration tick period; `None` disables passive regeneration.
    pub regen_interval: Option<Duration>,
    /// Also write logs to `overload.log` in this directory.
    pub log_dir: Option<PathBuf>,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            content_dir: None,
            regen_interval: Some(RuntimeConfig::DEFAULT_REGEN_INTERVAL),
            log_dir: None,
        }
    }
}

impl CliConfig {
    /// Construct CLI configuration from environment variables.
    ///
    /// Environment variables:
    /// - `OVERLOAD_CONTENT_DIR` - Directory with `config.toml`, `actions/`, etc.
    /// - `OVERLOAD_REGEN_MS` - Regeneration tick in milliseconds, `0` disables (default: 100)
    /// - `OVERLOAD_LOG_DIR` - Directory for a log file in addition to stderr
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(dir) = read_env::<PathBuf>("OVERLOAD_CONTENT_DIR") {
            config.content_dir = Some(dir);
        } else {
            config.content_dir = platform_content_dir();
        }

        if let Some(ms) = read_env::<u64>("OVERLOAD_REGEN_MS") {
            config.regen_interval = regen_interval_from_millis(ms);
        }

        config.log_dir = read_env::<PathBuf>("OVERLOAD_LOG_DIR");

        config
    }

    pub fn runtime_config(&self) -> RuntimeConfig {
        RuntimeConfig {
            regen_interval: self.regen_interval,
            ..RuntimeConfig::default()
        }
    }
}

fn regen_interval_from_millis(ms: u64) -> Option<Duration> {
    (ms > 0).then(|| Duration::from_millis(ms))
}

/// `<data dir>/overload/content` when it exists.
fn platform_content_dir() -> Option<PathBuf> {
    directories::ProjectDirs::from("", "", "overload")
        .map(|dirs| dirs.data_dir().join("content"))
        .filter(|dir| dir.is_dir())
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_millis_disables_regeneration() {
        assert_eq!(regen_interval_from_millis(0), None);
        assert_eq!(
            regen_interval_from_millis(250),
            Some(Duration::from_millis(250))
        );
    }

    #[test]
    fn default_keeps_runtime_tick() {
        let config = CliConfig::default();
        assert_eq!(
            config.runtime_config().regen_interval,
            Some(RuntimeConfig::DEFAULT_REGEN_INTERVAL)
        );
    }
}

use std::path::PathBuf;
use std::time::Duration;

use crate::sysfs::apex;

/// Overrides the class directory scanned for devices.
pub const SYSFS_PATH_ENV: &str = "APEX_SYSFS_PATH";
/// Overrides the refresh interval, in milliseconds.
pub const REFRESH_INTERVAL_ENV: &str = "APEX_REFRESH_INTERVAL_MS";

pub const DEFAULT_REFRESH_INTERVAL: Duration = Duration::from_secs(1);

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Config {
    pub base_path: PathBuf,
    pub interval: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_path: PathBuf::from(apex::CLASS_PATH),
            interval: DEFAULT_REFRESH_INTERVAL,
        }
    }
}

impl Config {
    /// Builds a config from the environment, falling back to defaults for
    /// unset or invalid values.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Config::default();

        if let Some(path) = lookup(SYSFS_PATH_ENV).filter(|s| !s.trim().is_empty()) {
            config.base_path = PathBuf::from(path);
        }

        match lookup(REFRESH_INTERVAL_ENV).map(|s| s.trim().parse::<u64>()) {
            // a zero period would make the ticker panic
            Some(Ok(ms)) if ms > 0 => config.interval = Duration::from_millis(ms),
            Some(_) => {
                tracing::warn!(
                    var = REFRESH_INTERVAL_ENV,
                    "invalid refresh interval, using the default"
                );
            }
            None => {}
        }

        config
    }
}

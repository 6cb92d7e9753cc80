use std::path::PathBuf;
use std::time::Duration;

use crate::schedule::DEFAULT_TICK_INTERVAL;

const APP_DIR: &str = "totp-tui";

pub struct AppConfig {
    pub store_path: PathBuf,
    pub log_path: PathBuf,
    pub tick_interval: Duration,
    pub toast_duration: Duration,
    pub message_duration: Duration,
    pub clipboard_timeout: Duration,
}

impl Default for AppConfig {
    fn default() -> Self {
        let store_path = dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(APP_DIR)
            .join("secret");

        let log_path = dirs::cache_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(APP_DIR)
            .join("totp-tui.log");

        Self {
            store_path,
            log_path,
            tick_interval: DEFAULT_TICK_INTERVAL,
            toast_duration: Duration::from_millis(1500),
            message_duration: Duration::from_secs(5),
            clipboard_timeout: Duration::from_secs(15),
        }
    }
}

impl AppConfig {
    /// Apply command line arguments (program name excluded)
    pub fn with_args(mut self, args: &[String]) -> Self {
        if let Some(path) = args.first() {
            self.store_path = PathBuf::from(path);
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.tick_interval, Duration::from_millis(100));
        assert_eq!(config.toast_duration, Duration::from_millis(1500));
        assert!(config.store_path.ends_with("totp-tui/secret"));
    }

    #[test]
    fn test_store_path_argument() {
        let config = AppConfig::default().with_args(&["/tmp/other".to_string()]);
        assert_eq!(config.store_path, PathBuf::from("/tmp/other"));

        let config = AppConfig::default().with_args(&[]);
        assert!(config.store_path.ends_with("totp-tui/secret"));
    }
}

//! Resolved runtime configuration.

use std::path::PathBuf;
use std::time::Duration;

use crate::bridge::{resolve_executable, AdbBridge, Platform, HOME_SHELL_PACKAGE};
use crate::keys::DEFAULT_EXIT_KEY;
use crate::monitor::{ConnectionMonitor, DEFAULT_POLL_INTERVAL};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub bridge: PathBuf,
    pub exit_key: char,
    pub poll_interval: Duration,
    pub shell_package: String,
}

impl AppConfig {
    /// Defaults around an explicit bridge executable.
    pub fn with_bridge(bridge: impl Into<PathBuf>) -> Self {
        Self {
            bridge: bridge.into(),
            exit_key: DEFAULT_EXIT_KEY,
            poll_interval: DEFAULT_POLL_INTERVAL,
            shell_package: HOME_SHELL_PACKAGE.to_string(),
        }
    }

    #[must_use]
    pub fn for_platform(platform: Platform) -> Self {
        Self::with_bridge(resolve_executable(platform))
    }

    #[must_use]
    pub fn bridge(&self) -> AdbBridge {
        AdbBridge::new(&self.bridge).with_shell_package(self.shell_package.clone())
    }

    #[must_use]
    pub fn monitor(&self) -> ConnectionMonitor {
        ConnectionMonitor::new(self.poll_interval)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn platform_defaults_match_bundle_layout() {
        let config = AppConfig::for_platform(Platform::Windows);
        assert_eq!(config.bridge, PathBuf::from("platform-tools-win/adb.exe"));
        assert_eq!(config.exit_key, 'e');
        assert_eq!(config.poll_interval, Duration::from_millis(1000));
        assert_eq!(config.shell_package, "com.oculus.vrshell");
    }

    #[test]
    fn explicit_bridge_is_used_as_is() {
        let config = AppConfig::with_bridge("/opt/android/platform-tools/adb");
        assert_eq!(
            config.bridge().executable(),
            std::path::Path::new("/opt/android/platform-tools/adb")
        );
        assert_eq!(config.monitor().interval(), DEFAULT_POLL_INTERVAL);
    }
}

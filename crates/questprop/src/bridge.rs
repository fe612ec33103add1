//! Device bridge (`adb`) adapter.
//!
//! Every operation spawns one blocking bridge process. Failures collapse into
//! [`BridgeError::BridgeUnavailable`] for device enumeration and
//! [`BridgeError::DeviceNotConnected`] for everything else.

use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use tracing::{debug, warn};

use crate::error::BridgeError;

/// Header printed by `adb devices` before the device list.
pub const DEVICES_HEADER: &str = "List of devices attached";
/// State column of an attached, authorized device.
const DEVICE_STATE: &str = "device";
/// Package of the headset home environment.
pub const HOME_SHELL_PACKAGE: &str = "com.oculus.vrshell";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Mac,
    Windows,
    Linux,
}

impl Platform {
    /// Platform of the running host.
    pub fn detect() -> Result<Self, BridgeError> {
        Self::from_os(std::env::consts::OS)
    }

    pub fn from_os(os: &str) -> Result<Self, BridgeError> {
        match os {
            "macos" => Ok(Self::Mac),
            "windows" => Ok(Self::Windows),
            "linux" => Ok(Self::Linux),
            other => Err(BridgeError::UnsupportedPlatform(other.to_string())),
        }
    }
}

/// Bundled bridge executable for `platform`, relative to the working directory.
#[must_use]
pub fn resolve_executable(platform: Platform) -> PathBuf {
    match platform {
        Platform::Mac => PathBuf::from("platform-tools-mac/adb"),
        Platform::Windows => PathBuf::from("platform-tools-win/adb.exe"),
        Platform::Linux => PathBuf::from("platform-tools-linux/adb"),
    }
}

/// Device-facing operations used by the menu.
pub trait DeviceBridge {
    /// Raw output lines of `devices -l`.
    fn list_devices(&self) -> Result<Vec<String>, BridgeError>;
    /// Trimmed value of a system property.
    fn get_property(&self, name: &str) -> Result<String, BridgeError>;
    fn set_property(&self, name: &str, value: &str) -> Result<(), BridgeError>;
    /// Force-stop the home shell so the launcher restarts.
    fn stop_shell_process(&self) -> Result<(), BridgeError>;
}

/// Whether `devices -l` output lists at least one usable device.
///
/// Anything up to and including the header is discarded, which also skips
/// the daemon start-up lines adb prints on first use. Without a header the
/// first line is treated as the header. A listed device only counts once its
/// state column reads `device`; `unauthorized` and `offline` entries keep the
/// caller waiting.
#[must_use]
pub fn is_connected<S: AsRef<str>>(lines: &[S]) -> bool {
    let body_start = lines
        .iter()
        .position(|line| line.as_ref().trim() == DEVICES_HEADER)
        .map_or(1, |index| index + 1);
    lines
        .iter()
        .skip(body_start)
        .any(|line| line.as_ref().split_whitespace().nth(1) == Some(DEVICE_STATE))
}

#[derive(Debug, Clone)]
pub struct AdbBridge {
    executable: PathBuf,
    shell_package: String,
}

impl AdbBridge {
    pub fn new(executable: impl Into<PathBuf>) -> Self {
        Self {
            executable: executable.into(),
            shell_package: HOME_SHELL_PACKAGE.to_string(),
        }
    }

    #[must_use]
    pub fn with_shell_package(mut self, package: impl Into<String>) -> Self {
        self.shell_package = package.into();
        self
    }

    #[must_use]
    pub fn executable(&self) -> &Path {
        &self.executable
    }

    fn run(&self, args: &[&str]) -> Result<String, String> {
        debug!("bridge {} {}", self.executable.display(), args.join(" "));
        let output = Command::new(&self.executable)
            .args(args)
            .stdin(Stdio::null())
            .output()
            .map_err(|err| format!("failed to run {}: {err}", self.executable.display()))?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let message = format!(
                "`{}` exited with {}: {}",
                args.join(" "),
                output.status,
                stderr.trim()
            );
            warn!("bridge {message}");
            return Err(message);
        }
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

impl DeviceBridge for AdbBridge {
    fn list_devices(&self) -> Result<Vec<String>, BridgeError> {
        let stdout = self
            .run(&["devices", "-l"])
            .map_err(BridgeError::BridgeUnavailable)?;
        Ok(stdout.lines().map(str::to_string).collect())
    }

    fn get_property(&self, name: &str) -> Result<String, BridgeError> {
        let stdout = self
            .run(&["shell", "getprop", name])
            .map_err(BridgeError::DeviceNotConnected)?;
        Ok(stdout.trim().to_string())
    }

    fn set_property(&self, name: &str, value: &str) -> Result<(), BridgeError> {
        self.run(&["shell", "setprop", name, value])
            .map(|_| ())
            .map_err(BridgeError::DeviceNotConnected)
    }

    fn stop_shell_process(&self) -> Result<(), BridgeError> {
        self.run(&["shell", "am", "force-stop", &self.shell_package])
            .map(|_| ())
            .map_err(BridgeError::DeviceNotConnected)
    }
}

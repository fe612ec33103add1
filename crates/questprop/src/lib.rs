//! Interactive configuration of Oculus/Meta Quest debug properties over adb.
//!
//! The binary polls for a headset, then offers a numbered menu to set or
//! show the `debug.oculus.*` properties and to restart the home shell. A
//! global exit key ends the program from any screen.

pub mod app;
pub mod bridge;
pub mod catalog;
pub mod config;
pub mod console;
pub mod error;
pub mod keys;
pub mod menu;
pub mod monitor;
pub mod style;

pub use bridge::{AdbBridge, DeviceBridge, Platform};
pub use config::AppConfig;
pub use error::{BridgeError, InvalidMenuChoice};
pub use menu::{MenuController, MenuState};

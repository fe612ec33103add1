//! Interactive session wiring: raw terminal, key listener and menu loop.

use std::io;

use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use tracing::info;

use crate::config::AppConfig;
use crate::console::{restore_and_exit, TerminalConsole};
use crate::keys::{KeyListener, TerminalKeys};
use crate::menu::MenuController;

pub fn run_app(config: &AppConfig) -> anyhow::Result<()> {
    info!(
        "starting with bridge {} (exit key '{}')",
        config.bridge.display(),
        config.exit_key
    );
    let (key_tx, key_rx) = crossbeam_channel::unbounded();

    enable_raw_mode()?;
    let result: io::Result<()> = (|| {
        // Detached: the listener blocks in a terminal read for the process
        // lifetime and ends the process itself on the exit key.
        KeyListener::spawn(TerminalKeys, config.exit_key, key_tx, || {
            restore_and_exit(0)
        })?;
        let mut menu = MenuController::new(config.bridge(), TerminalConsole::new(key_rx))
            .with_monitor(config.monitor())
            .with_exit_key(config.exit_key);
        match menu.run() {
            Err(err) if err.kind() == io::ErrorKind::UnexpectedEof => {
                info!("terminal input closed");
                Ok(())
            }
            other => other,
        }
    })();
    disable_raw_mode()?;
    result.map_err(anyhow::Error::from)
}

//! Global exit-key listener.
//!
//! The listener owns the terminal's key stream. The exit key runs the exit
//! hook on the listener thread, so it works while the menu is blocked on a
//! bridge call or a poll sleep. Every other key press is forwarded to the
//! console's line editor.

use std::io;
use std::thread::{self, JoinHandle};

use crossbeam_channel::{Receiver, Sender};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use tracing::{debug, info, warn};

pub const DEFAULT_EXIT_KEY: char = 'e';

/// Blocking source of key events. `Ok(None)` means the source is closed.
pub trait KeySource: Send + 'static {
    fn next_key(&mut self) -> io::Result<Option<KeyEvent>>;
}

/// Key events from the controlling terminal (raw mode must be enabled).
#[derive(Debug, Default)]
pub struct TerminalKeys;

impl KeySource for TerminalKeys {
    fn next_key(&mut self) -> io::Result<Option<KeyEvent>> {
        loop {
            if let Event::Key(key) = event::read()? {
                return Ok(Some(key));
            }
        }
    }
}

impl KeySource for Receiver<KeyEvent> {
    fn next_key(&mut self) -> io::Result<Option<KeyEvent>> {
        Ok(self.recv().ok())
    }
}

/// Exit key (any case) or Ctrl+C.
#[must_use]
pub fn is_exit_key(key: &KeyEvent, exit_key: char) -> bool {
    if key.kind != KeyEventKind::Press {
        return false;
    }
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.code {
        KeyCode::Char('c') if ctrl => true,
        KeyCode::Char(ch) => !ctrl && ch.eq_ignore_ascii_case(&exit_key),
        _ => false,
    }
}

pub struct KeyListener;

impl KeyListener {
    /// Starts the listener thread.
    ///
    /// `on_exit` runs at most once, on the listener thread. The thread stops
    /// after it, when the source closes, or when `forward` has no receiver.
    pub fn spawn<S, F>(
        mut source: S,
        exit_key: char,
        forward: Sender<KeyEvent>,
        on_exit: F,
    ) -> io::Result<JoinHandle<()>>
    where
        S: KeySource,
        F: FnOnce() + Send + 'static,
    {
        thread::Builder::new()
            .name("questprop-keys".into())
            .spawn(move || loop {
                let key = match source.next_key() {
                    Ok(Some(key)) => key,
                    Ok(None) => {
                        debug!("key source closed");
                        return;
                    }
                    Err(err) => {
                        warn!("key source failed: {err}");
                        return;
                    }
                };
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                if is_exit_key(&key, exit_key) {
                    info!("exit key pressed");
                    on_exit();
                    return;
                }
                if forward.send(key).is_err() {
                    return;
                }
            })
    }
}

//! Line-oriented terminal output and the single-question input session.

use std::io::{self, Stdout, Write};
use std::time::Duration;

use crossbeam_channel::Receiver;
use crossterm::cursor::{MoveTo, MoveToColumn, Show};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use crossterm::style::Print;
use crossterm::terminal::{disable_raw_mode, Clear, ClearType};
use crossterm::{execute, queue};
use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::OwoColorize;

use crate::style;

/// Output and input surface used by the menu.
pub trait Console {
    fn clear(&mut self) -> io::Result<()>;
    fn line(&mut self, text: &str) -> io::Result<()>;
    fn notice(&mut self, text: &str) -> io::Result<()>;
    fn success(&mut self, text: &str) -> io::Result<()>;
    fn error(&mut self, text: &str) -> io::Result<()>;

    /// Asks one question and returns the raw answer line.
    fn ask(&mut self, question: &str, hint: Option<&str>) -> io::Result<String>;

    fn spinner_start(&mut self, message: &str) -> io::Result<()>;
    fn spinner_succeed(&mut self, message: &str) -> io::Result<()>;
    fn spinner_fail(&mut self, message: &str) -> io::Result<()>;

    fn separator(&mut self) -> io::Result<()> {
        self.line(style::SEPARATOR)
    }
}

/// Console on the real terminal, in raw mode.
///
/// Keys arrive from the [`KeyListener`](crate::keys::KeyListener) channel,
/// so raw mode must stay on for the lifetime of the console.
pub struct TerminalConsole {
    out: Stdout,
    keys: Receiver<KeyEvent>,
    spinner: Option<ProgressBar>,
}

impl TerminalConsole {
    #[must_use]
    pub fn new(keys: Receiver<KeyEvent>) -> Self {
        Self {
            out: io::stdout(),
            keys,
            spinner: None,
        }
    }

    /// Opens the input session. Only one can exist at a time; keys typed while
    /// no question was open are discarded.
    pub fn session(&mut self) -> InputSession<'_> {
        let stale = self.keys.try_iter().count();
        if stale > 0 {
            tracing::debug!("discarded {stale} buffered key(s)");
        }
        InputSession {
            out: &mut self.out,
            keys: &self.keys,
        }
    }

    fn write_line(&mut self, text: &str) -> io::Result<()> {
        // Raw mode disables output post-processing, so every line needs an
        // explicit carriage return.
        execute!(self.out, MoveToColumn(0), Print(text), Print("\r\n"))
    }

    fn finish_spinner(&mut self, message: String) -> io::Result<()> {
        match self.spinner.take() {
            Some(spinner) => {
                spinner.finish_with_message(message);
                execute!(self.out, MoveToColumn(0))
            }
            None => self.write_line(&message),
        }
    }
}

impl Console for TerminalConsole {
    fn clear(&mut self) -> io::Result<()> {
        clear_screen(&mut self.out)
    }

    fn line(&mut self, text: &str) -> io::Result<()> {
        self.write_line(text)
    }

    fn notice(&mut self, text: &str) -> io::Result<()> {
        self.write_line(&style::notice(text))
    }

    fn success(&mut self, text: &str) -> io::Result<()> {
        self.write_line(&style::success(text))
    }

    fn error(&mut self, text: &str) -> io::Result<()> {
        self.write_line(&style::error(text))
    }

    fn ask(&mut self, question: &str, hint: Option<&str>) -> io::Result<String> {
        self.session().read_line(&style::prompt(question, hint))
    }

    fn spinner_start(&mut self, message: &str) -> io::Result<()> {
        let spinner = ProgressBar::new_spinner();
        spinner.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner} {msg}")
                .map_err(io::Error::other)?,
        );
        spinner.enable_steady_tick(Duration::from_millis(120));
        spinner.set_message(message.to_string());
        self.spinner = Some(spinner);
        Ok(())
    }

    fn spinner_succeed(&mut self, message: &str) -> io::Result<()> {
        self.finish_spinner(format!("{} {message}", "✔".green()))
    }

    fn spinner_fail(&mut self, message: &str) -> io::Result<()> {
        self.finish_spinner(format!("{} {message}", "✖".red()))
    }
}

/// Exclusive line-input session borrowed from a [`TerminalConsole`].
pub struct InputSession<'a> {
    out: &'a mut Stdout,
    keys: &'a Receiver<KeyEvent>,
}

impl InputSession<'_> {
    /// Echoing line editor with backspace support.
    pub fn read_line(&mut self, prompt: &str) -> io::Result<String> {
        execute!(self.out, MoveToColumn(0), Print(prompt))?;
        let mut line = String::new();
        loop {
            let key = self.keys.recv().map_err(|_| {
                io::Error::new(io::ErrorKind::UnexpectedEof, "terminal input closed")
            })?;
            match key.code {
                KeyCode::Enter => {
                    execute!(self.out, Print("\r\n"))?;
                    return Ok(line);
                }
                KeyCode::Backspace => {
                    if line.pop().is_some() {
                        execute!(self.out, Print("\u{8} \u{8}"))?;
                    }
                }
                KeyCode::Char(ch) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                    line.push(ch);
                    execute!(self.out, Print(ch))?;
                }
                _ => {}
            }
        }
    }
}

fn clear_screen(out: &mut impl Write) -> io::Result<()> {
    queue!(out, Clear(ClearType::All), Clear(ClearType::Purge), MoveTo(0, 0))?;
    out.flush()
}

/// Exit path of the global exit key: notice, terminal restore, clear, exit.
///
/// Runs on the listener thread while the menu may still be blocked, so it
/// terminates the process instead of signalling the menu.
pub fn restore_and_exit(code: i32) -> ! {
    let mut out = io::stdout();
    let _ = execute!(out, MoveToColumn(0), Print("\r\n\r\nExiting...\r\n"));
    let _ = disable_raw_mode();
    let _ = clear_screen(&mut out);
    let _ = execute!(out, Show);
    std::process::exit(code)
}

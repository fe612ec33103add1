#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::{HashMap, HashSet, VecDeque};
use std::io;
use std::time::Duration;

use questprop::console::Console;
use questprop::monitor::ConnectionMonitor;
use questprop::{BridgeError, DeviceBridge, MenuController};

pub const HEADER: &str = "List of devices attached";

/// Bridge double that records every invocation.
#[derive(Default)]
pub struct FakeBridge {
    /// Scripted `devices -l` results; once empty, a device is attached.
    pub device_polls: RefCell<VecDeque<Result<Vec<String>, BridgeError>>>,
    pub values: HashMap<&'static str, String>,
    pub failing: HashSet<&'static str>,
    pub reboot_fails: bool,
    pub calls: RefCell<Vec<String>>,
}

impl FakeBridge {
    pub fn connected() -> Self {
        Self::default()
    }

    pub fn with_polls(polls: Vec<Result<Vec<String>, BridgeError>>) -> Self {
        Self {
            device_polls: RefCell::new(polls.into()),
            ..Self::default()
        }
    }

    pub fn failing(mut self, name: &'static str) -> Self {
        self.failing.insert(name);
        self
    }

    pub fn value(mut self, name: &'static str, value: &str) -> Self {
        self.values.insert(name, value.to_string());
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }

    pub fn count(&self, prefix: &str) -> usize {
        self.calls
            .borrow()
            .iter()
            .filter(|call| call.starts_with(prefix))
            .count()
    }

    fn record(&self, call: String) {
        self.calls.borrow_mut().push(call);
    }
}

pub fn header_only() -> Result<Vec<String>, BridgeError> {
    Ok(vec![HEADER.to_string()])
}

impl DeviceBridge for FakeBridge {
    fn list_devices(&self) -> Result<Vec<String>, BridgeError> {
        self.record("devices".to_string());
        self.device_polls
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Ok(vec![HEADER.to_string(), "ABCD1234\tdevice".to_string()]))
    }

    fn get_property(&self, name: &str) -> Result<String, BridgeError> {
        self.record(format!("getprop {name}"));
        if self.failing.contains(name) {
            return Err(BridgeError::DeviceNotConnected("exit status 1".into()));
        }
        Ok(self.values.get(name).cloned().unwrap_or_default())
    }

    fn set_property(&self, name: &str, value: &str) -> Result<(), BridgeError> {
        self.record(format!("setprop {name} {value}"));
        if self.failing.contains(name) {
            return Err(BridgeError::DeviceNotConnected("exit status 1".into()));
        }
        Ok(())
    }

    fn stop_shell_process(&self) -> Result<(), BridgeError> {
        self.record("force-stop".to_string());
        if self.reboot_fails {
            return Err(BridgeError::DeviceNotConnected("exit status 1".into()));
        }
        Ok(())
    }
}

/// Console double fed from a list of answers. Running out of answers closes
/// the input, which ends `MenuController::run`.
#[derive(Default)]
pub struct ScriptedConsole {
    answers: VecDeque<String>,
    pub transcript: Vec<String>,
}

impl ScriptedConsole {
    pub fn new(answers: &[&str]) -> Self {
        Self {
            answers: answers.iter().map(|answer| (*answer).to_string()).collect(),
            transcript: Vec::new(),
        }
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        for line in &self.transcript {
            out.push_str(line);
            out.push('\n');
        }
        out
    }

    pub fn count(&self, line: &str) -> usize {
        self.transcript.iter().filter(|entry| *entry == line).count()
    }
}

impl Console for ScriptedConsole {
    fn clear(&mut self) -> io::Result<()> {
        self.transcript.push("[clear]".to_string());
        Ok(())
    }

    fn line(&mut self, text: &str) -> io::Result<()> {
        if text.is_empty() {
            self.transcript.push("[blank]".to_string());
        } else {
            self.transcript.push(text.to_string());
        }
        Ok(())
    }

    fn notice(&mut self, text: &str) -> io::Result<()> {
        self.transcript.push(format!("[notice] {text}"));
        Ok(())
    }

    fn success(&mut self, text: &str) -> io::Result<()> {
        self.transcript.push(format!("[ok] {text}"));
        Ok(())
    }

    fn error(&mut self, text: &str) -> io::Result<()> {
        self.transcript.push(format!("[error] {text}"));
        Ok(())
    }

    fn separator(&mut self) -> io::Result<()> {
        self.transcript.push("[sep]".to_string());
        Ok(())
    }

    fn ask(&mut self, question: &str, hint: Option<&str>) -> io::Result<String> {
        match hint {
            Some(hint) => self.transcript.push(format!("[ask] {question} {hint}")),
            None => self.transcript.push(format!("[ask] {question}")),
        }
        let answer = self.answers.pop_front().ok_or_else(|| {
            io::Error::new(io::ErrorKind::UnexpectedEof, "script exhausted")
        })?;
        self.transcript.push(format!("[answer] {answer}"));
        Ok(answer)
    }

    fn spinner_start(&mut self, message: &str) -> io::Result<()> {
        self.transcript.push(format!("[spinner] {message}"));
        Ok(())
    }

    fn spinner_succeed(&mut self, message: &str) -> io::Result<()> {
        self.transcript.push(format!("[spinner ok] {message}"));
        Ok(())
    }

    fn spinner_fail(&mut self, message: &str) -> io::Result<()> {
        self.transcript.push(format!("[spinner fail] {message}"));
        Ok(())
    }
}

/// Controller with a 1 ms poll interval.
pub fn controller(
    bridge: FakeBridge,
    answers: &[&str],
) -> MenuController<FakeBridge, ScriptedConsole> {
    MenuController::new(bridge, ScriptedConsole::new(answers))
        .with_monitor(ConnectionMonitor::new(Duration::from_millis(1)))
}

/// Runs until the scripted answers are used up.
pub fn run_to_end(menu: &mut MenuController<FakeBridge, ScriptedConsole>) {
    let err = menu.run().expect_err("menu loop only ends on closed input");
    assert_eq!(err.kind(), io::ErrorKind::UnexpectedEof);
}

//! Menu state machine.
//!
//! Each loop iteration renders one menu, asks one question and yields the
//! next [`MenuState`]. The loop only ends when the console input closes; the
//! exit key terminates the process from the listener thread instead.

use std::io;

use tracing::{debug, info};

use crate::bridge::DeviceBridge;
use crate::catalog::{PropertyDescriptor, PROPERTIES};
use crate::console::Console;
use crate::error::InvalidMenuChoice;
use crate::keys::DEFAULT_EXIT_KEY;
use crate::monitor::{ConnectionMonitor, WaitOutcome};

pub const DEVICE_NOT_CONNECTED: &str =
    "Device not connected. Please connect your device and try again.";
pub const HOME_RESTARTED: &str = "Home environment restarted.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuState {
    MainMenu,
    PropertiesMenu,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MainChoice {
    SetAll,
    ShowProperties,
    RebootHome,
}

impl MainChoice {
    pub const COUNT: usize = 3;

    pub fn parse(input: &str) -> Result<Self, InvalidMenuChoice> {
        match parse_menu_number(input, Self::COUNT)? {
            1 => Ok(Self::SetAll),
            2 => Ok(Self::ShowProperties),
            _ => Ok(Self::RebootHome),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropertiesChoice {
    /// Zero-based catalog index.
    Show(usize),
    ShowAll,
    Back,
}

impl PropertiesChoice {
    /// Number of options offered for a catalog of `property_count` entries.
    #[must_use]
    pub fn option_count(property_count: usize) -> usize {
        property_count + 2
    }

    pub fn parse(input: &str, property_count: usize) -> Result<Self, InvalidMenuChoice> {
        let number = parse_menu_number(input, Self::option_count(property_count))?;
        Ok(if number <= property_count {
            Self::Show(number - 1)
        } else if number == property_count + 1 {
            Self::ShowAll
        } else {
            Self::Back
        })
    }
}

fn parse_menu_number(input: &str, max: usize) -> Result<usize, InvalidMenuChoice> {
    input
        .trim()
        .parse::<usize>()
        .ok()
        .filter(|number| (1..=max).contains(number))
        .ok_or_else(|| InvalidMenuChoice {
            input: input.to_string(),
            max,
        })
}

pub struct MenuController<B, C> {
    bridge: B,
    console: C,
    monitor: ConnectionMonitor,
    properties: &'static [PropertyDescriptor],
    exit_key: char,
    main_entries: u64,
}

impl<B: DeviceBridge, C: Console> MenuController<B, C> {
    pub fn new(bridge: B, console: C) -> Self {
        Self {
            bridge,
            console,
            monitor: ConnectionMonitor::default(),
            properties: PROPERTIES,
            exit_key: DEFAULT_EXIT_KEY,
            main_entries: 0,
        }
    }

    #[must_use]
    pub fn with_monitor(mut self, monitor: ConnectionMonitor) -> Self {
        self.monitor = monitor;
        self
    }

    #[must_use]
    pub fn with_properties(mut self, properties: &'static [PropertyDescriptor]) -> Self {
        self.properties = properties;
        self
    }

    #[must_use]
    pub fn with_exit_key(mut self, exit_key: char) -> Self {
        self.exit_key = exit_key;
        self
    }

    pub fn bridge(&self) -> &B {
        &self.bridge
    }

    pub fn console(&self) -> &C {
        &self.console
    }

    /// Runs menus until the console input closes.
    pub fn run(&mut self) -> io::Result<()> {
        let mut state = MenuState::MainMenu;
        loop {
            debug!("menu state {state:?}");
            state = self.step(state)?;
        }
    }

    /// Renders `state`, handles one answer and returns the next state.
    pub fn step(&mut self, state: MenuState) -> io::Result<MenuState> {
        match state {
            MenuState::MainMenu => self.main_menu(),
            MenuState::PropertiesMenu => self.properties_menu(),
        }
    }

    fn main_menu(&mut self) -> io::Result<MenuState> {
        if self.main_entries == 0 {
            self.console.clear()?;
        }
        self.main_entries += 1;
        self.exit_notice()?;
        self.check_device()?;

        self.console.line("Select an option:")?;
        self.console.line("1. Set Properties")?;
        self.console.line("2. Show Properties")?;
        self.console.line("3. Reboot Home Environment")?;
        self.console.line("")?;
        let answer = self
            .console
            .ask(&format!("Enter your choice (1-{})", MainChoice::COUNT), None)?;
        self.console.clear()?;

        match MainChoice::parse(&answer) {
            Ok(MainChoice::SetAll) => {
                self.set_all()?;
                self.console.clear()?;
                Ok(MenuState::MainMenu)
            }
            Ok(MainChoice::ShowProperties) => Ok(MenuState::PropertiesMenu),
            Ok(MainChoice::RebootHome) => {
                self.reboot_home()?;
                Ok(MenuState::MainMenu)
            }
            Err(err) => {
                debug!("main menu rejected {:?}", err.input);
                self.framed(&err.to_string())?;
                Ok(MenuState::MainMenu)
            }
        }
    }

    fn check_device(&mut self) -> io::Result<()> {
        self.console.spinner_start("Checking devices...")?;
        match self.monitor.wait_for_device(&self.bridge) {
            WaitOutcome::Connected => {
                self.console.spinner_succeed("Device connected")?;
                self.console.line("")
            }
            WaitOutcome::Failed(err) => {
                self.console
                    .spinner_fail(&format!("Error checking devices: {err}"))?;
                self.framed_error(DEVICE_NOT_CONNECTED)
            }
        }
    }

    fn set_all(&mut self) -> io::Result<()> {
        self.exit_notice()?;
        let properties = self.properties;
        for property in properties {
            let answer = self.console.ask(property.prompt, Some(property.hint))?;
            let value = answer.trim();
            if value.is_empty() {
                debug!("skipping {}", property.name);
                continue;
            }
            match self.bridge.set_property(property.name, value) {
                Ok(()) => info!("set {} = {value}", property.name),
                Err(err) => {
                    info!("set {} failed: {err}", property.name);
                    self.console.error(DEVICE_NOT_CONNECTED)?;
                }
            }
        }
        Ok(())
    }

    fn properties_menu(&mut self) -> io::Result<MenuState> {
        let properties = self.properties;
        let count = properties.len();
        let options = PropertiesChoice::option_count(count);
        self.exit_notice()?;
        self.console.line("Select a property to show:")?;
        for (index, property) in properties.iter().enumerate() {
            self.console
                .line(&format!("{}. {}", index + 1, property.name))?;
        }
        self.console
            .line(&format!("{}. Show all properties", count + 1))?;
        self.console.line(&format!("{options}. Back to main menu"))?;
        self.console.line("")?;
        let answer = self
            .console
            .ask(&format!("Enter your choice (1-{options})"), None)?;

        match PropertiesChoice::parse(&answer, count) {
            Ok(PropertiesChoice::Show(index)) => {
                self.console.clear()?;
                self.show_property(properties[index])?;
            }
            Ok(PropertiesChoice::ShowAll) => {
                self.console.clear()?;
                for property in properties {
                    self.show_property(*property)?;
                }
            }
            Ok(PropertiesChoice::Back) => {
                self.console.line("Back to main menu...")?;
                self.console.clear()?;
                return Ok(MenuState::MainMenu);
            }
            Err(err) => {
                debug!("properties menu rejected {:?}", err.input);
                self.console.clear()?;
                self.framed(&err.to_string())?;
            }
        }
        Ok(MenuState::PropertiesMenu)
    }

    fn show_property(&mut self, property: PropertyDescriptor) -> io::Result<()> {
        match self.bridge.get_property(property.name) {
            Ok(value) => {
                self.console.separator()?;
                self.console.line(&format!("{}: {value}", property.name))?;
                self.console.separator()
            }
            Err(err) => {
                info!("get {} failed: {err}", property.name);
                self.framed_error(DEVICE_NOT_CONNECTED)
            }
        }
    }

    fn reboot_home(&mut self) -> io::Result<()> {
        match self.bridge.stop_shell_process() {
            Ok(()) => {
                info!("home shell stopped");
                self.console.separator()?;
                self.console.success(HOME_RESTARTED)?;
                self.console.separator()
            }
            Err(err) => {
                info!("home shell restart failed: {err}");
                self.framed_error(DEVICE_NOT_CONNECTED)
            }
        }
    }

    fn exit_notice(&mut self) -> io::Result<()> {
        self.console.notice(&format!(
            "Press \"{}\" to exit the program",
            self.exit_key
        ))?;
        self.console.line("")
    }

    fn framed(&mut self, text: &str) -> io::Result<()> {
        self.console.separator()?;
        self.console.line(text)?;
        self.console.separator()
    }

    fn framed_error(&mut self, text: &str) -> io::Result<()> {
        self.console.separator()?;
        self.console.error(text)?;
        self.console.separator()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn main_menu_accepts_one_to_three() {
        assert_eq!(MainChoice::parse("1"), Ok(MainChoice::SetAll));
        assert_eq!(MainChoice::parse("2"), Ok(MainChoice::ShowProperties));
        assert_eq!(MainChoice::parse(" 3 "), Ok(MainChoice::RebootHome));
        for input in ["0", "4", "", "one", "-1", "1.5"] {
            let err = MainChoice::parse(input).unwrap_err();
            assert_eq!(err.max, 3, "input {input:?}");
        }
    }

    #[test]
    fn properties_menu_range_tracks_catalog_size() {
        let count = PROPERTIES.len();
        for number in 1..=count {
            assert_eq!(
                PropertiesChoice::parse(&number.to_string(), count),
                Ok(PropertiesChoice::Show(number - 1))
            );
        }
        assert_eq!(
            PropertiesChoice::parse(&(count + 1).to_string(), count),
            Ok(PropertiesChoice::ShowAll)
        );
        assert_eq!(
            PropertiesChoice::parse(&(count + 2).to_string(), count),
            Ok(PropertiesChoice::Back)
        );
    }

    #[test]
    fn properties_menu_rejects_out_of_range() {
        let count = PROPERTIES.len();
        for input in ["0".to_string(), (count + 3).to_string(), "abc".to_string()] {
            let err = PropertiesChoice::parse(&input, count).unwrap_err();
            assert_eq!(err.max, count + 2);
            assert_eq!(
                err.to_string(),
                format!("Invalid choice. Please enter a number between 1 and {}.", count + 2)
            );
        }
    }
}

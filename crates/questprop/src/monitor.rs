//! Polls the bridge until a headset shows up.

use std::time::Duration;

use tracing::{debug, info, warn};

use crate::bridge::{is_connected, DeviceBridge};
use crate::error::BridgeError;

pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(1000);

/// Result of one `devices -l` poll.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Poll {
    Waiting,
    Connected,
    Failed(BridgeError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WaitOutcome {
    Connected,
    /// The bridge could not run at all; waiting longer would not help.
    Failed(BridgeError),
}

#[derive(Debug, Clone, Copy)]
pub struct ConnectionMonitor {
    interval: Duration,
}

impl Default for ConnectionMonitor {
    fn default() -> Self {
        Self::new(DEFAULT_POLL_INTERVAL)
    }
}

impl ConnectionMonitor {
    #[must_use]
    pub fn new(interval: Duration) -> Self {
        Self { interval }
    }

    #[must_use]
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Lazy sequence of poll attempts. Ends after the first `Connected` or
    /// `Failed`; otherwise it is unbounded.
    pub fn attempts<'a, B: DeviceBridge + ?Sized>(&self, bridge: &'a B) -> Attempts<'a, B> {
        Attempts {
            bridge,
            interval: self.interval,
            started: false,
            finished: false,
        }
    }

    /// Blocks until a device is attached or the bridge fails outright.
    pub fn wait_for_device<B: DeviceBridge + ?Sized>(&self, bridge: &B) -> WaitOutcome {
        let mut waited = 0_u64;
        self.attempts(bridge)
            .find_map(|attempt| match attempt {
                Poll::Waiting => {
                    waited += 1;
                    if waited == 1 {
                        info!("no device attached, polling every {:?}", self.interval);
                    }
                    None
                }
                Poll::Connected => {
                    debug!("device connected after {waited} empty poll(s)");
                    Some(WaitOutcome::Connected)
                }
                Poll::Failed(err) => {
                    warn!("device check failed: {err}");
                    Some(WaitOutcome::Failed(err))
                }
            })
            .unwrap_or_else(|| {
                WaitOutcome::Failed(BridgeError::BridgeUnavailable(
                    "device polling stopped".to_string(),
                ))
            })
    }
}

pub struct Attempts<'a, B: ?Sized> {
    bridge: &'a B,
    interval: Duration,
    started: bool,
    finished: bool,
}

impl<B: DeviceBridge + ?Sized> Iterator for Attempts<'_, B> {
    type Item = Poll;

    fn next(&mut self) -> Option<Poll> {
        if self.finished {
            return None;
        }
        if self.started {
            std::thread::sleep(self.interval);
        }
        self.started = true;
        let poll = match self.bridge.list_devices() {
            Ok(lines) if is_connected(&lines) => Poll::Connected,
            Ok(_) => Poll::Waiting,
            Err(err) => Poll::Failed(err),
        };
        self.finished = !matches!(poll, Poll::Waiting);
        Some(poll)
    }
}

//! Scripted keyboard input.
use std::{collections::VecDeque, path::Path, time::Duration};

use schip::prelude::*;
use serde::Deserialize;

use crate::error::AppError;

/// A key press or release, at a point in emulated time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct KeyEvent {
    /// Milliseconds since the start of the run.
    pub at: u64,
    pub key: KeyCode,
    #[serde(default = "default_pressed")]
    pub pressed: bool,
}

fn default_pressed() -> bool {
    true
}

/// Queue of key events, replayed in time order.
///
/// Loaded from a YAML list:
///
/// ```yaml
/// - { at: 500, key: 7, pressed: true }
/// - { at: 600, key: 7, pressed: false }
/// ```
#[derive(Debug, Default)]
pub struct InputScript {
    events: VecDeque<KeyEvent>,
}

impl InputScript {
    pub fn from_file(filepath: impl AsRef<Path>) -> Result<Self, AppError> {
        let text = std::fs::read_to_string(filepath)?;
        Self::from_yaml(&text)
    }

    pub fn from_yaml(text: &str) -> Result<Self, AppError> {
        let mut events: Vec<KeyEvent> = serde_yaml::from_str(text)?;
        // Stable, so events at the same time keep their file order.
        events.sort_by_key(|event| event.at);
        log::debug!("loaded {} scripted key events", events.len());

        Ok(Self {
            events: events.into(),
        })
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Remove and return the events that are due at the given time.
    pub fn drain_until(&mut self, elapsed: Duration) -> impl Iterator<Item = KeyEvent> + '_ {
        let now = elapsed.as_millis();
        let count = self
            .events
            .iter()
            .take_while(|event| event.at as u128 <= now)
            .count();
        self.events.drain(..count)
    }
}

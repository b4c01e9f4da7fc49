//! The adapter's view of what the host devices should show

use std::fmt;

use crate::levels::SourceLevel;

/// Text of the status device
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Label {
    /// Nothing received yet
    #[default]
    Empty,
    Off,
    /// Power-on sent, set still booting
    Starting,
    Playing(String),
}

impl Label {
    pub fn is_empty(&self) -> bool {
        match self {
            Label::Empty => true,
            Label::Playing(text) => text.is_empty(),
            Label::Off | Label::Starting => false,
        }
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Label::Empty => Ok(()),
            Label::Off => f.write_str("Off"),
            Label::Starting => f.write_str("TV starting"),
            Label::Playing(text) => f.write_str(text),
        }
    }
}

/// Last known television state, as host device values
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceProjection {
    pub label: Label,
    /// Source selector level
    pub source: i32,
    /// Control selector level
    pub control: i32,
    /// Channel selector level
    pub channel: i32,
    /// Speaker volume, `0..=100`
    pub volume: i64,
    pub muted: bool,
}

impl Default for DeviceProjection {
    fn default() -> Self {
        Self {
            label: Label::Empty,
            source: SourceLevel::Off.level(),
            control: 0,
            channel: 10,
            volume: 0,
            muted: false,
        }
    }
}

impl DeviceProjection {
    /// Everything off; volume is kept for when the set comes back
    pub fn reset(&mut self) {
        self.label = Label::Off;
        self.source = 0;
        self.control = 0;
        self.channel = 0;
    }
}

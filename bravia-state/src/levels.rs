//! Selector levels of the source, control and channel units
//!
//! Host selector switches report their position as a level in steps of 10,
//! with 0 meaning off.

use bravia_api::IrCommand;

/// Position on the source selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceLevel {
    Off,
    Tv,
    Hdmi1,
    Hdmi2,
    Hdmi3,
    Hdmi4,
    Netflix,
}

impl SourceLevel {
    pub const SELECTOR_NAMES: &'static str = "Off|TV|HDMI1|HDMI2|HDMI3|HDMI4|Netflix";

    pub fn level(self) -> i32 {
        match self {
            SourceLevel::Off => 0,
            SourceLevel::Tv => 10,
            SourceLevel::Hdmi1 => 20,
            SourceLevel::Hdmi2 => 30,
            SourceLevel::Hdmi3 => 40,
            SourceLevel::Hdmi4 => 50,
            SourceLevel::Netflix => 60,
        }
    }

    pub fn from_level(level: i32) -> Option<Self> {
        Some(match level {
            0 => SourceLevel::Off,
            10 => SourceLevel::Tv,
            20 => SourceLevel::Hdmi1,
            30 => SourceLevel::Hdmi2,
            40 => SourceLevel::Hdmi3,
            50 => SourceLevel::Hdmi4,
            60 => SourceLevel::Netflix,
            _ => return None,
        })
    }

    /// Button that switches the set to this source
    pub fn command(self) -> Option<IrCommand> {
        match self {
            SourceLevel::Off => None,
            SourceLevel::Tv => Some(IrCommand::Tv),
            SourceLevel::Hdmi1 => Some(IrCommand::Hdmi1),
            SourceLevel::Hdmi2 => Some(IrCommand::Hdmi2),
            SourceLevel::Hdmi3 => Some(IrCommand::Hdmi3),
            SourceLevel::Hdmi4 => Some(IrCommand::Hdmi4),
            SourceLevel::Netflix => Some(IrCommand::Netflix),
        }
    }

    /// Status label shown after switching; the tuner gets its label from
    /// the next playing-content poll
    pub fn label(self) -> Option<&'static str> {
        match self {
            SourceLevel::Hdmi1 => Some("HDMI 1"),
            SourceLevel::Hdmi2 => Some("HDMI 2"),
            SourceLevel::Hdmi3 => Some("HDMI 3"),
            SourceLevel::Hdmi4 => Some("HDMI 4"),
            SourceLevel::Netflix => Some("Netflix"),
            SourceLevel::Off | SourceLevel::Tv => None,
        }
    }

    /// First source whose name appears in a playing-content title
    pub fn match_title(title: &str) -> Option<Self> {
        [
            SourceLevel::Hdmi1,
            SourceLevel::Hdmi2,
            SourceLevel::Hdmi3,
            SourceLevel::Hdmi4,
            SourceLevel::Netflix,
        ]
        .into_iter()
        .find(|source| source.label().is_some_and(|label| title.contains(label)))
    }
}

/// Position on the playback control selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ControlLevel {
    Off,
    Play,
    Stop,
    Pause,
    TvPause,
    Exit,
}

impl ControlLevel {
    pub const SELECTOR_NAMES: &'static str = "Off|Play|Stop|Pause|TV Pause|Exit";

    pub fn level(self) -> i32 {
        match self {
            ControlLevel::Off => 0,
            ControlLevel::Play => 10,
            ControlLevel::Stop => 20,
            ControlLevel::Pause => 30,
            ControlLevel::TvPause => 40,
            ControlLevel::Exit => 50,
        }
    }

    pub fn from_level(level: i32) -> Option<Self> {
        Some(match level {
            0 => ControlLevel::Off,
            10 => ControlLevel::Play,
            20 => ControlLevel::Stop,
            30 => ControlLevel::Pause,
            40 => ControlLevel::TvPause,
            50 => ControlLevel::Exit,
            _ => return None,
        })
    }

    pub fn command(self) -> Option<IrCommand> {
        match self {
            ControlLevel::Off => None,
            ControlLevel::Play => Some(IrCommand::Play),
            ControlLevel::Stop => Some(IrCommand::Stop),
            ControlLevel::Pause => Some(IrCommand::Pause),
            ControlLevel::TvPause => Some(IrCommand::TvPause),
            ControlLevel::Exit => Some(IrCommand::Exit),
        }
    }
}

/// Channel selector names: presets 1 to 9 and a free-choice position
pub const CHANNEL_SELECTOR_NAMES: &str = "Off|CH1|CH2|CH3|CH4|CH5|CH6|CH7|CH8|CH9|--Choose a channel--";

/// Level of the "--Choose a channel--" position
pub const CHANNEL_CHOOSE_LEVEL: i32 = 100;

/// Selector level of a single-digit channel number (`4` -> `40`)
pub fn channel_level(disp_num: u32) -> Option<i32> {
    (disp_num < 10).then(|| disp_num as i32 * 10)
}

/// Number key for a channel preset level (`40` -> `Num4`)
pub fn channel_command(level: i32) -> Option<IrCommand> {
    if level % 10 != 0 || !(10..=90).contains(&level) {
        return None;
    }
    IrCommand::digit((level / 10) as u8)
}

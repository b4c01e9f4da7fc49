//! Turns device answers into host device updates
//!
//! The [`Reconciler`] owns the [`DeviceProjection`]. Poll results are folded
//! into it and every change comes back as a list of [`DeviceUpdate`]s for the
//! host, in the order the host should apply them.

use bravia_api::operations::{PlayingContentInfo, VolumeInfo};
use chrono::NaiveDateTime;

use crate::config::AdapterConfig;
use crate::levels::{channel_level, SourceLevel};
use crate::playing_time::playing_time;
use crate::power::PowerState;
use crate::projection::{DeviceProjection, Label};
use crate::publisher::{DeviceUnit, DeviceUpdate};

/// `nValue` of a device that is off
const N_OFF: i32 = 0;

/// `nValue` of a device that is on
const N_ON: i32 = 1;

/// `nValue` of a dimmer set to a level
const N_LEVEL: i32 = 2;

/// Suffix some sets append to HDMI inputs that support MHL
const MHL_SUFFIX: &str = "/MHL";

#[derive(Debug, Clone)]
pub struct Reconciler {
    projection: DeviceProjection,
    untitled_label: Option<String>,
    volume_control: bool,
    reserve_info_unit: bool,
}

impl Reconciler {
    pub fn new(config: &AdapterConfig) -> Self {
        Self {
            projection: DeviceProjection::default(),
            untitled_label: config.untitled_playback_label.clone(),
            volume_control: config.volume_control,
            reserve_info_unit: config.reserve_info_unit,
        }
    }

    pub fn projection(&self) -> &DeviceProjection {
        &self.projection
    }

    pub fn projection_mut(&mut self) -> &mut DeviceProjection {
        &mut self.projection
    }

    /// Fold a `getPlayingContentInfo` answer into the projection
    ///
    /// Tuner content (anything with a programme title) is labelled with the
    /// channel and programme, and selects the TV source. Other content is
    /// labelled with its title and selects the matching input, if any.
    /// `None` leaves the projection untouched.
    pub fn apply_playing_info(
        &mut self,
        info: Option<&PlayingContentInfo>,
        now: NaiveDateTime,
    ) -> Vec<DeviceUpdate> {
        let Some(info) = info else {
            tracing::debug!("no playing content information received");
            return Vec::new();
        };

        let mut updates = Vec::new();
        match info.program_title.as_deref() {
            Some(program_title) => {
                let label = self.tuner_label(info, program_title, now);
                self.projection.label = Label::Playing(label.clone());
                self.projection.source = SourceLevel::Tv.level();

                updates.push(self.level_update(DeviceUnit::Source, self.projection.source));
                updates.push(self.level_update(DeviceUnit::Channel, self.projection.channel));
                updates.push(DeviceUpdate::new(DeviceUnit::Status, N_ON, label));
            }
            None => {
                let title = info.title.as_deref().unwrap_or_default();
                let label = if title.is_empty() {
                    self.untitled_label.clone().unwrap_or_default()
                } else {
                    title.to_string()
                };
                let label = label.replace(MHL_SUFFIX, "");

                if let Some(source) = SourceLevel::match_title(&label) {
                    self.projection.source = source.level();
                    updates.push(self.level_update(DeviceUnit::Source, self.projection.source));
                }
                self.projection.label = Label::Playing(label);
            }
        }

        updates.push(self.level_update(DeviceUnit::Control, self.projection.control));
        updates.push(self.level_update(DeviceUnit::Channel, self.projection.channel));
        updates
    }

    fn tuner_label(&mut self, info: &PlayingContentInfo, program_title: &str, now: NaiveDateTime) -> String {
        let title = info.title.as_deref().unwrap_or_default();
        let channel = info
            .disp_num
            .as_deref()
            .and_then(|num| num.trim().parse::<u32>().ok());

        if let Some(level) = channel.and_then(channel_level) {
            self.projection.channel = level;
        }

        let schedule = info.start_date_time.as_deref().and_then(|start| {
            playing_time(start, info.duration_sec.unwrap_or(0), now)
                .map_err(|e| tracing::debug!("ignoring programme times: {}", e))
                .ok()
        });

        match (schedule, channel) {
            (Some(schedule), _) => {
                tracing::debug!(
                    start = %schedule.start,
                    end = %schedule.end,
                    percent = schedule.percent,
                    "programme information"
                );
                format!("{} - {} [{} - {}]", title, program_title, schedule.start, schedule.end)
            }
            (None, Some(channel)) => format!("{}: {} - {}", channel, title, program_title),
            (None, None) => format!("{} - {}", title, program_title),
        }
    }

    /// Fold the speaker volume into the projection
    pub fn apply_volume(&mut self, info: Option<&VolumeInfo>) -> Vec<DeviceUpdate> {
        let Some(info) = info else {
            tracing::debug!("no speaker volume reported");
            return Vec::new();
        };

        self.projection.volume = info.volume;
        self.projection.muted = info.mute;

        if self.volume_control {
            vec![self.volume_update(N_LEVEL)]
        } else {
            Vec::new()
        }
    }

    /// Adjust the label after a power transition
    pub fn power_changed(&mut self, state: PowerState) {
        let label = &mut self.projection.label;
        match state {
            PowerState::ConnectedOn => {
                if matches!(label, Label::Off | Label::Starting) {
                    *label = Label::Empty;
                }
            }
            PowerState::Starting => *label = Label::Starting,
            _ => {
                if *label == Label::Starting {
                    *label = Label::Off;
                }
            }
        }
    }

    /// Publish the whole projection, or the off baseline when the set is off
    ///
    /// A set that is still booting keeps its "TV starting" label.
    pub fn sync(&mut self, power_on: bool) -> Vec<DeviceUpdate> {
        if !power_on {
            if self.projection.label == Label::Starting {
                return vec![
                    DeviceUpdate::new(DeviceUnit::Status, N_ON, self.projection.label.to_string()),
                    self.level_update(DeviceUnit::Source, self.projection.source),
                ];
            }
            return self.clear();
        }

        if self.projection.label == Label::Off {
            return self.clear();
        }

        let mut updates = Vec::new();
        if self.projection.label.is_empty() {
            tracing::debug!("no playing content to show yet");
        } else {
            updates.push(DeviceUpdate::new(
                DeviceUnit::Status,
                N_ON,
                self.projection.label.to_string(),
            ));
            updates.push(self.level_update(DeviceUnit::Source, self.projection.source));
        }
        if self.volume_control {
            updates.push(self.volume_update(N_LEVEL));
        }
        updates.push(self.level_update(DeviceUnit::Control, self.projection.control));
        updates.push(self.level_update(DeviceUnit::Channel, self.projection.channel));
        updates
    }

    /// Reset the projection and switch every device off
    pub fn clear(&mut self) -> Vec<DeviceUpdate> {
        self.projection.reset();
        let off = self.projection.label.to_string();

        let mut updates = vec![DeviceUpdate::new(DeviceUnit::Status, N_OFF, off.clone())];
        if self.reserve_info_unit {
            updates.push(DeviceUpdate::new(DeviceUnit::Info, N_OFF, off));
        }
        if self.volume_control {
            updates.push(self.volume_update(N_OFF));
        }
        for unit in [DeviceUnit::Source, DeviceUnit::Control, DeviceUnit::Channel] {
            updates.push(DeviceUpdate::new(unit, N_OFF, "0"));
        }
        updates
    }

    /// Volume device update; `n_value` 0 is muted, 1 unmuted, 2 set to a level
    pub fn volume_update(&self, n_value: i32) -> DeviceUpdate {
        DeviceUpdate::new(DeviceUnit::Volume, n_value, self.projection.volume.to_string())
    }

    fn level_update(&self, unit: DeviceUnit, level: i32) -> DeviceUpdate {
        DeviceUpdate::new(unit, N_ON, level.to_string())
    }
}

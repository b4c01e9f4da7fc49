//! Drives one television on behalf of the host
//!
//! The host calls [`TvController::on_heartbeat`] on its update interval and
//! [`TvController::on_command`] when a user operates one of the devices from
//! [`TvController::device_definitions`]. Both block for at most a few request
//! timeouts and report their results through a [`DevicePublisher`]. Errors
//! are logged, never returned: the worst outcome of a failed call is a stale
//! or switched-off projection.

use bravia_api::{BraviaClient, IrCommand};
use chrono::Local;

use crate::config::AdapterConfig;
use crate::error::Result;
use crate::levels::{channel_command, ControlLevel, SourceLevel, CHANNEL_CHOOSE_LEVEL};
use crate::power::{PowerState, PowerTracker};
use crate::projection::{DeviceProjection, Label};
use crate::publisher::{device_definitions, DeviceDefinition, DevicePublisher, DeviceUnit};
use crate::reconciler::Reconciler;

/// Host command that moves a selector
const SET_LEVEL: &str = "Set Level";

/// Remote-control buttons the host can send to the status unit
pub fn remote_button(command: &str) -> Option<IrCommand> {
    Some(match command {
        "ChannelUp" => IrCommand::ChannelUp,
        "ChannelDown" => IrCommand::ChannelDown,
        "Channels" => IrCommand::Display,
        "VolumeUp" => IrCommand::VolumeUp,
        "VolumeDown" => IrCommand::VolumeDown,
        "Mute" => IrCommand::Mute,
        "Select" => IrCommand::Confirm,
        "Up" => IrCommand::Up,
        "Down" => IrCommand::Down,
        "Left" => IrCommand::Left,
        "Right" => IrCommand::Right,
        "Home" => IrCommand::Home,
        "Info" => IrCommand::Epg,
        "Back" => IrCommand::Return,
        "ContextMenu" => IrCommand::Options,
        "FullScreen" => IrCommand::Exit,
        "ShowSubtitles" => IrCommand::Input,
        "Stop" => IrCommand::Stop,
        "BigStepBack" => IrCommand::Pause,
        "Rewind" => IrCommand::Rewind,
        "PlayPause" => IrCommand::TvPause,
        "FastForward" => IrCommand::Forward,
        "BigStepForward" => IrCommand::Play,
        _ => return None,
    })
}

/// First letter upper case, the rest lower case
fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

#[derive(Debug)]
pub struct TvController {
    client: BraviaClient,
    config: AdapterConfig,
    power: PowerTracker,
    reconciler: Reconciler,
}

impl TvController {
    /// Validate `config` and build a controller with an HTTP client
    pub fn new(config: AdapterConfig) -> Result<Self> {
        config.validate()?;
        let client = config.client();
        Ok(Self::with_client(config, client))
    }

    /// Build a controller around an existing client
    pub fn with_client(config: AdapterConfig, client: BraviaClient) -> Self {
        tracing::debug!(
            host = client.host(),
            interval_secs = config.effective_update_interval().as_secs(),
            "creating TV controller"
        );
        Self {
            power: PowerTracker::new(config.max_missed_polls),
            reconciler: Reconciler::new(&config),
            client,
            config,
        }
    }

    pub fn config(&self) -> &AdapterConfig {
        &self.config
    }

    pub fn power_state(&self) -> PowerState {
        self.power.state()
    }

    pub fn projection(&self) -> &DeviceProjection {
        self.reconciler.projection()
    }

    pub fn client(&self) -> &BraviaClient {
        &self.client
    }

    pub fn client_mut(&mut self) -> &mut BraviaClient {
        &mut self.client
    }

    /// Devices the host should create for this configuration
    pub fn device_definitions(&self) -> Vec<DeviceDefinition> {
        device_definitions(&self.config)
    }

    /// Poll the set and publish what changed
    pub fn on_heartbeat(&mut self, publisher: &mut dyn DevicePublisher) {
        let state = match self.client.get_power_status() {
            Ok(status) => self.power.poll_succeeded(status.is_active()),
            Err(e) => {
                if e.is_unreachable() {
                    tracing::debug!("TV did not answer power poll: {}", e);
                } else {
                    tracing::warn!("power poll failed: {}", e);
                }
                self.power.poll_failed()
            }
        };
        self.reconciler.power_changed(state);

        if state.is_on() {
            self.refresh_playing_info(publisher);
        }
        publisher.publish_all(&self.reconciler.sync(state.is_on()));
    }

    /// The host could not reach the set at all
    pub fn on_connect_failed(&mut self, publisher: &mut dyn DevicePublisher) {
        tracing::debug!(host = self.client.host(), "could not connect to TV");
        self.power.disconnected();
        publisher.publish_all(&self.reconciler.clear());
    }

    /// Handle a user action on one of the host devices
    ///
    /// While the set is not on, only the status unit's `On` is honoured.
    pub fn on_command(
        &mut self,
        unit: DeviceUnit,
        command: &str,
        level: i32,
        publisher: &mut dyn DevicePublisher,
    ) {
        let command = command.trim();
        let action = capitalize(command.split(' ').next().unwrap_or_default());
        tracing::debug!(unit = unit.number(), command, level, "host command");

        if !self.power.state().is_on() {
            if unit == DeviceUnit::Status && action == "On" {
                self.turn_on(publisher);
            } else {
                tracing::debug!(command, "TV is not on, ignoring command");
            }
            return;
        }

        match unit {
            DeviceUnit::Status => {
                if action == "Off" {
                    self.turn_off(publisher);
                } else if let Some(button) = remote_button(command) {
                    self.press(button);
                } else {
                    tracing::debug!(command, "unknown remote button");
                }
            }
            DeviceUnit::Volume => self.volume_command(&action, level, publisher),
            DeviceUnit::Source if command == SET_LEVEL => self.select_source(level, publisher),
            DeviceUnit::Control if command == SET_LEVEL => self.select_control(level, publisher),
            DeviceUnit::Channel if command == SET_LEVEL => self.select_channel(level, publisher),
            _ => tracing::debug!(unit = unit.number(), command, "command not handled"),
        }
    }

    /// Release the client
    pub fn shutdown(self) {
        self.client.shutdown();
    }

    fn turn_on(&mut self, publisher: &mut dyn DevicePublisher) {
        let result = if self.client.mac_address().is_some() {
            self.client.turn_on()
        } else {
            tracing::debug!("no MAC address configured, starting TV with setPowerStatus");
            self.client.turn_on_command().map(|_| ())
        };

        match result {
            Ok(()) => {
                let state = self.power.turn_on_requested();
                self.reconciler.power_changed(state);
                publisher.publish_all(&self.reconciler.sync(state.is_on()));
            }
            Err(e) => tracing::debug!("could not start TV: {}", e),
        }
    }

    fn turn_off(&mut self, publisher: &mut dyn DevicePublisher) {
        if let Err(e) = self.client.turn_off() {
            tracing::warn!("power-off command failed: {}", e);
        }
        let state = self.power.turn_off_requested();
        self.reconciler.projection_mut().label = Label::Off;
        publisher.publish_all(&self.reconciler.sync(state.is_on()));
    }

    fn volume_command(&mut self, action: &str, level: i32, publisher: &mut dyn DevicePublisher) {
        match action {
            "Set" => match u8::try_from(level) {
                Ok(volume) if volume <= 100 => {
                    self.reconciler.projection_mut().volume = i64::from(volume);
                    if let Err(e) = self.client.set_volume_level(volume) {
                        tracing::warn!("setting volume failed: {}", e);
                    }
                }
                _ => tracing::warn!(level, "ignoring volume level outside 0..=100"),
            },
            "Off" | "On" => {
                if let Err(e) = self.client.mute() {
                    tracing::warn!("mute command failed: {}", e);
                }
                let unmuted = action == "On";
                self.reconciler.projection_mut().muted = !unmuted;
                publisher.publish_all(&[self.reconciler.volume_update(i32::from(unmuted))]);
            }
            _ => tracing::debug!(action, "unknown volume action"),
        }
    }

    fn select_source(&mut self, level: i32, publisher: &mut dyn DevicePublisher) {
        let Some(source) = SourceLevel::from_level(level) else {
            tracing::debug!(level, "unknown source level");
            return;
        };

        if let Some(button) = source.command() {
            self.press(button);
        }
        self.reconciler.projection_mut().source = source.level();
        if source == SourceLevel::Tv {
            self.refresh_playing_info(publisher);
        } else if let Some(label) = source.label() {
            self.reconciler.projection_mut().label = Label::Playing(label.to_string());
        }
        publisher.publish_all(&self.reconciler.sync(self.power.state().is_on()));
    }

    fn select_control(&mut self, level: i32, publisher: &mut dyn DevicePublisher) {
        let Some(control) = ControlLevel::from_level(level) else {
            tracing::debug!(level, "unknown control level");
            return;
        };

        if let Some(button) = control.command() {
            self.press(button);
        }
        self.reconciler.projection_mut().control = control.level();
        publisher.publish_all(&self.reconciler.sync(self.power.state().is_on()));
    }

    fn select_channel(&mut self, level: i32, publisher: &mut dyn DevicePublisher) {
        match channel_command(level) {
            Some(button) => self.press(button),
            None if level == CHANNEL_CHOOSE_LEVEL => {}
            None => {
                tracing::debug!(level, "unknown channel level");
                return;
            }
        }
        self.reconciler.projection_mut().channel = level;
        publisher.publish_all(&self.reconciler.sync(self.power.state().is_on()));
    }

    fn refresh_playing_info(&mut self, publisher: &mut dyn DevicePublisher) {
        let now = Local::now().naive_local();
        let updates = match self.client.get_playing_info() {
            Ok(info) => self.reconciler.apply_playing_info(Some(&info), now),
            Err(e) => {
                tracing::debug!("no playing content information: {}", e);
                self.reconciler.apply_playing_info(None, now)
            }
        };
        publisher.publish_all(&updates);

        if self.config.volume_control {
            match self.client.get_volume_info() {
                Ok(volume) => publisher.publish_all(&self.reconciler.apply_volume(volume.as_ref())),
                Err(e) => tracing::debug!("no volume information: {}", e),
            }
        }
    }

    fn press(&mut self, button: IrCommand) {
        if let Err(e) = self.client.send_command(button) {
            tracing::warn!(button = button.name(), "IR command failed: {}", e);
        }
    }
}

//! Host-facing devices and the capability to update them

use crate::config::AdapterConfig;
use crate::levels::{ControlLevel, SourceLevel, CHANNEL_SELECTOR_NAMES};

/// Numeric unit of a host device
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DeviceUnit {
    /// Placeholder text device
    Info,
    /// Speaker volume dimmer
    Volume,
    /// Input selector
    Source,
    /// Playback control selector
    Control,
    /// Channel preset selector
    Channel,
    /// Power switch carrying the "now playing" label
    Status,
}

impl DeviceUnit {
    pub const ALL: [DeviceUnit; 6] = [
        DeviceUnit::Info,
        DeviceUnit::Volume,
        DeviceUnit::Source,
        DeviceUnit::Control,
        DeviceUnit::Channel,
        DeviceUnit::Status,
    ];

    pub fn number(self) -> u8 {
        match self {
            DeviceUnit::Info => 1,
            DeviceUnit::Volume => 2,
            DeviceUnit::Source => 3,
            DeviceUnit::Control => 4,
            DeviceUnit::Channel => 5,
            DeviceUnit::Status => 7,
        }
    }

    pub fn from_number(number: u8) -> Option<Self> {
        Self::ALL.into_iter().find(|unit| unit.number() == number)
    }
}

/// One `(nValue, sValue)` update for a host device
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceUpdate {
    pub unit: DeviceUnit,
    pub n_value: i32,
    pub s_value: String,
}

impl DeviceUpdate {
    pub fn new(unit: DeviceUnit, n_value: i32, s_value: impl Into<String>) -> Self {
        Self {
            unit,
            n_value,
            s_value: s_value.into(),
        }
    }
}

/// Where device updates go
///
/// Implemented by the host glue. Units the host does not have should be
/// ignored.
pub trait DevicePublisher {
    fn publish(&mut self, unit: DeviceUnit, n_value: i32, s_value: &str);

    fn publish_all(&mut self, updates: &[DeviceUpdate]) {
        for update in updates {
            self.publish(update.unit, update.n_value, &update.s_value);
        }
    }
}

/// Collects updates in order, for hosts that apply them in a batch
impl DevicePublisher for Vec<DeviceUpdate> {
    fn publish(&mut self, unit: DeviceUnit, n_value: i32, s_value: &str) {
        self.push(DeviceUpdate::new(unit, n_value, s_value));
    }
}

/// How a device is presented by the host
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeviceKind {
    Text,
    Switch,
    Dimmer,
    Selector {
        level_names: &'static str,
        /// Render as a dropdown rather than buttons
        dropdown: bool,
    },
}

/// A device the host should create
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceDefinition {
    pub unit: DeviceUnit,
    pub name: &'static str,
    pub kind: DeviceKind,
}

/// Devices for a configuration, in unit order
pub fn device_definitions(config: &AdapterConfig) -> Vec<DeviceDefinition> {
    let mut devices = Vec::with_capacity(DeviceUnit::ALL.len());

    if config.reserve_info_unit {
        devices.push(DeviceDefinition {
            unit: DeviceUnit::Info,
            name: "Info",
            kind: DeviceKind::Text,
        });
    }
    if config.volume_control {
        devices.push(DeviceDefinition {
            unit: DeviceUnit::Volume,
            name: "Volume",
            kind: DeviceKind::Dimmer,
        });
    }
    devices.push(DeviceDefinition {
        unit: DeviceUnit::Source,
        name: "Source",
        kind: DeviceKind::Selector {
            level_names: SourceLevel::SELECTOR_NAMES,
            dropdown: false,
        },
    });
    devices.push(DeviceDefinition {
        unit: DeviceUnit::Control,
        name: "Control",
        kind: DeviceKind::Selector {
            level_names: ControlLevel::SELECTOR_NAMES,
            dropdown: false,
        },
    });
    devices.push(DeviceDefinition {
        unit: DeviceUnit::Channel,
        name: "Channel",
        kind: DeviceKind::Selector {
            level_names: CHANNEL_SELECTOR_NAMES,
            dropdown: true,
        },
    });
    devices.push(DeviceDefinition {
        unit: DeviceUnit::Status,
        name: "Status",
        kind: DeviceKind::Switch,
    });

    devices
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unit_numbers() {
        let numbers: Vec<u8> = DeviceUnit::ALL.iter().map(|u| u.number()).collect();
        assert_eq!(numbers, vec![1, 2, 3, 4, 5, 7]);
        assert_eq!(DeviceUnit::from_number(7), Some(DeviceUnit::Status));
        assert_eq!(DeviceUnit::from_number(6), None);
    }

    #[test]
    fn test_default_devices() {
        let units: Vec<DeviceUnit> = device_definitions(&AdapterConfig::default())
            .iter()
            .map(|d| d.unit)
            .collect();
        assert_eq!(
            units,
            vec![
                DeviceUnit::Info,
                DeviceUnit::Source,
                DeviceUnit::Control,
                DeviceUnit::Channel,
                DeviceUnit::Status
            ]
        );
    }

    #[test]
    fn test_volume_device_follows_config() {
        let config = AdapterConfig {
            volume_control: true,
            reserve_info_unit: false,
            ..Default::default()
        };
        let devices = device_definitions(&config);
        assert_eq!(devices[0].unit, DeviceUnit::Volume);
        assert_eq!(devices[0].kind, DeviceKind::Dimmer);
        assert!(devices.iter().all(|d| d.unit != DeviceUnit::Info));
    }

    #[test]
    fn test_vec_publisher_collects() {
        let mut updates: Vec<DeviceUpdate> = Vec::new();
        updates.publish(DeviceUnit::Status, 1, "HDMI 1");
        updates.publish_all(&[DeviceUpdate::new(DeviceUnit::Source, 1, "20")]);
        assert_eq!(
            updates,
            vec![
                DeviceUpdate::new(DeviceUnit::Status, 1, "HDMI 1"),
                DeviceUpdate::new(DeviceUnit::Source, 1, "20"),
            ]
        );
    }
}

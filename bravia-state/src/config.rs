//! Configuration for the television adapter
//!
//! This module defines the settings the host hands to [`TvController`]:
//! how to reach the set, how often to poll it, and the handful of
//! presentation policies the device projection follows.
//!
//! [`TvController`]: crate::controller::TvController

use std::time::Duration;

use bravia_api::{BraviaClient, DEFAULT_TIMEOUT};
use serde::{Deserialize, Serialize};

use crate::error::{Result, StateError};

/// Shortest heartbeat interval; leaves room for one request timeout
pub const MIN_UPDATE_INTERVAL: Duration = Duration::from_secs(10);

/// Longest heartbeat interval
pub const MAX_UPDATE_INTERVAL: Duration = Duration::from_secs(30);

/// MAC address placeholder meaning "no Wake-on-LAN, power on by request"
const NO_WOL_PLACEHOLDER: &str = "Android";

/// Configuration for one television
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdapterConfig {
    /// IP address or host name of the television
    /// Default: "192.168.1.191"
    pub host: String,

    /// Pre-shared key configured on the set
    /// Default: "sony"
    pub psk: String,

    /// MAC address for Wake-on-LAN
    /// Default: None (power on through `setPowerStatus`)
    pub mac_address: Option<String>,

    /// Expose the volume unit
    /// Default: false
    pub volume_control: bool,

    /// Requested heartbeat interval, see [`Self::effective_update_interval`]
    /// Default: 30 seconds
    pub update_interval: Duration,

    /// Connect and read timeout for each request
    /// Default: 5 seconds
    pub request_timeout: Duration,

    /// Failed polls tolerated while the set is starting up
    /// Default: 6
    pub max_missed_polls: u32,

    /// Label shown when the set plays something without a title,
    /// which in practice is a streaming app. `None` leaves the title empty.
    /// Default: Some("Netflix")
    pub untitled_playback_label: Option<String>,

    /// Create the unit-1 info device. Some hosts misbehave on the first
    /// device they create, so it is kept as a placeholder.
    /// Default: true
    pub reserve_info_unit: bool,
}

impl Default for AdapterConfig {
    fn default() -> Self {
        Self {
            host: "192.168.1.191".to_string(),
            psk: "sony".to_string(),
            mac_address: None,
            volume_control: false,
            update_interval: MAX_UPDATE_INTERVAL,
            request_timeout: DEFAULT_TIMEOUT,
            max_missed_polls: 6,
            untitled_playback_label: Some("Netflix".to_string()),
            reserve_info_unit: true,
        }
    }
}

impl AdapterConfig {
    pub fn new(host: impl Into<String>, psk: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            psk: psk.into(),
            ..Default::default()
        }
    }

    /// Heartbeat interval clamped to 10..=30 seconds
    pub fn effective_update_interval(&self) -> Duration {
        self.update_interval
            .clamp(MIN_UPDATE_INTERVAL, MAX_UPDATE_INTERVAL)
    }

    /// Validate the configuration and return any issues
    pub fn validate(&self) -> Result<()> {
        if self.host.trim().is_empty() {
            return Err(StateError::Config("Host must not be empty".to_string()));
        }

        if self.psk.is_empty() {
            return Err(StateError::Config("Pre-shared key must not be empty".to_string()));
        }

        if let Some(mac) = self.wake_on_lan_mac() {
            bravia_api::wol::parse_mac(mac)
                .map_err(|e| StateError::Config(e.to_string()))?;
        }

        if self.request_timeout == Duration::ZERO {
            return Err(StateError::Config(
                "Request timeout must be greater than 0".to_string(),
            ));
        }

        if self.request_timeout >= self.effective_update_interval() {
            return Err(StateError::Config(
                "Request timeout must be shorter than the update interval".to_string(),
            ));
        }

        Ok(())
    }

    /// Build the device client this configuration describes
    pub fn client(&self) -> BraviaClient {
        let mut builder = BraviaClient::builder(self.host.clone(), self.psk.clone())
            .timeout(self.request_timeout);
        if let Some(mac) = self.wake_on_lan_mac() {
            builder = builder.mac_address(mac);
        }
        builder.build()
    }

    /// MAC address to wake, ignoring blank values and the `"Android"` placeholder
    pub fn wake_on_lan_mac(&self) -> Option<&str> {
        self.mac_address
            .as_deref()
            .map(str::trim)
            .filter(|mac| !mac.is_empty() && !mac.eq_ignore_ascii_case(NO_WOL_PLACEHOLDER))
    }

    /// Set the Wake-on-LAN MAC address
    ///
    /// `"Android"` (any case) and blank values mean "no Wake-on-LAN".
    pub fn with_mac_address(mut self, mac: &str) -> Self {
        self.mac_address = Some(mac.to_string());
        self.mac_address = self.wake_on_lan_mac().map(str::to_string);
        self
    }

    pub fn with_volume_control(mut self, enabled: bool) -> Self {
        self.volume_control = enabled;
        self
    }

    pub fn with_update_interval(mut self, interval: Duration) -> Self {
        self.update_interval = interval;
        self
    }

    pub fn with_untitled_playback_label(mut self, label: Option<String>) -> Self {
        self.untitled_playback_label = label;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_default_config() {
        let config = AdapterConfig::default();
        assert_eq!(config.request_timeout, Duration::from_secs(5));
        assert_eq!(config.max_missed_polls, 6);
        assert_eq!(config.untitled_playback_label.as_deref(), Some("Netflix"));
        assert!(config.reserve_info_unit);
        assert!(config.validate().is_ok());
    }

    #[rstest]
    #[case(1, 10)]
    #[case(10, 10)]
    #[case(20, 20)]
    #[case(30, 30)]
    #[case(300, 30)]
    fn test_effective_update_interval(#[case] requested: u64, #[case] effective: u64) {
        let config = AdapterConfig::default().with_update_interval(Duration::from_secs(requested));
        assert_eq!(config.effective_update_interval(), Duration::from_secs(effective));
    }

    #[rstest]
    #[case("Android", None)]
    #[case("android", None)]
    #[case("  ", None)]
    #[case("fc:f1:52:0a:bc:01", Some("fc:f1:52:0a:bc:01"))]
    fn test_with_mac_address(#[case] input: &str, #[case] expected: Option<&str>) {
        let config = AdapterConfig::default().with_mac_address(input);
        assert_eq!(config.mac_address.as_deref(), expected);
    }

    #[test]
    fn test_config_validation() {
        let empty_host = AdapterConfig::new("", "sony");
        assert!(empty_host.validate().is_err());

        let empty_psk = AdapterConfig::new("192.168.1.191", "");
        assert!(empty_psk.validate().is_err());

        let bad_mac = AdapterConfig {
            mac_address: Some("not-a-mac".to_string()),
            ..Default::default()
        };
        assert!(matches!(bad_mac.validate(), Err(StateError::Config(_))));

        let slow_requests = AdapterConfig {
            request_timeout: Duration::from_secs(15),
            update_interval: Duration::from_secs(10),
            ..Default::default()
        };
        assert!(slow_requests.validate().is_err());
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: AdapterConfig =
            serde_json::from_str(r#"{"host": "10.0.0.5", "volume_control": true}"#).unwrap();
        assert_eq!(config.host, "10.0.0.5");
        assert_eq!(config.psk, "sony");
        assert!(config.volume_control);
        assert_eq!(config.update_interval, Duration::from_secs(30));
    }

    #[rstest]
    #[case(r#"{"mac_address": "Android"}"#)]
    #[case(r#"{"mac_address": " "}"#)]
    #[case(r#"{"mac_address": null}"#)]
    fn test_deserialized_placeholder_mac(#[case] json: &str) {
        let config: AdapterConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.wake_on_lan_mac(), None);
        assert!(config.validate().is_ok());
        assert_eq!(config.client().mac_address(), None);
    }

    #[test]
    fn test_client_from_config() {
        let config = AdapterConfig::new("tv.local", "1234").with_mac_address("fc:f1:52:0a:bc:01");
        let client = config.client();
        assert_eq!(client.host(), "tv.local");
        assert_eq!(client.mac_address(), Some("fc:f1:52:0a:bc:01"));
    }
}

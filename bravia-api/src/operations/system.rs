//! Operations on the `system` service

use serde::Deserialize;

use crate::command::CommandTable;
use crate::operation::parse_first;

/// Power state reported by `getPowerStatus`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PowerStatus {
    /// `"active"`, `"standby"` or `"off"`
    pub status: String,
}

impl PowerStatus {
    pub fn is_active(&self) -> bool {
        self.status == "active"
    }
}

/// Identity of the television
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SystemInformation {
    pub product: Option<String>,
    pub name: Option<String>,
    pub model: Option<String>,
    pub language: Option<String>,
    pub mac_addr: Option<String>,
}

/// One network interface from `getNetworkSettings`
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkInterface {
    pub netif: Option<String>,
    pub hw_addr: Option<String>,
    pub ip_addr_v4: Option<String>,
    pub gateway: Option<String>,
}

crate::define_bravia_operation! {
    operation: GetPowerStatus,
    method: "getPowerStatus",
    service: System,
    request: (),
    response: PowerStatus,
}

crate::define_bravia_operation! {
    operation: SetPowerStatus,
    method: "setPowerStatus",
    service: System,
    request: {
        status: String,
    },
    response: (),
    parse: |_result| Ok(()),
}

crate::define_bravia_operation! {
    operation: GetRemoteControllerInfo,
    method: "getRemoteControllerInfo",
    service: System,
    request: (),
    response: CommandTable,
    parse: |result| CommandTable::from_remote_controller_info(result),
}

crate::define_bravia_operation! {
    operation: GetSystemInformation,
    method: "getSystemInformation",
    service: System,
    request: (),
    response: SystemInformation,
}

// result[0] is the list of interfaces
crate::define_bravia_operation! {
    operation: GetNetworkSettings,
    method: "getNetworkSettings",
    service: System,
    request: (),
    response: Vec<NetworkInterface>,
    parse: |result| parse_first(result),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::operation::BraviaOperation;
    use crate::service::Service;
    use serde_json::{json, Value};

    #[test]
    fn test_get_power_status_body() {
        let body: Value = serde_json::from_str(&GetPowerStatus::build_body(&()).unwrap()).unwrap();
        assert_eq!(body["method"], "getPowerStatus");
        assert_eq!(body["params"], json!([]));
        assert_eq!(GetPowerStatus::SERVICE, Service::System);
    }

    #[test]
    fn test_set_power_status_body() {
        let request = SetPowerStatusRequest {
            status: "true".to_string(),
        };
        let body: Value = serde_json::from_str(&SetPowerStatus::build_body(&request).unwrap()).unwrap();
        assert_eq!(body["params"], json!([{"status": "true"}]));
    }

    #[test]
    fn test_power_status_parsing() {
        let status = GetPowerStatus::parse_result(&[json!({"status": "active"})]).unwrap();
        assert!(status.is_active());

        let status = GetPowerStatus::parse_result(&[json!({"status": "standby"})]).unwrap();
        assert!(!status.is_active());

        assert!(GetPowerStatus::parse_result(&[]).is_err());
    }

    #[test]
    fn test_system_information_parsing() {
        let info = GetSystemInformation::parse_result(&[json!({
            "product": "TV",
            "name": "BRAVIA",
            "model": "KD-55XE9005",
            "language": "dut",
            "macAddr": "fc:f1:52:00:00:01"
        })])
        .unwrap();
        assert_eq!(info.model.as_deref(), Some("KD-55XE9005"));
        assert_eq!(info.mac_addr.as_deref(), Some("fc:f1:52:00:00:01"));
    }

    #[test]
    fn test_network_settings_parsing() {
        let interfaces = GetNetworkSettings::parse_result(&[json!([
            {"netif": "eth0", "hwAddr": "fc:f1:52:00:00:01", "ipAddrV4": "192.168.1.191", "gateway": "192.168.1.1"},
            {"netif": "wlan0", "hwAddr": "fc:f1:52:00:00:02", "ipAddrV4": "", "gateway": ""}
        ])])
        .unwrap();
        assert_eq!(interfaces.len(), 2);
        assert_eq!(interfaces[0].ip_addr_v4.as_deref(), Some("192.168.1.191"));
    }

    #[test]
    fn test_remote_controller_info_parsing() {
        let table = GetRemoteControllerInfo::parse_result(&[
            json!({"bundled": true, "type": "IR_REMOTE_BUNDLE_TYPE_AEP_N"}),
            json!([{"name": "Mute", "value": "AAAAAQAAAAEAAAAUAw=="}]),
        ])
        .unwrap();
        assert_eq!(table.get("Mute"), Some("AAAAAQAAAAEAAAAUAw=="));
    }
}

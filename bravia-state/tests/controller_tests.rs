//! Controller behaviour against a scripted television

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use bravia_api::{BraviaClient, HttpResponse, IrCommand, Transport, TransportError};
use bravia_state::{
    AdapterConfig, DeviceUnit, DeviceUpdate, Label, PowerState, TvController,
};
use serde_json::Value;

const ACTIVE: &str = r#"{"result":[{"status":"active"}],"id":1}"#;
const STANDBY: &str = r#"{"result":[{"status":"standby"}],"id":1}"#;
const OK: &str = r#"{"result":[],"id":1}"#;

#[derive(Debug, Default)]
struct Script {
    responses: HashMap<String, String>,
    unreachable: bool,
    /// (path, body) of every request
    requests: Vec<(String, String)>,
}

#[derive(Debug, Clone, Default)]
struct FakeTv {
    script: Arc<Mutex<Script>>,
}

impl FakeTv {
    fn set(&self, method: &str, body: &str) {
        self.script
            .lock()
            .unwrap()
            .responses
            .insert(method.to_string(), body.to_string());
    }

    fn set_unreachable(&self, unreachable: bool) {
        self.script.lock().unwrap().unreachable = unreachable;
    }

    fn methods(&self) -> Vec<String> {
        self.script
            .lock()
            .unwrap()
            .requests
            .iter()
            .filter_map(|(_, body)| {
                serde_json::from_str::<Value>(body)
                    .ok()
                    .and_then(|v| v["method"].as_str().map(str::to_string))
            })
            .collect()
    }

    fn body_of(&self, method: &str) -> Option<Value> {
        self.script
            .lock()
            .unwrap()
            .requests
            .iter()
            .filter_map(|(_, body)| serde_json::from_str::<Value>(body).ok())
            .find(|v| v["method"] == method)
    }

    fn ircc_bodies(&self) -> Vec<String> {
        self.script
            .lock()
            .unwrap()
            .requests
            .iter()
            .filter(|(path, _)| path == "sony/IRCC")
            .map(|(_, body)| body.clone())
            .collect()
    }

    fn forget_requests(&self) {
        self.script.lock().unwrap().requests.clear();
    }
}

impl Transport for FakeTv {
    fn post(
        &self,
        path: &str,
        _headers: &[(&str, &str)],
        body: &str,
    ) -> Result<HttpResponse, TransportError> {
        let mut script = self.script.lock().unwrap();
        script.requests.push((path.to_string(), body.to_string()));
        if script.unreachable {
            return Err(TransportError::Network("timed out".to_string()));
        }

        let method = serde_json::from_str::<Value>(body)
            .ok()
            .and_then(|v| v["method"].as_str().map(str::to_string));
        let body = match method {
            Some(method) => script
                .responses
                .get(&method)
                .cloned()
                .unwrap_or_else(|| r#"{"error":[12,"getMethodNotImplemented"],"id":1}"#.to_string()),
            None => String::new(),
        };

        Ok(HttpResponse {
            status: 200,
            content_type: "application/json".to_string(),
            body,
        })
    }

    fn host(&self) -> &str {
        "fake-tv"
    }
}

fn controller(tv: &FakeTv, config: AdapterConfig) -> TvController {
    let client = BraviaClient::with_transport(Box::new(tv.clone()), "sony");
    TvController::with_client(config, client)
}

fn switched_on(tv: &FakeTv, config: AdapterConfig) -> TvController {
    tv.set("getPowerStatus", ACTIVE);
    tv.set(
        "getPlayingContentInfo",
        r#"{"result":[{"title":"HDMI 1","source":"extInput:hdmi","uri":"extInput:hdmi?port=1"}],"id":1}"#,
    );
    let mut controller = controller(tv, config);
    controller.on_heartbeat(&mut Vec::new());
    tv.forget_requests();
    controller
}

fn ircc(command: IrCommand) -> String {
    format!("<IRCCCode>{}</IRCCCode>", command.default_code())
}

#[test]
fn test_heartbeat_with_tuner_programme() {
    let tv = FakeTv::default();
    tv.set("getPowerStatus", ACTIVE);
    tv.set(
        "getPlayingContentInfo",
        r#"{"result":[{
            "programTitle":"News","title":"Channel 4","dispNum":"004",
            "startDateTime":"2017-03-24T20:00:00+0100","durationSec":3600,"source":"tv:dvbt"
        }],"id":1}"#,
    );
    let mut controller = controller(&tv, AdapterConfig::default());

    let mut updates: Vec<DeviceUpdate> = Vec::new();
    controller.on_heartbeat(&mut updates);

    assert_eq!(controller.power_state(), PowerState::ConnectedOn);
    assert_eq!(controller.projection().channel, 40);
    assert_eq!(controller.projection().source, 10);
    assert!(matches!(&controller.projection().label, Label::Playing(l) if l.starts_with("Channel 4 - News [20:00 - 21:00]")));
    assert!(updates
        .iter()
        .any(|u| u.unit == DeviceUnit::Status && u.n_value == 1 && u.s_value.starts_with("Channel 4 - News")));
    assert_eq!(tv.methods(), vec!["getPowerStatus", "getPlayingContentInfo"]);
}

#[test]
fn test_heartbeat_refreshes_volume_when_enabled() {
    let tv = FakeTv::default();
    tv.set(
        "getVolumeInformation",
        r#"{"result":[[{"target":"speaker","volume":22,"mute":false}]],"id":1}"#,
    );
    let mut controller = switched_on(&tv, AdapterConfig::default().with_volume_control(true));

    let mut updates: Vec<DeviceUpdate> = Vec::new();
    controller.on_heartbeat(&mut updates);

    assert_eq!(controller.projection().volume, 22);
    assert!(updates.contains(&DeviceUpdate::new(DeviceUnit::Volume, 2, "22")));
}

#[test]
fn test_heartbeat_standby_clears() {
    let tv = FakeTv::default();
    tv.set("getPowerStatus", STANDBY);
    let mut controller = controller(&tv, AdapterConfig::default());

    let mut updates: Vec<DeviceUpdate> = Vec::new();
    controller.on_heartbeat(&mut updates);

    assert_eq!(controller.power_state(), PowerState::ConnectedOff);
    assert_eq!(updates[0], DeviceUpdate::new(DeviceUnit::Status, 0, "Off"));
    assert!(updates.iter().all(|u| u.n_value == 0));
    assert_eq!(tv.methods(), vec!["getPowerStatus"]);
}

#[test]
fn test_unreachable_set_disconnects() {
    let tv = FakeTv::default();
    let mut controller = switched_on(&tv, AdapterConfig::default());
    tv.set_unreachable(true);

    let mut updates: Vec<DeviceUpdate> = Vec::new();
    controller.on_heartbeat(&mut updates);

    assert_eq!(controller.power_state(), PowerState::Disconnected);
    assert_eq!(controller.projection().label, Label::Off);
    assert!(updates.contains(&DeviceUpdate::new(DeviceUnit::Status, 0, "Off")));
}

#[test]
fn test_connect_failed_clears() {
    let tv = FakeTv::default();
    let mut controller = switched_on(&tv, AdapterConfig::default());

    let mut updates: Vec<DeviceUpdate> = Vec::new();
    controller.on_connect_failed(&mut updates);

    assert_eq!(controller.power_state(), PowerState::Disconnected);
    assert!(updates.iter().all(|u| u.n_value == 0));
}

#[test]
fn test_power_on_without_mac() {
    let tv = FakeTv::default();
    tv.set("getPowerStatus", STANDBY);
    tv.set("setPowerStatus", OK);
    let mut controller = controller(&tv, AdapterConfig::default());
    controller.on_heartbeat(&mut Vec::new());

    let mut updates: Vec<DeviceUpdate> = Vec::new();
    controller.on_command(DeviceUnit::Status, "On", 0, &mut updates);

    assert_eq!(controller.power_state(), PowerState::Starting);
    assert_eq!(updates[0], DeviceUpdate::new(DeviceUnit::Status, 1, "TV starting"));
    assert_eq!(tv.body_of("setPowerStatus").unwrap()["params"][0]["status"], "true");
    assert!(tv.ircc_bodies().iter().any(|b| b.contains(&ircc(IrCommand::Power))));
}

#[test]
fn test_starting_survives_missed_polls() {
    let tv = FakeTv::default();
    tv.set("getPowerStatus", STANDBY);
    tv.set("setPowerStatus", OK);
    let config = AdapterConfig {
        max_missed_polls: 2,
        ..Default::default()
    };
    let mut controller = controller(&tv, config);
    controller.on_heartbeat(&mut Vec::new());
    controller.on_command(DeviceUnit::Status, "on", 0, &mut Vec::new());
    tv.set_unreachable(true);

    for _ in 0..2 {
        let mut updates: Vec<DeviceUpdate> = Vec::new();
        controller.on_heartbeat(&mut updates);
        assert_eq!(controller.power_state(), PowerState::Starting);
        assert_eq!(updates[0], DeviceUpdate::new(DeviceUnit::Status, 1, "TV starting"));
    }

    controller.on_heartbeat(&mut Vec::new());
    assert_eq!(controller.power_state(), PowerState::Disconnected);
    assert_eq!(controller.projection().label, Label::Off);
}

#[test]
fn test_boot_completes() {
    let tv = FakeTv::default();
    tv.set("getPowerStatus", STANDBY);
    tv.set("setPowerStatus", OK);
    let mut controller = controller(&tv, AdapterConfig::default());
    controller.on_heartbeat(&mut Vec::new());
    controller.on_command(DeviceUnit::Status, "On", 0, &mut Vec::new());

    tv.set("getPowerStatus", ACTIVE);
    tv.set("getPlayingContentInfo", r#"{"result":[{"title":""}],"id":1}"#);
    controller.on_heartbeat(&mut Vec::new());

    assert_eq!(controller.power_state(), PowerState::ConnectedOn);
    assert_eq!(controller.projection().label, Label::Playing("Netflix".to_string()));
}

#[test]
fn test_commands_ignored_while_off() {
    let tv = FakeTv::default();
    tv.set("getPowerStatus", STANDBY);
    let mut controller = controller(&tv, AdapterConfig::default());
    controller.on_heartbeat(&mut Vec::new());
    tv.forget_requests();

    let mut updates: Vec<DeviceUpdate> = Vec::new();
    controller.on_command(DeviceUnit::Source, "Set Level", 20, &mut updates);
    controller.on_command(DeviceUnit::Status, "VolumeUp", 0, &mut updates);

    assert!(updates.is_empty());
    assert!(tv.methods().is_empty());
    assert!(tv.ircc_bodies().is_empty());
}

#[test]
fn test_power_off() {
    let tv = FakeTv::default();
    let mut controller = switched_on(&tv, AdapterConfig::default());

    let mut updates: Vec<DeviceUpdate> = Vec::new();
    controller.on_command(DeviceUnit::Status, "Off", 0, &mut updates);

    assert_eq!(controller.power_state(), PowerState::ConnectedOff);
    assert!(tv.ircc_bodies()[0].contains(&ircc(IrCommand::PowerOff)));
    assert_eq!(updates[0], DeviceUpdate::new(DeviceUnit::Status, 0, "Off"));
}

#[test]
fn test_remote_button() {
    let tv = FakeTv::default();
    let mut controller = switched_on(&tv, AdapterConfig::default());

    controller.on_command(DeviceUnit::Status, "BigStepForward", 0, &mut Vec::new());
    controller.on_command(DeviceUnit::Status, "Teletext", 0, &mut Vec::new());

    let sent = tv.ircc_bodies();
    assert_eq!(sent.len(), 1);
    assert!(sent[0].contains(&ircc(IrCommand::Play)));
}

#[test]
fn test_select_hdmi_source() {
    let tv = FakeTv::default();
    let mut controller = switched_on(&tv, AdapterConfig::default());

    let mut updates: Vec<DeviceUpdate> = Vec::new();
    controller.on_command(DeviceUnit::Source, "Set Level", 30, &mut updates);

    assert!(tv.ircc_bodies()[0].contains(&ircc(IrCommand::Hdmi2)));
    assert_eq!(controller.projection().source, 30);
    assert!(updates.contains(&DeviceUpdate::new(DeviceUnit::Status, 1, "HDMI 2")));
    assert!(updates.contains(&DeviceUpdate::new(DeviceUnit::Source, 1, "30")));
}

#[test]
fn test_select_tv_source_polls_content() {
    let tv = FakeTv::default();
    let mut controller = switched_on(&tv, AdapterConfig::default());

    controller.on_command(DeviceUnit::Source, "Set Level", 10, &mut Vec::new());

    assert!(tv.ircc_bodies()[0].contains(&ircc(IrCommand::Tv)));
    assert!(tv.methods().contains(&"getPlayingContentInfo".to_string()));
}

#[test]
fn test_control_and_channel_selectors() {
    let tv = FakeTv::default();
    let mut controller = switched_on(&tv, AdapterConfig::default());

    controller.on_command(DeviceUnit::Control, "Set Level", 40, &mut Vec::new());
    controller.on_command(DeviceUnit::Channel, "Set Level", 70, &mut Vec::new());
    controller.on_command(DeviceUnit::Channel, "Set Level", 100, &mut Vec::new());

    let sent = tv.ircc_bodies();
    assert_eq!(sent.len(), 2);
    assert!(sent[0].contains(&ircc(IrCommand::TvPause)));
    assert!(sent[1].contains(&ircc(IrCommand::Num7)));
    assert_eq!(controller.projection().control, 40);
    assert_eq!(controller.projection().channel, 100);
}

#[test]
fn test_volume_commands() {
    let tv = FakeTv::default();
    tv.set("setAudioVolume", r#"{"result":[0],"id":1}"#);
    let mut controller = switched_on(&tv, AdapterConfig::default().with_volume_control(true));

    controller.on_command(DeviceUnit::Volume, "Set Level", 25, &mut Vec::new());
    assert_eq!(tv.body_of("setAudioVolume").unwrap()["params"][0]["volume"], "25");

    let mut updates: Vec<DeviceUpdate> = Vec::new();
    controller.on_command(DeviceUnit::Volume, "Off", 0, &mut updates);
    assert!(tv.ircc_bodies()[0].contains(&ircc(IrCommand::Mute)));
    assert_eq!(updates, vec![DeviceUpdate::new(DeviceUnit::Volume, 0, "25")]);
    assert!(controller.projection().muted);
}

#[test]
fn test_device_definitions() {
    let tv = FakeTv::default();
    let controller = controller(&tv, AdapterConfig::default().with_volume_control(true));
    let units: Vec<u8> = controller
        .device_definitions()
        .iter()
        .map(|d| d.unit.number())
        .collect();
    assert_eq!(units, vec![1, 2, 3, 4, 5, 7]);
}

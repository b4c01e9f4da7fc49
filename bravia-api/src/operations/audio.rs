//! Operations on the `audio` service

use serde::Deserialize;

/// Volume state of one audio output
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VolumeInfo {
    /// `"speaker"` or `"headphone"`
    pub target: String,
    pub volume: i64,
    #[serde(default)]
    pub mute: bool,
    pub max_volume: Option<i64>,
    pub min_volume: Option<i64>,
}

// result[0] is one entry per output
crate::define_bravia_operation! {
    operation: GetVolumeInformation,
    method: "getVolumeInformation",
    service: Audio,
    request: (),
    response: Vec<VolumeInfo>,
}

crate::define_bravia_operation! {
    operation: SetAudioVolume,
    method: "setAudioVolume",
    service: Audio,
    request: {
        target: String,
        volume: String,
    },
    response: (),
    parse: |_result| Ok(()),
}

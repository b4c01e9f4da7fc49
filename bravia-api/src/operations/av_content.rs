//! Operations on the `avContent` service

use serde::Deserialize;

use crate::operation::parse_first;

/// What the television is currently showing
///
/// Every field is optional: tuner content carries programme data, while
/// external inputs and apps typically report only `title`, `source` and `uri`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayingContentInfo {
    pub program_title: Option<String>,
    pub title: Option<String>,
    pub program_media_type: Option<String>,
    pub disp_num: Option<String>,
    pub source: Option<String>,
    pub uri: Option<String>,
    pub duration_sec: Option<u64>,
    /// e.g. `2017-03-24T20:15:00+0100`
    pub start_date_time: Option<String>,
}

/// An input source scheme entry from `getSourceList`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SourceInfo {
    /// e.g. `tv:dvbt`, `extInput:hdmi`
    pub source: String,
}

/// A channel or input from `getContentList`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentItem {
    pub title: String,
    pub uri: String,
    pub index: Option<u32>,
    pub disp_num: Option<String>,
}

crate::define_bravia_operation! {
    operation: GetPlayingContentInfo,
    method: "getPlayingContentInfo",
    service: AvContent,
    request: (),
    response: PlayingContentInfo,
}

crate::define_bravia_operation! {
    operation: SetPlayContent,
    method: "setPlayContent",
    service: AvContent,
    request: {
        uri: String,
    },
    response: (),
    parse: |_result| Ok(()),
}

crate::define_bravia_operation! {
    operation: GetSourceList,
    method: "getSourceList",
    service: AvContent,
    request: {
        scheme: String,
    },
    response: Vec<SourceInfo>,
}

crate::define_bravia_operation! {
    operation: GetContentList,
    method: "getContentList",
    service: AvContent,
    request: {
        source: String,
        st_idx: u32,
    },
    response: Vec<ContentItem>,
    parse: |result| match result.first() {
        Some(_) => parse_first(result),
        None => Ok(Vec::new()),
    },
}

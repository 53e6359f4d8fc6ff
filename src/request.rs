// Request payloads understood by the live room service. Field names follow
// the protobuf JSON mapping (camelCase) so the service can load them
// straight into its messages. Repeated fields are always written, even empty.

use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CreateRoom {
    pub room_id: String,
    pub input_urls: Vec<String>,
    pub room_output_base_url: String,
    pub output_stream_infos: Vec<OutputStreamInfo>,
}

/// One output attached to a room: a setting preset plus optional explicit
/// destinations.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct OutputStreamInfo {
    pub output_setting_id: String,
    pub output_urls: Vec<String>,
}

/// Also the shape of `AddNewOutput`.
pub type AddNewOutput = OutputStreamInfo;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct InputStream {
    pub input_url: String,
}

/// `AddNewInputStream`, `CloseOneInputStream` and `GetOneInputStreamInfo`
/// all carry a single input url.
pub type AddNewInputStream = InputStream;
pub type CloseOneInputStream = InputStream;
pub type GetOneInputStreamInfo = InputStream;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct OutputSetting {
    pub output_setting_id: String,
}

pub type CloseOneOutput = OutputSetting;
pub type GetOneOutputStreamInfo = OutputSetting;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct AudioMixMuteUnMute {
    pub mute_input_urls: Vec<String>,
    pub unmute_input_urls: Vec<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct VideoMixChangeLayout {
    pub new_layout: LayoutUpdate,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct LayoutUpdate {
    pub layout: MixLayout,
}

/// Mix layouts the menu offers. Serialized by their enum value names.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum MixLayout {
    #[serde(rename = "eSingle_1")]
    Single1,
    #[serde(rename = "eEqual_4")]
    Equal4,
    #[serde(rename = "eEqual_9")]
    Equal9,
}

/// Background image update. The misspelt field name is the service's.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct VideoMixUpdateBackgroud {
    pub backgroud_image_url: String,
}

/// Reply the service writes for every request. Only used for logging;
/// the raw body is what gets shown to the user.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct CommonResponse {
    pub code: i32,
    pub msg: String,
    pub b_sync_resp: bool,
}

impl CommonResponse {
    /// Best-effort decode; `None` when the body is not a `CommonResponse`.
    pub fn parse(body: &str) -> Option<Self> {
        serde_json::from_str(body).ok()
    }
}

/// Serialize a payload the way it goes on the wire.
pub fn to_body<T: Serialize>(payload: &T) -> serde_json::Result<String> {
    serde_json::to_string_pretty(payload)
}

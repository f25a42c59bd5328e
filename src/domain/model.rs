use serde::{Deserialize, Serialize};
use std::fmt;

/// 播放清單項目的識別碼，由清單從 1 開始遞增配發
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntryId(u64);

impl EntryId {
    pub fn new(value: u64) -> Self {
        Self(value)
    }

    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ClipType {
    Media,
    Static,
    #[serde(rename = "VAST")]
    Vast,
    SeekToStart,
    ProgramContent,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RollType {
    Pre,
    Post,
    Mid,
    Now,
    Pod,
}

impl fmt::Display for RollType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RollType::Pre => "Pre",
            RollType::Post => "Post",
            RollType::Mid => "Mid",
            RollType::Now => "Now",
            RollType::Pod => "Pod",
        };
        f.write_str(name)
    }
}

/// 線性時間軸上的一個項目（正片片段或廣告）。
///
/// `id`、`id_split_from`、`split_count` 只有播放清單能修改。
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaylistEntry {
    #[serde(rename = "clipURI")]
    pub clip_uri: Option<String>,
    #[serde(rename = "eClipType")]
    pub clip_type: Option<ClipType>,
    pub linear_start_time: f64,
    /// 0 代表暫停時間軸的廣告
    pub linear_duration: f64,
    pub clip_begin_media_time: f64,
    /// -1 代表無上限
    pub clip_end_media_time: f64,
    pub is_advertisement: bool,
    #[serde(rename = "playbackPolicyObj")]
    pub playback_policy: serde_json::Value,
    pub delete_after_played: bool,
    id: EntryId,
    id_split_from: EntryId,
    split_count: u32,
}

impl PlaylistEntry {
    pub(crate) fn new(id: EntryId) -> Self {
        Self {
            clip_uri: None,
            clip_type: None,
            linear_start_time: 0.0,
            linear_duration: 0.0,
            clip_begin_media_time: 0.0,
            clip_end_media_time: 0.0,
            is_advertisement: true,
            playback_policy: serde_json::Value::Object(serde_json::Map::new()),
            delete_after_played: false,
            id,
            id_split_from: id,
            split_count: 0,
        }
    }

    /// 從 `source` 的 `offset` 處切出後半段
    pub(crate) fn split_tail(id: EntryId, source: &PlaylistEntry, offset: f64) -> Self {
        Self {
            clip_uri: source.clip_uri.clone(),
            clip_type: source.clip_type,
            linear_start_time: source.linear_start_time + offset,
            linear_duration: source.linear_duration - offset,
            clip_begin_media_time: source.clip_begin_media_time + offset,
            clip_end_media_time: source.clip_end_media_time,
            is_advertisement: source.is_advertisement,
            playback_policy: source.playback_policy.clone(),
            delete_after_played: source.delete_after_played,
            id,
            id_split_from: source.id_split_from,
            split_count: 0,
        }
    }

    pub fn id(&self) -> EntryId {
        self.id
    }

    pub fn id_split_from(&self) -> EntryId {
        self.id_split_from
    }

    pub fn split_count(&self) -> u32 {
        self.split_count
    }

    pub fn linear_end_time(&self) -> f64 {
        self.linear_start_time + self.linear_duration
    }

    pub fn is_overlay(&self) -> bool {
        self.linear_duration > 0.0
    }

    pub fn is_seek_to_start(&self) -> bool {
        self.clip_type == Some(ClipType::SeekToStart)
    }

    pub(crate) fn mark_changed(&mut self) {
        self.split_count += 1;
    }
}

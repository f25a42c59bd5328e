use crate::config::SchedulerConfig;
use crate::core::playlist::SequentialPlaylist;
use crate::domain::model::{ClipType, EntryId, PlaylistEntry, RollType};
use crate::domain::ports::SchedulerSettings;
use crate::utils::error::{Result, SchedulerError};
use crate::utils::validation::{validate_finite, validate_min_duration};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// 正片片段參數；長度為 `clip_end_media_time - clip_begin_media_time`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentClipParams {
    #[serde(rename = "clipURI", default)]
    pub clip_uri: Option<String>,
    pub clip_begin_media_time: f64,
    pub clip_end_media_time: f64,
}

/// 廣告片段參數
///
/// 預設值與 `createScheduleClipParams` 回傳的線上物件相同。
/// `clipEndMediaTime` 欄位不存在時才由 `linear_duration` 推算；明確給 `null` 視為 0。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleClipParams {
    #[serde(rename = "clipURI", default)]
    pub clip_uri: Option<String>,
    #[serde(rename = "eClipType", default)]
    pub clip_type: Option<ClipType>,
    #[serde(default, deserialize_with = "deserialize_media_time")]
    pub clip_begin_media_time: Option<f64>,
    /// `None` 時由 `linear_duration` 推算
    #[serde(default, deserialize_with = "deserialize_media_time")]
    pub clip_end_media_time: Option<f64>,
    /// 僅 mid-roll 使用
    #[serde(default)]
    pub start_time: f64,
    /// 0 表示暫停時間軸；大於 0 為 overlay
    #[serde(default)]
    pub linear_duration: f64,
    #[serde(rename = "playbackPolicyObj", default)]
    pub playback_policy: Option<serde_json::Value>,
    #[serde(default)]
    pub delete_after_played: Option<bool>,
    #[serde(rename = "eRollType", default)]
    pub roll_type: Option<RollType>,
    /// 廣告組（Pod）要接在哪個項目之後；線上格式以 -1 表示未指定
    #[serde(
        default,
        serialize_with = "serialize_append_to",
        deserialize_with = "deserialize_append_to"
    )]
    pub append_to: Option<EntryId>,
}

impl Default for ScheduleClipParams {
    fn default() -> Self {
        Self {
            clip_uri: None,
            clip_type: None,
            clip_begin_media_time: Some(0.0),
            clip_end_media_time: Some(0.0),
            start_time: 0.0,
            linear_duration: 0.0,
            playback_policy: Some(serde_json::json!({})),
            delete_after_played: Some(false),
            roll_type: None,
            append_to: None,
        }
    }
}

/// 欄位存在但為 `null` 時回傳 `Some(0.0)`
fn deserialize_media_time<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> std::result::Result<Option<f64>, D::Error> {
    Ok(Some(Option::<f64>::deserialize(deserializer)?.unwrap_or(0.0)))
}

fn serialize_append_to<S: Serializer>(
    value: &Option<EntryId>,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    match value {
        Some(id) => serializer.serialize_i64(id.get() as i64),
        None => serializer.serialize_i64(-1),
    }
}

fn deserialize_append_to<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> std::result::Result<Option<EntryId>, D::Error> {
    let raw = Option::<i64>::deserialize(deserializer)?;
    Ok(raw
        .filter(|value| *value > 0)
        .map(|value| EntryId::new(value as u64)))
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SeekToStartParams {
    /// 有值時代表直播內容
    #[serde(rename = "clipURI", default)]
    pub clip_uri: Option<String>,
}

/// VOD 內容的排程器：先放入正片，再排入廣告
#[derive(Debug, Clone, Default)]
pub struct Scheduler {
    playlist: SequentialPlaylist,
    config: SchedulerConfig,
}

impl Scheduler {
    pub fn new(config: SchedulerConfig) -> Self {
        Self {
            playlist: SequentialPlaylist::new(&config),
            config,
        }
    }

    pub fn config(&self) -> &SchedulerConfig {
        &self.config
    }

    pub fn playlist(&self) -> &SequentialPlaylist {
        &self.playlist
    }

    pub fn playlist_mut(&mut self) -> &mut SequentialPlaylist {
        &mut self.playlist
    }

    pub fn reset(&mut self) {
        self.playlist.remove_all_entries();
        tracing::debug!("Schedule reset");
    }

    pub fn remove_clip(&mut self, id: EntryId) -> Result<PlaylistEntry> {
        self.playlist.remove(id)
    }

    /// 在尾端加入正片片段；排入任何廣告前至少要呼叫一次
    pub fn append_content_clip(&mut self, params: ContentClipParams) -> Result<PlaylistEntry> {
        validate_finite("clipBeginMediaTime", params.clip_begin_media_time)?;
        validate_finite("clipEndMediaTime", params.clip_end_media_time)?;
        let duration = params.clip_end_media_time - params.clip_begin_media_time;
        validate_min_duration(
            "appendContentClip",
            duration,
            self.config.min_clip_duration(),
        )?;

        let mut entry = self.playlist.create_entry();
        entry.clip_uri = params.clip_uri;
        entry.clip_type = Some(ClipType::ProgramContent);
        entry.clip_begin_media_time = params.clip_begin_media_time;
        entry.clip_end_media_time = params.clip_end_media_time;
        entry.linear_duration = duration;
        entry.is_advertisement = false;

        let inserted = self.playlist.insert_entry_after_end(entry)?.clone();
        tracing::info!(
            "Appended content clip {} ({}s)",
            inserted.id(),
            inserted.linear_duration
        );
        Ok(inserted)
    }

    /// 排入廣告；包含該時間點的正片必須已經加入
    pub fn schedule_clip(&mut self, params: ScheduleClipParams) -> Result<PlaylistEntry> {
        let roll_type = params
            .roll_type
            .ok_or_else(|| SchedulerError::InvalidRollType("undefined".to_string()))?;

        let clip_begin = params.clip_begin_media_time.unwrap_or(0.0);
        let clip_end = match params.clip_end_media_time {
            Some(clip_end) => {
                validate_min_duration(
                    "scheduleClip",
                    clip_end - clip_begin,
                    self.config.min_clip_duration(),
                )?;
                clip_end
            }
            None if params.linear_duration == 0.0 => return Err(SchedulerError::MissingClipEnd),
            None => clip_begin + params.linear_duration,
        };

        let mut entry = self.playlist.create_entry();
        entry.clip_uri = params.clip_uri;
        entry.clip_type = params.clip_type;
        entry.linear_duration = params.linear_duration;
        entry.clip_begin_media_time = clip_begin;
        entry.clip_end_media_time = clip_end;
        entry.is_advertisement = true;
        if let Some(policy) = params.playback_policy {
            entry.playback_policy = policy;
        }
        if let Some(delete_after_played) = params.delete_after_played {
            entry.delete_after_played = delete_after_played;
        }

        let inserted = match roll_type {
            RollType::Pre => {
                entry.linear_duration = 0.0;
                self.playlist.insert_entry_before_beginning(entry)?
            }
            RollType::Post => {
                entry.linear_duration = 0.0;
                self.playlist.insert_entry_after_end(entry)?
            }
            RollType::Pod => {
                let append_to = params.append_to.ok_or_else(|| {
                    SchedulerError::InvalidRequest("scheduleClip Pod requires appendTo".to_string())
                })?;
                self.playlist.insert_entry_after_id(append_to, entry)?
            }
            RollType::Mid => {
                entry.linear_start_time = params.start_time;
                self.playlist.insert_entry(entry)?
            }
            RollType::Now => return Err(SchedulerError::InvalidRollType(roll_type.to_string())),
        }
        .clone();

        tracing::info!(
            "Scheduled {} ad {} at {}",
            roll_type,
            inserted.id(),
            inserted.linear_start_time
        );
        Ok(inserted)
    }

    /// 設定回到開頭的標記；已存在時回傳 `None`
    pub fn set_seek_to_start(
        &mut self,
        params: Option<SeekToStartParams>,
    ) -> Result<Option<PlaylistEntry>> {
        let mut entry = self.playlist.create_entry();
        if let Some(clip_uri) = params.and_then(|params| params.clip_uri) {
            entry.clip_uri = Some(clip_uri);
        }
        entry.clip_type = Some(ClipType::SeekToStart);
        entry.clip_end_media_time = -1.0;
        entry.delete_after_played = true;
        entry.is_advertisement = true;

        Ok(self.playlist.insert_seek_to_start(entry)?.cloned())
    }

    /// 以 JSON 字串呼叫排程器，見 [`crate::core::json_runner::run_json`]
    pub fn run_json(&mut self, request: &str) -> String {
        crate::core::json_runner::run_json(self, request)
    }
}

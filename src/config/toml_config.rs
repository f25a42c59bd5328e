use crate::config::SchedulerConfig;
use crate::core::scheduler::{ContentClipParams, ScheduleClipParams, Scheduler, SeekToStartParams};
use crate::domain::model::{ClipType, EntryId, RollType};
use crate::utils::error::{Result, SchedulerError};
use crate::utils::validation::{validate_finite, validate_non_empty_string, Validate};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

/// TOML 排程檔：正片片段、廣告與排程器設定
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScheduleFile {
    #[serde(default)]
    pub scheduler: SchedulerConfig,
    #[serde(default)]
    pub content: Vec<ContentSection>,
    #[serde(default)]
    pub ads: Vec<AdSection>,
    pub seek_to_start: Option<SeekToStartSection>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentSection {
    pub uri: String,
    #[serde(default)]
    pub begin: f64,
    pub end: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdSection {
    /// 用來在同一檔案中讓 pod 參照
    pub name: Option<String>,
    pub uri: String,
    pub clip_type: ClipType,
    pub roll: RollType,
    #[serde(default)]
    pub start_time: f64,
    #[serde(default)]
    pub linear_duration: f64,
    pub begin: Option<f64>,
    pub end: Option<f64>,
    #[serde(default)]
    pub delete_after_played: bool,
    /// pod 要接在哪個具名廣告之後
    pub after: Option<String>,
    pub policy: Option<HashMap<String, String>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SeekToStartSection {
    pub uri: Option<String>,
}

impl ScheduleFile {
    /// 從 TOML 檔案載入排程
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析排程
    pub fn from_toml_str(content: &str) -> Result<Self> {
        // 處理環境變數替換
        let processed = Self::substitute_env_vars(content)?;

        toml::from_str(&processed)
            .map_err(|e| SchedulerError::config(format!("TOML parsing error: {}", e)))
    }

    /// 替換環境變數 (例如 ${MEDIA_HOST})，未設定的保持原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = regex::Regex::new(r"\$\{([^}]+)\}")
            .map_err(|e| SchedulerError::config(format!("invalid substitution pattern: {}", e)))?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    /// 依檔案內容建立排程器：先放正片，再依序排入廣告
    pub fn build_scheduler(&self) -> Result<Scheduler> {
        self.validate()?;

        let mut scheduler = Scheduler::new(self.scheduler);
        for clip in &self.content {
            scheduler.append_content_clip(ContentClipParams {
                clip_uri: Some(clip.uri.clone()),
                clip_begin_media_time: clip.begin,
                clip_end_media_time: clip.end,
            })?;
        }

        let mut named: HashMap<&str, EntryId> = HashMap::new();
        for ad in &self.ads {
            let append_to = match &ad.after {
                Some(after) => Some(*named.get(after.as_str()).ok_or_else(|| {
                    SchedulerError::config(format!("ads.after refers to unknown ad '{}'", after))
                })?),
                None => None,
            };

            let entry = scheduler.schedule_clip(ScheduleClipParams {
                clip_uri: Some(ad.uri.clone()),
                clip_type: Some(ad.clip_type),
                clip_begin_media_time: ad.begin,
                clip_end_media_time: ad.end,
                start_time: ad.start_time,
                linear_duration: ad.linear_duration,
                playback_policy: ad
                    .policy
                    .as_ref()
                    .map(|policy| serde_json::json!(policy)),
                delete_after_played: Some(ad.delete_after_played),
                roll_type: Some(ad.roll),
                append_to,
            })?;

            if let Some(name) = &ad.name {
                named.insert(name.as_str(), entry.id());
            }
        }

        if let Some(section) = &self.seek_to_start {
            scheduler.set_seek_to_start(Some(SeekToStartParams {
                clip_uri: section.uri.clone(),
            }))?;
        }

        tracing::info!(
            "Built schedule with {} content clips and {} ads",
            self.content.len(),
            self.ads.len()
        );
        Ok(scheduler)
    }
}

impl Validate for ScheduleFile {
    fn validate(&self) -> Result<()> {
        self.scheduler.validate()?;

        if self.content.is_empty() {
            return Err(SchedulerError::config(
                "schedule needs at least one [[content]] clip",
            ));
        }
        for clip in &self.content {
            validate_non_empty_string("content.uri", &clip.uri)?;
            validate_finite("content.begin", clip.begin)?;
            validate_finite("content.end", clip.end)?;
        }

        for ad in &self.ads {
            validate_non_empty_string("ads.uri", &ad.uri)?;
            if ad.roll == RollType::Pod && ad.after.is_none() {
                return Err(SchedulerError::config(format!(
                    "pod ad '{}' needs an `after` reference",
                    ad.uri
                )));
            }
        }
        Ok(())
    }
}

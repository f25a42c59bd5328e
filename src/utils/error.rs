use crate::domain::model::EntryId;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SchedulerError {
    #[error("{caller} called with invalid id {id}")]
    UnknownEntry { id: EntryId, caller: &'static str },

    #[error("entry {id} cannot be split")]
    CannotSplit { id: EntryId },

    #[error("insertEntry of non-advertisement")]
    NotAdvertisement,

    #[error("insertEntry linearStartTime {time} outside playlist range")]
    OutsideRange { time: f64 },

    #[error("insertEntry overlay across another ad")]
    OverlayAcrossAd,

    #[error("insertEntry overlay beyond end of program content clip")]
    OverlayBeyondContent,

    #[error("insertEntry splitting ad")]
    SplittingAd,

    #[error("insertEntryAfterEnd an overlay ad")]
    OverlayAfterEnd,

    #[error("entry cannot be inserted after SeekToStart entry {id}")]
    AfterSeekToStart { id: EntryId },

    #[error("{operation} cannot be applied to a playlist with no content")]
    NoContent { operation: &'static str },

    #[error("remove main content currently not allowed")]
    RemoveMainContent,

    #[error("{operation} duration too small: {duration}")]
    DurationTooSmall { operation: &'static str, duration: f64 },

    #[error("{field} is not a finite number: {value}")]
    NotFinite { field: &'static str, value: f64 },

    #[error("scheduleClip cannot determine clipEndMediaTime given missing clipEndMediaTime and zero linearDuration")]
    MissingClipEnd,

    #[error("scheduleClip invalid eRollType: {0}")]
    InvalidRollType(String),

    #[error("invalid timeline: {0}")]
    InvalidTimeline(String),

    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {message}")]
    Config { message: String },
}

impl SchedulerError {
    /// 回傳給 JSON 呼叫端的例外名稱
    pub fn name(&self) -> &'static str {
        match self {
            SchedulerError::Json(_) => "SyntaxError",
            SchedulerError::Io(_) => "IoError",
            SchedulerError::Config { .. } => "ConfigError",
            _ => "SchedulerError",
        }
    }

    pub fn config(message: impl Into<String>) -> Self {
        SchedulerError::Config {
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, SchedulerError>;

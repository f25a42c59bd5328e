use crate::domain::model::{EntryId, PlaylistEntry};
use crate::domain::seekbar::SeekPosition;
use crate::utils::error::Result;

/// 播放清單的唯讀查詢
pub trait PlaylistAccess {
    /// 包含線性時間 `time` 的項目；多個零長度項目同時開始時取第一個
    fn entry_at_time(&self, time: f64) -> Option<&PlaylistEntry>;

    /// `id` 之後的項目，`id` 在清單尾端時為 `None`
    fn entry_after_id(&self, id: EntryId) -> Result<Option<&PlaylistEntry>>;

    fn entry_before_id(&self, id: EntryId) -> Result<Option<&PlaylistEntry>>;

    /// 整份清單的線性長度（秒）
    fn linear_duration(&self) -> f64;

    /// 拖曳列涵蓋整份清單；`current` 原樣帶入，不夾限
    fn seek_position(&self, current: f64) -> SeekPosition {
        SeekPosition::new(current, 0.0, self.linear_duration())
    }
}

pub trait SchedulerSettings {
    /// 正片與廣告片段的最短長度（秒）
    fn min_clip_duration(&self) -> f64;
    /// 時間比對容許誤差（秒）
    fn time_tolerance(&self) -> f64;
}

use crate::config::SchedulerConfig;
use crate::domain::model::{ClipType, EntryId, PlaylistEntry};
use crate::domain::ports::{PlaylistAccess, SchedulerSettings};
use crate::utils::error::{Result, SchedulerError};

/// 線性時間軸上依序排列的播放項目。
///
/// 正片片段依序接在尾端；廣告插入時會把正片切開（mid-roll），
/// 或佔用正片的一段時間（overlay，`linear_duration > 0`）。
#[derive(Debug, Clone)]
pub struct SequentialPlaylist {
    entries: Vec<PlaylistEntry>,
    next_id: u64,
    time_tolerance: f64,
}

impl Default for SequentialPlaylist {
    fn default() -> Self {
        Self::new(&SchedulerConfig::default())
    }
}

impl SequentialPlaylist {
    pub fn new(settings: &impl SchedulerSettings) -> Self {
        Self {
            entries: Vec::new(),
            // 從 1 開始
            next_id: 1,
            time_tolerance: settings.time_tolerance(),
        }
    }

    pub fn entries(&self) -> &[PlaylistEntry] {
        &self.entries
    }

    pub fn entry(&self, id: EntryId) -> Option<&PlaylistEntry> {
        self.entries.iter().find(|entry| entry.id() == id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn is_near_zero(&self, value: f64) -> bool {
        value.abs() < self.time_tolerance
    }

    fn index_of(&self, id: EntryId, caller: &'static str) -> Result<usize> {
        self.entries
            .iter()
            .position(|entry| entry.id() == id)
            .ok_or(SchedulerError::UnknownEntry { id, caller })
    }

    /// 向前搜尋，取第一個開始時間接近 `time` 或包含 `time` 的項目
    fn index_at_time(&self, time: f64) -> Option<usize> {
        self.entries.iter().position(|entry| {
            let start = entry.linear_start_time;
            self.is_near_zero(start - time) || (start <= time && time < entry.linear_end_time())
        })
    }

    fn allocate_id(&mut self) -> EntryId {
        let id = EntryId::new(self.next_id);
        self.next_id += 1;
        id
    }

    /// 建立新的空白項目，填好欄位後再呼叫 insert 系列方法
    pub fn create_entry(&mut self) -> PlaylistEntry {
        let id = self.allocate_id();
        PlaylistEntry::new(id)
    }

    /// 從既有項目 `split_from` 的 `offset` 處切出後半段（尚未放入清單）
    pub fn create_split_entry(&mut self, split_from: EntryId, offset: f64) -> Result<PlaylistEntry> {
        let index = self.index_of(split_from, "createEntry")?;
        if self.entries[index].linear_duration == 0.0 {
            return Err(SchedulerError::CannotSplit { id: split_from });
        }
        let id = self.allocate_id();
        Ok(PlaylistEntry::split_tail(id, &self.entries[index], offset))
    }

    /// overlay 廣告佔用 `target` 開頭的 `duration` 秒
    fn yield_to_overlay(target: &mut PlaylistEntry, duration: f64) -> Result<()> {
        // overlay 不可跨越其他廣告或被切開的正片
        if target.is_advertisement {
            return Err(SchedulerError::OverlayAcrossAd);
        }
        if duration > target.linear_duration {
            return Err(SchedulerError::OverlayBeyondContent);
        }
        target.linear_start_time += duration;
        target.linear_duration -= duration;
        target.clip_begin_media_time += duration;
        target.mark_changed();
        Ok(())
    }

    /// 依 `linear_start_time` 插入廣告（mid-roll）
    pub fn insert_entry(&mut self, mut entry: PlaylistEntry) -> Result<&PlaylistEntry> {
        if !entry.is_advertisement {
            return Err(SchedulerError::NotAdvertisement);
        }

        let index = self
            .index_at_time(entry.linear_start_time)
            .ok_or(SchedulerError::OutsideRange {
                time: entry.linear_start_time,
            })?;
        let found_start = self.entries[index].linear_start_time;
        let split_offset = entry.linear_start_time - found_start;

        if self.is_near_zero(split_offset) {
            // 不讓開始時間倒退
            if entry.linear_start_time > found_start {
                entry.linear_start_time = found_start;
            }
            if entry.is_overlay() {
                Self::yield_to_overlay(&mut self.entries[index], entry.linear_duration)?;
            }
            tracing::debug!(
                "Inserted entry {} before entry {} at {}",
                entry.id(),
                self.entries[index].id(),
                entry.linear_start_time
            );
            self.entries.insert(index, entry);
            return Ok(&self.entries[index]);
        }

        let found = &self.entries[index];
        if found.is_advertisement {
            return Err(SchedulerError::SplittingAd);
        }
        if entry.is_overlay() && entry.linear_duration > found.linear_duration - split_offset {
            return Err(SchedulerError::OverlayBeyondContent);
        }

        let found_id = found.id();
        let mut tail = self.create_split_entry(found_id, split_offset)?;

        let head = &mut self.entries[index];
        head.mark_changed();
        head.clip_end_media_time = tail.clip_begin_media_time;
        head.linear_duration = split_offset;
        entry.linear_start_time = head.linear_end_time();

        if entry.is_overlay() {
            tail.linear_start_time += entry.linear_duration;
            tail.linear_duration -= entry.linear_duration;
            tail.clip_begin_media_time += entry.linear_duration;
        }

        tracing::debug!(
            "Split entry {} at {} for entry {} (tail {})",
            found_id,
            entry.linear_start_time,
            entry.id(),
            tail.id()
        );
        self.entries.insert(index + 1, entry);
        self.entries.insert(index + 2, tail);
        Ok(&self.entries[index + 1])
    }

    pub fn insert_entry_after_end(&mut self, mut entry: PlaylistEntry) -> Result<&PlaylistEntry> {
        if entry.is_advertisement && entry.is_overlay() {
            return Err(SchedulerError::OverlayAfterEnd);
        }
        if let Some(last) = self.entries.last() {
            entry.linear_start_time = last.linear_end_time();
        }
        tracing::debug!(
            "Appended entry {} at {} ({}s)",
            entry.id(),
            entry.linear_start_time,
            entry.linear_duration
        );
        self.entries.push(entry);
        let last = self.entries.len() - 1;
        Ok(&self.entries[last])
    }

    pub fn insert_entry_before_beginning(&mut self, entry: PlaylistEntry) -> Result<&PlaylistEntry> {
        if entry.is_overlay() {
            let first = self
                .entries
                .first_mut()
                .ok_or(SchedulerError::NoContent {
                    operation: "insertEntryBeforeBeginning",
                })?;
            Self::yield_to_overlay(first, entry.linear_duration)?;
        }
        tracing::debug!("Prepended entry {}", entry.id());
        self.entries.insert(0, entry);
        Ok(&self.entries[0])
    }

    /// 插在 `id` 之後（廣告組 pod）
    pub fn insert_entry_after_id(
        &mut self,
        id: EntryId,
        mut entry: PlaylistEntry,
    ) -> Result<&PlaylistEntry> {
        let index = self.index_of(id, "insertEntryAfterId")?;
        let before = &self.entries[index];
        if before.is_seek_to_start() {
            return Err(SchedulerError::AfterSeekToStart { id });
        }
        entry.linear_start_time = before.linear_end_time();

        if entry.is_overlay() {
            // 晚綁定：VAST overlay 之後緊接 Media 片段，視為 VAST 解析出的內容，
            // 下一段正片先收回 VAST 佔用的時間
            let late_binding = before.clip_type == Some(ClipType::Vast)
                && entry.clip_type == Some(ClipType::Media)
                && before.is_overlay();
            let reclaimed = if late_binding {
                before.linear_duration
            } else {
                0.0
            };
            let before_start = before.linear_start_time;

            let after = self
                .entries
                .get(index + 1)
                .ok_or(SchedulerError::OverlayBeyondContent)?;
            if after.is_advertisement {
                return Err(SchedulerError::OverlayAcrossAd);
            }
            if entry.linear_duration > after.linear_duration + reclaimed {
                return Err(SchedulerError::OverlayBeyondContent);
            }

            let after = &mut self.entries[index + 1];
            if late_binding {
                entry.linear_start_time = before_start;
                after.linear_start_time -= reclaimed;
                after.linear_duration += reclaimed;
                after.clip_begin_media_time -= reclaimed;
                after.mark_changed();
            }
            Self::yield_to_overlay(after, entry.linear_duration)?;
        }

        tracing::debug!("Inserted entry {} after entry {}", entry.id(), id);
        self.entries.insert(index + 1, entry);
        Ok(&self.entries[index + 1])
    }

    /// 插在第一個有長度的項目之前；已有 SeekToStart 時回傳 `None`
    pub fn insert_seek_to_start(
        &mut self,
        mut entry: PlaylistEntry,
    ) -> Result<Option<&PlaylistEntry>> {
        for index in 0..self.entries.len() {
            let current = &self.entries[index];
            if current.is_seek_to_start() {
                return Ok(None);
            }
            if current.is_overlay() {
                entry.clip_type = Some(ClipType::SeekToStart);
                tracing::debug!("Inserted SeekToStart entry {} at index {}", entry.id(), index);
                self.entries.insert(index, entry);
                return Ok(Some(&self.entries[index]));
            }
        }
        Err(SchedulerError::NoContent {
            operation: "insertSeekToStart",
        })
    }

    /// 移除廣告，並修補因移除而斷開或留下空隙的正片
    ///
    /// 修補空隙時，下一個項目除了往前移，也會補回被移除 overlay 的長度。
    pub fn remove(&mut self, id: EntryId) -> Result<PlaylistEntry> {
        let index = self.index_of(id, "remove")?;
        let target = &self.entries[index];
        if !target.is_advertisement {
            return Err(SchedulerError::RemoveMainContent);
        }

        // 前後兩段來自同一段正片時要接回去
        let weld = index > 0
            && index + 1 < self.entries.len()
            && self.entries[index - 1].id_split_from() == self.entries[index + 1].id_split_from();

        let (gap_start, next_index) = if weld {
            let head = &self.entries[index - 1];
            let tail = &self.entries[index + 1];
            (
                head.linear_end_time() + target.linear_duration + tail.linear_duration,
                index + 2,
            )
        } else if index > 0 {
            (self.entries[index - 1].linear_end_time(), index + 1)
        } else {
            (target.linear_start_time, index + 1)
        };

        // 開頭的零長度項目（pre-roll、SeekToStart）在裁切後本來就可能與正片有距離
        let head_marker = index == 0 && target.linear_duration == 0.0;
        let gap = match self.entries.get(next_index) {
            Some(next)
                if !head_marker && next.linear_start_time - gap_start > self.time_tolerance =>
            {
                // 只有移除位於正片開頭的 overlay 才會留下空隙
                if next.linear_duration == 0.0 {
                    return Err(SchedulerError::InvalidTimeline(
                        "overlay ad removed should not be followed by another pause timeline ad"
                            .to_string(),
                    ));
                }
                if target.linear_duration == 0.0 {
                    return Err(SchedulerError::InvalidTimeline(
                        "removing a pause timeline ad should not introduce gaps in the linear timeline"
                            .to_string(),
                    ));
                }
                true
            }
            _ => false,
        };

        let mut removed = self.entries.remove(index);
        removed.mark_changed();
        // 避免 on_played_entry 再移除一次
        removed.delete_after_played = false;

        if weld {
            let tail = self.entries.remove(index);
            let head = &mut self.entries[index - 1];
            head.linear_duration += tail.linear_duration + removed.linear_duration;
            head.clip_end_media_time = tail.clip_end_media_time;
            head.mark_changed();
            tracing::debug!("Welded entry {} back into entry {}", tail.id(), head.id());
        }

        if gap {
            let next = &mut self.entries[index];
            next.linear_start_time -= removed.linear_duration;
            next.linear_duration += removed.linear_duration;
            next.clip_begin_media_time -= removed.linear_duration;
            next.mark_changed();
        }

        tracing::debug!("Removed entry {}", removed.id());
        Ok(removed)
    }

    pub fn remove_all_entries(&mut self) {
        tracing::debug!("Removing all {} entries", self.entries.len());
        self.entries.clear();
    }

    /// 移除 `start_time` 之前的項目；開頭的 pre-roll 與 SeekToStart 保留
    pub fn remove_entries_before_time(&mut self, start_time: f64) {
        let mut index = 0;
        while index < self.entries.len()
            && self.entries[index].is_advertisement
            && self.entries[index].linear_duration == 0.0
        {
            index += 1;
        }
        if index < self.entries.len() && self.entries[index].is_seek_to_start() {
            index += 1;
        }

        while index < self.entries.len() && self.entries[index].linear_start_time < start_time {
            let entry = &mut self.entries[index];
            if entry.linear_end_time() <= start_time {
                let removed = self.entries.remove(index);
                tracing::debug!("Trimmed entry {} before {}", removed.id(), start_time);
            } else {
                let cut = start_time - entry.linear_start_time;
                entry.linear_duration -= cut;
                entry.clip_begin_media_time += cut;
                entry.linear_start_time = start_time;
                entry.mark_changed();
                break;
            }
        }
    }

    /// 移除 `end_time` 之後的項目；結尾的 post-roll 保留並移到 `end_time`
    pub fn remove_entries_after_time(&mut self, end_time: f64) {
        let mut index = self.entries.len();
        while index > 0
            && self.entries[index - 1].is_advertisement
            && self.entries[index - 1].linear_duration == 0.0
        {
            let post_roll = &mut self.entries[index - 1];
            post_roll.linear_start_time = end_time;
            post_roll.mark_changed();
            index -= 1;
        }
        if index == 0 {
            return;
        }

        // 結束時間延後時，延長最後一段
        let last = &mut self.entries[index - 1];
        if last.linear_end_time() <= end_time {
            last.linear_duration = end_time - last.linear_start_time;
            last.mark_changed();
            return;
        }

        while index > 0 && self.entries[index - 1].linear_end_time() > end_time {
            let entry = &mut self.entries[index - 1];
            if entry.linear_start_time >= end_time {
                let removed = self.entries.remove(index - 1);
                tracing::debug!("Trimmed entry {} after {}", removed.id(), end_time);
            } else {
                entry.linear_duration = end_time - entry.linear_start_time;
                entry.clip_end_media_time = entry.clip_begin_media_time + entry.linear_duration;
                entry.mark_changed();
                break;
            }
            index -= 1;
        }
    }

    /// 通知項目已播放；設有 `delete_after_played` 時會被移除
    pub fn on_played_entry(&mut self, id: EntryId) -> Result<Option<PlaylistEntry>> {
        let index = self.index_of(id, "onPlayedEntry")?;
        if self.entries[index].delete_after_played {
            return self.remove(id).map(Some);
        }
        Ok(None)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.entries)?)
    }
}

impl PlaylistAccess for SequentialPlaylist {
    fn entry_at_time(&self, time: f64) -> Option<&PlaylistEntry> {
        self.index_at_time(time).map(|index| &self.entries[index])
    }

    fn entry_after_id(&self, id: EntryId) -> Result<Option<&PlaylistEntry>> {
        let index = self.index_of(id, "getEntryAfterId")?;
        Ok(self.entries.get(index + 1))
    }

    fn entry_before_id(&self, id: EntryId) -> Result<Option<&PlaylistEntry>> {
        let index = self.index_of(id, "getEntryBeforeId")?;
        Ok(index.checked_sub(1).map(|before| &self.entries[before]))
    }

    fn linear_duration(&self) -> f64 {
        self.entries
            .last()
            .map(PlaylistEntry::linear_end_time)
            .unwrap_or(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn content(playlist: &mut SequentialPlaylist, begin: f64, end: f64) -> EntryId {
        let mut entry = playlist.create_entry();
        entry.clip_uri = Some("main.mp4".to_string());
        entry.clip_type = Some(ClipType::ProgramContent);
        entry.clip_begin_media_time = begin;
        entry.clip_end_media_time = end;
        entry.linear_duration = end - begin;
        entry.is_advertisement = false;
        playlist.insert_entry_after_end(entry).unwrap().id()
    }

    fn ad(playlist: &mut SequentialPlaylist, start: f64, duration: f64) -> PlaylistEntry {
        let mut entry = playlist.create_entry();
        entry.clip_uri = Some("ad.mp4".to_string());
        entry.clip_type = Some(ClipType::Media);
        entry.linear_start_time = start;
        entry.linear_duration = duration;
        entry.clip_end_media_time = 15.0;
        entry
    }

    fn starts(playlist: &SequentialPlaylist) -> Vec<(f64, f64)> {
        playlist
            .entries()
            .iter()
            .map(|e| (e.linear_start_time, e.linear_duration))
            .collect()
    }

    #[test]
    fn test_ids_start_at_one() {
        let mut playlist = SequentialPlaylist::default();
        assert_eq!(playlist.create_entry().id(), EntryId::new(1));
        assert_eq!(playlist.create_entry().id(), EntryId::new(2));
    }

    #[test]
    fn test_mid_roll_splits_content() {
        let mut playlist = SequentialPlaylist::default();
        let main = content(&mut playlist, 0.0, 100.0);
        let entry = ad(&mut playlist, 40.0, 0.0);
        let ad_id = playlist.insert_entry(entry).unwrap().id();

        assert_eq!(starts(&playlist), vec![(0.0, 40.0), (40.0, 0.0), (40.0, 60.0)]);
        let head = &playlist.entries()[0];
        let tail = &playlist.entries()[2];
        assert_eq!(head.id(), main);
        assert_eq!(head.clip_end_media_time, 40.0);
        assert_eq!(head.split_count(), 1);
        assert_eq!(tail.id_split_from(), main);
        assert_eq!(tail.clip_begin_media_time, 40.0);
        assert_eq!(tail.clip_end_media_time, 100.0);
        assert_eq!(playlist.entries()[1].id(), ad_id);
        assert_eq!(playlist.linear_duration(), 100.0);
    }

    #[test]
    fn test_overlay_mid_roll_takes_content_time() {
        let mut playlist = SequentialPlaylist::default();
        content(&mut playlist, 0.0, 100.0);
        let entry = ad(&mut playlist, 10.0, 5.0);
        playlist.insert_entry(entry).unwrap();

        assert_eq!(starts(&playlist), vec![(0.0, 10.0), (10.0, 5.0), (15.0, 85.0)]);
        assert_eq!(playlist.entries()[2].clip_begin_media_time, 15.0);
        assert_eq!(playlist.linear_duration(), 100.0);
    }

    #[test]
    fn test_overlay_too_long_leaves_playlist_untouched() {
        let mut playlist = SequentialPlaylist::default();
        content(&mut playlist, 0.0, 20.0);
        let before = starts(&playlist);
        let entry = ad(&mut playlist, 10.0, 15.0);

        let err = playlist.insert_entry(entry).unwrap_err();
        assert!(matches!(err, SchedulerError::OverlayBeyondContent));
        assert_eq!(starts(&playlist), before);
        assert_eq!(playlist.entries()[0].split_count(), 0);
    }

    #[test]
    fn test_insert_near_start_goes_before() {
        let mut playlist = SequentialPlaylist::default();
        content(&mut playlist, 0.0, 100.0);
        let entry = ad(&mut playlist, 0.0005, 0.0);
        let inserted = playlist.insert_entry(entry).unwrap();

        assert_eq!(inserted.linear_start_time, 0.0);
        assert_eq!(playlist.len(), 2);
        assert!(playlist.entries()[0].is_advertisement);
    }

    #[test]
    fn test_insert_rejects_bad_entries() {
        let mut playlist = SequentialPlaylist::default();
        content(&mut playlist, 0.0, 100.0);

        let mut main = ad(&mut playlist, 10.0, 0.0);
        main.is_advertisement = false;
        assert!(matches!(
            playlist.insert_entry(main),
            Err(SchedulerError::NotAdvertisement)
        ));

        let outside = ad(&mut playlist, 500.0, 0.0);
        assert!(matches!(
            playlist.insert_entry(outside),
            Err(SchedulerError::OutsideRange { .. })
        ));

        let overlay = ad(&mut playlist, 10.0, 5.0);
        playlist.insert_entry(overlay).unwrap();
        let inside_ad = ad(&mut playlist, 12.0, 0.0);
        assert!(matches!(
            playlist.insert_entry(inside_ad),
            Err(SchedulerError::SplittingAd)
        ));
    }

    #[test]
    fn test_split_entry_of_zero_duration_fails() {
        let mut playlist = SequentialPlaylist::default();
        content(&mut playlist, 0.0, 100.0);
        let post = ad(&mut playlist, 0.0, 0.0);
        let post_id = playlist.insert_entry_after_end(post).unwrap().id();

        assert!(matches!(
            playlist.create_split_entry(post_id, 1.0),
            Err(SchedulerError::CannotSplit { .. })
        ));
        assert!(matches!(
            playlist.create_split_entry(EntryId::new(99), 1.0),
            Err(SchedulerError::UnknownEntry { .. })
        ));
    }

    #[test]
    fn test_after_end_rejects_overlay_ad() {
        let mut playlist = SequentialPlaylist::default();
        content(&mut playlist, 0.0, 100.0);
        let entry = ad(&mut playlist, 0.0, 5.0);
        assert!(matches!(
            playlist.insert_entry_after_end(entry),
            Err(SchedulerError::OverlayAfterEnd)
        ));
    }

    #[test]
    fn test_before_beginning_overlay() {
        let mut playlist = SequentialPlaylist::default();
        let empty_overlay = ad(&mut playlist, 0.0, 5.0);
        assert!(matches!(
            playlist.insert_entry_before_beginning(empty_overlay),
            Err(SchedulerError::NoContent { .. })
        ));

        content(&mut playlist, 0.0, 100.0);
        let overlay = ad(&mut playlist, 0.0, 5.0);
        playlist.insert_entry_before_beginning(overlay).unwrap();
        assert_eq!(starts(&playlist), vec![(0.0, 5.0), (5.0, 95.0)]);
    }

    #[test]
    fn test_pod_after_id() {
        let mut playlist = SequentialPlaylist::default();
        content(&mut playlist, 0.0, 100.0);
        let first = ad(&mut playlist, 30.0, 0.0);
        let first_id = playlist.insert_entry(first).unwrap().id();
        let second = ad(&mut playlist, 0.0, 0.0);
        let second_id = playlist.insert_entry_after_id(first_id, second).unwrap().id();

        assert_eq!(playlist.entries()[2].id(), second_id);
        assert_eq!(playlist.entries()[2].linear_start_time, 30.0);
        assert_eq!(
            playlist.entry_after_id(second_id).unwrap().unwrap().linear_duration,
            70.0
        );
    }

    #[test]
    fn test_late_binding_vast() {
        let mut playlist = SequentialPlaylist::default();
        content(&mut playlist, 0.0, 100.0);
        let mut vast = ad(&mut playlist, 20.0, 10.0);
        vast.clip_type = Some(ClipType::Vast);
        let vast_id = playlist.insert_entry(vast).unwrap().id();
        assert_eq!(starts(&playlist), vec![(0.0, 20.0), (20.0, 10.0), (30.0, 70.0)]);

        let media = ad(&mut playlist, 0.0, 8.0);
        let media = playlist.insert_entry_after_id(vast_id, media).unwrap();
        assert_eq!(media.linear_start_time, 20.0);

        let tail = &playlist.entries()[3];
        assert_eq!(tail.linear_start_time, 28.0);
        assert_eq!(tail.linear_duration, 72.0);
        assert_eq!(tail.clip_begin_media_time, 28.0);
    }

    #[test]
    fn test_seek_to_start_once() {
        let mut playlist = SequentialPlaylist::default();
        let marker = playlist.create_entry();
        assert!(matches!(
            playlist.insert_seek_to_start(marker),
            Err(SchedulerError::NoContent { .. })
        ));

        let pre = ad(&mut playlist, 0.0, 0.0);
        playlist.insert_entry_before_beginning(pre).unwrap();
        content(&mut playlist, 0.0, 100.0);

        let marker = playlist.create_entry();
        let inserted = playlist.insert_seek_to_start(marker).unwrap().unwrap();
        assert!(inserted.is_seek_to_start());
        assert!(playlist.entries()[1].is_seek_to_start());

        let again = playlist.create_entry();
        assert!(playlist.insert_seek_to_start(again).unwrap().is_none());

        let marker_id = playlist.entries()[1].id();
        let pod = ad(&mut playlist, 0.0, 0.0);
        assert!(matches!(
            playlist.insert_entry_after_id(marker_id, pod),
            Err(SchedulerError::AfterSeekToStart { .. })
        ));
    }

    #[test]
    fn test_remove_welds_split_content() {
        let mut playlist = SequentialPlaylist::default();
        let main = content(&mut playlist, 0.0, 100.0);
        let entry = ad(&mut playlist, 10.0, 5.0);
        let ad_id = playlist.insert_entry(entry).unwrap().id();

        let removed = playlist.remove(ad_id).unwrap();
        assert_eq!(removed.id(), ad_id);
        assert_eq!(removed.split_count(), 1);
        assert_eq!(starts(&playlist), vec![(0.0, 100.0)]);
        let welded = &playlist.entries()[0];
        assert_eq!(welded.id(), main);
        assert_eq!(welded.clip_end_media_time, 100.0);
        assert_eq!(welded.split_count(), 2);
    }

    #[test]
    fn test_remove_overlay_closes_gap() {
        let mut playlist = SequentialPlaylist::default();
        content(&mut playlist, 0.0, 50.0);
        content(&mut playlist, 0.0, 50.0);
        let entry = ad(&mut playlist, 50.0, 5.0);
        let ad_id = playlist.insert_entry(entry).unwrap().id();
        assert_eq!(starts(&playlist), vec![(0.0, 50.0), (50.0, 5.0), (55.0, 45.0)]);

        playlist.remove(ad_id).unwrap();
        assert_eq!(starts(&playlist), vec![(0.0, 50.0), (50.0, 50.0)]);
        assert_eq!(playlist.entries()[1].clip_begin_media_time, 0.0);
    }

    #[test]
    fn test_remove_overlay_before_beginning() {
        let mut playlist = SequentialPlaylist::default();
        let main = content(&mut playlist, 0.0, 100.0);
        let overlay = ad(&mut playlist, 0.0, 5.0);
        let overlay_id = playlist.insert_entry_before_beginning(overlay).unwrap().id();
        assert_eq!(starts(&playlist), vec![(0.0, 5.0), (5.0, 95.0)]);

        playlist.remove(overlay_id).unwrap();
        assert_eq!(starts(&playlist), vec![(0.0, 100.0)]);
        let restored = &playlist.entries()[0];
        assert_eq!(restored.id(), main);
        assert_eq!(restored.clip_begin_media_time, 0.0);
    }

    #[test]
    fn test_remove_overlay_followed_by_pause_ad_fails() {
        let mut playlist = SequentialPlaylist::default();
        content(&mut playlist, 0.0, 50.0);
        content(&mut playlist, 0.0, 50.0);
        let overlay = ad(&mut playlist, 50.0, 5.0);
        let overlay_id = playlist.insert_entry(overlay).unwrap().id();
        let pause = ad(&mut playlist, 0.0, 0.0);
        playlist.insert_entry_after_id(overlay_id, pause).unwrap();
        let before = starts(&playlist);
        assert_eq!(before, vec![(0.0, 50.0), (50.0, 5.0), (55.0, 0.0), (55.0, 45.0)]);

        let err = playlist.remove(overlay_id).unwrap_err();
        assert!(matches!(err, SchedulerError::InvalidTimeline(_)));
        assert_eq!(
            err.to_string(),
            "invalid timeline: overlay ad removed should not be followed by another pause timeline ad"
        );
        assert_eq!(starts(&playlist), before);
    }

    #[test]
    fn test_remove_pause_ad_leaving_gap_fails() {
        let mut playlist = SequentialPlaylist::default();
        let pre = ad(&mut playlist, 0.0, 0.0);
        let pre_id = playlist.insert_entry_before_beginning(pre).unwrap().id();
        content(&mut playlist, 0.0, 60.0);
        playlist.remove_entries_before_time(30.0);
        let first = ad(&mut playlist, 0.0, 0.0);
        playlist.insert_entry_before_beginning(first).unwrap();
        let before = starts(&playlist);
        assert_eq!(before, vec![(0.0, 0.0), (0.0, 0.0), (30.0, 30.0)]);

        let err = playlist.remove(pre_id).unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid timeline: removing a pause timeline ad should not introduce gaps in the linear timeline"
        );
        assert_eq!(starts(&playlist), before);
    }

    #[test]
    fn test_remove_pre_roll_after_trim() {
        let mut playlist = SequentialPlaylist::default();
        let pre = ad(&mut playlist, 0.0, 0.0);
        let pre_id = playlist.insert_entry_before_beginning(pre).unwrap().id();
        content(&mut playlist, 0.0, 60.0);
        playlist.remove_entries_before_time(20.0);
        assert_eq!(starts(&playlist), vec![(0.0, 0.0), (20.0, 40.0)]);

        playlist.remove(pre_id).unwrap();
        assert_eq!(starts(&playlist), vec![(20.0, 40.0)]);
        assert_eq!(playlist.entries()[0].clip_begin_media_time, 20.0);
    }

    #[test]
    fn test_played_seek_to_start_after_trim() {
        let mut playlist = SequentialPlaylist::default();
        content(&mut playlist, 0.0, 60.0);
        let mut marker = playlist.create_entry();
        marker.delete_after_played = true;
        let marker_id = playlist.insert_seek_to_start(marker).unwrap().unwrap().id();
        playlist.remove_entries_before_time(30.0);
        assert_eq!(starts(&playlist), vec![(0.0, 0.0), (30.0, 30.0)]);

        let removed = playlist.on_played_entry(marker_id).unwrap().unwrap();
        assert!(removed.is_seek_to_start());
        assert_eq!(starts(&playlist), vec![(30.0, 30.0)]);
        assert_eq!(playlist.entries()[0].clip_begin_media_time, 30.0);
    }

    #[test]
    fn test_remove_main_content_fails() {
        let mut playlist = SequentialPlaylist::default();
        let main = content(&mut playlist, 0.0, 100.0);
        assert!(matches!(
            playlist.remove(main),
            Err(SchedulerError::RemoveMainContent)
        ));
    }

    #[test]
    fn test_on_played_entry() {
        let mut playlist = SequentialPlaylist::default();
        content(&mut playlist, 0.0, 100.0);
        let mut once = ad(&mut playlist, 20.0, 0.0);
        once.delete_after_played = true;
        let once_id = playlist.insert_entry(once).unwrap().id();
        let keep = ad(&mut playlist, 60.0, 0.0);
        let keep_id = playlist.insert_entry(keep).unwrap().id();

        assert!(playlist.on_played_entry(keep_id).unwrap().is_none());
        let removed = playlist.on_played_entry(once_id).unwrap().unwrap();
        assert!(!removed.delete_after_played);
        assert!(playlist.entry(once_id).is_none());
        // 前後兩段正片已接回
        assert_eq!(starts(&playlist), vec![(0.0, 60.0), (60.0, 0.0), (60.0, 40.0)]);
    }

    #[test]
    fn test_remove_entries_before_time() {
        let mut playlist = SequentialPlaylist::default();
        let pre = ad(&mut playlist, 0.0, 0.0);
        playlist.insert_entry_before_beginning(pre).unwrap();
        content(&mut playlist, 0.0, 30.0);
        content(&mut playlist, 0.0, 30.0);

        playlist.remove_entries_before_time(40.0);
        assert_eq!(starts(&playlist), vec![(0.0, 0.0), (40.0, 20.0)]);
        assert_eq!(playlist.entries()[1].clip_begin_media_time, 10.0);
    }

    #[test]
    fn test_remove_entries_after_time() {
        let mut playlist = SequentialPlaylist::default();
        content(&mut playlist, 0.0, 30.0);
        content(&mut playlist, 0.0, 30.0);
        let post = ad(&mut playlist, 0.0, 0.0);
        playlist.insert_entry_after_end(post).unwrap();

        playlist.remove_entries_after_time(20.0);
        assert_eq!(starts(&playlist), vec![(0.0, 20.0), (20.0, 0.0)]);
        assert_eq!(playlist.entries()[0].clip_end_media_time, 20.0);

        playlist.remove_entries_after_time(25.0);
        assert_eq!(starts(&playlist), vec![(0.0, 25.0), (25.0, 0.0)]);
    }

    #[test]
    fn test_access_queries() {
        let mut playlist = SequentialPlaylist::default();
        let first = content(&mut playlist, 0.0, 30.0);
        let second = content(&mut playlist, 0.0, 30.0);

        assert_eq!(playlist.entry_at_time(45.0).unwrap().id(), second);
        assert_eq!(playlist.entry_at_time(0.0).unwrap().id(), first);
        assert!(playlist.entry_at_time(60.0).is_none());
        assert!(playlist.entry_before_id(first).unwrap().is_none());
        assert_eq!(playlist.entry_before_id(second).unwrap().unwrap().id(), first);
        assert!(playlist.entry_after_id(second).unwrap().is_none());
        assert!(playlist.entry_after_id(EntryId::new(42)).is_err());

        let position = playlist.seek_position(75.0);
        assert_eq!(position.minimum, 0.0);
        assert_eq!(position.maximum, 60.0);
        assert_eq!(position.current, 75.0);
    }
}

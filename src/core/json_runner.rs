//! JSON 請求介面。
//!
//! 請求是帶有字串 `func` 的 JSON 物件，參數放在 `params` 裡或直接放在最上層。
//! 回應是結果的 JSON；失敗時回傳
//! `{"EXCEPTION":{"name":"...","message":"..."}}`。

use crate::core::scheduler::{ContentClipParams, ScheduleClipParams, Scheduler, SeekToStartParams};
use crate::domain::model::EntryId;
use crate::domain::ports::PlaylistAccess;
use crate::utils::error::{Result, SchedulerError};
use serde::Deserialize;
use serde_json::{json, Value};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct EntryRequest {
    playlist_entry_id: EntryId,
}

#[derive(Debug, Deserialize)]
struct TimeRequest {
    time: f64,
}

pub fn run_json(scheduler: &mut Scheduler, request: &str) -> String {
    match dispatch(scheduler, request) {
        Ok(value) => value.to_string(),
        Err(e) => {
            tracing::warn!("Request failed: {}", e);
            exception(&e).to_string()
        }
    }
}

fn exception(error: &SchedulerError) -> Value {
    json!({
        "EXCEPTION": {
            "name": error.name(),
            "message": error.to_string(),
        }
    })
}

fn dispatch(scheduler: &mut Scheduler, request: &str) -> Result<Value> {
    let request: Value = serde_json::from_str(request)?;
    let func = request
        .get("func")
        .and_then(Value::as_str)
        .ok_or_else(|| {
            SchedulerError::InvalidRequest("runJSON func property missing or not a string".to_string())
        })?
        .to_string();

    let params = match request.get("params") {
        Some(params) if !params.is_null() => params.clone(),
        _ => request.clone(),
    };
    tracing::debug!("runJSON {}", func);

    let result = match func.as_str() {
        "createContentClipParams" => serde_json::to_value(ContentClipParams::default())?,
        "createScheduleClipParams" => serde_json::to_value(ScheduleClipParams::default())?,
        "reset" => {
            scheduler.reset();
            Value::Null
        }
        "removeClip" => {
            let request: EntryRequest = serde_json::from_value(params)?;
            serde_json::to_value(scheduler.remove_clip(request.playlist_entry_id)?)?
        }
        "appendContentClip" => {
            let params: ContentClipParams = serde_json::from_value(params)?;
            serde_json::to_value(scheduler.append_content_clip(params)?)?
        }
        "scheduleClip" => {
            let params: ScheduleClipParams = serde_json::from_value(params)?;
            serde_json::to_value(scheduler.schedule_clip(params)?)?
        }
        "setSeekToStart" => {
            let params: SeekToStartParams = serde_json::from_value(params)?;
            serde_json::to_value(scheduler.set_seek_to_start(Some(params))?)?
        }
        "getEntryAtTime" => {
            let request: TimeRequest = serde_json::from_value(params)?;
            serde_json::to_value(scheduler.playlist().entry_at_time(request.time))?
        }
        "getPlaylistLinearDuration" => json!(scheduler.playlist().linear_duration()),
        "onPlayedEntry" => {
            let request: EntryRequest = serde_json::from_value(params)?;
            serde_json::to_value(
                scheduler
                    .playlist_mut()
                    .on_played_entry(request.playlist_entry_id)?,
            )?
        }
        "dumpPlaylist" => serde_json::to_value(scheduler.playlist().entries())?,
        other => {
            return Err(SchedulerError::InvalidRequest(format!(
                "runJSON unknown func: {}",
                other
            )))
        }
    };
    Ok(result)
}

use serde::{Deserialize, Serialize};

/// 播放器拖曳列的位置：可拖曳範圍（minimum..maximum）加上目前播放點。
///
/// 三個欄位彼此獨立，不做任何檢查或夾限；`minimum <= current <= maximum`
/// 只是慣例，由持有者自行維護。
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SeekPosition {
    /// 播放點（秒）
    pub current: f64,
    /// 可拖曳範圍下限（秒）
    pub minimum: f64,
    /// 可拖曳範圍上限（秒）
    pub maximum: f64,
}

impl SeekPosition {
    pub fn new(current: f64, minimum: f64, maximum: f64) -> Self {
        Self {
            current,
            minimum,
            maximum,
        }
    }
}

pub mod json_runner;
pub mod playlist;
pub mod scheduler;

pub use crate::domain::model::{ClipType, EntryId, PlaylistEntry, RollType};
pub use crate::domain::ports::{PlaylistAccess, SchedulerSettings};
pub use crate::utils::error::Result;

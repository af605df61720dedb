//! Quoridor 对局托管
//!
//! 包含:
//! - 房间系统（多局并行，每局独立加锁）
//! - 按房间号转发走子与放置挡板

pub mod error;
pub mod room;

pub use error::{HostError, Result};
pub use room::{RoomId, RoomManager, RoomSummary, SharedGame};

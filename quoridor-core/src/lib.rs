//! Quoridor 规则核心
//!
//! 包含:
//! - 玩家、坐标、方向与挡板等核心数据结构
//! - 棋盘状态（棋子位置、挡板边槽、剩余挡板数）
//! - 走法验证（一步、跳跃、斜向绕行）与公平规则连通性检查
//! - 对局控制（回合、胜负）

mod board;
pub mod constants;
mod error;
mod fence;
mod game;
mod player;
mod rules;

pub use board::Board;
pub use constants::*;
pub use error::{Result, RuleError};
pub use fence::{Fence, Orientation};
pub use game::{Game, GameSnapshot, GameStatus};
pub use player::{Direction, Player, Position};
pub use rules::{MoveKind, PawnMove, Rules};

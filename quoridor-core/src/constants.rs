//! 规则常量定义

use crate::player::Position;

/// 棋盘边长（9x9）
pub const BOARD_SIZE: usize = 9;

/// 格子总数
pub const CELL_COUNT: usize = BOARD_SIZE * BOARD_SIZE;

/// 每方初始挡板数
pub const FENCES_PER_PLAYER: u8 = 10;

/// 挡板锚点坐标上限（不含），挡板跨两格，锚点只能在 0..8
pub const FENCE_ANCHOR_LIMIT: usize = BOARD_SIZE - 1;

/// 玩家一起始位置（底线中央）
pub const PLAYER_ONE_START: Position = Position::new_unchecked(4, 0);

/// 玩家二起始位置（顶线中央）
pub const PLAYER_TWO_START: Position = Position::new_unchecked(4, 8);

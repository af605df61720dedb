//! 错误类型定义

use thiserror::Error;

/// 规则错误
///
/// 除 `FairPlayViolation` 外，所有拒绝都不会改动对局状态；
/// `FairPlayViolation` 会先试放挡板再完整撤回。
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleError {
    /// 坐标越界（目标格或挡板锚点）
    #[error("Position out of bounds: ({x}, {y})")]
    OutOfBounds { x: u8, y: u8 },

    /// 不是你的回合，或对局已分出胜负
    #[error("Not your turn")]
    OutOfTurn,

    /// 原地不动
    #[error("Destination equals current position")]
    NoOpMove,

    /// 走法形状不合法（非一步、非跳跃、非斜向绕行）
    #[error("Illegal move geometry")]
    IllegalGeometry,

    /// 目标格已有对方棋子
    #[error("Destination is occupied by the opponent")]
    DestinationOccupied,

    /// 挡板已用完
    #[error("No fences remaining")]
    NoFencesRemaining,

    /// 挡板位置与已有挡板重叠
    #[error("Fence slot is already occupied")]
    FenceSlotOccupied,

    /// 挡板会切断对方通往目标线的最后一条路
    #[error("Fence breaks the fair play rule")]
    FairPlayViolation,
}

/// 规则操作结果类型
pub type Result<T> = std::result::Result<T, RuleError>;

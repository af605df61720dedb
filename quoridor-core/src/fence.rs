//! 挡板定义
//!
//! 挡板占据两个相邻的边槽：
//! - 横向挡板锚定在 (c, r)：占据格子 (c, r) 与 (c+1, r) 的南侧边槽，
//!   隔开第 r 行与第 r+1 行
//! - 纵向挡板锚定在 (c, r)：占据格子 (c, r) 与 (c, r+1) 的东侧边槽，
//!   隔开第 c 列与第 c+1 列

use serde::{Deserialize, Serialize};

use crate::constants::FENCE_ANCHOR_LIMIT;
use crate::player::Position;

/// 挡板朝向
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Orientation {
    /// 横向，阻挡上下移动
    Horizontal,
    /// 纵向，阻挡左右移动
    Vertical,
}

impl Orientation {
    /// 获取简写字符
    pub fn to_char(&self) -> char {
        match self {
            Orientation::Horizontal => 'h',
            Orientation::Vertical => 'v',
        }
    }
}

/// 挡板
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Fence {
    pub orientation: Orientation,
    pub anchor: Position,
}

impl Fence {
    /// 创建新挡板
    pub fn new(orientation: Orientation, anchor: Position) -> Self {
        Self { orientation, anchor }
    }

    /// 创建横向挡板
    pub fn horizontal(x: u8, y: u8) -> Self {
        Self::new(Orientation::Horizontal, Position::new_unchecked(x, y))
    }

    /// 创建纵向挡板
    pub fn vertical(x: u8, y: u8) -> Self {
        Self::new(Orientation::Vertical, Position::new_unchecked(x, y))
    }

    /// 锚点是否合法（挡板完整落在棋盘内部）
    pub fn is_valid(&self) -> bool {
        let limit = FENCE_ANCHOR_LIMIT as u8;
        self.anchor.x < limit && self.anchor.y < limit
    }

    /// 占据的两个边槽（以所属格子表示）
    ///
    /// 横向挡板返回两个南侧边槽，纵向挡板返回两个东侧边槽。
    pub fn slots(&self) -> [Position; 2] {
        let Position { x, y } = self.anchor;
        match self.orientation {
            Orientation::Horizontal => [
                Position::new_unchecked(x, y),
                Position::new_unchecked(x.saturating_add(1), y),
            ],
            Orientation::Vertical => [
                Position::new_unchecked(x, y),
                Position::new_unchecked(x, y.saturating_add(1)),
            ],
        }
    }
}

impl std::fmt::Display for Fence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.orientation.to_char(), self.anchor)
    }
}

//! 棋盘状态
//!
//! 只存储和查询棋子位置与挡板边槽，不包含任何规则判断。

use serde::Serialize;

use crate::constants::{BOARD_SIZE, FENCES_PER_PLAYER};
use crate::error::{Result, RuleError};
use crate::fence::{Fence, Orientation};
use crate::player::{Direction, Player, Position};

/// 棋盘
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Board {
    /// 双方棋子位置，按 `Player::index` 索引
    pawns: [Position; 2],
    /// 南侧边槽，索引为 [列][行]，(c, r) 隔开 (c, r) 与 (c, r+1)
    fence_south: [[bool; BOARD_SIZE]; BOARD_SIZE],
    /// 东侧边槽，索引为 [列][行]，(c, r) 隔开 (c, r) 与 (c+1, r)
    fence_east: [[bool; BOARD_SIZE]; BOARD_SIZE],
    /// 已放置的挡板（按放置顺序）
    fences: Vec<Fence>,
    /// 双方剩余挡板数
    fences_remaining: [u8; 2],
}

impl Board {
    /// 创建初始棋盘
    pub fn initial() -> Self {
        Self {
            pawns: [Player::One.start_position(), Player::Two.start_position()],
            fence_south: [[false; BOARD_SIZE]; BOARD_SIZE],
            fence_east: [[false; BOARD_SIZE]; BOARD_SIZE],
            fences: Vec::new(),
            fences_remaining: [FENCES_PER_PLAYER; 2],
        }
    }

    /// 获取玩家棋子位置
    pub fn pawn_position(&self, player: Player) -> Position {
        self.pawns[player.index()]
    }

    /// 获取指定格子上的棋子
    pub fn pawn_at(&self, pos: Position) -> Option<Player> {
        [Player::One, Player::Two]
            .into_iter()
            .find(|p| self.pawns[p.index()] == pos)
    }

    /// 移动棋子（不检查规则）
    pub fn move_pawn(&mut self, player: Player, to: Position) {
        self.pawns[player.index()] = to;
    }

    /// 格子 (x, y) 南侧是否有挡板
    pub fn has_south_fence(&self, x: u8, y: u8) -> bool {
        Self::slot(&self.fence_south, x, y)
    }

    /// 格子 (x, y) 东侧是否有挡板
    pub fn has_east_fence(&self, x: u8, y: u8) -> bool {
        Self::slot(&self.fence_east, x, y)
    }

    fn slot(grid: &[[bool; BOARD_SIZE]; BOARD_SIZE], x: u8, y: u8) -> bool {
        grid.get(x as usize)
            .and_then(|col| col.get(y as usize))
            .copied()
            .unwrap_or(false)
    }

    /// 两个正交相邻格子之间是否有挡板
    ///
    /// 不相邻的两格之间没有单一的边，返回 false。
    pub fn has_fence_between(&self, a: Position, b: Position) -> bool {
        match a.direction_to(b) {
            Some(Direction::South) => self.has_south_fence(a.x, a.y),
            Some(Direction::North) => self.has_south_fence(b.x, b.y),
            Some(Direction::East) => self.has_east_fence(a.x, a.y),
            Some(Direction::West) => self.has_east_fence(b.x, b.y),
            None => false,
        }
    }

    /// 从 pos 朝 direction 的边是否被挡板或棋盘边界阻断
    pub fn is_blocked(&self, pos: Position, direction: Direction) -> bool {
        match pos.step(direction) {
            Some(next) => self.has_fence_between(pos, next),
            None => true,
        }
    }

    /// 不受挡板阻隔的相邻格子
    pub fn open_neighbors(&self, pos: Position) -> impl Iterator<Item = Position> + '_ {
        Direction::ALL.into_iter().filter_map(move |dir| {
            pos.step(dir).filter(|next| !self.has_fence_between(pos, *next))
        })
    }

    /// 挡板占据的两个边槽是否都空闲
    pub fn is_fence_free(&self, fence: Fence) -> bool {
        let grid = self.grid(fence.orientation);
        fence.slots().iter().all(|s| !Self::slot(grid, s.x, s.y))
    }

    fn grid(&self, orientation: Orientation) -> &[[bool; BOARD_SIZE]; BOARD_SIZE] {
        match orientation {
            Orientation::Horizontal => &self.fence_south,
            Orientation::Vertical => &self.fence_east,
        }
    }

    fn set_slots(&mut self, fence: Fence, value: bool) {
        let grid = match fence.orientation {
            Orientation::Horizontal => &mut self.fence_south,
            Orientation::Vertical => &mut self.fence_east,
        };
        for s in fence.slots() {
            grid[s.x as usize][s.y as usize] = value;
        }
    }

    /// 放置挡板（不检查公平规则）
    ///
    /// 任一边槽已被占用时返回 `FenceSlotOccupied`，此时不写入任何边槽。
    pub fn place_fence(&mut self, fence: Fence) -> Result<()> {
        if !fence.is_valid() {
            return Err(RuleError::OutOfBounds {
                x: fence.anchor.x,
                y: fence.anchor.y,
            });
        }
        if !self.is_fence_free(fence) {
            return Err(RuleError::FenceSlotOccupied);
        }
        self.set_slots(fence, true);
        self.fences.push(fence);
        Ok(())
    }

    /// 移除挡板（放置的逆操作，用于撤回违反公平规则的挡板）
    ///
    /// 挡板不在棋盘上时不做任何改动，返回 false。
    pub fn remove_fence(&mut self, fence: Fence) -> bool {
        match self.fences.iter().rposition(|f| *f == fence) {
            Some(idx) => {
                self.fences.remove(idx);
                self.set_slots(fence, false);
                true
            }
            None => false,
        }
    }

    /// 已放置的挡板
    pub fn fences(&self) -> &[Fence] {
        &self.fences
    }

    /// 剩余挡板数
    pub fn fences_remaining(&self, player: Player) -> u8 {
        self.fences_remaining[player.index()]
    }

    /// 消耗一块挡板
    pub fn spend_fence(&mut self, player: Player) -> Result<()> {
        let remaining = &mut self.fences_remaining[player.index()];
        if *remaining == 0 {
            return Err(RuleError::NoFencesRemaining);
        }
        *remaining -= 1;
        Ok(())
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::initial()
    }
}

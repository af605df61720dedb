//! 走法验证与公平规则
//!
//! - 棋子走法分类：一步、跳跃、斜向绕行
//! - 连通性搜索：判断某格能否到达目标行

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::board::Board;
use crate::constants::{CELL_COUNT, FENCE_ANCHOR_LIMIT};
use crate::error::{Result, RuleError};
use crate::fence::{Fence, Orientation};
use crate::player::{Direction, Player, Position};

/// 走法类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MoveKind {
    /// 正交移动一格
    Step,
    /// 直线跳过相邻的对方棋子
    Jump,
    /// 直跳被挡时绕到对方棋子侧面
    Diagonal,
}

/// 棋子走法
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PawnMove {
    pub player: Player,
    pub from: Position,
    pub to: Position,
    pub kind: MoveKind,
}

impl std::fmt::Display for PawnMove {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {} -> {}", self.player, self.from, self.to)
    }
}

/// 规则判定
pub struct Rules;

impl Rules {
    /// 对 player 走到 to 进行分类
    ///
    /// 不检查回合与边界，调用方负责；to 与当前位置相同时返回 `IllegalGeometry`。
    pub fn classify_move(
        board: &Board,
        player: Player,
        to: Position,
    ) -> Result<MoveKind> {
        let from = board.pawn_position(player);
        let opponent = board.pawn_position(player.opponent());

        let dx = to.x as i16 - from.x as i16;
        let dy = to.y as i16 - from.y as i16;
        let sx = dx.signum() as i8;
        let sy = dy.signum() as i8;

        let kind = match (dx.abs(), dy.abs()) {
            (0, 1) | (1, 0) => {
                let dir = Direction::from_delta(sx, sy).ok_or(RuleError::IllegalGeometry)?;
                if board.is_blocked(from, dir) {
                    return Err(RuleError::IllegalGeometry);
                }
                MoveKind::Step
            }
            (0, 2) | (2, 0) => {
                let dir = Direction::from_delta(sx, sy).ok_or(RuleError::IllegalGeometry)?;
                if !Self::can_jump(board, from, opponent, dir) {
                    return Err(RuleError::IllegalGeometry);
                }
                MoveKind::Jump
            }
            (1, 1) => {
                let horizontal = Direction::from_delta(sx, 0).ok_or(RuleError::IllegalGeometry)?;
                let vertical = Direction::from_delta(0, sy).ok_or(RuleError::IllegalGeometry)?;
                let legal = Self::can_sidestep(board, from, opponent, horizontal, vertical)
                    || Self::can_sidestep(board, from, opponent, vertical, horizontal);
                if !legal {
                    return Err(RuleError::IllegalGeometry);
                }
                MoveKind::Diagonal
            }
            _ => return Err(RuleError::IllegalGeometry),
        };

        if board.pawn_at(to) == Some(player.opponent()) {
            return Err(RuleError::DestinationOccupied);
        }

        Ok(kind)
    }

    /// 直线跳跃：对方棋子紧邻且前后两条边都没有挡板
    fn can_jump(board: &Board, from: Position, opponent: Position, toward: Direction) -> bool {
        match from.step(toward) {
            Some(middle) if middle == opponent => {
                !board.is_blocked(from, toward) && !board.is_blocked(middle, toward)
            }
            _ => false,
        }
    }

    /// 斜向绕行：对方棋子在 toward 方向紧邻，其身后被挡板或边界阻断，
    /// 且从对方棋子向 side 方向的边畅通
    fn can_sidestep(
        board: &Board,
        from: Position,
        opponent: Position,
        toward: Direction,
        side: Direction,
    ) -> bool {
        match from.step(toward) {
            Some(middle) if middle == opponent => {
                !board.is_blocked(from, toward)
                    && board.is_blocked(middle, toward)
                    && !board.is_blocked(middle, side)
            }
            _ => false,
        }
    }

    /// 生成 player 当前所有合法走法（不考虑回合）
    pub fn legal_pawn_moves(board: &Board, player: Player) -> Vec<PawnMove> {
        let from = board.pawn_position(player);
        let mut moves = Vec::with_capacity(8);

        for dy in -2i8..=2 {
            for dx in -2i8..=2 {
                let distance = dx.unsigned_abs() + dy.unsigned_abs();
                if distance == 0 || distance > 2 {
                    continue;
                }
                if let Some(to) = from.offset(dx, dy) {
                    if let Ok(kind) = Self::classify_move(board, player, to) {
                        moves.push(PawnMove { player, from, to, kind });
                    }
                }
            }
        }

        moves
    }

    /// 从 start 出发到达第 row 行所需的最少步数（忽略棋子，只看挡板）
    ///
    /// 广度优先搜索，每个格子最多访问一次；无法到达返回 None。
    pub fn shortest_path_len(board: &Board, start: Position, row: u8) -> Option<usize> {
        if !start.is_valid() {
            return None;
        }

        let mut visited = [false; CELL_COUNT];
        let mut queue = VecDeque::with_capacity(CELL_COUNT);
        visited[start.to_index()] = true;
        queue.push_back((start, 0usize));

        while let Some((pos, depth)) = queue.pop_front() {
            if pos.y == row {
                return Some(depth);
            }
            for next in board.open_neighbors(pos) {
                let idx = next.to_index();
                if !visited[idx] {
                    visited[idx] = true;
                    queue.push_back((next, depth + 1));
                }
            }
        }

        None
    }

    /// 从 start 能否到达第 row 行
    pub fn has_path_to_row(board: &Board, start: Position, row: u8) -> bool {
        Self::shortest_path_len(board, start, row).is_some()
    }

    /// placer 的对手是否还有通往目标行的路径
    ///
    /// 只保护对手，放置方困住自己不算违规。
    pub fn is_fair(board: &Board, placer: Player) -> bool {
        let opponent = placer.opponent();
        Self::has_path_to_row(board, board.pawn_position(opponent), opponent.goal_row())
    }

    /// 判断 placer 能否放置该挡板（边界、重叠、公平规则），不修改棋盘
    pub fn can_place_fence(board: &Board, placer: Player, fence: Fence) -> Result<()> {
        let mut scratch = board.clone();
        scratch.place_fence(fence)?;
        if Self::is_fair(&scratch, placer) {
            Ok(())
        } else {
            Err(RuleError::FairPlayViolation)
        }
    }

    /// 生成 placer 当前所有合法的挡板位置（不考虑回合）
    pub fn legal_fence_placements(board: &Board, placer: Player) -> Vec<Fence> {
        if board.fences_remaining(placer) == 0 {
            return Vec::new();
        }

        let mut scratch = board.clone();
        let mut fences = Vec::new();

        for orientation in [Orientation::Horizontal, Orientation::Vertical] {
            for y in 0..FENCE_ANCHOR_LIMIT as u8 {
                for x in 0..FENCE_ANCHOR_LIMIT as u8 {
                    let fence = Fence::new(orientation, Position::new_unchecked(x, y));
                    if scratch.place_fence(fence).is_err() {
                        continue;
                    }
                    if Self::is_fair(&scratch, placer) {
                        fences.push(fence);
                    }
                    scratch.remove_fence(fence);
                }
            }
        }

        fences
    }
}

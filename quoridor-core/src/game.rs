//! 对局控制
//!
//! 持有棋盘、走子方与胜者，是唯一允许修改棋盘的入口。

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::board::Board;
use crate::error::{Result, RuleError};
use crate::fence::{Fence, Orientation};
use crate::player::{Player, Position};
use crate::rules::{PawnMove, Rules};

/// 对局状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    /// 进行中
    Ongoing,
    /// 已分胜负
    Won(Player),
}

/// 只读快照，交给渲染方使用
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSnapshot {
    /// 双方棋子位置，按 `Player::index` 索引
    pub pawns: [Position; 2],
    /// 已放置的挡板
    pub fences: Vec<Fence>,
    /// 双方剩余挡板数
    pub fences_remaining: [u8; 2],
    pub current_turn: Player,
    pub winner: Option<Player>,
}

/// 一局游戏
///
/// 不实现反序列化，对局只能从 `Game::new` 经合法操作到达。
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Game {
    board: Board,
    current_turn: Player,
    winner: Option<Player>,
}

impl Game {
    /// 创建新对局
    pub fn new() -> Self {
        Self {
            board: Board::initial(),
            current_turn: Player::One,
            winner: None,
        }
    }

    /// 棋盘（只读）
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// 当前走子方
    pub fn current_turn(&self) -> Player {
        self.current_turn
    }

    /// 胜者
    pub fn winner(&self) -> Option<Player> {
        self.winner
    }

    /// 指定玩家是否获胜
    pub fn is_winner(&self, player: Player) -> bool {
        self.winner == Some(player)
    }

    /// 对局状态
    pub fn status(&self) -> GameStatus {
        match self.winner {
            Some(player) => GameStatus::Won(player),
            None => GameStatus::Ongoing,
        }
    }

    /// 是否已结束
    pub fn is_over(&self) -> bool {
        self.winner.is_some()
    }

    /// 检查是否轮到 player 且对局未结束
    fn check_turn(&self, player: Player) -> Result<()> {
        if self.winner.is_some() || player != self.current_turn {
            return Err(RuleError::OutOfTurn);
        }
        Ok(())
    }

    /// 切换走子方
    fn switch_turn(&mut self) {
        self.current_turn = self.current_turn.opponent();
    }

    /// 移动棋子
    ///
    /// 成功时切换走子方并检查胜负；失败时对局状态不变。
    pub fn move_pawn(&mut self, player: Player, to: Position) -> Result<PawnMove> {
        let result = self.try_move_pawn(player, to);
        if let Err(e) = &result {
            debug!("{} move to {} rejected: {}", player, to, e);
        }
        result
    }

    fn try_move_pawn(&mut self, player: Player, to: Position) -> Result<PawnMove> {
        if !to.is_valid() {
            return Err(RuleError::OutOfBounds { x: to.x, y: to.y });
        }
        self.check_turn(player)?;

        let from = self.board.pawn_position(player);
        if from == to {
            return Err(RuleError::NoOpMove);
        }

        let kind = Rules::classify_move(&self.board, player, to)?;
        if self.board.pawn_at(to).is_some() {
            return Err(RuleError::DestinationOccupied);
        }

        self.board.move_pawn(player, to);
        self.switch_turn();

        let mv = PawnMove { player, from, to, kind };
        debug!("{} ({:?})", mv, kind);

        if to.y == player.goal_row() {
            self.winner = Some(player);
            info!("{} reached row {} and wins", player, to.y);
        }

        Ok(mv)
    }

    /// 放置挡板
    ///
    /// 先试放挡板再做公平规则检查，违反时撤回并返回 `FairPlayViolation`，
    /// 棋盘恢复到调用前的状态。
    pub fn place_fence(
        &mut self,
        player: Player,
        orientation: Orientation,
        anchor: Position,
    ) -> Result<Fence> {
        let result = self.try_place_fence(player, Fence::new(orientation, anchor));
        if let Err(e) = &result {
            debug!("{} fence {}{} rejected: {}", player, orientation.to_char(), anchor, e);
        }
        result
    }

    fn try_place_fence(&mut self, player: Player, fence: Fence) -> Result<Fence> {
        if !fence.is_valid() {
            return Err(RuleError::OutOfBounds {
                x: fence.anchor.x,
                y: fence.anchor.y,
            });
        }
        self.check_turn(player)?;
        if self.board.fences_remaining(player) == 0 {
            return Err(RuleError::NoFencesRemaining);
        }

        // 试放
        self.board.place_fence(fence)?;

        if !Rules::is_fair(&self.board, player) {
            self.board.remove_fence(fence);
            return Err(RuleError::FairPlayViolation);
        }

        self.board.spend_fence(player)?;
        self.switch_turn();
        debug!(
            "{} placed fence {} ({} left)",
            player,
            fence,
            self.board.fences_remaining(player)
        );

        Ok(fence)
    }

    /// 当前走子方的所有合法走法，对局结束后为空
    pub fn legal_pawn_moves(&self) -> Vec<PawnMove> {
        if self.is_over() {
            return Vec::new();
        }
        Rules::legal_pawn_moves(&self.board, self.current_turn)
    }

    /// 当前走子方的所有合法挡板位置，对局结束后为空
    pub fn legal_fence_placements(&self) -> Vec<Fence> {
        if self.is_over() {
            return Vec::new();
        }
        Rules::legal_fence_placements(&self.board, self.current_turn)
    }

    /// 生成只读快照
    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            pawns: [
                self.board.pawn_position(Player::One),
                self.board.pawn_position(Player::Two),
            ],
            fences: self.board.fences().to_vec(),
            fences_remaining: [
                self.board.fences_remaining(Player::One),
                self.board.fences_remaining(Player::Two),
            ],
            current_turn: self.current_turn,
            winner: self.winner,
        }
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

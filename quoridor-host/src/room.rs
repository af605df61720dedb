//! 房间系统

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock};

use quoridor_core::{Fence, Game, GameSnapshot, Orientation, PawnMove, Player, Position};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use tracing::info;

use crate::error::{HostError, Result};

/// 房间 ID
pub type RoomId = u64;

/// 共享对局
///
/// 同一局的所有操作串行执行，不同房间互不阻塞。
#[derive(Debug, Clone, Default)]
pub struct SharedGame {
    inner: Arc<Mutex<Game>>,
}

impl SharedGame {
    pub fn new(game: Game) -> Self {
        Self {
            inner: Arc::new(Mutex::new(game)),
        }
    }

    /// 移动棋子
    pub async fn move_pawn(&self, player: Player, to: Position) -> Result<PawnMove> {
        let mut game = self.inner.lock().await;
        Ok(game.move_pawn(player, to)?)
    }

    /// 放置挡板
    pub async fn place_fence(
        &self,
        player: Player,
        orientation: Orientation,
        anchor: Position,
    ) -> Result<Fence> {
        let mut game = self.inner.lock().await;
        Ok(game.place_fence(player, orientation, anchor)?)
    }

    /// 当前局面快照
    pub async fn snapshot(&self) -> GameSnapshot {
        self.inner.lock().await.snapshot()
    }

    pub async fn is_winner(&self, player: Player) -> bool {
        self.inner.lock().await.is_winner(player)
    }

    pub async fn current_turn(&self) -> Player {
        self.inner.lock().await.current_turn()
    }
}

/// 房间概要（用于列表展示）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomSummary {
    pub id: RoomId,
    pub current_turn: Player,
    pub winner: Option<Player>,
}

/// 房间管理器
///
/// 房间表只在查找时短暂持有读写锁，对局本身由各自的异步锁保护。
pub struct RoomManager {
    rooms: RwLock<HashMap<RoomId, SharedGame>>,
    next_id: AtomicU64,
}

impl RoomManager {
    pub fn new() -> Self {
        Self {
            rooms: RwLock::new(HashMap::new()),
            next_id: AtomicU64::new(1),
        }
    }

    /// 生成新的房间 ID
    fn generate_id(&self) -> RoomId {
        self.next_id.fetch_add(1, Ordering::SeqCst)
    }

    /// 创建房间并开始新对局
    pub fn create(&self) -> RoomId {
        let id = self.generate_id();
        self.rooms
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(id, SharedGame::default());
        info!("Room {} created", id);
        id
    }

    /// 获取房间
    pub fn get(&self, room_id: RoomId) -> Option<SharedGame> {
        self.rooms
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&room_id)
            .cloned()
    }

    /// 移除房间
    pub fn remove(&self, room_id: RoomId) -> bool {
        let removed = self
            .rooms
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&room_id)
            .is_some();
        if removed {
            info!("Room {} removed", room_id);
        }
        removed
    }

    /// 获取房间数量
    pub fn count(&self) -> usize {
        self.rooms.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    /// 所有房间 ID（升序）
    pub fn ids(&self) -> Vec<RoomId> {
        let mut ids: Vec<RoomId> = self
            .rooms
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .keys()
            .copied()
            .collect();
        ids.sort_unstable();
        ids
    }

    fn require(&self, room_id: RoomId) -> Result<SharedGame> {
        self.get(room_id).ok_or(HostError::RoomNotFound(room_id))
    }

    /// 在指定房间移动棋子
    pub async fn move_pawn(
        &self,
        room_id: RoomId,
        player: Player,
        to: Position,
    ) -> Result<PawnMove> {
        self.require(room_id)?.move_pawn(player, to).await
    }

    /// 在指定房间放置挡板
    pub async fn place_fence(
        &self,
        room_id: RoomId,
        player: Player,
        orientation: Orientation,
        anchor: Position,
    ) -> Result<Fence> {
        self.require(room_id)?.place_fence(player, orientation, anchor).await
    }

    /// 房间概要列表
    pub async fn summaries(&self) -> Vec<RoomSummary> {
        let mut summaries = Vec::new();
        for id in self.ids() {
            // 列表生成期间房间可能已被移除
            let Some(shared) = self.get(id) else { continue };
            let snapshot = shared.snapshot().await;
            summaries.push(RoomSummary {
                id,
                current_turn: snapshot.current_turn,
                winner: snapshot.winner,
            });
        }
        summaries
    }
}

impl Default for RoomManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quoridor_core::RuleError;
    use tracing_subscriber::EnvFilter;

    fn init_tracing() {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    }

    fn pos(x: u8, y: u8) -> Position {
        Position::new_unchecked(x, y)
    }

    #[test]
    fn test_create_room() {
        let manager = RoomManager::new();

        let id1 = manager.create();
        let id2 = manager.create();

        assert_ne!(id1, id2);
        assert_eq!(manager.count(), 2);
        assert_eq!(manager.ids(), vec![id1, id2]);
    }

    #[test]
    fn test_remove_room() {
        let manager = RoomManager::new();
        let id = manager.create();

        assert!(manager.remove(id));
        assert!(!manager.remove(id));
        assert!(manager.get(id).is_none());
        assert_eq!(manager.count(), 0);
    }

    #[tokio::test]
    async fn test_unknown_room() {
        init_tracing();
        let manager = RoomManager::new();

        let err = manager.move_pawn(42, Player::One, pos(4, 1)).await.unwrap_err();
        assert_eq!(err, HostError::RoomNotFound(42));
    }

    #[tokio::test]
    async fn test_play_through_manager() -> anyhow::Result<()> {
        init_tracing();
        let manager = RoomManager::new();
        let id = manager.create();

        manager.move_pawn(id, Player::One, pos(4, 1)).await?;
        let fence = manager
            .place_fence(id, Player::Two, Orientation::Horizontal, pos(3, 1))
            .await?;
        assert_eq!(fence, quoridor_core::Fence::horizontal(3, 1));

        let err = manager.move_pawn(id, Player::Two, pos(4, 7)).await.unwrap_err();
        assert_eq!(err, HostError::Rule(RuleError::OutOfTurn));

        let snapshot = manager.get(id).expect("room exists").snapshot().await;
        assert_eq!(snapshot.pawns, [pos(4, 1), pos(4, 8)]);
        assert_eq!(snapshot.fences_remaining, [10, 9]);
        assert_eq!(snapshot.current_turn, Player::One);
        Ok(())
    }

    #[tokio::test]
    async fn test_rooms_are_independent() -> anyhow::Result<()> {
        let manager = RoomManager::new();
        let a = manager.create();
        let b = manager.create();

        manager.move_pawn(a, Player::One, pos(3, 0)).await?;

        let game_b = manager.get(b).expect("room exists");
        assert_eq!(game_b.current_turn().await, Player::One);
        assert_eq!(game_b.snapshot().await.pawns[0], pos(4, 0));

        let summaries = manager.summaries().await;
        assert_eq!(summaries.len(), 2);
        assert_eq!(summaries[0].current_turn, Player::Two);
        assert_eq!(summaries[1].current_turn, Player::One);
        Ok(())
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_moves_are_serialized() {
        init_tracing();
        let manager = Arc::new(RoomManager::new());
        let id = manager.create();

        // 同一回合的多个并发请求只能有一个成功
        let mut handles = Vec::new();
        for x in [3, 4, 5] {
            let manager = Arc::clone(&manager);
            let to = if x == 4 { pos(4, 1) } else { pos(x, 0) };
            handles.push(tokio::spawn(async move {
                manager.move_pawn(id, Player::One, to).await
            }));
        }

        let mut accepted = 0;
        for handle in handles {
            match handle.await.expect("task panicked") {
                Ok(_) => accepted += 1,
                Err(err) => assert_eq!(err, HostError::Rule(RuleError::OutOfTurn)),
            }
        }

        assert_eq!(accepted, 1);
        let game = manager.get(id).expect("room exists");
        assert_eq!(game.current_turn().await, Player::Two);
    }

    #[tokio::test]
    async fn test_winner_visible_through_shared_game() -> anyhow::Result<()> {
        let game = SharedGame::default();

        // 玩家一沿第 4 列直走，玩家二在底线左右挪动
        for y in 1..=7u8 {
            game.move_pawn(Player::One, pos(4, y)).await?;
            let x = if y % 2 == 1 { 3 } else { 4 };
            game.move_pawn(Player::Two, pos(x, 8)).await?;
        }
        assert!(!game.is_winner(Player::One).await);

        game.move_pawn(Player::One, pos(4, 8)).await?;
        assert!(game.is_winner(Player::One).await);
        assert!(!game.is_winner(Player::Two).await);

        let err = game.move_pawn(Player::Two, pos(3, 7)).await.unwrap_err();
        assert_eq!(err, HostError::Rule(RuleError::OutOfTurn));
        Ok(())
    }
}

use anyhow::Result;
use quoridor_core::{Orientation, Player, Position};
use quoridor_host::{HostError, RoomManager};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// 演示对局中的一步
enum Action {
    Move(Player, u8, u8),
    Fence(Player, Orientation, u8, u8),
}

#[tokio::main]
async fn main() -> Result<()> {
    // 初始化日志
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::EnvFilter::from_default_env()
            .add_directive("quoridor_host=info".parse()?)
            .add_directive("quoridor_core=debug".parse()?))
        .init();

    info!("Quoridor 对局托管启动中...");

    let manager = RoomManager::new();
    let id = manager.create();

    use Action::*;
    let script = [
        Move(Player::One, 4, 1),
        Move(Player::Two, 4, 7),
        Fence(Player::One, Orientation::Horizontal, 3, 6),
        Move(Player::Two, 3, 7),
        Move(Player::One, 4, 2),
        Fence(Player::Two, Orientation::Vertical, 3, 2),
        // 非走子方的请求会被拒绝
        Move(Player::Two, 3, 6),
        Move(Player::One, 4, 3),
    ];

    for action in script {
        let result = match action {
            Move(player, x, y) => manager
                .move_pawn(id, player, Position::new_unchecked(x, y))
                .await
                .map(|mv| mv.to_string()),
            Fence(player, orientation, x, y) => manager
                .place_fence(id, player, orientation, Position::new_unchecked(x, y))
                .await
                .map(|fence| format!("{} placed {}", player, fence)),
        };
        match result {
            Ok(summary) => info!("{}", summary),
            Err(HostError::Rule(err)) => warn!("rejected: {}", err),
            Err(err) => return Err(err.into()),
        }
    }

    for summary in manager.summaries().await {
        info!("room {}: {} to move, winner {:?}", summary.id, summary.current_turn, summary.winner);
    }

    manager.remove(id);
    Ok(())
}

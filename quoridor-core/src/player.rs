//! 玩家、坐标与方向定义

use serde::{Deserialize, Serialize};

use crate::constants::{BOARD_SIZE, CELL_COUNT, PLAYER_ONE_START, PLAYER_TWO_START};

/// 玩家
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    /// 玩家一（先手，底线为第 0 行）
    One,
    /// 玩家二（后手，底线为第 8 行）
    Two,
}

impl Player {
    /// 获取对手
    pub fn opponent(&self) -> Player {
        match self {
            Player::One => Player::Two,
            Player::Two => Player::One,
        }
    }

    /// 数组索引（0 / 1）
    pub fn index(&self) -> usize {
        match self {
            Player::One => 0,
            Player::Two => 1,
        }
    }

    /// 玩家编号（1 / 2）
    pub fn number(&self) -> u8 {
        match self {
            Player::One => 1,
            Player::Two => 2,
        }
    }

    /// 己方底线所在行
    pub fn baseline_row(&self) -> u8 {
        match self {
            Player::One => 0,
            Player::Two => (BOARD_SIZE - 1) as u8,
        }
    }

    /// 目标行，即对方底线
    pub fn goal_row(&self) -> u8 {
        self.opponent().baseline_row()
    }

    /// 起始位置
    pub fn start_position(&self) -> Position {
        match self {
            Player::One => PLAYER_ONE_START,
            Player::Two => PLAYER_TWO_START,
        }
    }
}

impl std::fmt::Display for Player {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "player {}", self.number())
    }
}

/// 正交方向
///
/// 第 0 行画在上方：北为行号减小，南为行号增大。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// 行号减小（朝玩家一底线）
    North,
    /// 列号增大
    East,
    /// 行号增大（朝玩家二底线）
    South,
    /// 列号减小
    West,
}

impl Direction {
    /// 全部四个方向
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::East,
        Direction::South,
        Direction::West,
    ];

    /// 坐标增量 (dx, dy)
    pub fn delta(&self) -> (i8, i8) {
        match self {
            Direction::North => (0, -1),
            Direction::East => (1, 0),
            Direction::South => (0, 1),
            Direction::West => (-1, 0),
        }
    }

    /// 由单位增量反查方向
    pub fn from_delta(dx: i8, dy: i8) -> Option<Direction> {
        match (dx, dy) {
            (0, -1) => Some(Direction::North),
            (1, 0) => Some(Direction::East),
            (0, 1) => Some(Direction::South),
            (-1, 0) => Some(Direction::West),
            _ => None,
        }
    }
}

/// 棋盘格子坐标
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    /// 列 (0-8)
    pub x: u8,
    /// 行 (0-8)
    pub y: u8,
}

impl Position {
    /// 创建新位置
    pub fn new(x: u8, y: u8) -> Option<Self> {
        if (x as usize) < BOARD_SIZE && (y as usize) < BOARD_SIZE {
            Some(Self { x, y })
        } else {
            None
        }
    }

    /// 创建新位置（不检查边界）
    pub const fn new_unchecked(x: u8, y: u8) -> Self {
        Self { x, y }
    }

    /// 检查位置是否在棋盘内
    pub fn is_valid(&self) -> bool {
        (self.x as usize) < BOARD_SIZE && (self.y as usize) < BOARD_SIZE
    }

    /// 获取偏移后的位置
    pub fn offset(&self, dx: i8, dy: i8) -> Option<Position> {
        let new_x = self.x as i16 + dx as i16;
        let new_y = self.y as i16 + dy as i16;
        let size = BOARD_SIZE as i16;
        if (0..size).contains(&new_x) && (0..size).contains(&new_y) {
            Some(Position {
                x: new_x as u8,
                y: new_y as u8,
            })
        } else {
            None
        }
    }

    /// 沿方向走一步，出界返回 None
    pub fn step(&self, direction: Direction) -> Option<Position> {
        let (dx, dy) = direction.delta();
        self.offset(dx, dy)
    }

    /// 若两格正交相邻，返回从 self 指向 other 的方向
    pub fn direction_to(&self, other: Position) -> Option<Direction> {
        let dx = other.x as i16 - self.x as i16;
        let dy = other.y as i16 - self.y as i16;
        Direction::from_delta(dx as i8, dy as i8).filter(|_| dx.abs() + dy.abs() == 1)
    }

    /// 转换为数组索引
    pub fn to_index(&self) -> usize {
        self.y as usize * BOARD_SIZE + self.x as usize
    }

    /// 从数组索引转换
    pub fn from_index(index: usize) -> Option<Self> {
        if index < CELL_COUNT {
            Some(Position {
                x: (index % BOARD_SIZE) as u8,
                y: (index / BOARD_SIZE) as u8,
            })
        } else {
            None
        }
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

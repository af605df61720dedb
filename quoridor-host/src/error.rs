//! 托管层错误类型

use quoridor_core::RuleError;
use thiserror::Error;

use crate::room::RoomId;

/// 托管层错误
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HostError {
    #[error("Room not found: {0}")]
    RoomNotFound(RoomId),

    #[error(transparent)]
    Rule(#[from] RuleError),
}

pub type Result<T> = std::result::Result<T, HostError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rule_error_conversion() {
        let err: HostError = RuleError::FairPlayViolation.into();
        assert_eq!(err, HostError::Rule(RuleError::FairPlayViolation));
        assert_eq!(err.to_string(), "Fence breaks the fair play rule");
    }

    #[test]
    fn test_room_not_found_message() {
        assert_eq!(HostError::RoomNotFound(7).to_string(), "Room not found: 7");
    }
}

//! Ошибки AI (локальны для одного агента, никогда не фатальны для симуляции)

use thiserror::Error;

#[derive(Debug, Error)]
pub enum BehaviorError {
    /// WaypointRegistry пуст — Patrol некуда идти
    #[error("no checkpoints available for patrol")]
    NoCheckpoints,

    /// В мире нет SafePoint — RunAway некуда бежать
    #[error("no safe point available for run away")]
    NoSafePoint,

    #[error("checkpoint index {index} is out of range (registry size {len})")]
    InvalidCheckpointIndex { index: usize, len: usize },

    #[error("invalid AI config: {0}")]
    InvalidConfig(#[from] ron::error::SpannedError),
}

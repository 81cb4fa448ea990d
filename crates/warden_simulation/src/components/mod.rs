//! ECS Components для агентов и мира
//!
//! Организация по доменам:
//! - agent: NPC, цель, точки патруля, rally point
//! - movement: navigation handle (NavAgent)
//! - ai: re-export FSM компонентов (BehaviorMachine, AIConfig)

pub mod agent;
pub mod ai;
pub mod movement;

// Re-exports для удобного импорта
pub use agent::*;
pub use ai::*;
pub use movement::*;

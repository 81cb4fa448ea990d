//! AI systems (FSM tick, target binding, waypoint registry)

pub mod fsm;
pub mod reactions;
pub mod waypoints;

// Re-export all systems
pub use fsm::*;
pub use reactions::*;
pub use waypoints::*;

//! AI компоненты: state machine, config

// NOTE: BehaviorMachine и AIConfig живут в crate::ai::components
// Экспортируем их здесь для единообразия импорта через crate::components

pub use crate::ai::{AIConfig, BehaviorMachine};

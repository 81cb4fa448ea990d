//! Построение WaypointRegistry из Checkpoint entities

use bevy::prelude::*;

use crate::ai::{Waypoint, WaypointRegistry};
use crate::components::Checkpoint;

/// System: собирает registry при первом появлении Checkpoint'ов (run_if: resource ещё не существует)
///
/// Пока Checkpoint'ов нет, registry не создаётся: Patrol видит пустой список и откатывается в Idle,
/// но сессия не залипает на пустом registry. Checkpoint'ы заспавненные после построения игнорируются.
pub fn init_waypoint_registry(mut commands: Commands, checkpoints: Query<(&Checkpoint, &Transform)>) {
    if checkpoints.is_empty() {
        return;
    }

    let registry = WaypointRegistry::from_checkpoints(
        checkpoints
            .iter()
            .map(|(checkpoint, transform)| Waypoint::new(checkpoint.name.clone(), transform.translation)),
    );

    crate::logger::log_info(&format!("AI: waypoint registry built ({} checkpoints)", registry.len()));
    commands.insert_resource(registry);
}

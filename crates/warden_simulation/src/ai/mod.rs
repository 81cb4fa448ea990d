//! AI decision-making module
//!
//! Enum-dispatched FSM для охранников (Idle, Patrol, Pursue, Attack, RunAway).
//! Каждый NPC владеет ровно одним resident BehaviorState внутри BehaviorMachine.

use bevy::ecs::schedule::common_conditions::{not, resource_exists};
use bevy::prelude::*;

pub mod components;
pub mod error;
pub mod events;
pub mod perception;
pub mod states;
pub mod systems;
pub mod waypoints;

// Re-export основных типов
pub use components::{AIConfig, AttackSuccessPolicy, BehaviorKind, BehaviorMachine, Stage};
pub use error::BehaviorError;
pub use events::{
    AnimationTrigger, AttackSucceeded, PresentationEvent, PresentationSignal, SoundCue, TargetRespawned,
};
pub use perception::PerceptionConfig;
pub use states::{Behavior, BehaviorContext, BehaviorEffects, BehaviorState, Transition};
pub use systems::*;
pub use waypoints::{Waypoint, WaypointRegistry};

use crate::{DeterministicRng, DEFAULT_SEED};

/// Системы, которые двигают агентов (FSM + navigation). SessionPlugin ставит их на паузу после game over.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub struct AgentSimulationSet;

/// AI Plugin
///
/// Регистрирует AI системы в FixedUpdate для детерминизма.
/// Порядок выполнения:
/// 1. init_waypoint_registry — один раз, из Checkpoint entities
/// 2. bind_initial_target — только что заспавненные NPC получают цель
/// 3. rebind_target_on_respawn — TargetRespawned → перепривязка
/// 4. tick_behavior_machines — один тик FSM для каждого NPC
pub struct AIPlugin;

impl Plugin for AIPlugin {
    fn build(&self, app: &mut App) {
        if !app.world().contains_resource::<DeterministicRng>() {
            app.insert_resource(DeterministicRng::new(DEFAULT_SEED));
        }

        app.register_type::<AIConfig>()
            .register_type::<crate::components::NavAgent>()
            .register_type::<crate::components::Npc>()
            .register_type::<crate::components::TargetActor>()
            .register_type::<crate::components::Checkpoint>()
            .register_type::<crate::components::SafePoint>()
            .add_event::<PresentationEvent>()
            .add_event::<AttackSucceeded>()
            .add_event::<TargetRespawned>()
            .add_systems(
                FixedUpdate,
                (
                    init_waypoint_registry.run_if(not(resource_exists::<WaypointRegistry>)),
                    bind_initial_target,
                    rebind_target_on_respawn,
                    tick_behavior_machines,
                )
                    .chain() // Последовательное выполнение для детерминизма
                    .in_set(AgentSimulationSet),
            );
    }
}

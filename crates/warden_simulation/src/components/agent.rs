//! Агенты и маркеры мира: Npc, TargetActor, Checkpoint, SafePoint

use bevy::prelude::*;

use crate::ai::{AIConfig, BehaviorMachine};
use crate::components::NavAgent;

/// NPC (охранник) — entity под управлением BehaviorMachine
///
/// Автоматически добавляет Transform, NavAgent, AIConfig и BehaviorMachine (Idle)
/// через Required Components.
#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component)]
#[require(Transform, NavAgent, AIConfig, BehaviorMachine)]
pub struct Npc;

/// Цель NPC (player-controlled entity)
///
/// Session controller пересоздаёт её при respawn и рассылает TargetRespawned.
/// Одновременно живёт не больше одной.
#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component)]
#[require(Transform)]
pub struct TargetActor;

/// Точка патруля. Порядок обхода определяется по `name`.
#[derive(Component, Debug, Clone, Default, Reflect)]
#[reflect(Component)]
#[require(Transform)]
pub struct Checkpoint {
    pub name: String,
}

impl Checkpoint {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// Rally point для RunAway (первый найденный SafePoint)
#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component)]
#[require(Transform)]
pub struct SafePoint;

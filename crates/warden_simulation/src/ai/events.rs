//! AI Events — сигналы FSM наружу и broadcast от session controller
//!
//! FSM → presentation layer: PresentationEvent (animation triggers, audio cues)
//! FSM → session controller: AttackSucceeded
//! Session controller → FSM: TargetRespawned (новая цель после respawn)

use bevy::prelude::*;

/// Animation trigger у NPC prefab
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Reflect)]
pub enum AnimationTrigger {
    Idle,
    Walking,
    Running,
    Shooting,
}

impl AnimationTrigger {
    /// Имя параметра в animator
    pub fn as_str(&self) -> &'static str {
        match self {
            AnimationTrigger::Idle => "isIdle",
            AnimationTrigger::Walking => "isWalking",
            AnimationTrigger::Running => "isRunning",
            AnimationTrigger::Shooting => "isShooting",
        }
    }
}

/// Audio cue у NPC
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Reflect)]
pub enum SoundCue {
    Gunfire,
}

/// Fire-and-forget сигнал для presentation layer (core не читает результат)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PresentationSignal {
    SetTrigger(AnimationTrigger),
    ResetTrigger(AnimationTrigger),
    PlaySound(SoundCue),
    StopSound(SoundCue),
}

/// Event: presentation сигнал от конкретного NPC
#[derive(Event, Debug, Clone, PartialEq)]
pub struct PresentationEvent {
    pub agent: Entity,
    pub signal: PresentationSignal,
}

/// Event: session controller пересоздал цель
///
/// Получатели обязаны быть идемпотентны: повторный broadcast той же цели ничего не меняет.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct TargetRespawned {
    pub target: Entity,
}

/// Event: Attack state достал цель (terminal outcome для session controller)
///
/// С `AttackSuccessPolicy::EveryTick` приходит на КАЖДОМ тике пока цель в радиусе.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttackSucceeded {
    pub attacker: Entity,
    pub target: Option<Entity>,
}

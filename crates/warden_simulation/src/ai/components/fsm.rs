//! FSM AI components (BehaviorMachine, state tags, config).

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::ai::perception::PerceptionConfig;
use crate::ai::states::{BehaviorContext, BehaviorState};
use crate::ai::BehaviorError;

/// Тег поведения (что агент делает сейчас)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Reflect, Serialize, Deserialize)]
pub enum BehaviorKind {
    /// Idle — начальное состояние после спавна
    #[default]
    Idle,
    /// Patrol — обход checkpoint'ов по кольцу
    Patrol,
    /// Pursue — погоня за целью (destination обновляется каждый тик)
    Pursue,
    /// Attack — стоим, доворачиваемся к цели, стреляем
    Attack,
    /// RunAway — бегство к rally point
    RunAway,
}

/// Фаза lifecycle state'а
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Reflect)]
pub enum Stage {
    Enter,
    Update,
    Exit,
}

/// Как Attack сообщает session controller'у об успехе
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Reflect, Serialize, Deserialize)]
pub enum AttackSuccessPolicy {
    /// AttackSucceeded на каждом тике пока цель в радиусе (default)
    #[default]
    EveryTick,
    /// Один AttackSucceeded на каждый вход в Attack
    Once,
}

/// Параметры AI
#[derive(Component, Debug, Clone, PartialEq, Reflect, Serialize, Deserialize)]
#[reflect(Component)]
#[serde(default)]
pub struct AIConfig {
    pub perception: PerceptionConfig,
    /// Шанс Idle → Patrol за тик (проценты, roll в [0, 100))
    pub patrol_chance_percent: u32,
    /// Скорость патруля (m/s)
    pub patrol_speed: f32,
    /// Скорость погони (m/s)
    pub pursue_speed: f32,
    /// Скорость бегства (m/s)
    pub run_away_speed: f32,
    /// remaining_distance ниже порога = прибыли
    pub arrival_distance: f32,
    /// Множитель slerp доворота в Attack (× delta)
    pub attack_rotation_speed: f32,
    pub attack_success_policy: AttackSuccessPolicy,
}

impl Default for AIConfig {
    fn default() -> Self {
        Self {
            perception: PerceptionConfig::default(),
            patrol_chance_percent: 10,
            patrol_speed: 2.0,
            pursue_speed: 5.0,
            run_away_speed: 6.0,
            arrival_distance: 1.0,
            attack_rotation_speed: 2.0,
            attack_success_policy: AttackSuccessPolicy::EveryTick,
        }
    }
}

impl AIConfig {
    /// Загрузка из RON (недостающие поля = default)
    pub fn from_ron(source: &str) -> Result<Self, BehaviorError> {
        Ok(ron::from_str(source)?)
    }
}

/// Agent controller: ровно один resident BehaviorState на NPC
///
/// Тикается системой tick_behavior_machines раз в FixedUpdate.
/// Successor заменяет предшественника атомарно внутри одного `tick`.
#[derive(Component, Debug)]
pub struct BehaviorMachine {
    state: BehaviorState,
    target_present: bool,
    transitions: u64,
}

impl Default for BehaviorMachine {
    fn default() -> Self {
        Self::new(None)
    }
}

impl BehaviorMachine {
    /// Новый автомат в Idle
    pub fn new(target: Option<Entity>) -> Self {
        Self::with_state(BehaviorState::idle(target))
    }

    pub fn with_state(state: BehaviorState) -> Self {
        Self {
            state,
            target_present: true,
            transitions: 0,
        }
    }

    pub fn current(&self) -> BehaviorKind {
        self.state.kind()
    }

    pub fn stage(&self) -> Stage {
        self.state.stage()
    }

    pub fn state(&self) -> &BehaviorState {
        &self.state
    }

    pub fn target(&self) -> Option<Entity> {
        self.state.target()
    }

    /// Сколько переходов совершил автомат
    pub fn transitions(&self) -> u64 {
        self.transitions
    }

    /// Перепривязка к новой цели. Возвращает false если цель та же (идемпотентно).
    pub fn rebind_target(&mut self, target: Entity) -> bool {
        if self.state.target() == Some(target) {
            return false;
        }
        self.state.rebind_target(target);
        true
    }

    /// Отмечает наличие цели на этом тике. true = цель только что пропала.
    pub fn observe_target(&mut self, present: bool) -> bool {
        let lost = self.target_present && !present;
        self.target_present = present;
        lost
    }

    /// Один тик: process resident state, при Exit — замена на successor.
    /// Возвращает (from, to) если переход произошёл.
    pub fn tick(&mut self, ctx: &mut BehaviorContext) -> Option<(BehaviorKind, BehaviorKind)> {
        let successor = self.state.process(ctx)?;
        let from = self.state.kind();
        let to = successor.kind();
        self.state = successor;
        self.transitions += 1;
        Some((from, to))
    }
}

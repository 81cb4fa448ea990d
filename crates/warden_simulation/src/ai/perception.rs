//! Perception — геометрические предикаты над Transform агента и позицией цели
//!
//! Все предикаты fail closed: цель отсутствует (None) → false.
//! Углы в градусах, forward агента = `Transform::forward()`.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Tunables восприятия
#[derive(Debug, Clone, Copy, PartialEq, Reflect, Serialize, Deserialize)]
#[serde(default)]
pub struct PerceptionConfig {
    /// Дальность зрения (метры)
    pub vision_distance: f32,
    /// Половина угла vision cone (градусы)
    pub vision_angle: f32,
    /// Дальность атаки (метры)
    pub attack_distance: f32,
    /// Дальность "чувствую спиной" (метры)
    pub rear_distance: f32,
    /// Половина угла rear cone (градусы)
    pub rear_angle: f32,
}

impl Default for PerceptionConfig {
    fn default() -> Self {
        Self {
            vision_distance: 10.0,
            vision_angle: 30.0,
            attack_distance: 7.0,
            rear_distance: 2.0,
            rear_angle: 30.0,
        }
    }
}

/// Угол между векторами в градусах. Вырожденный (нулевой) вектор → 0°.
pub fn angle_degrees(a: Vec3, b: Vec3) -> f32 {
    let denominator = (a.length_squared() * b.length_squared()).sqrt();
    if denominator < 1e-15 {
        return 0.0;
    }
    (a.dot(b) / denominator).clamp(-1.0, 1.0).acos().to_degrees()
}

/// Цель в vision cone: distance < vision_distance И angle(target − agent, forward) < vision_angle
pub fn can_see_target(agent: &Transform, target: Option<Vec3>, config: &PerceptionConfig) -> bool {
    let Some(target) = target else {
        return false;
    };
    let direction = target - agent.translation;
    direction.length() < config.vision_distance
        && angle_degrees(direction, agent.forward().as_vec3()) < config.vision_angle
}

/// Цель вплотную за спиной: тот же тест, но по вектору (agent − target) и rear tunables
pub fn is_target_behind(agent: &Transform, target: Option<Vec3>, config: &PerceptionConfig) -> bool {
    let Some(target) = target else {
        return false;
    };
    let direction = agent.translation - target;
    direction.length() < config.rear_distance
        && angle_degrees(direction, agent.forward().as_vec3()) < config.rear_angle
}

/// Цель в радиусе атаки (угол не важен)
pub fn can_attack_target(agent: &Transform, target: Option<Vec3>, config: &PerceptionConfig) -> bool {
    let Some(target) = target else {
        return false;
    };
    agent.translation.distance(target) < config.attack_distance
}

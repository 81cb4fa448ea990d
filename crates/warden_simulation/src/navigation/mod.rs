//! Headless navigation — straight-line stand-in для pathfinding сервиса
//!
//! Читает запросы из NavAgent (destination, speed, is_stopped), двигает Transform
//! и отчитывается через `NavAgent::report_path`. Host с настоящим navmesh
//! не добавляет NavigationPlugin и пишет report_path сам.

use bevy::prelude::*;

use crate::ai::{tick_behavior_machines, AgentSimulationSet};
use crate::components::NavAgent;

/// Navigation Plugin (запускается после FSM тика: запросы этого тика обрабатываются сразу)
pub struct NavigationPlugin;

impl Plugin for NavigationPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            FixedUpdate,
            advance_nav_agents
                .after(tick_behavior_machines)
                .in_set(AgentSimulationSet),
        );
    }
}

/// Система: движение по прямой к destination
///
/// - is_stopped → стоим, но прогресс всё равно репортим (pending запрос закрывается)
/// - иначе шаг `speed × dt`, без overshoot
/// - разворот по направлению движения (вертикаль игнорируется)
pub fn advance_nav_agents(mut agents: Query<(&mut Transform, &mut NavAgent)>, time: Res<Time<Fixed>>) {
    let delta = time.delta_secs();

    for (mut transform, mut nav) in agents.iter_mut() {
        let Some(destination) = nav.destination() else {
            continue;
        };

        let to_destination = destination - transform.translation;
        let distance = to_destination.length();

        if !nav.is_stopped() && distance > f32::EPSILON {
            let step = (nav.speed() * delta).min(distance);
            transform.translation += to_destination / distance * step;

            let mut facing = to_destination;
            facing.y = 0.0;
            if facing.length_squared() > f32::EPSILON {
                transform.look_to(facing, Vec3::Y);
            }
        }

        let remaining = transform.translation.distance(destination);
        nav.report_path(remaining, true);
    }
}

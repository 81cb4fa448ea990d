//! Session controller: respawn цели и приёмник AttackSucceeded
//!
//! Session controller владеет TargetActor: по RespawnTargetRequest пересоздаёт его
//! и рассылает TargetRespawned всем агентам. AttackSucceeded — terminal outcome (game over).

use bevy::prelude::*;

use crate::ai::{
    rebind_target_on_respawn, tick_behavior_machines, AgentSimulationSet, AttackSucceeded, TargetRespawned,
};
use crate::components::TargetActor;

/// Состояние сессии
#[derive(Resource, Debug, Default, Clone, PartialEq, Eq)]
pub struct SessionState {
    /// Сколько AttackSucceeded получено (EveryTick политика = по одному за тик в радиусе)
    pub attack_successes: u64,
    pub game_over: bool,
    pub respawns: u32,
}

/// Event: пересоздать цель в заданной позиции
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct RespawnTargetRequest {
    pub transform: Transform,
}

impl SessionState {
    /// Сессия идёт (после game over агенты замирают)
    pub fn is_running(&self) -> bool {
        !self.game_over
    }
}

/// Run condition: AgentSimulationSet крутится пока нет game over
pub fn session_running(session: Option<Res<SessionState>>) -> bool {
    session.map_or(true, |session| session.is_running())
}

/// Session Plugin
///
/// Порядок в FixedUpdate:
/// - process_respawn_requests ДО rebind_target_on_respawn (broadcast доходит в том же тике)
/// - record_attack_success ПОСЛЕ tick_behavior_machines
/// - AgentSimulationSet на паузе после game over (FSM и navigation не тикают)
pub struct SessionPlugin;

impl Plugin for SessionPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SessionState>()
            .configure_sets(FixedUpdate, AgentSimulationSet.run_if(session_running))
            .add_event::<RespawnTargetRequest>()
            .add_event::<TargetRespawned>()
            .add_event::<AttackSucceeded>()
            .add_systems(
                FixedUpdate,
                (
                    process_respawn_requests.before(rebind_target_on_respawn),
                    record_attack_success.after(tick_behavior_machines),
                ),
            );
    }
}

/// System: despawn старой цели → spawn новой → broadcast TargetRespawned
///
/// Несколько запросов за тик: выживает последняя цель (одновременно живёт не больше одной).
pub fn process_respawn_requests(
    mut commands: Commands,
    mut requests: EventReader<RespawnTargetRequest>,
    targets: Query<Entity, With<TargetActor>>,
    mut respawned: EventWriter<TargetRespawned>,
    mut session: ResMut<SessionState>,
) {
    if requests.is_empty() {
        return;
    }

    for old in targets.iter() {
        commands.entity(old).despawn();
    }

    let mut spawned: Option<Entity> = None;
    for request in requests.read() {
        // Цель от предыдущего запроса в этом же тике
        if let Some(previous) = spawned.take() {
            commands.entity(previous).despawn();
        }

        let target = commands.spawn((TargetActor, request.transform)).id();
        spawned = Some(target);
        session.respawns += 1;

        crate::logger::log_info(&format!(
            "Session: target respawned as {:?} at {:?}",
            target, request.transform.translation
        ));
        respawned.write(TargetRespawned { target });
    }
}

/// System: AttackSucceeded → game over
pub fn record_attack_success(mut events: EventReader<AttackSucceeded>, mut session: ResMut<SessionState>) {
    for event in events.read() {
        session.attack_successes += 1;
        if !session.game_over {
            session.game_over = true;
            crate::logger::log_info(&format!(
                "Session: {:?} reached target {:?} → game over",
                event.attacker, event.target
            ));
        }
    }
}

//! AI reaction systems (привязка к цели, respawn цели).

use bevy::prelude::*;

use crate::ai::{BehaviorMachine, TargetRespawned};
use crate::components::TargetActor;

/// System: только что заспавненные NPC привязываются к текущей цели
///
/// Цели нет → логируем, NPC живёт без цели (все perception предикаты = false).
pub fn bind_initial_target(
    mut machines: Query<(Entity, &mut BehaviorMachine), Added<BehaviorMachine>>,
    targets: Query<Entity, With<TargetActor>>,
) {
    let target = targets.iter().next();

    for (entity, mut machine) in machines.iter_mut() {
        if machine.target().is_some() {
            continue; // Уже привязан при спавне
        }

        match target {
            Some(target) => {
                machine.rebind_target(target);
                crate::logger::log(&format!("AI: {:?} bound to target {:?}", entity, target));
            }
            None => {
                crate::logger::log_error(&format!("AI: {:?} spawned without a TargetActor in the world", entity));
            }
        }
    }
}

/// System: TargetRespawned → перепривязка всех NPC
///
/// Идемпотентна: повторный broadcast той же цели ничего не меняет.
/// Подписка живёт ровно столько, сколько BehaviorMachine (despawn NPC = отписка).
pub fn rebind_target_on_respawn(
    mut respawns: EventReader<TargetRespawned>,
    mut machines: Query<&mut BehaviorMachine>,
) {
    for respawn in respawns.read() {
        let mut rebound = 0;
        for mut machine in machines.iter_mut() {
            // Не трогаем Mut без изменений (change detection)
            if machine.target() == Some(respawn.target) {
                continue;
            }
            if machine.rebind_target(respawn.target) {
                rebound += 1;
            }
        }

        if rebound > 0 {
            crate::logger::log_info(&format!(
                "AI: target respawned as {:?}, rebound {} agents",
                respawn.target, rebound
            ));
        }
    }
}

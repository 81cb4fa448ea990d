//! FSM AI systems (тик BehaviorMachine, flush side effects в events).

use bevy::prelude::*;

use crate::ai::{
    AIConfig, AttackSucceeded, BehaviorContext, BehaviorEffects, BehaviorMachine, PresentationEvent, WaypointRegistry,
};
use crate::components::{NavAgent, Npc, SafePoint, TargetActor};
use crate::DeterministicRng;

/// Система: один тик FSM для каждого NPC
///
/// Порядок внутри тика (на агента):
/// 1. Резолв позиции цели (despawned entity → None, perception fail closed)
/// 2. BehaviorMachine::tick (Enter → Update → Exit, successor на месте предшественника)
/// 3. Flush side effects: PresentationEvent, AttackSucceeded
///
/// Rally point = первый найденный SafePoint, резолвится каждый тик и копируется
/// в RunAway при его создании.
pub fn tick_behavior_machines(
    mut agents: Query<
        (Entity, &mut BehaviorMachine, &mut Transform, &mut NavAgent, &AIConfig),
        (With<Npc>, Without<TargetActor>),
    >,
    targets: Query<&Transform, (With<TargetActor>, Without<Npc>)>,
    safe_points: Query<&Transform, (With<SafePoint>, Without<Npc>)>,
    registry: Option<Res<WaypointRegistry>>,
    mut rng: ResMut<DeterministicRng>,
    time: Res<Time<Fixed>>,
    mut presentation_events: EventWriter<PresentationEvent>,
    mut attack_events: EventWriter<AttackSucceeded>,
    mut effects: Local<BehaviorEffects>,
) {
    let delta = time.delta_secs();
    let safe_point = safe_points.iter().next().map(|transform| transform.translation);
    let empty_registry = WaypointRegistry::default();
    let waypoints = registry.as_deref().unwrap_or(&empty_registry);

    for (entity, mut machine, mut transform, mut nav, config) in agents.iter_mut() {
        let target_entity = machine.target();
        let target = target_entity
            .and_then(|target| targets.get(target).ok())
            .map(|transform| transform.translation);

        if machine.observe_target(target.is_some()) {
            crate::logger::log_warning(&format!(
                "AI: {:?} has no target (bound {:?}), perception disabled",
                entity, target_entity
            ));
        }

        effects.clear();
        let transition = {
            let mut ctx = BehaviorContext {
                agent: entity,
                transform: &mut transform,
                nav: &mut nav,
                target,
                waypoints,
                safe_point,
                config,
                rng: &mut rng.rng,
                delta,
                effects: &mut effects,
            };
            machine.tick(&mut ctx)
        };

        if let Some((from, to)) = transition {
            crate::logger::log(&format!("AI: {:?} {:?} → {:?}", entity, from, to));
        }

        for signal in effects.signals.drain(..) {
            presentation_events.write(PresentationEvent { agent: entity, signal });
        }

        if effects.attack_succeeded {
            attack_events.write(AttackSucceeded {
                attacker: entity,
                target: machine.target(),
            });
        }
    }
}

//! Behavior integration test
//!
//! Охранники в headless App (SimulationPlugin + fixed тики без wall clock)
//!
//! Проверяем:
//! - Idle → Pursue → Attack на реальных системах
//! - AttackSucceeded доходит до SessionState (game over)
//! - Respawn цели перепривязывает всех агентов, повторный broadcast идемпотентен
//! - Потеря цели и бегство к rally point
//! - Game over ставит агентов на паузу, буферы событий не растут
//! - WaypointRegistry строится когда checkpoint'ы появились

use bevy::prelude::*;
use warden_simulation::ai::{AnimationTrigger, PresentationSignal};
use warden_simulation::*;

/// Helper: App со всеми plugins. NavigationPlugin опционален (без него путь никогда не строится)
fn create_guard_app(with_navigation: bool) -> App {
    let mut app = create_headless_app(DEFAULT_SEED);
    app.add_plugins(SimulationPlugin);
    if with_navigation {
        app.add_plugins(NavigationPlugin);
    }
    app
}

/// Helper: NPC в origin, смотрит в -Z
fn spawn_guard(app: &mut App, config: AIConfig) -> Entity {
    app.world_mut().spawn((Npc, Transform::IDENTITY, config)).id()
}

fn spawn_target(app: &mut App, position: Vec3) -> Entity {
    app.world_mut()
        .spawn((TargetActor, Transform::from_translation(position)))
        .id()
}

fn machine(app: &App, guard: Entity) -> &BehaviorMachine {
    app.world().get::<BehaviorMachine>(guard).unwrap()
}

fn step_n(app: &mut App, ticks: usize) {
    for _ in 0..ticks {
        step_fixed(app);
    }
}

#[test]
fn test_guard_binds_target_and_pursues() {
    let mut app = create_guard_app(false);
    let target = spawn_target(&mut app, Vec3::new(0.0, 0.0, -5.0));
    let guard = spawn_guard(&mut app, AIConfig::default());

    step_fixed(&mut app);

    assert_eq!(machine(&app, guard).target(), Some(target));
    assert_eq!(machine(&app, guard).current(), BehaviorKind::Pursue);

    let events = app.world().resource::<Events<PresentationEvent>>();
    let signals: Vec<_> = events
        .iter_current_update_events()
        .filter(|event| event.agent == guard)
        .map(|event| event.signal)
        .collect();
    assert_eq!(
        signals,
        vec![
            PresentationSignal::SetTrigger(AnimationTrigger::Idle),
            PresentationSignal::ResetTrigger(AnimationTrigger::Idle),
        ]
    );

    // Следующий шаг свапает буфер: в текущем только сигналы этого шага
    step_fixed(&mut app);
    let events = app.world().resource::<Events<PresentationEvent>>();
    let signals: Vec<_> = events
        .iter_current_update_events()
        .filter(|event| event.agent == guard)
        .map(|event| event.signal)
        .collect();
    assert_eq!(signals, vec![PresentationSignal::SetTrigger(AnimationTrigger::Running)]);
}

#[test]
fn test_guard_closes_in_and_ends_session() {
    let mut app = create_guard_app(true);
    spawn_target(&mut app, Vec3::new(0.0, 0.0, -9.0));
    let guard = spawn_guard(&mut app, AIConfig::default());

    let mut visited = Vec::new();
    for _ in 0..120 {
        step_fixed(&mut app);
        let kind = machine(&app, guard).current();
        if visited.last() != Some(&kind) {
            visited.push(kind);
        }
    }

    assert_eq!(
        visited,
        vec![BehaviorKind::Pursue, BehaviorKind::Attack],
        "guard should chase and then attack without detours"
    );

    let session = app.world().resource::<SessionState>();
    assert!(session.game_over);
    // Game over ставит агентов на паузу сразу после первого успеха
    assert_eq!(session.attack_successes, 1);

    let nav = app.world().get::<NavAgent>(guard).unwrap();
    assert!(nav.is_stopped());
}

#[test]
fn test_game_over_freezes_agents() {
    let mut app = create_guard_app(true);
    spawn_target(&mut app, Vec3::new(0.0, 0.0, -6.0));
    let guard = spawn_guard(&mut app, AIConfig::default());

    step_n(&mut app, 10);
    assert!(app.world().resource::<SessionState>().game_over);

    let transitions = machine(&app, guard).transitions();
    let rotation = app.world().get::<Transform>(guard).unwrap().rotation;
    step_n(&mut app, 60);

    assert_eq!(app.world().resource::<SessionState>().attack_successes, 1);
    assert_eq!(machine(&app, guard).transitions(), transitions);
    assert_eq!(app.world().get::<Transform>(guard).unwrap().rotation, rotation);
}

#[test]
fn test_event_buffers_stay_bounded() {
    // Без SessionPlugin: никто не останавливает атаку, AttackSucceeded летит каждый тик
    let mut app = create_headless_app(DEFAULT_SEED);
    app.add_plugins((AIPlugin, NavigationPlugin));
    let target = spawn_target(&mut app, Vec3::new(0.0, 0.0, -3.0));
    spawn_guard(&mut app, AIConfig::default());

    for tick in 0..600 {
        app.world_mut().send_event(TargetRespawned { target });
        step_fixed(&mut app);

        if tick >= 10 {
            let world = app.world();
            assert!(world.resource::<Events<AttackSucceeded>>().len() <= 2, "tick {}", tick);
            assert!(world.resource::<Events<TargetRespawned>>().len() <= 2, "tick {}", tick);
            assert!(world.resource::<Events<PresentationEvent>>().len() <= 8, "tick {}", tick);
        }
    }
    // Атака действительно шла всё это время
    assert_eq!(
        app.world()
            .resource::<Events<AttackSucceeded>>()
            .iter_current_update_events()
            .count(),
        1
    );
}

#[test]
fn test_registry_waits_for_checkpoints() {
    let mut app = create_guard_app(false);
    // Тик до появления checkpoint'ов не должен зафиксировать пустой registry
    step_fixed(&mut app);
    assert!(app.world().get_resource::<WaypointRegistry>().is_none());

    for (name, position) in [("cp_a", Vec3::new(10.0, 0.0, 0.0)), ("cp_b", Vec3::new(-10.0, 0.0, 0.0))] {
        app.world_mut()
            .spawn((Checkpoint::new(name), Transform::from_translation(position)));
    }
    let guard = spawn_guard(
        &mut app,
        AIConfig {
            patrol_chance_percent: 100,
            ..AIConfig::default()
        },
    );

    let mut visited = Vec::new();
    for _ in 0..10 {
        step_fixed(&mut app);
        let kind = machine(&app, guard).current();
        if visited.last() != Some(&kind) {
            visited.push(kind);
        }
    }

    assert_eq!(app.world().resource::<WaypointRegistry>().len(), 2);
    assert_eq!(visited, vec![BehaviorKind::Patrol], "guard should settle into Patrol");
}

#[test]
fn test_respawn_rebinds_all_guards() {
    let mut app = create_guard_app(false);
    let old_target = spawn_target(&mut app, Vec3::new(50.0, 0.0, 50.0));
    let config = AIConfig {
        patrol_chance_percent: 0,
        ..AIConfig::default()
    };
    let guards = [spawn_guard(&mut app, config.clone()), spawn_guard(&mut app, config)];
    step_fixed(&mut app);

    app.world_mut().send_event(RespawnTargetRequest {
        transform: Transform::from_xyz(0.0, 0.0, 60.0),
    });
    step_fixed(&mut app);

    assert!(app.world().get_entity(old_target).is_err(), "old target must be despawned");

    let mut targets = app.world_mut().query_filtered::<Entity, With<TargetActor>>();
    let alive: Vec<Entity> = targets.iter(app.world()).collect();
    assert_eq!(alive.len(), 1);
    let new_target = alive[0];

    for guard in guards {
        assert_eq!(machine(&app, guard).target(), Some(new_target));
    }
    assert_eq!(app.world().resource::<SessionState>().respawns, 1);

    // Повторный broadcast той же цели ничего не меняет
    let before: Vec<u64> = guards.iter().map(|g| machine(&app, *g).transitions()).collect();
    app.world_mut().send_event(TargetRespawned { target: new_target });
    app.world_mut().send_event(TargetRespawned { target: new_target });
    step_fixed(&mut app);

    for (guard, transitions) in guards.iter().zip(before) {
        assert_eq!(machine(&app, *guard).target(), Some(new_target));
        assert_eq!(machine(&app, *guard).transitions(), transitions);
        assert_eq!(machine(&app, *guard).current(), BehaviorKind::Idle);
    }
}

#[test]
fn test_despawned_target_sends_pursuer_to_patrol() {
    let mut app = create_guard_app(true);
    for (name, position) in [("cp_a", Vec3::new(20.0, 0.0, 0.0)), ("cp_b", Vec3::new(-20.0, 0.0, 0.0))] {
        app.world_mut()
            .spawn((Checkpoint::new(name), Transform::from_translation(position)));
    }
    let target = spawn_target(&mut app, Vec3::new(0.0, 0.0, -9.0));
    let guard = spawn_guard(&mut app, AIConfig::default());

    step_n(&mut app, 3);
    assert_eq!(machine(&app, guard).current(), BehaviorKind::Pursue);

    app.world_mut().despawn(target);
    step_fixed(&mut app);

    assert_eq!(machine(&app, guard).current(), BehaviorKind::Patrol);
    assert_eq!(app.world().resource::<WaypointRegistry>().len(), 2);
}

#[test]
fn test_target_behind_patroller_triggers_run_away() {
    let mut app = create_guard_app(true);
    app.world_mut()
        .spawn((Checkpoint::new("cp_far"), Transform::from_xyz(0.0, 0.0, -20.0)));
    app.world_mut().spawn((SafePoint, Transform::from_xyz(10.0, 0.0, 0.0)));
    spawn_target(&mut app, Vec3::new(0.0, 0.0, 1.5));
    let guard = spawn_guard(
        &mut app,
        AIConfig {
            patrol_chance_percent: 100,
            ..AIConfig::default()
        },
    );

    let mut visited = Vec::new();
    for _ in 0..200 {
        step_fixed(&mut app);
        let kind = machine(&app, guard).current();
        if visited.last() != Some(&kind) {
            visited.push(kind);
        }
    }

    assert_eq!(
        &visited[..3],
        &[BehaviorKind::Patrol, BehaviorKind::RunAway, BehaviorKind::Idle],
        "visited: {:?}",
        visited
    );
}

//! WARDEN Simulation Core
//!
//! ECS-симуляция охранников на Bevy 0.16 (decision layer)
//!
//! HYBRID ARCHITECTURE:
//! - ECS = decision layer (FSM, perception, session rules)
//! - Host engine = presentation layer (animation, audio, navmesh pathfinding)
//!
//! Core общается с host'ом только через компоненты (NavAgent) и события
//! (PresentationEvent, AttackSucceeded, TargetRespawned).

use bevy::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

// Публичные модули
pub mod ai;
pub mod components;
pub mod logger;
pub mod navigation;
pub mod session;

// Re-export базовых типов для удобства
pub use ai::{
    AIConfig, AIPlugin, AttackSucceeded, AttackSuccessPolicy, BehaviorError, BehaviorKind, BehaviorMachine,
    PerceptionConfig, PresentationEvent, PresentationSignal, TargetRespawned, WaypointRegistry,
};
pub use components::*;
pub use logger::{init_logger, log, log_error, log_info, log_warning, set_log_level, set_logger, LogLevel, LogPrinter};
pub use navigation::NavigationPlugin;
pub use session::{RespawnTargetRequest, SessionPlugin, SessionState};

/// Seed по умолчанию (если host не вставил свой DeterministicRng)
pub const DEFAULT_SEED: u64 = 42;

/// Главный plugin симуляции (объединяет все подсистемы)
///
/// NavigationPlugin сюда не входит: host с настоящим navmesh добавляет свой сервис.
pub struct SimulationPlugin;

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        app
            // Fixed timestep 60Hz для simulation tick
            .insert_resource(Time::<Fixed>::from_hz(60.0))
            // Подсистемы (AIPlugin вставляет DeterministicRng только если его ещё нет)
            .add_plugins((AIPlugin, SessionPlugin));
    }
}

/// Детерминистичный RNG resource (seeded)
#[derive(Resource)]
pub struct DeterministicRng {
    pub rng: ChaCha8Rng,
    pub seed: u64,
}

impl DeterministicRng {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }
}

/// Создаёт minimal Bevy App для headless симуляции
pub fn create_headless_app(seed: u64) -> App {
    let mut app = App::new();
    init_logger();
    app.add_plugins(MinimalPlugins)
        .insert_resource(DeterministicRng::new(seed))
        .insert_resource(Time::<Fixed>::from_hz(60.0)); // 60Hz FixedUpdate

    app
}

/// Один fixed тик без wall clock: swap event буферов, Time<Fixed> сдвигается на timestep, затем FixedUpdate
///
/// First schedule (и его event_update_system) здесь не запускается, поэтому буферы событий
/// симуляции свапаются вручную: событие живёт два шага, дальше отбрасывается.
pub fn step_fixed(app: &mut App) {
    let world = app.world_mut();
    update_events::<PresentationEvent>(world);
    update_events::<AttackSucceeded>(world);
    update_events::<TargetRespawned>(world);
    update_events::<RespawnTargetRequest>(world);

    let timestep = world.resource::<Time<Fixed>>().timestep();
    world.resource_mut::<Time<Fixed>>().advance_by(timestep);
    world.run_schedule(FixedUpdate);
}

fn update_events<E: Event>(world: &mut World) {
    if let Some(mut events) = world.get_resource_mut::<Events<E>>() {
        events.update();
    }
}

/// Snapshot мира для сравнения детерминизма
/// (упрощённая версия через Debug)
pub fn world_snapshot<T: Component>(world: &mut World) -> Vec<u8>
where
    T: std::fmt::Debug,
{
    // Собираем все компоненты в детерминированный формат
    let mut snapshot = Vec::new();

    let mut query = world.query::<(Entity, &T)>();
    let mut entities: Vec<_> = query.iter(world).collect();

    // Сортируем по Entity ID для детерминизма
    entities.sort_by_key(|(entity, _)| entity.index());

    // Сериализуем в байты через Debug (простейший способ)
    for (entity, component) in entities {
        snapshot.extend_from_slice(&entity.index().to_le_bytes());
        snapshot.extend_from_slice(format!("{:?}", component).as_bytes());
    }

    snapshot
}

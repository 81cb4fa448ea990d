//! Headless симуляция WARDEN
//!
//! Поднимает Bevy App без рендера: checkpoint'ы, rally point, цель и охранники.
//! Печатает гистограмму поведений по ходу прогона.

use std::collections::BTreeMap;

use bevy::prelude::*;
use warden_simulation::{
    create_headless_app, step_fixed, BehaviorMachine, Checkpoint, NavigationPlugin, Npc, SafePoint, SessionState,
    SimulationPlugin, TargetActor,
};

const TICKS: usize = 1200; // 20 секунд при 60Hz
const GUARDS: usize = 4;

fn main() {
    let seed = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse().ok())
        .unwrap_or(warden_simulation::DEFAULT_SEED);
    println!("Starting WARDEN headless simulation (seed: {})", seed);

    let mut app = create_headless_app(seed);
    app.add_plugins((SimulationPlugin, NavigationPlugin));
    spawn_level(app.world_mut());

    for tick in 0..TICKS {
        step_fixed(&mut app);

        if tick % 200 == 0 {
            println!("Tick {}: {}", tick, format_histogram(&behavior_histogram(app.world_mut())));
        }
    }

    let session = app.world().resource::<SessionState>();
    println!(
        "Simulation complete! game_over = {}, attack successes = {}",
        session.game_over, session.attack_successes
    );
}

/// Квадрат из 4 checkpoint'ов, rally point в углу, цель в центре
fn spawn_level(world: &mut World) {
    let corners = [
        ("cp_0", Vec3::new(-15.0, 0.0, -15.0)),
        ("cp_1", Vec3::new(15.0, 0.0, -15.0)),
        ("cp_2", Vec3::new(15.0, 0.0, 15.0)),
        ("cp_3", Vec3::new(-15.0, 0.0, 15.0)),
    ];
    for (name, position) in corners {
        world.spawn((Checkpoint::new(name), Transform::from_translation(position)));
    }

    world.spawn((SafePoint, Transform::from_xyz(-25.0, 0.0, -25.0)));
    world.spawn((TargetActor, Transform::from_xyz(0.0, 0.0, 0.0)));

    for index in 0..GUARDS {
        let angle = index as f32 / GUARDS as f32 * std::f32::consts::TAU;
        let position = Vec3::new(angle.cos(), 0.0, angle.sin()) * 20.0;
        world.spawn((Npc, Transform::from_translation(position).looking_at(Vec3::ZERO, Vec3::Y)));
    }
}

fn behavior_histogram(world: &mut World) -> BTreeMap<String, usize> {
    let mut histogram = BTreeMap::new();
    let mut query = world.query::<&BehaviorMachine>();
    for machine in query.iter(world) {
        *histogram.entry(format!("{:?}", machine.current())).or_insert(0) += 1;
    }
    histogram
}

fn format_histogram(histogram: &BTreeMap<String, usize>) -> String {
    histogram
        .iter()
        .map(|(kind, count)| format!("{}={}", kind, count))
        .collect::<Vec<_>>()
        .join(", ")
}

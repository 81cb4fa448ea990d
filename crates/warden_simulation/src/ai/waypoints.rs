//! WaypointRegistry — упорядоченный список точек патруля
//!
//! Строится один раз за сессию (init_waypoint_registry на первом тике), дальше read-only.
//! Каждый Patrol state получает клон handle при создании (Arc, без копирования точек).

use bevy::prelude::*;
use std::cmp::Ordering;
use std::sync::Arc;

/// Точка патруля (snapshot Checkpoint entity на момент построения registry)
#[derive(Debug, Clone, PartialEq)]
pub struct Waypoint {
    pub name: String,
    pub position: Vec3,
}

impl Waypoint {
    pub fn new(name: impl Into<String>, position: Vec3) -> Self {
        Self {
            name: name.into(),
            position,
        }
    }
}

/// Read-only registry точек патруля
///
/// Инвариант: порядок полный и детерминированный — по имени (ordinal),
/// при одинаковых именах по позиции (x, y, z).
#[derive(Resource, Debug, Clone)]
pub struct WaypointRegistry {
    points: Arc<[Waypoint]>,
}

impl Default for WaypointRegistry {
    fn default() -> Self {
        Self::from_checkpoints(Vec::new())
    }
}

impl WaypointRegistry {
    pub fn from_checkpoints(checkpoints: impl IntoIterator<Item = Waypoint>) -> Self {
        let mut points: Vec<Waypoint> = checkpoints.into_iter().collect();
        points.sort_by(|a, b| {
            a.name
                .cmp(&b.name)
                .then_with(|| compare_positions(a.position, b.position))
        });
        Self {
            points: points.into(),
        }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Waypoint> {
        self.points.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Waypoint> {
        self.points.iter()
    }

    /// Ближайшая точка (линейный поиск). При равных дистанциях побеждает первая по порядку.
    pub fn nearest(&self, from: Vec3) -> Option<usize> {
        let mut nearest = None;
        let mut nearest_distance = f32::INFINITY;
        for (index, waypoint) in self.points.iter().enumerate() {
            let distance = from.distance(waypoint.position);
            if distance < nearest_distance {
                nearest = Some(index);
                nearest_distance = distance;
            }
        }
        nearest
    }

    /// Следующий индекс по кольцу
    pub fn next_index(&self, index: usize) -> Option<usize> {
        if self.points.is_empty() {
            None
        } else {
            Some((index + 1) % self.points.len())
        }
    }
}

fn compare_positions(a: Vec3, b: Vec3) -> Ordering {
    a.x.total_cmp(&b.x)
        .then_with(|| a.y.total_cmp(&b.y))
        .then_with(|| a.z.total_cmp(&b.z))
}

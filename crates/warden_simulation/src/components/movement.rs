//! Navigation handle: контракт между FSM и pathfinding сервисом

use bevy::prelude::*;

/// Навигационный агент NPC
///
/// Архитектура:
/// - FSM пишет запросы: `request_destination`, `set_speed`, `set_stopped`
/// - Pathfinding сервис (NavigationPlugin или внешний navmesh) читает destination,
///   двигает агента и отчитывается через `report_path`
/// - FSM читает прогресс на следующих тиках (`remaining_distance`, `has_path`), никогда не ждёт
///
/// Пока новый destination не обработан сервисом (`path_pending`), `remaining_distance()`
/// возвращает +∞: arrival не может сработать по прогрессу старого пути.
/// `has_path()` при этом сохраняет последний известный путь (re-planning не сбрасывает его).
#[derive(Component, Debug, Clone, PartialEq, Reflect)]
#[reflect(Component)]
pub struct NavAgent {
    speed: f32,
    is_stopped: bool,
    destination: Option<Vec3>,
    path_pending: bool,
    remaining_distance: f32,
    has_path: bool,
}

impl Default for NavAgent {
    fn default() -> Self {
        Self {
            speed: 2.0, // 2 m/s — базовая скорость ходьбы
            is_stopped: false,
            destination: None,
            path_pending: false,
            remaining_distance: 0.0,
            has_path: false,
        }
    }
}

impl NavAgent {
    /// Запрос маршрута. Повторный запрос той же точки ничего не меняет.
    pub fn request_destination(&mut self, point: Vec3) {
        if self.destination != Some(point) {
            self.destination = Some(point);
            self.path_pending = true;
        }
    }

    pub fn set_speed(&mut self, speed: f32) {
        self.speed = speed;
    }

    pub fn set_stopped(&mut self, stopped: bool) {
        self.is_stopped = stopped;
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    pub fn is_stopped(&self) -> bool {
        self.is_stopped
    }

    pub fn destination(&self) -> Option<Vec3> {
        self.destination
    }

    pub fn is_path_pending(&self) -> bool {
        self.path_pending
    }

    pub fn remaining_distance(&self) -> f32 {
        if self.path_pending {
            f32::INFINITY
        } else {
            self.remaining_distance
        }
    }

    pub fn has_path(&self) -> bool {
        self.has_path
    }

    /// Отчёт pathfinding сервиса о прогрессе текущего запроса
    pub fn report_path(&mut self, remaining_distance: f32, has_path: bool) {
        self.path_pending = false;
        self.remaining_distance = remaining_distance;
        self.has_path = has_path;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pending_request_hides_stale_progress() {
        let mut nav = NavAgent::default();
        nav.report_path(0.2, true);
        assert_eq!(nav.remaining_distance(), 0.2);

        nav.request_destination(Vec3::new(10.0, 0.0, 0.0));
        assert!(nav.is_path_pending());
        assert_eq!(nav.remaining_distance(), f32::INFINITY);
        assert!(nav.has_path()); // Старый путь сохраняется пока идёт re-planning

        nav.report_path(9.5, true);
        assert_eq!(nav.remaining_distance(), 9.5);
    }

    #[test]
    fn test_same_destination_is_not_replanned() {
        let mut nav = NavAgent::default();
        nav.request_destination(Vec3::X);
        nav.report_path(1.0, true);

        nav.request_destination(Vec3::X);
        assert!(!nav.is_path_pending());
        assert_eq!(nav.remaining_distance(), 1.0);
    }
}

//! Patrol — обход checkpoint'ов по кольцу начиная с ближайшего

use super::{BehaviorContext, Transition};
use crate::ai::{AnimationTrigger, BehaviorError, BehaviorKind, WaypointRegistry};

#[derive(Debug, Clone)]
pub struct Patrol {
    waypoints: WaypointRegistry,
    current: usize,
}

impl Patrol {
    pub fn new(waypoints: WaypointRegistry) -> Self {
        Self {
            waypoints,
            current: 0,
        }
    }

    /// Индекс текущей точки в registry
    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn enter(&mut self, ctx: &mut BehaviorContext) -> Result<(), BehaviorError> {
        // Ближайшая точка; при равенстве — первая в registry
        self.current = self
            .waypoints
            .nearest(ctx.transform.translation)
            .ok_or(BehaviorError::NoCheckpoints)?;

        ctx.set_trigger(AnimationTrigger::Walking);
        ctx.nav.set_stopped(false);
        ctx.nav.set_speed(ctx.config.patrol_speed);
        self.head_to_current(ctx)
    }

    pub fn update(&mut self, ctx: &mut BehaviorContext) -> Result<Transition, BehaviorError> {
        if ctx.nav.remaining_distance() < ctx.config.arrival_distance {
            self.current = self
                .waypoints
                .next_index(self.current)
                .ok_or(BehaviorError::NoCheckpoints)?;
            self.head_to_current(ctx)?;
        }

        // Порядок важен: зрение проверяется раньше спины
        if ctx.can_see_target() {
            Ok(Transition::To(BehaviorKind::Pursue))
        } else if ctx.is_target_behind() {
            Ok(Transition::To(BehaviorKind::RunAway))
        } else {
            Ok(Transition::Stay)
        }
    }

    pub fn exit(&mut self, ctx: &mut BehaviorContext) {
        ctx.reset_trigger(AnimationTrigger::Walking);
    }

    fn head_to_current(&self, ctx: &mut BehaviorContext) -> Result<(), BehaviorError> {
        let waypoint = self
            .waypoints
            .get(self.current)
            .ok_or(BehaviorError::InvalidCheckpointIndex {
                index: self.current,
                len: self.waypoints.len(),
            })?;
        ctx.nav.request_destination(waypoint.position);
        Ok(())
    }
}

//! RunAway — бегство к rally point, по прибытии Idle

use bevy::prelude::*;

use super::{BehaviorContext, Transition};
use crate::ai::{AnimationTrigger, BehaviorError, BehaviorKind};

#[derive(Debug, Clone, Copy)]
pub struct RunAway {
    /// Rally point, резолвится один раз при создании state
    rally_point: Option<Vec3>,
}

impl RunAway {
    pub fn new(rally_point: Option<Vec3>) -> Self {
        Self { rally_point }
    }

    pub fn rally_point(&self) -> Option<Vec3> {
        self.rally_point
    }

    pub fn enter(&mut self, ctx: &mut BehaviorContext) -> Result<(), BehaviorError> {
        let rally_point = self.rally_point.ok_or(BehaviorError::NoSafePoint)?;

        ctx.set_trigger(AnimationTrigger::Running);
        ctx.nav.set_stopped(false);
        ctx.nav.set_speed(ctx.config.run_away_speed);
        ctx.nav.request_destination(rally_point);
        Ok(())
    }

    pub fn update(&mut self, ctx: &mut BehaviorContext) -> Transition {
        if ctx.nav.remaining_distance() < ctx.config.arrival_distance {
            Transition::To(BehaviorKind::Idle)
        } else {
            Transition::Stay
        }
    }

    pub fn exit(&mut self, ctx: &mut BehaviorContext) {
        ctx.reset_trigger(AnimationTrigger::Running);
    }
}

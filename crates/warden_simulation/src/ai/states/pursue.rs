//! Pursue — погоня. Destination обновляется каждый тик.

use super::{BehaviorContext, Transition};
use crate::ai::{AnimationTrigger, BehaviorKind};

#[derive(Debug, Clone, Copy, Default)]
pub struct Pursue;

impl Pursue {
    pub fn enter(&mut self, ctx: &mut BehaviorContext) {
        ctx.set_trigger(AnimationTrigger::Running);
        ctx.nav.set_stopped(false);
        ctx.nav.set_speed(ctx.config.pursue_speed);
    }

    /// Переходы проверяются только когда у навигации есть валидный путь
    pub fn update(&mut self, ctx: &mut BehaviorContext) -> Transition {
        if let Some(target) = ctx.target {
            ctx.nav.request_destination(target);
        }

        if !ctx.nav.has_path() {
            return Transition::Stay;
        }

        if ctx.can_attack_target() {
            Transition::To(BehaviorKind::Attack)
        } else if !ctx.can_see_target() {
            Transition::To(BehaviorKind::Patrol)
        } else {
            Transition::Stay
        }
    }

    pub fn exit(&mut self, ctx: &mut BehaviorContext) {
        ctx.reset_trigger(AnimationTrigger::Running);
    }
}

//! Idle — начальное состояние. Ждём цель, иногда уходим в патруль.

use rand::Rng;

use super::{BehaviorContext, Transition};
use crate::ai::{AnimationTrigger, BehaviorKind};

#[derive(Debug, Clone, Copy, Default)]
pub struct Idle;

impl Idle {
    pub fn enter(&mut self, ctx: &mut BehaviorContext) {
        ctx.set_trigger(AnimationTrigger::Idle);
    }

    /// Видим цель → Pursue, иначе roll в [0, 100) < patrol_chance_percent → Patrol
    pub fn update(&mut self, ctx: &mut BehaviorContext) -> Transition {
        if ctx.can_see_target() {
            return Transition::To(BehaviorKind::Pursue);
        }

        let roll: u32 = ctx.rng.gen_range(0..100);
        if roll < ctx.config.patrol_chance_percent {
            Transition::To(BehaviorKind::Patrol)
        } else {
            Transition::Stay
        }
    }

    pub fn exit(&mut self, ctx: &mut BehaviorContext) {
        ctx.reset_trigger(AnimationTrigger::Idle);
    }
}

//! Attack — стоим, доворачиваемся к цели, стреляем

use bevy::prelude::*;

use super::{BehaviorContext, Transition};
use crate::ai::{AnimationTrigger, AttackSuccessPolicy, BehaviorKind, PresentationSignal, SoundCue};

#[derive(Debug, Clone, Copy)]
pub struct Attack {
    /// Audio cue выстрела (резолвится при создании state)
    cue: SoundCue,
    success_reported: bool,
}

impl Default for Attack {
    fn default() -> Self {
        Self::new()
    }
}

impl Attack {
    pub fn new() -> Self {
        Self {
            cue: SoundCue::Gunfire,
            success_reported: false,
        }
    }

    pub fn enter(&mut self, ctx: &mut BehaviorContext) {
        ctx.set_trigger(AnimationTrigger::Shooting);
        ctx.nav.set_stopped(true);
        ctx.signal(PresentationSignal::PlaySound(self.cue));
    }

    pub fn update(&mut self, ctx: &mut BehaviorContext) -> Transition {
        if let Some(target) = ctx.target {
            let t = ctx.config.attack_rotation_speed * ctx.delta;
            face_towards(ctx.transform, target, t);
        }

        if !ctx.can_attack_target() {
            return Transition::To(BehaviorKind::Idle);
        }

        match ctx.config.attack_success_policy {
            AttackSuccessPolicy::EveryTick => ctx.effects.attack_succeeded = true,
            AttackSuccessPolicy::Once => {
                if !self.success_reported {
                    self.success_reported = true;
                    ctx.effects.attack_succeeded = true;
                }
            }
        }
        Transition::Stay
    }

    pub fn exit(&mut self, ctx: &mut BehaviorContext) {
        ctx.reset_trigger(AnimationTrigger::Shooting);
        ctx.signal(PresentationSignal::StopSound(self.cue));
    }
}

/// Slerp rotation к цели в горизонтальной плоскости (вертикальный offset игнорируется).
/// `t` клампится в [0, 1].
pub fn face_towards(transform: &mut Transform, target: Vec3, t: f32) {
    let mut direction = target - transform.translation;
    direction.y = 0.0;
    if direction.length_squared() <= f32::EPSILON {
        return;
    }
    let look = Transform::IDENTITY.looking_to(direction, Vec3::Y).rotation;
    transform.rotation = transform.rotation.slerp(look, t.clamp(0.0, 1.0));
}

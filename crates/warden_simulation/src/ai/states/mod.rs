//! Behavior states — узлы FSM (Idle, Patrol, Pursue, Attack, RunAway)
//!
//! Lifecycle каждого state: Enter → Update → Exit.
//! - Enter выполняется на первом тике и в том же тике проваливается в Update
//! - Update выполняется каждый тик, может запросить переход (Transition::To)
//! - Exit выполняется в том же тике что и запрос, затем resident становится successor
//!
//! Ошибка конфигурации в Enter/Update (нет checkpoint'ов, нет rally point) логируется
//! и уводит агента в Idle.

use bevy::prelude::*;
use rand_chacha::ChaCha8Rng;

use crate::ai::perception;
use crate::ai::{
    AIConfig, AnimationTrigger, BehaviorError, BehaviorKind, PresentationSignal, Stage, WaypointRegistry,
};
use crate::components::NavAgent;

pub mod attack;
pub mod idle;
pub mod patrol;
pub mod pursue;
pub mod run_away;


pub use attack::{face_towards, Attack};
pub use idle::Idle;
pub use patrol::Patrol;
pub use pursue::Pursue;
pub use run_away::RunAway;

/// Решение Update hook'а
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Stay,
    To(BehaviorKind),
}

/// Side effects одного тика (system переливает их в Bevy events)
#[derive(Debug, Default, Clone, PartialEq)]
pub struct BehaviorEffects {
    pub signals: Vec<PresentationSignal>,
    pub attack_succeeded: bool,
}

impl BehaviorEffects {
    pub fn clear(&mut self) {
        self.signals.clear();
        self.attack_succeeded = false;
    }
}

/// Всё что state видит и может трогать во время тика
pub struct BehaviorContext<'a> {
    pub agent: Entity,
    pub transform: &'a mut Transform,
    pub nav: &'a mut NavAgent,
    /// Позиция цели на этом тике (None = цели нет или она despawned)
    pub target: Option<Vec3>,
    pub waypoints: &'a WaypointRegistry,
    pub safe_point: Option<Vec3>,
    pub config: &'a AIConfig,
    pub rng: &'a mut ChaCha8Rng,
    /// Fixed timestep delta (секунды)
    pub delta: f32,
    pub effects: &'a mut BehaviorEffects,
}

impl BehaviorContext<'_> {
    pub fn can_see_target(&self) -> bool {
        perception::can_see_target(&*self.transform, self.target, &self.config.perception)
    }

    pub fn is_target_behind(&self) -> bool {
        perception::is_target_behind(&*self.transform, self.target, &self.config.perception)
    }

    pub fn can_attack_target(&self) -> bool {
        perception::can_attack_target(&*self.transform, self.target, &self.config.perception)
    }

    pub fn signal(&mut self, signal: PresentationSignal) {
        self.effects.signals.push(signal);
    }

    pub fn set_trigger(&mut self, trigger: AnimationTrigger) {
        self.signal(PresentationSignal::SetTrigger(trigger));
    }

    pub fn reset_trigger(&mut self, trigger: AnimationTrigger) {
        self.signal(PresentationSignal::ResetTrigger(trigger));
    }
}

/// Вариант поведения + его transient данные
#[derive(Debug, Clone)]
pub enum Behavior {
    Idle(Idle),
    Patrol(Patrol),
    Pursue(Pursue),
    Attack(Attack),
    RunAway(RunAway),
}

impl Behavior {
    pub fn kind(&self) -> BehaviorKind {
        match self {
            Behavior::Idle(_) => BehaviorKind::Idle,
            Behavior::Patrol(_) => BehaviorKind::Patrol,
            Behavior::Pursue(_) => BehaviorKind::Pursue,
            Behavior::Attack(_) => BehaviorKind::Attack,
            Behavior::RunAway(_) => BehaviorKind::RunAway,
        }
    }

    fn enter(&mut self, ctx: &mut BehaviorContext) -> Result<(), BehaviorError> {
        match self {
            Behavior::Patrol(patrol) => patrol.enter(ctx),
            Behavior::RunAway(run_away) => run_away.enter(ctx),
            Behavior::Idle(idle) => {
                idle.enter(ctx);
                Ok(())
            }
            Behavior::Pursue(pursue) => {
                pursue.enter(ctx);
                Ok(())
            }
            Behavior::Attack(attack) => {
                attack.enter(ctx);
                Ok(())
            }
        }
    }

    fn update(&mut self, ctx: &mut BehaviorContext) -> Result<Transition, BehaviorError> {
        match self {
            Behavior::Idle(idle) => Ok(idle.update(ctx)),
            Behavior::Patrol(patrol) => patrol.update(ctx),
            Behavior::Pursue(pursue) => Ok(pursue.update(ctx)),
            Behavior::Attack(attack) => Ok(attack.update(ctx)),
            Behavior::RunAway(run_away) => Ok(run_away.update(ctx)),
        }
    }

    fn exit(&mut self, ctx: &mut BehaviorContext) {
        match self {
            Behavior::Idle(idle) => idle.exit(ctx),
            Behavior::Patrol(patrol) => patrol.exit(ctx),
            Behavior::Pursue(pursue) => pursue.exit(ctx),
            Behavior::Attack(attack) => attack.exit(ctx),
            Behavior::RunAway(run_away) => run_away.exit(ctx),
        }
    }
}

/// Resident state агента: вариант, фаза, закешированная цель, запрошенный successor
#[derive(Debug, Clone)]
pub struct BehaviorState {
    behavior: Behavior,
    stage: Stage,
    target: Option<Entity>,
    next: Option<BehaviorKind>,
    /// Enter отработал успешно (Exit снимает только то, что Enter выставил)
    entered: bool,
}

impl BehaviorState {
    fn from_behavior(behavior: Behavior, target: Option<Entity>) -> Self {
        Self {
            behavior,
            stage: Stage::Enter,
            target,
            next: None,
            entered: false,
        }
    }

    pub fn idle(target: Option<Entity>) -> Self {
        Self::from_behavior(Behavior::Idle(Idle), target)
    }

    pub fn patrol(target: Option<Entity>, waypoints: WaypointRegistry) -> Self {
        Self::from_behavior(Behavior::Patrol(Patrol::new(waypoints)), target)
    }

    pub fn pursue(target: Option<Entity>) -> Self {
        Self::from_behavior(Behavior::Pursue(Pursue), target)
    }

    pub fn attack(target: Option<Entity>) -> Self {
        Self::from_behavior(Behavior::Attack(Attack::new()), target)
    }

    pub fn run_away(target: Option<Entity>, rally_point: Option<Vec3>) -> Self {
        Self::from_behavior(Behavior::RunAway(RunAway::new(rally_point)), target)
    }

    /// Successor наследует цель предшественника. Patrol получает registry handle,
    /// RunAway — rally point, оба резолвятся в момент создания.
    fn successor(kind: BehaviorKind, target: Option<Entity>, ctx: &BehaviorContext) -> Self {
        match kind {
            BehaviorKind::Idle => Self::idle(target),
            BehaviorKind::Patrol => Self::patrol(target, ctx.waypoints.clone()),
            BehaviorKind::Pursue => Self::pursue(target),
            BehaviorKind::Attack => Self::attack(target),
            BehaviorKind::RunAway => Self::run_away(target, ctx.safe_point),
        }
    }

    pub fn kind(&self) -> BehaviorKind {
        self.behavior.kind()
    }

    pub fn behavior(&self) -> &Behavior {
        &self.behavior
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn target(&self) -> Option<Entity> {
        self.target
    }

    pub fn rebind_target(&mut self, target: Entity) {
        self.target = Some(target);
    }

    fn request_exit(&mut self, next: BehaviorKind) {
        self.next = Some(next);
        self.stage = Stage::Exit;
    }

    /// Ошибка конфигурации: лог + fallback в Idle
    fn abort(&mut self, agent: Entity, error: BehaviorError) {
        crate::logger::log_error(&format!(
            "AI: {:?} {:?} aborted: {} → falling back to Idle",
            agent,
            self.kind(),
            error
        ));
        self.request_exit(BehaviorKind::Idle);
    }

    /// Прогон одного тика. Some(successor) если state отработал Exit.
    pub fn process(&mut self, ctx: &mut BehaviorContext) -> Option<BehaviorState> {
        if self.stage == Stage::Enter {
            match self.behavior.enter(ctx) {
                Ok(()) => {
                    self.entered = true;
                    self.stage = Stage::Update;
                }
                Err(error) => self.abort(ctx.agent, error),
            }
        }

        if self.stage == Stage::Update {
            match self.behavior.update(ctx) {
                Ok(Transition::Stay) => {}
                Ok(Transition::To(next)) => self.request_exit(next),
                Err(error) => self.abort(ctx.agent, error),
            }
        }

        if self.stage == Stage::Exit {
            if self.entered {
                self.behavior.exit(ctx);
            }
            let next = self.next.take().unwrap_or(BehaviorKind::Idle);
            return Some(Self::successor(next, self.target, ctx));
        }

        None
    }
}

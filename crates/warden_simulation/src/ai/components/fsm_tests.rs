//! Tests for FSM AI components.

#[cfg(test)]
mod tests {
    use bevy::prelude::*;

    use super::super::fsm::{AIConfig, AttackSuccessPolicy, BehaviorKind, BehaviorMachine, Stage};
    use crate::ai::BehaviorError;

    #[test]
    fn test_behavior_machine_default() {
        let machine = BehaviorMachine::default();
        assert_eq!(machine.current(), BehaviorKind::Idle);
        assert_eq!(machine.stage(), Stage::Enter);
        assert_eq!(machine.target(), None);
        assert_eq!(machine.transitions(), 0);
    }

    #[test]
    fn test_ai_config_default() {
        let config = AIConfig::default();
        assert_eq!(config.perception.vision_distance, 10.0);
        assert_eq!(config.perception.vision_angle, 30.0);
        assert_eq!(config.perception.attack_distance, 7.0);
        assert_eq!(config.perception.rear_distance, 2.0);
        assert_eq!(config.perception.rear_angle, 30.0);
        assert_eq!(config.patrol_chance_percent, 10);
        assert_eq!(config.patrol_speed, 2.0);
        assert_eq!(config.pursue_speed, 5.0);
        assert_eq!(config.run_away_speed, 6.0);
        assert_eq!(config.attack_success_policy, AttackSuccessPolicy::EveryTick);
    }

    #[test]
    fn test_ai_config_partial_ron() {
        let config = AIConfig::from_ron(
            "(pursue_speed: 7.5, perception: (vision_distance: 15.0), attack_success_policy: Once)",
        )
        .unwrap();

        assert_eq!(config.pursue_speed, 7.5);
        assert_eq!(config.perception.vision_distance, 15.0);
        assert_eq!(config.perception.vision_angle, 30.0); // Недостающее поле = default
        assert_eq!(config.attack_success_policy, AttackSuccessPolicy::Once);
        assert_eq!(config.patrol_speed, 2.0);
    }

    #[test]
    fn test_ai_config_invalid_ron() {
        let result = AIConfig::from_ron("(pursue_speed: \"fast\")");
        assert!(matches!(result, Err(BehaviorError::InvalidConfig(_))));
    }

    #[test]
    fn test_rebind_target_is_idempotent() {
        let first = Entity::from_raw(1);
        let second = Entity::from_raw(2);
        let mut machine = BehaviorMachine::new(Some(first));

        assert!(!machine.rebind_target(first));
        assert!(machine.rebind_target(second));
        assert!(!machine.rebind_target(second));
        assert_eq!(machine.target(), Some(second));
        assert_eq!(machine.current(), BehaviorKind::Idle); // Rebind не трогает state
    }

    #[test]
    fn test_observe_target_reports_loss_once() {
        let mut machine = BehaviorMachine::new(None);

        assert!(!machine.observe_target(true));
        assert!(machine.observe_target(false));
        assert!(!machine.observe_target(false)); // Уже знаем что цели нет
        assert!(!machine.observe_target(true));
        assert!(machine.observe_target(false));
    }
}

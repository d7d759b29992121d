//! Config file → domain settings

use maze_domain::service::combat::CombatRules;
use maze_domain::service::proximity::ProximitySettings;
use maze_usecase::WorldSettings;
use shared::GameConfig;

pub fn world_settings(config: &GameConfig) -> WorldSettings {
    WorldSettings {
        inventory_capacity: config.inventory_capacity,
        pickup_radius: config.pickup_radius,
        proximity: ProximitySettings {
            distance: config.proximity.distance,
            dwell_ms: config.proximity.dwell_ms,
        },
        combat: CombatRules {
            auto_choice_min_ms: config.combat.auto_choice_min_ms,
            auto_choice_max_ms: config.combat.auto_choice_max_ms,
            cooldown_ms: config.combat.cooldown_ms,
            swap_back: config.combat.swap_back,
            swap_back_delay_ms: config.combat.swap_back_delay_ms,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match() {
        assert_eq!(world_settings(&GameConfig::default()), WorldSettings::default());
    }

    #[test]
    fn test_overrides_flow_through() {
        let mut config = GameConfig::default();
        config.inventory_capacity = 1;
        config.combat.swap_back = false;
        config.proximity.dwell_ms = 250;

        let settings = world_settings(&config);
        assert_eq!(settings.inventory_capacity, 1);
        assert!(!settings.combat.swap_back);
        assert_eq!(settings.proximity.dwell_ms, 250);
    }
}

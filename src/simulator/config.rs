//! Simulation configuration.

/// Configuration for a simulation run.
#[derive(Debug, Clone)]
pub struct SimConfig {
    /// Number of simulated campaigns
    pub num_runs: u32,

    /// Random seed for reproducibility (None = random)
    pub seed: Option<u64>,

    /// A run that clears this floor counts as completed
    pub max_floor: u32,

    /// Class id from the game config
    pub class: String,

    /// Difficulty id from the game config
    pub difficulty: String,

    /// Rounds a single battle may last before the run is abandoned
    pub max_rounds_per_battle: u32,

    /// Fraction of max HP below which the policy tries to heal
    pub heal_threshold: f64,

    /// Whether dropped gear is equipped when it scores higher
    pub auto_equip: bool,

    /// Log verbosity (0 = silent, 1 = summary, 2 = detailed)
    pub verbosity: u8,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            num_runs: 1000,
            seed: None,
            max_floor: 10,
            class: "warrior".to_string(),
            difficulty: "normal".to_string(),
            max_rounds_per_battle: 100,
            heal_threshold: 0.35,
            auto_equip: true,
            verbosity: 1,
        }
    }
}

impl SimConfig {
    /// Quick config for checking early floors
    pub fn quick_check() -> Self {
        Self {
            num_runs: 100,
            max_floor: 5,
            ..Default::default()
        }
    }

    /// Config for comparing one class on one difficulty
    pub fn class_balance_test(class: &str, difficulty: &str) -> Self {
        Self {
            num_runs: 500,
            class: class.to_string(),
            difficulty: difficulty.to_string(),
            ..Default::default()
        }
    }

    /// Config for loot analysis: gear is never swapped
    pub fn loot_analysis(num_runs: u32) -> Self {
        Self {
            num_runs,
            auto_equip: false,
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets_override_only_their_fields() {
        let quick = SimConfig::quick_check();
        assert_eq!((quick.num_runs, quick.max_floor), (100, 5));
        assert!(quick.auto_equip);

        let balance = SimConfig::class_balance_test("rogue", "hard");
        assert_eq!(balance.class, "rogue");
        assert_eq!(balance.difficulty, "hard");
        assert_eq!(balance.max_floor, 10);

        let loot = SimConfig::loot_analysis(25);
        assert_eq!(loot.num_runs, 25);
        assert!(!loot.auto_equip);
    }
}

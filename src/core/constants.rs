// Loot generation
pub const FLOOR_SCALING_PER_FLOOR: f64 = 0.1;
pub const PREFIX_CHANCE: f64 = 0.4;
pub const SUFFIX_CHANCE: f64 = 0.3;
pub const SELL_VALUE_FACTOR: f64 = 5.0;
pub const RARITY_TOTAL_PERCENT: f64 = 100.0;
pub const RARITY_SUM_TOLERANCE: f64 = 1e-6;

// Damage resolution
pub const DEFENSE_FACTOR: f64 = 0.5;
pub const MIN_BASE_DAMAGE: f64 = 1.0;
pub const DEFEND_DAMAGE_FACTOR: f64 = 0.5;
pub const DAMAGE_VARIANCE_MIN: f64 = 0.9;
pub const DAMAGE_VARIANCE_SPAN: f64 = 0.2;
pub const DEFAULT_CRIT_MULTIPLIER: f64 = 1.5;
pub const DEFAULT_FLEE_CHANCE: f64 = 0.5;

// Enemy scaling: stat * (1 + (floor - 1) * step)
pub const ENEMY_FLOOR_SCALING_PER_FLOOR: f64 = 0.15;
pub const MAX_ENEMIES_PER_ENCOUNTER: usize = 3;

// Inventory and economy
pub const INVENTORY_MAX_SLOTS: usize = 20;
pub const STARTING_GOLD: u64 = 50;
pub const STARTING_WEAPON: &str = "sword";

// XP curve: base + (level - 1) * increment
pub const XP_CURVE_BASE: u64 = 100;
pub const XP_CURVE_INCREMENT: u64 = 50;
pub const MAX_LEVEL: u32 = 50;

// Presentation delays (interactive pacing)
pub const ACTION_DELAY_MS: u64 = 1200;
pub const ENEMY_TURN_DELAY_MS: u64 = 1200;
pub const DEATH_DELAY_MS: u64 = 1500;

//! Simulation report generation.

use super::runner::RunStats;
use crate::items::Rarity;
use serde::Serialize;
use std::collections::BTreeMap;

/// Aggregated results from multiple simulation runs.
#[derive(Debug, Clone, Serialize)]
pub struct SimReport {
    pub num_runs: u32,
    pub target_floor: u32,
    pub runs_completed: u32,
    pub runs_died: u32,
    pub runs_timed_out: u32,

    // Aggregated stats
    pub battle_win_rate: f64,
    pub avg_floors_cleared: f64,
    pub avg_final_level: f64,
    pub avg_final_gold: f64,
    pub avg_rounds_per_battle: f64,
    pub avg_enemies_defeated: f64,
    pub avg_player_crits: f64,

    // Distribution data
    /// Floor a run died on -> number of runs.
    pub death_floor_distribution: BTreeMap<u32, u32>,
    /// Floors cleared -> number of runs.
    pub floor_distribution: BTreeMap<u32, u32>,

    // Loot analysis
    pub drop_rate: f64,
    pub loot_by_rarity: BTreeMap<Rarity, u64>,
    pub total_drops: u64,
    pub drops_lost: u64,
    pub avg_upgrades_equipped: f64,

    #[serde(skip)]
    pub run_stats: Vec<RunStats>,
}

impl SimReport {
    /// Create a new report from completed run stats.
    pub fn from_runs(runs: Vec<RunStats>, target_floor: u32) -> Self {
        let num_runs = runs.len() as u32;
        let divisor = num_runs.max(1) as f64;
        let avg = |value: fn(&RunStats) -> f64| runs.iter().map(value).sum::<f64>() / divisor;

        let runs_completed = runs.iter().filter(|r| r.reached_target).count() as u32;
        let runs_died = runs.iter().filter(|r| r.died_on_floor.is_some()).count() as u32;
        let runs_timed_out = runs.iter().filter(|r| r.timed_out).count() as u32;

        let battles_fought: u64 = runs.iter().map(|r| r.battles_fought as u64).sum();
        let battles_won: u64 = runs.iter().map(|r| r.battles_won as u64).sum();
        let total_rounds: u64 = runs.iter().map(|r| r.total_rounds).sum();
        let battle_win_rate = battles_won as f64 / battles_fought.max(1) as f64;
        let avg_rounds_per_battle = total_rounds as f64 / battles_fought.max(1) as f64;

        let mut death_floor_distribution = BTreeMap::new();
        let mut floor_distribution = BTreeMap::new();
        for run in &runs {
            if let Some(floor) = run.died_on_floor {
                *death_floor_distribution.entry(floor).or_insert(0) += 1;
            }
            *floor_distribution.entry(run.floors_cleared).or_insert(0) += 1;
        }

        let mut loot_by_rarity = BTreeMap::new();
        let mut drop_attempts = 0;
        let mut total_drops = 0;
        let mut drops_lost = 0;
        for run in &runs {
            for (&rarity, &count) in &run.loot.by_rarity {
                *loot_by_rarity.entry(rarity).or_insert(0) += count;
            }
            drop_attempts += run.loot.drop_attempts;
            total_drops += run.loot.total_drops;
            drops_lost += run.loot.drops_lost;
        }
        let drop_rate = total_drops as f64 / drop_attempts.max(1) as f64;

        Self {
            num_runs,
            target_floor,
            runs_completed,
            runs_died,
            runs_timed_out,
            battle_win_rate,
            avg_floors_cleared: avg(|r| r.floors_cleared as f64),
            avg_final_level: avg(|r| r.final_level as f64),
            avg_final_gold: avg(|r| r.final_gold as f64),
            avg_rounds_per_battle,
            avg_enemies_defeated: avg(|r| r.enemies_defeated as f64),
            avg_player_crits: avg(|r| r.player_crits as f64),
            death_floor_distribution,
            floor_distribution,
            drop_rate,
            loot_by_rarity,
            total_drops,
            drops_lost,
            avg_upgrades_equipped: avg(|r| r.upgrades_equipped as f64),
            run_stats: runs,
        }
    }

    pub fn completion_rate(&self) -> f64 {
        self.runs_completed as f64 / self.num_runs.max(1) as f64
    }

    /// Generate a text report.
    pub fn to_text(&self) -> String {
        let mut report = String::new();

        report.push_str("═══════════════════════════════════════════════════════════════\n");
        report.push_str("                    SIMULATION REPORT\n");
        report.push_str("═══════════════════════════════════════════════════════════════\n\n");

        report.push_str(&format!(
            "Runs: {} total, {} cleared floor {}, {} died, {} timed out\n\n",
            self.num_runs, self.runs_completed, self.target_floor, self.runs_died, self.runs_timed_out
        ));

        report.push_str("── PROGRESSION ──────────────────────────────────────────────────\n");
        report.push_str(&format!(
            "  Battle Win Rate:     {:.1}%\n",
            self.battle_win_rate * 100.0
        ));
        report.push_str(&format!(
            "  Avg Floors Cleared:  {:.1}\n",
            self.avg_floors_cleared
        ));
        report.push_str(&format!(
            "  Avg Final Level:     {:.1}\n",
            self.avg_final_level
        ));
        report.push_str(&format!(
            "  Avg Final Gold:      {:.0}\n",
            self.avg_final_gold
        ));
        report.push_str(&format!(
            "  Avg Rounds/Battle:   {:.1}\n",
            self.avg_rounds_per_battle
        ));
        report.push_str(&format!(
            "  Avg Enemies Killed:  {:.1}\n",
            self.avg_enemies_defeated
        ));
        report.push_str(&format!(
            "  Avg Player Crits:    {:.1}\n\n",
            self.avg_player_crits
        ));

        report.push_str("── LOOT ─────────────────────────────────────────────────────────\n");
        report.push_str(&format!(
            "  Drop Rate:           {:.1}%\n",
            self.drop_rate * 100.0
        ));
        report.push_str(&format!(
            "  Drops Lost (full):   {}\n",
            self.drops_lost
        ));
        report.push_str(&format!(
            "  Avg Upgrades:        {:.1}\n",
            self.avg_upgrades_equipped
        ));
        for rarity in Rarity::ALL {
            let count = self.loot_by_rarity.get(&rarity).copied().unwrap_or(0);
            let pct = count as f64 / self.total_drops.max(1) as f64 * 100.0;
            report.push_str(&format!(
                "  {:<10} {:>6} ({:>5.1}%)\n",
                rarity.id(),
                count,
                pct
            ));
        }
        report.push('\n');

        report.push_str("── FLOOR COMPLETION ─────────────────────────────────────────────\n");
        for floor in 1..=self.target_floor {
            let reached = self
                .floor_distribution
                .iter()
                .filter(|&(&cleared, _)| cleared >= floor)
                .map(|(_, &runs)| runs)
                .sum::<u32>();
            let pct = reached as f64 / self.num_runs.max(1) as f64 * 100.0;
            let bar: String = "█".repeat((pct / 5.0) as usize);
            report.push_str(&format!("  Floor {:2}: {:>5.1}% {}\n", floor, pct, bar));
        }
        report.push('\n');

        report.push_str("── BALANCE ASSESSMENT ───────────────────────────────────────────\n");
        let rating = match self.completion_rate() {
            r if r > 0.9 => "TOO EASY - Almost every run clears",
            r if r > 0.5 => "GOOD - Challenging but fair",
            r if r > 0.2 => "HARD - Most runs fall short",
            _ => "TOO HARD - Runs rarely clear",
        };
        report.push_str(&format!(
            "  Completion Rate: {:.1}%\n",
            self.completion_rate() * 100.0
        ));
        report.push_str(&format!("  Rating:          {}\n", rating));

        if let Some((floor, deaths)) = self.death_floor_distribution.iter().max_by_key(|&(_, &deaths)| deaths) {
            report.push_str(&format!(
                "  Deadliest Floor: {} ({} deaths)\n",
                floor, deaths
            ));
        }

        report
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|_| "{}".to_string())
    }
}

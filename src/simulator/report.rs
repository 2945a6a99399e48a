//! Simulation report generation.

use serde::Serialize;
use std::collections::BTreeMap;

use crate::dungeons::all_dungeons;

/// What one simulated session achieved.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunStats {
    pub final_level: u32,
    pub final_dungeon: String,
    pub total_kills: u64,
    pub total_boss_kills: u64,
    pub total_deaths: u64,
    pub total_ticks: u64,
    pub items_looted: u64,
    pub rare_items: u64,
    pub quests_completed: u64,
    pub gold_earned: u64,
    pub dungeons_cleared: Vec<String>,
    pub reached_target: bool,
    pub ticks_to_target: Option<u64>,
}

/// Aggregated results from multiple simulation runs.
#[derive(Debug, Clone, Serialize)]
pub struct SimReport {
    pub num_runs: u32,
    pub runs_completed: u32,
    pub runs_timed_out: u32,

    pub avg_final_level: f64,
    pub avg_total_kills: f64,
    pub avg_total_deaths: f64,
    pub avg_boss_kills: f64,
    pub avg_ticks_to_complete: f64,

    pub avg_items_looted: f64,
    pub avg_rare_items: f64,
    pub avg_quests_completed: f64,
    pub avg_gold_earned: f64,

    pub level_distribution: BTreeMap<u32, u32>,
    /// Share of runs that cleared each dungeon, in ladder order.
    pub clear_rates: Vec<(String, f64)>,

    #[serde(skip)]
    pub run_stats: Vec<RunStats>,
}

fn average(runs: &[RunStats], f: impl Fn(&RunStats) -> f64) -> f64 {
    if runs.is_empty() {
        return 0.0;
    }
    runs.iter().map(f).sum::<f64>() / runs.len() as f64
}

impl SimReport {
    /// Create a new report from completed run stats.
    pub fn from_runs(runs: Vec<RunStats>, max_ticks: u64) -> Self {
        let num_runs = runs.len() as u32;
        let runs_completed = runs.iter().filter(|r| r.reached_target).count() as u32;
        let runs_timed_out = runs
            .iter()
            .filter(|r| !r.reached_target && r.total_ticks >= max_ticks)
            .count() as u32;

        let completed: Vec<RunStats> = runs.iter().filter(|r| r.reached_target).cloned().collect();
        let avg_ticks_to_complete =
            average(&completed, |r| r.ticks_to_target.unwrap_or(r.total_ticks) as f64);

        let mut level_distribution = BTreeMap::new();
        for run in &runs {
            *level_distribution.entry(run.final_level).or_insert(0) += 1;
        }

        let clear_rates = all_dungeons()
            .iter()
            .map(|dungeon| {
                let cleared = runs
                    .iter()
                    .filter(|r| r.dungeons_cleared.iter().any(|d| d == dungeon.id))
                    .count();
                (dungeon.id.to_string(), cleared as f64 / num_runs.max(1) as f64)
            })
            .collect();

        Self {
            num_runs,
            runs_completed,
            runs_timed_out,
            avg_final_level: average(&runs, |r| r.final_level as f64),
            avg_total_kills: average(&runs, |r| r.total_kills as f64),
            avg_total_deaths: average(&runs, |r| r.total_deaths as f64),
            avg_boss_kills: average(&runs, |r| r.total_boss_kills as f64),
            avg_ticks_to_complete,
            avg_items_looted: average(&runs, |r| r.items_looted as f64),
            avg_rare_items: average(&runs, |r| r.rare_items as f64),
            avg_quests_completed: average(&runs, |r| r.quests_completed as f64),
            avg_gold_earned: average(&runs, |r| r.gold_earned as f64),
            level_distribution,
            clear_rates,
            run_stats: runs,
        }
    }

    /// Generate a text report.
    pub fn to_text(&self) -> String {
        let mut report = String::new();

        report.push_str("═══════════════════════════════════════════════════════════════\n");
        report.push_str("                    SIMULATION REPORT\n");
        report.push_str("═══════════════════════════════════════════════════════════════\n\n");

        report.push_str(&format!(
            "Runs: {} total, {} completed, {} timed out\n\n",
            self.num_runs, self.runs_completed, self.runs_timed_out
        ));

        report.push_str("── PROGRESSION ──────────────────────────────────────────────────\n");
        report.push_str(&format!("  Avg Final Level:     {:.1}\n", self.avg_final_level));
        report.push_str(&format!("  Avg Total Kills:     {:.0}\n", self.avg_total_kills));
        report.push_str(&format!("  Avg Boss Kills:      {:.1}\n", self.avg_boss_kills));
        report.push_str(&format!("  Avg Total Deaths:    {:.1}\n", self.avg_total_deaths));
        report.push_str(&format!(
            "  Avg Ticks to Clear:  {:.0}\n\n",
            self.avg_ticks_to_complete
        ));

        report.push_str("── LOOT & QUESTS ────────────────────────────────────────────────\n");
        report.push_str(&format!("  Avg Items Looted:    {:.1}\n", self.avg_items_looted));
        report.push_str(&format!("  Avg Rare+ Items:     {:.2}\n", self.avg_rare_items));
        report.push_str(&format!("  Avg Quests Done:     {:.1}\n", self.avg_quests_completed));
        report.push_str(&format!("  Avg Gold Earned:     {:.0}\n\n", self.avg_gold_earned));

        report.push_str("── DUNGEON CLEARS ───────────────────────────────────────────────\n");
        for (dungeon, rate) in &self.clear_rates {
            let pct = rate * 100.0;
            let bar: String = "█".repeat((pct / 5.0) as usize);
            report.push_str(&format!("  {:<16} {:>5.1}% {}\n", dungeon, pct, bar));
        }
        report.push('\n');

        report.push_str("── BALANCE ASSESSMENT ───────────────────────────────────────────\n");
        let completion_rate = if self.num_runs > 0 {
            self.runs_completed as f64 / self.num_runs as f64 * 100.0
        } else {
            0.0
        };
        let deaths_per_kill = if self.avg_total_kills > 0.0 {
            self.avg_total_deaths / self.avg_total_kills
        } else {
            0.0
        };
        let death_rating = if deaths_per_kill < 0.01 {
            "TOO EASY - Heroes rarely die"
        } else if deaths_per_kill < 0.05 {
            "GOOD - Challenging but fair"
        } else if deaths_per_kill < 0.2 {
            "HARD - Many deaths but progressing"
        } else {
            "TOO HARD - Excessive deaths"
        };
        report.push_str(&format!("  Completion Rate: {:.1}%\n", completion_rate));
        report.push_str(&format!("  Death Rating:    {}\n", death_rating));
        if self.runs_timed_out > self.num_runs / 2 {
            report.push_str("  ⚠️  Most runs timed out - target too far for the tick budget?\n");
        }

        report.push_str("\n═══════════════════════════════════════════════════════════════\n");
        report
    }

    /// Generate a JSON report for further analysis.
    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|_| "{}".to_string())
    }
}

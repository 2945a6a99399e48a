//! Dungeon run state: floors, battles, boss phase and unlocks.

use std::collections::BTreeSet;

use rand::seq::SliceRandom;
use rand::Rng;
use serde::Serialize;

use super::data::{all_dungeons, get_dungeon, starting_dungeon, DungeonDef};
use crate::combat::Enemy;
use crate::core::constants::HERO_LEVELS_PER_ENEMY_LEVEL;
use crate::error::{ActionError, Result};

/// Where the current run stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RunPhase {
    /// Nothing fought yet on this floor of the first run.
    Idle,
    InFloorBattle,
    /// The previous floor is done; the next spawn rolls a new battle count.
    FloorTransition,
    BossPhase,
    /// The boss just fell; the next spawn starts floor 1 again.
    DungeonCleared,
}

/// What a regular kill did to the run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FloorAdvance {
    /// More battles remain on this floor.
    Continue,
    /// `floor` was cleared and the next floor begins.
    FloorCleared { floor: u32 },
    /// The last floor was cleared; the boss comes next.
    BossPhaseEntered,
}

/// Result of a boss kill.
#[derive(Debug, Clone, PartialEq)]
pub struct DungeonClear {
    pub dungeon: &'static str,
    /// Set only when the unlock was new.
    pub newly_unlocked: Option<&'static str>,
    pub relic: Option<&'static str>,
}

#[derive(Debug, Clone)]
pub struct DungeonProgress {
    current: &'static DungeonDef,
    unlocked: BTreeSet<String>,
    /// 1-based; `floors + 1` while in the boss phase.
    pub floor: u32,
    pub battles_remaining: u32,
    /// Battles rolled for the current floor, for progress display.
    pub total_battles: u32,
    pub boss_phase: bool,
    just_cleared: bool,
}

impl Default for DungeonProgress {
    fn default() -> Self {
        Self::new()
    }
}

impl DungeonProgress {
    /// Fresh progression in the starting dungeon with the default unlocks.
    pub fn new() -> Self {
        Self {
            current: starting_dungeon(),
            unlocked: default_unlocked(),
            floor: 1,
            battles_remaining: 0,
            total_battles: 0,
            boss_phase: false,
            just_cleared: false,
        }
    }

    /// Restore from saved ids. Unknown ids are logged and dropped; an unknown
    /// or locked current dungeon falls back to the starting one.
    pub fn restore(current_id: &str, unlocked_ids: &[String]) -> Self {
        let mut progress = Self::new();
        for id in unlocked_ids {
            match get_dungeon(id) {
                Some(def) => {
                    progress.unlocked.insert(def.id.to_string());
                }
                None => log::warn!("Ignoring unknown unlocked dungeon {}", id),
            }
        }
        match get_dungeon(current_id) {
            Some(def) if progress.is_unlocked(def.id) => progress.current = def,
            Some(def) => log::warn!("Saved dungeon {} is locked, starting over", def.id),
            None => log::warn!("Unknown saved dungeon {}, starting over", current_id),
        }
        progress
    }

    pub fn current(&self) -> &'static DungeonDef {
        self.current
    }

    pub fn is_unlocked(&self, id: &str) -> bool {
        self.unlocked.contains(id)
    }

    /// Unlocked dungeon ids in table order.
    pub fn unlocked_ids(&self) -> Vec<String> {
        all_dungeons()
            .iter()
            .filter(|d| self.is_unlocked(d.id))
            .map(|d| d.id.to_string())
            .collect()
    }

    pub fn phase(&self) -> RunPhase {
        if self.boss_phase {
            RunPhase::BossPhase
        } else if self.battles_remaining > 0 {
            RunPhase::InFloorBattle
        } else if self.just_cleared {
            RunPhase::DungeonCleared
        } else if self.floor > 1 {
            RunPhase::FloorTransition
        } else {
            RunPhase::Idle
        }
    }

    /// Move to another unlocked dungeon and start its run from floor 1.
    pub fn switch_dungeon(&mut self, id: &str) -> Result<()> {
        let def = get_dungeon(id).ok_or_else(|| ActionError::UnknownDungeon(id.to_string()))?;
        if !self.is_unlocked(def.id) {
            return Err(ActionError::DungeonLocked(def.id.to_string()));
        }
        self.current = def;
        self.reset_run();
        Ok(())
    }

    /// Forget floor progress. Unlocks are kept.
    pub fn reset_run(&mut self) {
        self.floor = 1;
        self.battles_remaining = 0;
        self.total_battles = 0;
        self.boss_phase = false;
        self.just_cleared = false;
    }

    /// Spawn the next enemy for a hero of `hero_level`: the boss in the boss
    /// phase, otherwise a random pool enemy. Rolls a battle count when the
    /// floor has none left.
    pub fn spawn_enemy(&mut self, hero_level: u32, rng: &mut impl Rng) -> Enemy {
        let dungeon = self.current;
        let extra_levels = hero_level.saturating_sub(1) / HERO_LEVELS_PER_ENEMY_LEVEL;
        self.just_cleared = false;

        if self.boss_phase {
            return Enemy::spawn(dungeon.boss, dungeon.boss_level + extra_levels, true);
        }

        if self.battles_remaining == 0 {
            let (min, max) = dungeon.battles_per_floor;
            let battles = if min >= max {
                max.max(1)
            } else {
                rng.gen_range(min..=max)
            };
            self.battles_remaining = battles.max(1);
            self.total_battles = self.battles_remaining;
            log::debug!(
                "{} floor {}: {} battles",
                dungeon.id,
                self.floor,
                self.battles_remaining
            );
        }

        let level = dungeon.level.max(dungeon.level + extra_levels);
        match dungeon.enemies.choose(rng) {
            Some(base_type) => Enemy::spawn(base_type, level, false),
            None => {
                log::warn!("Dungeon {} has no enemy pool", dungeon.id);
                Enemy::spawn("", level, false)
            }
        }
    }

    /// Count a regular kill against the current floor.
    pub fn on_enemy_defeated(&mut self) -> FloorAdvance {
        self.battles_remaining = self.battles_remaining.saturating_sub(1);
        if self.battles_remaining > 0 {
            return FloorAdvance::Continue;
        }

        let cleared = self.floor;
        self.floor += 1;
        if self.floor > self.current.floors {
            self.boss_phase = true;
            log::info!("{}: all floors cleared, boss incoming", self.current.id);
            FloorAdvance::BossPhaseEntered
        } else {
            FloorAdvance::FloorCleared { floor: cleared }
        }
    }

    /// Unlock the next dungeon, hand out the relic and loop the run back to
    /// floor 1 of the same dungeon.
    pub fn on_boss_defeated(&mut self) -> DungeonClear {
        let dungeon = self.current;
        let mut newly_unlocked = None;
        if let Some(next) = dungeon.unlocks {
            match get_dungeon(next) {
                Some(def) => {
                    if self.unlocked.insert(def.id.to_string()) {
                        log::info!("New dungeon unlocked: {}", def.id);
                        newly_unlocked = Some(def.id);
                    }
                }
                None => log::warn!("{} unlocks unknown dungeon {}", dungeon.id, next),
            }
        }

        self.reset_run();
        self.just_cleared = true;
        log::info!("{} cleared", dungeon.id);

        DungeonClear {
            dungeon: dungeon.id,
            newly_unlocked,
            relic: dungeon.relic,
        }
    }

    /// A lost fight forfeits floor progress.
    pub fn on_hero_death(&mut self) {
        self.reset_run();
    }

    /// Run completion as a whole percent. The boss phase reports 100.
    pub fn progress_percent(&self) -> u32 {
        let floors = self.current.floors.max(1) as f64;
        let inside_floor = if self.total_battles > 0 && !self.boss_phase {
            let done = self.total_battles.saturating_sub(self.battles_remaining) as f64;
            (done / self.total_battles as f64).clamp(0.0, 1.0)
        } else {
            0.0
        };
        let overall = ((self.floor.saturating_sub(1)) as f64 + inside_floor) / floors;
        (overall.clamp(0.0, 1.0) * 100.0).round() as u32
    }
}

fn default_unlocked() -> BTreeSet<String> {
    all_dungeons()
        .iter()
        .filter(|d| !d.locked)
        .map(|d| d.id.to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn clear_floor(progress: &mut DungeonProgress, rng: &mut ChaCha8Rng) -> FloorAdvance {
        loop {
            progress.spawn_enemy(1, rng);
            let advance = progress.on_enemy_defeated();
            if advance != FloorAdvance::Continue {
                return advance;
            }
        }
    }

    #[test]
    fn test_new_progress() {
        let progress = DungeonProgress::new();
        assert_eq!(progress.current().id, "Cave of Slimes");
        assert_eq!(progress.floor, 1);
        assert_eq!(progress.phase(), RunPhase::Idle);
        assert!(progress.is_unlocked("Cave of Slimes"));
        assert!(!progress.is_unlocked("Crypt of Bones"));
        assert_eq!(progress.progress_percent(), 0);
    }

    #[test]
    fn test_first_spawn_rolls_battle_count() {
        let mut progress = DungeonProgress::new();
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let enemy = progress.spawn_enemy(1, &mut rng);
        assert!(!enemy.is_boss);
        assert_eq!(enemy.level, 1);
        assert!((3..=5).contains(&progress.battles_remaining));
        assert_eq!(progress.total_battles, progress.battles_remaining);
        assert_eq!(progress.phase(), RunPhase::InFloorBattle);
    }

    #[test]
    fn test_spawn_does_not_reroll_mid_floor() {
        let mut progress = DungeonProgress::new();
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        progress.spawn_enemy(1, &mut rng);
        let rolled = progress.battles_remaining;
        progress.on_enemy_defeated();
        progress.spawn_enemy(1, &mut rng);
        assert_eq!(progress.battles_remaining, rolled - 1);
        assert_eq!(progress.total_battles, rolled);
    }

    #[test]
    fn test_enemy_level_follows_hero_level() {
        let mut progress = DungeonProgress::new();
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        assert_eq!(progress.spawn_enemy(5, &mut rng).level, 1);
        assert_eq!(progress.spawn_enemy(6, &mut rng).level, 2);
        assert_eq!(progress.spawn_enemy(16, &mut rng).level, 4);
    }

    #[test]
    fn test_floor_advance_and_boss_phase() {
        let mut progress = DungeonProgress::new();
        let mut rng = ChaCha8Rng::seed_from_u64(4);
        for floor in 1..10 {
            assert_eq!(
                clear_floor(&mut progress, &mut rng),
                FloorAdvance::FloorCleared { floor }
            );
            assert_eq!(progress.phase(), RunPhase::FloorTransition);
        }
        assert_eq!(clear_floor(&mut progress, &mut rng), FloorAdvance::BossPhaseEntered);
        assert_eq!(progress.floor, 11);
        assert_eq!(progress.phase(), RunPhase::BossPhase);
        assert_eq!(progress.progress_percent(), 100);

        let boss = progress.spawn_enemy(11, &mut rng);
        assert!(boss.is_boss);
        assert_eq!(boss.base_type, "Slime King");
        assert_eq!(boss.level, 12);
    }

    #[test]
    fn test_boss_defeat_unlocks_and_loops() {
        let mut progress = DungeonProgress::new();
        progress.boss_phase = true;
        progress.floor = 11;
        let clear = progress.on_boss_defeated();
        assert_eq!(clear.dungeon, "Cave of Slimes");
        assert_eq!(clear.newly_unlocked, Some("Crypt of Bones"));
        assert_eq!(clear.relic, Some("Corroded Core"));
        assert!(progress.is_unlocked("Crypt of Bones"));
        assert_eq!(progress.floor, 1);
        assert!(!progress.boss_phase);
        assert_eq!(progress.phase(), RunPhase::DungeonCleared);
        assert_eq!(progress.current().id, "Cave of Slimes");

        // second clear: relic again, no new unlock
        let clear = progress.on_boss_defeated();
        assert_eq!(clear.newly_unlocked, None);
        assert_eq!(clear.relic, Some("Corroded Core"));
    }

    #[test]
    fn test_switch_dungeon() {
        let mut progress = DungeonProgress::new();
        assert_eq!(
            progress.switch_dungeon("Crypt of Bones"),
            Err(ActionError::DungeonLocked("Crypt of Bones".to_string()))
        );
        assert_eq!(
            progress.switch_dungeon("Nowhere"),
            Err(ActionError::UnknownDungeon("Nowhere".to_string()))
        );

        progress.floor = 4;
        progress.battles_remaining = 2;
        progress.on_boss_defeated();
        progress.floor = 7;
        progress.switch_dungeon("Crypt of Bones").unwrap();
        assert_eq!(progress.current().id, "Crypt of Bones");
        assert_eq!(progress.floor, 1);
        assert_eq!(progress.battles_remaining, 0);
        assert!(!progress.boss_phase);
        assert!(progress.is_unlocked("Crypt of Bones"));
    }

    #[test]
    fn test_hero_death_forfeits_progress() {
        let mut progress = DungeonProgress::new();
        progress.floor = 6;
        progress.battles_remaining = 2;
        progress.on_hero_death();
        assert_eq!(progress.floor, 1);
        assert_eq!(progress.battles_remaining, 0);
    }

    #[test]
    fn test_progress_percent_inside_floor() {
        let mut progress = DungeonProgress::new();
        progress.floor = 3;
        progress.total_battles = 4;
        progress.battles_remaining = 2;
        // (2 + 0.5) / 10
        assert_eq!(progress.progress_percent(), 25);
    }

    #[test]
    fn test_restore_validates_ids() {
        let saved = vec!["Crypt of Bones".to_string(), "Atlantis".to_string()];
        let progress = DungeonProgress::restore("Crypt of Bones", &saved);
        assert_eq!(progress.current().id, "Crypt of Bones");
        assert_eq!(
            progress.unlocked_ids(),
            vec!["Cave of Slimes".to_string(), "Crypt of Bones".to_string()]
        );

        let progress = DungeonProgress::restore("Abyss", &[]);
        assert_eq!(progress.current().id, "Cave of Slimes");
    }
}

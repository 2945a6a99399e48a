//! Runtime-adjustable combat tunables.
//!
//! Unlike the fixed numbers in [`super::constants`], these four values can be
//! changed while a session is running (debug tooling, balance experiments,
//! a `balance.json` next to the save file).

use serde::{Deserialize, Serialize};

/// Fraction of the defender's defense that counts against incoming damage.
pub const DEFAULT_DEFENSE_EFFECTIVENESS: f64 = 0.5;

/// Damage spread: each hit is scaled by `1 ± DAMAGE_VARIANCE`.
pub const DEFAULT_DAMAGE_VARIANCE: f64 = 0.12;

/// Fraction of effective defense ignored during boss fights.
pub const DEFAULT_BOSS_DEFENSE_BYPASS: f64 = 0.35;

/// Multiplier applied to the hero's attack for every outgoing hit.
pub const DEFAULT_HERO_ATTACK_MULT: f64 = 3.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CombatBalance {
    pub defense_effectiveness: f64,
    pub damage_variance: f64,
    pub boss_defense_bypass: f64,
    pub hero_attack_mult: f64,
}

impl Default for CombatBalance {
    fn default() -> Self {
        Self {
            defense_effectiveness: DEFAULT_DEFENSE_EFFECTIVENESS,
            damage_variance: DEFAULT_DAMAGE_VARIANCE,
            boss_defense_bypass: DEFAULT_BOSS_DEFENSE_BYPASS,
            hero_attack_mult: DEFAULT_HERO_ATTACK_MULT,
        }
    }
}

/// Partial override record. Absent fields keep the current value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BalanceOverrides {
    pub defense_effectiveness: Option<f64>,
    pub damage_variance: Option<f64>,
    pub boss_defense_bypass: Option<f64>,
    pub hero_attack_mult: Option<f64>,
}

impl CombatBalance {
    /// Apply a partial override. Zero, negative and non-finite values are
    /// ignored so a half-filled config file cannot zero out combat.
    pub fn apply_overrides(&mut self, overrides: &BalanceOverrides) {
        fn pick(current: &mut f64, candidate: Option<f64>) {
            if let Some(value) = candidate {
                if value.is_finite() && value > 0.0 {
                    *current = value;
                }
            }
        }

        pick(
            &mut self.defense_effectiveness,
            overrides.defense_effectiveness,
        );
        pick(&mut self.damage_variance, overrides.damage_variance);
        pick(&mut self.boss_defense_bypass, overrides.boss_defense_bypass);
        pick(&mut self.hero_attack_mult, overrides.hero_attack_mult);
    }

    pub fn with_overrides(mut self, overrides: &BalanceOverrides) -> Self {
        self.apply_overrides(overrides);
        self
    }

    /// Bypass fraction for a fight: bosses ignore part of the defense.
    pub fn bypass_for(&self, is_boss_fight: bool) -> f64 {
        if is_boss_fight {
            self.boss_defense_bypass
        } else {
            0.0
        }
    }
}

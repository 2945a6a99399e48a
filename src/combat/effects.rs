//! Time-limited combat modifiers shared by heroes and enemies.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum EffectKind {
    /// Multiplies outgoing attack.
    AttackMultiplier(f64),
    /// Added to defense. Negative values weaken the target.
    DefenseAdd(f64),
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Effect {
    pub kind: EffectKind,
    /// Turns left before the effect expires.
    pub turns: u32,
}

impl Effect {
    pub fn attack_multiplier(value: f64, turns: u32) -> Self {
        Self {
            kind: EffectKind::AttackMultiplier(value),
            turns,
        }
    }

    pub fn defense_add(value: f64, turns: u32) -> Self {
        Self {
            kind: EffectKind::DefenseAdd(value),
            turns,
        }
    }
}

/// Active effects on one combatant. Never persisted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Effects {
    active: Vec<Effect>,
}

impl Effects {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, effect: Effect) {
        if effect.turns > 0 {
            self.active.push(effect);
        }
    }

    /// Product of all attack multipliers, 1.0 when none apply.
    pub fn attack_multiplier(&self) -> f64 {
        self.active
            .iter()
            .filter_map(|e| match e.kind {
                EffectKind::AttackMultiplier(m) if m.is_finite() => Some(m),
                _ => None,
            })
            .product()
    }

    /// Sum of all defense adds.
    pub fn defense_add(&self) -> f64 {
        self.active
            .iter()
            .filter_map(|e| match e.kind {
                EffectKind::DefenseAdd(d) if d.is_finite() => Some(d),
                _ => None,
            })
            .sum()
    }

    /// Advance one turn, dropping expired effects.
    pub fn tick(&mut self) {
        for effect in &mut self.active {
            effect.turns = effect.turns.saturating_sub(1);
        }
        self.active.retain(|e| e.turns > 0);
    }

    pub fn clear(&mut self) {
        self.active.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = &Effect> {
        self.active.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }
}

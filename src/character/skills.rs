//! Class skill sets: active skills with cooldowns and level-gated passives.

use crate::combat::effects::Effect;
use crate::items::{StatKey, StatMap};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum HeroClass {
    #[default]
    Warrior,
    Mage,
}

impl HeroClass {
    pub const ALL: [HeroClass; 2] = [HeroClass::Warrior, HeroClass::Mage];

    pub fn name(&self) -> &'static str {
        match self {
            HeroClass::Warrior => "Warrior",
            HeroClass::Mage => "Mage",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|class| class.name().eq_ignore_ascii_case(name))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkillKind {
    Damage,
    Buff,
    Debuff,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum SkillEffect {
    /// Replaces the turn's ordinary attacks with one scaled hit, optionally
    /// leaving a debuff on the enemy.
    Damage {
        multiplier: f64,
        debuff: Option<Effect>,
    },
    /// Applied to the hero before attacking normally.
    Buff(Effect),
    /// Applied to the enemy before attacking normally.
    Debuff(Effect),
}

impl SkillEffect {
    pub fn kind(&self) -> SkillKind {
        match self {
            SkillEffect::Damage { .. } => SkillKind::Damage,
            SkillEffect::Buff(_) => SkillKind::Buff,
            SkillEffect::Debuff(_) => SkillKind::Debuff,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActiveSkill {
    pub id: String,
    pub name: String,
    pub cooldown: u32,
    pub remaining_cooldown: u32,
    pub effect: SkillEffect,
}

impl ActiveSkill {
    fn new(id: &str, name: &str, cooldown: u32, effect: SkillEffect) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            cooldown,
            remaining_cooldown: 0,
            effect,
        }
    }

    pub fn is_ready(&self) -> bool {
        self.remaining_cooldown == 0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PassiveSkill {
    pub id: String,
    pub name: String,
    pub unlock_level: u32,
    pub applied: bool,
    pub bonuses: StatMap,
}

impl PassiveSkill {
    fn new(id: &str, name: &str, unlock_level: u32, bonuses: &[(StatKey, f64)]) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            unlock_level,
            applied: false,
            bonuses: StatMap::from_pairs(bonuses),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Skills {
    pub actives: Vec<ActiveSkill>,
    pub passives: Vec<PassiveSkill>,
}

impl Skills {
    /// The fixed skill set of a class.
    pub fn for_class(class: HeroClass) -> Self {
        match class {
            HeroClass::Warrior => Self {
                actives: vec![
                    ActiveSkill::new(
                        "slash",
                        "Slash",
                        2,
                        SkillEffect::Damage {
                            multiplier: 1.8,
                            debuff: None,
                        },
                    ),
                    ActiveSkill::new(
                        "rage",
                        "Rage",
                        5,
                        SkillEffect::Buff(Effect::attack_multiplier(1.4, 3)),
                    ),
                    ActiveSkill::new(
                        "shield_bash",
                        "Shield Bash",
                        4,
                        SkillEffect::Damage {
                            multiplier: 1.0,
                            debuff: Some(Effect::defense_add(-2.0, 2)),
                        },
                    ),
                ],
                passives: vec![PassiveSkill::new(
                    "iron_skin",
                    "Iron Skin",
                    4,
                    &[(StatKey::Defense, 4.0)],
                )],
            },
            HeroClass::Mage => Self {
                actives: vec![
                    ActiveSkill::new(
                        "fireball",
                        "Fireball",
                        2,
                        SkillEffect::Damage {
                            multiplier: 2.0,
                            debuff: None,
                        },
                    ),
                    ActiveSkill::new(
                        "frost_nova",
                        "Frost Nova",
                        4,
                        SkillEffect::Damage {
                            multiplier: 1.2,
                            debuff: Some(Effect::attack_multiplier(0.85, 2)),
                        },
                    ),
                    ActiveSkill::new(
                        "meteor",
                        "Meteor",
                        6,
                        SkillEffect::Damage {
                            multiplier: 3.2,
                            debuff: None,
                        },
                    ),
                ],
                passives: vec![PassiveSkill::new(
                    "arcane_surge",
                    "Arcane Surge",
                    6,
                    &[(StatKey::CritChance, 0.06)],
                )],
            },
        }
    }

    pub fn get_active(&self, id: &str) -> Option<&ActiveSkill> {
        self.actives.iter().find(|s| s.id == id)
    }

    /// Put a ready skill on cooldown and return its effect.
    pub fn use_skill(&mut self, id: &str) -> Option<(String, SkillEffect)> {
        let skill = self.actives.iter_mut().find(|s| s.id == id)?;
        if !skill.is_ready() {
            return None;
        }
        skill.remaining_cooldown = skill.cooldown;
        Some((skill.name.clone(), skill.effect))
    }

    /// First ready skill of `kind`, in definition order.
    pub fn first_ready(&self, kind: SkillKind) -> Option<&ActiveSkill> {
        self.actives
            .iter()
            .find(|s| s.is_ready() && s.effect.kind() == kind)
    }

    pub fn tick_cooldowns(&mut self) {
        for skill in &mut self.actives {
            skill.remaining_cooldown = skill.remaining_cooldown.saturating_sub(1);
        }
    }

    pub fn reset_cooldowns(&mut self) {
        for skill in &mut self.actives {
            skill.remaining_cooldown = 0;
        }
    }

    /// Mark passives whose unlock level has been reached. Applied passives
    /// stay applied. Returns the names of newly applied passives.
    pub fn apply_unlocked_passives(&mut self, level: u32) -> Vec<String> {
        let mut newly_applied = Vec::new();
        for passive in &mut self.passives {
            if !passive.applied && level >= passive.unlock_level {
                passive.applied = true;
                newly_applied.push(passive.name.clone());
            }
        }
        newly_applied
    }

    /// Summed bonuses of applied passives.
    pub fn passive_bonuses(&self) -> StatMap {
        let mut total = StatMap::new();
        for passive in self.passives.iter().filter(|p| p.applied) {
            for (key, value) in passive.bonuses.iter() {
                total.add(key, value);
            }
        }
        total
    }
}

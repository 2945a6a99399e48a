//! Player commands: parsing from text and applying them to a session.
//!
//! Every command validates before it mutates, so an `Err` leaves the
//! session exactly as it was.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::character::UpgradeKey;
use crate::core::game_loop::GameLoop;
use crate::core::game_state::GameSession;
use crate::core::tick::TickEvent;
use crate::error::{ActionError, Result};
use crate::items::{get_shop_item, EquipmentSlot};
use crate::quests::ProgressEvent;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    StartRun,
    StopRun,
    ChangeDungeon(String),
    Equip(usize),
    Unequip(String),
    Sell(usize),
    UseConsumable(usize),
    UpgradeItem(usize),
    UpgradeEquipped(String),
    Buy(String),
    PurchaseUpgrade(String),
    ClaimQuest(String),
    RequestSkill(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseCommandError {
    #[error("Empty command")]
    Empty,
    #[error("Unknown command: {0}")]
    Unknown(String),
    #[error("{0} needs an argument")]
    MissingArgument(&'static str),
    #[error("Not an inventory index: {0}")]
    BadIndex(String),
}

impl FromStr for Command {
    type Err = ParseCommandError;

    /// `verb [argument]`. Dungeon names may contain spaces.
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let s = s.trim();
        let (verb, arg) = match s.split_once(char::is_whitespace) {
            Some((verb, arg)) => (verb, arg.trim()),
            None => (s, ""),
        };
        if verb.is_empty() {
            return Err(ParseCommandError::Empty);
        }

        let text = |name: &'static str| -> std::result::Result<String, ParseCommandError> {
            if arg.is_empty() {
                Err(ParseCommandError::MissingArgument(name))
            } else {
                Ok(arg.to_string())
            }
        };
        let index = |name: &'static str| -> std::result::Result<usize, ParseCommandError> {
            if arg.is_empty() {
                return Err(ParseCommandError::MissingArgument(name));
            }
            arg.parse()
                .map_err(|_| ParseCommandError::BadIndex(arg.to_string()))
        };

        Ok(match verb.to_ascii_lowercase().as_str() {
            "start" => Command::StartRun,
            "stop" => Command::StopRun,
            "dungeon" => Command::ChangeDungeon(text("dungeon")?),
            "equip" => Command::Equip(index("equip")?),
            "unequip" => Command::Unequip(text("unequip")?),
            "sell" => Command::Sell(index("sell")?),
            "use" => Command::UseConsumable(index("use")?),
            "upgrade" => Command::UpgradeItem(index("upgrade")?),
            "upgrade-slot" => Command::UpgradeEquipped(text("upgrade-slot")?),
            "buy" => Command::Buy(text("buy")?),
            "train" => Command::PurchaseUpgrade(text("train")?),
            "claim" => Command::ClaimQuest(text("claim")?),
            "skill" => Command::RequestSkill(text("skill")?),
            other => return Err(ParseCommandError::Unknown(other.to_string())),
        })
    }
}

/// What a successful command did.
#[derive(Debug, Clone, PartialEq)]
pub struct CommandOutcome {
    pub message: String,
    pub events: Vec<TickEvent>,
}

impl CommandOutcome {
    fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            events: Vec::new(),
        }
    }

    fn with_events(mut self, events: Vec<TickEvent>) -> Self {
        self.events = events;
        self
    }
}

impl fmt::Display for CommandOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

fn parse_slot(key: &str) -> Result<EquipmentSlot> {
    EquipmentSlot::from_key(key).ok_or_else(|| ActionError::InvalidSlot(key.to_string()))
}

impl GameSession {
    /// Switch dungeons. Drops the live enemy and restarts at floor 1.
    pub fn change_dungeon(&mut self, id: &str) -> Result<CommandOutcome> {
        self.dungeon.switch_dungeon(id)?;
        self.leave_combat();
        Ok(CommandOutcome::new(format!(
            "Entered {}",
            self.dungeon.current().id
        )))
    }

    pub fn equip(&mut self, index: usize) -> Result<CommandOutcome> {
        let slot = self.hero.equip(index)?;
        let name = self
            .hero
            .equipment
            .get(slot)
            .as_ref()
            .map(|item| item.name.clone())
            .unwrap_or_default();
        Ok(CommandOutcome::new(format!(
            "Equipped {} in {}",
            name,
            slot.name()
        )))
    }

    pub fn unequip(&mut self, slot: &str) -> Result<CommandOutcome> {
        let slot = parse_slot(slot)?;
        self.hero.unequip(slot)?;
        Ok(CommandOutcome::new(format!("Unequipped {}", slot.name())))
    }

    /// Sell an inventory item. Counts towards gold earned and items sold.
    pub fn sell(&mut self, index: usize) -> Result<CommandOutcome> {
        let (item, gold) = self.hero.sell_item(index)?;
        self.counters.items_sold += 1;
        self.counters.total_gold_earned += gold;
        let events = self.sync_quests();
        Ok(CommandOutcome::new(format!("Sold {} for {} gold", item.name, gold)).with_events(events))
    }

    pub fn use_consumable(&mut self, index: usize) -> Result<CommandOutcome> {
        let healed = self.hero.use_consumable(index)?;
        Ok(CommandOutcome::new(format!("Restored {} HP", healed)))
    }

    pub fn upgrade_item(&mut self, index: usize) -> Result<CommandOutcome> {
        let outcome = self.hero.upgrade_inventory_item(index)?;
        Ok(CommandOutcome::new(format!(
            "Upgraded to +{} for {} gold and {} shard(s)",
            outcome.new_level, outcome.cost.gold, outcome.cost.shards
        )))
    }

    pub fn upgrade_equipped(&mut self, slot: &str) -> Result<CommandOutcome> {
        let slot = parse_slot(slot)?;
        let outcome = self.hero.upgrade_equipped_item(slot)?;
        Ok(CommandOutcome::new(format!(
            "Upgraded {} to +{} for {} gold and {} shard(s)",
            slot.name(),
            outcome.new_level,
            outcome.cost.gold,
            outcome.cost.shards
        )))
    }

    /// Buy a shop consumable. Gold and space are both checked first.
    pub fn buy(&mut self, shop_id: &str) -> Result<CommandOutcome> {
        let entry =
            get_shop_item(shop_id).ok_or_else(|| ActionError::UnknownShopItem(shop_id.to_string()))?;
        if self.hero.inventory.is_full() {
            return Err(ActionError::InventoryFull);
        }
        self.hero.spend_gold(entry.price)?;
        if let Err(item) = self.hero.add_item(entry.instantiate()) {
            // refund
            self.hero.base.gold += entry.price;
            log::warn!("Could not store purchased {}", item.name);
            return Err(ActionError::InventoryFull);
        }
        Ok(CommandOutcome::new(format!(
            "Bought {} for {} gold",
            entry.name, entry.price
        )))
    }

    pub fn purchase_upgrade(&mut self, key: &str) -> Result<CommandOutcome> {
        let key =
            UpgradeKey::from_key(key).ok_or_else(|| ActionError::UnknownUpgrade(key.to_string()))?;
        let cost = self.hero.purchase_upgrade(key)?;
        let events = self.publish(ProgressEvent::UpgradeStat(key));
        Ok(CommandOutcome::new(format!(
            "{} upgraded to level {} for {} gold",
            key.def().name,
            self.hero.upgrades.level(key),
            cost
        ))
        .with_events(events))
    }

    /// Claim a completed quest's gold and XP. Reward gold is not counted as
    /// earned gold.
    pub fn claim_quest(&mut self, id: &str) -> Result<CommandOutcome> {
        let reward = self.quests.claim(id)?;
        self.hero.base.gold += reward.gold;
        let level_up = self.hero.gain_xp(reward.xp);

        let mut events = Vec::new();
        if level_up.leveled_up() {
            events.push(TickEvent::LevelUp {
                new_level: level_up.new_level,
                passives_unlocked: level_up.passives_unlocked,
            });
        }
        events.extend(self.sync_quests());
        Ok(CommandOutcome::new(format!(
            "Claimed {} gold and {} XP",
            reward.gold, reward.xp
        ))
        .with_events(events))
    }

    /// Queue a skill for the next turn. It must exist and be ready now.
    pub fn request_skill(&mut self, id: &str) -> Result<CommandOutcome> {
        let skill = self
            .hero
            .skills
            .get_active(id)
            .ok_or_else(|| ActionError::UnknownSkill(id.to_string()))?;
        if !skill.is_ready() {
            return Err(ActionError::SkillOnCooldown {
                skill: skill.name.clone(),
                turns: skill.remaining_cooldown,
            });
        }
        let message = format!("{} queued", skill.name);
        self.pending_skill = Some(skill.id.clone());
        Ok(CommandOutcome::new(message))
    }
}

impl GameLoop {
    /// Apply a command. Run control is handled here; the rest is delegated
    /// to the session.
    pub fn execute(&mut self, command: Command) -> Result<CommandOutcome> {
        let outcome = match command {
            Command::StartRun => {
                self.start();
                CommandOutcome::new(format!(
                    "Exploring {}",
                    self.session.dungeon.current().id
                ))
            }
            Command::StopRun => {
                let event = self.stop()?;
                CommandOutcome::new("Run stopped").with_events(vec![event])
            }
            Command::ChangeDungeon(id) => self.session.change_dungeon(&id)?,
            Command::Equip(index) => self.session.equip(index)?,
            Command::Unequip(slot) => self.session.unequip(&slot)?,
            Command::Sell(index) => self.session.sell(index)?,
            Command::UseConsumable(index) => self.session.use_consumable(index)?,
            Command::UpgradeItem(index) => self.session.upgrade_item(index)?,
            Command::UpgradeEquipped(slot) => self.session.upgrade_equipped(&slot)?,
            Command::Buy(id) => self.session.buy(&id)?,
            Command::PurchaseUpgrade(key) => self.session.purchase_upgrade(&key)?,
            Command::ClaimQuest(id) => self.session.claim_quest(&id)?,
            Command::RequestSkill(id) => self.session.request_skill(&id)?,
        };
        Ok(outcome)
    }
}

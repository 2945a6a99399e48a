use super::attributes::BaseStats;
use super::skills::HeroClass;
use super::upgrades::UpgradeLevels;
use crate::core::constants::{SAVE_KEY, SAVE_VERSION};
use crate::error::SaveError;
use crate::items::{Equipment, Inventory};
use crate::quests::SavedQuest;
use crate::utils::persistence::KeyValueStore;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Hero identity plus base stats as stored in a save.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedHero {
    pub name: String,
    #[serde(default)]
    pub class: HeroClass,
    #[serde(flatten)]
    pub base: BaseStats,
}

/// Quest log and the running totals quests are measured against.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuestState {
    pub active_quests: Vec<SavedQuest>,
    pub total_gold_earned: u64,
    pub total_enemies_killed: u64,
    pub rare_items_collected: u64,
    pub items_sold: u64,
}

/// Everything needed to rebuild a session. Transient combat state (the live
/// enemy, effects, cooldowns, run floor) is not part of it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SerializedState {
    pub hero: SavedHero,
    #[serde(default)]
    pub upgrades: UpgradeLevels,
    #[serde(default)]
    pub inventory: Inventory,
    #[serde(default)]
    pub equipment: Equipment,
    #[serde(default)]
    pub quest_state: QuestState,
    pub current_dungeon: String,
    #[serde(default)]
    pub unlocked_dungeons: Vec<String>,
    /// Unix seconds.
    #[serde(default)]
    pub saved_at: i64,
}

/// What actually sits in the store: the state JSON plus its checksum.
#[derive(Debug, Serialize, Deserialize)]
struct SaveEnvelope {
    version: u32,
    checksum: String,
    payload: String,
}

fn checksum(payload: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(SAVE_VERSION.to_le_bytes());
    hasher.update(payload.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Reads and writes the session save through a [`KeyValueStore`].
pub struct SaveManager<S: KeyValueStore> {
    store: S,
}

impl<S: KeyValueStore> SaveManager<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    /// Saves the state under the save key, stamping `saved_at`.
    pub fn save(&mut self, state: &SerializedState) -> Result<(), SaveError> {
        let mut state = state.clone();
        state.saved_at = chrono::Utc::now().timestamp();
        let payload = serde_json::to_string(&state)?;
        let envelope = SaveEnvelope {
            version: SAVE_VERSION,
            checksum: checksum(&payload),
            payload,
        };
        self.store
            .set(SAVE_KEY, &serde_json::to_string(&envelope)?)?;
        log::debug!("Saved {}", state.hero.name);
        Ok(())
    }

    /// Loads the saved state, `Ok(None)` when nothing is saved.
    ///
    /// Returns an error if:
    /// - The store cannot be read
    /// - The envelope or payload is not valid JSON
    /// - The version is not one this build writes
    /// - The checksum does not match the payload
    pub fn load(&self) -> Result<Option<SerializedState>, SaveError> {
        let Some(raw) = self.store.get(SAVE_KEY)? else {
            return Ok(None);
        };
        let envelope: SaveEnvelope = serde_json::from_str(&raw)?;
        if envelope.version != SAVE_VERSION {
            return Err(SaveError::UnsupportedVersion(envelope.version));
        }
        if envelope.checksum != checksum(&envelope.payload) {
            return Err(SaveError::ChecksumMismatch);
        }
        Ok(Some(serde_json::from_str(&envelope.payload)?))
    }

    /// Like [`SaveManager::load`], but a broken save counts as no save.
    pub fn load_or_none(&self) -> Option<SerializedState> {
        match self.load() {
            Ok(state) => state,
            Err(e) => {
                log::warn!("Ignoring unreadable save: {}", e);
                None
            }
        }
    }

    pub fn delete(&mut self) -> Result<(), SaveError> {
        self.store.delete(SAVE_KEY)?;
        Ok(())
    }

    pub fn save_exists(&self) -> bool {
        matches!(self.store.get(SAVE_KEY), Ok(Some(_)))
    }
}

//! Quest tracking: templates, progress events and the active quest log.

pub mod data;
pub mod types;

pub use data::{all_quests, get_quest, INITIAL_QUESTS};
pub use types::{
    GoalTarget, GoalType, ProgressEvent, QuestInstance, QuestLog, QuestReward, QuestTemplate,
    SavedQuest,
};

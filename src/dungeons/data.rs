//! Dungeon definitions.

/// Static description of a dungeon. `id` doubles as the display name.
#[derive(Debug, Clone, PartialEq)]
pub struct DungeonDef {
    pub id: &'static str,
    /// Base enemy level; also the hero-level tier the dungeon is meant for.
    pub level: u32,
    pub enemies: &'static [&'static str],
    pub floors: u32,
    /// Inclusive range of battles rolled for each floor.
    pub battles_per_floor: (u32, u32),
    pub boss: &'static str,
    pub boss_level: u32,
    pub relic: Option<&'static str>,
    /// Locked at the start of a new game.
    pub locked: bool,
    pub unlocks: Option<&'static str>,
    /// Unique item id the boss may drop.
    pub boss_item_drop: Option<&'static str>,
}

const DUNGEONS: [DungeonDef; 5] = [
    DungeonDef {
        id: "Cave of Slimes",
        level: 1,
        enemies: &["Slime", "Poison Slime", "Slimeling"],
        floors: 10,
        battles_per_floor: (3, 5),
        boss: "Slime King",
        boss_level: 10,
        relic: Some("Corroded Core"),
        locked: false,
        unlocks: Some("Crypt of Bones"),
        boss_item_drop: Some("goblin_crown"),
    },
    DungeonDef {
        id: "Crypt of Bones",
        level: 10,
        enemies: &["Skeleton", "Zombie", "Bone Archer"],
        floors: 10,
        battles_per_floor: (3, 5),
        boss: "Bone Warden",
        boss_level: 20,
        relic: Some("Shattered Phylactery"),
        locked: true,
        unlocks: Some("Inferno Keep"),
        boss_item_drop: Some("beast_hide_armor"),
    },
    DungeonDef {
        id: "Inferno Keep",
        level: 20,
        enemies: &["Fire Imp", "Lava Golem", "Smoke Hound"],
        floors: 10,
        battles_per_floor: (3, 5),
        boss: "Flame Tyrant",
        boss_level: 30,
        relic: Some("Emberheart"),
        locked: true,
        unlocks: Some("Frost Hollow"),
        boss_item_drop: None,
    },
    DungeonDef {
        id: "Frost Hollow",
        level: 30,
        enemies: &["Ice Wolf", "Frost Golem", "Snow Wisp"],
        floors: 10,
        battles_per_floor: (3, 5),
        boss: "Glacier Lord",
        boss_level: 40,
        relic: Some("Crystalized Mantle"),
        locked: true,
        unlocks: Some("Abyss"),
        boss_item_drop: None,
    },
    DungeonDef {
        id: "Abyss",
        level: 40,
        enemies: &["Voidling", "Abyssal Horror", "Chaos Wisp"],
        floors: 10,
        battles_per_floor: (3, 5),
        boss: "Void Emperor",
        boss_level: 50,
        relic: Some("Shard of Anomaly"),
        locked: true,
        unlocks: None,
        boss_item_drop: None,
    },
];

pub fn all_dungeons() -> &'static [DungeonDef] {
    &DUNGEONS
}

pub fn get_dungeon(id: &str) -> Option<&'static DungeonDef> {
    DUNGEONS.iter().find(|d| d.id == id)
}

/// The dungeon a new game starts in.
pub fn starting_dungeon() -> &'static DungeonDef {
    &DUNGEONS[0]
}

//! Item id → display name resolution.
//!
//! OpenDota reports inventory slots as numeric ids. Resolution goes through
//! two tables, mirroring the upstream constants: id → internal key, then
//! key → display name. Recipes have a key but no display name.

use std::collections::HashMap;
use std::sync::LazyLock;

/// Item id → internal key.
const ITEM_IDS: &[(u32, &str)] = &[
    (1, "blink"),
    (2, "blades_of_attack"),
    (3, "broadsword"),
    (4, "chainmail"),
    (5, "claymore"),
    (6, "helm_of_iron_will"),
    (7, "javelin"),
    (8, "mithril_hammer"),
    (9, "platemail"),
    (10, "quarterstaff"),
    (11, "quelling_blade"),
    (12, "ring_of_protection"),
    (13, "gauntlets"),
    (14, "slippers"),
    (15, "mantle"),
    (16, "branches"),
    (17, "belt_of_strength"),
    (18, "boots_of_elves"),
    (19, "robe"),
    (20, "circlet"),
    (21, "ogre_axe"),
    (22, "blade_of_alacrity"),
    (23, "staff_of_wizardry"),
    (24, "ultimate_orb"),
    (25, "gloves"),
    (26, "lifesteal"),
    (27, "ring_of_regen"),
    (28, "sobi_mask"),
    (29, "boots"),
    (30, "gem"),
    (31, "cloak"),
    (32, "talisman_of_evasion"),
    (33, "cheese"),
    (34, "magic_stick"),
    (35, "recipe_magic_wand"),
    (36, "magic_wand"),
    (37, "ghost"),
    (38, "clarity"),
    (39, "flask"),
    (40, "dust"),
    (41, "bottle"),
    (42, "ward_observer"),
    (43, "ward_sentry"),
    (44, "tango"),
    (46, "tpscroll"),
    (48, "travel_boots"),
    (50, "phase_boots"),
    (51, "demon_edge"),
    (52, "eagle"),
    (53, "reaver"),
    (54, "relic"),
    (55, "hyperstone"),
    (56, "ring_of_health"),
    (57, "void_stone"),
    (58, "mystic_staff"),
    (59, "energy_booster"),
    (60, "point_booster"),
    (61, "vitality_booster"),
    (63, "power_treads"),
    (65, "hand_of_midas"),
    (67, "oblivion_staff"),
    (69, "pers"),
    (73, "bracer"),
    (75, "wraith_band"),
    (77, "null_talisman"),
    (79, "mekansm"),
    (81, "vladmir"),
    (86, "buckler"),
    (88, "ring_of_basilius"),
    (90, "pipe"),
    (92, "urn_of_shadows"),
    (94, "headdress"),
    (96, "sheepstick"),
    (98, "orchid"),
    (100, "cyclone"),
    (102, "force_staff"),
    (104, "dagon"),
    (106, "necronomicon"),
    (108, "ultimate_scepter"),
    (110, "refresher"),
    (112, "assault"),
    (114, "heart"),
    (116, "black_king_bar"),
    (117, "aegis"),
    (119, "shivas_guard"),
    (121, "bloodstone"),
    (123, "sphere"),
    (125, "vanguard"),
    (127, "blade_mail"),
    (129, "soul_booster"),
    (133, "rapier"),
    (135, "monkey_king_bar"),
    (137, "radiance"),
    (139, "butterfly"),
    (141, "greater_crit"),
    (143, "basher"),
    (145, "bfury"),
    (147, "manta"),
    (149, "lesser_crit"),
    (151, "armlet"),
    (152, "invis_sword"),
    (154, "sange_and_yasha"),
    (156, "satanic"),
    (158, "mjollnir"),
    (160, "skadi"),
    (162, "sange"),
    (164, "helm_of_the_dominator"),
    (166, "maelstrom"),
    (168, "desolator"),
    (170, "yasha"),
    (172, "mask_of_madness"),
    (174, "diffusal_blade"),
    (176, "ethereal_blade"),
    (178, "soul_ring"),
    (180, "arcane_boots"),
    (185, "ancient_janggo"),
    (187, "medallion_of_courage"),
    (188, "smoke_of_deceit"),
    (190, "veil_of_discord"),
    (206, "rod_of_atos"),
    (208, "abyssal_blade"),
    (210, "heavens_halberd"),
    (214, "tranquil_boots"),
    (215, "shadow_amulet"),
    (226, "lotus_orb"),
    (229, "solar_crest"),
    (231, "guardian_greaves"),
    (232, "aether_lens"),
    (235, "octarine_core"),
    (236, "dragon_lance"),
    (237, "faerie_fire"),
    (240, "blight_stone"),
    (242, "crimson_guard"),
    (244, "wind_lace"),
    (247, "moon_shard"),
    (249, "silver_edge"),
    (250, "bloodthorn"),
    (252, "echo_sabre"),
    (254, "glimmer_cape"),
    (256, "aeon_disk"),
    (259, "kaya"),
    (263, "hurricane_pike"),
    (265, "infused_raindrop"),
    (267, "spirit_vessel"),
    (269, "holy_locket"),
    (271, "ultimate_scepter_2"),
    (273, "kaya_and_sange"),
    (277, "yasha_and_kaya"),
    (288, "meteor_hammer"),
    (290, "nullifier"),
];

/// Internal key → display name.
const ITEM_NAMES: &[(&str, &str)] = &[
    ("blink", "Blink Dagger"),
    ("blades_of_attack", "Blades of Attack"),
    ("broadsword", "Broadsword"),
    ("chainmail", "Chainmail"),
    ("claymore", "Claymore"),
    ("helm_of_iron_will", "Helm of Iron Will"),
    ("javelin", "Javelin"),
    ("mithril_hammer", "Mithril Hammer"),
    ("platemail", "Platemail"),
    ("quarterstaff", "Quarterstaff"),
    ("quelling_blade", "Quelling Blade"),
    ("ring_of_protection", "Ring of Protection"),
    ("gauntlets", "Gauntlets of Strength"),
    ("slippers", "Slippers of Agility"),
    ("mantle", "Mantle of Intelligence"),
    ("branches", "Iron Branch"),
    ("belt_of_strength", "Belt of Strength"),
    ("boots_of_elves", "Band of Elvenskin"),
    ("robe", "Robe of the Magi"),
    ("circlet", "Circlet"),
    ("ogre_axe", "Ogre Axe"),
    ("blade_of_alacrity", "Blade of Alacrity"),
    ("staff_of_wizardry", "Staff of Wizardry"),
    ("ultimate_orb", "Ultimate Orb"),
    ("gloves", "Gloves of Haste"),
    ("lifesteal", "Morbid Mask"),
    ("ring_of_regen", "Ring of Regen"),
    ("sobi_mask", "Sage's Mask"),
    ("boots", "Boots of Speed"),
    ("gem", "Gem of True Sight"),
    ("cloak", "Cloak"),
    ("talisman_of_evasion", "Talisman of Evasion"),
    ("cheese", "Cheese"),
    ("magic_stick", "Magic Stick"),
    ("magic_wand", "Magic Wand"),
    ("ghost", "Ghost Scepter"),
    ("clarity", "Clarity"),
    ("flask", "Healing Salve"),
    ("dust", "Dust of Appearance"),
    ("bottle", "Bottle"),
    ("ward_observer", "Observer Ward"),
    ("ward_sentry", "Sentry Ward"),
    ("tango", "Tango"),
    ("tpscroll", "Town Portal Scroll"),
    ("travel_boots", "Boots of Travel"),
    ("phase_boots", "Phase Boots"),
    ("demon_edge", "Demon Edge"),
    ("eagle", "Eaglesong"),
    ("reaver", "Reaver"),
    ("relic", "Sacred Relic"),
    ("hyperstone", "Hyperstone"),
    ("ring_of_health", "Ring of Health"),
    ("void_stone", "Void Stone"),
    ("mystic_staff", "Mystic Staff"),
    ("energy_booster", "Energy Booster"),
    ("point_booster", "Point Booster"),
    ("vitality_booster", "Vitality Booster"),
    ("power_treads", "Power Treads"),
    ("hand_of_midas", "Hand of Midas"),
    ("oblivion_staff", "Oblivion Staff"),
    ("pers", "Perseverance"),
    ("bracer", "Bracer"),
    ("wraith_band", "Wraith Band"),
    ("null_talisman", "Null Talisman"),
    ("mekansm", "Mekansm"),
    ("vladmir", "Vladmir's Offering"),
    ("buckler", "Buckler"),
    ("ring_of_basilius", "Ring of Basilius"),
    ("pipe", "Pipe of Insight"),
    ("urn_of_shadows", "Urn of Shadows"),
    ("headdress", "Headdress"),
    ("sheepstick", "Scythe of Vyse"),
    ("orchid", "Orchid Malevolence"),
    ("cyclone", "Eul's Scepter of Divinity"),
    ("force_staff", "Force Staff"),
    ("dagon", "Dagon"),
    ("necronomicon", "Necronomicon"),
    ("ultimate_scepter", "Aghanim's Scepter"),
    ("refresher", "Refresher Orb"),
    ("assault", "Assault Cuirass"),
    ("heart", "Heart of Tarrasque"),
    ("black_king_bar", "Black King Bar"),
    ("aegis", "Aegis of the Immortal"),
    ("shivas_guard", "Shiva's Guard"),
    ("bloodstone", "Bloodstone"),
    ("sphere", "Linken's Sphere"),
    ("vanguard", "Vanguard"),
    ("blade_mail", "Blade Mail"),
    ("soul_booster", "Soul Booster"),
    ("rapier", "Divine Rapier"),
    ("monkey_king_bar", "Monkey King Bar"),
    ("radiance", "Radiance"),
    ("butterfly", "Butterfly"),
    ("greater_crit", "Daedalus"),
    ("basher", "Skull Basher"),
    ("bfury", "Battle Fury"),
    ("manta", "Manta Style"),
    ("lesser_crit", "Crystalys"),
    ("armlet", "Armlet of Mordiggian"),
    ("invis_sword", "Shadow Blade"),
    ("sange_and_yasha", "Sange and Yasha"),
    ("satanic", "Satanic"),
    ("mjollnir", "Mjollnir"),
    ("skadi", "Eye of Skadi"),
    ("sange", "Sange"),
    ("helm_of_the_dominator", "Helm of the Dominator"),
    ("maelstrom", "Maelstrom"),
    ("desolator", "Desolator"),
    ("yasha", "Yasha"),
    ("mask_of_madness", "Mask of Madness"),
    ("diffusal_blade", "Diffusal Blade"),
    ("ethereal_blade", "Ethereal Blade"),
    ("soul_ring", "Soul Ring"),
    ("arcane_boots", "Arcane Boots"),
    ("ancient_janggo", "Drum of Endurance"),
    ("medallion_of_courage", "Medallion of Courage"),
    ("smoke_of_deceit", "Smoke of Deceit"),
    ("veil_of_discord", "Veil of Discord"),
    ("rod_of_atos", "Rod of Atos"),
    ("abyssal_blade", "Abyssal Blade"),
    ("heavens_halberd", "Heaven's Halberd"),
    ("tranquil_boots", "Tranquil Boots"),
    ("shadow_amulet", "Shadow Amulet"),
    ("lotus_orb", "Lotus Orb"),
    ("solar_crest", "Solar Crest"),
    ("guardian_greaves", "Guardian Greaves"),
    ("aether_lens", "Aether Lens"),
    ("octarine_core", "Octarine Core"),
    ("dragon_lance", "Dragon Lance"),
    ("faerie_fire", "Faerie Fire"),
    ("blight_stone", "Blight Stone"),
    ("crimson_guard", "Crimson Guard"),
    ("wind_lace", "Wind Lace"),
    ("moon_shard", "Moon Shard"),
    ("silver_edge", "Silver Edge"),
    ("bloodthorn", "Bloodthorn"),
    ("echo_sabre", "Echo Sabre"),
    ("glimmer_cape", "Glimmer Cape"),
    ("aeon_disk", "Aeon Disk"),
    ("kaya", "Kaya"),
    ("hurricane_pike", "Hurricane Pike"),
    ("infused_raindrop", "Infused Raindrop"),
    ("spirit_vessel", "Spirit Vessel"),
    ("holy_locket", "Holy Locket"),
    ("ultimate_scepter_2", "Aghanim's Blessing"),
    ("kaya_and_sange", "Kaya and Sange"),
    ("yasha_and_kaya", "Yasha and Kaya"),
    ("meteor_hammer", "Meteor Hammer"),
    ("nullifier", "Nullifier"),
];

static BUILTIN: LazyLock<ItemCatalog> =
    LazyLock::new(|| ItemCatalog::from_tables(ITEM_IDS, ITEM_NAMES));

/// Two-step item lookup table.
#[derive(Debug, Clone, Default)]
pub struct ItemCatalog {
    keys: HashMap<u32, String>,
    names: HashMap<String, String>,
}

impl ItemCatalog {
    /// The catalog compiled into courier.
    pub fn builtin() -> &'static ItemCatalog {
        &BUILTIN
    }

    pub fn from_tables(ids: &[(u32, &str)], names: &[(&str, &str)]) -> Self {
        Self {
            keys: ids.iter().map(|(id, key)| (*id, key.to_string())).collect(),
            names: names
                .iter()
                .map(|(key, name)| (key.to_string(), name.to_string()))
                .collect(),
        }
    }

    /// Display name for an inventory slot.
    ///
    /// Empty slots (`None` or `0`) resolve to `None`. Ids without a display
    /// name render as `Unknown Item <id>`.
    pub fn resolve(&self, id: Option<u32>) -> Option<String> {
        let id = id.filter(|id| *id != 0)?;
        let name = self
            .keys
            .get(&id)
            .and_then(|key| self.names.get(key))
            .cloned()
            .unwrap_or_else(|| format!("Unknown Item {id}"));
        Some(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_builtin_name_has_an_id() {
        let keys: Vec<&str> = ITEM_IDS.iter().map(|(_, key)| *key).collect();
        for (key, _) in ITEM_NAMES {
            assert!(keys.contains(key), "{key} has a name but no id");
        }
    }

    #[test]
    fn recipe_without_display_name() {
        let catalog = ItemCatalog::builtin();
        assert_eq!(catalog.resolve(Some(36)).as_deref(), Some("Magic Wand"));
        assert_eq!(
            catalog.resolve(Some(35)).as_deref(),
            Some("Unknown Item 35")
        );
    }
}

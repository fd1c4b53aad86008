//! Lookup tables built from Data Dragon JSON.
//!
//! Match payloads reference champions, summoner spells, items and runes by
//! numeric ID; Data Dragon publishes them keyed by name or as nested trees.
//! The adapters here re-key them by the IDs the match data uses.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetImage {
    pub full: String,
}

/// Entry of `champion.json`. `key` is the numeric champion ID as a string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Champion {
    pub id: String,
    pub key: String,
    pub name: String,
    #[serde(default)]
    pub title: String,
    pub image: AssetImage,
}

/// Entry of `summoner.json`. `key` is the numeric spell ID as a string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummonerSpell {
    pub id: String,
    pub key: String,
    pub name: String,
    pub image: AssetImage,
}

/// Entry of `item.json`; the numeric ID is the map key, not a field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub name: String,
    #[serde(default)]
    pub plaintext: String,
    pub image: AssetImage,
}

/// A rune, or a rune tree (style) flattened into the same table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rune {
    pub id: u32,
    pub key: String,
    pub name: String,
    pub icon: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RuneTree {
    pub id: u32,
    pub key: String,
    pub name: String,
    pub icon: String,
    #[serde(default)]
    pub slots: Vec<RuneSlot>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RuneSlot {
    #[serde(default)]
    pub runes: Vec<Rune>,
}

/// The `{ "data": { ... } }` envelope shared by champion, item and summoner JSON.
#[derive(Debug, Clone, Deserialize)]
pub struct DataFile<T> {
    pub data: HashMap<String, T>,
}

// == Adapters ==

/// Champion table keyed by numeric champion ID. Entries with a non-numeric key are skipped.
pub fn champions_by_key(file: DataFile<Champion>) -> HashMap<u32, Champion> {
    file.data
        .into_values()
        .filter_map(|champion| champion.key.parse().ok().map(|key| (key, champion)))
        .collect()
}

/// Summoner spell table keyed by numeric spell ID.
pub fn spells_by_key(file: DataFile<SummonerSpell>) -> HashMap<u32, SummonerSpell> {
    file.data
        .into_values()
        .filter_map(|spell| spell.key.parse().ok().map(|key| (key, spell)))
        .collect()
}

pub fn items_by_id(file: DataFile<Item>) -> HashMap<u32, Item> {
    file.data
        .into_iter()
        .filter_map(|(id, item)| id.parse().ok().map(|id| (id, item)))
        .collect()
}

/// Rune table keyed by perk ID, including the tree styles themselves so that
/// `perks.styles[].style` resolves too.
pub fn runes_by_id(trees: Vec<RuneTree>) -> HashMap<u32, Rune> {
    let mut table = HashMap::new();
    for tree in trees {
        for rune in tree.slots.into_iter().flat_map(|slot| slot.runes) {
            table.insert(rune.id, rune);
        }
        table.insert(
            tree.id,
            Rune {
                id: tree.id,
                key: tree.key,
                name: tree.name,
                icon: tree.icon,
            },
        );
    }
    table
}

// == Static Data ==
/// Every lookup table for one Data Dragon version.
#[derive(Debug, Clone, Default)]
pub struct StaticData {
    pub version: String,
    pub champions: HashMap<u32, Champion>,
    pub items: HashMap<u32, Item>,
    pub spells: HashMap<u32, SummonerSpell>,
    pub runes: HashMap<u32, Rune>,
}

impl StaticData {
    pub fn champion(&self, champion_key: u32) -> Option<&Champion> {
        self.champions.get(&champion_key)
    }

    pub fn spell(&self, spell_key: u32) -> Option<&SummonerSpell> {
        self.spells.get(&spell_key)
    }

    pub fn item(&self, item_id: u32) -> Option<&Item> {
        self.items.get(&item_id)
    }

    pub fn rune(&self, perk_id: u32) -> Option<&Rune> {
        self.runes.get(&perk_id)
    }

    /// Icon URL for a summoner spell referenced by its numeric key.
    pub fn spell_icon(&self, spell_key: u32) -> Option<String> {
        self.spell(spell_key)
            .map(|spell| super::spell_icon_url(&self.version, &spell.id))
    }

    /// Icon URL for a rune or rune tree referenced by perk ID.
    pub fn rune_icon(&self, perk_id: u32) -> Option<String> {
        self.rune(perk_id).map(|rune| super::rune_icon_url(&rune.icon))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn champion_file() -> DataFile<Champion> {
        serde_json::from_value(json!({
            "type": "champion",
            "data": {
                "Ahri": {"id": "Ahri", "key": "103", "name": "Ahri", "title": "the Nine-Tailed Fox", "image": {"full": "Ahri.png"}},
                "Aatrox": {"id": "Aatrox", "key": "266", "name": "Aatrox", "title": "the Darkin Blade", "image": {"full": "Aatrox.png"}},
                "Broken": {"id": "Broken", "key": "n/a", "name": "Broken", "image": {"full": "Broken.png"}}
            }
        }))
        .unwrap()
    }

    #[test]
    fn test_champions_by_key() {
        let table = champions_by_key(champion_file());

        assert_eq!(table.len(), 2);
        assert_eq!(table[&103].id, "Ahri");
        assert_eq!(table[&266].name, "Aatrox");
    }

    #[test]
    fn test_spells_by_key() {
        let file: DataFile<SummonerSpell> = serde_json::from_value(json!({
            "data": {
                "SummonerFlash": {"id": "SummonerFlash", "key": "4", "name": "Flash", "image": {"full": "SummonerFlash.png"}},
                "SummonerDot": {"id": "SummonerDot", "key": "14", "name": "Ignite", "image": {"full": "SummonerDot.png"}}
            }
        }))
        .unwrap();

        let table = spells_by_key(file);
        assert_eq!(table[&4].name, "Flash");
        assert_eq!(table[&14].id, "SummonerDot");
    }

    #[test]
    fn test_items_by_id() {
        let file: DataFile<Item> = serde_json::from_value(json!({
            "data": {"3089": {"name": "Rabadon's Deathcap", "image": {"full": "3089.png"}}}
        }))
        .unwrap();

        let table = items_by_id(file);
        assert_eq!(table[&3089].name, "Rabadon's Deathcap");
        assert_eq!(table[&3089].plaintext, "");
    }

    #[test]
    fn test_runes_by_id_flattens_trees() {
        let trees: Vec<RuneTree> = serde_json::from_value(json!([
            {
                "id": 8100, "key": "Domination", "name": "Domination",
                "icon": "perk-images/Styles/7200_Domination.png",
                "slots": [
                    {"runes": [
                        {"id": 8112, "key": "Electrocute", "name": "Electrocute", "icon": "perk-images/Styles/Domination/Electrocute/Electrocute.png"},
                        {"id": 8128, "key": "DarkHarvest", "name": "Dark Harvest", "icon": "perk-images/Styles/Domination/DarkHarvest/DarkHarvest.png"}
                    ]},
                    {"runes": [
                        {"id": 8126, "key": "CheapShot", "name": "Cheap Shot", "icon": "perk-images/Styles/Domination/CheapShot/CheapShot.png"}
                    ]}
                ]
            }
        ]))
        .unwrap();

        let table = runes_by_id(trees);
        assert_eq!(table.len(), 4);
        assert_eq!(table[&8112].name, "Electrocute");
        assert_eq!(table[&8100].key, "Domination");
    }

    #[test]
    fn test_static_data_icon_helpers() {
        let mut data = StaticData {
            version: "14.3.1".to_string(),
            ..Default::default()
        };
        data.spells.insert(
            4,
            SummonerSpell {
                id: "SummonerFlash".into(),
                key: "4".into(),
                name: "Flash".into(),
                image: AssetImage { full: "SummonerFlash.png".into() },
            },
        );

        assert!(data.spell_icon(4).unwrap().ends_with("/14.3.1/img/spell/SummonerFlash.png"));
        assert_eq!(data.spell_icon(12), None);
        assert_eq!(data.rune_icon(8112), None);
    }
}

//! Data Dragon Module
//!
//! Riot's static CDN: asset URL builders, lookup tables keyed the way match
//! data references them, and a cached client for the versioned JSON.

mod assets;
mod client;
mod lookup;

pub use assets::{
    champion_icon_url, champion_splash_url, item_icon_url, normalize_champion_id,
    profile_icon_url, rune_icon_url, spell_icon_url, DDRAGON_BASE,
};
pub use client::DataDragonClient;
pub use lookup::{
    champions_by_key, items_by_id, runes_by_id, spells_by_key, AssetImage, Champion, DataFile,
    Item, Rune, RuneSlot, RuneTree, StaticData, SummonerSpell,
};

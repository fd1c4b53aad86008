//! Data Dragon asset URLs.
//!
//! Pure functions from a Data Dragon version string and an asset identifier
//! to a CDN URL.

pub const DDRAGON_BASE: &str = "https://ddragon.leagueoflegends.com";

/// Match data spells a few champion IDs differently from Data Dragon's file names.
pub fn normalize_champion_id(champion_id: &str) -> &str {
    match champion_id {
        "FiddleSticks" => "Fiddlesticks",
        other => other,
    }
}

/// Square champion portrait, e.g. `.../cdn/14.3.1/img/champion/Ahri.png`.
pub fn champion_icon_url(version: &str, champion_id: &str) -> String {
    format!(
        "{}/cdn/{}/img/champion/{}.png",
        DDRAGON_BASE,
        version,
        normalize_champion_id(champion_id)
    )
}

/// Full splash art. Splash images are not versioned.
pub fn champion_splash_url(champion_id: &str, skin: u32) -> String {
    format!(
        "{}/cdn/img/champion/splash/{}_{}.jpg",
        DDRAGON_BASE,
        normalize_champion_id(champion_id),
        skin
    )
}

/// Item icon; item 0 is an empty inventory slot and has no icon.
pub fn item_icon_url(version: &str, item_id: u32) -> Option<String> {
    if item_id == 0 {
        return None;
    }
    Some(format!("{}/cdn/{}/img/item/{}.png", DDRAGON_BASE, version, item_id))
}

/// Summoner spell icon from the spell's image name (`SummonerFlash`).
pub fn spell_icon_url(version: &str, spell_image_id: &str) -> String {
    format!(
        "{}/cdn/{}/img/spell/{}.png",
        DDRAGON_BASE, version, spell_image_id
    )
}

/// Rune or rune-tree icon from the `icon` path in runesReforged.json.
pub fn rune_icon_url(icon_path: &str) -> String {
    format!(
        "{}/cdn/img/{}",
        DDRAGON_BASE,
        icon_path.trim_start_matches('/')
    )
}

pub fn profile_icon_url(version: &str, icon_id: u32) -> String {
    format!(
        "{}/cdn/{}/img/profileicon/{}.png",
        DDRAGON_BASE, version, icon_id
    )
}

//! Data Dragon client.
//!
//! Fetches versioned static JSON and caches the parsed tables per version.

use std::sync::Arc;

use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use super::lookup::{
    champions_by_key, items_by_id, runes_by_id, spells_by_key, Champion, DataFile, Item,
    RuneTree, StaticData, SummonerSpell,
};
use super::DDRAGON_BASE;
use crate::cache::ClientCaches;
use crate::error::UpstreamError;

const LOCALE: &str = "en_US";

#[derive(Clone)]
pub struct DataDragonClient {
    http: Client,
    base_url: String,
    caches: Arc<ClientCaches>,
}

impl DataDragonClient {
    pub fn new(http: Client, caches: Arc<ClientCaches>) -> Self {
        Self::with_base_url(http, caches, DDRAGON_BASE)
    }

    pub fn with_base_url(http: Client, caches: Arc<ClientCaches>, base_url: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            caches,
        }
    }

    /// Newest published version, or `None` if Data Dragon is unreachable.
    pub async fn latest_version(&self) -> Option<String> {
        let url = format!("{}/api/versions.json", self.base_url);
        match self.get_json::<Vec<String>>(&url).await {
            Ok(versions) => versions.into_iter().next(),
            Err(err) => {
                warn!(error = %err, "failed to load Data Dragon versions");
                None
            }
        }
    }

    /// Lookup tables for `version`, served from cache when possible.
    pub async fn static_data(&self, version: &str) -> Option<Arc<StaticData>> {
        if let Some(cached) = self.caches.cached_static_data(version) {
            debug!(version, "static data cache hit");
            return Some(cached);
        }

        match self.load(version).await {
            Ok(data) => {
                let data = Arc::new(data);
                self.caches.store_static_data(version, data.clone());
                Some(data)
            }
            Err(err) => {
                warn!(version, error = %err, "failed to load Data Dragon static data");
                None
            }
        }
    }

    async fn load(&self, version: &str) -> Result<StaticData, UpstreamError> {
        let data_url = |file: &str| format!("{}/cdn/{}/data/{}/{}", self.base_url, version, LOCALE, file);

        let champion_url = data_url("champion.json");
        let item_url = data_url("item.json");
        let spell_url = data_url("summoner.json");
        let rune_url = data_url("runesReforged.json");

        let (champions, items, spells, runes) = tokio::try_join!(
            self.get_json::<DataFile<Champion>>(&champion_url),
            self.get_json::<DataFile<Item>>(&item_url),
            self.get_json::<DataFile<SummonerSpell>>(&spell_url),
            self.get_json::<Vec<RuneTree>>(&rune_url),
        )?;

        Ok(StaticData {
            version: version.to_string(),
            champions: champions_by_key(champions),
            items: items_by_id(items),
            spells: spells_by_key(spells),
            runes: runes_by_id(runes),
        })
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, UpstreamError> {
        let response = self.http.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(UpstreamError::Status {
                status: status.as_u16(),
                body,
            });
        }
        response
            .json::<T>()
            .await
            .map_err(|e| UpstreamError::Decode(e.to_string()))
    }
}

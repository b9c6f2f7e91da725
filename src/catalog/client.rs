use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use super::wire::{RawPokemon, RawSpecies};
use super::{Descriptor, Entity, EntitySource};
use crate::error::{Error, Result};

/// HTTP client for the PokeAPI REST endpoints.
#[derive(Debug, Clone)]
pub struct PokeApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl PokeApiClient {
    pub fn new(base_url: &str) -> Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("dex-explorer/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn entity_url(&self, id: u32) -> String {
        format!("{}/pokemon/{}", self.base_url, id)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        let response = self.http.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(Error::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }
        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }

    /// Fetch the entity, then the species resource it links to.
    pub async fn try_fetch_entity(&self, id: u32) -> Result<Entity> {
        let raw: RawPokemon = self.get_json(&self.entity_url(id)).await?;
        let species_url = raw.species.url.clone();
        let species: RawSpecies = self.get_json(&species_url).await?;
        debug!(id, name = %raw.name, "fetched entity");
        Ok(raw.into_entity(Some(Descriptor::from(species))))
    }
}

impl EntitySource for PokeApiClient {
    async fn fetch_entity(&self, id: u32) -> Option<Entity> {
        match self.try_fetch_entity(id).await {
            Ok(entity) => Some(entity),
            Err(e) => {
                warn!(id, error = %e, "failed to fetch entity");
                None
            }
        }
    }
}

use std::sync::Arc;

use crate::cache::RecordCache;
use crate::config::ResolvedConfig;
use crate::domain::PokemonKey;
use crate::enrich::{EnrichmentOptions, enrich_record};
use crate::error::FetchError;
use crate::gateway::{Gateway, JsonTransport};
use crate::model::{EnrichedPokemon, PokemonRecord, SpeciesRecord};

pub struct Resolver<T: JsonTransport> {
    pub(crate) gateway: Gateway<T>,
    base_url: String,
    enrichment: EnrichmentOptions,
    pub(crate) evolution_concurrency: usize,
    pokemon_cache: RecordCache<EnrichedPokemon>,
    species_cache: RecordCache<SpeciesRecord>,
}

impl<T: JsonTransport> Resolver<T> {
    pub fn new(transport: T, config: &ResolvedConfig) -> Self {
        Self {
            gateway: Gateway::new(transport, config.timeout),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            enrichment: config.enrichment.clone(),
            evolution_concurrency: config.evolution_concurrency,
            pokemon_cache: RecordCache::new("pokemon"),
            species_cache: RecordCache::new("species"),
        }
    }

    pub fn pokemon_url(&self, key: &PokemonKey) -> String {
        format!("{}/pokemon/{key}", self.base_url)
    }

    pub fn species_url(&self, key: &PokemonKey) -> String {
        format!("{}/pokemon-species/{key}", self.base_url)
    }

    pub fn pokemon_cache(&self) -> &RecordCache<EnrichedPokemon> {
        &self.pokemon_cache
    }

    pub fn species_cache(&self) -> &RecordCache<SpeciesRecord> {
        &self.species_cache
    }

    pub async fn pokemon(&self, key: &PokemonKey) -> Result<Arc<EnrichedPokemon>, FetchError> {
        self.pokemon_cache
            .get_or_fetch(key, || async move {
                let url = self.pokemon_url(key);
                let (record, species) = futures::try_join!(
                    self.gateway.fetch_json::<PokemonRecord>(&url),
                    self.species(key),
                )?;
                Ok::<_, FetchError>(enrich_record(record, &species, &self.enrichment))
            })
            .await
    }

    pub async fn species(&self, key: &PokemonKey) -> Result<Arc<SpeciesRecord>, FetchError> {
        self.species_cache
            .get_or_fetch(key, || async move {
                self.gateway
                    .fetch_json::<SpeciesRecord>(&self.species_url(key))
                    .await
            })
            .await
    }
}

use std::sync::Arc;

use crate::collection::{filter_and_sort, merge_into};
use crate::config::ResolvedConfig;
use crate::domain::{PokemonKey, SortKey};
use crate::error::FetchError;
use crate::gateway::JsonTransport;
use crate::model::EnrichedPokemon;
use crate::resolver::Resolver;
use crate::runner::map_with_concurrency;

pub const DEFAULT_RANGE_CONCURRENCY: usize = 6;

pub struct App<T: JsonTransport> {
    resolver: Resolver<T>,
    range_concurrency: usize,
    page_size: u32,
}

impl<T: JsonTransport> App<T> {
    pub fn new(transport: T, config: &ResolvedConfig) -> Self {
        Self {
            resolver: Resolver::new(transport, config),
            range_concurrency: config.range_concurrency,
            page_size: config.page_size,
        }
    }

    pub fn range_concurrency(&self) -> usize {
        self.range_concurrency
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    pub async fn enrich(&self, key: &PokemonKey) -> Result<Arc<EnrichedPokemon>, FetchError> {
        self.resolver.pokemon(key).await
    }

    pub async fn fetch_range(
        &self,
        start_id: u32,
        count: u32,
        concurrency: usize,
    ) -> Vec<Arc<EnrichedPokemon>> {
        let end = start_id.saturating_add(count);
        let ids: Vec<u32> = (start_id..end).filter(|id| *id > 0).collect();
        tracing::debug!(start_id, count, concurrency, "range.start");

        let results = map_with_concurrency(ids, concurrency, |id, _| async move {
            match self.resolver.pokemon(&PokemonKey::Id(id)).await {
                Ok(pokemon) => Some(pokemon),
                Err(err) => {
                    tracing::warn!(id, error = %err, "failed to load pokemon");
                    None
                }
            }
        })
        .await;

        let loaded: Vec<_> = results.into_iter().flatten().collect();
        tracing::debug!(start_id, loaded = loaded.len(), "range.done");
        loaded
    }

    pub async fn fetch_page(&self, start_id: u32, count: u32) -> Vec<Arc<EnrichedPokemon>> {
        self.fetch_range(start_id, count, self.range_concurrency)
            .await
    }

    pub async fn evolution_line(
        &self,
        root_id: u32,
    ) -> Result<Vec<Arc<EnrichedPokemon>>, FetchError> {
        self.resolver.evolution_line(root_id).await
    }
}

pub struct Pokedex<T: JsonTransport> {
    app: App<T>,
    collection: Vec<Arc<EnrichedPokemon>>,
    next_id: u32,
    query: String,
    sort_key: SortKey,
    selected: Option<usize>,
}

impl<T: JsonTransport> Pokedex<T> {
    pub fn new(app: App<T>) -> Self {
        Self {
            app,
            collection: Vec::new(),
            next_id: 1,
            query: String::new(),
            sort_key: SortKey::default(),
            selected: None,
        }
    }

    pub fn app(&self) -> &App<T> {
        &self.app
    }

    pub fn collection(&self) -> &[Arc<EnrichedPokemon>] {
        &self.collection
    }

    pub fn next_id(&self) -> u32 {
        self.next_id
    }

    pub async fn load_more(&mut self) -> usize {
        let page_size = self.app.page_size();
        let batch = self.app.fetch_page(self.next_id, page_size).await;
        self.next_id = self.next_id.saturating_add(page_size);
        merge_into(&mut self.collection, batch)
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn set_sort(&mut self, sort_key: SortKey) {
        self.sort_key = sort_key;
    }

    pub fn sort_key(&self) -> SortKey {
        self.sort_key
    }

    pub fn displayed(&self) -> Vec<Arc<EnrichedPokemon>> {
        filter_and_sort(&self.collection, &self.query, self.sort_key)
    }

    pub async fn open_by_id(&mut self, id: u32) -> Result<Arc<EnrichedPokemon>, FetchError> {
        if let Some(existing) = self.select(id) {
            return Ok(existing);
        }
        let pokemon = self.app.enrich(&PokemonKey::Id(id)).await?;
        merge_into(&mut self.collection, [Arc::clone(&pokemon)]);
        self.select(pokemon.id());
        Ok(pokemon)
    }

    pub fn select(&mut self, id: u32) -> Option<Arc<EnrichedPokemon>> {
        let index = self.collection.iter().position(|pokemon| pokemon.id() == id)?;
        self.selected = Some(index);
        Some(Arc::clone(&self.collection[index]))
    }

    pub fn selected(&self) -> Option<&Arc<EnrichedPokemon>> {
        self.selected.and_then(|index| self.collection.get(index))
    }

    pub fn close(&mut self) {
        self.selected = None;
    }

    pub fn can_prev(&self) -> bool {
        matches!(self.selected, Some(index) if index > 0)
    }

    pub fn can_next(&self) -> bool {
        matches!(self.selected, Some(index) if index + 1 < self.collection.len())
    }

    pub fn prev(&mut self) -> Option<Arc<EnrichedPokemon>> {
        if !self.can_prev() {
            return None;
        }
        let index = self.selected? - 1;
        self.selected = Some(index);
        Some(Arc::clone(&self.collection[index]))
    }

    pub fn next(&mut self) -> Option<Arc<EnrichedPokemon>> {
        if !self.can_next() {
            return None;
        }
        let index = self.selected? + 1;
        self.selected = Some(index);
        Some(Arc::clone(&self.collection[index]))
    }

    pub async fn evolution_of(&self, id: u32) -> Vec<Arc<EnrichedPokemon>> {
        match self.app.evolution_line(id).await {
            Ok(line) => line,
            Err(err) => {
                tracing::warn!(id, error = %err, "failed to load evolution line");
                Vec::new()
            }
        }
    }
}

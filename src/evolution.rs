use std::sync::Arc;

use crate::domain::PokemonKey;
use crate::error::FetchError;
use crate::gateway::JsonTransport;
use crate::model::{EnrichedPokemon, EvolutionChain, EvolutionNode};
use crate::resolver::Resolver;
use crate::runner::map_with_concurrency;

pub fn species_id_from_url(url: &str) -> Option<u32> {
    url.trim()
        .trim_end_matches('/')
        .rsplit('/')
        .next()
        .and_then(|segment| segment.parse::<u32>().ok())
        .filter(|id| *id > 0)
}

/// A node without a species url ends its branch; an unparseable url only
/// skips that node.
pub fn species_ids_preorder(root: &EvolutionNode) -> Vec<u32> {
    let mut ids = Vec::new();
    let mut stack = vec![root];
    while let Some(node) = stack.pop() {
        let Some(url) = node
            .species
            .as_ref()
            .map(|species| species.url.as_str())
            .filter(|url| !url.is_empty())
        else {
            continue;
        };
        if let Some(id) = species_id_from_url(url) {
            ids.push(id);
        }
        stack.extend(node.evolves_to.iter().rev());
    }
    ids
}

impl<T: JsonTransport> Resolver<T> {
    pub async fn evolution_line(
        &self,
        root_id: u32,
    ) -> Result<Vec<Arc<EnrichedPokemon>>, FetchError> {
        let species = self.species(&PokemonKey::Id(root_id)).await?;
        let Some(chain_url) = species.evolution_chain_url() else {
            tracing::debug!(root_id, "evolution.no_chain");
            return Ok(Vec::new());
        };

        let chain: EvolutionChain = self.gateway.fetch_json(chain_url).await?;
        let ids = chain
            .chain
            .as_ref()
            .map(species_ids_preorder)
            .unwrap_or_default();
        tracing::debug!(root_id, members = ids.len(), "evolution.chain");

        let members = map_with_concurrency(ids, self.evolution_concurrency, |id, _| async move {
            match self.pokemon(&PokemonKey::Id(id)).await {
                Ok(pokemon) => Some(pokemon),
                Err(err) => {
                    tracing::warn!(root_id, id, error = %err, "failed to load evolution member");
                    None
                }
            }
        })
        .await;

        Ok(members.into_iter().flatten().collect())
    }
}

use std::cmp::Ordering;
use std::collections::HashSet;
use std::sync::Arc;

use crate::domain::SortKey;
use crate::model::EnrichedPokemon;

pub const MIN_QUERY_LEN: usize = 3;
pub const MAX_SEARCH_RESULTS: usize = 10;

pub fn merge_into<I>(collection: &mut Vec<Arc<EnrichedPokemon>>, new_items: I) -> usize
where
    I: IntoIterator<Item = Arc<EnrichedPokemon>>,
{
    let mut seen: HashSet<u32> = collection.iter().map(|pokemon| pokemon.id()).collect();
    let before = collection.len();
    for pokemon in new_items {
        if seen.insert(pokemon.id()) {
            collection.push(pokemon);
        }
    }
    collection.len() - before
}

/// Matches are capped at the first ten in collection order, then sorted.
pub fn filter_and_sort(
    collection: &[Arc<EnrichedPokemon>],
    query: &str,
    sort_key: SortKey,
) -> Vec<Arc<EnrichedPokemon>> {
    let query = query.trim().to_lowercase();
    let mut selection: Vec<Arc<EnrichedPokemon>> = if query.chars().count() < MIN_QUERY_LEN {
        collection.to_vec()
    } else {
        collection
            .iter()
            .filter(|pokemon| pokemon.name().to_lowercase().contains(&query))
            .take(MAX_SEARCH_RESULTS)
            .cloned()
            .collect()
    };

    match sort_key {
        SortKey::Name => selection.sort_by(|a, b| compare_names(a.name(), b.name())),
        SortKey::Id => selection.sort_by_key(|pokemon| pokemon.id()),
    }
    selection
}

pub fn compare_names(a: &str, b: &str) -> Ordering {
    fold_name(a)
        .cmp(&fold_name(b))
        .then_with(|| a.to_lowercase().cmp(&b.to_lowercase()))
        .then_with(|| a.cmp(b))
}

fn fold_name(name: &str) -> String {
    name.to_lowercase()
        .chars()
        .flat_map(|ch| {
            let folded: &[char] = match ch {
                'à' | 'á' | 'â' | 'ã' | 'ä' | 'å' | 'ā' => &['a'],
                'æ' => &['a', 'e'],
                'ç' | 'ć' | 'č' => &['c'],
                'è' | 'é' | 'ê' | 'ë' | 'ē' => &['e'],
                'ì' | 'í' | 'î' | 'ï' | 'ī' => &['i'],
                'ñ' | 'ń' => &['n'],
                'ò' | 'ó' | 'ô' | 'õ' | 'ö' | 'ø' | 'ō' => &['o'],
                'œ' => &['o', 'e'],
                'ß' => &['s', 's'],
                'ù' | 'ú' | 'û' | 'ü' | 'ū' => &['u'],
                'ý' | 'ÿ' => &['y'],
                _ => return vec![ch],
            };
            folded.to_vec()
        })
        .collect()
}

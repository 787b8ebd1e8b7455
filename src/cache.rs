use std::borrow::Borrow;
use std::collections::HashMap;
use std::future::Future;
use std::hash::Hash;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::sync::OnceCell;

use crate::domain::PokemonKey;
use crate::model::{EnrichedPokemon, SpeciesRecord};

pub trait CacheIdentity {
    fn cache_id(&self) -> u32;
    fn cache_name(&self) -> &str;
}

impl CacheIdentity for EnrichedPokemon {
    fn cache_id(&self) -> u32 {
        self.id()
    }

    fn cache_name(&self) -> &str {
        self.name()
    }
}

impl CacheIdentity for SpeciesRecord {
    fn cache_id(&self) -> u32 {
        self.id
    }

    fn cache_name(&self) -> &str {
        &self.name
    }
}

type Slot<V> = Arc<OnceCell<Arc<V>>>;

/// Once a value resolves, its id, its name and the request key share one slot.
pub struct RecordCache<V> {
    kind: &'static str,
    by_id: Mutex<HashMap<u32, Slot<V>>>,
    by_name: Mutex<HashMap<String, Slot<V>>>,
}

impl<V: CacheIdentity> RecordCache<V> {
    pub fn new(kind: &'static str) -> Self {
        Self {
            kind,
            by_id: Mutex::new(HashMap::new()),
            by_name: Mutex::new(HashMap::new()),
        }
    }

    pub fn get(&self, key: &PokemonKey) -> Option<Arc<V>> {
        let slot = match key {
            PokemonKey::Id(id) => lock(&self.by_id).get(id).cloned(),
            PokemonKey::Name(name) => lock(&self.by_name).get(&name.to_lowercase()).cloned(),
        };
        slot.and_then(|slot| slot.get().cloned())
    }

    pub async fn get_or_fetch<F, Fut, E>(&self, key: &PokemonKey, fetcher: F) -> Result<Arc<V>, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<V, E>>,
    {
        let slot = self.slot_for(key);
        if let Some(value) = slot.get() {
            tracing::debug!(kind = self.kind, %key, "cache.hit");
            return Ok(Arc::clone(value));
        }

        let fetched = slot
            .get_or_try_init(|| async move {
                tracing::debug!(kind = self.kind, %key, "cache.miss");
                fetcher().await.map(Arc::new)
            })
            .await
            .map(Arc::clone);

        match fetched {
            Ok(value) => Ok(self.settle(key, &slot, value)),
            Err(err) => {
                self.forget(key, &slot);
                Err(err)
            }
        }
    }

    fn slot_for(&self, key: &PokemonKey) -> Slot<V> {
        match key {
            PokemonKey::Id(id) => Arc::clone(lock(&self.by_id).entry(*id).or_default()),
            PokemonKey::Name(name) => {
                Arc::clone(lock(&self.by_name).entry(name.to_lowercase()).or_default())
            }
        }
    }

    fn settle(&self, key: &PokemonKey, slot: &Slot<V>, value: Arc<V>) -> Arc<V> {
        let id = value.cache_id();
        let name = value.cache_name().to_lowercase();
        let mut by_id = lock(&self.by_id);
        let mut by_name = lock(&self.by_name);

        let winner = resolved(&*by_id, (id > 0).then_some(&id))
            .or_else(|| resolved(&*by_name, (!name.is_empty()).then_some(name.as_str())))
            .unwrap_or_else(|| Arc::clone(slot));

        if id > 0 {
            by_id.insert(id, Arc::clone(&winner));
        }
        if !name.is_empty() {
            by_name.insert(name, Arc::clone(&winner));
        }
        match key {
            PokemonKey::Id(id) => by_id.insert(*id, Arc::clone(&winner)),
            PokemonKey::Name(name) => by_name.insert(name.to_lowercase(), Arc::clone(&winner)),
        };

        if !Arc::ptr_eq(&winner, slot) {
            tracing::debug!(kind = self.kind, %key, "cache.settled_on_existing");
        }
        winner.get().cloned().unwrap_or(value)
    }

    fn forget(&self, key: &PokemonKey, slot: &Slot<V>) {
        match key {
            PokemonKey::Id(id) => remove_unresolved(&mut *lock(&self.by_id), id, slot),
            PokemonKey::Name(name) => {
                remove_unresolved(&mut *lock(&self.by_name), name.to_lowercase().as_str(), slot)
            }
        }
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

fn resolved<K, Q, V>(index: &HashMap<K, Slot<V>>, key: Option<&Q>) -> Option<Slot<V>>
where
    K: Eq + Hash + Borrow<Q>,
    Q: Eq + Hash + ?Sized,
{
    key.and_then(|key| index.get(key))
        .filter(|slot| slot.initialized())
        .cloned()
}

fn remove_unresolved<K, Q, V>(index: &mut HashMap<K, Slot<V>>, key: &Q, slot: &Slot<V>)
where
    K: Eq + Hash + Borrow<Q>,
    Q: Eq + Hash + ?Sized,
{
    let stale = index
        .get(key)
        .is_some_and(|existing| Arc::ptr_eq(existing, slot) && !existing.initialized());
    if stale {
        index.remove(key);
    }
}

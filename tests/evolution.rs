mod common;

use std::sync::Arc;
use std::time::Duration;

use serde_json::json;

use pokedex_pipeline::app::{App, Pokedex};
use pokedex_pipeline::domain::PokemonKey;
use pokedex_pipeline::error::FetchError;
use pokedex_pipeline::resolver::Resolver;

use common::{
    MockTransport, chain_node, chain_url, pokemon_json, pokemon_url, species_json, species_url,
    test_config,
};

fn add_with_chain(transport: &MockTransport, id: u32, name: &str, chain: u32) {
    transport.route(pokemon_url(id), pokemon_json(id, name));
    transport.route(
        species_url(id),
        species_json(id, name, Some(&chain_url(chain))),
    );
}

fn ids(line: &[Arc<pokedex_pipeline::model::EnrichedPokemon>]) -> Vec<u32> {
    line.iter().map(|pokemon| pokemon.id()).collect()
}

#[tokio::test(start_paused = true)]
async fn chain_is_flattened_in_preorder() {
    // 1 -> [2, 3], 2 -> [4]; later members answer first.
    let transport = Arc::new(MockTransport::new());
    for (id, name) in [(1, "a"), (2, "b"), (3, "c"), (4, "d")] {
        add_with_chain(&transport, id, name, 10);
        transport.delay(pokemon_url(id), Duration::from_millis(40 - u64::from(id) * 10));
    }
    transport.route(
        chain_url(10),
        json!({
            "id": 10,
            "chain": chain_node(1, vec![
                chain_node(2, vec![chain_node(4, vec![])]),
                chain_node(3, vec![]),
            ])
        }),
    );
    let resolver = Resolver::new(Arc::clone(&transport), &test_config());

    let line = resolver.evolution_line(1).await.unwrap();

    assert_eq!(ids(&line), vec![1, 2, 4, 3]);
}

#[tokio::test]
async fn species_without_chain_yields_empty_line() {
    let transport = Arc::new(MockTransport::new());
    transport.add_pokemon(132, "ditto");
    let resolver = Resolver::new(Arc::clone(&transport), &test_config());

    let line = resolver.evolution_line(132).await.unwrap();

    assert!(line.is_empty());
    assert_eq!(transport.calls(), vec![species_url(132)]);
}

#[tokio::test]
async fn failing_members_are_dropped() {
    let transport = Arc::new(MockTransport::new());
    add_with_chain(&transport, 133, "eevee", 67);
    add_with_chain(&transport, 134, "vaporeon", 67);
    add_with_chain(&transport, 136, "flareon", 67);
    // 135 is never routed, so it 404s.
    transport.route(
        chain_url(67),
        json!({
            "chain": chain_node(133, vec![
                chain_node(134, vec![]),
                chain_node(135, vec![]),
                chain_node(136, vec![]),
            ])
        }),
    );
    let resolver = Resolver::new(Arc::clone(&transport), &test_config());

    let line = resolver.evolution_line(133).await.unwrap();

    assert_eq!(ids(&line), vec![133, 134, 136]);
}

#[tokio::test]
async fn members_reuse_the_record_cache() {
    let transport = Arc::new(MockTransport::new());
    add_with_chain(&transport, 1, "bulbasaur", 1);
    add_with_chain(&transport, 2, "ivysaur", 1);
    transport.route(
        chain_url(1),
        json!({ "chain": chain_node(1, vec![chain_node(2, vec![])]) }),
    );
    let resolver = Resolver::new(Arc::clone(&transport), &test_config());

    let root = resolver.pokemon(&PokemonKey::Id(1)).await.unwrap();
    let line = resolver.evolution_line(1).await.unwrap();

    assert!(Arc::ptr_eq(&root, &line[0]));
    assert_eq!(transport.calls_to(&pokemon_url(1)), 1);
    assert_eq!(transport.calls_to(&species_url(1)), 1);
}

#[tokio::test]
async fn chain_fetch_failure_is_an_error_for_the_resolver() {
    let transport = Arc::new(MockTransport::new());
    add_with_chain(&transport, 4, "charmander", 2);
    transport.fail(
        chain_url(2),
        FetchError::Timeout {
            url: chain_url(2),
        },
    );
    let resolver = Resolver::new(Arc::clone(&transport), &test_config());

    let err = resolver.evolution_line(4).await.unwrap_err();

    assert_eq!(err, FetchError::Timeout { url: chain_url(2) });
}

#[tokio::test]
async fn session_turns_evolution_failures_into_empty_lists() {
    let transport = Arc::new(MockTransport::new());
    let pokedex = Pokedex::new(App::new(Arc::clone(&transport), &test_config()));

    let line = pokedex.evolution_of(999).await;

    assert!(line.is_empty());
}

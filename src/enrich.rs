use crate::model::{EnrichedPokemon, PokemonRecord, SpeciesRecord, Sprites};

pub const DEFAULT_FALLBACK_ART: &str = "assets/img/fallback-image.svg";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnrichmentOptions {
    pub primary_language: String,
    pub secondary_language: String,
    pub fallback_art: String,
}

impl Default for EnrichmentOptions {
    fn default() -> Self {
        Self {
            primary_language: "de".to_string(),
            secondary_language: "en".to_string(),
            fallback_art: DEFAULT_FALLBACK_ART.to_string(),
        }
    }
}

pub fn select_official_art(sprites: &Sprites, fallback: &str) -> String {
    sprites
        .official_artwork()
        .filter(|url| !url.is_empty())
        .or_else(|| sprites.front_default.as_deref().filter(|url| !url.is_empty()))
        .unwrap_or(fallback)
        .to_string()
}

pub fn pick_flavor_text(species: &SpeciesRecord, options: &EnrichmentOptions) -> String {
    [&options.primary_language, &options.secondary_language]
        .into_iter()
        .find_map(|language| {
            species
                .flavor_text_entries
                .iter()
                .find(|entry| entry.language.name == *language)
                .map(|entry| entry.text.as_str())
                .filter(|text| !text.is_empty())
        })
        .map(normalize_flavor_text)
        .unwrap_or_default()
}

pub fn normalize_flavor_text(text: &str) -> String {
    text.replace(['\n', '\x0c'], " ")
}

pub fn enrich_record(
    record: PokemonRecord,
    species: &SpeciesRecord,
    options: &EnrichmentOptions,
) -> EnrichedPokemon {
    let official_art = select_official_art(&record.sprites, &options.fallback_art);
    let flavor_text = pick_flavor_text(species, options);
    EnrichedPokemon {
        record,
        official_art,
        flavor_text,
    }
}

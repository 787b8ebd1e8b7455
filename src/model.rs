use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedResource {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub url: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeSlot {
    #[serde(default)]
    pub slot: u8,
    #[serde(rename = "type")]
    pub kind: NamedResource,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbilitySlot {
    #[serde(default)]
    pub is_hidden: bool,
    #[serde(default)]
    pub slot: u8,
    pub ability: NamedResource,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatEntry {
    #[serde(default)]
    pub base_stat: u32,
    #[serde(default)]
    pub effort: u32,
    pub stat: NamedResource,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtworkSprite {
    #[serde(default)]
    pub front_default: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OtherSprites {
    #[serde(
        rename = "official-artwork",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub official_artwork: Option<ArtworkSprite>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sprites {
    #[serde(default)]
    pub front_default: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub other: Option<OtherSprites>,
}

impl Sprites {
    pub fn official_artwork(&self) -> Option<&str> {
        self.other
            .as_ref()
            .and_then(|other| other.official_artwork.as_ref())
            .and_then(|art| art.front_default.as_deref())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PokemonRecord {
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub height: u32,
    #[serde(default)]
    pub weight: u32,
    #[serde(default)]
    pub types: Vec<TypeSlot>,
    #[serde(default)]
    pub abilities: Vec<AbilitySlot>,
    #[serde(default)]
    pub stats: Vec<StatEntry>,
    #[serde(default)]
    pub sprites: Sprites,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlavorTextEntry {
    #[serde(rename = "flavor_text", default)]
    pub text: String,
    #[serde(default)]
    pub language: NamedResource,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceRef {
    #[serde(default)]
    pub url: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpeciesRecord {
    #[serde(default)]
    pub id: u32,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub flavor_text_entries: Vec<FlavorTextEntry>,
    #[serde(default)]
    pub evolution_chain: Option<ResourceRef>,
}

impl SpeciesRecord {
    pub fn evolution_chain_url(&self) -> Option<&str> {
        self.evolution_chain
            .as_ref()
            .and_then(|chain| chain.url.as_deref())
            .filter(|url| !url.trim().is_empty())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrichedPokemon {
    #[serde(flatten)]
    pub record: PokemonRecord,
    pub official_art: String,
    pub flavor_text: String,
}

impl EnrichedPokemon {
    pub fn id(&self) -> u32 {
        self.record.id
    }

    pub fn name(&self) -> &str {
        &self.record.name
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct EvolutionNode {
    #[serde(default)]
    pub species: Option<NamedResource>,
    #[serde(default)]
    pub evolves_to: Vec<EvolutionNode>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct EvolutionChain {
    #[serde(default)]
    pub chain: Option<EvolutionNode>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_pokemon_ignores_unknown_fields() {
        let raw = serde_json::json!({
            "id": 1,
            "name": "bulbasaur",
            "base_experience": 64,
            "types": [{ "slot": 1, "type": { "name": "grass", "url": "" } }],
            "sprites": {
                "front_default": "front.png",
                "other": { "official-artwork": { "front_default": "art.png" } }
            }
        });
        let record: PokemonRecord = serde_json::from_value(raw).unwrap();
        assert_eq!(record.types[0].kind.name, "grass");
        assert_eq!(record.sprites.official_artwork(), Some("art.png"));
        assert!(record.abilities.is_empty());
    }

    #[test]
    fn enriched_serializes_flat_with_camel_case_fields() {
        let enriched = EnrichedPokemon {
            record: PokemonRecord {
                id: 4,
                name: "charmander".to_string(),
                ..Default::default()
            },
            official_art: "art.png".to_string(),
            flavor_text: "hot".to_string(),
        };
        let value = serde_json::to_value(&enriched).unwrap();
        assert_eq!(value["id"], 4);
        assert_eq!(value["officialArt"], "art.png");
        assert_eq!(value["flavorText"], "hot");
    }

    #[test]
    fn blank_chain_url_is_absent() {
        let species = SpeciesRecord {
            evolution_chain: Some(ResourceRef {
                url: Some(" ".to_string()),
            }),
            ..Default::default()
        };
        assert_eq!(species.evolution_chain_url(), None);
    }
}

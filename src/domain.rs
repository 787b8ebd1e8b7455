use std::fmt;
use std::str::FromStr;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::error::PokedexError;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PokemonKey {
    Id(u32),
    Name(String),
}

impl PokemonKey {
    pub fn as_id(&self) -> Option<u32> {
        match self {
            PokemonKey::Id(id) => Some(*id),
            PokemonKey::Name(_) => None,
        }
    }
}

impl From<u32> for PokemonKey {
    fn from(id: u32) -> Self {
        PokemonKey::Id(id)
    }
}

impl fmt::Display for PokemonKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PokemonKey::Id(id) => write!(f, "{id}"),
            PokemonKey::Name(name) => write!(f, "{name}"),
        }
    }
}

impl FromStr for PokemonKey {
    type Err = PokedexError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim().to_lowercase();
        if normalized.is_empty() {
            return Err(PokedexError::InvalidIdentifier(value.to_string()));
        }
        if normalized.chars().all(|ch| ch.is_ascii_digit()) {
            return match normalized.parse::<u32>() {
                Ok(id) if id > 0 => Ok(PokemonKey::Id(id)),
                _ => Err(PokedexError::InvalidIdentifier(value.to_string())),
            };
        }
        let is_valid = normalized
            .chars()
            .all(|ch| ch.is_alphanumeric() || matches!(ch, '-' | '.' | '\'' | ':'));
        if !is_valid {
            return Err(PokedexError::InvalidIdentifier(value.to_string()));
        }
        Ok(PokemonKey::Name(normalized))
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    #[default]
    Id,
    Name,
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortKey::Id => write!(f, "id"),
            SortKey::Name => write!(f, "name"),
        }
    }
}

impl FromStr for SortKey {
    type Err = PokedexError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "id" => Ok(SortKey::Id),
            "name" => Ok(SortKey::Name),
            _ => Err(PokedexError::InvalidSortKey(value.to_string())),
        }
    }
}

use std::io::{self, Write};
use std::sync::Arc;

use serde::Serialize;

use crate::model::EnrichedPokemon;

#[derive(Debug, Clone, Serialize)]
pub struct ListResult {
    pub count: usize,
    pub pokemon: Vec<Arc<EnrichedPokemon>>,
}

impl ListResult {
    pub fn new(pokemon: Vec<Arc<EnrichedPokemon>>) -> Self {
        Self {
            count: pokemon.len(),
            pokemon,
        }
    }
}

pub struct JsonOutput;

impl JsonOutput {
    pub fn print_pokemon(pokemon: &EnrichedPokemon) -> io::Result<()> {
        Self::print_json(pokemon)
    }

    pub fn print_list(result: &ListResult) -> io::Result<()> {
        Self::print_json(result)
    }

    fn print_json<T: Serialize>(value: &T) -> io::Result<()> {
        let json = serde_json::to_string_pretty(value).map_err(io::Error::other)?;
        let mut stdout = io::stdout();
        stdout.write_all(json.as_bytes())?;
        stdout.write_all(b"\n")?;
        Ok(())
    }
}

use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::enrich::{DEFAULT_FALLBACK_ART, EnrichmentOptions};
use crate::error::PokedexError;

pub const DEFAULT_CONFIG_FILE: &str = "pokedex.json";
pub const DEFAULT_BASE_URL: &str = "https://pokeapi.co/api/v2";
pub const SCHEMA_VERSION: u32 = 1;

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub schema_version: Option<u32>,
    #[serde(default)]
    pub base_url: Option<String>,
    #[serde(default)]
    pub timeout_secs: Option<u64>,
    #[serde(default)]
    pub primary_language: Option<String>,
    #[serde(default)]
    pub secondary_language: Option<String>,
    #[serde(default)]
    pub fallback_art: Option<String>,
    #[serde(default)]
    pub page_size: Option<u32>,
    #[serde(default)]
    pub range_concurrency: Option<usize>,
    #[serde(default)]
    pub evolution_concurrency: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedConfig {
    pub base_url: String,
    pub timeout: Duration,
    pub enrichment: EnrichmentOptions,
    pub page_size: u32,
    pub range_concurrency: usize,
    pub evolution_concurrency: usize,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(15),
            enrichment: EnrichmentOptions::default(),
            page_size: 20,
            range_concurrency: 6,
            evolution_concurrency: 4,
        }
    }
}

pub struct ConfigLoader;

impl ConfigLoader {
    pub fn resolve(path: Option<&str>) -> Result<ResolvedConfig, PokedexError> {
        let config_path = match path {
            Some(path) => PathBuf::from(path),
            None => PathBuf::from(DEFAULT_CONFIG_FILE),
        };

        if path.is_none() && !config_path.exists() {
            return Ok(ResolvedConfig::default());
        }

        let content = fs::read_to_string(&config_path)
            .map_err(|_| PokedexError::ConfigRead(config_path.clone()))?;
        let config: Config = serde_json::from_str(&content)
            .map_err(|err| PokedexError::ConfigParse(err.to_string()))?;

        Self::resolve_config(config)
    }

    pub fn resolve_config(config: Config) -> Result<ResolvedConfig, PokedexError> {
        let schema_version = config.schema_version.unwrap_or(SCHEMA_VERSION);
        if schema_version != SCHEMA_VERSION {
            return Err(PokedexError::InvalidConfig(format!(
                "unsupported schema_version {schema_version}"
            )));
        }

        let defaults = ResolvedConfig::default();

        let base_url = config
            .base_url
            .map(|url| url.trim().trim_end_matches('/').to_string())
            .unwrap_or(defaults.base_url);
        if base_url.is_empty() {
            return Err(PokedexError::InvalidConfig("base_url is empty".to_string()));
        }

        let timeout = match config.timeout_secs {
            Some(0) => {
                return Err(PokedexError::InvalidConfig(
                    "timeout_secs must be positive".to_string(),
                ));
            }
            Some(secs) => Duration::from_secs(secs),
            None => defaults.timeout,
        };

        let page_size = positive(config.page_size, defaults.page_size, "page_size")?;
        let range_concurrency = positive(
            config.range_concurrency,
            defaults.range_concurrency,
            "range_concurrency",
        )?;
        let evolution_concurrency = positive(
            config.evolution_concurrency,
            defaults.evolution_concurrency,
            "evolution_concurrency",
        )?;

        let enrichment = EnrichmentOptions {
            primary_language: language(config.primary_language)
                .unwrap_or(defaults.enrichment.primary_language),
            secondary_language: language(config.secondary_language)
                .unwrap_or(defaults.enrichment.secondary_language),
            fallback_art: config
                .fallback_art
                .filter(|art| !art.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_FALLBACK_ART.to_string()),
        };

        Ok(ResolvedConfig {
            base_url,
            timeout,
            enrichment,
            page_size,
            range_concurrency,
            evolution_concurrency,
        })
    }
}

fn positive<T>(value: Option<T>, default: T, field: &str) -> Result<T, PokedexError>
where
    T: PartialEq + Default,
{
    match value {
        Some(value) if value == T::default() => Err(PokedexError::InvalidConfig(format!(
            "{field} must be positive"
        ))),
        Some(value) => Ok(value),
        None => Ok(default),
    }
}

fn language(value: Option<String>) -> Option<String> {
    value
        .map(|lang| lang.trim().to_lowercase())
        .filter(|lang| !lang.is_empty())
}

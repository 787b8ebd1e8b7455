pub mod app;
pub mod cache;
pub mod collection;
pub mod config;
pub mod domain;
pub mod enrich;
pub mod error;
pub mod evolution;
pub mod gateway;
pub mod model;
pub mod output;
pub mod resolver;
pub mod runner;

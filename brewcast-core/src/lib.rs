//! Core library for the `brewcast` CLI.
//!
//! This crate defines:
//! - Configuration loading
//! - Clients for the geography, brewery and weather services
//! - Fuzzy matching for the interactive prompts
//! - Results page rendering and the pipeline tying it all together
//!
//! It is used by `brewcast-cli`, which supplies the terminal prompts.

pub mod config;
pub mod dump;
pub mod error;
pub mod fuzzy;
pub mod model;
pub mod pipeline;
pub mod provider;
pub mod render;
pub mod slug;
pub mod states;

pub use config::Config;
pub use error::BrewcastError;
pub use model::{BreweryRecord, CityDirectory, CityRecord, ForecastDay, StateEntry};
pub use pipeline::{Pipeline, Prompter, Report};
pub use provider::{BrewerySource, ForecastSource, GeographySource, Sources, sources_from_config};
pub use render::{Renderer, Templates};

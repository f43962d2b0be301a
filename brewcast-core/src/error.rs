//! Error taxonomy shared by every stage of the lookup pipeline.

use std::path::PathBuf;

use thiserror::Error;

/// Boxed upstream cause carried by the lookup variants.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

#[derive(Debug, Error)]
pub enum BrewcastError {
    /// The interactive prompt failed or was cancelled.
    #[error("Problem with input: {0}")]
    Input(String),

    /// A state could not be matched to a code.
    #[error("State code not found for '{0}'")]
    NotFound(String),

    /// An upstream payload is missing a required field.
    #[error("Unexpected data format: {0}")]
    DataFormat(String),

    #[error("Geography lookup failed: {source}")]
    GeographyLookup {
        #[source]
        source: BoxError,
    },

    #[error("Brewery lookup failed: {source}")]
    BreweryLookup {
        #[source]
        source: BoxError,
    },

    #[error("Weather lookup failed: {source}")]
    WeatherLookup {
        #[source]
        source: BoxError,
    },

    /// Debug dump or results page could not be written. Callers log it and move on.
    #[error("Failed to write {}: {source}", .path.display())]
    FileWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Configuration error: {0}")]
    Config(String),
}

impl BrewcastError {
    pub fn input<S: Into<String>>(message: S) -> Self {
        Self::Input(message.into())
    }

    pub fn geography<E: Into<BoxError>>(source: E) -> Self {
        Self::GeographyLookup { source: source.into() }
    }

    pub fn brewery<E: Into<BoxError>>(source: E) -> Self {
        Self::BreweryLookup { source: source.into() }
    }

    pub fn weather<E: Into<BoxError>>(source: E) -> Self {
        Self::WeatherLookup { source: source.into() }
    }

    pub fn file_write(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::FileWrite { path: path.into(), source }
    }
}

pub type Result<T, E = BrewcastError> = std::result::Result<T, E>;

//! Error types for the map model

use thiserror::Error;

/// Errors raised by lookups and mutations on a [`Map`](crate::Map).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MapError {
    /// No city with this name exists among all known cities
    #[error("no city found with the name '{0}'")]
    CityNotFound(String),

    /// No city with this name is currently active
    #[error("no active city found with the name '{0}'")]
    ActiveCityNotFound(String),

    /// No distance record exists for the requested pair
    #[error("no distance found between '{a}' and '{b}'")]
    DistanceNotFound { a: String, b: String },

    /// The city could not be activated
    #[error("cannot activate the city '{name}'")]
    Activation {
        name: String,
        #[source]
        source: Box<MapError>,
    },

    /// The city could not be deactivated
    #[error("cannot deactivate the city '{name}'")]
    Deactivation {
        name: String,
        #[source]
        source: Box<MapError>,
    },

    /// Two active cities have no distance between them
    #[error("map is not a complete graph: no distance between '{a}' and '{b}'")]
    NotComplete { a: String, b: String },

    /// Random activation was asked for an impossible number of cities
    #[error("cannot activate {requested} random cities: {available} cities are known")]
    InvalidActivationCount { requested: usize, available: usize },
}

impl MapError {
    pub(crate) fn activation(name: &str, source: MapError) -> Self {
        MapError::Activation {
            name: name.to_string(),
            source: Box::new(source),
        }
    }

    pub(crate) fn deactivation(name: &str, source: MapError) -> Self {
        MapError::Deactivation {
            name: name.to_string(),
            source: Box::new(source),
        }
    }

    pub(crate) fn distance_not_found(a: &str, b: &str) -> Self {
        MapError::DistanceNotFound {
            a: a.to_string(),
            b: b.to_string(),
        }
    }
}

/// Errors raised while reading a city coordinates document.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for map operations
pub type Result<T> = std::result::Result<T, MapError>;

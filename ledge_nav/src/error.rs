// Errors surfaced by the search entry points.
//
// Only bad input is an error. Failing to find a route is a normal result
// reported through `SearchOutcome`; a search that was allowed to start always
// returns a `Path`.

use crate::types::{CoordBounds, VoxelCoord};
use std::fmt;
use thiserror::Error;

/// Which endpoint of a request was rejected.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Endpoint {
    Start,
    Goal,
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Endpoint::Start => f.write_str("start"),
            Endpoint::Goal => f.write_str("goal"),
        }
    }
}

#[derive(Debug, Error)]
pub enum NavError {
    #[error("{endpoint} {coord} is outside the searchable bounds {bounds}")]
    InvalidCoordinate {
        endpoint: Endpoint,
        coord: VoxelCoord,
        bounds: CoordBounds,
    },

    #[error("invalid value for {name}: {value}")]
    InvalidParameter { name: &'static str, value: f64 },

    #[error("config error: {0}")]
    Config(#[from] serde_json::Error),
}

pub type NavResult<T> = Result<T, NavError>;

//! Configuration errors.
//!
//! Every failure the engine can report happens while a scenario is built or
//! reset; stepping and projecting are infallible once a scenario is valid.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("body {index} has non-positive mass {mass}")]
    NonPositiveMass { index: usize, mass: f64 },

    #[error("initial conditions hold {got} entries but the system has {expected} bodies")]
    InitialConditionsMismatch { expected: usize, got: usize },

    #[error("body {index}: `{field}` needs 2 components, got {got}")]
    BadVector {
        index: usize,
        field: &'static str,
        got: usize,
    },

    #[error("invalid time step settings: {0}")]
    InvalidTimeStep(String),

    #[error("trail length must be at least 1")]
    InvalidTrailLength,

    #[error("`{name}` must be positive and finite, got {value}")]
    InvalidScale { name: &'static str, value: f64 },

    #[error("failed to read scenario file")]
    Io(#[from] std::io::Error),

    #[error("failed to parse scenario YAML")]
    Yaml(#[from] serde_yaml::Error),
}

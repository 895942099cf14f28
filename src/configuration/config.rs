//! Configuration types for loading simulation scenarios from YAML.
//!
//! This module defines a thin, `serde`-deserializable representation of a
//! scenario. A scenario consists of:
//!
//! - [`ParametersConfig`] – time step, its bounds, trail capacity and physical constants
//! - [`ViewConfig`]       – initial camera scales (optional)
//! - [`BodyConfig`]       – initial state and look of each body
//! - [`ScenarioConfig`]   – top-level wrapper used to load a scenario from YAML
//!
//! # YAML format
//! ```yaml
//! name: "Binary system"
//!
//! parameters:
//!   G: 6.6743e-11           # gravitational constant
//!   dt: 86400.0             # initial step size in seconds
//!   dt_min: 600.0           # slowing down allowed while dt >= dt_min
//!   dt_max: 86400.0         # speeding up allowed while dt <= dt_max
//!   trail_len: 100          # positions kept per body
//!
//! view:
//!   distance_scale: 1.0e-7  # pixels per meter
//!   visual_scale: 1.0       # multiplier on body radius
//!
//! bodies:
//!   - x: [ -5.0e10, 0.0 ]
//!     v: [ 0.0, 15000.0 ]
//!     m: 2.0e30
//!     radius: 25.0
//!     color: [ 255, 215, 0 ]
//! ```
//!
//! [`Scenario::build_scenario`](crate::Scenario::build_scenario) validates
//! this and maps it into the runtime representation.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::configuration::error::ConfigError;
use crate::simulation::states::Rgb;

fn default_dt_factor() -> f64 {
    1.1
}

fn default_distance_scale() -> f64 {
    1.0e-7
}

fn default_visual_scale() -> f64 {
    1.0
}

/// Global numerical and physical parameters for a scenario
#[allow(non_snake_case)]
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct ParametersConfig {
    pub G: f64, // gravitational constant
    #[serde(default)]
    pub eps2: f64, // softening, defaults to none
    pub dt: f64, // initial time step
    pub dt_min: f64, // lower gate for slowing down
    pub dt_max: f64, // upper gate for speeding up
    #[serde(default = "default_dt_factor")]
    pub dt_factor: f64, // per-adjustment factor
    pub trail_len: usize, // trail capacity
}

/// Initial camera settings
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct ViewConfig {
    #[serde(default = "default_distance_scale")]
    pub distance_scale: f64, // pixels per simulation meter
    #[serde(default = "default_visual_scale")]
    pub visual_scale: f64, // multiplier on body display radius
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            distance_scale: default_distance_scale(),
            visual_scale: default_visual_scale(),
        }
    }
}

/// Configuration for a single body's initial state
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct BodyConfig {
    pub x: Vec<f64>, // initial position in meters
    pub v: Vec<f64>, // initial velocity in m/s
    pub m: f64, // mass in kg
    pub radius: f64, // display radius in pixels
    pub color: Rgb, // display color
}

/// Top-level scenario configuration loaded from YAML.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct ScenarioConfig {
    #[serde(default)]
    pub name: String,
    pub parameters: ParametersConfig,
    #[serde(default)]
    pub view: ViewConfig,
    pub bodies: Vec<BodyConfig>,
}

impl ScenarioConfig {
    pub fn from_yaml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(s)?)
    }

    pub fn from_yaml_file(path: &Path) -> Result<Self, ConfigError> {
        let file = File::open(path)?;
        let reader = BufReader::new(file);
        Ok(serde_yaml::from_reader(reader)?)
    }
}

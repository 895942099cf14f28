pub mod simulation;
pub mod configuration;
pub mod visualization;
pub mod benchmark;

pub use simulation::states::{Body, System, Trail, InitialCondition, Rgb, NVec2};
pub use simulation::params::Parameters;
pub use simulation::forces::{Acceleration, AccelSet, NewtonianGravity};
pub use simulation::integrator::{accumulate_forces, integrate, step};
pub use simulation::scenario::{Scenario, Preset, G_SI};
pub use simulation::engine::{Engine, Frame, Sprite, TrailPoint};

pub use configuration::config::{ParametersConfig, ViewConfig, BodyConfig, ScenarioConfig};
pub use configuration::error::ConfigError;

pub use visualization::camera::View;
pub use visualization::viewer::run_2d;

pub use benchmark::benchmark::{bench_step, ring_system, BenchResult};

//! Build fully-initialized simulation scenarios from configuration
//!
//! Takes a `ScenarioConfig` (YAML-facing) and produces the runtime bundle
//! `Scenario` containing:
//! - numerical parameters (`Parameters`)
//! - system state (`System` with bodies at t = 0)
//! - the recorded initial conditions used by `reset`
//! - active force set (`AccelSet`)
//! - initial camera settings (`ViewConfig`)
//!
//! Built-in presets reproduce the solar system and the three-body setups.

use clap::ValueEnum;
use log::info;
use rand::seq::SliceRandom;

use crate::configuration::config::{BodyConfig, ParametersConfig, ScenarioConfig, ViewConfig};
use crate::configuration::error::ConfigError;
use crate::simulation::forces::{AccelSet, NewtonianGravity};
use crate::simulation::integrator;
use crate::simulation::params::Parameters;
use crate::simulation::states::{Body, InitialCondition, NVec2, Rgb, System};

/// Gravitational constant in m^3 kg^-1 s^-2
pub const G_SI: f64 = 6.67430e-11;

/// Runtime bundle for one scenario
///
/// Switching scenario means building a new `Scenario` and dropping the old
/// one; bodies are never swapped in place.
pub struct Scenario {
    pub name: String,
    pub parameters: Parameters,
    pub system: System,
    pub forces: AccelSet,
    pub initial: Vec<InitialCondition>,
    pub view: ViewConfig,
}

fn vec2(index: usize, field: &'static str, v: &[f64]) -> Result<NVec2, ConfigError> {
    match v {
        [x, y] => Ok(NVec2::new(*x, *y)),
        _ => Err(ConfigError::BadVector { index, field, got: v.len() }),
    }
}

impl Scenario {
    pub fn build_scenario(cfg: ScenarioConfig) -> Result<Self, ConfigError> {
        // Parameters (runtime) from ParametersConfig
        let p_cfg = cfg.parameters;
        let parameters = Parameters {
            G: p_cfg.G,
            eps2: p_cfg.eps2,
            dt: p_cfg.dt,
            dt_min: p_cfg.dt_min,
            dt_max: p_cfg.dt_max,
            dt_factor: p_cfg.dt_factor,
            trail_len: p_cfg.trail_len,
        };
        parameters.validate()?;

        for (name, value) in [
            ("distance_scale", cfg.view.distance_scale),
            ("visual_scale", cfg.view.visual_scale),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::InvalidScale { name, value });
            }
        }

        // Bodies: map `BodyConfig` -> runtime `Body`
        let mut bodies = Vec::with_capacity(cfg.bodies.len());
        for (i, bc) in cfg.bodies.iter().enumerate() {
            if !(bc.m.is_finite() && bc.m > 0.0) {
                return Err(ConfigError::NonPositiveMass { index: i, mass: bc.m });
            }
            bodies.push(Body::new(
                vec2(i, "x", &bc.x)?,
                vec2(i, "v", &bc.v)?,
                bc.m,
                bc.radius,
                bc.color,
                parameters.trail_len,
            ));
        }

        let system = System::new(bodies);
        let initial = system.initial_conditions();

        let forces = AccelSet::new().with(NewtonianGravity {
            G: parameters.G,
            eps2: parameters.eps2,
        });

        info!(
            "loaded scenario {:?}: {} bodies, dt = {} s",
            cfg.name,
            system.bodies.len(),
            parameters.dt
        );

        Ok(Self {
            name: cfg.name,
            parameters,
            system,
            forces,
            initial,
            view: cfg.view,
        })
    }

    /// Advance one step of `parameters.dt`
    pub fn step(&mut self) {
        integrator::step(&mut self.system, &self.forces, self.parameters.dt);
    }

    /// Put every body back at its recorded initial state
    pub fn reset(&mut self) -> Result<(), ConfigError> {
        self.system.reset_to(&self.initial)?;
        info!("scenario {:?} reset", self.name);
        Ok(())
    }
}

/// Built-in scenarios
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Preset {
    SolarSystem,
    #[value(name = "three-body-1")]
    ThreeBody1,
    #[value(name = "three-body-2")]
    ThreeBody2,
    #[value(name = "three-body-3")]
    ThreeBody3,
    Binary,
}

fn body(x: [f64; 2], v: [f64; 2], m: f64, radius: f64, color: Rgb) -> BodyConfig {
    BodyConfig {
        x: x.to_vec(),
        v: v.to_vec(),
        m,
        radius,
        color,
    }
}

const ORANGE: Rgb = Rgb(255, 165, 0);
const GOLD: Rgb = Rgb(255, 215, 0);
const SKY: Rgb = Rgb(135, 206, 250);

impl Preset {
    pub const THREE_BODY: [Preset; 4] = [
        Preset::ThreeBody1,
        Preset::ThreeBody2,
        Preset::ThreeBody3,
        Preset::Binary,
    ];

    /// Pick one of the three-body setups at random
    pub fn random_three_body() -> Preset {
        *Self::THREE_BODY
            .choose(&mut rand::thread_rng())
            .unwrap_or(&Preset::ThreeBody1)
    }

    pub fn config(self) -> ScenarioConfig {
        match self {
            Preset::SolarSystem => solar_system(),
            Preset::ThreeBody1 => three_body(
                "Three suns",
                vec![
                    body([0.0, 0.0], [0.0, 0.0], 1.989e30, 30.0, Rgb::YELLOW),
                    body([1.0e11, 0.0], [0.0, 25_000.0], 1.989e30, 30.0, ORANGE),
                    body([-1.0e11, 0.0], [0.0, -25_000.0], 1.989e30, 30.0, Rgb::WHITE),
                ],
            ),
            Preset::ThreeBody2 => three_body(
                "Uneven suns",
                vec![
                    body([1.0e10, 0.0], [0.0, 0.0], 1.989e30, 30.0, Rgb::YELLOW),
                    body([1.9e11, 0.0], [0.0, 25_000.0], 3.0e30, 30.0, ORANGE),
                    body([-1.0e11, 0.0], [0.0, -25_000.0], 2.989e30, 30.0, Rgb::WHITE),
                ],
            ),
            Preset::ThreeBody3 => three_body(
                "Heavy centre",
                vec![
                    body([0.0, 0.0], [0.0, 0.0], 5.0e30, 35.0, Rgb::YELLOW),
                    body([1.2e11, 0.0], [0.0, 25_000.0], 3.0e30, 30.0, ORANGE),
                    body([-1.0e11, 0.0], [0.0, -35_000.0], 1.5e30, 25.0, SKY),
                ],
            ),
            Preset::Binary => three_body(
                "Binary with companion",
                vec![
                    body([-5.0e10, 0.0], [0.0, 15_000.0], 2.0e30, 25.0, GOLD),
                    body([5.0e10, 0.0], [0.0, -15_000.0], 2.0e30, 25.0, ORANGE),
                    body([0.0, -3.0e11], [8_000.0, 0.0], 1.9e30, 20.0, SKY),
                ],
            ),
        }
    }

    pub fn build(self) -> Result<Scenario, ConfigError> {
        Scenario::build_scenario(self.config())
    }
}

fn three_body(name: &str, bodies: Vec<BodyConfig>) -> ScenarioConfig {
    ScenarioConfig {
        name: name.to_string(),
        parameters: ParametersConfig {
            G: G_SI,
            eps2: 0.0,
            dt: 86_400.0,
            dt_min: 600.0,
            dt_max: 86_400.0,
            dt_factor: 1.1,
            trail_len: 100,
        },
        view: ViewConfig {
            distance_scale: 1.0e-7,
            visual_scale: 1.0,
        },
        bodies,
    }
}

fn solar_system() -> ScenarioConfig {
    let earth = 1.496e11;
    let mars = 2.279e11;
    ScenarioConfig {
        name: "Inner solar system".to_string(),
        parameters: ParametersConfig {
            G: G_SI,
            eps2: 0.0,
            dt: 1_500.0,
            dt_min: 60.0,
            dt_max: 360.0,
            dt_factor: 1.1,
            trail_len: 500,
        },
        view: ViewConfig {
            distance_scale: 1.0e-6,
            visual_scale: 1.0,
        },
        bodies: vec![
            body([0.0, 0.0], [0.0, 0.0], 1.989e30, 30.0, Rgb::YELLOW), // Sun
            body([5.791e10, 0.0], [0.0, 47_870.0], 3.301e23, 5.0, Rgb::GRAY), // Mercury
            body([1.082e11, 0.0], [0.0, 35_020.0], 4.867e24, 12.0, GOLD), // Venus
            body([earth, 0.0], [0.0, 29_800.0], 5.972e24, 10.0, Rgb::BLUE), // Earth
            body([earth + 3.844e8, 0.0], [0.0, 29_800.0 + 1_022.0], 7.348e22, 2.0, Rgb::GRAY), // Moon
            body([mars, 0.0], [0.0, 24_077.0], 6.417e23, 8.0, Rgb(255, 0, 0)), // Mars
            body([mars + 6.0e6, 0.0], [0.0, 24_077.0 + 2_138.0], 1.08e16, 1.0, Rgb::GRAY), // Phobos
            body([mars + 2.346e7, 0.0], [0.0, 24_077.0 + 1_351.3], 1.51e15, 1.0, Rgb::BLUE), // Deimos
        ],
    }
}

//! Numerical and physical parameters for the simulation
//!
//! `Parameters` holds runtime settings:
//! - gravitational constant `G` and optional softening `eps2`,
//! - the fixed step `dt` with the bounds that gate ±`dt_factor` adjustments,
//! - the trail capacity handed to every body

use log::{debug, warn};

use crate::configuration::error::ConfigError;

#[allow(non_snake_case)]
#[derive(Debug, Clone)]
pub struct Parameters {
    pub G: f64, // gravitational constant
    pub eps2: f64, // softening, 0 = pure Newtonian
    pub dt: f64, // step size in seconds
    pub dt_min: f64, // slow_down allowed while dt >= dt_min
    pub dt_max: f64, // speed_up allowed while dt <= dt_max
    pub dt_factor: f64, // multiplicative adjustment, 1.1 = 10%
    pub trail_len: usize, // trail capacity per body
}

impl Parameters {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.G.is_finite() || self.G < 0.0 {
            return Err(ConfigError::InvalidScale { name: "G", value: self.G });
        }
        if !self.eps2.is_finite() || self.eps2 < 0.0 {
            return Err(ConfigError::InvalidScale { name: "eps2", value: self.eps2 });
        }
        if !self.dt.is_finite() || self.dt == 0.0 {
            return Err(ConfigError::InvalidTimeStep(format!("dt = {}", self.dt)));
        }
        if !(self.dt_min.is_finite() && self.dt_max.is_finite()) || self.dt_min > self.dt_max {
            return Err(ConfigError::InvalidTimeStep(format!(
                "bounds [{}, {}] are not an interval",
                self.dt_min, self.dt_max
            )));
        }
        if !self.dt_factor.is_finite() || self.dt_factor <= 1.0 {
            return Err(ConfigError::InvalidTimeStep(format!(
                "dt_factor = {} must exceed 1",
                self.dt_factor
            )));
        }
        if self.trail_len == 0 {
            return Err(ConfigError::InvalidTrailLength);
        }
        Ok(())
    }

    /// Grow `dt` by one factor step. The bound is checked before stepping,
    /// so the step may land one factor above `dt_max`.
    pub fn speed_up(&mut self) -> bool {
        if self.dt <= self.dt_max {
            self.dt *= self.dt_factor;
            debug!("time step increased to {:.1} s", self.dt);
            true
        } else {
            warn!("time step {:.1} s already at the upper bound", self.dt);
            false
        }
    }

    /// Shrink `dt` by one factor step, mirrored from [`Parameters::speed_up`]
    pub fn slow_down(&mut self) -> bool {
        if self.dt >= self.dt_min {
            self.dt /= self.dt_factor;
            debug!("time step decreased to {:.1} s", self.dt);
            true
        } else {
            warn!("time step {:.1} s already at the lower bound", self.dt);
            false
        }
    }
}

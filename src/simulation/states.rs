//! Core state types for the orbit simulation.
//!
//! Defines the 2D body/system structs:
//! - `Body`   a point mass with cosmetic radius/color and a bounded trail
//! - `System` the ordered body registry plus elapsed simulated time `t`
//! - `Trail`  fixed-capacity FIFO of past positions, oldest first
//!
//! Positions are meters, velocities m/s, masses kg.

use std::collections::VecDeque;

use nalgebra::Vector2;
use serde::{Deserialize, Serialize};

use crate::configuration::error::ConfigError;

pub type NVec2 = Vector2<f64>;

/// Display color, deserialized from `[r, g, b]`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const WHITE: Rgb = Rgb(255, 255, 255);
    pub const YELLOW: Rgb = Rgb(255, 255, 0);
    pub const BLUE: Rgb = Rgb(0, 0, 255);
    pub const GRAY: Rgb = Rgb(169, 169, 169);
}

/// Bounded history of past positions
///
/// Pushing onto a full trail evicts the oldest entry first
#[derive(Debug, Clone, PartialEq)]
pub struct Trail {
    points: VecDeque<NVec2>,
    capacity: usize,
}

impl Trail {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            points: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn push(&mut self, p: NVec2) {
        if self.capacity == 0 {
            return;
        }
        while self.points.len() >= self.capacity {
            self.points.pop_front();
        }
        self.points.push_back(p);
    }

    pub fn clear(&mut self) {
        self.points.clear();
    }

    /// Change the capacity, dropping the oldest points if the trail no longer fits
    pub fn set_capacity(&mut self, capacity: usize) {
        self.capacity = capacity;
        while self.points.len() > capacity {
            self.points.pop_front();
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Oldest to newest
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &NVec2> + ExactSizeIterator {
        self.points.iter()
    }
}

#[derive(Debug, Clone)]
pub struct Body {
    pub x: NVec2, // position
    pub v: NVec2, // velocity
    pub a: NVec2, // acceleration, rebuilt every step
    pub m: f64, // mass, > 0
    pub radius: f64, // display radius in pixels, never used by the physics
    pub color: Rgb,
    pub trail: Trail,
}

impl Body {
    pub fn new(x: NVec2, v: NVec2, m: f64, radius: f64, color: Rgb, trail_len: usize) -> Self {
        Self {
            x,
            v,
            a: NVec2::zeros(),
            m,
            radius,
            color,
            trail: Trail::with_capacity(trail_len),
        }
    }

    pub fn initial_condition(&self) -> InitialCondition {
        InitialCondition { x: self.x, v: self.v }
    }
}

/// Position/velocity snapshot used to reset a body
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InitialCondition {
    pub x: NVec2,
    pub v: NVec2,
}

#[derive(Debug, Clone)]
pub struct System {
    pub bodies: Vec<Body>, // registry, order is significant for hit-testing
    pub t: f64, // elapsed simulated time
}

impl System {
    pub fn new(bodies: Vec<Body>) -> Self {
        Self { bodies, t: 0.0 }
    }

    /// Zero every body's acceleration ahead of force accumulation
    pub fn reset_accelerations(&mut self) {
        for b in self.bodies.iter_mut() {
            b.a = NVec2::zeros();
        }
    }

    /// Restore positions/velocities, zero accelerations, clear trails and time
    pub fn reset_to(&mut self, initial: &[InitialCondition]) -> Result<(), ConfigError> {
        if initial.len() != self.bodies.len() {
            return Err(ConfigError::InitialConditionsMismatch {
                expected: self.bodies.len(),
                got: initial.len(),
            });
        }
        for (b, ic) in self.bodies.iter_mut().zip(initial.iter()) {
            b.x = ic.x;
            b.v = ic.v;
            b.a = NVec2::zeros();
            b.trail.clear();
        }
        self.t = 0.0;
        Ok(())
    }

    pub fn initial_conditions(&self) -> Vec<InitialCondition> {
        self.bodies.iter().map(Body::initial_condition).collect()
    }

    pub fn kinetic_energy(&self) -> f64 {
        self.bodies.iter().map(|b| 0.5 * b.m * b.v.norm_squared()).sum()
    }

    /// Pairwise gravitational potential energy; coincident pairs are skipped
    pub fn potential_energy(&self, g: f64) -> f64 {
        let mut e = 0.0;
        for (i, bi) in self.bodies.iter().enumerate() {
            for bj in &self.bodies[i + 1..] {
                let d = (bj.x - bi.x).norm();
                if d > 0.0 {
                    e -= g * bi.m * bj.m / d;
                }
            }
        }
        e
    }

    pub fn total_energy(&self, g: f64) -> f64 {
        self.kinetic_energy() + self.potential_energy(g)
    }

    pub fn momentum(&self) -> NVec2 {
        self.bodies.iter().fold(NVec2::zeros(), |p, b| p + b.m * b.v)
    }
}

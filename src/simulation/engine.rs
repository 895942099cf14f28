//! High-level runtime the host drives once per frame
//!
//! `Engine` owns the active `Scenario`, the `View` into it and the host
//! toggles (pause, trails). A frame is: apply input through the methods
//! below, `tick`, then read `frame` for drawing.

use bevy::prelude::Resource;
use log::info;

use crate::configuration::error::ConfigError;
use crate::simulation::scenario::Scenario;
use crate::simulation::states::{NVec2, Rgb};
use crate::visualization::camera::View;

/// Pixel step used by keyboard panning
pub const PAN_STEP: f64 = 10.0;

/// One projected trail point, oldest first
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrailPoint {
    pub at: NVec2,
    pub alpha: u8,
}

/// Everything a renderer needs for one body
#[derive(Debug, Clone, PartialEq)]
pub struct Sprite {
    pub center: NVec2,
    pub radius: u32,
    pub color: Rgb,
    pub trail: Vec<TrailPoint>, // empty while trails are disabled
}

#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pub sprites: Vec<Sprite>,
    pub paused: bool,
}

#[derive(Resource)]
pub struct Engine {
    pub scenario: Scenario,
    pub view: View,
    pub paused: bool,
    pub trails_enabled: bool,
}

impl Engine {
    /// Starts paused with trails hidden
    pub fn new(scenario: Scenario, width: f64, height: f64) -> Self {
        let view = View::new(scenario.view, width, height);
        Self {
            scenario,
            view,
            paused: true,
            trails_enabled: false,
        }
    }

    /// Replace the scenario outright. The lock is dropped with the old bodies
    /// and the view takes the new scenario's scales.
    pub fn load(&mut self, scenario: Scenario) {
        info!("switching to scenario {:?}", scenario.name);
        self.view = View::new(scenario.view, self.view.screen.x, self.view.screen.y);
        self.scenario = scenario;
    }

    /// Advance one step unless paused, then re-pin any locked body
    pub fn tick(&mut self) {
        if !self.paused {
            self.scenario.step();
        }
        self.view.update_offset_for_lock(&self.scenario.system);
    }

    pub fn toggle_pause(&mut self) {
        self.paused = !self.paused;
        info!("{}", if self.paused { "paused" } else { "resumed" });
    }

    pub fn toggle_trails(&mut self) {
        self.trails_enabled = !self.trails_enabled;
    }

    pub fn speed_up(&mut self) -> bool {
        self.scenario.parameters.speed_up()
    }

    pub fn slow_down(&mut self) -> bool {
        self.scenario.parameters.slow_down()
    }

    pub fn reset(&mut self) -> Result<(), ConfigError> {
        self.scenario.reset()
    }

    /// Lock onto whatever body sits under `point`; a miss keeps the current lock
    pub fn click(&mut self, point: NVec2) -> Option<usize> {
        let hit = self.view.hit_test(&self.scenario.system, point)?;
        self.view.lock_on(&self.scenario.system, hit);
        Some(hit)
    }

    pub fn frame(&self) -> Frame {
        let sprites = self
            .scenario
            .system
            .bodies
            .iter()
            .map(|b| {
                let trail = if self.trails_enabled {
                    let cap = b.trail.capacity().max(1);
                    let fade = (255 / cap) as u32;
                    b.trail
                        .iter()
                        .enumerate()
                        .map(|(i, p)| TrailPoint {
                            at: self.view.project_point(p),
                            alpha: 255u32.saturating_sub(i as u32 * fade) as u8,
                        })
                        .collect()
                } else {
                    Vec::new()
                };
                Sprite {
                    center: self.view.project(b),
                    radius: self.view.display_radius(b),
                    color: b.color,
                    trail,
                }
            })
            .collect();

        Frame {
            sprites,
            paused: self.paused,
        }
    }
}

//! Simulation-space to screen-space transform.
//!
//! `View` maps body positions (meters) to pixels with a uniform
//! `distance_scale` plus an `offset`, and sizes bodies with a separate
//! `visual_scale`. Screen coordinates have their origin at the top-left
//! corner. A locked body is re-centred every frame by
//! [`View::update_offset_for_lock`].

use log::info;

use crate::configuration::config::ViewConfig;
use crate::simulation::states::{Body, System, NVec2};

/// Default window size in pixels
pub const SCREEN_WIDTH: f64 = 800.0;
pub const SCREEN_HEIGHT: f64 = 800.0;

/// Per-press zoom factors, kept apart so dot size grows slower than spread
pub const ZOOM_DISTANCE: f64 = 1.25;
pub const ZOOM_VISUAL: f64 = 1.1;

pub const MIN_DISPLAY_RADIUS: u32 = 2;
pub const MIN_HIT_RADIUS: u32 = 5;

#[derive(Debug, Clone, PartialEq)]
pub struct View {
    pub distance_scale: f64, // pixels per meter
    pub visual_scale: f64, // multiplier on body radius
    pub offset: NVec2, // screen position of the simulation origin
    pub screen: NVec2, // width, height
    pub zoom_distance: f64,
    pub zoom_visual: f64,
    locked: Option<usize>, // index into System::bodies
}

impl View {
    pub fn new(cfg: ViewConfig, width: f64, height: f64) -> Self {
        let screen = NVec2::new(width, height);
        Self {
            distance_scale: cfg.distance_scale,
            visual_scale: cfg.visual_scale,
            offset: screen / 2.0,
            screen,
            zoom_distance: ZOOM_DISTANCE,
            zoom_visual: ZOOM_VISUAL,
            locked: None,
        }
    }

    pub fn screen_center(&self) -> NVec2 {
        self.screen / 2.0
    }

    /// Resize the screen. The offset is left alone; a lock re-centres on the
    /// next [`View::update_offset_for_lock`].
    pub fn resize(&mut self, width: f64, height: f64) {
        self.screen = NVec2::new(width, height);
    }

    pub fn project_point(&self, p: &NVec2) -> NVec2 {
        p * self.distance_scale + self.offset
    }

    pub fn project(&self, body: &Body) -> NVec2 {
        self.project_point(&body.x)
    }

    /// Pixel radius, never below [`MIN_DISPLAY_RADIUS`]
    pub fn display_radius(&self, body: &Body) -> u32 {
        let r = (body.radius * self.visual_scale).round();
        if r > MIN_DISPLAY_RADIUS as f64 {
            r as u32
        } else {
            MIN_DISPLAY_RADIUS
        }
    }

    pub fn zoom_in(&mut self) {
        self.distance_scale *= self.zoom_distance;
        self.visual_scale *= self.zoom_visual;
    }

    pub fn zoom_out(&mut self) {
        self.distance_scale /= self.zoom_distance;
        self.visual_scale /= self.zoom_visual;
    }

    /// Shift the view by a screen delta; ignored while locked
    pub fn pan(&mut self, dx: f64, dy: f64) {
        if self.locked.is_none() {
            self.offset += NVec2::new(dx, dy);
        }
    }

    pub fn locked(&self) -> Option<usize> {
        self.locked
    }

    /// Track body `index`; returns false when the index is out of range
    pub fn lock_on(&mut self, sys: &System, index: usize) -> bool {
        match sys.bodies.get(index) {
            Some(b) => {
                info!("locked on body {} at ({:.3e}, {:.3e})", index, b.x.x, b.x.y);
                self.locked = Some(index);
                true
            }
            None => false,
        }
    }

    /// Drop the lock and put the origin back at screen centre
    pub fn unlock(&mut self) {
        self.locked = None;
        self.offset = self.screen_center();
    }

    /// Pin the locked body to screen centre; must run before projecting
    pub fn update_offset_for_lock(&mut self, sys: &System) {
        let Some(i) = self.locked else {
            return;
        };
        match sys.bodies.get(i) {
            Some(b) => self.offset = self.screen_center() - b.x * self.distance_scale,
            None => self.unlock(),
        }
    }

    /// First body, in registry order, within its hit radius of `point`
    pub fn hit_test(&self, sys: &System, point: NVec2) -> Option<usize> {
        sys.bodies.iter().position(|b| {
            let reach = self.display_radius(b).max(MIN_HIT_RADIUS) as f64;
            (self.project(b) - point).norm() <= reach
        })
    }
}

impl Default for View {
    fn default() -> Self {
        Self::new(ViewConfig::default(), SCREEN_WIDTH, SCREEN_HEIGHT)
    }
}

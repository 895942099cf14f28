//! Fixed-step time integration for the orbit system
//!
//! Semi-implicit (symplectic) Euler: velocity is kicked with the current
//! acceleration, then the new velocity drifts the position.

use super::states::{System, NVec2};
use super::forces::AccelSet;

/// Add the force-derived acceleration of every pair onto each body's `a`
pub fn accumulate_forces(sys: &mut System, forces: &AccelSet) {
    let mut acc: Vec<NVec2> = sys.bodies.iter().map(|b| b.a).collect();
    forces.accumulate_accels(&*sys, &mut acc);
    for (b, a) in sys.bodies.iter_mut().zip(acc) {
        b.a = a;
    }
}

/// Advance every body by `dt` using its current acceleration, in registry
/// order, and record the new position in its trail
pub fn integrate(sys: &mut System, dt: f64) {
    for b in sys.bodies.iter_mut() {
        // v_n+1 = v_n + dt a_n
        b.v += dt * b.a;
        // x_n+1 = x_n + dt v_n+1
        b.x += dt * b.v;
        b.trail.push(b.x);
    }
    sys.t += dt;
}

/// One full step: reset accelerations, accumulate forces, integrate
pub fn step(sys: &mut System, forces: &AccelSet, dt: f64) {
    sys.reset_accelerations();
    accumulate_forces(sys, forces);
    integrate(sys, dt);
}

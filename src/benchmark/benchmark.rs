use std::time::Instant;

use log::info;

use crate::simulation::forces::{AccelSet, NewtonianGravity};
use crate::simulation::integrator::step;
use crate::simulation::states::{Body, NVec2, Rgb, System};

#[derive(Debug, Clone, Copy)]
pub struct BenchResult {
    pub n: usize,
    pub steps: usize,
    pub secs_per_step: f64,
}

/// Deterministic ring of `n` unit masses around a heavy centre
pub fn ring_system(n: usize, trail_len: usize) -> System {
    let mut bodies = Vec::with_capacity(n);
    bodies.push(Body::new(NVec2::zeros(), NVec2::zeros(), 1000.0, 10.0, Rgb::YELLOW, trail_len));

    for i in 1..n {
        let i_f = i as f64;
        // deterministic positions, no rand needed
        let r = 5.0 + (i_f * 0.37).sin().abs() * 5.0;
        let theta = i_f * 0.13;
        let x = NVec2::new(r * theta.cos(), r * theta.sin());
        let speed = (1000.0 / r).sqrt();
        let v = NVec2::new(-speed * theta.sin(), speed * theta.cos());
        bodies.push(Body::new(x, v, 1.0, 2.0, Rgb::WHITE, trail_len));
    }

    System::new(bodies)
}

/// Time `steps` full steps for each body count in `ns`
pub fn bench_step(ns: &[usize], steps: usize) -> Vec<BenchResult> {
    let forces = AccelSet::new().with(NewtonianGravity { G: 1.0, eps2: 1e-4 });
    let dt = 1e-3;
    let steps = steps.max(1);

    ns.iter()
        .map(|&n| {
            let mut sys = ring_system(n, 100);

            // warm-up
            step(&mut sys, &forces, dt);

            let start = Instant::now();
            for _ in 0..steps {
                step(&mut sys, &forces, dt);
            }
            let secs_per_step = start.elapsed().as_secs_f64() / steps as f64;

            info!("n = {:5}, {:.3e} s/step", n, secs_per_step);
            BenchResult { n, steps, secs_per_step }
        })
        .collect()
}

use orbitsim::simulation::states::{Body, System, NVec2, Rgb};
use orbitsim::simulation::params::Parameters;
use orbitsim::simulation::forces::{AccelSet, NewtonianGravity};
use orbitsim::simulation::integrator::{accumulate_forces, integrate, step};
use orbitsim::simulation::scenario::{Preset, Scenario};
use orbitsim::simulation::engine::Engine;
use orbitsim::configuration::config::ScenarioConfig;
use orbitsim::configuration::error::ConfigError;
use orbitsim::visualization::camera::View;

/// Build a simple 2-body System separated along the x-axis
pub fn two_body_system(dist: f64, m1: f64, m2: f64) -> System {
    let b1 = Body::new(NVec2::new(-dist / 2.0, 0.0), NVec2::zeros(), m1, 10.0, Rgb::YELLOW, 16);
    let b2 = Body::new(NVec2::new(dist / 2.0, 0.0), NVec2::zeros(), m2, 10.0, Rgb::BLUE, 16);
    System::new(vec![b1, b2])
}

/// Default physics parameters for tests
pub fn test_params() -> Parameters {
    Parameters {
        G: 1.0,
        eps2: 0.0,
        dt: 0.001,
        dt_min: 0.0001,
        dt_max: 0.01,
        dt_factor: 1.1,
        trail_len: 16,
    }
}

/// Build a gravity term + AccelSet
pub fn gravity_set(p: &Parameters) -> AccelSet {
    AccelSet::new().with(NewtonianGravity {
        G: p.G,
        eps2: p.eps2,
    })
}

fn accelerations(sys: &mut System, forces: &AccelSet) {
    sys.reset_accelerations();
    accumulate_forces(sys, forces);
}

const SCENARIO_YAML: &str = r#"
name: "test pair"
parameters:
  G: 1.0
  dt: 0.01
  dt_min: 0.001
  dt_max: 0.1
  trail_len: 8
view:
  distance_scale: 100.0
  visual_scale: 1.0
bodies:
  - x: [ 0.0, 0.0 ]
    v: [ 0.0, 0.0 ]
    m: 1.0
    radius: 10.0
    color: [ 255, 255, 0 ]
  - x: [ 1.0, 0.0 ]
    v: [ 0.0, 1.0 ]
    m: 0.001
    radius: 1.0
    color: [ 0, 0, 255 ]
"#;

fn test_scenario() -> Scenario {
    Scenario::build_scenario(ScenarioConfig::from_yaml_str(SCENARIO_YAML).unwrap()).unwrap()
}

// ==================================================================================
// Gravity tests
// ==================================================================================

#[test]
fn gravity_newton_third_law() {
    let mut sys = two_body_system(1.0, 2.0, 3.0);
    let forces = gravity_set(&test_params());
    accelerations(&mut sys, &forces);

    let f1 = sys.bodies[0].a * sys.bodies[0].m;
    let f2 = sys.bodies[1].a * sys.bodies[1].m;

    assert!(f1.norm() > 0.0);
    assert!((f1 + f2).norm() < 1e-12 * f1.norm(), "Net force not zero: {:?}", f1 + f2);
}

#[test]
fn gravity_magnitude_matches_newton() {
    let mut sys = two_body_system(2.0, 3.0, 5.0);
    let forces = gravity_set(&test_params());
    accelerations(&mut sys, &forces);

    // |a_0| = G m_1 / d^2
    let expected = 1.0 * 5.0 / 4.0;
    assert!((sys.bodies[0].a.norm() - expected).abs() < 1e-12);
    let expected = 1.0 * 3.0 / 4.0;
    assert!((sys.bodies[1].a.norm() - expected).abs() < 1e-12);
}

#[test]
fn gravity_points_toward_other_body() {
    let mut sys = two_body_system(2.0, 1.0, 1.0);
    let forces = gravity_set(&test_params());
    accelerations(&mut sys, &forces);

    let dx = sys.bodies[1].x - sys.bodies[0].x;
    assert!(sys.bodies[0].a.dot(&dx) > 0.0, "Acceleration is not toward second body");
    assert!(sys.bodies[1].a.dot(&dx) < 0.0, "Acceleration is not toward first body");
}

#[test]
fn gravity_inverse_square_law() {
    let mut sys_r = two_body_system(1.0, 1.0, 1.0);
    let mut sys_2r = two_body_system(2.0, 1.0, 1.0);
    let forces = gravity_set(&test_params());

    accelerations(&mut sys_r, &forces);
    accelerations(&mut sys_2r, &forces);

    let ratio = sys_r.bodies[0].a.norm() / sys_2r.bodies[0].a.norm();
    assert!((ratio - 4.0).abs() < 1e-9, "Expected 4x, got {}", ratio);
}

#[test]
fn gravity_ignores_coincident_bodies() {
    let mut sys = two_body_system(0.0, 1.0, 1.0);
    let forces = gravity_set(&test_params());
    accelerations(&mut sys, &forces);

    for b in &sys.bodies {
        assert_eq!(b.a, NVec2::zeros());
        assert!(b.a.x.is_finite() && b.a.y.is_finite());
    }
}

#[test]
fn gravity_softening_limits_close_encounters() {
    let mut p = test_params();
    p.eps2 = 0.1;

    let mut sys = two_body_system(1e-9, 1.0, 1.0);
    accelerations(&mut sys, &gravity_set(&p));

    assert!(sys.bodies[0].a.norm() < 1e-6, "Softening failed; acceleration too large");
}

#[test]
fn three_body_forces_conserve_momentum() {
    let bodies = vec![
        Body::new(NVec2::new(0.0, 0.0), NVec2::zeros(), 3.0, 1.0, Rgb::WHITE, 4),
        Body::new(NVec2::new(1.0, 2.0), NVec2::zeros(), 1.5, 1.0, Rgb::WHITE, 4),
        Body::new(NVec2::new(-2.0, 0.5), NVec2::zeros(), 0.7, 1.0, Rgb::WHITE, 4),
    ];
    let mut sys = System::new(bodies);
    accelerations(&mut sys, &gravity_set(&test_params()));

    let net = sys.bodies.iter().fold(NVec2::zeros(), |f, b| f + b.m * b.a);
    assert!(net.norm() < 1e-12, "Net force not zero: {:?}", net);
}

#[test]
fn reset_accelerations_is_idempotent() {
    let mut sys = two_body_system(1.0, 1.0, 1.0);
    accelerations(&mut sys, &gravity_set(&test_params()));
    sys.reset_accelerations();
    sys.reset_accelerations();
    assert!(sys.bodies.iter().all(|b| b.a == NVec2::zeros()));
}

// ==================================================================================
// Integrator tests
// ==================================================================================

#[test]
fn integrate_is_semi_implicit() {
    let mut sys = System::new(vec![Body::new(
        NVec2::new(1.0, 2.0),
        NVec2::new(3.0, 0.0),
        1.0,
        1.0,
        Rgb::WHITE,
        4,
    )]);
    sys.bodies[0].a = NVec2::new(0.0, -10.0);

    integrate(&mut sys, 0.5);

    // velocity is kicked first, then drives the position
    let b = &sys.bodies[0];
    assert_eq!(b.v, NVec2::new(3.0, -5.0));
    assert_eq!(b.x, NVec2::new(2.5, -0.5));
    assert_eq!(b.trail.iter().copied().collect::<Vec<_>>(), vec![b.x]);
    assert!((sys.t - 0.5).abs() < 1e-15);
}

#[test]
fn circular_orbit_closes_after_one_period() {
    // G = 1, M = 1, r = 1 => v = 1, T = 2 pi
    let sun = Body::new(NVec2::zeros(), NVec2::zeros(), 1.0, 10.0, Rgb::YELLOW, 4);
    let planet = Body::new(NVec2::new(1.0, 0.0), NVec2::new(0.0, 1.0), 1e-9, 2.0, Rgb::BLUE, 4);
    let mut sys = System::new(vec![sun, planet]);
    let forces = gravity_set(&test_params());

    let n = 20_000;
    let dt = std::f64::consts::TAU / n as f64;
    for _ in 0..n {
        step(&mut sys, &forces, dt);
    }

    let p = &sys.bodies[1];
    assert!((p.x - NVec2::new(1.0, 0.0)).norm() < 1e-2, "position drifted to {:?}", p.x);
    assert!((p.v - NVec2::new(0.0, 1.0)).norm() < 1e-2, "velocity drifted to {:?}", p.v);
    assert!(((p.x.norm()) - 1.0).abs() < 1e-2);
}

#[test]
fn trail_keeps_most_recent_positions() {
    let mut sys = two_body_system(1.0, 1.0, 1.0);
    for b in sys.bodies.iter_mut() {
        b.trail.set_capacity(5);
    }
    let forces = gravity_set(&test_params());

    let mut history = Vec::new();
    for _ in 0..12 {
        step(&mut sys, &forces, 0.01);
        history.push(sys.bodies[0].x);
        assert!(sys.bodies[0].trail.len() <= 5);
    }

    let trail: Vec<NVec2> = sys.bodies[0].trail.iter().copied().collect();
    assert_eq!(trail, history[history.len() - 5..].to_vec());
}

// ==================================================================================
// Scenario tests
// ==================================================================================

#[test]
fn reset_twice_gives_identical_state() {
    let mut scenario = Preset::ThreeBody1.build().unwrap();
    for _ in 0..25 {
        scenario.step();
    }

    scenario.reset().unwrap();
    let first: Vec<(NVec2, NVec2)> = scenario.system.bodies.iter().map(|b| (b.x, b.v)).collect();
    scenario.reset().unwrap();
    let second: Vec<(NVec2, NVec2)> = scenario.system.bodies.iter().map(|b| (b.x, b.v)).collect();

    assert_eq!(first, second);
    assert_eq!(scenario.system.t, 0.0);
    for (b, ic) in scenario.system.bodies.iter().zip(scenario.initial.iter()) {
        assert_eq!(b.x, ic.x);
        assert_eq!(b.v, ic.v);
        assert_eq!(b.a, NVec2::zeros());
        assert!(b.trail.is_empty());
    }
}

#[test]
fn reset_keeps_mass_and_look() {
    let mut scenario = Preset::SolarSystem.build().unwrap();
    let before: Vec<(f64, f64, Rgb)> =
        scenario.system.bodies.iter().map(|b| (b.m, b.radius, b.color)).collect();
    scenario.step();
    scenario.reset().unwrap();
    let after: Vec<(f64, f64, Rgb)> =
        scenario.system.bodies.iter().map(|b| (b.m, b.radius, b.color)).collect();
    assert_eq!(before, after);
}

#[test]
fn reset_rejects_mismatched_initial_conditions() {
    let mut scenario = test_scenario();
    scenario.initial.pop();
    assert!(matches!(
        scenario.reset(),
        Err(ConfigError::InitialConditionsMismatch { expected: 2, got: 1 })
    ));
}

#[test]
fn build_rejects_non_positive_mass() {
    let mut cfg = ScenarioConfig::from_yaml_str(SCENARIO_YAML).unwrap();
    cfg.bodies[1].m = 0.0;
    assert!(matches!(
        Scenario::build_scenario(cfg),
        Err(ConfigError::NonPositiveMass { index: 1, .. })
    ));
}

#[test]
fn build_rejects_wrong_vector_length() {
    let mut cfg = ScenarioConfig::from_yaml_str(SCENARIO_YAML).unwrap();
    cfg.bodies[0].v = vec![1.0, 2.0, 3.0];
    assert!(matches!(
        Scenario::build_scenario(cfg),
        Err(ConfigError::BadVector { index: 0, field: "v", got: 3 })
    ));
}

#[test]
fn build_rejects_zero_scale() {
    let mut cfg = ScenarioConfig::from_yaml_str(SCENARIO_YAML).unwrap();
    cfg.view.visual_scale = 0.0;
    assert!(matches!(
        Scenario::build_scenario(cfg),
        Err(ConfigError::InvalidScale { name: "visual_scale", .. })
    ));
}

#[test]
fn every_preset_builds() {
    for preset in [
        Preset::SolarSystem,
        Preset::ThreeBody1,
        Preset::ThreeBody2,
        Preset::ThreeBody3,
        Preset::Binary,
    ] {
        let scenario = preset.build().unwrap();
        assert_eq!(scenario.initial.len(), scenario.system.bodies.len());
    }
    assert!(Preset::THREE_BODY.contains(&Preset::random_three_body()));
}

#[test]
fn scenario_files_load() {
    let dir = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("scenarios");
    for name in ["binary.yaml", "earth_moon.yaml"] {
        let cfg = ScenarioConfig::from_yaml_file(&dir.join(name)).unwrap();
        Scenario::build_scenario(cfg).unwrap();
    }
}

// ==================================================================================
// Camera tests
// ==================================================================================

#[test]
fn project_applies_scale_and_offset() {
    let scenario = test_scenario();
    let view = View::new(scenario.view, 800.0, 600.0);
    let p = view.project(&scenario.system.bodies[1]);
    assert_eq!(p, NVec2::new(500.0, 300.0));
}

#[test]
fn display_radius_floors_at_two_pixels() {
    let scenario = test_scenario();
    let mut view = View::new(scenario.view, 800.0, 800.0);
    assert_eq!(view.display_radius(&scenario.system.bodies[0]), 10);
    assert_eq!(view.display_radius(&scenario.system.bodies[1]), 2);

    for _ in 0..30 {
        view.zoom_out();
    }
    assert_eq!(view.display_radius(&scenario.system.bodies[0]), 2);
}

#[test]
fn zoom_in_then_out_restores_scales() {
    let mut view = View::default();
    let (d0, v0) = (view.distance_scale, view.visual_scale);

    view.zoom_in();
    assert!((view.distance_scale - d0 * 1.25).abs() < 1e-12 * d0);
    assert!((view.visual_scale - v0 * 1.1).abs() < 1e-12);
    view.zoom_out();

    assert!((view.distance_scale - d0).abs() < 1e-12 * d0);
    assert!((view.visual_scale - v0).abs() < 1e-12);
}

#[test]
fn locked_body_is_pinned_to_screen_centre() {
    let mut scenario = test_scenario();
    let mut view = View::new(scenario.view, 800.0, 600.0);
    assert!(view.lock_on(&scenario.system, 1));

    for _ in 0..50 {
        scenario.step();
        view.update_offset_for_lock(&scenario.system);
        let p = view.project(&scenario.system.bodies[1]);
        assert!((p - NVec2::new(400.0, 300.0)).norm() < 1e-6, "locked body at {:?}", p);
    }
}

#[test]
fn unlocked_offset_is_left_to_panning() {
    let scenario = test_scenario();
    let mut view = View::new(scenario.view, 800.0, 800.0);
    view.pan(15.0, -5.0);
    view.update_offset_for_lock(&scenario.system);
    assert_eq!(view.offset, NVec2::new(415.0, 395.0));

    view.unlock();
    assert_eq!(view.offset, NVec2::new(400.0, 400.0));
    assert!(!view.lock_on(&scenario.system, 7));
    assert_eq!(view.locked(), None);
}

#[test]
fn hit_test_returns_first_match_in_registry_order() {
    let bodies = vec![
        Body::new(NVec2::new(0.0, 0.0), NVec2::zeros(), 1.0, 20.0, Rgb::WHITE, 4),
        Body::new(NVec2::new(0.05, 0.0), NVec2::zeros(), 1.0, 20.0, Rgb::BLUE, 4),
        Body::new(NVec2::new(2.0, 0.0), NVec2::zeros(), 1.0, 1.0, Rgb::GRAY, 4),
    ];
    let sys = System::new(bodies);
    let mut view = View::default();
    view.distance_scale = 100.0;

    // overlapping bodies 0 and 1: the earlier one wins
    assert_eq!(view.hit_test(&sys, NVec2::new(404.0, 400.0)), Some(0));
    // tiny body is still hittable within 5 px
    assert_eq!(view.hit_test(&sys, NVec2::new(604.0, 403.0)), Some(2));
    assert_eq!(view.hit_test(&sys, NVec2::new(610.0, 400.0)), None);
}

// ==================================================================================
// Engine tests
// ==================================================================================

#[test]
fn paused_engine_does_not_step() {
    let mut engine = Engine::new(test_scenario(), 800.0, 800.0);
    assert!(engine.paused);
    let before = engine.scenario.system.bodies[1].x;
    engine.tick();
    assert_eq!(engine.scenario.system.bodies[1].x, before);

    engine.toggle_pause();
    engine.tick();
    assert_ne!(engine.scenario.system.bodies[1].x, before);
}

#[test]
fn click_locks_and_tick_recentres() {
    let mut engine = Engine::new(test_scenario(), 800.0, 800.0);
    engine.toggle_pause();

    // body 1 projects at (500, 400)
    assert_eq!(engine.click(NVec2::new(501.0, 401.0)), Some(1));
    assert_eq!(engine.view.locked(), Some(1));
    assert_eq!(engine.click(NVec2::new(0.0, 0.0)), None);
    assert_eq!(engine.view.locked(), Some(1));

    engine.tick();
    let frame = engine.frame();
    assert!((frame.sprites[1].center - NVec2::new(400.0, 400.0)).norm() < 1e-6);
}

#[test]
fn loading_a_scenario_clears_the_lock() {
    let mut engine = Engine::new(test_scenario(), 800.0, 800.0);
    engine.click(NVec2::new(500.0, 400.0));
    assert!(engine.view.locked().is_some());

    engine.load(Preset::Binary.build().unwrap());
    assert_eq!(engine.view.locked(), None);
    assert_eq!(engine.view.offset, NVec2::new(400.0, 400.0));
    assert_eq!(engine.view.distance_scale, 1.0e-7);
    engine.tick();
}

#[test]
fn frame_includes_trails_only_when_enabled() {
    let mut engine = Engine::new(test_scenario(), 800.0, 800.0);
    engine.toggle_pause();
    for _ in 0..3 {
        engine.tick();
    }

    let frame = engine.frame();
    assert!(!frame.paused);
    assert!(frame.sprites.iter().all(|s| s.trail.is_empty()));

    engine.toggle_trails();
    let frame = engine.frame();
    let trail = &frame.sprites[1].trail;
    assert_eq!(trail.len(), 3);
    assert_eq!(trail[0].alpha, 255);
    assert!(trail[2].alpha < trail[1].alpha);
    assert_eq!(frame.sprites[1].color, Rgb(0, 0, 255));
}

#[test]
fn time_step_adjusts_within_bounds() {
    let mut engine = Engine::new(test_scenario(), 800.0, 800.0);
    let dt0 = engine.scenario.parameters.dt;
    assert!(engine.speed_up());
    assert!((engine.scenario.parameters.dt - dt0 * 1.1).abs() < 1e-15);
    assert!(engine.slow_down());
    assert!((engine.scenario.parameters.dt - dt0).abs() < 1e-15);
}

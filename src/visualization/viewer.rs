use bevy::log::LogPlugin;
use bevy::prelude::*;
use bevy::window::{PrimaryWindow, WindowResolution};

use crate::simulation::engine::{Engine, PAN_STEP};
use crate::simulation::scenario::Preset;
use crate::simulation::states::{NVec2, Rgb};

#[derive(Component)]
struct PausedText;

/// Keys 1-5 pick a preset
const PRESET_KEYS: [(KeyCode, Preset); 5] = [
    (KeyCode::Digit1, Preset::SolarSystem),
    (KeyCode::Digit2, Preset::ThreeBody1),
    (KeyCode::Digit3, Preset::ThreeBody2),
    (KeyCode::Digit4, Preset::ThreeBody3),
    (KeyCode::Digit5, Preset::Binary),
];

pub fn run_2d(engine: Engine) {
    ::log::info!(
        "run_2d: starting Bevy 2D viewer with {} bodies",
        engine.scenario.system.bodies.len()
    );
    let (w, h) = (engine.view.screen.x as f32, engine.view.screen.y as f32);

    App::new()
        .insert_resource(engine)
        .insert_resource(ClearColor(Color::BLACK))
        // env_logger is already installed by main
        .add_plugins(
            DefaultPlugins
                .set(WindowPlugin {
                    primary_window: Some(Window {
                        title: "Orbit Simulator".into(),
                        resolution: WindowResolution::new(w, h),
                        ..default()
                    }),
                    ..default()
                })
                .disable::<LogPlugin>(),
        )
        .add_systems(Startup, setup_system)
        .add_systems(Update, (input_system, physics_step_system, draw_system).chain())
        .run();
}

fn setup_system(mut commands: Commands) {
    commands.spawn(Camera2dBundle::default());

    commands.spawn((
        TextBundle::from_section(
            "PAUSED",
            TextStyle {
                font_size: 50.0,
                color: Color::srgb(1.0, 0.0, 0.0),
                ..default()
            },
        )
        .with_style(Style {
            position_type: PositionType::Absolute,
            top: Val::Percent(50.0),
            left: Val::Percent(42.0),
            ..default()
        }),
        PausedText,
    ));
}

fn input_system(
    keys: Res<ButtonInput<KeyCode>>,
    mouse: Res<ButtonInput<MouseButton>>,
    windows: Query<&Window, With<PrimaryWindow>>,
    mut engine: ResMut<Engine>,
) {
    if let Ok(window) = windows.get_single() {
        engine.view.resize(window.width() as f64, window.height() as f64);
        if mouse.just_pressed(MouseButton::Left) {
            if let Some(c) = window.cursor_position() {
                engine.click(NVec2::new(c.x as f64, c.y as f64));
            }
        }
    }

    if keys.any_just_pressed([KeyCode::Equal, KeyCode::NumpadAdd]) {
        engine.view.zoom_in();
    }
    if keys.any_just_pressed([KeyCode::Minus, KeyCode::NumpadSubtract]) {
        engine.view.zoom_out();
    }
    if keys.just_pressed(KeyCode::Escape) {
        engine.view.unlock();
    }
    if keys.just_pressed(KeyCode::KeyP) {
        engine.toggle_pause();
    }
    if keys.just_pressed(KeyCode::KeyT) {
        engine.toggle_trails();
    }
    if keys.just_pressed(KeyCode::KeyS) {
        engine.speed_up();
    }
    if keys.just_pressed(KeyCode::KeyD) {
        engine.slow_down();
    }
    if keys.just_pressed(KeyCode::KeyR) {
        if let Err(err) = engine.reset() {
            ::log::error!("reset failed: {err}");
        }
    }

    let mut pan = (0.0, 0.0);
    if keys.pressed(KeyCode::ArrowLeft) {
        pan.0 += PAN_STEP;
    }
    if keys.pressed(KeyCode::ArrowRight) {
        pan.0 -= PAN_STEP;
    }
    if keys.pressed(KeyCode::ArrowUp) {
        pan.1 += PAN_STEP;
    }
    if keys.pressed(KeyCode::ArrowDown) {
        pan.1 -= PAN_STEP;
    }
    if pan != (0.0, 0.0) {
        engine.view.pan(pan.0, pan.1);
    }

    for (key, preset) in PRESET_KEYS {
        if keys.just_pressed(key) {
            match preset.build() {
                Ok(scenario) => engine.load(scenario),
                Err(err) => ::log::error!("preset {preset:?} failed to build: {err}"),
            }
        }
    }
}

fn physics_step_system(mut engine: ResMut<Engine>) {
    engine.tick();
}

fn draw_system(
    engine: Res<Engine>,
    mut gizmos: Gizmos,
    mut paused_text: Query<&mut Visibility, With<PausedText>>,
) {
    let frame = engine.frame();
    let screen = engine.view.screen;

    // screen pixels (origin top-left, y down) -> Bevy world (origin centre, y up)
    let to_world = |p: NVec2| {
        Vec2::new((p.x - screen.x / 2.0) as f32, (screen.y / 2.0 - p.y) as f32)
    };

    for sprite in &frame.sprites {
        let Rgb(r, g, b) = sprite.color;
        if sprite.trail.len() > 1 {
            gizmos.linestrip_gradient_2d(
                sprite
                    .trail
                    .iter()
                    .map(|tp| (to_world(tp.at), Color::srgba_u8(r, g, b, tp.alpha))),
            );
        }
        gizmos.circle_2d(to_world(sprite.center), sprite.radius as f32, Color::srgb_u8(r, g, b));
    }

    for mut vis in &mut paused_text {
        *vis = if frame.paused {
            Visibility::Visible
        } else {
            Visibility::Hidden
        };
    }
}

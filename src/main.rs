use orbitsim::{Engine, Preset, Scenario, ScenarioConfig};
use orbitsim::run_2d;
use orbitsim::bench_step;
use orbitsim::visualization::camera::{SCREEN_HEIGHT, SCREEN_WIDTH};

use anyhow::{Context, Result};
use clap::Parser;
use log::info;

use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(about = "Newtonian orbit simulator")]
struct Args {
    /// Scenario YAML; looked up under `scenarios/` when not found as given
    #[arg(short, long, conflicts_with = "preset")]
    file: Option<PathBuf>,

    /// Built-in scenario; defaults to a random three-body setup
    #[arg(short, long, value_enum)]
    preset: Option<Preset>,

    /// Run without a window and log the state
    #[arg(long)]
    headless: bool,

    /// Steps to run in headless mode
    #[arg(long, default_value_t = 1000)]
    steps: usize,

    /// Log every N steps in headless mode
    #[arg(long, default_value_t = 100)]
    log_every: usize,

    /// Time step throughput for a range of body counts
    #[arg(long)]
    bench: bool,
}

fn resolve_scenario_path(file: PathBuf) -> PathBuf {
    if file.exists() {
        return file;
    }
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("scenarios").join(file)
}

// load here to keep main clean
fn load_scenario(args: &Args) -> Result<Scenario> {
    if let Some(file) = &args.file {
        let path = resolve_scenario_path(file.clone());
        let cfg = ScenarioConfig::from_yaml_file(&path)
            .with_context(|| format!("failed to load scenario {}", path.display()))?;
        return Scenario::build_scenario(cfg)
            .with_context(|| format!("invalid scenario {}", path.display()));
    }

    let preset = args.preset.unwrap_or_else(Preset::random_three_body);
    info!("using preset {:?}", preset);
    preset
        .build()
        .with_context(|| format!("invalid preset {preset:?}"))
}

fn run_headless(mut scenario: Scenario, steps: usize, log_every: usize) {
    let g = scenario.parameters.G;
    let e0 = scenario.system.total_energy(g);
    let log_every = log_every.max(1);

    for n in 1..=steps {
        scenario.step();
        if n % log_every == 0 || n == steps {
            let e = scenario.system.total_energy(g);
            info!(
                "step {:6}  t = {:.4e} s  dE/E0 = {:.3e}",
                n,
                scenario.system.t,
                if e0 != 0.0 { (e - e0) / e0.abs() } else { e - e0 }
            );
        }
    }

    for (i, b) in scenario.system.bodies.iter().enumerate() {
        println!("{i}: x = ({:.6e}, {:.6e})  v = ({:.6e}, {:.6e})", b.x.x, b.x.y, b.v.x, b.v.y);
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    if args.bench {
        for r in bench_step(&[8, 32, 128, 512], 200) {
            println!("{:5} bodies: {:.3e} s/step", r.n, r.secs_per_step);
        }
        return Ok(());
    }

    let scenario = load_scenario(&args)?;

    if args.headless {
        run_headless(scenario, args.steps, args.log_every);
    } else {
        run_2d(Engine::new(scenario, SCREEN_WIDTH, SCREEN_HEIGHT));
    }

    Ok(())
}

use std::path::PathBuf;

use bevy::prelude::*;
use clap::Parser;
use simulator::{collect_reports, load_scenario, run_ticks, setup_simulation, SimulationOptions, TICKS_PER_SECOND};

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// RON scenario file; the built-in scenario is used when omitted
    #[arg(short, long)]
    scenario: Option<PathBuf>,

    #[arg(short, long, default_value_t = 10 * TICKS_PER_SECOND)]
    ticks: u32,

    /// Seed for the initial orientation jitter, random when omitted
    #[arg(long)]
    seed: Option<u64>,

    /// Log body state every N ticks (0 disables periodic reports)
    #[arg(short, long, default_value_t = TICKS_PER_SECOND)]
    report_every: u32,
}

fn main() {
    let args = Args::parse();

    let scenario = match load_scenario(args.scenario.as_deref()) {
        Ok(scenario) => scenario,
        Err(err) => {
            eprintln!("Error: failed to load scenario: {err}");
            std::process::exit(1);
        }
    };

    let options = SimulationOptions {
        seed: args.seed.unwrap_or_else(rand::random),
        report_every: args.report_every,
    };

    let mut app = App::new();
    app.add_plugins(bevy::log::LogPlugin::default());

    if let Err(err) = setup_simulation(&mut app, &scenario, &options) {
        error!("Failed to set up scenario {:?}: {}", scenario.name, err);
        std::process::exit(1);
    }

    info!("Running {} ticks with seed {}", args.ticks, options.seed);
    run_ticks(&mut app, args.ticks);

    for report in collect_reports(app.world_mut()) {
        info!(
            "{}: final height {:.3}, {:.0}% submerged",
            report.name,
            report.height,
            report.submerged_fraction * 100.0
        );
    }
}

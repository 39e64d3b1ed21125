//! CWCU dashboard simulator for desktop platforms.
//!
//! Runs the same engine as the Raspberry Pi build, with an SDL window in
//! place of the SSD1351 and a demo thread feeding random tile statuses.
//! Close the window to exit.

// Crate-level lints
#![allow(clippy::cast_possible_truncation)]

mod demo;
mod transport;

use std::process::ExitCode;
use std::sync::Arc;
use std::sync::atomic::AtomicBool;

use cwcu_common::clock::StdClock;
use cwcu_common::config::CHART_COLUMNS;
use cwcu_common::network::LocalAddress;
use cwcu_common::{AssetLoader, DisplayConfig, ProceduralAssets, RandomWalk, StartupError, TickScheduler, TileAnimator};
use log::{error, info};

use crate::transport::SimulatorTransport;

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("startup failed: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), StartupError> {
    let config = DisplayConfig::DEFAULT;
    config.validate(CHART_COLUMNS)?;
    let assets = ProceduralAssets::new(&config).load()?.validate(&config)?;

    let stop = Arc::new(AtomicBool::new(false));
    let animator = Arc::new(TileAnimator::from_config(&config));
    let feed = demo::spawn(Arc::clone(&animator), Arc::clone(&stop));

    let walk = RandomWalk::from_config(&config.walk, rand::random());
    let transport = SimulatorTransport::new(Arc::clone(&stop));
    let mut scheduler: TickScheduler<'_, _, _, _, CHART_COLUMNS> =
        TickScheduler::new(&config, &animator, &assets, walk, LocalAddress::new(), transport)?;
    let stats = scheduler.run(&mut StdClock::new(), &stop);

    if feed.join().is_err() {
        error!("demo feed thread panicked");
    }
    info!("simulator exited after {} ticks ({} overruns)", stats.ticks, stats.overruns);
    Ok(())
}

use std::time::Instant;

use anyhow::{Context, Result};
use chrono::{Local, NaiveDateTime, TimeDelta};
use clap::Parser;
use log::{info, warn};

use photo_watch::constants::IMAGE_COUNT;
use photo_watch::raylib_host::RaylibHost;
use photo_watch::texture_loader::load_sorted_image_paths;
use photo_watch::{ClockStyle, DisplayCoordinator, TickReport, WatchTime};

mod cli;

use crate::cli::Cli;

/// Wall clock, optionally shifted to a start time and sped up.
struct SimulatedClock {
    origin: NaiveDateTime,
    started: Instant,
    speed: u32,
}

impl SimulatedClock {
    fn new(cli: &Cli) -> Self {
        let now = Local::now().naive_local();
        let origin = cli.start.map_or(now, |start| now.date().and_time(start));
        Self { origin, started: Instant::now(), speed: cli.speed.max(1) }
    }

    fn now(&self) -> WatchTime {
        let elapsed = self.started.elapsed().as_millis() as i64 * self.speed as i64;
        WatchTime::from_datetime(&(self.origin + TimeDelta::milliseconds(elapsed)))
    }
}

fn log_report(report: &TickReport) {
    match &report.image {
        Ok(outcome) => info!("Image: {:?}, date redrawn: {}", outcome, report.date_redrawn),
        Err(e) => warn!("Image unchanged: {}", e),
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let style = if cli.twenty_four_hour { ClockStyle::TwentyFourHour } else { ClockStyle::TwelveHour };
    let coordinator = DisplayCoordinator::with_defaults(style).context("Invalid image table")?;

    let image_paths = load_sorted_image_paths(&cli.image_dir)?;
    if image_paths.len() < IMAGE_COUNT {
        warn!("{} holds {} images, the face cycles through {}", cli.image_dir.display(), image_paths.len(), IMAGE_COUNT);
    }
    info!("Input path: {}", cli.image_dir.display());

    let mut host = RaylibHost::new(image_paths, *coordinator.layout(), cli.scale.max(1))?;
    let clock = SimulatedClock::new(&cli);

    let mut state = coordinator.new_state();
    let now = clock.now();
    log_report(&coordinator.on_init(&mut state, &mut host, &now)?);
    let mut last_shown = (now.day_of_year, now.minute_of_day());

    // --- Main Loop ---
    while !host.window_should_close() {
        let dt = host.frame_time();
        host.update(dt);

        for event in host.drain_completed() {
            if let Err(e) = coordinator.on_animation_completed(&mut state, &mut host, event) {
                warn!("Queued image not shown: {}", e);
            }
        }

        let now = clock.now();
        let minute = (now.day_of_year, now.minute_of_day());
        if minute != last_shown {
            last_shown = minute;
            log_report(&coordinator.on_tick(&mut state, &mut host, &now)?);
        }

        host.render();
    }

    coordinator.on_shutdown(&mut state, &mut host);
    Ok(())
}

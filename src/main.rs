//! GeoT headless driver
//!
//! Runs a scripted session without a window and prints frame snapshots as JSON.
//!
//! Usage: `geot [settings.json] [script]`
//!
//! The script is a comma separated list of `key@frame` entries, for example
//! `space@0,e@300,space@600,space@660,esc@1200`.
//!
//! Environment:
//! - `GEOT_SEED`: session seed (defaults to the current time)
//! - `GEOT_REALTIME`: pace frames with the wall clock instead of a fixed step
//! - `GEOT_VOLUME`: cue volume, 0.0 to 1.0
//! - `GEOT_MUTE`: silence collision cues
//! - `GEOT_SAVE_SETTINGS`: write the effective settings to this path first
//! - `RUST_LOG`: log filter (defaults to `info`)

use std::path::Path;
use std::process::ExitCode;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use geot::audio::LogCues;
use geot::platform::{FixedStep, FrameClock, InputEvent, Key, RawEvent, TimeSource};
use geot::runner::{LoopControl, Runner};
use geot::sim::SimState;
use geot::Settings;

const DEFAULT_SCRIPT: &str = "space@0,e@300,space@600,space@660,esc@1200";
const SNAPSHOT_EVERY: u64 = 60;
const FRAME_DT: f32 = 1.0 / 60.0;

/// Hard stop in case the script never quits
const MAX_FRAMES: u64 = 100_000;

fn parse_script(script: &str) -> Vec<(u64, RawEvent)> {
    let mut entries = Vec::new();
    for entry in script.split(',').filter(|s| !s.trim().is_empty()) {
        let Some((name, frame)) = entry.split_once('@') else {
            log::warn!("Ignoring script entry without a frame: {entry:?}");
            continue;
        };
        let Ok(frame) = frame.trim().parse::<u64>() else {
            log::warn!("Ignoring script entry with a bad frame: {entry:?}");
            continue;
        };
        let raw = match name.trim().to_lowercase().as_str() {
            "close" => Some(RawEvent::Close),
            other => Key::from_name(other).map(RawEvent::KeyDown),
        };
        match raw {
            Some(raw) => entries.push((frame, raw)),
            None => log::warn!("Ignoring script entry with no key: {entry:?}"),
        }
    }
    entries.sort_by_key(|(frame, _)| *frame);
    entries
}

fn seed() -> u64 {
    if let Some(seed) = std::env::var("GEOT_SEED").ok().and_then(|s| s.parse().ok()) {
        return seed;
    }
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

fn cues_from_env() -> LogCues {
    let mut cues = LogCues::new();
    if let Ok(volume) = std::env::var("GEOT_VOLUME") {
        match volume.parse::<f32>() {
            Ok(volume) => cues.set_master_volume(volume),
            Err(_) => log::warn!("Ignoring GEOT_VOLUME={volume:?}"),
        }
    }
    cues.set_muted(std::env::var_os("GEOT_MUTE").is_some());
    cues
}

fn run<T: TimeSource>(
    state: SimState,
    time: T,
    cues: LogCues,
    script: &[(u64, RawEvent)],
    realtime: bool,
) {
    let mut runner = Runner::new(state, time, cues);
    let mut frame = 0u64;

    while frame < MAX_FRAMES {
        let events: Vec<InputEvent> = script
            .iter()
            .filter(|(at, _)| *at == frame)
            .filter_map(|(_, raw)| InputEvent::from_raw(*raw))
            .collect();

        if runner.frame(&events) == LoopControl::Exit {
            break;
        }

        if frame % SNAPSHOT_EVERY == 0 {
            match serde_json::to_string(&runner.view()) {
                Ok(json) => println!("{json}"),
                Err(e) => log::error!("Failed to serialize frame: {e}"),
            }
        }

        if realtime {
            std::thread::sleep(Duration::from_secs_f32(FRAME_DT));
        }
        frame += 1;
    }

    log::info!(
        "Session ended after {} frames, {:.2}s simulated",
        runner.frames(),
        runner.state().elapsed
    );
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut args = std::env::args().skip(1);
    let settings = match args.next() {
        Some(path) if path != "-" => match Settings::load_from(Path::new(&path)) {
            Ok(settings) => settings,
            Err(e) => {
                log::error!("{e}");
                return ExitCode::FAILURE;
            }
        },
        _ => Settings::default(),
    };
    if let Some(path) = std::env::var_os("GEOT_SAVE_SETTINGS") {
        if let Err(e) = settings.save_to(Path::new(&path)) {
            log::error!("{e}");
            return ExitCode::FAILURE;
        }
    }
    let script = parse_script(&args.next().unwrap_or_else(|| DEFAULT_SCRIPT.to_string()));

    let seed = seed();
    log::info!("GeoT starting with seed {seed}");
    let state = SimState::new(settings, seed);

    if std::env::var_os("GEOT_REALTIME").is_some() {
        run(state, FrameClock::new(), cues_from_env(), &script, true);
    } else {
        run(state, FixedStep::new(FRAME_DT), cues_from_env(), &script, false);
    }

    ExitCode::SUCCESS
}

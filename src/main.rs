//! Tempo Strike headless runner
//!
//! Plays the demo chart against a simulated audio clock at a fixed frame
//! rate, with autoplay hands (or none at all with `--miss-all`), and logs
//! the session as it unfolds.
//!
//! Usage: `tempo-strike [seed] [--miss-all] [--leniency strict|normal|relaxed]`

use tempo_strike::consts::SIM_DT;
use tempo_strike::platform::SimulatedClock;
use tempo_strike::sim::{Chart, DEMO_BPM, HandsSnapshot, SessionStatus, autoplay};
use tempo_strike::{HighScore, Leniency, Session, Settings};

const SETTINGS_PATH: &str = "tempo-strike-settings.json";
const DEMO_BEATS: u32 = 64;
/// Seconds of music after the last note
const OUTRO: f32 = 2.0;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut seed = 140u64;
    let mut miss_all = false;
    let mut leniency = None;
    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--miss-all" => miss_all = true,
            "--leniency" => {
                let name = args.next().unwrap_or_default();
                match Leniency::from_str(&name) {
                    Some(l) => leniency = Some(l),
                    None => log::warn!("Unknown leniency '{}', keeping settings", name),
                }
            }
            other => match other.parse() {
                Ok(s) => seed = s,
                Err(_) => log::warn!("Ignoring unknown argument: {}", other),
            },
        }
    }

    let mut settings = Settings::load(SETTINGS_PATH);
    if let Some(l) = leniency {
        settings.leniency = l;
    }
    let tuning = settings.effective_tuning();
    log::info!(
        "Leniency {}, offset {}ms",
        settings.leniency.as_str(),
        settings.audio_offset_ms
    );

    let chart = match Chart::demo(seed, DEMO_BPM, DEMO_BEATS) {
        Ok(chart) => chart,
        Err(e) => {
            log::error!("Could not build demo chart: {}", e);
            std::process::exit(1);
        }
    };
    let clock = SimulatedClock::new(chart.duration() + OUTRO);
    let mut session = Session::new(chart, clock, tuning).with_audio_offset(settings.audio_offset());

    // No camera to wait for
    session.mark_ready();
    if let Err(e) = session.start() {
        log::error!("Could not start session: {}", e);
        std::process::exit(1);
    }

    while session.status() == SessionStatus::Playing {
        session.clock_mut().advance(SIM_DT);

        let hands = if miss_all {
            HandsSnapshot::default()
        } else {
            autoplay::hands_for(session.state(), session.elapsed(), session.tuning())
        };

        let result = session.update(&hands);
        for hit in &result.hits {
            log::info!(
                "HIT  {:<8} {:<7} +{:<4} x{} combo {}",
                hit.note_id,
                hit.accuracy.as_str(),
                hit.points,
                session.multiplier(),
                session.combo()
            );
        }
        for miss in &result.misses {
            log::info!("MISS {:<8} health {}", miss.note_id, session.health());
        }
        if let Some(outcome) = result.outcome {
            log::info!(
                "{} with score {}",
                if outcome.is_victory() { "VICTORY" } else { "GAME OVER" },
                session.score()
            );
        }
    }

    let mut high_score = HighScore::load(".");
    if high_score.record(session.score()) {
        if let Err(e) = high_score.save(".") {
            log::warn!("Could not save high score: {}", e);
        }
    }
    log::info!("Best: {}", high_score.best);
}

//! Fishy headless runner
//!
//! Loads settings, simulates a run without graphics and prints a JSON summary
//! of the final state. Usage: `fishy [settings.json]`

use std::path::PathBuf;

use anyhow::Context;

use fishy::Settings;
use fishy::platform::Headless;
use fishy::renderer::{CommandBuffer, render};
use fishy::sim::{GameEvent, GameState, Snapshot, TickInput, tick};

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(Settings::FILE_NAME));
    let settings = Settings::load_or_default(&path);

    let seed = settings.seed.unwrap_or_else(clock_seed);
    let mut assets = Headless::new();
    settings.apply_audio(&mut assets);
    let mut state = GameState::new(seed, &mut assets);
    let mut canvas = CommandBuffer::new();

    let mut input = TickInput::default();
    for frame in 0..settings.frames {
        input.steer = autopilot(frame);
        let events = tick(&mut state, &input, settings.frame_ms, &mut assets);
        for event in &events {
            if let GameEvent::PowerupCollected { kind, .. } = event {
                log::info!("Picked up {} at frame {}", kind.as_str(), state.frame);
            }
        }

        canvas.clear();
        render(&state, &mut canvas, settings.debug_bounds);

        if state.is_over() {
            break;
        }
    }

    log::info!(
        "Run finished after {} frames ({} ms), score {}",
        state.frame,
        state.elapsed_ms,
        state.score
    );
    let summary = serde_json::to_string_pretty(&Snapshot::from(&state))
        .context("failed to serialize run summary")?;
    println!("{summary}");
    Ok(())
}

/// Sweep up and down the playfield
fn autopilot(frame: u32) -> glam::Vec2 {
    let phase = (frame / 120) % 2;
    glam::Vec2::new(0.0, if phase == 0 { 1.0 } else { -1.0 })
}

fn clock_seed() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

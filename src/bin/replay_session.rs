// Replays a recorded landmark session through the gesture engine
// Useful for debugging classification and debounce behavior without a camera

use std::env;
use std::path::PathBuf;
use std::process::ExitCode;

use handwave_lib::core::config::Config;
use handwave_lib::core::gesture_engine::GestureEngine;
use handwave_lib::models::hand::{HandObservation, Handedness, Landmark};
use serde::Deserialize;

/// Display size used to scale cursor positions during replay
const VIEWPORT: (u32, u32) = (800, 600);

#[derive(Debug, Deserialize)]
struct RecordedSession {
    frames: Vec<RecordedFrame>,
}

#[derive(Debug, Deserialize)]
struct RecordedFrame {
    t_ms: i64,
    #[serde(default)]
    hands: Vec<RecordedHand>,
}

#[derive(Debug, Deserialize)]
struct RecordedHand {
    handedness: Handedness,
    #[serde(default = "default_confidence")]
    confidence: f32,
    landmarks: Vec<[f32; 3]>,
}

fn default_confidence() -> f32 {
    1.0
}

struct ReplayOptions {
    verbose: bool,
    threshold_secs: Option<f32>,
}

fn parse_args() -> Result<(PathBuf, ReplayOptions), String> {
    let mut verbose = false;
    let mut threshold_secs = None;
    let mut session_path: Option<PathBuf> = None;

    let mut args = env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--verbose" => verbose = true,
            "--threshold" => {
                let value = args
                    .next()
                    .ok_or("--threshold requires a value in seconds")?;
                let secs: f32 = value
                    .parse()
                    .map_err(|_| format!("Invalid threshold: {}", value))?;
                threshold_secs = Some(secs);
            }
            _ => {
                if session_path.is_some() {
                    return Err(
                        "Usage: replay_session [--verbose] [--threshold <secs>] <session.json>"
                            .to_string(),
                    );
                }
                session_path = Some(PathBuf::from(arg));
            }
        }
    }

    let session_path = session_path.ok_or("You must specify a session JSON file")?;
    Ok((
        session_path,
        ReplayOptions {
            verbose,
            threshold_secs,
        },
    ))
}

fn load_session(path: &PathBuf) -> Result<RecordedSession, String> {
    let contents = std::fs::read_to_string(path)
        .map_err(|e| format!("Failed to read {:?}: {}", path, e))?;
    serde_json::from_str(&contents).map_err(|e| format!("Failed to parse {:?}: {}", path, e))
}

fn to_observations(frame: &RecordedFrame) -> Result<Vec<HandObservation>, String> {
    frame
        .hands
        .iter()
        .map(|hand| {
            let landmarks: Vec<Landmark> = hand
                .landmarks
                .iter()
                .map(|&[x, y, z]| Landmark::new(x, y, z))
                .collect();
            HandObservation::from_landmarks(landmarks, hand.handedness, hand.confidence)
                .map_err(|e| format!("Frame t={}ms: {}", frame.t_ms, e))
        })
        .collect()
}

fn main() -> ExitCode {
    let (session_path, opts) = match parse_args() {
        Ok(parsed) => parsed,
        Err(e) => {
            eprintln!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    let session = match load_session(&session_path) {
        Ok(session) => session,
        Err(e) => {
            eprintln!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    let mut config = Config::default();
    if let Some(secs) = opts.threshold_secs {
        config.stability_threshold_secs = secs;
    }

    println!(
        "Replaying {} frames from {:?} (threshold {}s)",
        session.frames.len(),
        session_path,
        config.stability_threshold_secs
    );

    let mut engine = GestureEngine::new(&config);
    let mut actions = 0;

    for frame in &session.frames {
        let hands = match to_observations(frame) {
            Ok(hands) => hands,
            Err(e) => {
                eprintln!("{}", e);
                return ExitCode::FAILURE;
            }
        };

        let report = engine.process_frame(&hands, frame.t_ms, VIEWPORT.0, VIEWPORT.1);

        if opts.verbose {
            let cursor = report
                .cursor
                .map(|c| format!(" cursor=({:.0}, {:.0})", c.x, c.y))
                .unwrap_or_default();
            println!(
                "t={:>6}ms raw={:<12} confirmed={:<12} selected={}{}",
                report.timestamp,
                report.raw_label.as_str(),
                report.confirmed_label.as_str(),
                report.selected_index,
                cursor
            );
        }

        if let Some(action) = report.action {
            actions += 1;
            println!(
                "t={:>6}ms {} -> {} (selected {}{})",
                report.timestamp,
                report.confirmed_label.display_name(),
                action.as_str(),
                report.selected_index,
                if report.paused { ", paused" } else { "" }
            );
        }
    }

    let list = engine.list_state();
    println!(
        "Done: {} actions dispatched, selection ended on {:?}",
        actions,
        list.items.get(list.selected_index)
    );

    ExitCode::SUCCESS
}

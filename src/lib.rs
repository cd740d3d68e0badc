pub mod core;
pub mod models;
pub mod platform;

use crate::core::config::Config;
use crate::core::gesture_engine::GestureEngine;
use crate::core::gesture_tracker::GestureTracker;
use crate::core::ml_models::ModelManager;
use models::frame::{PixelFormat, RawFrame};
use models::gesture::{
    FrameReport, GestureAction, GestureEventPayload, GestureLabel, ListState, TrackingStatus,
};
use platform::tracker::{DefaultHandTracker, HandTrackerBridge};
use std::sync::Mutex;
use tauri::{AppHandle, Emitter, Manager, State};

// Application state
pub struct AppState {
    pub config: Mutex<Config>,
    pub engine: Mutex<GestureEngine>,
    pub tracker: Option<GestureTracker>,
    pub model_manager: ModelManager,
}

// Configuration management commands
#[tauri::command]
fn get_config(state: State<'_, AppState>) -> Result<Config, String> {
    let config = state
        .config
        .lock()
        .map_err(|e| format!("Failed to lock config: {}", e))?;

    Ok(config.clone())
}

#[tauri::command]
fn update_config(config: Config, state: State<'_, AppState>) -> Result<(), String> {
    // Validate config
    config
        .validate()
        .map_err(|e| format!("Invalid configuration: {}", e))?;

    // Update in-memory config
    let mut current_config = state
        .config
        .lock()
        .map_err(|e| format!("Failed to lock config: {}", e))?;

    *current_config = config.clone();

    // Save to disk
    config
        .save()
        .map_err(|e| format!("Failed to save config: {}", e))?;

    // New threshold and list take effect through a fresh session
    let mut engine = state
        .engine
        .lock()
        .map_err(|e| format!("Failed to lock engine: {}", e))?;
    *engine = GestureEngine::new(&config);

    Ok(())
}

#[tauri::command]
fn reset_config(state: State<'_, AppState>) -> Result<Config, String> {
    let default_config = Config::reset()
        .map_err(|e| format!("Failed to reset config: {}", e))?;

    let mut current_config = state
        .config
        .lock()
        .map_err(|e| format!("Failed to lock config: {}", e))?;

    *current_config = default_config.clone();

    let mut engine = state
        .engine
        .lock()
        .map_err(|e| format!("Failed to lock engine: {}", e))?;
    *engine = GestureEngine::new(&default_config);

    Ok(default_config)
}

// Hand tracking commands
#[tauri::command]
async fn start_hand_tracking(state: State<'_, AppState>) -> Result<String, String> {
    let tracker = state.tracker.as_ref()
        .ok_or("Hand tracker not initialized")?;

    let tracker_config = {
        let config = state
            .config
            .lock()
            .map_err(|e| format!("Failed to lock config: {}", e))?;

        let mut engine = state
            .engine
            .lock()
            .map_err(|e| format!("Failed to lock engine: {}", e))?;
        engine.reset();

        config.tracker_config()
    };

    tracker
        .start_tracking(tracker_config)
        .await
        .map_err(|e| format!("Failed to start tracking: {}", e))
}

#[tauri::command]
async fn stop_hand_tracking(state: State<'_, AppState>) -> Result<(), String> {
    let tracker = state.tracker.as_ref()
        .ok_or("Hand tracker not initialized")?;

    tracker
        .stop_tracking()
        .await
        .map_err(|e| format!("Failed to stop tracking: {}", e))
}

#[tauri::command]
async fn get_tracking_status(state: State<'_, AppState>) -> Result<TrackingStatus, String> {
    let tracker = state.tracker.as_ref()
        .ok_or("Hand tracker not initialized")?;

    Ok(TrackingStatus {
        is_tracking: tracker.is_tracking().await,
        session_id: tracker.session_id().await,
        model_info: tracker.get_model_info(),
    })
}

/// Run one frame through the detector and the gesture engine
#[tauri::command]
async fn process_video_frame(
    frame_data: Vec<u8>,
    width: u32,
    height: u32,
    viewport_width: u32,
    viewport_height: u32,
    app: AppHandle,
    state: State<'_, AppState>,
) -> Result<FrameReport, String> {
    let tracker = state.tracker.as_ref()
        .ok_or("Hand tracker not initialized")?;

    let timestamp = chrono::Utc::now().timestamp_millis();
    let frame = RawFrame {
        timestamp,
        width,
        height,
        data: frame_data,
        format: PixelFormat::Rgba8,
    };

    let hands = tracker
        .detect(&frame)
        .await
        .map_err(|e| format!("Hand detection failed: {}", e))?;

    let report = {
        let mut engine = state
            .engine
            .lock()
            .map_err(|e| format!("Failed to lock engine: {}", e))?;
        engine.process_frame(&hands, timestamp, viewport_width, viewport_height)
    };

    if let Some(action) = report.action {
        let payload = GestureEventPayload {
            timestamp: report.timestamp,
            label: report.confirmed_label,
            action,
            selected_index: report.selected_index,
            paused: report.paused,
        };
        if let Err(e) = app.emit("gesture://action", payload) {
            eprintln!("Failed to emit gesture action: {}", e);
        }
    }

    Ok(report)
}

// Demo UI commands (the list buttons mirror the gestures)
#[tauri::command]
fn toggle_pause(state: State<'_, AppState>) -> Result<bool, String> {
    let mut engine = state
        .engine
        .lock()
        .map_err(|e| format!("Failed to lock engine: {}", e))?;

    Ok(engine.toggle_pause())
}

#[tauri::command]
fn next_item(state: State<'_, AppState>) -> Result<ListState, String> {
    apply_list_action(&state, GestureAction::NextItem)
}

#[tauri::command]
fn previous_item(state: State<'_, AppState>) -> Result<ListState, String> {
    apply_list_action(&state, GestureAction::PreviousItem)
}

#[tauri::command]
fn refresh_list(state: State<'_, AppState>) -> Result<ListState, String> {
    apply_list_action(&state, GestureAction::Refresh)
}

#[tauri::command]
fn get_list_state(state: State<'_, AppState>) -> Result<ListState, String> {
    let engine = state
        .engine
        .lock()
        .map_err(|e| format!("Failed to lock engine: {}", e))?;

    Ok(engine.list_state())
}

#[tauri::command]
fn get_current_gesture(state: State<'_, AppState>) -> Result<GestureLabel, String> {
    let engine = state
        .engine
        .lock()
        .map_err(|e| format!("Failed to lock engine: {}", e))?;

    Ok(engine.current_label())
}

fn apply_list_action(
    state: &State<'_, AppState>,
    action: GestureAction,
) -> Result<ListState, String> {
    let mut engine = state
        .engine
        .lock()
        .map_err(|e| format!("Failed to lock engine: {}", e))?;

    engine.apply_action(action);
    Ok(engine.list_state())
}

// Model cache commands
#[tauri::command]
fn get_model_cache_size(state: State<'_, AppState>) -> Result<u64, String> {
    state
        .model_manager
        .get_cache_size()
        .map_err(|e| format!("Failed to read model cache: {}", e))
}

#[tauri::command]
fn clear_model_cache(state: State<'_, AppState>) -> Result<(), String> {
    state
        .model_manager
        .clear_cache()
        .map_err(|e| format!("Failed to clear model cache: {}", e))
}

#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    tauri::Builder::default()
        .plugin(tauri_plugin_opener::init())
        .setup(|app| {
            let config = Config::load()
                .expect("Failed to load configuration");

            let model_manager = ModelManager::with_default_cache()
                .expect("Failed to initialize model cache");

            // Try to initialize the hand tracker (requires the ML backend)
            let tracker = match DefaultHandTracker::new(&config.tracker_config()) {
                Ok(bridge) => {
                    println!("Hand tracker initialized: {}", bridge.get_model_info());
                    Some(GestureTracker::new(Box::new(bridge)))
                }
                Err(e) => {
                    eprintln!("Warning: Failed to initialize hand tracker: {}", e);
                    eprintln!("Gesture detection will be unavailable");
                    None
                }
            };

            let engine = GestureEngine::new(&config);

            app.manage(AppState {
                config: Mutex::new(config),
                engine: Mutex::new(engine),
                tracker,
                model_manager,
            });

            Ok(())
        })
        .invoke_handler(tauri::generate_handler![
            get_config,
            update_config,
            reset_config,
            start_hand_tracking,
            stop_hand_tracking,
            get_tracking_status,
            process_video_frame,
            toggle_pause,
            next_item,
            previous_item,
            refresh_list,
            get_list_state,
            get_current_gesture,
            get_model_cache_size,
            clear_model_cache
        ])
        .run(tauri::generate_context!())
        .expect("error while running tauri application");
}

// Hand-tracking session lifecycle around the detector bridge

use crate::models::frame::RawFrame;
use crate::models::hand::{
    HandObservation, TrackerConfig, TrackerError, TrackerResult,
};
use crate::platform::tracker::HandTrackerBridge;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

/// Owns the detector bridge and the tracking-session state
///
/// The tracker only produces hand observations; gesture state lives in the
/// GestureEngine so that detection and session logic stay independent.
pub struct GestureTracker {
    bridge: Box<dyn HandTrackerBridge>,
    config: Arc<RwLock<TrackerConfig>>,
    current_session_id: Arc<RwLock<Option<String>>>,
    is_tracking: Arc<RwLock<bool>>,
}

impl GestureTracker {
    pub fn new(bridge: Box<dyn HandTrackerBridge>) -> Self {
        Self {
            bridge,
            config: Arc::new(RwLock::new(TrackerConfig::default())),
            current_session_id: Arc::new(RwLock::new(None)),
            is_tracking: Arc::new(RwLock::new(false)),
        }
    }

    /// Start a tracking session
    pub async fn start_tracking(&self, config: TrackerConfig) -> TrackerResult<String> {
        let mut is_tracking = self.is_tracking.write().await;
        if *is_tracking {
            return Err(TrackerError::AlreadyTracking);
        }

        let session_id = Uuid::new_v4().to_string();
        *self.current_session_id.write().await = Some(session_id.clone());
        *self.config.write().await = config;
        *is_tracking = true;

        println!("Started hand tracking for session {}", session_id);
        Ok(session_id)
    }

    /// Stop the tracking session
    pub async fn stop_tracking(&self) -> TrackerResult<()> {
        let mut is_tracking = self.is_tracking.write().await;
        if !*is_tracking {
            return Ok(());
        }

        *is_tracking = false;
        *self.current_session_id.write().await = None;

        println!("Stopped hand tracking");
        Ok(())
    }

    pub async fn is_tracking(&self) -> bool {
        *self.is_tracking.read().await
    }

    pub async fn session_id(&self) -> Option<String> {
        self.current_session_id.read().await.clone()
    }

    pub fn get_model_info(&self) -> String {
        self.bridge.get_model_info()
    }

    /// Detect hands in one frame
    ///
    /// Observations under the detection-confidence floor are dropped and the
    /// result is capped at the configured hand count.
    pub async fn detect(&self, frame: &RawFrame) -> TrackerResult<Vec<HandObservation>> {
        if !*self.is_tracking.read().await {
            return Err(TrackerError::NotTracking);
        }

        if frame.data.len() != frame.expected_len() {
            return Err(TrackerError::InferenceFailed(format!(
                "Frame size mismatch: expected {} bytes for {}x{}, got {}",
                frame.expected_len(),
                frame.width,
                frame.height,
                frame.data.len()
            )));
        }

        let config = self.config.read().await.clone();

        let mut hands =
            self.bridge
                .process_frame(&frame.data, frame.width, frame.height)?;

        hands.retain(|hand| hand.confidence >= config.min_detection_confidence);
        hands.truncate(config.max_hands as usize);

        Ok(hands)
    }
}

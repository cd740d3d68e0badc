// Hand-landmark detector bridge
// Abstraction over the external MediaPipe Hands model; the Rust side never
// sees the model internals, only 21-landmark observations per detected hand

use crate::models::hand::{HandObservation, TrackerConfig, TrackerResult};

/// Hand tracker bridge trait
/// Implement this for the PyO3/MediaPipe backend or a stub
pub trait HandTrackerBridge: Send + Sync {
    /// Initialize the detector
    fn new(config: &TrackerConfig) -> TrackerResult<Self>
    where
        Self: Sized;

    /// Run hand detection on a frame, returning 0..=max_hands observations
    fn process_frame(
        &self,
        frame_data: &[u8],
        width: u32,
        height: u32,
    ) -> TrackerResult<Vec<HandObservation>>;

    /// Check if the detector is loaded
    fn is_initialized(&self) -> bool;

    /// Get detector info for the status display
    fn get_model_info(&self) -> String;
}

// ==============================================================================
// PyO3 Implementation (Python MediaPipe)
// ==============================================================================

#[cfg(feature = "ml-pyo3")]
pub mod pyo3_backend {
    use super::*;
    use crate::core::ml_models::{mediapipe, ModelManager};
    use crate::models::hand::{Handedness, Landmark, TrackerError};
    use pyo3::prelude::*;
    use pyo3::types::{PyBytes, PyDict};
    use serde_json::Value;

    pub struct PyO3HandTracker {
        // Python inference module
        inference_module: PyObject,
        config: TrackerConfig,
        model_path: String,
        initialized: bool,
    }

    impl HandTrackerBridge for PyO3HandTracker {
        fn new(config: &TrackerConfig) -> TrackerResult<Self> {
            // The MediaPipe Tasks API needs the .task asset on disk
            let manager = ModelManager::with_default_cache()
                .map_err(|e| TrackerError::ModelLoadFailed(e.to_string()))?;
            let model_path = manager
                .ensure_model(&mediapipe::hand_landmarker())
                .map_err(|e| TrackerError::ModelLoadFailed(e.to_string()))?;
            let model_path = model_path.to_string_lossy().into_owned();

            Python::with_gil(|py| {
                let sys = py.import("sys").map_err(|e| {
                    TrackerError::ModelLoadFailed(format!("Failed to import sys: {}", e))
                })?;

                let path_list = sys.getattr("path").map_err(|e| {
                    TrackerError::ModelLoadFailed(format!("Failed to get sys.path: {}", e))
                })?;

                // Get the path to the python directory (relative to Cargo.toml)
                let python_dir = std::env::current_dir().unwrap_or_default().join("python");

                path_list
                    .call_method1("insert", (0, python_dir.to_str().unwrap()))
                    .map_err(|e| {
                        TrackerError::ModelLoadFailed(format!(
                            "Failed to add python dir to path: {}",
                            e
                        ))
                    })?;

                let inference_module = py.import("hand_inference").map_err(|e| {
                    TrackerError::ModelLoadFailed(format!(
                        "Failed to import hand_inference: {}. Make sure Python dependencies are installed (pip install -r requirements.txt)",
                        e
                    ))
                })?;

                println!(
                    "PyO3HandTracker initialized: max_hands={}, detection_confidence={}",
                    config.max_hands, config.min_detection_confidence
                );

                Ok(Self {
                    inference_module: inference_module.into(),
                    config: config.clone(),
                    model_path,
                    initialized: true,
                })
            })
        }

        fn process_frame(
            &self,
            frame_data: &[u8],
            width: u32,
            height: u32,
        ) -> TrackerResult<Vec<HandObservation>> {
            Python::with_gil(|py| {
                let module = self.inference_module.as_ref(py);

                let detect_fn = module.getattr("detect_hands").map_err(|e| {
                    TrackerError::InferenceFailed(format!("Failed to get detect_hands: {}", e))
                })?;

                let image_bytes = PyBytes::new(py, frame_data);

                let kwargs = PyDict::new(py);
                kwargs
                    .set_item("image_bytes", image_bytes)
                    .map_err(|e| TrackerError::InferenceFailed(format!("Failed to set image_bytes: {}", e)))?;
                kwargs
                    .set_item("width", width)
                    .map_err(|e| TrackerError::InferenceFailed(format!("Failed to set width: {}", e)))?;
                kwargs
                    .set_item("height", height)
                    .map_err(|e| TrackerError::InferenceFailed(format!("Failed to set height: {}", e)))?;
                kwargs
                    .set_item("model_path", self.model_path.as_str())
                    .map_err(|e| TrackerError::InferenceFailed(format!("Failed to set model_path: {}", e)))?;
                kwargs
                    .set_item("max_hands", self.config.max_hands)
                    .map_err(|e| TrackerError::InferenceFailed(format!("Failed to set max_hands: {}", e)))?;
                kwargs
                    .set_item(
                        "min_detection_confidence",
                        self.config.min_detection_confidence,
                    )
                    .map_err(|e| TrackerError::InferenceFailed(format!("Failed to set min_detection_confidence: {}", e)))?;
                kwargs
                    .set_item(
                        "min_tracking_confidence",
                        self.config.min_tracking_confidence,
                    )
                    .map_err(|e| TrackerError::InferenceFailed(format!("Failed to set min_tracking_confidence: {}", e)))?;

                let result_json = detect_fn.call((), Some(kwargs)).map_err(|e| {
                    TrackerError::InferenceFailed(format!("MediaPipe inference failed: {}", e))
                })?;

                let json_str: String = result_json.extract().map_err(|e| {
                    TrackerError::InferenceFailed(format!("Failed to extract JSON: {}", e))
                })?;

                let result: Value = serde_json::from_str(&json_str).map_err(|e| {
                    TrackerError::InferenceFailed(format!("Failed to parse JSON: {}", e))
                })?;

                let hands = result
                    .get("hands")
                    .and_then(|h| h.as_array())
                    .map(|hands_array| {
                        hands_array
                            .iter()
                            .filter_map(|hand| Self::parse_hand(hand).ok())
                            .collect()
                    })
                    .unwrap_or_default();

                Ok(hands)
            })
        }

        fn is_initialized(&self) -> bool {
            self.initialized
        }

        fn get_model_info(&self) -> String {
            format!(
                "PyO3 MediaPipe Hands (Python backend) - max hands: {}, model: {}",
                self.config.max_hands, self.model_path
            )
        }
    }

    impl PyO3HandTracker {
        fn parse_hand(data: &Value) -> TrackerResult<HandObservation> {
            let keypoints = data
                .get("landmarks")
                .and_then(|k| k.as_array())
                .ok_or_else(|| {
                    TrackerError::InferenceFailed("Missing hand landmarks".to_string())
                })?;

            let landmarks: Vec<Landmark> = keypoints
                .iter()
                .map(|kp| Landmark {
                    x: kp.get("x").and_then(|v| v.as_f64()).unwrap_or(0.0) as f32,
                    y: kp.get("y").and_then(|v| v.as_f64()).unwrap_or(0.0) as f32,
                    z: kp.get("z").and_then(|v| v.as_f64()).unwrap_or(0.0) as f32,
                })
                .collect();

            let handedness = match data.get("handedness").and_then(|t| t.as_str()) {
                Some("Left") | Some("left") => Handedness::Left,
                _ => Handedness::Right,
            };

            let confidence = data
                .get("confidence")
                .and_then(|c| c.as_f64())
                .unwrap_or(0.0) as f32;

            // The 21-point contract is enforced here, at the boundary
            HandObservation::from_landmarks(landmarks, handedness, confidence)
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;
        use crate::models::hand::HAND_LANDMARK_COUNT;
        use serde_json::json;

        #[test]
        fn test_parse_hand_enforces_landmark_count() {
            let short = json!({
                "landmarks": [{"x": 0.1, "y": 0.2, "z": 0.0}],
                "handedness": "Left",
                "confidence": 0.9
            });
            assert!(matches!(
                PyO3HandTracker::parse_hand(&short),
                Err(TrackerError::InvalidLandmarkCount { .. })
            ));
        }

        #[test]
        fn test_parse_hand_full_set() {
            let points: Vec<Value> = (0..HAND_LANDMARK_COUNT)
                .map(|i| json!({"x": 0.1, "y": 0.01 * i as f64, "z": 0.0}))
                .collect();
            let payload = json!({
                "landmarks": points,
                "handedness": "Right",
                "confidence": 0.85
            });

            let hand = PyO3HandTracker::parse_hand(&payload).unwrap();
            assert_eq!(hand.landmarks().len(), HAND_LANDMARK_COUNT);
            assert_eq!(hand.handedness, Handedness::Right);
            assert!((hand.confidence - 0.85).abs() < 1e-6);
        }
    }
}

// ==============================================================================
// Dummy Implementation (for compilation without ML features)
// ==============================================================================

#[cfg(not(feature = "ml-pyo3"))]
pub struct DummyHandTracker {
    config: TrackerConfig,
}

#[cfg(not(feature = "ml-pyo3"))]
impl HandTrackerBridge for DummyHandTracker {
    fn new(config: &TrackerConfig) -> TrackerResult<Self> {
        println!("Using dummy hand tracker (no inference)");
        println!("Enable the 'ml-pyo3' feature for actual hand detection");
        Ok(Self {
            config: config.clone(),
        })
    }

    fn process_frame(
        &self,
        _frame_data: &[u8],
        _width: u32,
        _height: u32,
    ) -> TrackerResult<Vec<HandObservation>> {
        Ok(vec![])
    }

    fn is_initialized(&self) -> bool {
        false
    }

    fn get_model_info(&self) -> String {
        format!(
            "Dummy hand tracker (no ML inference - enable 'ml-pyo3'; max hands: {})",
            self.config.max_hands
        )
    }
}

// ==============================================================================
// Default Backend Selection
// ==============================================================================

#[cfg(feature = "ml-pyo3")]
pub type DefaultHandTracker = pyo3_backend::PyO3HandTracker;

#[cfg(not(feature = "ml-pyo3"))]
pub type DefaultHandTracker = DummyHandTracker;

#[cfg(all(test, not(feature = "ml-pyo3")))]
mod tests {
    use super::*;

    #[test]
    fn test_dummy_tracker_reports_no_hands() {
        let tracker = DummyHandTracker::new(&TrackerConfig::default()).unwrap();
        assert!(!tracker.is_initialized());

        let hands = tracker.process_frame(&[0u8; 16], 2, 2).unwrap();
        assert!(hands.is_empty());
    }
}

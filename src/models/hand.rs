// Data models for hand-landmark tracking

use serde::{Deserialize, Serialize};

// ==============================================================================
// Landmarks
// ==============================================================================

/// Number of landmarks the detector reports per hand
pub const HAND_LANDMARK_COUNT: usize = 21;

/// A single normalized hand landmark
///
/// `x` and `y` are image-relative in `[0, 1]` with y growing downward;
/// `z` is depth relative to the wrist.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Landmark {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Landmark {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }
}

/// MediaPipe Hand Landmark indices (21 total)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum HandLandmark {
    Wrist = 0,
    ThumbCmc = 1,
    ThumbMcp = 2,
    ThumbIp = 3,
    ThumbTip = 4,
    IndexFingerMcp = 5,
    IndexFingerPip = 6,
    IndexFingerDip = 7,
    IndexFingerTip = 8,
    MiddleFingerMcp = 9,
    MiddleFingerPip = 10,
    MiddleFingerDip = 11,
    MiddleFingerTip = 12,
    RingFingerMcp = 13,
    RingFingerPip = 14,
    RingFingerDip = 15,
    RingFingerTip = 16,
    PinkyMcp = 17,
    PinkyPip = 18,
    PinkyDip = 19,
    PinkyTip = 20,
}

impl HandLandmark {
    pub const fn index(self) -> usize {
        self as usize
    }
}

// ==============================================================================
// Hand Observation
// ==============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Handedness {
    Left,
    Right,
}

impl Handedness {
    pub fn as_str(&self) -> &'static str {
        match self {
            Handedness::Left => "left",
            Handedness::Right => "right",
        }
    }
}

/// The full landmark set for one detected hand in one frame
///
/// The landmark count is a contract with the detector: anything other than
/// exactly 21 points is rejected at construction rather than classified
/// partially.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HandObservation {
    landmarks: Vec<Landmark>,
    pub handedness: Handedness,
    pub confidence: f32,
}

impl HandObservation {
    pub fn from_landmarks(
        landmarks: Vec<Landmark>,
        handedness: Handedness,
        confidence: f32,
    ) -> TrackerResult<Self> {
        if landmarks.len() != HAND_LANDMARK_COUNT {
            return Err(TrackerError::InvalidLandmarkCount {
                expected: HAND_LANDMARK_COUNT,
                actual: landmarks.len(),
            });
        }

        Ok(Self {
            landmarks,
            handedness,
            confidence,
        })
    }

    /// Landmark position by anatomical index
    pub fn landmark(&self, which: HandLandmark) -> Landmark {
        self.landmarks[which.index()]
    }

    pub fn landmarks(&self) -> &[Landmark] {
        &self.landmarks
    }
}

// ==============================================================================
// Configuration
// ==============================================================================

/// Per-session detector configuration, passed through to the bridge
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackerConfig {
    /// Minimum confidence for a hand to be detected (default: 0.7)
    pub min_detection_confidence: f32,
    /// Minimum confidence for a hand to keep being tracked (default: 0.7)
    pub min_tracking_confidence: f32,
    /// Maximum number of hands reported per frame (1 or 2)
    pub max_hands: u32,
    /// Frames per second the frontend should ship (default: 30)
    pub target_fps: u32,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            min_detection_confidence: 0.7,
            min_tracking_confidence: 0.7,
            max_hands: 2,
            target_fps: 30,
        }
    }
}

// ==============================================================================
// Error Types
// ==============================================================================

#[derive(Debug, thiserror::Error)]
pub enum TrackerError {
    #[error("Hand tracker not initialized")]
    NotInitialized,

    #[error("Hand tracking already running")]
    AlreadyTracking,

    #[error("Hand tracking not running")]
    NotTracking,

    #[error("Model loading failed: {0}")]
    ModelLoadFailed(String),

    #[error("Inference failed: {0}")]
    InferenceFailed(String),

    #[error("Invalid landmark count: expected {expected}, got {actual}")]
    InvalidLandmarkCount { expected: usize, actual: usize },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Not supported on this platform")]
    NotSupported,
}

pub type TrackerResult<T> = Result<T, TrackerError>;

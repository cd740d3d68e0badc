// Data models for gesture classification and the demo UI state

use serde::{Deserialize, Serialize};

// ==============================================================================
// Gesture Labels
// ==============================================================================

/// Static hand pose recognized in a single frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GestureLabel {
    NoGesture,
    ThumbsUp,
    ThumbsDown,
    RockSign,
    Point,
    Stop,
}

impl GestureLabel {
    /// All labels the classifier can produce
    pub fn all() -> Vec<GestureLabel> {
        vec![
            GestureLabel::NoGesture,
            GestureLabel::ThumbsUp,
            GestureLabel::ThumbsDown,
            GestureLabel::RockSign,
            GestureLabel::Point,
            GestureLabel::Stop,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GestureLabel::NoGesture => "no_gesture",
            GestureLabel::ThumbsUp => "thumbs_up",
            GestureLabel::ThumbsDown => "thumbs_down",
            GestureLabel::RockSign => "rock_sign",
            GestureLabel::Point => "point",
            GestureLabel::Stop => "stop",
        }
    }

    /// Parse a label from its string form
    pub fn from_string(s: &str) -> Result<Self, String> {
        match s.to_lowercase().as_str() {
            "no_gesture" => Ok(GestureLabel::NoGesture),
            "thumbs_up" => Ok(GestureLabel::ThumbsUp),
            "thumbs_down" => Ok(GestureLabel::ThumbsDown),
            "rock_sign" => Ok(GestureLabel::RockSign),
            "point" => Ok(GestureLabel::Point),
            "stop" => Ok(GestureLabel::Stop),
            _ => Err(format!("Unknown gesture label: {}", s)),
        }
    }

    /// Human-readable form for the status display
    pub fn display_name(&self) -> &'static str {
        match self {
            GestureLabel::NoGesture => "No Gesture",
            GestureLabel::ThumbsUp => "Thumbs Up",
            GestureLabel::ThumbsDown => "Thumbs Down",
            GestureLabel::RockSign => "Rock Sign",
            GestureLabel::Point => "Point",
            GestureLabel::Stop => "Stop",
        }
    }
}

// ==============================================================================
// Actions
// ==============================================================================

/// UI mutation triggered by a confirmed gesture
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GestureAction {
    PreviousItem,
    NextItem,
    Refresh,
    TogglePause,
}

impl GestureAction {
    /// The single gesture-to-action mapping point
    ///
    /// Point and NoGesture never dispatch; Point drives the cursor instead.
    pub fn for_label(label: GestureLabel) -> Option<GestureAction> {
        match label {
            GestureLabel::ThumbsUp => Some(GestureAction::PreviousItem),
            GestureLabel::ThumbsDown => Some(GestureAction::NextItem),
            GestureLabel::RockSign => Some(GestureAction::Refresh),
            GestureLabel::Stop => Some(GestureAction::TogglePause),
            GestureLabel::Point | GestureLabel::NoGesture => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GestureAction::PreviousItem => "previous_item",
            GestureAction::NextItem => "next_item",
            GestureAction::Refresh => "refresh",
            GestureAction::TogglePause => "toggle_pause",
        }
    }
}

// ==============================================================================
// Per-frame DTOs
// ==============================================================================

/// Cursor position in display pixels, present only on Point frames
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CursorPosition {
    pub x: f32,
    pub y: f32,
}

/// Result of one frame-processing cycle, returned to the frontend
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FrameReport {
    pub timestamp: i64,
    /// Label produced by the classifier for this frame
    pub raw_label: GestureLabel,
    /// Label the stability filter currently stands behind
    pub confirmed_label: GestureLabel,
    /// Action dispatched this frame, if a confirmation fired
    pub action: Option<GestureAction>,
    pub cursor: Option<CursorPosition>,
    pub hands_detected: usize,
    pub selected_index: usize,
    pub paused: bool,
}

/// Payload of the `gesture://action` event
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GestureEventPayload {
    pub timestamp: i64,
    pub label: GestureLabel,
    pub action: GestureAction,
    pub selected_index: usize,
    pub paused: bool,
}

/// Snapshot of the demo list for the frontend
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListState {
    pub items: Vec<String>,
    pub selected_index: usize,
}

/// Snapshot of the tracking session for the frontend
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackingStatus {
    pub is_tracking: bool,
    pub session_id: Option<String>,
    pub model_info: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_string_round_trip() {
        for label in GestureLabel::all() {
            assert_eq!(GestureLabel::from_string(label.as_str()).unwrap(), label);
        }
        assert!(GestureLabel::from_string("wave").is_err());
    }

    #[test]
    fn test_action_mapping() {
        assert_eq!(
            GestureAction::for_label(GestureLabel::ThumbsUp),
            Some(GestureAction::PreviousItem)
        );
        assert_eq!(
            GestureAction::for_label(GestureLabel::ThumbsDown),
            Some(GestureAction::NextItem)
        );
        assert_eq!(
            GestureAction::for_label(GestureLabel::RockSign),
            Some(GestureAction::Refresh)
        );
        assert_eq!(
            GestureAction::for_label(GestureLabel::Stop),
            Some(GestureAction::TogglePause)
        );
        assert_eq!(GestureAction::for_label(GestureLabel::Point), None);
        assert_eq!(GestureAction::for_label(GestureLabel::NoGesture), None);
    }

    #[test]
    fn test_display_names() {
        assert_eq!(GestureLabel::NoGesture.display_name(), "No Gesture");
        assert_eq!(GestureLabel::ThumbsUp.display_name(), "Thumbs Up");
    }
}

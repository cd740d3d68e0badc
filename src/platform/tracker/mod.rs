// Hand tracking platform integration
// Provides the detector bridge and backend selection

pub mod hand_bridge;

pub use hand_bridge::{DefaultHandTracker, HandTrackerBridge};

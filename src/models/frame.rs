// Frame hand-off format between the frontend capture layer and the tracker

use serde::{Deserialize, Serialize};

/// A video frame as shipped by the frontend
#[derive(Debug, Clone)]
pub struct RawFrame {
    pub timestamp: i64,
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>,
    pub format: PixelFormat,
}

/// Pixel format of incoming frames
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PixelFormat {
    Rgba8,
    Bgra8,
}

impl RawFrame {
    /// Expected byte length for the frame dimensions (4 bytes per pixel)
    pub fn expected_len(&self) -> usize {
        (self.width as usize) * (self.height as usize) * 4
    }
}

//! Frame source module for framestep
//!
//! This module handles frame-accurate access to a video file through
//! OpenCV's videoio. The application never decodes anything itself; it
//! only steps and seeks the capture and consumes the frames it yields.

mod opencv_source;

pub use opencv_source::OpenCvFrameSource;

use crate::utils::error::Result;
use opencv::core::Mat;
use std::path::Path;
use std::time::Duration;

/// Metadata read from an opened stream
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SourceInfo {
    /// Total number of frames in the stream
    pub frame_count: u64,

    /// Frames per second from the container metadata; may be zero or
    /// NaN for sources that do not report a rate
    pub fps: f64,

    /// Frame width in pixels
    pub width: u32,

    /// Frame height in pixels
    pub height: u32,
}

impl SourceInfo {
    /// Interval between frames at the source rate, used to pace the
    /// playing-state key wait. Falls back to `fallback_fps` when the
    /// metadata rate is absent or nonsensical.
    pub fn frame_interval(&self, fallback_fps: f64) -> Duration {
        let fps = if self.fps.is_finite() && self.fps > 0.0 {
            self.fps
        } else {
            fallback_fps
        };
        Duration::from_secs_f64(1.0 / fps)
    }
}

/// FrameSource trait defining the decoding side of the external
/// collaborator
///
/// The position invariant lives in the controller; a source only exposes
/// the raw capture operations: open, sequential read, absolute seek.
pub trait FrameSource {
    /// Open a video file and read its metadata
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the video file
    ///
    /// # Returns
    ///
    /// Returns the stream metadata or an error
    fn open(&mut self, path: &Path) -> Result<SourceInfo>;

    /// Read the next sequential frame
    ///
    /// # Returns
    ///
    /// Returns the decoded frame, or an error when the decoder yields
    /// nothing (end of stream or a failed read; callers do not need to
    /// distinguish the two)
    fn read_next(&mut self) -> Result<Mat>;

    /// Position the stream so the next read returns the given frame index
    ///
    /// # Arguments
    ///
    /// * `index` - Zero-based frame index
    fn seek_to(&mut self, index: u64) -> Result<()>;

    /// Release the underlying capture
    fn close(&mut self) -> Result<()>;
}

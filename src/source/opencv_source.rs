//! OpenCV-backed frame source implementation
//!
//! Wraps `videoio::VideoCapture` behind the FrameSource trait. All
//! container parsing and decoding is delegated to OpenCV; this type only
//! maps capture calls and properties onto the trait surface.

use crate::source::{FrameSource, SourceInfo};
use crate::utils::error::{IntoPlayerError, PlayerError, Result};
use log::{debug, warn};
use opencv::core::Mat;
use opencv::prelude::*;
use opencv::videoio;
use std::path::Path;

/// Frame source backed by an OpenCV capture
pub struct OpenCvFrameSource {
    /// The open capture, None until a successful open
    capture: Option<videoio::VideoCapture>,
}

impl OpenCvFrameSource {
    /// Create an unopened frame source
    pub fn new() -> Self {
        Self { capture: None }
    }

    fn capture_mut(&mut self) -> Result<&mut videoio::VideoCapture> {
        self.capture
            .as_mut()
            .ok_or_else(|| PlayerError::read_error("no open stream"))
    }
}

impl Default for OpenCvFrameSource {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameSource for OpenCvFrameSource {
    fn open(&mut self, path: &Path) -> Result<SourceInfo> {
        // Reopening releases the previous capture
        self.capture = None;

        let path_str = path.to_string_lossy();
        let capture = videoio::VideoCapture::from_file(&path_str, videoio::CAP_ANY)
            .open_err("creating capture")?;

        if !capture.is_opened().open_err("querying capture state")? {
            return Err(PlayerError::Open(format!(
                "cannot open video file: {}",
                path_str
            )));
        }

        let frame_count = capture
            .get(videoio::CAP_PROP_FRAME_COUNT)
            .open_err("reading frame count")?;
        if frame_count < 1.0 {
            return Err(PlayerError::Open(format!(
                "stream reports no frames: {}",
                path_str
            )));
        }

        let fps = capture.get(videoio::CAP_PROP_FPS).open_err("reading fps")?;
        let width = capture
            .get(videoio::CAP_PROP_FRAME_WIDTH)
            .open_err("reading width")?;
        let height = capture
            .get(videoio::CAP_PROP_FRAME_HEIGHT)
            .open_err("reading height")?;

        let info = SourceInfo {
            frame_count: frame_count as u64,
            fps,
            width: width as u32,
            height: height as u32,
        };

        debug!("Opened {}: {:?}", path_str, info);

        self.capture = Some(capture);
        Ok(info)
    }

    fn read_next(&mut self) -> Result<Mat> {
        let capture = self.capture_mut()?;

        let mut frame = Mat::default();
        if !capture.read(&mut frame).read_err("reading next frame")? || frame.empty() {
            return Err(PlayerError::read_error("decoder returned no frame"));
        }

        Ok(frame)
    }

    fn seek_to(&mut self, index: u64) -> Result<()> {
        let capture = self.capture_mut()?;

        if !capture
            .set(videoio::CAP_PROP_POS_FRAMES, index as f64)
            .read_err("positioning stream")?
        {
            return Err(PlayerError::Read(format!("seek to frame {} failed", index)));
        }

        Ok(())
    }

    fn close(&mut self) -> Result<()> {
        if let Some(mut capture) = self.capture.take() {
            capture.release().read_err("releasing capture")?;
        }
        Ok(())
    }
}

impl Drop for OpenCvFrameSource {
    fn drop(&mut self) {
        if let Err(e) = self.close() {
            warn!("Failed to release capture: {}", e);
        }
    }
}

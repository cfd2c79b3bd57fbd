//! Integration test utilities for framestep
//!
//! This module provides common utilities for integration testing:
//! - A mock frame source with failure injection
//! - A scripted display that replays input events and records output
//! - A scripted console that replays prompt entries and records messages

use framestep::display::{Display, InputEvent};
use framestep::source::{FrameSource, SourceInfo};
use framestep::utils::error::{PlayerError, Result};
use opencv::core::{Mat, Scalar, CV_8UC1};
use opencv::prelude::*;
use std::collections::VecDeque;
use std::path::Path;
use std::time::Duration;

/// Build a 1x1 frame whose pixel value encodes the frame index
pub fn index_frame(index: u64) -> Mat {
    Mat::new_rows_cols_with_default(1, 1, CV_8UC1, Scalar::all(index as f64))
        .expect("frame allocation")
}

/// Recover the frame index encoded by [`index_frame`]
pub fn frame_index(frame: &Mat) -> u64 {
    *frame.at_2d::<u8>(0, 0).expect("1x1 frame") as u64
}

/// Mock frame source over a synthetic fixed-length stream
///
/// Sequential reads walk a cursor exactly like a capture does, so
/// cursor/position consistency bugs in the controller are visible here.
pub struct MockFrameSource {
    frame_count: u64,
    fps: f64,
    cursor: u64,
    opened: bool,
    /// Inject a read failure at this frame index
    pub fail_read_at: Option<u64>,
    /// Inject a seek failure for this target index
    pub fail_seek_to: Option<u64>,
}

impl MockFrameSource {
    pub fn new(frame_count: u64) -> Self {
        Self {
            frame_count,
            fps: 30.0,
            cursor: 0,
            opened: false,
            fail_read_at: None,
            fail_seek_to: None,
        }
    }

    pub fn with_fps(mut self, fps: f64) -> Self {
        self.fps = fps;
        self
    }
}

impl FrameSource for MockFrameSource {
    fn open(&mut self, _path: &Path) -> Result<SourceInfo> {
        if self.frame_count == 0 {
            return Err(PlayerError::open_error("stream reports no frames"));
        }
        self.opened = true;
        self.cursor = 0;
        Ok(SourceInfo {
            frame_count: self.frame_count,
            fps: self.fps,
            width: 1,
            height: 1,
        })
    }

    fn read_next(&mut self) -> Result<Mat> {
        if !self.opened {
            return Err(PlayerError::read_error("no open stream"));
        }
        if self.cursor >= self.frame_count {
            return Err(PlayerError::read_error("end of stream"));
        }
        if self.fail_read_at == Some(self.cursor) {
            return Err(PlayerError::read_error("injected read failure"));
        }

        let frame = index_frame(self.cursor);
        self.cursor += 1;
        Ok(frame)
    }

    fn seek_to(&mut self, index: u64) -> Result<()> {
        if !self.opened {
            return Err(PlayerError::read_error("no open stream"));
        }
        if self.fail_seek_to == Some(index) {
            return Err(PlayerError::read_error("injected seek failure"));
        }
        self.cursor = index;
        Ok(())
    }

    fn close(&mut self) -> Result<()> {
        self.opened = false;
        Ok(())
    }
}

/// Display that replays a scripted input sequence and records output
///
/// `None` entries stand for a timed-out key wait. When the script runs
/// out, Quit is returned so a test can never hang in the event loop.
pub struct ScriptedDisplay {
    events: VecDeque<Option<InputEvent>>,
    /// Labels passed to show_frame, in order
    pub shown_labels: Vec<String>,
    /// Timeouts passed to wait_for_input, in order
    pub waits: Vec<Option<Duration>>,
    /// Whether close was called
    pub closed: bool,
}

impl ScriptedDisplay {
    pub fn new(events: Vec<Option<InputEvent>>) -> Self {
        Self {
            events: events.into(),
            shown_labels: Vec::new(),
            waits: Vec::new(),
            closed: false,
        }
    }
}

impl Display for ScriptedDisplay {
    fn show_frame(&mut self, _frame: &Mat, label: &str) -> Result<()> {
        self.shown_labels.push(label.to_string());
        Ok(())
    }

    fn wait_for_input(&mut self, timeout: Option<Duration>) -> Result<Option<InputEvent>> {
        self.waits.push(timeout);
        Ok(self.events.pop_front().unwrap_or(Some(InputEvent::Quit)))
    }

    fn close(&mut self) -> Result<()> {
        self.closed = true;
        Ok(())
    }
}

/// Console that replays scripted prompt entries and records all output
pub struct ScriptedConsole {
    entries: VecDeque<String>,
    /// Messages printed, in order
    pub messages: Vec<String>,
    /// Status lines written, in order
    pub statuses: Vec<String>,
    /// Prompts shown by read_line, in order
    pub prompts: Vec<String>,
}

impl ScriptedConsole {
    pub fn new(entries: Vec<&str>) -> Self {
        Self {
            entries: entries.into_iter().map(String::from).collect(),
            messages: Vec::new(),
            statuses: Vec::new(),
            prompts: Vec::new(),
        }
    }
}

impl framestep::console::Console for ScriptedConsole {
    fn status(&mut self, line: &str) -> Result<()> {
        self.statuses.push(line.to_string());
        Ok(())
    }

    fn message(&mut self, text: &str) -> Result<()> {
        self.messages.push(text.to_string());
        Ok(())
    }

    fn read_line(&mut self, prompt: &str) -> Result<String> {
        self.prompts.push(prompt.to_string());
        Ok(self.entries.pop_front().unwrap_or_default())
    }
}

//! Playback controller for framestep
//!
//! Owns the frame source, the decoded-frame slot, and the position
//! counter, and drives the interactive event loop. The position invariant
//! holds throughout: after any successful operation, `position` is the
//! index of the frame in the slot.

use crate::console::{parse_frame_entry, Console};
use crate::display::Display;
use crate::player::transition::{transition, Effect, PlaybackState};
use crate::source::{FrameSource, SourceInfo};
use crate::utils::error::{PlayerError, Result};
use log::{debug, info};
use opencv::core::Mat;
use std::path::Path;
use std::time::Duration;

const CONTROLS_BANNER: &[&str] = &[
    "=== Frame Browser Controls ===",
    "SPACE    : Play/Pause",
    "D        : Next frame",
    "A        : Previous frame",
    "H        : First frame",
    "E        : Last frame",
    "G        : Go to frame",
    "Q or ESC : Quit",
    "==============================",
];

/// Interactive frame browser over a single frame source
pub struct PlaybackController<S> {
    /// Exclusively owned stream handle
    source: S,

    /// Metadata of the loaded stream, None until load succeeds
    info: Option<SourceInfo>,

    /// Most recently read frame; replaced on every successful
    /// advance/seek, stale but retained after failed reads
    current_frame: Option<Mat>,

    /// Zero-based index of the frame in the slot
    position: u64,

    /// Pacing fallback when the source reports no rate
    fallback_fps: f64,
}

impl<S: FrameSource> PlaybackController<S> {
    /// Create a controller around an unopened source
    pub fn new(source: S, fallback_fps: f64) -> Self {
        Self {
            source,
            info: None,
            current_frame: None,
            position: 0,
            fallback_fps,
        }
    }

    /// Open a video file and fetch its first frame
    ///
    /// On failure the controller stays unopened; nothing of the previous
    /// state survives a reopen attempt either way.
    pub fn load(&mut self, path: &Path) -> Result<SourceInfo> {
        self.info = None;
        self.current_frame = None;
        self.position = 0;

        let info = self.source.open(path)?;
        if info.frame_count == 0 {
            return Err(PlayerError::Open(format!(
                "stream reports no frames: {}",
                path.display()
            )));
        }

        let first = self
            .source
            .read_next()
            .map_err(|e| PlayerError::Open(format!("cannot read first frame: {}", e)))?;

        self.info = Some(info);
        self.current_frame = Some(first);
        self.position = 0;

        info!(
            "Loaded {}: {} frames at {:.2} fps, {}x{}",
            path.display(),
            info.frame_count,
            info.fps,
            info.width,
            info.height
        );

        Ok(info)
    }

    /// Current zero-based position
    pub fn position(&self) -> u64 {
        self.position
    }

    /// Metadata of the loaded stream
    pub fn info(&self) -> Option<&SourceInfo> {
        self.info.as_ref()
    }

    /// The frame currently held in the slot
    pub fn current_frame(&self) -> Option<&Mat> {
        self.current_frame.as_ref()
    }

    fn require_info(&self) -> Result<SourceInfo> {
        self.info
            .ok_or_else(|| PlayerError::open_error("no video loaded"))
    }

    /// Read the next sequential frame
    ///
    /// Fails with OutOfRange at the last index and with Read when the
    /// decoder yields nothing mid-stream; position is unchanged on any
    /// failure (no silent skip).
    pub fn advance(&mut self) -> Result<()> {
        let info = self.require_info()?;
        if self.position + 1 >= info.frame_count {
            return Err(PlayerError::OutOfRange(format!(
                "already at last frame {}",
                self.position
            )));
        }

        let frame = self.source.read_next()?;
        self.position += 1;
        self.current_frame = Some(frame);
        Ok(())
    }

    /// Step back one frame via an absolute seek
    ///
    /// Position is committed only after the seek and read both succeed,
    /// so a failed retreat never leaves position and frame inconsistent.
    pub fn retreat(&mut self) -> Result<()> {
        self.require_info()?;
        if self.position == 0 {
            return Err(PlayerError::OutOfRange(
                "already at first frame".to_string(),
            ));
        }

        self.fetch_at(self.position - 1)
    }

    /// Jump to an absolute frame index
    pub fn seek(&mut self, target: u64) -> Result<()> {
        let info = self.require_info()?;
        if target >= info.frame_count {
            return Err(PlayerError::OutOfRange(format!(
                "frame {} outside 0..{}",
                target, info.frame_count
            )));
        }

        self.fetch_at(target)
    }

    /// Seek + read with commit-on-success semantics
    ///
    /// On failure the source cursor is re-positioned (best effort) so the
    /// sequential-read invariant (cursor at position + 1) still holds.
    fn fetch_at(&mut self, target: u64) -> Result<()> {
        let fetched = self
            .source
            .seek_to(target)
            .and_then(|_| self.source.read_next());

        match fetched {
            Ok(frame) => {
                self.position = target;
                self.current_frame = Some(frame);
                Ok(())
            }
            Err(e) => {
                debug!("fetch of frame {} failed: {}", target, e);
                let _ = self.source.seek_to(self.position + 1);
                Err(e)
            }
        }
    }

    /// Show the current frame with its position overlay; no-op when no
    /// frame is held
    pub fn render_current(&self, display: &mut dyn Display) -> Result<()> {
        let (frame, info) = match (&self.current_frame, &self.info) {
            (Some(frame), Some(info)) => (frame, info),
            _ => return Ok(()),
        };

        let label = format!("Frame: {}/{}", self.position + 1, info.frame_count);
        display.show_frame(frame, &label)
    }

    /// Emit the single-line, overwritten progress readout
    pub fn report_progress(&self, console: &mut dyn Console) -> Result<()> {
        let info = match &self.info {
            Some(info) => info,
            None => return Ok(()),
        };

        let shown = self.position + 1;
        let percent = shown as f64 / info.frame_count as f64 * 100.0;
        console.status(&format!(
            "Frame: {}/{} ({:.1}%)",
            shown, info.frame_count, percent
        ))
    }

    /// Key-wait bound while playing, derived from the source rate
    pub fn frame_interval(&self) -> Duration {
        match &self.info {
            Some(info) => info.frame_interval(self.fallback_fps),
            None => Duration::from_secs_f64(1.0 / self.fallback_fps),
        }
    }

    /// Drive the interactive session until the user quits
    ///
    /// Renders, reports progress, waits for input (indefinitely while
    /// paused, one frame interval while playing), then applies the pure
    /// transition and its effect.
    pub fn run_event_loop(
        &mut self,
        display: &mut dyn Display,
        console: &mut dyn Console,
    ) -> Result<()> {
        if self.current_frame.is_none() {
            return Err(PlayerError::open_error("no video loaded"));
        }

        for line in CONTROLS_BANNER {
            console.message(line)?;
        }

        let mut state = PlaybackState::Paused;
        while state != PlaybackState::Stopped {
            self.render_current(display)?;
            self.report_progress(console)?;

            let timeout = match state {
                PlaybackState::Playing => Some(self.frame_interval()),
                _ => None,
            };
            let event = display.wait_for_input(timeout)?;

            let step = transition(state, event);
            if step.state != state {
                match step.state {
                    PlaybackState::Playing => console.message("Playing")?,
                    PlaybackState::Paused => console.message("Paused")?,
                    PlaybackState::Stopped => {}
                }
            }
            state = step.state;

            if let Some(effect) = step.effect {
                state = self.apply_effect(effect, state, console)?;
            }
        }

        display.close()?;
        console.message("Playback stopped.")?;
        info!("Playback stopped");

        Ok(())
    }

    /// Carry out one transition effect, reporting recoverable failures
    /// on the console
    fn apply_effect(
        &mut self,
        effect: Effect,
        state: PlaybackState,
        console: &mut dyn Console,
    ) -> Result<PlaybackState> {
        match effect {
            Effect::Advance => match self.advance() {
                Ok(()) => Ok(state),
                Err(e) if e.is_recoverable() => {
                    console.message("End of video reached")?;
                    Ok(PlaybackState::Paused)
                }
                Err(e) => Err(e),
            },

            Effect::Retreat => match self.retreat() {
                Ok(()) => Ok(state),
                Err(e) if e.is_recoverable() => {
                    console.message("Beginning of video reached")?;
                    Ok(state)
                }
                Err(e) => Err(e),
            },

            Effect::JumpFirst => {
                let outcome = self.seek(0);
                self.report_jump(outcome, "Jumped to first frame", console)?;
                Ok(state)
            }

            Effect::JumpLast => {
                let last = self.require_info()?.frame_count - 1;
                let outcome = self.seek(last);
                self.report_jump(outcome, "Jumped to last frame", console)?;
                Ok(state)
            }

            Effect::PromptJump => {
                let frame_count = self.require_info()?.frame_count;
                let entry =
                    console.read_line(&format!("Enter frame number (1-{}): ", frame_count))?;

                match parse_frame_entry(&entry, frame_count) {
                    Ok(target) => {
                        let done = format!("Jumped to frame {}", target + 1);
                        let outcome = self.seek(target);
                        self.report_jump(outcome, &done, console)?;
                    }
                    Err(e) => {
                        debug!("rejected jump entry: {}", e);
                        console.message("Invalid frame number!")?;
                    }
                }
                Ok(state)
            }
        }
    }

    fn report_jump(
        &self,
        outcome: Result<()>,
        done: &str,
        console: &mut dyn Console,
    ) -> Result<()> {
        match outcome {
            Ok(()) => console.message(done),
            Err(e) if e.is_recoverable() => console.message(&format!("Seek failed: {}", e)),
            Err(e) => Err(e),
        }
    }
}

//! highgui-backed display implementation
//!
//! Renders frames into an OpenCV window, burns the position label into a
//! copy of the frame with put_text, and maps wait_key codes onto the
//! InputEvent enumeration.

use crate::display::{Display, InputEvent, OverlayStyle};
use crate::utils::error::{IntoPlayerError, Result};
use log::warn;
use opencv::core::{Mat, Point};
use opencv::prelude::*;
use opencv::{highgui, imgproc};
use std::time::Duration;

const KEY_ESCAPE: i32 = 27;

/// Display implementation backed by an OpenCV highgui window
pub struct HighguiDisplay {
    /// Window name, doubles as the highgui window handle
    window_name: String,

    /// Overlay styling for the position label
    style: OverlayStyle,

    /// Whether the window has been created
    window_open: bool,
}

impl HighguiDisplay {
    /// Create a display; the window itself is created lazily on the
    /// first frame
    pub fn new(title: &str, style: OverlayStyle) -> Self {
        Self {
            window_name: title.to_string(),
            style,
            window_open: false,
        }
    }

    fn ensure_window(&mut self) -> Result<()> {
        if !self.window_open {
            highgui::named_window(&self.window_name, highgui::WINDOW_AUTOSIZE)
                .display_err("creating window")?;
            self.window_open = true;
        }
        Ok(())
    }
}

impl Display for HighguiDisplay {
    fn show_frame(&mut self, frame: &Mat, label: &str) -> Result<()> {
        self.ensure_window()?;

        // Annotate a copy so the held frame stays pristine
        let mut annotated = frame.try_clone().display_err("copying frame")?;
        imgproc::put_text(
            &mut annotated,
            label,
            Point::new(10, 30),
            imgproc::FONT_HERSHEY_SIMPLEX,
            self.style.font_scale,
            self.style.color,
            self.style.thickness,
            imgproc::LINE_8,
            false,
        )
        .display_err("drawing overlay")?;

        highgui::imshow(&self.window_name, &annotated).display_err("showing frame")
    }

    fn wait_for_input(&mut self, timeout: Option<Duration>) -> Result<Option<InputEvent>> {
        // wait_key treats 0 as "block until a key arrives"
        let delay_ms = match timeout {
            Some(timeout) => (timeout.as_millis() as i32).max(1),
            None => 0,
        };

        let code = highgui::wait_key(delay_ms).display_err("waiting for key")?;
        Ok(map_key(code))
    }

    fn close(&mut self) -> Result<()> {
        if self.window_open {
            highgui::destroy_all_windows().display_err("destroying windows")?;
            self.window_open = false;
        }
        Ok(())
    }
}

impl Drop for HighguiDisplay {
    fn drop(&mut self) {
        if let Err(e) = self.close() {
            warn!("Failed to close display: {}", e);
        }
    }
}

/// Map a wait_key code to an input event
///
/// Returns None for the timeout sentinel (-1) and for unmapped keys, so
/// the event loop treats both as an empty tick.
fn map_key(code: i32) -> Option<InputEvent> {
    if code == KEY_ESCAPE {
        return Some(InputEvent::Quit);
    }

    match u8::try_from(code).ok()? as char {
        'q' | 'Q' => Some(InputEvent::Quit),
        ' ' => Some(InputEvent::TogglePlay),
        'd' | 'D' => Some(InputEvent::StepForward),
        'a' | 'A' => Some(InputEvent::StepBackward),
        'h' | 'H' => Some(InputEvent::JumpFirst),
        'e' | 'E' => Some(InputEvent::JumpLast),
        'g' | 'G' => Some(InputEvent::JumpPrompt),
        _ => None,
    }
}

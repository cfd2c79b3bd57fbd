//! Display module for framestep
//!
//! This module handles the rendering/input side of the external
//! collaborator: showing the current frame with its position overlay and
//! turning raw key codes into named input events.

mod highgui_display;

pub use highgui_display::HighguiDisplay;

use crate::utils::config::OverlayConfig;
use crate::utils::error::{PlayerError, Result};
use opencv::core::{Mat, Scalar};
use std::time::Duration;

/// Input events produced by the display collaborator
///
/// Raw key codes never leave the display implementation; the event loop
/// only sees this enumeration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    /// Leave the event loop
    Quit,

    /// Toggle between playing and paused
    TogglePlay,

    /// Step one frame forward
    StepForward,

    /// Step one frame backward
    StepBackward,

    /// Jump to the first frame
    JumpFirst,

    /// Jump to the last frame
    JumpLast,

    /// Prompt for a frame number on the console and jump there
    JumpPrompt,
}

/// Display trait defining the rendering/input side of the external
/// collaborator
pub trait Display {
    /// Show a frame with the position label drawn over it
    ///
    /// # Arguments
    ///
    /// * `frame` - Decoded frame to display
    /// * `label` - Position text drawn in the top-left corner
    fn show_frame(&mut self, frame: &Mat, label: &str) -> Result<()>;

    /// Block until a key arrives or the timeout elapses
    ///
    /// # Arguments
    ///
    /// * `timeout` - None waits indefinitely; Some bounds the wait
    ///
    /// # Returns
    ///
    /// Returns the mapped event, or None on timeout and for unmapped keys
    fn wait_for_input(&mut self, timeout: Option<Duration>) -> Result<Option<InputEvent>>;

    /// Release all display resources
    fn close(&mut self) -> Result<()>;
}

/// Styling for the position overlay
#[derive(Debug, Clone, Copy)]
pub struct OverlayStyle {
    /// Label color in OpenCV's BGR order
    pub color: Scalar,

    /// Font scale passed to put_text
    pub font_scale: f64,

    /// Stroke thickness passed to put_text
    pub thickness: i32,
}

impl OverlayStyle {
    /// Build a style from the overlay configuration section
    pub fn from_config(config: &OverlayConfig) -> Result<Self> {
        let (r, g, b) = parse_hex_color(&config.color)?;
        Ok(Self {
            color: Scalar::new(b as f64, g as f64, r as f64, 0.0),
            font_scale: config.font_scale,
            thickness: config.thickness,
        })
    }
}

impl Default for OverlayStyle {
    fn default() -> Self {
        Self {
            color: Scalar::new(0.0, 255.0, 0.0, 0.0),
            font_scale: 1.0,
            thickness: 2,
        }
    }
}

/// Parse a "#RRGGBB" hex string into RGB components
fn parse_hex_color(hex: &str) -> Result<(u8, u8, u8)> {
    let hex = hex.trim_start_matches('#');

    if hex.len() != 6 {
        return Err(PlayerError::InvalidInput(
            "Hex color must be 6 characters".to_string(),
        ));
    }

    let r = u8::from_str_radix(&hex[0..2], 16)
        .map_err(|_| PlayerError::InvalidInput("Invalid hex color".to_string()))?;
    let g = u8::from_str_radix(&hex[2..4], 16)
        .map_err(|_| PlayerError::InvalidInput("Invalid hex color".to_string()))?;
    let b = u8::from_str_radix(&hex[4..6], 16)
        .map_err(|_| PlayerError::InvalidInput("Invalid hex color".to_string()))?;

    Ok((r, g, b))
}

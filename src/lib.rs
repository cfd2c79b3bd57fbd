//! framestep - a minimal interactive video frame browser
//!
//! Opens a video file, decodes frames sequentially or by seek, and lets
//! the user step forward/backward, play/pause, and jump to arbitrary
//! frames while an overlay shows the playback position. Decoding and
//! window display are delegated entirely to OpenCV; this crate only owns
//! the playback state and the event loop around it.

pub mod console;
pub mod display;
pub mod player;
pub mod source;
pub mod utils;

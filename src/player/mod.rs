//! Player module for framestep
//!
//! This module holds the playback controller, the single owner of the
//! stream handle, decoded-frame slot, and position counter, plus the pure
//! state-transition function that drives its event loop.

mod controller;
mod transition;

pub use controller::PlaybackController;
pub use transition::{transition, Effect, PlaybackState, Step};

//! Pure state-transition logic for the playback event loop
//!
//! The event loop is split into an input-polling boundary (the display
//! returns an abstract InputEvent) and this pure function, so the state
//! machine can be unit-tested without a real window.

use crate::display::InputEvent;

/// Playback phase of the event loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackState {
    /// Waiting indefinitely for input
    Paused,

    /// Auto-advancing on every input timeout
    Playing,

    /// Terminal; the loop exits
    Stopped,
}

/// Side effect the loop must carry out after a transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    /// Read the next sequential frame; on failure report end-of-stream
    /// and force Paused
    Advance,

    /// Step back one frame; on failure report start-of-stream, state
    /// unchanged
    Retreat,

    /// Seek to frame 0
    JumpFirst,

    /// Seek to the last frame
    JumpLast,

    /// Prompt the console for a frame number and seek there
    PromptJump,
}

/// Result of one transition: the next state and the effect to run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Step {
    pub state: PlaybackState,
    pub effect: Option<Effect>,
}

impl Step {
    fn state(state: PlaybackState) -> Self {
        Self {
            state,
            effect: None,
        }
    }

    fn effect(state: PlaybackState, effect: Effect) -> Self {
        Self {
            state,
            effect: Some(effect),
        }
    }
}

/// Compute the next state and effect for one loop iteration
///
/// `event` is None when the key wait timed out (or an unmapped key was
/// pressed); while playing that tick drives the auto-advance.
pub fn transition(state: PlaybackState, event: Option<InputEvent>) -> Step {
    use InputEvent::*;
    use PlaybackState::*;

    if state == Stopped {
        return Step::state(Stopped);
    }

    match event {
        Some(Quit) => Step::state(Stopped),
        Some(TogglePlay) => Step::state(if state == Playing { Paused } else { Playing }),
        Some(StepForward) => Step::effect(state, Effect::Advance),
        Some(StepBackward) => Step::effect(state, Effect::Retreat),
        Some(JumpFirst) => Step::effect(state, Effect::JumpFirst),
        Some(JumpLast) => Step::effect(state, Effect::JumpLast),
        Some(JumpPrompt) => Step::effect(state, Effect::PromptJump),
        None => match state {
            Playing => Step::effect(Playing, Effect::Advance),
            _ => Step::state(state),
        },
    }
}

//! Integration tests for the playback controller
//!
//! These tests drive the controller operations against the mock frame
//! source: navigation bounds, commit-on-success semantics, and the
//! position/frame consistency invariant.

use framestep::player::PlaybackController;
use framestep::utils::error::PlayerError;
use framestep_integration_tests::{frame_index, MockFrameSource};
use std::path::Path;

fn loaded(frame_count: u64) -> PlaybackController<MockFrameSource> {
    let mut controller = PlaybackController::new(MockFrameSource::new(frame_count), 30.0);
    controller
        .load(Path::new("clip.mp4"))
        .expect("mock load succeeds");
    controller
}

#[test]
fn test_load_initializes_at_frame_zero() {
    let controller = loaded(10);
    assert_eq!(controller.position(), 0);
    assert_eq!(frame_index(controller.current_frame().unwrap()), 0);

    let info = controller.info().unwrap();
    assert_eq!(info.frame_count, 10);
    assert_eq!(info.fps, 30.0);
}

#[test]
fn test_load_rejects_empty_stream() {
    let mut controller = PlaybackController::new(MockFrameSource::new(0), 30.0);
    assert!(matches!(
        controller.load(Path::new("clip.mp4")),
        Err(PlayerError::Open(_))
    ));
}

#[test]
fn test_load_rejects_unreadable_first_frame() {
    let mut source = MockFrameSource::new(10);
    source.fail_read_at = Some(0);
    let mut controller = PlaybackController::new(source, 30.0);
    assert!(matches!(
        controller.load(Path::new("clip.mp4")),
        Err(PlayerError::Open(_))
    ));
    assert!(controller.current_frame().is_none());
}

#[test]
fn test_nine_advances_reach_the_last_frame() {
    let mut controller = loaded(10);
    for _ in 0..9 {
        controller.advance().unwrap();
    }
    assert_eq!(controller.position(), 9);
    assert_eq!(frame_index(controller.current_frame().unwrap()), 9);

    // The tenth advance fails and changes nothing
    assert!(matches!(
        controller.advance(),
        Err(PlayerError::OutOfRange(_))
    ));
    assert_eq!(controller.position(), 9);
}

#[test]
fn test_retreat_fails_at_position_zero() {
    let mut controller = loaded(10);
    assert!(matches!(
        controller.retreat(),
        Err(PlayerError::OutOfRange(_))
    ));
    assert_eq!(controller.position(), 0);
}

#[test]
fn test_seek_round_trips_every_valid_position() {
    let mut controller = loaded(10);
    for n in [3, 9, 0, 5, 1, 8] {
        controller.seek(n).unwrap();
        assert_eq!(controller.position(), n);
        assert_eq!(frame_index(controller.current_frame().unwrap()), n);
    }
}

#[test]
fn test_seek_out_of_range_changes_nothing() {
    let mut controller = loaded(10);
    controller.seek(4).unwrap();

    assert!(matches!(
        controller.seek(10),
        Err(PlayerError::OutOfRange(_))
    ));
    assert!(matches!(
        controller.seek(u64::MAX),
        Err(PlayerError::OutOfRange(_))
    ));
    assert_eq!(controller.position(), 4);
    assert_eq!(frame_index(controller.current_frame().unwrap()), 4);
}

#[test]
fn test_seek_then_retreat_lands_on_previous_frame() {
    let mut controller = loaded(10);
    controller.seek(5).unwrap();
    controller.retreat().unwrap();

    assert_eq!(controller.position(), 4);
    assert_eq!(frame_index(controller.current_frame().unwrap()), 4);
}

#[test]
fn test_mid_stream_read_failure_is_not_a_skip() {
    // The decoder refuses frame 2; position must not move
    let mut source = MockFrameSource::new(10);
    source.fail_read_at = Some(2);
    let mut controller = PlaybackController::new(source, 30.0);
    controller.load(Path::new("clip.mp4")).unwrap();
    controller.advance().unwrap();

    assert!(matches!(controller.advance(), Err(PlayerError::Read(_))));
    assert_eq!(controller.position(), 1);
    assert_eq!(frame_index(controller.current_frame().unwrap()), 1);
}

#[test]
fn test_failed_retreat_commits_nothing() {
    let mut source = MockFrameSource::new(10);
    source.fail_seek_to = Some(4);
    let mut controller = PlaybackController::new(source, 30.0);
    controller.load(Path::new("clip.mp4")).unwrap();
    controller.seek(5).unwrap();

    assert!(matches!(controller.retreat(), Err(PlayerError::Read(_))));
    assert_eq!(controller.position(), 5);
    assert_eq!(frame_index(controller.current_frame().unwrap()), 5);

    // Sequential reads still line up after the failure
    controller.advance().unwrap();
    assert_eq!(controller.position(), 6);
    assert_eq!(frame_index(controller.current_frame().unwrap()), 6);
}

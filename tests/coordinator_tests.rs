mod common;

use common::{Call, MockHost};
use photo_watch::constants::IMAGE_TABLE;
use photo_watch::geometry::Size;
use photo_watch::host::{NodeId, TextField};
use photo_watch::selector::ImageId;
use photo_watch::slot::SlotIndex;
use photo_watch::{ClockStyle, DisplayCoordinator, DisplayState, TransitionOutcome, WatchError, WatchTime};

fn at(hour: u32, minute: u32) -> WatchTime {
    // 2026-10-18, a Sunday
    WatchTime::from_ymd_hm(2026, 10, 18, hour, minute).unwrap()
}

fn animations(host: &MockHost) -> usize {
    host.count(|c| matches!(c, Call::Animate(_)))
}

/// Face initialised at 09:41, showing `IMAGE_TABLE[941 % 7]`.
fn started() -> (DisplayCoordinator, DisplayState, MockHost) {
    let coordinator = DisplayCoordinator::with_defaults(ClockStyle::TwelveHour).unwrap();
    let mut state = coordinator.new_state();
    let mut host = MockHost::new();
    coordinator.on_init(&mut state, &mut host, &at(9, 41)).unwrap();
    (coordinator, state, host)
}

#[test]
fn test_empty_table_is_invalid_configuration() {
    let err = DisplayCoordinator::new(&[], ClockStyle::TwelveHour, Size::new(144, 168)).unwrap_err();
    assert!(matches!(err, WatchError::InvalidConfiguration(_)));
}

#[test]
fn test_first_paint() {
    let (_, state, host) = started();

    assert_eq!(state.current_image_id(), Some(IMAGE_TABLE[3]));
    assert_eq!(state.active_slot(), SlotIndex::First);
    assert!(!state.transition_in_progress());
    assert_eq!(animations(&host), 0);

    assert_eq!(host.texts[&TextField::Time], "09:41 AM");
    assert_eq!(host.texts[&TextField::Date], "Oct 18");
    assert_eq!(host.texts[&TextField::Day], "Sun");
    assert_eq!(state.current_time_text(), "09:41 AM");
    assert_eq!(state.last_shown_day_of_year(), Some(291));
}

#[test]
fn test_steady_state_tick_slides_to_next_image() {
    let (coordinator, mut state, mut host) = started();

    let report = coordinator.on_tick(&mut state, &mut host, &at(9, 42)).unwrap();

    assert_eq!(
        report.image,
        Ok(TransitionOutcome::Started { from: SlotIndex::First, to: SlotIndex::Second, image: IMAGE_TABLE[4] })
    );
    assert!(state.transition_in_progress());
    assert_eq!(state.current_image_id(), Some(IMAGE_TABLE[3]));

    let event = host.finish_animation();
    let outcome = coordinator.on_animation_completed(&mut state, &mut host, event).unwrap();

    assert_eq!(outcome, TransitionOutcome::Settled(IMAGE_TABLE[4]));
    assert!(!state.transition_in_progress());
    assert_eq!(state.active_slot(), SlotIndex::Second);
    assert_eq!(state.current_image_id(), Some(IMAGE_TABLE[4]));
    assert_eq!(host.live_images(), vec![IMAGE_TABLE[4]]);
    assert_eq!(host.texts[&TextField::Time], "09:42 AM");
}

#[test]
fn test_no_change_tick_only_updates_time() {
    let (coordinator, mut state, mut host) = started();
    // 943 % 7 == 950 % 7
    coordinator.on_tick(&mut state, &mut host, &at(9, 43)).unwrap();
    let event = host.finish_animation();
    coordinator.on_animation_completed(&mut state, &mut host, event).unwrap();
    host.clear_calls();

    let report = coordinator.on_tick(&mut state, &mut host, &at(9, 50)).unwrap();

    assert_eq!(report.image, Ok(TransitionOutcome::Unchanged));
    assert!(!report.date_redrawn);
    assert_eq!(host.calls, vec![Call::SetText(TextField::Time, "09:50 AM".to_string())]);
}

#[test]
fn test_repeated_tick_is_idempotent() {
    let (coordinator, mut state, mut host) = started();
    let active = state.active_slot();

    for _ in 0..3 {
        let report = coordinator.on_tick(&mut state, &mut host, &at(9, 41)).unwrap();
        assert_eq!(report.image, Ok(TransitionOutcome::Unchanged));
    }

    assert_eq!(animations(&host), 0);
    assert_eq!(state.active_slot(), active);
    assert_eq!(host.text_pushes(TextField::Time), 4);
}

#[test]
fn test_tick_mid_animation_never_overlaps() {
    let (coordinator, mut state, mut host) = started();
    coordinator.on_tick(&mut state, &mut host, &at(9, 42)).unwrap();

    // the next tick lands before the slide finished
    let report = coordinator.on_tick(&mut state, &mut host, &at(9, 42)).unwrap();
    assert_eq!(report.image, Ok(TransitionOutcome::AlreadyStaged));
    let report = coordinator.on_tick(&mut state, &mut host, &at(9, 43)).unwrap();
    assert_eq!(report.image, Ok(TransitionOutcome::Queued(IMAGE_TABLE[5])));
    assert_eq!(animations(&host), 1);

    let event = host.finish_animation();
    let outcome = coordinator.on_animation_completed(&mut state, &mut host, event).unwrap();
    assert_eq!(
        outcome,
        TransitionOutcome::Started { from: SlotIndex::Second, to: SlotIndex::First, image: IMAGE_TABLE[5] }
    );
    assert_eq!(animations(&host), 2);

    let event = host.finish_animation();
    coordinator.on_animation_completed(&mut state, &mut host, event).unwrap();
    assert_eq!(state.current_image_id(), Some(IMAGE_TABLE[5]));
    assert_eq!(host.live_images(), vec![IMAGE_TABLE[5]]);
}

#[test]
fn test_completion_after_next_tick_settles_correctly() {
    let (coordinator, mut state, mut host) = started();
    coordinator.on_tick(&mut state, &mut host, &at(9, 42)).unwrap();
    let event = host.finish_animation();

    // tick is served first, completion second
    coordinator.on_tick(&mut state, &mut host, &at(9, 42)).unwrap();
    coordinator.on_animation_completed(&mut state, &mut host, event).unwrap();

    assert_eq!(state.current_image_id(), Some(IMAGE_TABLE[4]));
    assert!(host.animations.is_empty());
}

#[test]
fn test_day_boundary_redraws_date_once() {
    let coordinator = DisplayCoordinator::with_defaults(ClockStyle::TwentyFourHour).unwrap();
    let mut state = coordinator.new_state();
    let mut host = MockHost::new();
    coordinator.on_init(&mut state, &mut host, &at(23, 58)).unwrap();

    let before = coordinator.on_tick(&mut state, &mut host, &at(23, 59)).unwrap();
    assert!(!before.date_redrawn);
    let event = host.finish_animation();
    coordinator.on_animation_completed(&mut state, &mut host, event).unwrap();

    let midnight = WatchTime::from_ymd_hm(2026, 10, 19, 0, 0).unwrap();
    let report = coordinator.on_tick(&mut state, &mut host, &midnight).unwrap();
    assert!(report.date_redrawn);
    // 2359 % 7 == 0 % 7: the photo stays
    assert_eq!(report.image, Ok(TransitionOutcome::Unchanged));
    assert_eq!(host.texts[&TextField::Date], "Oct 19");
    assert_eq!(host.texts[&TextField::Day], "Mon");
    assert_eq!(host.texts[&TextField::Time], "00:00   ");
    assert_eq!(state.last_shown_day_of_year(), Some(292));

    let next = WatchTime::from_ymd_hm(2026, 10, 19, 0, 1).unwrap();
    let report = coordinator.on_tick(&mut state, &mut host, &next).unwrap();
    assert!(!report.date_redrawn);

    assert_eq!(host.text_pushes(TextField::Date), 2);
    assert_eq!(host.text_pushes(TextField::Day), 2);
}

#[test]
fn test_resource_failure_keeps_previous_image() {
    let (coordinator, mut state, mut host) = started();
    host.fail(IMAGE_TABLE[4]);

    let report = coordinator.on_tick(&mut state, &mut host, &at(9, 42)).unwrap();

    assert_eq!(report.image, Err(WatchError::ResourceUnavailable { image: IMAGE_TABLE[4] }));
    assert_eq!(state.active_slot(), SlotIndex::First);
    assert_eq!(state.current_image_id(), Some(IMAGE_TABLE[3]));
    assert!(!state.transition_in_progress());
    assert_eq!(animations(&host), 0);
    assert_eq!(host.live_images(), vec![IMAGE_TABLE[3]]);
    // time still moves on
    assert_eq!(host.texts[&TextField::Time], "09:42 AM");

    // the next tick re-evaluates
    let report = coordinator.on_tick(&mut state, &mut host, &at(9, 43)).unwrap();
    assert!(matches!(report.image, Ok(TransitionOutcome::Started { .. })));
}

#[test]
fn test_shutdown_releases_everything() {
    let (coordinator, mut state, mut host) = started();
    coordinator.on_shutdown(&mut state, &mut host);

    assert!(host.live_images().is_empty());
    assert!(host.stack.is_empty());
}

#[test]
fn test_shutdown_mid_transition_is_abrupt() {
    let (coordinator, mut state, mut host) = started();
    coordinator.on_tick(&mut state, &mut host, &at(9, 42)).unwrap();

    coordinator.on_shutdown(&mut state, &mut host);
    assert!(host.live_images().is_empty());
    assert!(!state.transition_in_progress());

    let late = host.finish_animation();
    let outcome = coordinator.on_animation_completed(&mut state, &mut host, late).unwrap();
    assert_eq!(outcome, TransitionOutcome::Unchanged);
}

#[test]
fn test_reinit_starts_from_scratch() {
    let (coordinator, mut state, mut host) = started();
    coordinator.on_tick(&mut state, &mut host, &at(9, 42)).unwrap();

    coordinator.on_init(&mut state, &mut host, &at(10, 0)).unwrap();

    // 1000 % 7 == 6
    assert_eq!(state.current_image_id(), Some(IMAGE_TABLE[6]));
    assert_eq!(host.live_images(), vec![IMAGE_TABLE[6]]);
    assert_eq!(state.active_slot(), SlotIndex::First);
    assert_eq!(host.texts[&TextField::Time], "10:00 AM");
}

#[test]
fn test_completion_from_before_reinit_is_ignored() {
    let (coordinator, mut state, mut host) = started();
    coordinator.on_tick(&mut state, &mut host, &at(9, 42)).unwrap();

    coordinator.on_init(&mut state, &mut host, &at(10, 0)).unwrap();
    // 1001 % 7 == 0: slides out of the first slot again
    let report = coordinator.on_tick(&mut state, &mut host, &at(10, 1)).unwrap();
    assert_eq!(
        report.image,
        Ok(TransitionOutcome::Started { from: SlotIndex::First, to: SlotIndex::Second, image: IMAGE_TABLE[0] })
    );

    let late = host.finish_animation();
    let outcome = coordinator.on_animation_completed(&mut state, &mut host, late).unwrap();

    assert_eq!(outcome, TransitionOutcome::Unchanged);
    assert!(state.transition_in_progress());
    assert_eq!(state.active_slot(), SlotIndex::First);
    assert_eq!(state.current_image_id(), Some(IMAGE_TABLE[6]));
    assert_eq!(
        host.stack,
        vec![NodeId::Slot(SlotIndex::Second), NodeId::Slot(SlotIndex::First)]
    );

    let event = host.finish_animation();
    let outcome = coordinator.on_animation_completed(&mut state, &mut host, event).unwrap();
    assert_eq!(outcome, TransitionOutcome::Settled(IMAGE_TABLE[0]));
    assert_eq!(host.live_images(), vec![IMAGE_TABLE[0]]);
}

#[test]
fn test_queued_image_failing_after_completion_keeps_settled_one() {
    let (coordinator, mut state, mut host) = started();
    coordinator.on_tick(&mut state, &mut host, &at(9, 42)).unwrap();
    let report = coordinator.on_tick(&mut state, &mut host, &at(9, 43)).unwrap();
    assert_eq!(report.image, Ok(TransitionOutcome::Queued(IMAGE_TABLE[5])));
    host.fail(IMAGE_TABLE[5]);

    let event = host.finish_animation();
    let result = coordinator.on_animation_completed(&mut state, &mut host, event);

    assert_eq!(result, Err(WatchError::ResourceUnavailable { image: IMAGE_TABLE[5] }));
    assert!(!state.transition_in_progress());
    assert_eq!(state.active_slot(), SlotIndex::Second);
    assert_eq!(state.current_image_id(), Some(IMAGE_TABLE[4]));
    assert_eq!(host.live_images(), vec![IMAGE_TABLE[4]]);
    assert_eq!(animations(&host), 1);
}

#[test]
fn test_custom_table() {
    static TABLE: [ImageId; 2] = [ImageId(10), ImageId(20)];
    let coordinator = DisplayCoordinator::new(&TABLE, ClockStyle::TwelveHour, Size::new(144, 168)).unwrap();
    let mut state = coordinator.new_state();
    let mut host = MockHost::new();

    coordinator.on_init(&mut state, &mut host, &at(13, 5)).unwrap();
    // 1305 % 2 == 1
    assert_eq!(state.current_image_id(), Some(ImageId(20)));
    assert_eq!(host.texts[&TextField::Time], "01:05 PM");
}

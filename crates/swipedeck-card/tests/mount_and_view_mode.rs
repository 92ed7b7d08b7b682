use swipedeck_card::{CardConfig, CardHeight, ViewMode};
use swipedeck_testing::CardRobot;

#[test]
fn mount_haptic_fires_once_after_fifty_millis() {
    let mut robot = CardRobot::new(CardConfig::default(), ());
    robot.advance_millis(48);
    assert_eq!(robot.effects().haptic_count(), 0);
    robot.advance_millis(2);
    assert_eq!(robot.effects().haptic_count(), 1);
    robot.wait_for_idle();
    assert_eq!(robot.effects().haptic_count(), 1);
}

#[test]
fn mount_haptic_never_fires_for_a_card_dropped_early() {
    let mut robot = CardRobot::new(CardConfig::default(), ());
    robot.advance_millis(30);
    robot.drop_card();
    robot.advance_millis(500);
    assert_eq!(robot.effects().haptic_count(), 0);
}

#[test]
fn entrance_lands_at_full_scale_and_stays_there() {
    let mut robot = CardRobot::new(CardConfig::default(), ());
    robot.advance_millis(0);
    assert_eq!(robot.frame().entrance_scale, 0.0);

    robot.advance_millis(200);
    assert_eq!(robot.frame().entrance_scale, 1.0);

    robot.card().press();
    robot.card().close();
    robot.slow_drag_by(50.0, 0.0);
    robot.wait_for_idle();
    assert_eq!(robot.frame().entrance_scale, 1.0);
}

#[test]
fn tap_opens_the_page_and_drags_do_not() {
    let mut robot = CardRobot::new(CardConfig::default(), ());
    robot.wait_for_idle();

    robot.slow_drag_by(100.0, 0.0);
    robot.wait_for_idle();
    assert_eq!(robot.card().view_mode(), ViewMode::Card);

    robot.tap();
    assert_eq!(robot.card().view_mode(), ViewMode::Page);
    let frame = robot.frame();
    assert!(frame.content.show_description && frame.content.show_hobbies);
    assert!(!frame.content.show_buttons);
    assert!(frame.decorations.close_icon);
    assert_eq!(frame.layout.height, CardHeight::Fill);
    assert_eq!(frame.layout.margin_bottom, None);
}

#[test]
fn card_page_card_round_trip_restores_the_frame() {
    let mut robot = CardRobot::new(CardConfig::default(), ());
    robot.wait_for_idle();
    let original = robot.frame();
    let haptics = robot.effects().haptic_count();

    robot.tap();
    robot.wait_for_idle();
    assert_ne!(robot.frame(), original);

    robot.tap();
    robot.wait_for_idle();
    assert_eq!(robot.frame(), original);
    assert_eq!(robot.effects().haptic_count(), haptics + 2);
}

#[test]
fn page_ignores_swipes_until_closed() {
    let mut robot = CardRobot::new(CardConfig::default(), ());
    robot.wait_for_idle();
    robot.tap();

    robot.flick_by(400.0, 0.0);
    robot.wait_for_idle();
    assert!(robot.effects().swipes().is_empty());
    assert_eq!(robot.frame().offset.x, 0.0);

    robot.card().close();
    assert_eq!(robot.card().view_mode(), ViewMode::Card);
    robot.flick_by(400.0, 0.0);
    assert_eq!(robot.effects().swipe_count(), 1);
}

#[test]
fn a_swipe_locks_the_view_mode() {
    let mut robot = CardRobot::new(CardConfig::default(), ());
    robot.wait_for_idle();
    robot.tap();
    robot.card().like();
    let haptics = robot.effects().haptic_count();

    robot.card().close();
    robot.card().press();
    robot.tap();
    assert_eq!(robot.card().view_mode(), ViewMode::Page);
    assert_eq!(robot.effects().haptic_count(), haptics);
}

#[test]
fn card_layout_leaves_room_for_tabs_and_margin() {
    let robot = CardRobot::new(CardConfig::default(), ());
    let layout = robot.frame().layout;
    assert_eq!(layout.height, CardHeight::Fixed(844.0 - 80.0 - 150.0));
    assert_eq!(layout.margin_bottom, Some(80.0));
}

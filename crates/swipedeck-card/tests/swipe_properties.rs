use swipedeck_card::{AnchorId, CardConfig, DiscardDirection, SnapAnchors, VisualRanges};
use swipedeck_testing::{assert_approx_eq, CardRobot};

fn robot() -> CardRobot<&'static str> {
    let mut robot = CardRobot::new(CardConfig::default(), "Grace");
    robot.advance_millis(300);
    robot
}

#[test]
fn drags_inside_the_falloff_radius_spring_back() {
    for dx in [-39.0, -25.0, -12.0, 12.0, 25.0, 39.0] {
        let mut robot = robot();
        robot.slow_drag_by(dx, 0.0);
        assert_eq!(robot.card().last_snap(), Some(AnchorId::Center), "dx={dx}");

        robot.wait_for_idle();
        assert!(robot.effects().swipes().is_empty(), "dx={dx}");
        assert_approx_eq(robot.offset().x, 0.0, 0.5, "rest x");
    }
}

#[test]
fn drags_at_or_past_the_right_edge_discard_right_once() {
    for dx in [585.0, 600.0, 800.0] {
        let mut robot = robot();
        robot.slow_drag_by(dx, 0.0);
        robot.wait_for_idle();

        assert_eq!(robot.card().last_snap(), Some(AnchorId::Right), "dx={dx}");
        assert_eq!(robot.effects().swipes(), vec![DiscardDirection::Right], "dx={dx}");
        assert_approx_eq(robot.offset().x, 585.0, 0.5, "fly-out x");
    }
}

#[test]
fn drags_past_the_left_edge_discard_left() {
    let mut robot = robot();
    robot.slow_drag_by(-700.0, 40.0);
    robot.wait_for_idle();
    assert_eq!(robot.effects().swipes(), vec![DiscardDirection::Left]);
    assert_approx_eq(robot.offset().x, -585.0, 0.5, "fly-out x");
    assert_approx_eq(robot.offset().y, 0.0, 0.5, "fly-out y");
}

#[test]
fn fast_flicks_discard_even_near_center() {
    let mut right = robot();
    right.flick_by(120.0, 0.0);
    assert_eq!(right.effects().swipes(), vec![DiscardDirection::Right]);

    let mut left = robot();
    left.flick_by(-150.0, 10.0);
    assert_eq!(left.effects().swipes(), vec![DiscardDirection::Left]);
}

#[test]
fn rotation_is_monotonic_across_the_anchor_range() {
    let anchors = SnapAnchors::from_width(390.0, 0.5);
    let ranges = VisualRanges::new(&anchors, 40.0, 2.0);

    assert_eq!(ranges.rotation(0.0), 0.0);
    assert_eq!(ranges.rotation(anchors.left.x), -40.0);
    assert_eq!(ranges.rotation(anchors.right.x), 40.0);

    let mut previous = f32::NEG_INFINITY;
    let mut x = anchors.left.x;
    while x <= anchors.right.x {
        let rotation = ranges.rotation(x);
        assert!(rotation >= previous, "rotation dropped at x={x}");
        previous = rotation;
        x += 5.0;
    }
}

#[test]
fn rotation_tracks_the_held_card() {
    let mut robot = robot();
    robot.hold_drag_by(292.5, 0.0, 480, 8);
    let frame = robot.frame();
    assert_approx_eq(frame.rotation_degrees, 20.0, 0.1, "half-way rotation");
    assert_approx_eq(frame.helper_icon_scale, 1.0, 0.01, "half-way icon scale");
}

#[test]
fn like_and_drag_right_are_indistinguishable() {
    let mut liked = robot();
    liked.card().like();
    liked.wait_for_idle();

    let mut dragged = robot();
    dragged.slow_drag_by(600.0, 0.0);
    dragged.wait_for_idle();

    assert_eq!(liked.effects().swipes(), vec![DiscardDirection::Right]);
    assert_eq!(liked.effects().swipes(), dragged.effects().swipes());
    assert_eq!(liked.effects().haptic_count(), dragged.effects().haptic_count());
    assert_eq!(liked.frame(), dragged.frame());
}

#[test]
fn dislike_matches_drag_left() {
    let mut disliked = robot();
    disliked.card().dislike();
    disliked.wait_for_idle();

    let mut dragged = robot();
    dragged.slow_drag_by(-600.0, 0.0);
    dragged.wait_for_idle();

    assert_eq!(disliked.effects().swipes(), vec![DiscardDirection::Left]);
    assert_eq!(disliked.effects().haptic_count(), dragged.effects().haptic_count());
}

#[test]
fn triggers_after_a_swipe_are_no_ops() {
    let mut robot = robot();
    robot.flick_by(300.0, 0.0);
    assert_eq!(robot.effects().swipes(), vec![DiscardDirection::Right]);
    let haptics = robot.effects().haptic_count();

    robot.card().like();
    robot.card().dislike();
    robot.card().handlers().on_dislike();
    robot.flick_by(-300.0, 0.0);
    robot.tap();
    robot.wait_for_idle();

    assert_eq!(robot.effects().swipes(), vec![DiscardDirection::Right]);
    assert_eq!(robot.effects().haptic_count(), haptics);
}

#[test]
fn unmounting_mid_drag_leaves_no_pending_work() {
    let mut robot = CardRobot::new(CardConfig::default(), "Linus");
    robot.hold_drag_by(140.0, 0.0, 30, 3);
    assert!(robot.card().is_dragging());
    assert!(robot.has_pending_work());

    assert!(robot.drop_card());
    assert!(!robot.has_pending_work());

    robot.advance_millis(1_000);
    assert_eq!(robot.effects().haptic_count(), 0);
    assert!(robot.effects().swipes().is_empty());
}

#[test]
fn unmounting_mid_fly_out_stops_the_spring() {
    let mut robot = robot();
    robot.flick_by(300.0, 0.0);
    robot.advance_millis(32);
    assert!(robot.card().is_settling());

    robot.drop_card();
    assert!(!robot.has_pending_work());
    assert_eq!(robot.effects().swipe_count(), 1);
}

// Static hand-pose classification from landmark geometry
//
// All rules compare normalized landmark coordinates; y grows downward, so
// "tip.y < joint.y" means the tip is above the joint in the image.

use crate::models::gesture::GestureLabel;
use crate::models::hand::{HandLandmark, HandObservation, Landmark};

/// Minimum horizontal thumb-tip-to-MCP distance for an open palm
const THUMB_SPLAY_MIN: f32 = 0.1;

type GesturePredicate = fn(&HandObservation) -> bool;

/// Classification rules in priority order; the first matching rule wins.
///
/// The rules are not mutually exclusive, so this ordering is part of the
/// contract: Point outranks ThumbsUp, which outranks ThumbsDown, and so on.
const RULES: &[(GestureLabel, GesturePredicate)] = &[
    (GestureLabel::Point, is_pointing),
    (GestureLabel::ThumbsUp, is_thumbs_up),
    (GestureLabel::ThumbsDown, is_thumbs_down),
    (GestureLabel::RockSign, is_rock_sign),
    (GestureLabel::Stop, is_stop),
];

/// Classify one hand observation into a gesture label
///
/// Pure and total: every 21-landmark observation maps to exactly one label,
/// falling back to NoGesture when no rule matches.
pub fn classify(hand: &HandObservation) -> GestureLabel {
    for (label, matches) in RULES {
        if matches(hand) {
            return *label;
        }
    }
    GestureLabel::NoGesture
}

/// Normalized index-fingertip position, used as the cursor source when the
/// frame classifies as Point
pub fn pointer_position(hand: &HandObservation) -> Landmark {
    hand.landmark(HandLandmark::IndexFingerTip)
}

/// Index finger extended, middle/ring/pinky curled below their base joints
fn is_pointing(hand: &HandObservation) -> bool {
    let index_extended = hand.landmark(HandLandmark::IndexFingerTip).y
        < hand.landmark(HandLandmark::IndexFingerMcp).y;

    let others_curled = [
        (HandLandmark::MiddleFingerTip, HandLandmark::MiddleFingerMcp),
        (HandLandmark::RingFingerTip, HandLandmark::RingFingerMcp),
        (HandLandmark::PinkyTip, HandLandmark::PinkyMcp),
    ]
    .iter()
    .all(|&(tip, mcp)| hand.landmark(tip).y > hand.landmark(mcp).y);

    index_extended && others_curled
}

/// Thumb raised above both of its joints and higher than every fingertip
fn is_thumbs_up(hand: &HandObservation) -> bool {
    let thumb_tip = hand.landmark(HandLandmark::ThumbTip);

    let thumb_up = thumb_tip.y < hand.landmark(HandLandmark::ThumbIp).y
        && thumb_tip.y < hand.landmark(HandLandmark::ThumbMcp).y;

    let fingers_below = finger_tips(hand)
        .iter()
        .all(|tip| thumb_tip.y < tip.y);

    thumb_up && fingers_below
}

/// Mirror of thumbs-up: thumb below its joints and below every fingertip
fn is_thumbs_down(hand: &HandObservation) -> bool {
    let thumb_tip = hand.landmark(HandLandmark::ThumbTip);

    let thumb_down = thumb_tip.y > hand.landmark(HandLandmark::ThumbIp).y
        && thumb_tip.y > hand.landmark(HandLandmark::ThumbMcp).y;

    let fingers_above = finger_tips(hand)
        .iter()
        .all(|tip| thumb_tip.y > tip.y);

    thumb_down && fingers_above
}

/// Index and pinky raised past their mid joints, middle/ring/thumb folded
fn is_rock_sign(hand: &HandObservation) -> bool {
    let pinky_up =
        hand.landmark(HandLandmark::PinkyTip).y < hand.landmark(HandLandmark::PinkyPip).y;
    let index_up = hand.landmark(HandLandmark::IndexFingerTip).y
        < hand.landmark(HandLandmark::IndexFingerPip).y;
    let middle_down = hand.landmark(HandLandmark::MiddleFingerTip).y
        > hand.landmark(HandLandmark::MiddleFingerPip).y;
    let ring_down = hand.landmark(HandLandmark::RingFingerTip).y
        > hand.landmark(HandLandmark::RingFingerPip).y;
    let thumb_down =
        hand.landmark(HandLandmark::ThumbTip).y > hand.landmark(HandLandmark::ThumbIp).y;

    pinky_up && index_up && middle_down && ring_down && thumb_down
}

/// Open palm: all four fingers extended past their base joints with the
/// thumb splayed outward
fn is_stop(hand: &HandObservation) -> bool {
    let fingers_extended = [
        (HandLandmark::IndexFingerTip, HandLandmark::IndexFingerMcp),
        (HandLandmark::MiddleFingerTip, HandLandmark::MiddleFingerMcp),
        (HandLandmark::RingFingerTip, HandLandmark::RingFingerMcp),
        (HandLandmark::PinkyTip, HandLandmark::PinkyMcp),
    ]
    .iter()
    .all(|&(tip, mcp)| hand.landmark(tip).y < hand.landmark(mcp).y);

    let thumb_splayed = (hand.landmark(HandLandmark::ThumbTip).x
        - hand.landmark(HandLandmark::ThumbMcp).x)
        .abs()
        > THUMB_SPLAY_MIN;

    fingers_extended && thumb_splayed
}

fn finger_tips(hand: &HandObservation) -> [Landmark; 4] {
    [
        hand.landmark(HandLandmark::IndexFingerTip),
        hand.landmark(HandLandmark::MiddleFingerTip),
        hand.landmark(HandLandmark::RingFingerTip),
        hand.landmark(HandLandmark::PinkyTip),
    ]
}

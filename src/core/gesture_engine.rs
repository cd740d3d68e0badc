// Per-frame gesture session: classify, debounce, dispatch
//
// One GestureEngine instance holds all mutable demo state (filter run, list
// selection, pause flag). The Tauri layer owns it behind a Mutex and calls
// process_frame once per captured frame.

use crate::core::config::Config;
use crate::core::gesture_classifier;
use crate::core::list_navigator::ListNavigator;
use crate::core::stability_filter::StabilityFilter;
use crate::models::gesture::{
    CursorPosition, FrameReport, GestureAction, GestureLabel, ListState,
};
use crate::models::hand::{HandObservation, Landmark};

pub struct GestureEngine {
    filter: StabilityFilter,
    list: ListNavigator,
    paused: bool,
}

impl GestureEngine {
    pub fn new(config: &Config) -> Self {
        Self {
            filter: StabilityFilter::new(config.stability_threshold_secs),
            list: ListNavigator::new(config.list_items.clone()),
            paused: false,
        }
    }

    /// Run one evaluation cycle for a frame's hand observations
    ///
    /// While paused the classifier and filter are skipped entirely and the
    /// filter state is left as it was; resumption happens through
    /// `toggle_pause` (a UI button in the demo).
    pub fn process_frame(
        &mut self,
        hands: &[HandObservation],
        now_ms: i64,
        viewport_width: u32,
        viewport_height: u32,
    ) -> FrameReport {
        if self.paused {
            return FrameReport {
                timestamp: now_ms,
                raw_label: GestureLabel::NoGesture,
                confirmed_label: self.filter.confirmed(),
                action: None,
                cursor: None,
                hands_detected: hands.len(),
                selected_index: self.list.selected_index(),
                paused: true,
            };
        }

        // A frame with no hands classifies as NoGesture so that hand absence
        // interrupts a running hold.
        let (raw_label, pointer) = Self::classify_hands(hands);

        let cursor = pointer.map(|tip| CursorPosition {
            x: tip.x * viewport_width as f32,
            y: tip.y * viewport_height as f32,
        });

        let action = self
            .filter
            .update(raw_label, now_ms)
            .and_then(GestureAction::for_label);

        if let Some(action) = action {
            self.apply_action(action);
        }

        FrameReport {
            timestamp: now_ms,
            raw_label,
            confirmed_label: self.filter.confirmed(),
            action,
            cursor,
            hands_detected: hands.len(),
            selected_index: self.list.selected_index(),
            paused: self.paused,
        }
    }

    /// Classify each hand independently; the last recognized hand wins.
    /// Returns the frame label and, for Point, the winning fingertip.
    fn classify_hands(hands: &[HandObservation]) -> (GestureLabel, Option<Landmark>) {
        let mut label = GestureLabel::NoGesture;
        let mut pointer = None;

        for hand in hands {
            let hand_label = gesture_classifier::classify(hand);
            if hand_label != GestureLabel::NoGesture {
                label = hand_label;
                pointer = if hand_label == GestureLabel::Point {
                    Some(gesture_classifier::pointer_position(hand))
                } else {
                    None
                };
            }
        }

        (label, pointer)
    }

    /// Apply one UI action; shared by gesture confirmations and the demo's
    /// button commands
    pub fn apply_action(&mut self, action: GestureAction) {
        match action {
            GestureAction::PreviousItem => {
                if self.list.previous() {
                    println!("Moved to {}", self.list.selected_item().unwrap_or(""));
                }
            }
            GestureAction::NextItem => {
                if self.list.next() {
                    println!("Moved to {}", self.list.selected_item().unwrap_or(""));
                }
            }
            GestureAction::Refresh => {
                println!("Resetting list to the top");
                self.list.reset();
            }
            GestureAction::TogglePause => {
                self.paused = !self.paused;
                println!(
                    "{} gesture detection",
                    if self.paused { "Paused" } else { "Resumed" }
                );
            }
        }
    }

    pub fn toggle_pause(&mut self) -> bool {
        self.apply_action(GestureAction::TogglePause);
        self.paused
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn current_label(&self) -> GestureLabel {
        self.filter.confirmed()
    }

    pub fn list_state(&self) -> ListState {
        ListState {
            items: self.list.items().to_vec(),
            selected_index: self.list.selected_index(),
        }
    }

    /// Reset all session state, as at process start
    pub fn reset(&mut self) {
        self.filter.reset();
        self.list.reset();
        self.paused = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::hand::{HandLandmark, Handedness, HAND_LANDMARK_COUNT};

    fn hand_with(points: &[(HandLandmark, f32, f32)]) -> HandObservation {
        let mut landmarks = vec![Landmark::new(0.5, 0.5, 0.0); HAND_LANDMARK_COUNT];
        for &(which, x, y) in points {
            landmarks[which.index()] = Landmark::new(x, y, 0.0);
        }
        HandObservation::from_landmarks(landmarks, Handedness::Right, 0.9).unwrap()
    }

    fn thumbs_down_hand() -> HandObservation {
        hand_with(&[
            (HandLandmark::ThumbTip, 0.5, 0.9),
            (HandLandmark::ThumbIp, 0.5, 0.7),
            (HandLandmark::ThumbMcp, 0.5, 0.6),
            (HandLandmark::IndexFingerTip, 0.5, 0.3),
            (HandLandmark::MiddleFingerTip, 0.5, 0.3),
            (HandLandmark::RingFingerTip, 0.5, 0.3),
            (HandLandmark::PinkyTip, 0.5, 0.3),
        ])
    }

    fn stop_hand() -> HandObservation {
        hand_with(&[
            (HandLandmark::IndexFingerTip, 0.5, 0.3),
            (HandLandmark::MiddleFingerTip, 0.5, 0.3),
            (HandLandmark::RingFingerTip, 0.5, 0.3),
            (HandLandmark::PinkyTip, 0.5, 0.3),
            (HandLandmark::ThumbTip, 0.2, 0.5),
        ])
    }

    fn point_hand(x: f32, y: f32) -> HandObservation {
        hand_with(&[
            (HandLandmark::IndexFingerTip, x, y),
            (HandLandmark::MiddleFingerTip, 0.5, 0.7),
            (HandLandmark::RingFingerTip, 0.5, 0.7),
            (HandLandmark::PinkyTip, 0.5, 0.7),
        ])
    }

    fn engine() -> GestureEngine {
        GestureEngine::new(&Config::default())
    }

    #[test]
    fn test_empty_frame_is_no_gesture() {
        let mut engine = engine();
        let report = engine.process_frame(&[], 0, 800, 600);
        assert_eq!(report.raw_label, GestureLabel::NoGesture);
        assert_eq!(report.action, None);
        assert_eq!(report.cursor, None);
        assert_eq!(report.hands_detected, 0);
    }

    #[test]
    fn test_held_gesture_dispatches_exactly_once() {
        let mut engine = engine();
        let hand = [thumbs_down_hand()];

        let mut actions = Vec::new();
        for now_ms in [0, 200, 400, 600] {
            let report = engine.process_frame(&hand, now_ms, 800, 600);
            if let Some(action) = report.action {
                actions.push((now_ms, action));
            }
        }

        assert_eq!(actions, vec![(600, GestureAction::NextItem)]);
        assert_eq!(engine.list_state().selected_index, 1);
        assert_eq!(engine.current_label(), GestureLabel::ThumbsDown);
    }

    #[test]
    fn test_cursor_tracks_point_every_frame() {
        let mut engine = engine();

        // First Point frame already carries a cursor: no hold delay
        let report = engine.process_frame(&[point_hand(0.5, 0.25)], 0, 800, 600);
        assert_eq!(report.raw_label, GestureLabel::Point);
        let cursor = report.cursor.unwrap();
        assert_eq!(cursor.x, 400.0);
        assert_eq!(cursor.y, 150.0);

        // And it moves with the fingertip on the very next frame
        let report = engine.process_frame(&[point_hand(0.25, 0.25)], 33, 800, 600);
        assert_eq!(report.cursor.unwrap().x, 200.0);

        // Point never dispatches an action no matter how long it is held
        let report = engine.process_frame(&[point_hand(0.25, 0.25)], 2000, 800, 600);
        assert_eq!(report.action, None);
    }

    #[test]
    fn test_cursor_absent_without_point() {
        let mut engine = engine();
        let report = engine.process_frame(&[thumbs_down_hand()], 0, 800, 600);
        assert_eq!(report.cursor, None);
    }

    #[test]
    fn test_confirmed_stop_pauses_the_session() {
        let mut engine = engine();
        let hand = [stop_hand()];

        for now_ms in [0, 200, 400] {
            let report = engine.process_frame(&hand, now_ms, 800, 600);
            assert_eq!(report.action, None);
        }

        let report = engine.process_frame(&hand, 600, 800, 600);
        assert_eq!(report.action, Some(GestureAction::TogglePause));
        assert!(report.paused);

        // While paused, further frames are not classified and cannot re-fire
        for now_ms in [800, 1400, 2000] {
            let report = engine.process_frame(&hand, now_ms, 800, 600);
            assert_eq!(report.action, None);
            assert_eq!(report.raw_label, GestureLabel::NoGesture);
            assert!(report.paused);
        }
    }

    #[test]
    fn test_paused_frames_leave_filter_state_untouched() {
        let mut engine = engine();
        engine.toggle_pause();

        let hand = [thumbs_down_hand()];
        for now_ms in [0, 300, 600, 900] {
            let report = engine.process_frame(&hand, now_ms, 800, 600);
            assert_eq!(report.action, None);
        }
        assert_eq!(engine.current_label(), GestureLabel::NoGesture);

        // After resuming, a fresh full hold is required
        engine.toggle_pause();
        assert_eq!(
            engine.process_frame(&hand, 1000, 800, 600).action,
            None
        );
        assert_eq!(
            engine.process_frame(&hand, 1300, 800, 600).action,
            None
        );
        assert_eq!(
            engine.process_frame(&hand, 1600, 800, 600).action,
            Some(GestureAction::NextItem)
        );
    }

    #[test]
    fn test_interrupted_hold_never_confirms() {
        let mut engine = engine();

        assert_eq!(
            engine.process_frame(&[thumbs_down_hand()], 0, 800, 600).action,
            None
        );
        assert_eq!(
            engine.process_frame(&[stop_hand()], 300, 800, 600).action,
            None
        );
        assert_eq!(
            engine.process_frame(&[thumbs_down_hand()], 600, 800, 600).action,
            None
        );
        assert_eq!(engine.list_state().selected_index, 0);
    }

    #[test]
    fn test_last_recognized_hand_wins() {
        let mut engine = engine();
        let hands = [thumbs_down_hand(), point_hand(0.5, 0.25)];

        let report = engine.process_frame(&hands, 0, 800, 600);
        assert_eq!(report.raw_label, GestureLabel::Point);
        assert!(report.cursor.is_some());
        assert_eq!(report.hands_detected, 2);
    }

    #[test]
    fn test_refresh_action_resets_selection() {
        let mut engine = engine();
        engine.apply_action(GestureAction::NextItem);
        engine.apply_action(GestureAction::NextItem);
        assert_eq!(engine.list_state().selected_index, 2);

        engine.apply_action(GestureAction::Refresh);
        assert_eq!(engine.list_state().selected_index, 0);
    }

    #[test]
    fn test_reset_clears_session() {
        let mut engine = engine();
        engine.apply_action(GestureAction::NextItem);
        engine.toggle_pause();

        engine.reset();
        assert!(!engine.is_paused());
        assert_eq!(engine.list_state().selected_index, 0);
        assert_eq!(engine.current_label(), GestureLabel::NoGesture);
    }
}

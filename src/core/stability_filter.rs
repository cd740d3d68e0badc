// Gesture debouncing - a label must persist before it is confirmed

use crate::models::gesture::GestureLabel;

/// Debounce filter over the per-frame classifier output
///
/// A raw label is confirmed only after it has been observed continuously for
/// longer than the stability threshold. Any different label in between
/// restarts the clock for the new label. While a label keeps being held, the
/// filter re-fires once per threshold interval.
pub struct StabilityFilter {
    threshold_ms: i64,
    last_label: GestureLabel,
    /// When the current run of identical labels began, or when the filter
    /// last fired for it
    run_started_at: Option<i64>,
    confirmed: GestureLabel,
}

impl StabilityFilter {
    /// Create a filter with the hold threshold in seconds
    pub fn new(threshold_secs: f32) -> Self {
        Self {
            threshold_ms: (threshold_secs * 1000.0) as i64,
            last_label: GestureLabel::NoGesture,
            run_started_at: None,
            confirmed: GestureLabel::NoGesture,
        }
    }

    /// Feed one frame's raw label; returns the label if it was confirmed on
    /// this call
    ///
    /// A frame with no detected hand must be fed as NoGesture so that hand
    /// absence interrupts a running hold like any other label change.
    pub fn update(&mut self, raw: GestureLabel, now_ms: i64) -> Option<GestureLabel> {
        match self.run_started_at {
            Some(started) if raw == self.last_label => {
                if now_ms - started > self.threshold_ms {
                    self.confirmed = raw;
                    self.run_started_at = Some(now_ms);
                    Some(raw)
                } else {
                    None
                }
            }
            _ => {
                self.last_label = raw;
                self.run_started_at = Some(now_ms);
                None
            }
        }
    }

    /// The label most recently confirmed by a completed hold
    pub fn confirmed(&self) -> GestureLabel {
        self.confirmed
    }

    /// Clear all state, as at process start
    pub fn reset(&mut self) {
        self.last_label = GestureLabel::NoGesture;
        self.run_started_at = None;
        self.confirmed = GestureLabel::NoGesture;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::gesture::GestureAction;

    #[test]
    fn test_confirms_once_after_threshold() {
        let mut filter = StabilityFilter::new(0.5);

        assert_eq!(filter.update(GestureLabel::ThumbsUp, 0), None);
        assert_eq!(filter.update(GestureLabel::ThumbsUp, 200), None);
        assert_eq!(filter.update(GestureLabel::ThumbsUp, 400), None);
        assert_eq!(
            filter.update(GestureLabel::ThumbsUp, 600),
            Some(GestureLabel::ThumbsUp)
        );
        assert_eq!(filter.confirmed(), GestureLabel::ThumbsUp);
    }

    #[test]
    fn test_interruption_restarts_the_clock() {
        let mut filter = StabilityFilter::new(0.5);

        assert_eq!(filter.update(GestureLabel::ThumbsUp, 0), None);
        assert_eq!(filter.update(GestureLabel::RockSign, 300), None);
        // Renewed run started at t=300; 600 - 300 < 500
        assert_eq!(filter.update(GestureLabel::ThumbsUp, 600), None);
        assert_eq!(filter.confirmed(), GestureLabel::NoGesture);
    }

    #[test]
    fn test_threshold_is_strict() {
        let mut filter = StabilityFilter::new(0.5);

        assert_eq!(filter.update(GestureLabel::Stop, 0), None);
        assert_eq!(filter.update(GestureLabel::Stop, 500), None);
        assert_eq!(
            filter.update(GestureLabel::Stop, 501),
            Some(GestureLabel::Stop)
        );
    }

    #[test]
    fn test_sustained_hold_refires_per_interval() {
        // Stop held for 1.5s at 100ms frame spacing fires twice, toggling
        // pause twice in total.
        let mut filter = StabilityFilter::new(0.5);
        let mut paused = false;
        let mut toggles = 0;

        for frame in 0..=15 {
            let now_ms = frame * 100;
            if let Some(label) = filter.update(GestureLabel::Stop, now_ms) {
                if let Some(GestureAction::TogglePause) = GestureAction::for_label(label) {
                    paused = !paused;
                    toggles += 1;
                }
            }
        }

        assert_eq!(toggles, 2);
        assert!(!paused);
    }

    #[test]
    fn test_hand_absence_interrupts_a_hold() {
        let mut filter = StabilityFilter::new(0.5);

        assert_eq!(filter.update(GestureLabel::ThumbsUp, 0), None);
        assert_eq!(filter.update(GestureLabel::NoGesture, 300), None);
        assert_eq!(filter.update(GestureLabel::ThumbsUp, 400), None);
        assert_eq!(filter.update(GestureLabel::ThumbsUp, 700), None);
        assert_eq!(
            filter.update(GestureLabel::ThumbsUp, 950),
            Some(GestureLabel::ThumbsUp)
        );
    }

    #[test]
    fn test_reset_clears_state() {
        let mut filter = StabilityFilter::new(0.5);
        filter.update(GestureLabel::ThumbsUp, 0);
        filter.update(GestureLabel::ThumbsUp, 600);
        assert_eq!(filter.confirmed(), GestureLabel::ThumbsUp);

        filter.reset();
        assert_eq!(filter.confirmed(), GestureLabel::NoGesture);
        // A fresh run must hold for the full threshold again
        assert_eq!(filter.update(GestureLabel::ThumbsUp, 1000), None);
        assert_eq!(filter.update(GestureLabel::ThumbsUp, 1400), None);
    }
}

pub const SWIPE_THRESHOLD_MIN_PX: f32 = 50.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SwipeIntent {
    Previous,
    Next,
}

/// Horizontal swipe classification. `dx > 0` is a rightward finger motion.
pub fn classify_swipe(dx: f32, dy: f32, threshold: f32) -> Option<SwipeIntent> {
    let horizontal = dx.abs();
    if horizontal > threshold && horizontal > dy.abs() {
        if dx > 0.0 {
            Some(SwipeIntent::Previous)
        } else {
            Some(SwipeIntent::Next)
        }
    } else {
        None
    }
}

/// Tracks a single-finger touch from start to end.
///
/// Moves only record the latest point; classification happens once, on
/// `finish`. Every `finish` or `reset` leaves the tracker neutral, so an end
/// event without a matching start never navigates.
#[derive(Clone, Copy, Debug)]
pub struct SwipeTracker {
    threshold: f32,
    start: Option<[f32; 2]>,
    last: Option<[f32; 2]>,
}

impl SwipeTracker {
    pub fn new(threshold: f32) -> Self {
        Self {
            threshold: threshold.max(SWIPE_THRESHOLD_MIN_PX),
            start: None,
            last: None,
        }
    }

    pub fn threshold(&self) -> f32 {
        self.threshold
    }

    pub fn is_tracking(&self) -> bool {
        self.start.is_some()
    }

    pub fn arm(&mut self, x: f32, y: f32) {
        self.start = Some([x, y]);
        self.last = Some([x, y]);
    }

    pub fn update(&mut self, x: f32, y: f32) {
        if self.start.is_none() {
            return;
        }
        self.last = Some([x, y]);
    }

    pub fn finish(&mut self, end: Option<(f32, f32)>) -> Option<SwipeIntent> {
        let start = self.start.take();
        let last = self.last.take();
        let start = start?;
        let [x1, y1] = match end {
            Some((x, y)) => [x, y],
            None => last.unwrap_or(start),
        };
        classify_swipe(x1 - start[0], (y1 - start[1]).abs(), self.threshold)
    }

    pub fn reset(&mut self) {
        self.start = None;
        self.last = None;
    }
}

impl Default for SwipeTracker {
    fn default() -> Self {
        Self::new(SWIPE_THRESHOLD_MIN_PX)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn threshold_never_drops_below_minimum() {
        assert_eq!(SwipeTracker::new(10.0).threshold(), SWIPE_THRESHOLD_MIN_PX);
        assert_eq!(SwipeTracker::new(f32::NAN).threshold(), SWIPE_THRESHOLD_MIN_PX);
        assert_eq!(SwipeTracker::new(80.0).threshold(), 80.0);
    }

    #[test]
    fn exactly_threshold_is_not_a_swipe() {
        assert_eq!(classify_swipe(-50.0, 0.0, 50.0), None);
        assert_eq!(classify_swipe(-50.5, 0.0, 50.0), Some(SwipeIntent::Next));
    }

    #[test]
    fn diagonal_tie_is_not_a_swipe() {
        assert_eq!(classify_swipe(70.0, 70.0, 50.0), None);
    }
}

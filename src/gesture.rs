//! Pointer/touch gesture tracking shared by the carousel and the slideshow.
//!
//! A gesture runs from a start event to an end (or cancel) event. Only one
//! gesture is tracked at a time; a new start replaces whatever an earlier,
//! unterminated gesture left behind.

use tracing::trace;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Dominant axis of a drag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Horizontal,
    Vertical,
}

/// Direction a surface moves when a swipe is committed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwipeDirection {
    Left,
    Right,
    Up,
    Down,
}

impl SwipeDirection {
    pub fn opposite(self) -> Self {
        match self {
            Self::Left => Self::Right,
            Self::Right => Self::Left,
            Self::Up => Self::Down,
            Self::Down => Self::Up,
        }
    }

    pub fn axis(self) -> Axis {
        match self {
            Self::Left | Self::Right => Axis::Horizontal,
            Self::Up | Self::Down => Axis::Vertical,
        }
    }

    /// Sign of the off-screen offset along `axis()`.
    pub fn sign(self) -> f64 {
        match self {
            Self::Right | Self::Down => 1.0,
            Self::Left | Self::Up => -1.0,
        }
    }
}

/// Displacement of a gesture relative to its anchor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Delta {
    pub dx: f64,
    pub dy: f64,
}

impl Delta {
    /// Horizontal only when strictly dominant; ties resolve vertical.
    pub fn axis(&self) -> Axis {
        if self.dx.abs() > self.dy.abs() {
            Axis::Horizontal
        } else {
            Axis::Vertical
        }
    }

    pub fn along(&self, axis: Axis) -> f64 {
        match axis {
            Axis::Horizontal => self.dx,
            Axis::Vertical => self.dy,
        }
    }

    /// Direction the finger travelled along `axis`.
    pub fn direction(&self, axis: Axis) -> SwipeDirection {
        match axis {
            Axis::Horizontal if self.dx > 0.0 => SwipeDirection::Right,
            Axis::Horizontal => SwipeDirection::Left,
            Axis::Vertical if self.dy > 0.0 => SwipeDirection::Down,
            Axis::Vertical => SwipeDirection::Up,
        }
    }
}

/// How a finished gesture should be applied.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SwipeResolution {
    /// Travel exceeded the threshold along the dominant axis.
    Commit {
        axis: Axis,
        direction: SwipeDirection,
    },
    /// Too short; return to neutral.
    SnapBack { axis: Axis },
}

impl SwipeResolution {
    /// Resolve `delta` against a strict `threshold` on its dominant axis.
    pub fn resolve(delta: Delta, threshold: f64) -> Self {
        let axis = delta.axis();
        if delta.along(axis).abs() > threshold {
            Self::Commit {
                axis,
                direction: delta.direction(axis),
            }
        } else {
            Self::SnapBack { axis }
        }
    }
}

/// Tracks the anchor of the single active gesture.
#[derive(Debug, Clone, Default)]
pub struct GestureTracker {
    anchor: Option<Point>,
}

impl GestureTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start(&mut self, at: Point) {
        if self.anchor.is_some() {
            trace!("Discarding unterminated gesture");
        }
        self.anchor = Some(at);
    }

    /// Delta from the anchor, if a gesture is open.
    pub fn delta(&self, at: Point) -> Option<Delta> {
        self.anchor.map(|anchor| Delta {
            dx: at.x - anchor.x,
            dy: at.y - anchor.y,
        })
    }

    /// Close the gesture, returning its final delta.
    pub fn finish(&mut self, at: Point) -> Option<Delta> {
        let delta = self.delta(at);
        self.anchor = None;
        delta
    }

    /// Drop the open gesture; returns whether one was open.
    pub fn cancel(&mut self) -> bool {
        self.anchor.take().is_some()
    }

    pub fn is_active(&self) -> bool {
        self.anchor.is_some()
    }

    pub fn anchor(&self) -> Option<Point> {
        self.anchor
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn delta(dx: f64, dy: f64) -> Delta {
        Delta { dx, dy }
    }

    #[test]
    fn test_tie_is_vertical() {
        assert_eq!(delta(40.0, 40.0).axis(), Axis::Vertical);
        assert_eq!(delta(-40.0, 40.0).axis(), Axis::Vertical);
        assert_eq!(delta(41.0, -40.0).axis(), Axis::Horizontal);
        assert_eq!(delta(0.0, 0.0).axis(), Axis::Vertical);
    }

    #[test]
    fn test_threshold_is_strict() {
        assert_eq!(
            SwipeResolution::resolve(delta(-69.0, 0.0), 70.0),
            SwipeResolution::SnapBack {
                axis: Axis::Horizontal
            }
        );
        assert_eq!(
            SwipeResolution::resolve(delta(-70.0, 0.0), 70.0),
            SwipeResolution::SnapBack {
                axis: Axis::Horizontal
            }
        );
        assert_eq!(
            SwipeResolution::resolve(delta(-71.0, 0.0), 70.0),
            SwipeResolution::Commit {
                axis: Axis::Horizontal,
                direction: SwipeDirection::Left
            }
        );
        assert_eq!(
            SwipeResolution::resolve(delta(3.0, 71.0), 70.0),
            SwipeResolution::Commit {
                axis: Axis::Vertical,
                direction: SwipeDirection::Down
            }
        );
    }

    #[test]
    fn test_tracker_lifecycle() {
        let mut tracker = GestureTracker::new();
        assert!(tracker.delta(Point::new(1.0, 1.0)).is_none());
        assert!(tracker.finish(Point::new(1.0, 1.0)).is_none());

        tracker.start(Point::new(100.0, 100.0));
        assert!(tracker.is_active());
        assert_eq!(
            tracker.delta(Point::new(20.0, 110.0)),
            Some(delta(-80.0, 10.0))
        );

        // Restart replaces the anchor
        tracker.start(Point::new(0.0, 0.0));
        assert_eq!(tracker.finish(Point::new(5.0, 5.0)), Some(delta(5.0, 5.0)));
        assert!(!tracker.is_active());
        assert!(!tracker.cancel());
    }

    #[test]
    fn test_direction_helpers() {
        assert_eq!(SwipeDirection::Left.opposite(), SwipeDirection::Right);
        assert_eq!(SwipeDirection::Up.axis(), Axis::Vertical);
        assert_eq!(SwipeDirection::Down.sign(), 1.0);
        assert_eq!(SwipeDirection::Left.sign(), -1.0);
    }
}

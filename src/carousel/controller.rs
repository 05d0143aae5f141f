//! State machine of the modal media viewer.
//!
//! Two orthogonal pieces of state: visibility (closed/open) and, while open,
//! an optional in-progress gesture. The controller owns the item snapshot and
//! the current index; every visual effect is delegated to a [`Presenter`].
//!
//! No operation fails. Calls that make no sense in the current state (empty
//! snapshot, gesture end without a start, keys while closed) are ignored.

use tracing::{debug, trace};

use super::keys::{Direction, Key, KeyAction};
use crate::config::CarouselConfig;
use crate::gesture::{Axis, GestureTracker, Point, SwipeResolution};
use crate::models::MediaItem;
use crate::presenter::Presenter;

/// Where a click on the modal landed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickTarget {
    /// The container itself, outside the content.
    Backdrop,
    Content,
}

pub struct CarouselController<P: Presenter> {
    items: Vec<MediaItem>,
    current: usize,
    visible: bool,
    gesture: GestureTracker,
    config: CarouselConfig,
    presenter: P,
}

impl<P: Presenter> std::fmt::Debug for CarouselController<P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CarouselController")
            .field("items", &self.items.len())
            .field("current", &self.current)
            .field("visible", &self.visible)
            .field("gesture", &self.gesture)
            .field("presenter", &"<presenter>")
            .finish()
    }
}

impl<P: Presenter> CarouselController<P> {
    pub fn new(items: Vec<MediaItem>, presenter: P) -> Self {
        Self::with_config(items, CarouselConfig::default(), presenter)
    }

    pub fn with_config(items: Vec<MediaItem>, config: CarouselConfig, presenter: P) -> Self {
        debug!(count = items.len(), "Carousel created");
        Self {
            items,
            current: 0,
            visible: false,
            gesture: GestureTracker::new(),
            config,
            presenter,
        }
    }

    /// Show the item at `index` (wrapped into range) and open the modal.
    pub fn open(&mut self, index: i64) {
        let Some(index) = self.wrap(index) else {
            trace!(index, "Ignoring open on empty carousel");
            return;
        };
        self.current = index;
        self.visible = true;
        self.presenter.set_modal_visible(true);
        self.render();
        self.presenter.set_background_scroll_locked(true);
        debug!(index, total = self.items.len(), "Carousel opened");
    }

    /// Hide the modal. Closing a closed carousel does nothing.
    pub fn close(&mut self) {
        if !self.visible {
            trace!("Carousel already closed");
            return;
        }
        self.visible = false;
        self.gesture.cancel();
        self.presenter.set_modal_visible(false);
        self.presenter.set_background_scroll_locked(false);
        debug!("Carousel closed");
    }

    /// Step one position, wrapping at both ends.
    pub fn navigate(&mut self, direction: Direction) {
        let total = self.items.len();
        if total == 0 {
            trace!(?direction, "Ignoring navigate on empty carousel");
            return;
        }
        self.current = match direction {
            Direction::Next => (self.current + 1) % total,
            Direction::Previous => (self.current + total - 1) % total,
        };
        debug!(?direction, index = self.current, "Carousel navigated");
        self.render();
    }

    /// Jump to `index`, wrapped into range.
    pub fn navigate_to(&mut self, index: i64) {
        let Some(wrapped) = self.wrap(index) else {
            trace!(index, "Ignoring navigate_to on empty carousel");
            return;
        };
        self.current = wrapped;
        debug!(requested = index, index = wrapped, "Carousel jumped");
        self.render();
    }

    pub fn handle_gesture_start(&mut self, x: f64, y: f64) {
        if !self.visible || self.items.is_empty() {
            trace!("Ignoring gesture start while closed");
            return;
        }
        self.gesture.start(Point::new(x, y));
    }

    /// Preview the drag without committing anything.
    pub fn handle_gesture_move(&mut self, x: f64, y: f64) {
        let Some(delta) = self.gesture.delta(Point::new(x, y)) else {
            trace!("Ignoring gesture move without start");
            return;
        };
        let axis = delta.axis();
        let opacity = match axis {
            Axis::Horizontal => 1.0,
            Axis::Vertical => self.config.preview_opacity(delta.dy),
        };
        let offset = delta.along(axis) * self.config.drag_damping;
        self.presenter.set_preview_transform(axis, offset, opacity);
    }

    /// Resolve the gesture: navigate, dismiss or snap back.
    pub fn handle_gesture_end(&mut self, x: f64, y: f64) {
        let Some(delta) = self.gesture.finish(Point::new(x, y)) else {
            trace!("Ignoring gesture end without start");
            return;
        };

        match SwipeResolution::resolve(delta, self.config.swipe_threshold) {
            SwipeResolution::Commit {
                axis: Axis::Horizontal,
                direction,
            } => {
                debug!(dx = delta.dx, dy = delta.dy, "Swipe navigation");
                self.presenter.slide_commit(direction);
                // Finger moving right reveals the previous item
                if delta.dx > 0.0 {
                    self.navigate(Direction::Previous);
                } else {
                    self.navigate(Direction::Next);
                }
            }
            SwipeResolution::Commit {
                axis: Axis::Vertical,
                direction,
            } => {
                debug!(dx = delta.dx, dy = delta.dy, "Swipe dismiss");
                self.presenter.slide_close_commit(direction);
                self.close();
            }
            SwipeResolution::SnapBack { .. } => {
                trace!(dx = delta.dx, dy = delta.dy, "Swipe too short");
                self.presenter.snap_back();
            }
        }
    }

    /// Abort the open gesture (touch-cancel).
    pub fn handle_gesture_cancel(&mut self) {
        if self.gesture.cancel() {
            self.presenter.snap_back();
        }
    }

    pub fn handle_key(&mut self, key: &Key) {
        if !self.visible {
            return;
        }
        match key.action() {
            Some(KeyAction::Close) => self.close(),
            Some(KeyAction::Navigate(direction)) => self.navigate(direction),
            None => trace!(?key, "Ignoring key"),
        }
    }

    pub fn handle_backdrop_click(&mut self, target: ClickTarget) {
        if target == ClickTarget::Backdrop {
            self.close();
        }
    }

    /// Current index, or `None` for an empty snapshot.
    pub fn current_index(&self) -> Option<usize> {
        (!self.items.is_empty()).then_some(self.current)
    }

    pub fn current_item(&self) -> Option<&MediaItem> {
        self.items.get(self.current)
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn is_dragging(&self) -> bool {
        self.gesture.is_active()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn items(&self) -> &[MediaItem] {
        &self.items
    }

    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    pub fn presenter_mut(&mut self) -> &mut P {
        &mut self.presenter
    }

    fn wrap(&self, index: i64) -> Option<usize> {
        let total = i64::try_from(self.items.len()).ok().filter(|n| *n > 0)?;
        Some(index.rem_euclid(total) as usize)
    }

    fn render(&mut self) {
        let Some(item) = self.items.get(self.current) else {
            return;
        };
        self.presenter.render_item(item);
        self.presenter
            .set_index_indicator(self.current + 1, self.items.len());
    }
}

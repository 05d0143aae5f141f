//! Hero slideshow: a looping sequence of slides with dot navigation,
//! horizontal touch/mouse swipes and a timed autoplay.
//!
//! Manual navigation (dot click, swipe) restarts the autoplay interval.
//! A slideshow with zero slides ignores every call.

use std::sync::Arc;

use parking_lot::Mutex;
use tokio::sync::Notify;
use tokio::task::JoinHandle;
use tracing::{debug, trace};

use crate::config::SlideshowConfig;
use crate::gesture::{Axis, GestureTracker, Point, SwipeDirection, SwipeResolution};

/// Pointer cursor shown over the slideshow area.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cursor {
    Grab,
    Grabbing,
}

/// Rendering side of the slideshow.
pub trait SlidePresenter {
    /// Mark slide `index` (and its dot) active, every other one inactive.
    fn show_slide(&mut self, index: usize);

    fn set_cursor(&mut self, cursor: Cursor);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlideCommand {
    Show(usize),
    Cursor(Cursor),
}

impl SlidePresenter for Vec<SlideCommand> {
    fn show_slide(&mut self, index: usize) {
        self.push(SlideCommand::Show(index));
    }

    fn set_cursor(&mut self, cursor: Cursor) {
        self.push(SlideCommand::Cursor(cursor));
    }
}

pub struct Slideshow<P: SlidePresenter> {
    count: usize,
    current: usize,
    touch: GestureTracker,
    mouse_start: Option<f64>,
    config: SlideshowConfig,
    restart: Option<Arc<Notify>>,
    presenter: P,
}

impl<P: SlidePresenter> std::fmt::Debug for Slideshow<P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Slideshow")
            .field("count", &self.count)
            .field("current", &self.current)
            .field("touch", &self.touch)
            .field("mouse_start", &self.mouse_start)
            .finish()
    }
}

impl<P: SlidePresenter> Slideshow<P> {
    pub fn new(count: usize, presenter: P) -> Self {
        Self::with_config(count, SlideshowConfig::default(), presenter)
    }

    pub fn with_config(count: usize, config: SlideshowConfig, presenter: P) -> Self {
        Self {
            count,
            current: 0,
            touch: GestureTracker::new(),
            mouse_start: None,
            config,
            restart: None,
            presenter,
        }
    }

    /// Autoplay step: advance without restarting the interval.
    pub fn tick(&mut self) {
        self.step(SwipeDirection::Left);
    }

    pub fn next(&mut self) {
        self.step(SwipeDirection::Left);
        self.restart_autoplay();
    }

    pub fn previous(&mut self) {
        self.step(SwipeDirection::Right);
        self.restart_autoplay();
    }

    /// Dot click. Indices without a slide are ignored.
    pub fn go_to(&mut self, index: usize) {
        if index >= self.count {
            trace!(index, count = self.count, "Ignoring dot without slide");
            return;
        }
        self.current = index;
        self.presenter.show_slide(index);
        self.restart_autoplay();
    }

    pub fn touch_start(&mut self, x: f64, y: f64) {
        if self.count == 0 {
            return;
        }
        self.touch.start(Point::new(x, y));
    }

    /// Returns whether the host should suppress native scrolling.
    pub fn touch_move(&mut self, x: f64, y: f64) -> bool {
        self.touch
            .delta(Point::new(x, y))
            .is_some_and(|delta| delta.axis() == Axis::Horizontal)
    }

    pub fn touch_end(&mut self, x: f64, y: f64) {
        let Some(delta) = self.touch.finish(Point::new(x, y)) else {
            return;
        };
        // Vertical drags scroll the page; they never change the slide.
        if let SwipeResolution::Commit {
            axis: Axis::Horizontal,
            direction,
        } = SwipeResolution::resolve(delta, self.config.swipe_threshold)
        {
            self.swipe(direction);
        }
    }

    pub fn mouse_down(&mut self, x: f64) {
        if self.count == 0 {
            return;
        }
        self.mouse_start = Some(x);
        self.presenter.set_cursor(Cursor::Grabbing);
    }

    /// Returns whether the host should suppress the default drag behaviour.
    pub fn mouse_move(&self) -> bool {
        self.mouse_start.is_some()
    }

    pub fn mouse_up(&mut self, x: f64) {
        let Some(start) = self.mouse_start.take() else {
            return;
        };
        self.presenter.set_cursor(Cursor::Grab);
        let dx = x - start;
        if dx.abs() > self.config.swipe_threshold {
            self.swipe(if dx > 0.0 {
                SwipeDirection::Right
            } else {
                SwipeDirection::Left
            });
        }
    }

    /// Pointer left the area; an unfinished drag is abandoned.
    pub fn mouse_leave(&mut self) {
        if self.mouse_start.take().is_some() {
            self.presenter.set_cursor(Cursor::Grab);
        }
    }

    pub fn current(&self) -> Option<usize> {
        (self.count > 0).then_some(self.current)
    }

    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    pub fn presenter_mut(&mut self) -> &mut P {
        &mut self.presenter
    }

    fn swipe(&mut self, direction: SwipeDirection) {
        debug!(?direction, "Slideshow swipe");
        match direction {
            SwipeDirection::Right => self.previous(),
            _ => self.next(),
        }
    }

    /// Left moves content toward the next slide, Right toward the previous.
    fn step(&mut self, direction: SwipeDirection) {
        if self.count == 0 {
            return;
        }
        self.current = match direction {
            SwipeDirection::Right => (self.current + self.count - 1) % self.count,
            _ => (self.current + 1) % self.count,
        };
        self.presenter.show_slide(self.current);
    }

    fn restart_autoplay(&self) {
        if let Some(restart) = &self.restart {
            restart.notify_one();
        }
    }
}

/// Background task advancing a shared slideshow on a fixed interval.
///
/// Dropping the handle stops the task.
#[derive(Debug)]
pub struct Autoplay {
    handle: Option<JoinHandle<()>>,
}

impl Autoplay {
    /// Spawn the autoplay loop. Must be called from within a tokio runtime.
    pub fn start<P>(slideshow: Arc<Mutex<Slideshow<P>>>) -> Self
    where
        P: SlidePresenter + Send + 'static,
    {
        let restart = Arc::new(Notify::new());
        let interval = {
            let mut show = slideshow.lock();
            if show.is_empty() {
                trace!("Autoplay not started for empty slideshow");
                return Self { handle: None };
            }
            show.restart = Some(Arc::clone(&restart));
            show.config.autoplay_interval
        };

        debug!(?interval, "Autoplay started");
        let handle = tokio::spawn(async move {
            loop {
                tokio::select! {
                    _ = tokio::time::sleep(interval) => slideshow.lock().tick(),
                    _ = restart.notified() => trace!("Autoplay interval restarted"),
                }
            }
        });

        Self {
            handle: Some(handle),
        }
    }

    pub fn is_running(&self) -> bool {
        self.handle.as_ref().is_some_and(|h| !h.is_finished())
    }

    pub fn stop(mut self) {
        self.abort();
    }

    fn abort(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
            debug!("Autoplay stopped");
        }
    }
}

impl Drop for Autoplay {
    fn drop(&mut self) {
        self.abort();
    }
}

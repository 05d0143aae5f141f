//! Timed transition driver.
//!
//! Turns high-level presenter commands into primitive [`SurfaceOp`]s and
//! schedules the follow-up steps of slide sequences on tokio timers:
//!
//! - navigation commit: slide out and fade, switch content, jump to the
//!   opposite side, slide back in after a short settle delay
//! - dismiss commit: slide out and fade, then hide the modal and reset
//!
//! Content and modal-hide commands that arrive while a sequence is still in
//! its slide-out phase are held back until the switch point.
//!
//! Timers are fire-and-forget. With [`TransitionPolicy::Overlap`] they are
//! never cancelled, so rapid swipes may visually overlap. With
//! [`TransitionPolicy::Supersede`] each sequence carries a generation number
//! and drops its remaining steps once a newer sequence has started. A
//! reopen of the modal counts as a new sequence: it restores the neutral
//! transform and forgets whatever older sequences were holding back.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use flume::Receiver;
use parking_lot::{Mutex, MutexGuard};
use tracing::{debug, trace};

use super::PresenterCommand;
use crate::config::{TransitionPolicy, TransitionTiming};
use crate::gesture::{Axis, SwipeDirection};
use crate::models::MediaItem;

/// Position of the viewer surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Offset {
    Neutral,
    /// In-progress drag along `axis`.
    Drag { axis: Axis, pixels: f64 },
    /// Fully off-screen on the side `direction` points to.
    OffScreen(SwipeDirection),
}

/// Primitive operation on the display surface.
#[derive(Debug, Clone, PartialEq)]
pub enum SurfaceOp {
    ShowItem(MediaItem),
    Indicator { one_based_index: usize, total: usize },
    Transform {
        offset: Offset,
        opacity: f64,
        animated: bool,
    },
    ScrollLocked(bool),
    ModalVisible(bool),
}

/// The actual display (DOM, terminal, widget toolkit).
pub trait Surface: Send + 'static {
    fn apply(&mut self, op: SurfaceOp);
}

impl Surface for Vec<SurfaceOp> {
    fn apply(&mut self, op: SurfaceOp) {
        self.push(op);
    }
}

#[derive(Debug, Default)]
struct Deferred {
    /// Slide sequences that have not reached their switch point.
    sliding: usize,
    /// Dismiss sequences that have not finished.
    closing: usize,
    item: Option<MediaItem>,
    indicator: Option<(usize, usize)>,
    hide_modal: bool,
    unlock_scroll: bool,
}

pub struct TransitionDriver<S: Surface> {
    surface: Arc<Mutex<S>>,
    timing: TransitionTiming,
    generation: Arc<AtomicU64>,
    deferred: Arc<Mutex<Deferred>>,
}

impl<S: Surface> Clone for TransitionDriver<S> {
    fn clone(&self) -> Self {
        Self {
            surface: Arc::clone(&self.surface),
            timing: self.timing.clone(),
            generation: Arc::clone(&self.generation),
            deferred: Arc::clone(&self.deferred),
        }
    }
}

impl<S: Surface> std::fmt::Debug for TransitionDriver<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TransitionDriver")
            .field("timing", &self.timing)
            .field("generation", &self.generation.load(Ordering::Relaxed))
            .field("surface", &"<surface>")
            .finish()
    }
}

impl<S: Surface> TransitionDriver<S> {
    pub fn new(surface: S, timing: TransitionTiming) -> Self {
        Self {
            surface: Arc::new(Mutex::new(surface)),
            timing,
            generation: Arc::new(AtomicU64::new(0)),
            deferred: Arc::new(Mutex::new(Deferred::default())),
        }
    }

    /// Shared handle to the underlying surface.
    pub fn surface(&self) -> Arc<Mutex<S>> {
        Arc::clone(&self.surface)
    }

    /// Consume commands until every sender is dropped.
    pub async fn run(self, rx: Receiver<PresenterCommand>) {
        debug!("Transition driver started");
        while let Ok(command) = rx.recv_async().await {
            self.handle(command);
        }
        debug!("Transition driver stopped");
    }

    /// Apply one command. Must be called from within a tokio runtime.
    pub fn handle(&self, command: PresenterCommand) {
        trace!(?command, "Presenter command");
        match command {
            PresenterCommand::RenderItem(item) => {
                let mut deferred = self.deferred.lock();
                if deferred.sliding > 0 {
                    deferred.item = Some(item);
                } else {
                    drop(deferred);
                    self.apply(SurfaceOp::ShowItem(item));
                }
            }
            PresenterCommand::IndexIndicator {
                one_based_index,
                total,
            } => {
                let mut deferred = self.deferred.lock();
                if deferred.sliding > 0 {
                    deferred.indicator = Some((one_based_index, total));
                } else {
                    drop(deferred);
                    self.apply(SurfaceOp::Indicator {
                        one_based_index,
                        total,
                    });
                }
            }
            PresenterCommand::PreviewTransform {
                axis,
                delta_pixels,
                opacity,
            } => self.apply(SurfaceOp::Transform {
                offset: Offset::Drag {
                    axis,
                    pixels: delta_pixels,
                },
                opacity,
                animated: false,
            }),
            PresenterCommand::SnapBack => self.apply(neutral(true)),
            PresenterCommand::SlideCommit(direction) => self.start_slide(direction),
            PresenterCommand::SlideCloseCommit(direction) => self.start_dismiss(direction),
            PresenterCommand::ScrollLocked(false) => {
                let mut deferred = self.deferred.lock();
                if deferred.closing > 0 {
                    deferred.unlock_scroll = true;
                } else {
                    drop(deferred);
                    self.apply(SurfaceOp::ScrollLocked(false));
                }
            }
            PresenterCommand::ModalVisible(false) => {
                let mut deferred = self.deferred.lock();
                if deferred.closing > 0 {
                    deferred.hide_modal = true;
                } else {
                    drop(deferred);
                    self.apply(SurfaceOp::ModalVisible(false));
                }
            }
            PresenterCommand::ScrollLocked(true) => self.apply(SurfaceOp::ScrollLocked(true)),
            PresenterCommand::ModalVisible(true) => {
                if self.timing.policy == TransitionPolicy::Supersede {
                    let (generation, deferred) = self.begin_sequence();
                    drop(deferred);
                    debug!(generation, "Reopen superseded running sequences");
                    self.apply(SurfaceOp::ModalVisible(true));
                    self.apply(neutral(false));
                } else {
                    self.apply(SurfaceOp::ModalVisible(true));
                }
            }
        }
    }

    fn apply(&self, op: SurfaceOp) {
        self.surface.lock().apply(op);
    }

    /// Bump the generation while holding the deferred state. Under
    /// `Supersede` everything older sequences held back is dropped.
    fn begin_sequence(&self) -> (u64, MutexGuard<'_, Deferred>) {
        let mut deferred = self.deferred.lock();
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        if self.timing.policy == TransitionPolicy::Supersede {
            *deferred = Deferred::default();
        }
        (generation, deferred)
    }

    fn is_stale(&self, generation: u64) -> bool {
        self.timing.policy == TransitionPolicy::Supersede
            && self.generation.load(Ordering::SeqCst) != generation
    }

    fn start_slide(&self, direction: SwipeDirection) {
        let (generation, mut deferred) = self.begin_sequence();
        deferred.sliding += 1;
        drop(deferred);
        self.apply(off_screen(direction));
        debug!(?direction, generation, "Slide sequence started");

        let driver = self.clone();
        tokio::spawn(async move {
            tokio::time::sleep(driver.timing.slide).await;

            {
                let mut deferred = driver.deferred.lock();
                if driver.is_stale(generation) {
                    trace!(generation, "Slide sequence superseded");
                    return;
                }
                deferred.sliding = deferred.sliding.saturating_sub(1);
                let item = deferred.item.take();
                let indicator = deferred.indicator.take();
                drop(deferred);

                let mut surface = driver.surface.lock();
                if let Some(item) = item {
                    surface.apply(SurfaceOp::ShowItem(item));
                }
                if let Some((one_based_index, total)) = indicator {
                    surface.apply(SurfaceOp::Indicator {
                        one_based_index,
                        total,
                    });
                }
                surface.apply(SurfaceOp::Transform {
                    offset: Offset::OffScreen(direction.opposite()),
                    opacity: 0.0,
                    animated: false,
                });
            }

            tokio::time::sleep(driver.timing.settle).await;
            if driver.is_stale(generation) {
                trace!(generation, "Slide-in superseded");
                return;
            }
            driver.apply(neutral(true));
        });
    }

    fn start_dismiss(&self, direction: SwipeDirection) {
        let (generation, mut deferred) = self.begin_sequence();
        deferred.closing += 1;
        drop(deferred);
        self.apply(off_screen(direction));
        debug!(?direction, generation, "Dismiss sequence started");

        let driver = self.clone();
        tokio::spawn(async move {
            tokio::time::sleep(driver.timing.slide).await;

            let mut deferred = driver.deferred.lock();
            if driver.is_stale(generation) {
                trace!(generation, "Dismiss sequence superseded");
                return;
            }
            deferred.closing = deferred.closing.saturating_sub(1);
            let hide = std::mem::take(&mut deferred.hide_modal);
            let unlock = std::mem::take(&mut deferred.unlock_scroll);
            drop(deferred);

            let mut surface = driver.surface.lock();
            if hide {
                surface.apply(SurfaceOp::ModalVisible(false));
            }
            if unlock {
                surface.apply(SurfaceOp::ScrollLocked(false));
            }
            surface.apply(neutral(false));
        });
    }
}

fn neutral(animated: bool) -> SurfaceOp {
    SurfaceOp::Transform {
        offset: Offset::Neutral,
        opacity: 1.0,
        animated,
    }
}

fn off_screen(direction: SwipeDirection) -> SurfaceOp {
    SurfaceOp::Transform {
        offset: Offset::OffScreen(direction),
        opacity: 0.0,
        animated: true,
    }
}

//! Rendering boundary of the carousel.
//!
//! The controller never draws anything itself. It issues commands to a
//! [`Presenter`], which owns every visual detail including animation timing.
//!
//! - `ChannelPresenter` - forwards commands over a flume channel
//! - `TransitionDriver` - expands commands into timed surface operations

pub mod channel;
pub mod transition;

pub use channel::ChannelPresenter;
pub use transition::{Offset, Surface, SurfaceOp, TransitionDriver};

use crate::gesture::{Axis, SwipeDirection};
use crate::models::MediaItem;

/// Receiver of presentation commands.
pub trait Presenter {
    /// Display `item` in the viewer surface.
    fn render_item(&mut self, item: &MediaItem);

    /// Apply an uncommitted offset while a drag is in progress.
    fn set_preview_transform(&mut self, axis: Axis, delta_pixels: f64, opacity: f64);

    /// Animate the viewer surface back to the neutral transform.
    fn snap_back(&mut self);

    /// Run the off-screen/on-screen sequence for a committed navigation.
    fn slide_commit(&mut self, direction: SwipeDirection);

    /// Run the off-screen sequence and hide the modal for a committed dismiss.
    fn slide_close_commit(&mut self, direction: SwipeDirection);

    fn set_background_scroll_locked(&mut self, locked: bool);

    /// Update the "N of M" text.
    fn set_index_indicator(&mut self, one_based_index: usize, total: usize);

    fn set_modal_visible(&mut self, visible: bool);
}

impl<P: Presenter + ?Sized> Presenter for &mut P {
    fn render_item(&mut self, item: &MediaItem) {
        (**self).render_item(item)
    }

    fn set_preview_transform(&mut self, axis: Axis, delta_pixels: f64, opacity: f64) {
        (**self).set_preview_transform(axis, delta_pixels, opacity)
    }

    fn snap_back(&mut self) {
        (**self).snap_back()
    }

    fn slide_commit(&mut self, direction: SwipeDirection) {
        (**self).slide_commit(direction)
    }

    fn slide_close_commit(&mut self, direction: SwipeDirection) {
        (**self).slide_close_commit(direction)
    }

    fn set_background_scroll_locked(&mut self, locked: bool) {
        (**self).set_background_scroll_locked(locked)
    }

    fn set_index_indicator(&mut self, one_based_index: usize, total: usize) {
        (**self).set_index_indicator(one_based_index, total)
    }

    fn set_modal_visible(&mut self, visible: bool) {
        (**self).set_modal_visible(visible)
    }
}

/// Owned form of a [`Presenter`] call.
#[derive(Debug, Clone, PartialEq)]
pub enum PresenterCommand {
    RenderItem(MediaItem),
    PreviewTransform {
        axis: Axis,
        delta_pixels: f64,
        opacity: f64,
    },
    SnapBack,
    SlideCommit(SwipeDirection),
    SlideCloseCommit(SwipeDirection),
    ScrollLocked(bool),
    IndexIndicator {
        one_based_index: usize,
        total: usize,
    },
    ModalVisible(bool),
}

impl PresenterCommand {
    /// Replay this command on another presenter.
    pub fn dispatch<P: Presenter + ?Sized>(&self, presenter: &mut P) {
        match self {
            Self::RenderItem(item) => presenter.render_item(item),
            Self::PreviewTransform {
                axis,
                delta_pixels,
                opacity,
            } => presenter.set_preview_transform(*axis, *delta_pixels, *opacity),
            Self::SnapBack => presenter.snap_back(),
            Self::SlideCommit(direction) => presenter.slide_commit(*direction),
            Self::SlideCloseCommit(direction) => presenter.slide_close_commit(*direction),
            Self::ScrollLocked(locked) => presenter.set_background_scroll_locked(*locked),
            Self::IndexIndicator {
                one_based_index,
                total,
            } => presenter.set_index_indicator(*one_based_index, *total),
            Self::ModalVisible(visible) => presenter.set_modal_visible(*visible),
        }
    }
}

/// Presenter that keeps every command it receives, in order.
#[derive(Debug, Clone, Default)]
pub struct RecordingPresenter {
    commands: Vec<PresenterCommand>,
}

impl RecordingPresenter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> &[PresenterCommand] {
        &self.commands
    }

    /// Drain the recorded commands.
    pub fn take(&mut self) -> Vec<PresenterCommand> {
        std::mem::take(&mut self.commands)
    }

    fn push(&mut self, command: PresenterCommand) {
        self.commands.push(command);
    }
}

impl Presenter for RecordingPresenter {
    fn render_item(&mut self, item: &MediaItem) {
        self.push(PresenterCommand::RenderItem(item.clone()));
    }

    fn set_preview_transform(&mut self, axis: Axis, delta_pixels: f64, opacity: f64) {
        self.push(PresenterCommand::PreviewTransform {
            axis,
            delta_pixels,
            opacity,
        });
    }

    fn snap_back(&mut self) {
        self.push(PresenterCommand::SnapBack);
    }

    fn slide_commit(&mut self, direction: SwipeDirection) {
        self.push(PresenterCommand::SlideCommit(direction));
    }

    fn slide_close_commit(&mut self, direction: SwipeDirection) {
        self.push(PresenterCommand::SlideCloseCommit(direction));
    }

    fn set_background_scroll_locked(&mut self, locked: bool) {
        self.push(PresenterCommand::ScrollLocked(locked));
    }

    fn set_index_indicator(&mut self, one_based_index: usize, total: usize) {
        self.push(PresenterCommand::IndexIndicator {
            one_based_index,
            total,
        });
    }

    fn set_modal_visible(&mut self, visible: bool) {
        self.push(PresenterCommand::ModalVisible(visible));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dispatch_replays_in_order() {
        let commands = vec![
            PresenterCommand::ModalVisible(true),
            PresenterCommand::RenderItem(MediaItem::new("a.png", "A")),
            PresenterCommand::IndexIndicator {
                one_based_index: 1,
                total: 3,
            },
            PresenterCommand::SlideCommit(SwipeDirection::Left),
        ];

        let mut recorder = RecordingPresenter::new();
        for command in &commands {
            command.dispatch(&mut recorder);
        }
        assert_eq!(recorder.take(), commands);
        assert!(recorder.commands().is_empty());
    }

    #[test]
    fn test_mut_ref_forwards() {
        fn drive<P: Presenter>(mut presenter: P) {
            presenter.snap_back();
            presenter.set_background_scroll_locked(true);
        }

        let mut recorder = RecordingPresenter::new();
        drive(&mut recorder);
        assert_eq!(
            recorder.commands(),
            &[
                PresenterCommand::SnapBack,
                PresenterCommand::ScrollLocked(true)
            ]
        );
    }
}

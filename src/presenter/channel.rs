use flume::{Receiver, Sender};
use tracing::warn;

use super::{Presenter, PresenterCommand};
use crate::gesture::{Axis, SwipeDirection};
use crate::models::MediaItem;

/// Presenter that forwards every command to a receiver on another task.
///
/// Sending never blocks. Once the receiving side is gone, commands are dropped
/// and a single warning is logged.
#[derive(Debug, Clone)]
pub struct ChannelPresenter {
    tx: Sender<PresenterCommand>,
    disconnected: bool,
}

impl ChannelPresenter {
    pub fn new() -> (Self, Receiver<PresenterCommand>) {
        let (tx, rx) = flume::unbounded();
        (Self::from_sender(tx), rx)
    }

    pub fn from_sender(tx: Sender<PresenterCommand>) -> Self {
        Self {
            tx,
            disconnected: false,
        }
    }

    fn send(&mut self, command: PresenterCommand) {
        if self.tx.send(command).is_err() && !self.disconnected {
            warn!("Presenter channel disconnected, dropping commands");
            self.disconnected = true;
        }
    }
}

impl Presenter for ChannelPresenter {
    fn render_item(&mut self, item: &MediaItem) {
        self.send(PresenterCommand::RenderItem(item.clone()));
    }

    fn set_preview_transform(&mut self, axis: Axis, delta_pixels: f64, opacity: f64) {
        self.send(PresenterCommand::PreviewTransform {
            axis,
            delta_pixels,
            opacity,
        });
    }

    fn snap_back(&mut self) {
        self.send(PresenterCommand::SnapBack);
    }

    fn slide_commit(&mut self, direction: SwipeDirection) {
        self.send(PresenterCommand::SlideCommit(direction));
    }

    fn slide_close_commit(&mut self, direction: SwipeDirection) {
        self.send(PresenterCommand::SlideCloseCommit(direction));
    }

    fn set_background_scroll_locked(&mut self, locked: bool) {
        self.send(PresenterCommand::ScrollLocked(locked));
    }

    fn set_index_indicator(&mut self, one_based_index: usize, total: usize) {
        self.send(PresenterCommand::IndexIndicator {
            one_based_index,
            total,
        });
    }

    fn set_modal_visible(&mut self, visible: bool) {
        self.send(PresenterCommand::ModalVisible(visible));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_commands_arrive_in_order() {
        let (mut presenter, rx) = ChannelPresenter::new();
        presenter.set_modal_visible(true);
        presenter.slide_commit(SwipeDirection::Right);

        let received: Vec<_> = rx.try_iter().collect();
        assert_eq!(
            received,
            vec![
                PresenterCommand::ModalVisible(true),
                PresenterCommand::SlideCommit(SwipeDirection::Right),
            ]
        );
    }

    #[test]
    fn test_send_after_disconnect_is_silent() {
        let (mut presenter, rx) = ChannelPresenter::new();
        drop(rx);
        presenter.snap_back();
        presenter.snap_back();
        assert!(presenter.disconnected);
    }
}

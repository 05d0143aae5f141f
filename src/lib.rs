//! Modal media carousel with gesture-driven navigation, plus the hero
//! slideshow and gallery filter of the same page.
//!
//! The state machines are independent of any UI toolkit: hosts feed events
//! into [`carousel::CarouselController`] and [`slideshow::Slideshow`] and
//! render whatever arrives at their presenter.

pub mod carousel;
pub mod config;
pub mod gallery;
pub mod gesture;
pub mod models;
pub mod presenter;
pub mod shell;
pub mod slideshow;

pub use carousel::{CarouselController, ClickTarget, Direction, Key};
pub use models::MediaItem;
pub use presenter::Presenter;

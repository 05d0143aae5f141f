pub mod controller;
pub mod keys;

pub use controller::*;
pub use keys::*;

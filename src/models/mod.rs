pub mod media_item;
pub mod media_set;

pub use media_item::*;
pub use media_set::*;
